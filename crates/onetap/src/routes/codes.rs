//! Code issuing and redemption endpoints.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use onetap_common::constants::messages;
use onetap_common::{CodeError, GenerateCodeResponse, MessageResponse, VerifyCodeRequest};

use crate::error::ApiError;
use crate::state::AppState;

/// Issue a new code
pub async fn generate_code(
    State(state): State<AppState>,
) -> Result<Json<GenerateCodeResponse>, ApiError> {
    let code = state.generator.generate()?;
    let value = code.value.clone();
    state.store.issue(code)?;

    Ok(Json(GenerateCodeResponse {
        code: value,
        message: messages::CODE_GENERATED.to_string(),
    }))
}

/// Redeem a code
///
/// Returns:
/// - 200: Code was outstanding and is now consumed
/// - 400: Body has no usable `code`
/// - 401: Code unknown or already consumed
pub async fn verify_code(
    State(state): State<AppState>,
    payload: Result<Json<VerifyCodeRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    // Unparseable bodies count as a missing code
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "Unreadable verify request");
            VerifyCodeRequest::default()
        }
    };

    let code = request.code().ok_or(CodeError::MissingInput)?;

    if state.store.redeem(code) {
        Ok(Json(MessageResponse::new(messages::CODE_VERIFIED)))
    } else {
        Err(CodeError::InvalidOrConsumed.into())
    }
}
