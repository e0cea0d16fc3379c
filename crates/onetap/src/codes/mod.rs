//! Single-use code lifecycle: generation, storage, and redemption.
//!
//! A code moves `Unissued -> Issued -> Redeemed`. Redeemed is terminal;
//! the store keeps no memory of it, so a regenerated identical value would
//! be a fresh code.

mod generator;
mod store;
mod watcher;

pub use generator::CodeGenerator;
pub use store::CodeStore;
pub use watcher::store_watcher;
