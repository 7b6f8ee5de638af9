pub mod calculations;
pub mod models;
pub mod store;

pub use models::*;
pub use store::{CarryForwardStore, InMemoryCarryForwardStore, StoreError, lookup_or_default};
