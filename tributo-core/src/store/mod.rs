//! Carry-forward parameter storage.
//!
//! The engine itself does not persist anything; this module defines the
//! seam through which the surrounding application supplies stored
//! carry-forward parameters and receives computed closing balances. Only
//! an in-memory implementation ships with the engine.

mod carry_forward_store;

pub use carry_forward_store::{
    CarryForwardStore, InMemoryCarryForwardStore, StoreError, lookup_or_default,
};
