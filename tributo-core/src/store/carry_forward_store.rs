use std::collections::HashMap;
use std::sync::Mutex;

use thiserror::Error;
use tracing::warn;

use crate::models::{CarryForwardParameters, FiscalPeriod, TenantId};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Keyed storage for carry-forward parameters, scoped by tenant and
/// fiscal period.
///
/// Implementations take `&self` and are expected to handle their own
/// interior mutability; different tenants may be computed in parallel.
/// The orchestrator is the single writer of closing balances — other
/// callers should treat this store as read-only.
pub trait CarryForwardStore: Send + Sync {
    fn get(
        &self,
        tenant: &TenantId,
        period: FiscalPeriod,
    ) -> Result<Option<CarryForwardParameters>, StoreError>;

    fn put(
        &self,
        tenant: &TenantId,
        period: FiscalPeriod,
        params: CarryForwardParameters,
    ) -> Result<(), StoreError>;
}

/// Reads the parameters for a period, substituting neutral defaults when
/// none exist so a downstream computation always has something to work
/// with. The substitution is logged: a missing period understates credit
/// if history genuinely exists elsewhere.
pub fn lookup_or_default(
    store: &dyn CarryForwardStore,
    tenant: &TenantId,
    period: FiscalPeriod,
) -> Result<CarryForwardParameters, StoreError> {
    match store.get(tenant, period)? {
        Some(params) => Ok(params),
        None => {
            warn!(
                %tenant,
                %period,
                "no carry-forward parameters stored; using neutral defaults"
            );
            Ok(CarryForwardParameters::neutral())
        }
    }
}

/// In-memory store over a mutex-guarded map. The engine's only shipped
/// backend; production deployments implement `CarryForwardStore` over
/// their own persistence.
#[derive(Debug, Default)]
pub struct InMemoryCarryForwardStore {
    entries: Mutex<HashMap<(TenantId, FiscalPeriod), CarryForwardParameters>>,
}

impl InMemoryCarryForwardStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CarryForwardStore for InMemoryCarryForwardStore {
    fn get(
        &self,
        tenant: &TenantId,
        period: FiscalPeriod,
    ) -> Result<Option<CarryForwardParameters>, StoreError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(entries.get(&(tenant.clone(), period)).cloned())
    }

    fn put(
        &self,
        tenant: &TenantId,
        period: FiscalPeriod,
        params: CarryForwardParameters,
    ) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        entries.insert((tenant.clone(), period), params);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn sample_params() -> CarryForwardParameters {
        CarryForwardParameters {
            inflation_index_start: dec!(2.35),
            inflation_index_end: dec!(2.41),
            opening_credit_balance: dec!(650.00),
            closing_credit_balance: dec!(0),
        }
    }

    #[test]
    fn get_returns_none_for_unknown_period() {
        let store = InMemoryCarryForwardStore::new();
        let tenant = TenantId::from("acme");
        let period = FiscalPeriod::new(2024, 1).unwrap();

        assert_eq!(store.get(&tenant, period).unwrap(), None);
    }

    #[test]
    fn put_then_get_round_trips() {
        let store = InMemoryCarryForwardStore::new();
        let tenant = TenantId::from("acme");
        let period = FiscalPeriod::new(2024, 1).unwrap();

        store.put(&tenant, period, sample_params()).unwrap();

        assert_eq!(store.get(&tenant, period).unwrap(), Some(sample_params()));
    }

    #[test]
    fn tenants_are_isolated() {
        let store = InMemoryCarryForwardStore::new();
        let period = FiscalPeriod::new(2024, 1).unwrap();

        store
            .put(&TenantId::from("acme"), period, sample_params())
            .unwrap();

        assert_eq!(store.get(&TenantId::from("globex"), period).unwrap(), None);
    }

    #[test]
    fn lookup_or_default_returns_stored_params() {
        let store = InMemoryCarryForwardStore::new();
        let tenant = TenantId::from("acme");
        let period = FiscalPeriod::new(2024, 1).unwrap();
        store.put(&tenant, period, sample_params()).unwrap();

        let params = lookup_or_default(&store, &tenant, period).unwrap();

        assert_eq!(params, sample_params());
    }

    #[test]
    fn lookup_or_default_substitutes_neutral_defaults() {
        let store = InMemoryCarryForwardStore::new();
        let tenant = TenantId::from("acme");
        let period = FiscalPeriod::new(2024, 1).unwrap();

        let params = lookup_or_default(&store, &tenant, period).unwrap();

        assert_eq!(params, CarryForwardParameters::neutral());
    }
}
