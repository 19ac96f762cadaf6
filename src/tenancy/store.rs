//! Read-only tenant store.

use std::collections::HashMap;
use std::sync::Arc;

use crate::tenancy::context::TenantKey;
use crate::tenancy::types::TenantRecord;

/// In-memory keyed collection of tenants.
///
/// Built once at startup and shared via `Arc`; never mutated afterwards.
#[derive(Debug, Default)]
pub struct TenantStore {
    tenants: HashMap<String, Arc<TenantRecord>>,
}

impl TenantStore {
    /// Build a store from tenant records.
    ///
    /// A later record with the same id replaces an earlier one; config
    /// validation rejects duplicates before they get here.
    pub fn new(records: impl IntoIterator<Item = TenantRecord>) -> Self {
        let tenants = records
            .into_iter()
            .map(|record| (record.id.clone(), Arc::new(record)))
            .collect();
        Self { tenants }
    }

    /// Exact-match lookup. `TenantKey::Unknown` never matches.
    pub fn lookup(&self, key: &TenantKey) -> Option<Arc<TenantRecord>> {
        match key {
            TenantKey::Provided(id) => self.tenants.get(id).cloned(),
            TenantKey::Unknown => None,
        }
    }

    pub fn len(&self) -> usize {
        self.tenants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tenants.is_empty()
    }
}
