// Invariant Framework
//
// Invariants are pure rules that must always hold for a catalog
// store. They are evaluated after every replayed command so a broken
// tree or ledger is caught at the step that broke it.

use crate::catalog::CatalogStore;

/// Tolerance when comparing accumulated money amounts.
pub const REVENUE_EPSILON: f64 = 1e-6;

/// Result of invariant evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantResult {
    Pass,
    Fail(String),
}

/// Trait implemented by all invariants.
///
/// Invariants must be:
/// - Pure
/// - Deterministic
/// - Side-effect free
pub trait CatalogInvariant: Send + Sync {
    fn name(&self) -> &'static str;

    fn validate(&self, store: &CatalogStore) -> InvariantResult;
}

/// In-order listing is strictly ascending: BST ordering holds and ids
/// are unique.
pub struct AscendingKeys;

impl CatalogInvariant for AscendingKeys {
    fn name(&self) -> &'static str {
        "ascending-keys"
    }

    fn validate(&self, store: &CatalogStore) -> InvariantResult {
        let listing = store.list_all();
        if listing.len() != store.len() {
            return InvariantResult::Fail(format!(
                "listing has {} entries, store reports {}",
                listing.len(),
                store.len()
            ));
        }
        for pair in listing.windows(2) {
            if pair[0].id >= pair[1].id {
                return InvariantResult::Fail(format!(
                    "id {} listed before id {}",
                    pair[0].id, pair[1].id
                ));
            }
        }
        InvariantResult::Pass
    }
}

/// Accrued revenue equals the sum of recorded receipts.
pub struct RevenueMatchesOrders;

impl CatalogInvariant for RevenueMatchesOrders {
    fn name(&self) -> &'static str {
        "revenue-matches-orders"
    }

    fn validate(&self, store: &CatalogStore) -> InvariantResult {
        let expected: f64 = store.orders().map(|r| r.total).sum();
        if (store.revenue() - expected).abs() > REVENUE_EPSILON {
            InvariantResult::Fail(format!(
                "revenue {} does not match receipts total {}",
                store.revenue(),
                expected
            ))
        } else {
            InvariantResult::Pass
        }
    }
}

/// Invariant engine that evaluates a set of invariants.
#[derive(Default)]
pub struct InvariantEngine {
    invariants: Vec<Box<dyn CatalogInvariant>>,
}

impl InvariantEngine {
    /// Create an engine with no invariants registered.
    pub fn new() -> Self {
        Self {
            invariants: Vec::new(),
        }
    }

    /// Create an engine with the built-in catalog invariants.
    pub fn with_defaults() -> Self {
        let mut engine = Self::new();
        engine.register(AscendingKeys);
        engine.register(RevenueMatchesOrders);
        engine
    }

    /// Register an invariant.
    pub fn register<I: CatalogInvariant + 'static>(&mut self, invariant: I) {
        self.invariants.push(Box::new(invariant));
    }

    pub fn len(&self) -> usize {
        self.invariants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.invariants.is_empty()
    }

    /// Evaluate all invariants.
    ///
    /// Stops at the first failure.
    pub fn evaluate(&self, store: &CatalogStore) -> Result<(), InvariantViolation> {
        for invariant in &self.invariants {
            match invariant.validate(store) {
                InvariantResult::Pass => continue,
                InvariantResult::Fail(reason) => {
                    return Err(InvariantViolation {
                        invariant: invariant.name(),
                        reason,
                    })
                }
            }
        }
        Ok(())
    }
}

/// Returned when an invariant is violated.
#[derive(Debug, thiserror::Error)]
#[error("invariant `{invariant}` violated: {reason}")]
pub struct InvariantViolation {
    pub invariant: &'static str,
    pub reason: String,
}
