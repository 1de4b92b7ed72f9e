// End-to-End Counter Simulation
//
// Runs a full scripted session:
// config → seeded store → session → replay → final catalog state

use serde::Serialize;
use tracing::info;

use crate::catalog::CatalogEntry;
use crate::config::StoreConfig;
use crate::invariants::InvariantEngine;
use crate::log::AdminLogEntry;
use crate::orders::OrderReceipt;
use crate::replay::{replay_session, ReplayError, SessionReport};
use crate::session::{Command, Session};

/// Result of a full simulation run.
#[derive(Debug, Serialize)]
pub struct SimulationResult {
    pub report: SessionReport,
    pub catalog: Vec<CatalogEntry>,
    pub admin_log: Vec<AdminLogEntry>,
    pub orders: Vec<OrderReceipt>,
    pub revenue: f64,
}

/// Errors that can occur during simulation.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error("replay failed: {0}")]
    Replay(#[from] ReplayError),
}

/// Run a scripted session against a freshly seeded store.
pub fn simulate_session(
    config: &StoreConfig,
    commands: Vec<Command>,
    invariants: &InvariantEngine,
) -> Result<SimulationResult, SimulationError> {
    // 1. Seed the store
    let store = config.build_store();
    invariants.evaluate(&store).map_err(|source| ReplayError::Invariant {
        step: 0,
        source,
    })?;

    // 2. Replay the session
    let mut session = Session::new(store, config.admin.clone());
    let report = replay_session(&mut session, commands, invariants)?;

    // 3. Snapshot final state
    let store = session.into_store();
    info!(
        steps = report.steps.len(),
        items = store.len(),
        revenue = store.revenue(),
        "session complete"
    );

    Ok(SimulationResult {
        report,
        catalog: store.list_all().into_iter().cloned().collect(),
        admin_log: store.log().cloned().collect(),
        orders: store.orders().cloned().collect(),
        revenue: store.revenue(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FoodId;

    fn ids(result: &SimulationResult) -> Vec<FoodId> {
        result.catalog.iter().map(|e| e.id).collect()
    }

    #[test]
    fn full_session_pipeline_runs() {
        let commands: Vec<Command> = serde_json::from_str(
            r#"[
                { "op": "order", "id": 2, "quantity": 3 },
                { "op": "login", "username": "admin", "password": "pass" },
                { "op": "insert", "id": 7, "name": "Fries", "price": 2.0, "stock": 40, "category": "Sides" },
                { "op": "delete", "id": 4 },
                { "op": "note", "text": "closing" }
            ]"#,
        )
        .unwrap();

        let result = simulate_session(
            &StoreConfig::default_config(),
            commands,
            &InvariantEngine::with_defaults(),
        )
        .unwrap();

        assert_eq!(result.report.rejected().count(), 0);
        assert_eq!(ids(&result), vec![1, 2, 3, 5, 7]);
        assert_eq!(result.orders.len(), 1);
        assert!((result.revenue - 26.97).abs() < 1e-9);

        // 5 seed inserts + insert + delete + note
        assert_eq!(result.admin_log.len(), 8);
        assert_eq!(result.admin_log[0].message, "closing");
        assert_eq!(result.admin_log[1].message, "Deleted Food Item: Ice Cream");
    }

    #[test]
    fn empty_session_returns_seed_state() {
        let result = simulate_session(
            &StoreConfig::default_config(),
            Vec::new(),
            &InvariantEngine::with_defaults(),
        )
        .unwrap();

        assert!(result.report.steps.is_empty());
        assert_eq!(ids(&result), vec![1, 2, 3, 4, 5]);
        assert_eq!(result.revenue, 0.0);
    }
}
