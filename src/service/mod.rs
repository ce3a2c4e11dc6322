pub mod aggregate;
pub mod classify;
pub mod explain;
pub mod graph;
pub mod reconcile;
pub mod risk;

pub use aggregate::{KpiSummary, MismatchTypeSummary};
pub use reconcile::{MutationOutcome, ReconcileService, SaveMode};
pub use risk::RiskAssessment;
