pub mod alert;
pub mod audit;
pub mod graph;
pub mod invoice;
pub mod vendor;

pub use alert::{Alert, AlertKind};
pub use audit::AuditExplanation;
pub use graph::{EdgeKind, GraphEdge, GraphNode, GraphView, NodeGroup, ReturnType};
pub use invoice::{Invoice, InvoiceDraft, MatchStatus, RiskLevel};
pub use vendor::{RiskFeatures, Vendor, VendorDraft, VendorStatus};
