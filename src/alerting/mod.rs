//! Alert rule editing: per-check-type drafts kept for the length of one editor
//! session and expanded into persistable rules on submit.

pub mod check_type;
pub mod defaults;
pub mod editor;
pub mod normalizer;
pub mod preview;
pub mod session_store;
pub mod submission;
pub mod targets;
pub mod thresholds;

pub use check_type::CheckType;
pub use defaults::{defaults_for, SYSTEM_WIDE};
pub use preview::TargetStatus;
pub use session_store::{ModifiedSet, SessionStore};
pub use targets::{resolve_targets, TargetCandidate};
pub use thresholds::{Severity, ThresholdRule};
