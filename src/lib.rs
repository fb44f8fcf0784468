pub mod alerting;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod persistence;

pub use alerting::editor::{RuleDispatch, RuleEditor, SubmitOutcome};
pub use alerting::CheckType;
pub use config::EditorConfig;
pub use error::EditorError;
