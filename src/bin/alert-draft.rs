use clap::Parser;
use serde::Deserialize;
use serde_json::json;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

use nodenexus_alert_editor::{
    config::{load_config, EditorConfig},
    error::EditorError,
    logging::{init_logging, LogOptions},
    models::{
        alert_models::{DraftPatch, ExistingRule, MonitoringRule},
        telemetry_models::TelemetrySnapshot,
    },
    persistence::InMemoryRuleSink,
    CheckType, RuleEditor, SubmitOutcome,
};

/// Replays an alert-rule editing session and prints the rules it would save.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON list of editor actions
    #[arg(short, long)]
    script: PathBuf,
    /// Existing rule (JSON) to open the editor with
    #[arg(short, long)]
    rule: Option<PathBuf>,
    /// Telemetry snapshot (JSON) used to list target candidates
    #[arg(short, long)]
    telemetry: Option<PathBuf>,
    /// Path to the editor configuration file
    #[arg(short, long)]
    config: Option<String>,
    /// Also write JSON logs to this directory
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

#[derive(Deserialize, Debug)]
#[serde(tag = "action", rename_all = "snake_case")]
enum Action {
    SelectType { check_type: CheckType },
    Edit { patch: DraftPatch },
    ToggleTarget { target: String },
    Cancel,
}

fn read_json<T: serde::de::DeserializeOwned>(path: &PathBuf) -> Result<T, EditorError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn as_stored_rule(rule: &ExistingRule, editor: &RuleEditor) -> Option<MonitoringRule> {
    let draft = editor.store().get(rule.check_type);
    rule.id.clone().map(|id| MonitoringRule {
        id: Some(id),
        check_type: rule.check_type,
        target: draft.target,
        thresholds: draft.thresholds,
        notification_frequency: draft.notification_frequency,
        notify: draft.notify,
        enabled: rule.enabled,
    })
}

#[tokio::main]
async fn main() -> Result<(), EditorError> {
    let args = Args::parse();
    let _guard = init_logging(LogOptions {
        log_dir: args.log_dir.clone(),
        default_filter: None,
    });

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => EditorConfig::from_env()?,
    };
    let existing: Option<ExistingRule> = args.rule.as_ref().map(read_json).transpose()?;
    let telemetry: Option<TelemetrySnapshot> =
        args.telemetry.as_ref().map(read_json).transpose()?;
    let actions: Vec<Action> = read_json(&args.script)?;

    let mut editor = RuleEditor::open(existing, &config);
    let sink = InMemoryRuleSink::with_rules(
        editor
            .original()
            .and_then(|rule| as_stored_rule(rule, &editor)),
    );

    for action in actions {
        info!(action = ?action, "Applying action.");
        match action {
            Action::SelectType { check_type } => {
                editor.select_type(check_type);
            }
            Action::Edit { patch } => {
                editor.edit_field(patch);
            }
            Action::ToggleTarget { target } => {
                editor.toggle_target(&target);
            }
            Action::Cancel => {
                editor.cancel();
                println!("{}", json!({ "outcome": "cancelled" }));
                return Ok(());
            }
        }
    }

    let candidates = editor.target_candidates(telemetry.as_ref());
    let preview = telemetry
        .as_ref()
        .map(|snapshot| editor.status_preview(snapshot));
    if let Err(e) = editor.validate() {
        warn!(error = %e, "Submitting thresholds that fail validation.");
    }

    let output = match editor.submit(&sink).await {
        SubmitOutcome::Cancelled => json!({ "outcome": "cancelled" }),
        SubmitOutcome::Submitted(dispatches) => json!({
            "outcome": "submitted",
            "candidates": candidates,
            "preview": preview,
            "dispatches": dispatches,
        }),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
