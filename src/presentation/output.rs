//! Output Rendering
//!
//! Results go to stdout, either as text for people or as a single JSON
//! document for scripts. Logs never go here; they are written to stderr.

use std::io::{self, Write};

use serde::Serialize;
use serde_json::json;

use crate::application::{CommandCounts, InitOutcome, PreviewReport, PushReport};
use crate::domain::entities::CommandKind;

/// Output format for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for scripting
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Text
        }
    }
}

/// Icons for output rendering
struct Icons {
    check: &'static str,
    arrow: &'static str,
}

impl Icons {
    fn unicode() -> Self {
        Self {
            check: "✓",
            arrow: "→",
        }
    }

    fn ascii() -> Self {
        Self {
            check: "[OK]",
            arrow: "->",
        }
    }

    fn pick(unicode: bool) -> Self {
        if unicode {
            Self::unicode()
        } else {
            Self::ascii()
        }
    }
}

fn kind_phrase(kind: CommandKind, n: usize) -> String {
    let (one, many) = match kind {
        CommandKind::DirAdd => ("dir added", "dirs added"),
        CommandKind::FileAdd => ("file added", "files added"),
        CommandKind::FileUpdate => ("file updated", "files updated"),
        CommandKind::FileDelete => ("file deleted", "files deleted"),
        CommandKind::DirDelete => ("dir deleted", "dirs deleted"),
    };
    format!("{n} {}", if n == 1 { one } else { many })
}

/// "2 files added, 1 dir deleted"; kinds with no commands are left out
pub fn describe_counts(counts: &CommandCounts) -> String {
    let parts: Vec<String> = CommandKind::ALL
        .iter()
        .filter(|k| counts.get(**k) > 0)
        .map(|k| kind_phrase(*k, counts.get(*k)))
        .collect();
    if parts.is_empty() {
        "no changes".to_string()
    } else {
        parts.join(", ")
    }
}

fn changes_heading(total: usize) -> String {
    if total == 1 {
        "1 change".to_string()
    } else {
        format!("{total} changes")
    }
}

/// One line per planned command followed by a summary
pub fn render_preview(report: &PreviewReport) -> String {
    if !report.has_changes() {
        return format!(
            "Already up to date ({} entries compared, {} skipped)\n",
            report.summary.compared, report.summary.skipped
        );
    }

    let mut out = String::new();
    for change in &report.changes {
        out.push_str(change.label);
        out.push(' ');
        out.push_str(&change.path);
        out.push('\n');
    }
    out.push('\n');
    out.push_str(&format!(
        "{}: {}\n",
        changes_heading(report.counts.total()),
        describe_counts(&report.counts)
    ));
    out.push_str(&format!(
        "{} unchanged, {} skipped\n",
        report.summary.unchanged, report.summary.skipped
    ));
    out
}

pub fn render_push(report: &PushReport, unicode: bool) -> String {
    let icons = Icons::pick(unicode);
    if !report.has_changes() {
        return format!(
            "{} Already up to date {} {}\n",
            icons.check, icons.arrow, report.transport
        );
    }
    format!(
        "{} Push complete {} {}\n\n  {}: {}\n  {} unchanged, {} skipped\n",
        icons.check,
        icons.arrow,
        report.transport,
        changes_heading(report.counts.total()),
        describe_counts(&report.counts),
        report.summary.unchanged,
        report.summary.skipped
    )
}

pub fn render_init(outcome: &InitOutcome) -> String {
    match outcome {
        InitOutcome::WroteTemplate(path) => format!(
            "Wrote {}\n  Fill in the target settings, then run `sitepush init` again \
             to create the record directory.\n",
            path.display()
        ),
        InitOutcome::CreatedRecordDir(path) => {
            format!("Created record directory {}\n", path.display())
        }
        InitOutcome::EmptiedRecordDir { path, removed } => format!(
            "Emptied record directory {} ({removed} entries removed)\n  \
             The next push will send every file.\n",
            path.display()
        ),
    }
}

pub fn preview_json(report: &PreviewReport) -> serde_json::Value {
    json!({
        "command": "preview",
        "changes": report.changes,
        "counts": report.counts,
        "unchanged": report.summary.unchanged,
        "skipped": report.summary.skipped,
    })
}

pub fn push_json(report: &PushReport) -> serde_json::Value {
    json!({
        "command": "push",
        "transport": report.transport,
        "counts": report.counts,
        "unchanged": report.summary.unchanged,
        "skipped": report.summary.skipped,
    })
}

pub fn init_json(outcome: &InitOutcome) -> serde_json::Value {
    match outcome {
        InitOutcome::WroteTemplate(path) => json!({
            "command": "init",
            "action": "wrote_template",
            "path": path.display().to_string(),
        }),
        InitOutcome::CreatedRecordDir(path) => json!({
            "command": "init",
            "action": "created_record_dir",
            "path": path.display().to_string(),
        }),
        InitOutcome::EmptiedRecordDir { path, removed } => json!({
            "command": "init",
            "action": "emptied_record_dir",
            "path": path.display().to_string(),
            "removed": removed,
        }),
    }
}

/// Write `value` to stdout as pretty JSON followed by a newline
pub fn emit_json<T: Serialize>(value: &T) -> io::Result<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    let mut out = io::stdout().lock();
    out.write_all(text.as_bytes())?;
    out.write_all(b"\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::PlannedChange;
    use crate::domain::entities::DeployCommand;
    use crate::domain::services::DiffSummary;
    use crate::domain::value_objects::RelPath;
    use std::path::PathBuf;

    fn report(commands: &[DeployCommand]) -> PreviewReport {
        PreviewReport {
            changes: commands.iter().map(PlannedChange::from).collect(),
            counts: commands.iter().map(|c| c.kind()).collect::<Vec<_>>().iter().collect(),
            summary: DiffSummary {
                compared: 7,
                skipped: 1,
                unchanged: 4,
                commands: commands.len(),
                source_bytes: 120,
            },
        }
    }

    fn sample() -> PreviewReport {
        report(&[
            DeployCommand::dir_add(RelPath::parse("assets")),
            DeployCommand::file_add(RelPath::parse("assets/app.js"), b"let a=1".to_vec()),
            DeployCommand::file_update(RelPath::parse("index.html"), b"<p>x</p>".to_vec()),
            DeployCommand::dir_delete(RelPath::parse("old")),
        ])
    }

    #[test]
    fn preview_text_lists_every_command() {
        insta::assert_snapshot!(render_preview(&sample()), @r"
        ADD DIR /assets
        ADD FILE /assets/app.js
        UPDATE FILE /index.html
        DELETE DIR /old

        4 changes: 1 dir added, 1 file added, 1 file updated, 1 dir deleted
        4 unchanged, 1 skipped
        ");
    }

    #[test]
    fn preview_text_when_nothing_changed() {
        assert_eq!(
            render_preview(&report(&[])),
            "Already up to date (7 entries compared, 1 skipped)\n"
        );
    }

    #[test]
    fn push_text_uses_plural_forms() {
        let push = PushReport {
            transport: "ftp",
            counts: [CommandKind::FileAdd, CommandKind::FileAdd, CommandKind::FileDelete]
                .iter()
                .collect(),
            summary: DiffSummary::default(),
        };
        assert_eq!(
            render_push(&push, false),
            "[OK] Push complete -> ftp\n\n  3 changes: 2 files added, 1 file deleted\n  0 unchanged, 0 skipped\n"
        );
    }

    #[test]
    fn push_text_when_nothing_changed() {
        let push = PushReport {
            transport: "file",
            counts: CommandCounts::default(),
            summary: DiffSummary::default(),
        };
        assert_eq!(render_push(&push, true), "✓ Already up to date → file\n");
    }

    #[test]
    fn preview_json_shape() {
        let value = preview_json(&sample());
        assert_eq!(value["command"], "preview");
        assert_eq!(value["changes"].as_array().unwrap().len(), 4);
        assert_eq!(value["changes"][1]["kind"], "file_add");
        assert_eq!(value["changes"][1]["bytes"], 7);
        assert!(value["changes"][0].get("sha256").is_none());
        assert_eq!(value["counts"]["dir_delete"], 1);
        assert_eq!(value["unchanged"], 4);
    }

    #[test]
    fn init_json_reports_action() {
        let value = init_json(&InitOutcome::EmptiedRecordDir {
            path: PathBuf::from("deployed"),
            removed: 3,
        });
        assert_eq!(value["action"], "emptied_record_dir");
        assert_eq!(value["removed"], 3);
        assert_eq!(value["path"], "deployed");
    }

    #[test]
    fn init_text_mentions_path() {
        let text = render_init(&InitOutcome::CreatedRecordDir(PathBuf::from("deployed")));
        assert_eq!(text, "Created record directory deployed\n");
    }

    #[test]
    fn output_format_from_flag() {
        assert_eq!(OutputFormat::from_json_flag(true), OutputFormat::Json);
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
    }
}
