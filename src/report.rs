//! Rendering of resolved version information.
//!
//! All formatting logic lives here, separated from resolution. The text
//! renderer targets people, the JSON renderer targets tooling; both are
//! pure functions over [VersionInfo] and testable.

use std::fmt::Write as _;

use console::style;

use crate::domain::CodeName;
use crate::error::Result;
use crate::resolver::VersionInfo;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Render a human-readable report of a resolution.
///
/// Lists the resolved identity of HEAD followed by up to ten of the most
/// recent previous releases.
pub fn render_text(info: &VersionInfo) -> String {
    let current = &info.current_version;
    let kind = if current.is_snapshot {
        "snapshot"
    } else {
        "release"
    };

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {}",
        style(&info.current_package.name).bold(),
        style(&current.version).green().bold()
    );
    let _ = writeln!(out, "  kind:      {}", kind);
    let _ = writeln!(out, "  commit:    {}", current.commit_sha);
    let _ = writeln!(out, "  code name: {}", code_name_text(&current.code_name));
    if let Some(branch) = &info.git_repo_info.branch {
        let _ = writeln!(out, "  branch:    {}", branch);
    }

    if info.previous_versions.is_empty() {
        let _ = writeln!(out, "\nNo previous releases.");
    } else {
        let _ = writeln!(
            out,
            "\n{}",
            style(format!(
                "Previous releases ({}):",
                info.previous_versions.len()
            ))
            .bold()
        );
        let hidden = info.previous_versions.len().saturating_sub(10);
        if hidden > 0 {
            let _ = writeln!(out, "  ... {} earlier releases", hidden);
        }
        for version in info.previous_versions.iter().skip(hidden) {
            let _ = writeln!(out, "  - {}", version);
        }
    }
    out
}

/// Render the resolution as pretty-printed JSON for downstream tooling.
pub fn render_json(info: &VersionInfo) -> Result<String> {
    Ok(serde_json::to_string_pretty(info)?)
}

fn code_name_text(code_name: &CodeName) -> &str {
    match code_name {
        CodeName::Named(name) => name,
        CodeName::Absent => "none",
        CodeName::Malformed => "(unreadable)",
    }
}
