// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::ValueEnum;
use serde::Serialize;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Format a duration in seconds as relative time (e.g., "5s", "2m", "1h", "3d").
pub fn format_elapsed(secs: i64) -> String {
    let secs = secs.max(0);
    if secs < 60 {
        format!("{secs}s")
    } else if secs < 3600 {
        format!("{}m", secs / 60)
    } else if secs < 86400 {
        format!("{}h", secs / 3600)
    } else {
        format!("{}d", secs / 86400)
    }
}

/// Render a list as a text table or JSON. Handles the empty case and the
/// format branch so callers only supply the text renderer.
pub fn handle_list<T: Serialize>(
    format: OutputFormat,
    items: &[T],
    empty_msg: &str,
    render_text: impl FnOnce(&[T]),
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(items)?);
        }
        OutputFormat::Text => {
            if items.is_empty() {
                println!("{}", empty_msg);
            } else {
                render_text(items);
            }
        }
    }
    Ok(())
}

/// Format-branch helper for non-list commands (status, etc.).
///
/// Renders as JSON when `format` is `Json`, otherwise calls `text_fn`.
pub fn format_or_json<T: Serialize>(
    format: OutputFormat,
    data: &T,
    text_fn: impl FnOnce(),
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(data)?);
        }
        OutputFormat::Text => {
            text_fn();
        }
    }
    Ok(())
}
