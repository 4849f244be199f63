use anyhow::{Result, bail};
use console::style;

use crate::core::config;
use crate::core::history::{HistoryRow, HistoryStore, to_tabular};
use crate::core::terminal::print_info;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct HistoryArgs {
    pub limit: Option<usize>,
}

pub(crate) fn parse_history_args(args: &[String], start: usize) -> Result<HistoryArgs> {
    let mut parsed = HistoryArgs::default();
    let mut i = start;
    while i < args.len() {
        match args[i].as_str() {
            "--limit" | "-l" => {
                if i + 1 < args.len() {
                    let Ok(limit) = args[i + 1].parse::<usize>() else {
                        bail!("--limit expects a number, got '{}'", args[i + 1]);
                    };
                    parsed.limit = Some(limit);
                    i += 2;
                } else {
                    i += 1;
                }
            }
            _ => i += 1,
        }
    }
    Ok(parsed)
}

/// Fixed-width cell, truncated with a marker when the text is wider
/// than the column.
fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        format!("{:<width$}", text)
    } else {
        let head: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{:<width$}", format!("{}...", head))
    }
}

fn render_rows(rows: &[HistoryRow]) -> Vec<String> {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(format!(
        "  {:<27} {:<20} {:<10} {:<20} {}",
        "TIMESTAMP", "TOPIC", "PLATFORM", "TYPE", "PREVIEW"
    ));
    for row in rows {
        lines.push(format!(
            "  {} {} {} {} {}",
            fit(&row.timestamp, 27),
            fit(&row.topic, 20),
            fit(&row.platform, 10),
            fit(&row.content_type, 20),
            row.preview.replace(['\n', '\r'], " ")
        ));
    }
    lines
}

pub async fn run(args: &[String]) -> Result<()> {
    let parsed = parse_history_args(args, 2)?;
    let store = HistoryStore::new(config::history_path());
    let entries = store.load().await;
    if entries.is_empty() {
        print_info("No history yet. Generate content to save.");
        return Ok(());
    }

    let rows = to_tabular(&entries);
    let shown = parsed.limit.unwrap_or(rows.len()).min(rows.len());
    let mut lines = render_rows(&rows[..shown]).into_iter();
    if let Some(header) = lines.next() {
        println!("\n{}", style(header).bold());
        println!("  {}", style("─".repeat(100)).dim());
    }
    for line in lines {
        println!("{}", line);
    }
    if shown < rows.len() {
        println!(
            "\n  {}",
            style(format!(
                "... and {} more. Raise --limit or run `postcraft export` for the full set.",
                rows.len() - shown
            ))
            .dim()
        );
    }
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_args(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_limit_flag() {
        let parsed = parse_history_args(&to_args(&["postcraft", "history", "--limit", "5"]), 2).unwrap();
        assert_eq!(parsed.limit, Some(5));
        let parsed = parse_history_args(&to_args(&["postcraft", "history"]), 2).unwrap();
        assert_eq!(parsed.limit, None);
    }

    #[test]
    fn non_numeric_limit_is_rejected() {
        assert!(parse_history_args(&to_args(&["postcraft", "history", "--limit", "all"]), 2).is_err());
    }

    #[test]
    fn fit_pads_and_truncates() {
        assert_eq!(fit("short", 10), "short     ");
        assert_eq!(fit("exactlyten", 10), "exactlyten");
        assert_eq!(fit("well over the width", 10), "well ov...");
    }

    #[test]
    fn rendered_rows_flatten_multiline_previews() {
        let rows = vec![HistoryRow {
            timestamp: "2026-08-21T09:00:00.000000Z".to_string(),
            topic: "yoga".to_string(),
            platform: "Instagram".to_string(),
            content_type: "Content Ideas".to_string(),
            preview: "1) What is yoga?\n2) 5 Benefits of yoga".to_string(),
        }];
        let lines = render_rows(&rows);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("1) What is yoga? 2) 5 Benefits of yoga"));
        assert!(!lines[1].contains('\n'));
    }
}
