use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::core::config;
use crate::core::content::Variation;
use crate::core::history::{HistoryStore, to_csv, to_json_pretty};
use crate::core::terminal::{GuideSection, print_error, print_info, print_success};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExportFormat {
    Csv,
    Json,
    Txt,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ExportArgs {
    pub format: ExportFormat,
    pub out: Option<PathBuf>,
    pub entry: usize,
}

pub(crate) fn parse_export_args(args: &[String], start: usize) -> Result<ExportArgs> {
    let format = match args.get(start).map(|s| s.as_str()) {
        Some("csv") => ExportFormat::Csv,
        Some("json") => ExportFormat::Json,
        Some("txt") => ExportFormat::Txt,
        Some(other) => bail!("Unknown export format '{}'. Expected: csv, json, txt", other),
        None => bail!("Missing export format. Expected: csv, json, txt"),
    };
    let mut out = None;
    let mut entry = 1usize;
    let mut i = start + 1;
    while i < args.len() {
        match args[i].as_str() {
            "--out" | "-o" => {
                if i + 1 < args.len() {
                    out = Some(PathBuf::from(&args[i + 1]));
                    i += 2;
                } else {
                    i += 1;
                }
            }
            "--entry" | "-e" => {
                if i + 1 < args.len() {
                    let Ok(index) = args[i + 1].parse::<usize>() else {
                        bail!("--entry expects a number, got '{}'", args[i + 1]);
                    };
                    if index == 0 {
                        bail!("--entry is 1-based; 1 is the most recent entry");
                    }
                    entry = index;
                    i += 2;
                } else {
                    i += 1;
                }
            }
            _ => i += 1,
        }
    }
    Ok(ExportArgs { format, out, entry })
}

fn print_export_help() {
    GuideSection::new("postcraft export")
        .command("csv", "History table (timestamp, topic, platform, type, preview)")
        .command("json", "Full history, pretty-printed")
        .command("txt", "One text file per variation of a single entry")
        .blank()
        .text("--out, -o <path>    Output file (csv/json) or directory (txt)")
        .text("--entry, -e <n>     History entry for txt export, 1 = most recent")
        .blank()
        .hint("postcraft export csv --out report.csv", "")
        .hint("postcraft export txt --entry 2 --out drafts/", "")
        .print();
    println!();
}

/// Write each variation to `{topic}_variation{N}.txt` under `dir`. The
/// naming is part of the export contract, including any odd characters
/// the topic carries.
pub(crate) async fn write_variation_files(
    dir: &Path,
    topic: &str,
    variations: &[Variation],
) -> Result<()> {
    for variation in variations {
        let path = dir.join(variation_filename(topic, variation.index));
        tokio::fs::write(&path, &variation.text)
            .await
            .with_context(|| format!("writing {}", path.display()))?;
        print_info(&format!("Wrote {}", path.display()));
    }
    Ok(())
}

pub(crate) fn variation_filename(topic: &str, index: u32) -> String {
    format!("{}_variation{}.txt", topic, index)
}

pub async fn run(args: &[String]) -> Result<()> {
    if args.len() <= 2 {
        print_export_help();
        return Ok(());
    }
    let parsed = parse_export_args(args, 2)?;

    let store = HistoryStore::new(config::history_path());
    let entries = store.load().await;
    if entries.is_empty() {
        print_info("No history yet. Generate content to save.");
        return Ok(());
    }

    match parsed.format {
        ExportFormat::Csv => {
            let csv = to_csv(&entries);
            let path = parsed.out.unwrap_or_else(|| PathBuf::from("history.csv"));
            tokio::fs::write(&path, csv)
                .await
                .with_context(|| format!("writing {}", path.display()))?;
            print_success(&format!(
                "Exported {} entries to {}",
                entries.len(),
                path.display()
            ));
        }
        ExportFormat::Json => {
            let json = to_json_pretty(&entries)?;
            let path = parsed.out.unwrap_or_else(|| PathBuf::from("history.json"));
            tokio::fs::write(&path, json)
                .await
                .with_context(|| format!("writing {}", path.display()))?;
            print_success(&format!(
                "Exported {} entries to {}",
                entries.len(),
                path.display()
            ));
        }
        ExportFormat::Txt => {
            let Some(entry) = entries.get(parsed.entry - 1) else {
                print_error(&format!(
                    "No history entry #{} (only {} available).",
                    parsed.entry,
                    entries.len()
                ));
                return Ok(());
            };
            let dir = parsed.out.unwrap_or_else(|| PathBuf::from("."));
            tokio::fs::create_dir_all(&dir)
                .await
                .with_context(|| format!("creating {}", dir.display()))?;
            write_variation_files(&dir, &entry.topic, &entry.variations).await?;
            print_success(&format!(
                "Exported {} variation file(s) from \"{}\".",
                entry.variations.len(),
                entry.topic
            ));
        }
    }
    Ok(())
}
