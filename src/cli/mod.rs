mod doctor;
mod export;
mod generate;
mod history;
mod init;

use anyhow::Result;
use console::style;

use crate::core::terminal::{self, GuideSection, print_error};

fn print_help() {
    terminal::print_banner();

    GuideSection::new("Create")
        .command(
            "generate",
            "Generate captions, hashtags, ideas, or a 30-day plan",
        )
        .print();

    GuideSection::new("Review")
        .command("history", "Show past generations, newest first")
        .command("export", "Write history as CSV/JSON or variation text files")
        .print();

    GuideSection::new("Setup")
        .command("init", "Write a starter config file")
        .command("doctor", "Check configuration, history, and the remote API")
        .print();

    GuideSection::new("Examples")
        .hint("postcraft generate", "interactive wizard")
        .hint("postcraft generate --topic fitness --type plan --yes", "")
        .hint("postcraft export csv --out report.csv", "")
        .print();

    println!(
        "\n {} {} <command> [options]\n",
        style("Usage:").bold(),
        style("postcraft").green()
    );
}

pub async fn run_main() -> Result<()> {
    crate::logging::init();
    let args: Vec<String> = std::env::args().collect();

    if args.len() <= 1 {
        print_help();
        return Ok(());
    }

    match args[1].as_str() {
        "generate" => generate::run(&args).await,
        "history" => history::run(&args).await,
        "export" => export::run(&args).await,
        "doctor" => doctor::run(&args).await,
        "init" => init::run().await,
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        other => {
            print_error(&format!("Unknown command: {}", other));
            print_help();
            Ok(())
        }
    }
}
