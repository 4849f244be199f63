use anyhow::Result;

use crate::core::config::{self, AppConfig, is_plausible_key};
use crate::core::history::HistoryEntry;
use crate::core::llm::openai::OpenAiProvider;
use crate::core::llm::{ChatMessage, ChatProvider};
use crate::core::terminal::{
    self, print_error, print_info, print_step, print_success, print_warn,
};

pub(crate) fn parse_doctor_args(args: &[String], start: usize) -> bool {
    args.iter().skip(start).any(|arg| arg == "--probe")
}

pub async fn run(args: &[String]) -> Result<()> {
    let probe = parse_doctor_args(args, 2);
    print_step("postcraft doctor - checking your setup...");
    println!();

    let mut unhealthy = false;

    // 1. Data directory
    let data_dir = config::data_dir();
    if data_dir.exists() {
        print_success(&format!("Data directory: {}", data_dir.display()));
    } else {
        print_info(&format!(
            "Data directory {} does not exist yet; it is created on first save.",
            data_dir.display()
        ));
    }

    // 2. Config file
    let config_file = config::config_path();
    let config = match AppConfig::load().await {
        Ok(config) => {
            if config_file.exists() {
                print_success(&format!("Config file: {}", config_file.display()));
            } else {
                print_info(
                    "No config file; built-in defaults are in use. Run 'postcraft init' to write one.",
                );
            }
            config
        }
        Err(err) => {
            print_error(&format!("Config file is unreadable: {:#}", err));
            return Ok(());
        }
    };

    // 3. Remote credential
    let key = config.remote.api_key.trim();
    if !config.remote.enabled {
        print_warn("Remote generation is disabled; every run uses the demo generator.");
    } else if key.is_empty() {
        print_warn("No API key configured; every run uses the demo generator.");
        print_info("Set OPENAI_API_KEY or add the key to config.toml under [remote].");
    } else if !is_plausible_key(key) {
        print_warn("Configured API key does not start with 'sk-'; it will be ignored.");
        unhealthy = true;
    } else {
        print_success(&format!(
            "API key looks usable (model {}, temperature {}).",
            config.remote.model, config.remote.temperature
        ));
    }

    // 4. History store
    let history_file = config::history_path();
    match tokio::fs::read_to_string(&history_file).await {
        Ok(content) => match serde_json::from_str::<Vec<HistoryEntry>>(&content) {
            Ok(entries) => {
                print_success(&format!(
                    "History: {} entries at {}",
                    entries.len(),
                    history_file.display()
                ));
            }
            Err(err) => {
                print_warn(&format!(
                    "History file {} is corrupt ({}). It reads as empty and the next save overwrites it.",
                    history_file.display(),
                    err
                ));
                unhealthy = true;
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            print_info("History: empty (no file yet).");
        }
        Err(err) => {
            print_warn(&format!(
                "History file {} is unreadable: {}",
                history_file.display(),
                err
            ));
            unhealthy = true;
        }
    }

    // 5. Remote probe (opt-in, spends one tiny completion)
    if probe {
        if config.remote.remote_ready() {
            print_step("Probing the chat completions endpoint...");
            let provider = OpenAiProvider::new(
                config.remote.api_key.clone(),
                config.remote.base_url.clone(),
            );
            let probe_messages = [ChatMessage::user("test")];
            match provider
                .complete(&config.remote.model, 0.0, 5, &probe_messages)
                .await
            {
                Ok(Some(_)) => print_success("Remote API responded with text."),
                Ok(None) => print_warn("Remote API responded, but with no usable text."),
                Err(err) => {
                    print_error(err.kind.user_message());
                    print_info(&format!("Detail: {}", err));
                    unhealthy = true;
                }
            }
        } else {
            print_warn("Probe skipped: remote generation is not ready.");
        }
    }

    println!();
    if unhealthy {
        print_info("Some checks need attention; see above.");
    } else {
        println!("{} All checks passed. Ready to create!", terminal::ROCKET);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_flag_is_detected() {
        let args: Vec<String> = ["postcraft", "doctor", "--probe"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert!(parse_doctor_args(&args, 2));

        let args: Vec<String> = ["postcraft", "doctor"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert!(!parse_doctor_args(&args, 2));
    }
}
