use anyhow::{Result, bail};
use console::style;
use inquire::validator::Validation;
use inquire::{Confirm, CustomType, Select, Text};
use tracing::debug;

use crate::cli::export::write_variation_files;
use crate::core::config::{self, AppConfig, KNOWN_MODELS};
use crate::core::content::{ContentType, GenerationRequest, Platform, Tone};
use crate::core::history::{HistoryEntry, HistoryStore};
use crate::core::llm::openai::OpenAiProvider;
use crate::core::orchestrator::{Batch, Orchestrator};
use crate::core::readability;
use crate::core::terminal::{PENCIL, print_error, print_info, print_success};

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct GenerateArgs {
    pub topic: Option<String>,
    pub platform: Option<Platform>,
    pub content_type: Option<ContentType>,
    pub tone: Option<Tone>,
    pub variations: Option<u32>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub local: bool,
    pub write_txt: bool,
    pub assume_defaults: bool,
}

pub(crate) fn parse_generate_args(args: &[String], start: usize) -> Result<GenerateArgs> {
    let mut parsed = GenerateArgs::default();
    let mut i = start;
    while i < args.len() {
        match args[i].as_str() {
            "--topic" | "-t" => {
                if i + 1 < args.len() {
                    parsed.topic = Some(args[i + 1].clone());
                    i += 2;
                } else {
                    i += 1;
                }
            }
            "--platform" | "-p" => {
                if i + 1 < args.len() {
                    let Some(platform) = Platform::parse(&args[i + 1]) else {
                        bail!(
                            "Unknown platform '{}'. Expected one of: Instagram, LinkedIn, YouTube, Twitter",
                            args[i + 1]
                        );
                    };
                    parsed.platform = Some(platform);
                    i += 2;
                } else {
                    i += 1;
                }
            }
            "--type" => {
                if i + 1 < args.len() {
                    let Some(content_type) = ContentType::parse(&args[i + 1]) else {
                        bail!(
                            "Unknown content type '{}'. Expected one of: caption, hashtags, ideas, plan",
                            args[i + 1]
                        );
                    };
                    parsed.content_type = Some(content_type);
                    i += 2;
                } else {
                    i += 1;
                }
            }
            "--tone" => {
                if i + 1 < args.len() {
                    let Some(tone) = Tone::parse(&args[i + 1]) else {
                        bail!(
                            "Unknown tone '{}'. Expected one of: Professional, Funny, Bold, Friendly, Inspirational",
                            args[i + 1]
                        );
                    };
                    parsed.tone = Some(tone);
                    i += 2;
                } else {
                    i += 1;
                }
            }
            "--variations" | "-n" => {
                if i + 1 < args.len() {
                    let Ok(count) = args[i + 1].parse::<u32>() else {
                        bail!("--variations expects a number, got '{}'", args[i + 1]);
                    };
                    parsed.variations = Some(count);
                    i += 2;
                } else {
                    i += 1;
                }
            }
            "--model" | "-m" => {
                if i + 1 < args.len() {
                    parsed.model = Some(args[i + 1].clone());
                    i += 2;
                } else {
                    i += 1;
                }
            }
            "--temperature" => {
                if i + 1 < args.len() {
                    let Ok(temperature) = args[i + 1].parse::<f32>() else {
                        bail!("--temperature expects a number, got '{}'", args[i + 1]);
                    };
                    parsed.temperature = Some(temperature);
                    i += 2;
                } else {
                    i += 1;
                }
            }
            "--local" => {
                parsed.local = true;
                i += 1;
            }
            "--write-txt" => {
                parsed.write_txt = true;
                i += 1;
            }
            "--yes" | "-y" => {
                parsed.assume_defaults = true;
                i += 1;
            }
            _ => i += 1,
        }
    }
    Ok(parsed)
}

const CUSTOM_MODEL_CHOICE: &str = "Custom model ID...";

fn prompt_model(default_model: &str) -> Result<String> {
    let mut options: Vec<String> = KNOWN_MODELS.iter().map(|m| m.to_string()).collect();
    if !options.iter().any(|m| m == default_model) {
        options.insert(0, default_model.to_string());
    }
    options.push(CUSTOM_MODEL_CHOICE.to_string());
    let starting = options.iter().position(|m| m == default_model).unwrap_or(0);

    let choice = Select::new("Model:", options)
        .with_starting_cursor(starting)
        .prompt()?;
    if choice == CUSTOM_MODEL_CHOICE {
        let custom = Text::new("Model ID:")
            .with_help_message("Any chat-completions model identifier")
            .with_validator(|input: &str| {
                if input.trim().is_empty() {
                    Ok(Validation::Invalid("Please enter a model ID.".into()))
                } else {
                    Ok(Validation::Valid)
                }
            })
            .prompt()?;
        return Ok(custom.trim().to_string());
    }
    Ok(choice)
}

/// Fill whatever the flags left open, either from the wizard or from the
/// defaults when `--yes` was passed. Model and temperature prompts are
/// skipped entirely when the run will not touch the remote API.
async fn resolve_request(
    parsed: &GenerateArgs,
    config: &AppConfig,
    use_remote: bool,
) -> Result<(GenerationRequest, bool)> {
    let mut used_wizard = false;

    let topic = match &parsed.topic {
        Some(topic) if !topic.trim().is_empty() => topic.trim().to_string(),
        _ if parsed.assume_defaults => bail!("--topic is required with --yes"),
        _ => {
            used_wizard = true;
            Text::new("Topic:")
                .with_help_message("e.g. lifestyle, AI education, fitness")
                .with_validator(|input: &str| {
                    if input.trim().is_empty() {
                        Ok(Validation::Invalid("Please enter a topic.".into()))
                    } else {
                        Ok(Validation::Valid)
                    }
                })
                .prompt()?
        }
    };

    let platform = match parsed.platform {
        Some(platform) => platform,
        None if parsed.assume_defaults => Platform::Instagram,
        None => {
            used_wizard = true;
            Select::new("Platform:", Platform::ALL.to_vec()).prompt()?
        }
    };

    let content_type = match parsed.content_type {
        Some(content_type) => content_type,
        None if parsed.assume_defaults => ContentType::Caption,
        None => {
            used_wizard = true;
            Select::new("Content type:", ContentType::ALL.to_vec()).prompt()?
        }
    };

    let tone = match parsed.tone {
        Some(tone) => tone,
        None if parsed.assume_defaults => Tone::Professional,
        None => {
            used_wizard = true;
            Select::new("Tone:", Tone::ALL.to_vec()).prompt()?
        }
    };

    let variations = match parsed.variations {
        Some(count) => count,
        None if parsed.assume_defaults => 1,
        None => {
            used_wizard = true;
            Select::new("Variations:", vec![1u32, 2, 3, 4, 5]).prompt()?
        }
    };

    let model = match &parsed.model {
        Some(model) => model.clone(),
        None if parsed.assume_defaults || !use_remote => config.remote.model.clone(),
        None => {
            used_wizard = true;
            prompt_model(&config.remote.model)?
        }
    };

    let temperature = match parsed.temperature {
        Some(temperature) => temperature,
        None if parsed.assume_defaults || !use_remote => config.remote.temperature,
        None => {
            used_wizard = true;
            CustomType::<f32>::new("Temperature:")
                .with_default(config.remote.temperature)
                .with_help_message("0.0 = focused, 1.0 = adventurous")
                .with_error_message("Please type a number between 0.0 and 1.0")
                .with_validator(|value: &f32| {
                    if (0.0..=1.0).contains(value) {
                        Ok(Validation::Valid)
                    } else {
                        Ok(Validation::Invalid(
                            "Temperature must be between 0.0 and 1.0".into(),
                        ))
                    }
                })
                .prompt()?
        }
    };

    let request =
        GenerationRequest::new(platform, content_type, tone, &topic, variations, &model, temperature)?;
    Ok((request, used_wizard))
}

fn render_batch(batch: &Batch) {
    for variation in &batch.variations {
        println!(
            "\n{}",
            style(format!("Variation {}", variation.index)).bold().cyan()
        );
        println!("{}", variation.text);
        let score = readability::score(&variation.text);
        println!(
            "{}",
            style(format!("Readability score: {}", readability::display(score))).dim()
        );
    }
}

pub async fn run(args: &[String]) -> Result<()> {
    let parsed = parse_generate_args(args, 2)?;
    let config = AppConfig::load().await?;
    let use_remote = !parsed.local && config.remote.remote_ready();

    let (request, used_wizard) = resolve_request(&parsed, &config, use_remote).await?;

    if !use_remote {
        if parsed.local {
            print_info("Local mode: using the demo generator.");
        } else {
            print_info("No usable API key configured; using the demo generator.");
        }
    }

    let orchestrator = if use_remote {
        Orchestrator::new(Box::new(OpenAiProvider::new(
            config.remote.api_key.clone(),
            config.remote.base_url.clone(),
        )))
    } else {
        Orchestrator::local_only()
    };

    println!(
        "\n{}{}",
        PENCIL,
        style(format!(
            "Generating {} x{} for {} about \"{}\" ({} tone)...",
            request.content_type,
            request.variation_count,
            request.platform,
            request.topic,
            request.tone
        ))
        .bold()
    );

    let batch = orchestrator.generate_batch(&request).await;
    if let Some(err) = &batch.first_error {
        debug!("First remote error: {}", err);
        print_error(err.kind.user_message());
    }

    render_batch(&batch);
    println!();

    let write_txt = parsed.write_txt
        || (used_wizard
            && Confirm::new("Write each variation to a text file?")
                .with_default(false)
                .prompt()?);
    if write_txt {
        write_variation_files(std::path::Path::new("."), &request.topic, &batch.variations).await?;
    }

    let store = HistoryStore::new(config::history_path());
    let entry = HistoryEntry::from_batch(&request, batch.variations);
    store.insert(entry).await?;
    print_success("Saved to history successfully.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_args(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_full_flag_set() {
        let args = to_args(&[
            "postcraft",
            "generate",
            "--topic",
            "AI education",
            "--platform",
            "linkedin",
            "--type",
            "ideas",
            "--tone",
            "bold",
            "--variations",
            "3",
            "--model",
            "gpt-4o",
            "--temperature",
            "0.4",
            "--local",
            "--write-txt",
            "--yes",
        ]);
        let parsed = parse_generate_args(&args, 2).unwrap();
        assert_eq!(parsed.topic.as_deref(), Some("AI education"));
        assert_eq!(parsed.platform, Some(Platform::LinkedIn));
        assert_eq!(parsed.content_type, Some(ContentType::ContentIdeas));
        assert_eq!(parsed.tone, Some(Tone::Bold));
        assert_eq!(parsed.variations, Some(3));
        assert_eq!(parsed.model.as_deref(), Some("gpt-4o"));
        assert_eq!(parsed.temperature, Some(0.4));
        assert!(parsed.local);
        assert!(parsed.write_txt);
        assert!(parsed.assume_defaults);
    }

    #[test]
    fn short_flags_are_accepted() {
        let args = to_args(&["postcraft", "generate", "-t", "coffee", "-n", "2", "-y"]);
        let parsed = parse_generate_args(&args, 2).unwrap();
        assert_eq!(parsed.topic.as_deref(), Some("coffee"));
        assert_eq!(parsed.variations, Some(2));
        assert!(parsed.assume_defaults);
    }

    #[test]
    fn unknown_enum_values_are_rejected() {
        let args = to_args(&["postcraft", "generate", "--platform", "myspace"]);
        let err = parse_generate_args(&args, 2).unwrap_err();
        assert!(err.to_string().contains("Unknown platform 'myspace'"));

        let args = to_args(&["postcraft", "generate", "--type", "poem"]);
        assert!(parse_generate_args(&args, 2).is_err());

        let args = to_args(&["postcraft", "generate", "--tone", "sarcastic"]);
        assert!(parse_generate_args(&args, 2).is_err());
    }

    #[test]
    fn non_numeric_values_are_rejected() {
        let args = to_args(&["postcraft", "generate", "--variations", "lots"]);
        assert!(parse_generate_args(&args, 2).is_err());

        let args = to_args(&["postcraft", "generate", "--temperature", "warm"]);
        assert!(parse_generate_args(&args, 2).is_err());
    }

    #[test]
    fn trailing_value_flag_is_ignored() {
        let args = to_args(&["postcraft", "generate", "--topic"]);
        let parsed = parse_generate_args(&args, 2).unwrap();
        assert_eq!(parsed.topic, None);
    }

    #[tokio::test]
    async fn yes_mode_requires_a_topic() {
        let parsed = GenerateArgs {
            assume_defaults: true,
            ..GenerateArgs::default()
        };
        let config = AppConfig::default();
        let err = resolve_request(&parsed, &config, false).await.unwrap_err();
        assert!(err.to_string().contains("--topic is required"));
    }

    #[tokio::test]
    async fn yes_mode_fills_documented_defaults() {
        let parsed = GenerateArgs {
            topic: Some("  fitness  ".to_string()),
            assume_defaults: true,
            ..GenerateArgs::default()
        };
        let config = AppConfig::default();
        let (request, used_wizard) = resolve_request(&parsed, &config, false).await.unwrap();
        assert!(!used_wizard);
        assert_eq!(request.topic, "fitness");
        assert_eq!(request.platform, Platform::Instagram);
        assert_eq!(request.content_type, ContentType::Caption);
        assert_eq!(request.tone, Tone::Professional);
        assert_eq!(request.variation_count, 1);
        assert_eq!(request.model, "gpt-4o-mini");
        assert!((request.temperature - 0.7).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn yes_mode_rejects_out_of_range_flags() {
        let parsed = GenerateArgs {
            topic: Some("fitness".to_string()),
            variations: Some(9),
            assume_defaults: true,
            ..GenerateArgs::default()
        };
        let config = AppConfig::default();
        assert!(resolve_request(&parsed, &config, false).await.is_err());
    }
}
