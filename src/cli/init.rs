use anyhow::{Context, Result};
use console::style;

use crate::core::config;
use crate::core::terminal::{GuideSection, print_success, print_warn};

const CONFIG_TEMPLATE: &str = r#"# postcraft configuration

[remote]
# Master switch for remote generation. With this off (or no usable
# key) every run uses the built-in demo generator.
enabled = true

# Secret key for the chat completions API. The OPENAI_API_KEY
# environment variable overrides this value when set.
api_key = ""

base_url = "https://api.openai.com/v1/chat/completions"
model = "gpt-4o-mini"
temperature = 0.7
"#;

pub async fn run() -> Result<()> {
    let data_dir = config::data_dir();
    tokio::fs::create_dir_all(&data_dir)
        .await
        .with_context(|| format!("creating {}", data_dir.display()))?;

    let config_file = config::config_path();
    if config_file.exists() {
        print_warn(&format!(
            "Config file already exists at {}; leaving it untouched.",
            config_file.display()
        ));
        return Ok(());
    }

    tokio::fs::write(&config_file, CONFIG_TEMPLATE)
        .await
        .with_context(|| format!("writing {}", config_file.display()))?;
    print_success(&format!("Wrote starter config to {}", config_file.display()));

    GuideSection::new("Next Steps")
        .text(&format!(
            "1. Put your API key in {} (or export OPENAI_API_KEY).",
            style("config.toml").cyan()
        ))
        .text(&format!(
            "2. Run {} to verify the setup.",
            style("postcraft doctor --probe").cyan()
        ))
        .text(&format!(
            "3. Run {} and start creating.",
            style("postcraft generate").cyan()
        ))
        .print();
    println!();
    Ok(())
}
