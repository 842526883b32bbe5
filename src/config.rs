use clap::Parser;
use std::time::Duration;

use crate::reply::DEFAULT_SYSTEM_PROMPT;

// CLI argument structure, every option can also come from the environment
#[derive(Parser, Debug, Clone)]
#[command(name = "sms-relay")]
#[command(about = "Relays inbound SMS webhooks to a chat completion API")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    // Completion API credential
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: String,

    // Replaces the built-in assistant persona
    #[arg(long, env = "BOT_SYSTEM_PROMPT")]
    pub system_prompt: Option<String>,

    #[arg(long, env = "OPENAI_MODEL", default_value = "gpt-4o-mini")]
    pub model: String,

    #[arg(long, env = "OPENAI_BASE_URL", default_value = "https://api.openai.com/v1")]
    pub api_base: String,

    // Minimum seconds between two admitted messages from one sender
    #[arg(long, env = "RATE_COOLDOWN_SECS", default_value_t = 15)]
    pub cooldown: u64,

    // Completion call timeout in seconds
    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS", default_value_t = 20)]
    pub upstream_timeout: u64,

    // Stale sender sweep interval in seconds, 0 disables the sweeper
    #[arg(long, env = "RATE_SWEEP_INTERVAL_SECS", default_value_t = 300)]
    pub sweep_interval: u64
}

// Resolved settings used by the rest of the crate
#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub api_key: String,
    pub system_prompt: String,
    pub model: String,
    pub api_base: String,
    pub cooldown: Duration,
    pub upstream_timeout: Duration,
    pub sweep_interval: Option<Duration>,
}

impl Args {
    pub fn into_settings(self) -> Settings {
        Settings {
            port: self.port,
            api_key: self.openai_api_key,
            system_prompt: self
                .system_prompt
                .filter(|p| !p.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
            model: self.model,
            api_base: self.api_base,
            cooldown: Duration::from_secs(self.cooldown),
            upstream_timeout: Duration::from_secs(self.upstream_timeout),
            sweep_interval: (self.sweep_interval > 0).then(|| Duration::from_secs(self.sweep_interval)),
        }
    }
}
