use config::{Config, File};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub mod validator;

use crate::cli::Cli;
use crate::domain::Vendor;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub vendors: VendorsSettings,
    #[serde(default)]
    pub timeouts: TimeoutSettings,
    #[serde(default)]
    pub summary: SummarySettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Per-vendor connection settings. One table per known vendor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorsSettings {
    pub chatgpt: VendorSettings,
    pub claude: VendorSettings,
    pub gemini: VendorSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorSettings {
    /// Model name sent with every request
    pub model: String,
    /// Environment variable holding the API key. The key itself is never
    /// put in the config file.
    pub api_key_env: String,
    /// Override the vendor's API base URL (proxies, self-hosted gateways)
    #[serde(default)]
    pub base_url: Option<String>,
    /// Token budget for generation calls, when the vendor supports one
    #[serde(default)]
    pub max_tokens: Option<u32>,
    /// Sampling temperature for generation calls
    #[serde(default)]
    pub temperature: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutSettings {
    /// Deadline for generation and summarization calls, in seconds
    #[serde(default = "default_generate_seconds")]
    pub generate_seconds: u64,
    /// Deadline for health probes, in seconds
    #[serde(default = "default_probe_seconds")]
    pub probe_seconds: u64,
}

impl TimeoutSettings {
    pub fn generate(&self) -> Duration {
        Duration::from_secs(self.generate_seconds)
    }

    pub fn probe(&self) -> Duration {
        Duration::from_secs(self.probe_seconds)
    }
}

/// Which vendor answers summarization requests. Fixed per server, never
/// selectable per call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarySettings {
    #[serde(default = "default_summary_vendor")]
    pub vendor: Vendor,
}

fn default_generate_seconds() -> u64 {
    30
}

fn default_probe_seconds() -> u64 {
    10
}

fn default_summary_vendor() -> Vendor {
    Vendor::Gemini
}

impl Default for VendorsSettings {
    fn default() -> Self {
        Self {
            chatgpt: VendorSettings {
                model: "gpt-3.5-turbo".to_string(),
                api_key_env: "OPENAI_API_KEY".to_string(),
                base_url: None,
                max_tokens: Some(200),
                temperature: Some(0.7),
            },
            claude: VendorSettings {
                model: "claude-3-haiku-20240307".to_string(),
                api_key_env: "ANTHROPIC_API_KEY".to_string(),
                base_url: None,
                max_tokens: Some(200),
                temperature: None,
            },
            gemini: VendorSettings {
                model: "gemini-2.5-flash".to_string(),
                api_key_env: "GOOGLE_AI_API_KEY".to_string(),
                base_url: None,
                max_tokens: None,
                temperature: None,
            },
        }
    }
}

impl Default for TimeoutSettings {
    fn default() -> Self {
        Self {
            generate_seconds: default_generate_seconds(),
            probe_seconds: default_probe_seconds(),
        }
    }
}

impl Default for SummarySettings {
    fn default() -> Self {
        Self {
            vendor: default_summary_vendor(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 3001,
            },
            vendors: VendorsSettings::default(),
            timeouts: TimeoutSettings::default(),
            summary: SummarySettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from the default config file location.
    pub fn new() -> Result<Self, anyhow::Error> {
        Self::new_with_cli(&Cli::default_args())
    }

    /// Load settings from the config file named by the CLI, then apply CLI
    /// overrides (CLI > env vars > config file > defaults).
    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let defaults = VendorsSettings::default();

        let s = Config::builder()
            .add_source(File::from(cli.config.clone()).required(false))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3001)?
            .set_default("vendors.chatgpt.model", defaults.chatgpt.model)?
            .set_default("vendors.chatgpt.api_key_env", defaults.chatgpt.api_key_env)?
            .set_default("vendors.chatgpt.max_tokens", 200)?
            .set_default("vendors.chatgpt.temperature", 0.7)?
            .set_default("vendors.claude.model", defaults.claude.model)?
            .set_default("vendors.claude.api_key_env", defaults.claude.api_key_env)?
            .set_default("vendors.claude.max_tokens", 200)?
            .set_default("vendors.gemini.model", defaults.gemini.model)?
            .set_default("vendors.gemini.api_key_env", defaults.gemini.api_key_env)?
            .build()?;

        let mut settings: Settings = s.try_deserialize()?;
        settings.apply_cli_overrides(cli);

        validator::ConfigValidator::validate(&settings).map_err(|errors| {
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow::anyhow!("Configuration validation failed:\n{}", messages.join("\n"))
        })?;

        Ok(settings)
    }

    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(host) = &cli.host {
            self.server.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.server.port = port;
        }
    }
}
