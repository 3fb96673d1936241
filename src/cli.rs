use clap::Parser;
use std::path::PathBuf;

/// Agora - multi-agent LLM chat orchestration server
#[derive(Parser, Debug, Clone)]
#[command(name = "agora", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "AGORA_CONFIG", default_value = "agora.toml")]
    pub config: PathBuf,

    /// Server host address
    #[arg(long, env = "AGORA_HOST")]
    pub host: Option<String>,

    /// Server port
    #[arg(long, env = "AGORA_PORT")]
    pub port: Option<u16>,
}

impl Cli {
    /// CLI values as if the binary was invoked with no arguments.
    pub fn default_args() -> Self {
        Self::parse_from(["agora"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["agora"]);
        assert_eq!(cli.config, PathBuf::from("agora.toml"));
        assert!(cli.host.is_none());
        assert!(cli.port.is_none());
    }

    #[test]
    fn test_cli_with_args() {
        let cli = Cli::parse_from([
            "agora",
            "--config",
            "custom.toml",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
        ]);
        assert_eq!(cli.config, PathBuf::from("custom.toml"));
        assert_eq!(cli.host, Some("0.0.0.0".to_string()));
        assert_eq!(cli.port, Some(8080));
    }
}
