use crate::config::{ClientConfig, GatewayConfig};
use crate::utils::error::{Result, SioError};
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "sioctl")]
#[command(about = "Query and provision storage-array volumes")]
pub struct CliConfig {
    /// TOML configuration file with a [gateway] section
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Gateway endpoint URL (overrides the config file)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Gateway session token (overrides the config file)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout_seconds: Option<u64>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List volumes in a storage pool, or fetch one by id
    Volumes {
        #[arg(long)]
        pool_id: String,

        #[arg(long)]
        volume_id: Option<String>,
    },
    /// Create a volume in a storage pool
    CreateVolume {
        #[arg(long)]
        pool_id: String,

        #[arg(long)]
        name: String,

        /// Volume size in KB
        #[arg(long)]
        size_kb: u64,

        #[arg(long, default_value = "ThinProvisioned")]
        volume_type: String,
    },
    /// List volumes mapped to this host, with their local device paths
    LocalVolumes,
}

impl CliConfig {
    /// 合併配置檔與命令列旗標；旗標優先
    pub fn client_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.config {
            Some(path) => ClientConfig::from_file(path)?,
            None => ClientConfig {
                gateway: GatewayConfig {
                    endpoint: String::new(),
                    token: String::new(),
                    timeout_seconds: None,
                },
            },
        };

        if let Some(endpoint) = &self.endpoint {
            config.gateway.endpoint = endpoint.clone();
        }
        if let Some(token) = &self.token {
            config.gateway.token = token.clone();
        }
        if let Some(timeout) = self.timeout_seconds {
            config.gateway.timeout_seconds = Some(timeout);
        }

        if config.gateway.endpoint.is_empty() {
            return Err(SioError::ConfigError {
                message: "No gateway endpoint given (use --endpoint or --config)".to_string(),
            });
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config_file() {
        let cli = CliConfig::parse_from([
            "sioctl",
            "--endpoint",
            "https://gateway.example.com/api",
            "--token",
            "cli-token",
            "local-volumes",
        ]);

        let config = cli.client_config().unwrap();
        assert_eq!(config.endpoint(), "https://gateway.example.com/api");
        assert_eq!(config.token(), "cli-token");
    }

    #[test]
    fn test_missing_endpoint_is_a_config_error() {
        let cli = CliConfig::parse_from(["sioctl", "local-volumes"]);
        assert!(cli.client_config().is_err());
    }
}
