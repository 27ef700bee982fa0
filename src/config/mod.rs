#[cfg(feature = "cli")]
pub mod cli;

use crate::utils::error::{Result, SioError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Connection settings for the array management gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub gateway: GatewayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    pub endpoint: String,
    pub token: String,
    pub timeout_seconds: Option<u64>,
}

impl ClientConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SioError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SioError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SIO_TOKEN})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn endpoint(&self) -> &str {
        &self.gateway.endpoint
    }

    pub fn token(&self) -> &str {
        &self.gateway.token
    }

    pub fn timeout_seconds(&self) -> Option<u64> {
        self.gateway.timeout_seconds
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("gateway.endpoint", &self.gateway.endpoint)?;
        validation::validate_non_empty_string("gateway.token", &self.gateway.token)?;

        if let Some(timeout) = self.gateway.timeout_seconds {
            validation::validate_range("gateway.timeout_seconds", timeout, 1, 300)?;
        }

        Ok(())
    }
}
