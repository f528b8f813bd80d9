//! Configuration for the token

use serde::{Deserialize, Serialize};

/// Token configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Token name, used in logs
    pub token_name: String,

    /// Flash-mint configuration
    pub flash: FlashConfig,
}

/// Flash-mint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlashConfig {
    /// Enable flash minting
    pub enabled: bool,

    /// Flash fee in basis points, charged on top of the principal
    ///
    /// Zero by default; when non-zero the session verifies and burns
    /// principal plus fee.
    pub fee_bps: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token_name: "wnative".to_string(),
            flash: FlashConfig::default(),
        }
    }
}

impl Default for FlashConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            fee_bps: 0,
        }
    }
}

impl Config {
    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Load from environment variables
    pub fn from_env() -> crate::Result<Self> {
        let mut config = Config::default();

        if let Ok(name) = std::env::var("WNATIVE_TOKEN_NAME") {
            config.token_name = name;
        }

        if let Ok(enabled) = std::env::var("WNATIVE_FLASH_ENABLED") {
            config.flash.enabled = enabled
                .parse()
                .map_err(|_| crate::Error::Config(format!("Invalid WNATIVE_FLASH_ENABLED: {}", enabled)))?;
        }

        if let Ok(fee_bps) = std::env::var("WNATIVE_FLASH_FEE_BPS") {
            config.flash.fee_bps = fee_bps
                .parse()
                .map_err(|_| crate::Error::Config(format!("Invalid WNATIVE_FLASH_FEE_BPS: {}", fee_bps)))?;
        }

        Ok(config)
    }
}
