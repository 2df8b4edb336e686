use crate::error::ChainError;
use config::{Config as Cfg, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ChainConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_currency")]
    pub default_currency: String,
    #[serde(default)]
    pub numbering: NumberingConfig,
}

/// Prefixes and padding for generated document numbers (`QT-001` style).
#[derive(Debug, Deserialize, Clone)]
pub struct NumberingConfig {
    #[serde(default = "default_quotation_prefix")]
    pub quotation_prefix: String,
    #[serde(default = "default_invoice_prefix")]
    pub invoice_prefix: String,
    #[serde(default = "default_receipt_prefix")]
    pub receipt_prefix: String,
    #[serde(default = "default_pad_width")]
    pub pad_width: usize,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_currency() -> String {
    "THB".to_string()
}

fn default_quotation_prefix() -> String {
    "QT".to_string()
}

fn default_invoice_prefix() -> String {
    "INV".to_string()
}

fn default_receipt_prefix() -> String {
    "REC".to_string()
}

fn default_pad_width() -> usize {
    3
}

impl Default for NumberingConfig {
    fn default() -> Self {
        Self {
            quotation_prefix: default_quotation_prefix(),
            invoice_prefix: default_invoice_prefix(),
            receipt_prefix: default_receipt_prefix(),
            pad_width: default_pad_width(),
        }
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            default_currency: default_currency(),
            numbering: NumberingConfig::default(),
        }
    }
}

impl ChainConfig {
    pub fn load() -> Result<Self, ChainError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("DOCCHAIN").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
