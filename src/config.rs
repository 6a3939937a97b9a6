//! Configuration for lnproof.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Which Bolt12 encodings are routed to the Bolt12 decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bolt12Scheme {
    /// Bolt12 invoices only (`lni`).
    Invoice,
    /// Bolt12 offers only (`lno1`).
    Offer,
    /// Both invoices and offers.
    #[default]
    Any,
}

impl Bolt12Scheme {
    /// Prefixes recognised for this scheme, in match order.
    #[must_use]
    pub fn prefixes(self) -> &'static [&'static str] {
        match self {
            Self::Invoice => &["lni"],
            Self::Offer => &["lno1"],
            Self::Any => &["lni", "lno1"],
        }
    }
}

/// How the preimage string is turned into bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreimageMode {
    /// Drop malformed hex groups and a dangling odd character.
    #[default]
    Permissive,
    /// Reject anything that is not an even-length hex string.
    Strict,
}

/// Verifier configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifierConfig {
    /// Bolt11 prefixes, always checked before Bolt12.
    #[serde(default = "default_bolt11_prefixes")]
    pub bolt11_prefixes: Vec<String>,

    /// Active Bolt12 scheme.
    #[serde(default)]
    pub bolt12_scheme: Bolt12Scheme,

    /// Preimage parsing mode.
    #[serde(default)]
    pub preimage_mode: PreimageMode,

    /// Log level.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            bolt11_prefixes: default_bolt11_prefixes(),
            bolt12_scheme: Bolt12Scheme::default(),
            preimage_mode: PreimageMode::default(),
            log_level: default_log_level(),
        }
    }
}

fn default_bolt11_prefixes() -> Vec<String> {
    vec!["lnbc".to_string(), "lntb".to_string()]
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Default location of the configuration file, if a platform config dir exists.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "lnproof")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

impl VerifierConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn to_file(&self, path: &Path) -> crate::Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
