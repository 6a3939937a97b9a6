//! Command-line interface definition.

use clap::{Parser, ValueEnum};
use lnproof::config::{default_config_path, Bolt12Scheme, PreimageMode, VerifierConfig};
use lnproof::FormInput;
use std::io::BufRead;
use std::path::PathBuf;

/// Verify that a preimage proves payment of a Lightning invoice.
#[derive(Parser, Debug)]
#[command(name = "lnproof")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// BOLT11 or BOLT12 invoice.
    #[arg(long, short, env = "LNPROOF_INVOICE")]
    pub invoice: Option<String>,

    /// Claimed payment preimage, hex encoded.
    #[arg(long, short, env = "LNPROOF_PREIMAGE")]
    pub preimage: Option<String>,

    /// URL whose query carries `invoice` and `preimage`.
    #[arg(long, conflicts_with_all = ["invoice", "preimage"])]
    pub url: Option<String>,

    /// Reject preimages that are not clean hex instead of skipping bad pairs.
    #[arg(long)]
    pub strict: bool,

    /// Which BOLT12 encoding to accept.
    #[arg(long, value_enum, env = "LNPROOF_BOLT12_SCHEME")]
    pub bolt12_scheme: Option<CliBolt12Scheme>,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,

    /// Log level.
    #[arg(long, env = "RUST_LOG")]
    pub log_level: Option<String>,

    /// Path to configuration file.
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

/// BOLT12 scheme CLI enum.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CliBolt12Scheme {
    /// `lni` invoices only.
    Invoice,
    /// `lno1` offers only.
    Offer,
    /// Both.
    Any,
}

impl Cli {
    /// Build the verifier configuration.
    ///
    /// The file named by `--config` is loaded if given, otherwise the
    /// default config file if one exists. CLI flags override the file.
    pub fn to_config(&self) -> color_eyre::Result<VerifierConfig> {
        let path = self
            .config
            .clone()
            .or_else(|| default_config_path().filter(|p| p.is_file()));

        let mut config = match path {
            Some(path) => VerifierConfig::from_file(&path)?,
            None => VerifierConfig::default(),
        };

        if self.strict {
            config.preimage_mode = PreimageMode::Strict;
        }
        if let Some(scheme) = self.bolt12_scheme {
            config.bolt12_scheme = scheme.into();
        }
        if let Some(ref level) = self.log_level {
            config.log_level.clone_from(level);
        }

        Ok(config)
    }

    /// Collect the two inputs, reading anything not given on the command
    /// line from `reader`, one value per line.
    pub fn to_input(&self, reader: impl BufRead) -> color_eyre::Result<FormInput> {
        let mut input = match self.url {
            Some(ref url) => FormInput::from_url(url)?,
            None => FormInput::new(
                self.invoice.as_deref().unwrap_or_default(),
                self.preimage.as_deref().unwrap_or_default(),
            ),
        };

        if !input.auto_run() {
            input.fill_missing(reader)?;
        }
        Ok(input)
    }
}

impl From<CliBolt12Scheme> for Bolt12Scheme {
    fn from(s: CliBolt12Scheme) -> Self {
        match s {
            CliBolt12Scheme::Invoice => Self::Invoice,
            CliBolt12Scheme::Offer => Self::Offer,
            CliBolt12Scheme::Any => Self::Any,
        }
    }
}
