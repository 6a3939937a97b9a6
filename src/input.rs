//! Raw input collection for the two verification fields.
//!
//! Inputs come from interactive fields (stdin lines) or from the `invoice`
//! and `preimage` query parameters of a URL. Either way, all whitespace is
//! stripped as soon as the value is captured.

use crate::error::{Error, Result};
use crate::preimage::strip_whitespace;
use std::io::BufRead;
use url::Url;

/// Query parameter carrying the invoice.
pub const INVOICE_PARAM: &str = "invoice";
/// Query parameter carrying the preimage.
pub const PREIMAGE_PARAM: &str = "preimage";

/// Invoice and preimage as captured from the user.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    /// Invoice string, whitespace removed.
    pub invoice: String,
    /// Preimage string, whitespace removed.
    pub preimage: String,
}

impl std::fmt::Debug for FormInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormInput")
            .field("invoice", &self.invoice)
            .field("preimage_len", &self.preimage.len())
            .finish()
    }
}

impl FormInput {
    /// Capture both fields, stripping whitespace.
    #[must_use]
    pub fn new(invoice: &str, preimage: &str) -> Self {
        Self {
            invoice: strip_whitespace(invoice),
            preimage: strip_whitespace(preimage),
        }
    }

    /// Pre-fill from a full URL's query string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Input`] if the URL cannot be parsed.
    pub fn from_url(url: &str) -> Result<Self> {
        let url = Url::parse(url).map_err(|e| Error::Input(format!("invalid URL: {e}")))?;
        Ok(Self::from_query_pairs(url.query_pairs()))
    }

    /// Pre-fill from a bare query string (`?invoice=...&preimage=...`).
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self::from_query_pairs(url::form_urlencoded::parse(query.as_bytes()))
    }

    fn from_query_pairs<'a>(
        pairs: impl Iterator<Item = (std::borrow::Cow<'a, str>, std::borrow::Cow<'a, str>)>,
    ) -> Self {
        let mut invoice = None;
        let mut preimage = None;
        for (key, value) in pairs {
            match key.as_ref() {
                INVOICE_PARAM if invoice.is_none() => invoice = Some(value.into_owned()),
                PREIMAGE_PARAM if preimage.is_none() => preimage = Some(value.into_owned()),
                _ => {}
            }
        }
        Self::new(
            invoice.as_deref().unwrap_or_default(),
            preimage.as_deref().unwrap_or_default(),
        )
    }

    /// Read the first two non-blank lines: invoice, then preimage.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or fewer than two lines are given.
    pub fn from_lines(reader: impl BufRead) -> Result<Self> {
        let mut input = Self::default();
        input.fill_missing(reader)?;
        Ok(input)
    }

    /// Fill each empty field, in order, from the next non-blank line.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or the reader ends first.
    pub fn fill_missing(&mut self, reader: impl BufRead) -> Result<()> {
        let mut lines = reader.lines();
        for field in [&mut self.invoice, &mut self.preimage] {
            while field.is_empty() {
                match lines.next() {
                    Some(line) => *field = strip_whitespace(&line?),
                    None => {
                        return Err(Error::Input(
                            "expected an invoice line followed by a preimage line".to_string(),
                        ))
                    }
                }
            }
        }
        Ok(())
    }

    /// True when both fields are filled, i.e. verification should run
    /// automatically once.
    #[must_use]
    pub fn auto_run(&self) -> bool {
        !self.invoice.is_empty() && !self.preimage.is_empty()
    }
}
