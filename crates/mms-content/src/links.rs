//! Outbound links: telephone, e-mail and WhatsApp hand-off URIs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An international phone number written as `+CCC NNNN NNNN`.
///
/// The display form is kept as authored; URIs use the bare digit string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber {
    display: String,
    digits: String,
}

/// Errors that can occur when parsing a phone number.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PhoneError {
    #[error("Phone number must start with '+': {0}")]
    MissingPlus(String),

    #[error("Phone number contains invalid character '{1}': {0}")]
    InvalidCharacter(String, char),

    #[error("Phone number has no digits: {0}")]
    Empty(String),
}

impl PhoneNumber {
    /// Digits including the country code, without `+` or spaces.
    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// Human-readable form, e.g. `+222 4661 9392`.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// `tel:` URI.
    pub fn tel_uri(&self) -> String {
        format!("tel:+{}", self.digits)
    }

    /// WhatsApp deep link, optionally pre-filled with a message.
    pub fn whatsapp_uri(&self, text: Option<&str>) -> String {
        match text {
            Some(text) if !text.is_empty() => format!(
                "https://wa.me/{}?text={}",
                self.digits,
                urlencoding::encode(text)
            ),
            _ => format!("https://wa.me/{}", self.digits),
        }
    }
}

impl FromStr for PhoneNumber {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let Some(rest) = trimmed.strip_prefix('+') else {
            return Err(PhoneError::MissingPlus(s.to_string()));
        };

        let mut digits = String::with_capacity(rest.len());
        for c in rest.chars() {
            if c.is_ascii_digit() {
                digits.push(c);
            } else if c != ' ' {
                return Err(PhoneError::InvalidCharacter(s.to_string(), c));
            }
        }

        if digits.is_empty() {
            return Err(PhoneError::Empty(s.to_string()));
        }

        // Collapse runs of spaces so the display form is stable.
        let display = format!("+{}", rest.split_whitespace().collect::<Vec<_>>().join(" "));

        Ok(Self { display, digits })
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

impl<'de> Deserialize<'de> for PhoneNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl Serialize for PhoneNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.display)
    }
}

/// Build a `mailto:` URI with optional pre-filled subject and body.
pub fn mailto(address: &str, subject: Option<&str>, body: Option<&str>) -> String {
    let mut params = Vec::new();
    if let Some(subject) = subject.filter(|s| !s.is_empty()) {
        params.push(format!("subject={}", urlencoding::encode(subject)));
    }
    if let Some(body) = body.filter(|b| !b.is_empty()) {
        params.push(format!("body={}", urlencoding::encode(body)));
    }

    if params.is_empty() {
        format!("mailto:{}", address)
    } else {
        format!("mailto:{}?{}", address, params.join("&"))
    }
}
