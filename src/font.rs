//!
//! Web font family/variant helpers - compact variant descriptor parsing
//! (`n4`, `i7`, ...) and family name normalization.
//!

use crate::error::Error;
use crate::result::Result;
use std::fmt;

/// Separator used by [`normalize`]
pub const DEFAULT_SEPARATOR: &str = "-";

/// Font style component of a compact variant descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

impl FontStyle {
    fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_lowercase() {
            'n' => Some(FontStyle::Normal),
            'i' => Some(FontStyle::Italic),
            'o' => Some(FontStyle::Oblique),
            _ => None,
        }
    }

    /// Single-letter code used in compact descriptors
    pub fn code(&self) -> char {
        match self {
            FontStyle::Normal => 'n',
            FontStyle::Italic => 'i',
            FontStyle::Oblique => 'o',
        }
    }
}

impl fmt::Display for FontStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A font family paired with a parsed variant descriptor of the form
/// `[nio][1-9]` - style letter followed by a weight digit (`n4` is
/// "normal 400"). Defaults to `n4` when the descriptor is absent or
/// unrecognized, matching browser defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontVariant {
    pub family: String,
    pub style: FontStyle,
    pub weight: u8,
}

impl FontVariant {
    /// Lenient constructor - an unrecognized descriptor falls back to `n4`.
    pub fn new(family: &str, descriptor: &str) -> Self {
        Self::parse(family, descriptor).unwrap_or_else(|_| Self {
            family: family.to_string(),
            style: FontStyle::default(),
            weight: 4,
        })
    }

    /// Strict constructor - an unrecognized descriptor is reported as
    /// [`Error::InvalidVariant`].
    pub fn parse(family: &str, descriptor: &str) -> Result<Self> {
        let regex = regex::Regex::new(r"(?i)^([nio])([1-9])$").unwrap();
        let captures = regex
            .captures(descriptor)
            .ok_or_else(|| Error::InvalidVariant(descriptor.to_string()))?;
        let style = captures[1]
            .chars()
            .next()
            .and_then(FontStyle::from_code)
            .ok_or_else(|| Error::InvalidVariant(descriptor.to_string()))?;
        let weight = captures[2]
            .parse::<u8>()
            .map_err(|_| Error::InvalidVariant(descriptor.to_string()))?;
        Ok(Self {
            family: family.to_string(),
            style,
            weight,
        })
    }

    /// Compact descriptor form (`n4`, `i7`, ...)
    pub fn descriptor(&self) -> String {
        format!("{}{}", self.style.code(), self.weight)
    }

    /// Font probe shorthand used when testing face availability against
    /// the `FontFace` API, e.g. `n 400 300px Futura`.
    pub fn font_shorthand(&self) -> String {
        format!("{} {}00 300px {}", self.style.code(), self.weight, self.family)
    }
}

/// Strip non-alphanumeric characters and lowercase a name fragment.
pub fn sanitize(part: &str) -> String {
    let regex = regex::Regex::new(r"[\W_]+").unwrap();
    regex.replace_all(part, "").to_lowercase()
}

/// Normalize name fragments into a single lowercase identifier joined by
/// [`DEFAULT_SEPARATOR`]; empty fragments are dropped.
pub fn normalize(parts: &[&str]) -> String {
    normalize_with_separator(parts, DEFAULT_SEPARATOR)
}

pub fn normalize_with_separator(parts: &[&str], separator: &str) -> String {
    parts
        .iter()
        .map(|part| sanitize(part))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}
