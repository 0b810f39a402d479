// 🧹 Normalization Layer - Permissive field coercion + image references
// Fixture values arrive as strings, numbers, or nothing; normalize once at
// load (and again at commit) so the rest of the system sees one shape

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// NUMERIC-ISH VALUES
// ============================================================================

/// A field that is numeric when it can be (years, prices).
///
/// Fixtures carry these as JSON numbers or strings interchangeably, and a few
/// records hold free text instead of a price ("inquire"). Coercion turns
/// numeric strings into numbers and keeps non-numeric text as-is, so odd
/// values survive a round trip visibly instead of becoming NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericText {
    Number(f64),
    Text(String),
}

impl NumericText {
    /// Numeric value, if this holds one
    pub fn as_number(&self) -> Option<f64> {
        match self {
            NumericText::Number(n) => Some(*n),
            NumericText::Text(_) => None,
        }
    }

    /// Text rendering used for search matching and display
    pub fn as_text(&self) -> String {
        match self {
            NumericText::Number(n) => n.to_string(),
            NumericText::Text(s) => s.clone(),
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, NumericText::Number(_))
    }
}

impl fmt::Display for NumericText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericText::Number(n) => write!(f, "{}", n),
            NumericText::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Permissive numeric coercion for designated fields.
///
/// Empty or absent values become `None`, numeric strings become numbers,
/// already-numeric values pass through, and non-numeric text is left alone.
pub fn coerce_numeric(value: Option<NumericText>) -> Option<NumericText> {
    match value {
        None => None,
        Some(NumericText::Number(n)) => Some(NumericText::Number(n)),
        Some(NumericText::Text(raw)) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                None
            } else if let Ok(n) = trimmed.parse::<f64>() {
                Some(NumericText::Number(n))
            } else {
                Some(NumericText::Text(raw))
            }
        }
    }
}

// ============================================================================
// IMAGE REFERENCES
// ============================================================================

/// Resolve an image reference down to a bare filename (no `.png` extension).
///
/// References come in four flavors: a raw.githubusercontent.com URL, a
/// github.com `/blob/` URL, a bare `name.png`, or an already-bare name.
/// Query strings are dropped first in every case.
pub fn extract_image_filename(reference: &str) -> String {
    if reference.is_empty() {
        return String::new();
    }
    let clean = reference.split('?').next().unwrap_or(reference);

    if clean.contains("raw.githubusercontent.com") {
        let last = clean.rsplit('/').next().unwrap_or(clean);
        return strip_png(last).to_string();
    }

    if let Some((_, blob_path)) = clean.split_once("/blob/") {
        let last = blob_path.rsplit('/').next().unwrap_or(blob_path);
        return strip_png(last).to_string();
    }

    strip_png(clean).to_string()
}

/// Build the display URL for a resolved filename, avoiding a doubled
/// extension when the filename already carries one. Empty filename means
/// no image, which stays an empty URL.
pub fn display_image_url(base_url: &str, extension: &str, filename: &str) -> String {
    if filename.is_empty() {
        return String::new();
    }
    if filename.ends_with(extension) {
        format!("{}{}", base_url, filename)
    } else {
        format!("{}{}{}", base_url, filename, extension)
    }
}

fn strip_png(name: &str) -> &str {
    name.strip_suffix(".png").unwrap_or(name)
}

// ============================================================================
// STRUCTURED CODES
// ============================================================================

/// Numeric suffix of a structured code like `YS12`.
///
/// The whole remainder after the prefix must be digits; anything else is not
/// a structured code and returns `None`.
pub fn code_number(code: &str, prefix: &str) -> Option<i64> {
    let digits = code.strip_prefix(prefix)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_numeric_string_becomes_number() {
        let coerced = coerce_numeric(Some(NumericText::Text("15000".to_string())));
        assert_eq!(coerced, Some(NumericText::Number(15000.0)));
    }

    #[test]
    fn test_coerce_number_passes_through() {
        let coerced = coerce_numeric(Some(NumericText::Number(2023.0)));
        assert_eq!(coerced, Some(NumericText::Number(2023.0)));
    }

    #[test]
    fn test_coerce_non_numeric_text_kept() {
        let coerced = coerce_numeric(Some(NumericText::Text("inquire".to_string())));
        assert_eq!(coerced, Some(NumericText::Text("inquire".to_string())));
    }

    #[test]
    fn test_coerce_empty_and_absent_become_none() {
        assert_eq!(coerce_numeric(Some(NumericText::Text("".to_string()))), None);
        assert_eq!(coerce_numeric(Some(NumericText::Text("   ".to_string()))), None);
        assert_eq!(coerce_numeric(None), None);
    }

    #[test]
    fn test_coerce_trims_before_parsing() {
        let coerced = coerce_numeric(Some(NumericText::Text(" 450.5 ".to_string())));
        assert_eq!(coerced, Some(NumericText::Number(450.5)));
    }

    #[test]
    fn test_as_text_renders_whole_numbers_without_decimal() {
        assert_eq!(NumericText::Number(2023.0).as_text(), "2023");
        assert_eq!(NumericText::Number(450.5).as_text(), "450.5");
    }

    #[test]
    fn test_extract_from_raw_githubusercontent_url() {
        let url = "https://raw.githubusercontent.com/youngsungallery/IMG_DB/main/youngsungallery/exh/spring2024.png";
        assert_eq!(extract_image_filename(url), "spring2024");
    }

    #[test]
    fn test_extract_from_blob_url() {
        let url = "https://github.com/youngsungallery/IMG_DB/blob/main/youngsungallery/exh/winter.png";
        assert_eq!(extract_image_filename(url), "winter");
    }

    #[test]
    fn test_extract_drops_query_string() {
        let url = "https://raw.githubusercontent.com/g/r/main/exh/open-night.png?raw=true";
        assert_eq!(extract_image_filename(url), "open-night");
    }

    #[test]
    fn test_extract_bare_filename_with_extension() {
        assert_eq!(extract_image_filename("poster.png"), "poster");
    }

    #[test]
    fn test_extract_bare_filename_passthrough() {
        assert_eq!(extract_image_filename("poster"), "poster");
        assert_eq!(extract_image_filename(""), "");
    }

    #[test]
    fn test_display_url_appends_extension_once() {
        let base = "https://raw.githubusercontent.com/g/r/main/exh/";
        assert_eq!(
            display_image_url(base, ".png", "poster"),
            format!("{}poster.png", base)
        );
        assert_eq!(
            display_image_url(base, ".png", "poster.png"),
            format!("{}poster.png", base)
        );
    }

    #[test]
    fn test_display_url_empty_filename_is_empty() {
        assert_eq!(display_image_url("https://x/", ".png", ""), "");
    }

    #[test]
    fn test_code_number_strict_suffix() {
        assert_eq!(code_number("YS12", "YS"), Some(12));
        assert_eq!(code_number("YS007", "YS"), Some(7));
        assert_eq!(code_number("YS", "YS"), None);
        assert_eq!(code_number("YS12b", "YS"), None);
        assert_eq!(code_number("EX3", "YS"), None);
    }
}
