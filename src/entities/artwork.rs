// 🎨 Artwork Entity - Catalog records carrying YS codes
// Prices and intake dates are internal-only values; the public projection
// never contains them

use crate::normalize::{coerce_numeric, NumericText};
use crate::schema::{AssetPolicy, CatalogEntity, EntityKind, ExportProfile};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Artwork display assets are keyed by artwork code under the art root
pub const ARTWORK_ASSETS: AssetPolicy = AssetPolicy::new(
    "https://raw.githubusercontent.com/youngsungallery/IMG_DB/main/youngsungallery/art/",
    ".jpg",
);

// ============================================================================
// ARTWORK RECORD
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artwork {
    /// Structured identity, e.g. `YS12`
    pub code: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub artist: String,

    #[serde(default)]
    pub technique: String,

    /// Physical dimensions as free text, e.g. `53x45.5cm`
    #[serde(default)]
    pub size: String,

    /// Production year; numeric once coerced, text when it isn't one
    #[serde(default)]
    pub year: Option<NumericText>,

    /// Acquisition price - internal only
    #[serde(default)]
    pub buy_price: Option<NumericText>,

    /// Listed sale price - internal only
    #[serde(default)]
    pub sell_price: Option<NumericText>,

    /// Intake date - internal only
    #[serde(default)]
    pub stock_date: Option<String>,

    /// Series the piece belongs to, when any
    #[serde(default)]
    pub set_name: Option<String>,

    /// Resolved display-image filename; falls back to the code
    #[serde(default)]
    pub image_file: String,
}

impl Artwork {
    /// Minimal record for a fresh catalog entry; everything else is filled
    /// in through an edit session
    pub fn new(code: &str, title: &str, artist: &str) -> Self {
        Artwork {
            code: code.to_string(),
            title: title.to_string(),
            artist: artist.to_string(),
            ..Artwork::default()
        }
    }
}

impl CatalogEntity for Artwork {
    const KIND: EntityKind = EntityKind::Artwork;
    const CODE_PREFIX: &'static str = "YS";
    const SEARCH_FIELDS: &'static [&'static str] =
        &["code", "title", "artist", "technique", "size", "year", "setName"];
    const EDIT_FIELDS: &'static [&'static str] = &[
        "title",
        "artist",
        "technique",
        "size",
        "year",
        "buyPrice",
        "sellPrice",
        "stockDate",
        "setName",
        "imageFile",
    ];
    const ASSETS: AssetPolicy = ARTWORK_ASSETS;

    fn code(&self) -> &str {
        &self.code
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn image_file(&self) -> &str {
        &self.image_file
    }

    fn field_text(&self, field: &str) -> Option<String> {
        match field {
            "code" => Some(self.code.clone()),
            "title" => Some(self.title.clone()),
            "artist" => Some(self.artist.clone()),
            "technique" => Some(self.technique.clone()),
            "size" => Some(self.size.clone()),
            "year" => self.year.as_ref().map(|y| y.as_text()),
            "buyPrice" => self.buy_price.as_ref().map(|p| p.as_text()),
            "sellPrice" => self.sell_price.as_ref().map(|p| p.as_text()),
            "stockDate" => self.stock_date.clone(),
            "setName" => self.set_name.clone(),
            "imageFile" => Some(self.image_file.clone()),
            _ => None,
        }
    }

    fn set_field_text(&mut self, field: &str, value: &str) -> bool {
        match field {
            "title" => self.title = value.to_string(),
            "artist" => self.artist = value.to_string(),
            "technique" => self.technique = value.to_string(),
            "size" => self.size = value.to_string(),
            "year" => self.year = text_field(value),
            "buyPrice" => self.buy_price = text_field(value),
            "sellPrice" => self.sell_price = text_field(value),
            "stockDate" => self.stock_date = optional_text(value),
            "setName" => self.set_name = optional_text(value),
            "imageFile" => self.image_file = value.to_string(),
            _ => return false,
        }
        true
    }

    fn normalize(&mut self) {
        self.year = coerce_numeric(self.year.take());
        self.buy_price = coerce_numeric(self.buy_price.take());
        self.sell_price = coerce_numeric(self.sell_price.take());
        if self.image_file.is_empty() {
            self.image_file = self.code.clone();
        }
    }

    fn export_record(&self, profile: ExportProfile) -> Value {
        let record = match profile {
            ExportProfile::Internal => serde_json::to_value(ArtworkInternal::from(self)),
            ExportProfile::External => serde_json::to_value(ArtworkExternal::from(self)),
        };
        record.unwrap_or(Value::Null)
    }
}

fn text_field(value: &str) -> Option<NumericText> {
    if value.is_empty() {
        None
    } else {
        Some(NumericText::Text(value.to_string()))
    }
}

fn optional_text(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

// ============================================================================
// EXPORT PROJECTIONS
// ============================================================================

/// Working export: every domain field, prices raw, absent values as null
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtworkInternal {
    pub code: String,
    pub title: String,
    pub artist: String,
    pub technique: String,
    pub size: String,
    pub year: Option<NumericText>,
    pub buy_price: Option<NumericText>,
    pub sell_price: Option<NumericText>,
    pub stock_date: Option<String>,
    pub set_name: Option<String>,
    pub image_file: String,
}

impl From<&Artwork> for ArtworkInternal {
    fn from(artwork: &Artwork) -> Self {
        ArtworkInternal {
            code: artwork.code.clone(),
            title: artwork.title.clone(),
            artist: artwork.artist.clone(),
            technique: artwork.technique.clone(),
            size: artwork.size.clone(),
            year: artwork.year.clone(),
            buy_price: artwork.buy_price.clone(),
            sell_price: artwork.sell_price.clone(),
            stock_date: artwork.stock_date.clone(),
            set_name: artwork.set_name.clone(),
            image_file: artwork.image_file.clone(),
        }
    }
}

/// Public export: no acquisition or sale prices, no intake dates,
/// display URL derived from the asset policy
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtworkExternal {
    pub code: String,
    pub title: String,
    pub artist: String,
    pub technique: String,
    pub size: String,
    pub year: Option<NumericText>,
    pub set_name: Option<String>,
    pub image: String,
}

impl From<&Artwork> for ArtworkExternal {
    fn from(artwork: &Artwork) -> Self {
        ArtworkExternal {
            code: artwork.code.clone(),
            title: artwork.title.clone(),
            artist: artwork.artist.clone(),
            technique: artwork.technique.clone(),
            size: artwork.size.clone(),
            year: artwork.year.clone(),
            set_name: artwork.set_name.clone(),
            image: artwork.display_image_url(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_artwork() -> Artwork {
        Artwork {
            code: "YS7".to_string(),
            title: "Morning Tide".to_string(),
            artist: "Kim Youngsun".to_string(),
            technique: "Oil on canvas".to_string(),
            size: "53x45.5cm".to_string(),
            year: Some(NumericText::Text("2021".to_string())),
            buy_price: Some(NumericText::Text("1500000".to_string())),
            sell_price: Some(NumericText::Text("inquire".to_string())),
            stock_date: Some("2022-03-14".to_string()),
            set_name: None,
            image_file: String::new(),
        }
    }

    #[test]
    fn test_normalize_coerces_numeric_fields() {
        let mut artwork = sample_artwork();
        artwork.normalize();
        assert_eq!(artwork.year, Some(NumericText::Number(2021.0)));
        assert_eq!(artwork.buy_price, Some(NumericText::Number(1500000.0)));
        // non-numeric price text survives as-is
        assert_eq!(artwork.sell_price, Some(NumericText::Text("inquire".to_string())));
    }

    #[test]
    fn test_normalize_defaults_image_file_to_code() {
        let mut artwork = sample_artwork();
        artwork.normalize();
        assert_eq!(artwork.image_file, "YS7");

        let mut explicit = sample_artwork();
        explicit.image_file = "YS7_detail".to_string();
        explicit.normalize();
        assert_eq!(explicit.image_file, "YS7_detail");
    }

    #[test]
    fn test_field_text_absent_fields_are_none() {
        let artwork = sample_artwork();
        assert_eq!(artwork.field_text("setName"), None);
        assert_eq!(artwork.field_text("title"), Some("Morning Tide".to_string()));
        assert_eq!(artwork.field_text("nonsense"), None);
    }

    #[test]
    fn test_set_field_text_binds_form_values() {
        let mut artwork = sample_artwork();
        assert!(artwork.set_field_text("sellPrice", "2200000"));
        assert_eq!(artwork.sell_price, Some(NumericText::Text("2200000".to_string())));
        assert!(artwork.set_field_text("setName", ""));
        assert_eq!(artwork.set_name, None);
        assert!(!artwork.set_field_text("code", "YS99"));
    }

    #[test]
    fn test_external_record_never_carries_prices_or_stock_date() {
        let mut artwork = sample_artwork();
        artwork.normalize();
        let record = artwork.export_record(ExportProfile::External);
        let object = record.as_object().unwrap();
        assert!(!object.contains_key("buyPrice"));
        assert!(!object.contains_key("sellPrice"));
        assert!(!object.contains_key("stockDate"));
        assert_eq!(
            object.get("image").and_then(|v| v.as_str()),
            Some(format!("{}YS7.jpg", ARTWORK_ASSETS.base_url).as_str())
        );
    }

    #[test]
    fn test_internal_record_keeps_raw_prices_and_nulls() {
        let mut artwork = sample_artwork();
        artwork.normalize();
        let record = artwork.export_record(ExportProfile::Internal);
        let object = record.as_object().unwrap();
        assert_eq!(object.get("buyPrice").and_then(|v| v.as_f64()), Some(1500000.0));
        assert_eq!(object.get("sellPrice").and_then(|v| v.as_str()), Some("inquire"));
        assert!(object.get("setName").map(|v| v.is_null()).unwrap_or(false));
    }

    #[test]
    fn test_wire_shape_uses_camel_case() {
        let raw = r#"{
            "code": "YS3",
            "title": "Quiet Field",
            "artist": "Kim Youngsun",
            "buyPrice": 800000,
            "stockDate": "2021-11-02"
        }"#;
        let artwork: Artwork = serde_json::from_str(raw).unwrap();
        assert_eq!(artwork.buy_price, Some(NumericText::Number(800000.0)));
        assert_eq!(artwork.stock_date, Some("2021-11-02".to_string()));
        assert_eq!(artwork.technique, "");
    }
}
