// 🖼️ Exhibition Entity - Show listings carrying EX codes
// Image references arrive as filenames or source URLs; only the resolved
// filename is kept, the display URL is derived on demand

use crate::normalize::extract_image_filename;
use crate::schema::{AssetPolicy, CatalogEntity, EntityKind, ExportProfile};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Exhibition posters live under the shared exhibition asset root
pub const EXHIBITION_ASSETS: AssetPolicy = AssetPolicy::new(
    "https://raw.githubusercontent.com/youngsungallery/IMG_DB/main/youngsungallery/exh/",
    ".png",
);

// ============================================================================
// EXHIBITION RECORD
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exhibition {
    /// Structured identity, e.g. `EX4`
    pub code: String,

    #[serde(default)]
    pub title: String,

    /// Run dates as free text, e.g. `2024.03.02 - 2024.03.28`
    #[serde(default)]
    pub date: String,

    #[serde(default)]
    pub desc: String,

    /// Resolved poster filename (no extension)
    #[serde(default)]
    pub image_file: String,

    /// Source image URL as fetched; consumed by normalization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Exhibition {
    pub fn new(code: &str, title: &str) -> Self {
        Exhibition {
            code: code.to_string(),
            title: title.to_string(),
            ..Exhibition::default()
        }
    }
}

impl CatalogEntity for Exhibition {
    const KIND: EntityKind = EntityKind::Exhibition;
    const CODE_PREFIX: &'static str = "EX";
    const SEARCH_FIELDS: &'static [&'static str] = &["code", "title", "date", "desc"];
    const EDIT_FIELDS: &'static [&'static str] = &["title", "date", "desc", "imageFile"];
    const ASSETS: AssetPolicy = EXHIBITION_ASSETS;

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
            "date" => Some(self.date.clone()),
            "desc" => Some(self.desc.clone()),
            "imageFile" => Some(self.image_file.clone()),
            _ => None,
        }
    }

    fn set_field_text(&mut self, field: &str, value: &str) -> bool {
        match field {
            "title" => self.title = value.to_string(),
            "date" => self.date = value.to_string(),
            "desc" => self.desc = value.to_string(),
            "imageFile" => self.image_file = value.to_string(),
            _ => return false,
        }
        true
    }

    /// A direct filename wins over a source URL; either way the source URL
    /// is spent once the filename is resolved
    fn normalize(&mut self) {
        let source = self.image.take();
        if self.image_file.is_empty() {
            if let Some(url) = source {
                self.image_file = extract_image_filename(&url);
            }
        }
    }

    fn export_record(&self, profile: ExportProfile) -> Value {
        let record = match profile {
            ExportProfile::Internal => serde_json::to_value(ExhibitionInternal::from(self)),
            ExportProfile::External => serde_json::to_value(ExhibitionExternal::from(self)),
        };
        record.unwrap_or(Value::Null)
    }
}

// ============================================================================
// EXPORT PROJECTIONS
// ============================================================================

/// Working export: the resolved filename travels, the derived URL does not
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExhibitionInternal {
    pub code: String,
    pub title: String,
    pub date: String,
    pub desc: String,
    pub image_file: String,
}

impl From<&Exhibition> for ExhibitionInternal {
    fn from(exhibition: &Exhibition) -> Self {
        ExhibitionInternal {
            code: exhibition.code.clone(),
            title: exhibition.title.clone(),
            date: exhibition.date.clone(),
            desc: exhibition.desc.clone(),
            image_file: exhibition.image_file.clone(),
        }
    }
}

/// Public export: listing fields plus the full display URL
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExhibitionExternal {
    pub code: String,
    pub title: String,
    pub date: String,
    pub desc: String,
    pub image: String,
}

impl From<&Exhibition> for ExhibitionExternal {
    fn from(exhibition: &Exhibition) -> Self {
        ExhibitionExternal {
            code: exhibition.code.clone(),
            title: exhibition.title.clone(),
            date: exhibition.date.clone(),
            desc: exhibition.desc.clone(),
            image: exhibition.display_image_url(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_exhibition() -> Exhibition {
        Exhibition {
            code: "EX4".to_string(),
            title: "Spring Invitational".to_string(),
            date: "2024.03.02 - 2024.03.28".to_string(),
            desc: "Group show, main hall".to_string(),
            image_file: String::new(),
            image: Some(
                "https://raw.githubusercontent.com/youngsungallery/IMG_DB/main/youngsungallery/exh/spring24.png"
                    .to_string(),
            ),
        }
    }

    #[test]
    fn test_normalize_resolves_filename_from_source_url() {
        let mut exhibition = sample_exhibition();
        exhibition.normalize();
        assert_eq!(exhibition.image_file, "spring24");
        assert_eq!(exhibition.image, None);
    }

    #[test]
    fn test_normalize_prefers_direct_filename() {
        let mut exhibition = sample_exhibition();
        exhibition.image_file = "spring24_alt".to_string();
        exhibition.normalize();
        assert_eq!(exhibition.image_file, "spring24_alt");
        assert_eq!(exhibition.image, None);
    }

    #[test]
    fn test_display_url_derived_from_resolved_filename() {
        let mut exhibition = sample_exhibition();
        exhibition.normalize();
        assert_eq!(
            exhibition.display_image_url(),
            format!("{}spring24.png", EXHIBITION_ASSETS.base_url)
        );
    }

    #[test]
    fn test_internal_record_carries_filename_not_url() {
        let mut exhibition = sample_exhibition();
        exhibition.normalize();
        let record = exhibition.export_record(ExportProfile::Internal);
        let object = record.as_object().unwrap();
        assert_eq!(object.get("imageFile").and_then(|v| v.as_str()), Some("spring24"));
        assert!(!object.contains_key("image"));
    }

    #[test]
    fn test_external_record_carries_full_url() {
        let mut exhibition = sample_exhibition();
        exhibition.normalize();
        let record = exhibition.export_record(ExportProfile::External);
        let object = record.as_object().unwrap();
        let expected = format!("{}spring24.png", EXHIBITION_ASSETS.base_url);
        assert_eq!(object.get("image").and_then(|v| v.as_str()), Some(expected.as_str()));
    }

    #[test]
    fn test_missing_image_stays_empty_everywhere() {
        let mut exhibition = Exhibition::new("EX9", "Unannounced");
        exhibition.normalize();
        assert_eq!(exhibition.image_file, "");
        assert_eq!(exhibition.display_image_url(), "");
    }
}
