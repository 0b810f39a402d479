// 🎓 Lecture Entity - Special-lecture listings carrying LC codes
// Same image pipeline as exhibitions; lecture posters share the exhibition
// asset root

use crate::normalize::extract_image_filename;
use crate::schema::{AssetPolicy, CatalogEntity, EntityKind, ExportProfile};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lecture posters live under the shared exhibition asset root
pub const LECTURE_ASSETS: AssetPolicy = AssetPolicy::new(
    "https://raw.githubusercontent.com/youngsungallery/IMG_DB/main/youngsungallery/exh/",
    ".png",
);

// ============================================================================
// LECTURE RECORD
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lecture {
    /// Structured identity, e.g. `LC2`
    pub code: String,

    #[serde(default)]
    pub title: String,

    /// Speaker credit; `SLI` on the wire
    #[serde(default, rename = "SLI")]
    pub speaker: String,

    /// Session date as free text
    #[serde(default)]
    pub date: String,

    /// Resolved poster filename (no extension)
    #[serde(default)]
    pub image_file: String,

    /// Source image URL as fetched; consumed by normalization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Lecture {
    pub fn new(code: &str, title: &str, speaker: &str) -> Self {
        Lecture {
            code: code.to_string(),
            title: title.to_string(),
            speaker: speaker.to_string(),
            ..Lecture::default()
        }
    }
}

impl CatalogEntity for Lecture {
    const KIND: EntityKind = EntityKind::Lecture;
    const CODE_PREFIX: &'static str = "LC";
    const SEARCH_FIELDS: &'static [&'static str] = &["code", "title", "SLI", "date"];
    const EDIT_FIELDS: &'static [&'static str] = &["title", "SLI", "date", "imageFile"];
    const ASSETS: AssetPolicy = LECTURE_ASSETS;

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
            "SLI" => Some(self.speaker.clone()),
            "date" => Some(self.date.clone()),
            "imageFile" => Some(self.image_file.clone()),
            _ => None,
        }
    }

    fn set_field_text(&mut self, field: &str, value: &str) -> bool {
        match field {
            "title" => self.title = value.to_string(),
            "SLI" => self.speaker = value.to_string(),
            "date" => self.date = value.to_string(),
            "imageFile" => self.image_file = value.to_string(),
            _ => return false,
        }
        true
    }

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
            ExportProfile::Internal => serde_json::to_value(LectureInternal::from(self)),
            ExportProfile::External => serde_json::to_value(LectureExternal::from(self)),
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
pub struct LectureInternal {
    pub code: String,
    pub title: String,
    #[serde(rename = "SLI")]
    pub speaker: String,
    pub date: String,
    pub image_file: String,
}

impl From<&Lecture> for LectureInternal {
    fn from(lecture: &Lecture) -> Self {
        LectureInternal {
            code: lecture.code.clone(),
            title: lecture.title.clone(),
            speaker: lecture.speaker.clone(),
            date: lecture.date.clone(),
            image_file: lecture.image_file.clone(),
        }
    }
}

/// Public export: listing fields plus the full display URL
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LectureExternal {
    pub code: String,
    pub title: String,
    #[serde(rename = "SLI")]
    pub speaker: String,
    pub date: String,
    pub image: String,
}

impl From<&Lecture> for LectureExternal {
    fn from(lecture: &Lecture) -> Self {
        LectureExternal {
            code: lecture.code.clone(),
            title: lecture.title.clone(),
            speaker: lecture.speaker.clone(),
            date: lecture.date.clone(),
            image: lecture.display_image_url(),
        }
    }
}
