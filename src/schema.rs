// 📐 Shape Layer - Entity kinds, asset policy, export profiles
// One generic engine runs the whole catalog; everything per-domain lives in
// the shape contract defined here

use crate::normalize::display_image_url;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

// ============================================================================
// ENTITY KINDS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    /// Catalogued artwork (YS codes)
    Artwork,
    /// Exhibition listing (EX codes)
    Exhibition,
    /// Special lecture listing (LC codes)
    Lecture,
}

impl EntityKind {
    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Artwork => "Artwork",
            EntityKind::Exhibition => "Exhibition",
            EntityKind::Lecture => "Lecture",
        }
    }

    /// Collection stem used for fixture and export file names
    pub fn plural(&self) -> &'static str {
        match self {
            EntityKind::Artwork => "artworks",
            EntityKind::Exhibition => "exhibitions",
            EntityKind::Lecture => "lectures",
        }
    }

    /// Fixture file name under the data directory
    pub fn fixture_file(&self) -> String {
        format!("{}.json", self.plural())
    }

    pub fn all() -> [EntityKind; 3] {
        [EntityKind::Artwork, EntityKind::Exhibition, EntityKind::Lecture]
    }

    /// Reverse of `plural()`, used by the API layer for path segments
    pub fn from_plural(stem: &str) -> Option<EntityKind> {
        match stem {
            "artworks" => Some(EntityKind::Artwork),
            "exhibitions" => Some(EntityKind::Exhibition),
            "lectures" => Some(EntityKind::Lecture),
            _ => None,
        }
    }
}

// ============================================================================
// ASSET POLICY
// ============================================================================

/// Where a kind's display images live and which extension they carry.
///
/// Art assets and exhibition/lecture assets sit under different roots of the
/// same image repository, and use different file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetPolicy {
    pub base_url: &'static str,
    pub extension: &'static str,
}

impl AssetPolicy {
    pub const fn new(base_url: &'static str, extension: &'static str) -> Self {
        AssetPolicy { base_url, extension }
    }

    /// Full display URL for a resolved filename; empty filename stays empty
    pub fn display_url(&self, filename: &str) -> String {
        display_image_url(self.base_url, self.extension, filename)
    }
}

// ============================================================================
// EXPORT PROFILES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportProfile {
    /// Full normalized record set, raw price values included
    Internal,
    /// Public-facing subset: no prices, no stock dates, derived image URL
    External,
}

impl ExportProfile {
    pub fn name(&self) -> &'static str {
        match self {
            ExportProfile::Internal => "internal",
            ExportProfile::External => "external",
        }
    }

    pub fn from_name(name: &str) -> Option<ExportProfile> {
        match name {
            "internal" => Some(ExportProfile::Internal),
            "external" => Some(ExportProfile::External),
            _ => None,
        }
    }

    pub fn all() -> [ExportProfile; 2] {
        [ExportProfile::Internal, ExportProfile::External]
    }
}

// ============================================================================
// ENTITY-SHAPE CONTRACT
// ============================================================================

/// Per-domain configuration for the generic catalog engine.
///
/// Implementations declare their identity prefix, which fields take part in
/// text search, where their images live, how a raw record is normalized, and
/// what each export profile looks like. The engine itself never learns any
/// concrete field names.
pub trait CatalogEntity: Clone + Serialize + DeserializeOwned {
    const KIND: EntityKind;

    /// Structured-code prefix, e.g. `YS` for `YS12`
    const CODE_PREFIX: &'static str;

    /// Field names consulted by text search, in match order
    const SEARCH_FIELDS: &'static [&'static str];

    /// Field names an edit form binds, in form order (identity excluded)
    const EDIT_FIELDS: &'static [&'static str];

    /// Display-image location for this kind
    const ASSETS: AssetPolicy;

    /// Unique identity within the collection
    fn code(&self) -> &str;

    /// Human-readable label used in events and status lines
    fn title(&self) -> &str;

    /// Resolved image filename (may be empty when the record has no image)
    fn image_file(&self) -> &str;

    /// Text rendering of one field; `None` when the field is absent on this
    /// record, so it can never match a non-empty query. Covers at least
    /// `SEARCH_FIELDS` and `EDIT_FIELDS`.
    fn field_text(&self, field: &str) -> Option<String>;

    /// Bind one form field onto this record as entered text. Numeric-ish
    /// fields stay text until `normalize` runs at commit. Returns false for
    /// an unknown field name.
    fn set_field_text(&mut self, field: &str, value: &str) -> bool;

    /// Coerce numeric-ish fields and resolve the image reference in place.
    /// Runs once at load/add and again on a draft at commit.
    fn normalize(&mut self);

    /// Sanitized projection of this record for one export profile
    fn export_record(&self, profile: ExportProfile) -> serde_json::Value;

    /// Derived display URL per the kind's asset policy
    fn display_image_url(&self) -> String {
        Self::ASSETS.display_url(self.image_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_kind_round_trip_via_plural() {
        for kind in EntityKind::all() {
            assert_eq!(EntityKind::from_plural(kind.plural()), Some(kind));
        }
        assert_eq!(EntityKind::from_plural("paintings"), None);
    }

    #[test]
    fn test_fixture_file_names() {
        assert_eq!(EntityKind::Artwork.fixture_file(), "artworks.json");
        assert_eq!(EntityKind::Lecture.fixture_file(), "lectures.json");
    }

    #[test]
    fn test_export_profile_names() {
        assert_eq!(ExportProfile::from_name("internal"), Some(ExportProfile::Internal));
        assert_eq!(ExportProfile::from_name("external"), Some(ExportProfile::External));
        assert_eq!(ExportProfile::from_name("public"), None);
    }

    #[test]
    fn test_asset_policy_builds_urls() {
        let policy = AssetPolicy::new("https://img.example/exh/", ".png");
        assert_eq!(policy.display_url("night"), "https://img.example/exh/night.png");
        assert_eq!(policy.display_url(""), "");
    }
}
