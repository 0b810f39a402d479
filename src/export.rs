// 📦 Export Layer - Projection files
// "Save" in this system means writing a projection back out; the files here
// are the only thing that outlives a session

use crate::catalog::{Catalog, Gallery};
use crate::schema::{CatalogEntity, EntityKind, ExportProfile};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File name for one kind + profile, e.g. `artworks_internal.json`
pub fn export_file_name(kind: EntityKind, profile: ExportProfile) -> String {
    format!("{}_{}.json", kind.plural(), profile.name())
}

/// Write one catalog's projection as pretty-printed JSON; returns the path
pub fn write_export<E: CatalogEntity>(
    catalog: &mut Catalog<E>,
    profile: ExportProfile,
    out_dir: &Path,
) -> Result<PathBuf> {
    let records = catalog.export_view(profile);
    let contents =
        serde_json::to_string_pretty(&records).context("Failed to serialize export records")?;
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create export directory: {}", out_dir.display()))?;
    let path = out_dir.join(export_file_name(E::KIND, profile));
    fs::write(&path, contents + "\n")
        .with_context(|| format!("Failed to write export file: {}", path.display()))?;
    catalog.note_export(profile, &path);
    tracing::info!(
        kind = E::KIND.name(),
        profile = profile.name(),
        path = %path.display(),
        "export written"
    );
    Ok(path)
}

/// Write every kind's projection for one profile
pub fn write_gallery_exports(
    gallery: &mut Gallery,
    profile: ExportProfile,
    out_dir: &Path,
) -> Result<Vec<PathBuf>> {
    Ok(vec![
        write_export(&mut gallery.artworks, profile, out_dir)?,
        write_export(&mut gallery.exhibitions, profile, out_dir)?,
        write_export(&mut gallery.lectures, profile, out_dir)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Artwork;
    use crate::events::EventKind;

    fn small_catalog() -> Catalog<Artwork> {
        let mut catalog = Catalog::new();
        catalog.load_records(vec![
            Artwork::new("YS2", "Harbor Dusk", "Kim Youngsun"),
            Artwork::new("YS1", "First Light", "Kim Youngsun"),
        ]);
        catalog
    }

    #[test]
    fn test_export_file_names() {
        assert_eq!(
            export_file_name(EntityKind::Artwork, ExportProfile::Internal),
            "artworks_internal.json"
        );
        assert_eq!(
            export_file_name(EntityKind::Lecture, ExportProfile::External),
            "lectures_external.json"
        );
    }

    #[test]
    fn test_write_export_produces_readable_json() {
        let dir = tempfile::tempdir().unwrap();
        let mut catalog = small_catalog();

        let path = write_export(&mut catalog, ExportProfile::Internal, dir.path()).unwrap();
        assert!(path.ends_with("artworks_internal.json"));

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.ends_with('\n'));
        let records: Vec<serde_json::Value> = serde_json::from_str(&contents).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].get("code").and_then(|v| v.as_str()),
            Some("YS2")
        );
    }

    #[test]
    fn test_external_file_never_contains_price_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut catalog = small_catalog();

        let path = write_export(&mut catalog, ExportProfile::External, dir.path()).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("buyPrice"));
        assert!(!contents.contains("sellPrice"));
        assert!(!contents.contains("stockDate"));
    }

    #[test]
    fn test_write_export_records_event() {
        let dir = tempfile::tempdir().unwrap();
        let mut catalog = small_catalog();
        write_export(&mut catalog, ExportProfile::Internal, dir.path()).unwrap();
        assert_eq!(
            catalog.events().latest().map(|e| e.kind),
            Some(EventKind::ViewExported)
        );
    }

    #[test]
    fn test_write_gallery_exports_covers_every_kind() {
        let dir = tempfile::tempdir().unwrap();
        let mut gallery = Gallery::new();
        gallery.artworks = small_catalog();

        let paths = write_gallery_exports(&mut gallery, ExportProfile::External, dir.path()).unwrap();
        assert_eq!(paths.len(), 3);
        for kind in EntityKind::all() {
            let expected = dir.path().join(export_file_name(kind, ExportProfile::External));
            assert!(expected.exists(), "missing export for {}", kind.name());
        }
    }
}
