// Gallery Catalog Admin - Core Library
// Exposes all modules for use in CLI, TUI, API server, and tests

pub mod schema;      // Shape Layer - entity kinds, asset policy, export profiles
pub mod normalize;   // Numeric coercion + image reference resolution
pub mod session;     // Per-entity edit sessions (clean vs editing)
pub mod events;      // In-memory mutation audit trail
pub mod catalog;     // Edit-lifecycle manager + gallery aggregate
pub mod filter;      // Debounced search + incremental pagination
pub mod export;      // Projection files (internal / external)
pub mod entities;    // Concrete catalog entities

// Re-export commonly used types
pub use schema::{
    AssetPolicy, CatalogEntity, EntityKind, ExportProfile,
};
pub use normalize::{
    NumericText, coerce_numeric, extract_image_filename,
};
pub use session::EditSession;
pub use events::{
    CatalogEvent, EventKind, EventLog,
};
pub use catalog::{
    Catalog, Gallery, LoadFailure, LoadSummary,
};
pub use filter::{
    CatalogView, SearchDebounce, PAGE_SIZE, SEARCH_DEBOUNCE,
};
pub use export::{
    export_file_name, write_export, write_gallery_exports,
};
pub use entities::{
    Artwork, Exhibition, Lecture,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
