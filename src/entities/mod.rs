// Catalog Entities
//
// Each entity module declares:
// - The typed record matching its fixture's wire shape (camelCase keys)
// - Its shape contract impl: code prefix, searchable fields, asset policy
// - The internal/external export projections for that kind

pub mod artwork;
pub mod exhibition;
pub mod lecture;

pub use artwork::Artwork;
pub use exhibition::Exhibition;
pub use lecture::Lecture;
