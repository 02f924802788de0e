// * The Refinery (Extraction Pipeline)
// * Turns listing anchors and profile pages into typed partner fields.

pub mod anchors;
pub mod catalog;
pub mod list_row;
pub mod profile;
pub mod text;

// * Re-exports for convenient access
pub use anchors::{extract_anchors, Anchor};
pub use catalog::{catalog, slugify, IndustryCatalog, IndustryCounts, IndustryEntry, INDUSTRY_COUNT};
pub use list_row::{is_candidate, is_placeholder_name, parse_candidate};
pub use profile::{extract as extract_profile, extract_from_html, ProfileExtras, VersionCount};
pub use text::{normalize, visible_text};
