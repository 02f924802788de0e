// * Industry Catalog
// * The closed set of reference industries recognised on profile pages.
// * Initialised once, read-only afterwards.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::sync::LazyLock;

use crate::config::constants::INDUSTRY_COLUMN_PREFIX;
use crate::refinery::text::normalize;

/// Number of catalog industries
pub const INDUSTRY_COUNT: usize = 22;

// ! Order is the output column order. Do not sort.
pub const INDUSTRY_LABELS: [&str; INDUSTRY_COUNT] = [
    "Agriculture",
    "Construction & Renovation",
    "ECO liable to deduct TCS u/s 52",
    "ECO liable to pay GST u/s 9(5)",
    "Education",
    "Entertainment / Media",
    "Finance / Legal / Insurance",
    "Food / Hospitality / Tourism / Beverage",
    "Government",
    "HR / Administrative / Consulting",
    "Health / Social Welfare / Pharmaceutical",
    "Households",
    "IT / Communication / Marketing",
    "Manufacturing / Maintenance",
    "Mining & Quarrying",
    "NGO",
    "Other Services",
    "Real Estate",
    "Science & Technology",
    "Transportation/Logistics",
    "Utilities / Energy / Water supply",
    "Wholesale / Retail",
];

static CATALOG: LazyLock<IndustryCatalog> = LazyLock::new(IndustryCatalog::build);

/// Read-only accessor for the process-wide catalog
pub fn catalog() -> &'static IndustryCatalog {
    &CATALOG
}

/// Derives the output column id for a label.
///
/// Whitespace is collapsed, every run of non-alphanumeric characters becomes a
/// single `_`, separators are trimmed from both ends and the `RI_` prefix is
/// added unless already present, so slugifying a column id returns it unchanged.
pub fn slugify(label: &str) -> String {
    let collapsed = normalize(label);
    let mut body = String::with_capacity(collapsed.len());
    let mut pending_separator = false;

    for ch in collapsed.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !body.is_empty() {
                body.push('_');
            }
            pending_separator = false;
            body.push(ch);
        } else {
            pending_separator = true;
        }
    }

    if body.starts_with(INDUSTRY_COLUMN_PREFIX) {
        body
    } else {
        format!("{}{}", INDUSTRY_COLUMN_PREFIX, body)
    }
}

/// One catalog entry: display label plus derived column id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndustryEntry {
    pub label: &'static str,
    pub column: String,
}

#[derive(Debug)]
pub struct IndustryCatalog {
    entries: Vec<IndustryEntry>,
    // * Catalog positions ordered by label length, longest first
    longest_first: Vec<usize>,
}

impl IndustryCatalog {
    fn build() -> Self {
        let entries: Vec<IndustryEntry> = INDUSTRY_LABELS
            .iter()
            .map(|&label| IndustryEntry {
                label,
                column: slugify(label),
            })
            .collect();

        let mut longest_first: Vec<usize> = (0..entries.len()).collect();
        longest_first.sort_by(|&a, &b| entries[b].label.len().cmp(&entries[a].label.len()));

        Self {
            entries,
            longest_first,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[IndustryEntry] {
        &self.entries
    }

    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.label)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|e| e.column.as_str())
    }

    /// Catalog position of an exact label
    pub fn position(&self, label: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.label == label)
    }

    /// Catalog position of a column id
    pub fn position_of_column(&self, column: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.column == column)
    }

    pub fn lookup(&self, label: &str) -> Option<&IndustryEntry> {
        self.position(label).map(|idx| &self.entries[idx])
    }

    pub fn column_for(&self, label: &str) -> Option<&str> {
        self.lookup(label).map(|e| e.column.as_str())
    }

    pub fn is_known(&self, label: &str) -> bool {
        self.position(label).is_some()
    }

    /// Longest label that `text` starts with, ending on a word boundary
    pub fn match_prefix(&self, text: &str) -> Option<usize> {
        self.longest_first.iter().copied().find(|&idx| {
            let label = self.entries[idx].label;
            if !text.starts_with(label) {
                return false;
            }
            let ends_in_word = label.chars().next_back().is_some_and(is_word_char);
            let followed_by_word = text[label.len()..].chars().next().is_some_and(is_word_char);
            !(ends_in_word && followed_by_word)
        })
    }

    /// Count mapping with every catalog industry at zero
    pub fn zeroed_counts(&self) -> IndustryCounts {
        IndustryCounts::default()
    }
}

pub(crate) fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Per-industry counts. Always exactly one slot per catalog industry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndustryCounts([u32; INDUSTRY_COUNT]);

impl IndustryCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn get(&self, label: &str) -> Option<u32> {
        catalog().position(label).map(|idx| self.0[idx])
    }

    pub fn get_at(&self, idx: usize) -> Option<u32> {
        self.0.get(idx).copied()
    }

    /// Sets a catalog industry; labels outside the catalog are ignored
    pub fn set(&mut self, label: &str, count: u32) -> bool {
        match catalog().position(label) {
            Some(idx) => {
                self.0[idx] = count;
                true
            }
            None => false,
        }
    }

    pub fn set_at(&mut self, idx: usize, count: u32) -> bool {
        match self.0.get_mut(idx) {
            Some(slot) => {
                *slot = count;
                true
            }
            None => false,
        }
    }

    /// (label, count) pairs in catalog order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u32)> + '_ {
        INDUSTRY_LABELS.iter().copied().zip(self.0.iter().copied())
    }

    pub fn values(&self) -> &[u32; INDUSTRY_COUNT] {
        &self.0
    }

    pub fn total(&self) -> u64 {
        self.0.iter().map(|&c| u64::from(c)).sum()
    }

    pub fn is_all_zero(&self) -> bool {
        self.0.iter().all(|&c| c == 0)
    }
}

impl Serialize for IndustryCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(INDUSTRY_COUNT))?;
        for (label, count) in self.iter() {
            map.serialize_entry(label, &count)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_has_22_entries() {
        assert_eq!(catalog().len(), 22);
        assert_eq!(catalog().labels().next(), Some("Agriculture"));
        assert_eq!(catalog().labels().last(), Some("Wholesale / Retail"));
    }

    #[test]
    fn test_slugify_examples() {
        assert_eq!(slugify("Agriculture"), "RI_Agriculture");
        assert_eq!(slugify("Construction & Renovation"), "RI_Construction_Renovation");
        assert_eq!(slugify("ECO liable to pay GST u/s 9(5)"), "RI_ECO_liable_to_pay_GST_u_s_9_5");
        assert_eq!(slugify("Transportation/Logistics"), "RI_Transportation_Logistics");
        assert_eq!(slugify("  Wholesale   /  Retail "), "RI_Wholesale_Retail");
    }

    #[test]
    fn test_slugs_unique_and_idempotent() {
        let columns: HashSet<&str> = catalog().columns().collect();
        assert_eq!(columns.len(), INDUSTRY_COUNT);

        for entry in catalog().entries() {
            assert_eq!(slugify(&entry.column), entry.column);
            assert_eq!(slugify(entry.label), entry.column);
        }
    }

    #[test]
    fn test_lookup_rejects_unknown_labels() {
        assert!(catalog().is_known("NGO"));
        assert!(!catalog().is_known("ngo"));
        assert!(!catalog().is_known("Space Exploration"));
        assert_eq!(catalog().column_for("Real Estate"), Some("RI_Real_Estate"));
        assert_eq!(catalog().position_of_column("RI_Households"), Some(11));
    }

    #[test]
    fn test_match_prefix_prefers_longest_label() {
        let idx = catalog().match_prefix("ECO liable to pay GST u/s 9(5) 4 Education").unwrap();
        assert_eq!(catalog().entries()[idx].label, "ECO liable to pay GST u/s 9(5)");

        // * A label glued to more word characters is not a match
        assert!(catalog().match_prefix("Agricultures").is_none());
        assert!(catalog().match_prefix("Agriculture, Other").is_some());
    }

    #[test]
    fn test_counts_ignore_unknown_labels() {
        let mut counts = catalog().zeroed_counts();
        assert!(counts.is_all_zero());
        assert_eq!(counts.len(), INDUSTRY_COUNT);

        assert!(counts.set("Education", 4));
        assert!(!counts.set("Astrology", 9));
        assert_eq!(counts.get("Education"), Some(4));
        assert_eq!(counts.get("Astrology"), None);
        assert_eq!(counts.iter().count(), INDUSTRY_COUNT);
        assert_eq!(counts.total(), 4);
    }

    #[test]
    fn test_counts_serialize_as_label_map() {
        let mut counts = IndustryCounts::new();
        counts.set("NGO", 2);
        let json = serde_json::to_value(counts).unwrap();
        let map = json.as_object().unwrap();
        assert_eq!(map.len(), INDUSTRY_COUNT);
        assert_eq!(map["NGO"], 2);
        assert_eq!(map["Agriculture"], 0);
    }
}
