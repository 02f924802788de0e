// * Partner record schema
// * Fixed output columns, the draft produced while scraping and the final typed row.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::refinery::catalog::{catalog, IndustryCounts};
use crate::refinery::profile::{render_versions, ProfileExtras, VersionCount};

pub const COL_NAME: &str = "Partner Name";
pub const COL_TIER: &str = "Tier";
pub const COL_LOCATION: &str = "Location";
pub const COL_REFERENCES: &str = "References";
pub const COL_CERTIFIED_EXPERTS: &str = "Certified Experts";
pub const COL_PROFILE_URL: &str = "Profile URL";
pub const COL_CERTIFIED_VERSIONS: &str = "Certified Versions";
pub const COL_REFERENCES_TOTAL: &str = "References Total";
pub const COL_CUSTOMER_RETENTION: &str = "Customer Retention %";
pub const COL_LARGEST_USERS: &str = "Largest Reference Users";
pub const COL_AVERAGE_USERS: &str = "Average Reference Users";
pub const COL_REFERENCE_INDUSTRIES: &str = "Reference Industries";

/// Identity and profile columns, ahead of the industry columns
pub const BASE_COLUMNS: [&str; 12] = [
    COL_NAME,
    COL_TIER,
    COL_LOCATION,
    COL_REFERENCES,
    COL_CERTIFIED_EXPERTS,
    COL_PROFILE_URL,
    COL_CERTIFIED_VERSIONS,
    COL_REFERENCES_TOTAL,
    COL_CUSTOMER_RETENTION,
    COL_LARGEST_USERS,
    COL_AVERAGE_USERS,
    COL_REFERENCE_INDUSTRIES,
];

/// Full output header: base columns, then one column per catalog industry
pub fn schema_columns() -> Vec<&'static str> {
    BASE_COLUMNS
        .iter()
        .copied()
        .chain(catalog().columns())
        .collect()
}

/// Loosely-typed row: column name to cell text
pub type RawRow = HashMap<String, String>;

/// Partner certification level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Tier {
    Gold,
    Silver,
    Ready,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Gold => "Gold",
            Tier::Silver => "Silver",
            Tier::Ready => "Ready",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTier(pub String);

impl fmt::Display for UnknownTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown tier '{}'", self.0)
    }
}

impl std::error::Error for UnknownTier {}

impl FromStr for Tier {
    type Err = UnknownTier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Gold" => Ok(Tier::Gold),
            "Silver" => Ok(Tier::Silver),
            "Ready" => Ok(Tier::Ready),
            other => Err(UnknownTier(other.to_string())),
        }
    }
}

/// A listing row before profile merge and final coercion.
/// Counts keep the captured text; the assembler owns numeric coercion.
#[derive(Debug, Clone, PartialEq)]
pub struct PartnerDraft {
    pub name: String,
    pub tier: Tier,
    pub location: String,
    pub references: String,
    pub certified_experts: String,
    pub profile_url: String,
    pub extras: ProfileExtras,
}

impl PartnerDraft {
    pub fn new(
        name: String,
        tier: Tier,
        location: String,
        references: String,
        certified_experts: String,
    ) -> Self {
        Self {
            name,
            tier,
            location,
            references,
            certified_experts,
            profile_url: String::new(),
            extras: ProfileExtras::default(),
        }
    }

    pub fn with_profile_url(mut self, url: impl Into<String>) -> Self {
        self.profile_url = url.into();
        self
    }

    pub fn with_extras(mut self, extras: ProfileExtras) -> Self {
        self.extras = extras;
        self
    }

    /// Projects the draft onto the output columns
    pub fn into_raw_row(self) -> RawRow {
        let extras = self.extras;
        let mut row = RawRow::with_capacity(BASE_COLUMNS.len() + catalog().len());

        row.insert(COL_NAME.to_string(), self.name);
        row.insert(COL_TIER.to_string(), self.tier.as_str().to_string());
        row.insert(COL_LOCATION.to_string(), self.location);
        row.insert(COL_REFERENCES.to_string(), self.references);
        row.insert(COL_CERTIFIED_EXPERTS.to_string(), self.certified_experts);
        row.insert(COL_PROFILE_URL.to_string(), self.profile_url);
        row.insert(
            COL_CERTIFIED_VERSIONS.to_string(),
            extras.certified_versions_display(),
        );
        row.insert(COL_REFERENCES_TOTAL.to_string(), optional_cell(extras.references_total));
        row.insert(COL_CUSTOMER_RETENTION.to_string(), optional_cell(extras.customer_retention));
        row.insert(COL_LARGEST_USERS.to_string(), optional_cell(extras.largest_reference_users));
        row.insert(COL_AVERAGE_USERS.to_string(), optional_cell(extras.average_reference_users));
        row.insert(
            COL_REFERENCE_INDUSTRIES.to_string(),
            extras.reference_industries_display(),
        );

        for (entry, count) in catalog().entries().iter().zip(extras.industries.values()) {
            row.insert(entry.column.clone(), count.to_string());
        }

        row
    }
}

fn optional_cell<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// One row of the final table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartnerRecord {
    pub name: String,
    pub tier: Tier,
    pub location: String,
    pub references: u32,
    pub certified_experts: u32,
    pub profile_url: String,
    pub certified_versions: Vec<VersionCount>,
    pub references_total: Option<u64>,
    pub customer_retention: Option<u64>,
    pub largest_reference_users: Option<u64>,
    pub average_reference_users: Option<u64>,
    pub reference_industries: String,
    pub industries: IndustryCounts,
}

impl PartnerRecord {
    /// De-duplication key
    pub fn key(&self) -> (&str, Tier, &str) {
        (&self.name, self.tier, &self.location)
    }

    /// Typed cells in `schema_columns()` order
    pub fn typed_cells(&self) -> Vec<Cell> {
        let mut cells = vec![
            Cell::Text(self.name.clone()),
            Cell::Text(self.tier.as_str().to_string()),
            Cell::Text(self.location.clone()),
            Cell::Number(u64::from(self.references)),
            Cell::Number(u64::from(self.certified_experts)),
            Cell::Text(self.profile_url.clone()),
            Cell::Text(render_versions(&self.certified_versions)),
            Cell::optional(self.references_total),
            Cell::optional(self.customer_retention),
            Cell::optional(self.largest_reference_users),
            Cell::optional(self.average_reference_users),
            Cell::Text(self.reference_industries.clone()),
        ];
        cells.extend(self.industries.values().iter().map(|&c| Cell::Number(u64::from(c))));
        cells
    }

    /// Cells in `schema_columns()` order, rendered as text
    pub fn to_cells(&self) -> Vec<String> {
        self.typed_cells().iter().map(Cell::render).collect()
    }
}

/// One output cell before it is written to a particular format
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Number(u64),
    Blank,
}

impl Cell {
    pub fn optional(value: Option<u64>) -> Self {
        value.map_or(Cell::Blank, Cell::Number)
    }

    pub fn render(&self) -> String {
        match self {
            Cell::Text(text) => text.clone(),
            Cell::Number(n) => n.to_string(),
            Cell::Blank => String::new(),
        }
    }
}
