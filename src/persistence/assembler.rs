// * Record Assembler / Table Normalizer
// * Every row, whether a fresh draft or a re-imported CSV line, goes through
// * one coercion path so the output schema is enforced in a single place.

use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info};

use crate::persistence::record::{
    schema_columns, PartnerDraft, PartnerRecord, RawRow, Tier, BASE_COLUMNS, COL_AVERAGE_USERS,
    COL_CERTIFIED_EXPERTS, COL_CERTIFIED_VERSIONS, COL_CUSTOMER_RETENTION, COL_LARGEST_USERS,
    COL_LOCATION, COL_NAME, COL_PROFILE_URL, COL_REFERENCES, COL_REFERENCES_TOTAL,
    COL_REFERENCE_INDUSTRIES, COL_TIER,
};
use crate::refinery::catalog::{catalog, IndustryCounts};
use crate::refinery::list_row::is_placeholder_name;
use crate::refinery::profile::parse_versions;

/// Coerces a cell to a non-negative integer; anything unparseable is 0
pub fn coerce_count(cell: &str) -> u32 {
    let cell = cell.trim();
    if let Ok(n) = cell.parse::<u32>() {
        return n;
    }
    match cell.parse::<f64>() {
        Ok(f) if f.is_finite() && f >= 0.0 && f <= u32::MAX as f64 => f as u32,
        _ => 0,
    }
}

/// Coerces a cell to a non-negative number; anything unparseable is absent
pub fn coerce_optional(cell: &str) -> Option<u64> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    if let Ok(n) = cell.parse::<u64>() {
        return Some(n);
    }
    match cell.parse::<f64>() {
        Ok(f) if f.is_finite() && f >= 0.0 && f <= u64::MAX as f64 => Some(f as u64),
        _ => None,
    }
}

/// Why rows were left out of the table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssemblyStats {
    pub rows_in: usize,
    pub dropped_empty_name: usize,
    pub dropped_placeholder: usize,
    pub dropped_unknown_tier: usize,
    pub dropped_no_activity: usize,
    pub dropped_duplicate: usize,
    pub unknown_columns: usize,
}

/// The final, schema-complete partner table
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    records: Vec<PartnerRecord>,
}

impl Table {
    pub fn records(&self) -> &[PartnerRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<PartnerRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PartnerRecord> {
        self.records.iter()
    }

    /// Output header in fixed order
    pub fn columns(&self) -> Vec<&'static str> {
        schema_columns()
    }
}

/// Merges drafts into the final table
pub fn assemble(drafts: impl IntoIterator<Item = PartnerDraft>) -> Table {
    normalize_rows(drafts.into_iter().map(PartnerDraft::into_raw_row))
}

/// Coerces, filters and de-duplicates loosely-typed rows
pub fn normalize_rows(rows: impl IntoIterator<Item = RawRow>) -> Table {
    let (table, stats) = normalize_rows_with_stats(rows);
    info!(
        rows_in = stats.rows_in,
        rows_out = table.len(),
        dropped_no_activity = stats.dropped_no_activity,
        dropped_duplicate = stats.dropped_duplicate,
        "Table assembled"
    );
    table
}

pub fn normalize_rows_with_stats(rows: impl IntoIterator<Item = RawRow>) -> (Table, AssemblyStats) {
    let mut stats = AssemblyStats::default();
    let mut seen: HashSet<(String, Tier, String)> = HashSet::new();
    let mut records = Vec::new();

    for row in rows {
        stats.rows_in += 1;
        stats.unknown_columns += row.keys().filter(|k| !is_schema_column(k)).count();

        let Some(record) = coerce_row(&row, &mut stats) else {
            continue;
        };

        if record.references == 0 && record.certified_experts == 0 {
            stats.dropped_no_activity += 1;
            continue;
        }

        let key = (record.name.clone(), record.tier, record.location.clone());
        if !seen.insert(key) {
            debug!(name = %record.name, tier = %record.tier, "Dropped duplicate partner");
            stats.dropped_duplicate += 1;
            continue;
        }

        records.push(record);
    }

    if stats.unknown_columns > 0 {
        debug!(count = stats.unknown_columns, "Ignored cells outside the schema");
    }

    (Table { records }, stats)
}

fn is_schema_column(column: &str) -> bool {
    BASE_COLUMNS.contains(&column) || catalog().position_of_column(column).is_some()
}

fn cell<'r>(row: &'r RawRow, column: &str) -> &'r str {
    row.get(column).map(String::as_str).unwrap_or("")
}

fn coerce_row(row: &RawRow, stats: &mut AssemblyStats) -> Option<PartnerRecord> {
    let name = cell(row, COL_NAME).trim();
    if name.is_empty() {
        stats.dropped_empty_name += 1;
        return None;
    }
    if is_placeholder_name(name) {
        stats.dropped_placeholder += 1;
        return None;
    }

    let tier = match cell(row, COL_TIER).parse::<Tier>() {
        Ok(tier) => tier,
        Err(e) => {
            debug!(name = name, error = %e, "Dropped row");
            stats.dropped_unknown_tier += 1;
            return None;
        }
    };

    let mut industries = IndustryCounts::new();
    for (idx, entry) in catalog().entries().iter().enumerate() {
        industries.set_at(idx, coerce_count(cell(row, &entry.column)));
    }

    Some(PartnerRecord {
        name: name.to_string(),
        tier,
        location: cell(row, COL_LOCATION).trim().to_string(),
        references: coerce_count(cell(row, COL_REFERENCES)),
        certified_experts: coerce_count(cell(row, COL_CERTIFIED_EXPERTS)),
        profile_url: cell(row, COL_PROFILE_URL).trim().to_string(),
        certified_versions: parse_versions(cell(row, COL_CERTIFIED_VERSIONS)),
        references_total: coerce_optional(cell(row, COL_REFERENCES_TOTAL)),
        customer_retention: coerce_optional(cell(row, COL_CUSTOMER_RETENTION)),
        largest_reference_users: coerce_optional(cell(row, COL_LARGEST_USERS)),
        average_reference_users: coerce_optional(cell(row, COL_AVERAGE_USERS)),
        reference_industries: cell(row, COL_REFERENCE_INDUSTRIES).to_string(),
        industries,
    })
}
