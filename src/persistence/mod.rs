// * Persistence: record schema, table assembly and export.

pub mod assembler;
pub mod export;
pub mod record;

// * Re-exports for convenient access
pub use assembler::{
    assemble, coerce_count, coerce_optional, normalize_rows, normalize_rows_with_stats,
    AssemblyStats, Table,
};
pub use export::{
    export_csv, export_json, export_xlsx, import_csv, read_csv, to_json, write_csv,
    write_xlsx_buffer,
};
pub use record::{schema_columns, Cell, PartnerDraft, PartnerRecord, RawRow, Tier, BASE_COLUMNS};
