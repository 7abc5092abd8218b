/// Data layer: core types, loading, filtering and export.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → ListingTable (or empty table + diagnostic)
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ ListingTable │  columns, rows of CellValue
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  (table, FilterSelection) → matching row indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  matching rows → .csv
///   └──────────┘
/// ```

pub mod error;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
