use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Well-known column names
// ---------------------------------------------------------------------------

pub const CITY: &str = "City";
pub const STREET: &str = "Street";
pub const PROVINCE: &str = "Province";
pub const PRICE: &str = "Price";
pub const SQUARE_FOOTAGE: &str = "Square Footage";
pub const LINK: &str = "Link";
pub const DESCRIPTION: &str = "Description";
pub const IMAGE_COLUMNS: [&str; 4] = ["Image1", "Image2", "Image3", "Image4"];

/// Columns the filter engine cannot run without.
pub const REQUIRED_COLUMNS: [&str; 3] = [CITY, PRICE, SQUARE_FOOTAGE];

// ---------------------------------------------------------------------------
// CellValue – a single cell of the listing table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell, mirroring what a CSV/JSON/Parquet column can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => Ok(()),
        }
    }
}

impl CellValue {
    /// Text rendering of a non-null cell. `None` for nulls and blank text.
    pub fn as_label(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            CellValue::Text(s) if s.trim().is_empty() => None,
            other => Some(other.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// ListingTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// Rows of listings in file order. Every row has exactly one cell per column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl ListingTable {
    /// Zero rows, no columns. Returned whenever loading fails.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table, padding short rows with nulls and truncating long ones.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Null);
                row
            })
            .collect();
        Self { columns, rows }
    }

    /// Number of listings.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `(rows, columns)`, the way a dataframe reports its shape.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.columns.len())
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Cell at `(row, column name)`. `None` if either does not exist.
    pub fn cell(&self, row: usize, column: &str) -> Option<&CellValue> {
        let col = self.column_index(column)?;
        self.rows.get(row)?.get(col)
    }

    /// Sorted distinct non-null values of a column. Empty if the column is absent.
    pub fn distinct_values(&self, column: &str) -> BTreeSet<String> {
        let Some(col) = self.column_index(column) else {
            return BTreeSet::new();
        };
        self.rows
            .iter()
            .filter_map(|row| row.get(col).and_then(CellValue::as_label))
            .collect()
    }

    /// Typed view over one row for rendering.
    pub fn listing(&self, row: usize) -> Option<Listing<'_>> {
        (row < self.rows.len()).then_some(Listing { table: self, row })
    }
}

// ---------------------------------------------------------------------------
// Listing – borrowed view of one row
// ---------------------------------------------------------------------------

/// One real-estate listing, read through the table's well-known columns.
#[derive(Debug, Clone, Copy)]
pub struct Listing<'a> {
    table: &'a ListingTable,
    row: usize,
}

impl Listing<'_> {
    fn text(&self, column: &str) -> Option<String> {
        self.table.cell(self.row, column).and_then(CellValue::as_label)
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn street(&self) -> Option<String> {
        self.text(STREET)
    }

    pub fn city(&self) -> Option<String> {
        self.text(CITY)
    }

    pub fn province(&self) -> Option<String> {
        self.text(PROVINCE)
    }

    pub fn link(&self) -> Option<String> {
        self.text(LINK)
    }

    pub fn description(&self) -> Option<String> {
        self.text(DESCRIPTION)
    }

    /// "Street, City, Province", skipping parts that are missing.
    pub fn address(&self) -> String {
        [self.street(), self.city(), self.province()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Image URLs by grid slot. A slot is `None` when the image is absent.
    pub fn images(&self) -> [Option<String>; 4] {
        IMAGE_COLUMNS.map(|col| self.text(col))
    }
}
