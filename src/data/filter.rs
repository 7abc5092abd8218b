use std::collections::BTreeSet;

use super::error::FilterError;
use super::model::{CellValue, ListingTable, CITY, REQUIRED_COLUMNS};
use crate::diagnostics::Diagnostics;

// ---------------------------------------------------------------------------
// Filter selection: the user's current constraints
// ---------------------------------------------------------------------------

/// Initial range bounds applied whenever a table is installed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterDefaults {
    pub min_price: f64,
    pub max_price: f64,
    pub min_footage: f64,
    pub max_footage: f64,
}

impl Default for FilterDefaults {
    fn default() -> Self {
        Self {
            min_price: 500_000.0,
            max_price: 650_000.0,
            min_footage: 800.0,
            max_footage: 3_000.0,
        }
    }
}

/// Cities plus two inclusive ranges. Every predicate must hold for a row to match.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSelection {
    pub cities: BTreeSet<String>,
    pub min_price: f64,
    pub max_price: f64,
    pub min_footage: f64,
    pub max_footage: f64,
}

impl FilterSelection {
    /// All distinct cities of `table` selected, ranges from `defaults`.
    pub fn for_table(table: &ListingTable, defaults: &FilterDefaults) -> Self {
        Self {
            cities: table.distinct_values(CITY),
            min_price: defaults.min_price,
            max_price: defaults.max_price,
            min_footage: defaults.min_footage,
            max_footage: defaults.max_footage,
        }
    }

    fn matches(&self, city: Option<String>, price: f64, footage: f64) -> bool {
        let Some(city) = city else {
            return false;
        };
        self.cities.contains(&city)
            && (self.min_price..=self.max_price).contains(&price)
            && (self.min_footage..=self.max_footage).contains(&footage)
    }
}

// ---------------------------------------------------------------------------
// Filter result
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterResult {
    /// Indices of matching rows, in table order.
    pub indices: Vec<usize>,
    /// Rows excluded because their price or footage could not be read as a number.
    pub skipped: usize,
}

impl FilterResult {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Numeric projection of textual columns
// ---------------------------------------------------------------------------

/// Read a price or footage cell as a number.
///
/// Text like `"$1,234,500"`, `"1 850"` or `"1850 sqft"` is accepted: currency
/// symbols, thousands separators and whitespace are dropped, and a trailing
/// unit suffix is ignored. Returns `None` when no number can be read.
pub fn numeric_value(cell: &CellValue) -> Option<f64> {
    match cell {
        CellValue::Integer(i) => Some(*i as f64),
        CellValue::Float(v) if v.is_finite() => Some(*v),
        CellValue::Text(s) => parse_formatted_number(s),
        CellValue::Float(_) | CellValue::Bool(_) | CellValue::Null => None,
    }
}

fn parse_formatted_number(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| !matches!(*c, '$' | '€' | '£' | '¥' | ',' | '_') && !c.is_whitespace())
        .collect();

    let split = cleaned
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(cleaned.len());
    let (number, suffix) = cleaned.split_at(split);

    // "2storey1800sqft" is not a number with a unit.
    if number.is_empty() || suffix.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    number.parse::<f64>().ok()
}

// ---------------------------------------------------------------------------
// Filter engine
// ---------------------------------------------------------------------------

/// Return the rows of `table` that satisfy every predicate of `selection`.
///
/// A row matches when:
/// * its city is in `selection.cities` (a null city never matches)
/// * `min_price <= price <= max_price`
/// * `min_footage <= footage <= max_footage`
///
/// Rows whose price or footage is unreadable are counted in
/// [`FilterResult::skipped`] and never match. An inverted range simply
/// matches nothing.
pub fn apply(table: &ListingTable, selection: &FilterSelection) -> Result<FilterResult, FilterError> {
    let [city_col, price_col, footage_col] = REQUIRED_COLUMNS.map(|col| table.column_index(col));
    let (Some(city_col), Some(price_col), Some(footage_col)) = (city_col, price_col, footage_col)
    else {
        let missing = REQUIRED_COLUMNS
            .iter()
            .filter(|col| !table.has_column(col))
            .map(|col| (*col).to_string())
            .collect();
        return Err(FilterError::MissingColumns(missing));
    };

    let mut result = FilterResult::default();
    for (idx, row) in table.rows.iter().enumerate() {
        let price = row.get(price_col).and_then(numeric_value);
        let footage = row.get(footage_col).and_then(numeric_value);
        let (Some(price), Some(footage)) = (price, footage) else {
            result.skipped += 1;
            continue;
        };

        let city = row.get(city_col).and_then(CellValue::as_label);
        if selection.matches(city, price, footage) {
            result.indices.push(idx);
        }
    }
    Ok(result)
}

/// Run the filter engine and report problems inline.
///
/// Missing columns yield an empty result plus an error diagnostic; rows with
/// unreadable numbers yield a warning.
pub fn run(
    table: &ListingTable,
    selection: &FilterSelection,
    diagnostics: &mut Diagnostics,
) -> FilterResult {
    match apply(table, selection) {
        Ok(result) => {
            if result.skipped > 0 {
                diagnostics.warn(format!(
                    "{} listing(s) skipped: Price or Square Footage is not a number.",
                    result.skipped
                ));
            }
            log::debug!(
                "filter pass: {} of {} listings match",
                result.len(),
                table.len()
            );
            result
        }
        Err(e) => {
            let FilterError::MissingColumns(missing) = &e;
            log::debug!("missing columns: {}", missing.join(", "));
            diagnostics.error(e.to_string());
            FilterResult::default()
        }
    }
}
