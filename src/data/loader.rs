use std::path::Path;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{
    DataType, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type, Int8Type, UInt16Type,
    UInt32Type, UInt64Type, UInt8Type,
};
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::LoadError;
use super::model::{CellValue, ListingTable};
use crate::diagnostics::Diagnostics;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a listings table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` (or no extension) – header row followed by one listing per line
/// * `.json`    – `[{ "City": "...", "Price": "...", ... }, ...]`
/// * `.parquet` – one column per listing field
///
/// Exactly one read is attempted; nothing is retried.
pub fn load_file(path: &Path) -> Result<ListingTable, LoadError> {
    if !path.is_file() {
        return Err(LoadError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let parsed = match ext.as_str() {
        "csv" | "" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => {
            return Err(LoadError::UnsupportedFormat {
                extension: other.to_string(),
            });
        }
    };

    parsed.map_err(|e| LoadError::Parse {
        path: path.to_path_buf(),
        message: format!("{e:#}"),
    })
}

/// Load a table and report the outcome inline.
///
/// Never fails: on any error the diagnostic is recorded and an empty table
/// (zero rows, no columns) is returned.
pub fn load_with_diagnostics(path: &Path, diagnostics: &mut Diagnostics) -> ListingTable {
    match load_file(path) {
        Ok(table) => {
            let (rows, cols) = table.shape();
            diagnostics.info(format!(
                "File loaded successfully. Shape: ({rows}, {cols})"
            ));
            table
        }
        Err(e) => {
            diagnostics.error(e.to_string());
            ListingTable::empty()
        }
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, then one listing per record.
///
/// Records shorter than the header are padded with nulls (trailing optional
/// fields such as the image columns are often left off). Records longer than
/// the header are rejected.
fn load_csv(path: &Path) -> Result<ListingTable> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;
    let columns: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        if record.len() > columns.len() {
            bail!(
                "CSV row {row_no}: expected {} fields, found {}",
                columns.len(),
                record.len()
            );
        }
        records.push(record);
    }

    let kinds: Vec<ColumnKind> = (0..columns.len())
        .map(|col| ColumnKind::infer(records.iter().filter_map(|r| r.get(col))))
        .collect();

    let rows = records
        .iter()
        .map(|record| {
            record
                .iter()
                .zip(&kinds)
                .map(|(raw, kind)| kind.cell(raw))
                .collect()
        })
        .collect();

    Ok(ListingTable::new(columns, rows))
}

/// One type per CSV column.
///
/// A column is numeric or boolean only when every non-empty value prints back
/// to exactly the text it was read from, so `007` or `1500.0` stay text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Integer,
    Float,
    Bool,
    Text,
}

impl ColumnKind {
    fn infer<'a>(values: impl Iterator<Item = &'a str>) -> Self {
        let mut candidates = vec![ColumnKind::Integer, ColumnKind::Float, ColumnKind::Bool];
        for raw in values.filter(|v| !v.is_empty()) {
            candidates.retain(|kind| kind.reads_back(raw));
            if candidates.is_empty() {
                break;
            }
        }
        candidates.first().copied().unwrap_or(ColumnKind::Text)
    }

    fn reads_back(self, raw: &str) -> bool {
        match self {
            ColumnKind::Integer => raw.parse::<i64>().is_ok_and(|i| i.to_string() == raw),
            ColumnKind::Float => raw
                .parse::<f64>()
                .is_ok_and(|f| f.is_finite() && f.to_string() == raw),
            ColumnKind::Bool => raw == "true" || raw == "false",
            ColumnKind::Text => true,
        }
    }

    fn cell(self, raw: &str) -> CellValue {
        if raw.is_empty() {
            return CellValue::Null;
        }
        let text = || CellValue::Text(raw.to_string());
        match self {
            ColumnKind::Integer => raw.parse().map_or_else(|_| text(), CellValue::Integer),
            ColumnKind::Float => raw.parse().map_or_else(|_| text(), CellValue::Float),
            ColumnKind::Bool => CellValue::Bool(raw == "true"),
            ColumnKind::Text => text(),
        }
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   { "City": "Mission", "Price": "$549,900", "Square Footage": 1850, ... },
///   ...
/// ]
/// ```
///
/// Columns are the union of all keys, in first-seen order.
fn load_json(path: &Path) -> Result<ListingTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut columns: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        for key in obj.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }

    let rows = records
        .iter()
        .filter_map(JsonValue::as_object)
        .map(|obj| {
            columns
                .iter()
                .map(|col| obj.get(col).map_or(CellValue::Null, json_to_cell))
                .collect()
        })
        .collect();

    Ok(ListingTable::new(columns, rows))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) if s.is_empty() => CellValue::Null,
        JsonValue::String(s) => CellValue::Text(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::Text(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one column per listing field.
///
/// String, integer, float and boolean columns map to the matching
/// [`CellValue`]; anything else is rendered to text.
fn load_parquet(path: &Path) -> Result<ListingTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for row in 0..batch.num_rows() {
            let cells = batch
                .columns()
                .iter()
                .enumerate()
                .map(|(col_idx, col)| {
                    extract_cell(col, row).with_context(|| {
                        format!("Row {row}: failed to read '{}'", columns[col_idx])
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            rows.push(cells);
        }
    }

    Ok(ListingTable::new(columns, rows))
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &ArrayRef, row: usize) -> Result<CellValue> {
    if col.is_null(row) {
        return Ok(CellValue::Null);
    }

    let cell = match col.data_type() {
        DataType::Utf8 => text_cell(col.as_string_opt::<i32>().map(|a| a.value(row))),
        DataType::LargeUtf8 => text_cell(col.as_string_opt::<i64>().map(|a| a.value(row))),
        DataType::Int8 => int_cell(col.as_primitive_opt::<Int8Type>().map(|a| a.value(row).into())),
        DataType::Int16 => {
            int_cell(col.as_primitive_opt::<Int16Type>().map(|a| a.value(row).into()))
        }
        DataType::Int32 => {
            int_cell(col.as_primitive_opt::<Int32Type>().map(|a| a.value(row).into()))
        }
        DataType::Int64 => int_cell(col.as_primitive_opt::<Int64Type>().map(|a| a.value(row))),
        DataType::UInt8 => {
            int_cell(col.as_primitive_opt::<UInt8Type>().map(|a| a.value(row).into()))
        }
        DataType::UInt16 => {
            int_cell(col.as_primitive_opt::<UInt16Type>().map(|a| a.value(row).into()))
        }
        DataType::UInt32 => {
            int_cell(col.as_primitive_opt::<UInt32Type>().map(|a| a.value(row).into()))
        }
        DataType::UInt64 => col
            .as_primitive_opt::<UInt64Type>()
            .map(|a| a.value(row))
            .map(|v| i64::try_from(v).map_or(CellValue::Float(v as f64), CellValue::Integer)),
        DataType::Float32 => col
            .as_primitive_opt::<Float32Type>()
            .map(|a| CellValue::Float(a.value(row).into())),
        DataType::Float64 => col
            .as_primitive_opt::<Float64Type>()
            .map(|a| CellValue::Float(a.value(row))),
        DataType::Boolean => col.as_boolean_opt().map(|a| CellValue::Bool(a.value(row))),
        _ => Some(CellValue::Text(
            array_value_to_string(col, row).context("formatting parquet value")?,
        )),
    };

    match cell {
        Some(cell) => Ok(cell),
        None => bail!("column array does not match its {:?} type", col.data_type()),
    }
}

fn text_cell(value: Option<&str>) -> Option<CellValue> {
    value.map(|s| {
        if s.is_empty() {
            CellValue::Null
        } else {
            CellValue::Text(s.to_string())
        }
    })
}

fn int_cell(value: Option<i64>) -> Option<CellValue> {
    value.map(CellValue::Integer)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use tempfile::TempDir;

    use super::*;
    use crate::diagnostics::Severity;

    const CSV: &str = "\
Price,Square Footage,Street,City,Province,Link,Image1
\"$600,000\",1200,12 Elm St,Austin,TX,https://x/1,https://img/1.jpg
\"$700,000\",1500,9 Oak Ave,Dallas,TX,https://x/2,
";

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn csv_loads_with_typed_cells() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "listings.csv", CSV);

        let table = load_file(&path).unwrap();
        assert_eq!(table.shape(), (2, 7));
        assert_eq!(table.cell(0, "Price"), Some(&CellValue::Text("$600,000".into())));
        assert_eq!(table.cell(0, "Square Footage"), Some(&CellValue::Integer(1200)));
        assert_eq!(table.cell(1, "Image1"), Some(&CellValue::Null));
    }

    #[test]
    fn missing_file_is_reported_and_yields_empty_table() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.csv");

        assert!(matches!(load_file(&path), Err(LoadError::NotFound { .. })));

        let mut diags = Diagnostics::new();
        let table = load_with_diagnostics(&path, &mut diags);
        assert_eq!(table.shape(), (0, 0));
        let err = diags.last_error().unwrap();
        assert!(err.message.contains("nope.csv"));
        assert!(err.message.contains("not found"));
    }

    #[test]
    fn short_csv_rows_are_padded_with_nulls() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "listings.csv",
            "City,Price,Square Footage,Image1,Image2\n\
             Mission,\"$600,000\",1200,https://img/1.jpg,https://img/2.jpg\n\
             Langley,\"$650,000\",1400,https://img/3.jpg\n",
        );

        let table = load_file(&path).unwrap();
        assert_eq!(table.shape(), (2, 5));
        assert_eq!(
            table.cell(1, "Image1"),
            Some(&CellValue::Text("https://img/3.jpg".into()))
        );
        assert_eq!(table.cell(1, "Image2"), Some(&CellValue::Null));
    }

    #[test]
    fn csv_columns_keep_text_that_does_not_read_back() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "listings.csv",
            "City,Street,Price,Square Footage,Lot\n007,0012 Main,\"$1\",1500.0,2\nMission,9 Oak,$2,1200,2.5\n",
        );

        let table = load_file(&path).unwrap();
        assert_eq!(table.cell(0, "City"), Some(&CellValue::Text("007".into())));
        assert_eq!(
            table.cell(0, "Street"),
            Some(&CellValue::Text("0012 Main".into()))
        );
        assert_eq!(
            table.cell(0, "Square Footage"),
            Some(&CellValue::Text("1500.0".into()))
        );
        // one type per column: the integer shares the float column's type
        assert_eq!(table.cell(0, "Lot"), Some(&CellValue::Float(2.0)));
        assert_eq!(table.cell(1, "Lot"), Some(&CellValue::Float(2.5)));
        assert_eq!(table.listing(0).unwrap().city().as_deref(), Some("007"));
    }

    #[test]
    fn ragged_csv_is_a_parse_failure() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "bad.csv", "City,Price\nAustin,\"$1\",extra\n");

        match load_file(&path) {
            Err(LoadError::Parse { message, .. }) => assert!(message.contains("CSV row 0")),
            other => panic!("expected parse failure, got {other:?}"),
        }

        let mut diags = Diagnostics::new();
        let table = load_with_diagnostics(&path, &mut diags);
        assert!(table.is_empty());
        assert!(diags.last_error().unwrap().message.starts_with("Error parsing file"));
    }

    #[test]
    fn success_reports_shape() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "listings.csv", CSV);

        let mut diags = Diagnostics::new();
        let table = load_with_diagnostics(&path, &mut diags);
        assert_eq!(table.len(), 2);
        assert_eq!(diags.entries().len(), 1);
        assert_eq!(diags.entries()[0].severity, Severity::Info);
        assert_eq!(
            diags.entries()[0].message,
            "File loaded successfully. Shape: (2, 7)"
        );
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "listings.xlsx", "whatever");
        assert!(matches!(
            load_file(&path),
            Err(LoadError::UnsupportedFormat { extension }) if extension == "xlsx"
        ));
    }

    #[test]
    fn json_records_keep_key_order_and_fill_gaps() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "listings.json",
            r#"[
                {"City": "Austin", "Price": "$600,000", "Square Footage": 1200},
                {"City": "Dallas", "Price": "$700,000", "Square Footage": 1500.5, "Image1": "u"}
            ]"#,
        );

        let table = load_file(&path).unwrap();
        assert_eq!(table.columns, vec!["City", "Price", "Square Footage", "Image1"]);
        assert_eq!(table.cell(0, "Image1"), Some(&CellValue::Null));
        assert_eq!(table.cell(1, "Square Footage"), Some(&CellValue::Float(1500.5)));
    }

    #[test]
    fn json_that_is_not_an_array_fails() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "listings.json", r#"{"City": "Austin"}"#);
        assert!(matches!(load_file(&path), Err(LoadError::Parse { .. })));
    }

    #[test]
    fn parquet_loads_like_csv() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("listings.parquet");

        let schema = Arc::new(Schema::new(vec![
            Field::new("City", DataType::Utf8, true),
            Field::new("Price", DataType::Utf8, true),
            Field::new("Square Footage", DataType::Int64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec![Some("Austin"), None])),
                Arc::new(StringArray::from(vec!["$600,000", "$700,000"])),
                Arc::new(Int64Array::from(vec![1200, 1500])),
            ],
        )
        .unwrap();
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let table = load_file(&path).unwrap();
        assert_eq!(table.columns, vec!["City", "Price", "Square Footage"]);
        assert_eq!(table.cell(0, "City"), Some(&CellValue::Text("Austin".into())));
        assert_eq!(table.cell(1, "City"), Some(&CellValue::Null));
        assert_eq!(table.cell(1, "Square Footage"), Some(&CellValue::Integer(1500)));
    }
}
