use std::fs::File;
use std::path::Path;

use super::error::ExportError;
use super::model::ListingTable;

/// Write the rows at `indices` to a CSV file, header first, columns in table order.
/// Null cells are written as empty fields.
pub fn export_csv<P: AsRef<Path>>(
    table: &ListingTable,
    indices: &[usize],
    path: P,
) -> Result<usize, ExportError> {
    let path_ref = path.as_ref();
    let file = File::create(path_ref).map_err(|source| ExportError::FileCreate {
        path: path_ref.to_path_buf(),
        source,
    })?;

    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(&table.columns)?;

    let mut written = 0;
    for row in indices.iter().filter_map(|&i| table.rows.get(i)) {
        writer.write_record(row.iter().map(|cell| cell.to_string()))?;
        written += 1;
    }

    writer.flush()?;
    log::info!("Exported {written} listings to {}", path_ref.display());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::data::loader::load_file;
    use crate::data::model::CellValue;

    #[test]
    fn exports_selected_rows_with_header() {
        let table = ListingTable::new(
            vec!["City".into(), "Price".into(), "Image1".into()],
            vec![
                vec![
                    CellValue::Text("Austin".into()),
                    CellValue::Text("$600,000".into()),
                    CellValue::Null,
                ],
                vec![
                    CellValue::Text("Dallas".into()),
                    CellValue::Text("$700,000".into()),
                    CellValue::Text("https://img/2.jpg".into()),
                ],
            ],
        );
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");

        let written = export_csv(&table, &[1], &path).unwrap();
        assert_eq!(written, 1);

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "City,Price,Image1\nDallas,\"$700,000\",https://img/2.jpg\n"
        );

        let reloaded = load_file(&path).unwrap();
        assert_eq!(reloaded.columns, table.columns);
        assert_eq!(reloaded.rows[0], table.rows[1]);
    }

    #[test]
    fn loaded_rows_are_exported_with_their_original_text() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("listings.csv");
        std::fs::write(
            &source,
            "City,Street,Price,Square Footage\n007,0012 Main,$1,1500.0\nMission,9 Oak,\"$2,000\",1200\n",
        )
        .unwrap();
        let table = load_file(&source).unwrap();

        let out = dir.path().join("out.csv");
        assert_eq!(export_csv(&table, &[0, 1], &out).unwrap(), 2);

        assert_eq!(
            std::fs::read_to_string(&out).unwrap(),
            std::fs::read_to_string(&source).unwrap()
        );
        assert_eq!(load_file(&out).unwrap(), table);
    }

    #[test]
    fn unwritable_path_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing-dir").join("out.csv");
        let err = export_csv(&ListingTable::empty(), &[], &path).unwrap_err();
        assert!(matches!(err, ExportError::FileCreate { .. }));
    }
}
