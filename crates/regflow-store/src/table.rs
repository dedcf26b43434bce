//! Regulation table loading.
//!
//! A table is read fresh on every call; there is no cache. CSV columns are
//! all read as Utf8 so identifiers like `"0012"` or `"5"` keep their text.
//! Rows shorter than the header are padded with nulls rather than rejected.

use std::fs::File;
use std::io::Seek;
use std::path::Path;
use std::sync::Arc;

use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use regflow_core::{ColumnMap, RegulationRow};
use tracing::{debug, info};

use crate::StoreError;

/// Load a regulation table, choosing the reader by file extension.
pub fn load_table(path: &Path) -> Result<Vec<RecordBatch>, StoreError> {
    if !path.exists() {
        return Err(StoreError::NotFound(path.to_path_buf()));
    }
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let batches = match ext.as_deref() {
        Some("csv") => read_csv(path)?,
        Some("parquet") => read_parquet(path)?,
        _ => return Err(StoreError::UnsupportedFormat(path.to_path_buf())),
    };

    let rows: usize = batches.iter().map(|b| b.num_rows()).sum();
    info!(rows, path = %path.display(), "loaded regulation table");
    Ok(batches)
}

/// Read a CSV file with a header row into Arrow RecordBatches.
///
/// Every column becomes nullable Utf8. Missing trailing cells read as null.
pub fn read_csv(path: &Path) -> Result<Vec<RecordBatch>, StoreError> {
    let mut file = File::open(path)?;
    let format = Format::default().with_header(true);
    let (header, _) = format.infer_schema(&mut file, Some(0))?;
    file.rewind()?;

    let fields: Vec<Field> = header
        .fields()
        .iter()
        .map(|f| Field::new(f.name(), DataType::Utf8, true))
        .collect();
    debug!(columns = fields.len(), "csv header read");

    let reader = ReaderBuilder::new(Arc::new(Schema::new(fields)))
        .with_header(true)
        .with_truncated_rows(true)
        .build(file)?;
    let batches: Result<Vec<RecordBatch>, _> = reader.collect();
    Ok(batches?)
}

/// Read a Parquet file into Arrow RecordBatches.
pub fn read_parquet(path: &Path) -> Result<Vec<RecordBatch>, StoreError> {
    let file = File::open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;
    let batches: Result<Vec<RecordBatch>, _> = reader.collect();
    Ok(batches?)
}

/// Column names of a loaded table, in schema order. Empty when the table
/// has no batches.
pub fn column_names(batches: &[RecordBatch]) -> Vec<String> {
    batches
        .first()
        .map(|b| b.schema().fields().iter().map(|f| f.name().clone()).collect())
        .unwrap_or_default()
}

/// Load a table and read it into regulation rows.
pub fn load_regulations(path: &Path, columns: &ColumnMap) -> Result<Vec<RegulationRow>, StoreError> {
    let batches = load_table(path)?;
    Ok(RegulationRow::from_batches(&batches, columns)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use parquet::arrow::ArrowWriter;
    use regflow_core::{GraphResult, build_graph, regulation_schema};
    use std::path::PathBuf;
    use tempfile::TempDir;

    const SAMPLE_CSV: &str = "\
Singkatan Jenis / Bentuk Peraturan,Nomor Peraturan,Isi UU,Keterangan_Status
UU,0012,Ketenagalistrikan,\"Diubah dengan UU Nomor 6 Tahun 2023 tentang Cipta Kerja; Dicabut sebagian oleh UU Nomor 2 Tahun 2022 tentang X\"
PP,5,Panas Bumi,
Permen ESDM,26,\"Pembangkit, Listrik\",Berlaku
";

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn read_csv_keeps_identifiers_as_text() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "jdih.csv", SAMPLE_CSV);

        let batches = read_csv(&path).unwrap();
        let total: usize = batches.iter().map(|b| b.num_rows()).sum();
        assert_eq!(total, 3);
        let schema = batches[0].schema();
        assert_eq!(schema.fields().len(), 4);
        assert!(schema.fields().iter().all(|f| f.data_type() == &DataType::Utf8));
    }

    #[test]
    fn load_regulations_from_csv() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "jdih.csv", SAMPLE_CSV);

        let rows = load_regulations(&path, &ColumnMap::default()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].regulation_number, "0012");
        assert_eq!(rows[2].content, "Pembangkit, Listrik");
        assert_eq!(rows[2].status_text.as_deref(), Some("Berlaku"));
    }

    #[test]
    fn csv_table_feeds_graph_builder() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "jdih.csv", SAMPLE_CSV);
        let rows = load_regulations(&path, &ColumnMap::default()).unwrap();

        let GraphResult::Graph(graph) = build_graph(&rows, "0012") else {
            panic!("expected a graph for 0012");
        };
        assert_eq!(graph.root().unwrap().label, "UU - 0012");
        assert_eq!(graph.nodes[1].label, "Diubah - Nomor 6 Tahun 2023");
        assert_eq!(graph.nodes[2].label, "Dicabut - Nomor 2 Tahun 2022");

        assert_eq!(build_graph(&rows, "5"), GraphResult::Empty);
        assert_eq!(build_graph(&rows, "12"), GraphResult::NotFound);
    }

    #[test]
    fn short_row_padded_with_nulls() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "short.csv",
            "\
Singkatan Jenis / Bentuk Peraturan,Nomor Peraturan,Isi UU,Keterangan_Status
UU,5,Minyak dan Gas
PP,6,Batubara,Dicabut dengan PP Nomor 7 Tahun 2020 tentang Batubara
",
        );

        let rows = load_regulations(&path, &ColumnMap::default()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].regulation_number, "5");
        assert_eq!(rows[0].content, "Minyak dan Gas");
        assert_eq!(rows[0].status_text, None);

        assert_eq!(build_graph(&rows, "5"), GraphResult::Empty);
        let GraphResult::Graph(graph) = build_graph(&rows, "6") else {
            panic!("expected a graph for 6");
        };
        assert_eq!(graph.nodes[1].label, "Dicabut - Nomor 7 Tahun 2020");
    }

    #[test]
    fn column_names_in_schema_order() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "jdih.csv", SAMPLE_CSV);
        let batches = load_table(&path).unwrap();
        assert_eq!(
            column_names(&batches),
            vec![
                "Singkatan Jenis / Bentuk Peraturan",
                "Nomor Peraturan",
                "Isi UU",
                "Keterangan_Status"
            ]
        );
        assert!(column_names(&[]).is_empty());
    }

    #[test]
    fn read_parquet_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("jdih.parquet");
        let columns = ColumnMap::default();
        let schema = Arc::new(regulation_schema(&columns));

        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(arrow::array::StringArray::from(vec!["PP"])),
                Arc::new(arrow::array::StringArray::from(vec!["23"])),
                Arc::new(arrow::array::StringArray::from(vec!["Pertambangan"])),
                Arc::new(arrow::array::StringArray::from(vec![Some(
                    "Diubah dengan PP Nomor 24 Tahun 2012 tentang Perubahan",
                )])),
            ],
        )
        .unwrap();
        let file = File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let rows = load_regulations(&path, &columns).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].regulation_form, "PP");
        assert!(matches!(build_graph(&rows, "23"), GraphResult::Graph(_)));
    }

    #[test]
    fn missing_file_errors() {
        let result = load_table(Path::new("/nonexistent/jdih.csv"));
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[test]
    fn unsupported_extension_errors() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "jdih.xlsx", "not a table");
        let result = load_table(&path);
        assert!(matches!(result, Err(StoreError::UnsupportedFormat(_))));
    }

    #[test]
    fn missing_column_surfaces_core_error() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "other.csv", "a,b\n1,2\n");
        let result = load_regulations(&path, &ColumnMap::default());
        assert!(matches!(result, Err(StoreError::Core(_))));
    }
}
