use crate::model::ItineraryError;
use csv::QuoteStyle;
use flate2::{write::GzEncoder, Compression};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// builds a csv writer for `filename` in `directory`, gzip-compressed when
/// the name ends in `.gz`. returns None when the file exists and `overwrite`
/// is not set.
pub fn create_writer(
    directory: &Path,
    filename: &str,
    overwrite: bool,
) -> Result<Option<csv::Writer<Box<dyn Write>>>, ItineraryError> {
    let filepath = directory.join(filename);
    if filepath.exists() && !overwrite {
        return Ok(None);
    }
    let file = File::create(&filepath).map_err(|e| ItineraryError::OutputFileError {
        filepath: filepath.to_string_lossy().to_string(),
        source: e,
    })?;
    let buffer: Box<dyn Write> = if filename.ends_with(".gz") {
        Box::new(GzEncoder::new(file, Compression::default()))
    } else {
        Box::new(file)
    };
    let writer = csv::WriterBuilder::new()
        .has_headers(true)
        .quote_style(QuoteStyle::Necessary)
        .from_writer(buffer);
    Ok(Some(writer))
}

/// writes all rows to `directory/filename`. returns the written path, or
/// None if an existing file was kept.
pub fn write_rows<T: Serialize>(
    directory: &Path,
    filename: &str,
    rows: &[T],
    overwrite: bool,
) -> Result<Option<PathBuf>, ItineraryError> {
    let filepath = directory.join(filename);
    let filename_str = filepath.to_string_lossy().to_string();
    let Some(mut writer) = create_writer(directory, filename, overwrite)? else {
        log::warn!("{filename_str} exists and overwrite is not set, skipping");
        return Ok(None);
    };
    for row in rows.iter() {
        writer
            .serialize(row)
            .map_err(|e| ItineraryError::CsvWriteError(filename_str.clone(), e))?;
    }
    writer.flush().map_err(|e| ItineraryError::OutputFileError {
        filepath: filename_str.clone(),
        source: e,
    })?;
    log::info!("wrote {} rows to {}", rows.len(), filename_str);
    Ok(Some(filepath))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use serde::Deserialize;
    use std::io::Read;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Row {
        line: String,
        value: f64,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                line: String::from("b00001"),
                value: 1.5,
            },
            Row {
                line: String::from("p00002"),
                value: 0.1,
            },
        ]
    }

    #[test]
    fn test_plain_and_overwrite() {
        let dir = tempfile::tempdir().expect("temp dir");
        let written = write_rows(dir.path(), "rows.csv", &rows(), false).expect("write");
        assert!(written.is_some());
        let contents = std::fs::read_to_string(dir.path().join("rows.csv")).expect("read back");
        assert_eq!(contents, "line,value\nb00001,1.5\np00002,0.1\n");
        let skipped = write_rows(dir.path(), "rows.csv", &rows(), false).expect("skip");
        assert!(skipped.is_none());
        let rewritten = write_rows(dir.path(), "rows.csv", &rows()[..1], true).expect("rewrite");
        assert!(rewritten.is_some());
        let contents = std::fs::read_to_string(dir.path().join("rows.csv")).expect("read back");
        assert_eq!(contents, "line,value\nb00001,1.5\n");
    }

    #[test]
    fn test_gzip_output() {
        let dir = tempfile::tempdir().expect("temp dir");
        write_rows(dir.path(), "rows.csv.gz", &rows(), true).expect("write");
        let file = File::open(dir.path().join("rows.csv.gz")).expect("open");
        let mut decoded = String::new();
        GzDecoder::new(file)
            .read_to_string(&mut decoded)
            .expect("valid gzip");
        assert!(decoded.starts_with("line,value\n"));
    }
}
