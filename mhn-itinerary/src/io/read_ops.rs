use crate::model::ItineraryError;
use flate2::read::GzDecoder;
use kdam::tqdm;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// reads every row of a csv input into `T`. files ending in `.gz` are
/// decompressed. `name` identifies the input in errors.
pub fn read_rows<T: DeserializeOwned>(name: &str, filepath: &Path) -> Result<Vec<T>, ItineraryError> {
    let filename = filepath.to_string_lossy().to_string();
    if !filepath.is_file() {
        return Err(ItineraryError::MissingInputError {
            name: name.to_string(),
            filepath: filename,
        });
    }
    let file = File::open(filepath).map_err(|e| ItineraryError::CsvReadError {
        name: name.to_string(),
        filepath: filename.clone(),
        source: csv::Error::from(e),
    })?;
    let buffer: Box<dyn Read> = if filename.ends_with(".gz") {
        Box::new(GzDecoder::new(file))
    } else {
        Box::new(file)
    };
    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(buffer);
    let row_iter = tqdm!(reader.into_deserialize::<T>(), desc = format!("reading {name}"));
    let rows = row_iter
        .map(|r| {
            r.map_err(|e| ItineraryError::CsvReadError {
                name: name.to_string(),
                filepath: filename.clone(),
                source: e,
            })
        })
        .collect::<Result<Vec<T>, ItineraryError>>()?;
    eprintln!();
    log::info!("read {} {} rows from {}", rows.len(), name, filename);
    Ok(rows)
}

/// reads an optional input, yielding no rows when the path is not given.
pub fn read_optional_rows<T: DeserializeOwned>(
    name: &str,
    filepath: Option<&Path>,
) -> Result<Vec<T>, ItineraryError> {
    match filepath {
        Some(path) => read_rows(name, path),
        None => Ok(vec![]),
    }
}
