use crate::dataset::Sample;
use crate::error::{RegressionError, Result};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Raw CSV row. Both columns are optional so that blank rows can be skipped
/// instead of failing the whole file.
#[derive(Debug, Deserialize)]
struct Record {
    km: Option<f64>,
    price: Option<f64>,
}

/// Load samples from a CSV file with a `km,price` header.
///
/// # Errors
///
/// I/O and parse failures, and rows with negative or non-finite values
/// ([`RegressionError::InvalidSample`]).
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Sample>> {
    let file = File::open(path)?;
    from_reader(BufReader::new(file))
}

/// Read samples from any CSV source with a `km,price` header.
///
/// Rows where either field is empty are skipped.
pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Sample>> {
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut samples = Vec::new();
    for (idx, result) in rdr.deserialize::<Record>().enumerate() {
        let record = result?;
        // header is line 1
        let row = idx + 2;
        let (Some(km), Some(price)) = (record.km, record.price) else {
            log::debug!("skipping incomplete row {row}");
            continue;
        };
        samples.push(check_sample(row, Sample::new(km, price))?);
    }

    Ok(samples)
}

fn check_sample(row: usize, sample: Sample) -> Result<Sample> {
    for (name, value) in [("mileage", sample.mileage), ("price", sample.price)] {
        if !value.is_finite() {
            return Err(RegressionError::InvalidSample {
                row,
                reason: format!("{name} is not finite"),
            });
        }
        if value < 0.0 {
            return Err(RegressionError::InvalidSample {
                row,
                reason: format!("{name} is negative ({value})"),
            });
        }
    }
    Ok(sample)
}
