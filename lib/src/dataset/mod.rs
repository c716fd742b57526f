//! Training samples and their sources.
//!
//! A dataset here is simply an ordered slice of [`Sample`]s. Order never
//! matters to training, since every iteration sums over the full set.
//!
//! # Example
//!
//! ```rust
//! use pricefit::dataset::{self, Sample};
//!
//! let csv = "km,price\n240000,3650\n139800,3800\n";
//! let samples = dataset::from_reader(csv.as_bytes()).unwrap();
//! assert_eq!(samples[0], Sample::new(240000.0, 3650.0));
//! ```

use serde::{Deserialize, Serialize};

pub mod csv_source;
pub use self::csv_source::{from_reader, load_csv};

/// One observation: a car's mileage (km) and its price.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub mileage: f64,
    pub price: f64,
}

impl Sample {
    pub fn new(mileage: f64, price: f64) -> Self {
        Self { mileage, price }
    }
}

impl From<(f64, f64)> for Sample {
    fn from((mileage, price): (f64, f64)) -> Self {
        Self::new(mileage, price)
    }
}

/// Iterator over the mileage column.
pub fn mileages(samples: &[Sample]) -> impl Iterator<Item = f64> + Clone + '_ {
    samples.iter().map(|s| s.mileage)
}

/// Iterator over the price column.
pub fn prices(samples: &[Sample]) -> impl Iterator<Item = f64> + Clone + '_ {
    samples.iter().map(|s| s.price)
}

/// Smallest and largest value of a column, `None` when empty.
pub fn range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}
