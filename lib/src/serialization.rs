//! Persistence of trained parameters and training diagnostics.
//!
//! The model file is the only channel between the `train` and `predict`
//! programs. It holds raw-space θ₀, θ₁ and, for reference, the statistics
//! the training data was normalized with:
//!
//! ```json
//! {
//!   "theta0": 8499.6,
//!   "theta1": -0.0214,
//!   "normalization": { "km_mean": 101066.25, "km_std": 51565.19, ... }
//! }
//! ```

use crate::error::Result;
use crate::model::linear::{LinearModel, LinearParams};
use crate::model::Fitted;
use crate::preprocessing::NormalizationStats;
use crate::trainer::{CostHistory, TrainingReport};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_MODEL_PATH: &str = "models/theta.json";
pub const DEFAULT_HISTORY_PATH: &str = "models/cost_history.json";

/// Plain data that can be turned into bytes and back.
pub trait SerializableParams: Sized {
    fn to_bytes(&self) -> Result<Vec<u8>>;

    fn from_bytes(bytes: &[u8]) -> Result<Self>;

    /// Writes the bytes to `path`, creating parent directories as needed.
    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_bytes()?)?;
        debug!("wrote {}", path.display());
        Ok(())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }
}

impl<T> SerializableParams for T
where
    T: Serialize + for<'de> Deserialize<'de>,
{
    fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// On-disk model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelFile {
    #[serde(default)]
    pub theta0: f64,
    #[serde(default)]
    pub theta1: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalization: Option<NormalizationStats>,
}

impl Default for ModelFile {
    fn default() -> Self {
        Self {
            theta0: 0.0,
            theta1: 0.0,
            normalization: None,
        }
    }
}

impl ModelFile {
    /// Loads `path`, or the untrained (0, 0) model when it does not exist.
    ///
    /// A file that exists but cannot be parsed is still an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!("{} not found, using untrained parameters", path.display());
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    pub fn params(&self) -> LinearParams {
        LinearParams::new(self.theta0, self.theta1)
    }

    pub fn model(&self) -> LinearModel<Fitted> {
        LinearModel::<Fitted>::new(self.params())
    }
}

impl From<&TrainingReport> for ModelFile {
    fn from(report: &TrainingReport) -> Self {
        Self {
            theta0: report.model.theta0(),
            theta1: report.model.theta1(),
            normalization: Some(report.stats),
        }
    }
}

impl From<&LinearModel<Fitted>> for ModelFile {
    fn from(model: &LinearModel<Fitted>) -> Self {
        Self {
            theta0: model.theta0(),
            theta1: model.theta1(),
            normalization: None,
        }
    }
}

/// Cost history file: `{"cost_history": [{"iteration": 0, "cost": ...}, ...]}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryFile {
    pub cost_history: CostHistory,
}

impl From<&CostHistory> for HistoryFile {
    fn from(history: &CostHistory) -> Self {
        Self {
            cost_history: history.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Sample;
    use crate::model::InferenceModel;
    use crate::trainer::Trainer;

    fn report() -> TrainingReport {
        let samples = vec![
            Sample::new(10_000.0, 9_000.0),
            Sample::new(50_000.0, 7_000.0),
            Sample::new(90_000.0, 5_500.0),
        ];
        Trainer::builder()
            .max_iterations(200)
            .build()
            .unwrap()
            .fit(&samples)
            .unwrap()
    }

    #[test]
    fn test_model_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("models").join("theta.json");

        let report = report();
        let file = ModelFile::from(&report);
        file.save_to_file(&path).unwrap();

        let loaded = ModelFile::load_from_file(&path).unwrap();
        assert_eq!(loaded, file);
        assert_eq!(loaded.model().predict(30_000.0), report.model.predict(30_000.0));
    }

    #[test]
    fn test_model_file_json_layout() {
        let file = ModelFile {
            theta0: 1.5,
            theta1: -0.25,
            normalization: None,
        };
        let json: serde_json::Value = serde_json::from_slice(&file.to_bytes().unwrap()).unwrap();
        assert_eq!(json["theta0"], 1.5);
        assert_eq!(json["theta1"], -0.25);
        assert!(json.get("normalization").is_none());
    }

    #[test]
    fn test_model_file_with_normalization() {
        let file = ModelFile::from(&report());
        let json: serde_json::Value = serde_json::from_slice(&file.to_bytes().unwrap()).unwrap();
        assert!(json["normalization"]["km_mean"].is_number());
        assert!(json["normalization"]["price_std"].is_number());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = ModelFile::load_or_default(dir.path().join("absent.json")).unwrap();
        assert_eq!(file, ModelFile::default());
        assert!(!file.model().is_trained());
        assert_eq!(file.model().predict(123_456.0), 0.0);
    }

    #[test]
    fn test_load_or_default_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("theta.json");
        std::fs::write(&path, b"{ not json").unwrap();
        assert!(ModelFile::load_or_default(&path).is_err());
    }

    #[test]
    fn test_load_missing_fields_default_to_zero() {
        let file = ModelFile::from_bytes(br#"{"theta1": 2.0}"#).unwrap();
        assert_eq!(file.params(), LinearParams::new(0.0, 2.0));
    }

    #[test]
    fn test_history_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cost_history.json");

        let report = report();
        HistoryFile::from(&report.history).save_to_file(&path).unwrap();
        let loaded = HistoryFile::load_from_file(&path).unwrap();

        assert_eq!(loaded.cost_history, report.history);
        let json: serde_json::Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(json["cost_history"].as_array().unwrap().len(), 200);
    }
}
