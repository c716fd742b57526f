use anyhow::Context;
use clap::Parser;
use log::info;
use pricefit::dataset;
use pricefit::model::InferenceModel;
use pricefit::serialization::{
    HistoryFile, ModelFile, SerializableParams, DEFAULT_HISTORY_PATH, DEFAULT_MODEL_PATH,
};
use pricefit::trainer::{Trainer, TrainingConfig};
use std::path::PathBuf;

const EXAMPLE_MILEAGES: [f64; 4] = [50_000.0, 100_000.0, 150_000.0, 200_000.0];
const PROGRESS_EVERY: usize = 100;

#[derive(Debug, Parser)]
#[command(
    name = "train",
    about = "Fit price = theta0 + theta1 * mileage by gradient descent",
    version
)]
struct Cli {
    /// CSV file with `km,price` columns
    #[arg(long, value_name = "PATH", default_value = "data/data.csv")]
    data: PathBuf,

    /// Where to write the trained parameters
    #[arg(long, value_name = "PATH", default_value = DEFAULT_MODEL_PATH)]
    model: PathBuf,

    /// Where to write the cost history
    #[arg(long, value_name = "PATH", default_value = DEFAULT_HISTORY_PATH)]
    history: PathBuf,

    /// JSON training config; flags below override its values
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    #[arg(long)]
    learning_rate: Option<f64>,

    #[arg(long)]
    iterations: Option<usize>,

    /// Stop early once the cost changes by less than this
    #[arg(long)]
    tolerance: Option<f64>,

    /// Fail instead of warning when the cost diverges
    #[arg(long)]
    strict: bool,
}

impl Cli {
    fn training_config(&self) -> anyhow::Result<TrainingConfig> {
        let mut config = match &self.config {
            Some(path) => TrainingConfig::from_json_file(path)
                .with_context(|| format!("reading config {}", path.display()))?,
            None => TrainingConfig::default(),
        };
        if let Some(lr) = self.learning_rate {
            config.learning_rate = lr;
        }
        if let Some(n) = self.iterations {
            config.max_iterations = n;
        }
        if self.tolerance.is_some() {
            config.tolerance = self.tolerance;
        }
        config.abort_on_divergence |= self.strict;
        config.record_history = true;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let samples = dataset::load_csv(&cli.data)
        .with_context(|| format!("loading {}", cli.data.display()))?;
    info!("loaded {} training examples", samples.len());
    if let (Some((km_lo, km_hi)), Some((p_lo, p_hi))) = (
        dataset::range(dataset::mileages(&samples)),
        dataset::range(dataset::prices(&samples)),
    ) {
        info!("mileage range: {km_lo:.0} - {km_hi:.0} km, price range: {p_lo:.0} - {p_hi:.0}");
    }

    let trainer = Trainer::new(cli.training_config()?)?;
    let report = trainer.fit(&samples)?;

    for entry in report.history.entries() {
        if entry.iteration % PROGRESS_EVERY == 0 || entry.iteration + 1 == report.iterations {
            println!("Iteration {:4} | Cost: {:.6}", entry.iteration, entry.cost);
        }
    }
    if let Some(divergence) = &report.divergence {
        println!(
            "Warning: cost diverged at iteration {} ({:?}); try a smaller learning rate",
            divergence.iteration, divergence.kind
        );
    }

    println!();
    println!("theta0 (intercept): {:.4}", report.model.theta0());
    println!("theta1 (slope):     {:.8}", report.model.theta1());

    ModelFile::from(&report)
        .save_to_file(&cli.model)
        .with_context(|| format!("saving {}", cli.model.display()))?;
    info!("parameters saved to {}", cli.model.display());

    HistoryFile::from(&report.history)
        .save_to_file(&cli.history)
        .with_context(|| format!("saving {}", cli.history.display()))?;
    info!("cost history saved to {}", cli.history.display());

    println!();
    println!("Example predictions:");
    for km in EXAMPLE_MILEAGES {
        println!("  {:6.0} km -> {:8.2}", km, report.model.predict(km));
    }

    Ok(())
}
