use anyhow::{bail, Context};
use benchmarks::{evaluate, AccuracyGrade, FitGrade};
use clap::Parser;
use pricefit::dataset;
use pricefit::serialization::{ModelFile, DEFAULT_MODEL_PATH};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "precision", about = "Score the trained model on a dataset")]
struct Cli {
    #[arg(long, value_name = "PATH", default_value = "data/data.csv")]
    data: PathBuf,

    #[arg(long, value_name = "PATH", default_value = DEFAULT_MODEL_PATH)]
    model: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let model = ModelFile::load_or_default(&cli.model)
        .with_context(|| format!("loading {}", cli.model.display()))?
        .model();
    if !model.is_trained() {
        bail!("model is not trained; run `train` first");
    }

    let samples = dataset::load_csv(&cli.data)
        .with_context(|| format!("loading {}", cli.data.display()))?;
    let metrics = evaluate(&model, &samples);

    println!("Model precision on {} samples", samples.len());
    println!("================================");
    println!("theta0 = {:.4}, theta1 = {:.8}\n", model.theta0(), model.theta1());

    println!(
        "R² (coefficient of determination): {:.4}  ({})",
        metrics.r_squared,
        FitGrade::for_r_squared(metrics.r_squared).label()
    );
    println!("  mileage explains {:.1}% of the price variance", metrics.r_squared * 100.0);
    println!("RMSE: {:.2}", metrics.rmse);
    println!("MAE:  {:.2}", metrics.mae);

    match metrics.mape.zip(metrics.accuracy()) {
        Some((mape, accuracy)) => {
            println!("MAPE: {:.2}%", mape);
            println!(
                "Average accuracy: {:.2}%  ({})",
                accuracy,
                AccuracyGrade::for_accuracy(accuracy).label()
            );
        }
        None => println!("MAPE: undefined (every price is zero)"),
    }

    Ok(())
}
