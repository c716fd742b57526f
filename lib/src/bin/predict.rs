use anyhow::Context;
use clap::Parser;
use log::warn;
use pricefit::inference::{parse_mileage, PriceWarning};
use pricefit::model::linear::LinearModel;
use pricefit::model::{Fitted, InferenceModel};
use pricefit::serialization::{ModelFile, DEFAULT_MODEL_PATH};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "predict", about = "Estimate a car's price from its mileage", version)]
struct Cli {
    /// Trained parameters written by `train`
    #[arg(long, value_name = "PATH", default_value = DEFAULT_MODEL_PATH)]
    model: PathBuf,

    /// Predict this mileage and exit instead of prompting
    #[arg(long, value_name = "KM")]
    mileage: Option<String>,
}

fn report(model: &LinearModel<Fitted>, mileage: f64) {
    let price = model.predict(mileage);
    println!("Mileage: {:.0} km", mileage);
    println!("Estimated price: {:.2}", price);
    if let Some(w) = PriceWarning::check(price) {
        println!("Warning: {}", w.message());
    }
}

fn prompt(out: &mut impl Write, text: &str) -> io::Result<()> {
    write!(out, "{text}")?;
    out.flush()
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let model = ModelFile::load_or_default(&cli.model)
        .with_context(|| format!("loading {}", cli.model.display()))?
        .model();

    if model.is_trained() {
        println!("theta0 = {:.4}, theta1 = {:.8}", model.theta0(), model.theta1());
    } else {
        warn!("model not trained yet, every estimate will be 0; run `train` first");
    }

    if let Some(input) = cli.mileage {
        report(&model, parse_mileage(&input)?);
        return Ok(());
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();

    loop {
        prompt(&mut stdout, "Enter mileage (km): ")?;
        let Some(line) = lines.next() else { break };
        match parse_mileage(&line?) {
            Ok(mileage) => report(&model, mileage),
            Err(e) => {
                println!("Error: {e}");
                continue;
            }
        }

        prompt(&mut stdout, "Make another prediction? (y/n): ")?;
        let Some(answer) = lines.next() else { break };
        let answer = answer?.trim().to_lowercase();
        if !matches!(answer.as_str(), "" | "y" | "yes") {
            break;
        }
    }

    println!("Goodbye!");
    Ok(())
}
