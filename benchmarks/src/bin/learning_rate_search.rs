use anyhow::Context;
use benchmarks::sweep::{self, DEFAULT_LEARNING_RATES};
use clap::Parser;
use log::info;
use pricefit::dataset;
use pricefit::trainer::DEFAULT_MAX_ITERATIONS;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "learning_rate_search",
    about = "Train once per learning rate and compare final cost"
)]
struct Cli {
    #[arg(long, value_name = "PATH", default_value = "data/data.csv")]
    data: PathBuf,

    /// Comma-separated learning rates
    #[arg(long, value_delimiter = ',')]
    rates: Vec<f64>,

    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    iterations: usize,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    println!("Learning Rate Search for Full-Batch Gradient Descent");
    println!("====================================================\n");

    let samples = dataset::load_csv(&cli.data)
        .with_context(|| format!("loading {}", cli.data.display()))?;
    info!("loaded {} samples", samples.len());

    let rates = if cli.rates.is_empty() {
        DEFAULT_LEARNING_RATES.to_vec()
    } else {
        cli.rates.clone()
    };

    println!(
        "Testing {} learning rates ({} iterations, {} samples)\n",
        rates.len(),
        cli.iterations,
        samples.len()
    );

    let results = sweep::sweep_learning_rates(&samples, &rates, cli.iterations)?;

    for r in &results {
        let status = match &r.divergence {
            Some(d) => format!("DIVERGED at iteration {}", d.iteration),
            None => "ok".to_string(),
        };
        println!(
            "LR = {:<8} Time = {:7.3} ms, Cost = {:>14.6e}, theta0 = {:>12.4}, theta1 = {:>12.8}, R² = {:.4}  [{}]",
            r.learning_rate,
            r.elapsed.as_secs_f64() * 1000.0,
            r.final_cost,
            r.params.theta0,
            r.params.theta1,
            r.metrics.r_squared,
            status
        );
    }

    match sweep::best(&results) {
        Some(best) => {
            println!("\n=== Best Learning Rate ===");
            println!("LR = {}", best.learning_rate);
            println!("Final cost = {:.6e}", best.final_cost);
            println!("R² = {:.4}", best.metrics.r_squared);
        }
        None => println!("\nEvery learning rate diverged"),
    }

    Ok(())
}
