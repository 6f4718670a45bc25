use aqi_forecaster::cli::args::Args;
use aqi_forecaster::cli::commands;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    commands::run(args).await?;
    Ok(())
}
