use anyhow::Result;
use clap::Parser;
use skywash::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    skywash::run(cli).await
}
