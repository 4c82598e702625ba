use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;

use merchant_tester::{runner, utils};

#[derive(Parser)]
#[command(name = "merchant-tester")]
#[command(author = "NL Team")]
#[command(version = "0.1.0")]
#[command(about = "Black-box API test harness for the MusicMerchant products backend", long_about = None)]
struct Cli {
    /// Settings file holding NEXT_PUBLIC_BASE_URL
    #[arg(long, default_value = ".env")]
    env_file: PathBuf,

    /// Target base URL. Skips the settings file when given.
    #[arg(long)]
    base_url: Option<String>,

    /// Write a JSON run report
    #[arg(long, default_value = "false")]
    report: bool,

    /// Output directory for reports
    #[arg(short, long, default_value = "./output")]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let base_url = match cli.base_url {
        Some(url) => url,
        None => match utils::config::load_base_url(&cli.env_file) {
            Ok(url) => url,
            Err(e) => {
                eprintln!("{} {}", "❌".red(), e);
                std::process::exit(2);
            }
        },
    };

    println!("🎵 Testing MusicMerchant API at: {}", base_url.cyan());
    println!();

    let all_passed = runner::run_suite(&base_url, cli.report, &cli.output).await?;

    if !all_passed {
        std::process::exit(1);
    }
    Ok(())
}
