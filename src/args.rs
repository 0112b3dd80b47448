use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "daily-briefs")]
#[command(about = "Collects recent daily operational bulletins into a CSV file")]
#[command(version)]
pub struct Args {
    /// Path to a JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Bulletin URL to start crawling from
    #[arg(long)]
    pub seed_url: Option<String>,

    /// Number of bulletins to keep in the export
    #[arg(short = 'n', long)]
    pub target_count: Option<usize>,

    /// Maximum number of pages to visit (defaults to twice the target count)
    #[arg(long)]
    pub safety_cap: Option<usize>,

    /// Directory for the CSV export
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// WebDriver server URL (overrides WEBDRIVER_URL)
    #[arg(long)]
    pub webdriver_url: Option<String>,

    /// Run the browser headless
    #[arg(long)]
    pub headless: bool,
}
