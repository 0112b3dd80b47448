use clap::Parser;
use daily_briefs::{Briefs, CrawlConfig};
use std::process::ExitCode;

mod args;
use args::Args;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match CrawlConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                ::log::error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => CrawlConfig::default(),
    };
    config.apply_env_overrides();

    let mut briefs = Briefs::default().with_config(config);
    if let Some(seed_url) = &args.seed_url {
        briefs = briefs.with_seed_url(seed_url);
    }
    if let Some(target_count) = args.target_count {
        briefs = briefs.with_target_count(target_count);
    }
    if let Some(safety_cap) = args.safety_cap {
        briefs = briefs.with_safety_cap(safety_cap);
    }
    if let Some(dir) = args.output_dir {
        briefs = briefs.with_output_dir(dir);
    }
    if let Some(webdriver_url) = &args.webdriver_url {
        briefs = briefs.with_webdriver_url(webdriver_url);
    }
    if args.headless {
        briefs = briefs.with_headless(true);
    }

    ::log::info!("Starting crawler for URI: {}", briefs.config().seed_url);

    let start_time = std::time::Instant::now();
    match briefs.run().await {
        Ok(path) => {
            ::log::info!(
                "Crawling complete in {:.2} seconds",
                start_time.elapsed().as_secs_f64()
            );
            println!("Saved CSV: {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            ::log::error!("Crawl failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
