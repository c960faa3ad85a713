use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use ecf_report::cli::{Cli, Commands};
use ecf_report::client::RestService;
use ecf_report::config::{EcfConfig, FileConfig};
use ecf_report::{logging, pipeline};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_file.clone());

    // reqwest is built against rustls without a default crypto provider
    let _ = rustls::crypto::ring::default_provider().install_default();

    let file = FileConfig::load_or_default(cli.config.as_deref())
        .context("Failed to load config file")?;

    match cli.command {
        Commands::Report { batch_size } => {
            let config = EcfConfig::resolve(file, cli.site_url, batch_size, cli.access_token)?;
            let service = RestService::new(&config)
                .with_context(|| format!("Failed to connect to {}", config.site_url))?;

            eprintln!("{} {}", "Reporting from".green(), config.site_url.cyan());
            pipeline::run(&service, config.batch_size, &mut std::io::stdout().lock())
                .context("Report run failed")?;
        }
        Commands::Catalog => {
            let config = EcfConfig::resolve(file, cli.site_url, None, cli.access_token)?;
            let service = RestService::new(&config)
                .with_context(|| format!("Failed to connect to {}", config.site_url))?;

            pipeline::run_catalog(&service, &mut std::io::stdout().lock())
                .context("Catalog fetch failed")?;
        }
    }

    Ok(())
}
