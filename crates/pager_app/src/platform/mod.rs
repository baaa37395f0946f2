mod app;
mod cli;
mod config;
mod container;
mod effects;
mod logging;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use pager_engine::{EngineHandle, ReqwestAdminClient, ReqwestFetcher};

use cli::{Cli, Command};
use config::PagerConfig;

pub fn run_app() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::initialize(cli.log, logging::level_for_verbosity(cli.verbose));

    let mut config = PagerConfig::load(cli.config.as_deref())?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    let command = cli.command.unwrap_or_default();
    command.apply_overrides(&mut config);
    config.validate()?;

    let settings = config.fetch_settings();
    let fetcher = Arc::new(ReqwestFetcher::new(settings.clone()));
    let admin = Arc::new(
        ReqwestAdminClient::new(&config.base_url, config.admin_routes(), settings)
            .with_context(|| format!("invalid base url {}", config.base_url))?,
    );
    let engine = EngineHandle::new(fetcher, admin).context("starting engine runtime")?;

    match command {
        Command::Scroll { .. } => {
            let summary = app::run_scroll(&config, engine)?;
            println!(
                "{} rows in {} fragments over {} pages ({}, {} failed requests, {} scroll signals coalesced) -> {}",
                summary.rows,
                summary.fragments,
                summary.last_page,
                if summary.end_of_data { "end of data" } else { "incomplete" },
                summary.failed_fetches,
                summary.coalesced_signals,
                summary.snapshot.display()
            );
            if summary.stalled {
                anyhow::bail!("pagination stalled at page {}", summary.last_page);
            }
        }
        Command::Reply {
            tel,
            fid,
            id,
            message,
        } => {
            let attributes = [
                ("data-tel", tel.as_str()),
                ("data-fid", fid.as_str()),
                ("id", id.as_str()),
            ];
            app::run_reply(&config, engine, &attributes, &message)?;
            println!("reply sent");
        }
        Command::Report => {
            app::run_report(&config, engine)?;
            println!("report generated");
        }
    }
    Ok(())
}
