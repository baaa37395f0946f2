use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use super::config::{MeasurementRegime, PagerConfig, PolicySetting};
use super::logging::LogDestination;

#[derive(Parser, Debug)]
#[command(
    name = "pager",
    version,
    about = "Drive an infinite-scroll admin listing from the terminal",
    long_about = "Scrolls a server-rendered admin listing page by page, replies to feedback rows \
                  and triggers the statistics report.\n\nExamples:\n  pager scroll --path /feedback\n  \
                  pager reply --tel 13800000000 --fid 42 --id reply-42 --message \"thanks\"\n  pager report"
)]
pub struct Cli {
    #[arg(
        short = 'C',
        long,
        value_name = "FILE",
        global = true,
        help = "RON config file; defaults apply when omitted."
    )]
    pub config: Option<PathBuf>,

    #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase verbosity (-v, -vv)."
    )]
    pub verbose: u8,

    #[arg(long, value_enum, default_value_t = LogDestination::Terminal, global = true)]
    pub log: LogDestination,

    #[arg(long, value_name = "URL", global = true, help = "Admin panel origin.")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Page through a listing until the server returns an empty fragment.
    Scroll {
        #[arg(long, value_name = "PATH")]
        path: Option<String>,
        #[arg(
            long,
            value_enum,
            help = "What a failed page request does. Defaults to release (retry the page); \
                    wedge keeps the request flag set and stops scrolling."
        )]
        policy: Option<PolicySetting>,
        #[arg(long, value_enum)]
        measurement: Option<MeasurementRegime>,
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },
    /// Answer one feedback row by text message.
    Reply {
        #[arg(long)]
        tel: String,
        #[arg(long)]
        fid: String,
        #[arg(long)]
        id: String,
        #[arg(long)]
        message: String,
    },
    /// Generate the statistics workbook on the server.
    Report,
}

impl Default for Command {
    fn default() -> Self {
        Command::Scroll {
            path: None,
            policy: None,
            measurement: None,
            output_dir: None,
        }
    }
}

impl Command {
    pub fn apply_overrides(&self, config: &mut PagerConfig) {
        if let Command::Scroll {
            path,
            policy,
            measurement,
            output_dir,
        } = self
        {
            if let Some(path) = path {
                config.listing_path = path.clone();
            }
            if let Some(policy) = policy {
                config.failure_policy = *policy;
            }
            if let Some(measurement) = measurement {
                config.measurement = *measurement;
            }
            if let Some(dir) = output_dir {
                config.output_dir = dir.clone();
            }
        }
    }
}
