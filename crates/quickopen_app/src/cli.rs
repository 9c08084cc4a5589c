use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use log::LevelFilter;
use quickopen_logging::LogDestination;

/// Command-line arguments accepted by the `quickopen` binary.
#[derive(Parser, Debug)]
#[command(
    name = "quickopen",
    version,
    about = "Incremental quick-open search against a remote file index"
)]
pub(crate) struct CliArgs {
    #[arg(
        short = 'u',
        long,
        value_name = "URL",
        env = "QUICKOPEN_URL",
        default_value = "http://localhost:8888/",
        help = "Base URL of the server exposing /api/quickopen"
    )]
    pub(crate) server_url: String,
    #[arg(
        short = 't',
        long,
        value_name = "TOKEN",
        env = "QUICKOPEN_TOKEN",
        help = "API token sent as `Authorization: token <TOKEN>` (default: none)"
    )]
    pub(crate) token: Option<String>,
    #[arg(
        short = 's',
        long,
        value_name = "FILE",
        help = "Settings file (default: settings.ron in the platform config directory)"
    )]
    pub(crate) settings: Option<PathBuf>,
    #[arg(
        short = 'p',
        long,
        value_name = "PATH",
        default_value = "",
        help = "Initial browse directory used when relative search is enabled"
    )]
    pub(crate) browse_path: String,
    #[arg(long, value_enum, default_value_t = LogTarget::File, help = "Where to write logs")]
    pub(crate) log: LogTarget,
    #[arg(short, long, action = ArgAction::Count, help = "Increase log verbosity")]
    pub(crate) verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum LogTarget {
    File,
    Terminal,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::File => LogDestination::File,
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

impl CliArgs {
    pub(crate) fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_flags() {
        let args = CliArgs::try_parse_from(["quickopen"]).unwrap();
        assert_eq!(args.server_url, "http://localhost:8888/");
        assert_eq!(args.browse_path, "");
        assert_eq!(args.log, LogTarget::File);
        assert_eq!(args.log_level(), LevelFilter::Info);
    }

    #[test]
    fn flags_are_parsed() {
        let args = CliArgs::try_parse_from([
            "quickopen",
            "--server-url",
            "http://hub:8000/user/me/",
            "--token",
            "abc",
            "--browse-path",
            "work",
            "--log",
            "both",
            "-vv",
        ])
        .unwrap();
        assert_eq!(args.server_url, "http://hub:8000/user/me/");
        assert_eq!(args.token.as_deref(), Some("abc"));
        assert_eq!(args.browse_path, "work");
        assert_eq!(args.log, LogTarget::Both);
        assert_eq!(args.log_level(), LevelFilter::Trace);
    }
}
