use std::error::Error;
use std::process::ExitCode;

use chroma_key::cli::{is_usage_notice, Cli};
use clap::{CommandFactory, Parser};
use log::info;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // Too few arguments is a usage notice and exits with status 0.
        Err(err) if is_usage_notice(err.kind(), std::env::args_os().len().saturating_sub(1)) => {
            eprintln!("{}", Cli::command().render_usage());
            return ExitCode::SUCCESS;
        }
        Err(err) => err.exit(),
    };

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .format_timestamp(None)
        .init();

    let config = cli.pipeline_config();
    match chroma_key::run(&config) {
        Ok(report) => {
            info!(
                "kept {} pixels with threshold {}, {} with calibrated threshold {:.4}",
                report.threshold_foreground,
                config.threshold,
                report.auto_foreground,
                report.auto_threshold.threshold
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            let mut message = err.to_string();
            let mut source = err.source();
            while let Some(cause) = source {
                message.push_str(&format!(": {cause}"));
                source = cause.source();
            }
            eprintln!("{message}");
            ExitCode::from(err.exit_code())
        }
    }
}
