use std::process::ExitCode;

use clap::Parser;

use crate::config::ProbeConfig;
use crate::error::ProbeError;
use crate::notify::{Notifier, slack::SlackClient};
use crate::status::Report;

mod cli;
mod config;
mod cursor;
mod engine;
mod error;
mod logging;
mod notify;
mod probe;
mod report;
mod status;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = match cli::Args::try_parse() {
        Ok(args) => args,
        Err(e) => match cli::error_report(&e) {
            Some(report) => return exit_with(&report),
            None => e.exit(),
        },
    };

    let config = match ProbeConfig::try_init(args) {
        Ok(config) => config,
        Err(e) => return exit_with(&ProbeError::from(e).into()),
    };

    if let Err(e) = logging::init(&config) {
        return exit_with(&ProbeError::from(e).into());
    }

    let report = match run(&config).await {
        Ok(report) => report,
        Err(e) => {
            log::error!("{e}");
            e.into()
        }
    };
    exit_with(&report)
}

async fn run(config: &ProbeConfig) -> Result<Report, ProbeError> {
    let docker = engine::docker::connect(config.docker_socket.as_deref())?;

    let notifier = config.notify.as_ref().map(|notify| {
        Notifier::new(
            Box::new(SlackClient::new(notify.token.clone(), notify.api_url.clone())),
            notify.channels.clone(),
            notify.contact_label.clone(),
        )
    });

    let check = probe::run(&docker, config, notifier.as_ref()).await?;
    Ok(check.finish())
}

fn exit_with(report: &Report) -> ExitCode {
    println!("{report}");
    ExitCode::from(report.exit_code())
}
