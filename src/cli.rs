use std::path::PathBuf;

use clap::Parser;

use crate::status::Report;

/// Nagios check reporting containers killed by the OOM killer.
#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Template of the message for each OOM killed container. The template
    /// receives the `docker inspect` data, e.g. `{{ Id }}` or `{{ Config.Image }}`.
    /// Booleans render as `True`/`False`, unlike Go templates.
    #[arg(long)]
    pub format: Option<String>,

    /// Path to the file storing the last processed container.
    #[arg(short = 'l', long)]
    pub last_container_file: Option<PathBuf>,

    /// Report OOM killed containers as warning (default).
    #[arg(short, long)]
    pub warning: bool,

    /// Report OOM killed containers as critical.
    #[arg(short, long)]
    pub critical: bool,

    /// Slack API token. Notifications are sent only when a channel is set too.
    #[arg(long)]
    pub slack_token: Option<String>,

    /// Default Slack channels, comma separated. Can be repeated.
    #[arg(long = "slack-channel")]
    pub slack_channels: Vec<String>,

    /// Container label overriding the Slack channels of that container.
    #[arg(long)]
    pub slack_label: Option<String>,

    /// Path to the docker unix socket. Defaults to `DOCKER_HOST` or the local socket.
    #[arg(long)]
    pub docker_socket: Option<PathBuf>,

    /// Optional TOML file with the same settings. Command line values win.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print debug messages to STDERR.
    #[arg(long)]
    pub debug: bool,

    /// Append log output to this file instead of STDERR.
    #[arg(long)]
    pub debug_output: Option<PathBuf>,
}

/// How a command line error is reported. `None` for `--help` and
/// `--version`, which clap prints itself and exits with success.
pub fn error_report(err: &clap::Error) -> Option<Report> {
    if !err.use_stderr() {
        return None;
    }
    let message = err.to_string();
    let first_line = message.lines().next().unwrap_or_default();
    Some(Report::unknown(first_line))
}
