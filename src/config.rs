//! Run configuration.
//!
//! [`ProbeConfig`] is built once at startup from the command line merged over
//! an optional TOML file and then only read.

use std::path::{Path, PathBuf};

use crate::cli::Args;
use crate::notify::{DEFAULT_CONTACT_LABEL, parse_channels, slack};
use crate::report::DEFAULT_FORMAT;
use crate::status::Severity;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Read config {} failed: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Can be set only warning or critical option")]
    ConflictingLevels,
    #[error("Open debug output {} failed: {source}", path.display())]
    LogTarget {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Settings accepted in the `--config` file.
///
/// ```toml
/// format = "{{ Name }} ({{ Config.Image }}) was OOM killed"
/// last_container_file = "/var/lib/oomcheck/last"
/// level = "critical"
///
/// [slack]
/// token = "xoxb-..."
/// channels = ["ops"]
/// label = "SLACK_CONTACT"
/// ```
#[derive(Debug, Default, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProbeConfigFile {
    pub format: Option<String>,
    pub last_container_file: Option<PathBuf>,
    pub level: Option<Severity>,
    pub docker_socket: Option<PathBuf>,
    #[serde(default)]
    pub slack: SlackSection,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SlackSection {
    pub token: Option<String>,
    #[serde(default)]
    pub channels: Vec<String>,
    pub label: Option<String>,
    pub api_url: Option<String>,
}

impl ProbeConfigFile {
    fn try_init_from_string(val: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(val)?)
    }

    pub fn try_init(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::try_init_from_string(&content)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyConfig {
    pub token: String,
    pub channels: Vec<String>,
    pub contact_label: String,
    pub api_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    pub format: String,
    pub cursor_file: Option<PathBuf>,
    pub severity: Severity,
    pub docker_socket: Option<PathBuf>,
    /// Set only when both a token and a default channel are configured.
    pub notify: Option<NotifyConfig>,
    pub debug: bool,
    pub debug_output: Option<PathBuf>,
}

impl ProbeConfig {
    pub fn try_init(args: Args) -> Result<Self, ConfigError> {
        let file = match &args.config {
            Some(path) => ProbeConfigFile::try_init(path)?,
            None => ProbeConfigFile::default(),
        };
        Self::merge(args, file)
    }

    fn merge(args: Args, file: ProbeConfigFile) -> Result<Self, ConfigError> {
        let severity = match (args.warning, args.critical) {
            (true, true) => return Err(ConfigError::ConflictingLevels),
            (true, false) => Severity::Warning,
            (false, true) => Severity::Critical,
            (false, false) => file.level.unwrap_or_default(),
        };

        let raw_channels = if args.slack_channels.is_empty() {
            file.slack.channels
        } else {
            args.slack_channels
        };
        let channels: Vec<String> = raw_channels
            .iter()
            .flat_map(|raw| parse_channels(raw))
            .collect();

        let notify = args
            .slack_token
            .or(file.slack.token)
            .filter(|token| !token.is_empty() && !channels.is_empty())
            .map(|token| NotifyConfig {
                token,
                channels,
                contact_label: args
                    .slack_label
                    .or(file.slack.label)
                    .unwrap_or_else(|| DEFAULT_CONTACT_LABEL.to_string()),
                api_url: file
                    .slack
                    .api_url
                    .unwrap_or_else(|| slack::DEFAULT_API_URL.to_string()),
            });

        Ok(Self {
            format: args
                .format
                .or(file.format)
                .unwrap_or_else(|| DEFAULT_FORMAT.to_string()),
            cursor_file: args.last_container_file.or(file.last_container_file),
            severity,
            docker_socket: args.docker_socket.or(file.docker_socket),
            notify,
            debug: args.debug,
            debug_output: args.debug_output,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProbeConfig::merge(Args::default(), ProbeConfigFile::default()).unwrap();
        assert_eq!(config.format, DEFAULT_FORMAT);
        assert_eq!(config.severity, Severity::Warning);
        assert_eq!(config.cursor_file, None);
        assert_eq!(config.notify, None);
    }

    #[test]
    fn test_conflicting_levels() {
        let args = Args {
            warning: true,
            critical: true,
            ..Default::default()
        };
        let res = ProbeConfig::merge(args, ProbeConfigFile::default());
        assert!(matches!(res, Err(ConfigError::ConflictingLevels)), "{res:?}");
    }

    #[test]
    fn test_file_values_and_cli_precedence() {
        let file = ProbeConfigFile::try_init_from_string(
            r##"
            format = "{{ Name }} died"
            last_container_file = "/var/lib/oomcheck/last"
            level = "critical"

            [slack]
            token = "xoxb-file"
            channels = ["#ops, #infra"]
            "##,
        )
        .expect("Failed to parse config");

        let args = Args {
            warning: true,
            slack_channels: vec!["alerts".to_string()],
            ..Default::default()
        };
        let config = ProbeConfig::merge(args, file).unwrap();

        assert_eq!(config.format, "{{ Name }} died");
        assert_eq!(
            config.cursor_file,
            Some(PathBuf::from("/var/lib/oomcheck/last"))
        );
        assert_eq!(config.severity, Severity::Warning);

        let notify = config.notify.expect("notifications should be enabled");
        assert_eq!(notify.token, "xoxb-file");
        assert_eq!(notify.channels, vec!["alerts"]);
        assert_eq!(notify.contact_label, DEFAULT_CONTACT_LABEL);
        assert_eq!(notify.api_url, slack::DEFAULT_API_URL);
    }

    #[test]
    fn test_notify_needs_token_and_channel() {
        let token_only = Args {
            slack_token: Some("xoxb".to_string()),
            ..Default::default()
        };
        let config = ProbeConfig::merge(token_only, ProbeConfigFile::default()).unwrap();
        assert_eq!(config.notify, None);

        let channel_only = Args {
            slack_channels: vec!["ops".to_string()],
            ..Default::default()
        };
        let config = ProbeConfig::merge(channel_only, ProbeConfigFile::default()).unwrap();
        assert_eq!(config.notify, None);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let res = ProbeConfigFile::try_init_from_string("colour = \"red\"");
        assert!(matches!(res, Err(ConfigError::Toml(_))), "{res:?}");
    }

    #[test]
    fn test_missing_config_file() {
        let res = ProbeConfigFile::try_init(Path::new("/nonexistent/oomcheck.toml"));
        assert!(matches!(res, Err(ConfigError::Io { .. })), "{res:?}");
    }
}
