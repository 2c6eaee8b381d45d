//! Nagios plugin status handling.
//!
//! A [`Check`] collects any number of results and is consumed by
//! [`Check::finish`], which folds them into a single [`Report`]: the worst
//! status wins and the messages carrying that status make up the summary.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Status {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl Status {
    pub fn exit_code(self) -> u8 {
        match self {
            Status::Ok => 0,
            Status::Warning => 1,
            Status::Critical => 2,
            Status::Unknown => 3,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Status::Ok => "OK",
            Status::Warning => "WARNING",
            Status::Critical => "CRITICAL",
            Status::Unknown => "UNKNOWN",
        };
        f.write_str(name)
    }
}

/// Status assigned to every OOM finding of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Warning,
    Critical,
}

impl From<Severity> for Status {
    fn from(value: Severity) -> Self {
        match value {
            Severity::Warning => Status::Warning,
            Severity::Critical => Status::Critical,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub status: Status,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct Check {
    results: Vec<CheckResult>,
}

impl Check {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_result(&mut self, status: Status, message: impl Into<String>) {
        self.results.push(CheckResult {
            status,
            message: message.into(),
        });
    }

    pub fn results(&self) -> &[CheckResult] {
        &self.results
    }

    pub fn finish(self) -> Report {
        let Some(status) = self.results.iter().map(|r| r.status).max() else {
            return Report::unknown("no results specified");
        };

        let summary = self
            .results
            .iter()
            .filter(|r| r.status == status)
            .map(|r| r.message.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        Report { status, summary }
    }
}

/// The final outcome of a run, printed as the first line of output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub status: Status,
    pub summary: String,
}

impl Report {
    pub fn unknown(summary: impl Into<String>) -> Self {
        Self {
            status: Status::Unknown,
            summary: summary.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.status.exit_code()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_ordering_and_exit_codes() {
        assert!(Status::Ok < Status::Warning);
        assert!(Status::Warning < Status::Critical);
        assert!(Status::Critical < Status::Unknown);

        let codes: Vec<u8> = [
            Status::Ok,
            Status::Warning,
            Status::Critical,
            Status::Unknown,
        ]
        .into_iter()
        .map(Status::exit_code)
        .collect();
        assert_eq!(codes, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_only_ok_result() {
        let mut check = Check::new();
        check.add_result(Status::Ok, "No OOM killed container");
        let report = check.finish();
        assert_eq!(report.to_string(), "OK: No OOM killed container");
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn test_worst_status_wins_and_joins_messages() {
        let mut check = Check::new();
        check.add_result(Status::Critical, "first");
        check.add_result(Status::Critical, "second");
        check.add_result(Status::Ok, "No OOM killed container");
        let report = check.finish();
        assert_eq!(report.status, Status::Critical);
        assert_eq!(report.summary, "first, second");
        assert_eq!(report.exit_code(), 2);
    }

    #[test]
    fn test_empty_check_is_unknown() {
        let report = Check::new().finish();
        assert_eq!(report.to_string(), "UNKNOWN: no results specified");
        assert_eq!(report.exit_code(), 3);
    }

    #[test]
    fn test_severity_maps_to_status() {
        assert_eq!(Status::from(Severity::Warning), Status::Warning);
        assert_eq!(Status::from(Severity::Critical), Status::Critical);
        assert_eq!(Severity::default(), Severity::Warning);
    }
}
