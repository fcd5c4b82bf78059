//! Click log entry model for the collector endpoint.

use chrono::{DateTime, SecondsFormat, Utc};

/// A single tracked click as reported to the collector.
///
/// Built from `GET /track` query parameters with the collector's defaulting
/// rules: every field is optional on the wire and falls back to a placeholder
/// rather than failing the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Destination the user followed (or `"Unknown URL"`).
    pub url: String,
    /// Button vocabulary from the client: `left`, `middle`, `right`, `key`
    /// (or `"Unknown Button"`).
    pub button: String,
    /// Whether the collector should answer with a redirect to `url`.
    pub redirect: bool,
    /// Caller-chosen correlation reference (or `"0"`).
    pub logref: String,
}

impl LogEntry {
    pub const UNKNOWN_URL: &str = "Unknown URL";
    pub const UNKNOWN_BUTTON: &str = "Unknown Button";
    pub const DEFAULT_LOGREF: &str = "0";

    /// Builds an entry from optional wire parameters, applying defaults.
    ///
    /// `redirect` is true only for the literal `"1"`.
    pub fn from_params(
        url: Option<String>,
        button: Option<String>,
        redirect: Option<String>,
        logref: Option<String>,
    ) -> Self {
        Self {
            url: url.unwrap_or_else(|| Self::UNKNOWN_URL.to_string()),
            button: button.unwrap_or_else(|| Self::UNKNOWN_BUTTON.to_string()),
            redirect: redirect.as_deref() == Some("1"),
            logref: logref.unwrap_or_else(|| Self::DEFAULT_LOGREF.to_string()),
        }
    }

    /// Renders the log-file line for this entry, without trailing newline:
    /// `[#<logref>] [<timestamp>] <url> (button: <button>)`.
    pub fn formatted(&self, at: DateTime<Utc>) -> String {
        format!(
            "[#{}] [{}] {} (button: {})",
            self.logref,
            at.to_rfc3339_opts(SecondsFormat::Secs, true),
            self.url,
            self.button,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_from_params_full() {
        let entry = LogEntry::from_params(
            Some("http://other.com/b".to_string()),
            Some("left".to_string()),
            Some("1".to_string()),
            Some("42".to_string()),
        );

        assert_eq!(entry.url, "http://other.com/b");
        assert_eq!(entry.button, "left");
        assert!(entry.redirect);
        assert_eq!(entry.logref, "42");
    }

    #[test]
    fn test_from_params_defaults() {
        let entry = LogEntry::from_params(None, None, None, None);

        assert_eq!(entry.url, "Unknown URL");
        assert_eq!(entry.button, "Unknown Button");
        assert!(!entry.redirect);
        assert_eq!(entry.logref, "0");
    }

    #[test]
    fn test_redirect_requires_literal_one() {
        let entry = LogEntry::from_params(None, None, Some("true".to_string()), None);
        assert!(!entry.redirect);

        let entry = LogEntry::from_params(None, None, Some("0".to_string()), None);
        assert!(!entry.redirect);
    }

    #[test]
    fn test_formatted_line() {
        let entry = LogEntry::from_params(
            Some("http://other.com/b".to_string()),
            Some("middle".to_string()),
            None,
            Some("7".to_string()),
        );
        let at = Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap();

        assert_eq!(
            entry.formatted(at),
            "[#7] [2026-03-14T09:26:53Z] http://other.com/b (button: middle)"
        );
    }
}
