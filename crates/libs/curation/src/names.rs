use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

/// Name pattern of the aliases used as rollover write targets.
pub const WRITE_ALIAS_PATTERN: &str = "*_hot";

/// Marker identifying write-oriented aliases, which retention never touches.
pub const WRITE_ALIAS_MARKER: &str = "hot";

const DATE_STAMP_FORMAT: &str = "%Y.%m.%d";

#[derive(Debug, Error, PartialEq, Eq)]
#[error("index name '{0}' has no rollover sequence suffix")]
pub struct MalformedIndexName(pub String);

/// Strips the store-generated sequence suffix from a rollover index name,
/// e.g. 'syslog-ng_hot-000002' -> 'syslog-ng_hot'.
pub fn rollover_base_name(index: &str) -> Result<&str, MalformedIndexName> {
    lazy_static! {
        static ref ROLLOVER_INDEX_NAME: Regex = Regex::new(r"^(.+)-\d+$").unwrap();
    }

    ROLLOVER_INDEX_NAME
        .captures(index)
        .and_then(|caps| caps.get(1))
        .map(|base| base.as_str())
        .ok_or_else(|| MalformedIndexName(index.to_string()))
}

/// Date-stamped search alias for `base`, e.g. 'syslog-ng_hot_2024.03.10'.
pub fn searchable_alias(base: &str, date: NaiveDate) -> String {
    format!("{}_{}", base, date.format(DATE_STAMP_FORMAT))
}

/// Calendar date embedded in an alias name, when there is one.
pub fn embedded_date(alias: &str) -> Option<NaiveDate> {
    lazy_static! {
        static ref DATE_STAMP: Regex =
            Regex::new(r"[12]\d{3}\.(?:0[1-9]|1[0-2])\.(?:0[1-9]|[12]\d|3[01])").unwrap();
    }

    DATE_STAMP
        .find(alias)
        .and_then(|stamp| NaiveDate::parse_from_str(stamp.as_str(), DATE_STAMP_FORMAT).ok())
}

pub fn is_write_alias(alias: &str) -> bool {
    alias.contains(WRITE_ALIAS_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_strip_the_sequence_suffix() {
        assert_eq!(rollover_base_name("logs_hot-000002").unwrap(), "logs_hot");
        assert_eq!(rollover_base_name("app-000001").unwrap(), "app");
    }

    #[test]
    fn should_keep_internal_digits_and_hyphens() {
        assert_eq!(
            rollover_base_name("app-2021-000001").unwrap(),
            "app-2021"
        );
        assert_eq!(
            rollover_base_name("syslog-ng_hot-1").unwrap(),
            "syslog-ng_hot"
        );
    }

    #[test]
    fn should_reject_a_name_without_a_sequence_suffix() {
        let err = rollover_base_name("plain_index").unwrap_err();
        assert_eq!(err, MalformedIndexName("plain_index".to_string()));

        assert!(rollover_base_name("app-000001extra").is_err());
    }

    #[test]
    fn should_compose_the_searchable_alias() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        assert_eq!(searchable_alias("app", date), "app_2025.06.15");
    }

    #[test]
    fn should_extract_an_embedded_date() {
        assert_eq!(
            embedded_date("syslog-ng_app_2024.03.01"),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
        assert_eq!(
            embedded_date("other_2019.12.31_archive"),
            NaiveDate::from_ymd_opt(2019, 12, 31)
        );
    }

    #[test]
    fn should_ignore_names_without_a_calendar_date() {
        assert_eq!(embedded_date("syslog-ng_hot"), None);
        // month 13 and day 32 are not dates
        assert_eq!(embedded_date("app_2024.13.01"), None);
        assert_eq!(embedded_date("app_2024.01.32"), None);
    }

    #[test]
    fn should_recognize_write_aliases() {
        assert!(is_write_alias("syslog-ng_hot"));
        assert!(!is_write_alias("syslog-ng_2024.03.01"));
    }
}
