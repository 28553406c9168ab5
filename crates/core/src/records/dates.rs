//! Date and timestamp encodings used by the backend.
//!
//! Record dates come back as RFC 3339 strings, with the zero time
//! `0001-01-01T00:00:00Z` standing for "not set". Request bodies send plain
//! `YYYY-MM-DD` dates or an empty string. Job timestamps use
//! `YYYY-MM-DD HH:MM:SS` and an empty string while unset.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};
use tracing::warn;

/// Zero time the backend emits for dates that were never set.
pub const UNSET_DATE_SENTINEL: &str = "0001-01-01T00:00:00Z";

/// Layout of job timestamps.
pub const JOB_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Layout of request dates.
pub const REQUEST_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a record date, mapping the unset sentinel (and blanks) to `None`.
pub fn parse_backend_date(raw: &str) -> Result<Option<DateTime<Utc>>, chrono::ParseError> {
    let raw = raw.trim();
    if raw.is_empty() || raw == UNSET_DATE_SENTINEL {
        return Ok(None);
    }

    let parsed = DateTime::parse_from_rfc3339(raw)?.with_timezone(&Utc);
    // Zero time serialized with an explicit offset
    if parsed.year() == 1 && parsed.ordinal() == 1 {
        return Ok(None);
    }
    Ok(Some(parsed))
}

/// Parse a job timestamp, mapping blanks to `None`.
pub fn parse_job_timestamp(raw: &str) -> Result<Option<NaiveDateTime>, chrono::ParseError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDateTime::parse_from_str(raw, JOB_TIMESTAMP_FORMAT).map(Some)
}

/// Treat an explicit `null` as the type's default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// serde adapter for record date fields.
pub mod backend_date {
    use super::*;

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.serialize_str(&date.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)),
            None => serializer.serialize_str(UNSET_DATE_SENTINEL),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        let Some(raw) = raw else {
            return Ok(None);
        };
        // An unreadable date must not fail the whole record list
        Ok(parse_backend_date(&raw).unwrap_or_else(|e| {
            warn!("Ignoring unreadable record date '{}': {}", raw, e);
            None
        }))
    }
}

/// serde adapter for request body dates (`""` when unset).
pub mod request_date {
    use super::*;

    pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.serialize_str(&date.format(REQUEST_DATE_FORMAT).to_string()),
            None => serializer.serialize_str(""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn test_sentinel_is_unset() {
        assert_eq!(parse_backend_date(UNSET_DATE_SENTINEL).unwrap(), None);
        assert_eq!(parse_backend_date("0001-01-01T00:00:00+00:00").unwrap(), None);
        assert_eq!(parse_backend_date("").unwrap(), None);
    }

    #[test]
    fn test_real_date_parses() {
        let date = parse_backend_date("2023-10-20T00:00:00Z").unwrap().unwrap();
        assert_eq!(date, Utc.with_ymd_and_hms(2023, 10, 20, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_garbage_date_fails() {
        assert!(parse_backend_date("October 20").is_err());
    }

    #[test]
    fn test_unreadable_record_date_is_unset() {
        let value = serde_json::json!("20/10/2023");
        let parsed = backend_date::deserialize(value).unwrap();
        assert_eq!(parsed, None);
    }

    #[test]
    fn test_job_timestamp() {
        let ts = parse_job_timestamp("2024-01-02 03:04:05").unwrap().unwrap();
        assert_eq!(ts.hour(), 3);
        assert_eq!(ts.second(), 5);
        assert_eq!(parse_job_timestamp("").unwrap(), None);
        assert!(parse_job_timestamp("2024-01-02T03:04:05Z").is_err());
    }
}
