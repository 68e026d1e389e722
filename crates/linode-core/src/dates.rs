//! Provider timestamp normalization.
//!
//! Linode sends timestamps as `2018-01-02T03:04:05`: no zone designator, implicitly UTC.
//! Entities keep that wire string alongside the parsed instant; [`NormalizeDates`] derives the
//! instant from the string after every decode.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};

use crate::error::{Error, Result};

/// `strftime` layout of provider timestamps.
pub const DATE_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S";

/// Entities whose temporal fields are derived from wire strings.
pub trait NormalizeDates {
    /// Re-derive every parsed timestamp from its wire string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTimestamp`] when a non-empty string does not match
    /// [`DATE_LAYOUT`].
    fn normalize_dates(&mut self) -> Result<()>;
}

impl<T: NormalizeDates> NormalizeDates for Vec<T> {
    fn normalize_dates(&mut self) -> Result<()> {
        self.iter_mut().try_for_each(NormalizeDates::normalize_dates)
    }
}

impl<T: NormalizeDates> NormalizeDates for Option<T> {
    fn normalize_dates(&mut self) -> Result<()> {
        match self {
            Some(inner) => inner.normalize_dates(),
            None => Ok(()),
        }
    }
}

/// Parse a provider timestamp.
///
/// An empty string means the field is absent and yields `Ok(None)`.
///
/// # Errors
///
/// Returns [`Error::InvalidTimestamp`] if the string is non-empty and does not match
/// [`DATE_LAYOUT`].
pub fn parse_date(value: &str) -> Result<Option<DateTime<Utc>>> {
    if value.is_empty() {
        return Ok(None);
    }

    NaiveDateTime::parse_from_str(value, DATE_LAYOUT)
        .map(|naive| Some(Utc.from_utc_datetime(&naive)))
        .map_err(|err| Error::InvalidTimestamp(format!("`{value}`: {err}")))
}

/// Parse several provider timestamps, stopping at the first malformed one.
///
/// # Errors
///
/// Returns [`Error::InvalidTimestamp`] for the first malformed string.
pub fn parse_dates(values: &[&str]) -> Result<Vec<Option<DateTime<Utc>>>> {
    values.iter().map(|value| parse_date(value)).collect()
}

/// Format an instant in the provider layout.
#[must_use]
pub fn format_date(value: &DateTime<Utc>) -> String {
    value.format(DATE_LAYOUT).to_string()
}

/// Deserialize a string field that the provider may send as `null`.
///
/// # Errors
///
/// Propagates the deserializer error when the value is neither a string nor `null`.
pub fn nullable_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parse_valid_timestamp() {
        let parsed = parse_date("2018-01-02T03:04:05").unwrap().unwrap();
        assert_eq!(parsed.year(), 2018);
        assert_eq!(parsed.month(), 1);
        assert_eq!(parsed.day(), 2);
        assert_eq!(parsed.hour(), 3);
        assert_eq!(parsed.minute(), 4);
        assert_eq!(parsed.second(), 5);
        assert_eq!(parsed.timezone(), Utc);
    }

    #[test]
    fn empty_string_is_absent() {
        assert_eq!(parse_date("").unwrap(), None);
    }

    #[test]
    fn malformed_timestamp_is_error() {
        let err = parse_date("2018-01-02T03:04:05Z").unwrap_err();
        assert!(matches!(err, Error::InvalidTimestamp(_)));

        let err = parse_date("yesterday").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_TIMESTAMP");
    }

    #[test]
    fn rfc3339_is_not_the_provider_layout() {
        assert!(parse_date("2018-01-02T03:04:05+00:00").is_err());
    }

    #[test]
    fn normalize_then_format_round_trips() {
        for wire in [
            "2018-01-02T03:04:05",
            "1999-12-31T23:59:59",
            "2024-02-29T00:00:00",
        ] {
            let parsed = parse_date(wire).unwrap().unwrap();
            assert_eq!(format_date(&parsed), wire);
        }
    }

    #[test]
    fn format_pads_to_canonical_form() {
        let parsed = parse_date("2018-1-2T3:04:05").unwrap().unwrap();
        assert_eq!(format_date(&parsed), "2018-01-02T03:04:05");
    }

    #[test]
    fn parse_many_stops_on_error() {
        let parsed = parse_dates(&["2018-01-02T03:04:05", ""]).unwrap();
        assert!(parsed[0].is_some());
        assert!(parsed[1].is_none());

        assert!(parse_dates(&["", "nope"]).is_err());
        assert!(parse_dates(&[]).unwrap().is_empty());
    }

    #[test]
    fn nullable_string_maps_null_to_empty() {
        #[derive(Deserialize)]
        struct Wire {
            #[serde(default, deserialize_with = "nullable_string")]
            created: String,
        }

        let wire: Wire = serde_json::from_str(r#"{"created": null}"#).unwrap();
        assert!(wire.created.is_empty());
        let wire: Wire = serde_json::from_str("{}").unwrap();
        assert!(wire.created.is_empty());
        let wire: Wire = serde_json::from_str(r#"{"created": "2018-01-02T03:04:05"}"#).unwrap();
        assert_eq!(wire.created, "2018-01-02T03:04:05");
    }
}
