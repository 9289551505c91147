//! Serde helpers for calendar dates on the wire.
//!
//! The API may send a date either as `YYYY-MM-DD` or as a full RFC 3339
//! date-time such as `2024-01-15T00:00:00.000Z`. A date-time is reduced to its
//! calendar date in its own offset. Dates are always sent as `YYYY-MM-DD`.

use serde::{Deserialize, Deserializer, Serializer};
use time::{Date, OffsetDateTime, format_description::well_known::Rfc3339, macros::format_description};

use crate::Error;

const DATE_FORMAT: &[time::format_description::BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Parse a date in either the `YYYY-MM-DD` or RFC 3339 format.
///
/// # Errors
///
/// Returns [Error::InvalidDate] if `text` is in neither format.
pub(crate) fn parse_date(text: &str) -> Result<Date, Error> {
    let text = text.trim();

    Date::parse(text, DATE_FORMAT)
        .or_else(|_| OffsetDateTime::parse(text, &Rfc3339).map(|date_time| date_time.date()))
        .map_err(|_| Error::InvalidDate(text.to_owned()))
}

/// Format a date as `YYYY-MM-DD`.
pub(crate) fn format_date(date: Date) -> String {
    // The format only has numeric components, so formatting cannot fail.
    date.format(DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

pub(crate) fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_date(*date))
}

pub(crate) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
    let text = String::deserialize(deserializer)?;

    parse_date(&text).map_err(serde::de::Error::custom)
}

pub(crate) mod option {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Date;

    pub(crate) fn serialize<S: Serializer>(
        date: &Option<Date>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => super::serialize(date, serializer),
            None => serializer.serialize_none(),
        }
    }

    /// Empty strings are treated as a missing date.
    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Date>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(text) if !text.trim().is_empty() => super::parse_date(&text)
                .map(Some)
                .map_err(serde::de::Error::custom),
            _ => Ok(None),
        }
    }
}
