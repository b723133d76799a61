//! Timestamp handling for Backlog payloads.
//!
//! Backlog emits instants as RFC 3339 UTC strings
//! (`2006-01-02T15:04:05Z`); a handful of legacy fields arrive as a
//! numeric Unix epoch instead, and absent instants show up as `null` or
//! the empty string.

use std::fmt;

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

/// An absolute instant, serialized as RFC 3339 UTC with a trailing `Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub DateTime<Utc>);

impl Timestamp {
    /// Render as RFC 3339 at second precision, e.g. `2006-01-02T15:04:05Z`.
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// Parse an RFC 3339 string.
    pub fn parse(s: &str) -> Result<Self, chrono::ParseError> {
        DateTime::parse_from_rfc3339(s).map(|dt| Timestamp(dt.with_timezone(&Utc)))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Timestamp(dt)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_rfc3339())
    }
}

struct TimestampVisitor;

impl Visitor<'_> for TimestampVisitor {
    type Value = Timestamp;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an RFC 3339 timestamp string or a Unix epoch number")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Timestamp, E> {
        Timestamp::parse(v).map_err(|e| E::custom(format!("invalid timestamp {v:?}: {e}")))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Timestamp, E> {
        Utc.timestamp_opt(v, 0)
            .single()
            .map(Timestamp)
            .ok_or_else(|| E::custom(format!("epoch {v} out of range")))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Timestamp, E> {
        let v = i64::try_from(v).map_err(|_| E::custom(format!("epoch {v} out of range")))?;
        self.visit_i64(v)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TimestampVisitor)
    }
}

/// Serde helper for `Option<Timestamp>` fields: `null` and `""` decode
/// as absent, any other malformed string is a decode error.
///
/// ```rust,ignore
/// #[serde(default, with = "backlog_client::time::option")]
/// created: Option<Timestamp>,
/// ```
pub mod option {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<Timestamp>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(ts) => serializer.serialize_str(&ts.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Timestamp>, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Null,
            Str(String),
            Num(i64),
        }

        match Option::<Raw>::deserialize(deserializer)? {
            None | Some(Raw::Null) => Ok(None),
            Some(Raw::Str(s)) if s.is_empty() => Ok(None),
            Some(Raw::Str(s)) => Timestamp::parse(&s)
                .map(Some)
                .map_err(|e| de::Error::custom(format!("invalid timestamp {s:?}: {e}"))),
            Some(Raw::Num(n)) => Utc
                .timestamp_opt(n, 0)
                .single()
                .map(|dt| Some(Timestamp(dt)))
                .ok_or_else(|| de::Error::custom(format!("epoch {n} out of range"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    struct Record {
        #[serde(default, with = "option")]
        created: Option<Timestamp>,
    }

    #[test]
    fn test_round_trip_rfc3339() {
        let ts: Timestamp = serde_json::from_str(r#""2006-01-02T15:04:05Z""#).unwrap();
        assert_eq!(serde_json::to_string(&ts).unwrap(), r#""2006-01-02T15:04:05Z""#);
    }

    #[test]
    fn test_parse_offset_normalizes_to_utc() {
        let ts: Timestamp = serde_json::from_str(r#""2006-01-02T15:04:05+09:00""#).unwrap();
        assert_eq!(ts.to_rfc3339(), "2006-01-02T06:04:05Z");
    }

    #[test]
    fn test_numeric_epoch_form() {
        let ts: Timestamp = serde_json::from_str("1136214245").unwrap();
        assert_eq!(ts.to_rfc3339(), "2006-01-02T15:04:05Z");
    }

    #[test]
    fn test_malformed_string_is_a_decode_error() {
        let err = serde_json::from_str::<Timestamp>(r#""not a date""#).unwrap_err();
        assert!(err.to_string().contains("invalid timestamp"));
    }

    #[test]
    fn test_option_null_and_empty_are_absent() {
        let rec: Record = serde_json::from_str(r#"{"created":null}"#).unwrap();
        assert!(rec.created.is_none());

        let rec: Record = serde_json::from_str(r#"{"created":""}"#).unwrap();
        assert!(rec.created.is_none());

        let rec: Record = serde_json::from_str("{}").unwrap();
        assert!(rec.created.is_none());
    }

    #[test]
    fn test_option_present() {
        let rec: Record = serde_json::from_str(r#"{"created":"2006-01-02T15:04:05Z"}"#).unwrap();
        assert_eq!(rec.created.unwrap().to_rfc3339(), "2006-01-02T15:04:05Z");
    }

    #[test]
    fn test_option_malformed_is_a_decode_error() {
        assert!(serde_json::from_str::<Record>(r#"{"created":"yesterday"}"#).is_err());
    }
}
