//! Business date handling
//!
//! The backend stores full timestamps but list rows and forms work with plain
//! ISO dates. Incoming values may be either; both are normalized to the date
//! part as written on the wire.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parse `YYYY-MM-DD`, an RFC 3339 timestamp, or a naive `YYYY-MM-DDTHH:MM:SS`
pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|dt| dt.date())
        .map_err(|_| format!("Invalid date format: {raw}"))
}

/// ISO date string used at the UI boundary
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Serde adapter: accepts dates or timestamps, writes `YYYY-MM-DD`
pub mod iso_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_date(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_date(&raw).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct Row {
        #[serde(with = "iso_date")]
        fecha: NaiveDate,
    }

    fn jan_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_parse_variants() {
        assert_eq!(parse_date("2024-01-01").unwrap(), jan_first());
        assert_eq!(parse_date("2024-01-01T00:00:00.000Z").unwrap(), jan_first());
        assert_eq!(parse_date("2024-01-01T21:30:00-03:00").unwrap(), jan_first());
        assert_eq!(parse_date("2024-01-01T10:00:00").unwrap(), jan_first());
        assert!(parse_date("01/01/2024").is_err());
    }

    #[test]
    fn test_serde_round_trip_normalizes() {
        let row: Row = serde_json::from_str(r#"{"fecha":"2024-01-01T03:00:00.000Z"}"#).unwrap();
        assert_eq!(row.fecha, jan_first());
        assert_eq!(serde_json::to_string(&row).unwrap(), r#"{"fecha":"2024-01-01"}"#);
    }
}
