//! Naive timestamp wire format.
//!
//! Descriptor documents carry local date-times without an offset,
//! rendered exactly as `YYYY-MM-DDTHH:MM:SS` to second granularity.
//! Load and dump share this module so a round-trip reproduces the input
//! string byte for byte.

use chrono::NaiveDateTime;

pub(crate) const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parse a timestamp in the fixed wire format.
pub fn parse(s: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(s, FORMAT)
}

/// Render a timestamp in the fixed wire format.
pub fn format(dt: &NaiveDateTime) -> String {
    dt.format(FORMAT).to_string()
}

/// serde adapter for `NaiveDateTime` fields, used via
/// `#[serde(serialize_with = "timestamp::serialize")]` on the dump side.
pub fn serialize<S>(dt: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&format(dt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_wire_format() {
        let dt = parse("2020-01-01T01:10:33").unwrap();
        assert_eq!(
            dt,
            NaiveDate::from_ymd_opt(2020, 1, 1)
                .unwrap()
                .and_hms_opt(1, 10, 33)
                .unwrap()
        );
    }

    #[test]
    fn test_format_round_trips() {
        let raw = "2020-01-01T01:10:33";
        assert_eq!(format(&parse(raw).unwrap()), raw);
    }

    #[test]
    fn test_rejects_offset() {
        assert!(parse("2020-01-01T01:10:33Z").is_err());
        assert!(parse("2020-01-01T01:10:33+02:00").is_err());
    }

    #[test]
    fn test_rejects_date_only() {
        assert!(parse("2020-01-01").is_err());
    }
}
