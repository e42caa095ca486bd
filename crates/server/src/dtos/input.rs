//! Lenient field types shared by the request bodies.
//!
//! Browsers post every field as a string while API clients send JSON numbers,
//! so numeric fields accept both and blank strings count as "not provided".

use crate::error::ApiError;
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use utoipa::ToSchema;

/// A JSON number or a numeric string
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum Numeric {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Numeric {
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(text) if text.trim().is_empty())
    }

    pub fn to_i32(&self, field: &str) -> Result<i32, ApiError> {
        let parsed = match self {
            Self::Integer(n) => i32::try_from(*n).ok(),
            Self::Float(f)
                if f.fract() == 0.0 && *f >= i32::MIN as f64 && *f <= i32::MAX as f64 =>
            {
                Some(*f as i32)
            }
            Self::Float(_) => None,
            Self::Text(text) => text.trim().parse().ok(),
        };

        parsed.ok_or_else(|| ApiError::Validation(format!("{field} must be an integer")))
    }
}

/// Drops empty strings, which forms submit for untouched inputs
pub fn provided(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Drops blank numeric strings
pub fn provided_number(value: Option<Numeric>) -> Option<Numeric> {
    value.filter(|v| !v.is_blank())
}

/// Parses an optional number, treating a blank value as absent
pub fn optional_i32(value: Option<Numeric>, field: &str) -> Result<Option<i32>, ApiError> {
    provided_number(value)
        .map(|n| n.to_i32(field))
        .transpose()
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp (the date part is kept)
pub fn parse_date(value: &str, field: &str) -> Result<NaiveDate, ApiError> {
    let value = value.trim();

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|dt| dt.date_naive()))
        .map_err(|_| ApiError::Validation(format!("Invalid {field}")))
}

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`)
pub fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod test {
    use super::{Numeric, double_option, optional_i32, parse_date};
    use chrono::NaiveDate;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Body {
        #[serde(default, deserialize_with = "double_option")]
        grade: Option<Option<String>>,
        id: Option<Numeric>,
    }

    #[test]
    fn test_numeric_accepts_numbers_and_strings() {
        let body: Body = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        assert_eq!(body.id.unwrap().to_i32("id").unwrap(), 7);

        let body: Body = serde_json::from_str(r#"{"id": " 12 "}"#).unwrap();
        assert_eq!(body.id.unwrap().to_i32("id").unwrap(), 12);

        let body: Body = serde_json::from_str(r#"{"id": 3.0}"#).unwrap();
        assert_eq!(body.id.unwrap().to_i32("id").unwrap(), 3);
    }

    #[test]
    fn test_numeric_rejects_garbage() {
        let err = Numeric::Text("abc".into()).to_i32("credit").unwrap_err();
        assert_eq!(err.to_string(), "credit must be an integer");

        assert!(Numeric::Float(2.5).to_i32("credit").is_err());
        assert!(Numeric::Integer(i64::MAX).to_i32("credit").is_err());
    }

    #[test]
    fn test_blank_number_is_absent() {
        assert_eq!(optional_i32(Some(Numeric::Text("".into())), "id").unwrap(), None);
        assert_eq!(optional_i32(None, "id").unwrap(), None);
        assert_eq!(optional_i32(Some(Numeric::Integer(0)), "id").unwrap(), Some(0));
    }

    #[test]
    fn test_double_option_distinguishes_null_from_absent() {
        let absent: Body = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.grade, None);

        let null: Body = serde_json::from_str(r#"{"grade": null}"#).unwrap();
        assert_eq!(null.grade, Some(None));

        let set: Body = serde_json::from_str(r#"{"grade": "A"}"#).unwrap();
        assert_eq!(set.grade, Some(Some("A".to_string())));
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        assert_eq!(parse_date("2000-01-01", "dob").unwrap(), expected);
        assert_eq!(
            parse_date("2000-01-01T00:00:00.000Z", "dob").unwrap(),
            expected
        );
        assert!(parse_date("01/01/2000", "dob").is_err());
    }
}
