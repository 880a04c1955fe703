use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Why a field of a raw record could not be decoded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("missing column '{0}'")]
    MissingColumn(String),

    #[error("field '{field}': '{value}' is not a numeric amount")]
    Amount { field: String, value: String },

    #[error("field '{field}': '{value}' is not a number")]
    Number { field: String, value: String },

    #[error("field '{field}': '{value}' is not a {format} date")]
    Date {
        field: String,
        value: String,
        format: &'static str,
    },
}

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One raw tabular record: a mapping from column name to string value, as
/// read from a header-labeled export file.
///
/// Decoding is pure and side-effect-free; every accessor either returns
/// the typed value or a [`DecodeError`] naming the offending field.
#[derive(Debug, Clone)]
pub struct RawRecord {
    values: HashMap<String, String>,
}

impl RawRecord {
    pub fn new(headers: &csv::StringRecord, record: &csv::StringRecord) -> Self {
        let values = headers
            .iter()
            .map(str::to_owned)
            .zip(record.iter().map(str::to_owned))
            .collect();
        Self { values }
    }

    #[cfg(test)]
    pub(crate) fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let values = pairs
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect();
        Self { values }
    }

    pub fn text(&self, field: &str) -> Result<&str, DecodeError> {
        self.values
            .get(field)
            .map(String::as_str)
            .ok_or_else(|| DecodeError::MissingColumn(field.to_owned()))
    }

    pub fn decimal(&self, field: &str) -> Result<Decimal, DecodeError> {
        let value = self.text(field)?;
        value.trim().parse().map_err(|_| DecodeError::Amount {
            field: field.to_owned(),
            value: value.to_owned(),
        })
    }

    pub fn int(&self, field: &str) -> Result<i32, DecodeError> {
        let value = self.text(field)?;
        value.trim().parse().map_err(|_| DecodeError::Number {
            field: field.to_owned(),
            value: value.to_owned(),
        })
    }

    pub fn date(&self, field: &str) -> Result<NaiveDate, DecodeError> {
        let value = self.text(field)?;
        NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| DecodeError::Date {
            field: field.to_owned(),
            value: value.to_owned(),
            format: DATE_FORMAT,
        })
    }

    /// Legacy exports write booleans inconsistently; only the known true
    /// tokens count, and every other token reads as false.
    pub fn flag(&self, field: &str) -> Result<bool, DecodeError> {
        Ok(matches!(self.text(field)?, "true" | "True" | "1"))
    }

    /// An empty value means "absent", not "empty string".
    pub fn optional_text(&self, field: &str) -> Result<Option<&str>, DecodeError> {
        let value = self.text(field)?;
        Ok(if value.is_empty() { None } else { Some(value) })
    }

    pub fn optional_int(&self, field: &str) -> Result<Option<i64>, DecodeError> {
        match self.optional_text(field)? {
            None => Ok(None),
            Some(value) => value.trim().parse().map(Some).map_err(|_| DecodeError::Number {
                field: field.to_owned(),
                value: value.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_typed_fields() {
        let record = RawRecord::from_pairs(&[
            ("HAMOUNT", "-150.00"),
            ("HDOCDATE", "2024-01-15"),
            ("HMATCHNO", "7"),
            ("HYEAR", "2024"),
        ]);
        assert_eq!(record.decimal("HAMOUNT").unwrap(), Decimal::new(-15000, 2));
        assert_eq!(
            record.date("HDOCDATE").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
        assert_eq!(record.optional_int("HMATCHNO").unwrap(), Some(7));
        assert_eq!(record.int("HYEAR").unwrap(), 2024);
    }

    #[test]
    fn missing_column_names_the_field() {
        let record = RawRecord::from_pairs(&[("CID", "C001")]);
        assert_eq!(
            record.text("CNAME1"),
            Err(DecodeError::MissingColumn("CNAME1".to_owned()))
        );
    }

    #[test]
    fn bad_amount_names_field_and_value() {
        let record = RawRecord::from_pairs(&[("HAMOUNT", "12,50")]);
        assert_eq!(
            record.decimal("HAMOUNT"),
            Err(DecodeError::Amount {
                field: "HAMOUNT".to_owned(),
                value: "12,50".to_owned(),
            })
        );
    }

    #[test]
    fn bad_date_is_an_error() {
        let record = RawRecord::from_pairs(&[("HDOCDATE", "15/01/2024")]);
        assert!(matches!(
            record.date("HDOCDATE"),
            Err(DecodeError::Date { .. })
        ));
    }

    #[test]
    fn boolean_tokens_default_to_false() {
        for (token, expected) in [
            ("true", true),
            ("True", true),
            ("1", true),
            ("TRUE", false),
            ("yes", false),
            ("0", false),
            ("", false),
            ("garbage", false),
        ] {
            let record = RawRecord::from_pairs(&[("AISTITLE", token)]);
            assert_eq!(record.flag("AISTITLE").unwrap(), expected, "token {token:?}");
        }
    }

    #[test]
    fn empty_optional_fields_are_absent() {
        let record = RawRecord::from_pairs(&[("HCUSSUP", ""), ("HMATCHNO", "")]);
        assert_eq!(record.optional_text("HCUSSUP").unwrap(), None);
        assert_eq!(record.optional_int("HMATCHNO").unwrap(), None);
    }

    #[test]
    fn non_numeric_match_number_is_an_error() {
        let record = RawRecord::from_pairs(&[("HMATCHNO", "x7")]);
        assert!(matches!(
            record.optional_int("HMATCHNO"),
            Err(DecodeError::Number { .. })
        ));
    }
}
