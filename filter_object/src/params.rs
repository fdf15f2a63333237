//! Request parameter codec
//!
//! Decodes already-split query parameters into typed filter fields and
//! encodes them back. Encoding then decoding reproduces every supported
//! value exactly.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

use crate::errors::ParamError;

/// Query parameters keyed by name, each with every value it was given
pub type ParamMap = HashMap<String, Vec<String>>;

/// A field type that can be read from and written to request parameters
pub trait ParamValue: Sized {
    /// Decode the values given for `param`
    ///
    /// `Ok(None)` leaves the field at its default value.
    fn decode_param(param: &str, values: &[String]) -> Result<Option<Self>, ParamError>;

    /// Encode the field; an empty vector omits the key
    fn encode_param(&self) -> Vec<String>;
}

/// Insert encoded values, skipping empty encodings
pub fn insert_param(params: &mut ParamMap, param: &str, values: Vec<String>) {
    if !values.is_empty() {
        params.insert(param.to_string(), values);
    }
}

/// Text form of a single value
trait ParamText: Sized {
    const EXPECTED: &'static str;

    fn parse_text(text: &str) -> Option<Self>;

    fn format_text(&self) -> String;
}

impl ParamText for String {
    const EXPECTED: &'static str = "a string";

    fn parse_text(text: &str) -> Option<Self> {
        Some(text.to_string())
    }

    fn format_text(&self) -> String {
        self.clone()
    }
}

macro_rules! numeric_text {
    ($($t:ty => $expected:literal),+ $(,)?) => {
        $(impl ParamText for $t {
            const EXPECTED: &'static str = $expected;

            fn parse_text(text: &str) -> Option<Self> {
                text.parse().ok()
            }

            // Display is the shortest text that parses back to the same value
            fn format_text(&self) -> String {
                self.to_string()
            }
        })+
    };
}

numeric_text!(
    i32 => "a 32-bit integer",
    i64 => "a 64-bit integer",
    f32 => "a number",
    f64 => "a number",
);

impl ParamText for bool {
    const EXPECTED: &'static str = "a boolean";

    fn parse_text(text: &str) -> Option<Self> {
        match text {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
            "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
            _ => None,
        }
    }

    fn format_text(&self) -> String {
        self.to_string()
    }
}

impl ParamText for DateTime<Utc> {
    const EXPECTED: &'static str = "a timestamp";

    fn parse_text(text: &str) -> Option<Self> {
        parse_timestamp(text)
    }

    fn format_text(&self) -> String {
        self.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }
}

/// Parse a timestamp in any of the accepted textual formats
///
/// Naive forms are read as UTC; a trailing zone abbreviation after an
/// explicit offset is ignored.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    const NAIVE_FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.3fZ",
        "%Y-%m-%d %H:%M:%S%.3fZ",
    ];
    const OFFSET_FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S%:z",
        "%Y-%m-%dT%H:%M:%S%:z",
        "%Y-%m-%d %H:%M:%S %:z",
        "%Y-%m-%dT%H:%M:%S %:z",
    ];

    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }

    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt.and_utc());
        }
    }

    let parse_with_offset = |text: &str| {
        OFFSET_FORMATS
            .iter()
            .find_map(|format| DateTime::parse_from_str(text, format).ok())
            .map(|dt| dt.with_timezone(&Utc))
    };

    if let Some(dt) = parse_with_offset(value) {
        return Some(dt);
    }

    // "-07:00 MST" and "-07:00MST"
    let without_zone = value.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    if without_zone.len() != value.len() {
        return parse_with_offset(without_zone.trim_end());
    }

    None
}

impl ParamValue for String {
    fn decode_param(_param: &str, values: &[String]) -> Result<Option<Self>, ParamError> {
        Ok(values.first().cloned())
    }

    fn encode_param(&self) -> Vec<String> {
        vec![self.clone()]
    }
}

macro_rules! primitive_param {
    ($($t:ty),+ $(,)?) => {
        $(impl ParamValue for $t {
            fn decode_param(param: &str, values: &[String]) -> Result<Option<Self>, ParamError> {
                match values.first() {
                    None => Ok(None),
                    Some(text) if text.is_empty() => Ok(None),
                    Some(text) => <$t as ParamText>::parse_text(text)
                        .map(Some)
                        .ok_or_else(|| ParamError::invalid(param, text, <$t as ParamText>::EXPECTED)),
                }
            }

            fn encode_param(&self) -> Vec<String> {
                vec![self.format_text()]
            }
        })+
    };
}

primitive_param!(i32, i64, f32, f64, bool);

impl ParamValue for DateTime<Utc> {
    fn decode_param(param: &str, values: &[String]) -> Result<Option<Self>, ParamError> {
        match values.first() {
            None => Ok(None),
            Some(text) if text.is_empty() => Ok(None),
            Some(text) => parse_timestamp(text)
                .map(Some)
                .ok_or_else(|| ParamError::invalid(param, text, Self::EXPECTED)),
        }
    }

    fn encode_param(&self) -> Vec<String> {
        if *self == DateTime::<Utc>::default() {
            Vec::new()
        } else {
            vec![self.format_text()]
        }
    }
}

macro_rules! nullable_param {
    ($($t:ty),+ $(,)?) => {
        $(impl ParamValue for Option<$t> {
            // Unparseable input means "unset", never an error
            fn decode_param(_param: &str, values: &[String]) -> Result<Option<Self>, ParamError> {
                Ok(values.first().and_then(|text| <$t as ParamText>::parse_text(text)).map(Some))
            }

            fn encode_param(&self) -> Vec<String> {
                self.iter().map(ParamText::format_text).collect()
            }
        })+
    };
}

nullable_param!(String, i32, i64, f64, bool, DateTime<Utc>);

macro_rules! multi_param {
    ($($t:ty),+ $(,)?) => {
        $(impl ParamValue for Vec<$t> {
            fn decode_param(param: &str, values: &[String]) -> Result<Option<Self>, ParamError> {
                if values.is_empty() {
                    return Ok(None);
                }
                values
                    .iter()
                    .map(|text| {
                        <$t as ParamText>::parse_text(text)
                            .ok_or_else(|| ParamError::invalid(param, text, <$t as ParamText>::EXPECTED))
                    })
                    .collect::<Result<Vec<_>, _>>()
                    .map(Some)
            }

            fn encode_param(&self) -> Vec<String> {
                self.iter().map(ParamText::format_text).collect()
            }
        })+
    };
}

multi_param!(String, i32, i64, f32, f64);
