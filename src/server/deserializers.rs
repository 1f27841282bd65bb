use serde::de::{Error, Unexpected};
use serde::{Deserialize, Deserializer};

// the quiz client sends ids and scores both as numbers and as strings from <select> values
#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrString {
    Int(i64),
    Str(String),
}

/// Accepts an integer, a numeric string, `""` or `null`. Empty inputs become `None`.
pub fn deserialize_optional_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<IntOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(IntOrString::Int(value)) => Ok(Some(value)),
        Some(IntOrString::Str(value)) if value.trim().is_empty() => Ok(None),
        Some(IntOrString::Str(value)) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| D::Error::invalid_value(Unexpected::Str(&value), &"an integer")),
    }
}

/// Same as [`deserialize_optional_int`] but the value has to be there.
pub fn deserialize_int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_optional_int(deserializer)?.ok_or_else(|| D::Error::custom("expected an integer"))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Str(String),
    Int(i64),
    Float(f64),
}

/// Search terms typed into a numeric-looking field arrive as JSON numbers.
pub fn deserialize_search_term<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::Str(value) => value,
        StringOrNumber::Int(value) => value.to_string(),
        StringOrNumber::Float(value) => value.to_string(),
    })
}

// `?page=abc` used to silently show the first page, keep it that way
pub fn deserialize_lenient_page<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .unwrap_or(1))
}

pub fn first_page() -> i64 {
    1
}
