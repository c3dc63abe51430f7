use serde::{Deserialize, Deserializer};

// query strings come from browsers as-is, so "?page=abc" means the first page
// rather than a rejected request
pub fn parse_lenient_i64(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok()
}

// empty strings count as missing text
pub fn deserialize_non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|value| !value.is_empty()))
}
