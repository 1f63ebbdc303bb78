use serde::{Deserialize, Serialize};

/// Raw `value` of a listing stat as it comes from the item data sources.
///
/// Variant order matters for deserialization: integers are tried before
/// floats, so `163` lands in `Integer` and `163.7` in `Float`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Other(serde_json::Value),
}

/// A single entry of a listing's stats array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingStat {
    pub code: String,
    #[serde(default)]
    pub value: Option<StatValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_text: Option<String>,
    #[serde(default)]
    pub is_variable: bool,
}

/// Parses the JSON-encoded stats array stored on a listing.
/// A blank payload is an empty stat list.
pub fn parse_stats(raw: &str) -> Result<Vec<ListingStat>, serde_json::Error> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw)
}

/// Converts a stat value into a comparable integer.
///
/// Floats are truncated toward zero, strings yield their first signed
/// integer (`"+163% Enhanced Defense"` is 163), anything else has no value.
pub fn extract_numeric_value(raw: Option<&StatValue>) -> Option<i64> {
    match raw? {
        StatValue::Integer(n) => Some(*n),
        StatValue::Float(f) if f.is_finite() => Some(f.trunc() as i64),
        StatValue::Float(_) => None,
        StatValue::Text(text) => first_signed_integer(text),
        StatValue::Other(_) => None,
    }
}

/// Leftmost match of `[+-]?\d+`. Out-of-range numbers have no value.
fn first_signed_integer(text: &str) -> Option<i64> {
    let bytes = text.as_bytes();

    for (i, &b) in bytes.iter().enumerate() {
        let digits_start = if b.is_ascii_digit() {
            i
        } else if (b == b'+' || b == b'-') && bytes.get(i + 1).is_some_and(u8::is_ascii_digit) {
            i + 1
        } else {
            continue;
        };

        let end = bytes[digits_start..]
            .iter()
            .position(|c| !c.is_ascii_digit())
            .map_or(bytes.len(), |offset| digits_start + offset);

        return text[i..end].parse::<i64>().ok();
    }

    None
}
