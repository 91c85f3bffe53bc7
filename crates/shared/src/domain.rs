use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

/// Project cost exactly as it appears in the dataset.
///
/// The catalogue mixes JSON numbers and numeric strings, so the raw form is
/// kept and only interpreted when a numeric value is needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cost {
    Number(Number),
    Text(String),
    Other(Value),
}

impl Cost {
    /// Numeric value of the cost, if it has one.
    pub fn amount(&self) -> Option<f64> {
        match self {
            Cost::Number(number) => number.as_f64(),
            Cost::Text(text) => parse_leading_float(text),
            Cost::Other(_) => None,
        }
    }
}

impl From<u64> for Cost {
    fn from(value: u64) -> Self {
        Cost::Number(value.into())
    }
}

impl From<&str> for Cost {
    fn from(value: &str) -> Self {
        Cost::Text(value.to_string())
    }
}

/// One catalogue entry.
///
/// Decoding never rejects a record for a field's type. A null or non-string
/// `title` or `category` is read as text; a non-string `pdfUrl` is no link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub category: String,
    /// `None` only when the field is missing; `null` is `Cost::Other`.
    #[serde(
        default,
        deserialize_with = "present_cost",
        skip_serializing_if = "Option::is_none"
    )]
    pub cost: Option<Cost>,
    #[serde(
        rename = "pdfUrl",
        default,
        deserialize_with = "link_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub pdf_url: Option<String>,
    /// Fields the catalogue carries that the table does not use.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Project {
    pub fn new(
        title: impl Into<String>,
        category: impl Into<String>,
        cost: impl Into<Cost>,
        pdf_url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
            cost: Some(cost.into()),
            pdf_url: Some(pdf_url.into()),
            extra: Map::new(),
        }
    }

    pub fn cost_amount(&self) -> Option<f64> {
        self.cost.as_ref().and_then(Cost::amount)
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(text) => text,
        other => other.to_string(),
    })
}

fn present_cost<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Cost>, D::Error> {
    Cost::deserialize(deserializer).map(Some)
}

fn link_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(url) => Some(url),
        _ => None,
    })
}

/// Parses the longest numeric prefix of `raw`, ignoring leading whitespace.
///
/// `"150000"`, `" 2.5e3 lakh"` and `"-4."` all yield a value; `"abc"`, `""`
/// and `"."` yield `None`.
pub fn parse_leading_float(raw: &str) -> Option<f64> {
    let text = raw.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        end = frac_end;
    }

    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    text[..end].parse::<f64>().ok()
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
