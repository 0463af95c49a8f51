use serde::Deserialize;
use std::collections::HashMap;

/// A single stat from a per-mode bucket.
#[derive(Debug, serde::Deserialize, serde::Serialize)]
pub struct RawStat {
    /// The numeric value. The api serves most of these as strings.
    #[serde(deserialize_with = "string_or_number")]
    pub value: f64,

    /// The value as the site displays it
    #[serde(rename = "displayValue")]
    pub display_value: Option<String>,

    /// Unknown k/vs
    #[serde(flatten)]
    pub unknown: HashMap<String, serde_json::Value>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum Value {
        Number(f64),
        String(String),
    }

    match Value::deserialize(deserializer)? {
        Value::Number(value) => Ok(value),
        // Large values carry grouping commas.
        Value::String(value) => value
            .trim()
            .replace(',', "")
            .parse()
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn values_parse_from_strings_and_numbers() {
        let stat: RawStat = serde_json::from_str(r#"{"value":"24.30"}"#).expect("invalid stat");
        assert_eq!(stat.value, 24.3);

        let stat: RawStat = serde_json::from_str(r#"{"value":437}"#).expect("invalid stat");
        assert_eq!(stat.value, 437.0);

        let stat: RawStat =
            serde_json::from_str(r#"{"value":"1,322,178"}"#).expect("invalid stat");
        assert_eq!(stat.value, 1322178.0);
    }

    #[test]
    fn non_numeric_values_fail_to_parse() {
        let error = serde_json::from_str::<RawStat>(r#"{"value":"n/a"}"#).unwrap_err();
        assert!(error.to_string().contains("invalid"));
    }
}
