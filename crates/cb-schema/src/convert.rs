//! Conversion between generic records and statically-shaped structs.

use cb_core::record::{into_record, Record};
use cb_core::ConnectorError;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Deserialize a record into `T`. Missing required or mistyped fields fail.
pub fn to_struct<T: DeserializeOwned>(record: &Record) -> Result<T, ConnectorError> {
    serde_json::from_value(serde_json::Value::Object(record.clone()))
        .map_err(|e| ConnectorError::Conversion(e.to_string()))
}

/// Serialize `value` into a record. `T` must serialize to a JSON object.
pub fn from_struct<T: Serialize>(value: &T) -> Result<Record, ConnectorError> {
    let json = serde_json::to_value(value).map_err(|e| ConnectorError::Conversion(e.to_string()))?;
    into_record(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Sample {
        images: Vec<String>,
        #[serde(default)]
        asset_creator: Option<String>,
    }

    #[test]
    fn optional_absent_field_is_fine() {
        let record = into_record(json!({"images": ["a"]})).unwrap();
        let sample: Sample = to_struct(&record).unwrap();
        assert_eq!(sample.asset_creator, None);
    }

    #[test]
    fn mistyped_field_fails() {
        let record = into_record(json!({"images": "a"})).unwrap();
        let err = to_struct::<Sample>(&record).unwrap_err();
        assert!(matches!(err, ConnectorError::Conversion(_)));
    }

    #[test]
    fn scalar_struct_is_not_a_record() {
        assert!(from_struct(&5u8).is_err());
        let record = from_struct(&Sample { images: vec![], asset_creator: None }).unwrap();
        assert!(record.contains_key("images"));
    }
}
