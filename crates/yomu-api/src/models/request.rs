//! Request model definition

use serde::Deserialize;
use serde_json::Value;

use crate::errors::{ApiError, Result};

/// Text request shared by every NLP endpoint
#[derive(Debug, Default, Deserialize)]
pub struct TextRequest {
  /// Text to process
  ///
  /// Kept as a raw JSON value so that every "empty" value (`null`, `""`, `0`,
  /// `false`, `[]`, `{}`) is reported as missing text rather than as a type error.
  #[serde(default)]
  pub text: Option<Value>,
}

impl TextRequest {
  /// Request carrying `text`
  #[must_use]
  pub fn new(text: impl Into<String>) -> Self {
    Self {
      text: Some(Value::String(text.into())),
    }
  }

  /// Returns the text to process
  ///
  /// Whitespace-only text is accepted as is.
  ///
  /// # Errors
  /// - [`ApiError::NoText`]: text missing or empty
  /// - [`ApiError::InvalidInput`]: text is a non-empty value that is not a string
  /// - [`ApiError::TextTooLong`]: text longer than `max_bytes` (when a limit is set)
  pub fn into_text(self, max_bytes: Option<usize>) -> Result<String> {
    let text = match self.text {
      None => return Err(ApiError::NoText),
      Some(value) if is_empty_value(&value) => return Err(ApiError::NoText),
      Some(Value::String(text)) => text,
      Some(other) => {
        return Err(ApiError::invalid_input(format!(
          "text must be a string, got: {}",
          type_name(&other)
        )));
      }
    };

    if let Some(max) = max_bytes
      && text.len() > max
    {
      return Err(ApiError::text_too_long(text.len(), max));
    }

    Ok(text)
  }
}

/// `true` for the values a JSON client means as "nothing"
fn is_empty_value(value: &Value) -> bool {
  match value {
    Value::Null => true,
    Value::Bool(b) => !b,
    Value::Number(n) => n.as_f64() == Some(0.0),
    Value::String(s) => s.is_empty(),
    Value::Array(items) => items.is_empty(),
    Value::Object(fields) => fields.is_empty(),
  }
}

fn type_name(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "boolean",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) => "object",
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn request(json: &str) -> TextRequest {
    serde_json::from_str(json).unwrap()
  }

  #[test]
  fn deserialize_valid_request() {
    let text = request(r#"{"text": "Hello"}"#).into_text(None).unwrap();
    assert_eq!(text, "Hello");
  }

  #[test]
  fn missing_and_null_text_are_no_text() {
    assert!(matches!(request(r#"{"foo": "bar"}"#).into_text(None), Err(ApiError::NoText)));
    assert!(matches!(request(r#"{"text": null}"#).into_text(None), Err(ApiError::NoText)));
    assert!(matches!(TextRequest::default().into_text(None), Err(ApiError::NoText)));
  }

  #[test]
  fn empty_values_of_any_type_are_no_text() {
    for json in [
      r#"{"text": ""}"#,
      r#"{"text": 0}"#,
      r#"{"text": 0.0}"#,
      r#"{"text": false}"#,
      r#"{"text": []}"#,
      r#"{"text": {}}"#,
    ] {
      assert!(matches!(request(json).into_text(None), Err(ApiError::NoText)), "{json}");
    }
  }

  #[test]
  fn non_empty_non_string_text_is_invalid_input() {
    for json in [r#"{"text": 42}"#, r#"{"text": true}"#, r#"{"text": ["a"]}"#] {
      let err = request(json).into_text(None).unwrap_err();
      assert_eq!(err.code(), "invalid_input", "{json}");
    }
  }

  #[test]
  fn non_object_body_is_rejected() {
    assert!(serde_json::from_str::<TextRequest>(r#""text""#).is_err());
  }

  #[test]
  fn whitespace_text_is_accepted() {
    assert_eq!(TextRequest::new("   ").into_text(Some(10)).unwrap(), "   ");
  }

  #[test]
  fn no_limit_by_default() {
    let text = "word ".repeat(200_001);
    assert_eq!(TextRequest::new(text.clone()).into_text(None).unwrap(), text);
  }

  #[test]
  fn configured_limit_is_in_bytes() {
    // "é" is two bytes
    assert!(matches!(
      TextRequest::new("ééé").into_text(Some(5)),
      Err(ApiError::TextTooLong(6, 5))
    ));
    assert_eq!(TextRequest::new("ééé").into_text(Some(6)).unwrap(), "ééé");
  }
}
