use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::exception::{UploadException, UploadResult};

/// Request options of an upload session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionOptions {
    /// Form field every file part is sent under.
    #[serde(default = "SessionOptions::default_field")]
    pub field: String,
    /// HTTP method.
    #[serde(default = "SessionOptions::default_method")]
    pub method: String,
    /// Extra form fields, sent as text parts after the files.
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            field: Self::default_field(),
            method: Self::default_method(),
            data: Map::new(),
        }
    }
}

impl SessionOptions {
    fn default_field() -> String {
        "files[]".to_string()
    }

    fn default_method() -> String {
        "POST".to_string()
    }

    /// Check the options and normalise the method to upper case.
    pub fn validated(mut self) -> UploadResult<Self> {
        if self.field.is_empty() {
            return Err(UploadException::InvalidOption {
                key: "field".to_owned(),
                reason: "must not be empty".to_owned(),
            });
        }
        if self.method.is_empty() || !self.method.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(UploadException::InvalidOption {
                key: "method".to_owned(),
                reason: format!("`{}` is not an HTTP method token", self.method),
            });
        }
        self.method.make_ascii_uppercase();
        Ok(self)
    }

    /// `data` entries as form text values, strings verbatim and anything else as JSON.
    pub fn data_fields(&self) -> impl Iterator<Item = (&str, String)> {
        self.data.iter().map(|(key, value)| {
            let text = match value {
                Value::String(s) => s.to_owned(),
                other => other.to_string(),
            };
            (key.as_str(), text)
        })
    }
}
