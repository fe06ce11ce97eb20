use url::Url;

use crate::model::entity::{FileCollection, FileEntry};
use crate::model::vo::SessionOptions;

/// Body of one multipart part.
#[derive(Debug, Clone, PartialEq)]
pub enum PartBody {
    File(FileEntry),
    Text(String),
}

/// Part of the multipart body.
#[derive(Debug, Clone, PartialEq)]
pub struct FormPart {
    /// Form field name.
    pub name: String,
    pub body: PartBody,
}

/// Everything a transport needs to send one upload.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadRequest {
    pub method: String,
    pub destination: Url,
    pub parts: Vec<FormPart>,
}

impl UploadRequest {
    /// Every file under `options.field` in collection order, then one text
    /// part per `options.data` entry.
    pub fn new(destination: Url, files: &FileCollection, options: &SessionOptions) -> Self {
        let files = files.iter().map(|file| FormPart {
            name: options.field.clone(),
            body: PartBody::File(file.clone()),
        });
        let data = options.data_fields().map(|(name, text)| FormPart {
            name: name.to_owned(),
            body: PartBody::Text(text),
        });
        Self {
            method: options.method.clone(),
            destination,
            parts: files.chain(data).collect(),
        }
    }

    pub fn files(&self) -> impl Iterator<Item = &FileEntry> {
        self.parts.iter().filter_map(|part| match &part.body {
            PartBody::File(file) => Some(file),
            PartBody::Text(_) => None,
        })
    }
}
