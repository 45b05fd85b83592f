//! Multipart form construction.
//!
//! [`form_fields`] is the single place that knows which wire fields each
//! operation sends. The result is a plain list so it can be checked without
//! an HTTP stack; [`to_multipart`] turns it into a `reqwest` form.

use super::{compress_type_for_extension, InputFile, Operation};
use crate::{Error, ErrorContext, Result};
use reqwest::multipart::{Form, Part};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    File(InputFile),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: &'static str,
    pub value: FieldValue,
}

impl FormField {
    fn text(name: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            value: FieldValue::Text(value.into()),
        }
    }

    fn file(name: &'static str, file: &InputFile) -> Self {
        Self {
            name,
            value: FieldValue::File(file.clone()),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.value {
            FieldValue::Text(s) => Some(s),
            FieldValue::File(_) => None,
        }
    }
}

/// Wire fields for an operation, in send order.
///
/// The Jira session id is not a form field; it travels in the query string.
pub fn form_fields(op: &Operation) -> Vec<FormField> {
    match op {
        Operation::Convert { file, target } => vec![
            FormField::file("file", file),
            FormField::text("target", target.trim()),
        ],
        Operation::Compress {
            file,
            level,
            compress_type,
        } => {
            let category = compress_type
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| {
                    compress_type_for_extension(file.extension().unwrap_or("")).to_string()
                });
            vec![
                FormField::file("file", file),
                FormField::text("compress_type", category),
                FormField::text("level", level.as_str()),
            ]
        }
        Operation::Merge { files, merge_type } => {
            let mut fields: Vec<FormField> =
                files.iter().map(|f| FormField::file("files", f)).collect();
            fields.push(FormField::text("merge_type", merge_type.trim()));
            fields
        }
        Operation::Split { file, ranges } => vec![
            FormField::file("file", file),
            FormField::text("ranges", ranges.trim()),
        ],
        Operation::UrlToPdf { url } => vec![
            FormField::text("url", url.trim()),
            FormField::text("target", "pdf"),
        ],
        Operation::WordToJira { file, .. } | Operation::PdfToNotion { file } => {
            vec![FormField::file("file", file)]
        }
        Operation::JiraToWord { .. } => Vec::new(),
    }
}

/// Build a multipart form; `None` when the operation sends no fields.
pub fn to_multipart(fields: Vec<FormField>) -> Result<Option<Form>> {
    if fields.is_empty() {
        return Ok(None);
    }
    let mut form = Form::new();
    for field in fields {
        form = match field.value {
            FieldValue::Text(text) => form.text(field.name, text),
            FieldValue::File(file) => {
                let part = Part::bytes(file.bytes().to_vec())
                    .file_name(file.name().to_string())
                    .mime_str(file.mime_type())
                    .map_err(|e| {
                        Error::validation_with_context(
                            format!("Invalid mime type '{}': {}", file.mime_type(), e),
                            ErrorContext::new()
                                .with_field_path(field.name)
                                .with_source("form_builder"),
                        )
                    })?;
                form.part(field.name, part)
            }
        };
    }
    Ok(Some(form))
}
