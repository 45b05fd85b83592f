//! Operation requests: one tagged variant per service action.
//!
//! Every request the client sends is described by an [`Operation`]. The
//! variant decides the endpoint, the form fields ([`form`]), the validation
//! rules, the default failure message and how the result file is named
//! ([`naming`]).

pub mod catalog;
pub mod form;
pub mod naming;

use crate::{Error, ErrorContext, Result};
use bytes::Bytes;
use serde::Serialize;
use std::fmt;
use std::path::Path;

pub use catalog::{
    compress_type_for_extension, conversion_options, extension_for_merge_type,
    find_conversion_option, CompressionLevel, ConversionOption, MergeType,
};
pub use form::{FieldValue, FormField};

/// A file selected by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    name: String,
    bytes: Bytes,
    mime: Option<String>,
}

impl InputFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
            mime: None,
        }
    }

    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }

    /// Read a file from disk. The part name is the path's final component.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                Error::validation_with_context(
                    format!("Not a file path: {}", path.display()),
                    ErrorContext::new().with_source("input_file"),
                )
            })?;
        let bytes = tokio::fs::read(path).await?;
        Ok(Self::new(name, bytes))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Extension without the dot, as written in the file name.
    pub fn extension(&self) -> Option<&str> {
        naming::file_extension(&self.name)
    }

    /// The explicit MIME type, or one guessed from the extension.
    pub fn mime_type(&self) -> &str {
        if let Some(mime) = &self.mime {
            return mime;
        }
        let ext = self.extension().map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("pdf") => "application/pdf",
            Some("doc") => "application/msword",
            Some("docx") => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Some("ppt") => "application/vnd.ms-powerpoint",
            Some("pptx") => {
                "application/vnd.openxmlformats-officedocument.presentationml.presentation"
            }
            Some("xls") => "application/vnd.ms-excel",
            Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            Some("csv") => "text/csv",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("png") => "image/png",
            Some("gif") => "image/gif",
            Some("bmp") => "image/bmp",
            Some("webp") => "image/webp",
            Some("tif") | Some("tiff") => "image/tiff",
            _ => "application/octet-stream",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Service endpoints, each with a fixed path under the base address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Convert,
    Compress,
    Merge,
    Split,
    ConvertUrl,
    JiraLogin,
    WordToJira,
    JiraToWord,
    PdfToNotion,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Convert => "/convert",
            Self::Compress => "/compress",
            Self::Merge => "/merge",
            Self::Split => "/split",
            Self::ConvertUrl => "/convert-url",
            Self::JiraLogin => "/login/jira",
            Self::WordToJira => "/convert/word-to-jira",
            Self::JiraToWord => "/convert/jira-to-word",
            Self::PdfToNotion => "/convert/pdf-to-notion",
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Self::JiraLogin => Method::Get,
            _ => Method::Post,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Convert,
    Compress,
    Merge,
    Split,
    UrlToPdf,
    WordToJira,
    JiraToWord,
    PdfToNotion,
}

impl OperationKind {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Self::Convert => Endpoint::Convert,
            Self::Compress => Endpoint::Compress,
            Self::Merge => Endpoint::Merge,
            Self::Split => Endpoint::Split,
            Self::UrlToPdf => Endpoint::ConvertUrl,
            Self::WordToJira => Endpoint::WordToJira,
            Self::JiraToWord => Endpoint::JiraToWord,
            Self::PdfToNotion => Endpoint::PdfToNotion,
        }
    }

    /// Message shown when a failed response carries nothing usable.
    pub fn default_error_message(&self) -> &'static str {
        match self {
            Self::Convert => "Conversion failed. Please try again.",
            Self::Compress => "Compression failed. Please try again.",
            Self::Merge => "File merge failed. Please try again.",
            Self::Split => "Split failed. Please try again.",
            Self::UrlToPdf => "URL conversion failed. Please try again.",
            Self::WordToJira => "Jira conversion failed. Please try again.",
            Self::JiraToWord => "Jira to Word conversion failed. Please try again.",
            Self::PdfToNotion => "Notion conversion failed. Please try again.",
        }
    }

    /// Whether a successful response is a JSON report rather than a file.
    pub fn returns_report(&self) -> bool {
        matches!(self, Self::WordToJira | Self::PdfToNotion)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Convert => "convert",
            Self::Compress => "compress",
            Self::Merge => "merge",
            Self::Split => "split",
            Self::UrlToPdf => "url_to_pdf",
            Self::WordToJira => "word_to_jira",
            Self::JiraToWord => "jira_to_word",
            Self::PdfToNotion => "pdf_to_notion",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One service request, built fresh per caller action.
#[derive(Debug, Clone)]
pub enum Operation {
    Convert {
        file: InputFile,
        target: String,
    },
    Compress {
        file: InputFile,
        level: CompressionLevel,
        /// Overrides the category derived from the file extension.
        compress_type: Option<String>,
    },
    Merge {
        files: Vec<InputFile>,
        merge_type: String,
    },
    Split {
        file: InputFile,
        ranges: String,
    },
    UrlToPdf {
        url: String,
    },
    WordToJira {
        file: InputFile,
        session_id: String,
    },
    JiraToWord {
        session_id: String,
    },
    PdfToNotion {
        file: InputFile,
    },
}

impl Operation {
    pub fn convert(file: InputFile, target: impl Into<String>) -> Self {
        Self::Convert {
            file,
            target: target.into(),
        }
    }

    pub fn compress(file: InputFile, level: CompressionLevel) -> Self {
        Self::Compress {
            file,
            level,
            compress_type: None,
        }
    }

    /// Merge request; the type tag is normalized to lowercase.
    pub fn merge(files: Vec<InputFile>, merge_type: impl Into<String>) -> Self {
        Self::Merge {
            files,
            merge_type: merge_type.into().trim().to_ascii_lowercase(),
        }
    }

    pub fn split(file: InputFile, ranges: impl Into<String>) -> Self {
        Self::Split {
            file,
            ranges: ranges.into(),
        }
    }

    pub fn url_to_pdf(url: impl Into<String>) -> Self {
        Self::UrlToPdf { url: url.into() }
    }

    pub fn kind(&self) -> OperationKind {
        match self {
            Self::Convert { .. } => OperationKind::Convert,
            Self::Compress { .. } => OperationKind::Compress,
            Self::Merge { .. } => OperationKind::Merge,
            Self::Split { .. } => OperationKind::Split,
            Self::UrlToPdf { .. } => OperationKind::UrlToPdf,
            Self::WordToJira { .. } => OperationKind::WordToJira,
            Self::JiraToWord { .. } => OperationKind::JiraToWord,
            Self::PdfToNotion { .. } => OperationKind::PdfToNotion,
        }
    }

    /// Session id sent as the `session_id` query parameter, if any.
    pub fn session_id(&self) -> Option<&str> {
        match self {
            Self::WordToJira { session_id, .. } | Self::JiraToWord { session_id } => {
                Some(session_id.as_str())
            }
            _ => None,
        }
    }

    /// Check the request carries everything its kind requires.
    ///
    /// Runs before any network call; a failure here means nothing is sent.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Convert { file, target } => {
                require_file(file, "convert.file")?;
                require_text(target, "convert.target", "A target format is required")
            }
            Self::Compress { file, .. } => require_file(file, "compress.file"),
            Self::Merge { files, merge_type } => {
                if files.len() < 2 {
                    return Err(Error::validation_with_context(
                        "At least 2 files required for merging",
                        ErrorContext::new()
                            .with_field_path("merge.files")
                            .with_details(format!("got {}", files.len()))
                            .with_source("request_validator"),
                    ));
                }
                for file in files {
                    require_file(file, "merge.files")?;
                }
                require_text(merge_type, "merge.merge_type", "A merge type is required")
            }
            Self::Split { file, ranges } => {
                require_file(file, "split.file")?;
                require_text(ranges, "split.ranges", "Page ranges are required")
            }
            Self::UrlToPdf { url } => parse_page_url(url).map(|_| ()),
            Self::WordToJira { file, session_id } => {
                require_file(file, "word_to_jira.file")?;
                require_text(
                    session_id,
                    "word_to_jira.session_id",
                    "A Jira session is required",
                )
            }
            Self::JiraToWord { session_id } => require_text(
                session_id,
                "jira_to_word.session_id",
                "A Jira session is required",
            ),
            Self::PdfToNotion { file } => require_file(file, "pdf_to_notion.file"),
        }
    }
}

/// Parse the page address for a URL-to-PDF request; only http(s) with a host.
pub fn parse_page_url(raw: &str) -> Result<url::Url> {
    let invalid = |details: String| {
        Error::validation_with_context(
            "Please enter a valid URL",
            ErrorContext::new()
                .with_field_path("url_to_pdf.url")
                .with_details(details)
                .with_source("request_validator"),
        )
    };
    let parsed = url::Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", parsed.scheme())));
    }
    if parsed.host_str().map(str::is_empty).unwrap_or(true) {
        return Err(invalid("missing host".to_string()));
    }
    Ok(parsed)
}

fn require_file(file: &InputFile, field: &str) -> Result<()> {
    if file.name().trim().is_empty() {
        return Err(Error::validation_with_context(
            "Selected file has no name",
            ErrorContext::new()
                .with_field_path(field)
                .with_source("request_validator"),
        ));
    }
    Ok(())
}

fn require_text(value: &str, field: &str, message: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::validation_with_context(
            message,
            ErrorContext::new()
                .with_field_path(field)
                .with_source("request_validator"),
        ));
    }
    Ok(())
}
