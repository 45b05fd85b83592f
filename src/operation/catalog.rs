//! Fixed lookup tables shared by request building and result naming.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Compression category sent as `compress_type`, derived from a file extension.
///
/// Unknown extensions map to `pdf`.
pub fn compress_type_for_extension(extension: &str) -> &'static str {
    match extension.trim_start_matches('.').to_ascii_lowercase().as_str() {
        "pdf" => "pdf",
        "doc" | "docx" => "word",
        "ppt" | "pptx" => "powerpoint",
        "xls" | "xlsx" => "excel",
        "csv" => "csv",
        "jpg" | "jpeg" | "png" | "gif" | "bmp" => "image",
        _ => "pdf",
    }
}

/// Output extension of a merge, keyed by the `merge_type` tag.
///
/// Unknown tags map to `pdf`.
pub fn extension_for_merge_type(merge_type: &str) -> &'static str {
    match merge_type.trim().to_ascii_lowercase().as_str() {
        "pdf" => "pdf",
        "word" => "docx",
        "powerpoint" => "pptx",
        "excel" => "xlsx",
        "images" => "pdf",
        _ => "pdf",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl CompressionLevel {
    pub const ALL: [CompressionLevel; 3] = [Self::Low, Self::Medium, Self::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low Compression (Higher Quality)",
            Self::Medium => "Medium Compression (Balanced)",
            Self::High => "High Compression (Smaller Size)",
        }
    }
}

impl fmt::Display for CompressionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompressionLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(format!(
                "unknown compression level '{}', expected low, medium or high",
                other
            )),
        }
    }
}

/// Known merge categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeType {
    Pdf,
    Word,
    #[serde(rename = "powerpoint")]
    PowerPoint,
    Excel,
    Images,
}

impl MergeType {
    pub const ALL: [MergeType; 5] = [
        Self::Pdf,
        Self::Word,
        Self::PowerPoint,
        Self::Excel,
        Self::Images,
    ];

    /// Wire tag sent as `merge_type`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Word => "word",
            Self::PowerPoint => "powerpoint",
            Self::Excel => "excel",
            Self::Images => "images",
        }
    }

    pub fn output_extension(&self) -> &'static str {
        extension_for_merge_type(self.as_str())
    }

    /// Input extensions (with leading dot) this category accepts.
    pub fn accepted_extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Pdf => &[".pdf"],
            Self::Word => &[".doc", ".docx"],
            Self::PowerPoint => &[".ppt", ".pptx"],
            Self::Excel => &[".xls", ".xlsx"],
            Self::Images => &[".jpg", ".jpeg", ".png", ".gif", ".bmp", ".tiff"],
        }
    }

    pub fn accepts(&self, file_name: &str) -> bool {
        let lower = file_name.to_ascii_lowercase();
        self.accepted_extensions()
            .iter()
            .any(|ext| lower.ends_with(ext))
    }
}

impl fmt::Display for MergeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MergeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown merge type '{}'", s))
    }
}

impl From<MergeType> for String {
    fn from(value: MergeType) -> Self {
        value.as_str().to_string()
    }
}

/// One selectable conversion for a given source extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConversionOption {
    pub value: &'static str,
    pub label: &'static str,
    pub target: &'static str,
}

const fn option(
    value: &'static str,
    label: &'static str,
    target: &'static str,
) -> ConversionOption {
    ConversionOption {
        value,
        label,
        target,
    }
}

const PDF_OPTIONS: &[ConversionOption] = &[
    option("pdf-to-docx", "PDF to DOCX", "docx"),
    option("pdf-to-pptx", "PDF to PPTX", "pptx"),
    option("pdf-to-xlsx", "PDF to XLSX", "xlsx"),
    option("pdf-to-csv", "PDF to CSV", "csv"),
    option("pdf-to-jpg", "PDF to JPG", "jpg"),
    option("pdf-to-pdfa", "PDF to PDF/A", "pdfa"),
];
const DOCX_OPTIONS: &[ConversionOption] = &[option("docx-to-pdf", "DOCX to PDF", "pdf")];
const PPTX_OPTIONS: &[ConversionOption] = &[option("pptx-to-pdf", "PPTX to PDF", "pdf")];
const XLSX_OPTIONS: &[ConversionOption] = &[option("xlsx-to-pdf", "XLSX to PDF", "pdf")];
const CSV_OPTIONS: &[ConversionOption] = &[option("csv-to-pdf", "CSV to PDF", "pdf")];
const IMAGE_OPTIONS: &[ConversionOption] = &[option("image-to-pdf", "Image to PDF", "pdf")];

/// Conversions offered for a source file extension (with or without the dot).
pub fn conversion_options(extension: &str) -> &'static [ConversionOption] {
    match extension.trim_start_matches('.').to_ascii_lowercase().as_str() {
        "pdf" => PDF_OPTIONS,
        "docx" => DOCX_OPTIONS,
        "pptx" => PPTX_OPTIONS,
        "xlsx" => XLSX_OPTIONS,
        "csv" => CSV_OPTIONS,
        "jpg" | "jpeg" | "png" | "webp" | "bmp" | "gif" | "tiff" | "tif" => IMAGE_OPTIONS,
        _ => &[],
    }
}

/// Look up an option value among those offered for `extension`.
pub fn find_conversion_option(extension: &str, value: &str) -> Option<&'static ConversionOption> {
    conversion_options(extension)
        .iter()
        .find(|opt| opt.value == value)
}
