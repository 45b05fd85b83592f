//! Result file naming and size metrics.

use super::catalog::extension_for_merge_type;

/// Name of the archive returned by a split.
pub const SPLIT_FILE_NAME: &str = "split_pages.zip";

/// Name of the document returned by a Jira export.
pub const JIRA_EXPORT_FILE_NAME: &str = "jira_export.docx";

/// Split a file name into its stem and extension (extension without the dot).
///
/// Only the last dot counts. A leading dot (`.env`) is part of the stem.
pub fn split_file_name(name: &str) -> (&str, Option<&str>) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => (&name[..idx], Some(&name[idx + 1..])),
        _ => (name, None),
    }
}

pub fn file_stem(name: &str) -> &str {
    split_file_name(name).0
}

pub fn file_extension(name: &str) -> Option<&str> {
    split_file_name(name).1
}

/// Everything before the first dot of a file name.
pub fn base_name(name: &str) -> &str {
    name.split('.').next().unwrap_or(name)
}

/// `{base}.{target}`, where `base` ends at the first dot. PDF sources
/// converted to `jpg` come back as a page-image archive and are named
/// `{base}.zip`. `pdfa` output carries a `.pdf` extension.
pub fn converted_file_name(source_name: &str, target: &str) -> String {
    let stem = base_name(source_name);
    let source_is_pdf = file_extension(source_name)
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
    let target = target.trim();
    let out_ext = if source_is_pdf && target.eq_ignore_ascii_case("jpg") {
        "zip"
    } else if target.eq_ignore_ascii_case("pdfa") {
        "pdf"
    } else {
        target
    };
    format!("{}.{}", stem, out_ext)
}

/// `{stem}_compressed{.ext}`, keeping the original extension.
pub fn compressed_file_name(source_name: &str) -> String {
    match split_file_name(source_name) {
        (stem, Some(ext)) => format!("{}_compressed.{}", stem, ext),
        (stem, None) => format!("{}_compressed", stem),
    }
}

pub fn merged_file_name(merge_type: &str) -> String {
    format!("merged.{}", extension_for_merge_type(merge_type))
}

/// `{host}.pdf` with a leading `www.` removed. `None` if the URL has no host.
pub fn url_pdf_file_name(url: &url::Url) -> Option<String> {
    let host = url.host_str()?;
    let host = host.strip_prefix("www.").unwrap_or(host);
    if host.is_empty() {
        return None;
    }
    Some(format!("{}.pdf", host))
}

/// Signed percentage saved by compression, rounded half-up.
///
/// Negative values mean the result grew. `None` when the original is empty.
pub fn compression_ratio(original_size: u64, result_size: u64) -> Option<i64> {
    if original_size == 0 {
        return None;
    }
    let saved = original_size as f64 - result_size as f64;
    let percent = saved * 100.0 / original_size as f64;
    Some((percent + 0.5).floor() as i64)
}
