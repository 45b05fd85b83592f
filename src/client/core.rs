use crate::client::builder::TransferClientBuilder;
use crate::downloads::DownloadStore;
use crate::operation::{
    find_conversion_option, form, naming, parse_page_url, CompressionLevel, Endpoint, InputFile,
    Operation,
};
use crate::result::{
    Failure, FailureKind, FileOutput, JiraSession, OperationOutput, OperationResult, SizeMetrics,
};
use crate::transport::HttpTransport;
use crate::{Error, ErrorContext, Result};
use std::sync::Arc;
use tracing::{info, warn};

const JIRA_LOGIN_DEFAULT_MESSAGE: &str = "Jira login failed. Please try again.";

/// Client for the conversion service.
///
/// Every operation sends exactly one request and folds whatever happens into
/// an [`OperationResult`]. Clones share the HTTP connection pool and the
/// download store; calls are independent and may run concurrently.
#[derive(Clone)]
pub struct TransferClient {
    pub(crate) transport: Arc<HttpTransport>,
    pub(crate) downloads: DownloadStore,
}

impl TransferClient {
    pub fn builder() -> TransferClientBuilder {
        TransferClientBuilder::new()
    }

    /// Client for `base_url` with default settings.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        TransferClientBuilder::new().base_url(base_url).build()
    }

    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    /// Store holding the bytes of successful file results.
    pub fn downloads(&self) -> &DownloadStore {
        &self.downloads
    }

    /// Run an operation.
    pub async fn execute(&self, op: Operation) -> OperationResult {
        let kind = op.kind();
        match self.try_execute(&op).await {
            Ok(output) => {
                if let OperationOutput::File(file) = &output {
                    info!(
                        operation = %kind,
                        file_name = %file.file_name,
                        size = file.handle.size(),
                        "operation completed"
                    );
                } else {
                    info!(operation = %kind, "operation completed");
                }
                Ok(output)
            }
            Err(err) => {
                let failure = Failure::from_error(err, kind);
                warn!(operation = %kind, "operation failed: {}", failure.message);
                Err(failure)
            }
        }
    }

    async fn try_execute(&self, op: &Operation) -> Result<OperationOutput> {
        op.validate()?;
        let kind = op.kind();

        let query: Vec<(&str, &str)> = op
            .session_id()
            .map(|id| vec![("session_id", id.trim())])
            .unwrap_or_default();
        let form = form::to_multipart(form::form_fields(op))?;

        let response = self.transport.execute(kind.endpoint(), form, &query).await?;

        if !response.is_success() {
            return Err(Error::Service {
                status: response.status,
                message: response.error_message(kind.default_error_message()),
            });
        }

        if kind.returns_report() {
            return Ok(OperationOutput::Report(response.json()?));
        }

        let file_name = result_file_name(op)?;
        let metrics = size_metrics(op, response.body.len() as u64);
        let handle = self.downloads.register(response.body);

        Ok(OperationOutput::File(FileOutput {
            handle,
            file_name,
            metrics,
        }))
    }

    /// Convert `file` to the `target` format tag (e.g. `docx`, `pdf`, `jpg`).
    pub async fn convert(&self, file: InputFile, target: impl Into<String>) -> OperationResult {
        self.execute(Operation::convert(file, target)).await
    }

    /// Convert using one of the options offered for the file's extension
    /// (e.g. `pdf-to-docx`).
    pub async fn convert_with_option(&self, file: InputFile, option_value: &str) -> OperationResult {
        let extension = file.extension().unwrap_or("");
        match find_conversion_option(extension, option_value) {
            Some(option) => self.convert(file, option.target).await,
            None => Err(Failure::new(
                FailureKind::Validation,
                "Invalid conversion type selected",
            )),
        }
    }

    /// Compress `file`; the category is derived from its extension.
    pub async fn compress(&self, file: InputFile, level: CompressionLevel) -> OperationResult {
        self.execute(Operation::compress(file, level)).await
    }

    /// Compress `file` with an explicit `compress_type` category.
    pub async fn compress_as(
        &self,
        file: InputFile,
        level: CompressionLevel,
        compress_type: impl Into<String>,
    ) -> OperationResult {
        self.execute(Operation::Compress {
            file,
            level,
            compress_type: Some(compress_type.into()),
        })
        .await
    }

    /// Merge two or more files, in order, into one document.
    pub async fn merge(&self, files: Vec<InputFile>, merge_type: impl Into<String>) -> OperationResult {
        self.execute(Operation::merge(files, merge_type)).await
    }

    /// Split `file` by page ranges (e.g. `1-3,5`).
    pub async fn split(&self, file: InputFile, ranges: impl Into<String>) -> OperationResult {
        self.execute(Operation::split(file, ranges)).await
    }

    /// Render a web page to PDF.
    pub async fn url_to_pdf(&self, url: impl Into<String>) -> OperationResult {
        self.execute(Operation::url_to_pdf(url)).await
    }

    /// Open a Jira session.
    pub async fn login_jira(&self) -> std::result::Result<JiraSession, Failure> {
        self.try_login_jira().await.map_err(|err| {
            let failure = Failure::from_error_with_default(err, JIRA_LOGIN_DEFAULT_MESSAGE);
            warn!("jira login failed: {}", failure.message);
            failure
        })
    }

    async fn try_login_jira(&self) -> Result<JiraSession> {
        let response = self.transport.execute(Endpoint::JiraLogin, None, &[]).await?;
        if !response.is_success() {
            return Err(Error::Service {
                status: response.status,
                message: response.error_message(JIRA_LOGIN_DEFAULT_MESSAGE),
            });
        }
        let session: JiraSession = serde_json::from_value(response.json()?)?;
        if session.session_id.trim().is_empty() {
            return Err(Error::parse_with_context(
                "empty session_id",
                ErrorContext::new().with_source("jira_login"),
            ));
        }
        Ok(session)
    }

    /// Import a Word document into Jira.
    pub async fn word_to_jira(&self, file: InputFile, session: &JiraSession) -> OperationResult {
        self.execute(Operation::WordToJira {
            file,
            session_id: session.session_id.clone(),
        })
        .await
    }

    /// Export Jira content as a Word document.
    pub async fn jira_to_word(&self, session: &JiraSession) -> OperationResult {
        self.execute(Operation::JiraToWord {
            session_id: session.session_id.clone(),
        })
        .await
    }

    /// Import a PDF into Notion.
    pub async fn pdf_to_notion(&self, file: InputFile) -> OperationResult {
        self.execute(Operation::PdfToNotion { file }).await
    }
}

fn result_file_name(op: &Operation) -> Result<String> {
    let name = match op {
        Operation::Convert { file, target } => naming::converted_file_name(file.name(), target),
        Operation::Compress { file, .. } => naming::compressed_file_name(file.name()),
        Operation::Merge { merge_type, .. } => naming::merged_file_name(merge_type.trim()),
        Operation::Split { .. } => naming::SPLIT_FILE_NAME.to_string(),
        Operation::UrlToPdf { url } => {
            let parsed = parse_page_url(url)?;
            naming::url_pdf_file_name(&parsed).ok_or_else(|| {
                Error::validation_with_context(
                    "Please enter a valid URL",
                    ErrorContext::new().with_field_path("url_to_pdf.url"),
                )
            })?
        }
        Operation::JiraToWord { .. } => naming::JIRA_EXPORT_FILE_NAME.to_string(),
        Operation::WordToJira { file, .. } | Operation::PdfToNotion { file } => {
            file.name().to_string()
        }
    };
    Ok(name)
}

fn size_metrics(op: &Operation, result_size: u64) -> Option<SizeMetrics> {
    match op {
        Operation::Compress { file, .. } => Some(SizeMetrics::Compression {
            original_size: file.size(),
            compressed_size: result_size,
            compression_ratio: naming::compression_ratio(file.size(), result_size),
        }),
        Operation::Merge { files, .. } => Some(SizeMetrics::Merge {
            original_sizes: files.iter().map(InputFile::size).collect(),
            merged_size: result_size,
        }),
        _ => None,
    }
}
