//! # docforge-client
//!
//! Transfer client for the Docforge document service: convert, compress,
//! merge and split documents, render web pages to PDF, and move content in and
//! out of Jira and Notion.
//!
//! ## Overview
//!
//! Each call builds one multipart request, sends it to the configured service,
//! and returns an [`OperationResult`]. Success carries either a handle to the
//! returned file (held in a [`DownloadStore`] until released) or a JSON report.
//! Failure carries a [`Failure`] with a message ready to show a user. No
//! operation panics or returns a bare transport error.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use docforge_client::{ClientConfig, InputFile, TransferClient};
//!
//! #[tokio::main]
//! async fn main() -> docforge_client::Result<()> {
//!     let client = TransferClient::builder()
//!         .config(ClientConfig::from_env())
//!         .build()?;
//!
//!     let file = InputFile::from_path("quarterly.pdf").await?;
//!     match client.convert(file, "docx").await {
//!         Ok(output) => {
//!             let file = output.into_file().expect("convert returns a file");
//!             client.downloads().save(&file.handle, &file.file_name).await?;
//!             client.downloads().release(&file.handle);
//!         }
//!         Err(failure) => eprintln!("{}", failure),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | The transfer client and its builder |
//! | [`operation`] | Operation requests, lookup tables, form fields, file naming |
//! | [`response`] | Error message extraction from failed replies |
//! | [`result`] | Normalized success and failure values |
//! | [`downloads`] | Revocable references to returned bytes |
//! | [`config`] | Base address and HTTP settings |
//! | [`transport`] | HTTP transport |

pub mod client;
pub mod config;
pub mod downloads;
pub mod operation;
pub mod response;
pub mod result;
pub mod transport;

pub use client::{TransferClient, TransferClientBuilder};
pub use config::ClientConfig;
pub use downloads::{DownloadHandle, DownloadStore};
pub use operation::{CompressionLevel, InputFile, MergeType, Operation, OperationKind};
pub use result::{
    Failure, FailureKind, FileOutput, JiraSession, OperationOutput, OperationResult, SizeMetrics,
};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
