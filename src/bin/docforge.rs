//! docforge: command-line front-end for the Docforge document service.
//!
//! A thin shim over the library: each subcommand maps to one
//! `TransferClient` operation, saves the returned file into `--output-dir`
//! and releases its download handle.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use docforge_client::operation::conversion_options;
use docforge_client::{
    ClientConfig, CompressionLevel, InputFile, JiraSession, MergeType, Operation,
    OperationOutput, OperationResult, SizeMetrics, TransferClient,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "docforge", version, about = "Convert, compress, merge and split documents")]
struct Cli {
    /// Base address of the conversion service.
    #[arg(long, env = "DOCFORGE_BACKEND_URL", global = true)]
    backend_url: Option<String>,

    /// YAML file with client settings (base_url, timeout_secs, user_agent).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory where returned files are written.
    #[arg(short = 'o', long, default_value = ".", global = true)]
    output_dir: PathBuf,

    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Convert a file to another format.
    Convert {
        file: PathBuf,
        /// Target format tag (docx, pptx, xlsx, csv, jpg, pdfa, pdf).
        #[arg(short, long, required_unless_present = "option")]
        target: Option<String>,
        /// Conversion option value as listed by `options` (e.g. pdf-to-docx).
        #[arg(long, conflicts_with = "target")]
        option: Option<String>,
    },
    /// List the conversions offered for a file.
    Options { file: PathBuf },
    /// Compress a file.
    Compress {
        file: PathBuf,
        #[arg(short, long, default_value = "medium")]
        level: CompressionLevel,
        /// Override the category derived from the extension.
        #[arg(long)]
        compress_type: Option<String>,
    },
    /// Merge files, in the order given, into one document.
    Merge {
        /// pdf, word, powerpoint, excel or images.
        #[arg(short = 't', long = "type", default_value = "pdf")]
        merge_type: MergeType,
        #[arg(required = true, num_args = 1..)]
        files: Vec<PathBuf>,
    },
    /// Split a PDF by page ranges.
    Split {
        file: PathBuf,
        /// Page ranges, e.g. 1-3,5.
        #[arg(short, long)]
        ranges: String,
    },
    /// Render a web page to PDF.
    UrlToPdf { url: String },
    /// Open a Jira session and print its id.
    JiraLogin,
    /// Import a Word document into Jira.
    WordToJira {
        file: PathBuf,
        #[arg(long)]
        session: String,
    },
    /// Export Jira content as a Word document.
    JiraToWord {
        #[arg(long)]
        session: String,
    },
    /// Import a PDF into Notion.
    PdfToNotion { file: PathBuf },
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "warn,docforge_client=info",
        _ => "info,docforge_client=debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_client(cli: &Cli) -> Result<TransferClient> {
    let mut builder = TransferClient::builder();
    if let Some(path) = &cli.config {
        let config = ClientConfig::from_yaml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?;
        builder = builder.config(config);
    }
    if let Some(url) = &cli.backend_url {
        builder = builder.base_url(url.clone());
    }
    builder.build().context("building client")
}

async fn read_input(path: &Path) -> Result<InputFile> {
    InputFile::from_path(path)
        .await
        .with_context(|| format!("reading {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let client = build_client(&cli)?;

    let result = match &cli.command {
        Command::Options { file } => {
            print_options(file, cli.json)?;
            return Ok(ExitCode::SUCCESS);
        }
        Command::Convert {
            file,
            target,
            option,
        } => {
            let input = read_input(file).await?;
            match (target, option) {
                (Some(target), _) => client.convert(input, target.clone()).await,
                (None, Some(option)) => client.convert_with_option(input, option).await,
                (None, None) => anyhow::bail!("either --target or --option is required"),
            }
        }
        Command::Compress {
            file,
            level,
            compress_type,
        } => {
            let input = read_input(file).await?;
            client
                .execute(Operation::Compress {
                    file: input,
                    level: *level,
                    compress_type: compress_type.clone(),
                })
                .await
        }
        Command::Merge { merge_type, files } => {
            let inputs =
                futures::future::try_join_all(files.iter().map(|p| read_input(p))).await?;
            client.merge(inputs, *merge_type).await
        }
        Command::Split { file, ranges } => {
            let input = read_input(file).await?;
            client.split(input, ranges.clone()).await
        }
        Command::UrlToPdf { url } => client.url_to_pdf(url.clone()).await,
        Command::JiraLogin => {
            return match client.login_jira().await {
                Ok(session) => {
                    if cli.json {
                        println!("{}", serde_json::to_string_pretty(&session)?);
                    } else {
                        println!("{}", session.session_id);
                    }
                    Ok(ExitCode::SUCCESS)
                }
                Err(failure) => {
                    report_failure(&failure, cli.json)?;
                    Ok(ExitCode::FAILURE)
                }
            };
        }
        Command::WordToJira { file, session } => {
            let input = read_input(file).await?;
            let session = JiraSession {
                session_id: session.clone(),
            };
            client.word_to_jira(input, &session).await
        }
        Command::JiraToWord { session } => {
            let session = JiraSession {
                session_id: session.clone(),
            };
            client.jira_to_word(&session).await
        }
        Command::PdfToNotion { file } => {
            let input = read_input(file).await?;
            client.pdf_to_notion(input).await
        }
    };

    finish(&client, result, &cli.output_dir, cli.json).await
}

async fn finish(
    client: &TransferClient,
    result: OperationResult,
    output_dir: &Path,
    json: bool,
) -> Result<ExitCode> {
    match result {
        Ok(OperationOutput::File(file)) => {
            tokio::fs::create_dir_all(output_dir)
                .await
                .with_context(|| format!("creating {}", output_dir.display()))?;
            // The suggested name is joined as a single component.
            let name = Path::new(&file.file_name)
                .file_name()
                .map(|n| n.to_owned())
                .unwrap_or_else(|| "download".into());
            let path = output_dir.join(name);
            let saved = client.downloads().save(&file.handle, &path).await;
            client.downloads().release(&file.handle);
            saved.with_context(|| format!("writing {}", path.display()))?;

            if json {
                let mut value = serde_json::to_value(&file)?;
                value["path"] = serde_json::Value::String(path.display().to_string());
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("Saved {} ({} bytes)", path.display(), file.handle.size());
                if let Some(metrics) = &file.metrics {
                    print_metrics(metrics);
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Ok(OperationOutput::Report(report)) => {
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(failure) => {
            report_failure(&failure, json)?;
            Ok(ExitCode::FAILURE)
        }
    }
}

fn report_failure(failure: &docforge_client::Failure, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(failure)?);
    } else {
        eprintln!("error: {}", failure);
    }
    Ok(())
}

fn print_metrics(metrics: &SizeMetrics) {
    match metrics {
        SizeMetrics::Compression {
            original_size,
            compressed_size,
            compression_ratio,
        } => {
            println!("Original:   {} bytes", original_size);
            println!("Compressed: {} bytes", compressed_size);
            if let Some(ratio) = compression_ratio {
                println!("Saved:      {}%", ratio);
            }
        }
        SizeMetrics::Merge {
            original_sizes,
            merged_size,
        } => {
            let inputs: Vec<String> = original_sizes.iter().map(u64::to_string).collect();
            println!("Inputs:     {} bytes", inputs.join(" + "));
            println!("Merged:     {} bytes", merged_size);
        }
    }
}

fn print_options(file: &Path, json: bool) -> Result<()> {
    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = docforge_client::operation::naming::file_extension(&name).unwrap_or("");
    let options = conversion_options(extension);

    if json {
        println!("{}", serde_json::to_string_pretty(options)?);
    } else if options.is_empty() {
        println!("No conversion options available for this file type.");
    } else {
        for opt in options {
            println!("{:<14} {:<14} -> {}", opt.value, opt.label, opt.target);
        }
    }
    Ok(())
}
