//! Code editor document commands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use cloudpanel_core::error::AppError;
use cloudpanel_entity::editor::language_mode;
use cloudpanel_entity::{CodeDocument, DocumentSource};

/// Which document store to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceArg {
    /// Files in cloud storage
    Cloud,
    /// Your code directory
    Code,
}

impl From<SourceArg> for DocumentSource {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::Cloud => Self::Cloud,
            SourceArg::Code => Self::Code,
        }
    }
}

/// Arguments for editor commands
#[derive(Debug, Args)]
pub struct EditorArgs {
    /// Document store
    #[arg(short, long, value_enum, default_value = "code", global = true)]
    pub source: SourceArg,

    /// Editor subcommand
    #[command(subcommand)]
    pub command: EditorCommand,
}

/// Editor subcommands
#[derive(Debug, Subcommand)]
pub enum EditorCommand {
    /// List documents
    List,
    /// Print a document
    Show {
        /// Document name
        name: String,
    },
    /// Save a local file as a document
    Save {
        /// Local file to read the content from
        path: PathBuf,
        /// Document name, defaults to the local file name
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Delete a document
    Delete {
        /// Document name
        name: String,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct DocumentRow {
    name: String,
    language: String,
}

impl DocumentRow {
    fn new(name: &str) -> Self {
        let extension = name.rsplit_once('.').map(|(_, ext)| ext).unwrap_or_default();
        Self {
            name: name.to_string(),
            language: language_mode(extension).to_string(),
        }
    }
}

fn print_names(names: &[String], format: OutputFormat) {
    let rows: Vec<DocumentRow> = names.iter().map(|n| DocumentRow::new(n)).collect();
    output::print_list(&rows, format, "No documents.");
}

/// Execute editor commands
pub async fn execute(
    args: &EditorArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let panel = super::open_panel(config_path, None).await?;
    let editor = panel.editor();
    let source = DocumentSource::from(args.source);

    match &args.command {
        EditorCommand::List => print_names(&editor.list(source).await?, format),
        EditorCommand::Show { name } => {
            let document = editor.load(source, name).await?;
            match format {
                OutputFormat::Json => output::print_json(&document),
                OutputFormat::Table => {
                    output::print_kv("File", &document.filename);
                    output::print_kv("Language", &document.language);
                    println!();
                    println!("{}", document.content);
                }
            }
        }
        EditorCommand::Save { path, name } => {
            let filename = name.clone().unwrap_or_else(|| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or_default()
                    .to_string()
            });
            let content = tokio::fs::read_to_string(path).await.map_err(|e| {
                AppError::not_found(format!("Failed to read {}: {e}", path.display()))
            })?;
            let extension = filename.rsplit_once('.').map(|(_, ext)| ext).unwrap_or_default();
            let document = CodeDocument {
                language: language_mode(extension).to_string(),
                filename,
                content,
            };
            print_names(&editor.save(source, &document).await?, format);
        }
        EditorCommand::Delete { name } => {
            print_names(&editor.delete(source, name).await?, format);
        }
    }

    Ok(())
}
