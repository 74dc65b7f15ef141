use crate::adapters::export::ExportFormat;
use crate::domain::model::{ContactField, SearchField};
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "address-book")]
#[command(about = "A small contact manager backed by a local JSON file")]
pub struct CliConfig {
    /// Contacts file (overrides the config file)
    #[arg(short, long, global = true)]
    pub file: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, global = true, default_value = "address-book.toml")]
    pub config: String,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List all contacts, optionally sorted
    List {
        #[arg(long, value_parser = clap::value_parser!(ContactField))]
        sort: Option<ContactField>,

        #[arg(long, requires = "sort")]
        desc: bool,
    },
    /// Add a new contact
    Add {
        name: String,
        phone: String,
        email: String,
        address: String,
    },
    /// Update phone, email or address of an existing contact
    Update {
        name: String,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        address: Option<String>,
    },
    /// Delete a contact by name
    Delete { name: String },
    /// Case-insensitive search
    Search {
        query: String,

        /// name, phone, email, address or all (defaults to the config file setting)
        #[arg(long, value_parser = clap::value_parser!(SearchField))]
        field: Option<SearchField>,
    },
    /// Export contacts as CSV or TSV
    Export {
        #[arg(long, default_value = "csv", value_parser = clap::value_parser!(ExportFormat))]
        format: ExportFormat,

        /// Output file; prints to stdout when omitted
        #[arg(short, long)]
        output: Option<String>,
    },
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(file) = &self.file {
            validate_path("--file", file)?;
        }
        validate_path("--config", &self.config)?;

        match &self.command {
            Command::Export {
                output: Some(output),
                ..
            } => validate_path("--output", output),
            _ => Ok(()),
        }
    }
}
