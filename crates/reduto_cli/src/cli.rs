//! Command-line surface definition.
//!
//! # Responsibility
//! - Declare the command tree and shared options with clap.
//! - Keep parsing concerns out of the command handlers.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Local registration records: add, browse, export and clear.
#[derive(Debug, Parser)]
#[command(name = "reduto", version, about)]
pub struct Cli {
    /// SQLite database file holding the record collection.
    #[arg(long, default_value = "reduto.db", global = true)]
    pub db: PathBuf,

    /// Directory for rotating log files; logging is off when absent.
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error.
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate and store a new registration record.
    Add(AddArgs),
    /// List stored records, optionally filtered.
    List {
        /// Case-insensitive filter over name, email and city.
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Delete one record by its stable id.
    Delete {
        /// Record id as shown by `list`.
        id: String,
        /// Skip the interactive confirmation.
        #[arg(long)]
        yes: bool,
    },
    /// Delete every stored record.
    Clear {
        /// Skip the interactive confirmation.
        #[arg(long)]
        yes: bool,
    },
    /// Export the collection to a dated JSON file.
    Export {
        /// Target directory for the export file.
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// Resolve a postal code against the address directory.
    Lookup {
        /// 8-digit postal code, masked or plain.
        code: String,
    },
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long, default_value = "")]
    pub tax_id: String,
    #[arg(long, default_value = "")]
    pub phone: String,
    #[arg(long, default_value = "")]
    pub birth_date: String,
    #[arg(long, default_value = "")]
    pub street: String,
    #[arg(long, default_value = "")]
    pub postal_code: String,
    #[arg(long, default_value = "")]
    pub city: String,
    #[arg(long, default_value = "")]
    pub state: String,
    #[arg(long, default_value = "")]
    pub message: String,
    /// Values were already formatted externally; skip the input masks.
    #[arg(long)]
    pub raw_input: bool,
    /// Do not contact the address directory for empty address fields.
    #[arg(long)]
    pub no_lookup: bool,
}
