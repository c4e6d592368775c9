use crate::models::bucket::NegativePolicy;
use crate::report::ReportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for caseboard
/// Case processing dashboard: PlusOne and Gustave times from a case CSV
#[derive(Parser)]
#[command(
    name = "caseboard",
    version = env!("CARGO_PKG_VERSION"),
    about = "Case processing dashboard: derive PlusOne and Gustave times from a case CSV and show their distribution",
    long_about = None
)]
pub struct Cli {
    /// Override configuration file path
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<String>,

    /// Run in test mode (no config file written)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Disable colored output
    #[arg(global = true, long = "no-color")]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the default configuration file
    Init,

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "List keys missing from the configuration file")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// List the columns of a dataset and how many values read as dates
    Columns {
        /// Case CSV file
        file: String,

        #[arg(long, value_name = "CHAR", help = "Field delimiter (default from config)")]
        delimiter: Option<String>,
    },

    /// Compute PlusOne and Gustave times and show the four dashboard views
    Analyze {
        /// Case CSV file
        file: String,

        #[arg(long = "plusone-start", value_name = "COLUMN")]
        plusone_start: Option<String>,

        #[arg(long = "plusone-end", value_name = "COLUMN")]
        plusone_end: Option<String>,

        #[arg(long = "gustave-start", value_name = "COLUMN")]
        gustave_start: Option<String>,

        #[arg(long = "gustave-end", value_name = "COLUMN")]
        gustave_end: Option<String>,

        #[arg(
            long = "negative-policy",
            value_enum,
            help = "Negative durations: own \"<0 days\" bucket, or left out of the distribution"
        )]
        negative_policy: Option<NegativePolicy>,

        #[arg(long, value_enum, default_value = "text")]
        format: ReportFormat,

        #[arg(long, value_name = "CHAR", help = "Field delimiter (default from config)")]
        delimiter: Option<String>,
    },

    /// Interactive session: load files and change selections from stdin
    Session {
        /// Optional file loaded at start
        file: Option<String>,
    },
}
