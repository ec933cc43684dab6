use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::fmt;
use std::path::PathBuf;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    #[clap(long, value_parser, default_value_t = false)]
    pub verbose: bool,

    #[clap(long, value_parser)]
    pub log: Option<PathBuf>,

    #[clap(long, value_parser)]
    pub config: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Full-screen VIN search
    Interactive {
        #[clap(long, value_parser, default_value_t = false, conflicts_with = "light")]
        dark: bool,

        #[clap(long, value_parser, default_value_t = false)]
        light: bool,
    },
    /// Look up a single VIN and print its details
    Lookup {
        #[clap(allow_hyphen_values = true)]
        vin: String,

        #[clap(long, value_parser, default_value_t = OutputFormat::Text)]
        output_format: OutputFormat,

        #[clap(long, value_parser, default_value_t = false)]
        copy: bool,
    },
    /// Print the sample VINs
    List {
        #[clap(long, value_parser, default_value_t = OutputFormat::Text)]
        output_format: OutputFormat,
    },
    /// Copy a VIN to the clipboard
    Copy { vin: String },
    /// Generate shell completions
    Completions {
        #[clap(value_enum)]
        shell: Shell,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
