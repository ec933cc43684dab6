pub mod bar;
pub mod catalog;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod output;
pub mod search;
pub mod state;
pub mod tui;

pub use bar::{bar_width_fraction, days_label, render_bar};
pub use catalog::{RecordStore, VehicleRecord, format_price_eur};
pub use clap::Parser;
pub use cli::{Cli, Commands, OutputFormat};
pub use clipboard::{ClipboardWriter, Notifier, SystemClipboard};
pub use config::Config;
pub use error::{ClipboardError, LookupError, Result, VinError};
pub use search::search;
pub use state::{Presentation, PresentationOptions, SearchState, StateChange, View};
