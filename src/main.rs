use clap::CommandFactory;
use colored::*;
use env_logger::{Builder, Env, Target};
use is_terminal::IsTerminal;
use log::info;
use std::fs;
use std::io;
use std::time::Instant;
use vinlookup::clipboard::{SystemClipboard, copy_vin};
use vinlookup::output::OutputFormatter;
use vinlookup::{Cli, Commands, Config, Parser, Result as VinResult, VinError, search, tui};

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{}", e.to_string().red().bold());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> VinResult<()> {
    setup_logging(&cli)?;

    let start_time = Instant::now();
    info!("Application started with command: {:?}", cli.command);

    let config = Config::load(cli.config.as_deref())?;
    let store = config.record_store()?;

    match cli.command {
        Commands::Interactive { dark, light } => {
            if !io::stdout().is_terminal() {
                return Err(VinError::Other(
                    "interactive mode needs a terminal; use `lookup` instead".to_string(),
                ));
            }
            let mut options = config.presentation_options();
            if dark {
                options.dark_mode = true;
            } else if light {
                options.dark_mode = false;
            }
            tui::run(&store, options, SystemClipboard::new())?;
        }
        Commands::Lookup {
            vin,
            output_format,
            copy,
        } => {
            let record = search(&vin, &store)?;
            let formatter =
                OutputFormatter::new(output_format).with_bar_width(config.display.bar_width);
            let rendered = formatter.format_record(record, store.max_dwell_days());
            println!("{}", rendered.trim_end());

            // the record is already printed; a failed copy still exits 1
            if copy {
                copy_vin(&mut SystemClipboard::new(), &record.identifier, &mut io::stderr())?;
            }
        }
        Commands::List { output_format } => {
            let formatter = OutputFormatter::new(output_format);
            println!("{}", formatter.format_catalog(&store).trim_end());
        }
        Commands::Copy { vin } => {
            copy_vin(&mut SystemClipboard::new(), &vin, &mut io::stderr())?;
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "vinlookup", &mut io::stdout());
        }
    }

    info!(
        "Application finished. Total elapsed time: {:.2?}",
        start_time.elapsed()
    );
    Ok(())
}

fn setup_logging(cli: &Cli) -> VinResult<()> {
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    let mut builder = Builder::from_env(Env::default().default_filter_or(default_filter));

    builder.format(|buf, record| {
        use std::io::Write;
        writeln!(
            buf,
            "{} [{}] [{}] {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.module_path().unwrap_or("unknown"),
            record.args()
        )
    });

    if let Some(log_path) = &cli.log {
        if let Some(parent_dir) = log_path.parent() {
            if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
                fs::create_dir_all(parent_dir)?;
            }
        }
        let log_file = fs::File::create(log_path)?;
        builder.target(Target::Pipe(Box::new(log_file)));
    } else if matches!(cli.command, Commands::Interactive { .. }) {
        // stderr shares the alternate screen
        builder.target(Target::Pipe(Box::new(io::sink())));
    } else {
        builder.target(Target::Stderr);
    }

    builder
        .try_init()
        .map_err(|e| VinError::Other(e.to_string()))?;
    Ok(())
}
