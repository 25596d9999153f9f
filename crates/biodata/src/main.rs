//! `biodata` - CLI for the biodata record store
//!
//! Runs the HTTP server or performs one store operation and exits.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use biodata::cli::output::{self, EMPTY_STORE, NO_MATCHES};
use biodata::cli::{
    Cli, Command, ConfigCommand, ListCommand, SearchCommand, ServeCommand, StatusCommand,
    SubmitCommand,
};
use biodata::{
    init_logging, server, Config, FileStore, RecordStore, RequestHandler, SubmitOutcome,
};

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;

    match cli.command {
        Command::Serve(cmd) => handle_serve(&config, cmd),
        Command::Submit(cmd) => handle_submit(&config, cmd),
        Command::Search(cmd) => handle_search(&config, &cmd),
        Command::List(cmd) => handle_list(&config, &cmd),
        Command::Status(cmd) => handle_status(&config, &cmd),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn open_handler(config: &Config) -> anyhow::Result<RequestHandler<FileStore>> {
    let path = config.data_path();
    let store = FileStore::open(&path)
        .with_context(|| format!("opening record store at {}", path.display()))?;
    Ok(RequestHandler::new(store))
}

fn handle_serve(config: &Config, cmd: ServeCommand) -> anyhow::Result<ExitCode> {
    let addr = match cmd.bind {
        Some(bind) => bind
            .parse()
            .with_context(|| format!("invalid bind address: {bind}"))?,
        None => config.bind_addr()?,
    };
    let handler = Arc::new(open_handler(config)?);

    let runtime = tokio::runtime::Runtime::new().context("starting async runtime")?;
    runtime.block_on(server::serve(handler, addr))?;
    Ok(ExitCode::SUCCESS)
}

fn handle_submit(config: &Config, cmd: SubmitCommand) -> anyhow::Result<ExitCode> {
    let json = cmd.json;
    let handler = open_handler(config)?;
    let outcome = handler.submit(cmd.into())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    }

    match outcome {
        SubmitOutcome::Saved { record } => {
            if !json {
                println!("Data berhasil disimpan ke {}.", handler.store().path().display());
                print!("{}", output::render_record(&record));
            }
            Ok(ExitCode::SUCCESS)
        }
        SubmitOutcome::Rejected { errors } => {
            if !json {
                eprint!("{}", output::render_errors(&errors));
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

fn handle_search(config: &Config, cmd: &SearchCommand) -> anyhow::Result<ExitCode> {
    let handler = open_handler(config)?;

    let Some(section) = handler.query(Some(cmd.query.as_str())) else {
        eprintln!("Search query is empty.");
        return Ok(ExitCode::FAILURE);
    };

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&section)?);
    } else {
        println!("Hasil pencarian untuk \"{}\":", section.query);
        print!("{}", output::render_table(&section.matches, NO_MATCHES));
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_list(config: &Config, cmd: &ListCommand) -> anyhow::Result<ExitCode> {
    let records = open_handler(config)?.list();

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        print!("{}", output::render_table(&records, EMPTY_STORE));
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_status(config: &Config, cmd: &StatusCommand) -> anyhow::Result<ExitCode> {
    let handler = open_handler(config)?;
    let stats = handler.store().stats();

    if cmd.json {
        let status = serde_json::json!({
            "data_path": handler.store().path(),
            "stats": stats,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        print!("{}", output::render_stats(&stats, handler.store().path()));
    }
    Ok(ExitCode::SUCCESS)
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<ExitCode> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Data path:  {}", config.data_path().display());
                println!();
                println!("[Server]");
                println!("  Bind:       {}", config.server.bind);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => {
                    println!("Configuration error: {e}");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
