use crate::{commands::QuerySource, error::CliError};
use clap::Parser;
use commands::Commands;
use dirq_compiler::{CompileError, QueryCompiler};
use dirq_syntax::{DirectiveParser, ExpressionParser};
use std::fs;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod env;
mod error;
mod output;

#[derive(Parser)]
#[command(name = "dirq", version = "0.1.0", about = "Directive query compiler")]
struct Cli {
    #[arg(short, long, global = true, help = "Log at debug level")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    match cli.command {
        Commands::Compile {
            source,
            options,
            pretty,
            output: destination,
        } => {
            let options = config::resolve_options(&options)?;
            let query = read_query(&source)?;
            let descriptor = QueryCompiler::new(query)?
                .with_options(options)
                .into_descriptor()?;

            let json = output::to_json(&descriptor, pretty)?;
            output::emit(&json, destination.as_deref())?;
        }
        Commands::Ast { source } => {
            let query = read_query(&source)?;
            let expression = DirectiveParser.parse_expression(&query)?;
            let json = output::to_json(&expression, true)?;
            output::emit(&json, None)?;
        }
        Commands::Check { source, options } => {
            let options = config::resolve_options(&options)?;
            let query = read_query(&source)?;

            let result = QueryCompiler::new(query)
                .map(|compiler| compiler.with_options(options))
                .and_then(|compiler| compiler.descriptor().map(|_| ()));

            match result {
                Ok(()) => println!("OK"),
                Err(err) => {
                    eprintln!("{}", describe(&err));
                    return Err(CliError::CheckFailed);
                }
            }
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout carries only JSON.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_query(source: &QuerySource) -> Result<String, CliError> {
    match (&source.query, &source.file) {
        (Some(query), _) => Ok(query.clone()),
        (None, Some(path)) => {
            info!("Reading query from {}", path);
            Ok(fs::read_to_string(path)?)
        }
        (None, None) => Err(CliError::Config(
            "Either --query or --file must be given".into(),
        )),
    }
}

fn describe(err: &CompileError) -> String {
    debug!(error = ?err, "Query rejected");
    match err {
        CompileError::Syntax(syntax) => syntax.format_error(),
        other => other.to_string(),
    }
}
