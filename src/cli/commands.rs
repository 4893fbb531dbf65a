use crate::config::RouteTableConfig;
use crate::router::Router;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Command-line interface for a bracket-pattern route table
#[derive(Debug, Parser)]
#[command(name = "bracket-router")]
#[command(about = "Match requests and generate URLs against a route table", long_about = None)]
pub struct Cli {
    /// Route table file (YAML or JSON)
    #[arg(short, long, env = "BRKT_ROUTES")]
    pub routes: PathBuf,

    /// Base path; overrides the one in the route table file
    #[arg(long, env = "BRKT_BASE_PATH")]
    pub base_path: Option<String>,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Load and compile the table, report the route count
    Check,
    /// Print routes in priority order
    List,
    /// Match a request path and print the result as JSON
    Match {
        /// Request path, may include a query string
        path: String,

        /// HTTP method
        #[arg(short, long, default_value = "GET")]
        method: String,
    },
    /// Generate a URL from a named route
    Generate {
        /// Route name
        name: String,

        /// Parameter as key=value (repeatable)
        #[arg(short, long = "param", value_parser = parse_key_val)]
        params: Vec<(String, String)>,
    },
}

/// Result of a successfully executed command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// `match` found no route
    NoMatch,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::NoMatch => ExitCode::from(1),
        }
    }
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .ok_or_else(|| format!("expected key=value, got `{s}`"))
}

fn load_router(cli: &Cli) -> Result<Router<String>> {
    let mut table = RouteTableConfig::load(&cli.routes)?;
    if let Some(base_path) = &cli.base_path {
        table.base_path = Some(base_path.clone());
    }
    table
        .into_router()
        .with_context(|| format!("invalid route table {}", cli.routes.display()))
}

/// Run a parsed command, writing results to `out`
///
/// # Errors
///
/// Returns an error if the route table cannot be loaded or compiled, if a
/// named route does not exist, or if writing to `out` fails.
pub fn execute(cli: &Cli, out: &mut dyn Write) -> Result<Outcome> {
    let router = load_router(cli)?;

    match &cli.command {
        Commands::Check => {
            writeln!(out, "ok: {} route(s)", router.len())?;
        }
        Commands::List => {
            out.write_all(router.dump_routes().as_bytes())?;
        }
        Commands::Match { path, method } => {
            let Some(matched) = router.match_request(method, path) else {
                writeln!(out, "null")?;
                return Ok(Outcome::NoMatch);
            };
            let params: Vec<[&str; 2]> = matched
                .params
                .iter()
                .map(|(k, v)| [k.as_ref(), v.as_str()])
                .collect();
            let body = json!({
                "handler": matched.handler,
                "name": matched.name,
                "pattern": matched.pattern,
                "params": params,
            });
            writeln!(out, "{}", serde_json::to_string_pretty(&body)?)?;
        }
        Commands::Generate { name, params } => {
            let url = router.generate(name, params.iter().cloned())?;
            writeln!(out, "{url}")?;
        }
    }

    Ok(Outcome::Success)
}

/// Execute the CLI command provided by the user
///
/// # Errors
///
/// See [`execute`].
pub fn run_cli() -> Result<ExitCode> {
    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(&cli, &mut out).map(ExitCode::from)
}
