use scheduler::{FailurePolicy, Operation, Response, SchedulerContract,
    backend::JsonStore};

use std::path::PathBuf;
use std::process::ExitCode;
use anyhow::Context;
use colored::Colorize;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about, propagate_version = true)]
struct Cli {
    /// Path to the JSON ledger store to operate on
    #[arg(value_parser)]
    path: PathBuf,

    /// Report storage and decoding failures instead of ignoring them
    #[arg(long)]
    strict: bool,

    /// Action to perform
    #[command(subcommand)]
    action: Subcommands,
}

#[derive(Debug, Subcommand)]
enum Subcommands {
    /// Run the contract's activation hook
    Init,
    /// Call a contract function by name, exactly as the ledger would
    Invoke(Invoke),
    /// Show the record stored for a display
    Query {
        key: String
    },
    /// Create a display record, or replace an existing one
    Create {
        key: String,
        url: String,
        hash: String
    },
    /// Replace only the schedule hash of a display
    UpdateHash {
        key: String,
        hash: String
    },
    /// List keys held by the store
    Keys
}

#[derive(Args, Debug)]
struct Invoke {
    /// Contract function name, e.g. queryDisplay
    function: String,

    /// Positional string arguments for the function
    args: Vec<String>
}

fn print_response(response: &Response) -> ExitCode {
    match response {
        Response::Success(payload) => {
            if !payload.is_empty() {
                println!("{}", String::from_utf8_lossy(payload));
            } else {
                eprintln!("{}", "OK".green());
            }
            ExitCode::SUCCESS
        },
        Response::Error(message) => {
            eprintln!("{}", message.bright_red());
            ExitCode::FAILURE
        }
    }
}

fn run(action: Subcommands, contract: &SchedulerContract, store: &mut JsonStore) -> Response {
    match action {
        Subcommands::Init => contract.init(),
        Subcommands::Keys => {
            let keys: Vec<&str> = store.keys().collect();
            Response::success(keys.join("\n").into_bytes())
        },
        Subcommands::Invoke(invoke) => contract.invoke(store, &invoke.function, &invoke.args),
        Subcommands::Query { key } =>
            contract.invoke(store, Operation::QueryDisplay.name(), &[key]),
        Subcommands::Create { key, url, hash } =>
            contract.invoke(store, Operation::CreateOrUpdateDisplay.name(), &[key, url, hash]),
        Subcommands::UpdateHash { key, hash } =>
            contract.invoke(store, Operation::UpdateScheduleHash.name(), &[key, hash])
    }
}

fn main() -> anyhow::Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Cli::parse();

    let policy = if args.strict { FailurePolicy::Strict } else { FailurePolicy::Permissive };
    let contract = SchedulerContract::new(policy);
    let mut store = JsonStore::open(&args.path)
        .with_context(|| format!("failed to open store {}", args.path.display()))?;

    let response = run(args.action, &contract, &mut store);
    Ok(print_response(&response))
}
