use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tasklog_core::executors::{Executor, ShellExecutor};
use tasklog_core::filesystem::FilesystemDatabase;
use tasklog_core::models::CoreError;
use tasklog_core::persistence::TaskDatabase;
use tasklog_core::registry::ExecutorRegistry;

#[derive(Parser)]
#[command(
    name = "tasklog",
    version,
    about = "Record tasks run by named executors as JSON documents on disk"
)]
struct Cli {
    /// Configuration directory holding the database root.
    #[arg(long, env = "TASKLOG_HOME")]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Run a shell command and record it as a task.
    Run {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },
    /// Print a task document; the most recently run task when no id is given.
    Get { taskid: Option<String> },
    /// List task ids, optionally for a single executor.
    List { executor: Option<String> },
    /// List the executor namespaces present in the database.
    Executors,
    /// Delete one task by id.
    Delete { taskid: String },
    /// Delete an executor namespace and all of its tasks.
    DeleteExecutor { name: String },
    /// Delete every task for every executor.
    Clear,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CoreError> {
    let config_dir = match cli.config_dir {
        Some(config_dir) => config_dir,
        None => default_config_dir()?,
    };
    fs::create_dir_all(&config_dir)
        .map_err(|error| CoreError::storage("create configuration directory", error))?;
    let database = FilesystemDatabase::open(&config_dir, ExecutorRegistry::with_defaults())?;

    match cli.command {
        CliCommand::Run { command } => {
            let executor = Arc::new(ShellExecutor::new(command));
            database.add_task(executor.clone())?;
            executor.run()?;
            database.update_task(executor.clone(), None)?;
            println!("{}", executor.summary());
            println!("{}", executor.taskid());
        }
        CliCommand::Get { taskid } => {
            let task = database.get_task(taskid.as_deref())?;
            let document = task.load()?.ok_or_else(|| {
                CoreError::not_found(format!("{} does not exist in the database", task.taskid()))
            })?;
            let rendered = serde_json::to_string_pretty(&document)
                .map_err(|error| CoreError::parse("render document", error))?;
            println!("{rendered}");
        }
        CliCommand::List { executor } => {
            for taskid in database.list_tasks(executor.as_deref())? {
                println!("{taskid}");
            }
        }
        CliCommand::Executors => {
            for name in database.executor_names()? {
                println!("{name}");
            }
        }
        CliCommand::Delete { taskid } => {
            database.delete_task(&taskid)?;
            println!("{taskid} has been removed");
        }
        CliCommand::DeleteExecutor { name } => {
            database.delete_executor(&name)?;
            println!("executor {name} has been removed");
        }
        CliCommand::Clear => database.clear()?,
    }
    Ok(())
}

fn default_config_dir() -> Result<PathBuf, CoreError> {
    std::env::var_os("HOME")
        .map(|home| PathBuf::from(home).join(".tasklog"))
        .ok_or_else(|| CoreError::config("HOME is not set; pass --config-dir"))
}
