//! taskdeck - task manager backed by a REST API
//!
//! CLI entry point: dispatches user intents into the task store and
//! prints the store's derived state.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use eyre::{Context, Result};
use tracing::info;

use taskdeck::api::create_api;
use taskdeck::cli::{Cli, Command, OutputFormat};
use taskdeck::config::Config;
use taskdeck::domain::{Task, TaskDraft, TaskFilter};
use taskdeck::store::TaskStore;

fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("taskdeck")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Setup tracing subscriber - write to log file, not stdout/stderr
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let log_file = fs::File::create(log_dir.join("taskdeck.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    config.validate()?;

    info!(
        "taskdeck loaded config: backend={}, base-url={}",
        config.backend, config.api.base_url
    );

    match cli.command {
        Some(Command::List { filter, format }) => cmd_list(&config, filter, format).await,
        Some(Command::Add {
            title,
            description,
            completed,
        }) => cmd_add(&config, title, description, completed).await,
        Some(Command::Show { id, format }) => cmd_show(&config, id, format).await,
        Some(Command::Edit {
            id,
            title,
            description,
            completed,
        }) => cmd_edit(&config, id, title, description, completed).await,
        Some(Command::Toggle { id }) => cmd_toggle(&config, id).await,
        Some(Command::Rm { id, yes }) => cmd_rm(&config, id, yes).await,
        None => print_help(),
    }
}

/// Print help when invoked without a subcommand
fn print_help() -> Result<()> {
    let mut cmd = Cli::command();
    cmd.print_help()?;
    Ok(())
}

/// One task as a text line: marker, id, title, dimmed description
fn print_task_line(task: &Task) {
    let marker = if task.is_completed { "✓".green() } else { "·".yellow() };
    println!("  {} {:>6}  {}", marker, task.id, task.title);
    if let Some(description) = &task.description {
        println!("    {:>6}  {}", "", description.dimmed());
    }
}

/// List tasks through the store's filtered view
async fn cmd_list(config: &Config, filter: TaskFilter, format: OutputFormat) -> Result<()> {
    let api = create_api(config)?;
    let mut store = TaskStore::new(api);

    store.load_tasks().await;
    store.set_filter(filter);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&store.filtered_tasks())?);
        }
        OutputFormat::Text => {
            let tasks = store.filtered_tasks();
            if tasks.is_empty() {
                println!("No tasks (filter: {})", store.filter());
                return Ok(());
            }

            println!("Tasks (filter: {})", store.filter());
            println!("------------------");
            for task in tasks {
                print_task_line(task);
            }
        }
    }

    Ok(())
}

/// Add a task and report the server-confirmed record
async fn cmd_add(config: &Config, title: String, description: Option<String>, completed: bool) -> Result<()> {
    let api = create_api(config)?;
    let mut store = TaskStore::new(api);

    let mut draft = TaskDraft::new(title).completed(completed);
    if let Some(description) = description {
        draft = draft.with_description(description);
    }

    store.add_task(draft).await;

    // the store recovers failures internally; the cache tells us what happened
    match store.tasks().last() {
        Some(task) => {
            println!("{} Added task {}: {}", "✓".green(), task.id, task.title);
            Ok(())
        }
        None => {
            println!("{} Failed to add task (see logs)", "✗".red());
            std::process::exit(1);
        }
    }
}

/// Show a single task straight from the backend
async fn cmd_show(config: &Config, id: i64, format: OutputFormat) -> Result<()> {
    let api = create_api(config)?;

    let Some(task) = api.get(id).await? else {
        println!("Task {} not found", id);
        std::process::exit(1);
    };

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        OutputFormat::Text => {
            println!("Task {}", task.id);
            println!("--------");
            println!("Title:       {}", task.title);
            if let Some(description) = &task.description {
                println!("Description: {}", description);
            }
            let status = if task.is_completed {
                "completed".green()
            } else {
                "pending".yellow()
            };
            println!("Status:      {}", status);
            if let Some(created_at) = &task.created_at {
                println!("Created:     {}", created_at.to_rfc3339());
            }
        }
    }

    Ok(())
}

/// Edit a task's fields and push the full record to the backend
async fn cmd_edit(
    config: &Config,
    id: i64,
    title: Option<String>,
    description: Option<String>,
    completed: Option<bool>,
) -> Result<()> {
    let api = create_api(config)?;
    let mut store = TaskStore::new(api);

    store.load_tasks().await;

    let Some(current) = store.tasks().iter().find(|t| t.id == id).cloned() else {
        println!("Task {} not found", id);
        std::process::exit(1);
    };

    let mut updated = current;
    if let Some(title) = title {
        updated.title = title;
    }
    if let Some(description) = description {
        updated.description = Some(description);
    }
    if let Some(completed) = completed {
        updated.is_completed = completed;
    }

    store.update_task(updated.clone()).await;

    match store.tasks().iter().find(|t| t.id == id) {
        Some(task) if *task == updated => {
            println!("{} Updated task {}: {}", "✓".green(), task.id, task.title);
            Ok(())
        }
        _ => {
            println!("{} Failed to update task {} (see logs)", "✗".red(), id);
            std::process::exit(1);
        }
    }
}

/// Flip a task's completion state
async fn cmd_toggle(config: &Config, id: i64) -> Result<()> {
    let api = create_api(config)?;
    let mut store = TaskStore::new(api);

    store.load_tasks().await;

    let Some(task) = store.tasks().iter().find(|t| t.id == id).cloned() else {
        println!("Task {} not found", id);
        std::process::exit(1);
    };

    store.toggle_completion(&task).await;

    let state = if task.is_completed {
        "pending".yellow()
    } else {
        "completed".green()
    };
    println!("{} Task {} is now {}", "✓".green(), id, state);

    Ok(())
}

/// Delete a task, confirming first unless --yes was given
async fn cmd_rm(config: &Config, id: i64, yes: bool) -> Result<()> {
    if !yes {
        print!("Delete task {}? This cannot be undone. [y/N] ", id);
        io::stdout().flush()?;

        let mut answer = String::new();
        io::stdin().read_line(&mut answer)?;
        if !matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
            println!("Aborted.");
            return Ok(());
        }
    }

    let api = create_api(config)?;
    let mut store = TaskStore::new(api);

    store.load_tasks().await;

    if !store.tasks().iter().any(|t| t.id == id) {
        println!("Task {} not found", id);
        std::process::exit(1);
    }

    store.delete_task(id).await;

    if store.tasks().iter().any(|t| t.id == id) {
        println!("{} Failed to delete task {} (see logs)", "✗".red(), id);
        std::process::exit(1);
    }

    println!("{} Deleted task {}", "✓".green(), id);
    Ok(())
}
