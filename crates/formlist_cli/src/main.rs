//! Terminal host for the formlist apps.
//!
//! # Responsibility
//! - Map subcommands onto `ContactApp` / `TodoApp` handlers.
//! - Back both apps with one SQLite key-value store file.
//! - Print notices, inline errors and list views; exit non-zero on failure.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use formlist_core::config::resolve_db_path;
use formlist_core::{
    default_log_level, init_logging, render_html, ActionOutcome, ContactApp, ContactDraft,
    ContactField, FilterMode, Notice, SqliteStore, TodoApp,
};
use log::info;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "formlist", version, about = "Contact form and todo list backed by a local store")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct GlobalArgs {
    /// SQLite store file (defaults to $FORMLIST_DB_PATH or the temp dir).
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    /// Absolute directory for rolling log files; logging is off without it.
    #[arg(long, global = true)]
    log_dir: Option<String>,
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Todo list commands.
    #[command(subcommand)]
    Todo(TodoCommand),
    /// Contact form commands.
    #[command(subcommand)]
    Contact(ContactCommand),
}

#[derive(Debug, Subcommand)]
enum TodoCommand {
    Add {
        text: String,
    },
    List {
        #[arg(long, default_value_t = FilterMode::All)]
        filter: FilterMode,
        #[arg(long)]
        search: Option<String>,
        /// Print the rendered HTML fragment instead of plain lines.
        #[arg(long)]
        html: bool,
    },
    Toggle {
        id: String,
    },
    Delete {
        id: String,
        #[arg(long)]
        yes: bool,
    },
    ClearCompleted {
        #[arg(long)]
        yes: bool,
    },
    Stats,
}

#[derive(Debug, Subcommand)]
enum ContactCommand {
    Send {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
    },
    List {
        #[arg(long)]
        html: bool,
    },
    Delete {
        id: String,
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    if let Some(log_dir) = cli.global.log_dir.as_deref() {
        let level = cli
            .global
            .log_level
            .as_deref()
            .unwrap_or(default_log_level());
        init_logging(level, log_dir).context("logging setup failed")?;
    }

    let db_path = resolve_db_path(cli.global.db);
    let store = SqliteStore::open(&db_path)
        .with_context(|| format!("cannot open store `{}`", db_path.display()))?;
    info!("event=cli_start module=cli status=ok db={}", db_path.display());

    match cli.command {
        Command::Todo(command) => run_todo(TodoApp::new(store), command),
        Command::Contact(command) => run_contact(ContactApp::new(store), command),
    }
}

fn run_todo(mut app: TodoApp<SqliteStore>, command: TodoCommand) -> Result<bool> {
    let outcome = match command {
        TodoCommand::Add { text } => {
            let outcome = app.add(&text);
            if let Some(error) = app.state().input_error.as_deref() {
                eprintln!("{error}");
            } else if outcome.is_saved() {
                if let Some(item) = app.items().first() {
                    println!("{}", item.id);
                }
            }
            outcome
        }
        TodoCommand::List {
            filter,
            search,
            html,
        } => {
            app.set_filter(filter);
            app.set_query(search.unwrap_or_default());
            if html {
                println!("{}", render_html(&app.render()));
            } else {
                for item in app.visible() {
                    let mark = if item.completed { 'x' } else { ' ' };
                    println!("[{mark}] {}  {}", item.id, item.text);
                }
            }
            return Ok(true);
        }
        TodoCommand::Toggle { id } => app.toggle(&id),
        TodoCommand::Delete { id, yes } => app.delete(&id, |prompt| yes || confirm(prompt)),
        TodoCommand::ClearCompleted { yes } => {
            app.clear_completed(|prompt| yes || confirm(prompt))
        }
        TodoCommand::Stats => {
            let stats = app.stats();
            println!(
                "total={} active={} completed={}",
                stats.total, stats.active, stats.completed
            );
            return Ok(true);
        }
    };
    Ok(report(outcome, app.state().notice.as_ref()))
}

fn run_contact(mut app: ContactApp<SqliteStore>, command: ContactCommand) -> Result<bool> {
    let outcome = match command {
        ContactCommand::Send {
            name,
            email,
            message,
        } => {
            app.set_draft(ContactDraft::new(name, email, message));
            let outcome = app.submit();
            for field in ContactField::ALL {
                if let Some(error) = app.state().error(field) {
                    eprintln!("{}: {error}", field.as_str());
                }
            }
            outcome
        }
        ContactCommand::List { html } => {
            if html {
                println!("{}", render_html(&app.render()));
            } else {
                for message in app.messages() {
                    println!(
                        "{}  {} <{}>  {}",
                        message.id, message.name, message.email, message.message
                    );
                }
            }
            return Ok(true);
        }
        ContactCommand::Delete { id, yes } => {
            app.delete(&id, |prompt| yes || confirm(prompt))
        }
    };
    Ok(report(outcome, app.state().notice.as_ref()))
}

/// Prints the notice (if any) and maps the outcome to success.
fn report(outcome: ActionOutcome, notice: Option<&Notice>) -> bool {
    if let Some(notice) = notice {
        if notice.is_error() {
            eprintln!("{}", notice.text);
        } else {
            println!("{}", notice.text);
        }
    }
    match outcome {
        ActionOutcome::Saved | ActionOutcome::Updated | ActionOutcome::Cancelled => true,
        ActionOutcome::Unchanged => {
            eprintln!("Nothing changed.");
            false
        }
        ActionOutcome::Rejected | ActionOutcome::StorageFailed => false,
    }
}

fn confirm(prompt: &str) -> bool {
    print!("{prompt} [y/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
