//! Task checklist commands.

use std::io::Write;

use clap::Subcommand;
use deadline_core::storage::Database;
use deadline_core::task;

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task to the checklist
    Add {
        /// Task text
        text: String,
    },
    /// List tasks
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Mark a task done
    Done {
        /// Task ID
        id: i64,
    },
    /// Mark a task not done
    Undone {
        /// Task ID
        id: i64,
    },
    /// Remove a task
    Remove {
        /// Task ID
        id: i64,
    },
    /// Remove every task
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Export the completed/uncompleted report to a text file
    Export {
        /// Output path; defaults to a timestamped file in the current directory
        #[arg(long)]
        out: Option<std::path::PathBuf>,
    },
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        TaskAction::Add { text } => {
            let text = text.trim();
            if text.is_empty() {
                eprintln!("task text is empty");
                std::process::exit(1);
            }
            let id = db.add_task(text)?;
            println!("task {id} added");
        }
        TaskAction::List { json } => {
            let tasks = db.list_tasks()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else {
                for t in &tasks {
                    let mark = if t.done { "x" } else { " " };
                    println!("[{mark}] {:>4}  {}", t.id, t.text);
                }
            }
        }
        TaskAction::Done { id } => set_done(&db, id, true)?,
        TaskAction::Undone { id } => set_done(&db, id, false)?,
        TaskAction::Remove { id } => {
            if db.delete_task(id)? {
                println!("task {id} removed");
            } else {
                eprintln!("unknown task: {id}");
                std::process::exit(1);
            }
        }
        TaskAction::Clear { yes } => {
            if !yes && !confirm("Clear all tasks?")? {
                println!("aborted");
                return Ok(());
            }
            let removed = db.clear_tasks()?;
            println!("{removed} tasks removed");
        }
        TaskAction::Export { out } => {
            let tasks = db.list_tasks()?;
            if tasks.is_empty() {
                eprintln!("no tasks to export");
                std::process::exit(1);
            }
            let report = task::export_report(&tasks);
            let path = out.unwrap_or_else(|| task::export_filename(chrono::Local::now()).into());
            std::fs::write(&path, report)?;
            println!("exported to {}", path.display());
        }
    }

    Ok(())
}

fn set_done(db: &Database, id: i64, done: bool) -> Result<(), Box<dyn std::error::Error>> {
    if db.set_task_done(id, done)? {
        println!("task {id} {}", if done { "done" } else { "not done" });
        Ok(())
    } else {
        eprintln!("unknown task: {id}");
        std::process::exit(1);
    }
}

fn confirm(prompt: &str) -> Result<bool, Box<dyn std::error::Error>> {
    eprint!("{prompt} [y/N] ");
    std::io::stderr().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}
