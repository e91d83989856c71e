//! taskdeck command-line front end.
//!
//! # Responsibility
//! - Wire user actions to task store operations and render ordered views.
//! - Own the confirmation gate for destructive bulk operations; the store
//!   operations themselves stay unconditional.
//!
//! No business logic lives here; ordering and invariants belong to
//! `taskdeck_core`.

use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use taskdeck_core::db::open_db;
use taskdeck_core::{
    core_version, default_log_level, init_logging, order, Priority, SortKey, SqliteSlotStorage,
    Task, TaskId, TaskStore, Theme,
};
use uuid::Uuid;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    let Some(command) = args.first().map(String::as_str) else {
        print_usage();
        return ExitCode::from(2);
    };

    if command == "--version" || command == "version" {
        println!("taskdeck {}", core_version());
        return ExitCode::SUCCESS;
    }

    let db_path = resolve_db_path();
    if let Some(parent) = db_path.parent() {
        if let Err(err) = std::fs::create_dir_all(parent) {
            eprintln!("cannot create data directory {}: {err}", parent.display());
            return ExitCode::FAILURE;
        }
    }
    init_file_logging(&db_path);

    let conn = match open_db(&db_path) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("cannot open task database {}: {err}", db_path.display());
            return ExitCode::FAILURE;
        }
    };
    let storage = SqliteSlotStorage::new(&conn);

    match command {
        "theme" => run_theme(&storage, &args[1..]),
        _ => {
            let mut store = TaskStore::open(storage);
            run_task_command(&mut store, command, &args[1..])
        }
    }
}

fn run_task_command(
    store: &mut TaskStore<SqliteSlotStorage<'_>>,
    command: &str,
    rest: &[String],
) -> ExitCode {
    match command {
        "add" => run_add(store, rest),
        "list" => run_list(store, rest),
        "edit" => run_edit(store, rest),
        "toggle" => run_toggle(store, rest),
        "rm" => run_rm(store, rest),
        "clear-done" => run_clear_done(store),
        "clear-all" => run_clear_all(store),
        other => {
            eprintln!("unknown command `{other}`");
            print_usage();
            ExitCode::from(2)
        }
    }
}

fn run_add(store: &mut TaskStore<SqliteSlotStorage<'_>>, rest: &[String]) -> ExitCode {
    let Some(title) = rest.first() else {
        eprintln!("usage: taskdeck add <title> [--due YYYY-MM-DD] [--priority low|medium|high]");
        return ExitCode::from(2);
    };
    let due = match parse_due_option(&rest[1..]) {
        Ok(due) => due,
        Err(code) => return code,
    };
    let priority = match parse_priority_option(&rest[1..]) {
        Ok(priority) => priority.unwrap_or(Priority::Medium),
        Err(code) => return code,
    };

    match store.add(title, due, priority) {
        Ok(task) => {
            println!("added {}", render_line(&task));
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("cannot add task: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_list(store: &TaskStore<SqliteSlotStorage<'_>>, rest: &[String]) -> ExitCode {
    let key = match option_value(rest, "--sort") {
        None => SortKey::Created,
        Some(raw) => match SortKey::parse(raw) {
            Some(key) => key,
            None => {
                eprintln!("unknown sort key `{raw}`; expected created|priority|due");
                return ExitCode::from(2);
            }
        },
    };

    let view = order(store.tasks(), key);
    if view.is_empty() {
        println!("no tasks");
        return ExitCode::SUCCESS;
    }
    for task in &view {
        println!("{}", render_line(task));
    }
    ExitCode::SUCCESS
}

fn run_edit(store: &mut TaskStore<SqliteSlotStorage<'_>>, rest: &[String]) -> ExitCode {
    let (Some(id_arg), Some(title)) = (rest.first(), rest.get(1)) else {
        eprintln!(
            "usage: taskdeck edit <id> <title> [--due YYYY-MM-DD] [--priority low|medium|high]"
        );
        return ExitCode::from(2);
    };
    let Some(id) = resolve_id(store.tasks(), id_arg) else {
        eprintln!("no task matches id `{id_arg}`");
        return ExitCode::FAILURE;
    };

    // Omitted options keep the current values, like a prefilled edit form.
    let current = store.get(id).cloned();
    let due = match parse_due_option(&rest[2..]) {
        Ok(due) => due.or(current.as_ref().and_then(|task| task.due)),
        Err(code) => return code,
    };
    let priority = match parse_priority_option(&rest[2..]) {
        Ok(priority) => {
            priority.unwrap_or_else(|| current.as_ref().map_or(Priority::Medium, |task| task.priority))
        }
        Err(code) => return code,
    };

    match store.edit(id, title, due, priority) {
        Ok(task) => {
            println!("updated {}", render_line(&task));
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("cannot edit task: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_toggle(store: &mut TaskStore<SqliteSlotStorage<'_>>, rest: &[String]) -> ExitCode {
    let Some(id_arg) = rest.first() else {
        eprintln!("usage: taskdeck toggle <id>");
        return ExitCode::from(2);
    };
    let Some(id) = resolve_id(store.tasks(), id_arg) else {
        eprintln!("no task matches id `{id_arg}`");
        return ExitCode::FAILURE;
    };
    store.toggle_complete(id);
    match store.get(id) {
        Some(task) => println!("toggled {}", render_line(task)),
        None => println!("toggled {id}"),
    }
    ExitCode::SUCCESS
}

fn run_rm(store: &mut TaskStore<SqliteSlotStorage<'_>>, rest: &[String]) -> ExitCode {
    let Some(id_arg) = rest.first() else {
        eprintln!("usage: taskdeck rm <id>");
        return ExitCode::from(2);
    };
    let Some(id) = resolve_id(store.tasks(), id_arg) else {
        eprintln!("no task matches id `{id_arg}`");
        return ExitCode::FAILURE;
    };
    store.delete(id);
    println!("removed {id}");
    ExitCode::SUCCESS
}

fn run_clear_done(store: &mut TaskStore<SqliteSlotStorage<'_>>) -> ExitCode {
    if !confirm("remove all completed tasks?") {
        println!("cancelled");
        return ExitCode::SUCCESS;
    }
    let removed = store.clear_completed();
    println!("removed {removed} completed task(s)");
    ExitCode::SUCCESS
}

fn run_clear_all(store: &mut TaskStore<SqliteSlotStorage<'_>>) -> ExitCode {
    if !confirm("remove ALL tasks?") {
        println!("cancelled");
        return ExitCode::SUCCESS;
    }
    store.clear_all();
    println!("all tasks removed");
    ExitCode::SUCCESS
}

fn run_theme(storage: &SqliteSlotStorage<'_>, rest: &[String]) -> ExitCode {
    match rest.first().map(String::as_str) {
        None => match storage.load_theme() {
            Ok(theme) => {
                println!("{}", theme.as_str());
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("cannot read theme: {err}");
                ExitCode::FAILURE
            }
        },
        Some(raw) => match Theme::parse(raw) {
            Some(theme) => {
                if let Err(err) = storage.save_theme(theme) {
                    eprintln!("cannot save theme: {err}");
                    return ExitCode::FAILURE;
                }
                println!("theme set to {}", theme.as_str());
                ExitCode::SUCCESS
            }
            None => {
                eprintln!("unknown theme `{raw}`; expected light|dark");
                ExitCode::from(2)
            }
        },
    }
}

fn resolve_db_path() -> PathBuf {
    if let Ok(path) = env::var("TASKDECK_DB") {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".taskdeck").join("taskdeck.db")
}

fn init_file_logging(db_path: &PathBuf) {
    let log_dir = db_path
        .parent()
        .map(|parent| parent.join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"));
    if let Some(log_dir) = log_dir.to_str() {
        if let Err(err) = init_logging(default_log_level(), log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }
}

/// Accepts a full UUID or a unique prefix of one.
fn resolve_id(tasks: &[Task], arg: &str) -> Option<TaskId> {
    if let Ok(id) = Uuid::parse_str(arg) {
        return Some(id);
    }
    let needle = arg.to_ascii_lowercase();
    let mut matched = None;
    for task in tasks {
        if task.id.to_string().starts_with(&needle) {
            if matched.is_some() {
                return None; // ambiguous prefix
            }
            matched = Some(task.id);
        }
    }
    matched
}

fn option_value<'a>(rest: &'a [String], flag: &str) -> Option<&'a str> {
    rest.iter()
        .position(|arg| arg == flag)
        .and_then(|index| rest.get(index + 1))
        .map(String::as_str)
}

fn parse_due_option(rest: &[String]) -> Result<Option<NaiveDate>, ExitCode> {
    match option_value(rest, "--due") {
        None => Ok(None),
        Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => Ok(Some(date)),
            Err(_) => {
                eprintln!("invalid due date `{raw}`; expected YYYY-MM-DD");
                Err(ExitCode::from(2))
            }
        },
    }
}

fn parse_priority_option(rest: &[String]) -> Result<Option<Priority>, ExitCode> {
    match option_value(rest, "--priority") {
        None => Ok(None),
        Some("low") => Ok(Some(Priority::Low)),
        Some("medium") => Ok(Some(Priority::Medium)),
        Some("high") => Ok(Some(Priority::High)),
        Some(other) => {
            eprintln!("invalid priority `{other}`; expected low|medium|high");
            Err(ExitCode::from(2))
        }
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

fn render_line(task: &Task) -> String {
    let check = if task.completed { "x" } else { " " };
    let due = task
        .due
        .map(|date| date.to_string())
        .unwrap_or_else(|| "----------".to_string());
    let priority = match task.priority {
        Priority::High => "high",
        Priority::Medium => "medium",
        Priority::Low => "low",
    };
    let short_id: String = task.id.simple().to_string().chars().take(8).collect();
    format!("[{check}] {due}  {priority:<6}  {}  ({short_id})", task.title)
}

fn print_usage() {
    eprintln!(
        "usage: taskdeck <command>

commands:
  add <title> [--due YYYY-MM-DD] [--priority low|medium|high]
  list [--sort created|priority|due]
  edit <id> <title> [--due YYYY-MM-DD] [--priority low|medium|high]
  toggle <id>
  rm <id>
  clear-done
  clear-all
  theme [light|dark]
  version"
    );
}
