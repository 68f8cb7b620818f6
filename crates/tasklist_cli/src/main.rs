//! Command-line front end for the tasklist core.
//!
//! One trigger per invocation: the process opens the store, feeds a single
//! trigger through resolution, persists, and prints the derived view. One
//! process equals one apply-then-view cycle, which keeps the one-action-in-
//! flight discipline the core expects.

use std::env;
use std::process::ExitCode;

use tasklist_core::{
    default_log_level, init_logging, open_store_db, resolve, Action, Filter, SqliteSlotStorage,
    TaskStorage, TaskStore, Trigger,
};

const USAGE: &str = "\
usage: tasklist_cli <db-path> <command> [value]

commands:
  list [all|0|1]        print the task list under a filter
  add-task <name>       append a new task
  update-<i> <name>     rename the task at index <i>
  toggle-<i> <0|1>      set the completed flag of the task at index <i>
  select_all <0|1>      set the completed flag on every task
  remove-<i>            remove the task at index <i>
  clear-completed       drop every completed task

set TASKLIST_LOG_DIR to an absolute path to enable file logging
";

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    let (db_path, command, value) = match args.as_slice() {
        [db_path, command] => (db_path.as_str(), command.as_str(), None),
        [db_path, command, value] => (db_path.as_str(), command.as_str(), Some(value.as_str())),
        _ => {
            eprint!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    if let Ok(log_dir) = env::var("TASKLIST_LOG_DIR") {
        if let Err(err) = init_logging(default_log_level(), &log_dir) {
            eprintln!("warning: {err}");
        }
    }

    let conn = match open_store_db(db_path) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("error: cannot open store at `{db_path}`: {err}");
            return ExitCode::FAILURE;
        }
    };
    let mut store = TaskStore::open(SqliteSlotStorage::new(&conn));

    if command == "list" {
        let filter = match value {
            Some(raw) => match Filter::parse(raw) {
                Some(filter) => filter,
                None => {
                    eprintln!("error: unknown filter `{raw}`; expected all|0|1");
                    return ExitCode::FAILURE;
                }
            },
            None => Filter::All,
        };
        print_view(&store, filter);
        return ExitCode::SUCCESS;
    }

    let trigger = match build_trigger(command, value) {
        Some(trigger) => trigger,
        None => {
            eprintln!("error: `{command}` needs a 0|1 value");
            return ExitCode::FAILURE;
        }
    };

    match resolve(&trigger) {
        Action::None => {
            eprintln!("error: unrecognized command `{command}`");
            eprint!("{USAGE}");
            ExitCode::FAILURE
        }
        action => {
            if let Err(err) = store.apply(action) {
                // Non-fatal by contract: the in-memory result below is
                // correct, but the next invocation may not see it.
                eprintln!("warning: task list was not saved: {err}");
            }
            print_view(&store, Filter::All);
            ExitCode::SUCCESS
        }
    }
}

/// Builds the trigger for a command, attaching the payload kind its control
/// carries. Returns `None` when a required 0|1 value is missing or invalid.
fn build_trigger(command: &str, value: Option<&str>) -> Option<Trigger> {
    if command == "select_all" || command.starts_with("toggle-") {
        return Some(Trigger::with_flag(command, parse_flag(value?)?));
    }
    if command == "add-task" || command.starts_with("update-") {
        return Some(Trigger::with_text(command, value.unwrap_or_default()));
    }
    Some(Trigger::named(command))
}

fn parse_flag(value: &str) -> Option<bool> {
    match value {
        "0" | "false" => Some(false),
        "1" | "true" => Some(true),
        _ => None,
    }
}

fn print_view<S: TaskStorage>(store: &TaskStore<S>, filter: Filter) {
    let view = store.view(filter);

    for row in &view.visible_tasks {
        let mark = if row.task.completed { "x" } else { " " };
        println!("{:>3} [{mark}] {}", row.index, row.task.name);
    }

    if view.show_footer {
        let noun = if view.active_count == 1 { "item" } else { "items" };
        let mut footer = format!("{} {noun} left", view.active_count);
        if view.completed_count > 0 {
            footer.push_str(&format!(", {} completed", view.completed_count));
        }
        if view.all_completed {
            footer.push_str(", all done");
        }
        println!("-- {footer}");
    } else {
        println!("-- no tasks");
    }
}
