//! Interactive terminal host for the task list.
//!
//! # Responsibility
//! - Map line-oriented commands onto core gestures.
//! - Print the rendered surface after every command.
//!
//! # Invariants
//! - All task mutations flow through `App::dispatch`; the CLI never touches
//!   the store or the slot directly.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tidytask_core::db::{open_db, open_db_in_memory};
use tidytask_core::{
    default_log_level, init_logging, App, Gesture, SqliteSlotStorage, Surface, TaskId,
};

const DEFAULT_DB_FILE: &str = "tidytask.db";

enum Backing {
    Memory,
    File(PathBuf),
}

fn main() -> ExitCode {
    let backing = match parse_args() {
        Ok(backing) => backing,
        Err(message) => {
            eprintln!("{message}");
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    let log_dir = std::env::temp_dir().join("tidytask-logs");
    if let Err(err) = init_logging(default_log_level(), &log_dir.to_string_lossy()) {
        // Logging is a convenience here; a failed bootstrap must not block
        // the session.
        eprintln!("warning: logging disabled: {err}");
    }

    let conn = match &backing {
        Backing::Memory => open_db_in_memory(),
        Backing::File(path) => open_db(path),
    };
    let conn = match conn {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("error: could not open task storage: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut app = App::new(SqliteSlotStorage::new(conn));

    println!(
        "tidytask {} (type `help` for commands)",
        tidytask_core::core_version()
    );
    app.with_surface(print_surface);

    let stdin = io::stdin();
    loop {
        print!("tidytask> ");
        if io::stdout().flush().is_err() {
            return ExitCode::FAILURE;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => return ExitCode::SUCCESS,
            Ok(_) => {}
            Err(err) => {
                eprintln!("error: failed to read input: {err}");
                return ExitCode::FAILURE;
            }
        }

        match run_command(&mut app, line.trim()) {
            Outcome::Continue => app.with_surface(print_surface),
            Outcome::Silent => {}
            Outcome::Quit => return ExitCode::SUCCESS,
        }
    }
}

enum Outcome {
    Continue,
    Silent,
    Quit,
}

fn run_command(app: &mut App, line: &str) -> Outcome {
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command {
        "" => Outcome::Silent,
        "help" => {
            print_help();
            Outcome::Silent
        }
        "quit" | "exit" => Outcome::Quit,
        "list" => Outcome::Continue,
        "add" => {
            // An empty title goes through on purpose; the presenter's
            // validation notice is part of the surface.
            app.type_entry(rest);
            app.dispatch(Gesture::Submit);
            Outcome::Continue
        }
        "toggle" => match resolve_position(app, rest) {
            Some(id) => {
                app.dispatch(Gesture::ToggleClick(id));
                Outcome::Continue
            }
            None => Outcome::Continue,
        },
        "edit" => {
            let (position, title) = match rest.split_once(char::is_whitespace) {
                Some((position, title)) => (position, title.trim()),
                None => {
                    eprintln!("usage: edit <n> <new title>");
                    return Outcome::Silent;
                }
            };
            match resolve_position(app, position) {
                Some(id) => {
                    // Two edit-control activations with the field typed in
                    // between, matching the two-phase control.
                    app.dispatch(Gesture::EditClick(id));
                    app.type_edit(id, title);
                    app.dispatch(Gesture::EditClick(id));
                    Outcome::Continue
                }
                None => Outcome::Continue,
            }
        }
        "rm" => match resolve_position(app, rest) {
            Some(id) => {
                app.dispatch(Gesture::RemoveClick(id));
                Outcome::Continue
            }
            None => Outcome::Continue,
        },
        other => {
            eprintln!("unknown command `{other}`; type `help`");
            Outcome::Silent
        }
    }
}

/// Maps a 1-based display position onto the underlying task id.
fn resolve_position(app: &App, argument: &str) -> Option<TaskId> {
    let position: usize = match argument.parse() {
        Ok(position) if position > 0 => position,
        _ => {
            eprintln!("expected a list position, got `{argument}`");
            return None;
        }
    };

    let id = app.with_surface(|surface| surface.items().get(position - 1).map(|item| item.id));
    if id.is_none() {
        eprintln!("no item at position {position}");
    }
    id
}

fn print_surface(surface: &Surface) {
    if surface.items().is_empty() {
        println!("(no tasks)");
    }
    for (position, item) in surface.items().iter().enumerate() {
        let checkbox = if item.checked { "[x]" } else { "[ ]" };
        let editing = if item.is_editing() {
            format!("  (editing: \"{}\")", item.edit_value)
        } else {
            String::new()
        };
        println!("{:>3}. {checkbox} {}{editing}", position + 1, item.label);
    }
    if let Some(notice) = surface.notice() {
        println!("! {notice}");
    }
}

fn print_help() {
    println!("commands:");
    println!("  list              show the task list");
    println!("  add <title>       add a task");
    println!("  toggle <n>        toggle completion of the n-th task");
    println!("  edit <n> <title>  retitle the n-th task");
    println!("  rm <n>            remove the n-th task");
    println!("  quit              leave (tasks are saved as you go)");
}

fn print_usage() {
    eprintln!("usage: tidytask_cli [--memory | <db-path>]");
}

fn parse_args() -> Result<Backing, String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [] => Ok(Backing::File(PathBuf::from(DEFAULT_DB_FILE))),
        [flag] if flag == "--memory" => Ok(Backing::Memory),
        [path] if !path.starts_with('-') => Ok(Backing::File(PathBuf::from(path))),
        _ => Err("unrecognized arguments".to_string()),
    }
}
