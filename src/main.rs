use std::io::Write;

use lumbung::{
    executor::{self, create_table::execute_show_tables},
    planner::parser::SqlParser,
    storage::database::Database,
};
use rustyline::{DefaultEditor, Result, error::ReadlineError};

const HISTORY_FILE: &str = "lumbung_history.txt";

fn read_multiline_command(rl: &mut DefaultEditor) -> Result<String> {
    let mut input = String::new();
    let mut prompt = "lumbung> ".to_string();

    loop {
        let readline = rl.readline(&prompt);
        match readline {
            Ok(line) => {
                let trimmed_line = line.trim_end();

                // A trailing backslash continues the statement on the next line
                if trimmed_line.ends_with('\\') {
                    let mut line_without_backslash = trimmed_line.to_string();
                    line_without_backslash.pop();
                    input.push_str(&line_without_backslash);
                    input.push(' ');

                    prompt = "      -> ".to_string();
                } else {
                    input.push_str(trimmed_line);
                    break;
                }
            }
            Err(err) => return Err(err),
        }
    }

    Ok(input)
}

/// Handle a `.meta` command. Returns false when the loop should exit.
fn process_meta_command(command: &str, db: &Database) -> bool {
    match command {
        ".exit" => {
            println!("Goodbye!");
            return false;
        }
        ".help" => {
            println!(
                r#"
Meta commands:
  .help    - Show this help message
  .tables  - List tables
  .clear   - Clear the screen
  .exit    - Exit

Statements: CREATE TABLE, INSERT, SELECT, DELETE, DROP TABLE, SHOW TABLES.
Use '\' at the end of a line for multiline input.
Use Up/Down arrows to navigate command history.
"#
            );
        }
        ".tables" => {
            for name in execute_show_tables(db) {
                println!("{}", name);
            }
        }
        ".clear" => {
            print!("\x1B[2J\x1B[1;1H");
            let _ = std::io::stdout().flush();
        }
        other => {
            println!("Unrecognized command '{}'.", other);
        }
    }

    true
}

fn process_statement(parser: &SqlParser, db: &mut Database, sql: &str) {
    match parser
        .parse_statement(sql)
        .and_then(|statement| executor::execute(db, &statement))
    {
        Ok(outcome) => {
            let rendered = outcome.to_string();
            if !rendered.is_empty() {
                print!("{}", rendered);
            }
            println!("Executed.");
        }
        Err(err) => println!("Error: {}", err),
    }
}

fn main() -> Result<()> {
    println!("lumbung v{} - in-memory SQL engine", env!("CARGO_PKG_VERSION"));
    println!("Type '.help' for usage hints.");

    let mut db = Database::new("main");
    let parser = SqlParser::new();

    let mut rl = DefaultEditor::new()?;
    let _ = rl.load_history(HISTORY_FILE);

    loop {
        match read_multiline_command(&mut rl) {
            Ok(input) => {
                let command = input.trim().to_string();
                if command.is_empty() {
                    continue;
                }
                rl.add_history_entry(&command)?;

                if command.starts_with('.') {
                    if !process_meta_command(&command, &db) {
                        break;
                    }
                } else {
                    process_statement(&parser, &mut db, &command);
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("Interrupted");
                break;
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    let _ = rl.save_history(HISTORY_FILE);
    Ok(())
}
