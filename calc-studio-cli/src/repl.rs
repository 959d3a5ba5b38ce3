use std::io::{self, Write};

use anyhow::{Context, Result};
use calc_studio::engine::{evaluate, parse_expression, AngleMode};
use calc_studio::history::History;
use log::debug;

/// Runs the interactive evaluation loop over stdin/stdout.
///
/// Each line is evaluated in the current angle mode and recorded in the
/// session history on success. Besides expressions the loop understands
/// `mode` / `mode rad` / `mode deg`, `history`, `tree <expression>` and
/// `quit` / `exit`.
pub fn run(initial_mode: AngleMode) -> Result<()> {
    let mut mode = initial_mode;
    let mut history = History::new();

    println!("calc-studio (mode: {}), type 'quit' to leave", mode);
    loop {
        print!("> ");
        io::stdout().flush().context("Failed to flush the prompt")?;

        let mut line = String::new();
        let bytes = io::stdin()
            .read_line(&mut line)
            .context("Failed to read input")?;
        if bytes == 0 {
            return Ok(());
        }
        let line = line.trim();

        match line {
            "" => continue,
            "quit" | "exit" => return Ok(()),
            "history" => {
                if history.is_empty() {
                    println!("history is empty");
                } else {
                    print!("{}", history.render()?);
                }
            }
            "mode" => println!("mode: {}", mode),
            "mode rad" => {
                mode = AngleMode::Radians;
                debug!("switched angle mode to {}", mode);
                println!("mode: {}", mode);
            }
            "mode deg" => {
                mode = AngleMode::Degrees;
                debug!("switched angle mode to {}", mode);
                println!("mode: {}", mode);
            }
            _ => {
                if let Some(expression) = line.strip_prefix("tree ") {
                    match parse_expression(expression) {
                        Ok(tree) => print!("{}", tree),
                        Err(error) => println!("error: {}", error),
                    }
                } else {
                    match evaluate(line, mode) {
                        Ok(result) => {
                            history.record(line, result);
                            println!("{}", result);
                        }
                        Err(error) => println!("error: {}", error),
                    }
                }
            }
        }
    }
}
