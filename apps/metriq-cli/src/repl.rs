//! Interactive prompt loop.
//!
//! One line at a time: reserved commands are handled locally, everything
//! else is resolved as a prompt. Failures are printed and the loop
//! continues; only EOF/interrupt or an explicit exit ends the session.

use crate::engine::Engine;
use anyhow::Result;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Input};

pub async fn run(engine: &Engine) -> Result<()> {
    println!(
        "{} -- type {} or {} to quit",
        "metriq REPL".bold(),
        "'help'".cyan(),
        "'exit'".cyan()
    );

    loop {
        let input: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("metriq")
            .allow_empty(true)
            .interact_text()?;
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        match input.to_lowercase().as_str() {
            "exit" | "quit" => break,
            "help" | "?" => print_help(),
            "clear" => print!("\x1B[2J\x1B[1;1H"),
            _ => match engine.run_prompt(input).await {
                Ok(outcome) => {
                    println!("{} {}", "Query:".dimmed(), outcome.compiled.query.dimmed());
                    println!("{}", outcome.summary);
                }
                Err(e) => eprintln!("{} {e:#}", "✗".red()),
            },
        }
    }

    Ok(())
}

fn print_help() {
    println!(
        r#"
Type natural language prompts to query metrics.

Examples:
  99th percentile latency for unicorn over the last 15 minutes
  avg latency for unicorn
  max error rate for unicorn-api in prod last hour

Commands:
  help, ?    Show this help message
  clear      Clear the screen
  exit, quit Exit the REPL

Tips:
  Use metric words like "latency", "errors", or "rps"
  Use time phrases like "last hour", "past 30 minutes"
  Mention a service declared in the ontology to scope the query
"#
    );
}
