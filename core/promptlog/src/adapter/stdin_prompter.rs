//! 端末（stdin / stdout）からの入力

use common::error::Error;
use std::io::{self, BufRead, Write};

use crate::ports::outbound::Prompter;

#[derive(Debug, Clone, Default)]
pub struct StdinPrompter;

fn read_stdin_line() -> Result<String, Error> {
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| Error::io_msg(format!("Failed to read from stdin: {}", e)))?;
    Ok(strip_line_ending(&line).to_string())
}

fn strip_line_ending(line: &str) -> &str {
    line.strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(line)
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "yes" | "y")
}

impl Prompter for StdinPrompter {
    fn read_line(&self, question: &str) -> Result<String, Error> {
        println!("{}", question);
        read_stdin_line()
    }

    fn confirm(&self, question: &str) -> Result<bool, Error> {
        print!("{}", question);
        io::stdout()
            .flush()
            .map_err(|e| Error::io_msg(format!("Failed to flush stdout: {}", e)))?;
        Ok(is_yes(&read_stdin_line()?))
    }
}
