// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Run commands - batch script and single line execution

use crate::campus::Campus;
use crate::commands::dispatch::execute_line;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use tracing::{info, warn};

/// Execute a command script.
///
/// The first non-blank line holds the number of commands that follow; each
/// following line is executed and its reply written to `out`. Returns the
/// number of commands executed.
pub fn run_script<R: BufRead, W: Write>(campus: &mut Campus, input: R, mut out: W) -> Result<usize> {
    let mut lines = input.lines();

    let expected: usize = loop {
        let Some(line) = lines.next() else {
            return Ok(0);
        };
        let line = line.context("Failed to read command count")?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            break trimmed
                .parse()
                .with_context(|| format!("Expected a command count, got {trimmed:?}"))?;
        }
    };

    let mut executed = 0;
    for line in lines.take(expected) {
        let line = line.context("Failed to read command")?;
        let reply = execute_line(campus, line.trim_end());
        write!(out, "{reply}").context("Failed to write reply")?;
        executed += 1;
    }
    out.flush().context("Failed to flush output")?;

    if executed < expected {
        warn!("Script announced {} commands but only {} were present", expected, executed);
    }
    Ok(executed)
}

/// Run the `run` command: execute a script file, or stdin when no path is given
pub fn run(campus: &mut Campus, script: Option<PathBuf>) -> Result<()> {
    let stdout = io::stdout();
    let out = io::BufWriter::new(stdout.lock());

    let executed = match script {
        Some(path) => {
            let file = File::open(&path)
                .with_context(|| format!("Failed to open script {}", path.display()))?;
            run_script(campus, BufReader::new(file), out)?
        }
        None => run_script(campus, io::stdin().lock(), out)?,
    };

    info!("Executed {} commands", executed);
    Ok(())
}

/// Run the `exec` command: execute one command line given as words
pub fn exec(campus: &mut Campus, words: &[String]) -> Result<()> {
    let line = words.join(" ");
    let reply = execute_line(campus, &line);
    print!("{reply}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ClassRecord;

    fn campus() -> Campus {
        let mut campus = Campus::new();
        campus.graph.add_edge(1, 2, 5);
        campus.catalog.insert(ClassRecord::new("COP3530", 2, 540, 600));
        campus
    }

    #[test]
    fn test_run_script() {
        let mut campus = campus();
        let script = "3\ninsert \"Ada\" 12345678 1 1 COP3530\nprintShortestEdges 12345678\nbogus\nisConnected 1 2\n";
        let mut out = Vec::new();

        let executed = run_script(&mut campus, script.as_bytes(), &mut out).unwrap();

        assert_eq!(executed, 3);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "successful\nName: Ada\nCOP3530 | Total Time: 5\nunsuccessful\n"
        );
    }

    #[test]
    fn test_run_script_short_input() {
        let mut campus = campus();
        let mut out = Vec::new();

        let executed = run_script(&mut campus, "\n5\nisConnected 1 2\n".as_bytes(), &mut out).unwrap();

        assert_eq!(executed, 1);
        assert_eq!(String::from_utf8(out).unwrap(), "successful\n");
    }

    #[test]
    fn test_run_script_bad_count() {
        let mut campus = campus();
        assert!(run_script(&mut campus, "many\n".as_bytes(), Vec::new()).is_err());
        assert_eq!(run_script(&mut campus, "".as_bytes(), Vec::new()).unwrap(), 0);
    }
}
