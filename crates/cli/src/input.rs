// Terminal input: number lists and delete confirmations

use anyhow::{bail, Context, Result};
use clap::Args;
use std::io::{BufRead, IsTerminal, Read, Write};
use std::path::PathBuf;

#[derive(Args, Clone, Debug)]
pub struct NumberSource {
    /// Numbers separated by newlines, commas or semicolons
    #[arg(long, conflicts_with = "file")]
    pub numbers: Option<String>,

    /// File with one number per line (or comma/semicolon separated)
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

impl NumberSource {
    /// Raw text to analyse; falls back to piped stdin
    pub fn read(&self) -> Result<String> {
        if let Some(numbers) = &self.numbers {
            return Ok(numbers.clone());
        }
        if let Some(path) = &self.file {
            return std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read numbers from {}", path.display()));
        }

        let mut stdin = std::io::stdin();
        if stdin.is_terminal() {
            bail!("No numbers given. Use --numbers, --file, or pipe them on stdin.");
        }
        let mut text = String::new();
        stdin
            .read_to_string(&mut text)
            .context("Failed to read numbers from stdin")?;
        Ok(text)
    }
}

/// Gate for destructive commands: `--yes`, or an interactive y/N prompt
pub fn ensure_confirmed(yes: bool, what: &str) -> Result<()> {
    if yes {
        return Ok(());
    }
    let stdin = std::io::stdin();
    if !stdin.is_terminal() {
        bail!("Refusing to delete {} without --yes", what);
    }

    print!("Delete {}? This cannot be undone. [y/N] ", what);
    std::io::stdout().flush()?;
    let mut answer = String::new();
    stdin
        .lock()
        .read_line(&mut answer)
        .context("Failed to read confirmation")?;
    if !is_yes(&answer) {
        bail!("Aborted");
    }
    Ok(())
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
