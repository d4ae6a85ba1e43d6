//! Line-oriented question-bank reader.
//!
//! Format: blank lines separate records; a line starting with `- ` appends
//! a choice to the current record; any other non-blank line joins the
//! record's prompt (space-joined, so prompts may span multiple lines).

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// One question with its ordered answer choices.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Question text, possibly carrying `**bold**` spans.
    pub prompt: String,
    /// Ordered choice texts; may be empty.
    pub choices: Vec<String>,
}

impl Record {
    fn is_started(&self) -> bool {
        !self.prompt.is_empty()
    }
}

/// Error raised when the bank source cannot be read.
///
/// This is the only fatal error in the pipeline; malformed markup and
/// layout edge cases all degrade in place.
#[derive(Debug)]
pub enum BankError {
    /// Input path missing or unreadable.
    Read {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

impl fmt::Display for BankError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "cannot read question bank {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for BankError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
        }
    }
}

/// Parse bank text into records.
///
/// Records without a prompt are never emitted; choice lines seen before
/// any prompt text attach to the record that eventually gets one.
pub fn parse_records(input: &str) -> Vec<Record> {
    let mut records = Vec::new();
    let mut current = Record::default();

    for raw in input.lines() {
        let line = raw.trim();
        if line.is_empty() {
            if current.is_started() {
                records.push(core::mem::take(&mut current));
            }
        } else if let Some(choice) = line.strip_prefix("- ") {
            current.choices.push(choice.to_string());
        } else if current.is_started() {
            current.prompt.push(' ');
            current.prompt.push_str(line);
        } else {
            current.prompt = line.to_string();
        }
    }
    if current.is_started() {
        records.push(current);
    }

    log::debug!("parsed {} question records", records.len());
    records
}

/// Read and parse a bank file.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<Record>, BankError> {
    let path = path.as_ref();
    let input = fs::read_to_string(path).map_err(|source| BankError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_records(&input))
}
