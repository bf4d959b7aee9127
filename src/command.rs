// Interactive command grammar and dispatch

use crate::error::StoreError;
use crate::filter::Filter;
use crate::models::FormEntry;
use crate::record::{Record, RecordId};
use crate::session::Session;
use clap::{Parser, Subcommand};
use eyre::{Result, eyre};
use serde::Serialize;

/// One line of REPL input; the first token names the command
#[derive(Debug, Parser)]
#[command(multicall = true)]
pub struct ReplLine {
    #[command(subcommand)]
    pub command: ReplCommand,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum ReplCommand {
    /// Add an entry under an explicit ID
    Add {
        id: RecordId,
        #[arg(required = true, allow_hyphen_values = true)]
        values: Vec<String>,
    },

    /// Add an entry under the suggested next ID
    New {
        #[arg(required = true, allow_hyphen_values = true)]
        values: Vec<String>,
    },

    /// Search with field=value filters (no filters matches everything)
    Search { filters: Vec<Filter> },

    /// List every entry
    List,

    /// Delete an entry
    Delete { id: RecordId },

    /// Replace the fields of an entry
    Edit {
        id: RecordId,
        #[arg(required = true, allow_hyphen_values = true)]
        values: Vec<String>,
    },

    /// Show one entry
    Show { id: RecordId },

    /// Show the next entry, wrapping around
    Next,

    /// List the values currently used by an indexed field
    Values { field: String },

    /// Leave the session
    #[command(visible_alias = "exit")]
    Quit,
}

/// What the front end should print after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// A mutation succeeded
    Done(String),
    /// Result rows
    Lines(Vec<String>),
    /// Nothing to show
    Empty(String),
    Quit,
}

#[derive(Serialize)]
struct Row<'a, T: Serialize> {
    id: RecordId,
    #[serde(flatten)]
    record: &'a T,
}

/// Split a line into words
///
/// Double quotes group words; inside quotes a backslash escapes the next
/// character. `""` yields an empty word.
pub fn split_line(line: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quoted = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' if quoted => {
                let escaped = chars.next().ok_or_else(|| eyre!("Trailing backslash in quoted value"))?;
                current.push(escaped);
            }
            '"' => {
                quoted = !quoted;
                in_token = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if quoted {
        return Err(eyre!("Unterminated quote"));
    }
    if in_token {
        tokens.push(current);
    }

    Ok(tokens)
}

/// Run one command against the session
pub fn execute<T: FormEntry>(session: &mut Session<T>, command: ReplCommand, json: bool) -> Result<Reply> {
    let reply = match command {
        ReplCommand::Add { id, values } => Reply::Done(session.add(id, T::from_values(values)?)?),
        ReplCommand::New { values } => Reply::Done(session.add_next(T::from_values(values)?)?),
        ReplCommand::Edit { id, values } => Reply::Done(session.edit(id, T::from_values(values)?)?),
        ReplCommand::Delete { id } => Reply::Done(session.delete(id)?),
        ReplCommand::Search { filters } => search(session, &filters, json)?,
        ReplCommand::List => search(session, &[], json)?,
        ReplCommand::Show { id } => {
            let record = session.store().get(id).ok_or(StoreError::NotFound {
                kind: T::display_name(),
                id,
            })?;
            Reply::Lines(vec![render(id, record, json)?])
        }
        ReplCommand::Next => match session.cycle() {
            Some((id, record)) => Reply::Lines(vec![render(id, record, json)?]),
            None => Reply::Empty("No entries yet.".to_string()),
        },
        ReplCommand::Values { field } => {
            if !T::indexed_field_names().contains(&field.as_str()) {
                return Err(eyre!(
                    "{} is not an indexed field (indexed: {})",
                    field,
                    T::indexed_field_names().join(", ")
                ));
            }
            let values = session.store().distinct_values(&field);
            if values.is_empty() {
                Reply::Empty(format!("No {} values in use.", field))
            } else {
                Reply::Lines(values.into_iter().map(str::to_string).collect())
            }
        }
        ReplCommand::Quit => Reply::Quit,
    };

    Ok(reply)
}

fn search<T: FormEntry>(session: &Session<T>, filters: &[Filter], json: bool) -> Result<Reply> {
    let lines = if json {
        session
            .store()
            .find(filters)
            .into_iter()
            .map(|(id, record)| render(id, record, true))
            .collect::<Result<Vec<_>>>()?
    } else {
        session.search(filters)
    };

    if lines.is_empty() {
        Ok(Reply::Empty("No results found.".to_string()))
    } else {
        Ok(Reply::Lines(lines))
    }
}

/// One-line rendering of a record, as JSON or `id: field=value | ...`
fn render<T: Record>(id: RecordId, record: &T, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string(&Row { id, record })?);
    }

    let fields: Vec<String> = T::field_names()
        .iter()
        .map(|name| format!("{}={}", name, record.field(name).unwrap_or("")))
        .collect();
    Ok(format!("{}: {}", id, fields.join(" | ")))
}
