// Data models for entrybook

use crate::record::Record;
use eyre::{Result, eyre};
use serde::{Deserialize, Serialize};

/// Record types that can be built from positional form values
///
/// Values arrive in [`Record::field_names`] order.
pub trait FormEntry: Record + Sized {
    fn from_values(values: Vec<String>) -> Result<Self>;
}

/// Take exactly `N` values or report which fields were expected
fn take_values<T: Record, const N: usize>(values: Vec<String>) -> Result<[String; N]> {
    let count = values.len();
    values.try_into().map_err(|_| {
        eyre!(
            "{} needs {} values ({}), got {}",
            T::display_name(),
            N,
            T::field_names().join(", "),
            count
        )
    })
}

/// Quiz question, indexed by topic and difficulty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    pub topic: String,
    pub difficulty: String,
}

impl Record for Question {
    fn collection_name() -> &'static str {
        "questions"
    }

    fn display_name() -> &'static str {
        "Question"
    }

    fn field_names() -> &'static [&'static str] {
        &["text", "topic", "difficulty"]
    }

    fn indexed_field_names() -> &'static [&'static str] {
        &["topic", "difficulty"]
    }

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "text" => Some(&self.text),
            "topic" => Some(&self.topic),
            "difficulty" => Some(&self.difficulty),
            _ => None,
        }
    }

    fn summary(&self) -> &str {
        &self.text
    }
}

impl FormEntry for Question {
    fn from_values(values: Vec<String>) -> Result<Self> {
        let [text, topic, difficulty] = take_values::<Self, 3>(values)?;
        Ok(Self { text, topic, difficulty })
    }
}

/// Running-log entry, indexed by terrain and duration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub distance: String,
    pub terrain: String,
    pub duration: String,
}

impl Record for Run {
    fn collection_name() -> &'static str {
        "runs"
    }

    fn display_name() -> &'static str {
        "Run"
    }

    fn field_names() -> &'static [&'static str] {
        &["distance", "terrain", "duration"]
    }

    fn indexed_field_names() -> &'static [&'static str] {
        &["terrain", "duration"]
    }

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "distance" => Some(&self.distance),
            "terrain" => Some(&self.terrain),
            "duration" => Some(&self.duration),
            _ => None,
        }
    }

    fn summary(&self) -> &str {
        &self.distance
    }
}

impl FormEntry for Run {
    fn from_values(values: Vec<String>) -> Result<Self> {
        let [distance, terrain, duration] = take_values::<Self, 3>(values)?;
        Ok(Self {
            distance,
            terrain,
            duration,
        })
    }
}
