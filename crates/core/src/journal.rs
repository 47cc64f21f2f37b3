use serde::{Deserialize, Serialize};

use crate::types::Intent;

pub const JOURNAL_FORMAT_VERSION: u16 = 1;

/// The seed a run started from plus every intent it consumed, in order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputJournal {
    pub format_version: u16,
    pub seed: u64,
    pub inputs: Vec<InputRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRecord {
    pub seq: u64,
    pub intent: Intent,
}

impl InputJournal {
    pub fn new(seed: u64) -> Self {
        Self { format_version: JOURNAL_FORMAT_VERSION, seed, inputs: Vec::new() }
    }

    /// Records `intent` under the next sequence number and returns that number.
    pub fn append(&mut self, intent: Intent) -> u64 {
        let seq = self.inputs.len() as u64;
        self.inputs.push(InputRecord { seq, intent });
        seq
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;

    #[test]
    fn append_numbers_inputs_from_zero() {
        let mut journal = InputJournal::new(5);
        assert_eq!(journal.append(Intent::ToggleDarkness), 0);
        assert_eq!(journal.append(Intent::Move(Direction::West)), 1);
        let expected = InputRecord { seq: 1, intent: Intent::Move(Direction::West) };
        assert_eq!(journal.inputs[1], expected);
    }

    #[test]
    fn json_keeps_every_field() {
        let mut journal = InputJournal::new(77);
        journal.append(Intent::Resize { width: 640, height: 480 });
        journal.append(Intent::NewGame);
        let text = journal.to_json().expect("serialize");
        assert_eq!(InputJournal::from_json(&text).expect("deserialize"), journal);
    }
}
