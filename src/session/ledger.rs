//! The answer ledger: question id -> current answer for this session.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single answer, polymorphic over the question kind.
///
/// Serialized untagged so the ledger flattens to the same JSON object the
/// backend expects: single choice, number, and text answers become plain
/// strings, multi-choice answers become arrays of option ids. Number values
/// stay raw strings on purpose; range and type validation is the server's
/// job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Multi(Vec<String>),
    Single(String),
    Number(String),
    Text(String),
}

/// In-memory mapping from question id to the user's current answer.
///
/// Built incrementally as the user interacts; never contains entries for
/// questions the user has not touched. Read in full exactly once per
/// submission and cleared entirely on restart.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct AnswerLedger {
    answers: BTreeMap<String, AnswerValue>,
}

impl AnswerLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the answer for a question. Last write wins.
    pub fn set(&mut self, question_id: &str, value: AnswerValue) {
        self.answers.insert(question_id.to_string(), value);
    }

    pub fn get(&self, question_id: &str) -> Option<&AnswerValue> {
        self.answers.get(question_id)
    }

    /// Flip membership of `option_id` in a multi-choice answer.
    ///
    /// Adds the option if absent, removes it if present; never produces
    /// duplicates. A non-multi value under the same key is replaced by a
    /// fresh single-element set, matching what a checkbox group does when a
    /// question's stored value has the wrong shape.
    pub fn toggle_option(&mut self, question_id: &str, option_id: &str) {
        match self.answers.get_mut(question_id) {
            Some(AnswerValue::Multi(selected)) => {
                if let Some(pos) = selected.iter().position(|id| id == option_id) {
                    selected.remove(pos);
                } else {
                    selected.push(option_id.to_string());
                }
            }
            _ => {
                self.answers.insert(
                    question_id.to_string(),
                    AnswerValue::Multi(vec![option_id.to_string()]),
                );
            }
        }
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn clear(&mut self) {
        self.answers.clear();
    }

    /// Serialize to the flat JSON object sent to `/quiz/recommend`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
