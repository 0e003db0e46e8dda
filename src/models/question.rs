use serde::Deserialize;

/// Discriminant for the input widget a question needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    SingleChoice,
    MultiChoice,
    Number,
    Text,
}

impl QuestionKind {
    /// True for kinds whose widget is an edit field rather than an option
    /// list, i.e. key presses are text input.
    pub fn is_free_input(&self) -> bool {
        matches!(self, Self::Number | Self::Text)
    }
}

/// One selectable option of a choice question.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChoiceOption {
    pub id: String,
    pub label: String,
}

/// A quiz question as served by `/quiz/questions`.
///
/// Immutable once fetched; the catalog is the only source of questions for
/// the whole session.
#[derive(Debug, Clone, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(default)]
    pub options: Vec<ChoiceOption>,
    #[serde(default = "default_required")]
    pub required: bool,
    #[serde(default)]
    pub help_text: Option<String>,
}

fn default_required() -> bool {
    true
}
