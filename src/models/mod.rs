//! Wire-level data models shared between the quiz flow and the admin view.

mod analytics;
mod question;
mod recommendation;

pub use analytics::{AdminSnapshot, LogEntry, RecentRecommendations, SegmentsSummary};
pub use question::{ChoiceOption, Question, QuestionKind};
pub use recommendation::{EmailCopy, Pricing, ProductDetail, Recommendation};
