//! Session state: the answer ledger, the question cursor, and the pure
//! state machine driving the customer and admin screens.
//!
//! All mutation goes through [`SessionState::apply`], which takes an
//! [`Event`] and returns the [`Effect`]s the async shell must execute. The
//! machine itself never performs IO, so every transition is unit-testable
//! without a terminal or a server.

mod admin;
mod ledger;
mod navigator;
mod state;

pub use admin::{AdminState, ProfileFilter};
pub use ledger::{AnswerLedger, AnswerValue};
pub use navigator::Navigator;
pub use state::{
    CatalogStatus, Effect, Event, Mode, SessionState, View, ADMIN_ERROR, CATALOG_ERROR,
    EMAIL_ERROR, SUBMIT_ERROR,
};
