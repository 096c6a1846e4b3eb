use shared::domain::ContactId;
use storage::FixtureError;
use thiserror::Error;

use crate::{controller::ViewMode, form::ValidationErrors};

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("cannot {action} while {mode}")]
    InvalidTransition {
        action: &'static str,
        mode: ViewMode,
    },
    #[error("no contact with id {0}")]
    UnknownContact(ContactId),
    #[error("contacts were already loaded")]
    AlreadyLoaded,
    #[error("no contact ids left to allocate")]
    IdsExhausted,
    #[error("contact form has {} invalid field(s)", .0.len())]
    Validation(ValidationErrors),
    #[error(transparent)]
    Fixture(#[from] FixtureError),
}

impl ControllerError {
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            ControllerError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}
