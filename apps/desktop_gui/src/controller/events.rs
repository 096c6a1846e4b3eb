//! UI/backend events and error modeling for desktop GUI controller.

use std::fmt;

use shared::domain::{Contact, Deal};

use crate::backend_bridge::commands::BackendCommand;

#[derive(Debug)]
pub enum UiEvent {
    ContactsLoaded(Vec<Contact>),
    DealsLoaded(Vec<Deal>),
    LoadFailed {
        command: BackendCommand,
        error: UiError,
    },
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Fixtures,
    Preferences,
    CommandQueue,
}

impl UiErrorContext {
    fn label(self) -> &'static str {
        match self {
            UiErrorContext::BackendStartup => "Backend startup failed",
            UiErrorContext::Fixtures => "Could not load data",
            UiErrorContext::Preferences => "Could not save preferences",
            UiErrorContext::CommandQueue => "Backend unavailable",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiError {
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn new(context: UiErrorContext, message: impl Into<String>) -> Self {
        Self {
            context,
            message: message.into(),
        }
    }

    /// Whether retrying the same command can help.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.context,
            UiErrorContext::Fixtures | UiErrorContext::CommandQueue
        )
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for UiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.context.label(), self.message)
    }
}
