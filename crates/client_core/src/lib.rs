//! Contact list view-state machine and the client-side collaborators that
//! surround it: notifications, navigation shell, presentation helpers and
//! settings.

pub mod config;
pub mod controller;
pub mod deals;
pub mod error;
pub mod filter;
pub mod form;
pub mod notify;
pub mod presentation;
pub mod shell;

pub use config::{load_settings, ClientSettings};
pub use controller::{ContactIdAllocator, ContactListController, View, ViewMode};
pub use deals::{DealPipeline, StageSummary};
pub use error::ControllerError;
pub use filter::{FilterCriteria, StatusFilter};
pub use form::{ContactField, ContactForm, FieldError, ValidationErrors};
pub use notify::{Notification, NotificationKind, Notifier, TracingNotifier};
pub use shell::{NavigationShell, Route, ThemeState};
