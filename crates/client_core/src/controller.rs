//! Contact list view-state machine.
//!
//! One controller owns the contact collection, the add-contact form buffer,
//! the filter criteria and the current view mode. Every mutation goes through
//! a handler on the controller and completes before the next one starts.

use std::{collections::HashSet, fmt};

use chrono::{DateTime, Utc};
use shared::domain::{Contact, ContactId, ContactStatus};
use storage::FixtureSource;

use crate::{
    error::ControllerError,
    filter::{FilterCriteria, StatusFilter},
    form::{ContactField, ContactForm, ValidationErrors},
    notify::Notifier,
};

pub const CONTACT_ADDED_MESSAGE: &str = "Contact added successfully!";
pub const CONTACT_DELETED_MESSAGE: &str = "Contact deleted successfully";
pub const FORM_INVALID_MESSAGE: &str = "Please fix the errors in the form";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Loading,
    Browsing,
    Adding,
    Viewing(ContactId),
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewMode::Loading => f.write_str("loading"),
            ViewMode::Browsing => f.write_str("browsing"),
            ViewMode::Adding => f.write_str("adding"),
            ViewMode::Viewing(id) => write!(f, "viewing contact {id}"),
        }
    }
}

/// What a renderer should show right now. The viewed contact is resolved by
/// id, so a missing record renders as the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View<'a> {
    Loading,
    Browsing,
    Adding,
    Viewing(&'a Contact),
}

/// Hands out strictly increasing contact ids, never reusing one that has
/// been observed in the collection.
#[derive(Debug, Clone, Default)]
pub struct ContactIdAllocator {
    last: i64,
}

impl ContactIdAllocator {
    pub fn observe(&mut self, id: ContactId) {
        self.last = self.last.max(id.0);
    }

    /// `None` once the id space is used up.
    pub fn next_id(&mut self) -> Option<ContactId> {
        self.last = self.last.checked_add(1)?;
        Some(ContactId(self.last))
    }
}

pub struct ContactListController<N> {
    contacts: Vec<Contact>,
    mode: ViewMode,
    form: ContactForm,
    errors: ValidationErrors,
    criteria: FilterCriteria,
    ids: ContactIdAllocator,
    notifier: N,
}

impl<N: Notifier> ContactListController<N> {
    pub fn new(notifier: N) -> Self {
        Self {
            contacts: Vec::new(),
            mode: ViewMode::Loading,
            form: ContactForm::default(),
            errors: ValidationErrors::default(),
            criteria: FilterCriteria::default(),
            ids: ContactIdAllocator::default(),
            notifier,
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn is_loading(&self) -> bool {
        self.mode == ViewMode::Loading
    }

    pub fn view(&self) -> View<'_> {
        match self.mode {
            ViewMode::Loading => View::Loading,
            ViewMode::Browsing => View::Browsing,
            ViewMode::Adding => View::Adding,
            ViewMode::Viewing(id) => match self.contact(id) {
                Some(contact) => View::Viewing(contact),
                None => View::Browsing,
            },
        }
    }

    /// Whole collection, newest-created first.
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn contact(&self, id: ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    pub fn selected_contact(&self) -> Option<&Contact> {
        match self.view() {
            View::Viewing(contact) => Some(contact),
            _ => None,
        }
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn validation_errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn filtered_contacts(&self) -> Vec<&Contact> {
        self.criteria.apply(&self.contacts)
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Pulls the seed contacts from `source` and leaves `Loading`.
    pub async fn load_from<S>(&mut self, source: &S) -> Result<usize, ControllerError>
    where
        S: FixtureSource + ?Sized,
    {
        if !self.is_loading() {
            return Err(ControllerError::AlreadyLoaded);
        }
        let contacts = source.load_contacts().await?;
        self.finish_loading(contacts)
    }

    /// Installs the seed contacts and performs the single
    /// `Loading -> Browsing` transition.
    pub fn finish_loading(&mut self, contacts: Vec<Contact>) -> Result<usize, ControllerError> {
        if !self.is_loading() {
            return Err(ControllerError::AlreadyLoaded);
        }

        let mut seen = HashSet::with_capacity(contacts.len());
        let mut accepted = Vec::with_capacity(contacts.len());
        for contact in contacts {
            if seen.insert(contact.id) {
                self.ids.observe(contact.id);
                accepted.push(contact);
            } else {
                tracing::warn!(id = %contact.id, "dropping seed contact with duplicate id");
            }
        }

        self.contacts = accepted;
        self.mode = ViewMode::Browsing;
        tracing::info!(count = self.contacts.len(), "contacts loaded");
        Ok(self.contacts.len())
    }

    pub fn begin_add(&mut self) -> Result<(), ControllerError> {
        self.require_mode("add a contact", ViewMode::Browsing)?;
        self.transition(ViewMode::Adding);
        Ok(())
    }

    /// Leaves the form without saving. The draft stays in the buffer.
    pub fn cancel_add(&mut self) -> Result<(), ControllerError> {
        self.require_mode("cancel adding", ViewMode::Adding)?;
        self.transition(ViewMode::Browsing);
        Ok(())
    }

    /// Edits one text input, clearing any pending error for it.
    pub fn update_field(&mut self, field: ContactField, value: impl Into<String>) {
        self.form.set(field, value);
        self.errors.clear_field(field);
    }

    pub fn update_status(&mut self, status: ContactStatus) {
        self.form.status = status;
    }

    pub fn submit(&mut self) -> Result<ContactId, ControllerError> {
        self.submit_at(Utc::now())
    }

    /// Validates the form; on success prepends the new contact stamped with
    /// `now` and returns to the list.
    pub fn submit_at(&mut self, now: DateTime<Utc>) -> Result<ContactId, ControllerError> {
        self.require_mode("submit the contact form", ViewMode::Adding)?;

        let valid = match self.form.validate() {
            Ok(valid) => valid,
            Err(errors) => {
                tracing::debug!(fields = errors.len(), "contact form rejected");
                self.errors = errors.clone();
                self.notifier.error(FORM_INVALID_MESSAGE);
                return Err(ControllerError::Validation(errors));
            }
        };

        let Some(id) = self.ids.next_id() else {
            tracing::error!("contact id space exhausted");
            return Err(ControllerError::IdsExhausted);
        };
        self.contacts.insert(0, valid.into_contact(id, now));
        self.form = ContactForm::default();
        self.errors.clear();
        self.transition(ViewMode::Browsing);
        tracing::info!(%id, "contact added");
        self.notifier.success(CONTACT_ADDED_MESSAGE);
        Ok(id)
    }

    pub fn select(&mut self, id: ContactId) -> Result<(), ControllerError> {
        self.require_mode("open a contact", ViewMode::Browsing)?;
        if self.contact(id).is_none() {
            return Err(ControllerError::UnknownContact(id));
        }
        self.transition(ViewMode::Viewing(id));
        Ok(())
    }

    pub fn back(&mut self) -> Result<(), ControllerError> {
        if !matches!(self.mode, ViewMode::Viewing(_)) {
            return Err(self.invalid("go back to the list"));
        }
        self.transition(ViewMode::Browsing);
        Ok(())
    }

    /// Removes the contact with `id`. Returns `false` without side effects
    /// when no such contact exists.
    pub fn delete(&mut self, id: ContactId) -> Result<bool, ControllerError> {
        if !matches!(self.mode, ViewMode::Browsing | ViewMode::Viewing(_)) {
            return Err(self.invalid("delete a contact"));
        }

        let Some(index) = self.contacts.iter().position(|c| c.id == id) else {
            tracing::debug!(%id, "delete ignored; no such contact");
            return Ok(false);
        };

        self.contacts.remove(index);
        if self.mode == ViewMode::Viewing(id) {
            self.transition(ViewMode::Browsing);
        }
        tracing::info!(%id, "contact deleted");
        self.notifier.success(CONTACT_DELETED_MESSAGE);
        Ok(true)
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.criteria.search_term = term.into();
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.criteria.status = status;
    }

    fn require_mode(&self, action: &'static str, wanted: ViewMode) -> Result<(), ControllerError> {
        if self.mode == wanted {
            Ok(())
        } else {
            Err(self.invalid(action))
        }
    }

    fn invalid(&self, action: &'static str) -> ControllerError {
        ControllerError::InvalidTransition {
            action,
            mode: self.mode,
        }
    }

    fn transition(&mut self, next: ViewMode) {
        tracing::debug!(from = %self.mode, to = %next, "view mode transition");
        self.mode = next;
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
