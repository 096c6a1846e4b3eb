//! New-contact form buffer and its validation rules.

use std::{collections::BTreeMap, fmt, str::FromStr};

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use shared::{
    domain::{Contact, ContactId, ContactStatus},
    error::UnknownVariant,
};
use thiserror::Error;

static EMAIL_SHAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").unwrap());

/// Free-text inputs of the contact form. Status is a fixed choice and is
/// never validated, so it is not listed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContactField {
    FirstName,
    LastName,
    Email,
    Phone,
    Company,
}

impl ContactField {
    pub const ALL: [ContactField; 5] = [
        ContactField::FirstName,
        ContactField::LastName,
        ContactField::Email,
        ContactField::Phone,
        ContactField::Company,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ContactField::FirstName => "first_name",
            ContactField::LastName => "last_name",
            ContactField::Email => "email",
            ContactField::Phone => "phone",
            ContactField::Company => "company",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ContactField::FirstName => "First name",
            ContactField::LastName => "Last name",
            ContactField::Email => "Email",
            ContactField::Phone => "Phone",
            ContactField::Company => "Company",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            ContactField::FirstName => "John",
            ContactField::LastName => "Doe",
            ContactField::Email => "john.doe@example.com",
            ContactField::Phone => "(555) 123-4567",
            ContactField::Company => "Acme Inc.",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ContactField {
    type Err = UnknownVariant;

    /// Accepts `first_name`, `first-name`, `firstName` and so on.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|field| field.key().replace('_', "") == wanted)
            .ok_or_else(|| UnknownVariant::new("contact field", s.trim()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{} is required", .0.label())]
    Required(ContactField),
    #[error("Email is invalid")]
    InvalidEmail,
}

/// Per-field validation failures, keyed in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<ContactField, FieldError>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: ContactField) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    pub fn contains(&self, field: ContactField) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn fields(&self) -> impl Iterator<Item = ContactField> + '_ {
        self.errors.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ContactField, &FieldError)> + '_ {
        self.errors.iter().map(|(field, err)| (*field, err))
    }

    fn insert(&mut self, field: ContactField, err: FieldError) {
        self.errors.insert(field, err);
    }

    pub(crate) fn clear_field(&mut self, field: ContactField) -> bool {
        self.errors.remove(&field).is_some()
    }

    pub(crate) fn clear(&mut self) {
        self.errors.clear();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub status: ContactStatus,
}

impl ContactForm {
    pub fn value(&self, field: ContactField) -> &str {
        match field {
            ContactField::FirstName => &self.first_name,
            ContactField::LastName => &self.last_name,
            ContactField::Email => &self.email,
            ContactField::Phone => &self.phone,
            ContactField::Company => &self.company,
        }
    }

    pub fn value_mut(&mut self, field: ContactField) -> &mut String {
        match field {
            ContactField::FirstName => &mut self.first_name,
            ContactField::LastName => &mut self.last_name,
            ContactField::Email => &mut self.email,
            ContactField::Phone => &mut self.phone,
            ContactField::Company => &mut self.company,
        }
    }

    pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
        *self.value_mut(field) = value.into();
    }

    /// Runs every rule and reports all failing fields at once.
    pub fn validate(&self) -> Result<ValidContact, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        for field in ContactField::ALL {
            if self.value(field).trim().is_empty() {
                errors.insert(field, FieldError::Required(field));
            }
        }

        if !errors.contains(ContactField::Email) && !is_valid_email(&self.email) {
            errors.insert(ContactField::Email, FieldError::InvalidEmail);
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ValidContact {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            company: self.company.clone(),
            status: self.status,
        })
    }
}

/// `local@domain.tld` shape check; no attempt at RFC 5322.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}

/// Field values that passed validation, exactly as submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidContact {
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    company: String,
    status: ContactStatus,
}

impl ValidContact {
    pub fn into_contact(self, id: ContactId, created_at: DateTime<Utc>) -> Contact {
        Contact {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            company: self.company,
            status: self.status,
            notes: None,
            created_at,
        }
    }
}
