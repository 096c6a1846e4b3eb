//! Seed dataset embedded at compile time.

use std::collections::HashSet;

use serde::de::DeserializeOwned;
use shared::domain::{Contact, ContactId, Deal, DealId};
use thiserror::Error;

const CONTACTS_JSON: &str = include_str!("../fixtures/contacts.json");
const DEALS_JSON: &str = include_str!("../fixtures/deals.json");

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to decode {name} fixture: {source}")]
    Decode {
        name: &'static str,
        source: serde_json::Error,
    },
    #[error("contact fixture repeats id {0}")]
    DuplicateContactId(ContactId),
    #[error("deal fixture repeats id {0}")]
    DuplicateDealId(DealId),
}

/// Contacts in fixture order.
pub fn seed_contacts() -> Result<Vec<Contact>, FixtureError> {
    parse_contacts(CONTACTS_JSON)
}

pub fn seed_deals() -> Result<Vec<Deal>, FixtureError> {
    parse_deals(DEALS_JSON)
}

pub fn parse_contacts(raw: &str) -> Result<Vec<Contact>, FixtureError> {
    let contacts: Vec<Contact> = decode("contacts", raw)?;
    let mut seen = HashSet::new();
    for contact in &contacts {
        if !seen.insert(contact.id) {
            return Err(FixtureError::DuplicateContactId(contact.id));
        }
    }
    Ok(contacts)
}

pub fn parse_deals(raw: &str) -> Result<Vec<Deal>, FixtureError> {
    let deals: Vec<Deal> = decode("deals", raw)?;
    let mut seen = HashSet::new();
    for deal in &deals {
        if !seen.insert(deal.id) {
            return Err(FixtureError::DuplicateDealId(deal.id));
        }
    }
    Ok(deals)
}

fn decode<T: DeserializeOwned>(name: &'static str, raw: &str) -> Result<T, FixtureError> {
    serde_json::from_str(raw).map_err(|source| FixtureError::Decode { name, source })
}
