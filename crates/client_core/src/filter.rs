//! Derived list view: status filter plus free-text search.

use std::{fmt, str::FromStr};

use shared::{
    domain::{Contact, ContactStatus},
    error::UnknownVariant,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ContactStatus),
}

impl StatusFilter {
    pub fn matches(self, status: ContactStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }

    /// The sentinel followed by every status, in picker order.
    pub fn choices() -> impl Iterator<Item = StatusFilter> {
        std::iter::once(StatusFilter::All).chain(ContactStatus::ALL.map(StatusFilter::Only))
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("all"),
            StatusFilter::Only(status) => status.fmt(f),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse::<ContactStatus>()
            .map(StatusFilter::Only)
            .map_err(|_| UnknownVariant::new("status filter", s.trim()))
    }
}

impl From<ContactStatus> for StatusFilter {
    fn from(status: ContactStatus) -> Self {
        StatusFilter::Only(status)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search_term: String,
    pub status: StatusFilter,
}

impl FilterCriteria {
    pub fn new(search_term: impl Into<String>, status: StatusFilter) -> Self {
        Self {
            search_term: search_term.into(),
            status,
        }
    }

    pub fn is_unfiltered(&self) -> bool {
        self.search_term.is_empty() && self.status == StatusFilter::All
    }

    pub fn matches(&self, contact: &Contact) -> bool {
        self.matches_status(contact) && self.matches_search(contact)
    }

    pub fn matches_status(&self, contact: &Contact) -> bool {
        self.status.matches(contact.status)
    }

    /// Case-insensitive containment in first name, last name, email or
    /// company. An empty term matches everything.
    pub fn matches_search(&self, contact: &Contact) -> bool {
        if self.search_term.is_empty() {
            return true;
        }
        let needle = self.search_term.to_lowercase();
        [
            &contact.first_name,
            &contact.last_name,
            &contact.email,
            &contact.company,
        ]
        .into_iter()
        .any(|haystack| haystack.to_lowercase().contains(&needle))
    }

    /// Contacts passing both predicates, in collection order.
    pub fn apply<'a, I>(&self, contacts: I) -> Vec<&'a Contact>
    where
        I: IntoIterator<Item = &'a Contact>,
    {
        contacts.into_iter().filter(|c| self.matches(c)).collect()
    }
}

pub fn filter_contacts<'a>(contacts: &'a [Contact], criteria: &FilterCriteria) -> Vec<&'a Contact> {
    criteria.apply(contacts)
}
