//! Display helpers for renderers. None of this feeds back into controller
//! state.

use chrono::{DateTime, Utc};
use num_format::{Locale, ToFormattedString};
use shared::domain::{Contact, ContactStatus};

pub fn status_color_class(status: ContactStatus) -> &'static str {
    match status {
        ContactStatus::Lead => "bg-blue-100 text-blue-700 dark:bg-blue-900 dark:text-blue-300",
        ContactStatus::Prospect => {
            "bg-purple-100 text-purple-700 dark:bg-purple-900 dark:text-purple-300"
        }
        ContactStatus::Customer => {
            "bg-green-100 text-green-700 dark:bg-green-900 dark:text-green-300"
        }
        ContactStatus::Churned => "bg-red-100 text-red-700 dark:bg-red-900 dark:text-red-300",
    }
}

pub fn status_label(status: ContactStatus) -> &'static str {
    match status {
        ContactStatus::Lead => "Lead",
        ContactStatus::Prospect => "Prospect",
        ContactStatus::Customer => "Customer",
        ContactStatus::Churned => "Churned",
    }
}

/// "Mar 15, 2023".
pub fn format_date(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%b %-d, %Y").to_string()
}

pub fn format_currency(amount: u64) -> String {
    format!("${}", amount.to_formatted_string(&Locale::en))
}

pub fn initials(contact: &Contact) -> String {
    contact
        .first_name
        .chars()
        .next()
        .into_iter()
        .chain(contact.last_name.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}
