//! Plain-text rendering of the shell and the contact view states.

use chrono::{Datelike, Utc};
use client_core::{
    presentation::{format_currency, format_date, initials, status_label},
    shell::{footer_text, APP_NAME, NOT_FOUND_MESSAGE},
    ContactField, ContactListController, DealPipeline, FilterCriteria, NavigationShell, Notifier,
    Route, StatusFilter, View,
};
use shared::domain::Contact;

pub fn page<N: Notifier>(
    shell: &NavigationShell,
    controller: &ContactListController<N>,
    pipeline: &DealPipeline,
) {
    let route = shell.route();
    println!("== {APP_NAME} | {} ==", route.title());
    match route {
        Route::Dashboard | Route::Contacts => contacts_view(controller, pipeline),
        Route::Deals => deals(pipeline),
        Route::NotFound(path) => {
            println!("404: nothing at {path}");
            println!("{NOT_FOUND_MESSAGE}");
        }
    }
    println!("{}", footer_text(Utc::now().year()));
}

pub fn nav(shell: &NavigationShell) {
    for item in shell.nav_items() {
        let marker = if shell.is_active(item) { '*' } else { ' ' };
        println!(" {marker} {:<10} {}", item.label, item.path);
    }
    let theme = if shell.theme().is_dark() { "dark" } else { "light" };
    println!("   theme: {theme}");
}

pub fn contacts_view<N: Notifier>(
    controller: &ContactListController<N>,
    pipeline: &DealPipeline,
) {
    match controller.view() {
        View::Loading => println!("Loading contacts..."),
        View::Browsing => list(controller),
        View::Adding => form(controller),
        View::Viewing(contact) => detail(contact, pipeline),
    }
}

pub fn list<N: Notifier>(controller: &ContactListController<N>) {
    let visible = controller.filtered_contacts();
    println!(
        "Contacts ({} of {}){}",
        visible.len(),
        controller.contacts().len(),
        filter_suffix(controller.criteria())
    );

    if visible.is_empty() {
        println!("  No contacts found");
        return;
    }
    for contact in visible {
        println!(
            "  {:>3}  {:<2} {:<20} {:<20} {:<26} [{}]",
            contact.id,
            initials(contact),
            contact.full_name(),
            contact.company,
            contact.email,
            status_label(contact.status),
        );
    }
}

fn filter_suffix(criteria: &FilterCriteria) -> String {
    if criteria.is_unfiltered() {
        return String::new();
    }
    let mut suffix = String::new();
    if !criteria.search_term.is_empty() {
        suffix.push_str(&format!(" search: {:?}", criteria.search_term));
    }
    if let StatusFilter::Only(status) = criteria.status {
        suffix.push_str(&format!(" status: {}", status_label(status)));
    }
    suffix
}

pub fn form<N: Notifier>(controller: &ContactListController<N>) {
    let draft = controller.form();
    let errors = controller.validation_errors();
    println!("Add New Contact");
    for field in ContactField::ALL {
        let value = draft.value(field);
        let shown = if value.is_empty() { field.placeholder() } else { value };
        println!("  {:<11} {shown}", field.label());
        if let Some(err) = errors.get(field) {
            println!("  {:<11} ! {err}", "");
        }
    }
    println!("  {:<11} {}", "Status", status_label(draft.status));
}

pub fn detail(contact: &Contact, pipeline: &DealPipeline) {
    println!(
        "{} ({})  [{}]",
        contact.full_name(),
        initials(contact),
        status_label(contact.status)
    );
    println!("  Email    {}", contact.email);
    println!("  Phone    {}", contact.phone);
    println!("  Company  {}", contact.company);
    println!("  Added    {}", format_date(&contact.created_at));
    if let Some(notes) = &contact.notes {
        println!("  Notes    {notes}");
    }
    let deals = pipeline.deals_for_contact(contact.id);
    if !deals.is_empty() {
        println!("  Deals");
        for deal in deals {
            println!(
                "    {:<32} {:>10}  {}",
                deal.title,
                format_currency(deal.value),
                deal.stage.label()
            );
        }
    }
}

pub fn deals(pipeline: &DealPipeline) {
    println!(
        "Pipeline {}  (open {})",
        format_currency(pipeline.total_value()),
        format_currency(pipeline.open_value())
    );
    for summary in pipeline.stages() {
        println!(
            "  {:<14} {:>2} deals {:>10}",
            summary.stage.label(),
            summary.count(),
            format_currency(summary.total_value)
        );
        for deal in &summary.deals {
            println!(
                "      {:<32} {:<18} {:>10} {:>3}%  close {}",
                deal.title,
                deal.contact_name,
                format_currency(deal.value),
                deal.probability,
                format_date(&deal.expected_close_date)
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::ContactStatus;

    #[test]
    fn filter_suffix_only_names_active_filters() {
        assert_eq!(filter_suffix(&FilterCriteria::default()), "");
        assert_eq!(
            filter_suffix(&FilterCriteria::new("acme", StatusFilter::All)),
            " search: \"acme\""
        );
        assert_eq!(
            filter_suffix(&FilterCriteria::new("", ContactStatus::Churned.into())),
            " status: Churned"
        );
    }
}
