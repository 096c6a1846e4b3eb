use client_core::{
    ContactField, ContactListController, ControllerError, FilterCriteria, StatusFilter,
};
use proptest::prelude::*;
use shared::domain::{Contact, ContactId, ContactStatus};
use storage::fixtures;

fn status() -> impl Strategy<Value = ContactStatus> {
    prop::sample::select(ContactStatus::ALL.to_vec())
}

fn status_filter() -> impl Strategy<Value = StatusFilter> {
    prop_oneof![Just(StatusFilter::All), status().prop_map(StatusFilter::Only)]
}

fn contacts() -> impl Strategy<Value = Vec<Contact>> {
    prop::collection::vec(
        (
            "[A-Za-z]{1,6}",
            "[A-Za-z]{1,6}",
            "[a-z]{1,4}@[a-z]{1,4}\\.[a-z]{2,3}",
            "[A-Za-z .]{1,8}",
            status(),
        ),
        0..12,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (first, last, email, company, status))| Contact {
                id: ContactId(i as i64 + 1),
                first_name: first,
                last_name: last,
                email,
                phone: "555".to_string(),
                company,
                status,
                notes: None,
                created_at: "2023-03-15T00:00:00Z".parse().expect("timestamp"),
            })
            .collect()
    })
}

fn ids(contacts: &[&Contact]) -> Vec<ContactId> {
    contacts.iter().map(|c| c.id).collect()
}

fn loaded_in_add_mode() -> ContactListController<()> {
    let mut controller = ContactListController::new(());
    controller
        .finish_loading(fixtures::seed_contacts().expect("seed"))
        .expect("load");
    controller.begin_add().expect("add");
    controller.update_field(ContactField::FirstName, "Alan");
    controller.update_field(ContactField::LastName, "Turing");
    controller.update_field(ContactField::Email, "alan@bletchley.uk");
    controller.update_field(ContactField::Phone, "(555) 010-1912");
    controller.update_field(ContactField::Company, "Bletchley Park");
    controller
}

proptest! {
    #[test]
    fn status_and_search_filters_commute(
        contacts in contacts(),
        term in "[A-Za-z@.]{0,3}",
        filter in status_filter(),
    ) {
        let by_status = FilterCriteria::new("", filter);
        let by_search = FilterCriteria::new(term.clone(), StatusFilter::All);
        let combined = FilterCriteria::new(term, filter);

        let status_first = by_search.apply(by_status.apply(&contacts));
        let search_first = by_status.apply(by_search.apply(&contacts));
        let at_once = combined.apply(&contacts);

        prop_assert_eq!(ids(&status_first), ids(&search_first));
        prop_assert_eq!(ids(&status_first), ids(&at_once));
    }

    #[test]
    fn filtered_result_is_an_ordered_subsequence(
        contacts in contacts(),
        term in "[a-z]{0,2}",
        filter in status_filter(),
    ) {
        let hits = FilterCriteria::new(term, filter).apply(&contacts);
        let positions: Vec<usize> = hits
            .iter()
            .map(|hit| contacts.iter().position(|c| c.id == hit.id).expect("member"))
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn blank_required_field_is_rejected_alone(
        field in prop::sample::select(ContactField::ALL.to_vec()),
        blank in "[ \t]{0,3}",
    ) {
        let mut controller = loaded_in_add_mode();
        controller.update_field(field, blank);

        let err = controller.submit().unwrap_err();
        let errors = match &err {
            ControllerError::Validation(errors) => errors,
            other => panic!("unexpected error {other}"),
        };
        prop_assert_eq!(errors.fields().collect::<Vec<_>>(), vec![field]);
        prop_assert_eq!(
            errors.get(field).map(ToString::to_string),
            Some(format!("{} is required", field.label()))
        );
        prop_assert_eq!(controller.contacts().len(), 7);
    }

    #[test]
    fn malformed_email_is_the_only_error(
        email in prop_oneof!["[a-z.]{1,10}", "[a-z]{1,5}@[a-z]{1,5}"],
    ) {
        let mut controller = loaded_in_add_mode();
        controller.update_field(ContactField::Email, email);

        let err = controller.submit().unwrap_err();
        let errors = err.validation_errors().expect("validation");
        prop_assert_eq!(errors.len(), 1);
        prop_assert_eq!(
            errors.get(ContactField::Email).map(ToString::to_string),
            Some("Email is invalid".to_string())
        );
        prop_assert_eq!(controller.contacts().len(), 7);
    }
}
