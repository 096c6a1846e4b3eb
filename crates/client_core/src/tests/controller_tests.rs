use std::time::Duration;

use super::*;
use crate::notify::{Notification, NotificationKind};
use storage::{fixtures, MockFixtureSource};
use tokio::sync::broadcast;

type Toasts = broadcast::Receiver<Notification>;

fn controller() -> (ContactListController<broadcast::Sender<Notification>>, Toasts) {
    let (tx, rx) = broadcast::channel(32);
    (ContactListController::new(tx), rx)
}

fn loaded() -> (ContactListController<broadcast::Sender<Notification>>, Toasts) {
    let (mut controller, rx) = controller();
    controller
        .finish_loading(fixtures::seed_contacts().expect("seed"))
        .expect("load");
    (controller, rx)
}

fn fill_valid(controller: &mut ContactListController<broadcast::Sender<Notification>>) {
    controller.update_field(ContactField::FirstName, "Grace");
    controller.update_field(ContactField::LastName, "Hopper");
    controller.update_field(ContactField::Email, "grace@navy.mil");
    controller.update_field(ContactField::Phone, "(555) 111-2222");
    controller.update_field(ContactField::Company, "US Navy");
}

fn drain(rx: &mut Toasts) -> Vec<Notification> {
    let mut out = Vec::new();
    while let Ok(n) = rx.try_recv() {
        out.push(n);
    }
    out
}

fn ids(controller: &ContactListController<broadcast::Sender<Notification>>) -> Vec<i64> {
    controller.contacts().iter().map(|c| c.id.0).collect()
}

fn now() -> DateTime<Utc> {
    "2024-05-01T12:00:00Z".parse().expect("timestamp")
}

#[test]
fn starts_in_loading_with_empty_collection() {
    let (controller, _rx) = controller();
    assert_eq!(controller.mode(), ViewMode::Loading);
    assert_eq!(controller.view(), View::Loading);
    assert!(controller.contacts().is_empty());
    assert!(controller.filtered_contacts().is_empty());
}

#[test]
fn finish_loading_happens_exactly_once() {
    let (mut controller, mut rx) = loaded();
    assert_eq!(controller.mode(), ViewMode::Browsing);
    assert_eq!(controller.contacts().len(), 7);

    let err = controller
        .finish_loading(vec![])
        .expect_err("second load must be rejected");
    assert!(matches!(err, ControllerError::AlreadyLoaded));
    assert_eq!(controller.contacts().len(), 7);
    assert!(drain(&mut rx).is_empty(), "loading is silent");
}

#[test]
fn duplicate_seed_ids_keep_the_first_record() {
    let (mut controller, _rx) = controller();
    let mut seed = fixtures::seed_contacts().expect("seed");
    let mut dup = seed[0].clone();
    dup.first_name = "Impostor".to_string();
    seed.push(dup);

    assert_eq!(controller.finish_loading(seed).expect("load"), 7);
    assert_eq!(
        controller.contact(ContactId(1)).map(|c| c.first_name.as_str()),
        Some("John")
    );
}

#[tokio::test(start_paused = true)]
async fn load_from_source_waits_for_latency_and_never_reloads() {
    let source = MockFixtureSource::new(Duration::from_millis(800));
    let (mut controller, _rx) = controller();

    let started = tokio::time::Instant::now();
    let count = controller.load_from(&source).await.expect("load");
    assert_eq!(count, 7);
    assert!(started.elapsed() >= Duration::from_millis(800));
    assert_eq!(controller.mode(), ViewMode::Browsing);

    let err = controller.load_from(&source).await.unwrap_err();
    assert!(matches!(err, ControllerError::AlreadyLoaded));
    assert_eq!(source.contact_loads(), 1, "source consulted only once");
}

#[test]
fn actions_are_rejected_while_loading() {
    let (mut controller, _rx) = controller();
    assert!(matches!(
        controller.begin_add(),
        Err(ControllerError::InvalidTransition { mode: ViewMode::Loading, .. })
    ));
    assert!(controller.delete(ContactId(1)).is_err());
    assert!(controller.select(ContactId(1)).is_err());
    assert_eq!(controller.mode(), ViewMode::Loading);
}

#[test]
fn valid_submission_prepends_and_returns_to_browsing() {
    let (mut controller, mut rx) = loaded();
    controller.begin_add().expect("add");
    assert_eq!(controller.view(), View::Adding);
    fill_valid(&mut controller);

    let id = controller.submit_at(now()).expect("submit");

    assert_eq!(controller.contacts().len(), 8);
    let first = &controller.contacts()[0];
    assert_eq!(first.id, id);
    assert_eq!(first.full_name(), "Grace Hopper");
    assert_eq!(first.status, ContactStatus::Lead);
    assert_eq!(first.created_at, now());
    assert_eq!(controller.mode(), ViewMode::Browsing);
    assert_eq!(controller.form(), &ContactForm::default());
    assert!(controller.validation_errors().is_empty());
    assert_eq!(
        drain(&mut rx),
        [Notification::new(NotificationKind::Success, CONTACT_ADDED_MESSAGE)]
    );
}

#[test]
fn new_ids_are_strictly_increasing_and_unique() {
    let (mut controller, _rx) = loaded();
    let mut created = Vec::new();
    for _ in 0..3 {
        controller.begin_add().expect("add");
        fill_valid(&mut controller);
        created.push(controller.submit_at(now()).expect("submit"));
    }
    assert_eq!(created, [ContactId(8), ContactId(9), ContactId(10)]);
    assert_eq!(&ids(&controller)[..4], &[10, 9, 8, 1]);
}

#[test]
fn deleted_ids_are_not_reused() {
    let (mut controller, _rx) = loaded();
    controller.delete(ContactId(7)).expect("delete");
    controller.begin_add().expect("add");
    fill_valid(&mut controller);
    assert_eq!(controller.submit_at(now()).expect("submit"), ContactId(8));
}

#[test]
fn submitted_status_is_kept() {
    let (mut controller, _rx) = loaded();
    controller.begin_add().expect("add");
    fill_valid(&mut controller);
    controller.update_status(ContactStatus::Customer);
    controller.submit_at(now()).expect("submit");
    assert_eq!(controller.contacts()[0].status, ContactStatus::Customer);
}

#[test]
fn invalid_submission_reports_all_fields_and_stays_in_adding() {
    let (mut controller, mut rx) = loaded();
    controller.begin_add().expect("add");
    controller.update_field(ContactField::FirstName, "   ");
    controller.update_field(ContactField::Email, "not-an-email");

    let err = controller.submit_at(now()).unwrap_err();
    let errors = err.validation_errors().expect("validation error");
    assert_eq!(errors.len(), 5);
    assert_eq!(
        errors.get(ContactField::Email).map(ToString::to_string),
        Some("Email is invalid".to_string())
    );

    assert_eq!(controller.mode(), ViewMode::Adding);
    assert_eq!(controller.contacts().len(), 7);
    assert_eq!(controller.validation_errors(), errors);
    assert_eq!(
        drain(&mut rx),
        [Notification::new(NotificationKind::Error, FORM_INVALID_MESSAGE)]
    );
}

#[test]
fn editing_a_field_clears_only_its_error() {
    let (mut controller, _rx) = loaded();
    controller.begin_add().expect("add");
    let _ = controller.submit_at(now());
    assert_eq!(controller.validation_errors().len(), 5);

    controller.update_field(ContactField::Phone, "1");
    assert!(!controller.validation_errors().contains(ContactField::Phone));
    assert_eq!(controller.validation_errors().len(), 4);

    // Cleared on edit even though the value is still blank; rules rerun only
    // on submit.
    controller.update_field(ContactField::Company, "");
    assert!(!controller.validation_errors().contains(ContactField::Company));
}

#[test]
fn cancel_returns_to_browsing_silently_and_keeps_draft() {
    let (mut controller, mut rx) = loaded();
    controller.begin_add().expect("add");
    controller.update_field(ContactField::FirstName, "Draft");
    controller.cancel_add().expect("cancel");

    assert_eq!(controller.mode(), ViewMode::Browsing);
    assert_eq!(controller.contacts().len(), 7);
    assert!(drain(&mut rx).is_empty());

    controller.begin_add().expect("reopen");
    assert_eq!(controller.form().first_name, "Draft");
}

#[test]
fn no_edge_between_adding_and_viewing() {
    let (mut controller, _rx) = loaded();
    controller.begin_add().expect("add");
    assert!(controller.select(ContactId(1)).is_err());
    assert!(controller.delete(ContactId(1)).is_err());
    assert!(controller.back().is_err());
    assert_eq!(controller.mode(), ViewMode::Adding);

    controller.cancel_add().expect("cancel");
    controller.select(ContactId(1)).expect("select");
    assert!(controller.begin_add().is_err());
    assert!(controller.submit_at(now()).is_err());
    assert!(controller.cancel_add().is_err());
    assert_eq!(controller.mode(), ViewMode::Viewing(ContactId(1)));
}

#[test]
fn selecting_and_going_back() {
    let (mut controller, _rx) = loaded();
    controller.select(ContactId(3)).expect("select");
    let selected = controller.selected_contact().expect("selected");
    assert_eq!(selected.first_name, "Michael");
    assert!(matches!(controller.view(), View::Viewing(c) if c.id == ContactId(3)));

    controller.back().expect("back");
    assert_eq!(controller.mode(), ViewMode::Browsing);
    assert!(controller.selected_contact().is_none());
}

#[test]
fn selecting_unknown_contact_is_an_error() {
    let (mut controller, _rx) = loaded();
    let err = controller.select(ContactId(99)).unwrap_err();
    assert_eq!(err.to_string(), "no contact with id 99");
    assert_eq!(controller.mode(), ViewMode::Browsing);
}

#[test]
fn delete_removes_one_record_and_preserves_order() {
    let (mut controller, mut rx) = loaded();
    assert!(controller.delete(ContactId(4)).expect("delete"));
    assert_eq!(ids(&controller), [1, 2, 3, 5, 6, 7]);
    assert_eq!(
        drain(&mut rx),
        [Notification::new(NotificationKind::Success, CONTACT_DELETED_MESSAGE)]
    );
}

#[test]
fn deleting_viewed_contact_returns_to_browsing() {
    let (mut controller, _rx) = loaded();
    controller.select(ContactId(2)).expect("select");
    assert!(controller.delete(ContactId(2)).expect("delete"));
    assert_eq!(controller.mode(), ViewMode::Browsing);
    assert_eq!(controller.view(), View::Browsing);
    assert!(controller.contact(ContactId(2)).is_none());
}

#[test]
fn deleting_another_contact_while_viewing_keeps_the_detail_open() {
    let (mut controller, _rx) = loaded();
    controller.select(ContactId(2)).expect("select");
    assert!(controller.delete(ContactId(5)).expect("delete"));
    assert_eq!(controller.mode(), ViewMode::Viewing(ContactId(2)));
}

#[test]
fn deleting_missing_id_is_a_silent_no_op() {
    let (mut controller, mut rx) = loaded();
    assert!(!controller.delete(ContactId(42)).expect("delete"));
    assert_eq!(controller.contacts().len(), 7);
    assert!(drain(&mut rx).is_empty());
}

#[test]
fn filter_state_drives_filtered_view() {
    let (mut controller, _rx) = loaded();
    controller.set_status_filter(StatusFilter::Only(ContactStatus::Customer));
    let names: Vec<_> = controller
        .filtered_contacts()
        .into_iter()
        .map(|c| c.first_name.as_str())
        .collect();
    assert_eq!(names, ["Jane", "Robert"]);

    controller.set_status_filter(StatusFilter::All);
    controller.set_search_term("ACME");
    let hits = controller.filtered_contacts();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].company, "Acme Inc.");
}

#[test]
fn newly_added_contact_appears_first_in_filtered_view() {
    let (mut controller, _rx) = loaded();
    controller.set_search_term("navy");
    controller.begin_add().expect("add");
    fill_valid(&mut controller);
    let id = controller.submit_at(now()).expect("submit");
    let hits = controller.filtered_contacts();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, id);
}

#[test]
fn id_allocator_skips_past_observed_ids() {
    let mut ids = ContactIdAllocator::default();
    ids.observe(ContactId(41));
    ids.observe(ContactId(7));
    assert_eq!(ids.next_id(), Some(ContactId(42)));
    assert_eq!(ids.next_id(), Some(ContactId(43)));
}

#[test]
fn id_allocator_stops_at_the_top_of_the_range() {
    let mut ids = ContactIdAllocator::default();
    ids.observe(ContactId(i64::MAX - 1));
    assert_eq!(ids.next_id(), Some(ContactId(i64::MAX)));
    assert_eq!(ids.next_id(), None);
    assert_eq!(ids.next_id(), None);
}

#[test]
fn submit_with_exhausted_ids_fails_without_mutation() {
    let (mut controller, mut rx) = controller();
    let mut seed = fixtures::seed_contacts().expect("seed");
    seed.truncate(1);
    seed[0].id = ContactId(i64::MAX);
    controller.finish_loading(seed).expect("load");

    controller.begin_add().expect("add");
    fill_valid(&mut controller);
    let err = controller.submit_at(now()).unwrap_err();

    assert!(matches!(err, ControllerError::IdsExhausted));
    assert_eq!(ids(&controller), [i64::MAX]);
    assert_eq!(controller.mode(), ViewMode::Adding);
    assert_eq!(controller.form().first_name, "Grace");
    assert!(drain(&mut rx).is_empty());
}

#[test]
fn view_mode_renders_for_error_messages() {
    let (mut controller, _rx) = loaded();
    controller.select(ContactId(5)).expect("select");
    let err = controller.begin_add().unwrap_err();
    assert_eq!(err.to_string(), "cannot add a contact while viewing contact 5");
}
