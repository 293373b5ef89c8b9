//! Integration tests for a full logging session.
//!
//! Drives the controller the way a host view would: fill the profile form,
//! submit, log records, read the dashboard, then tear down.

use healthlog_core::{
    Config, Controller, Event, GateError, ProfileField, RecordField, ReminderState, TrendPoint,
    View,
};

fn submit_record(c: &mut Controller, date: &str, weight: &str) -> Event {
    c.set_record_field(RecordField::Date, date).unwrap();
    c.set_record_field(RecordField::Weight, weight).unwrap();
    c.submit_record().unwrap()
}

#[test]
fn test_profile_with_name_only_opens_dashboard() {
    let mut c = Controller::default();
    c.set_profile_field(ProfileField::Name, "Li").unwrap();
    c.submit_profile().unwrap();

    assert_eq!(c.view(), View::Dashboard);
    assert!(c.dashboard().is_ok());
}

#[test]
fn test_record_form_unreachable_without_profile() {
    let mut c = Controller::default();
    assert_eq!(c.view(), View::ProfileForm);
    assert_eq!(
        c.set_record_field(RecordField::Weight, "70"),
        Err(GateError::ProfileRequired)
    );
    assert!(c.dashboard().is_err());
}

#[test]
fn test_first_record_becomes_first_point() {
    let mut c = Controller::default();
    c.submit_profile().unwrap();
    submit_record(&mut c, "2024-01-01", "70");

    let record = &c.records()[0];
    assert_eq!(record.date(), "2024-01-01");
    assert_eq!(record.weight(), "70");
    assert_eq!(record.water(), "");
    assert_eq!(record.sleep(), "");
    assert_eq!(record.exercise(), "");
    assert_eq!(record.meals(), "");

    assert_eq!(
        c.dashboard().unwrap().series,
        vec![TrendPoint {
            x: "2024-01-01".into(),
            y: Some(70.0)
        }]
    );
}

#[test]
fn test_missing_date_shows_notice_and_keeps_store() {
    let mut c = Controller::default();
    c.submit_profile().unwrap();
    submit_record(&mut c, "2024-01-01", "70");

    let event = submit_record(&mut c, "", "71");
    match event {
        Event::RecordRejected { notice, .. } => assert!(!notice.is_empty()),
        other => panic!("Expected RecordRejected, got {other:?}"),
    }
    assert_eq!(c.records().len(), 1);
}

#[test]
fn test_identical_dates_kept_as_two_points() {
    let mut c = Controller::default();
    c.submit_profile().unwrap();
    submit_record(&mut c, "2024-01-01", "70");
    submit_record(&mut c, "2024-01-01", "72");

    let series = c.dashboard().unwrap().series;
    assert_eq!(series.len(), 2);
    assert_eq!(series[0].x, "2024-01-01");
    assert_eq!(series[1].x, "2024-01-01");
    assert_eq!(series[1].y, Some(72.0));
}

#[test]
fn test_full_session_lifecycle() {
    let mut config = Config::default();
    config.reminder.period_ms = 1000;
    let mut c = Controller::new(&config);

    c.set_field("name", "Li").unwrap();
    c.set_field("blood_oxygen", "98").unwrap();
    c.submit().unwrap();
    assert_eq!(c.profile().map(|p| p.blood_oxygen.as_str()), Some("98"));
    assert_eq!(c.reminders().state(), ReminderState::Armed);

    c.set_field("date", "2024-01-02").unwrap();
    c.set_field("weight", "70.5").unwrap();
    c.set_field("meals", "oatmeal").unwrap();
    c.submit().unwrap();
    c.set_field("date", "2024-01-01").unwrap();
    c.set_field("weight", "70.9").unwrap();
    c.submit().unwrap();

    let projection = c.dashboard().unwrap();
    assert_eq!(projection.log[0].meals, "oatmeal");
    assert_eq!(projection.log[1].meals, "No record");
    assert_eq!(projection.log[1].date, "2024-01-01");

    let due = c.reminders().next_due_epoch_ms().unwrap();
    let fired: Vec<_> = (0..5).filter_map(|i| c.tick_at(due + i * 1000)).collect();
    assert_eq!(fired.len(), 5);

    assert!(c.close().is_some());
    assert!(c.tick_at(due + 10_000).is_none());
    assert_eq!(c.reminders().state(), ReminderState::Disarmed);
}

#[test]
fn test_events_serialize_with_type_tag() {
    let mut c = Controller::default();
    let events = c.submit_profile().unwrap();
    let json = serde_json::to_value(&events[0]).unwrap();
    assert_eq!(json["type"], "ProfileSaved");
    assert_eq!(json["welcome"], "Welcome, !");

    let snapshot = serde_json::to_value(c.snapshot().unwrap()).unwrap();
    assert_eq!(snapshot["type"], "DashboardSnapshot");
    assert_eq!(snapshot["record_count"], 0);
    assert_eq!(snapshot["projection"]["series"], serde_json::json!([]));
}
