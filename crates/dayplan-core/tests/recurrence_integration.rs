//! Integration tests for recurring-event creation through the service.
//!
//! These tests verify the complete workflow: a draft with a recurrence
//! rule is expanded at creation time, the whole family lands in the store
//! atomically, and deletion cascades from either end of the family.

use chrono::NaiveDate;
use dayplan_core::{
    CalendarService, DayOfWeek, EventDraft, EventFilter, EventPatch, Frequency, MemoryStore,
    RecurrenceRule,
};

const OWNER: &str = "user-1";

fn service() -> CalendarService<MemoryStore> {
    CalendarService::new(MemoryStore::new())
}

fn recurring_draft(start: &str, end: &str, frequency: Frequency, end_date: &str) -> EventDraft {
    EventDraft {
        title: "Recurring".to_string(),
        start_time: start.parse().unwrap(),
        end_time: end.parse().unwrap(),
        description: Some("every so often".to_string()),
        location: Some("office".to_string()),
        recurrence_rule: Some(RecurrenceRule {
            frequency,
            end_date: Some(end_date.parse().unwrap()),
        }),
    }
}

#[test]
fn daily_family_is_created_in_one_shot() {
    let mut svc = service();
    let created = svc
        .create_event(
            OWNER,
            recurring_draft(
                "2026-03-02T09:00:00Z",
                "2026-03-02T10:00:00Z",
                Frequency::Daily,
                "2026-03-07",
            ),
        )
        .unwrap();

    // Template on day 0, instances on days 1..5.
    assert!(created.event.is_recurring);
    assert_eq!(created.instances_created, 5);

    let instances = svc.instances_of(&created.event.id).unwrap();
    assert_eq!(instances.len(), 5);
    for instance in &instances {
        assert_eq!(instance.duration(), created.event.duration());
        assert_eq!(
            instance.parent_event_id.as_deref(),
            Some(created.event.id.as_str())
        );
        assert_eq!(instance.title, created.event.title);
        assert_eq!(instance.location, created.event.location);
    }

    // Family total: root + 5 instances.
    let all = svc.list_events(OWNER, &EventFilter::default()).unwrap();
    assert_eq!(all.len(), 6);
}

#[test]
fn monthly_day31_family_skips_short_months() {
    let mut svc = service();
    let created = svc
        .create_event(
            OWNER,
            recurring_draft(
                "2026-01-31T10:00:00Z",
                "2026-01-31T11:00:00Z",
                Frequency::Monthly,
                "2026-04-30",
            ),
        )
        .unwrap();

    // February and April have no day 31; only March 31 is generated, so
    // the family is the January root plus one instance.
    assert_eq!(created.instances_created, 1);
    let instances = svc.instances_of(&created.event.id).unwrap();
    assert_eq!(
        instances[0].start_time.date_naive(),
        NaiveDate::from_ymd_opt(2026, 3, 31).unwrap()
    );

    let all = svc.list_events(OWNER, &EventFilter::default()).unwrap();
    assert_eq!(all.len(), 2);
}

#[test]
fn weekly_family_lands_on_requested_weekdays() {
    let mut svc = service();
    // 2026-03-02 is a Monday; 14-day window ending 2026-03-16.
    let created = svc
        .create_event(
            OWNER,
            recurring_draft(
                "2026-03-02T09:00:00Z",
                "2026-03-02T09:30:00Z",
                Frequency::Weekly {
                    days: vec![DayOfWeek::Monday, DayOfWeek::Wednesday],
                },
                "2026-03-16",
            ),
        )
        .unwrap();

    assert_eq!(created.instances_created, 4);
}

#[test]
fn update_touches_one_instance_only() {
    let mut svc = service();
    let created = svc
        .create_event(
            OWNER,
            recurring_draft(
                "2026-03-02T09:00:00Z",
                "2026-03-02T10:00:00Z",
                Frequency::Daily,
                "2026-03-05",
            ),
        )
        .unwrap();

    let instances = svc.instances_of(&created.event.id).unwrap();
    let patch = EventPatch {
        title: Some("Moved".to_string()),
        ..EventPatch::default()
    };
    svc.update_event(&instances[0].id, &patch).unwrap();

    let after = svc.instances_of(&created.event.id).unwrap();
    assert_eq!(after[0].title, "Moved");
    for sibling in &after[1..] {
        assert_eq!(sibling.title, "Recurring");
    }
    assert_eq!(svc.get_event(&created.event.id).unwrap().title, "Recurring");
}

#[test]
fn deleting_root_cascades_to_instances() {
    let mut svc = service();
    let created = svc
        .create_event(
            OWNER,
            recurring_draft(
                "2026-03-02T09:00:00Z",
                "2026-03-02T10:00:00Z",
                Frequency::Daily,
                "2026-03-07",
            ),
        )
        .unwrap();

    let removed = svc.delete_event(&created.event.id, true).unwrap();
    assert_eq!(removed, 6);
    assert!(svc.list_events(OWNER, &EventFilter::default()).unwrap().is_empty());
}

#[test]
fn deleting_instance_with_cascade_removes_whole_family() {
    let mut svc = service();
    let created = svc
        .create_event(
            OWNER,
            recurring_draft(
                "2026-03-02T09:00:00Z",
                "2026-03-02T10:00:00Z",
                Frequency::Daily,
                "2026-03-07",
            ),
        )
        .unwrap();

    let instances = svc.instances_of(&created.event.id).unwrap();
    let removed = svc.delete_event(&instances[2].id, true).unwrap();
    assert_eq!(removed, 6);
    assert!(svc.list_events(OWNER, &EventFilter::default()).unwrap().is_empty());
}

#[test]
fn deleting_instance_without_cascade_keeps_siblings() {
    let mut svc = service();
    let created = svc
        .create_event(
            OWNER,
            recurring_draft(
                "2026-03-02T09:00:00Z",
                "2026-03-02T10:00:00Z",
                Frequency::Daily,
                "2026-03-07",
            ),
        )
        .unwrap();

    let instances = svc.instances_of(&created.event.id).unwrap();
    let removed = svc.delete_event(&instances[0].id, false).unwrap();
    assert_eq!(removed, 1);
    assert_eq!(svc.instances_of(&created.event.id).unwrap().len(), 4);
}

#[test]
fn rule_from_json_boundary_expands_like_typed_rule() {
    // What the tool-calling layer sends over the wire.
    let draft: EventDraft = serde_json::from_str(
        r#"{
            "title": "Standup",
            "start_time": "2026-03-02T09:00:00Z",
            "end_time": "2026-03-02T09:15:00Z",
            "recurrence_rule": {
                "type": "weekly",
                "days": ["monday", "wednesday"],
                "end_date": "2026-03-16"
            }
        }"#,
    )
    .unwrap();

    let mut svc = service();
    let created = svc.create_event(OWNER, draft).unwrap();
    assert_eq!(created.instances_created, 4);
}
