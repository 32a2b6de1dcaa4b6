//! Integration tests for tasks and their reminders.

use chrono::{Duration, TimeZone, Utc};
use tranquil_core::{
    compute_fire_time, Config, ReminderChoice, ReminderOffset, ReminderPlan, Store, TaskBook,
    TaskUpdate,
};

#[test]
fn test_create_edit_and_reload_with_reminder() {
    let store = Store::open_memory().unwrap();
    let due = Utc.with_ymd_and_hms(2026, 11, 2, 10, 0, 0).unwrap();
    let now = due - Duration::days(2);

    let mut book = TaskBook::load(&store).unwrap();
    let preset = ReminderChoice::preset("3").unwrap();
    let id = book
        .add("Swimming class", "bring towel", Some(due), Some(preset))
        .unwrap()
        .id
        .clone();
    book.save(&store).unwrap();

    let mut book = TaskBook::load(&store).unwrap();
    assert_eq!(book.get(&id).unwrap().reminder, Some(preset));
    assert_eq!(
        book.reminder_plan(&id, now).unwrap(),
        Some(ReminderPlan::FireAt {
            at_ms: due.timestamp_millis() - 3_600_000
        })
    );

    let custom: ReminderOffset = "2_days".parse().unwrap();
    book.update(
        &id,
        TaskUpdate {
            reminder: Some(Some(custom.into())),
            ..Default::default()
        },
    )
    .unwrap();
    book.save(&store).unwrap();

    let book = TaskBook::load(&store).unwrap();
    assert_eq!(
        book.get(&id).unwrap().reminder,
        Some(ReminderChoice::Custom(custom))
    );
    let plan = book.reminder_plan(&id, now).unwrap().unwrap();
    assert_eq!(plan, ReminderPlan::FireImmediately { overdue_ms: 0 });
    assert_eq!(
        compute_fire_time(due.timestamp_millis(), custom),
        now.timestamp_millis()
    );
}

#[test]
fn test_config_default_preset_parses() {
    let cfg = Config::default();
    let offset = cfg.parse_reminder(&cfg.reminders.default_preset).unwrap();
    assert_eq!(offset.offset_in_millis(), 1_800_000);
}

#[test]
fn test_preset_and_custom_hour_survive_reload_distinctly() {
    let store = Store::open_memory().unwrap();
    let cfg = Config::default();
    let due = Utc.with_ymd_and_hms(2026, 11, 2, 10, 0, 0).unwrap();

    let mut book = TaskBook::new();
    let preset = book
        .add("A", "", Some(due), Some(cfg.reminder_choice("3").unwrap()))
        .unwrap()
        .id
        .clone();
    let custom = book
        .add("B", "", Some(due), Some(cfg.reminder_choice("1_hour").unwrap()))
        .unwrap()
        .id
        .clone();
    book.save(&store).unwrap();

    let book = TaskBook::load(&store).unwrap();
    let preset = book.get(&preset).unwrap().reminder.unwrap();
    let custom = book.get(&custom).unwrap().reminder.unwrap();
    assert!(preset.is_preset());
    assert!(!custom.is_preset());
    assert_eq!(preset.offset(), custom.offset());
}

#[test]
fn test_delete_removes_from_store() {
    let store = Store::open_memory().unwrap();
    let mut book = TaskBook::new();
    let id = book.add("Laundry", "", None, None).unwrap().id.clone();
    book.add("Homework", "", None, None).unwrap();
    book.save(&store).unwrap();

    let mut book = TaskBook::load(&store).unwrap();
    let removed = book.delete(&id).unwrap();
    assert_eq!(removed.title, "Laundry");
    book.save(&store).unwrap();

    let book = TaskBook::load(&store).unwrap();
    assert_eq!(book.list().len(), 1);
    assert_eq!(book.list()[0].title, "Homework");
}
