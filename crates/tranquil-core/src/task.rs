//! Task list with due dates and reminders.
//!
//! Both the create and the edit path hand the stored reminder offset to
//! [`crate::reminder::plan_reminder`]; nothing else computes fire times.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::{CoreError, Result, ValidationError};
use crate::reminder::{plan_reminder, ReminderChoice, ReminderPlan};
use crate::storage::{keys, Store};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub due_at: Option<DateTime<Utc>>,
    /// Preset or custom; see [`ReminderChoice`] for the stored record.
    #[serde(default)]
    pub reminder: Option<ReminderChoice>,
}

impl Task {
    /// Reminder plan relative to `now`, if the task has both a due date
    /// and a reminder.
    pub fn reminder_plan(&self, now: DateTime<Utc>) -> Option<ReminderPlan> {
        let due = self.due_at?;
        let offset = self.reminder?.offset();
        Some(plan_reminder(
            due.timestamp_millis(),
            offset,
            now.timestamp_millis(),
        ))
    }
}

/// Partial edit of a task. `None` leaves a field alone; for the optional
/// fields `Some(None)` clears them.
#[derive(Debug, Clone, Default)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_at: Option<Option<DateTime<Utc>>>,
    pub reminder: Option<Option<ReminderChoice>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaskProgress {
    pub completed: usize,
    pub total: usize,
    /// 0.0 .. 100.0
    pub percent: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskBook {
    tasks: Vec<Task>,
}

fn check_title(title: &str) -> Result<String, ValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ValidationError::Empty("title".into()));
    }
    Ok(title.to_string())
}

fn check_reminder(
    due_at: Option<DateTime<Utc>>,
    reminder: Option<ReminderChoice>,
) -> Result<(), ValidationError> {
    if reminder.is_some() && due_at.is_none() {
        return Err(ValidationError::invalid(
            "reminder",
            "a reminder needs a due date",
        ));
    }
    Ok(())
}

impl TaskBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(store: &Store) -> Result<Self> {
        let tasks = store.load_json(keys::TASKS)?.unwrap_or_default();
        Ok(Self { tasks })
    }

    pub fn save(&self, store: &Store) -> Result<()> {
        store.save_json(keys::TASKS, &self.tasks)
    }

    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| CoreError::not_found("task", id))
    }

    /// Append a new task.
    ///
    /// # Errors
    /// Rejects a blank title, and a reminder without a due date.
    pub fn add(
        &mut self,
        title: &str,
        description: &str,
        due_at: Option<DateTime<Utc>>,
        reminder: Option<ReminderChoice>,
    ) -> Result<&Task> {
        let title = check_title(title)?;
        check_reminder(due_at, reminder)?;

        let task = Task {
            id: Uuid::new_v4().to_string(),
            title,
            description: description.trim().to_string(),
            completed: false,
            created_at: Utc::now(),
            due_at,
            reminder,
        };
        debug!(id = %task.id, "task added");
        self.tasks.push(task);
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// Apply an edit. Validation runs on the merged result before anything
    /// is written.
    pub fn update(&mut self, id: &str, update: TaskUpdate) -> Result<&Task> {
        let idx = self.position(id)?;
        let current = &self.tasks[idx];

        let title = match update.title {
            Some(t) => check_title(&t)?,
            None => current.title.clone(),
        };
        let due_at = update.due_at.unwrap_or(current.due_at);
        let reminder = update.reminder.unwrap_or(current.reminder);
        check_reminder(due_at, reminder)?;

        let task = &mut self.tasks[idx];
        task.title = title;
        if let Some(description) = update.description {
            task.description = description.trim().to_string();
        }
        task.due_at = due_at;
        task.reminder = reminder;
        Ok(task)
    }

    /// Flip completion; returns the new value.
    pub fn toggle(&mut self, id: &str) -> Result<bool> {
        let idx = self.position(id)?;
        let task = &mut self.tasks[idx];
        task.completed = !task.completed;
        Ok(task.completed)
    }

    pub fn delete(&mut self, id: &str) -> Result<Task> {
        let idx = self.position(id)?;
        Ok(self.tasks.remove(idx))
    }

    pub fn progress(&self) -> TaskProgress {
        let total = self.tasks.len();
        let completed = self.tasks.iter().filter(|t| t.completed).count();
        let percent = if total == 0 {
            0.0
        } else {
            completed as f64 / total as f64 * 100.0
        };
        TaskProgress {
            completed,
            total,
            percent,
        }
    }

    /// # Errors
    /// Returns `NotFound` for an unknown id. A task without a due date or
    /// reminder yields `Ok(None)`.
    pub fn reminder_plan(&self, id: &str, now: DateTime<Utc>) -> Result<Option<ReminderPlan>> {
        let task = self
            .get(id)
            .ok_or_else(|| CoreError::not_found("task", id))?;
        Ok(task.reminder_plan(now))
    }

    /// Reminder plans for every open task that has one, in list order.
    pub fn pending_reminders(&self, now: DateTime<Utc>) -> Vec<(&Task, ReminderPlan)> {
        self.tasks
            .iter()
            .filter(|t| !t.completed)
            .filter_map(|t| t.reminder_plan(now).map(|plan| (t, plan)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    use crate::reminder::ReminderOffset;

    fn due() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 4, 15, 30, 0).unwrap()
    }

    #[test]
    fn add_trims_and_rejects_blank_title() {
        let mut book = TaskBook::new();
        let task = book.add("  Buy bread ", " fresh ", None, None).unwrap();
        assert_eq!(task.title, "Buy bread");
        assert_eq!(task.description, "fresh");
        assert!(!task.completed);

        let err = book.add("   ", "", None, None).unwrap_err();
        assert!(matches!(err, CoreError::Validation(ValidationError::Empty(_))));
        assert_eq!(book.list().len(), 1);
    }

    #[test]
    fn reminder_requires_due_date() {
        let mut book = TaskBook::new();
        let offset = ReminderOffset::minutes(10).unwrap();
        assert!(book.add("Call", "", None, Some(offset.into())).is_err());
        assert!(book.list().is_empty());
    }

    #[test]
    fn toggle_and_progress() {
        let mut book = TaskBook::new();
        assert_eq!(book.progress().percent, 0.0);
        let a = book.add("a", "", None, None).unwrap().id.clone();
        book.add("b", "", None, None).unwrap();
        assert!(book.toggle(&a).unwrap());
        let p = book.progress();
        assert_eq!((p.completed, p.total), (1, 2));
        assert_eq!(p.percent, 50.0);
        assert!(!book.toggle(&a).unwrap());
    }

    #[test]
    fn update_validates_merged_task() {
        let mut book = TaskBook::new();
        let choice = ReminderChoice::preset("3").unwrap();
        let id = book.add("Doctor", "", Some(due()), Some(choice)).unwrap().id.clone();

        // Clearing the due date while the reminder stays is rejected.
        let err = book.update(
            &id,
            TaskUpdate {
                due_at: Some(None),
                ..Default::default()
            },
        );
        assert!(err.is_err());
        assert_eq!(book.get(&id).unwrap().due_at, Some(due()));

        let task = book
            .update(
                &id,
                TaskUpdate {
                    title: Some("Dentist".into()),
                    due_at: Some(None),
                    reminder: Some(None),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(task.title, "Dentist");
        assert_eq!(task.reminder, None);
    }

    #[test]
    fn edit_and_create_share_fire_time() {
        let mut book = TaskBook::new();
        let preset = ReminderChoice::preset("4").unwrap();
        let now = due() - Duration::days(3);
        let id = book.add("Trip", "", Some(due()), Some(preset)).unwrap().id.clone();
        let created = book.reminder_plan(&id, now).unwrap().unwrap();

        let custom = ReminderChoice::Custom(ReminderOffset::days(1).unwrap());
        book.update(
            &id,
            TaskUpdate {
                reminder: Some(Some(custom)),
                ..Default::default()
            },
        )
        .unwrap();
        let edited = book.reminder_plan(&id, now).unwrap().unwrap();

        assert_eq!(book.get(&id).unwrap().reminder, Some(custom));
        assert_eq!(created, edited);
        assert_eq!(
            created,
            ReminderPlan::FireAt {
                at_ms: (due() - Duration::days(1)).timestamp_millis()
            }
        );
    }

    #[test]
    fn pending_reminders_skip_completed_and_plain_tasks() {
        let mut book = TaskBook::new();
        let offset: ReminderChoice = ReminderOffset::minutes(30).unwrap().into();
        let now = due() - Duration::minutes(10);
        let open = book.add("open", "", Some(due()), Some(offset)).unwrap().id.clone();
        let done = book.add("done", "", Some(due()), Some(offset)).unwrap().id.clone();
        book.add("plain", "", Some(due()), None).unwrap();
        book.toggle(&done).unwrap();

        let pending = book.pending_reminders(now);
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].0.id, open);
        assert!(pending[0].1.is_immediate());
    }

    #[test]
    fn unknown_id_is_not_found() {
        let mut book = TaskBook::new();
        assert!(matches!(book.toggle("nope"), Err(CoreError::NotFound { .. })));
        assert!(matches!(book.delete("nope"), Err(CoreError::NotFound { .. })));
        assert!(book.reminder_plan("nope", Utc::now()).is_err());
    }

    #[test]
    fn persists_through_store() {
        let store = Store::open_memory().unwrap();
        let mut book = TaskBook::new();
        let custom = ReminderChoice::Custom(ReminderOffset::hours(1).unwrap());
        book.add("Read", "", Some(due()), Some(custom)).unwrap();
        book.add("Swim", "", Some(due()), Some(ReminderChoice::preset("3").unwrap()))
            .unwrap();
        book.save(&store).unwrap();

        let raw = store.kv_get(keys::TASKS).unwrap().unwrap();
        assert!(raw.contains(r#""type":"custom","value":"1_hour""#));
        assert!(raw.contains(r#""id":"3","type":"preset","value":"1_hour""#));

        let loaded = TaskBook::load(&store).unwrap();
        assert_eq!(loaded, book);
    }
}
