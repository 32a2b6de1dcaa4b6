//! Task management commands for CLI.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use clap::Subcommand;
use serde::Serialize;
use tranquil_core::{
    Config, Event, ReminderChoice, ReminderPlan, ReminderPreset, Store, Task, TaskBook, TaskUpdate,
};

use super::{print_json, CmdResult};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a new task
    Create {
        /// Task title
        title: String,
        /// Task description
        #[arg(long, default_value = "")]
        description: String,
        /// Due date: "YYYY-MM-DD", "YYYY-MM-DD HH:MM" (local) or RFC 3339
        #[arg(long)]
        due: Option<String>,
        /// Reminder: preset id (1-4) or "<amount>_<unit>", e.g. "45_minutes"
        #[arg(long, requires = "due")]
        reminder: Option<String>,
    },
    /// List tasks
    List {
        /// Only tasks that are not completed
        #[arg(long)]
        open: bool,
    },
    /// Get task details
    Get {
        /// Task ID
        id: String,
    },
    /// Toggle completion
    Toggle {
        /// Task ID
        id: String,
    },
    /// Update a task
    Update {
        /// Task ID
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, conflicts_with = "clear_due")]
        due: Option<String>,
        /// Remove the due date
        #[arg(long)]
        clear_due: bool,
        #[arg(long, conflicts_with = "clear_reminder")]
        reminder: Option<String>,
        /// Remove the reminder
        #[arg(long)]
        clear_reminder: bool,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
    /// Show when a task's reminder should fire
    Reminder {
        /// Task ID
        id: String,
    },
    /// Reminder plans for every open task
    Reminders,
    /// List the reminder presets
    Presets,
    /// Completed / total counts
    Progress,
}

#[derive(Serialize)]
struct PresetView {
    id: &'static str,
    value: String,
    label: String,
}

#[derive(Serialize)]
struct PlannedReminder<'a> {
    task_id: &'a str,
    title: &'a str,
    reminder: ReminderChoice,
    fire_at: DateTime<Utc>,
    plan: ReminderPlan,
}

/// Accepts RFC 3339, or a local date with optional `HH:MM`. A date alone
/// means 23:59 that day.
fn parse_due(s: &str) -> Result<DateTime<Utc>, Box<dyn std::error::Error>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    let naive = match NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M") {
        Ok(dt) => dt,
        Err(_) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| format!("cannot parse due date '{s}'"))?
            .and_hms_opt(23, 59, 0)
            .ok_or_else(|| format!("cannot parse due date '{s}'"))?,
    };
    let local = Local
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| format!("'{s}' does not exist in the local time zone"))?;
    Ok(local.with_timezone(&Utc))
}

fn planned(task: &Task, plan: ReminderPlan) -> Option<PlannedReminder<'_>> {
    let due = task.due_at?;
    let reminder = task.reminder?;
    Some(PlannedReminder {
        task_id: &task.id,
        title: &task.title,
        reminder,
        fire_at: tranquil_core::compute_fire_datetime(due, reminder.offset()),
        plan,
    })
}

pub fn run(action: TaskAction) -> CmdResult {
    let store = Store::open()?;
    let mut book = TaskBook::load(&store)?;

    match action {
        TaskAction::Create {
            title,
            description,
            due,
            reminder,
        } => {
            let config = Config::load()?;
            let due_at = due.as_deref().map(parse_due).transpose()?;
            let reminder = reminder
                .as_deref()
                .map(|r| config.reminder_choice(r))
                .transpose()?;
            let task = book.add(&title, &description, due_at, reminder)?.clone();
            book.save(&store)?;
            eprintln!("Task created: {}", task.id);
            print_json(&task)?;
        }
        TaskAction::List { open } => {
            let tasks: Vec<&Task> = book
                .list()
                .iter()
                .filter(|t| !open || !t.completed)
                .collect();
            print_json(&tasks)?;
        }
        TaskAction::Get { id } => match book.get(&id) {
            Some(task) => print_json(task)?,
            None => return Err(format!("Task not found: {id}").into()),
        },
        TaskAction::Toggle { id } => {
            book.toggle(&id)?;
            book.save(&store)?;
            if let Some(task) = book.get(&id) {
                print_json(task)?;
            }
        }
        TaskAction::Update {
            id,
            title,
            description,
            due,
            clear_due,
            reminder,
            clear_reminder,
        } => {
            let config = Config::load()?;
            let due_at = if clear_due {
                Some(None)
            } else {
                due.as_deref().map(parse_due).transpose()?.map(Some)
            };
            let reminder = if clear_reminder {
                Some(None)
            } else {
                reminder
                    .as_deref()
                    .map(|r| config.reminder_choice(r))
                    .transpose()?
                    .map(Some)
            };
            let update = TaskUpdate {
                title,
                description,
                due_at,
                reminder,
            };
            let task = book.update(&id, update)?.clone();
            book.save(&store)?;
            print_json(&task)?;
        }
        TaskAction::Delete { id } => {
            let task = book.delete(&id)?;
            book.save(&store)?;
            println!("Task deleted: {}", task.id);
        }
        TaskAction::Reminder { id } => {
            let task = book
                .get(&id)
                .ok_or_else(|| format!("Task not found: {id}"))?;
            let reminder = task
                .reminder
                .ok_or_else(|| format!("Task {id} has no reminder"))?;
            let plan = book
                .reminder_plan(&id, Utc::now())?
                .ok_or_else(|| format!("Task {id} has no due date"))?;
            print_json(&Event::ReminderPlanned {
                task_id: id,
                offset: reminder.offset().to_string(),
                plan,
                at: Utc::now(),
            })?;
        }
        TaskAction::Reminders => {
            let plans: Vec<PlannedReminder<'_>> = book
                .pending_reminders(Utc::now())
                .into_iter()
                .filter_map(|(task, plan)| planned(task, plan))
                .collect();
            print_json(&plans)?;
        }
        TaskAction::Presets => {
            let presets: Vec<PresetView> = ReminderPreset::ALL
                .iter()
                .map(|p| PresetView {
                    id: p.id,
                    value: p.offset.to_string(),
                    label: p.label(),
                })
                .collect();
            print_json(&presets)?;
        }
        TaskAction::Progress => {
            print_json(&book.progress())?;
        }
    }
    Ok(())
}
