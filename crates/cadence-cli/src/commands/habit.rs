use clap::Subcommand;
use uuid::Uuid;

use cadence_core::storage::KEY_HABITS;
use cadence_core::{
    streak_with_diagnostics, Clock, Config, Database, Event, RecurringItem, Resource, SystemClock,
};

use super::common::{current_entitlement, load_blob, save_blob};

#[derive(Subcommand)]
pub enum HabitAction {
    /// Add a habit with target weekdays (0 = Sunday .. 6 = Saturday)
    Add {
        /// Habit name
        name: String,
        /// Target weekdays, e.g. --days 1 --days 3 --days 5
        #[arg(long = "days", required = true)]
        days: Vec<u8>,
    },
    /// Toggle today's (or a given date's) completion mark
    Done {
        /// Habit ID
        id: String,
        /// Date to toggle, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Print all habits as JSON
    List,
    /// Print the current streak for a habit
    Streak {
        /// Habit ID
        id: String,
    },
    /// Remove a habit
    Remove {
        /// Habit ID
        id: String,
    },
}

pub fn run(action: HabitAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let config = Config::load()?;
    let mut habits: Vec<RecurringItem> = load_blob(&db, KEY_HABITS)?;

    match action {
        HabitAction::Add { name, days } => {
            let check = current_entitlement(&db, &config)?
                .check_limit(Resource::Habits, habits.len() as u32);
            if !check.can_add {
                println!("{}", serde_json::to_string_pretty(&check)?);
                return Err(format!(
                    "habit limit reached ({} of {})",
                    check.current,
                    check.max.unwrap_or(check.current)
                )
                .into());
            }
            let habit = RecurringItem::new(
                Uuid::new_v4().to_string(),
                name,
                days,
                SystemClock.now(),
            );
            println!("{}", serde_json::to_string_pretty(&habit)?);
            habits.push(habit);
            save_blob(&db, KEY_HABITS, &habits)?;
        }
        HabitAction::Done { id, date } => {
            let date = match date {
                Some(raw) => cadence_core::date::parse_iso_date(&raw)?,
                None => SystemClock.today(),
            };
            let habit = habits
                .iter_mut()
                .find(|h| h.id == id)
                .ok_or_else(|| format!("no habit with id {id}"))?;
            let completed = habit.toggle_completion(date);
            let event = Event::HabitCompletionToggled {
                habit_id: id,
                date,
                completed,
                at: SystemClock.now(),
            };
            println!("{}", serde_json::to_string_pretty(&event)?);
            save_blob(&db, KEY_HABITS, &habits)?;
        }
        HabitAction::List => {
            println!("{}", serde_json::to_string_pretty(&habits)?);
        }
        HabitAction::Streak { id } => {
            let habit = habits
                .iter()
                .find(|h| h.id == id)
                .ok_or_else(|| format!("no habit with id {id}"))?;
            let outcome = streak_with_diagnostics(habit, SystemClock.today());
            for raw in &outcome.skipped {
                let event = Event::MalformedDateSkipped {
                    entity_id: habit.id.clone(),
                    raw: raw.clone(),
                    at: SystemClock.now(),
                };
                eprintln!("{}", serde_json::to_string(&event)?);
            }
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        HabitAction::Remove { id } => {
            let before = habits.len();
            habits.retain(|h| h.id != id);
            if habits.len() == before {
                return Err(format!("no habit with id {id}").into());
            }
            save_blob(&db, KEY_HABITS, &habits)?;
            println!("{{\"removed\": \"{id}\"}}");
        }
    }
    Ok(())
}
