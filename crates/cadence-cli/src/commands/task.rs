use clap::Subcommand;
use uuid::Uuid;

use cadence_core::date::parse_iso_date;
use cadence_core::storage::KEY_TASKS;
use cadence_core::{Config, Database, DeadlineItem, Resource, TaskStatus};

use super::common::{current_entitlement, load_blob, save_blob};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task with a due date
    Add {
        /// Task title
        title: String,
        /// Due date, YYYY-MM-DD
        #[arg(long)]
        due: String,
    },
    /// Mark a task as done
    Done {
        /// Task ID
        id: String,
    },
    /// Mark a task as in progress
    Start {
        /// Task ID
        id: String,
    },
    /// Print all tasks as JSON
    List,
    /// Remove a task
    Remove {
        /// Task ID
        id: String,
    },
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let config = Config::load()?;
    let mut tasks: Vec<DeadlineItem> = load_blob(&db, KEY_TASKS)?;

    match action {
        TaskAction::Add { title, due } => {
            // Reject malformed input at the edge; stored dates are trusted
            // to be well-formed from here on.
            parse_iso_date(&due)?;
            let check = current_entitlement(&db, &config)?
                .check_limit(Resource::Tasks, tasks.len() as u32);
            if !check.can_add {
                println!("{}", serde_json::to_string_pretty(&check)?);
                return Err("task limit reached".into());
            }
            let task = DeadlineItem {
                id: Uuid::new_v4().to_string(),
                title,
                due_date: due,
                completed: false,
                status: TaskStatus::NotStarted,
            };
            println!("{}", serde_json::to_string_pretty(&task)?);
            tasks.push(task);
            save_blob(&db, KEY_TASKS, &tasks)?;
        }
        TaskAction::Done { id } => {
            let task = tasks
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or_else(|| format!("no task with id {id}"))?;
            task.completed = true;
            task.status = TaskStatus::Done;
            println!("{}", serde_json::to_string_pretty(task)?);
            save_blob(&db, KEY_TASKS, &tasks)?;
        }
        TaskAction::Start { id } => {
            let task = tasks
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or_else(|| format!("no task with id {id}"))?;
            task.status = TaskStatus::InProgress;
            println!("{}", serde_json::to_string_pretty(task)?);
            save_blob(&db, KEY_TASKS, &tasks)?;
        }
        TaskAction::List => {
            println!("{}", serde_json::to_string_pretty(&tasks)?);
        }
        TaskAction::Remove { id } => {
            let before = tasks.len();
            tasks.retain(|t| t.id != id);
            if tasks.len() == before {
                return Err(format!("no task with id {id}").into());
            }
            save_blob(&db, KEY_TASKS, &tasks)?;
            println!("{{\"removed\": \"{id}\"}}");
        }
    }
    Ok(())
}
