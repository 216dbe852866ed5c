use clap::Subcommand;

use cadence_core::storage::KEY_GUEST_WINDOW;
use cadence_core::{AccessWindow, Clock, Config, Database, Event, SystemClock};

use super::common::save_blob;

#[derive(Subcommand)]
pub enum AccessAction {
    /// Start the guest window (no-op if already started)
    Start,
    /// Print the window's current status as JSON
    Status,
    /// Clear the window back to not-started (sign-in supersedes it)
    Clear,
}

fn load_window(db: &Database, config: &Config) -> AccessWindow {
    db.kv_get(KEY_GUEST_WINDOW)
        .ok()
        .flatten()
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_else(|| AccessWindow::new(config.access.guest_window_ms()))
}

pub fn run(action: AccessAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let config = Config::load()?;
    let mut window = load_window(&db, &config);
    let now = SystemClock.now();

    match action {
        AccessAction::Start => {
            let fresh = window.started_at.is_none();
            let status = window.start(now);
            save_blob(&db, KEY_GUEST_WINDOW, &window)?;
            if fresh {
                let event = Event::GuestWindowStarted {
                    at: now,
                    duration_ms: window.duration_ms,
                };
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "event": event,
                        "status": status,
                    }))?
                );
            } else {
                println!("{}", serde_json::to_string_pretty(&status)?);
            }
        }
        AccessAction::Status => {
            println!("{}", serde_json::to_string_pretty(&window.status(now))?);
        }
        AccessAction::Clear => {
            window.clear();
            save_blob(&db, KEY_GUEST_WINDOW, &window)?;
            let event = Event::GuestWindowCleared { at: now };
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "event": event,
                    "status": window.status(now),
                }))?
            );
        }
    }
    Ok(())
}
