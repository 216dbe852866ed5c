use clap::Subcommand;

use cadence_core::storage::{
    KEY_HABITS, KEY_NOTIFICATION_GUARD, KEY_TASKS, KEY_TRANSACTIONS,
};
use cadence_core::{
    scan_overdue, Clock, Config, Database, DeadlineItem, Event, NotificationGuard,
    OverdueDetector, PlannedTransaction, RecurringItem, SystemClock,
};

use super::common::{load_blob, save_blob};

#[derive(Subcommand)]
pub enum ReviewAction {
    /// Run the guarded daily overdue check; prints the report when it fires
    Run,
    /// Print the overdue scan without touching the once-per-day guard
    Peek,
}

pub fn run(action: ReviewAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let config = Config::load()?;
    let today = SystemClock.today();

    let tasks: Vec<DeadlineItem> = load_blob(&db, KEY_TASKS)?;
    let habits: Vec<RecurringItem> = load_blob(&db, KEY_HABITS)?;
    let transactions: Vec<PlannedTransaction> = load_blob(&db, KEY_TRANSACTIONS)?;

    match action {
        ReviewAction::Run => {
            if !config.notifications.overdue_summary {
                println!("{{\"fired\": false, \"reason\": \"disabled\"}}");
                return Ok(());
            }
            let guard: NotificationGuard = load_blob(&db, KEY_NOTIFICATION_GUARD)?;
            let mut detector = OverdueDetector::with_guard(guard);
            match detector.fire(today, &tasks, &habits, &transactions) {
                Some(report) => {
                    save_blob(&db, KEY_NOTIFICATION_GUARD, detector.guard())?;
                    let event = Event::OverdueSummaryFired {
                        tasks: report.tasks.len(),
                        recurring: report.recurring.len(),
                        transactions: report.transactions.len(),
                        at: SystemClock.now(),
                    };
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&serde_json::json!({
                            "event": event,
                            "report": report,
                        }))?
                    );
                }
                None => {
                    println!("{{\"fired\": false}}");
                }
            }
        }
        ReviewAction::Peek => {
            let report = scan_overdue(today, &tasks, &habits, &transactions);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}
