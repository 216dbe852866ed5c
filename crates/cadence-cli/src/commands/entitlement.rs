use clap::Subcommand;

use cadence_core::storage::{KEY_HABITS, KEY_SUBSCRIPTION, KEY_TASKS, KEY_TRANSACTIONS};
use cadence_core::{
    Config, Database, DeadlineItem, PlannedTransaction, RecurringItem, Resource,
};

use super::common::{current_entitlement, load_blob, save_blob, AccountSnapshot};

#[derive(Subcommand)]
pub enum EntitlementAction {
    /// Print the resolved tier and per-resource limits as JSON
    Status,
    /// Record a sign-in (clears nothing by itself; see `access clear`)
    SignIn,
    /// Record a sign-out
    SignOut,
    /// Update the cached subscription snapshot from the billing backend
    SetSubscription {
        #[arg(long)]
        paid: bool,
        #[arg(long)]
        trial: bool,
        #[arg(long, default_value = "0")]
        trial_days_left: u32,
    },
}

pub fn run(action: EntitlementAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let config = Config::load()?;

    match action {
        EntitlementAction::Status => {
            let state = current_entitlement(&db, &config)?;
            let habits: Vec<RecurringItem> = load_blob(&db, KEY_HABITS)?;
            let tasks: Vec<DeadlineItem> = load_blob(&db, KEY_TASKS)?;
            let transactions: Vec<PlannedTransaction> = load_blob(&db, KEY_TRANSACTIONS)?;

            let summary = serde_json::json!({
                "entitlement": state,
                "has_elevated_access": state.has_elevated_access(),
                "limits": {
                    "habits": state.check_limit(Resource::Habits, habits.len() as u32),
                    "tasks": state.check_limit(Resource::Tasks, tasks.len() as u32),
                    "transactions": state.check_limit(Resource::Transactions, transactions.len() as u32),
                },
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        EntitlementAction::SignIn => {
            let mut account: AccountSnapshot = load_blob(&db, KEY_SUBSCRIPTION)?;
            account.signed_in = true;
            save_blob(&db, KEY_SUBSCRIPTION, &account)?;
            println!("{}", serde_json::to_string_pretty(&account)?);
        }
        EntitlementAction::SignOut => {
            let mut account: AccountSnapshot = load_blob(&db, KEY_SUBSCRIPTION)?;
            account.signed_in = false;
            save_blob(&db, KEY_SUBSCRIPTION, &account)?;
            println!("{}", serde_json::to_string_pretty(&account)?);
        }
        EntitlementAction::SetSubscription {
            paid,
            trial,
            trial_days_left,
        } => {
            let mut account: AccountSnapshot = load_blob(&db, KEY_SUBSCRIPTION)?;
            account.subscription.paid_active = paid;
            account.subscription.trial_active = trial;
            account.subscription.trial_days_left = trial_days_left;
            save_blob(&db, KEY_SUBSCRIPTION, &account)?;
            println!("{}", serde_json::to_string_pretty(&account)?);
        }
    }
    Ok(())
}
