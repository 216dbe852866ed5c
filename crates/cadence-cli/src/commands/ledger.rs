use clap::Subcommand;
use uuid::Uuid;

use cadence_core::date::parse_iso_date;
use cadence_core::storage::KEY_TRANSACTIONS;
use cadence_core::{Config, Database, PlannedTransaction, Resource};

use super::common::{current_entitlement, load_blob, save_blob};

#[derive(Subcommand)]
pub enum LedgerAction {
    /// Add a planned transaction
    Add {
        /// Transaction label
        label: String,
        /// Planned date, YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// Amount in cents (negative for expenses)
        #[arg(long)]
        amount: i64,
    },
    /// Mark a planned transaction as paid
    Paid {
        /// Transaction ID
        id: String,
    },
    /// Print all planned transactions as JSON
    List,
    /// Remove a planned transaction
    Remove {
        /// Transaction ID
        id: String,
    },
}

pub fn run(action: LedgerAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let config = Config::load()?;
    let mut transactions: Vec<PlannedTransaction> = load_blob(&db, KEY_TRANSACTIONS)?;

    match action {
        LedgerAction::Add {
            label,
            date,
            amount,
        } => {
            parse_iso_date(&date)?;
            let check = current_entitlement(&db, &config)?
                .check_limit(Resource::Transactions, transactions.len() as u32);
            if !check.can_add {
                println!("{}", serde_json::to_string_pretty(&check)?);
                return Err("transaction limit reached".into());
            }
            let tx = PlannedTransaction {
                id: Uuid::new_v4().to_string(),
                label,
                date,
                amount_cents: amount,
                completed: false,
            };
            println!("{}", serde_json::to_string_pretty(&tx)?);
            transactions.push(tx);
            save_blob(&db, KEY_TRANSACTIONS, &transactions)?;
        }
        LedgerAction::Paid { id } => {
            let tx = transactions
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or_else(|| format!("no transaction with id {id}"))?;
            tx.completed = true;
            println!("{}", serde_json::to_string_pretty(tx)?);
            save_blob(&db, KEY_TRANSACTIONS, &transactions)?;
        }
        LedgerAction::List => {
            println!("{}", serde_json::to_string_pretty(&transactions)?);
        }
        LedgerAction::Remove { id } => {
            let before = transactions.len();
            transactions.retain(|t| t.id != id);
            if transactions.len() == before {
                return Err(format!("no transaction with id {id}").into());
            }
            save_blob(&db, KEY_TRANSACTIONS, &transactions)?;
            println!("{{\"removed\": \"{id}\"}}");
        }
    }
    Ok(())
}
