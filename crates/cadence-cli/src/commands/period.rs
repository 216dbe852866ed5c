use clap::Subcommand;

use cadence_core::date::parse_iso_date;
use cadence_core::{days_in_window, resolve_period, Clock, PeriodKind, SystemClock};

#[derive(Subcommand)]
pub enum PeriodAction {
    /// Resolve a period's date range (week, month, quarter, year, custom)
    Resolve {
        /// Period kind
        #[arg(value_enum)]
        kind: KindArg,
        /// Custom range start, YYYY-MM-DD (custom kind only)
        #[arg(long)]
        start: Option<String>,
        /// Custom range end, YYYY-MM-DD (custom kind only)
        #[arg(long)]
        end: Option<String>,
    },
    /// Print the calendar day window starting at this week's Monday
    Days {
        /// Number of days to emit
        #[arg(long, default_value = "14")]
        count: usize,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
pub enum KindArg {
    Week,
    Month,
    Quarter,
    Year,
    Custom,
}

impl From<KindArg> for PeriodKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Week => PeriodKind::Week,
            KindArg::Month => PeriodKind::Month,
            KindArg::Quarter => PeriodKind::Quarter,
            KindArg::Year => PeriodKind::Year,
            KindArg::Custom => PeriodKind::Custom,
        }
    }
}

pub fn run(action: PeriodAction) -> Result<(), Box<dyn std::error::Error>> {
    let today = SystemClock.today();
    match action {
        PeriodAction::Resolve { kind, start, end } => {
            let custom = match (start, end) {
                (Some(start), Some(end)) => {
                    Some((parse_iso_date(&start)?, parse_iso_date(&end)?))
                }
                _ => None,
            };
            let range = resolve_period(kind.into(), today, custom);
            println!("{}", serde_json::to_string_pretty(&range)?);
        }
        PeriodAction::Days { count } => {
            let days: Vec<_> = days_in_window(count, today).collect();
            println!("{}", serde_json::to_string_pretty(&days)?);
        }
    }
    Ok(())
}
