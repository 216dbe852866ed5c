use clap::Subcommand;

use cadence_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Print the config file path
    Path,
    /// Set a base-tier resource cap
    SetLimit {
        /// Resource name: habits, tasks, or transactions
        resource: String,
        /// New cap
        value: u32,
    },
    /// Set the guest window duration in hours
    SetGuestHours {
        hours: u32,
    },
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => {
            let config = Config::load()?;
            println!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::Path => {
            println!("{}", Config::path()?.display());
        }
        ConfigAction::SetLimit { resource, value } => {
            let mut config = Config::load()?;
            match resource.as_str() {
                "habits" => config.limits.habits = value,
                "tasks" => config.limits.tasks = value,
                "transactions" => config.limits.transactions = value,
                other => return Err(format!("unknown resource: {other}").into()),
            }
            config.save()?;
            println!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::SetGuestHours { hours } => {
            let mut config = Config::load()?;
            config.access.guest_window_hours = hours;
            config.save()?;
            println!("{}", toml::to_string_pretty(&config)?);
        }
    }
    Ok(())
}
