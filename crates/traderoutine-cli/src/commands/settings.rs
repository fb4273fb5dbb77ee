use clap::Subcommand;
use traderoutine_core::Config;

use super::open_tracker;

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Print current settings as JSON
    Show,
    /// Change one or more settings
    Set {
        /// Daily reminder on/off
        #[arg(long)]
        reminder: Option<bool>,
        /// Dark mode on/off
        #[arg(long)]
        dark_mode: Option<bool>,
        /// Whether weekends count toward the streak
        #[arg(long)]
        weekend: Option<bool>,
    },
}

pub fn run(action: SettingsAction, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let tracker = open_tracker(config)?;

    match action {
        SettingsAction::Show => {
            let settings = tracker.settings()?;
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        SettingsAction::Set {
            reminder,
            dark_mode,
            weekend,
        } => {
            if reminder.is_none() && dark_mode.is_none() && weekend.is_none() {
                return Err("nothing to update: pass --reminder, --dark-mode or --weekend".into());
            }
            let settings = tracker.update_settings(|s| {
                if let Some(v) = reminder {
                    s.reminder_enabled = v;
                }
                if let Some(v) = dark_mode {
                    s.dark_mode = v;
                }
                if let Some(v) = weekend {
                    s.weekend_included = v;
                }
            })?;
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
    }
    Ok(())
}
