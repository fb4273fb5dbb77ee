use clap::Subcommand;
use traderoutine_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one setting from config.toml
    Get {
        /// Dotted key: storage.database_file, catalog.path or logging.level
        key: String,
    },
    /// Change one setting and write config.toml back
    Set {
        /// Dotted key: storage.database_file, catalog.path or logging.level
        key: String,
        /// Relative paths resolve against the data directory; "" unsets catalog.path
        value: String,
    },
    /// Print the whole config as JSON
    List,
    /// Overwrite config.toml with the built-in database file, catalog and log level
    Reset,
}

pub fn run(action: ConfigAction, mut config: Config) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => match config.get(&key) {
            Some(value) => println!("{value}"),
            None => return Err(format!("unknown key: {key}").into()),
        },
        ConfigAction::Set { key, value } => {
            config.set(&key, &value)?;
            config.save()?;
            println!("ok");
        }
        ConfigAction::List => {
            let json = serde_json::to_string_pretty(&config)?;
            println!("{json}");
        }
        ConfigAction::Reset => {
            Config::default().save()?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}
