use traderoutine_core::Config;

pub fn run(json: bool, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = config.load_catalog()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    for module in &catalog {
        let kind = if module.reflection { " (note or mood)" } else { "" };
        println!("{}  {}{kind}", module.id, module.title);
        for option in &module.options {
            println!("    {:<16} {}", option.id, option.label);
        }
    }
    Ok(())
}
