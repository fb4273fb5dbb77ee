//! Single-day commands: show the checklist, toggle options, write the recap.

use chrono::NaiveDate;
use clap::Args;
use traderoutine_core::{parse_date_key, Config, DayView, Mood, SUCCESS_THRESHOLD};

use super::{date_or_today, open_tracker};

#[derive(Args)]
pub struct TodayArgs {
    /// Day to show (YYYY-MM-DD, default today)
    #[arg(long, value_parser = parse_date_key)]
    date: Option<NaiveDate>,
    /// Print as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Option id, e.g. "dm_email" (see `catalog`)
    option: String,
    /// Day to update (YYYY-MM-DD, default today)
    #[arg(long, value_parser = parse_date_key)]
    date: Option<NaiveDate>,
}

#[derive(Args)]
pub struct RecapArgs {
    /// One-line recap; an empty string clears it
    #[arg(long)]
    note: Option<String>,
    /// Mood name or label: smooth, normal, tired, annoyed
    #[arg(long, conflicts_with = "clear_mood")]
    mood: Option<Mood>,
    /// Remove the recorded mood
    #[arg(long)]
    clear_mood: bool,
    /// Day to update (YYYY-MM-DD, default today)
    #[arg(long, value_parser = parse_date_key)]
    date: Option<NaiveDate>,
}

pub fn today(args: TodayArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let tracker = open_tracker(config)?;
    let view = tracker.day(date_or_today(args.date))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    print_day(&view, tracker.catalog());
    Ok(())
}

pub fn check(args: CheckArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let tracker = open_tracker(config)?;
    let date = date_or_today(args.date);
    let record = tracker.toggle_option(date, &args.option)?;
    let view = tracker.day(date)?;

    let state = if record.is_checked(&args.option) {
        "checked"
    } else {
        "unchecked"
    };
    println!(
        "{state} {} on {date} ({}/{} modules, {})",
        args.option, view.evaluation.satisfied_count, view.module_count, view.evaluation.tier
    );
    Ok(())
}

pub fn recap(args: RecapArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    if args.note.is_none() && args.mood.is_none() && !args.clear_mood {
        return Err("nothing to update: pass --note, --mood or --clear-mood".into());
    }

    let tracker = open_tracker(config)?;
    let date = date_or_today(args.date);
    if let Some(note) = &args.note {
        tracker.set_note(date, note)?;
    }
    if args.mood.is_some() || args.clear_mood {
        tracker.set_mood(date, args.mood)?;
    }

    let view = tracker.day(date)?;
    println!(
        "recap saved for {date} ({}/{} modules, {})",
        view.evaluation.satisfied_count, view.module_count, view.evaluation.tier
    );
    Ok(())
}

fn mark(on: bool) -> &'static str {
    if on {
        "[x]"
    } else {
        "[ ]"
    }
}

fn print_day(view: &DayView, catalog: &traderoutine_core::Catalog) {
    let summary = if view.evaluation.tier.is_success() {
        format!("done: {} modules", view.evaluation.satisfied_count)
    } else {
        format!(
            "{} / {} modules (goal {SUCCESS_THRESHOLD}+)",
            view.evaluation.satisfied_count, view.module_count
        )
    };
    println!("{}  {summary}", view.date);

    for (module, status) in catalog.iter().zip(&view.modules) {
        println!("{} {}", mark(status.satisfied), module.title);
        for option in &module.options {
            println!(
                "    {} {:<16} {}",
                mark(view.record.is_checked(&option.id)),
                option.id,
                option.label
            );
        }
        if module.reflection {
            if let Some(note) = &view.record.note {
                println!("    note: {note}");
            }
            if let Some(mood) = view.record.mood {
                println!("    mood: {mood} ({})", mood.label());
            }
        }
    }
}
