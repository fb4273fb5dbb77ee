//! Streak, calendar and recent-history commands.

use chrono::{Datelike, NaiveDate};
use clap::Args;
use serde::Serialize;
use traderoutine_core::{parse_date_key, CompletionTier, Config, DaySummary, MAX_RECENT_DAYS};

use super::{date_or_today, open_tracker};

#[derive(Args)]
pub struct StreakArgs {
    /// Reference day (YYYY-MM-DD, default today)
    #[arg(long, value_parser = parse_date_key)]
    date: Option<NaiveDate>,
    /// Print as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
pub struct CalendarArgs {
    /// Month to show (YYYY-MM, default this month)
    #[arg(long, value_parser = parse_month)]
    month: Option<(i32, u32)>,
    /// Print as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
pub struct RecentArgs {
    /// Number of days, ending today (1 to 366)
    #[arg(long, default_value_t = 7, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_RECENT_DAYS)))]
    days: u32,
    /// Last day of the window (YYYY-MM-DD, default today)
    #[arg(long, value_parser = parse_date_key)]
    date: Option<NaiveDate>,
    /// Print as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct StreakReport {
    date: NaiveDate,
    streak: u32,
    weekend_included: bool,
}

fn parse_month(s: &str) -> Result<(i32, u32), String> {
    let invalid = || format!("invalid month '{s}': expected YYYY-MM");
    let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
    let year = year.parse::<i32>().map_err(|_| invalid())?;
    let month = month.parse::<u32>().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok((year, month))
}

fn tier_glyph(tier: CompletionTier) -> char {
    match tier {
        CompletionTier::None => '.',
        CompletionTier::Partial => 'o',
        CompletionTier::Success => '#',
    }
}

pub fn streak(args: StreakArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let tracker = open_tracker(config)?;
    let date = date_or_today(args.date);
    let report = StreakReport {
        date,
        streak: tracker.streak(date)?,
        weekend_included: tracker.settings()?.weekend_included,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{} day streak", report.streak);
    }
    Ok(())
}

pub fn calendar(args: CalendarArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let tracker = open_tracker(config)?;
    let (year, month) = args.month.unwrap_or_else(|| {
        let today = date_or_today(None);
        (today.year(), today.month())
    });
    let view = tracker.month(year, month)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!("{year}-{month:02}");
    println!(" Su  Mo  Tu  We  Th  Fr  Sa");
    for week in view.weeks() {
        let row: Vec<String> = week
            .iter()
            .map(|cell| match cell {
                Some(day) => format!("{:>2}{}", day.date.day(), tier_glyph(day.tier)),
                None => "   ".to_string(),
            })
            .collect();
        println!(" {}", row.join(" "));
    }
    let counts = view.tier_counts();
    println!(
        "# {}: {}   o {}: {}   . {}: {}",
        CompletionTier::Success,
        counts.success,
        CompletionTier::Partial,
        counts.partial,
        CompletionTier::None,
        counts.none
    );
    Ok(())
}

pub fn recent(args: RecentArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let tracker = open_tracker(config)?;
    let days: Vec<DaySummary> = tracker.recent(date_or_today(args.date), args.days)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&days)?);
        return Ok(());
    }

    for day in days {
        println!("{}  {}", day.date, day.tier);
    }
    Ok(())
}
