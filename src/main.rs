use anyhow::{anyhow, bail, Context, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::env;

use bazi_calculator::{compatibility, Chart, PillarRole, Subject, ALL_ELEMENTS};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("chart") => run_chart(&args[2..]),
        Some("compare") => run_compare(&args[2..]),
        _ => {
            print_usage();
            Ok(())
        }
    }
}

fn print_usage() {
    println!("BaZi Calculator - Four Pillars of Destiny");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!();
    println!("Usage:");
    println!("  bazi-calculator chart <YYYY-MM-DD> <HH:MM> [name]");
    println!("  bazi-calculator compare <YYYY-MM-DDTHH:MM> <YYYY-MM-DDTHH:MM> ...");
    println!();
    println!("Examples:");
    println!("  bazi-calculator chart 1990-05-15 14:30");
    println!("  bazi-calculator compare 1990-05-15T14:30 1992-08-01T08:00");
}

/// Parse the two separate form fields (date, time) into one date-time.
///
/// A missing or malformed field blocks computation, mirroring the form
/// validation the original page did before calling the engine.
fn parse_date_time(date: Option<&String>, time: Option<&String>) -> Result<NaiveDateTime> {
    let date = date.ok_or_else(|| anyhow!("Missing birth date (expected YYYY-MM-DD)"))?;
    let time = time.ok_or_else(|| anyhow!("Missing birth time (expected HH:MM)"))?;

    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .with_context(|| format!("Invalid date: {date}"))?;
    let time = NaiveTime::parse_from_str(time, "%H:%M")
        .with_context(|| format!("Invalid time: {time}"))?;
    Ok(date.and_time(time))
}

fn run_chart(args: &[String]) -> Result<()> {
    let dt = parse_date_time(args.first(), args.get(1))?;
    let name = args.get(2).cloned().unwrap_or_default();

    let chart = Chart::compute(dt).with_subject(Subject {
        name: name.clone(),
        datetime: dt.format("%Y-%m-%d %H:%M").to_string(),
        ..Subject::default()
    });

    println!("四柱八字 Four Pillars Chart");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    if !name.is_empty() {
        println!("Name:  {name}");
    }
    println!("Birth: {}", dt.format("%Y-%m-%d %H:%M"));
    println!();

    for role in [PillarRole::Year, PillarRole::Month, PillarRole::Day, PillarRole::Hour] {
        let pillar = chart.pillar(role);
        println!(
            "  {}  {}{}   ({} {}, {} {})",
            pillar.pillar,
            pillar.stem,
            pillar.branch,
            pillar.stem,
            pillar.stem_element().as_str(),
            pillar.branch,
            pillar.branch_element().as_str(),
        );
    }

    println!();
    println!("五行 Elements:");
    for element in ALL_ELEMENTS {
        let count = chart.elements_count.count(element);
        println!(
            "  {} {:<5} {:<8} {}",
            element.glyph(),
            element.as_str(),
            "#".repeat(count as usize),
            count
        );
    }
    println!();
    println!("阴阳 Yin/Yang: 阴 {} / 阳 {}", chart.yin, chart.yang);

    Ok(())
}

fn run_compare(args: &[String]) -> Result<()> {
    if args.len() < 2 {
        bail!("compare needs at least 2 date-times (YYYY-MM-DDTHH:MM)");
    }

    let mut charts = Vec::with_capacity(args.len());
    for arg in args {
        let dt = NaiveDateTime::parse_from_str(arg, "%Y-%m-%dT%H:%M")
            .with_context(|| format!("Invalid date-time: {arg}"))?;
        charts.push(Chart::compute(dt).with_subject(Subject {
            datetime: dt.format("%Y-%m-%d %H:%M").to_string(),
            ..Subject::default()
        }));
    }

    println!("合婚分析 Compatibility Analysis");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for (i, chart) in charts.iter().enumerate() {
        let pillars: Vec<String> = chart
            .pillars
            .iter()
            .map(|p| format!("{}{}", p.stem, p.branch))
            .collect();
        println!("  #{} {}  {}", i + 1, chart.subject.datetime, pillars.join(" "));
    }
    println!();

    // len >= 2 checked above, so the report always exists
    let report = compatibility(&charts)
        .ok_or_else(|| anyhow!("compare needs at least 2 valid charts"))?;

    for spread in &report.spreads {
        println!(
            "  {} spread: {} (min {}, max {})",
            spread.element.glyph(),
            spread.spread,
            spread.min,
            spread.max
        );
    }
    println!();
    println!("Total spread: {}", report.total_spread);
    println!("Rating: {} ({})", report.rating_label, report.rating.as_str());

    Ok(())
}
