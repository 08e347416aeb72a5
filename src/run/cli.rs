use anyhow::{Context, Result};
use chrono::{Datelike, Duration, NaiveDate};
use std::path::Path;

use crate::store::{parse_amount, parse_date};
use crate::tracker::Tracker;
use crate::util::{format_amount, format_estimate, progress_bar, shellexpand, truncate};

/// Dispatch a command. `args` excludes the program name and global flags.
pub(crate) fn as_cli(args: &[String], tracker: &mut Tracker) -> Result<()> {
    let Some(command) = args.first() else {
        return cli_overview(&[], tracker);
    };
    let rest = &args[1..];
    match command.as_str() {
        "add" | "a" => cli_add(rest, tracker),
        "list" | "ls" => cli_list(rest, tracker),
        "summary" | "s" => cli_summary(rest, tracker),
        "overview" => cli_overview(rest, tracker),
        "alerts" => cli_alerts(rest, tracker),
        "budget" => cli_set_budget(rest, tracker),
        "budgets" => cli_budgets(rest, tracker),
        "forecast" | "f" => cli_forecast(tracker),
        "insights" | "i" => cli_insights(tracker),
        "categories" => cli_categories(tracker),
        "report" => cli_report(rest, tracker),
        "export" => cli_export(rest, tracker),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("spendcast {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("Spendcast - local-only personal expense tracker");
    println!();
    println!("Usage: spendcast [options] [command]");
    println!();
    println!("Commands:");
    println!("  (none)                            Overview of the current month");
    println!("  add <date> <category> <amount> [description...]");
    println!("                                    Record an expense");
    println!("  list [YYYY-MM]                    List expenses for a month");
    println!("  summary [YYYY-MM]                 Spending by category for a month");
    println!("  alerts [YYYY-MM]                  Categories over budget");
    println!("  budget <category> <amount>        Set a monthly budget");
    println!("  budgets [YYYY-MM]                 Budget vs actual");
    println!("  forecast                          Predict next month's spending");
    println!("  insights                          Trend, top categories and recommendations");
    println!("  categories                        List categories in use");
    println!("  report                            Spending report for a date range");
    println!("    --from <YYYY-MM-DD>             Start date (default: 30 days ago)");
    println!("    --to <YYYY-MM-DD>               End date (default: today)");
    println!("  export [path]                     Export expenses to CSV");
    println!("    --month <YYYY-MM>               Month to export (default: current)");
    println!("  --help, -h                        Show this help");
    println!("  --version, -V                     Show version");
    println!();
    println!("Options:");
    println!("  --data-dir <path>                 Data directory (or SPENDCAST_DATA_DIR)");
    println!("  --anchor <now|latest>             Forecast the month after today (default)");
    println!("                                    or after the latest recorded month");
    println!("  -v, --verbose                     Debug logging (RUST_LOG overrides)");
}

/// Length of the report window when `--from` is omitted.
const REPORT_DEFAULT_DAYS: i64 = 30;

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Parse `YYYY-MM` into `(year, month)`.
pub(crate) fn parse_month(s: &str) -> Result<(i32, u32)> {
    let date = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .with_context(|| format!("Invalid month: {s} (expected YYYY-MM)"))?;
    Ok((date.year(), date.month()))
}

/// Month from the first non-flag argument, else the current month.
fn month_arg(args: &[String]) -> Result<(i32, u32)> {
    match args.first().filter(|a| !a.starts_with('-')) {
        Some(m) => parse_month(m),
        None => {
            let today = today();
            Ok((today.year(), today.month()))
        }
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn cli_add(args: &[String], tracker: &mut Tracker) -> Result<()> {
    if args.len() < 3 {
        anyhow::bail!("Usage: spendcast add <date> <category> <amount> [description...]");
    }
    let date = parse_date(&args[0])
        .ok_or_else(|| anyhow::anyhow!("Invalid date: {}", args[0]))?;
    let category = &args[1];
    let amount =
        parse_amount(&args[2]).ok_or_else(|| anyhow::anyhow!("Invalid amount: {}", args[2]))?;
    let description = args[3..].join(" ");

    tracker
        .append(date, category, amount, &description)
        .context("Failed to add expense")?;
    println!(
        "Added {} {} on {}",
        category.trim(),
        format_amount(amount),
        date.format("%Y-%m-%d")
    );

    for alert in tracker.check_alerts(date.year(), date.month()) {
        if alert.category == category.trim() {
            println!(
                "Warning: {} is over budget by {} this month",
                alert.category,
                format_amount(alert.overspend)
            );
        }
    }
    Ok(())
}

fn cli_list(args: &[String], tracker: &Tracker) -> Result<()> {
    let (year, month) = month_arg(args)?;
    let records = tracker.monthly_summary(year, month);
    if records.is_empty() {
        println!("No expenses for {year:04}-{month:02}");
        return Ok(());
    }

    println!("{:<12} {:<20} {:>12}  Description", "Date", "Category", "Amount");
    println!("{}", "─".repeat(70));
    for rec in &records {
        println!(
            "{:<12} {:<20} {:>12}  {}",
            rec.date_string(),
            truncate(&rec.category, 20),
            format_amount(rec.amount),
            truncate(&rec.description, 30),
        );
    }
    Ok(())
}

fn cli_summary(args: &[String], tracker: &Tracker) -> Result<()> {
    let (year, month) = month_arg(args)?;
    let totals = tracker.category_totals(year, month);
    let grand: rust_decimal::Decimal = totals.iter().map(|c| c.total).sum();

    println!("Spendcast - {year:04}-{month:02}");
    println!("{}", "─".repeat(40));
    if totals.is_empty() {
        println!("  No expenses recorded");
        return Ok(());
    }
    for ct in &totals {
        println!("  {:<24} {:>12}", truncate(&ct.category, 24), format_amount(ct.total));
    }
    println!("{}", "─".repeat(40));
    println!("  {:<24} {:>12}", "Total", format_amount(grand));
    Ok(())
}

fn cli_overview(args: &[String], tracker: &Tracker) -> Result<()> {
    let (year, month) = month_arg(args)?;
    let overview = tracker.month_overview(year, month);

    println!("Spendcast - {:04}-{:02}", overview.year, overview.month);
    println!("{}", "─".repeat(40));
    println!("  Total spent:      {}", format_amount(overview.total));
    println!("  Transactions:     {}", overview.transactions);
    println!("  Average per day:  {}", format_amount(overview.average_per_day));
    println!(
        "  Top category:     {}",
        overview.top_category.as_deref().unwrap_or("-")
    );

    if !overview.daily_totals.is_empty() {
        println!();
        println!("Daily spending:");
        for (day, total) in &overview.daily_totals {
            println!("  {}  {:>12}", day.format("%Y-%m-%d"), format_amount(*total));
        }
    }

    let alerts = tracker.check_alerts(year, month);
    if !alerts.is_empty() {
        println!();
        println!("Budget alerts:");
        for alert in &alerts {
            println!(
                "  {} over by {} (spent {} of {})",
                alert.category,
                format_amount(alert.overspend),
                format_amount(alert.spent),
                format_amount(alert.budget),
            );
        }
    }
    Ok(())
}

fn cli_alerts(args: &[String], tracker: &Tracker) -> Result<()> {
    let (year, month) = month_arg(args)?;
    let alerts = tracker.check_alerts(year, month);
    if alerts.is_empty() {
        println!("All categories within budget for {year:04}-{month:02}");
        return Ok(());
    }

    println!(
        "{:<20} {:>12} {:>12} {:>12}",
        "Category", "Budget", "Spent", "Over by"
    );
    println!("{}", "─".repeat(59));
    for alert in &alerts {
        println!(
            "{:<20} {:>12} {:>12} {:>12}",
            truncate(&alert.category, 20),
            format_amount(alert.budget),
            format_amount(alert.spent),
            format_amount(alert.overspend),
        );
    }
    Ok(())
}

fn cli_set_budget(args: &[String], tracker: &mut Tracker) -> Result<()> {
    if args.len() < 2 {
        anyhow::bail!("Usage: spendcast budget <category> <amount>");
    }
    let amount =
        parse_amount(&args[1]).ok_or_else(|| anyhow::anyhow!("Invalid amount: {}", args[1]))?;
    tracker
        .set_budget(&args[0], amount)
        .context("Failed to set budget")?;
    println!(
        "Budget for {} set to {}",
        args[0].trim(),
        format_amount(amount)
    );
    Ok(())
}

fn cli_budgets(args: &[String], tracker: &Tracker) -> Result<()> {
    let (year, month) = month_arg(args)?;
    if tracker.budgets().is_empty() {
        println!("No budgets set. Use: spendcast budget <category> <amount>");
        return Ok(());
    }
    let status = tracker.budget_status(year, month);

    println!("Budgets - {year:04}-{month:02}");
    println!("{}", "─".repeat(72));
    for s in &status {
        println!(
            "{:<20} {} {:>6.1}%  {:>10} / {:>10}",
            truncate(&s.category, 20),
            progress_bar(s.percent_used, 20),
            s.percent_used,
            format_amount(s.spent),
            format_amount(s.budget),
        );
    }
    Ok(())
}

fn cli_forecast(tracker: &Tracker) -> Result<()> {
    match tracker.predict_next_period(today()) {
        Ok(p) => {
            println!(
                "Predicted spending for {:04}-{:02}: {}",
                p.year,
                p.month,
                format_estimate(p.amount)
            );
            println!("{}", p.message);
        }
        Err(e) => println!("{e}"),
    }
    Ok(())
}

fn cli_insights(tracker: &Tracker) -> Result<()> {
    if tracker.records().is_empty() {
        println!("No expenses recorded yet");
        return Ok(());
    }
    let insights = tracker.insights();

    println!("Monthly totals:");
    for m in tracker.monthly_totals() {
        println!("  {}  {:>12}", m.label(), format_amount(m.total));
    }
    println!();

    match insights.trend {
        Some(trend) => match trend.change_percent {
            Some(pct) => println!("Spending trend: {} ({pct:+.1}%)", trend.direction),
            None => println!("Spending trend: {}", trend.direction),
        },
        None => println!("Spending trend: need at least two months of data"),
    }

    if !insights.top_categories.is_empty() {
        println!();
        println!("Top categories:");
        for (rank, share) in insights.top_categories.iter().enumerate() {
            println!(
                "  {}. {:<20} {:>12} ({:.1}%)",
                rank + 1,
                truncate(&share.category, 20),
                format_amount(share.total),
                share.share_percent,
            );
        }
    }

    if let Some(c) = insights.consistency {
        println!();
        println!(
            "Monthly variation (CV): {:.2} ({})",
            c.cv,
            if c.consistent { "consistent" } else { "inconsistent" }
        );
    }

    if !insights.recommendations.is_empty() {
        println!();
        println!("Recommendations:");
        for rec in &insights.recommendations {
            println!("  - {rec}");
        }
    }
    Ok(())
}

fn cli_categories(tracker: &Tracker) -> Result<()> {
    let categories = tracker.categories();
    if categories.is_empty() {
        println!("No categories");
        return Ok(());
    }
    for name in &categories {
        match tracker.budgets().get(name) {
            Some(limit) => println!("{name:<24} budget {}", format_amount(limit)),
            None => println!("{name}"),
        }
    }
    Ok(())
}

fn default_report_start(end: NaiveDate) -> Result<NaiveDate> {
    end.checked_sub_signed(Duration::days(REPORT_DEFAULT_DAYS))
        .ok_or_else(|| anyhow::anyhow!("--to date {end} is too early for a default range"))
}

fn cli_report(args: &[String], tracker: &Tracker) -> Result<()> {
    let end = match flag_value(args, "--to") {
        Some(s) => parse_date(s).ok_or_else(|| anyhow::anyhow!("Invalid --to date: {s}"))?,
        None => today(),
    };
    let start = match flag_value(args, "--from") {
        Some(s) => parse_date(s).ok_or_else(|| anyhow::anyhow!("Invalid --from date: {s}"))?,
        None => default_report_start(end)?,
    };
    if start > end {
        anyhow::bail!("--from must not be after --to");
    }

    let report = tracker.range_report(start, end);
    println!(
        "Report {} to {}",
        report.start.format("%Y-%m-%d"),
        report.end.format("%Y-%m-%d")
    );
    println!("{}", "─".repeat(50));
    if report.transactions == 0 {
        println!("  No expenses in this range");
        return Ok(());
    }
    println!("  Total spent:      {}", format_amount(report.total));
    println!("  Transactions:     {}", report.transactions);
    println!("  Average expense:  {}", format_amount(report.average_expense));
    println!("  Categories:       {}", report.category_count);

    println!();
    println!("{:<20} {:>12} {:>6} {:>12}", "Category", "Total", "Count", "Average");
    for c in &report.categories {
        println!(
            "{:<20} {:>12} {:>6} {:>12}",
            truncate(&c.category, 20),
            format_amount(c.total),
            c.count,
            format_amount(c.average),
        );
    }

    println!();
    println!("Largest expenses:");
    for rec in &report.top_expenses {
        println!(
            "  {}  {:<16} {:>12}  {}",
            rec.date_string(),
            truncate(&rec.category, 16),
            format_amount(rec.amount),
            truncate(&rec.description, 30),
        );
    }
    Ok(())
}

fn cli_export(args: &[String], tracker: &Tracker) -> Result<()> {
    let (year, month) = match flag_value(args, "--month") {
        Some(m) => parse_month(m)?,
        None => {
            let today = today();
            (today.year(), today.month())
        }
    };

    // Output path is the first non-flag argument
    let output_path = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| shellexpand(a))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            format!("{home}/spendcast-export-{year:04}-{month:02}.csv")
        });

    let count = tracker
        .export_month(Path::new(&output_path), year, month)
        .with_context(|| format!("Failed to export to {output_path}"))?;
    if count == 0 {
        println!("No expenses for {year:04}-{month:02}");
    } else {
        println!("Exported {count} expenses to {output_path}");
    }
    Ok(())
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
