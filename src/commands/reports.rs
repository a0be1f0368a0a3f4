//! `nido reports` subcommands.

use anyhow::Result;

use crate::nursery::NurseryApi;
use crate::spinner::spinner_hooks;

pub async fn daily(api: &NurseryApi, child: i64, date: Option<String>) -> Result<()> {
    let reports = api
        .daily_reports(child, date.as_deref(), spinner_hooks("loading reports"))
        .await?;

    if reports.items.is_empty() {
        println!("no daily reports");
        return Ok(());
    }
    for report in &reports.items {
        println!("  {}  {}", report.date, report.notes.as_deref().unwrap_or(""));
    }
    Ok(())
}

pub async fn progress(api: &NurseryApi, child: i64) -> Result<()> {
    let reports = api
        .progress_reports(child, spinner_hooks("loading reports"))
        .await?;

    if reports.items.is_empty() {
        println!("no progress reports");
        return Ok(());
    }
    for report in &reports.items {
        println!(
            "  {:<12} {}",
            report.period.as_deref().unwrap_or("-"),
            report.summary.as_deref().unwrap_or("")
        );
    }
    Ok(())
}

pub async fn attendance(
    api: &NurseryApi,
    child: i64,
    from: Option<String>,
    to: Option<String>,
) -> Result<()> {
    let entries = api
        .attendance(
            child,
            from.as_deref(),
            to.as_deref(),
            spinner_hooks("loading attendance"),
        )
        .await?;

    let mut present = 0usize;
    for entry in &entries.items {
        let mark = if entry.present { "✓" } else { "✗" };
        println!("  {}  {}", entry.date, mark);
        if entry.present {
            present += 1;
        }
    }
    println!("{present} of {} days present", entries.items.len());
    Ok(())
}
