use adcat_core::AdStats;
use adcat_db::AdStore;

fn render_stats(stats: &AdStats) -> String {
    let mut out = format!(
        "total ads:          {}\nactive:             {}\ninactive:           {}\nmultiple versions:  {}\n",
        stats.total, stats.active, stats.inactive, stats.with_multiple_versions
    );

    out.push_str("\nPLATFORM            ADS\n");
    if stats.by_platform.is_empty() {
        out.push_str("(none)\n");
    }
    for (platform, count) in &stats.by_platform {
        out.push_str(&format!("{platform:<20}{count}\n"));
    }

    out.push_str("\nSTART DATE          ADS\n");
    if stats.by_date.is_empty() {
        out.push_str("(none)\n");
    }
    for entry in &stats.by_date {
        out.push_str(&format!(
            "{:<20}{}\n",
            entry.date.format("%Y-%m-%d").to_string(),
            entry.count
        ));
    }

    out
}

/// Print the catalog summary.
///
/// # Errors
///
/// Returns an error if any aggregate query fails.
pub(crate) async fn run_stats(store: &AdStore) -> anyhow::Result<()> {
    let stats = store.compute_stats().await?;
    print!("{}", render_stats(&stats));
    Ok(())
}
