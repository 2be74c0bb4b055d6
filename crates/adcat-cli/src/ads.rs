//! Read-only ad query handlers for the CLI.

use adcat_core::{Ad, AdFilters, AdStatus};
use adcat_db::AdStore;
use chrono::NaiveDate;
use clap::{Subcommand, ValueEnum};

/// Status values accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Active,
    Inactive,
}

impl From<StatusArg> for AdStatus {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::Active => AdStatus::Active,
            StatusArg::Inactive => AdStatus::Inactive,
        }
    }
}

/// Sub-commands available under `ads`.
#[derive(Debug, Subcommand)]
pub enum AdsCommands {
    /// List ads matching the given filters, newest start date first
    List {
        /// Filter by status
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
        /// Only ads that ran on this platform (e.g., facebook)
        #[arg(long)]
        platform: Option<String>,
        /// Earliest start date (YYYY-MM-DD)
        #[arg(long)]
        start_date: Option<NaiveDate>,
        /// Latest start date (YYYY-MM-DD); bounds the start date, not the end date
        #[arg(long)]
        end_date: Option<NaiveDate>,
        /// Filter by whether the ad has multiple creative versions
        #[arg(long)]
        multiple_versions: Option<bool>,
    },
    /// Show a single ad by its library identifier
    Show {
        /// Ad library identifier
        ad_id: String,
    },
}

/// Builds the filter set for `ads list`.
///
/// # Errors
///
/// Returns an error if `start_date` falls after `end_date`.
fn build_filters(
    status: Option<StatusArg>,
    platform: Option<String>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    multiple_versions: Option<bool>,
) -> anyhow::Result<AdFilters> {
    if let (Some(from), Some(until)) = (start_date, end_date) {
        anyhow::ensure!(from <= until, "--start-date must not be after --end-date");
    }

    Ok(AdFilters {
        status: status.map(AdStatus::from),
        platform: platform.filter(|p| !p.is_empty()),
        start_date,
        end_date,
        multiple_versions,
    })
}

/// Format an optional date for display, returning `"-"` when `None`.
fn fmt_date(date: Option<NaiveDate>) -> String {
    date.map_or_else(|| "-".to_string(), |d| d.format("%Y-%m-%d").to_string())
}

fn print_ad_table(ads: &[Ad]) {
    println!(
        "{:<20}{:<10}{:<12}{:<12}{:<9}PLATFORMS",
        "AD ID", "STATUS", "START", "END", "VERSIONS"
    );
    for ad in ads {
        println!(
            "{:<20}{:<10}{:<12}{:<12}{:<9}{}",
            ad.ad_id,
            ad.status.as_str(),
            fmt_date(ad.start_date),
            fmt_date(ad.end_date),
            if ad.multiple_versions { "yes" } else { "no" },
            ad.platforms.join(",")
        );
    }
}

fn print_ad_detail(ad: &Ad) {
    println!("ad id:             {}", ad.ad_id);
    println!("status:            {}", ad.status);
    println!("platforms:         {}", ad.platforms.join(", "));
    println!("start date:        {}", fmt_date(ad.start_date));
    println!("end date:          {}", fmt_date(ad.end_date));
    println!("multiple versions: {}", ad.multiple_versions);
    println!(
        "asset type:        {}",
        ad.asset_type.map_or("-", |t| t.as_str())
    );
    println!("asset path:        {}", ad.asset_path.as_deref().unwrap_or("-"));
    println!("asset url:         {}", ad.asset_url.as_deref().unwrap_or("-"));
    println!(
        "scraped at:        {}",
        ad.scraped_at.map_or_else(
            || "-".to_string(),
            |at| at.format("%Y-%m-%d %H:%M").to_string()
        )
    );
}

/// Dispatches an `ads` sub-command.
///
/// # Errors
///
/// Returns an error if the filters are inconsistent, the query fails, or the
/// requested ad does not exist.
pub(crate) async fn run_ads_command(store: &AdStore, command: AdsCommands) -> anyhow::Result<()> {
    match command {
        AdsCommands::List {
            status,
            platform,
            start_date,
            end_date,
            multiple_versions,
        } => {
            let filters =
                build_filters(status, platform, start_date, end_date, multiple_versions)?;
            let ads = store.list_ads(&filters).await?;
            if ads.is_empty() {
                println!("no ads match the given filters");
                return Ok(());
            }
            print_ad_table(&ads);
            println!("{} ads", ads.len());
        }
        AdsCommands::Show { ad_id } => {
            let ad = store
                .find_ad(&ad_id)
                .await?
                .ok_or_else(|| anyhow::anyhow!("ad '{ad_id}' not found"))?;
            print_ad_detail(&ad);
        }
    }

    Ok(())
}
