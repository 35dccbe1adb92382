// Dashboard command-line entry point
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use engine::analytics::settled_shares;
use engine::config::DashboardSettings;
use engine::filter::FilterSpec;
use engine::validation::ValidationReport;
use engine::{DashboardSession, ExportOutcome};
use shared::brazilian_format::{format_brl, format_percent};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "dashboard", about = "Issued/settled invoice dashboard over CSV and XLSX exports")]
struct Cli {
    /// Settings file overriding the embedded defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// KPIs and company ranking for the default dataset or an imported file
    Summary {
        /// Import this file instead of the default dataset
        #[arg(long)]
        file: Option<PathBuf>,

        #[command(flatten)]
        filters: FilterArgs,

        /// Companies to rank (0 = configured default)
        #[arg(long, default_value_t = 0)]
        top_n: usize,

        /// Print JSON instead of text
        #[arg(long, default_value = "false")]
        json: bool,
    },
    /// Validate a file and optionally write its normalized CSV
    Import {
        file: PathBuf,

        /// Write the canonical CSV when validation passes
        #[arg(long, default_value = "false")]
        export: bool,

        /// Export destination (defaults to the configured file name)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Default)]
struct FilterArgs {
    #[arg(long)]
    company: Option<String>,
    #[arg(long)]
    tax_id: Option<String>,
    #[arg(long)]
    account: Option<String>,
    /// Substring over account, company and tax id
    #[arg(long)]
    search: Option<String>,
    #[arg(long)]
    min_issued: Option<f64>,
    #[arg(long)]
    max_issued: Option<f64>,
    #[arg(long)]
    min_settled: Option<f64>,
    #[arg(long)]
    max_settled: Option<f64>,
    /// First day, YYYY-MM-DD
    #[arg(long)]
    from: Option<NaiveDate>,
    /// Last day (inclusive), YYYY-MM-DD
    #[arg(long)]
    to: Option<NaiveDate>,
}

impl From<FilterArgs> for FilterSpec {
    fn from(args: FilterArgs) -> Self {
        FilterSpec {
            company: args.company,
            tax_id: args.tax_id,
            account: args.account,
            search: args.search,
            min_issued_value: args.min_issued,
            max_issued_value: args.max_issued,
            min_settled_value: args.min_settled,
            max_settled_value: args.max_settled,
            date_from: args.from,
            date_to: args.to,
        }
    }
}

fn print_report(report: &ValidationReport) {
    for error in &report.errors {
        println!("ERROR  {}", error);
    }
    for warning in &report.warnings {
        println!("WARN   {}", warning);
    }
    if report.ok && report.warnings.is_empty() {
        println!("OK     dataset ready for use");
    }
    if !report.summary.is_empty() {
        println!("{}", report.summary);
    }
}

async fn run_summary(
    session: &mut DashboardSession,
    file: Option<PathBuf>,
    filters: FilterSpec,
    top_n: usize,
    json: bool,
) -> Result<()> {
    match file {
        Some(path) => {
            let report = session.stage_file(&path).await?;
            if !report.ok {
                print_report(&report);
                bail!("{} did not pass validation", path.display());
            }
            session.apply_staged()?;
        }
        None => {
            session.load_default().await.with_context(|| {
                format!("Failed to load default dataset {}", session.settings().default_dataset_path.display())
            })?;
        }
    }

    session.apply_filters(filters);
    let kpis = session.kpis();
    let top = session.top_companies(top_n);

    if json {
        let out = serde_json::json!({
            "rows": session.view().len(),
            "total_rows": session.dataset().len(),
            "has_date": session.dataset().has_date(),
            "filters": session.filters(),
            "kpis": kpis,
            "top_companies": top,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("Rows: {} of {}", session.view().len(), session.dataset().len());
    for (label, value) in kpis.display_lines() {
        println!("{:<24}{}", label, value);
    }
    println!();
    println!("Top companies by settled value:");
    for (group, share) in top.iter().zip(settled_shares(&top)) {
        println!(
            "  {:<40} issued {:>18}  settled {:>18}  ({})",
            group.company,
            format_brl(group.issued_value),
            format_brl(group.settled_value),
            format_percent(share)
        );
    }
    Ok(())
}

async fn run_import(session: &mut DashboardSession, file: PathBuf, export: bool, out: Option<PathBuf>) -> Result<()> {
    let report = session.stage_file(&file).await?;
    print_report(&report);
    if !export {
        return Ok(());
    }

    match session.export_staged()? {
        ExportOutcome::Exported(csv) => {
            let out = out.unwrap_or_else(|| PathBuf::from(&session.settings().export_file_name));
            tokio::fs::write(&out, csv)
                .await
                .with_context(|| format!("Failed to write {}", out.display()))?;
            info!(path = %out.display(), "Wrote normalized CSV");
            println!("Normalized CSV written to {}", out.display());
            Ok(())
        }
        ExportOutcome::Blocked(_) => bail!("export blocked: fix the errors above first"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let settings = match &cli.config {
        Some(path) => DashboardSettings::load_from_path(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => DashboardSettings::load_default()?,
    };
    info!(default_dataset = %settings.default_dataset_path.display(), top_n = settings.top_n, "Starting dashboard");

    let mut session = DashboardSession::new(settings);
    match cli.command {
        Command::Summary { file, filters, top_n, json } => {
            run_summary(&mut session, file, filters.into(), top_n, json).await
        }
        Command::Import { file, export, out } => run_import(&mut session, file, export, out).await,
    }
}
