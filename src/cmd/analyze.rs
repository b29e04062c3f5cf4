use crate::reports;
use clap::Args;
use keylens::api::{self, AnalysisResult};
use keylens::config::Config;
use keylens::error::KwResult;
use keylens::export::{self, ExportFormat};
use keylens::scoring::cluster_summary;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub config: Config,

    /// Saved search API response (JSON)
    #[arg(short, long)]
    pub input: PathBuf,

    /// The keyword that was searched
    #[arg(short, long)]
    pub query: String,

    /// Directory to write the export file into
    #[arg(long)]
    pub export: Option<PathBuf>,

    #[arg(long, default_value_t = ExportFormat::Csv)]
    pub format: ExportFormat,

    /// Print the analysis as JSON instead of tables
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: AnalyzeArgs, config: Config) -> KwResult<()> {
    let query = api::validate_keyword(&args.query)?;
    let records = super::load_records(&args.input)?;
    let result = api::analyze(&records, query, &config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_tables(&result, &config);
    }

    if let Some(dir) = &args.export {
        write_export(&result, dir, args.format)?;
    }
    Ok(())
}

fn print_tables(result: &AnalysisResult, config: &Config) {
    let width = config.report.keyword_width;

    if let Some(main) = result.dataset.main_row() {
        reports::print_overview(main, width);
    }

    let shown = result.filtered(&config.filter);
    if shown.is_empty() {
        println!("\nNo keywords match the current filters.");
    } else {
        reports::print_keyword_table(&shown, width);
    }

    match &result.stats {
        Some(stats) => reports::print_statistics(stats),
        None => println!("\nNo keyword data for '{}'.", result.query),
    }

    let clusters = cluster_summary(&result.dataset);
    if !clusters.is_empty() {
        reports::print_clusters(&clusters);
    }
}

fn write_export(result: &AnalysisResult, dir: &Path, format: ExportFormat) -> KwResult<()> {
    let now = chrono::Local::now();
    let (bytes, filename) = export::export(&result.dataset, &result.query, format, &now)?;

    fs::create_dir_all(dir)?;
    let path = dir.join(&filename);
    fs::write(&path, bytes)?;
    info!("💾 Exported {} keywords to {}", result.dataset.len(), path.display());

    if let (ExportFormat::Csv, Some(stats)) = (format, &result.stats) {
        let stem = filename.trim_end_matches(".csv");
        let stats_path = dir.join(format!("{}_stats.csv", stem));
        fs::write(&stats_path, export::export_stats_csv(stats)?)?;
        info!("💾 Exported statistics to {}", stats_path.display());
    }
    Ok(())
}
