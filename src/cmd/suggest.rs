use crate::reports;
use clap::Args;
use keylens::api;
use keylens::config::Config;
use keylens::dataset::{Competition, SuggestMetric};
use keylens::error::KwResult;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct SuggestArgs {
    #[command(flatten)]
    pub config: Config,

    #[arg(short, long)]
    pub input: PathBuf,

    #[arg(short, long)]
    pub query: String,

    /// Ranking column: total, pc, mobile, clicks or difficulty
    #[arg(long, default_value_t = SuggestMetric::TotalVolume)]
    pub metric: SuggestMetric,

    /// Only suggest keywords with this competition label
    #[arg(long)]
    pub level: Option<String>,
}

pub fn run(args: SuggestArgs, config: Config) -> KwResult<()> {
    let query = api::validate_keyword(&args.query)?;
    let records = super::load_records(&args.input)?;
    let result = api::analyze(&records, query, &config)?;

    let level = args.level.as_deref().map(Competition::from_label);
    let picks = result
        .dataset
        .suggest(args.metric, level.as_ref(), config.filter.suggest_limit);

    if picks.is_empty() {
        println!("\nNo keywords to suggest for '{}'.", query);
    } else {
        reports::print_suggestions(&picks, args.metric, config.report.keyword_width);
    }
    Ok(())
}
