use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use keylens::config::Config;
use keylens::error::KwResult;
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about = "Keyword search volume analysis", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON config file; flags given on the command line override it
    #[arg(global = true, long = "config")]
    config_file: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rank, score and cluster the related keywords of a query
    Analyze(cmd::analyze::AnalyzeArgs),
    /// Pick the best related keywords by one metric
    Suggest(cmd::suggest::SuggestArgs),
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    let Some((_, sub_matches)) = matches.subcommand() else {
        error!("❌ No subcommand given");
        process::exit(2);
    };

    let cli_config = match &cli.command {
        Commands::Analyze(args) => &args.config,
        Commands::Suggest(args) => &args.config,
    };

    let config = resolve_config(cli_config, cli.config_file.as_deref(), sub_matches)
        .unwrap_or_else(|e| {
            error!("❌ {}", e);
            process::exit(1);
        });

    let outcome = match cli.command {
        Commands::Analyze(args) => cmd::analyze::run(args, config),
        Commands::Suggest(args) => cmd::suggest::run(args, config),
    };

    if let Err(e) = outcome {
        error!("❌ {}", e);
        process::exit(1);
    }
}

fn resolve_config(cli: &Config, path: Option<&str>, matches: &ArgMatches) -> KwResult<Config> {
    let config = match path {
        Some(path) => {
            info!("⚙️  Loading config from: {}", path);
            let mut file_config = Config::load_from_file(path)?;
            file_config.merge_from_cli(cli, matches);
            file_config
        }
        None => cli.clone(),
    };

    config.validate()?;
    Ok(config)
}
