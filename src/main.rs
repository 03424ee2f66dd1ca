//! Entry point: parse CLI and dispatch to command handlers.

use clap::Parser;
use dfs_lineup::{
    cli::{Commands, DfsCli},
    commands::{
        history::{handle_history, HistoryParams},
        optimize::handle_optimize,
        rosters::handle_rosters,
    },
    logging, Result,
};

/// Run the CLI.
#[tokio::main]
async fn main() -> Result<()> {
    let app = DfsCli::parse();

    let verbose = matches!(&app.command, Commands::Optimize(args) if args.verbose);
    logging::init(verbose);

    match app.command {
        Commands::Optimize(args) => {
            let response = handle_optimize(args).await?;
            if !response.success {
                std::process::exit(1);
            }
        }

        Commands::Rosters { contest, json } => handle_rosters(contest.site, contest.sport, json)?,

        Commands::History {
            limit,
            run_id,
            clear,
            db_path,
            json,
        } => handle_history(HistoryParams {
            limit,
            run_id,
            clear,
            db_path,
            json,
        })?,
    }

    Ok(())
}
