//! Burden CSV Tool - Compute NBA travel burden from schedule and distance tables
//!
//! Reads a season schedule, a team-to-team distance matrix and a stadium
//! coordinate table, then writes per-game burden for one team, a season
//! ranking, or an Excel workbook with cumulative burden charts.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use nba_travel_burden::pipeline::{
    build_distance_matrix, package_workbook, season_report, team_report, DataSources,
    WorkbookConfig,
};

#[derive(Parser)]
#[command(name = "burden-csv")]
#[command(about = "Compute game mile-hours burden for NBA teams")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Input tables shared by every computing command
#[derive(Args)]
struct SourceArgs {
    /// Season schedule CSV
    #[arg(short, long, env = "BURDEN_SCHEDULE")]
    schedule: PathBuf,

    /// Team-to-team distance matrix CSV
    #[arg(short, long, env = "BURDEN_DISTANCES")]
    distances: PathBuf,

    /// Stadium coordinates CSV (Team, Lat, Long)
    #[arg(long, env = "BURDEN_STADIUMS")]
    stadiums: PathBuf,

    /// TOML config overriding aliases, venues, divisions and colors
    #[arg(short, long, env = "BURDEN_CONFIG")]
    config: Option<PathBuf>,
}

impl From<SourceArgs> for DataSources {
    fn from(args: SourceArgs) -> Self {
        DataSources {
            schedule: args.schedule,
            distances: args.distances,
            stadiums: args.stadiums,
            config: args.config,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Per-game burden for one team
    Team {
        #[command(flatten)]
        sources: SourceArgs,

        /// Team name (alias spellings accepted)
        #[arg(short, long)]
        team: String,

        /// Output CSV file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write the cumulative burden curve to this CSV file
        #[arg(long)]
        cumulative: Option<PathBuf>,
    },

    /// Rank every team by average burden
    Season {
        #[command(flatten)]
        sources: SourceArgs,

        /// Number of teams shown in the table
        #[arg(long, default_value = "30")]
        top_n: usize,

        /// Also write the per-team summaries to this CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Excel workbook with summary, per-game and cumulative chart sheets
    Workbook {
        #[command(flatten)]
        sources: SourceArgs,

        /// Output xlsx file
        #[arg(short, long)]
        output: PathBuf,

        /// Team to include (repeatable; all teams when no filter is given)
        #[arg(short, long)]
        team: Vec<String>,

        /// Division whose teams are included (repeatable)
        #[arg(long)]
        division: Vec<String>,
    },

    /// Build the distance matrix from stadium coordinates
    BuildMatrix {
        /// Stadium coordinates CSV (Team, Lat, Long)
        #[arg(long)]
        stadiums: PathBuf,

        /// Output CSV file
        #[arg(short, long)]
        output: PathBuf,

        /// TOML config (for team aliases)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Team {
            sources,
            team,
            output,
            cumulative,
        } => {
            // stdout may carry the CSV itself
            let summary = team_report(
                &sources.into(),
                &team,
                output.as_deref(),
                cumulative.as_deref(),
            )?;
            eprint!("{}", summary);
        }
        Commands::Season {
            sources,
            top_n,
            output,
        } => {
            let report = season_report(&sources.into(), top_n, output.as_deref())?;
            print!("{}", report);
        }
        Commands::Workbook {
            sources,
            output,
            team,
            division,
        } => {
            let summary = package_workbook(&WorkbookConfig {
                sources: sources.into(),
                output,
                teams: team,
                divisions: division,
            })?;
            eprintln!("{}", summary);
        }
        Commands::BuildMatrix {
            stadiums,
            output,
            config,
        } => {
            let summary = build_distance_matrix(&stadiums, &output, config.as_deref())?;
            eprintln!("{}", summary);
        }
    }

    Ok(())
}
