//! NBA Travel Burden
//!
//! Per-game travel metrics for NBA teams: miles traveled since the previous
//! game, hours elapsed, and their ratio ("burden", miles per hour of rest).
//!
//! This library provides:
//! - `schedule`: Season schedule loading and per-team ordering
//! - `geo`: Stadium coordinates, distance matrix and great-circle distance
//! - `resolver`: Distance between consecutive game locations
//! - `burden`: The per-team burden chain
//! - `batch`: Parallel season-wide computation
//! - `metrics`: Aggregates, cumulative series and travel baselines
//! - `pipeline`: CSV, text and workbook outputs used by the CLI
//!
//! Binaries:
//! - `burden-csv`: Command-line front end for the pipeline

pub mod batch;
pub mod burden;
pub mod config;
pub mod error;
pub mod geo;
pub mod metrics;
pub mod normalize;
pub mod pipeline;
pub mod resolver;
pub mod schedule;

pub use batch::{compute_season, team_burden, BurdenOptions, SeasonBurden};
pub use burden::{compute_burden_chain, BurdenChain, BurdenRecord, HomeAway, UnknownLocationPolicy};
pub use config::Config;
pub use error::{BurdenError, Result};
pub use geo::{great_circle_miles, Coordinates, DistanceMatrix, StadiumTable};
pub use normalize::TeamNormalizer;
pub use resolver::{GeoResolver, PlayedAt};
pub use schedule::{build_schedule, GameRecord, SeasonTable, TeamSchedule};
