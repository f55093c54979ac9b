//! Season-level aggregation of burden chains
//!
//! Undefined per-game values (first game, excluded legs, zero-hour gaps) are
//! skipped by every fold. A fold over nothing yields `None`, not zero.

use chrono::NaiveDateTime;
use std::collections::HashMap;

use crate::batch::SeasonBurden;
use crate::burden::{BurdenChain, HomeAway};
use crate::geo::DistanceMatrix;
use crate::schedule::PartialData;

fn defined(values: impl Iterator<Item = Option<f64>>) -> Vec<f64> {
    values.flatten().collect()
}

pub fn total_burden(chain: &BurdenChain) -> Option<f64> {
    let burdens = defined(chain.records.iter().map(|r| r.burden));
    (!burdens.is_empty()).then(|| burdens.iter().sum())
}

pub fn average_burden(chain: &BurdenChain) -> Option<f64> {
    let burdens = defined(chain.records.iter().map(|r| r.burden));
    (!burdens.is_empty()).then(|| burdens.iter().sum::<f64>() / burdens.len() as f64)
}

pub fn total_distance(chain: &BurdenChain) -> Option<f64> {
    let distances = defined(chain.records.iter().map(|r| r.travel_distance));
    (!distances.is_empty()).then(|| distances.iter().sum())
}

/// One point on a cumulative burden curve, with the metadata shown alongside it
#[derive(Debug, Clone, PartialEq)]
pub struct CumulativePoint {
    pub game_index: usize,
    pub cumulative_burden: f64,
    pub game_time: NaiveDateTime,
    pub location: HomeAway,
    pub opponent: String,
}

/// Running sum of burden by game; undefined burdens add nothing.
pub fn cumulative_burden(chain: &BurdenChain) -> Vec<CumulativePoint> {
    chain
        .records
        .iter()
        .scan(0.0, |running, record| {
            *running += record.burden.unwrap_or(0.0);
            Some(CumulativePoint {
                game_index: record.game_index,
                cumulative_burden: *running,
                game_time: record.game_time,
                location: record.location,
                opponent: record.opponent.clone(),
            })
        })
        .collect()
}

// ============================================================================
// Typical-travel baseline
// ============================================================================

/// Per-team typical yearly travel, derived from the distance matrix
#[derive(Debug, Clone, PartialEq)]
pub struct TravelBaseline {
    pub team: String,
    /// Mean distance to every other arena
    pub average_distance: f64,
    /// `average_distance` times the number of road trips in a season
    pub average_yearly_road_trip: f64,
}

/// Baselines for every team in the matrix, keyed by team
pub fn travel_baselines(
    matrix: &DistanceMatrix,
    road_trips_per_season: u32,
) -> HashMap<String, TravelBaseline> {
    matrix
        .teams()
        .iter()
        .filter_map(|team| {
            let average_distance = matrix.average_distance(team)?;
            Some((
                team.clone(),
                TravelBaseline {
                    team: team.clone(),
                    average_distance,
                    average_yearly_road_trip: average_distance * road_trips_per_season as f64,
                },
            ))
        })
        .collect()
}

fn normalize_by(total: Option<f64>, baseline: Option<&TravelBaseline>) -> Option<f64> {
    let total = total?;
    let base = baseline?.average_yearly_road_trip;
    (base > 0.0).then(|| total / base)
}

// ============================================================================
// Season summary
// ============================================================================

/// Aggregates for one team
#[derive(Debug, Clone, PartialEq)]
pub struct TeamSummary {
    pub team: String,
    pub games: usize,
    pub average_burden: Option<f64>,
    pub total_burden: Option<f64>,
    pub total_distance: Option<f64>,
    /// Total distance over the typical yearly road trip
    pub normalized_distance: Option<f64>,
    /// Total burden over the typical yearly road trip
    pub normalized_burden: Option<f64>,
    pub unresolved: usize,
    pub partial: Option<PartialData>,
}

pub fn summarize_chain(
    chain: &BurdenChain,
    baselines: &HashMap<String, TravelBaseline>,
) -> TeamSummary {
    let baseline = baselines.get(&chain.team);
    let total_burden = total_burden(chain);
    let total_distance = total_distance(chain);
    TeamSummary {
        team: chain.team.clone(),
        games: chain.len(),
        average_burden: average_burden(chain),
        total_burden,
        total_distance,
        normalized_distance: normalize_by(total_distance, baseline),
        normalized_burden: normalize_by(total_burden, baseline),
        unresolved: chain.unresolved,
        partial: chain.partial,
    }
}

/// Summaries for every successful team, highest average burden first.
/// Teams without a defined average sort last, by name.
pub fn summarize_season(
    season: &SeasonBurden,
    matrix: &DistanceMatrix,
    road_trips_per_season: u32,
) -> Vec<TeamSummary> {
    let baselines = travel_baselines(matrix, road_trips_per_season);
    let mut summaries: Vec<TeamSummary> = season
        .chains()
        .map(|chain| summarize_chain(chain, &baselines))
        .collect();

    summaries.sort_by(|a, b| match (a.average_burden, b.average_burden) {
        (Some(x), Some(y)) => y.total_cmp(&x).then_with(|| a.team.cmp(&b.team)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.team.cmp(&b.team),
    });
    summaries
}
