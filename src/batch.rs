//! Season-wide batch over every team
//!
//! Teams are independent, so chains are computed in parallel against the
//! shared read-only resolver. A team that fails keeps an explicit error in
//! the result instead of disappearing from it.

use rayon::prelude::*;
use std::collections::BTreeMap;

use crate::burden::{compute_burden_chain, BurdenChain, UnknownLocationPolicy};
use crate::config::Config;
use crate::error::Result;
use crate::resolver::GeoResolver;
use crate::schedule::{build_schedule, GameRecord, RowError, SeasonTable};

/// Knobs for building and walking team schedules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BurdenOptions {
    pub expected_games: usize,
    pub policy: UnknownLocationPolicy,
}

impl Default for BurdenOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for BurdenOptions {
    fn from(config: &Config) -> Self {
        BurdenOptions {
            expected_games: config.expected_games,
            policy: config.unknown_location,
        }
    }
}

/// Build and compute one team's chain
pub fn team_burden(
    games: &[GameRecord],
    team: &str,
    resolver: &GeoResolver,
    options: &BurdenOptions,
) -> Result<BurdenChain> {
    let schedule = build_schedule(games, team, resolver.normalizer(), options.expected_games)?;
    Ok(compute_burden_chain(&schedule, resolver, options.policy))
}

/// Result of a season batch
#[derive(Debug)]
pub struct SeasonBurden {
    /// One entry per requested team, keyed by canonical identity
    pub teams: BTreeMap<String, Result<BurdenChain>>,
    /// Schedule rows rejected while loading
    pub rejected: Vec<RowError>,
}

impl SeasonBurden {
    pub fn chains(&self) -> impl Iterator<Item = &BurdenChain> {
        self.teams.values().filter_map(|r| r.as_ref().ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &crate::error::BurdenError)> {
        self.teams
            .iter()
            .filter_map(|(team, r)| r.as_ref().err().map(|e| (team.as_str(), e)))
    }

    pub fn get(&self, team: &str) -> Option<&Result<BurdenChain>> {
        self.teams.get(team)
    }

    pub fn succeeded(&self) -> usize {
        self.chains().count()
    }
}

/// Compute chains for `teams` (every team in the season when empty).
pub fn compute_season(
    season: &SeasonTable,
    teams: &[String],
    resolver: &GeoResolver,
    options: &BurdenOptions,
) -> SeasonBurden {
    let normalizer = resolver.normalizer();
    let mut wanted: Vec<String> = if teams.is_empty() {
        season.teams(normalizer)
    } else {
        teams
            .iter()
            .map(|t| normalizer.normalize(t).to_string())
            .collect()
    };
    wanted.sort();
    wanted.dedup();

    log::info!("Computing burden chains for {} teams", wanted.len());

    let results: Vec<(String, Result<BurdenChain>)> = wanted
        .into_par_iter()
        .map(|team| {
            let result = team_burden(&season.games, &team, resolver, options);
            match &result {
                Ok(chain) => log::debug!("{}: {} games", team, chain.len()),
                Err(e) => log::warn!("{}: {}", team, e),
            }
            (team, result)
        })
        .collect();

    let batch = SeasonBurden {
        teams: results.into_iter().collect(),
        rejected: season.rejected.clone(),
    };
    log::info!(
        "Completed {}/{} teams",
        batch.succeeded(),
        batch.teams.len()
    );
    batch
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BurdenError;
    use crate::geo::{DistanceMatrix, StadiumTable};
    use crate::normalize::TeamNormalizer;

    const SCHEDULE: &str = "\
Game Date,Start (ET),Visitor/Neutral,Home/Neutral,Arena
\"Tue, Oct 22, 2024\",7:30p,B,A,A Arena
\"Thu, Oct 24, 2024\",7:30p,A,C,C Arena
\"Sat, Oct 26, 2024\",7:00p,C,B,B Arena
\"Sun, Oct 27, 2024\",bad,B,A,A Arena
";

    fn setup() -> (SeasonTable, GeoResolver) {
        let season = SeasonTable::from_reader(SCHEDULE.as_bytes()).unwrap();
        let config = Config::default();
        let normalizer = TeamNormalizer::new(&config.aliases).unwrap();
        let matrix = DistanceMatrix::from_reader(
            ",A,B,C\nA,0,100,200\nB,100,0,300\nC,200,300,0\n".as_bytes(),
            &normalizer,
        )
        .unwrap();
        let resolver = GeoResolver::from_config(&config, matrix, StadiumTable::new()).unwrap();
        (season, resolver)
    }

    #[test]
    fn test_all_teams() {
        let (season, resolver) = setup();
        let options = BurdenOptions {
            expected_games: 2,
            policy: UnknownLocationPolicy::ZeroFill,
        };
        let batch = compute_season(&season, &[], &resolver, &options);

        assert_eq!(batch.teams.len(), 3);
        assert_eq!(batch.succeeded(), 3);
        assert_eq!(batch.rejected.len(), 1);
        assert_eq!(batch.rejected[0].line, 5);

        let a = batch.get("A").unwrap().as_ref().unwrap();
        assert_eq!(a.len(), 2);
        assert_eq!(a.records[1].travel_distance, Some(200.0));
        assert_eq!(a.records[1].travel_hours, Some(48.0));
    }

    #[test]
    fn test_missing_team_is_reported() {
        let (season, resolver) = setup();
        let teams = vec!["A".to_string(), "Z".to_string()];
        let batch = compute_season(&season, &teams, &resolver, &BurdenOptions::default());

        assert_eq!(batch.teams.len(), 2);
        assert!(batch.get("A").unwrap().is_ok());
        let failures: Vec<_> = batch.failures().collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, "Z");
        assert!(matches!(failures[0].1, BurdenError::NoGamesFound(_)));
    }

    #[test]
    fn test_default_options_follow_config() {
        let options = BurdenOptions::default();
        assert_eq!(options.expected_games, 82);
        assert_eq!(options.policy, UnknownLocationPolicy::ZeroFill);
    }
}
