//! Burden calculation
//!
//! A single forward pass over a team's ordered games. The state carried from
//! one game to the next is the previous start time and location; every step
//! emits one [`BurdenRecord`].
//!
//! ```text
//! burden = travel_distance (miles) / travel_hours (hours since previous game)
//! ```
//!
//! The first game has no predecessor, so its travel fields are all `None`.
//! Burden is also `None` whenever the elapsed time is not strictly positive.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::resolver::{GeoResolver, PlayedAt};
use crate::schedule::{PartialData, TeamSchedule};

/// Whether the team was the home side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HomeAway {
    Home,
    Away,
}

impl fmt::Display for HomeAway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HomeAway::Home => write!(f, "home"),
            HomeAway::Away => write!(f, "away"),
        }
    }
}

/// Handling of legs whose distance cannot be resolved.
///
/// Both policies flag the record and count it on the chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnknownLocationPolicy {
    /// Record the leg as 0 miles
    #[default]
    ZeroFill,
    /// Leave distance and burden undefined
    Exclude,
}

/// Travel metrics for one game in a team's chain
#[derive(Debug, Clone, PartialEq)]
pub struct BurdenRecord {
    /// 1-based position in the chain
    pub game_index: usize,
    pub game_time: NaiveDateTime,
    pub previous_game_time: Option<NaiveDateTime>,
    pub opponent: String,
    pub location: HomeAway,
    pub played_at: PlayedAt,
    pub previous_played_at: Option<PlayedAt>,
    /// Miles from the previous game's location
    pub travel_distance: Option<f64>,
    /// Hours since the previous game's start
    pub travel_hours: Option<f64>,
    /// Miles per hour of rest
    pub burden: Option<f64>,
    /// Why the distance for this leg could not be resolved
    pub unresolved: Option<String>,
}

/// Full burden chain for one team
#[derive(Debug, Clone)]
pub struct BurdenChain {
    pub team: String,
    pub records: Vec<BurdenRecord>,
    /// Number of legs whose distance could not be resolved
    pub unresolved: usize,
    pub partial: Option<PartialData>,
}

impl BurdenChain {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// `distance / hours`, undefined unless `hours > 0`
pub fn burden_ratio(distance: f64, hours: f64) -> Option<f64> {
    (hours > 0.0).then(|| distance / hours)
}

/// Hours elapsed between two start times; negative if `to` precedes `from`.
pub fn hours_between(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    (to - from).num_seconds() as f64 / 3600.0
}

struct Previous {
    time: NaiveDateTime,
    played_at: PlayedAt,
}

/// Compute the burden chain for an ordered team schedule.
///
/// One record per game, same order, `game_index` 1..=N.
pub fn compute_burden_chain(
    schedule: &TeamSchedule,
    resolver: &GeoResolver,
    policy: UnknownLocationPolicy,
) -> BurdenChain {
    let normalizer = resolver.normalizer();
    let team = schedule.team.as_str();

    let records: Vec<BurdenRecord> = schedule
        .games
        .iter()
        .enumerate()
        .scan(None::<Previous>, |previous, (idx, game)| {
            let is_home = normalizer.same_team(&game.home_team, team);
            let (location, opponent) = if is_home {
                (HomeAway::Home, normalizer.normalize(&game.visitor_team))
            } else {
                (HomeAway::Away, normalizer.normalize(&game.home_team))
            };
            let played_at = resolver.played_at(game);

            let mut record = BurdenRecord {
                game_index: idx + 1,
                game_time: game.date_time,
                previous_game_time: None,
                opponent: opponent.to_string(),
                location,
                played_at: played_at.clone(),
                previous_played_at: None,
                travel_distance: None,
                travel_hours: None,
                burden: None,
                unresolved: None,
            };

            if let Some(prev) = previous.as_ref() {
                let hours = hours_between(prev.time, game.date_time);
                let distance = match resolver.try_distance(&prev.played_at, &played_at) {
                    Ok(miles) => Some(miles),
                    Err(e) => {
                        log::warn!("{} game {}: {}", team, idx + 1, e);
                        record.unresolved = Some(e.to_string());
                        match policy {
                            UnknownLocationPolicy::ZeroFill => Some(0.0),
                            UnknownLocationPolicy::Exclude => None,
                        }
                    }
                };

                record.previous_game_time = Some(prev.time);
                record.previous_played_at = Some(prev.played_at.clone());
                record.travel_hours = Some(hours);
                record.travel_distance = distance;
                record.burden = distance.and_then(|d| burden_ratio(d, hours));
            }

            *previous = Some(Previous {
                time: game.date_time,
                played_at,
            });
            Some(record)
        })
        .collect();

    let unresolved = records.iter().filter(|r| r.unresolved.is_some()).count();
    if unresolved > 0 {
        log::warn!("{}: {} legs with unresolved locations", team, unresolved);
    }

    BurdenChain {
        team: schedule.team.clone(),
        records,
        unresolved,
        partial: schedule.partial,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::geo::{DistanceMatrix, StadiumTable};
    use crate::normalize::TeamNormalizer;
    use crate::schedule::{build_schedule, GameRecord};
    use chrono::{Duration, NaiveDate};

    fn resolver(matrix: &str) -> GeoResolver {
        let config = Config::default();
        let normalizer = TeamNormalizer::new(&config.aliases).unwrap();
        let matrix = DistanceMatrix::from_reader(matrix.as_bytes(), &normalizer).unwrap();
        GeoResolver::from_config(&config, matrix, StadiumTable::new()).unwrap()
    }

    fn game(at: NaiveDateTime, visitor: &str, home: &str) -> GameRecord {
        GameRecord {
            date_time: at,
            visitor_team: visitor.to_string(),
            home_team: home.to_string(),
            venue: format!("{} Arena", home),
            notes: None,
        }
    }

    fn t0() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 10, 22)
            .unwrap()
            .and_hms_opt(19, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_burden_ratio_guard() {
        assert_eq!(burden_ratio(500.0, 24.0), Some(500.0 / 24.0));
        assert_eq!(burden_ratio(500.0, 0.0), None);
        assert_eq!(burden_ratio(500.0, -3.0), None);
        assert_eq!(burden_ratio(0.0, 24.0), Some(0.0));
    }

    #[test]
    fn test_three_game_chain() {
        let r = resolver(",Home A,Y,X,Z\nHome A,0,500,10,20\nY,500,0,30,40\nX,10,30,0,50\nZ,20,40,50,0\n");
        let games = vec![
            game(t0(), "X", "Home A"),
            game(t0() + Duration::hours(24), "Home A", "Y"),
            game(t0() + Duration::hours(72), "Z", "Home A"),
        ];
        let schedule = build_schedule(&games, "Home A", r.normalizer(), 3).unwrap();
        let chain = compute_burden_chain(&schedule, &r, UnknownLocationPolicy::ZeroFill);

        assert_eq!(chain.len(), 3);
        assert_eq!(chain.unresolved, 0);
        let first = &chain.records[0];
        assert_eq!(first.game_index, 1);
        assert_eq!(first.location, HomeAway::Home);
        assert_eq!(first.opponent, "X");
        assert!(first.previous_game_time.is_none());
        assert!(first.previous_played_at.is_none());
        assert!(first.travel_distance.is_none());
        assert!(first.travel_hours.is_none());
        assert!(first.burden.is_none());

        let second = &chain.records[1];
        assert_eq!(second.location, HomeAway::Away);
        assert_eq!(second.opponent, "Y");
        assert_eq!(second.played_at, PlayedAt::Team("Y".to_string()));
        assert_eq!(second.previous_played_at, Some(PlayedAt::Team("Home A".to_string())));
        assert_eq!(second.travel_distance, Some(500.0));
        assert_eq!(second.travel_hours, Some(24.0));
        assert!((second.burden.unwrap() - 20.833).abs() < 1e-3);

        let third = &chain.records[2];
        assert_eq!(third.travel_hours, Some(48.0));
        assert!((third.burden.unwrap() - 10.417).abs() < 1e-3);
    }

    #[test]
    fn test_same_instant_has_no_burden() {
        let r = resolver(",A,B\nA,0,300\nB,300,0\n");
        let games = vec![game(t0(), "B", "A"), game(t0(), "A", "B")];
        let schedule = build_schedule(&games, "A", r.normalizer(), 2).unwrap();
        let chain = compute_burden_chain(&schedule, &r, UnknownLocationPolicy::ZeroFill);

        assert_eq!(chain.records[1].travel_hours, Some(0.0));
        assert_eq!(chain.records[1].travel_distance, Some(300.0));
        assert_eq!(chain.records[1].burden, None);
    }

    #[test]
    fn test_home_stand_is_zero_distance() {
        let r = resolver(",A,B,C\nA,0.4,300,200\nB,300,0,100\nC,200,100,0\n");
        let games = vec![
            game(t0(), "B", "A"),
            game(t0() + Duration::hours(48), "C", "A"),
        ];
        let schedule = build_schedule(&games, "A", r.normalizer(), 2).unwrap();
        let chain = compute_burden_chain(&schedule, &r, UnknownLocationPolicy::ZeroFill);
        assert_eq!(chain.records[1].travel_distance, Some(0.0));
        assert_eq!(chain.records[1].burden, Some(0.0));
    }

    #[test]
    fn test_unknown_location_policies() {
        let r = resolver(",A,B\nA,0,300\nB,300,0\n");
        let games = vec![
            game(t0(), "B", "A"),
            game(t0() + Duration::hours(24), "A", "Nowhere"),
            game(t0() + Duration::hours(48), "B", "A"),
        ];
        let schedule = build_schedule(&games, "A", r.normalizer(), 3).unwrap();

        let zero = compute_burden_chain(&schedule, &r, UnknownLocationPolicy::ZeroFill);
        assert_eq!(zero.unresolved, 2);
        assert_eq!(zero.records[1].travel_distance, Some(0.0));
        assert_eq!(zero.records[1].burden, Some(0.0));
        assert!(zero.records[1]
            .unresolved
            .as_deref()
            .is_some_and(|m| m.contains("Nowhere")));

        let excluded = compute_burden_chain(&schedule, &r, UnknownLocationPolicy::Exclude);
        assert_eq!(excluded.unresolved, 2);
        assert_eq!(excluded.records[1].travel_distance, None);
        assert_eq!(excluded.records[1].burden, None);
        assert_eq!(excluded.records[1].travel_hours, Some(24.0));
        assert_eq!(excluded.records[2].travel_distance, None);
    }

    #[test]
    fn test_policy_from_toml_names() {
        let config = Config::from_toml("unknown_location = \"zero-fill\"").unwrap();
        assert_eq!(config.unknown_location, UnknownLocationPolicy::ZeroFill);
    }
}
