//! Property tests for the burden core

use chrono::{Duration, NaiveDate, NaiveDateTime};
use nba_travel_burden::geo::{great_circle_miles, Coordinates, DistanceMatrix, StadiumTable};
use nba_travel_burden::{
    build_schedule, compute_burden_chain, Config, GameRecord, GeoResolver, PlayedAt,
    TeamNormalizer, UnknownLocationPolicy,
};
use proptest::prelude::*;

const TEAMS: [&str; 4] = ["Miami Heat", "Washington Wizards", "Sacremento Kings", "Indiana Pacers"];

fn resolver() -> GeoResolver {
    let config = Config::default();
    let normalizer = TeamNormalizer::new(&config.aliases).unwrap();
    let matrix = DistanceMatrix::from_reader(
        "\
,Miami Heat,Washington Wizards,Sacremento Kings,Indiana Pacers
Miami Heat,0,921.8,2504.0,1024.6
Washington Wizards,921.8,0,2380.2,494.1
Sacremento Kings,2504.0,2380.2,0,1895.3
Indiana Pacers,1024.6,494.1,1895.3,0
"
        .as_bytes(),
        &normalizer,
    )
    .unwrap();
    GeoResolver::from_config(&config, matrix, StadiumTable::new()).unwrap()
}

fn coordinates() -> impl Strategy<Value = Coordinates> {
    (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lon)| Coordinates::new(lat, lon))
}

fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 10, 22)
        .unwrap()
        .and_hms_opt(19, 30, 0)
        .unwrap()
}

proptest! {
    #[test]
    fn normalize_is_idempotent(name in "[A-Za-z ]{0,24}", pick in 0usize..4) {
        let config = Config::default();
        let normalizer = TeamNormalizer::new(&config.aliases).unwrap();
        for candidate in [name.as_str(), TEAMS[pick]] {
            let once = normalizer.normalize(candidate);
            prop_assert_eq!(normalizer.normalize(once), once);
        }
    }

    #[test]
    fn great_circle_is_a_metric(a in coordinates(), b in coordinates()) {
        let ab = great_circle_miles(&a, &b);
        let ba = great_circle_miles(&b, &a);
        prop_assert!(ab >= 0.0);
        prop_assert!((ab - ba).abs() < 1e-6);
        prop_assert_eq!(great_circle_miles(&a, &a), 0.0);
    }

    #[test]
    fn resolver_distance_is_symmetric(i in 0usize..4, j in 0usize..4) {
        let r = resolver();
        let a = PlayedAt::Team(TEAMS[i].to_string());
        let b = PlayedAt::Team(TEAMS[j].to_string());
        let ab = r.try_distance(&a, &b).unwrap();
        prop_assert_eq!(ab, r.try_distance(&b, &a).unwrap());
        prop_assert!(ab >= 0.0);
        if i == j {
            prop_assert_eq!(ab, 0.0);
        }
    }

    #[test]
    fn chain_matches_schedule(
        legs in prop::collection::vec((0usize..4, 0i64..96), 1..30),
    ) {
        let team = "Miami Heat";
        let r = resolver();
        let mut at = start();
        let games: Vec<GameRecord> = legs
            .iter()
            .map(|&(opponent, gap)| {
                at += Duration::hours(gap);
                let other = if TEAMS[opponent] == team { TEAMS[1] } else { TEAMS[opponent] };
                GameRecord {
                    date_time: at,
                    visitor_team: other.to_string(),
                    home_team: team.to_string(),
                    venue: "Kaseya Center".to_string(),
                    notes: None,
                }
            })
            .collect();

        let schedule = build_schedule(&games, team, r.normalizer(), 82).unwrap();
        let chain = compute_burden_chain(&schedule, &r, UnknownLocationPolicy::ZeroFill);

        prop_assert_eq!(chain.len(), games.len());
        let first = &chain.records[0];
        prop_assert!(first.travel_distance.is_none());
        prop_assert!(first.travel_hours.is_none());
        prop_assert!(first.burden.is_none());

        for (k, record) in chain.records.iter().enumerate() {
            prop_assert_eq!(record.game_index, k + 1);
            if k > 0 {
                let hours = record.travel_hours.unwrap();
                prop_assert!(hours >= 0.0);
                prop_assert_eq!(record.burden.is_some(), hours > 0.0);
                if let Some(b) = record.burden {
                    prop_assert!(b >= 0.0);
                }
            }
        }
    }
}
