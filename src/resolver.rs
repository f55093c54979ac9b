//! Geo-distance resolution between consecutive game locations
//!
//! Regular venues are identified by the home team and looked up in the
//! distance matrix. Venues listed in the international table bypass the
//! matrix: both endpoints are resolved to coordinates (teams through the
//! stadium table) and measured directly.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::config::Config;
use crate::error::{BurdenError, Result};
use crate::geo::{great_circle_miles, Coordinates, DistanceMatrix, StadiumTable};
use crate::normalize::TeamNormalizer;
use crate::schedule::GameRecord;

/// Where a game was played
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PlayedAt {
    /// Arena owned by this (canonical) team
    Team(String),
    /// Venue from the international table
    International(String),
}

impl PlayedAt {
    pub fn is_international(&self) -> bool {
        matches!(self, PlayedAt::International(_))
    }

    pub fn name(&self) -> &str {
        match self {
            PlayedAt::Team(name) | PlayedAt::International(name) => name,
        }
    }
}

impl fmt::Display for PlayedAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Read-only lookup tables plus the normalizer applied to every key.
///
/// Never mutated after construction, so one resolver can be shared across
/// threads for a season batch.
#[derive(Debug, Clone)]
pub struct GeoResolver {
    normalizer: TeamNormalizer,
    matrix: DistanceMatrix,
    stadiums: StadiumTable,
    international: HashMap<String, Coordinates>,
}

impl GeoResolver {
    pub fn new(
        normalizer: TeamNormalizer,
        matrix: DistanceMatrix,
        stadiums: StadiumTable,
        international: &BTreeMap<String, Coordinates>,
    ) -> Self {
        let international = international
            .iter()
            .map(|(venue, coords)| (venue.trim().to_string(), *coords))
            .collect();
        GeoResolver {
            normalizer,
            matrix,
            stadiums,
            international,
        }
    }

    /// Build the normalizer from `config.aliases` and use the config's
    /// international venues.
    pub fn from_config(
        config: &Config,
        matrix: DistanceMatrix,
        stadiums: StadiumTable,
    ) -> Result<Self> {
        let normalizer = TeamNormalizer::new(&config.aliases)?;
        Ok(Self::new(
            normalizer,
            matrix,
            stadiums,
            &config.international_venues,
        ))
    }

    pub fn normalizer(&self) -> &TeamNormalizer {
        &self.normalizer
    }

    pub fn matrix(&self) -> &DistanceMatrix {
        &self.matrix
    }

    pub fn is_international_venue(&self, venue: &str) -> bool {
        self.international.contains_key(venue.trim())
    }

    /// The home team's identity, or the venue itself when it is international.
    pub fn played_at(&self, game: &GameRecord) -> PlayedAt {
        let venue = game.venue.trim();
        if self.international.contains_key(venue) {
            PlayedAt::International(venue.to_string())
        } else {
            PlayedAt::Team(self.normalizer.normalize(&game.home_team).to_string())
        }
    }

    fn coordinates(&self, location: &PlayedAt) -> Result<Coordinates> {
        match location {
            PlayedAt::International(venue) => self
                .international
                .get(venue.trim())
                .copied()
                .ok_or_else(|| BurdenError::MissingLocation(venue.clone())),
            PlayedAt::Team(team) => {
                let team = self.normalizer.normalize(team);
                self.stadiums
                    .get(team)
                    .ok_or_else(|| BurdenError::MissingLocation(team.to_string()))
            }
        }
    }

    /// Miles from `from` to `to`, or `MissingLocation` naming the endpoint
    /// that could not be resolved.
    pub fn try_distance(&self, from: &PlayedAt, to: &PlayedAt) -> Result<f64> {
        if from.is_international() || to.is_international() {
            if from == to {
                return Ok(0.0);
            }
            let a = self.coordinates(from)?;
            let b = self.coordinates(to)?;
            return Ok(great_circle_miles(&a, &b));
        }

        let a = self.normalizer.normalize(from.name());
        let b = self.normalizer.normalize(to.name());
        if a == b {
            return Ok(0.0);
        }

        for team in [a, b] {
            if !self.matrix.contains(team) {
                return Err(BurdenError::MissingLocation(team.to_string()));
            }
        }
        let miles = self
            .matrix
            .get(a, b)
            .ok_or_else(|| BurdenError::MissingLocation(format!("{} -> {}", a, b)))?;
        Ok(miles.max(0.0))
    }

    /// Like [`try_distance`], degrading unresolved legs to `0.0`.
    ///
    /// [`try_distance`]: GeoResolver::try_distance
    pub fn distance(&self, from: &PlayedAt, to: &PlayedAt) -> f64 {
        self.try_distance(from, to).unwrap_or_else(|e| {
            log::debug!("{} -> {}: {}; using 0.0", from, to, e);
            0.0
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MATRIX: &str = "\
,Miami Heat,Washington Wizards,Sacremento Kings
Miami Heat,0,921.8,2504.0
Washington Wizards,921.8,0,2380.2
Sacremento Kings,2504.0,2380.2,0
";

    const STADIUMS: &str = "\
Team,Lat,Long
Miami Heat,25.781401,-80.188042
Washington Wizards,38.898056,-77.020833
Sacremento Kings,38.580372,-121.499222
";

    fn resolver() -> GeoResolver {
        let config = Config::default();
        let normalizer = TeamNormalizer::new(&config.aliases).unwrap();
        let matrix = DistanceMatrix::from_reader(MATRIX.as_bytes(), &normalizer).unwrap();
        let stadiums = StadiumTable::from_reader(STADIUMS.as_bytes(), &normalizer).unwrap();
        GeoResolver::from_config(&config, matrix, stadiums).unwrap()
    }

    fn team(name: &str) -> PlayedAt {
        PlayedAt::Team(name.to_string())
    }

    #[test]
    fn test_matrix_lookup() {
        let r = resolver();
        assert_eq!(r.try_distance(&team("Miami Heat"), &team("Washington Wizards")).unwrap(), 921.8);
        assert_eq!(r.try_distance(&team("Washington Wizards"), &team("Miami Heat")).unwrap(), 921.8);
    }

    #[test]
    fn test_variant_spelling_resolves() {
        let r = resolver();
        let canonical = r
            .try_distance(&team("Miami Heat"), &team("Sacramento Kings"))
            .unwrap();
        let variant = r
            .try_distance(&team("Miami Heat"), &team("Sacremento Kings"))
            .unwrap();
        assert_eq!(canonical, 2504.0);
        assert_eq!(canonical, variant);
        assert_eq!(
            r.try_distance(&team("Sacremento Kings"), &team("Sacramento Kings")).unwrap(),
            0.0
        );
    }

    #[test]
    fn test_unknown_team_degrades() {
        let r = resolver();
        let err = r
            .try_distance(&team("Miami Heat"), &team("Seattle SuperSonics"))
            .unwrap_err();
        assert!(matches!(err, BurdenError::MissingLocation(ref t) if t == "Seattle SuperSonics"));
        assert_eq!(r.distance(&team("Miami Heat"), &team("Seattle SuperSonics")), 0.0);
        // self distance holds even for teams outside the matrix
        assert_eq!(
            r.try_distance(&team("Seattle SuperSonics"), &team("Seattle SuperSonics")).unwrap(),
            0.0
        );
    }

    #[test]
    fn test_international_bypasses_matrix() {
        let r = resolver();
        let mexico = PlayedAt::International("Mexico City Arena".to_string());
        let d = r.try_distance(&team("Miami Heat"), &mexico).unwrap();

        let expected = great_circle_miles(
            &Coordinates::new(25.781401, -80.188042),
            &Coordinates::new(19.496309, -99.175429),
        );
        assert!((d - expected).abs() < 1e-9);
        assert_eq!(r.try_distance(&mexico, &team("Miami Heat")).unwrap(), d);
        assert_eq!(r.try_distance(&mexico, &mexico).unwrap(), 0.0);
    }

    #[test]
    fn test_international_needs_stadium() {
        let r = resolver();
        let paris = PlayedAt::International("AccorHotels Arena".to_string());
        let err = r.try_distance(&team("Indiana Pacers"), &paris).unwrap_err();
        assert!(matches!(err, BurdenError::MissingLocation(_)));
    }

    #[test]
    fn test_played_at() {
        let r = resolver();
        let mut game = GameRecord {
            date_time: chrono::NaiveDate::from_ymd_opt(2024, 11, 2)
                .unwrap()
                .and_hms_opt(21, 30, 0)
                .unwrap(),
            visitor_team: "Miami Heat".to_string(),
            home_team: "Washington Wizards".to_string(),
            venue: "Mexico City Arena".to_string(),
            notes: None,
        };
        assert_eq!(
            r.played_at(&game),
            PlayedAt::International("Mexico City Arena".to_string())
        );

        game.venue = "Capital One Arena".to_string();
        game.home_team = "Sacremento Kings".to_string();
        assert_eq!(r.played_at(&game), team("Sacramento Kings"));
        assert!(!r.is_international_venue("Capital One Arena"));
    }
}
