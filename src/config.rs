//! Injected configuration
//!
//! Everything that used to be a hard-coded table (team spelling variants,
//! international venue coordinates, divisions, chart colours) lives here and
//! is handed to the normalizer and resolver at construction time. The
//! defaults describe the 2024-25 NBA season; a TOML file can override any
//! key.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::burden::UnknownLocationPolicy;
use crate::error::{BurdenError, Result};
use crate::geo::Coordinates;

/// Colour used for teams without an entry in `team_colors`
pub const DEFAULT_TEAM_COLOR: &str = "#808080";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Regular-season length; shorter schedules raise a partial-data warning
    pub expected_games: usize,
    /// Road trips per season, used to scale the typical-travel baseline
    pub road_trips_per_season: u32,
    /// What to do when a leg's distance cannot be resolved
    pub unknown_location: UnknownLocationPolicy,
    /// Spelling variant -> canonical team identity
    pub aliases: BTreeMap<String, String>,
    /// Venues outside the distance matrix, keyed by venue name
    pub international_venues: BTreeMap<String, Coordinates>,
    pub divisions: BTreeMap<String, Vec<String>>,
    pub team_colors: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        let aliases = [("Sacremento Kings", "Sacramento Kings")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        let international_venues = [
            ("Mexico City Arena", 19.496309, -99.175429),
            ("AccorHotels Arena", 48.8386, 2.3785),
        ]
        .into_iter()
        .map(|(name, lat, lon)| (name.to_string(), Coordinates::new(lat, lon)))
        .collect();

        let divisions = [
            (
                "Atlantic",
                [
                    "Boston Celtics",
                    "Brooklyn Nets",
                    "New York Knicks",
                    "Philadelphia 76ers",
                    "Toronto Raptors",
                ],
            ),
            (
                "Central",
                [
                    "Chicago Bulls",
                    "Cleveland Cavaliers",
                    "Detroit Pistons",
                    "Indiana Pacers",
                    "Milwaukee Bucks",
                ],
            ),
            (
                "Southeast",
                [
                    "Atlanta Hawks",
                    "Charlotte Hornets",
                    "Miami Heat",
                    "Orlando Magic",
                    "Washington Wizards",
                ],
            ),
            (
                "Northwest",
                [
                    "Denver Nuggets",
                    "Minnesota Timberwolves",
                    "Oklahoma City Thunder",
                    "Portland Trail Blazers",
                    "Utah Jazz",
                ],
            ),
            (
                "Pacific",
                [
                    "Golden State Warriors",
                    "Los Angeles Clippers",
                    "Los Angeles Lakers",
                    "Phoenix Suns",
                    "Sacramento Kings",
                ],
            ),
            (
                "Southwest",
                [
                    "Dallas Mavericks",
                    "Houston Rockets",
                    "Memphis Grizzlies",
                    "New Orleans Pelicans",
                    "San Antonio Spurs",
                ],
            ),
        ]
        .into_iter()
        .map(|(division, teams)| {
            (
                division.to_string(),
                teams.iter().map(|t| t.to_string()).collect(),
            )
        })
        .collect();

        let team_colors = [
            ("Atlanta Hawks", "#E03A3E"),
            ("Boston Celtics", "#007A33"),
            ("Brooklyn Nets", "#000000"),
            ("Charlotte Hornets", "#1D1160"),
            ("Chicago Bulls", "#CE1141"),
            ("Cleveland Cavaliers", "#860038"),
            ("Dallas Mavericks", "#00538C"),
            ("Denver Nuggets", "#0E2240"),
            ("Detroit Pistons", "#C8102E"),
            ("Golden State Warriors", "#1D428A"),
            ("Houston Rockets", "#CE1141"),
            ("Indiana Pacers", "#002D62"),
            ("Los Angeles Clippers", "#C8102E"),
            ("Los Angeles Lakers", "#552583"),
            ("Memphis Grizzlies", "#5D76A9"),
            ("Miami Heat", "#98002E"),
            ("Milwaukee Bucks", "#00471B"),
            ("Minnesota Timberwolves", "#0C2340"),
            ("New Orleans Pelicans", "#0C2340"),
            ("New York Knicks", "#006BB6"),
            ("Oklahoma City Thunder", "#007AC1"),
            ("Orlando Magic", "#0077C0"),
            ("Philadelphia 76ers", "#006BB6"),
            ("Phoenix Suns", "#1D1160"),
            ("Portland Trail Blazers", "#E03A3E"),
            ("Sacramento Kings", "#5A2D81"),
            ("San Antonio Spurs", "#000000"),
            ("Toronto Raptors", "#CE1141"),
            ("Utah Jazz", "#002B5C"),
            ("Washington Wizards", "#002B5C"),
        ]
        .into_iter()
        .map(|(team, color)| (team.to_string(), color.to_string()))
        .collect();

        Config {
            expected_games: 82,
            road_trips_per_season: 41,
            unknown_location: UnknownLocationPolicy::default(),
            aliases,
            international_venues,
            divisions,
            team_colors,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            BurdenError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| BurdenError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Load from `path` when given, otherwise use the built-in season data.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn team_color(&self, team: &str) -> &str {
        self.team_colors
            .get(team)
            .map(|c| c.as_str())
            .unwrap_or(DEFAULT_TEAM_COLOR)
    }

    /// Teams listed under `division`, matched case-insensitively.
    pub fn division_teams(&self, division: &str) -> Option<&[String]> {
        self.divisions
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(division.trim()))
            .map(|(_, teams)| teams.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tables() {
        let config = Config::default();
        assert_eq!(config.expected_games, 82);
        assert_eq!(config.road_trips_per_season, 41);
        assert_eq!(config.international_venues.len(), 2);
        assert_eq!(
            config.aliases.get("Sacremento Kings").map(String::as_str),
            Some("Sacramento Kings")
        );
        assert_eq!(config.divisions.values().map(Vec::len).sum::<usize>(), 30);
        assert_eq!(config.team_colors.len(), 30);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
expected_games = 72
unknown_location = "exclude"

[international_venues."O2 Arena"]
lat = 51.503
lon = 0.003
"#,
        )
        .unwrap();

        assert_eq!(config.expected_games, 72);
        assert_eq!(config.unknown_location, UnknownLocationPolicy::Exclude);
        assert_eq!(config.international_venues.len(), 1);
        assert!(config.international_venues.contains_key("O2 Arena"));
        // untouched keys fall back to defaults
        assert_eq!(config.road_trips_per_season, 41);
        assert!(config.aliases.contains_key("Sacremento Kings"));
    }

    #[test]
    fn test_bad_toml() {
        let err = Config::from_toml("expected_games = \"lots\"").unwrap_err();
        assert!(matches!(err, BurdenError::Config(_)));
    }

    #[test]
    fn test_team_color_and_division_lookup() {
        let config = Config::default();
        assert_eq!(config.team_color("Los Angeles Lakers"), "#552583");
        assert_eq!(config.team_color("Seattle SuperSonics"), DEFAULT_TEAM_COLOR);

        let pacific = config.division_teams("pacific").unwrap();
        assert!(pacific.contains(&"Sacramento Kings".to_string()));
        assert!(config.division_teams("Midwest").is_none());
    }
}
