//! Season schedule loading and per-team game chains
//!
//! Rows whose date or start time cannot be parsed are rejected one at a time
//! and collected, so one bad row never sinks the rest of the season.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use csv::{ReaderBuilder, Trim};
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

use crate::error::{BurdenError, Result};
use crate::normalize::TeamNormalizer;

lazy_static::lazy_static! {
    // "Tue, Oct 22, 2024"
    static ref DATE_PATTERN: Regex =
        Regex::new(r"^\s*([A-Za-z]+),\s+([A-Za-z]+)\s+(\d{1,2}),\s+(\d{4})\s*$").unwrap();
    // "7:30p", "12:00p", "10:00 AM"
    static ref TIME_PATTERN: Regex =
        Regex::new(r"^\s*(\d{1,2}):(\d{2})\s*([aApP])\.?[mM]?\.?\s*$").unwrap();
}

/// One scheduled contest
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub date_time: NaiveDateTime,
    pub visitor_team: String,
    pub home_team: String,
    pub venue: String,
    pub notes: Option<String>,
}

impl GameRecord {
    pub fn involves(&self, team: &str, normalizer: &TeamNormalizer) -> bool {
        let team = normalizer.normalize(team);
        normalizer.normalize(&self.visitor_team) == team
            || normalizer.normalize(&self.home_team) == team
    }
}

/// A schedule row that was rejected during loading
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    /// 1-based line in the source file, header included
    pub line: u64,
    pub message: String,
}

/// Parsed season: accepted games in file order plus rejected rows
#[derive(Debug, Clone, Default)]
pub struct SeasonTable {
    pub games: Vec<GameRecord>,
    pub rejected: Vec<RowError>,
}

#[derive(Debug, Deserialize)]
struct ScheduleRow {
    #[serde(rename = "Game Date", alias = "game_date")]
    game_date: String,
    #[serde(rename = "Start (ET)", alias = "start_time")]
    start_time: String,
    #[serde(rename = "Visitor/Neutral", alias = "visitor_team")]
    visitor: String,
    #[serde(rename = "Home/Neutral", alias = "home_team")]
    home: String,
    #[serde(rename = "Arena", alias = "venue_name")]
    venue: String,
    #[serde(rename = "Notes", alias = "notes", default)]
    notes: Option<String>,
}

fn month_number(name: &str) -> Option<u32> {
    let prefix: String = name.chars().take(3).collect::<String>().to_ascii_lowercase();
    let month = match prefix.as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

/// Parse `"Tue, Oct 22, 2024"`. A day name that disagrees with the calendar
/// is logged and ignored.
pub fn parse_game_date(text: &str) -> Result<NaiveDate> {
    let caps = DATE_PATTERN
        .captures(text)
        .ok_or_else(|| BurdenError::parse("date", text))?;

    let month = month_number(&caps[2]).ok_or_else(|| BurdenError::parse("date", text))?;
    let day: u32 = caps[3].parse().map_err(|_| BurdenError::parse("date", text))?;
    let year: i32 = caps[4].parse().map_err(|_| BurdenError::parse("date", text))?;
    let date =
        NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| BurdenError::parse("date", text))?;

    let weekday = date.weekday().to_string();
    if !caps[1].to_ascii_lowercase().starts_with(&weekday.to_ascii_lowercase()) {
        log::warn!("Day name in '{}' does not match {} ({})", text.trim(), date, weekday);
    }

    Ok(date)
}

/// Parse a 12-hour start time such as `"7:30p"`. 12p is noon, 12a midnight.
pub fn parse_start_time(text: &str) -> Result<NaiveTime> {
    let caps = TIME_PATTERN
        .captures(text)
        .ok_or_else(|| BurdenError::parse("time", text))?;

    let hour: u32 = caps[1].parse().map_err(|_| BurdenError::parse("time", text))?;
    let minute: u32 = caps[2].parse().map_err(|_| BurdenError::parse("time", text))?;
    if !(1..=12).contains(&hour) {
        return Err(BurdenError::parse("time", text));
    }

    let pm = caps[3].eq_ignore_ascii_case("p");
    let hour = match (hour, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, true) => h + 12,
        (h, false) => h,
    };

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| BurdenError::parse("time", text))
}

pub fn parse_game_datetime(date_text: &str, time_text: &str) -> Result<NaiveDateTime> {
    let date = parse_game_date(date_text)?;
    let time = parse_start_time(time_text)?;
    Ok(date.and_time(time))
}

impl SeasonTable {
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        for (column, alias) in [
            ("Game Date", "game_date"),
            ("Start (ET)", "start_time"),
            ("Visitor/Neutral", "visitor_team"),
            ("Home/Neutral", "home_team"),
            ("Arena", "venue_name"),
        ] {
            if !headers.iter().any(|h| h == column || h == alias) {
                return Err(BurdenError::InvalidTable(format!(
                    "Column '{}' not found in schedule",
                    column
                )));
            }
        }

        let mut season = SeasonTable::default();
        for result in reader.records() {
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    let line = e.position().map(|p| p.line()).unwrap_or_default();
                    log::warn!("Schedule line {}: {}", line, e);
                    season.rejected.push(RowError {
                        line,
                        message: e.to_string(),
                    });
                    continue;
                }
            };
            // Physical line where the record starts, so blank lines and
            // multi-line quoted cells are counted
            let line = record.position().map(|p| p.line()).unwrap_or_default();

            let row = match record.deserialize::<ScheduleRow>(Some(&headers)) {
                Ok(row) => row,
                Err(e) => {
                    log::warn!("Schedule line {}: {}", line, e);
                    season.rejected.push(RowError {
                        line,
                        message: e.to_string(),
                    });
                    continue;
                }
            };

            match parse_game_datetime(&row.game_date, &row.start_time) {
                Ok(date_time) => season.games.push(GameRecord {
                    date_time,
                    visitor_team: row.visitor,
                    home_team: row.home,
                    venue: row.venue,
                    notes: row.notes.filter(|n| !n.is_empty()),
                }),
                Err(e) => {
                    log::warn!("Schedule line {}: {}", line, e);
                    season.rejected.push(RowError {
                        line,
                        message: e.to_string(),
                    });
                }
            }
        }

        log::info!(
            "Loaded {} games ({} rows rejected)",
            season.games.len(),
            season.rejected.len()
        );
        Ok(season)
    }

    /// Sorted, de-duplicated canonical identities of every team in the season
    pub fn teams(&self, normalizer: &TeamNormalizer) -> Vec<String> {
        let set: BTreeSet<&str> = self
            .games
            .iter()
            .flat_map(|g| {
                [
                    normalizer.normalize(&g.visitor_team),
                    normalizer.normalize(&g.home_team),
                ]
            })
            .filter(|t| !t.is_empty())
            .collect();
        set.into_iter().map(str::to_string).collect()
    }
}

// ============================================================================
// Game-Chain Builder
// ============================================================================

/// The schedule had fewer games than a full season
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartialData {
    pub found: usize,
    pub expected: usize,
}

/// One team's games in ascending start order
#[derive(Debug, Clone)]
pub struct TeamSchedule {
    /// Canonical identity
    pub team: String,
    pub games: Vec<GameRecord>,
    pub partial: Option<PartialData>,
}

impl TeamSchedule {
    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

/// Select `team`'s games and order them by start time.
///
/// Ties keep their input order. An empty selection is an error; fewer than
/// `expected_games` games is a warning carried on the result.
pub fn build_schedule(
    all_games: &[GameRecord],
    team: &str,
    normalizer: &TeamNormalizer,
    expected_games: usize,
) -> Result<TeamSchedule> {
    let canonical = normalizer.normalize(team).to_string();

    let mut games: Vec<GameRecord> = all_games
        .iter()
        .filter(|g| g.involves(&canonical, normalizer))
        .cloned()
        .collect();

    if games.is_empty() {
        return Err(BurdenError::NoGamesFound(canonical));
    }

    games.sort_by_key(|g| g.date_time);

    let partial = if games.len() < expected_games {
        log::warn!(
            "{} has only {} games (expected {})",
            canonical,
            games.len(),
            expected_games
        );
        Some(PartialData {
            found: games.len(),
            expected: expected_games,
        })
    } else {
        None
    };

    Ok(TeamSchedule {
        team: canonical,
        games,
        partial,
    })
}
