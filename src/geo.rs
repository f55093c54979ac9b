//! Geography tables
//!
//! Coordinates and great-circle distance, the per-team stadium coordinate
//! table, and the square team-to-team distance matrix. Both tables normalize
//! their team labels on load.

use csv::{ReaderBuilder, StringRecord, Trim, Writer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::{Read, Write};
use std::path::Path;

use crate::error::{BurdenError, Result};
use crate::normalize::TeamNormalizer;

/// Mean earth radius in statute miles
pub const EARTH_RADIUS_MILES: f64 = 3958.7613;

/// Cells closer than this are treated as equal when checking symmetry
const SYMMETRY_TOLERANCE: f64 = 1e-6;

/// Latitude / longitude in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Coordinates { lat, lon }
    }
}

/// Haversine distance in miles on a sphere of [`EARTH_RADIUS_MILES`].
/// Never negative.
///
/// Ellipsoidal (WGS84 geodesic) distances differ by up to about 0.5%, so
/// these values will not match a geodesic-built matrix to the mile.
pub fn great_circle_miles(a: &Coordinates, b: &Coordinates) -> f64 {
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();
    let h = (dlat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    let h = h.clamp(0.0, 1.0);
    2.0 * EARTH_RADIUS_MILES * h.sqrt().atan2((1.0 - h).sqrt())
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

// ============================================================================
// Stadium Coordinates
// ============================================================================

#[derive(Debug, Deserialize)]
struct StadiumRow {
    #[serde(rename = "Team", alias = "team")]
    team: String,
    #[serde(rename = "Lat", alias = "Latitude", alias = "lat")]
    lat: f64,
    #[serde(rename = "Long", alias = "Longitude", alias = "Lon", alias = "lon")]
    lon: f64,
}

/// Home-arena coordinates keyed by canonical team identity
#[derive(Debug, Clone, Default)]
pub struct StadiumTable {
    teams: Vec<String>,
    coords: HashMap<String, Coordinates>,
}

impl StadiumTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_path(path: &Path, normalizer: &TeamNormalizer) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, normalizer)
    }

    pub fn from_reader<R: Read>(reader: R, normalizer: &TeamNormalizer) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);
        let mut table = StadiumTable::new();
        for row in reader.deserialize::<StadiumRow>() {
            let row = row?;
            if !(-90.0..=90.0).contains(&row.lat) || !(-180.0..=180.0).contains(&row.lon) {
                return Err(BurdenError::InvalidTable(format!(
                    "Coordinates out of range for {}: ({}, {})",
                    row.team, row.lat, row.lon
                )));
            }
            table.insert(normalizer.normalize(&row.team), Coordinates::new(row.lat, row.lon));
        }
        log::info!("Loaded coordinates for {} stadiums", table.len());
        Ok(table)
    }

    pub fn insert(&mut self, team: &str, coords: Coordinates) {
        if self.coords.insert(team.to_string(), coords).is_none() {
            self.teams.push(team.to_string());
        }
    }

    pub fn get(&self, team: &str) -> Option<Coordinates> {
        self.coords.get(team).copied()
    }

    /// Teams in load order
    pub fn teams(&self) -> &[String] {
        &self.teams
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

// ============================================================================
// Distance Matrix
// ============================================================================

/// Square, symmetric table of miles between teams' home arenas.
///
/// Missing cells are stored as NaN and reported as `None` by [`get`].
///
/// [`get`]: DistanceMatrix::get
#[derive(Debug, Clone, Default)]
pub struct DistanceMatrix {
    teams: Vec<String>,
    index: HashMap<String, usize>,
    cells: Vec<f64>,
}

impl DistanceMatrix {
    fn with_teams(teams: Vec<String>) -> Result<Self> {
        let mut index = HashMap::with_capacity(teams.len());
        for (i, team) in teams.iter().enumerate() {
            if index.insert(team.clone(), i).is_some() {
                return Err(BurdenError::InvalidTable(format!(
                    "Duplicate team in distance matrix: {}",
                    team
                )));
            }
        }
        let n = teams.len();
        Ok(DistanceMatrix {
            teams,
            index,
            cells: vec![f64::NAN; n * n],
        })
    }

    pub fn from_path(path: &Path, normalizer: &TeamNormalizer) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, normalizer)
    }

    /// Read the CSV layout: blank index header, then one column per team;
    /// each row starts with the team label.
    pub fn from_reader<R: Read>(reader: R, normalizer: &TeamNormalizer) -> Result<Self> {
        let mut reader = ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers = reader.headers()?.clone();
        let teams: Vec<String> = headers
            .iter()
            .skip(1)
            .map(|h| normalizer.normalize(h).to_string())
            .collect();
        if teams.is_empty() {
            return Err(BurdenError::InvalidTable(
                "Distance matrix has no team columns".to_string(),
            ));
        }

        let mut matrix = Self::with_teams(teams)?;
        let mut seen_rows = 0usize;

        for result in reader.records() {
            let record: StringRecord = result?;
            let label = match record.get(0).map(|s| s.trim()) {
                Some(l) if !l.is_empty() => normalizer.normalize(l).to_string(),
                _ => continue,
            };
            let row = *matrix.index.get(&label).ok_or_else(|| {
                BurdenError::InvalidTable(format!("Row '{}' has no matching column", label))
            })?;
            seen_rows += 1;

            for (col, field) in record.iter().skip(1).enumerate().take(matrix.teams.len()) {
                let field = field.trim();
                if field.is_empty() {
                    continue;
                }
                match field.parse::<f64>() {
                    Ok(v) if v < 0.0 => {
                        return Err(BurdenError::parse("distance", field));
                    }
                    Ok(v) => matrix.set(row, col, v),
                    Err(_) => {
                        log::warn!("Non-numeric distance '{}' for {}; treating as missing", field, label);
                    }
                }
            }
        }

        if seen_rows != matrix.teams.len() {
            log::warn!(
                "Distance matrix has {} columns but {} rows",
                matrix.teams.len(),
                seen_rows
            );
        }

        matrix.symmetrize();
        log::info!("Loaded distance matrix for {} teams", matrix.teams.len());
        Ok(matrix)
    }

    /// Pairwise great-circle miles between every stadium, rounded to 4 places.
    pub fn from_stadiums(stadiums: &StadiumTable) -> Result<Self> {
        let mut matrix = Self::with_teams(stadiums.teams().to_vec())?;
        let n = matrix.teams.len();
        for i in 0..n {
            matrix.set(i, i, 0.0);
            for j in (i + 1)..n {
                let (a, b) = match (
                    stadiums.get(&matrix.teams[i]),
                    stadiums.get(&matrix.teams[j]),
                ) {
                    (Some(a), Some(b)) => (a, b),
                    _ => continue,
                };
                let miles = round_to(great_circle_miles(&a, &b), 4);
                matrix.set(i, j, miles);
                matrix.set(j, i, miles);
            }
        }
        Ok(matrix)
    }

    fn set(&mut self, row: usize, col: usize, value: f64) {
        let n = self.teams.len();
        self.cells[row * n + col] = value;
    }

    fn cell(&self, row: usize, col: usize) -> f64 {
        self.cells[row * self.teams.len() + col]
    }

    /// Zero the diagonal and make `cell(i, j) == cell(j, i)` exactly.
    fn symmetrize(&mut self) {
        let n = self.teams.len();
        for i in 0..n {
            let d = self.cell(i, i);
            if d.is_finite() && d != 0.0 {
                log::warn!("Non-zero self-distance {} for {}", d, self.teams[i]);
            }
            self.set(i, i, 0.0);
            for j in (i + 1)..n {
                let (a, b) = (self.cell(i, j), self.cell(j, i));
                let merged = match (a.is_nan(), b.is_nan()) {
                    (false, false) => {
                        if (a - b).abs() > SYMMETRY_TOLERANCE {
                            log::warn!(
                                "Asymmetric distance {} <-> {}: {} vs {}; using mean",
                                self.teams[i],
                                self.teams[j],
                                a,
                                b
                            );
                        }
                        (a + b) / 2.0
                    }
                    (false, true) => a,
                    (true, false) => b,
                    (true, true) => continue,
                };
                self.set(i, j, merged);
                self.set(j, i, merged);
            }
        }
    }

    /// Distance between two canonical identities, if both are present and
    /// the cell is populated.
    pub fn get(&self, from: &str, to: &str) -> Option<f64> {
        let row = *self.index.get(from)?;
        let col = *self.index.get(to)?;
        let value = self.cell(row, col);
        value.is_finite().then_some(value)
    }

    pub fn contains(&self, team: &str) -> bool {
        self.index.contains_key(team)
    }

    pub fn teams(&self) -> &[String] {
        &self.teams
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Mean distance from `team` to every other team, ignoring zero and
    /// missing cells.
    pub fn average_distance(&self, team: &str) -> Option<f64> {
        let row = *self.index.get(team)?;
        let others: Vec<f64> = (0..self.teams.len())
            .map(|col| self.cell(row, col))
            .filter(|d| d.is_finite() && *d != 0.0)
            .collect();
        if others.is_empty() {
            None
        } else {
            Some(others.iter().sum::<f64>() / others.len() as f64)
        }
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = Writer::from_writer(writer);
        let mut header = vec![String::new()];
        header.extend(self.teams.iter().cloned());
        writer.write_record(&header)?;

        for (i, team) in self.teams.iter().enumerate() {
            let mut row = vec![team.clone()];
            row.extend((0..self.teams.len()).map(|j| {
                let v = self.cell(i, j);
                if v.is_finite() {
                    v.to_string()
                } else {
                    String::new()
                }
            }));
            writer.write_record(&row)?;
        }
        writer.flush()?;
        Ok(())
    }
}
