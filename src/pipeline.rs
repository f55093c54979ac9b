//! Pipeline functions for programmatic use by the CLI.
//!
//! Each workflow loads the input tables, runs the burden core, and returns
//! a summary string instead of printing, so callers decide where text goes.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt::Write;
use std::io;
use std::path::{Path, PathBuf};

use crate::batch::{compute_season, team_burden, BurdenOptions, SeasonBurden};
use crate::burden::{BurdenChain, BurdenRecord};
use crate::config::Config;
use crate::geo::{DistanceMatrix, StadiumTable};
use crate::metrics::{cumulative_burden, summarize_chain, summarize_season, travel_baselines, TeamSummary};
use crate::normalize::TeamNormalizer;
use crate::resolver::GeoResolver;
use crate::schedule::SeasonTable;

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

// ============================================================================
// Loading
// ============================================================================

/// Input files shared by every workflow.
#[derive(Debug, Clone)]
pub struct DataSources {
    /// Season schedule CSV
    pub schedule: PathBuf,
    /// Team-to-team distance matrix CSV
    pub distances: PathBuf,
    /// Stadium coordinates CSV
    pub stadiums: PathBuf,
    /// Optional TOML config; built-in season data when absent
    pub config: Option<PathBuf>,
}

/// Everything loaded from [`DataSources`], ready for computation.
pub struct BurdenContext {
    pub config: Config,
    pub season: SeasonTable,
    pub resolver: GeoResolver,
}

impl BurdenContext {
    pub fn options(&self) -> BurdenOptions {
        BurdenOptions::from(&self.config)
    }

    pub fn normalizer(&self) -> &TeamNormalizer {
        self.resolver.normalizer()
    }
}

pub fn load_context(sources: &DataSources) -> Result<BurdenContext> {
    let config = Config::load_or_default(sources.config.as_deref())?;
    let normalizer = TeamNormalizer::new(&config.aliases)?;

    let season = SeasonTable::from_path(&sources.schedule).with_context(|| {
        format!("Failed to read schedule: {}", sources.schedule.display())
    })?;
    let matrix = DistanceMatrix::from_path(&sources.distances, &normalizer).with_context(|| {
        format!(
            "Failed to read distance matrix: {}",
            sources.distances.display()
        )
    })?;
    let stadiums = StadiumTable::from_path(&sources.stadiums, &normalizer).with_context(|| {
        format!("Failed to read stadiums: {}", sources.stadiums.display())
    })?;

    let resolver = GeoResolver::new(normalizer, matrix, stadiums, &config.international_venues);
    Ok(BurdenContext {
        config,
        season,
        resolver,
    })
}

// ============================================================================
// Per-game CSV
// ============================================================================

#[derive(Debug, Serialize)]
struct BurdenRow<'a> {
    team: &'a str,
    game_index: usize,
    game_time: String,
    previous_game_time: String,
    opponent: &'a str,
    location: String,
    played_at: &'a str,
    previous_played_at: &'a str,
    international: bool,
    travel_distance: Option<f64>,
    travel_hours: Option<f64>,
    burden: Option<f64>,
    unresolved: &'a str,
}

fn format_time(t: Option<NaiveDateTime>) -> String {
    t.map(|t| t.format(DATETIME_FORMAT).to_string())
        .unwrap_or_default()
}

impl<'a> BurdenRow<'a> {
    fn new(team: &'a str, r: &'a BurdenRecord) -> Self {
        BurdenRow {
            team,
            game_index: r.game_index,
            game_time: format_time(Some(r.game_time)),
            previous_game_time: format_time(r.previous_game_time),
            opponent: &r.opponent,
            location: r.location.to_string(),
            played_at: r.played_at.name(),
            previous_played_at: r.previous_played_at.as_ref().map(|p| p.name()).unwrap_or(""),
            international: r.played_at.is_international(),
            travel_distance: r.travel_distance,
            travel_hours: r.travel_hours,
            burden: r.burden,
            unresolved: r.unresolved.as_deref().unwrap_or(""),
        }
    }
}

/// Write one CSV row per game for each chain, blank cells for undefined values.
pub fn write_burden_csv<'a, W: io::Write>(
    writer: W,
    chains: impl IntoIterator<Item = &'a BurdenChain>,
) -> Result<usize> {
    let mut writer = csv::Writer::from_writer(writer);
    let mut rows = 0usize;
    for chain in chains {
        for record in &chain.records {
            writer.serialize(BurdenRow::new(&chain.team, record))?;
            rows += 1;
        }
    }
    writer.flush()?;
    Ok(rows)
}

// ============================================================================
// Cumulative series
// ============================================================================

/// Columns per team on the Cumulative sheet
const CUMULATIVE_BLOCK: usize = 4;

/// One point of a team's cumulative curve with the game it belongs to
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CumulativeRow {
    pub team: String,
    pub game_index: usize,
    pub cumulative_burden: f64,
    pub game_time: String,
    pub location: String,
    pub opponent: String,
}

pub fn cumulative_table(chain: &BurdenChain) -> Vec<CumulativeRow> {
    cumulative_burden(chain)
        .into_iter()
        .map(|p| CumulativeRow {
            team: chain.team.clone(),
            game_index: p.game_index,
            cumulative_burden: p.cumulative_burden,
            game_time: format_time(Some(p.game_time)),
            location: p.location.to_string(),
            opponent: p.opponent,
        })
        .collect()
}

/// Write every chain's cumulative curve, one row per game.
pub fn write_cumulative_csv<'a, W: io::Write>(
    writer: W,
    chains: impl IntoIterator<Item = &'a BurdenChain>,
) -> Result<usize> {
    let mut writer = csv::Writer::from_writer(writer);
    let mut rows = 0usize;
    for chain in chains {
        for row in cumulative_table(chain) {
            writer.serialize(&row)?;
            rows += 1;
        }
    }
    writer.flush()?;
    Ok(rows)
}

// ============================================================================
// Team
// ============================================================================

/// Compute one team's burden chain and write it as CSV.
///
/// Writes to `output` when given, otherwise to stdout. The cumulative curve
/// goes to `cumulative` when given. Returns a summary.
pub fn team_report(
    sources: &DataSources,
    team: &str,
    output: Option<&Path>,
    cumulative: Option<&Path>,
) -> Result<String> {
    let ctx = load_context(sources)?;
    let chain = team_burden(&ctx.season.games, team, &ctx.resolver, &ctx.options())?;

    if let Some(path) = cumulative {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        write_cumulative_csv(file, [&chain])?;
    }

    match output {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_burden_csv(file, [&chain])?;
        }
        None => {
            write_burden_csv(io::stdout().lock(), [&chain])?;
        }
    }

    let baselines = travel_baselines(ctx.resolver.matrix(), ctx.config.road_trips_per_season);
    let summary = summarize_chain(&chain, &baselines);

    let mut out = String::new();
    writeln!(
        out,
        "{}: {} games, average burden {}, total burden {}, total distance {} mi",
        summary.team,
        summary.games,
        fmt_opt(summary.average_burden, 2),
        fmt_opt(summary.total_burden, 2),
        fmt_opt(summary.total_distance, 1)
    )?;
    if let Some(partial) = summary.partial {
        writeln!(
            out,
            "Warning: only {} of {} expected games",
            partial.found, partial.expected
        )?;
    }
    if summary.unresolved > 0 {
        writeln!(
            out,
            "Warning: {} legs with unresolved locations ({:?} policy)",
            summary.unresolved, ctx.config.unknown_location
        )?;
    }
    if !ctx.season.rejected.is_empty() {
        writeln!(
            out,
            "Warning: {} schedule rows rejected",
            ctx.season.rejected.len()
        )?;
    }
    Ok(out)
}

// ============================================================================
// Season
// ============================================================================

/// Compute every team and return a ranking table.
///
/// When `output` is given, the per-team summaries are also written as CSV.
pub fn season_report(sources: &DataSources, top_n: usize, output: Option<&Path>) -> Result<String> {
    let ctx = load_context(sources)?;
    let batch = compute_season(&ctx.season, &[], &ctx.resolver, &ctx.options());
    let summaries = summarize_season(
        &batch,
        ctx.resolver.matrix(),
        ctx.config.road_trips_per_season,
    );

    if let Some(path) = output {
        write_summary_csv(path, &summaries)?;
    }

    format_season_report(&batch, &summaries, top_n)
}

#[derive(Debug, Serialize)]
struct SummaryRow<'a> {
    team: &'a str,
    games: usize,
    average_burden: Option<f64>,
    total_burden: Option<f64>,
    total_distance: Option<f64>,
    normalized_distance: Option<f64>,
    normalized_burden: Option<f64>,
    unresolved: usize,
    partial: bool,
}

fn write_summary_csv(path: &Path, summaries: &[TeamSummary]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    for s in summaries {
        writer.serialize(SummaryRow {
            team: &s.team,
            games: s.games,
            average_burden: s.average_burden,
            total_burden: s.total_burden,
            total_distance: s.total_distance,
            normalized_distance: s.normalized_distance,
            normalized_burden: s.normalized_burden,
            unresolved: s.unresolved,
            partial: s.partial.is_some(),
        })?;
    }
    writer.flush()?;
    Ok(())
}

/// Format the season ranking; failed teams are listed, never dropped.
pub fn format_season_report(
    batch: &SeasonBurden,
    summaries: &[TeamSummary],
    top_n: usize,
) -> Result<String> {
    let mut out = String::new();
    writeln!(
        out,
        "Processed {}/{} teams ({} schedule rows rejected)\n",
        batch.succeeded(),
        batch.teams.len(),
        batch.rejected.len()
    )?;

    writeln!(out, "{:=^100}", " Game Mile-Hours Burden by Team ")?;
    writeln!(
        out,
        "\n{:<26} {:>6} {:>10} {:>12} {:>12} {:>10} {:>10} {:>6}",
        "Team", "Games", "Avg", "Total", "Miles", "Norm Mi", "Norm Bur", "Unres"
    )?;
    writeln!(out, "{:-<100}", "")?;

    for s in summaries.iter().take(top_n) {
        writeln!(
            out,
            "{:<26} {:>6} {:>10} {:>12} {:>12} {:>10} {:>10} {:>6}",
            truncate_name(&s.team, 26),
            s.games,
            fmt_opt(s.average_burden, 2),
            fmt_opt(s.total_burden, 2),
            fmt_opt(s.total_distance, 1),
            fmt_opt(s.normalized_distance, 4),
            fmt_opt(s.normalized_burden, 4),
            s.unresolved
        )?;
    }

    let partial: Vec<&TeamSummary> = summaries.iter().filter(|s| s.partial.is_some()).collect();
    if !partial.is_empty() {
        writeln!(out, "\nPartial schedules:")?;
        for s in partial {
            if let Some(p) = s.partial {
                writeln!(out, "  {}: {} of {} games", s.team, p.found, p.expected)?;
            }
        }
    }

    let failures: Vec<_> = batch.failures().collect();
    if !failures.is_empty() {
        writeln!(out, "\nFailed teams:")?;
        for (team, err) in failures {
            writeln!(out, "  [ERROR] {}: {}", team, err)?;
        }
    }

    if !batch.rejected.is_empty() {
        writeln!(out, "\nRejected schedule rows:")?;
        for row in &batch.rejected {
            writeln!(out, "  line {}: {}", row.line, row.message)?;
        }
    }

    writeln!(out, "\n{:=^100}", "")?;
    writeln!(out, "\nInterpretation:")?;
    writeln!(out, "  - Avg/Total: miles traveled per hour between games")?;
    writeln!(
        out,
        "  - Norm Mi/Norm Bur: season totals over the team's typical yearly road travel"
    )?;
    writeln!(out, "  - Unres: legs whose location could not be resolved")?;

    Ok(out)
}

// ============================================================================
// Package Workbook
// ============================================================================

/// Configuration for the workbook command.
pub struct WorkbookConfig {
    pub sources: DataSources,
    /// Output xlsx path
    pub output: PathBuf,
    /// Teams to include (any spelling variant)
    pub teams: Vec<String>,
    /// Divisions whose teams are included
    pub divisions: Vec<String>,
}

/// Resolve the team and division filters to canonical identities.
/// Empty filters select every team in the season.
fn select_teams(ctx: &BurdenContext, teams: &[String], divisions: &[String]) -> Result<Vec<String>> {
    let normalizer = ctx.normalizer();
    let mut selected: Vec<String> = teams
        .iter()
        .map(|t| normalizer.normalize(t).to_string())
        .collect();
    for division in divisions {
        let members = ctx
            .config
            .division_teams(division)
            .ok_or_else(|| anyhow::anyhow!("Unknown division '{}'", division))?;
        selected.extend(members.iter().map(|t| normalizer.normalize(t).to_string()));
    }
    if selected.is_empty() {
        selected = ctx.season.teams(normalizer);
    }
    selected.sort();
    selected.dedup();
    Ok(selected)
}

/// Spreadsheet column name for a 0-based index (0 -> A, 26 -> AA).
fn col_letter(idx: u16) -> String {
    let mut n = u32::from(idx) + 1;
    let mut letters = Vec::new();
    while n > 0 {
        letters.push(char::from(b'A' + ((n - 1) % 26) as u8));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Create an Excel workbook with Summary, Games and Cumulative sheets and
/// a line chart overlaying each team's cumulative burden.
pub fn package_workbook(config: &WorkbookConfig) -> Result<String> {
    use rust_xlsxwriter::{Chart, ChartFormat, ChartLine, ChartType, Format, Formula, Workbook};

    let ctx = load_context(&config.sources)?;
    let teams = select_teams(&ctx, &config.teams, &config.divisions)?;
    let batch = compute_season(&ctx.season, &teams, &ctx.resolver, &ctx.options());
    let summaries = summarize_season(
        &batch,
        ctx.resolver.matrix(),
        ctx.config.road_trips_per_season,
    );

    let mut workbook = Workbook::new();
    let header_fmt = Format::new().set_bold();
    let num_fmt = Format::new().set_num_format("0.00");
    let title_fmt = Format::new().set_bold().set_font_size(16);

    // ---------------------------------------------------------------
    // Summary sheet
    // ---------------------------------------------------------------
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Summary")?;
        sheet.write_string_with_format(0, 0, "Season Travel Burden", &title_fmt)?;
        let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        sheet.write_string(1, 0, format!("Generated {}", now))?;

        let headers = [
            "Team",
            "Games",
            "Average Burden",
            "Total Burden",
            "Total Distance",
            "Normalized Distance",
            "Normalized Burden",
            "Unresolved Legs",
            "Partial",
        ];
        let header_row = 3u32;
        for (col, h) in headers.iter().enumerate() {
            sheet.write_string_with_format(header_row, col as u16, *h, &header_fmt)?;
        }

        let mut row = header_row + 1;
        for s in &summaries {
            sheet.write_string(row, 0, &s.team)?;
            sheet.write_number(row, 1, s.games as f64)?;
            let values = [
                s.average_burden,
                s.total_burden,
                s.total_distance,
                s.normalized_distance,
                s.normalized_burden,
            ];
            for (i, v) in values.iter().enumerate() {
                if let Some(v) = v {
                    sheet.write_number_with_format(row, 2 + i as u16, *v, &num_fmt)?;
                }
            }
            sheet.write_number(row, 7, s.unresolved as f64)?;
            sheet.write_string(row, 8, if s.partial.is_some() { "yes" } else { "" })?;
            row += 1;
        }

        for (team, err) in batch.failures() {
            sheet.write_string(row, 0, team)?;
            sheet.write_string(row, 8, format!("ERROR: {}", err))?;
            row += 1;
        }

        // Live total so the sheet stays consistent if edited
        if !summaries.is_empty() {
            let first = header_row + 2;
            let last = header_row + 1 + summaries.len() as u32;
            row += 1;
            sheet.write_string_with_format(row, 0, "League Average", &header_fmt)?;
            // Average Burden through Normalized Burden
            for col in 2..=6u16 {
                let c = col_letter(col);
                sheet.write_formula_with_format(
                    row,
                    col,
                    Formula::new(format!("AVERAGE({c}{first}:{c}{last})")),
                    &num_fmt,
                )?;
            }
        }

        sheet.set_column_width(0, 26)?;
        for col in 1..headers.len() as u16 {
            sheet.set_column_width(col, 18)?;
        }
    }

    // ---------------------------------------------------------------
    // Games sheet
    // ---------------------------------------------------------------
    let chains: Vec<&BurdenChain> = batch.chains().collect();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Games")?;
        let headers = [
            "Team",
            "Game",
            "Date/Time",
            "Previous Date/Time",
            "Opponent",
            "Location",
            "Played At",
            "Previous Played At",
            "Travel Distance",
            "Travel Hours",
            "Burden",
            "Unresolved",
        ];
        for (col, h) in headers.iter().enumerate() {
            sheet.write_string_with_format(0, col as u16, *h, &header_fmt)?;
        }

        let mut row = 1u32;
        for chain in &chains {
            for r in &chain.records {
                sheet.write_string(row, 0, &chain.team)?;
                sheet.write_number(row, 1, r.game_index as f64)?;
                sheet.write_string(row, 2, format_time(Some(r.game_time)))?;
                sheet.write_string(row, 3, format_time(r.previous_game_time))?;
                sheet.write_string(row, 4, &r.opponent)?;
                sheet.write_string(row, 5, r.location.to_string())?;
                sheet.write_string(row, 6, r.played_at.name())?;
                if let Some(prev) = &r.previous_played_at {
                    sheet.write_string(row, 7, prev.name())?;
                }
                for (i, v) in [r.travel_distance, r.travel_hours, r.burden].iter().enumerate() {
                    if let Some(v) = v {
                        sheet.write_number_with_format(row, 8 + i as u16, *v, &num_fmt)?;
                    }
                }
                if let Some(reason) = &r.unresolved {
                    sheet.write_string(row, 11, reason)?;
                }
                row += 1;
            }
        }

        if row > 1 {
            sheet.autofilter(0, 0, row - 1, headers.len() as u16 - 1)?;
        }
        sheet.set_column_width(0, 24)?;
        sheet.set_column_width(2, 18)?;
        sheet.set_column_width(3, 18)?;
        sheet.set_column_width(4, 24)?;
        sheet.set_column_width(6, 24)?;
        sheet.set_column_width(7, 24)?;
    }

    // ---------------------------------------------------------------
    // Cumulative sheet + chart
    //   Game | team 1 | Date/Time | Location | Opponent | team 2 | ...
    // ---------------------------------------------------------------
    let tables: Vec<(&str, Vec<CumulativeRow>)> = chains
        .iter()
        .map(|chain| (chain.team.as_str(), cumulative_table(chain)))
        .collect();
    let max_games = tables.iter().map(|(_, rows)| rows.len()).max().unwrap_or(0) as u32;

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Cumulative")?;
        sheet.write_string_with_format(0, 0, "Game", &header_fmt)?;
        for game in 1..=max_games {
            sheet.write_number(game, 0, game as f64)?;
        }

        let mut chart = Chart::new(ChartType::Line);
        chart.title().set_name("Cumulative Burden Over Season");
        chart.x_axis().set_name("Game Number");
        chart.y_axis().set_name("Cumulative Total Burden");
        chart.set_width(960).set_height(540);

        for (i, (team, rows)) in tables.iter().enumerate() {
            let col = 1 + (i * CUMULATIVE_BLOCK) as u16;
            sheet.write_string_with_format(0, col, *team, &header_fmt)?;
            sheet.write_string_with_format(0, col + 1, "Date/Time", &header_fmt)?;
            sheet.write_string_with_format(0, col + 2, "Location", &header_fmt)?;
            sheet.write_string_with_format(0, col + 3, "Opponent", &header_fmt)?;
            for (j, r) in rows.iter().enumerate() {
                let row = j as u32 + 1;
                sheet.write_number_with_format(row, col, r.cumulative_burden, &num_fmt)?;
                sheet.write_string(row, col + 1, &r.game_time)?;
                sheet.write_string(row, col + 2, &r.location)?;
                sheet.write_string(row, col + 3, &r.opponent)?;
            }
            sheet.set_column_width(col + 1, 17)?;
            sheet.set_column_width(col + 3, 24)?;
            if rows.is_empty() {
                continue;
            }
            let last_row = rows.len() as u32;
            chart
                .add_series()
                .set_name(*team)
                .set_categories(("Cumulative", 1, 0, last_row, 0))
                .set_values(("Cumulative", 1, col, last_row, col))
                .set_format(
                    ChartFormat::new().set_line(
                        ChartLine::new()
                            .set_color(ctx.config.team_color(team))
                            .set_width(2.25),
                    ),
                );
        }

        sheet.set_column_width(0, 8)?;
        if !tables.is_empty() {
            let chart_col = (tables.len() * CUMULATIVE_BLOCK) as u16 + 2;
            sheet.insert_chart(1, chart_col, &chart)?;
        }
    }

    workbook
        .save(&config.output)
        .with_context(|| format!("Failed to save workbook: {}", config.output.display()))?;

    let failures = batch.failures().count();
    Ok(format!(
        "Wrote {} teams ({} failed) to {}",
        chains.len(),
        failures,
        config.output.display()
    ))
}

// ============================================================================
// Distance Matrix
// ============================================================================

/// Build the distance matrix from a stadium coordinate table.
pub fn build_distance_matrix(
    stadiums: &Path,
    output: &Path,
    config: Option<&Path>,
) -> Result<String> {
    let config = Config::load_or_default(config)?;
    let normalizer = TeamNormalizer::new(&config.aliases)?;
    let table = StadiumTable::from_path(stadiums, &normalizer)
        .with_context(|| format!("Failed to read stadiums: {}", stadiums.display()))?;
    let matrix = DistanceMatrix::from_stadiums(&table)?;

    let file = std::fs::File::create(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    matrix.write_csv(file)?;

    Ok(format!(
        "Distance matrix for {} teams written to {}",
        matrix.len(),
        output.display()
    ))
}

// ============================================================================
// Internal Helpers
// ============================================================================

/// Truncate a name to fit in a column.
fn truncate_name(name: &str, max_len: usize) -> String {
    if name.chars().count() <= max_len {
        name.to_string()
    } else {
        let kept: String = name.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

fn fmt_opt(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", precision, v),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_col_letter() {
        assert_eq!(col_letter(0), "A");
        assert_eq!(col_letter(2), "C");
        assert_eq!(col_letter(25), "Z");
        assert_eq!(col_letter(26), "AA");
        assert_eq!(col_letter(52), "BA");
        assert_eq!(col_letter(701), "ZZ");
        assert_eq!(col_letter(702), "AAA");
    }

    #[test]
    fn test_cumulative_table_carries_game_details() {
        use crate::burden::HomeAway;
        use crate::resolver::PlayedAt;
        use chrono::NaiveDate;

        let day = NaiveDate::from_ymd_opt(2024, 10, 22).unwrap();
        let record = |index: usize,
                      hour: u32,
                      location: HomeAway,
                      opponent: &str,
                      burden: Option<f64>| BurdenRecord {
            game_index: index,
            game_time: day.and_hms_opt(hour, 30, 0).unwrap(),
            previous_game_time: None,
            opponent: opponent.to_string(),
            location,
            played_at: PlayedAt::Team("Miami Heat".to_string()),
            previous_played_at: None,
            travel_distance: None,
            travel_hours: None,
            burden,
            unresolved: None,
        };
        let chain = BurdenChain {
            team: "Miami Heat".to_string(),
            records: vec![
                record(1, 19, HomeAway::Home, "Indiana Pacers", None),
                record(2, 21, HomeAway::Away, "Washington Wizards", Some(12.5)),
            ],
            unresolved: 0,
            partial: None,
        };

        let rows = cumulative_table(&chain);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].cumulative_burden, 0.0);
        assert_eq!(rows[1].team, "Miami Heat");
        assert_eq!(rows[1].cumulative_burden, 12.5);
        assert_eq!(rows[1].game_time, "2024-10-22 21:30");
        assert_eq!(rows[1].location, "away");
        assert_eq!(rows[1].opponent, "Washington Wizards");
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("Utah Jazz", 26), "Utah Jazz");
        assert_eq!(truncate_name("Portland Trail Blazers", 12), "Portland ...");
    }

    #[test]
    fn test_fmt_opt() {
        assert_eq!(fmt_opt(Some(20.8333), 2), "20.83");
        assert_eq!(fmt_opt(None, 2), "-");
    }
}
