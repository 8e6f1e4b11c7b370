use chrono::{Datelike, Duration, NaiveDate};
use itertools::Itertools;
use serde::Deserialize;
use std::str::FromStr;

use crate::error::{Error, ErrorKind};

pub const WEEKDAY_CLASSES: [&str; 7] = ["sun", "mon", "tue", "wed", "thu", "fri", "sat"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Week,
    Month,
}

impl Default for ViewMode {
    fn default() -> Self {
        ViewMode::Month
    }
}

impl FromStr for ViewMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "week" => Ok(ViewMode::Week),
            "month" => Ok(ViewMode::Month),
            _ => Err(Error::new(
                ErrorKind::ConfigParse,
                format!("unknown view mode '{}'", s).as_str(),
            )),
        }
    }
}

/// A single grid slot. Week view never produces `Empty`; month view uses it
/// for the leading cells before the 1st and the trailing cells after the last
/// day of the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayCell {
    Empty,
    Day(u32),
}

impl DayCell {
    pub fn is_empty(&self) -> bool {
        matches!(self, DayCell::Empty)
    }
}

/// Weekday column header. The positional class is fixed (`sun`..`sat`, index
/// 0=Sunday); only the display text is caller-suppliable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekdayLabel {
    pub class: &'static str,
    pub text: String,
}

pub fn default_day_txt() -> [String; 7] {
    WEEKDAY_CLASSES.map(str::to_owned)
}

pub fn weekday_labels(day_txt: &[String; 7]) -> Vec<WeekdayLabel> {
    WEEKDAY_CLASSES
        .iter()
        .zip(day_txt.iter())
        .map(|(class, text)| WeekdayLabel {
            class,
            text: text.clone(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub header: Vec<WeekdayLabel>,
    pub rows: Vec<Vec<DayCell>>,
}

/// Rendering class of a (non-empty) cell. `Selected` takes precedence over
/// `Today`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellClass {
    Selected,
    Today,
    Plain,
}

impl CellClass {
    pub fn class_key(&self) -> &'static str {
        match self {
            CellClass::Selected => "selected",
            CellClass::Today => "today",
            CellClass::Plain => "",
        }
    }
}

pub fn classify(date: NaiveDate, selected: NaiveDate, today: NaiveDate) -> CellClass {
    if date == selected {
        CellClass::Selected
    } else if date == today {
        CellClass::Today
    } else {
        CellClass::Plain
    }
}

/// Sunday of the calendar week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap()
}

pub fn days_in_month(date: NaiveDate) -> u32 {
    let first = first_of_month(date);
    let next = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1).unwrap()
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1).unwrap()
    };

    next.signed_duration_since(first).num_days() as u32
}

/// Derive the visible grid for `reference` in `mode`. Pure; the caller owns
/// classification since that needs selection and today context.
pub fn build(reference: NaiveDate, mode: ViewMode, header: Vec<WeekdayLabel>) -> Grid {
    let rows = match mode {
        ViewMode::Week => vec![week_row(reference)],
        ViewMode::Month => month_rows(reference),
    };

    Grid { header, rows }
}

fn week_row(reference: NaiveDate) -> Vec<DayCell> {
    let start = week_start(reference);
    (0..7)
        .map(|offset| DayCell::Day((start + Duration::days(offset)).day()))
        .collect()
}

fn month_rows(reference: NaiveDate) -> Vec<Vec<DayCell>> {
    let leading = first_of_month(reference).weekday().num_days_from_sunday() as i64;
    let last_day = days_in_month(reference) as i64;
    let slots = (leading + last_day + 6) / 7 * 7;

    (0..slots)
        .map(|slot| {
            let day = slot - leading + 1;
            if (1..=last_day).contains(&day) {
                DayCell::Day(day as u32)
            } else {
                DayCell::Empty
            }
        })
        .chunks(7)
        .into_iter()
        .map(|row| row.collect())
        .collect()
}

/// Full date of the cell at column `col` of a grid row. Week cells resolve
/// through the week's Sunday plus the column offset, so a bare day number
/// from an adjacent month still maps to the right date. Month cells resolve
/// as day-of-month of the reference month. `Empty` cells have no date.
pub fn cell_date(reference: NaiveDate, mode: ViewMode, cell: DayCell, col: usize) -> Option<NaiveDate> {
    match (mode, cell) {
        (_, DayCell::Empty) => None,
        (ViewMode::Week, DayCell::Day(_)) => Some(week_start(reference) + Duration::days(col as i64)),
        (ViewMode::Month, DayCell::Day(day)) => day_date(reference, day),
    }
}

/// Date of `day` within the month of `reference`.
pub fn day_date(reference: NaiveDate, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(reference.year(), reference.month(), day)
}

#[cfg(test)]
mod tests {
    use super::*;

    const E: DayCell = DayCell::Empty;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn days(row: &[DayCell]) -> Vec<Option<u32>> {
        row.iter()
            .map(|cell| match cell {
                DayCell::Day(n) => Some(*n),
                DayCell::Empty => None,
            })
            .collect()
    }

    fn d(n: u32) -> DayCell {
        DayCell::Day(n)
    }

    #[test]
    fn header_is_positional_and_mode_independent() {
        for mode in &[ViewMode::Week, ViewMode::Month] {
            let grid = build(ymd(2023, 7, 1), *mode, weekday_labels(&default_day_txt()));
            assert_eq!(grid.header.len(), 7);
            assert_eq!(grid.header[0].class, "sun");
            assert_eq!(grid.header[6].class, "sat");
        }
    }

    #[test]
    fn week_view_is_a_single_full_row() {
        // 2023-07-05 is a Wednesday, its week runs Jul 2 (Sun) to Jul 8 (Sat)
        let grid = build(ymd(2023, 7, 5), ViewMode::Week, weekday_labels(&default_day_txt()));
        assert_eq!(grid.rows, vec![vec![d(2), d(3), d(4), d(5), d(6), d(7), d(8)]]);
    }

    #[test]
    fn week_view_across_month_boundary_shows_bare_day_numbers() {
        // 2023-07-31 is a Monday, its week starts Sunday Jul 30
        let grid = build(ymd(2023, 7, 31), ViewMode::Week, weekday_labels(&default_day_txt()));
        assert_eq!(grid.rows, vec![vec![d(30), d(31), d(1), d(2), d(3), d(4), d(5)]]);
    }

    #[test]
    fn week_cells_resolve_to_unambiguous_dates() {
        let reference = ymd(2023, 7, 31);
        let row = &build(reference, ViewMode::Week, Vec::new()).rows[0];

        assert_eq!(cell_date(reference, ViewMode::Week, row[0], 0), Some(ymd(2023, 7, 30)));
        assert_eq!(cell_date(reference, ViewMode::Week, row[2], 2), Some(ymd(2023, 8, 1)));
        assert_eq!(cell_date(reference, ViewMode::Week, row[6], 6), Some(ymd(2023, 8, 5)));
    }

    #[test]
    fn month_of_july_2023_matches_known_layout() {
        // 31 days, starts on a Saturday
        let grid = build(ymd(2023, 7, 1), ViewMode::Month, weekday_labels(&default_day_txt()));

        assert_eq!(grid.rows.len(), 6);
        assert_eq!(grid.rows[0], vec![E, E, E, E, E, E, d(1)]);
        assert_eq!(grid.rows[1], vec![d(2), d(3), d(4), d(5), d(6), d(7), d(8)]);
        assert_eq!(grid.rows[4], vec![d(23), d(24), d(25), d(26), d(27), d(28), d(29)]);
        assert_eq!(grid.rows[5], vec![d(30), d(31), E, E, E, E, E]);
    }

    #[test]
    fn month_starting_on_sunday_has_no_leading_empties() {
        // October 2023 starts on a Sunday
        let grid = build(ymd(2023, 10, 14), ViewMode::Month, Vec::new());
        assert_eq!(days(&grid.rows[0]), vec![Some(1), Some(2), Some(3), Some(4), Some(5), Some(6), Some(7)]);
    }

    #[test]
    fn month_ending_on_saturday_has_no_trailing_empties() {
        // September 2023 ends on Saturday the 30th
        let grid = build(ymd(2023, 9, 1), ViewMode::Month, Vec::new());
        let last = grid.rows.last().unwrap();
        assert_eq!(last[6], d(30));
        assert!(last.iter().all(|cell| !cell.is_empty()));
    }

    #[test]
    fn month_row_count_and_width_invariants() {
        for &(year, month) in &[(2023, 7), (2023, 10), (2024, 2), (2023, 2), (2024, 12), (2021, 5)] {
            let reference = ymd(year, month, 1);
            let grid = build(reference, ViewMode::Month, Vec::new());

            let start_day_week = reference.weekday().num_days_from_sunday();
            let last_day = days_in_month(reference);
            let expected_rows = ((start_day_week + last_day) as usize + 6) / 7;

            assert_eq!(grid.rows.len(), expected_rows, "{}-{}", year, month);
            assert!(grid.rows.iter().all(|row| row.len() == 7));

            let real_days: Vec<u32> = grid
                .rows
                .iter()
                .flatten()
                .filter_map(|cell| match cell {
                    DayCell::Day(n) => Some(*n),
                    DayCell::Empty => None,
                })
                .collect();
            assert_eq!(real_days, (1..=last_day).collect::<Vec<u32>>());
        }
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(ymd(2024, 2, 10)), 29);
        assert_eq!(days_in_month(ymd(2023, 2, 10)), 28);
        assert_eq!(days_in_month(ymd(2023, 12, 31)), 31);
    }

    #[test]
    fn selected_takes_precedence_over_today() {
        let today = ymd(2024, 5, 15);

        assert_eq!(classify(ymd(2024, 5, 15), ymd(2024, 5, 15), today), CellClass::Selected);
        assert_eq!(classify(ymd(2024, 5, 15), ymd(2024, 5, 20), today), CellClass::Today);
        assert_eq!(classify(ymd(2024, 5, 14), ymd(2024, 5, 20), today), CellClass::Plain);
    }

    #[test]
    fn class_keys_are_stable() {
        assert_eq!(CellClass::Selected.class_key(), "selected");
        assert_eq!(CellClass::Today.class_key(), "today");
        assert_eq!(CellClass::Plain.class_key(), "");
    }

    #[test]
    fn empty_cells_have_no_date() {
        assert_eq!(cell_date(ymd(2023, 7, 1), ViewMode::Month, DayCell::Empty, 0), None);
    }
}
