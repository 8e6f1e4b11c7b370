use chrono::{Datelike, Duration, Months, NaiveDate};

use crate::cmds::{Cmd, CmdResult};
use crate::control::Control;
use crate::date;
use crate::grid::ViewMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

pub type ChangeListener = Box<dyn FnMut(&str)>;

/// Owns the reference date anchoring the visible grid and the active view
/// mode. Every completed mutation re-normalizes the reference date and then
/// notifies the change listener with its canonical form; construction alone
/// never notifies. Year and month are always computed from the reference
/// date, so they cannot drift.
pub struct NavigationController {
    reference: NaiveDate,
    mode: ViewMode,
    today: NaiveDate,
    listener: Option<ChangeListener>,
}

impl NavigationController {
    pub fn new(mode: ViewMode, initial: Option<&str>) -> Self {
        Self::with_today(mode, initial, date::today())
    }

    /// Deterministic constructor: `today` is used for the today-classification
    /// and as the fallback for malformed input.
    pub fn with_today(mode: ViewMode, initial: Option<&str>, today: NaiveDate) -> Self {
        NavigationController {
            reference: date::normalize_or(initial, today),
            mode,
            today,
            listener: None,
        }
    }

    pub fn on_change(&mut self, listener: impl FnMut(&str) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn reference(&self) -> NaiveDate {
        self.reference
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Mode changes only happen through external reconfiguration, never
    /// through navigation. The reference date is untouched, so no
    /// notification fires.
    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Re-reads the wall clock; called on ticks so the today marker survives
    /// midnight.
    pub fn refresh_today(&mut self) {
        self.today = date::today();
    }

    pub fn year(&self) -> i32 {
        self.reference.year()
    }

    pub fn month(&self) -> u32 {
        self.reference.month()
    }

    pub fn display_year_month(&self) -> String {
        date::format_year_month(self.reference)
    }

    /// Move the reference date by one unit of the active view: a week in
    /// week mode, a calendar month in month mode. Month arithmetic clamps
    /// the day-of-month to the target month's length.
    pub fn step(&mut self, direction: Direction) {
        let reference = match (self.mode, direction) {
            (ViewMode::Week, Direction::Prev) => self.reference - Duration::weeks(1),
            (ViewMode::Week, Direction::Next) => self.reference + Duration::weeks(1),
            (ViewMode::Month, Direction::Prev) => self
                .reference
                .checked_sub_months(Months::new(1))
                .unwrap_or(self.reference),
            (ViewMode::Month, Direction::Next) => self
                .reference
                .checked_add_months(Months::new(1))
                .unwrap_or(self.reference),
        };

        self.reference = reference;
        self.emit();
    }

    /// Select a cell's fully resolved date. Notifies unconditionally, even
    /// when the date equals the previous one: state is idempotent, the
    /// notification is not.
    pub fn select_date(&mut self, input: &str) {
        self.reference = date::normalize_or(Some(input), self.today);
        self.emit();
    }

    pub fn select(&mut self, date: NaiveDate) {
        self.reference = date;
        self.emit();
    }

    /// React to the external month/year picker: jump to the first day of the
    /// given `YYYY-MM`. Accepted in any mode; the picker itself is disabled
    /// by the UI while in week mode.
    pub fn jump_year_month(&mut self, input: &str) {
        let first = format!("{}-01", input);
        self.reference = date::normalize_or(Some(first.as_str()), self.today);
        self.emit();
    }

    pub fn go_today(&mut self) {
        self.reference = self.today;
        self.emit();
    }

    fn emit(&mut self) {
        let formatted = date::format_canonical(self.reference);
        log::debug!("reference date changed to {}", formatted);

        if let Some(listener) = self.listener.as_mut() {
            listener(&formatted);
        }
    }
}

impl Control for NavigationController {
    fn send_cmd(&mut self, cmd: &Cmd) -> CmdResult {
        match cmd {
            Cmd::PrevUnit => {
                self.step(Direction::Prev);
                Ok(Cmd::Noop)
            }
            Cmd::NextUnit => {
                self.step(Direction::Next);
                Ok(Cmd::Noop)
            }
            Cmd::PrevDay => {
                self.select(self.reference - Duration::days(1));
                Ok(Cmd::Noop)
            }
            Cmd::NextDay => {
                self.select(self.reference + Duration::days(1));
                Ok(Cmd::Noop)
            }
            Cmd::PrevWeek => {
                self.select(self.reference - Duration::days(7));
                Ok(Cmd::Noop)
            }
            Cmd::NextWeek => {
                self.select(self.reference + Duration::days(7));
                Ok(Cmd::Noop)
            }
            Cmd::Today => {
                self.go_today();
                Ok(Cmd::Noop)
            }
            Cmd::SelectDate(input) => {
                self.select_date(input);
                Ok(Cmd::Noop)
            }
            Cmd::JumpYearMonth(input) => {
                self.jump_year_month(input);
                Ok(Cmd::Noop)
            }
            _ => Ok(cmd.clone()),
        }
    }
}
