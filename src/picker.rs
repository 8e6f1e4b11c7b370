use chrono::{Months, NaiveDate};
use std::sync::mpsc;

use crate::date;
use crate::events::Event;
use crate::grid;

/// Narrow seam for the external month/year selector. The core only ever
/// pushes the current selection and the disabled flag down; jumps come back
/// as `YYYY-MM` strings through the event channel.
pub trait YearMonthPicker {
    fn set_selected(&mut self, year_month: &str);
    fn set_disabled(&mut self, disabled: bool);
}

/// Channel-backed picker used by the terminal frontend and in tests. Keeps a
/// first-of-month date internally; `advance`/`retreat` emit the new selection
/// unless disabled.
pub struct StubPicker {
    selected: NaiveDate,
    disabled: bool,
    sink: mpsc::Sender<Event>,
}

impl StubPicker {
    pub fn new(sink: mpsc::Sender<Event>) -> Self {
        StubPicker {
            selected: grid::first_of_month(date::today()),
            disabled: false,
            sink,
        }
    }

    pub fn selected(&self) -> String {
        date::format_year_month(self.selected)
    }

    pub fn disabled(&self) -> bool {
        self.disabled
    }

    pub fn advance(&mut self) {
        self.shift(|d| d.checked_add_months(Months::new(1)));
    }

    pub fn retreat(&mut self) {
        self.shift(|d| d.checked_sub_months(Months::new(1)));
    }

    fn shift(&mut self, op: impl Fn(NaiveDate) -> Option<NaiveDate>) {
        if self.disabled {
            return;
        }

        if let Some(next) = op(self.selected) {
            self.selected = next;
            let _ = self.sink.send(Event::PickerChange(self.selected()));
        }
    }
}

impl YearMonthPicker for StubPicker {
    fn set_selected(&mut self, year_month: &str) {
        match date::parse_year_month(year_month) {
            Ok(first) => self.selected = first,
            Err(err) => log::warn!("picker ignores '{}': {}", year_month, err),
        }
    }

    fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }
}
