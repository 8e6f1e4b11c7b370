use termion::{color, style};

use crate::control::NavigationController;
use crate::grid::{self, CellClass, DayCell, Grid};

/// Renders the active grid into styled terminal lines: a `YYYY-MM` title with
/// optional prev/next glyphs, the weekday header and one line per cell row.
pub struct CalendarView {
    nav: bool,
}

impl CalendarView {
    pub fn new(nav: bool) -> Self {
        CalendarView { nav }
    }

    pub fn render(&self, state: &NavigationController, day_txt: &[String; 7]) -> Vec<String> {
        let grid = grid::build(state.reference(), state.mode(), grid::weekday_labels(day_txt));

        let mut lines = Vec::with_capacity(grid.rows.len() + 2);
        lines.push(self.title_line(state));
        lines.push(header_line(&grid));
        for cells in &grid.rows {
            lines.push(row_line(state, cells));
        }

        lines
    }

    fn title_line(&self, state: &NavigationController) -> String {
        let title = format!("{}{}{}", style::Bold, state.display_year_month(), style::Reset);

        if self.nav {
            format!("  \u{2039} {} \u{203a}", title)
        } else {
            format!("    {}", title)
        }
    }
}

fn header_line(grid: &Grid) -> String {
    grid.header
        .iter()
        .map(|label| match label.class {
            "sun" => format!("{}{:>3}{} ", color::Fg(color::Red), label.text, color::Fg(color::Reset)),
            "sat" => format!("{}{:>3}{} ", color::Fg(color::Blue), label.text, color::Fg(color::Reset)),
            _ => format!("{}{:>3}{} ", color::Fg(color::Yellow), label.text, color::Fg(color::Reset)),
        })
        .collect()
}

fn row_line(state: &NavigationController, cells: &[DayCell]) -> String {
    cells
        .iter()
        .enumerate()
        .map(|(col, cell)| match cell {
            DayCell::Empty => "    ".to_owned(),
            DayCell::Day(day) => {
                let class = grid::cell_date(state.reference(), state.mode(), *cell, col)
                    .map(|date| grid::classify(date, state.reference(), state.today()))
                    .unwrap_or(CellClass::Plain);
                decorate(*day, class)
            }
        })
        .collect()
}

fn decorate(day: u32, class: CellClass) -> String {
    match class {
        CellClass::Selected => format!("{}{:>3}{} ", style::Invert, day, style::Reset),
        CellClass::Today => format!("{}{:>3}{} ", style::Bold, day, style::Reset),
        CellClass::Plain => format!("{:>3} ", day),
    }
}
