pub mod cmds;
pub mod config;
pub mod control;
pub mod date;
pub mod error;
pub mod events;
pub mod grid;
pub mod picker;
pub mod ui;

pub use control::{Direction, NavigationController};
pub use grid::{CellClass, DayCell, Grid, ViewMode, WeekdayLabel};
