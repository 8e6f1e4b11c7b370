pub mod calendar;
pub mod control;

pub use calendar::{Direction, NavigationController};
pub use control::{Control, Controller};
