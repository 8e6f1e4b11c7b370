pub mod app;
pub mod calview;

pub use app::App;
pub use calview::CalendarView;
