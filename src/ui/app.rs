use std::io::{self, Write};

use termion::event::Key;

use crate::cmds::Cmd;
use crate::config::Config;
use crate::control::{Control, Controller, NavigationController};
use crate::events::{Dispatcher, Event};
use crate::grid::ViewMode;
use crate::picker::{StubPicker, YearMonthPicker};
use crate::ui::CalendarView;

pub struct App<'a> {
    config: &'a Config,
    controller: Controller<'a, NavigationController>,
    picker: StubPicker,
    view: CalendarView,
    quit: bool,
}

impl<'a> App<'a> {
    pub fn new(config: &'a Config, navigation: NavigationController, picker: StubPicker) -> App<'a> {
        let view = CalendarView::new(config.nav);

        App {
            config,
            controller: Controller::new(&config.key_map, navigation),
            picker,
            view,
            quit: false,
        }
    }

    pub fn run<W: Write>(&mut self, dispatcher: Dispatcher, out: &mut W) -> io::Result<()> {
        self.sync_picker();

        while !self.quit {
            self.draw(out)?;

            match dispatcher.next() {
                Ok(Event::Tick) => self.controller.inner_mut().refresh_today(),
                Ok(Event::Input(key)) => self.handle_key(key),
                Ok(Event::PickerChange(year_month)) => {
                    // The picker suppresses jumps while disabled; one that
                    // still arrives is accepted at face value.
                    let _ = self
                        .controller
                        .inner_mut()
                        .send_cmd(&Cmd::JumpYearMonth(year_month));
                }
                Err(_) => break,
            }

            self.sync_picker();
        }

        Ok(())
    }

    /// One frame to `out` without raw-mode bookkeeping.
    pub fn show<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        self.sync_picker();

        for line in self.render() {
            writeln!(out, "{}", line)?;
        }

        Ok(())
    }

    fn render(&self) -> Vec<String> {
        self.view.render(self.controller.inner(), &self.config.day_txt)
    }

    fn draw<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{}", termion::clear::All)?;

        for (idx, line) in self.render().iter().enumerate() {
            write!(out, "{}{}", termion::cursor::Goto(1, idx as u16 + 1), line)?;
        }

        out.flush()
    }

    fn handle_key(&mut self, key: Key) {
        match key {
            Key::Char('[') => self.picker.retreat(),
            Key::Char(']') => self.picker.advance(),
            _ => match self.controller.handle(Event::Input(key)) {
                Ok(Cmd::Exit) => self.quit = true,
                Ok(_) => {}
                Err(err) => log::debug!("{}", err),
            },
        }
    }

    // Pushes the current year-month into the picker and disables it while in
    // week mode, mirroring the external control's disablement policy.
    fn sync_picker(&mut self) {
        let selected = self.controller.inner().display_year_month();
        let disabled = self.controller.inner().mode() == ViewMode::Week;

        self.picker.set_selected(&selected);
        self.picker.set_disabled(disabled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::sync::mpsc;

    fn app(config: &Config, mode: ViewMode) -> (App<'_>, mpsc::Receiver<Event>) {
        let today = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
        let navigation = NavigationController::with_today(mode, Some("2024-05-10"), today);

        let (tx, rx) = mpsc::channel();
        (App::new(config, navigation, StubPicker::new(tx)), rx)
    }

    #[test]
    fn mapped_keys_drive_the_controller() {
        let config = Config::default();
        let (mut app, _rx) = app(&config, ViewMode::Month);

        app.handle_key(Key::Right);
        assert_eq!(app.controller.inner().display_year_month(), "2024-06");

        app.handle_key(Key::Char('q'));
        assert!(app.quit);
    }

    #[test]
    fn picker_is_disabled_in_week_mode() {
        let config = Config::default();
        let (mut app, rx) = app(&config, ViewMode::Week);
        app.sync_picker();

        app.handle_key(Key::Char(']'));

        assert!(app.picker.disabled());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn picker_jump_follows_the_reference_month() {
        let config = Config::default();
        let (mut app, rx) = app(&config, ViewMode::Month);
        app.sync_picker();

        app.handle_key(Key::Char(']'));

        match rx.try_recv() {
            Ok(Event::PickerChange(year_month)) => assert_eq!(year_month, "2024-06"),
            _ => panic!("expected a picker jump"),
        }
    }
}
