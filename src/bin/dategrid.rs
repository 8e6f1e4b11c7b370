extern crate dategrid as lib;

use flexi_logger::{FileSpec, Logger};
use lib::config;
use lib::control::NavigationController;
use lib::events::Dispatcher;
use lib::grid::ViewMode;
use lib::picker::StubPicker;
use lib::ui::App;
use std::io::stdout;
use std::path::PathBuf;
use structopt::StructOpt;
use termion::raw::IntoRawMode;
use termion::screen::AlternateScreen;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "dategrid",
    about = "An embeddable week/month date-selection grid for the terminal."
)]
pub struct Args {
    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(short = "v", long = "view", help = "initial view mode (week|month)")]
    pub view: Option<ViewMode>,

    #[structopt(short = "d", long = "date", help = "initial reference date (YYYY-MM-DD)")]
    pub date: Option<String>,

    #[structopt(
        short = "s",
        long = "show",
        help = "only show calendar non-interactively"
    )]
    pub show: bool,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &'static str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    let mut logger = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?;

    if let Some(log_file) = args.log_file {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file)?)
            .print_message();
    }

    logger.start()?;

    let mut config = config::load_suitable_config(args.configfile.as_deref())?;

    if let Some(view) = args.view {
        config.view = view;
    }
    if let Some(date) = args.date {
        config.active_start_date = Some(date);
    }

    let mut navigation = NavigationController::new(config.view, config.active_start_date.as_deref());
    navigation.on_change(|date| log::info!("selected {}", date));

    let dispatcher = Dispatcher::from_config(&config);
    let picker = StubPicker::new(dispatcher.event_sink().clone());

    let mut app = App::new(&config, navigation, picker);

    if args.show {
        let mut stdout = stdout();
        app.show(&mut stdout)?;
    } else {
        let stdout = stdout().into_raw_mode()?;
        let mut screen = AlternateScreen::from(stdout);
        app.run(dispatcher, &mut screen)?;
    }

    Ok(())
}
