use crate::cmds::Cmd;
use crate::error::{Error, ErrorKind};
use crate::grid::{self, ViewMode};

use serde::Deserialize;
use std::collections::HashMap;
use std::convert::TryFrom;
use std::env;
use std::fs;
use std::io;
use std::iter::FromIterator;
use std::path::{Path, PathBuf};
use std::time::Duration;

use termion::event::Key;

pub type KeyMap = HashMap<Key, Cmd>;

const CONFIG_PATH_ENV_VAR: &str = "DATEGRID_CONFIG_FILE";

pub(crate) fn find_configfile_locations() -> io::Result<Vec<PathBuf>> {
    let config_env: Option<PathBuf> = if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        Some(PathBuf::from(path))
    } else {
        None
    };

    let home = if let Ok(dir) = env::var("HOME") {
        PathBuf::from(dir)
    } else {
        return Err(io::Error::new(
            io::ErrorKind::Other,
            "Unable to find home directory",
        ));
    };

    let home_config = PathBuf::from_iter([&home, &PathBuf::from(".dategrid.toml")].iter());

    let config_xdg = if let Ok(dir) = env::var("XDG_CONFIG_HOME") {
        PathBuf::from_iter([dir, "dategrid".to_string(), "config.toml".to_string()].iter())
    } else {
        PathBuf::from_iter(
            [
                home.as_path(),
                Path::new(".config"),
                Path::new("dategrid"),
                Path::new("config.toml"),
            ]
            .iter(),
        )
    };

    let mut locations = vec![config_xdg, home_config];

    if let Some(path) = config_env {
        locations.insert(0, path);
    }

    Ok(locations)
}

#[derive(Debug, Clone)]
pub struct Config {
    pub nav: bool,
    pub view: ViewMode,
    pub active_start_date: Option<String>,
    pub day_txt: [String; 7],
    pub tick_rate: Duration,
    pub key_map: KeyMap,
}

impl Default for Config {
    fn default() -> Config {
        let mut config = Config {
            nav: true,
            view: ViewMode::default(),
            active_start_date: None,
            day_txt: grid::default_day_txt(),
            tick_rate: Duration::from_millis(500),
            key_map: HashMap::new(),
        };

        config.key_map.insert(Key::Char('h'), Cmd::PrevDay);
        config.key_map.insert(Key::Char('l'), Cmd::NextDay);
        config.key_map.insert(Key::Char('k'), Cmd::PrevWeek);
        config.key_map.insert(Key::Char('j'), Cmd::NextWeek);
        config.key_map.insert(Key::Left, Cmd::PrevUnit);
        config.key_map.insert(Key::Right, Cmd::NextUnit);
        config.key_map.insert(Key::Char('t'), Cmd::Today);
        config.key_map.insert(Key::Char('q'), Cmd::Exit);

        config
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Config, Error> {
        let raw: ConfigFile = toml::from_str(&fs::read_to_string(path)?)?;
        Config::try_from(raw)
    }
}

/// Raw TOML shape; converted into [`Config`] with defaults filled in.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    nav: Option<bool>,
    view: Option<ViewMode>,
    active_start_date: Option<String>,
    day_txt: Option<Vec<String>>,
    tick_rate_ms: Option<u64>,
    keys: Option<HashMap<String, String>>,
}

impl TryFrom<ConfigFile> for Config {
    type Error = Error;

    fn try_from(raw: ConfigFile) -> Result<Config, Error> {
        let mut config = Config::default();

        if let Some(nav) = raw.nav {
            config.nav = nav;
        }
        if let Some(view) = raw.view {
            config.view = view;
        }
        if let Some(date) = raw.active_start_date {
            config.active_start_date = Some(date);
        }
        if let Some(day_txt) = raw.day_txt {
            config.day_txt = <[String; 7]>::try_from(day_txt).map_err(|txt| {
                Error::new(
                    ErrorKind::ConfigParse,
                    format!("day_txt needs exactly 7 entries, got {}", txt.len()).as_str(),
                )
            })?;
        }
        if let Some(ms) = raw.tick_rate_ms {
            config.tick_rate = Duration::from_millis(ms);
        }
        if let Some(keys) = raw.keys {
            for (key, cmd) in &keys {
                config.key_map.insert(parse_key(key)?, parse_cmd(cmd)?);
            }
        }

        Ok(config)
    }
}

fn parse_key(name: &str) -> Result<Key, Error> {
    let mut chars = name.chars();

    match (chars.next(), chars.next()) {
        (Some(c), None) => return Ok(Key::Char(c)),
        _ => {}
    }

    match name {
        "left" => Ok(Key::Left),
        "right" => Ok(Key::Right),
        "up" => Ok(Key::Up),
        "down" => Ok(Key::Down),
        "esc" => Ok(Key::Esc),
        "backspace" => Ok(Key::Backspace),
        "enter" => Ok(Key::Char('\n')),
        "space" => Ok(Key::Char(' ')),
        _ => Err(Error::new(
            ErrorKind::ConfigParse,
            format!("unknown key '{}'", name).as_str(),
        )),
    }
}

fn parse_cmd(name: &str) -> Result<Cmd, Error> {
    match name {
        "prev-day" => Ok(Cmd::PrevDay),
        "next-day" => Ok(Cmd::NextDay),
        "prev-week" => Ok(Cmd::PrevWeek),
        "next-week" => Ok(Cmd::NextWeek),
        "prev" => Ok(Cmd::PrevUnit),
        "next" => Ok(Cmd::NextUnit),
        "today" => Ok(Cmd::Today),
        "quit" => Ok(Cmd::Exit),
        _ => Err(Error::new(
            ErrorKind::ConfigParse,
            format!("unknown command '{}'", name).as_str(),
        )),
    }
}

pub fn load_suitable_config(hint: Option<&Path>) -> Result<Config, Error> {
    if let Some(path) = hint {
        return Config::load(path);
    }

    for location in find_configfile_locations()? {
        if location.exists() {
            log::debug!("loading config from {}", location.display());
            return Config::load(&location);
        }
    }

    Ok(Config::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_keeps_widget_defaults() {
        let config = Config::default();

        assert!(config.nav);
        assert_eq!(config.view, ViewMode::Month);
        assert_eq!(config.day_txt[0], "sun");
        assert_eq!(config.day_txt[6], "sat");
        assert_eq!(config.key_map.get(&Key::Char('q')), Some(&Cmd::Exit));
    }

    #[test]
    fn toml_overrides_are_applied() {
        let raw: ConfigFile = toml::from_str(
            r#"
            nav = false
            view = "week"
            active_start_date = "2024-03-01"
            day_txt = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"]

            [keys]
            n = "next"
            p = "prev"
            left = "prev-day"
            "#,
        )
        .unwrap();
        let config = Config::try_from(raw).unwrap();

        assert!(!config.nav);
        assert_eq!(config.view, ViewMode::Week);
        assert_eq!(config.active_start_date.as_deref(), Some("2024-03-01"));
        assert_eq!(config.day_txt[1], "Mo");
        assert_eq!(config.key_map.get(&Key::Char('n')), Some(&Cmd::NextUnit));
        assert_eq!(config.key_map.get(&Key::Left), Some(&Cmd::PrevDay));
    }

    #[test]
    fn wrong_day_txt_length_is_rejected() {
        let raw: ConfigFile = toml::from_str(r#"day_txt = ["a", "b"]"#).unwrap();
        assert!(Config::try_from(raw).is_err());
    }

    #[test]
    fn unknown_key_or_cmd_is_rejected() {
        assert!(parse_key("superkey").is_err());
        assert!(parse_cmd("launch-missiles").is_err());
        assert_eq!(parse_key("g").unwrap(), Key::Char('g'));
        assert_eq!(parse_cmd("today").unwrap(), Cmd::Today);
    }
}
