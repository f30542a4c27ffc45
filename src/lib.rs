#![cfg_attr(docsrs, feature(doc_cfg))]

#[macro_use]
extern crate lazy_static;

use camino::Utf8PathBuf;

pub mod commands;
pub use commands::Cli;
pub mod config;
pub use config::{Config, PauseOptions};
pub(crate) mod error;
pub use error::{Error, Result};
pub mod habit;
pub use habit::{Habit, HabitBuilder, HabitConfig, HabitInfo, HabitState, HabitStatus};
pub mod picker;
pub mod snapshot;
pub use snapshot::HabitSnapshot;
pub mod state;
pub use state::{State, StateModel};
pub mod util;

lazy_static! {
    pub static ref CONFIG_FILE_PATH: Utf8PathBuf = {
        let mut path = Utf8PathBuf::try_from(dirs::config_dir().unwrap()).unwrap();
        path.push("habit-widget.yaml");
        path
    };
    pub static ref CACHE_DIR: Utf8PathBuf = {
        let mut path = Utf8PathBuf::try_from(dirs::cache_dir().unwrap()).unwrap();
        path.push("habit-widget");
        path
    };
    pub static ref STATE_FILE_PATH: Utf8PathBuf = CACHE_DIR.join("state.yaml");
    pub static ref HISTORY_FILE_PATH: Utf8PathBuf = CACHE_DIR.join("history.jsonlines");
    pub static ref WIDGET_FILE_PATH: Utf8PathBuf = CACHE_DIR.join("widget.json");
}
