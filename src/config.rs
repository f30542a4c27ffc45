use crate::{CONFIG_FILE_PATH, Error, Result, habit::HabitConfig, util::{RcCell, now_with_cutoff}};
use getset::Getters;
use serde::{Deserialize, Serialize};
use std::{
    cell::OnceCell,
    collections::HashMap,
    fs::{self, OpenOptions},
};
use strum::EnumIs;
use time::{Date, Time, macros::time};

lazy_static! {
    pub static ref DEFAULT_CUT_OFF: Time = time!(04:00);
}

#[derive(Debug, Clone, Serialize, Deserialize, Getters)]
#[serde(rename_all = "kebab-case")]
#[getset(get = "pub")]
pub struct Config {
    #[serde(default)]
    habits: Vec<RcCell<HabitConfig>>,
    cut_off: Time,
    #[serde(skip)]
    #[getset(skip)]
    // We want this to be a OnceCell just in case we pass the cut-off while running.
    effective_date: OnceCell<Date>,
    #[serde(skip)]
    #[getset(skip)]
    habits_map: HashMap<String, RcCell<HabitConfig>>,
}

impl Config {
    pub fn save(&self) -> Result<()> {
        log::debug!("saving config to {}", &*CONFIG_FILE_PATH);
        let file = OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .open(&*CONFIG_FILE_PATH)?;
        serde_norway::to_writer(file, self)?;
        Ok(())
    }

    pub fn load() -> Result<Self> {
        let mut config = if CONFIG_FILE_PATH.exists() {
            let data = fs::read(&*CONFIG_FILE_PATH)?;
            serde_norway::from_slice(&data)?
        } else {
            let config = Self::default();
            config.save()?;
            config
        };
        for habit in config.habits.iter() {
            habit.borrow_mut().ensure_slug();
        }
        config.habits_map = config
            .habits
            .iter()
            .map(|h| (String::from(h.borrow().slug()), RcCell::clone(h)))
            .collect();
        Ok(config)
    }

    pub(crate) fn add_habit(&mut self, habit: RcCell<HabitConfig>) -> Result<()> {
        let slug = String::from(habit.borrow().slug());
        if self.contains_habit(&slug) {
            Err(Error::habit_already_exists(slug))
        } else {
            self.habits.push(RcCell::clone(&habit));
            self.habits_map.insert(slug, habit);
            Ok(())
        }
    }

    pub(crate) fn remove_habit<S: AsRef<str>>(&mut self, slug: S) {
        let slug = slug.as_ref();
        self.habits.retain(|h| h.borrow().slug() != slug);
        self.habits_map.remove(slug);
    }

    #[inline]
    pub fn contains_habit<S: AsRef<str>>(&self, slug: S) -> bool {
        self.habits_map.contains_key(slug.as_ref())
    }

    pub fn get_habit<S: AsRef<str>>(&self, slug: S) -> Option<RcCell<HabitConfig>> {
        self.habits_map.get(slug.as_ref()).cloned()
    }

    /// What today's date should be considered, taken the config's cut-off time.
    pub fn today(&self) -> Date {
        *self
            .effective_date
            .get_or_init(|| now_with_cutoff(self.cut_off))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            habits: Vec::new(),
            habits_map: HashMap::new(),
            cut_off: *DEFAULT_CUT_OFF,
            effective_date: OnceCell::new(),
        }
    }
}

/// Whether a habit takes part in featuring and completion. Paused habits stay
/// configured but are skipped by the picker and listed as paused.
#[derive(Debug, Clone, Serialize, Deserialize, Default, EnumIs, PartialEq)]
pub enum PauseOptions {
    Until(Date),
    Paused,
    #[default]
    Active,
}

impl From<bool> for PauseOptions {
    fn from(value: bool) -> Self {
        if value { Self::Paused } else { Self::Active }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn pause_options_from_bool() {
        assert_eq!(PauseOptions::Paused, PauseOptions::from(true));
        assert_eq!(PauseOptions::Active, PauseOptions::from(false));
        assert!(PauseOptions::Active.is_active());
        assert!(!PauseOptions::Paused.is_active());
    }

    #[test]
    fn default_config_round_trips_as_yaml() {
        let config = Config::default();
        let rendered = serde_norway::to_string(&config).unwrap();
        let parsed: Config = serde_norway::from_str(&rendered).unwrap();
        assert_eq!(config.cut_off(), parsed.cut_off());
        assert!(parsed.habits().is_empty());
    }
}
