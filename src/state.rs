use crate::{
    CACHE_DIR, Error, Result, STATE_FILE_PATH,
    config::Config,
    habit::{Habit, HabitBuilder, HabitConfig, HabitState},
    util::{RcCell, dt_with_cutoff, now},
};
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs::{self, DirBuilder, OpenOptions},
};
use time::{Date, Duration, OffsetDateTime, Time};

/// Model of the way data is serialized in the state file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct StateModel {
    pub last_rollover: OffsetDateTime,
    pub habits: HashMap<String, RcCell<HabitState>>,
    pub featured: Option<String>,
}

impl Default for StateModel {
    fn default() -> Self {
        StateModel {
            last_rollover: now() - Duration::DAY,
            habits: HashMap::new(),
            featured: None,
        }
    }
}

impl StateModel {
    pub fn load() -> Result<Self> {
        if STATE_FILE_PATH.exists() {
            let data = fs::read(&*STATE_FILE_PATH)?;
            serde_norway::from_slice(&data).map_err(|e| e.into())
        } else {
            let model = Self::default();
            model.save()?;
            Ok(model)
        }
    }

    pub fn save(&self) -> Result<()> {
        DirBuilder::new().recursive(true).create(&*CACHE_DIR)?;
        let file = OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .open(&*STATE_FILE_PATH)?;
        serde_norway::to_writer(file, self).map_err(|e| e.into())
    }
}

#[derive(Debug)]
pub struct State {
    config: Config,
    model: StateModel,
    habits: HashMap<String, Habit>,
}

impl State {
    pub fn load() -> Result<Self> {
        let config = Config::load()?;
        let model = StateModel::load()?;
        Ok(Self::from_parts(config, model))
    }

    /// Joins the config and the state model into live [`Habit`] handles. A
    /// configured habit with no recorded state gets a fresh default cell;
    /// recorded state for a habit that is no longer configured is dropped.
    pub(crate) fn from_parts(config: Config, mut model: StateModel) -> Self {
        let mut habits = HashMap::new();
        for habit_config in config.habits() {
            let slug = String::from(habit_config.borrow().slug());
            let state = RcCell::clone(model.habits.entry(slug.clone()).or_default());
            habits.insert(slug, Habit::new_raw(RcCell::clone(habit_config), state));
        }
        model.habits.retain(|slug, _| {
            let known = habits.contains_key(slug);
            if !known {
                log::warn!("dropping recorded state for unknown habit {slug}");
            }
            known
        });
        Self {
            config,
            model,
            habits,
        }
    }

    pub fn save(&self) -> Result<()> {
        self.model.save()?;
        self.config.save()?;
        Ok(())
    }

    #[inline]
    pub fn get_habit<S: AsRef<str>>(&self, slug: S) -> Option<&Habit> {
        self.habits.get(slug.as_ref())
    }

    #[inline]
    pub fn habit_slugs(&self) -> Vec<String> {
        self.habits.keys().map(Clone::clone).collect()
    }

    #[inline]
    pub fn habits(&self) -> Vec<&Habit> {
        self.habits.values().collect()
    }

    pub fn add_habit(&mut self, mut habit_config: HabitConfig) -> Result<()> {
        habit_config.ensure_slug();
        let slug = String::from(habit_config.slug());
        let habit = Habit::new(habit_config, HabitState::default());
        self.config.add_habit(RcCell::clone(&habit.config))?;
        self.model
            .habits
            .insert(slug.clone(), RcCell::clone(&habit.state));
        self.habits.insert(slug, habit);
        Ok(())
    }

    pub fn add_habits<I>(&mut self, habits: I) -> Result<()>
    where
        I: IntoIterator<Item = HabitConfig>,
    {
        habits.into_iter().try_for_each(|h| self.add_habit(h))?;
        Ok(())
    }

    /// Applies the set fields of the builder to an existing habit. The slug
    /// must be set on the builder; it picks the habit and is never changed.
    pub fn update_habit(&self, builder: HabitBuilder) -> Result<()> {
        let slug = builder
            .slug
            .clone()
            .ok_or_else(|| Error::simple("a slug is required to update a habit"))?;
        if let Some(habit) = self.habits.get(&slug) {
            let mut borrowed = habit.config.borrow_mut();
            (*borrowed) += builder;
            Ok(())
        } else {
            Err(Error::habit_not_found(slug))
        }
    }

    pub fn upsert_habit(&mut self, builder: HabitBuilder) -> Result<()> {
        let slug = match (&builder.slug, &builder.habit) {
            (Some(slug), _) => slug.clone(),
            (None, Some(habit)) => slug::slugify(habit),
            (None, None) => {
                return Err(Error::simple("a slug or habit name is required to upsert"));
            }
        };
        if self.habits.contains_key(&slug) {
            self.update_habit(builder)
        } else {
            self.add_habit(builder.build()?)
        }
    }

    /// Merges a full config into an existing habit (non-default fields win),
    /// or adds it when the slug is new.
    pub fn upsert_config(&mut self, mut config: HabitConfig) -> Result<()> {
        config.ensure_slug();
        if let Some(habit) = self.habits.get(config.slug()) {
            let mut borrowed = habit.config.borrow_mut();
            (*borrowed) += config;
            Ok(())
        } else {
            self.add_habit(config)
        }
    }

    pub fn upsert_configs<I>(&mut self, configs: I) -> Result<()>
    where
        I: IntoIterator<Item = HabitConfig>,
    {
        configs.into_iter().try_for_each(|c| self.upsert_config(c))?;
        Ok(())
    }

    pub fn remove_habit<S: AsRef<str>>(&mut self, slug: S) -> Result<()> {
        let slug = slug.as_ref();
        if self.habits.remove(slug).is_some() {
            self.config.remove_habit(slug);
            self.model.habits.remove(slug);
            if self.model.featured.as_deref() == Some(slug) {
                self.model.featured = None;
            }
            Ok(())
        } else {
            Err(Error::habit_not_found(slug))
        }
    }

    pub fn remove_habits<I, S>(&mut self, slugs: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        slugs.into_iter().try_for_each(|s| self.remove_habit(s))?;
        Ok(())
    }

    pub fn complete_habit<S: AsRef<str>>(&self, slug: S) -> Result<()> {
        if let Some(habit) = self.habits.get(slug.as_ref()) {
            habit.complete(self.todays_date());
            Ok(())
        } else {
            Err(Error::habit_not_found(slug))
        }
    }

    pub fn complete_habits<I, S>(&self, slugs: I) -> Result<()>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = S>,
    {
        slugs.into_iter().try_for_each(|s| self.complete_habit(s))?;
        Ok(())
    }

    pub fn reset_habit<S: AsRef<str>>(&self, slug: S) -> Result<()> {
        if let Some(habit) = self.habits.get(slug.as_ref()) {
            habit.reset();
            Ok(())
        } else {
            Err(Error::habit_not_found(slug))
        }
    }

    pub fn reset_habits<I, S>(&self, slugs: I) -> Result<()>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = S>,
    {
        slugs.into_iter().try_for_each(|s| self.reset_habit(s))?;
        Ok(())
    }

    pub fn pause_habit<S: AsRef<str>>(&self, slug: S, until: Option<Date>) -> Result<()> {
        if let Some(habit) = self.habits.get(slug.as_ref()) {
            match until {
                Some(date) => habit.pause_until(date),
                None => habit.pause(),
            }
            Ok(())
        } else {
            Err(Error::habit_not_found(slug))
        }
    }

    pub fn pause_habits<I, S>(&self, slugs: I, until: Option<Date>) -> Result<()>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = S>,
    {
        slugs.into_iter().try_for_each(|s| self.pause_habit(s, until))?;
        Ok(())
    }

    pub fn resume_habit<S: AsRef<str>>(&self, slug: S) -> Result<()> {
        if let Some(habit) = self.habits.get(slug.as_ref()) {
            habit.resume();
            Ok(())
        } else {
            Err(Error::habit_not_found(slug))
        }
    }

    pub fn resume_habits<I, S>(&self, slugs: I) -> Result<()>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = S>,
    {
        slugs.into_iter().try_for_each(|s| self.resume_habit(s))?;
        Ok(())
    }

    #[inline]
    pub fn featured(&self) -> Option<&Habit> {
        self.model
            .featured
            .as_ref()
            .and_then(|slug| self.habits.get(slug))
    }

    #[inline]
    pub fn featured_slug(&self) -> Option<&str> {
        self.model.featured.as_deref()
    }

    pub fn set_featured(&mut self, slug: Option<String>) {
        self.model.featured = slug;
    }

    pub fn completed_habits(&self) -> Vec<&Habit> {
        self.habits.values().filter(|h| h.completed()).collect()
    }

    pub fn uncompleted_habits(&self) -> Vec<&Habit> {
        let today = self.todays_date();
        self.habits
            .values()
            .filter(|h| !h.completed() && !h.paused(today))
            .collect()
    }

    pub fn paused_habits(&self) -> Vec<&Habit> {
        let today = self.todays_date();
        self.habits.values().filter(|h| h.paused(today)).collect()
    }

    pub fn active_habits(&self) -> Vec<&Habit> {
        let today = self.todays_date();
        self.habits.values().filter(|h| !h.paused(today)).collect()
    }

    /// Whether every unpaused habit has been completed for the day.
    pub fn all_completed(&self) -> bool {
        let today = self.todays_date();
        let mut unpaused = self.habits.values().filter(|h| !h.paused(today)).peekable();
        unpaused.peek().is_some() && unpaused.all(|h| h.completed())
    }

    /// Returns the rollover date, with the configured cut-off taken into account.
    #[inline]
    pub fn last_rollover_date(&self) -> Date {
        dt_with_cutoff(&self.model.last_rollover, self.cut_off())
    }

    pub fn rollover_due(&self) -> bool {
        self.last_rollover_date() < self.todays_date()
    }

    /// Starts a new day: clears every completion flag and un-features the
    /// current habit so the picker can choose a fresh one.
    pub fn apply_rollover(&mut self) {
        log::info!("applying daily rollover");
        for habit in self.habits.values() {
            habit.reset();
        }
        self.model.featured = None;
        self.model.last_rollover = now();
    }
}

// Implements config delegates
impl State {
    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub fn cut_off(&self) -> Time {
        *self.config.cut_off()
    }

    #[inline]
    pub fn todays_date(&self) -> Date {
        self.config.today()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habit::HabitBuilder;
    use pretty_assertions::assert_eq;

    fn state_with(names: &[&str]) -> State {
        let mut state = State::from_parts(Config::default(), StateModel::default());
        for name in names {
            let config = HabitBuilder::default()
                .habit(String::from(*name))
                .build()
                .unwrap();
            state.add_habit(config).unwrap();
        }
        state
    }

    #[test]
    fn adding_a_duplicate_slug_errors() {
        let mut state = state_with(&["Read"]);
        let config = HabitBuilder::default()
            .habit(String::from("Read"))
            .build()
            .unwrap();
        assert!(matches!(
            state.add_habit(config),
            Err(Error::HabitAlreadyExists { .. })
        ));
    }

    #[test]
    fn completion_is_visible_through_every_handle() {
        let state = state_with(&["Read", "Run"]);
        state.complete_habit("read").unwrap();
        assert!(state.get_habit("read").unwrap().completed());
        assert!(!state.all_completed());
        state.complete_habit("run").unwrap();
        assert!(state.all_completed());
    }

    #[test]
    fn paused_habits_do_not_block_all_completed() {
        let state = state_with(&["Read", "Run"]);
        state.complete_habit("read").unwrap();
        state.pause_habit("run", None).unwrap();
        assert!(state.all_completed());
    }

    #[test]
    fn a_fresh_model_is_due_for_rollover() {
        let state = state_with(&[]);
        assert!(state.rollover_due());
    }

    #[test]
    fn rollover_resets_completion_and_featuring() {
        let mut state = state_with(&["Read"]);
        state.complete_habit("read").unwrap();
        state.set_featured(Some(String::from("read")));
        state.apply_rollover();
        assert!(!state.get_habit("read").unwrap().completed());
        assert_eq!(None, state.featured_slug());
        assert!(!state.rollover_due());
    }

    #[test]
    fn removing_the_featured_habit_clears_it() {
        let mut state = state_with(&["Read"]);
        state.set_featured(Some(String::from("read")));
        state.remove_habit("read").unwrap();
        assert_eq!(None, state.featured_slug());
        assert!(state.habits().is_empty());
    }

    #[test]
    fn joining_drops_state_for_unknown_habits() {
        let mut model = StateModel::default();
        model
            .habits
            .insert(String::from("gone"), RcCell::new(HabitState::default()));
        let state = State::from_parts(Config::default(), model);
        assert!(state.habits().is_empty());
        assert!(state.model.habits.is_empty());
    }

    #[test]
    fn upsert_adds_then_updates() {
        let mut state = state_with(&[]);
        let mut builder = HabitBuilder::default();
        builder.habit(String::from("Drink Water"));
        state.upsert_habit(builder).unwrap();
        assert!(state.get_habit("drink-water").is_some());

        let mut builder = HabitBuilder::default();
        builder.slug(String::from("drink-water"));
        builder.weight(4.0);
        state.upsert_habit(builder).unwrap();
        assert_eq!(4.0, state.get_habit("drink-water").unwrap().weight());
    }
}
