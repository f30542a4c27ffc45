use crate::{config::PauseOptions, snapshot::HabitSnapshot, util::RcCell};
use serde::Serialize;
use time::Date;

mod config;
mod state;
pub use config::*;
pub use state::*;

pub const DEFAULT_WEIGHT: f64 = 1.0;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, strum::Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum HabitStatus {
    Paused,
    Done,
    Featured,
    Pending,
}

/// The detail document printed by `habits details`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct HabitInfo {
    pub habit: String,
    pub status: HabitStatus,
    #[serde(skip)]
    pub slug: String,
    #[serde(skip_serializing_if = "std::option::Option::is_none")]
    pub description: Option<String>,
    pub weight: f64,
    pub times_completed: u32,
    #[serde(skip_serializing_if = "std::option::Option::is_none")]
    pub last_completed: Option<Date>,
    #[serde(skip_serializing_if = "PauseOptions::is_active")]
    pub paused: PauseOptions,
    #[serde(skip_serializing_if = "std::vec::Vec::is_empty")]
    pub tags: Vec<String>,
}

/// A configured habit joined with its tracked state. The two cells are shared
/// with the [`crate::Config`] and [`crate::StateModel`] they were loaded from.
#[derive(Debug)]
pub struct Habit {
    slug: String,
    pub(crate) config: RcCell<HabitConfig>,
    pub(crate) state: RcCell<HabitState>,
}

macro_rules! impl_habit_config_getters {
    ($($name:ident: $type:ty,)+) => {
        impl Habit {
        $(
            #[inline(always)]
            pub fn $name(&self) -> $type {
                self.config.borrow().$name().clone()
            }
        )*
        }
    }
}

impl_habit_config_getters! {
    habit: String,
    description: Option<String>,
    weight: f64,
    tags: Vec<String>,
}

macro_rules! impl_habit_state_getters {
    ($($name:ident: $type:ty,)+) => {
        impl Habit {
        $(
            #[inline(always)]
            pub fn $name(&self) -> $type {
                self.state.borrow().$name.clone()
            }
        )*
        }
    }
}

impl_habit_state_getters! {
    completed: bool,
    times_completed: u32,
    last_completed: Option<Date>,
}

impl Habit {
    pub(crate) fn new_raw(config: RcCell<HabitConfig>, state: RcCell<HabitState>) -> Self {
        let slug = String::from(config.borrow().slug());
        Self {
            slug,
            config,
            state,
        }
    }

    pub(crate) fn new(config: HabitConfig, state: HabitState) -> Self {
        Self {
            slug: String::from(config.slug()),
            config: RcCell::new(config),
            state: RcCell::new(state),
        }
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn reset(&self) {
        self.state.borrow_mut().reset();
    }

    pub fn complete(&self, today: Date) {
        self.state.borrow_mut().complete(today);
    }

    pub fn pause(&self) {
        self.config.borrow_mut().pause();
    }

    pub fn pause_until(&self, date: Date) {
        self.config.borrow_mut().pause_until(date);
    }

    pub fn resume(&self) {
        self.config.borrow_mut().resume();
    }

    pub fn paused(&self, today: Date) -> bool {
        match self.config.borrow().paused {
            PauseOptions::Active => false,
            PauseOptions::Paused => true,
            PauseOptions::Until(until) => until >= today,
        }
    }

    /// Returns `true` if the habit can be featured on the widget today.
    pub fn featureable(&self, today: Date) -> bool {
        !self.paused(today)
    }

    /// The document the widget host renders for this habit.
    pub fn snapshot(&self) -> HabitSnapshot {
        HabitSnapshot::new(self.habit(), self.completed())
    }

    pub fn status(&self, today: Date, featured: bool) -> HabitStatus {
        if self.paused(today) {
            HabitStatus::Paused
        } else if self.completed() {
            HabitStatus::Done
        } else if featured {
            HabitStatus::Featured
        } else {
            HabitStatus::Pending
        }
    }

    pub fn info(&self, today: Date, featured: bool) -> HabitInfo {
        let config = self.config.borrow();
        let state = self.state.borrow();
        HabitInfo {
            slug: self.slug.clone(),
            status: self.status(today, featured),
            habit: config.habit.clone(),
            description: config.description.clone(),
            weight: config.weight,
            times_completed: state.times_completed,
            last_completed: state.last_completed,
            paused: config.paused.clone(),
            tags: config.tags.clone(),
        }
    }
}
