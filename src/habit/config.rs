use super::DEFAULT_WEIGHT;
use crate::config::PauseOptions;
use derive_builder::Builder;
use getset::Getters;
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;
use time::Date;

#[inline]
fn get_default_slug<S: AsRef<str>>(habit: S) -> String {
    slug::slugify(habit.as_ref())
}

#[inline]
fn default_weight() -> f64 {
    DEFAULT_WEIGHT
}

#[derive(Debug, Clone, Serialize, Deserialize, Builder, Getters)]
#[serde(rename_all = "kebab-case")]
#[builder(name = "HabitBuilder", field(public), build_fn(error = "crate::Error"))]
#[getset(get = "pub")]
pub struct HabitConfig {
    /// The display name the widget shows.
    pub habit: String,
    #[builder(default = "self.default_slug()")]
    #[serde(default)]
    #[getset(skip)]
    slug: String,
    #[builder(default)]
    #[serde(default, skip_serializing_if = "std::option::Option::is_none")]
    pub description: Option<String>,
    #[builder(default = "DEFAULT_WEIGHT")]
    #[serde(default = "default_weight")]
    pub weight: f64,
    #[builder(default)]
    #[serde(default, skip_serializing_if = "PauseOptions::is_active")]
    pub paused: PauseOptions,
    #[builder(default)]
    #[serde(default, skip_serializing_if = "std::vec::Vec::is_empty")]
    pub tags: Vec<String>,
}

impl HabitBuilder {
    #[inline]
    fn default_slug(&self) -> String {
        get_default_slug(self.habit.as_ref().unwrap())
    }
}

impl HabitConfig {
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Documents read from disk may omit the slug; fall back to slugifying
    /// the display name, as the builder does.
    pub(crate) fn ensure_slug(&mut self) {
        if self.slug.is_empty() {
            self.slug = get_default_slug(&self.habit);
        }
    }

    pub fn resume(&mut self) {
        self.paused = PauseOptions::Active;
    }

    pub fn pause(&mut self) {
        self.paused = PauseOptions::Paused;
    }

    pub fn pause_until(&mut self, date: Date) {
        self.paused = PauseOptions::Until(date);
    }

    /// Takes the values from the `other` argument, and overrides the values in this struct as long
    /// as the value in the other struct is not the default value. **Note**: the `slug` property is
    /// never overwritten.
    pub(crate) fn merge(&mut self, other: Self) {
        if !other.habit.is_empty() {
            self.habit = other.habit;
        }
        if let Some(description) = other.description
            && !description.is_empty()
        {
            self.description = Some(description);
        }
        if other.weight != DEFAULT_WEIGHT {
            self.weight = other.weight;
        }
        if other.paused != PauseOptions::Active {
            self.paused = other.paused;
        }
        for tag in other.tags.into_iter() {
            if !self.tags.contains(&tag) {
                self.tags.push(tag);
            }
        }
    }

    /// Applies only the fields that were explicitly set on the builder. As
    /// with [`HabitConfig::merge`], the `slug` is never overwritten.
    pub fn update(&mut self, other: HabitBuilder) {
        if let Some(habit) = other.habit {
            self.habit = habit;
        }
        if let Some(description) = other.description {
            self.description = description;
        }
        if let Some(weight) = other.weight {
            self.weight = weight;
        }
        if let Some(paused) = other.paused {
            self.paused = paused;
        }
        if let Some(tags) = other.tags {
            for tag in tags.into_iter() {
                if !self.tags.contains(&tag) {
                    self.tags.push(tag);
                }
            }
        }
    }
}

impl AddAssign for HabitConfig {
    fn add_assign(&mut self, other: Self) {
        self.merge(other);
    }
}

impl AddAssign<HabitBuilder> for HabitConfig {
    fn add_assign(&mut self, other: HabitBuilder) {
        self.update(other);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn slug_defaults_to_the_slugified_name() {
        let config = HabitBuilder::default()
            .habit(String::from("Drink Water"))
            .build()
            .unwrap();
        assert_eq!("drink-water", config.slug());
    }

    #[test]
    fn explicit_slug_wins_over_the_default() {
        let config = HabitBuilder::default()
            .habit(String::from("Drink Water"))
            .slug(String::from("hydrate"))
            .build()
            .unwrap();
        assert_eq!("hydrate", config.slug());
    }

    #[test]
    fn building_without_a_name_errors() {
        assert!(HabitBuilder::default().build().is_err());
    }

    #[test]
    fn merge_keeps_the_slug_and_takes_non_defaults() {
        let mut config = HabitBuilder::default()
            .habit(String::from("Read"))
            .build()
            .unwrap();
        let mut other = HabitBuilder::default()
            .habit(String::from("Read a chapter"))
            .slug(String::from("ignored"))
            .weight(2.5)
            .tags(vec![String::from("evening")])
            .build()
            .unwrap();
        other.pause();
        config += other;
        assert_eq!("read", config.slug());
        assert_eq!("Read a chapter", config.habit);
        assert_eq!(2.5, config.weight);
        assert_eq!(PauseOptions::Paused, config.paused);
        assert_eq!(vec![String::from("evening")], config.tags);
    }

    #[test]
    fn update_applies_only_set_fields() {
        let mut config = HabitBuilder::default()
            .habit(String::from("Read"))
            .weight(3.0)
            .build()
            .unwrap();
        let mut builder = HabitBuilder::default();
        builder.description(Some(String::from("twenty minutes")));
        config += builder;
        assert_eq!("Read", config.habit);
        assert_eq!(3.0, config.weight);
        assert_eq!(Some(String::from("twenty minutes")), config.description);
    }
}
