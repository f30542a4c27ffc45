use serde::{Deserialize, Serialize};
use time::Date;

/// The per-habit half of the state file: what happened to the habit, as
/// opposed to how it is configured.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct HabitState {
    pub completed: bool,
    #[serde(default)]
    pub times_completed: u32,
    #[serde(default, skip_serializing_if = "std::option::Option::is_none")]
    pub last_completed: Option<Date>,
}

impl HabitState {
    pub fn reset(&mut self) {
        self.completed = false;
    }

    pub fn complete(&mut self, today: Date) {
        if !self.completed {
            self.times_completed += 1;
        }
        self.completed = true;
        self.last_completed = Some(today);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use time::macros::date;

    #[test]
    fn completing_records_the_date_and_counts_once() {
        let mut state = HabitState::default();
        state.complete(date!(2026 - 08 - 06));
        state.complete(date!(2026 - 08 - 06));
        assert!(state.completed);
        assert_eq!(1, state.times_completed);
        assert_eq!(Some(date!(2026 - 08 - 06)), state.last_completed);
    }

    #[test]
    fn reset_clears_the_flag_but_keeps_history() {
        let mut state = HabitState::default();
        state.complete(date!(2026 - 08 - 05));
        state.reset();
        assert!(!state.completed);
        assert_eq!(1, state.times_completed);
        assert_eq!(Some(date!(2026 - 08 - 05)), state.last_completed);
    }
}
