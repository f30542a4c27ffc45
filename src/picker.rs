use crate::{Result, state::State};
use rand::{SeedableRng as _, rngs::SmallRng, seq::IndexedRandom};

/// Picks the habit the widget should feature, weighted by each habit's
/// configured weight. Returns `None` when no habit is featureable today.
pub fn pick_featured(state: &State) -> Result<Option<String>> {
    let today = state.todays_date();
    let candidates: Vec<_> = state
        .habits()
        .into_iter()
        .filter(|h| h.featureable(today))
        .collect();
    if candidates.is_empty() {
        log::warn!("no habit is featureable today");
        return Ok(None);
    }
    let mut rng = SmallRng::from_os_rng();
    let chosen = candidates.choose_weighted(&mut rng, |h| h.weight())?;
    log::info!("featuring habit {}", chosen.slug());
    Ok(Some(String::from(chosen.slug())))
}

/// Makes sure the state has a current featured habit: applies the daily
/// rollover when one is due and re-picks when nothing (or a habit that has
/// since been paused or removed) is featured.
pub fn ensure_featured(state: &mut State) -> Result<()> {
    if state.rollover_due() {
        state.apply_rollover();
    }
    let today = state.todays_date();
    let stale = match state.featured() {
        None => true,
        Some(habit) => habit.paused(today),
    };
    if stale {
        let featured = pick_featured(state)?;
        state.set_featured(featured);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Config, habit::HabitBuilder, state::StateModel};
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
    fn nothing_to_pick_from_an_empty_state() {
        let state = state_with(&[]);
        assert_eq!(None, pick_featured(&state).unwrap());
    }

    #[test]
    fn a_single_habit_is_always_picked() {
        let state = state_with(&["Read"]);
        assert_eq!(Some(String::from("read")), pick_featured(&state).unwrap());
    }

    #[test]
    fn paused_habits_are_never_picked() {
        let state = state_with(&["Read", "Run"]);
        state.pause_habit("run", None).unwrap();
        assert_eq!(Some(String::from("read")), pick_featured(&state).unwrap());
    }

    #[test]
    fn ensure_featured_fills_and_then_keeps_the_slot() {
        let mut state = state_with(&["Read"]);
        ensure_featured(&mut state).unwrap();
        assert_eq!(Some("read"), state.featured_slug());
        // A second pass right away leaves the pick alone.
        ensure_featured(&mut state).unwrap();
        assert_eq!(Some("read"), state.featured_slug());
    }

    #[test]
    fn pausing_the_featured_habit_forces_a_repick() {
        let mut state = state_with(&["Read", "Run"]);
        ensure_featured(&mut state).unwrap();
        let first = String::from(state.featured_slug().unwrap());
        state.pause_habit(&first, None).unwrap();
        ensure_featured(&mut state).unwrap();
        assert_ne!(Some(first.as_str()), state.featured_slug());
    }
}
