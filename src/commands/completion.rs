use crate::{Config, Habit, State};
use clap_complete::CompletionCandidate;
use std::ffi::OsStr;

// Completion callbacks run outside the normal error path; on any load
// failure they return no candidates instead of interrupting the shell.

/// Slug/help pairs matching `current`, exact matches first, then prefix
/// matches, then substring matches, alphabetical within each rank.
fn ranked_matches<I>(current: &str, habits: I) -> Vec<(String, String)>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut matches: Vec<_> = habits
        .into_iter()
        .filter_map(|(slug, help)| {
            let rank = if slug == current {
                0
            } else if slug.starts_with(current) {
                1
            } else if slug.contains(current) {
                2
            } else {
                return None;
            };
            Some((rank, slug, help))
        })
        .collect();
    matches.sort();
    matches
        .into_iter()
        .map(|(_, slug, help)| (slug, help))
        .collect()
}

fn filter_candidates<I>(current: &OsStr, habits: I) -> Vec<CompletionCandidate>
where
    I: IntoIterator<Item = (String, String)>,
{
    let Some(current) = current.to_str() else {
        return Vec::new();
    };
    ranked_matches(current, habits)
        .into_iter()
        .enumerate()
        .map(|(order, (slug, help))| {
            CompletionCandidate::new(slug)
                .display_order(Some(order))
                .help(Some(help.into()))
        })
        .collect()
}

fn from_habits(current: &OsStr, habits: Vec<&Habit>) -> Vec<CompletionCandidate> {
    filter_candidates(
        current,
        habits
            .into_iter()
            .map(|h| (String::from(h.slug()), h.habit())),
    )
}

pub(crate) fn all_habits(current: &OsStr) -> Vec<CompletionCandidate> {
    let Ok(config) = Config::load() else {
        return Vec::new();
    };
    filter_candidates(
        current,
        config
            .habits()
            .iter()
            .map(|h| (String::from(h.borrow().slug()), h.borrow().habit.clone())),
    )
}

pub(crate) fn uncompleted_habits(current: &OsStr) -> Vec<CompletionCandidate> {
    let Ok(state) = State::load() else {
        return Vec::new();
    };
    from_habits(current, state.uncompleted_habits())
}

pub(crate) fn completed_habits(current: &OsStr) -> Vec<CompletionCandidate> {
    let Ok(state) = State::load() else {
        return Vec::new();
    };
    from_habits(current, state.completed_habits())
}

pub(crate) fn paused_habits(current: &OsStr) -> Vec<CompletionCandidate> {
    let Ok(state) = State::load() else {
        return Vec::new();
    };
    from_habits(current, state.paused_habits())
}

pub(crate) fn active_habits(current: &OsStr) -> Vec<CompletionCandidate> {
    let Ok(state) = State::load() else {
        return Vec::new();
    };
    from_habits(current, state.active_habits())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pairs(slugs: &[&str]) -> Vec<(String, String)> {
        slugs
            .iter()
            .map(|s| (String::from(*s), String::from(*s)))
            .collect()
    }

    #[test]
    fn exact_match_sorts_before_prefix_and_substring() {
        let ranked = ranked_matches(
            "read",
            pairs(&["read-more", "spread-out", "read", "run"]),
        );
        let slugs: Vec<_> = ranked.into_iter().map(|(slug, _)| slug).collect();
        assert_eq!(vec!["read", "read-more", "spread-out"], slugs);
    }

    #[test]
    fn everything_matches_the_empty_string() {
        let ranked = ranked_matches("", pairs(&["b", "a"]));
        let slugs: Vec<_> = ranked.into_iter().map(|(slug, _)| slug).collect();
        assert_eq!(vec!["a", "b"], slugs);
    }
}
