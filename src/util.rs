use serde::{Deserialize, Serialize};
use std::{cell::RefCell, ops::Deref, rc::Rc};
use time::{Date, Duration, OffsetDateTime, Time};

#[inline]
pub(crate) fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// If a provided date-time occurs before a provided cut-off, then this will act like a date on the
/// previous date. Otherwise, it will act like the provided date-time's date.
pub fn dt_with_cutoff(dt: &OffsetDateTime, cut_off: Time) -> Date {
    if dt.time() < cut_off {
        dt.date() - Duration::DAY
    } else {
        dt.date()
    }
}

#[inline]
pub fn now_with_cutoff(cut_off: Time) -> Date {
    dt_with_cutoff(&now(), cut_off)
}

/// A newtype around `Rc<RefCell<V>>`. The config's habit list, the state
/// model's per-habit map, and the joined `Habit` handles all alias the same
/// cells, so mutating a habit through any one of them is visible everywhere
/// without bookkeeping.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct RcCell<V>(Rc<RefCell<V>>);

impl<V> RcCell<V> {
    pub fn new(value: V) -> Self {
        Self(Rc::new(RefCell::new(value)))
    }
}

impl<V> Deref for RcCell<V> {
    type Target = RefCell<V>;

    fn deref(&self) -> &RefCell<V> {
        self.0.deref()
    }
}
