use chrono::NaiveDateTime;
use indexmap::IndexMap;

use crate::models::{ScheduleEntry, TemporalState};
use crate::schedule::resolver::NOT_AVAILABLE;
use crate::schedule::time_parser::parse_on;
use crate::utils::format::format_countdown;

const RESCHEDULE: &str = "reschedule";

/// Classify canonically sorted entries against `now`.
///
/// Every input key appears in the result. The reschedule marker, empty or
/// `N/A` times and malformed times keep the default state (not passed, not
/// next). At most one entry is next: the first real prayer not yet passed,
/// and it always carries a countdown.
pub fn evaluate(entries: &[ScheduleEntry], now: NaiveDateTime) -> IndexMap<String, TemporalState> {
    let mut states: IndexMap<String, TemporalState> = IndexMap::with_capacity(entries.len());
    let mut next_found = false;

    for entry in entries {
        let state = states.entry(entry.key.clone()).or_default();

        if entry.key == RESCHEDULE || entry.time.is_empty() || entry.time == NOT_AVAILABLE {
            continue;
        }
        let Some(at) = parse_on(now.date(), &entry.time) else {
            log::warn!("Unparsable time {:?} for {}", entry.time, entry.key);
            continue;
        };

        // Whole seconds, floored: the final sub-second already counts as passed.
        let secs = (at - now).num_seconds();
        state.passed = secs <= 0;
        if !state.passed && !next_found {
            next_found = true;
            state.is_next = true;
            state.countdown = format_countdown(secs);
            log::debug!("Next prayer is {} at {}", entry.key, entry.time);
        }
    }

    states
}

/// Key of the entry marked next, if any.
pub fn next_key(states: &IndexMap<String, TemporalState>) -> Option<&str> {
    states
        .iter()
        .find(|(_, s)| s.is_next)
        .map(|(k, _)| k.as_str())
}
