const PRAYER_ORDER: [&str; 5] = ["fajr", "dhuhr", "asr", "maghrib", "isha"];
const RESCHEDULE: &str = "reschedule";

/// Anything displayed under a prayer name.
pub trait PrayerKeyed {
    fn prayer_key(&self) -> &str;
}

impl<V> PrayerKeyed for (String, V) {
    fn prayer_key(&self) -> &str {
        &self.0
    }
}

fn rank(key: &str) -> usize {
    if key == RESCHEDULE {
        return 0;
    }
    PRAYER_ORDER
        .iter()
        .position(|p| *p == key)
        .map(|i| i + 1)
        .unwrap_or(usize::MAX)
}

/// Reschedule first, then fajr..isha, then unknown keys in input order.
pub fn sort_by_prayer_order<T: PrayerKeyed>(items: &mut [T]) {
    // slice::sort_by_key is stable, so equal ranks keep their input order.
    items.sort_by_key(|item| rank(item.prayer_key()));
}

pub fn sorted_by_prayer_order<T: PrayerKeyed>(mut items: Vec<T>) -> Vec<T> {
    sort_by_prayer_order(&mut items);
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScheduleEntry;

    fn keys(entries: &[ScheduleEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.key.as_str()).collect()
    }

    fn entries(keys: &[&str]) -> Vec<ScheduleEntry> {
        keys.iter().map(|k| ScheduleEntry::new(*k, "")).collect()
    }

    #[test]
    fn reschedule_goes_first() {
        let sorted = sorted_by_prayer_order(entries(&["dhuhr", "reschedule", "fajr"]));
        assert_eq!(keys(&sorted), ["reschedule", "fajr", "dhuhr"]);
    }

    #[test]
    fn unknown_keys_trail_in_input_order() {
        let sorted = sorted_by_prayer_order(entries(&[
            "sunrise", "isha", "jumuah", "asr", "reschedule", "eid",
        ]));
        assert_eq!(
            keys(&sorted),
            ["reschedule", "asr", "isha", "sunrise", "jumuah", "eid"]
        );
    }

    #[test]
    fn duplicates_keep_relative_order() {
        let mut items = vec![
            ScheduleEntry::new("asr", "a"),
            ScheduleEntry::new("fajr", "f"),
            ScheduleEntry::new("asr", "b"),
        ];
        sort_by_prayer_order(&mut items);
        let times: Vec<&str> = items.iter().map(|e| e.time.as_str()).collect();
        assert_eq!(times, ["f", "a", "b"]);
    }

    #[test]
    fn sorting_is_idempotent() {
        let once = sorted_by_prayer_order(entries(&[
            "maghrib", "x", "fajr", "reschedule", "y", "dhuhr", "isha", "asr",
        ]));
        let twice = sorted_by_prayer_order(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn works_on_key_value_pairs() {
        let sorted = sorted_by_prayer_order(vec![
            ("isha".to_string(), 1),
            ("fajr".to_string(), 2),
        ]);
        assert_eq!(sorted[0].0, "fajr");
    }

    #[test]
    fn empty_input() {
        let sorted: Vec<ScheduleEntry> = sorted_by_prayer_order(vec![]);
        assert!(sorted.is_empty());
    }
}
