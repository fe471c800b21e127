use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Raw value for one prayer as the upstream source supplies it.
///
/// `ByDay` keeps the source's key order: the "first entry" fallback in
/// [`crate::schedule::resolver`] depends on it.
/// Day stored for a leading key that is not a day of the month (`"x"`, `"32"`).
/// Such an entry never matches today but still counts as the first entry.
pub const NO_DAY: u32 = 0;

#[derive(Debug, Clone, PartialEq)]
pub enum DailyPrayerValue {
    Fixed(String),
    ByDay(Vec<(u32, String)>),
}

impl DailyPrayerValue {
    pub fn by_day<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (u32, S)>,
        S: Into<String>,
    {
        DailyPrayerValue::ByDay(entries.into_iter().map(|(d, t)| (d, t.into())).collect())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Fixed(String),
    ByDay(IndexMap<String, String>),
}

fn parse_day_key(key: &str) -> Option<u32> {
    key.trim().parse::<u32>().ok().filter(|d| (1..=31).contains(d))
}

impl<'de> Deserialize<'de> for DailyPrayerValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawValue::deserialize(deserializer)? {
            RawValue::Fixed(s) => Ok(DailyPrayerValue::Fixed(s)),
            RawValue::ByDay(map) => {
                let mut days = Vec::with_capacity(map.len());
                for (key, time) in map {
                    match parse_day_key(&key) {
                        Some(day) => days.push((day, time)),
                        // only the first entry can ever be picked without a day
                        None if days.is_empty() => {
                            log::warn!("Invalid day key {:?} kept as fallback entry", key);
                            days.push((NO_DAY, time));
                        }
                        None => log::warn!("Dropping prayer time with invalid day key {:?}", key),
                    }
                }
                Ok(DailyPrayerValue::ByDay(days))
            }
        }
    }
}

impl Serialize for DailyPrayerValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DailyPrayerValue::Fixed(s) => serializer.serialize_str(s),
            DailyPrayerValue::ByDay(days) => {
                let map: IndexMap<String, &String> =
                    days.iter().map(|(d, t)| (d.to_string(), t)).collect();
                map.serialize(serializer)
            }
        }
    }
}
