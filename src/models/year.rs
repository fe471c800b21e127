use serde::{Deserialize, Serialize};

/// One day of an annual schedule, as produced by the year data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearDayRecord {
    pub day_of_year: u32,
    pub date: String,
    pub fajr: String,
    pub dhuhr: String,
    pub asr: String,
    pub maghrib: String,
    pub isha: String,
    #[serde(rename = "isDST", default)]
    pub is_dst: bool,
    #[serde(default)]
    pub gregorian: String,
    #[serde(default)]
    pub hijri: String,
}

impl YearDayRecord {
    /// The five times in canonical order.
    pub fn times(&self) -> [(&'static str, &str); 5] {
        [
            ("fajr", self.fajr.as_str()),
            ("dhuhr", self.dhuhr.as_str()),
            ("asr", self.asr.as_str()),
            ("maghrib", self.maghrib.as_str()),
            ("isha", self.isha.as_str()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DstTransition {
    pub day_of_year: u32,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearData {
    pub year: i32,
    pub data: Vec<YearDayRecord>,
    #[serde(default)]
    pub dst_transitions: Vec<DstTransition>,
}
