//! Filter criteria: one selector per pipeline stage, each with an "all" no-op.

use std::fmt;
use std::str::FromStr;

use chrono::{Months, NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Sentinel accepted for every selector meaning "do not filter".
pub const ALL: &str = "all";

/// A selector that is either the "all" sentinel or one concrete value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Selection<T> {
    #[default]
    All,
    Only(T),
}

impl<T> Selection<T> {
    pub fn only(value: impl Into<T>) -> Self {
        Selection::Only(value.into())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    pub fn as_only(&self) -> Option<&T> {
        match self {
            Selection::All => None,
            Selection::Only(value) => Some(value),
        }
    }
}

impl<T: FromStr> FromStr for Selection<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case(ALL) {
            return Ok(Selection::All);
        }
        s.parse().map(Selection::Only)
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str(ALL),
            Selection::Only(value) => value.fmt(f),
        }
    }
}

impl<T: fmt::Display> Serialize for Selection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, T> Deserialize<'de> for Selection<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Time-of-day band used by the time-slot stage.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeSlot {
    /// [06:00, 12:00)
    Morning,
    /// [12:00, 17:00)
    Afternoon,
    /// [17:00, 22:00)
    Evening,
    /// [22:00, 24:00) and [00:00, 06:00)
    Late,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 4] = [
        TimeSlot::Morning,
        TimeSlot::Afternoon,
        TimeSlot::Evening,
        TimeSlot::Late,
    ];

    pub fn contains_hour(&self, hour: u32) -> bool {
        match self {
            TimeSlot::Morning => (6..12).contains(&hour),
            TimeSlot::Afternoon => (12..17).contains(&hour),
            TimeSlot::Evening => (17..22).contains(&hour),
            TimeSlot::Late => hour >= 22 || hour < 6,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeSlot::Morning => "morning",
            TimeSlot::Afternoon => "afternoon",
            TimeSlot::Evening => "evening",
            TimeSlot::Late => "late",
        }
    }
}

impl FromStr for TimeSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morning" => Ok(TimeSlot::Morning),
            "afternoon" => Ok(TimeSlot::Afternoon),
            "evening" => Ok(TimeSlot::Evening),
            "late" => Ok(TimeSlot::Late),
            _ => Err(format!(
                "Invalid time slot: {}. Must be 'morning', 'afternoon', 'evening' or 'late'",
                s
            )),
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Timeframe selector: a relative window ending now, or a custom range.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Timeframe {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "1w")]
    OneWeek,
    #[serde(rename = "2w")]
    TwoWeeks,
    #[serde(rename = "1m")]
    OneMonth,
    #[serde(rename = "3m")]
    ThreeMonths,
    #[serde(rename = "6m")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "custom")]
    Custom,
}

impl Timeframe {
    /// Shift `at` back by this timeframe's window length.
    ///
    /// Month and year windows are calendar-based ("1m" before March 31 is the
    /// last day of February). Returns `None` for `All` and `Custom`.
    pub fn shift_back(&self, at: NaiveDateTime) -> Option<NaiveDateTime> {
        match self {
            Timeframe::OneWeek => at.checked_sub_signed(TimeDelta::days(7)),
            Timeframe::TwoWeeks => at.checked_sub_signed(TimeDelta::days(14)),
            Timeframe::OneMonth => at.checked_sub_months(Months::new(1)),
            Timeframe::ThreeMonths => at.checked_sub_months(Months::new(3)),
            Timeframe::SixMonths => at.checked_sub_months(Months::new(6)),
            Timeframe::OneYear => at.checked_sub_months(Months::new(12)),
            Timeframe::All | Timeframe::Custom => None,
        }
    }

    pub fn is_relative(&self) -> bool {
        !matches!(self, Timeframe::All | Timeframe::Custom)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::All => "all",
            Timeframe::OneWeek => "1w",
            Timeframe::TwoWeeks => "2w",
            Timeframe::OneMonth => "1m",
            Timeframe::ThreeMonths => "3m",
            Timeframe::SixMonths => "6m",
            Timeframe::OneYear => "1y",
            Timeframe::Custom => "custom",
        }
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(Timeframe::All),
            "1w" => Ok(Timeframe::OneWeek),
            "2w" => Ok(Timeframe::TwoWeeks),
            "1m" => Ok(Timeframe::OneMonth),
            "3m" => Ok(Timeframe::ThreeMonths),
            "6m" => Ok(Timeframe::SixMonths),
            "1y" => Ok(Timeframe::OneYear),
            "custom" => Ok(Timeframe::Custom),
            other => Err(format!(
                "Invalid timeframe: {}. Must be one of all, 1w, 2w, 1m, 3m, 6m, 1y, custom",
                other
            )),
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bounds of the custom timeframe. Both ends are inclusive calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub start: Option<NaiveDate>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// The complete set of selectors driving the filter pipeline.
///
/// All selectors at their default value make the pipeline the identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub location: Selection<String>,
    pub timeframe: Timeframe,
    pub date_range: DateRange,
    pub trainer: Selection<String>,
    #[serde(rename = "class")]
    pub class_name: Selection<String>,
    pub product: Selection<String>,
    pub time_slot: Selection<TimeSlot>,
}

impl FilterCriteria {
    /// Whether every selector is in its no-op state.
    pub fn is_identity(&self) -> bool {
        self.location.is_all()
            && self.timeframe == Timeframe::All
            && self.trainer.is_all()
            && self.class_name.is_all()
            && self.product.is_all()
            && self.time_slot.is_all()
    }

    /// The same criteria with the timeframe stage disabled.
    ///
    /// Used to build the base collection from which previous-period
    /// comparisons are cut.
    pub fn without_timeframe(&self) -> Self {
        Self {
            timeframe: Timeframe::All,
            date_range: DateRange::default(),
            ..self.clone()
        }
    }
}
