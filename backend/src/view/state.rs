use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::transformations::{DateRange, FilterCriteria, Selection, TimeSlot, Timeframe};

/// The analysis views offered under the metric cards.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AnalysisTab {
    #[default]
    #[serde(rename = "monthonmonth")]
    MonthOnMonth,
    #[serde(rename = "yearonyear")]
    YearOnYear,
    #[serde(rename = "hostedclasses")]
    HostedClasses,
    #[serde(rename = "memberships")]
    Memberships,
    #[serde(rename = "detailed")]
    Detailed,
    #[serde(rename = "overview")]
    Overview,
}

impl AnalysisTab {
    pub const ALL: [AnalysisTab; 6] = [
        AnalysisTab::MonthOnMonth,
        AnalysisTab::YearOnYear,
        AnalysisTab::HostedClasses,
        AnalysisTab::Memberships,
        AnalysisTab::Detailed,
        AnalysisTab::Overview,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisTab::MonthOnMonth => "monthonmonth",
            AnalysisTab::YearOnYear => "yearonyear",
            AnalysisTab::HostedClasses => "hostedclasses",
            AnalysisTab::Memberships => "memberships",
            AnalysisTab::Detailed => "detailed",
            AnalysisTab::Overview => "overview",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AnalysisTab::MonthOnMonth => "Month-on-Month",
            AnalysisTab::YearOnYear => "Year-on-Year",
            AnalysisTab::HostedClasses => "Hosted Classes",
            AnalysisTab::Memberships => "Memberships",
            AnalysisTab::Detailed => "Detailed View",
            AnalysisTab::Overview => "Overview",
        }
    }
}

impl FromStr for AnalysisTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AnalysisTab::ALL
            .into_iter()
            .find(|tab| tab.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| format!("Unknown analysis tab: {}", s))
    }
}

impl fmt::Display for AnalysisTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a page remembers about what the user selected.
///
/// The location tab lives in `criteria.location`; it is a tab, so clearing
/// filters leaves it alone.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewState {
    pub analysis_tab: AnalysisTab,
    pub criteria: FilterCriteria,
}

impl ViewState {
    pub fn location(&self) -> &Selection<String> {
        &self.criteria.location
    }

    /// Reset every filter selector in one assignment, keeping both tabs.
    pub fn clear_filters(&mut self) {
        self.criteria = FilterCriteria {
            location: self.criteria.location.clone(),
            ..FilterCriteria::default()
        };
    }

    /// Whether any filter selector (tabs aside) is active.
    pub fn has_active_filters(&self) -> bool {
        !FilterCriteria {
            location: Selection::All,
            ..self.criteria.clone()
        }
        .is_identity()
    }

    pub fn apply(&mut self, update: ViewUpdate) {
        match update {
            ViewUpdate::Location(location) => self.criteria.location = location,
            ViewUpdate::AnalysisTab(tab) => self.analysis_tab = tab,
            ViewUpdate::Timeframe(timeframe) => self.criteria.timeframe = timeframe,
            ViewUpdate::DateRange(range) => self.criteria.date_range = range,
            ViewUpdate::Trainer(trainer) => self.criteria.trainer = trainer,
            ViewUpdate::Class(class_name) => self.criteria.class_name = class_name,
            ViewUpdate::Product(product) => self.criteria.product = product,
            ViewUpdate::TimeSlot(slot) => self.criteria.time_slot = slot,
            ViewUpdate::ClearFilters => self.clear_filters(),
        }
    }
}

/// Which selector an update targets. Debouncing is keyed on this.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterField {
    Location,
    AnalysisTab,
    Timeframe,
    DateRange,
    Trainer,
    Class,
    Product,
    TimeSlot,
    /// Every filter selector at once.
    Filters,
}

/// One change to a [`ViewState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum ViewUpdate {
    Location(Selection<String>),
    AnalysisTab(AnalysisTab),
    Timeframe(Timeframe),
    DateRange(DateRange),
    Trainer(Selection<String>),
    Class(Selection<String>),
    Product(Selection<String>),
    TimeSlot(Selection<TimeSlot>),
    ClearFilters,
}

impl ViewUpdate {
    pub fn field(&self) -> FilterField {
        match self {
            ViewUpdate::Location(_) => FilterField::Location,
            ViewUpdate::AnalysisTab(_) => FilterField::AnalysisTab,
            ViewUpdate::Timeframe(_) => FilterField::Timeframe,
            ViewUpdate::DateRange(_) => FilterField::DateRange,
            ViewUpdate::Trainer(_) => FilterField::Trainer,
            ViewUpdate::Class(_) => FilterField::Class,
            ViewUpdate::Product(_) => FilterField::Product,
            ViewUpdate::TimeSlot(_) => FilterField::TimeSlot,
            ViewUpdate::ClearFilters => FilterField::Filters,
        }
    }
}
