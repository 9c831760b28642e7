//! Dashboard pages and per-page view state.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

use super::state::{ViewState, ViewUpdate};

/// A dashboard page.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    ExecutiveSummary,
    SalesAnalytics,
    FunnelLeads,
    ClientRetention,
    TrainerPerformance,
    ClassAttendance,
    DiscountsPromotions,
    Sessions,
    PowercycleVsBarre,
    ExpirationAnalytics,
    LateCancellations,
}

impl Page {
    pub const ALL: [Page; 11] = [
        Page::ExecutiveSummary,
        Page::SalesAnalytics,
        Page::FunnelLeads,
        Page::ClientRetention,
        Page::TrainerPerformance,
        Page::ClassAttendance,
        Page::DiscountsPromotions,
        Page::Sessions,
        Page::PowercycleVsBarre,
        Page::ExpirationAnalytics,
        Page::LateCancellations,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Page::ExecutiveSummary => "/executive-summary",
            Page::SalesAnalytics => "/sales-analytics",
            Page::FunnelLeads => "/funnel-leads",
            Page::ClientRetention => "/client-retention",
            Page::TrainerPerformance => "/trainer-performance",
            Page::ClassAttendance => "/class-attendance",
            Page::DiscountsPromotions => "/discounts-promotions",
            Page::Sessions => "/sessions",
            Page::PowercycleVsBarre => "/powercycle-vs-barre",
            Page::ExpirationAnalytics => "/expiration-analytics",
            Page::LateCancellations => "/late-cancellations",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::ExecutiveSummary => "Executive Summary",
            Page::SalesAnalytics => "Sales Analytics",
            Page::FunnelLeads => "Funnel Leads",
            Page::ClientRetention => "Client Retention",
            Page::TrainerPerformance => "Trainer Performance",
            Page::ClassAttendance => "Class Attendance",
            Page::DiscountsPromotions => "Discounts & Promotions",
            Page::Sessions => "Sessions",
            Page::PowercycleVsBarre => "PowerCycle vs Barre",
            Page::ExpirationAnalytics => "Expiration Analytics",
            Page::LateCancellations => "Late Cancellations",
        }
    }

    pub fn from_path(path: &str) -> Option<Page> {
        let path = path.trim_end_matches('/');
        Page::ALL.into_iter().find(|p| p.path() == path)
    }
}

impl FromStr for Page {
    type Err = String;

    /// Accepts a route path ("/sales-analytics") or a bare slug ("sales-analytics").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let path = if s.starts_with('/') { s.to_string() } else { format!("/{}", s) };
        Page::from_path(&path).ok_or_else(|| format!("Unknown page: {}", s))
    }
}

/// The set of pages a user has open, each with its own view state.
///
/// Changing one page's state never touches another's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    active: Page,
    views: HashMap<Page, ViewState>,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new(Page::ExecutiveSummary)
    }
}

impl Workspace {
    pub fn new(start: Page) -> Self {
        Self {
            active: start,
            views: Page::ALL
                .into_iter()
                .map(|page| (page, ViewState::default()))
                .collect(),
        }
    }

    pub fn active(&self) -> Page {
        self.active
    }

    /// Switch pages; the previous page keeps its state for when it is revisited.
    pub fn navigate(&mut self, page: Page) {
        self.active = page;
    }

    pub fn view(&self, page: Page) -> &ViewState {
        // Every page is seeded in `new`.
        &self.views[&page]
    }

    pub fn view_mut(&mut self, page: Page) -> &mut ViewState {
        self.views.entry(page).or_default()
    }

    pub fn active_view(&self) -> &ViewState {
        self.view(self.active)
    }

    /// Apply an update to the active page only.
    pub fn apply(&mut self, update: ViewUpdate) {
        let page = self.active;
        self.view_mut(page).apply(update);
    }
}
