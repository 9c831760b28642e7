//! Shared helpers for the integration tests.
//!
//! Each test binary uses a different subset of these.
#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use chrono::{NaiveDate, NaiveDateTime};
use insight_hub::models::{ClientRecord, LateCancellation, MemberId, SaleRecord};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// Restores the previous values on unwind and serializes access to the
/// process environment across parallel tests.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    saved: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let saved = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { saved }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.saved.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// The fixed "now" every scenario runs against: 2024-06-15 12:00.
pub fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 15)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

pub fn cancellation(
    member: &str,
    location: &str,
    trainer: &str,
    class_name: &str,
    date: &str,
    time: &str,
) -> LateCancellation {
    LateCancellation {
        member_id: Some(MemberId::new(member)),
        first_name: Some(format!("Member {}", member)),
        location: Some(location.to_string()),
        teacher_name: Some(trainer.to_string()),
        cleaned_class: Some(class_name.to_string()),
        cleaned_product: Some("Studio Pack".to_string()),
        date_ist: Some(date.to_string()),
        time: Some(time.to_string()),
        charged_penalty_amount: Some(500.0),
        ..Default::default()
    }
}

/// Late cancellations spread over the three studios and two years.
pub fn cancellations() -> Vec<LateCancellation> {
    vec![
        cancellation("M1", "Kwality House, Kemps Corner", "Anisha", "Barre 57", "2024-06-10", "09:00"),
        cancellation("M1", "Kwality House, Kemps Corner", "Rohan", "PowerCycle", "2024-06-01", "18:30"),
        cancellation("M2", "Supreme HQ, Bandra", "Rohan", "PowerCycle", "2024-05-20", "23:10"),
        cancellation("M3", "Kenkere House, Bengaluru", "Mrigakshi", "Mat 57", "2024-03-02", "7:15 AM"),
        cancellation("M4", "Supreme HQ, Bandra", "Anisha", "Barre 57", "2023-11-18", "6:30 PM"),
        cancellation("M2", "Pop-up, Goa", "Rohan", "Barre 57", "2022-01-05", "12:00"),
    ]
}

pub fn sale(member: &str, location: &str, product: &str, date: &str, value: f64) -> SaleRecord {
    SaleRecord {
        member_id: Some(MemberId::new(member)),
        calculated_location: Some(location.to_string()),
        cleaned_product: Some(product.to_string()),
        cleaned_category: Some("Memberships".to_string()),
        sold_by: Some("Front Desk".to_string()),
        payment_date: Some(date.to_string()),
        payment_value: Some(value),
        payment_vat: Some(value * 0.18),
        ..Default::default()
    }
}

pub fn sales() -> Vec<SaleRecord> {
    vec![
        sale("M1", "Kwality House", "Monthly Unlimited", "2024-06-05 10:00:00", 1200.0),
        sale("M2", "Supreme HQ", "Monthly Unlimited", "2024-06-12 18:45:00", 800.0),
        sale("M1", "Kwality House", "8 Class Pack", "2024-05-02 09:30:00", 800.0),
        sale("M3", "Kenkere House", "Single Class", "2023-12-01 19:00:00", 400.0),
    ]
}

pub fn client(status: &str, span: Option<f64>, location: &str) -> ClientRecord {
    ClientRecord {
        is_new: Some("New".to_string()),
        conversion_status: Some(status.to_string()),
        conversion_span: span,
        first_visit_location: Some(location.to_string()),
        first_visit_date: Some("2024-06-01".to_string()),
        ..Default::default()
    }
}
