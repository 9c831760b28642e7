//! Record shapes supplied by the spreadsheet-backed record source.
//!
//! Field names follow the camelCase headers of the sheet exports. Every field
//! is optional: a blank cell deserializes to `None` and the filter pipeline and
//! aggregators treat it as "no match" or zero.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

use super::time::{hour_of, parse_event_date, parse_event_timestamp, parse_hour};
use crate::define_text_id;

define_text_id!(MemberId);

/// Accessors the filter pipeline needs from any record kind.
pub trait FilterableRecord {
    fn location(&self) -> Option<&str>;
    fn trainer(&self) -> Option<&str>;
    fn class_name(&self) -> Option<&str>;
    fn product(&self) -> Option<&str>;
    /// Raw time-of-day cell, if the record kind has one.
    fn time_of_day(&self) -> Option<&str>;
    /// Raw date cell used by the timeframe stage.
    fn event_date(&self) -> Option<&str>;

    /// Hour used by the time-slot stage.
    fn hour(&self) -> Option<u32> {
        self.time_of_day().and_then(parse_hour)
    }

    /// Parsed event date used by the timeframe stage.
    fn parsed_date(&self) -> Option<NaiveDateTime> {
        self.event_date().and_then(parse_event_date)
    }
}

/// One late cancellation of a booked class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LateCancellation {
    #[serde(deserialize_with = "lenient_member_id")]
    pub member_id: Option<MemberId>,
    #[serde(deserialize_with = "lenient_string")]
    pub first_name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub last_name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub email: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub location: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub teacher_name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub cleaned_class: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub cleaned_product: Option<String>,
    #[serde(rename = "dateIST", deserialize_with = "lenient_string")]
    pub date_ist: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub time: Option<String>,
    #[serde(deserialize_with = "lenient_f64")]
    pub charged_penalty_amount: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub duration: Option<f64>,
}

impl LateCancellation {
    /// "First Last", or whichever half is present.
    pub fn member_name(&self) -> Option<String> {
        join_name(self.first_name.as_deref(), self.last_name.as_deref())
    }
}

impl FilterableRecord for LateCancellation {
    fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    fn trainer(&self) -> Option<&str> {
        self.teacher_name.as_deref()
    }

    fn class_name(&self) -> Option<&str> {
        self.cleaned_class.as_deref()
    }

    fn product(&self) -> Option<&str> {
        self.cleaned_product.as_deref()
    }

    fn time_of_day(&self) -> Option<&str> {
        self.time.as_deref()
    }

    fn event_date(&self) -> Option<&str> {
        self.date_ist.as_deref()
    }
}

/// One sales transaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SaleRecord {
    #[serde(deserialize_with = "lenient_member_id")]
    pub member_id: Option<MemberId>,
    #[serde(deserialize_with = "lenient_string")]
    pub customer_name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub customer_email: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub calculated_location: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub cleaned_product: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub cleaned_category: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub sold_by: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub payment_date: Option<String>,
    #[serde(deserialize_with = "lenient_f64")]
    pub payment_value: Option<f64>,
    #[serde(rename = "paymentVAT", deserialize_with = "lenient_f64")]
    pub payment_vat: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub discount_amount: Option<f64>,
}

impl SaleRecord {
    /// Key used to count distinct customers: member id, falling back to email.
    pub fn customer_key(&self) -> Option<&str> {
        self.member_id
            .as_ref()
            .map(MemberId::as_str)
            .filter(|id| !id.is_empty())
            .or_else(|| self.customer_email.as_deref().filter(|e| !e.is_empty()))
    }
}

impl FilterableRecord for SaleRecord {
    fn location(&self) -> Option<&str> {
        self.calculated_location.as_deref()
    }

    fn trainer(&self) -> Option<&str> {
        self.sold_by.as_deref()
    }

    fn class_name(&self) -> Option<&str> {
        self.cleaned_category.as_deref()
    }

    fn product(&self) -> Option<&str> {
        self.cleaned_product.as_deref()
    }

    fn time_of_day(&self) -> Option<&str> {
        None
    }

    fn event_date(&self) -> Option<&str> {
        self.payment_date.as_deref()
    }

    // Sales carry the time inside the payment timestamp. A date-only cell has no hour.
    fn hour(&self) -> Option<u32> {
        self.payment_date
            .as_deref()
            .and_then(parse_event_timestamp)
            .as_ref()
            .map(hour_of)
    }
}

/// Lifecycle snapshot of one client, from first visit to conversion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientRecord {
    #[serde(deserialize_with = "lenient_member_id")]
    pub member_id: Option<MemberId>,
    #[serde(deserialize_with = "lenient_string")]
    pub first_name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub last_name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub email: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub first_visit_location: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub trainer_name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub first_visit_entity_name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub membership_used: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub first_visit_date: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub is_new: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub conversion_status: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub retention_status: Option<String>,
    #[serde(deserialize_with = "lenient_f64")]
    pub visits_post_trial: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub ltv: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub conversion_span: Option<f64>,
}

impl ClientRecord {
    pub fn member_name(&self) -> Option<String> {
        join_name(self.first_name.as_deref(), self.last_name.as_deref())
    }
}

impl FilterableRecord for ClientRecord {
    fn location(&self) -> Option<&str> {
        self.first_visit_location.as_deref()
    }

    fn trainer(&self) -> Option<&str> {
        self.trainer_name.as_deref()
    }

    fn class_name(&self) -> Option<&str> {
        self.first_visit_entity_name.as_deref()
    }

    fn product(&self) -> Option<&str> {
        self.membership_used.as_deref()
    }

    fn time_of_day(&self) -> Option<&str> {
        None
    }

    fn event_date(&self) -> Option<&str> {
        self.first_visit_date.as_deref()
    }
}

fn join_name(first: Option<&str>, last: Option<&str>) -> Option<String> {
    let parts: Vec<&str> = [first, last]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    (!parts.is_empty()).then(|| parts.join(" "))
}

/// Accept any scalar cell as text. Blank strings and nulls become `None`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

fn lenient_member_id<'de, D>(deserializer: D) -> Result<Option<MemberId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_string(deserializer)?
        .map(MemberId::new)
        .filter(|id| !id.is_empty()))
}

/// Accept numbers or numeric text ("1,250.50", "₹ 900", "Rs. 900"). Anything else is `None`.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let parsed = match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => parse_amount(&s),
        _ => None,
    };
    Ok(parsed.filter(|f| f.is_finite()))
}

/// Read an amount from free text. The number starts at the first digit or
/// sign, so a currency prefix ending in `.` cannot move the decimal point.
fn parse_amount(raw: &str) -> Option<f64> {
    let start = raw.find(|c: char| c.is_ascii_digit() || c == '-')?;
    let cleaned: String = raw[start..]
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    if cleaned.matches('.').count() > 1 {
        return None;
    }
    cleaned.parse::<f64>().ok()
}
