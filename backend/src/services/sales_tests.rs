use super::*;
use crate::models::{find_metric, MemberId, TrendLevel};
use crate::transformations::{Selection, Timeframe};
use chrono::NaiveDate;

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 15)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn sale(member: &str, email: &str, product: &str, location: &str, date: &str, value: f64) -> SaleRecord {
    let opt = |s: &str| (!s.is_empty()).then(|| s.to_string());
    SaleRecord {
        member_id: opt(member).map(MemberId::from),
        customer_email: opt(email),
        cleaned_product: opt(product),
        calculated_location: opt(location),
        payment_date: opt(date),
        payment_value: Some(value),
        payment_vat: Some(value * 0.18),
        discount_amount: None,
        ..Default::default()
    }
}

fn sample() -> Vec<SaleRecord> {
    vec![
        sale("M1", "", "Monthly Unlimited", "Kwality House", "2024-06-10 10:00:00", 1000.0),
        sale("M2", "", "Class Pack 10", "Kwality House", "2024-06-01 18:00:00", 500.0),
        sale("", "walkin@example.com", "Class Pack 10", "Supreme HQ", "2024-05-20 09:00:00", 500.0),
        sale("M1", "", "Monthly Unlimited", "Kwality House", "2024-05-05 11:00:00", 800.0),
        sale("M3", "", "Monthly Unlimited", "Kwality House", "2024-04-10 11:00:00", 400.0),
    ]
}

#[test]
fn test_empty_sales_are_zero() {
    let metrics = compute_sales_metrics(&[]);
    assert_eq!(metrics, SalesMetrics::default());

    let criteria = FilterCriteria::default();
    let cards = sales_cards(&[], &[], &criteria, &AnalyticsContext::default(), sales_period(&criteria, now()));
    assert_eq!(cards.len(), 7);
    for card in cards {
        assert_eq!(card.value, 0.0);
        let comparison = card.comparison.unwrap();
        assert_eq!(comparison.percent_change, 0.0);
        assert!(!comparison.significant);
    }
}

#[test]
fn test_sales_metrics() {
    let metrics = compute_sales_metrics(&sample());
    assert_eq!(metrics.net_revenue, 3200.0);
    assert_eq!(metrics.transactions, 5);
    assert_eq!(metrics.unique_members, 4);
    assert_eq!(metrics.average_transaction_value, 640.0);
    assert_eq!(metrics.average_spend_per_member, 800.0);
    assert!((metrics.vat_collected - 576.0).abs() < 1e-9);
    assert_eq!(metrics.discount_total, 0.0);
}

#[test]
fn test_one_month_cards_compare_adjacent_windows() {
    let records = sample();
    let criteria = FilterCriteria {
        timeframe: Timeframe::OneMonth,
        ..Default::default()
    };
    let context = AnalyticsContext::default();
    let filtered = apply_filters(&records, &criteria, &context.catalog, now());
    let cards = sales_cards(&records, &filtered, &criteria, &context, sales_period(&criteria, now()));

    // Current window: 2024-05-15 12:00 ..= now; previous: 2024-04-15 12:00 .. 2024-05-15 12:00.
    let revenue = find_metric(&cards, MetricKey::NetRevenue).unwrap();
    assert_eq!(revenue.value, 2000.0);
    let comparison = revenue.comparison.as_ref().unwrap();
    assert_eq!(comparison.current, 2000.0);
    assert_eq!(comparison.previous, 800.0);
    assert_eq!(comparison.percent_change, 150.0);
    assert!(comparison.significant);
    assert_eq!(comparison.trend, TrendLevel::Strong);
}

#[test]
fn test_comparisons_respect_other_criteria() {
    let records = sample();
    let criteria = FilterCriteria {
        location: Selection::only("kwality"),
        timeframe: Timeframe::OneMonth,
        ..Default::default()
    };
    let context = AnalyticsContext::default();
    let filtered = apply_filters(&records, &criteria, &context.catalog, now());
    let cards = sales_cards(&records, &filtered, &criteria, &context, sales_period(&criteria, now()));

    let transactions = find_metric(&cards, MetricKey::Transactions).unwrap();
    assert_eq!(transactions.value, 2.0);
    let comparison = transactions.comparison.as_ref().unwrap();
    assert_eq!(comparison.current, 2.0);
    assert_eq!(comparison.previous, 1.0);
    assert_eq!(comparison.difference, 1.0);
}

#[test]
fn test_product_breakdown() {
    let products = product_breakdown(&sample());
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].product, "Monthly Unlimited");
    assert_eq!(products[0].revenue, 2200.0);
    assert_eq!(products[0].transactions, 3);
    assert_eq!(products[0].unique_members, 2);
    assert_eq!(products[1].unique_members, 2);
}
