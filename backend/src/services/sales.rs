use std::collections::{HashMap, HashSet};

use chrono::NaiveDateTime;
use log::debug;

use super::metrics::{compare, distinct_count, safe_ratio, sum_by};
use super::AnalyticsContext;
use crate::api::{ProductSales, SalesData, SalesMetrics};
use crate::models::{FilterableRecord, Metric, MetricKey, MetricUnit, SaleRecord};
use crate::source::{load_snapshot, RecordSource};
use crate::transformations::{apply_filters, comparison_windows, FilterCriteria, PeriodPair};

/// Reduce a collection of sales to revenue metrics.
pub fn compute_sales_metrics(sales: &[SaleRecord]) -> SalesMetrics {
    let net_revenue = sum_by(sales, |s| s.payment_value);
    let transactions = sales.len();
    let unique_members = distinct_count(sales, SaleRecord::customer_key);

    SalesMetrics {
        net_revenue,
        transactions,
        unique_members,
        average_transaction_value: safe_ratio(net_revenue, transactions as f64),
        average_spend_per_member: safe_ratio(net_revenue, unique_members as f64),
        vat_collected: sum_by(sales, |s| s.payment_vat),
        discount_total: sum_by(sales, |s| s.discount_amount),
    }
}

/// The comparison windows for a set of criteria.
pub fn sales_period(criteria: &FilterCriteria, now: NaiveDateTime) -> PeriodPair {
    comparison_windows(criteria.timeframe, &criteria.date_range, now)
}

fn card_values(metrics: &SalesMetrics) -> [(MetricKey, f64, MetricUnit); 7] {
    [
        (MetricKey::NetRevenue, metrics.net_revenue, MetricUnit::Currency),
        (MetricKey::Transactions, metrics.transactions as f64, MetricUnit::Count),
        (MetricKey::UniqueMembers, metrics.unique_members as f64, MetricUnit::Count),
        (
            MetricKey::AverageTransactionValue,
            metrics.average_transaction_value,
            MetricUnit::Currency,
        ),
        (
            MetricKey::AverageSpendPerMember,
            metrics.average_spend_per_member,
            MetricUnit::Currency,
        ),
        (MetricKey::VatCollected, metrics.vat_collected, MetricUnit::Currency),
        (MetricKey::DiscountTotal, metrics.discount_total, MetricUnit::Currency),
    ]
}

/// Sales cards with previous-period comparisons.
///
/// Card values describe `filtered`. Comparisons are computed over `all`
/// narrowed by every criterion except the timeframe, then split into the
/// current and previous windows of `period`.
pub fn sales_cards(
    all: &[SaleRecord],
    filtered: &[SaleRecord],
    criteria: &FilterCriteria,
    context: &AnalyticsContext,
    period: PeriodPair,
) -> Vec<Metric> {
    let base = apply_filters(all, &criteria.without_timeframe(), &context.catalog, period.current.end);
    let current = compute_sales_metrics(&period.current.select(&base));
    let previous = compute_sales_metrics(&period.previous.select(&base));

    card_values(&compute_sales_metrics(filtered))
        .into_iter()
        .zip(card_values(&current))
        .zip(card_values(&previous))
        .map(|(((key, value, unit), (_, cur, _)), (_, prev, _))| {
            Metric::new(key, value, unit).with_comparison(compare(cur, prev, &context.thresholds))
        })
        .collect()
}

/// Revenue per product, highest first. Sales without a product are skipped.
pub fn product_breakdown(sales: &[SaleRecord]) -> Vec<ProductSales> {
    let mut groups: HashMap<&str, Vec<&SaleRecord>> = HashMap::new();
    for sale in sales {
        if let Some(product) = sale.product().map(str::trim).filter(|p| !p.is_empty()) {
            groups.entry(product).or_default().push(sale);
        }
    }

    let mut products: Vec<ProductSales> = groups
        .into_iter()
        .map(|(product, sales)| ProductSales {
            product: product.to_string(),
            revenue: sales.iter().map(|s| s.payment_value.unwrap_or(0.0)).sum(),
            transactions: sales.len(),
            unique_members: sales
                .iter()
                .filter_map(|s| s.customer_key())
                .collect::<HashSet<_>>()
                .len(),
        })
        .collect();
    products.sort_by(|a, b| {
        b.revenue
            .total_cmp(&a.revenue)
            .then_with(|| a.product.cmp(&b.product))
    });
    products
}

/// Filter and aggregate the sales of a record source.
pub async fn get_sales_data(
    source: &dyn RecordSource,
    criteria: &FilterCriteria,
    context: &AnalyticsContext,
    now: NaiveDateTime,
) -> SalesData {
    let snapshot = load_snapshot("sales", source.sales()).await;
    let all = snapshot.records();
    let filtered = apply_filters(all, criteria, &context.catalog, now);
    let period = sales_period(criteria, now);
    debug!(
        "Sales: {} of {} transactions selected, comparing {} .. {} against {} .. {}",
        filtered.len(),
        all.len(),
        period.current.start,
        period.current.end,
        period.previous.start,
        period.previous.end
    );

    SalesData {
        criteria: criteria.clone(),
        total_count: all.len(),
        filtered_count: filtered.len(),
        metrics: compute_sales_metrics(&filtered),
        period,
        cards: sales_cards(all, &filtered, criteria, context, period),
        products: product_breakdown(&filtered),
    }
}

#[cfg(test)]
#[path = "sales_tests.rs"]
mod sales_tests;
