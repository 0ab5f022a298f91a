use crate::interactions::Interaction;
use crate::tasks::Task;
use bigdecimal::BigDecimal;
use serde::Serialize;
use std::collections::HashMap;

/// Chart.js-style series: one label and one value per non-empty bucket.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<i64>,
    pub colors: Vec<String>,
}

/// Builds a series in the fixed choice order, leaving out buckets with no
/// entries so the chart never shows empty slices.
pub fn chart_series(counts: &HashMap<String, i64>, choices: &[&str]) -> ChartSeries {
    chart_series_colored(counts, choices, |_| None)
}

pub fn chart_series_colored(
    counts: &HashMap<String, i64>,
    choices: &[&str],
    color_for: impl Fn(&str) -> Option<&'static str>,
) -> ChartSeries {
    let mut series = ChartSeries::default();
    for choice in choices {
        let count = counts.get(*choice).copied().unwrap_or(0);
        if count == 0 {
            continue;
        }
        series.labels.push((*choice).to_string());
        series.values.push(count);
        if let Some(color) = color_for(choice) {
            series.colors.push(color.to_string());
        }
    }
    series
}

pub fn task_status_color(status: &str) -> Option<&'static str> {
    match status {
        "todo" => Some("#0d6efd"),
        "in_progress" => Some("#ffc107"),
        "done" => Some("#198754"),
        "cancelled" => Some("#6c757d"),
        _ => None,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardResponse {
    pub total_companies: i64,
    pub total_contacts: i64,
    pub total_interactions: i64,
    pub total_tasks: i64,
    pub total_opportunities: i64,
    pub companies_with_contacts: i64,
    pub interactions_this_month: i64,
    pub contacts_by_status: ChartSeries,
    pub interactions_by_type: ChartSeries,
    pub opportunities_by_stage: ChartSeries,
    pub tasks_by_status: ChartSeries,
    pub overdue_tasks: Vec<Task>,
    pub overdue_count: i64,
    pub urgent_tasks: Vec<Task>,
    pub urgent_count: i64,
    pub due_soon_tasks: Vec<Task>,
    pub due_soon_count: i64,
    pub recent_interactions: Vec<Interaction>,
    pub recent_tasks: Vec<Task>,
    pub pipeline_value: BigDecimal,
    pub revenue: BigDecimal,
}
