mod handlers;
mod service;
mod types;

pub use handlers::*;
pub use service::*;
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_chart_series_skips_empty_buckets() {
        let counts = HashMap::from([
            ("lead".to_string(), 3),
            ("customer".to_string(), 1),
        ]);
        let series = chart_series(&counts, &["lead", "prospect", "customer", "churned"]);
        assert_eq!(series.labels, vec!["lead", "customer"]);
        assert_eq!(series.values, vec![3, 1]);
    }

    #[test]
    fn test_chart_series_keeps_choice_order() {
        let counts = HashMap::from([
            ("done".to_string(), 2),
            ("todo".to_string(), 5),
        ]);
        let series =
            chart_series_colored(&counts, &["todo", "in_progress", "done"], task_status_color);
        assert_eq!(series.labels, vec!["todo", "done"]);
        assert_eq!(series.values, vec![5, 2]);
        assert_eq!(series.colors, vec!["#0d6efd", "#198754"]);
    }

    #[test]
    fn test_chart_series_all_empty() {
        let series = chart_series(&HashMap::new(), &["todo", "done"]);
        assert!(series.labels.is_empty());
        assert!(series.values.is_empty());
    }
}
