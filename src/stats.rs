use crate::models::{ActivityRecord, ActivitySummary, Summary};
use std::collections::HashMap;

/// Counts records per activity, most frequent first. Ties keep the order in
/// which each activity first appears in the log.
pub fn summarize(records: &[ActivityRecord]) -> Summary {
    let mut order: Vec<(&str, u64)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for activity in records.iter().filter_map(|record| record.activity.as_deref()) {
        match index.get(activity).copied() {
            Some(slot) => order[slot].1 += 1,
            None => {
                index.insert(activity, order.len());
                order.push((activity, 1));
            }
        }
    }

    let total: u64 = order.iter().map(|(_, count)| count).sum();
    if total == 0 {
        return Summary::Empty;
    }

    // stable, so equal counts stay in first-seen order
    order.sort_by(|a, b| b.1.cmp(&a.1));

    let activities = order
        .into_iter()
        .map(|(activity, count)| ActivitySummary {
            activity: activity.to_string(),
            count,
            percentage: percentage(count, total),
        })
        .collect();

    Summary::Ready { total, activities }
}

/// Share of `total`, rounded to the nearest whole percent.
pub fn percentage(count: u64, total: u64) -> u32 {
    if total == 0 {
        return 0;
    }
    (count as f64 / total as f64 * 100.0).round() as u32
}
