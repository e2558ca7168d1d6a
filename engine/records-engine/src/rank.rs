//! Sorting and top-N helpers shared by the season and all-time reducers

use std::cmp::Ordering;

fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Stable descending sort by a float key; ties stay in encounter order
pub fn sort_desc<T>(items: &mut [T], key: impl Fn(&T) -> f64) {
    items.sort_by(|a, b| cmp_f64(key(b), key(a)));
}

/// Stable ascending sort by a float key
pub fn sort_asc<T>(items: &mut [T], key: impl Fn(&T) -> f64) {
    items.sort_by(|a, b| cmp_f64(key(a), key(b)));
}

/// Top N entries by descending key; clamps to the available count
pub fn top_n_desc<T>(mut items: Vec<T>, n: usize, key: impl Fn(&T) -> f64) -> Vec<T> {
    sort_desc(&mut items, key);
    items.truncate(n);
    items
}

/// Top N entries by ascending key; clamps to the available count
pub fn top_n_asc<T>(mut items: Vec<T>, n: usize, key: impl Fn(&T) -> f64) -> Vec<T> {
    sort_asc(&mut items, key);
    items.truncate(n);
    items
}
