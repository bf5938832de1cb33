use std::cmp::Ordering;

use super::{TimeSeries, is_missing};

/// Restricts two series to the dates where both hold a non-missing value.
///
/// Both inputs have strictly increasing dates, so a single merge pass yields
/// the intersection in chronological order without duplicates.
pub fn align(a: &TimeSeries, b: &TimeSeries) -> (TimeSeries, TimeSeries) {
    let (a_dates, a_values) = (a.dates(), a.values());
    let (b_dates, b_values) = (b.dates(), b.values());

    let capacity = a.len().min(b.len());
    let mut dates = Vec::with_capacity(capacity);
    let mut left = Vec::with_capacity(capacity);
    let mut right = Vec::with_capacity(capacity);

    let (mut i, mut j) = (0, 0);
    while i < a_dates.len() && j < b_dates.len() {
        match a_dates[i].cmp(&b_dates[j]) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                if !is_missing(a_values[i]) && !is_missing(b_values[j]) {
                    dates.push(a_dates[i]);
                    left.push(a_values[i]);
                    right.push(b_values[j]);
                }
                i += 1;
                j += 1;
            }
        }
    }

    (
        TimeSeries {
            dates: dates.clone(),
            values: left,
        },
        TimeSeries {
            dates,
            values: right,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::BTreeSet;

    fn day(n: u32) -> NaiveDate {
        NaiveDate::from_yo_opt(2010, n).expect("Invalid date")
    }

    fn series(days: &[u32], values: &[f64]) -> TimeSeries {
        TimeSeries::new(days.iter().map(|&d| day(d)).collect(), values.to_vec()).unwrap()
    }

    #[test]
    fn test_align_returns_intersection_in_order() {
        let a = series(&[1, 2, 4, 7, 9], &[1.0, 2.0, 4.0, 7.0, 9.0]);
        let b = series(&[2, 3, 4, 8, 9, 10], &[20.0, 30.0, 40.0, 80.0, 90.0, 100.0]);

        let (ra, rb) = align(&a, &b);

        let expected: BTreeSet<NaiveDate> = a
            .dates()
            .iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .intersection(&b.dates().iter().copied().collect())
            .copied()
            .collect();

        assert_eq!(ra.dates(), expected.into_iter().collect::<Vec<_>>().as_slice());
        assert_eq!(ra.dates(), rb.dates());
        assert_eq!(ra.values(), &[2.0, 4.0, 9.0]);
        assert_eq!(rb.values(), &[20.0, 40.0, 90.0]);
    }

    #[test]
    fn test_align_drops_missing_values() {
        let a = series(&[1, 2, 3], &[1.0, f64::NAN, 3.0]);
        let b = series(&[1, 2, 3], &[10.0, 20.0, f64::NAN]);

        let (ra, rb) = align(&a, &b);

        assert_eq!(ra.dates(), &[day(1)]);
        assert_eq!(rb.values(), &[10.0]);
    }

    #[test]
    fn test_align_disjoint() {
        let a = series(&[1, 3], &[1.0, 3.0]);
        let b = series(&[2, 4], &[2.0, 4.0]);

        let (ra, rb) = align(&a, &b);
        assert!(ra.is_empty());
        assert!(rb.is_empty());
    }
}
