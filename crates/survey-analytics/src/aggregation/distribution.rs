//! Percentage arithmetic shared by every aggregation.

use serde::Serialize;
use serde::ser::SerializeMap;

/// Round to two decimal places, half away from zero.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `100 × count / total` rounded to two decimals, `0.0` for an empty total.
pub(crate) fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(count as f64 / total as f64 * 100.0)
}

/// Split `total` respondents into two-decimal percentages per count.
///
/// Works in integer hundredths and hands leftover hundredths to the largest
/// remainders (earlier categories win ties), so shares of a fully covered
/// group add up to exactly 100.00.
pub(crate) fn apportion(counts: &[usize], total: usize) -> Vec<f64> {
    if total == 0 {
        return vec![0.0; counts.len()];
    }

    let total = total as u64;
    let covered: u64 = counts.iter().map(|&c| c as u64).sum();
    let target = (covered * 10_000 * 2 + total) / (2 * total);

    let mut hundredths: Vec<u64> = Vec::with_capacity(counts.len());
    let mut remainders: Vec<(usize, u64)> = Vec::with_capacity(counts.len());
    for (idx, &count) in counts.iter().enumerate() {
        let scaled = count as u64 * 10_000;
        hundredths.push(scaled / total);
        remainders.push((idx, scaled % total));
    }

    let assigned: u64 = hundredths.iter().sum();
    let leftover = target.saturating_sub(assigned) as usize;
    remainders.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    for &(idx, _) in remainders.iter().filter(|(_, rem)| *rem > 0).take(leftover) {
        hundredths[idx] += 1;
    }

    hundredths.into_iter().map(|h| h as f64 / 100.0).collect()
}

/// Percentage breakdown over a fixed, ordered list of categories.
///
/// Serializes as a JSON object whose keys keep the category order.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    shares: Vec<(&'static str, f64)>,
}

impl Distribution {
    /// Distribution of `values` (already restricted to one group) over `order`.
    pub(crate) fn from_values<'v>(
        order: &[&'static str],
        values: impl IntoIterator<Item = Option<&'v str>>,
    ) -> Self {
        let mut counts = vec![0usize; order.len()];
        let mut total = 0usize;
        for value in values {
            total += 1;
            if let Some(idx) = value.and_then(|v| order.iter().position(|c| *c == v)) {
                counts[idx] += 1;
            }
        }

        let shares = order
            .iter()
            .copied()
            .zip(apportion(&counts, total))
            .collect();
        Self { shares }
    }

    /// Share of one category, `None` if it is not part of the order.
    pub fn get(&self, category: &str) -> Option<f64> {
        self.shares
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, pct)| *pct)
    }

    /// Categories with their shares, in order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.shares.iter().copied()
    }

    /// Shares in category order.
    pub fn values(&self) -> Vec<f64> {
        self.shares.iter().map(|(_, pct)| *pct).collect()
    }

    /// Sum of all shares (100.0 for a covered group, 0.0 for an empty one).
    pub fn total(&self) -> f64 {
        self.shares.iter().map(|(_, pct)| pct).sum()
    }

    /// True when the group had no respondents.
    pub fn is_empty_group(&self) -> bool {
        self.shares.iter().all(|(_, pct)| *pct == 0.0)
    }
}

impl Serialize for Distribution {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.shares.len()))?;
        for (category, pct) in &self.shares {
            map.serialize_entry(category, pct)?;
        }
        map.end()
    }
}
