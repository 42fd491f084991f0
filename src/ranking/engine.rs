//! Lexicographic ranking over a rule chain.

use super::types::RankRule;
use std::cmp::Ordering;

/// Ranks batch positions by a chain of [`RankRule`]s.
///
/// The first rule decides; each later rule only breaks exact ties left by
/// the ones before it. Positions tied on every rule keep ascending order.
/// `-0.0` and `0.0` keys count as equal.
pub struct Ranker<C: ?Sized> {
    rules: Vec<Box<dyn RankRule<C>>>,
}

impl<C: ?Sized> Ranker<C> {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Appends a tie-breaking rule.
    pub fn then<R: RankRule<C> + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rule names, most significant first.
    pub fn names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Positions `0..n` in rank order.
    pub fn rank(&self, n: usize, context: &C) -> Vec<usize> {
        let width = self.rules.len();
        let keys: Vec<f64> = (0..n)
            // `+ 0.0` folds -0.0 into 0.0 so `total_cmp` sees one zero.
            .flat_map(|i| self.rules.iter().map(move |r| r.key(i, context) + 0.0))
            .collect();

        let mut order: Vec<usize> = (0..n).collect();
        if width == 0 {
            return order;
        }
        order.sort_by(|&a, &b| {
            let ka = &keys[a * width..(a + 1) * width];
            let kb = &keys[b * width..(b + 1) * width];
            ka.iter()
                .zip(kb)
                .map(|(x, y)| x.total_cmp(y))
                .find(|o| o.is_ne())
                .unwrap_or(Ordering::Equal)
        });
        order
    }

    /// Top-ranked position, if `n > 0`.
    pub fn first(&self, n: usize, context: &C) -> Option<usize> {
        self.rank(n, context).first().copied()
    }
}

impl<C: ?Sized> Default for Ranker<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// (priority, demand) pairs.
    type Table = [(u8, f64)];

    struct MostUrgent;
    impl RankRule<Table> for MostUrgent {
        fn name(&self) -> &str {
            "MostUrgent"
        }
        fn key(&self, i: usize, t: &Table) -> f64 {
            -f64::from(t[i].0)
        }
    }

    struct SmallestDemand;
    impl RankRule<Table> for SmallestDemand {
        fn name(&self) -> &str {
            "SmallestDemand"
        }
        fn key(&self, i: usize, t: &Table) -> f64 {
            t[i].1
        }
    }

    const TABLE: [(u8, f64); 5] = [(1, 4.0), (3, 9.0), (2, 1.0), (3, 2.0), (1, 4.0)];

    #[test]
    fn test_first_rule_decides() {
        let ranker = Ranker::new().then(MostUrgent);
        // Priority ties keep ascending position.
        assert_eq!(ranker.rank(5, &TABLE[..]), vec![1, 3, 2, 0, 4]);
    }

    #[test]
    fn test_later_rule_breaks_ties() {
        let ranker = Ranker::new().then(MostUrgent).then(SmallestDemand);
        assert_eq!(ranker.rank(5, &TABLE[..]), vec![3, 1, 2, 0, 4]);
        assert_eq!(ranker.first(5, &TABLE[..]), Some(3));
    }

    #[test]
    fn test_ties_are_exact() {
        let table = [(3, 1.0 + 1e-12), (3, 1.0)];
        let ranker = Ranker::new().then(MostUrgent).then(SmallestDemand);
        assert_eq!(ranker.rank(2, &table[..]), vec![1, 0]);
    }

    #[test]
    fn test_signed_zero_keys_tie() {
        let table = [(1, 0.0), (1, -0.0), (1, 0.0)];
        let ranker = Ranker::new().then(MostUrgent).then(SmallestDemand);
        assert_eq!(ranker.rank(3, &table[..]), vec![0, 1, 2]);
        let table = [(1, -0.0), (1, 0.0)];
        assert_eq!(ranker.rank(2, &table[..]), vec![0, 1]);
    }

    #[test]
    fn test_without_rules_keeps_order() {
        let ranker = Ranker::<Table>::new();
        assert!(ranker.is_empty());
        assert_eq!(ranker.rank(5, &TABLE[..]), vec![0, 1, 2, 3, 4]);
        assert_eq!(ranker.first(0, &TABLE[..]), None);
    }

    #[test]
    fn test_names() {
        let ranker = Ranker::new().then(MostUrgent).then(SmallestDemand);
        assert_eq!(ranker.len(), 2);
        assert_eq!(ranker.names(), vec!["MostUrgent", "SmallestDemand"]);
    }
}
