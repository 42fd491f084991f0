//! Ranking rule trait.

/// Assigns a sort key to the record at one batch position.
///
/// Smaller keys rank first; rules that prefer larger values negate them.
///
/// # Examples
///
/// ```
/// use u_gridalloc::ranking::RankRule;
///
/// /// Largest demand first.
/// struct LargestDemand;
///
/// impl RankRule<[f64]> for LargestDemand {
///     fn name(&self) -> &str { "LargestDemand" }
///     fn key(&self, index: usize, demands: &[f64]) -> f64 { -demands[index] }
/// }
///
/// assert_eq!(LargestDemand.key(1, &[2.0, 4.0]), -4.0);
/// ```
pub trait RankRule<C: ?Sized>: Send + Sync {
    fn name(&self) -> &str;

    /// Key of the record at `index`.
    fn key(&self, index: usize, context: &C) -> f64;
}
