use rand::Rng;
use suguru_core::Hint;

/// Draws a hint subset of size `min(count, all.len())` without replacement,
/// uniformly over all such subsets.
///
/// `count == 0` yields the empty subset; `count >= all.len()` yields all of
/// `all`. The random source is supplied by the caller, so a seeded generator
/// makes the draw reproducible. The puzzle itself is never touched.
///
/// # Example
///
/// ```
/// use rand::SeedableRng as _;
/// use rand_pcg::Pcg64Mcg;
/// use suguru_core::Puzzle;
/// use suguru_experiment::sample_hints;
///
/// let puzzle = Puzzle::parse("1 3\n1 2 1\n1 1 2\n").unwrap();
/// let all = puzzle.all_hints();
/// let mut rng = Pcg64Mcg::seed_from_u64(7);
///
/// assert!(sample_hints(&all, 0, &mut rng).is_empty());
/// assert_eq!(sample_hints(&all, 99, &mut rng), all);
/// assert_eq!(sample_hints(&all, 2, &mut rng).len(), 2);
/// ```
pub fn sample_hints<R: Rng + ?Sized>(all: &[Hint], count: usize, rng: &mut R) -> Vec<Hint> {
    if count >= all.len() {
        return all.to_vec();
    }
    rand::seq::index::sample(rng, all.len(), count)
        .iter()
        .map(|i| all[i])
        .collect()
}
