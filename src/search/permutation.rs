//! In-place lexicographic permutation enumeration.
//!
//! Used both for job orderings and for vehicle-to-slot assignments. The
//! enumeration works on positions `0..n`, so repeated values in the
//! underlying data can never collapse two orderings into one.

/// Rearranges `items` into the next lexicographically greater permutation.
///
/// Returns `false` (leaving `items` sorted ascending) once the last
/// permutation has been passed. Starting from ascending order, repeated calls
/// visit every permutation of distinct items exactly once.
///
/// # Examples
///
/// ```
/// use u_makespan::search::next_permutation;
///
/// let mut p = [0, 1, 2];
/// let mut seen = vec![p.to_vec()];
/// while next_permutation(&mut p) {
///     seen.push(p.to_vec());
/// }
/// assert_eq!(seen.len(), 6);
/// assert_eq!(seen[1], vec![0, 2, 1]);
/// assert_eq!(p, [0, 1, 2]);
/// ```
pub fn next_permutation<T: Ord>(items: &mut [T]) -> bool {
    let n = items.len();
    if n < 2 {
        return false;
    }

    // Longest non-increasing suffix starts at `i`.
    let mut i = n - 1;
    while i > 0 && items[i - 1] >= items[i] {
        i -= 1;
    }
    if i == 0 {
        items.reverse();
        return false;
    }

    let mut j = n - 1;
    while items[j] <= items[i - 1] {
        j -= 1;
    }
    items.swap(i - 1, j);
    items[i..].reverse();
    true
}

/// Returns the identity permutation `0..n`.
pub fn identity(n: usize) -> Vec<usize> {
    (0..n).collect()
}

/// `n!`, saturating at `u64::MAX`.
pub fn factorial(n: usize) -> u64 {
    (1..=n as u64).fold(1u64, |acc, k| acc.saturating_mul(k))
}
