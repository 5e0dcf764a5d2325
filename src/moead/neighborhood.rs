//! Neighborhood construction in weight space.

use super::scalarize::euclidean_distance;

/// Indices of the `k` vectors closest to `weights[i]`, for every `i`.
///
/// Distances are Euclidean; each vector is its own closest neighbor.
/// Lists are ordered by non-decreasing distance, ties by index.
///
/// # Complexity
///
/// O(n² · (m + log n)) for n vectors of dimension m.
///
/// # Panics
/// Panics if `k` exceeds the number of vectors or the vectors differ in
/// dimension.
///
/// # Example
///
/// ```
/// use moead_drp::moead::neighborhood::build_neighborhoods;
///
/// let weights = vec![vec![0.0, 1.0], vec![0.5, 0.5], vec![1.0, 0.0]];
/// let neighbors = build_neighborhoods(&weights, 2);
/// assert_eq!(neighbors[0], vec![0, 1]);
/// assert_eq!(neighbors[2], vec![2, 1]);
/// ```
pub fn build_neighborhoods(weights: &[Vec<f64>], k: usize) -> Vec<Vec<usize>> {
    assert!(
        k <= weights.len(),
        "neighborhood size {k} exceeds population size {}",
        weights.len()
    );

    weights
        .iter()
        .map(|w| {
            let distances: Vec<f64> = weights.iter().map(|o| euclidean_distance(w, o)).collect();
            closest(&distances, k)
        })
        .collect()
}

/// Indices of the `k` smallest distances, ascending, ties by index.
pub fn closest(distances: &[f64], k: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..distances.len()).collect();
    // stable: equal distances keep index order
    order.sort_by(|&a, &b| distances[a].total_cmp(&distances[b]));
    order.truncate(k);
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_weights(n: usize) -> Vec<Vec<f64>> {
        (0..n)
            .map(|i| {
                let a = i as f64 / (n - 1) as f64;
                vec![a, 1.0 - a]
            })
            .collect()
    }

    #[test]
    fn test_self_is_first() {
        let weights = uniform_weights(10);
        let nb = build_neighborhoods(&weights, 4);
        for (i, list) in nb.iter().enumerate() {
            assert_eq!(list[0], i);
            assert_eq!(list.len(), 4);
        }
    }

    #[test]
    fn test_sorted_by_distance() {
        let weights = uniform_weights(11);
        let nb = build_neighborhoods(&weights, 5);
        for (i, list) in nb.iter().enumerate() {
            let d: Vec<f64> = list
                .iter()
                .map(|&j| euclidean_distance(&weights[i], &weights[j]))
                .collect();
            for pair in d.windows(2) {
                assert!(pair[0] <= pair[1], "neighborhood of {i} not sorted: {d:?}");
            }
        }
    }

    #[test]
    fn test_no_duplicates() {
        let weights = uniform_weights(7);
        for list in build_neighborhoods(&weights, 7) {
            let mut sorted = list.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), list.len());
        }
    }

    #[test]
    fn test_ties_broken_by_index() {
        // middle vector is equidistant from both ends
        let weights = uniform_weights(3);
        let nb = build_neighborhoods(&weights, 3);
        assert_eq!(nb[1], vec![1, 0, 2]);
    }

    #[test]
    fn test_closest_ties_keep_order() {
        assert_eq!(closest(&[2.0, 2.0, 1.0], 3), vec![2, 0, 1]);
    }

    #[test]
    fn test_full_neighborhood() {
        let weights = uniform_weights(5);
        let nb = build_neighborhoods(&weights, 5);
        assert_eq!(nb[0], vec![0, 1, 2, 3, 4]);
        assert_eq!(nb[4], vec![4, 3, 2, 1, 0]);
    }

    #[test]
    #[should_panic(expected = "exceeds population size")]
    fn test_k_too_large_panics() {
        build_neighborhoods(&uniform_weights(3), 4);
    }

    #[test]
    #[should_panic(expected = "dimensions differ")]
    fn test_mismatched_dimensions_panic() {
        build_neighborhoods(&[vec![1.0, 0.0], vec![1.0]], 2);
    }
}
