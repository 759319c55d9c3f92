//! Monotone-array search.
//!
//! Left insertion-point search over ascending arrays, with numpy's
//! `searchsorted(side="left")` semantics: the returned index `i` satisfies
//! `a[..i] < v <= a[i..]`. NaN needles sort after every finite value, so
//! they map to `a.len()`.
use ndarray::ArrayView1;

/// Leftmost insertion index of `needle` in the ascending `haystack`.
///
/// Returns a value in `0..=haystack.len()`. The haystack is assumed sorted;
/// an unsorted haystack yields an unspecified (but in-range) index.
/// Non-contiguous views fall back to a linear scan.
pub fn search_sorted_left(haystack: ArrayView1<'_, f64>, needle: f64) -> usize {
    if needle.is_nan() {
        return haystack.len();
    }

    match haystack.as_slice() {
        Some(slice) => slice.partition_point(|&v| v < needle),
        None => haystack.iter().take_while(|&&v| v < needle).count(),
    }
}

/// Left insertion index clamped to the last valid position.
///
/// Values beyond the right edge map to `len - 1` instead of `len`. Returns
/// `None` for an empty haystack.
pub fn search_sorted_clamped(haystack: ArrayView1<'_, f64>, needle: f64) -> Option<usize> {
    let last = haystack.len().checked_sub(1)?;
    Some(search_sorted_left(haystack, needle).min(last))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // Check left-side semantics on exact hits, gaps, and both edges.
    //
    // Given
    // -----
    // - Haystack `[-1, 0, 0, 2]`.
    //
    // Expect
    // ------
    // - Exact hits return the first equal index; values past the right edge
    //   return `len`; values before the left edge return 0.
    fn search_sorted_left_matches_numpy_left_side() {
        let a = array![-1.0, 0.0, 0.0, 2.0];

        assert_eq!(search_sorted_left(a.view(), -5.0), 0);
        assert_eq!(search_sorted_left(a.view(), -1.0), 0);
        assert_eq!(search_sorted_left(a.view(), 0.0), 1);
        assert_eq!(search_sorted_left(a.view(), 1.0), 3);
        assert_eq!(search_sorted_left(a.view(), 2.0), 3);
        assert_eq!(search_sorted_left(a.view(), 9.0), 4);
    }

    #[test]
    // Purpose
    // -------
    // NaN needles sort last and clamping keeps indices in range.
    //
    // Given
    // -----
    // - Haystack `[0, 1, 2]` and an empty haystack.
    //
    // Expect
    // ------
    // - NaN maps to `len`; the clamped search maps it and overflowing values
    //   to `len - 1`; the empty haystack yields `None`.
    fn search_sorted_clamped_keeps_index_in_range() {
        let a = array![0.0, 1.0, 2.0];
        let empty = ndarray::Array1::<f64>::zeros(0);

        assert_eq!(search_sorted_left(a.view(), f64::NAN), 3);
        assert_eq!(search_sorted_clamped(a.view(), f64::NAN), Some(2));
        assert_eq!(search_sorted_clamped(a.view(), 7.5), Some(2));
        assert_eq!(search_sorted_clamped(a.view(), 0.5), Some(1));
        assert_eq!(search_sorted_clamped(empty.view(), 0.5), None);
    }

    #[test]
    // Purpose
    // -------
    // Strided views give the same insertion points as contiguous ones.
    //
    // Given
    // -----
    // - Every other entry of `[-1, 9, 0, 9, 0, 9, 2, 9]`, i.e. `[-1, 0, 0, 2]`.
    //
    // Expect
    // ------
    // - The same indices as the contiguous haystack.
    fn search_sorted_left_handles_strided_views() {
        let raw = array![-1.0, 9.0, 0.0, 9.0, 0.0, 9.0, 2.0, 9.0];
        let strided = raw.slice(ndarray::s![..;2]);

        assert_eq!(search_sorted_left(strided, 0.0), 1);
        assert_eq!(search_sorted_left(strided, 1.0), 3);
        assert_eq!(search_sorted_left(strided, 5.0), 4);
        assert_eq!(search_sorted_left(strided, f64::NAN), 4);
    }
}
