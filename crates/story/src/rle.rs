//! Run-length expansion for the heatmap.

/// Expands `(value, count)` pairs into a dense sequence.
///
/// A trailing value without a count repeats once; negative counts contribute
/// nothing.
///
/// ```
/// use wrapped_story::rle_expand;
///
/// assert_eq!(rle_expand(&[5, 3, 0, 2]), vec![5, 5, 5, 0, 0]);
/// assert_eq!(rle_expand(&[9]), vec![9]);
/// assert!(rle_expand(&[]).is_empty());
/// ```
pub fn rle_expand(pairs: &[i64]) -> Vec<i64> {
    rle_expand_capped(pairs, usize::MAX)
}

/// [`rle_expand`] that stops once `cap` values have been produced, so a
/// hand-edited count cannot balloon memory.
pub(crate) fn rle_expand_capped(pairs: &[i64], cap: usize) -> Vec<i64> {
    let mut out = Vec::new();
    for pair in pairs.chunks(2) {
        let value = pair[0];
        let count = pair.get(1).copied().unwrap_or(1);
        let count = usize::try_from(count).unwrap_or(0);
        let take = count.min(cap - out.len());
        out.extend(std::iter::repeat(value).take(take));
        if out.len() == cap {
            break;
        }
    }
    out
}
