use crate::text::TokenSet;

/// Jaccard similarity `|A ∩ B| / |A ∪ B|`, in `[0, 1]`.
///
/// Two empty sets have no overlap to speak of and score 0.
pub fn similarity(a: &TokenSet, b: &TokenSet) -> f64 {
    let union = a.union_len(b);
    if union == 0 {
        return 0.0;
    }
    a.intersection_len(b) as f64 / union as f64
}
