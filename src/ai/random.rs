use rand::Rng;

/// Uniform choice among legal columns, `None` if there are none.
pub fn random_column<R: Rng + ?Sized>(legal: &[usize], rng: &mut R) -> Option<usize> {
    if legal.is_empty() {
        return None;
    }
    let idx = rng.random_range(0..legal.len());
    Some(legal[idx])
}
