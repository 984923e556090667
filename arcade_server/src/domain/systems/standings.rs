use crate::domain::state::PlayerId;

/// Returns the sole holder of the highest score, or `None` when the maximum is shared
/// (or there are no contenders).
pub fn leader(scores: impl IntoIterator<Item = (PlayerId, u64)>) -> Option<PlayerId> {
    let mut best: Option<(PlayerId, u64)> = None;
    let mut tied = false;

    for (id, score) in scores {
        match best {
            Some((_, top)) if score < top => {}
            Some((_, top)) if score == top => tied = true,
            _ => {
                best = Some((id, score));
                tied = false;
            }
        }
    }

    if tied { None } else { best.map(|(id, _)| id) }
}
