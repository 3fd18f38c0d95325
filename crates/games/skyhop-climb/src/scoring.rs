use skyhop_core::score_store::ScoreStore;

/// Outcome of awarding one star.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarAward {
    pub score: u32,
    /// Set when the award beat the previous high score.
    pub new_high_score: Option<u32>,
}

/// Add one point and persist the high score when it is beaten.
///
/// The store is written only when the new score exceeds the known high score.
pub fn award_star(
    score: &mut u32,
    high_score: &mut u32,
    store: &mut dyn ScoreStore,
) -> StarAward {
    *score = score.saturating_add(1);
    let new_high_score = if *score > *high_score {
        *high_score = *score;
        store.set_high_score(*high_score);
        Some(*high_score)
    } else {
        None
    };
    StarAward {
        score: *score,
        new_high_score,
    }
}

/// High score at the start of a round: the stored value.
pub fn initial_high_score(store: &dyn ScoreStore) -> u32 {
    store.high_score()
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyhop_core::score_store::MemoryScoreStore;

    #[test]
    fn below_high_score_does_not_write() {
        let mut store = MemoryScoreStore::with_high_score(5);
        let mut score = 1;
        let mut high = initial_high_score(&store);
        let award = award_star(&mut score, &mut high, &mut store);
        assert_eq!(award.score, 2);
        assert_eq!(award.new_high_score, None);
        assert_eq!(high, 5);
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn tying_is_not_beating() {
        let mut store = MemoryScoreStore::with_high_score(2);
        let mut score = 1;
        let mut high = 2;
        let award = award_star(&mut score, &mut high, &mut store);
        assert_eq!(award.new_high_score, None);
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn beating_high_score_persists() {
        let mut store = MemoryScoreStore::with_high_score(2);
        let mut score = 2;
        let mut high = 2;
        let award = award_star(&mut score, &mut high, &mut store);
        assert_eq!(award.new_high_score, Some(3));
        assert_eq!(store.high_score(), 3);
        assert_eq!(store.writes(), 1);
    }

    #[test]
    fn high_score_tracks_best_round() {
        let mut store = MemoryScoreStore::new();
        let mut high = initial_high_score(&store);
        for stars_this_round in [3u32, 1, 4, 2] {
            let mut score = 0;
            for _ in 0..stars_this_round {
                award_star(&mut score, &mut high, &mut store);
            }
        }
        assert_eq!(high, 4);
        assert_eq!(store.high_score(), 4);
    }
}
