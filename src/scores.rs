const SCORES_KEPT: usize = 3;
const BUCKET_MS: u64 = 100;

/// Points for the current run. One point per whole 100ms bucket of wall time,
/// counted only once the instructions grace period is over.
#[derive(Debug, Clone)]
pub struct ScoreBoard {
    points: u32,
    grace_over: bool,
    last_update: u64,
}

impl ScoreBoard {
    pub fn new(now: u64) -> Self {
        Self {
            points: 0,
            grace_over: false,
            last_update: now,
        }
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn grace_over(&self) -> bool {
        self.grace_over
    }

    /// Called when the grace timer fires. Scoring starts counting from `now`.
    pub fn end_grace(&mut self, now: u64) {
        self.grace_over = true;
        self.last_update = now;
    }

    /// Add every whole bucket elapsed since the last update.
    pub fn accrue(&mut self, now: u64) {
        if !self.grace_over {
            return;
        }
        let elapsed = now.saturating_sub(self.last_update);
        if elapsed >= BUCKET_MS {
            self.points = self.points.saturating_add((elapsed / BUCKET_MS) as u32);
            self.last_update = now;
        }
    }

    /// New run: points back to zero, grace status is kept.
    pub fn reset(&mut self, now: u64) {
        self.points = 0;
        self.last_update = now;
    }
}

/// In-memory top scores, highest first.
#[derive(Debug, Clone, Default)]
pub struct HighScores {
    scores: Vec<u32>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a score, keeping the list sorted descending and at most three
    /// long. Equal scores stay in insertion order. Returns the 0-based rank
    /// if the score made the list.
    pub fn submit(&mut self, score: u32) -> Option<usize> {
        let pos = self
            .scores
            .iter()
            .position(|&s| score > s)
            .unwrap_or(self.scores.len());
        if pos >= SCORES_KEPT {
            return None;
        }
        self.scores.insert(pos, score);
        self.scores.truncate(SCORES_KEPT);
        Some(pos)
    }

    pub fn top_scores(&self) -> &[u32] {
        &self.scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_points_during_grace() {
        let mut board = ScoreBoard::new(0);
        board.accrue(4_900);
        assert_eq!(board.points(), 0);
    }

    #[test]
    fn counts_whole_buckets_since_grace_end() {
        let mut board = ScoreBoard::new(0);
        board.end_grace(5_000);
        board.accrue(5_050);
        assert_eq!(board.points(), 0);
        board.accrue(5_250);
        assert_eq!(board.points(), 2);
        // Leftover 50ms is dropped when the bucket timestamp moves to `now`.
        board.accrue(5_300);
        assert_eq!(board.points(), 2);
        board.accrue(5_350);
        assert_eq!(board.points(), 3);
    }

    #[test]
    fn reset_keeps_grace() {
        let mut board = ScoreBoard::new(0);
        board.end_grace(10);
        board.accrue(1_010);
        board.reset(2_000);
        assert_eq!(board.points(), 0);
        assert!(board.grace_over());
        board.accrue(2_100);
        assert_eq!(board.points(), 1);
    }

    #[test]
    fn keeps_three_highest_descending() {
        let mut hs = HighScores::new();
        for s in [5, 40, 12, 3, 40, 18] {
            hs.submit(s);
        }
        assert_eq!(hs.top_scores(), &[40, 40, 18]);
    }

    #[test]
    fn submit_reports_rank() {
        let mut hs = HighScores::new();
        assert_eq!(hs.submit(10), Some(0));
        assert_eq!(hs.submit(20), Some(0));
        assert_eq!(hs.submit(15), Some(1));
        assert_eq!(hs.submit(1), None);
        assert_eq!(hs.top_scores(), &[20, 15, 10]);
    }

    #[test]
    fn zero_scores_count_while_list_is_short() {
        let mut hs = HighScores::new();
        assert_eq!(hs.submit(0), Some(0));
        assert_eq!(hs.top_scores(), &[0]);
    }

    #[test]
    fn full_list_only_takes_strictly_better_scores() {
        let mut hs = HighScores::new();
        for s in [30, 20, 10] {
            hs.submit(s);
        }
        assert_eq!(hs.submit(10), None);
        assert_eq!(hs.submit(11), Some(2));
        assert_eq!(hs.top_scores(), &[30, 20, 11]);
    }
}
