//! Frame and scoring state machine
//!
//! Raw per-frame throw counts are the source of truth. Strike/spare bonus
//! look-ahead is computed functionally from them at read time, never stored,
//! so replaying the same throws always yields the same scores.

use serde::{Deserialize, Serialize};

use crate::consts::FRAME_COUNT;

/// Pins standing in a fresh rack
pub const RACK_SIZE: u8 = 10;

/// Raw throw record for one frame
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRecord {
    /// Pins felled per throw (1-2 entries, 3 in the tenth)
    pub throws: Vec<u8>,
}

impl FrameRecord {
    pub fn is_strike(&self) -> bool {
        self.throws.first() == Some(&RACK_SIZE)
    }

    pub fn is_spare(&self) -> bool {
        !self.is_strike()
            && self.throws.len() >= 2
            && self.throws[0] + self.throws[1] == RACK_SIZE
    }

    /// Raw pin total, no bonuses
    pub fn pin_total(&self) -> u32 {
        self.throws.iter().map(|&t| u32::from(t)).sum()
    }
}

/// What the lane should do before the next throw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RackAction {
    /// Re-rack all ten pins
    Fresh,
    /// Leave the standing pins where they are
    Keep,
}

/// Summary of a recorded throw, consumed by the tick loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrowOutcome {
    /// Frame index that closed on this throw, if any
    pub frame_closed: Option<usize>,
    pub rack: RackAction,
    pub game_over: bool,
}

/// Per-game scorecard: completed frames plus the frame in progress
///
/// `frame_index` only advances when a frame closes; the current frame's
/// throws accumulate separately and move into `completed` on close.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scorecard {
    completed: Vec<FrameRecord>,
    current_throws: Vec<u8>,
    game_over: bool,
}

impl Scorecard {
    pub fn new() -> Self {
        Self::default()
    }

    /// 0-based index of the frame in progress (9 once the game is over)
    pub fn frame_index(&self) -> usize {
        self.completed.len().min(FRAME_COUNT - 1)
    }

    pub fn current_throws(&self) -> &[u8] {
        &self.current_throws
    }

    pub fn completed_frames(&self) -> &[FrameRecord] {
        &self.completed
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Record a settled throw's pin count and advance the frame machine
    ///
    /// Recording against a finished game is a no-op.
    pub fn record_throw(&mut self, pins: u8) -> ThrowOutcome {
        if self.game_over {
            return ThrowOutcome {
                frame_closed: None,
                rack: RackAction::Keep,
                game_over: true,
            };
        }

        let frame = self.completed.len();
        self.current_throws.push(pins);

        if frame < FRAME_COUNT - 1 {
            self.record_standard_frame(frame)
        } else {
            self.record_tenth_frame(pins)
        }
    }

    fn record_standard_frame(&mut self, frame: usize) -> ThrowOutcome {
        let strike = self.current_throws[0] == RACK_SIZE;
        let closed = strike || self.current_throws.len() == 2;

        if closed {
            self.completed.push(FrameRecord {
                throws: std::mem::take(&mut self.current_throws),
            });
            ThrowOutcome {
                frame_closed: Some(frame),
                rack: RackAction::Fresh,
                game_over: false,
            }
        } else {
            // Second ball bowls at whatever is left standing
            ThrowOutcome {
                frame_closed: None,
                rack: RackAction::Keep,
                game_over: false,
            }
        }
    }

    fn record_tenth_frame(&mut self, pins: u8) -> ThrowOutcome {
        let thrown = self.current_throws.len();
        let first = self.current_throws[0];
        let second = self.current_throws.get(1).copied();

        let earned_bonus =
            first == RACK_SIZE || second.is_some_and(|s| first + s == RACK_SIZE);
        let required = if earned_bonus { 3 } else { 2 };

        if thrown >= required {
            self.completed.push(FrameRecord {
                throws: std::mem::take(&mut self.current_throws),
            });
            self.game_over = true;
            return ThrowOutcome {
                frame_closed: Some(FRAME_COUNT - 1),
                rack: RackAction::Keep,
                game_over: true,
            };
        }

        // Any ball that would close an earlier frame earns a fresh rack for
        // the bonus ball; otherwise the leftovers stay up (e.g. strike then
        // 7 leaves 3 pins for the third ball).
        let fresh = pins == RACK_SIZE
            || (thrown == 2 && first != RACK_SIZE && first + second.unwrap_or(0) == RACK_SIZE);
        ThrowOutcome {
            frame_closed: None,
            rack: if fresh { RackAction::Fresh } else { RackAction::Keep },
            game_over: false,
        }
    }

    /// Cumulative display scores with strike/spare bonus look-ahead
    ///
    /// A slot stays `None` until its frame's value is resolvable from later
    /// throws; the tenth frame is self-contained.
    pub fn cumulative_scores(&self) -> [Option<u32>; FRAME_COUNT] {
        let mut frames: Vec<&[u8]> = self.completed.iter().map(|f| f.throws.as_slice()).collect();
        if !self.current_throws.is_empty() {
            frames.push(&self.current_throws);
        }

        let mut scores = [None; FRAME_COUNT];
        let mut running = 0u32;

        for i in 0..FRAME_COUNT {
            let Some(&throws) = frames.get(i) else { break };

            let value = if i == FRAME_COUNT - 1 {
                // Tenth: closed only once it sits in `completed`
                if self.completed.len() == FRAME_COUNT {
                    Some(throws.iter().map(|&t| u32::from(t)).sum())
                } else {
                    None
                }
            } else if throws[0] == RACK_SIZE {
                Self::throws_after(&frames, i, 2).map(|bonus| 10 + bonus)
            } else if throws.len() == 2 {
                if throws[0] + throws[1] == RACK_SIZE {
                    Self::throws_after(&frames, i, 1).map(|bonus| 10 + bonus)
                } else {
                    Some(u32::from(throws[0]) + u32::from(throws[1]))
                }
            } else {
                None
            };

            match value {
                Some(v) => {
                    running += v;
                    scores[i] = Some(running);
                }
                None => break,
            }
        }

        scores
    }

    /// Sum of the next `count` throws after frame `i`, if enough were bowled
    fn throws_after(frames: &[&[u8]], i: usize, count: usize) -> Option<u32> {
        let later: Vec<u8> = frames[i + 1..].iter().flat_map(|t| t.iter().copied()).collect();
        if later.len() >= count {
            Some(later[..count].iter().map(|&t| u32::from(t)).sum())
        } else {
            None
        }
    }

    /// Final game total, once every frame has resolved
    pub fn total(&self) -> Option<u32> {
        self.cumulative_scores()[FRAME_COUNT - 1]
    }

    /// Number of ten-pin balls bowled (tenth-frame bonus strikes included)
    pub fn strike_count(&self) -> usize {
        self.completed
            .iter()
            .flat_map(|f| f.throws.iter())
            .chain(self.current_throws.iter())
            .filter(|&&t| t == RACK_SIZE)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replay(throws: &[u8]) -> Scorecard {
        let mut card = Scorecard::new();
        for &t in throws {
            card.record_throw(t);
        }
        card
    }

    #[test]
    fn test_strike_closes_frame_after_one_throw() {
        let mut card = Scorecard::new();
        let outcome = card.record_throw(10);
        assert_eq!(outcome.frame_closed, Some(0));
        assert_eq!(outcome.rack, RackAction::Fresh);
        assert_eq!(card.frame_index(), 1);
    }

    #[test]
    fn test_open_frame_keeps_rack_between_balls() {
        let mut card = Scorecard::new();
        let outcome = card.record_throw(7);
        assert_eq!(outcome.frame_closed, None);
        assert_eq!(outcome.rack, RackAction::Keep);

        let outcome = card.record_throw(2);
        assert_eq!(outcome.frame_closed, Some(0));
        assert_eq!(outcome.rack, RackAction::Fresh);
        assert_eq!(card.cumulative_scores()[0], Some(9));
    }

    #[test]
    fn test_spare_scores_ten_plus_next_ball() {
        let card = replay(&[7, 3, 4, 2]);
        let scores = card.cumulative_scores();
        assert_eq!(scores[0], Some(14));
        assert_eq!(scores[1], Some(20));
    }

    #[test]
    fn test_strike_bonus_waits_for_two_throws() {
        let card = replay(&[10]);
        assert_eq!(card.cumulative_scores()[0], None);

        let card = replay(&[10, 3]);
        assert_eq!(card.cumulative_scores()[0], None);

        let card = replay(&[10, 3, 4]);
        assert_eq!(card.cumulative_scores()[0], Some(17));
    }

    #[test]
    fn test_perfect_game_is_300() {
        let card = replay(&[10; 12]);
        assert!(card.is_game_over());
        assert_eq!(card.total(), Some(300));
        assert_eq!(card.strike_count(), 12);
    }

    #[test]
    fn test_all_spares_of_five() {
        let card = replay(&[5; 21]);
        assert!(card.is_game_over());
        assert_eq!(card.total(), Some(150));
    }

    #[test]
    fn test_gutter_game() {
        let card = replay(&[0; 20]);
        assert!(card.is_game_over());
        assert_eq!(card.total(), Some(0));
    }

    #[test]
    fn test_tenth_frame_open_ends_after_two() {
        let mut card = replay(&[0; 18]);
        assert!(!card.is_game_over());
        card.record_throw(3);
        let outcome = card.record_throw(4);
        assert!(outcome.game_over);
        assert_eq!(card.total(), Some(7));
    }

    #[test]
    fn test_tenth_frame_strike_then_leftovers() {
        let mut card = replay(&[0; 18]);
        let outcome = card.record_throw(10);
        assert_eq!(outcome.rack, RackAction::Fresh);
        assert!(!outcome.game_over);

        // Strike then 7: third ball bowls at the 3 leftovers
        let outcome = card.record_throw(7);
        assert_eq!(outcome.rack, RackAction::Keep);
        assert!(!outcome.game_over);

        let outcome = card.record_throw(3);
        assert!(outcome.game_over);
        assert_eq!(card.total(), Some(20));
    }

    #[test]
    fn test_tenth_frame_spare_grants_fresh_rack() {
        let mut card = replay(&[0; 18]);
        card.record_throw(6);
        let outcome = card.record_throw(4);
        assert_eq!(outcome.rack, RackAction::Fresh);
        assert!(!outcome.game_over);

        let outcome = card.record_throw(10);
        assert!(outcome.game_over);
        assert_eq!(card.total(), Some(20));
    }

    #[test]
    fn test_replay_is_idempotent() {
        let throws = [10, 7, 3, 9, 0, 10, 10, 5, 5, 8, 1, 0, 10, 6, 4, 10, 10, 10];
        let a = replay(&throws).cumulative_scores();
        let b = replay(&throws).cumulative_scores();
        assert_eq!(a, b);
    }

    #[test]
    fn test_recording_after_game_over_is_ignored() {
        let mut card = replay(&[0; 20]);
        assert!(card.is_game_over());
        let outcome = card.record_throw(10);
        assert_eq!(outcome.frame_closed, None);
        assert_eq!(card.total(), Some(0));
    }

    #[test]
    fn test_textbook_game() {
        // 1: X, 2: 7/, 3: 9-, 4: X, 5: 8/, 6-9 open 7+2, 10: X X X
        let card = replay(&[10, 7, 3, 9, 0, 10, 8, 2, 7, 2, 7, 2, 7, 2, 7, 2, 10, 10, 10]);
        let scores = card.cumulative_scores();
        assert_eq!(scores[0], Some(20));
        assert_eq!(scores[1], Some(39));
        assert_eq!(scores[2], Some(48));
        assert_eq!(scores[3], Some(68));
        assert_eq!(scores[4], Some(85));
        assert_eq!(scores[8], Some(121));
        assert_eq!(scores[9], Some(151));
        assert!(card.is_game_over());
    }
}
