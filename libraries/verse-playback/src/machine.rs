//! Phase machine
//!
//! Pure decision core that turns engine notifications into ordered phase
//! emissions. The session actor dismantles each notification, reads the
//! point-in-time engine flags, and calls exactly one method here; the
//! machine never touches the engine itself.
//!
//! Invariants enforced here:
//! - one `TrackAdvancing` emission per engine item transition;
//! - play-intent flips are dropped unless the engine is ready;
//! - transient failures are auto-recovered at most
//!   `max_recoveries` consecutive times, then escalate to `Error`.

use tracing::{debug, warn};

use verse_core::{AdvanceDirection, PlaybackPhase};

use crate::engine::{EngineErrorKind, EngineStatus};

/// What one notification produced.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Outcome {
    /// Phase emissions, in order.
    pub emissions: Vec<PlaybackPhase>,
    /// True when the caller must skip past the failed item and re-prime
    /// the engine with play-intent set.
    pub recover: bool,
}

impl Outcome {
    fn phases(emissions: Vec<PlaybackPhase>) -> Self {
        Self {
            emissions,
            recover: false,
        }
    }

    fn recovery() -> Self {
        Self {
            emissions: Vec::new(),
            recover: true,
        }
    }
}

/// Notification-to-phase state machine.
#[derive(Debug)]
pub struct PhaseMachine {
    phase: PlaybackPhase,
    consecutive_recoveries: u32,
    max_recoveries: u32,
}

impl PhaseMachine {
    /// Create a machine in `Idle` with the given recovery bound.
    #[must_use]
    pub fn new(max_recoveries: u32) -> Self {
        Self {
            phase: PlaybackPhase::Idle,
            consecutive_recoveries: 0,
            max_recoveries,
        }
    }

    /// The phase after the most recent emission.
    #[must_use]
    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    /// Engine lifecycle status changed.
    ///
    /// `Ready` double-emits: first `Ready`, then `Playing` or `Paused`
    /// according to the play-intent flag, so consumers always learn both
    /// that the engine is primed and what it will do next.
    pub fn on_status(&mut self, status: EngineStatus, play_when_ready: bool) -> Outcome {
        let emissions = match status {
            EngineStatus::Idle => {
                self.consecutive_recoveries = 0;
                vec![PlaybackPhase::Idle]
            }
            EngineStatus::Buffering => vec![PlaybackPhase::Buffering],
            EngineStatus::Ready => {
                self.consecutive_recoveries = 0;
                let follow_up = if play_when_ready {
                    PlaybackPhase::Playing
                } else {
                    PlaybackPhase::Paused
                };
                vec![PlaybackPhase::Ready, follow_up]
            }
            EngineStatus::Ended => vec![PlaybackPhase::TrackEnded],
        };
        self.record(emissions)
    }

    /// The play-intent flag flipped.
    ///
    /// Only honored while the engine is ready; a flip during buffering or
    /// idle is dropped (the eventual `Ready` carries the truth).
    pub fn on_play_intent(&mut self, ready: bool, play: bool) -> Outcome {
        if !ready {
            debug!(play, "play intent change ignored; engine not ready");
            return Outcome::default();
        }
        let phase = if play {
            PlaybackPhase::Playing
        } else {
            PlaybackPhase::Paused
        };
        self.record(vec![phase])
    }

    /// The engine moved to another playlist item.
    ///
    /// Exactly one `TrackAdvancing` per transition, then `Playing` for
    /// the new item.
    pub fn on_transition(&mut self, direction: AdvanceDirection) -> Outcome {
        self.record(vec![
            PlaybackPhase::TrackAdvancing(direction),
            PlaybackPhase::Playing,
        ])
    }

    /// The engine reported a failure.
    ///
    /// Transient kinds are recovered silently while the consecutive
    /// budget lasts; everything else, and the failure that exhausts the
    /// budget, escalates to `Error`.
    pub fn on_failure(&mut self, kind: EngineErrorKind) -> Outcome {
        if kind.is_transient() && self.consecutive_recoveries < self.max_recoveries {
            self.consecutive_recoveries += 1;
            warn!(
                %kind,
                attempt = self.consecutive_recoveries,
                max = self.max_recoveries,
                "transient engine failure; skipping ahead"
            );
            return Outcome::recovery();
        }
        self.record(vec![PlaybackPhase::Error])
    }

    fn record(&mut self, emissions: Vec<PlaybackPhase>) -> Outcome {
        if let Some(last) = emissions.last() {
            self.phase = *last;
        }
        Outcome::phases(emissions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ready_double_emits_with_intent() {
        let mut machine = PhaseMachine::new(1);
        let outcome = machine.on_status(EngineStatus::Ready, true);
        assert_eq!(
            outcome.emissions,
            vec![PlaybackPhase::Ready, PlaybackPhase::Playing]
        );
        assert_eq!(machine.phase(), PlaybackPhase::Playing);
    }

    #[test]
    fn ready_double_emits_paused_without_intent() {
        let mut machine = PhaseMachine::new(1);
        let outcome = machine.on_status(EngineStatus::Ready, false);
        assert_eq!(
            outcome.emissions,
            vec![PlaybackPhase::Ready, PlaybackPhase::Paused]
        );
    }

    #[test]
    fn buffering_and_ended_emit_single_phases() {
        let mut machine = PhaseMachine::new(1);
        assert_eq!(
            machine.on_status(EngineStatus::Buffering, true).emissions,
            vec![PlaybackPhase::Buffering]
        );
        assert_eq!(
            machine.on_status(EngineStatus::Ended, true).emissions,
            vec![PlaybackPhase::TrackEnded]
        );
    }

    #[test]
    fn intent_flip_ignored_unless_ready() {
        let mut machine = PhaseMachine::new(1);
        let outcome = machine.on_play_intent(false, true);
        assert!(outcome.emissions.is_empty());
        assert_eq!(machine.phase(), PlaybackPhase::Idle);
    }

    #[test]
    fn intent_flip_honored_when_ready() {
        let mut machine = PhaseMachine::new(1);
        machine.on_status(EngineStatus::Ready, true);
        let outcome = machine.on_play_intent(true, false);
        assert_eq!(outcome.emissions, vec![PlaybackPhase::Paused]);
    }

    #[test]
    fn transition_emits_one_advance_then_playing() {
        let mut machine = PhaseMachine::new(1);
        let outcome = machine.on_transition(AdvanceDirection::Next);
        assert_eq!(
            outcome.emissions,
            vec![
                PlaybackPhase::TrackAdvancing(AdvanceDirection::Next),
                PlaybackPhase::Playing,
            ]
        );
        let advances = outcome
            .emissions
            .iter()
            .filter(|phase| matches!(phase, PlaybackPhase::TrackAdvancing(_)))
            .count();
        assert_eq!(advances, 1);
    }

    #[test]
    fn first_transient_failure_recovers_silently() {
        let mut machine = PhaseMachine::new(1);
        let outcome = machine.on_failure(EngineErrorKind::Timeout);
        assert!(outcome.recover);
        assert!(outcome.emissions.is_empty());
        assert_eq!(machine.phase(), PlaybackPhase::Idle);
    }

    #[test]
    fn second_consecutive_transient_failure_escalates() {
        let mut machine = PhaseMachine::new(1);
        assert!(machine.on_failure(EngineErrorKind::Timeout).recover);

        let outcome = machine.on_failure(EngineErrorKind::Timeout);
        assert!(!outcome.recover);
        assert_eq!(outcome.emissions, vec![PlaybackPhase::Error]);
        assert_eq!(machine.phase(), PlaybackPhase::Error);
    }

    #[test]
    fn reaching_ready_resets_the_recovery_budget() {
        let mut machine = PhaseMachine::new(1);
        assert!(machine.on_failure(EngineErrorKind::Timeout).recover);
        machine.on_status(EngineStatus::Ready, true);
        assert!(machine.on_failure(EngineErrorKind::Timeout).recover);
    }

    #[test]
    fn non_transient_failures_never_recover() {
        let mut machine = PhaseMachine::new(5);
        let outcome = machine.on_failure(EngineErrorKind::Decode);
        assert!(!outcome.recover);
        assert_eq!(outcome.emissions, vec![PlaybackPhase::Error]);
    }

    #[test]
    fn zero_budget_escalates_immediately() {
        let mut machine = PhaseMachine::new(0);
        let outcome = machine.on_failure(EngineErrorKind::Timeout);
        assert!(!outcome.recover);
        assert_eq!(outcome.emissions, vec![PlaybackPhase::Error]);
    }
}
