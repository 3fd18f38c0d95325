use serde::{Deserialize, Serialize};

/// Sound cues a round can ask the host to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioCue {
    GameOver,
    StarCollected,
    EnemyEliminated,
}

/// Fire-and-forget sink for sound cues.
///
/// Implementations must not block. Playback failures stay inside the notifier.
pub trait AudioNotifier: Send {
    fn play(&mut self, cue: AudioCue, volume: f32);
}

/// Notifier that drops every cue. Used by headless hosts.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNotifier;

impl AudioNotifier for SilentNotifier {
    fn play(&mut self, _cue: AudioCue, _volume: f32) {}
}

/// Notifier that records every cue in order, for tests and replays.
///
/// Clones share the same log so a test can keep a handle after giving the
/// notifier away.
#[derive(Debug, Default, Clone)]
pub struct AudioCueLog {
    played: std::sync::Arc<std::sync::Mutex<Vec<(AudioCue, f32)>>>,
}

impl AudioCueLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cues played so far, oldest first.
    pub fn played(&self) -> Vec<(AudioCue, f32)> {
        match self.played.lock() {
            Ok(played) => played.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Number of times `cue` was played.
    pub fn count(&self, cue: AudioCue) -> usize {
        self.played().iter().filter(|(c, _)| *c == cue).count()
    }
}

impl AudioNotifier for AudioCueLog {
    fn play(&mut self, cue: AudioCue, volume: f32) {
        match self.played.lock() {
            Ok(mut played) => played.push((cue, volume)),
            Err(poisoned) => poisoned.into_inner().push((cue, volume)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_records_in_order() {
        let mut log = AudioCueLog::new();
        log.play(AudioCue::StarCollected, 0.7);
        log.play(AudioCue::GameOver, 1.0);
        assert_eq!(
            log.played(),
            vec![(AudioCue::StarCollected, 0.7), (AudioCue::GameOver, 1.0)]
        );
    }

    #[test]
    fn clones_share_the_log() {
        let log = AudioCueLog::new();
        let mut handed_out = log.clone();
        handed_out.play(AudioCue::EnemyEliminated, 0.7);
        assert_eq!(log.count(AudioCue::EnemyEliminated), 1);
        assert_eq!(log.count(AudioCue::GameOver), 0);
    }
}
