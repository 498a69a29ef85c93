//! Sound cues.
//!
//! The terminal has one instrument: the bell. Game events are mapped to
//! named cues and the player decides which of them are loud enough to ring.

use std::io::{self, Write};

use crate::types::GameEvent;

/// Volume at or above which per-segment water cues ring as well.
const WATER_CUE_VOLUME: f32 = 0.5;

/// Volume change for one press of the volume keys.
pub const VOLUME_STEP: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoundConfig {
    pub enabled: bool,
    volume: f32,
}

impl SoundConfig {
    pub fn new(enabled: bool, volume: f32) -> Self {
        Self {
            enabled,
            volume: clamp_volume(volume),
        }
    }

    pub fn muted() -> Self {
        Self::new(false, 0.0)
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = clamp_volume(volume);
    }

    /// Shift the volume by `delta`, kept on whole percents so repeated
    /// steps land back on the same values.
    pub fn nudge_volume(&mut self, delta: f32) {
        self.set_volume(((self.volume + delta) * 100.0).round() / 100.0);
    }

    /// Flip mute. Returns the new `enabled` flag.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }

    pub fn audible(&self) -> bool {
        self.enabled && self.volume > 0.0
    }
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self::new(true, 0.3)
    }
}

fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        0.0
    } else {
        volume.clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Place,
    Discard,
    WaterFlow,
    Countdown,
    LevelComplete,
    LevelFail,
}

pub fn cue_for(event: GameEvent) -> Option<Cue> {
    match event {
        GameEvent::PipePlaced { .. } => Some(Cue::Place),
        GameEvent::PipeDiscarded { .. } => Some(Cue::Discard),
        GameEvent::FlowStarted => Some(Cue::Countdown),
        GameEvent::WaterAdvanced { .. } => Some(Cue::WaterFlow),
        GameEvent::LevelComplete { .. } => Some(Cue::LevelComplete),
        GameEvent::LevelFailed { .. } => Some(Cue::LevelFail),
    }
}

/// Rings the bell on a writer (stdout by default) for audible cues.
pub struct SoundPlayer<W: Write = io::Stdout> {
    config: SoundConfig,
    out: W,
    played: u32,
}

impl SoundPlayer<io::Stdout> {
    pub fn new(config: SoundConfig) -> Self {
        Self::with_writer(config, io::stdout())
    }
}

impl<W: Write> SoundPlayer<W> {
    pub fn with_writer(config: SoundConfig, out: W) -> Self {
        Self {
            config,
            out,
            played: 0,
        }
    }

    pub fn config(&self) -> SoundConfig {
        self.config
    }

    pub fn config_mut(&mut self) -> &mut SoundConfig {
        &mut self.config
    }

    /// Number of cues that actually rang.
    pub fn played(&self) -> u32 {
        self.played
    }

    pub fn should_ring(&self, cue: Cue) -> bool {
        if !self.config.audible() {
            return false;
        }
        match cue {
            Cue::WaterFlow => self.config.volume >= WATER_CUE_VOLUME,
            _ => true,
        }
    }

    /// Play one cue. Returns whether the bell rang.
    pub fn play(&mut self, cue: Cue) -> io::Result<bool> {
        if !self.should_ring(cue) {
            return Ok(false);
        }
        self.out.write_all(b"\x07")?;
        self.out.flush()?;
        self.played += 1;
        Ok(true)
    }

    /// Play the cues for a batch of drained events.
    ///
    /// Several cues in one frame collapse into a single bell.
    pub fn play_events(&mut self, events: &[GameEvent]) -> io::Result<bool> {
        let cue = events
            .iter()
            .filter_map(|e| cue_for(*e))
            .filter(|c| self.should_ring(*c))
            .max_by_key(|c| priority(*c));
        match cue {
            Some(cue) => self.play(cue),
            None => Ok(false),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn priority(cue: Cue) -> u8 {
    match cue {
        Cue::WaterFlow => 0,
        Cue::Place | Cue::Discard => 1,
        Cue::Countdown => 2,
        Cue::LevelFail | Cue::LevelComplete => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PipeKind;

    #[test]
    fn volume_is_clamped() {
        assert_eq!(SoundConfig::new(true, 3.0).volume(), 1.0);
        assert_eq!(SoundConfig::new(true, -1.0).volume(), 0.0);
        assert_eq!(SoundConfig::new(true, f32::NAN).volume(), 0.0);
        assert_eq!(SoundConfig::default().volume(), 0.3);
    }

    #[test]
    fn volume_steps_stay_in_range() {
        let mut config = SoundConfig::new(true, 0.9);
        config.nudge_volume(VOLUME_STEP);
        config.nudge_volume(VOLUME_STEP);
        assert_eq!(config.volume(), 1.0);

        let mut config = SoundConfig::new(true, 0.3);
        config.nudge_volume(VOLUME_STEP);
        config.nudge_volume(-VOLUME_STEP);
        assert_eq!(config.volume(), 0.3);
        for _ in 0..5 {
            config.nudge_volume(-VOLUME_STEP);
        }
        assert_eq!(config.volume(), 0.0);
        assert!(!config.audible());
    }

    #[test]
    fn toggle_mutes_a_live_player() {
        let mut player = SoundPlayer::with_writer(SoundConfig::default(), Vec::new());
        assert!(!player.config_mut().toggle());
        assert!(!player.play(Cue::Place).unwrap());
        assert!(player.config_mut().toggle());
        assert!(player.play(Cue::Place).unwrap());

        // Raising the volume live lets water cues through.
        player.config_mut().nudge_volume(0.3);
        assert!(player.should_ring(Cue::WaterFlow));
        assert_eq!(player.played(), 1);
    }

    #[test]
    fn muted_player_never_rings() {
        let mut player = SoundPlayer::with_writer(SoundConfig::muted(), Vec::new());
        assert!(!player.play(Cue::LevelComplete).unwrap());
        assert!(player.into_inner().is_empty());
    }

    #[test]
    fn water_cue_needs_higher_volume() {
        let mut quiet = SoundPlayer::with_writer(SoundConfig::new(true, 0.3), Vec::new());
        assert!(!quiet.play(Cue::WaterFlow).unwrap());
        assert!(quiet.play(Cue::Place).unwrap());

        let mut loud = SoundPlayer::with_writer(SoundConfig::new(true, 0.8), Vec::new());
        assert!(loud.play(Cue::WaterFlow).unwrap());
        assert_eq!(loud.into_inner(), b"\x07");
    }

    #[test]
    fn frame_of_events_rings_once() {
        let mut player = SoundPlayer::with_writer(SoundConfig::new(true, 1.0), Vec::new());
        let events = [
            GameEvent::WaterAdvanced {
                x: 1,
                y: 0,
                cross_bonus: false,
            },
            GameEvent::PipeDiscarded {
                kind: PipeKind::Cross,
            },
            GameEvent::LevelFailed { length: 1 },
        ];
        assert!(player.play_events(&events).unwrap());
        assert_eq!(player.played(), 1);
        assert!(!player.play_events(&[]).unwrap());
    }

    #[test]
    fn every_event_has_a_cue() {
        assert_eq!(cue_for(GameEvent::FlowStarted), Some(Cue::Countdown));
        assert_eq!(
            cue_for(GameEvent::LevelComplete { score: 10 }),
            Some(Cue::LevelComplete)
        );
    }
}
