//! Game events for presentation and audio feedback.
//!
//! The coordinator publishes a [`GameEvent`] for every observable change.
//! Subscribers decide how to render them; [`SoundCue`] describes the short
//! synthesized jingles that go with each event.

use super::{Move, Player, WinningLine};
use serde::{Deserialize, Serialize};

/// Something observable happened in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A mark was placed.
    Moved(Move),
    /// The AI was asked for a move.
    AiThinking,
    /// A player completed a line.
    Won {
        /// The winner.
        player: Player,
        /// The completed line.
        line: WinningLine,
    },
    /// The board filled up with no winner.
    Draw,
    /// The board was cleared for a new game.
    Reset,
}

impl GameEvent {
    /// Returns the jingle for this event, if it has one.
    pub fn sound_cue(&self) -> Option<SoundCue> {
        match self {
            GameEvent::Moved(mov) => Some(SoundCue::click(mov.player)),
            GameEvent::Won { .. } => Some(SoundCue::win()),
            GameEvent::Draw => Some(SoundCue::draw()),
            GameEvent::Reset => Some(SoundCue::restart()),
            GameEvent::AiThinking => None,
        }
    }
}

/// Oscillator shape for a cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Waveform {
    /// Pure tone.
    Sine,
    /// Brighter, clicky tone.
    Triangle,
}

/// A single note in a cue. Times are in seconds from the cue start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Frequency in hertz.
    pub freq: f32,
    /// How long the note rings.
    pub duration: f32,
    /// Offset from the start of the cue.
    pub delay: f32,
}

const fn note(freq: f32, duration: f32, delay: f32) -> Note {
    Note {
        freq,
        duration,
        delay,
    }
}

/// A short jingle: a waveform and a handful of notes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoundCue {
    /// Oscillator shape.
    pub waveform: Waveform,
    /// Notes in play order.
    pub notes: &'static [Note],
}

const CLICK_X: [Note; 1] = [note(880.0, 0.1, 0.0)];
const CLICK_O: [Note; 1] = [note(660.0, 0.1, 0.0)];
// C5 E5 G5 C6
const WIN: [Note; 4] = [
    note(523.25, 0.1, 0.0),
    note(659.25, 0.1, 0.1),
    note(783.99, 0.1, 0.2),
    note(1046.50, 0.15, 0.3),
];
// F4 C4
const DRAW: [Note; 2] = [note(349.23, 0.1, 0.0), note(261.63, 0.15, 0.15)];
const RESTART: [Note; 2] = [note(440.0, 0.05, 0.0), note(880.0, 0.1, 0.05)];

impl SoundCue {
    /// Click played when `player` places a mark.
    pub fn click(player: Player) -> Self {
        let notes: &'static [Note] = match player {
            Player::X => &CLICK_X,
            Player::O => &CLICK_O,
        };
        Self {
            waveform: Waveform::Triangle,
            notes,
        }
    }

    /// Rising arpeggio for a win.
    pub fn win() -> Self {
        Self {
            waveform: Waveform::Sine,
            notes: &WIN,
        }
    }

    /// Falling pair for a draw.
    pub fn draw() -> Self {
        Self {
            waveform: Waveform::Sine,
            notes: &DRAW,
        }
    }

    /// Octave blip for a restart.
    pub fn restart() -> Self {
        Self {
            waveform: Waveform::Sine,
            notes: &RESTART,
        }
    }

    /// Total length of the cue in seconds.
    pub fn length(&self) -> f32 {
        self.notes
            .iter()
            .map(|n| n.delay + n.duration)
            .fold(0.0, f32::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::MoveOrigin;

    #[test]
    fn test_click_pitch_depends_on_player() {
        assert_eq!(SoundCue::click(Player::X).notes[0].freq, 880.0);
        assert_eq!(SoundCue::click(Player::O).notes[0].freq, 660.0);
    }

    #[test]
    fn test_win_cue_length() {
        let cue = SoundCue::win();
        assert_eq!(cue.notes.len(), 4);
        assert!((cue.length() - 0.45).abs() < 1e-6);
    }

    #[test]
    fn test_every_event_but_thinking_has_a_cue() {
        let mov = Move::new(Player::X, 4, 4, MoveOrigin::Human);
        assert!(GameEvent::Moved(mov).sound_cue().is_some());
        assert!(GameEvent::Draw.sound_cue().is_some());
        assert!(GameEvent::Reset.sound_cue().is_some());
        assert!(GameEvent::AiThinking.sound_cue().is_none());
    }
}
