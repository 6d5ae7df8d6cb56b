#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic tracking of the current wave from host notifications.
//!
//! The host delivers login state changes and chat messages; the tracker
//! resolves which encounter is active from the loaded map regions and keeps
//! the current 1-based wave number. Consumers look the wave up in the
//! encounter tables and hand the result to [`panel::wave_panel`].

pub mod panel;

use fight_cave_waves_core::Encounter;
use tracing::debug;

/// Game message announcing that an Inferno wave was cleared.
pub const INFERNO_WAVE_COMPLETE: &str = "Wave completed!";

const WAVE_PREFIX: &str = "Wave: ";

/// Channel a chat message was delivered on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChatKind {
    /// Messages sent by the game itself.
    Game,
    /// Messages typed by players.
    Public,
}

/// Notifications delivered by the host runtime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HostEvent {
    /// The client's login state changed.
    GameStateChanged {
        /// Whether the client is now logged in.
        logged_in: bool,
    },
    /// A chat message was received.
    ChatMessage {
        /// Channel the message arrived on.
        kind: ChatKind,
        /// Raw message text, possibly containing markup tags.
        text: String,
    },
    /// The host is shutting the tracker down.
    Shutdown,
}

/// Changes announced by the tracker after processing host events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackerEvent {
    /// The tracked wave changed.
    WaveChanged {
        /// Encounter whose table applies.
        encounter: Encounter,
        /// New 1-based wave number.
        wave: u32,
    },
    /// Tracking stopped because the player left the encounters.
    Reset,
}

/// Pure system that tracks the active encounter and its current wave.
#[derive(Debug, Default)]
pub struct WaveTracker {
    current_wave: Option<u32>,
    active: Option<Encounter>,
}

impl WaveTracker {
    /// Creates a tracker that is not following any encounter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current 1-based wave number, if one is being tracked.
    #[must_use]
    pub const fn current_wave(&self) -> Option<u32> {
        self.current_wave
    }

    /// Encounter whose wave table applies, if any.
    #[must_use]
    pub const fn active_encounter(&self) -> Option<Encounter> {
        self.active
    }

    /// Consumes host events observed while `regions` were loaded.
    pub fn handle(&mut self, events: &[HostEvent], regions: &[u32], out: &mut Vec<TrackerEvent>) {
        let encounter = Encounter::from_regions(regions);

        for event in events {
            match event {
                HostEvent::GameStateChanged { logged_in: true } if encounter.is_none() => {
                    self.reset(out);
                }
                HostEvent::GameStateChanged { .. } => {}
                HostEvent::ChatMessage {
                    kind: ChatKind::Game,
                    text,
                } => self.observe_message(text, encounter, out),
                HostEvent::ChatMessage { .. } => {}
                HostEvent::Shutdown => self.reset(out),
            }
        }
    }

    fn observe_message(
        &mut self,
        text: &str,
        encounter: Option<Encounter>,
        out: &mut Vec<TrackerEvent>,
    ) {
        if self.active == Some(Encounter::Inferno) && text == INFERNO_WAVE_COMPLETE {
            if let Some(wave) = self.current_wave {
                self.set_wave(Encounter::Inferno, wave.saturating_add(1), out);
            }
            return;
        }

        let (Some(encounter), Some(wave)) = (encounter, parse_wave_number(text)) else {
            return;
        };
        self.set_wave(encounter, wave, out);
    }

    fn set_wave(&mut self, encounter: Encounter, wave: u32, out: &mut Vec<TrackerEvent>) {
        debug!(%encounter, wave, "tracked wave changed");
        self.current_wave = Some(wave);
        self.active = Some(encounter);
        out.push(TrackerEvent::WaveChanged { encounter, wave });
    }

    fn reset(&mut self, out: &mut Vec<TrackerEvent>) {
        if self.current_wave.is_none() && self.active.is_none() {
            return;
        }
        debug!("wave tracking reset");
        self.current_wave = None;
        self.active = None;
        out.push(TrackerEvent::Reset);
    }
}

/// Extracts the number from the last `Wave: <digits>` fragment of `text`.
///
/// Returns `None` when that number does not fit a wave number; earlier
/// fragments are never consulted.
#[must_use]
pub fn parse_wave_number(text: &str) -> Option<u32> {
    let rest = text
        .rmatch_indices(WAVE_PREFIX)
        .map(|(start, _)| &text[start + WAVE_PREFIX.len()..])
        .find(|rest| rest.starts_with(|c: char| c.is_ascii_digit()))?;
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    rest[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wave_numbers_wrapped_in_markup() {
        assert_eq!(parse_wave_number("<col=ef1020>Wave: 1</col>"), Some(1));
        assert_eq!(parse_wave_number("Wave: 63"), Some(63));
        assert_eq!(parse_wave_number("Next Wave: 12 incoming"), Some(12));
    }

    #[test]
    fn rejects_messages_without_a_number() {
        assert_eq!(parse_wave_number("Wave completed!"), None);
        assert_eq!(parse_wave_number("Wave: "), None);
        assert_eq!(parse_wave_number("<col=ef1020>Wave: x</col>"), None);
        assert_eq!(parse_wave_number(""), None);
    }

    #[test]
    fn only_the_last_numbered_fragment_counts() {
        assert_eq!(parse_wave_number("Wave: 3 Wave: 7"), Some(7));
        assert_eq!(parse_wave_number("Wave: 3 Wave: x"), Some(3));
        assert_eq!(parse_wave_number("Wave: 3 Wave: 99999999999"), None);
    }

    #[test]
    fn reset_is_silent_when_idle() {
        let mut tracker = WaveTracker::new();
        let mut out = Vec::new();
        tracker.reset(&mut out);
        assert!(out.is_empty());
    }
}
