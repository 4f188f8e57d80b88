//! Command dispatcher: owns the brightness level and applies commands to it.

use super::commands::LightCommand;
use super::events::AppEvent;
use super::ports::EventSink;

/// Highest brightness the light supports.
pub const MAX_BRIGHTNESS: u8 = 10;

/// Holds the current brightness (always `0..=MAX_BRIGHTNESS`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDispatcher {
    level: u8,
}

impl Default for CommandDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandDispatcher {
    /// Start switched off.
    pub fn new() -> Self {
        Self { level: 0 }
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn is_on(&self) -> bool {
        self.level > 0
    }

    /// Apply `cmd` and return the resulting level.
    ///
    /// On a set, `SwitchedOn`/`SwitchedOff` is emitted first if the light
    /// crossed zero, then either `BrightnessSet` or `Saturated`.  A query
    /// emits `Queried` and changes nothing.
    pub fn apply(&mut self, cmd: LightCommand, sink: &mut impl EventSink) -> u8 {
        match cmd {
            LightCommand::Query => {
                sink.emit(&AppEvent::Queried(self.level));
            }
            LightCommand::Set(requested) => {
                let was_on = self.is_on();
                self.level = requested.min(MAX_BRIGHTNESS);

                match (was_on, self.is_on()) {
                    (false, true) => sink.emit(&AppEvent::SwitchedOn),
                    (true, false) => sink.emit(&AppEvent::SwitchedOff),
                    _ => {}
                }

                if requested >= MAX_BRIGHTNESS {
                    sink.emit(&AppEvent::Saturated {
                        requested,
                        level: self.level,
                    });
                } else {
                    sink.emit(&AppEvent::BrightnessSet(self.level));
                }
            }
        }
        self.level
    }
}
