//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade.  State changes go out at `info`; rejections at
//! `debug`, since foreign traffic on a shared multicast group is normal.

use log::{debug, info};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { level } => {
                info!("START | initial_level={}", level);
            }
            AppEvent::SwitchedOn => {
                info!("POWER | on");
            }
            AppEvent::SwitchedOff => {
                info!("POWER | off");
            }
            AppEvent::BrightnessSet(level) => {
                info!("LEVEL | set to {}", level);
            }
            AppEvent::Saturated { requested, level } => {
                info!("LEVEL | requested {} saturated to {}", requested, level);
            }
            AppEvent::Queried(level) => {
                info!("QUERY | level={}", level);
            }
            AppEvent::Rejected(reason) => {
                debug!("REJECT | {}", reason);
            }
        }
    }
}
