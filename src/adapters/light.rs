//! Light actuator adapter: brightness level to PWM duty.
//!
//! [`PwmLight`] drives any `embedded-hal` PWM channel through
//! [`LightPort`].  On the host there is no LED controller, so the binary
//! pairs it with [`SimulatedPwm`], which tracks the duty in memory only.

use core::convert::Infallible;

use embedded_hal::pwm::{ErrorType, SetDutyCycle};
use log::{info, warn};

use crate::app::dispatcher::MAX_BRIGHTNESS;
use crate::app::ports::LightPort;

/// Concrete adapter that maps brightness `0..=10` onto a PWM channel.
pub struct PwmLight<P> {
    pwm: P,
    level: u8,
}

impl<P: SetDutyCycle> PwmLight<P> {
    pub fn new(pwm: P) -> Self {
        Self { pwm, level: 0 }
    }

    /// Level most recently written to the channel.
    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn pwm(&self) -> &P {
        &self.pwm
    }
}

impl<P: SetDutyCycle> LightPort for PwmLight<P> {
    fn set_brightness(&mut self, level: u8) {
        let level = level.min(MAX_BRIGHTNESS);
        match self
            .pwm
            .set_duty_cycle_fraction(u16::from(level), u16::from(MAX_BRIGHTNESS))
        {
            Ok(()) => {
                self.level = level;
                info!("LIGHT | level={}/{}", level, MAX_BRIGHTNESS);
            }
            Err(e) => warn!("LIGHT | duty update failed: {:?}", e),
        }
    }
}

/// In-memory PWM channel for host builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedPwm {
    duty: u16,
    max_duty: u16,
}

impl SimulatedPwm {
    /// 8-bit resolution, like an LEDC channel at its default width.
    pub const DEFAULT_MAX_DUTY: u16 = 255;

    pub fn new(max_duty: u16) -> Self {
        Self { duty: 0, max_duty }
    }

    pub fn duty(&self) -> u16 {
        self.duty
    }
}

impl Default for SimulatedPwm {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_DUTY)
    }
}

impl ErrorType for SimulatedPwm {
    type Error = Infallible;
}

impl SetDutyCycle for SimulatedPwm {
    fn max_duty_cycle(&self) -> u16 {
        self.max_duty
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.duty = duty.min(self.max_duty);
        Ok(())
    }
}
