//! Hardware shutdown (SDB) line.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

/// Settling time after SDB is released before the chip accepts configuration.
pub const RESUME_SETTLE_MS: u32 = 10;

/// Something that can pull the chip's SDB input low and release it again.
pub trait ShutdownLine {
    type Error: core::fmt::Debug;

    /// Drive SDB low (hardware shutdown).
    fn enter_shutdown(&mut self) -> Result<(), Self::Error>;

    /// Drive SDB high and wait until the chip is usable.
    fn exit_shutdown(&mut self) -> Result<(), Self::Error>;
}

/// Type parameter for drivers without an SDB line; shutdown falls back to software.
///
/// Uninhabited, so a driver built with it never holds a shutdown line.
#[derive(Clone, Copy, Debug)]
pub enum NoShutdownPin {}

impl ShutdownLine for NoShutdownPin {
    type Error = Infallible;

    fn enter_shutdown(&mut self) -> Result<(), Self::Error> {
        match *self {}
    }

    fn exit_shutdown(&mut self) -> Result<(), Self::Error> {
        match *self {}
    }
}

/// SDB driven by a GPIO, with a delay provider for the resume settling time.
pub struct ShutdownPin<P, D> {
    pin: P,
    delay: D,
}

impl<P, D> ShutdownPin<P, D> {
    pub fn new(pin: P, delay: D) -> Self {
        Self { pin, delay }
    }

    /// Give back the pin and delay.
    pub fn release(self) -> (P, D) {
        (self.pin, self.delay)
    }
}

impl<P, D> ShutdownLine for ShutdownPin<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    type Error = P::Error;

    fn enter_shutdown(&mut self) -> Result<(), Self::Error> {
        self.pin.set_low()
    }

    fn exit_shutdown(&mut self) -> Result<(), Self::Error> {
        self.pin.set_high()?;
        self.delay.delay_ms(RESUME_SETTLE_MS);
        Ok(())
    }
}
