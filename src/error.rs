//! Error definitions for IS31FL3729 driver.

use core::convert::Infallible;

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug)]
pub enum Error<I2cError, PinError = Infallible> {
    /// Underlying I2C transaction failed.
    I2c(I2cError),
    /// Shutdown (SDB) line could not be driven.
    Pin(PinError),
    /// LED, switch or current-sink index outside the register map.
    OutOfRange,
}

impl<I2cError: core::fmt::Debug, PinError: core::fmt::Debug> core::fmt::Display
    for Error<I2cError, PinError>
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::I2c(e) => write!(f, "I2C error: {:?}", e),
            Error::Pin(e) => write!(f, "shutdown pin error: {:?}", e),
            Error::OutOfRange => write!(f, "parameter out of range"),
        }
    }
}
