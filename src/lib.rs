//! IS31FL3729 Rust Driver
//!
//! Blocking, `no_std` driver for the Lumissil IS31FL3729 matrix LED driver
//! (up to 9 switches x 16 current sinks). Built on `embedded-hal` 1.0 with
//! optional `defmt` support and type-safe register access.
//!
//! LEDs are addressed either by their PWM register (`0x01..=0x8F`) or by
//! switch/current-sink coordinates; both forms share the same range check.
//! Shutdown uses the SDB pin when one is supplied, otherwise the software
//! shutdown bit of the configuration register.

#![no_std]

pub mod data_types;
pub mod driver;
pub mod error;
pub mod registers;
pub mod shutdown;

pub use driver::Is31fl3729;
pub use error::Error;
pub use registers::DEFAULT_I2C_ADDRESS;
pub use shutdown::{NoShutdownPin, ShutdownLine, ShutdownPin};
