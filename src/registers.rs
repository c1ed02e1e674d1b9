//! Register map and constants for IS31FL3729.
//! Offsets and bit layouts follow the datasheet register tables.

use crate::data_types::{PhaseDelay, PullDownSetting, PullUpSetting, SpreadSpectrumCycle, SpreadSpectrumRange};

/// Default I2C address (AD pin tied to GND).
pub const DEFAULT_I2C_ADDRESS: u8 = 0x34;

/// Register addresses.
pub mod addr {
    /// First LED PWM register (SW1/CS1).
    pub const LED_PWM_FIRST: u8 = 0x01;
    /// Last LED PWM register (SW9/CS15).
    pub const LED_PWM_LAST: u8 = 0x8F;
    /// Scaling register for CS1; CS16 lives at 0x9F.
    pub const SCALING_FIRST: u8 = 0x90;
    pub const SCALING_LAST: u8 = 0x9F;
    /// Configuration (SWS, logic level, OSDE, software shutdown).
    pub const CONFIG: u8 = 0xA0;
    /// Global current control (0..=64).
    pub const GCC: u8 = 0xA1;
    /// Pull down/up resistor selection and phase delay.
    pub const PULL_CFG: u8 = 0xB0;
    pub const SPREAD_SPECTRUM: u8 = 0xB1;
    pub const PWM_FREQ: u8 = 0xB2;
    /// Open/short information, 18 bytes up to 0xC4.
    pub const OPEN_SHORT_FIRST: u8 = 0xB3;
    pub const OPEN_SHORT_LAST: u8 = 0xC4;
    /// Writing [`super::RESET_KEY`] resets every register to its default.
    pub const RESET: u8 = 0xCF;
}

/// Magic value accepted by the reset register.
pub const RESET_KEY: u8 = 0xAE;

/// Number of PWM registers.
pub const LED_COUNT: usize = (addr::LED_PWM_LAST - addr::LED_PWM_FIRST) as usize + 1;
/// Number of current sinks (and scaling registers).
pub const CURRENT_SINKS: u8 = 16;
/// Highest switch index.
pub const SWITCHES: u8 = 9;
/// Upper bound of global current control.
pub const GCC_MAX: u8 = 64;

bitflags::bitflags! {
    /// Configuration register bits (0xA0).
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct ConfigBits: u8 {
        /// Bits 7-4: switch setting.
        const SWS3 = 1 << 7;
        const SWS2 = 1 << 6;
        const SWS1 = 1 << 5;
        const SWS0 = 1 << 4;
        /// Bit 3: SDB/I2C logic level (1 = high thresholds).
        const LOGIC = 1 << 3;
        /// Bits 2-1: open/short detection enable.
        const OSDE1 = 1 << 2;
        const OSDE0 = 1 << 1;
        /// Bit 0: software shutdown control (0 = shutdown, 1 = normal operation).
        const SSD = 1 << 0;
    }

    /// Pull resistor register bits (0xB0).
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct PullBits: u8 {
        /// Bit 7: 180 degree phase delay.
        const PHC  = 1 << 7;
        /// Bits 6-4: SWx pull-down selection.
        const PDR2 = 1 << 6;
        const PDR1 = 1 << 5;
        const PDR0 = 1 << 4;
        /// Bits 3-0: CSy pull-up selection; selectors use bits 2-0, bit 3 stays 0.
        const PUR2 = 1 << 2;
        const PUR1 = 1 << 1;
        const PUR0 = 1 << 0;
    }

    /// Spread spectrum register bits (0xB1).
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct SpreadSpectrumBits: u8 {
        // Bits 7-5 reserved.
        /// Bit 4: spread spectrum enable.
        const SSP  = 1 << 4;
        const RNG1 = 1 << 3;
        const RNG0 = 1 << 2;
        const CLT1 = 1 << 1;
        const CLT0 = 1 << 0;
    }
}

impl ConfigBits {
    /// SWS[3:0] field.
    pub const SWS_MASK: Self = Self::SWS3.union(Self::SWS2).union(Self::SWS1).union(Self::SWS0);
    /// OSDE[1:0] field.
    pub const OSDE_MASK: Self = Self::OSDE1.union(Self::OSDE0);

    /// Switch setting nibble as stored in the register.
    pub fn switch_setting_bits(&self) -> u8 {
        self.bits() >> 4
    }
}

/// PWM register for a direct LED address; `None` outside `0x01..=0x8F`.
pub fn led_register(led: u8) -> Option<u8> {
    (addr::LED_PWM_FIRST..=addr::LED_PWM_LAST).contains(&led).then_some(led)
}

/// PWM register for switch `sw` (1..=9) and current sink `cs` (1..=16).
///
/// SW9 only reaches CS15, so `(9, 16)` is rejected even though both indices are in range.
pub fn matrix_register(sw: u8, cs: u8) -> Option<u8> {
    if !(1..=SWITCHES).contains(&sw) || !(1..=CURRENT_SINKS).contains(&cs) {
        return None;
    }
    led_register((sw - 1) * CURRENT_SINKS + cs)
}

/// Scaling register for current sink `cs` (1..=16).
pub fn scaling_register(cs: u8) -> Option<u8> {
    (1..=CURRENT_SINKS)
        .contains(&cs)
        .then(|| addr::SCALING_FIRST + (cs - 1))
}

/// Pack phase delay, pull-down and pull-up selections into the 0xB0 layout.
pub fn pull_config(phase: PhaseDelay, pull_down: PullDownSetting, pull_up: PullUpSetting) -> u8 {
    let mut bits = PullBits::from_bits_truncate(((pull_down as u8) << 4) | pull_up as u8);
    bits.set(PullBits::PHC, matches!(phase, PhaseDelay::Degree180));
    bits.bits()
}

/// Pack spread spectrum settings into the 0xB1 layout.
pub fn spread_spectrum(enable: bool, range: SpreadSpectrumRange, cycle: SpreadSpectrumCycle) -> u8 {
    let mut bits = SpreadSpectrumBits::from_bits_truncate(((range as u8) << 2) | cycle as u8);
    bits.set(SpreadSpectrumBits::SSP, enable);
    bits.bits()
}

/// Replace the `mask` bits of `current` with those of `bits`.
pub fn apply_mask(current: u8, bits: u8, mask: u8) -> u8 {
    (current & !mask) | (bits & mask)
}
