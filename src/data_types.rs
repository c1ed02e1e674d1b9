//! Data types for IS31FL3729 driver (based on datasheet register tables).

use crate::registers::matrix_register;

/// I2C slave addresses selected by how the AD pin is strapped.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum I2cAddress {
    /// AD connected to GND.
    Gnd = 0x34,
    /// AD connected to SCL.
    Scl = 0x35,
    /// AD connected to SDA.
    Sda = 0x36,
    /// AD connected to VCC.
    Vcc = 0x37,
}

impl I2cAddress {
    /// 7-bit bus address.
    pub fn addr(self) -> u8 {
        self as u8
    }
}

impl From<I2cAddress> for u8 {
    fn from(value: I2cAddress) -> Self {
        value.addr()
    }
}

/// Switch configuration (SWS[3:0] in the configuration register).
///
/// There are 8 dedicated switches; the ninth can be repurposed as current sink CS16.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SwitchSetting {
    /// SW1~SW9, 9SW x 15CS matrix.
    Sw9Cs15 = 0,
    /// SW1~SW8, 8SW x 16CS matrix (power-on default).
    #[default]
    Sw8Cs16 = 1,
    /// SW1~SW7, SW8 inactive.
    Sw7Cs16 = 2,
    /// SW1~SW6, SW7~SW8 inactive.
    Sw6Cs16 = 3,
    /// SW1~SW5, SW6~SW8 inactive.
    Sw5Cs16 = 4,
    /// SW1~SW4, SW5~SW8 inactive.
    Sw4Cs16 = 5,
    /// SW1~SW3, SW4~SW8 inactive.
    Sw3Cs16 = 6,
    /// SW1~SW2, SW3~SW8 inactive.
    Sw2Cs16 = 7,
    /// SW1~SW9 with the same phase, all on.
    AllOn = 8,
}

impl SwitchSetting {
    /// Raw SWS nibble.
    pub fn bits(self) -> u8 {
        self as u8
    }

    /// Number of switches scanned in this mode (`n` in the datasheet).
    pub fn active_switches(self) -> u8 {
        match self {
            SwitchSetting::Sw9Cs15 | SwitchSetting::AllOn => 9,
            other => 9 - other.bits(),
        }
    }
}

/// PWM frequency selection (PWMF[2:0]).
///
/// To avoid visible flicker the datasheet recommends PWM frequency / n > 100 Hz,
/// so 500 Hz allows n <= 4 and 250 Hz allows n <= 2. The driver does not enforce this.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum PwmFrequency {
    /// 55 kHz.
    Khz55 = 0,
    /// 32 kHz (power-on default).
    #[default]
    Khz32 = 1,
    /// 4 kHz.
    Khz4 = 2,
    /// 2 kHz.
    Khz2 = 3,
    /// 1 kHz.
    Khz1 = 4,
    /// 500 Hz, at most 4 switches.
    Hz500 = 5,
    /// 250 Hz, at most 2 switches.
    Hz250 = 6,
    /// 80 kHz.
    Khz80 = 7,
}

impl PwmFrequency {
    /// Raw PWMF selector.
    pub fn bits(self) -> u8 {
        self as u8
    }

    /// Nominal frequency in hertz.
    pub fn hertz(self) -> u32 {
        match self {
            PwmFrequency::Khz55 => 55_000,
            PwmFrequency::Khz32 => 32_000,
            PwmFrequency::Khz4 => 4_000,
            PwmFrequency::Khz2 => 2_000,
            PwmFrequency::Khz1 => 1_000,
            PwmFrequency::Hz500 => 500,
            PwmFrequency::Hz250 => 250,
            PwmFrequency::Khz80 => 80_000,
        }
    }

    /// Advisory check of the 100 Hz per-switch flicker guideline.
    pub fn flicker_free_with(self, switches: SwitchSetting) -> bool {
        self.hertz() / switches.active_switches() as u32 > 100
    }
}

/// Phase delay between switches (PHC).
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum PhaseDelay {
    #[default]
    Degree0 = 0,
    Degree180 = 1,
}

/// SWx pull-down resistor selection (PDR[2:0]).
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum PullDownSetting {
    None = 0,
    R500OhmOffTime = 1,
    R1kOhmOffTime = 2,
    #[default]
    R2kOhmOffTime = 3,
    R1kOhm = 4,
    R2kOhm = 5,
    R4kOhm = 6,
    R8kOhm = 7,
}

/// CSy pull-up resistor selection (PUR[2:0]).
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum PullUpSetting {
    None = 0,
    R500OhmOffTime = 1,
    R1kOhmOffTime = 2,
    #[default]
    R2kOhmOffTime = 3,
    R1kOhm = 4,
    R2kOhm = 5,
    R4kOhm = 6,
    R8kOhm = 7,
}

/// Spread spectrum modulation range (RNG[1:0]).
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SpreadSpectrumRange {
    #[default]
    Pct5 = 0,
    Pct15 = 1,
    Pct24 = 2,
    Pct34 = 3,
}

/// Spread spectrum cycle time (CLT[1:0]).
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SpreadSpectrumCycle {
    #[default]
    Us1980 = 0,
    Us1200 = 1,
    Us820 = 2,
    Us660 = 3,
}

/// Open/short detection enable (OSDE[1:0]).
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum OpenShortDetection {
    #[default]
    Disabled = 0b00,
    Open = 0b01,
    Short = 0b10,
}

/// SDB/I2C input logic thresholds.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LogicLevel {
    /// VIH 1.4 V, VIL 0.4 V.
    #[default]
    Low,
    /// VIH 2.4 V, VIL 0.6 V.
    High,
}

/// Number of bytes in the open/short register block (0xB3..=0xC4).
pub const OPEN_SHORT_LEN: usize = 18;

/// Snapshot of the open/short detection registers.
///
/// Each switch row owns two bytes: CS1..CS8 then CS9..CS16, LSB first.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct OpenShortStatus {
    pub raw: [u8; OPEN_SHORT_LEN],
}

impl OpenShortStatus {
    /// Whether the LED at `sw`/`cs` was flagged. Coordinates without a PWM register report `false`.
    pub fn is_faulty(&self, sw: u8, cs: u8) -> bool {
        if matrix_register(sw, cs).is_none() {
            return false;
        }
        let byte = (sw as usize - 1) * 2 + (cs as usize - 1) / 8;
        let bit = (cs - 1) % 8;
        self.raw[byte] & (1 << bit) != 0
    }

    /// True when no LED was flagged.
    pub fn is_clear(&self) -> bool {
        self.faults().next().is_none()
    }

    /// Iterate over flagged `(sw, cs)` coordinates.
    pub fn faults(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        (1..=9u8).flat_map(move |sw| (1..=16u8).filter(move |&cs| self.is_faulty(sw, cs)).map(move |cs| (sw, cs)))
    }
}
