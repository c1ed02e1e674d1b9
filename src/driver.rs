//! Blocking I2C driver for IS31FL3729.

use embedded_hal::i2c::I2c;

use crate::data_types::{
    LogicLevel, OpenShortDetection, OpenShortStatus, PhaseDelay, PullDownSetting, PullUpSetting,
    PwmFrequency, SpreadSpectrumCycle, SpreadSpectrumRange, SwitchSetting,
};
use crate::error::Error;
use crate::registers::{
    DEFAULT_I2C_ADDRESS, LED_COUNT, RESET_KEY, ConfigBits, addr, apply_mask, led_register, matrix_register,
    pull_config, scaling_register, spread_spectrum,
};
use crate::shutdown::{NoShutdownPin, ShutdownLine, ShutdownPin};

/// IS31FL3729 driver.
///
/// Every call is an independent bus transaction; no register contents are cached.
pub struct Is31fl3729<I2C, S = NoShutdownPin> {
    i2c: I2C,
    address: u8,
    switch_setting: SwitchSetting,
    sdb: Option<S>,
}

impl<I2C> Is31fl3729<I2C, NoShutdownPin> {
    /// Create a new driver instance with the default I2C address (0x34).
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_I2C_ADDRESS)
    }

    /// Create a new driver instance with a custom I2C address.
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            switch_setting: SwitchSetting::default(),
            sdb: None,
        }
    }
}

impl<I2C, S> Is31fl3729<I2C, S> {
    /// Select the switch/current-sink matrix layout installed by [`Self::init`].
    pub fn with_switch_setting(mut self, switch_setting: SwitchSetting) -> Self {
        self.switch_setting = switch_setting;
        self
    }

    /// Use a hardware shutdown line instead of the software shutdown bit.
    pub fn with_shutdown_line<L: ShutdownLine>(self, line: L) -> Is31fl3729<I2C, L> {
        Is31fl3729 {
            i2c: self.i2c,
            address: self.address,
            switch_setting: self.switch_setting,
            sdb: Some(line),
        }
    }

    /// Use a GPIO wired to SDB; `delay` provides the settling time on resume.
    pub fn with_shutdown_pin<P, D>(self, pin: P, delay: D) -> Is31fl3729<I2C, ShutdownPin<P, D>>
    where
        ShutdownPin<P, D>: ShutdownLine,
    {
        self.with_shutdown_line(ShutdownPin::new(pin, delay))
    }

    /// Return the 7-bit I2C address configured for this instance.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Switch setting that [`Self::init`] installs.
    pub fn switch_setting(&self) -> SwitchSetting {
        self.switch_setting
    }

    /// True when shutdown/resume drive SDB rather than the software shutdown bit.
    pub fn has_shutdown_line(&self) -> bool {
        self.sdb.is_some()
    }

    /// Release the I2C bus.
    pub fn free(self) -> I2C {
        self.i2c
    }

    /// Release the I2C bus and the shutdown line, if any.
    pub fn release(self) -> (I2C, Option<S>) {
        (self.i2c, self.sdb)
    }
}

impl<I2C, S> Is31fl3729<I2C, S>
where
    I2C: I2c,
    S: ShutdownLine,
{
    /// Bring the chip up: leave shutdown, reset, install the switch setting
    /// in normal operation and program the global current.
    ///
    /// Steps run in order and the first failure is returned.
    pub fn init(&mut self, global_current: u8) -> Result<(), Error<I2C::Error, S::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!(
            "is31fl3729 init addr={=u8:#x} sws={} gcc={=u8}",
            self.address,
            self.switch_setting,
            global_current
        );
        // Registers are unreachable while SDB is low.
        self.resume()?;
        self.reset()?;
        let sws = (self.switch_setting.bits() << 4) | ConfigBits::SSD.bits();
        self.update_config(sws, (ConfigBits::SWS_MASK | ConfigBits::SSD).bits())?;
        self.set_global_current(global_current)
    }

    /// Write a single register.
    pub fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), Error<I2C::Error, S::Error>> {
        self.i2c
            .write(self.address, &[reg, value])
            .map_err(Error::I2c)
    }

    /// Read a single register.
    pub fn read_reg(&mut self, reg: u8) -> Result<u8, Error<I2C::Error, S::Error>> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.address, &[reg], &mut buf)
            .map_err(Error::I2c)?;
        Ok(buf[0])
    }

    /// Update masked bits in a register (read-modify-write).
    pub fn update_reg(&mut self, reg: u8, mask: u8, value: u8) -> Result<(), Error<I2C::Error, S::Error>> {
        let cur = self.read_reg(reg)?;
        self.write_reg(reg, apply_mask(cur, value, mask))
    }

    /// Write a burst of consecutive registers starting at `start_reg`.
    pub fn write_regs(&mut self, start_reg: u8, data: &[u8]) -> Result<(), Error<I2C::Error, S::Error>> {
        let mut buf = [0u8; LED_COUNT + 1];
        if data.len() + 1 > buf.len() {
            return Err(Error::OutOfRange);
        }
        buf[0] = start_reg;
        buf[1..=data.len()].copy_from_slice(data);
        self.i2c
            .write(self.address, &buf[..=data.len()])
            .map_err(Error::I2c)
    }

    /// Read a burst starting at a register.
    pub fn read_regs(&mut self, start_reg: u8, data: &mut [u8]) -> Result<(), Error<I2C::Error, S::Error>> {
        self.i2c
            .write_read(self.address, &[start_reg], data)
            .map_err(Error::I2c)
    }

    /// Read-modify-write of the configuration register.
    pub fn update_config(&mut self, bits: u8, mask: u8) -> Result<(), Error<I2C::Error, S::Error>> {
        self.update_reg(addr::CONFIG, mask, bits)
    }

    /// Read the configuration register.
    pub fn read_config(&mut self) -> Result<ConfigBits, Error<I2C::Error, S::Error>> {
        Ok(ConfigBits::from_bits_retain(self.read_reg(addr::CONFIG)?))
    }

    /// Enter shutdown. Register contents are kept but analog circuits are off.
    ///
    /// With a shutdown line only SDB is pulled low; otherwise the software shutdown bit is cleared.
    pub fn shutdown(&mut self) -> Result<(), Error<I2C::Error, S::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("is31fl3729 shutdown (hw={=bool})", self.sdb.is_some());
        match self.sdb.as_mut() {
            Some(line) => line.enter_shutdown().map_err(Error::Pin),
            None => self.update_config(0, ConfigBits::SSD.bits()),
        }
    }

    /// Leave shutdown into normal operation.
    ///
    /// SDB, if present, is released first and given time to settle; the software
    /// shutdown bit is set in both cases.
    pub fn resume(&mut self) -> Result<(), Error<I2C::Error, S::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("is31fl3729 resume (hw={=bool})", self.sdb.is_some());
        if let Some(line) = self.sdb.as_mut() {
            line.exit_shutdown().map_err(Error::Pin)?;
        }
        self.update_config(ConfigBits::SSD.bits(), ConfigBits::SSD.bits())
    }

    /// Reset all registers to their defaults (blank display, software shutdown).
    pub fn reset(&mut self) -> Result<(), Error<I2C::Error, S::Error>> {
        self.write_reg(addr::RESET, RESET_KEY)
    }

    /// Set the PWM frequency. The flicker guideline (frequency / n > 100 Hz) is left to the caller.
    pub fn set_pwm_freq(&mut self, freq: PwmFrequency) -> Result<(), Error<I2C::Error, S::Error>> {
        self.write_reg(addr::PWM_FREQ, freq.bits())
    }

    /// Global current control, modulating every CSy in 65 steps (0 = off, 64 = max).
    pub fn set_global_current(&mut self, value: u8) -> Result<(), Error<I2C::Error, S::Error>> {
        self.write_reg(addr::GCC, value)
    }

    /// Scale the peak current of current sink `cs` (1..=16) in 256 steps.
    pub fn set_current_sink_scale(&mut self, cs: u8, value: u8) -> Result<(), Error<I2C::Error, S::Error>> {
        let reg = scaling_register(cs).ok_or(Error::OutOfRange)?;
        self.write_reg(reg, value)
    }

    /// Configure phase delay and the SWx pull-down / CSy pull-up resistors.
    pub fn set_pull_up_down(
        &mut self,
        phase: PhaseDelay,
        pull_down: PullDownSetting,
        pull_up: PullUpSetting,
    ) -> Result<(), Error<I2C::Error, S::Error>> {
        self.write_reg(addr::PULL_CFG, pull_config(phase, pull_down, pull_up))
    }

    /// Configure spread spectrum for EMI reduction.
    pub fn set_spread_spectrum(
        &mut self,
        enable: bool,
        range: SpreadSpectrumRange,
        cycle: SpreadSpectrumCycle,
    ) -> Result<(), Error<I2C::Error, S::Error>> {
        self.write_reg(addr::SPREAD_SPECTRUM, spread_spectrum(enable, range, cycle))
    }

    /// Select SDB/I2C input thresholds without touching other configuration bits.
    pub fn set_logic_level(&mut self, level: LogicLevel) -> Result<(), Error<I2C::Error, S::Error>> {
        let bits = match level {
            LogicLevel::Low => ConfigBits::empty(),
            LogicLevel::High => ConfigBits::LOGIC,
        };
        self.update_config(bits.bits(), ConfigBits::LOGIC.bits())
    }

    /// Set the OSDE field to start (or stop) open/short detection.
    ///
    /// Results are valid in [`Self::read_open_short`] after at least two scan cycles.
    pub fn start_open_short_detection(&mut self, mode: OpenShortDetection) -> Result<(), Error<I2C::Error, S::Error>> {
        self.update_config((mode as u8) << 1, ConfigBits::OSDE_MASK.bits())
    }

    /// Read the open/short detection block.
    pub fn read_open_short(&mut self) -> Result<OpenShortStatus, Error<I2C::Error, S::Error>> {
        let mut status = OpenShortStatus::default();
        self.read_regs(addr::OPEN_SHORT_FIRST, &mut status.raw)?;
        Ok(status)
    }

    /// Set the PWM duty of the LED at register `led` (0x01..=0x8F).
    pub fn set_led(&mut self, led: u8, value: u8) -> Result<(), Error<I2C::Error, S::Error>> {
        let reg = led_register(led).ok_or(Error::OutOfRange)?;
        self.write_reg(reg, value)
    }

    /// Set the PWM duty of the LED at switch `sw` (1..=9) and current sink `cs` (1..=16).
    pub fn set_led_at(&mut self, sw: u8, cs: u8, value: u8) -> Result<(), Error<I2C::Error, S::Error>> {
        let reg = matrix_register(sw, cs).ok_or(Error::OutOfRange)?;
        self.write_reg(reg, value)
    }

    /// Write consecutive PWM registers starting at `start_led` in one transaction.
    pub fn set_leds(&mut self, start_led: u8, values: &[u8]) -> Result<(), Error<I2C::Error, S::Error>> {
        if values.is_empty() {
            return Ok(());
        }
        let first = led_register(start_led).ok_or(Error::OutOfRange)?;
        let last = first as usize + values.len() - 1;
        if last > addr::LED_PWM_LAST as usize {
            return Err(Error::OutOfRange);
        }
        self.write_regs(first, values)
    }

    /// Set every LED to the same PWM duty.
    pub fn fill(&mut self, value: u8) -> Result<(), Error<I2C::Error, S::Error>> {
        self.set_leds(addr::LED_PWM_FIRST, &[value; LED_COUNT])
    }
}
