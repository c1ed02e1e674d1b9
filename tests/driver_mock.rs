use embedded_hal::i2c::ErrorKind;
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTrans};
use is31fl3729_rs::data_types::{
    LogicLevel, OpenShortDetection, PhaseDelay, PullDownSetting, PullUpSetting, PwmFrequency, SpreadSpectrumCycle,
    SpreadSpectrumRange, SwitchSetting,
};
use is31fl3729_rs::registers::ConfigBits;
use is31fl3729_rs::{Error, Is31fl3729};

const ADDR: u8 = 0x34;

#[test]
fn set_led_writes_pwm_register() {
    let expectations = [
        I2cTrans::write(ADDR, vec![0x01, 0x10]),
        I2cTrans::write(ADDR, vec![0x8F, 0xFF]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut driver = Is31fl3729::new(mock);
    driver.set_led(0x01, 0x10).unwrap();
    driver.set_led(0x8F, 0xFF).unwrap();
    driver.free().done();
}

#[test]
fn set_led_rejects_out_of_range_without_traffic() {
    let mock = I2cMock::new(&[]);
    let mut driver = Is31fl3729::new(mock);
    assert!(matches!(driver.set_led(0x00, 1), Err(Error::OutOfRange)));
    assert!(matches!(driver.set_led(0x90, 1), Err(Error::OutOfRange)));
    assert!(matches!(driver.set_led(0xFF, 1), Err(Error::OutOfRange)));
    driver.free().done();
}

#[test]
fn set_led_surfaces_bus_failure() {
    let expectations = [I2cTrans::write(ADDR, vec![0x20, 0x80]).with_error(ErrorKind::Other)];
    let mock = I2cMock::new(&expectations);
    let mut driver = Is31fl3729::new(mock);
    assert!(matches!(driver.set_led(0x20, 0x80), Err(Error::I2c(ErrorKind::Other))));
    driver.free().done();
}

#[test]
fn set_led_at_maps_switch_and_sink() {
    // SW1/CS1 -> 0x01, SW2/CS3 -> 0x13, SW9/CS15 -> 0x8F
    let expectations = [
        I2cTrans::write(ADDR, vec![0x01, 1]),
        I2cTrans::write(ADDR, vec![0x13, 2]),
        I2cTrans::write(ADDR, vec![0x8F, 3]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut driver = Is31fl3729::new(mock);
    driver.set_led_at(1, 1, 1).unwrap();
    driver.set_led_at(2, 3, 2).unwrap();
    driver.set_led_at(9, 15, 3).unwrap();
    driver.free().done();
}

#[test]
fn set_led_at_rejects_bad_coordinates() {
    let mock = I2cMock::new(&[]);
    let mut driver = Is31fl3729::new(mock);
    for (sw, cs) in [(0, 1), (10, 1), (1, 0), (1, 17), (9, 16)] {
        assert!(matches!(driver.set_led_at(sw, cs, 0x55), Err(Error::OutOfRange)));
    }
    driver.free().done();
}

#[test]
fn current_sink_scale_bounds() {
    let expectations = [
        I2cTrans::write(ADDR, vec![0x90, 0x11]),
        I2cTrans::write(ADDR, vec![0x9F, 0x22]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut driver = Is31fl3729::new(mock);
    assert!(matches!(driver.set_current_sink_scale(0, 0x11), Err(Error::OutOfRange)));
    assert!(matches!(driver.set_current_sink_scale(17, 0x11), Err(Error::OutOfRange)));
    driver.set_current_sink_scale(1, 0x11).unwrap();
    driver.set_current_sink_scale(16, 0x22).unwrap();
    driver.free().done();
}

#[test]
fn single_register_settings() {
    let expectations = [
        I2cTrans::write(0x37, vec![0xA1, 0xFF]),
        I2cTrans::write(0x37, vec![0xB2, 0x05]),
        I2cTrans::write(0x37, vec![0xB0, 0b1101_0110]),
        I2cTrans::write(0x37, vec![0xB1, 0b0001_1001]),
        I2cTrans::write(0x37, vec![0xCF, 0xAE]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut driver = Is31fl3729::with_address(mock, 0x37);
    // Global current is written verbatim, even past the 64-step maximum.
    driver.set_global_current(0xFF).unwrap();
    driver.set_pwm_freq(PwmFrequency::Hz500).unwrap();
    driver
        .set_pull_up_down(PhaseDelay::Degree180, PullDownSetting::R2kOhm, PullUpSetting::R4kOhm)
        .unwrap();
    driver
        .set_spread_spectrum(true, SpreadSpectrumRange::Pct24, SpreadSpectrumCycle::Us1200)
        .unwrap();
    driver.reset().unwrap();
    driver.free().done();
}

#[test]
fn update_config_preserves_unmasked_bits() {
    let expectations = [
        I2cTrans::write_read(ADDR, vec![0xA0], vec![0x5B]),
        I2cTrans::write(ADDR, vec![0xA0, 0x5A]),
        I2cTrans::write_read(ADDR, vec![0xA0], vec![0x0E]),
        // (0x0E & !0xF1) | (0x31 & 0xF1)
        I2cTrans::write(ADDR, vec![0xA0, 0x3F]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut driver = Is31fl3729::new(mock);
    driver.update_config(0x00, 0x01).unwrap();
    driver.update_config(0x31, 0xF1).unwrap();
    driver.free().done();
}

#[test]
fn update_config_stops_when_read_fails() {
    let expectations = [I2cTrans::write_read(ADDR, vec![0xA0], vec![0x00]).with_error(ErrorKind::Other)];
    let mock = I2cMock::new(&expectations);
    let mut driver = Is31fl3729::new(mock);
    assert!(matches!(driver.update_config(0x01, 0x01), Err(Error::I2c(_))));
    driver.free().done();
}

#[test]
fn software_shutdown_and_resume_toggle_only_bit0() {
    let expectations = [
        I2cTrans::write_read(ADDR, vec![0xA0], vec![0x5B]),
        I2cTrans::write(ADDR, vec![0xA0, 0x5A]),
        I2cTrans::write_read(ADDR, vec![0xA0], vec![0x5A]),
        I2cTrans::write(ADDR, vec![0xA0, 0x5B]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut driver = Is31fl3729::new(mock);
    assert!(!driver.has_shutdown_line());
    driver.shutdown().unwrap();
    driver.resume().unwrap();
    driver.free().done();
}

#[test]
fn init_installs_switch_setting_and_global_current() {
    let expectations = [
        // resume
        I2cTrans::write_read(ADDR, vec![0xA0], vec![0x00]),
        I2cTrans::write(ADDR, vec![0xA0, 0x01]),
        // reset
        I2cTrans::write(ADDR, vec![0xCF, 0xAE]),
        // SWS = 0b0100 (5SW x 16CS), SSD = 1, logic/OSDE bits kept
        I2cTrans::write_read(ADDR, vec![0xA0], vec![0x0E]),
        I2cTrans::write(ADDR, vec![0xA0, 0x4F]),
        I2cTrans::write(ADDR, vec![0xA1, 0x40]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut driver = Is31fl3729::new(mock).with_switch_setting(SwitchSetting::Sw5Cs16);
    driver.init(0x40).unwrap();
    driver.free().done();
}

#[test]
fn init_returns_first_failure() {
    let expectations = [
        I2cTrans::write_read(ADDR, vec![0xA0], vec![0x00]),
        I2cTrans::write(ADDR, vec![0xA0, 0x01]),
        I2cTrans::write(ADDR, vec![0xCF, 0xAE]).with_error(ErrorKind::NoAcknowledge(
            embedded_hal::i2c::NoAcknowledgeSource::Address,
        )),
    ];
    let mock = I2cMock::new(&expectations);
    let mut driver = Is31fl3729::new(mock);
    assert!(matches!(driver.init(0x40), Err(Error::I2c(ErrorKind::NoAcknowledge(_)))));
    driver.free().done();
}

#[test]
fn burst_led_writes() {
    let mut fill = vec![0x01];
    fill.extend(core::iter::repeat_n(0x20, 143));
    let expectations = [
        I2cTrans::write(ADDR, vec![0x8E, 0x0A, 0x0B]),
        I2cTrans::write(ADDR, fill),
    ];
    let mock = I2cMock::new(&expectations);
    let mut driver = Is31fl3729::new(mock);
    driver.set_leds(0x8E, &[0x0A, 0x0B]).unwrap();
    driver.set_leds(0x10, &[]).unwrap();
    assert!(matches!(driver.set_leds(0x8F, &[1, 2]), Err(Error::OutOfRange)));
    assert!(matches!(driver.set_leds(0x00, &[1]), Err(Error::OutOfRange)));
    driver.fill(0x20).unwrap();
    driver.free().done();
}

#[test]
fn open_short_detection_flow() {
    let mut raw = vec![0u8; 18];
    raw[0] = 0b0000_0100; // SW1/CS3
    raw[17] = 0b0100_0000; // SW9/CS15
    let expectations = [
        I2cTrans::write_read(ADDR, vec![0xA0], vec![0x11]),
        I2cTrans::write(ADDR, vec![0xA0, 0x13]),
        I2cTrans::write_read(ADDR, vec![0xB3], raw),
    ];
    let mock = I2cMock::new(&expectations);
    let mut driver = Is31fl3729::new(mock);
    driver.start_open_short_detection(OpenShortDetection::Open).unwrap();
    let status = driver.read_open_short().unwrap();
    assert!(status.is_faulty(1, 3));
    assert!(status.is_faulty(9, 15));
    assert!(!status.is_faulty(1, 4));
    assert_eq!(status.faults().count(), 2);
    driver.free().done();
}

#[test]
fn logic_level_and_config_readback() {
    let expectations = [
        I2cTrans::write_read(ADDR, vec![0xA0], vec![0x11]),
        I2cTrans::write(ADDR, vec![0xA0, 0x19]),
        I2cTrans::write_read(ADDR, vec![0xA0], vec![0x19]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut driver = Is31fl3729::new(mock);
    driver.set_logic_level(LogicLevel::High).unwrap();
    let config = driver.read_config().unwrap();
    assert!(config.contains(ConfigBits::LOGIC | ConfigBits::SSD));
    assert_eq!(config.switch_setting_bits(), SwitchSetting::Sw8Cs16.bits());
    driver.free().done();
}

#[test]
fn driver_without_sdb_falls_back_to_software_shutdown() {
    let expectations = [
        I2cTrans::write_read(ADDR, vec![0xA0], vec![0x31]),
        I2cTrans::write(ADDR, vec![0xA0, 0x30]),
    ];
    let mock = I2cMock::new(&expectations);
    let mut driver = Is31fl3729::new(mock);
    assert!(!driver.has_shutdown_line());
    driver.shutdown().unwrap();
    let (mut i2c, sdb) = driver.release();
    assert!(sdb.is_none());
    i2c.done();
}
