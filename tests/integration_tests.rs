use embedded_hal_mock::eh1::delay::NoopDelay;
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
use simple_bmp180::{Bmp180, Error, Oversampling, Register, CHIP_ID, I2C_ADDRESS, NO_MEASUREMENT};

const ADDR: u8 = I2C_ADDRESS;

/// Calibration block from the algorithm example in the datasheet, MSB first
/// as the sensor transmits it.
const CAL_DATA: [u8; 22] = [
    0x01, 0x98, // AC1 = 408
    0xFF, 0xB8, // AC2 = -72
    0xC7, 0xD1, // AC3 = -14383
    0x7F, 0xE5, // AC4 = 32741
    0x7F, 0xF5, // AC5 = 32757
    0x5A, 0x71, // AC6 = 23153
    0x18, 0x2E, // B1 = 6190
    0x00, 0x04, // B2 = 4
    0x80, 0x00, // MB = -32768
    0xDD, 0xF9, // MC = -8711
    0x0B, 0x34, // MD = 2868
];

fn begin_expectations() -> Vec<I2cTransaction> {
    vec![
        I2cTransaction::write_read(ADDR, vec![Register::ID.addr()], vec![CHIP_ID]),
        I2cTransaction::write_read(ADDR, vec![Register::CALIB.addr()], CAL_DATA.to_vec()),
    ]
}

#[test]
fn test_begin_loads_calibration() {
    let mut i2c = I2cMock::new(&begin_expectations());
    let bmp = Bmp180::new(i2c.clone());
    let bmp = bmp.begin().map_err(|(_, err)| err).unwrap();

    let cal = bmp.calibration();
    assert_eq!(cal.ac1, 408);
    assert_eq!(cal.ac3, -14383);
    assert_eq!(cal.ac4, 32741);
    assert_eq!(cal.mb, -32768);
    assert_eq!(cal.md, 2868);
    i2c.done();
}

#[test]
fn test_begin_rejects_unknown_chip() {
    // A BMP280 on the same address answers 0x58.
    let expectations = [I2cTransaction::write_read(
        ADDR,
        vec![Register::ID.addr()],
        vec![0x58],
    )];

    let mut i2c = I2cMock::new(&expectations);
    let bmp = Bmp180::new(i2c.clone());

    let Err((bmp, err)) = bmp.begin() else {
        panic!("begin accepted a foreign chip id");
    };
    assert!(matches!(err, Error::InvalidChipId));

    // The device comes back uninitialized, the bus is still usable.
    let _i2c = bmp.release();
    i2c.done();
}

#[test]
fn test_read_pressure_datasheet_vector() {
    let mut expectations = begin_expectations();
    expectations.extend([
        // temperature conversion, UT = 27898
        I2cTransaction::write(ADDR, vec![Register::CTRL_MEAS.addr(), 0x2E]),
        I2cTransaction::write_read(ADDR, vec![Register::OUT.addr()], vec![0x6C, 0xFA]),
        // pressure conversion at oss 0, UP = 23843 after the >> 8 alignment
        I2cTransaction::write(ADDR, vec![Register::CTRL_MEAS.addr(), 0x34]),
        I2cTransaction::write_read(ADDR, vec![Register::OUT.addr()], vec![0x5D, 0x23, 0x00]),
    ]);

    let mut i2c = I2cMock::new(&expectations);
    let bmp = Bmp180::new(i2c.clone());
    let mut bmp = bmp.begin().map_err(|(_, err)| err).unwrap();

    let mut delay = NoopDelay::new();
    let pressure = bmp
        .read_pressure(&mut delay, Oversampling::UltraLowPower)
        .unwrap();

    assert_eq!(pressure, 69964);
    // The temperature measured on the way is cached.
    assert_eq!(bmp.last_temperature(), 150);
    i2c.done();
}

#[test]
fn test_read_pressure_ultra_high_resolution() {
    let mut expectations = begin_expectations();
    expectations.extend([
        I2cTransaction::write(ADDR, vec![Register::CTRL_MEAS.addr(), 0x2E]),
        I2cTransaction::write_read(ADDR, vec![Register::OUT.addr()], vec![0x6C, 0xFA]),
        // oss 3: command 0x34 | 3 << 6, raw sample aligned with >> 5
        I2cTransaction::write(ADDR, vec![Register::CTRL_MEAS.addr(), 0xF4]),
        I2cTransaction::write_read(ADDR, vec![Register::OUT.addr()], vec![0x5D, 0x23, 0x00]),
    ]);

    let mut i2c = I2cMock::new(&expectations);
    let bmp = Bmp180::new(i2c.clone());
    let mut bmp = bmp.begin().map_err(|(_, err)| err).unwrap();

    let mut delay = NoopDelay::new();
    let pressure = bmp
        .read_pressure(&mut delay, Oversampling::UltraHighResolution)
        .unwrap();

    // UP = 0x5D2300 >> 5 = 190744 with the datasheet calibration.
    assert_eq!(pressure, 69963);
    i2c.done();
}

#[test]
fn test_clipped_mode_behaves_like_mode_3() {
    let mut expectations = begin_expectations();
    expectations.extend([
        I2cTransaction::write(ADDR, vec![Register::CTRL_MEAS.addr(), 0x2E]),
        I2cTransaction::write_read(ADDR, vec![Register::OUT.addr()], vec![0x6C, 0xFA]),
        I2cTransaction::write(ADDR, vec![Register::CTRL_MEAS.addr(), 0xF4]),
        I2cTransaction::write_read(ADDR, vec![Register::OUT.addr()], vec![0x5D, 0x23, 0x00]),
    ]);

    let mut i2c = I2cMock::new(&expectations);
    let bmp = Bmp180::new(i2c.clone());
    let mut bmp = bmp.begin().map_err(|(_, err)| err).unwrap();

    let mut delay = NoopDelay::new();
    let pressure = bmp
        .read_pressure(&mut delay, Oversampling::from_mode(7))
        .unwrap();

    assert_eq!(pressure, 69963);
    i2c.done();
}

#[test]
fn test_last_temperature_sentinel_before_any_reading() {
    let mut i2c = I2cMock::new(&begin_expectations());
    let bmp = Bmp180::new(i2c.clone());
    let bmp = bmp.begin().map_err(|(_, err)| err).unwrap();

    assert_eq!(bmp.last_temperature(), NO_MEASUREMENT);
    i2c.done();
}

#[test]
fn test_read_temperature() {
    let mut expectations = begin_expectations();
    expectations.extend([
        I2cTransaction::write(ADDR, vec![Register::CTRL_MEAS.addr(), 0x2E]),
        I2cTransaction::write_read(ADDR, vec![Register::OUT.addr()], vec![0x6C, 0xFA]),
    ]);

    let mut i2c = I2cMock::new(&expectations);
    let bmp = Bmp180::new(i2c.clone());
    let mut bmp = bmp.begin().map_err(|(_, err)| err).unwrap();

    let mut delay = NoopDelay::new();
    assert_eq!(bmp.read_temperature(&mut delay).unwrap(), 150);
    assert_eq!(bmp.last_temperature(), 150);
    i2c.done();
}

#[test]
fn test_chip_id() {
    let expectations = [I2cTransaction::write_read(
        ADDR,
        vec![Register::ID.addr()],
        vec![CHIP_ID],
    )];

    let mut i2c = I2cMock::new(&expectations);
    let mut bmp = Bmp180::new(i2c.clone());

    assert_eq!(bmp.chip_id().unwrap(), 0x55);
    i2c.done();
}

#[test]
fn test_reset() {
    let mut expectations = begin_expectations();
    expectations.push(I2cTransaction::write(
        ADDR,
        vec![Register::SOFT_RESET.addr(), 0xB6],
    ));

    let mut i2c = I2cMock::new(&expectations);
    let bmp = Bmp180::new(i2c.clone());
    let bmp = bmp.begin().map_err(|(_, err)| err).unwrap();

    let _bmp = bmp.reset().unwrap();
    i2c.done();
}
