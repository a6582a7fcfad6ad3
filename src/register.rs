/// BMP180 register map.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[allow(non_camel_case_types)]
pub enum Register {
    /// Start of the 22 byte factory calibration block (AC1 MSB).
    CALIB = 0xAA,
    /// Chip identification, reads 0x55 on a BMP180.
    ID = 0xD0,
    /// Soft reset, write 0xB6 to reboot the sensor.
    SOFT_RESET = 0xE0,
    /// Measurement control, conversion commands are written here.
    CTRL_MEAS = 0xF4,
    /// Conversion result, MSB first (2 bytes temperature, 3 bytes pressure).
    OUT = 0xF6,
}

impl Register {
    pub const fn addr(self) -> u8 {
        self as u8
    }
}

/// Fixed 7-bit bus address of the BMP180.
pub const I2C_ADDRESS: u8 = 0x77;

/// Expected contents of [`Register::ID`].
pub const CHIP_ID: u8 = 0x55;

/// CTRL_MEAS command starting a temperature conversion.
pub const CMD_READ_TEMPERATURE: u8 = 0x2E;

/// CTRL_MEAS command starting a pressure conversion, OR'ed with `mode << 6`.
pub const CMD_READ_PRESSURE: u8 = 0x34;

/// SOFT_RESET command performing the same sequence as power-on reset.
pub const CMD_SOFT_RESET: u8 = 0xB6;
