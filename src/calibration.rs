//! Integer compensation engine turning raw ADC samples into calibrated
//! temperature and pressure.
//!
//! Reproduces the reference algorithm from the Bosch datasheet bit for bit,
//! including its 32 bit wrap-around on intermediate products and the mixed
//! signed/unsigned arithmetic in the pressure stage. No floating point.

use crate::config::Oversampling;

/// A divisor in one of the compensation formulas came out zero.
///
/// Only possible with corrupted or unprogrammed calibration data; a healthy
/// sensor can never produce this. The vendor algorithm leaves the case
/// unguarded, here it is surfaced instead of dividing.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ZeroDivisor;

/// Factory calibration constants, programmed per device and read once from
/// the EEPROM block at startup.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Calibration {
    pub ac1: i16,
    pub ac2: i16,
    pub ac3: i16,
    pub ac4: u16,
    pub ac5: u16,
    pub ac6: u16,
    pub b1: i16,
    pub b2: i16,
    pub mb: i16,
    pub mc: i16,
    pub md: i16,
}

/// Compensated temperature reading.
///
/// Besides the deciCelsius value this carries the `B5` intermediate that the
/// pressure formula consumes, so a pressure compensation always follows a
/// temperature compensation.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Temperature {
    b5: i32,
}

impl Temperature {
    /// Temperature in tenths of a degree Celsius.
    pub const fn deci_celsius(&self) -> i16 {
        ((self.b5 + 8) >> 4) as i16
    }
}

impl Calibration {
    /// Unpacks the 22 byte EEPROM block starting at register 0xAA.
    ///
    /// Each constant is transmitted MSB first, so adjacent byte pairs are
    /// reassembled big-endian.
    pub fn from_bytes(bytes: &[u8; 22]) -> Self {
        let pair = |i: usize| [bytes[i], bytes[i + 1]];
        Self {
            ac1: i16::from_be_bytes(pair(0)),
            ac2: i16::from_be_bytes(pair(2)),
            ac3: i16::from_be_bytes(pair(4)),
            ac4: u16::from_be_bytes(pair(6)),
            ac5: u16::from_be_bytes(pair(8)),
            ac6: u16::from_be_bytes(pair(10)),
            b1: i16::from_be_bytes(pair(12)),
            b2: i16::from_be_bytes(pair(14)),
            mb: i16::from_be_bytes(pair(16)),
            mc: i16::from_be_bytes(pair(18)),
            md: i16::from_be_bytes(pair(20)),
        }
    }

    /// Compensates a raw temperature ADC value.
    ///
    /// Fails if `X1 + MD` is zero, which cannot happen with sane calibration
    /// data.
    pub fn compensate_temperature(&self, ut: u16) -> Result<Temperature, ZeroDivisor> {
        let x1 = (ut as i32 - self.ac6 as i32).wrapping_mul(self.ac5 as i32) >> 15;
        let divisor = x1 + self.md as i32;
        if divisor == 0 {
            return Err(ZeroDivisor);
        }
        let x2 = ((self.mc as i32) << 11) / divisor;
        Ok(Temperature { b5: x1 + x2 })
    }

    /// Compensates a raw pressure ADC value, returning Pascal.
    ///
    /// `up` must already be right-justified for `oversampling` (16-19 bits).
    /// `temperature` is the result of [`Self::compensate_temperature`] for
    /// the same conversion cycle.
    ///
    /// Fails if `B4` is zero, which cannot happen with sane calibration data.
    pub fn compensate_pressure(
        &self,
        up: u32,
        oversampling: Oversampling,
        temperature: &Temperature,
    ) -> Result<i32, ZeroDivisor> {
        let oss = oversampling.mode() as u32;

        let b6 = temperature.b5 - 4000;
        let x1 = (self.b2 as i32).wrapping_mul(b6.wrapping_mul(b6) >> 12) >> 11;
        let x2 = (self.ac2 as i32).wrapping_mul(b6) >> 11;
        let x3 = x1 + x2;
        let b3 = ((((self.ac1 as i32) * 4 + x3) << oss) + 2) / 4;

        let x1 = (self.ac3 as i32).wrapping_mul(b6) >> 13;
        let x2 = (self.b1 as i32).wrapping_mul(b6.wrapping_mul(b6) >> 12) >> 16;
        let x3 = ((x1 + x2) + 2) >> 2;

        // B4 and B7 are unsigned 32 bit quantities, the reference algorithm
        // relies on the logical shift and divide semantics.
        let b4 = (self.ac4 as u32).wrapping_mul((x3 + 32768) as u32) >> 15;
        if b4 == 0 {
            return Err(ZeroDivisor);
        }
        let b7 = up.wrapping_sub(b3 as u32).wrapping_mul(50_000 >> oss);

        // Doubling B7 first would overflow for large raw values, so the
        // halves swap around the division.
        let p = if b7 < 0x8000_0000 {
            ((b7 * 2) / b4) as i32
        } else {
            ((b7 / b4) * 2) as i32
        };

        let x1 = (p >> 8).wrapping_mul(p >> 8);
        let x1 = x1.wrapping_mul(3038) >> 16;
        let x2 = (-7357i32).wrapping_mul(p) >> 16;
        Ok(p + ((x1 + x2 + 3791) >> 4))
    }
}
