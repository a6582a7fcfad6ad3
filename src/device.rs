use crate::bus::I2cBus;
use crate::calibration::{Calibration, Temperature};
use crate::config::Oversampling;
use crate::register::{
    Register, CHIP_ID, CMD_READ_PRESSURE, CMD_READ_TEMPERATURE, CMD_SOFT_RESET, I2C_ADDRESS,
};
use core::marker::PhantomData;
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

/// Value reported by [`Bmp180::last_temperature`] before the first successful
/// conversion: -273.2 degC, below absolute zero and therefore impossible as a
/// real reading.
pub const NO_MEASUREMENT: i16 = -2732;

/// Fixed temperature conversion time in milliseconds.
const TEMPERATURE_CONVERSION_MS: u32 = 5;

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Uninitialized;
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Ready;

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug)]
pub enum Error<I2CError> {
    /// I2C Interface Error
    I2c(I2CError),
    /// The ID register did not read back the BMP180 signature.
    InvalidChipId,
    /// A compensation divisor was zero, the calibration data is corrupted.
    DivisionByZero,
}

impl<I2CError> From<I2CError> for Error<I2CError> {
    fn from(err: I2CError) -> Self {
        Error::I2c(err)
    }
}

/// BMP180 driver session.
///
/// Measurements only exist on the [`Ready`] typestate, which is reachable
/// solely through a successful [`Bmp180::begin`], so reading through stale or
/// zeroed calibration data is impossible by construction.
pub struct Bmp180<I2C, S> {
    bus: I2cBus<I2C>,
    calibration: Calibration,
    last_temp: i16,
    _state: PhantomData<S>,
}

impl<I2C, I2CError> Bmp180<I2C, Uninitialized>
where
    I2C: I2c<Error = I2CError>,
{
    /// Wraps an I2C bus. The BMP180 has a single fixed address, 0x77.
    pub fn new(i2c: I2C) -> Self {
        Self {
            bus: I2cBus::new(i2c, I2C_ADDRESS),
            calibration: Calibration::default(),
            last_temp: NO_MEASUREMENT,
            _state: PhantomData,
        }
    }

    /// Checks the chip identity and loads the factory calibration block.
    ///
    /// On failure the still-uninitialized device is handed back together
    /// with the error, so the caller can retry or [`Bmp180::release`] the
    /// bus.
    #[allow(clippy::result_large_err)]
    pub fn begin(mut self) -> Result<Bmp180<I2C, Ready>, (Self, Error<I2CError>)> {
        match self.check_id_and_load_calibration() {
            Ok(()) => Ok(self.into_state()),
            Err(err) => Err((self, err)),
        }
    }

    fn check_id_and_load_calibration(&mut self) -> Result<(), Error<I2CError>> {
        let id = self.bus.read_reg(Register::ID)?;
        if id != CHIP_ID {
            return Err(Error::InvalidChipId);
        }

        let mut bytes: [u8; 22] = [0; 22];
        self.bus.read_many(Register::CALIB, &mut bytes)?;
        self.calibration = Calibration::from_bytes(&bytes);
        Ok(())
    }
}

impl<I2C, I2CError> Bmp180<I2C, Ready>
where
    I2C: I2c<Error = I2CError>,
{
    /// Measures pressure in Pascal.
    ///
    /// Every pressure conversion starts with a temperature conversion
    /// because the compensation formula needs the intermediate temperature
    /// term; that side measurement is cached and available through
    /// [`Self::last_temperature`]. Blocks on `delay` for the full device
    /// conversion time: 5 ms for the temperature plus 5-26 ms for the
    /// pressure depending on `oversampling`. Reading earlier would return
    /// incomplete data, so the waits are unconditional.
    pub fn read_pressure<D>(
        &mut self,
        delay: &mut D,
        oversampling: Oversampling,
    ) -> Result<i32, Error<I2CError>>
    where
        D: DelayNs,
    {
        let temperature = self.convert_temperature(delay)?;

        let cmd = CMD_READ_PRESSURE | (oversampling.mode() << 6);
        self.bus.write_reg(Register::CTRL_MEAS, cmd)?;
        delay.delay_ms(oversampling.conversion_time_ms());
        let up = self.read_raw_pressure(oversampling)?;

        self.calibration
            .compensate_pressure(up, oversampling, &temperature)
            .map_err(|_| Error::DivisionByZero)
    }

    /// Measures temperature in tenths of a degree Celsius and refreshes the
    /// cached value. Blocks on `delay` for the 5 ms conversion time.
    pub fn read_temperature<D>(&mut self, delay: &mut D) -> Result<i16, Error<I2CError>>
    where
        D: DelayNs,
    {
        Ok(self.convert_temperature(delay)?.deci_celsius())
    }

    /// Temperature measured during the most recent conversion, in tenths of
    /// a degree Celsius. Does not touch the bus. [`NO_MEASUREMENT`] until a
    /// conversion has happened.
    pub fn last_temperature(&self) -> i16 {
        self.last_temp
    }

    /// Calibration constants loaded by [`Bmp180::begin`].
    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    fn convert_temperature<D>(&mut self, delay: &mut D) -> Result<Temperature, Error<I2CError>>
    where
        D: DelayNs,
    {
        self.bus.write_reg(Register::CTRL_MEAS, CMD_READ_TEMPERATURE)?;
        delay.delay_ms(TEMPERATURE_CONVERSION_MS);

        let mut bytes: [u8; 2] = [0; 2];
        self.bus.read_many(Register::OUT, &mut bytes)?;
        let ut = u16::from_be_bytes(bytes);

        let temperature = self
            .calibration
            .compensate_temperature(ut)
            .map_err(|_| Error::DivisionByZero)?;
        self.last_temp = temperature.deci_celsius();
        Ok(temperature)
    }

    fn read_raw_pressure(&mut self, oversampling: Oversampling) -> Result<u32, Error<I2CError>> {
        let mut bytes: [u8; 3] = [0; 3];
        self.bus.read_many(Register::OUT, &mut bytes)?;
        let value = ((bytes[0] as u32) << 16) | ((bytes[1] as u32) << 8) | (bytes[2] as u32);
        Ok(value >> oversampling.sample_shift())
    }
}

impl<I2C, S, I2CError> Bmp180<I2C, S>
where
    I2C: I2c<Error = I2CError>,
{
    /// Returns the contents of the ID register.
    /// This value is expected to be 0x55
    pub fn chip_id(&mut self) -> Result<u8, Error<I2CError>> {
        Ok(self.bus.read_reg(Register::ID)?)
    }

    /// Issues a soft reset, equivalent to power-on reset. The calibration
    /// block must be reloaded with [`Bmp180::begin`] afterwards.
    pub fn reset(mut self) -> Result<Bmp180<I2C, Uninitialized>, Error<I2CError>> {
        self.bus.write_reg(Register::SOFT_RESET, CMD_SOFT_RESET)?;
        self.last_temp = NO_MEASUREMENT;

        Ok(self.into_state())
    }

    pub fn release(self) -> I2C {
        self.bus.release()
    }

    fn into_state<T>(self) -> Bmp180<I2C, T> {
        Bmp180 {
            bus: self.bus,
            calibration: self.calibration,
            last_temp: self.last_temp,
            _state: PhantomData,
        }
    }
}
