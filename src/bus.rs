use crate::register::Register;
use embedded_hal::i2c::I2c;

/// Register level access to the sensor over I2C.
///
/// The BMP180 only speaks I2C, so this is a concrete wrapper rather than a
/// bus abstraction.
pub(crate) struct I2cBus<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cBus<I2C> {
    pub(crate) fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    pub(crate) fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, I2CError> I2cBus<I2C>
where
    I2C: I2c<Error = I2CError>,
{
    pub(crate) fn write_reg(&mut self, reg: Register, value: u8) -> Result<(), I2CError> {
        self.i2c.write(self.address, &[reg.addr(), value])
    }

    pub(crate) fn read_reg(&mut self, reg: Register) -> Result<u8, I2CError> {
        let mut buffer: [u8; 1] = [0];
        self.i2c
            .write_read(self.address, &[reg.addr()], &mut buffer)?;
        Ok(buffer[0])
    }

    /// Burst read starting at `start`, the register address auto-increments.
    pub(crate) fn read_many(&mut self, start: Register, buf: &mut [u8]) -> Result<(), I2CError> {
        self.i2c.write_read(self.address, &[start.addr()], buf)
    }
}
