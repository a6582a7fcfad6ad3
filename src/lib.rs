//!
//! BMP180 embedded-hal I2C driver crate
//!
//! A platform agnostic driver to interface with the Bosch BMP180 barometric
//! pressure & temperature sensor via [embedded-hal]. Raw ADC samples are
//! compensated with the per-device factory calibration constants using the
//! integer algorithm from the datasheet, so no floating point is involved
//! anywhere.
//!
//! [embedded-hal]: https://docs.rs/embedded-hal

#![no_std]

mod bus;
mod calibration;
mod config;
mod device;
mod register;

pub use calibration::Calibration;
pub use calibration::Temperature;
pub use calibration::ZeroDivisor;
pub use config::Oversampling;
pub use device::{Bmp180, Error, Ready, Uninitialized, NO_MEASUREMENT};
pub use register::{Register, CHIP_ID, I2C_ADDRESS};
