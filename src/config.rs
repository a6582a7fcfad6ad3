/// Hardware pressure sampling accuracy mode.
///
/// Trades conversion time for RMS noise: the sensor internally averages
/// 1/2/4/8 samples taking 4.5/7.5/13.5/25.5 ms typical.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Oversampling {
    UltraLowPower = 0,
    #[default]
    Standard = 1,
    HighResolution = 2,
    UltraHighResolution = 3,
}

impl Oversampling {
    /// Clips a raw mode number the way the sensor does: anything above 3
    /// behaves as ultra high resolution.
    pub const fn from_mode(mode: u8) -> Self {
        match mode {
            0 => Self::UltraLowPower,
            1 => Self::Standard,
            2 => Self::HighResolution,
            _ => Self::UltraHighResolution,
        }
    }

    /// The `oss` value encoded into the conversion command.
    pub const fn mode(self) -> u8 {
        self as u8
    }

    /// Worst case conversion time in milliseconds.
    pub const fn conversion_time_ms(self) -> u32 {
        match self {
            Self::UltraLowPower => 5,
            Self::Standard => 8,
            Self::HighResolution => 14,
            Self::UltraHighResolution => 26,
        }
    }

    /// Right shift that aligns the three raw data bytes for this mode.
    pub(crate) const fn sample_shift(self) -> u32 {
        8 - self.mode() as u32
    }
}
