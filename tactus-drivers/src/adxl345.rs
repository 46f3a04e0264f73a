//! ADXL345 accelerometer tap sensor
//!
//! Uses the chip's built-in single-tap detection engine: threshold and
//! duration are programmed once, then the SINGLE_TAP bit of INT_SOURCE
//! latches each detected tap. Reading INT_SOURCE clears the latch, which
//! gives the consume-on-read contract of [`TapSensor`] for free.

use embedded_hal::i2c::I2c;

use tactus_core::traits::TapSensor;

/// Default I2C address (SDO/ALT pin low is 0x53, high is 0x1D).
pub const DEFAULT_ADDR: u8 = 0x53;

/// Fixed device ID reported by the DEVID register.
const DEVICE_ID: u8 = 0xE5;

/// ADXL345 registers
#[allow(dead_code)]
mod reg {
    pub const DEVID: u8 = 0x00;
    pub const THRESH_TAP: u8 = 0x1D;
    pub const DUR: u8 = 0x21;
    pub const LATENT: u8 = 0x22;
    pub const WINDOW: u8 = 0x23;
    pub const TAP_AXES: u8 = 0x2A;
    pub const ACT_TAP_STATUS: u8 = 0x2B;
    pub const BW_RATE: u8 = 0x2C;
    pub const POWER_CTL: u8 = 0x2D;
    pub const INT_ENABLE: u8 = 0x2E;
    pub const INT_MAP: u8 = 0x2F;
    pub const INT_SOURCE: u8 = 0x30;
    pub const DATA_FORMAT: u8 = 0x31;
}

/// SINGLE_TAP bit in INT_ENABLE / INT_SOURCE.
const INT_SINGLE_TAP: u8 = 1 << 6;

/// Measure bit in POWER_CTL.
const POWER_CTL_MEASURE: u8 = 1 << 3;

/// 100Hz output data rate.
const BW_RATE_100HZ: u8 = 0x0A;

/// Tap detection tuning.
#[derive(Debug, Clone)]
pub struct TapConfig {
    /// Tap acceleration threshold, 62.5mg per LSB.
    pub threshold: u8,
    /// Maximum tap duration, 625us per LSB.
    pub duration: u8,
    /// Participating axes bitmask (ZYX in bits 0-2).
    pub axes: u8,
}

impl Default for TapConfig {
    fn default() -> Self {
        Self {
            threshold: 20, // 1.25g
            duration: 50,  // ~31ms
            axes: 0x07,    // all axes
        }
    }
}

/// Errors from the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError<E> {
    /// I2C bus error.
    Bus(E),
    /// DEVID register did not match; wrong chip or bad wiring.
    BadDeviceId(u8),
}

/// ADXL345 driver configured as a tap detector.
pub struct Adxl345<I2C> {
    i2c: I2C,
    addr: u8,
}

impl<I2C: I2c> Adxl345<I2C> {
    /// Create a driver at the default address.
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_ADDR)
    }

    /// Create a driver at an explicit address.
    pub fn with_address(i2c: I2C, addr: u8) -> Self {
        Self { i2c, addr }
    }

    /// Verify the chip and program single-tap detection.
    pub fn init(&mut self, config: &TapConfig) -> Result<(), SensorError<I2C::Error>> {
        let id = self.read_reg(reg::DEVID)?;
        if id != DEVICE_ID {
            return Err(SensorError::BadDeviceId(id));
        }

        // Standby while configuring
        self.write_reg(reg::POWER_CTL, 0x00)?;

        self.write_reg(reg::THRESH_TAP, config.threshold)?;
        self.write_reg(reg::DUR, config.duration)?;
        // Latency/window zero: single taps only, no double-tap pairing
        self.write_reg(reg::LATENT, 0x00)?;
        self.write_reg(reg::WINDOW, 0x00)?;
        self.write_reg(reg::TAP_AXES, config.axes & 0x07)?;

        self.write_reg(reg::BW_RATE, BW_RATE_100HZ)?;
        self.write_reg(reg::INT_ENABLE, INT_SINGLE_TAP)?;
        self.write_reg(reg::POWER_CTL, POWER_CTL_MEASURE)?;

        // Discard anything latched during bring-up
        let _ = self.read_reg(reg::INT_SOURCE)?;
        Ok(())
    }

    fn read_reg(&mut self, register: u8) -> Result<u8, SensorError<I2C::Error>> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.addr, &[register], &mut buf)
            .map_err(SensorError::Bus)?;
        Ok(buf[0])
    }

    fn write_reg(&mut self, register: u8, value: u8) -> Result<(), SensorError<I2C::Error>> {
        self.i2c
            .write(self.addr, &[register, value])
            .map_err(SensorError::Bus)
    }
}

impl<I2C: I2c> TapSensor for Adxl345<I2C> {
    type Error = SensorError<I2C::Error>;

    fn poll_tap(&mut self) -> Result<bool, Self::Error> {
        // Read clears the latch
        let source = self.read_reg(reg::INT_SOURCE)?;
        Ok(source & INT_SINGLE_TAP != 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorType, Operation};

    #[derive(Debug, PartialEq, Eq)]
    enum MockError {}

    impl embedded_hal::i2c::Error for MockError {
        fn kind(&self) -> embedded_hal::i2c::ErrorKind {
            match *self {}
        }
    }

    /// Register-map mock emulating the INT_SOURCE read-to-clear latch.
    struct MockI2c {
        regs: [u8; 0x40],
    }

    impl MockI2c {
        fn new() -> Self {
            let mut regs = [0u8; 0x40];
            regs[reg::DEVID as usize] = DEVICE_ID;
            Self { regs }
        }

        fn latch_tap(&mut self) {
            self.regs[reg::INT_SOURCE as usize] |= INT_SINGLE_TAP;
        }
    }

    impl ErrorType for MockI2c {
        type Error = MockError;
    }

    impl I2c for MockI2c {
        fn transaction(
            &mut self,
            _address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            let mut pointer = 0usize;
            for op in operations {
                match op {
                    Operation::Write(bytes) => {
                        pointer = bytes[0] as usize;
                        for (i, value) in bytes[1..].iter().enumerate() {
                            self.regs[pointer + i] = *value;
                        }
                    }
                    Operation::Read(buf) => {
                        for (i, slot) in buf.iter_mut().enumerate() {
                            let r = pointer + i;
                            *slot = self.regs[r];
                            if r == reg::INT_SOURCE as usize {
                                self.regs[r] = 0;
                            }
                        }
                    }
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_init_programs_tap_engine() {
        let mut sensor = Adxl345::new(MockI2c::new());
        sensor.init(&TapConfig::default()).unwrap();

        let regs = &sensor.i2c.regs;
        assert_eq!(regs[reg::THRESH_TAP as usize], 20);
        assert_eq!(regs[reg::DUR as usize], 50);
        assert_eq!(regs[reg::TAP_AXES as usize], 0x07);
        assert_eq!(regs[reg::INT_ENABLE as usize], INT_SINGLE_TAP);
        assert_eq!(regs[reg::POWER_CTL as usize], POWER_CTL_MEASURE);
    }

    #[test]
    fn test_init_rejects_wrong_chip() {
        let mut bus = MockI2c::new();
        bus.regs[reg::DEVID as usize] = 0x33;
        let mut sensor = Adxl345::new(bus);
        assert_eq!(
            sensor.init(&TapConfig::default()),
            Err(SensorError::BadDeviceId(0x33))
        );
    }

    #[test]
    fn test_poll_consumes_tap() {
        let mut sensor = Adxl345::new(MockI2c::new());
        sensor.init(&TapConfig::default()).unwrap();

        sensor.i2c.latch_tap();
        assert_eq!(sensor.poll_tap(), Ok(true));
        // Consumed: no new tap, no report
        assert_eq!(sensor.poll_tap(), Ok(false));
    }

    #[test]
    fn test_flush_discards_without_reporting() {
        let mut sensor = Adxl345::new(MockI2c::new());
        sensor.init(&TapConfig::default()).unwrap();

        sensor.i2c.latch_tap();
        sensor.flush().unwrap();
        assert_eq!(sensor.poll_tap(), Ok(false));

        // Idempotent with nothing pending
        sensor.flush().unwrap();
        sensor.flush().unwrap();
        assert_eq!(sensor.poll_tap(), Ok(false));
    }
}
