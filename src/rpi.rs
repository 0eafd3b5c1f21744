//! Raspberry Pi backends using the rppal crate

use std::convert::Infallible;
use std::time::Duration;

use rppal::gpio::{Gpio, InputPin, OutputPin, Trigger};
use rppal::i2c::I2c;

use crate::signal::{DetectSignal, WakeSignal};
use crate::transport::BusTransport;

/// I2C bus handle bound to the reader's slave address
pub struct I2cTransport {
    i2c: I2c,
}

impl I2cTransport {
    pub fn new(bus: u8, address: u16) -> Result<Self, rppal::i2c::Error> {
        let mut i2c = I2c::with_bus(bus)?;
        i2c.set_slave_address(address)?;

        Ok(Self { i2c })
    }
}

impl BusTransport for I2cTransport {
    type Error = rppal::i2c::Error;

    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error> {
        self.i2c.write(data)
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.i2c.read(buf)
    }
}

/// Card detect input, armed for falling edges
pub struct GpioDetect {
    pin: InputPin,
}

impl GpioDetect {
    pub fn new(bcm_pin: u8) -> Result<Self, rppal::gpio::Error> {
        let mut pin = Gpio::new()?.get(bcm_pin)?.into_input();
        pin.set_interrupt(Trigger::FallingEdge)?;

        Ok(Self { pin })
    }
}

impl DetectSignal for GpioDetect {
    type Error = rppal::gpio::Error;

    fn drain(&mut self) -> Result<(), Self::Error> {
        // Clears latched events; an edge that lands right now is dropped too
        self.pin.poll_interrupt(true, Some(Duration::ZERO)).map(|_| ())
    }

    fn wait_edge(&mut self) -> Result<(), Self::Error> {
        loop {
            if self.pin.poll_interrupt(false, None)?.is_some() {
                return Ok(());
            }
        }
    }
}

/// Wake output
pub struct GpioWake {
    pin: OutputPin,
}

impl GpioWake {
    pub fn new(bcm_pin: u8) -> Result<Self, rppal::gpio::Error> {
        let mut pin = Gpio::new()?.get(bcm_pin)?.into_output();
        pin.set_reset_on_drop(false);

        Ok(Self { pin })
    }
}

impl WakeSignal for GpioWake {
    type Error = Infallible;

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.pin.set_high();
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.pin.set_low();
        Ok(())
    }
}
