//! Bridge from `embedded-hal` 1.0 traits
//!
//! Chip HALs (embassy-rp, rp2040-hal, ...) implement the `embedded-hal`
//! traits. Wrapping their pins and buses in [`Compat`] makes them usable
//! wherever this crate's traits are expected.

use core::convert::Infallible;

use crate::gpio::{InputPin, OutputPin};
use crate::spi::SpiBus;

/// Adapter wrapping an `embedded-hal` peripheral
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Compat<T>(pub T);

impl<T> Compat<T> {
    /// Wrap a peripheral
    pub const fn new(inner: T) -> Self {
        Self(inner)
    }

    /// Borrow the wrapped peripheral
    pub fn inner(&self) -> &T {
        &self.0
    }

    /// Mutably borrow the wrapped peripheral
    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.0
    }

    /// Unwrap the peripheral
    pub fn into_inner(self) -> T {
        self.0
    }
}

fn infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

impl<T> OutputPin for Compat<T>
where
    T: embedded_hal::digital::OutputPin<Error = Infallible>,
{
    fn set_high(&mut self) {
        infallible(embedded_hal::digital::OutputPin::set_high(&mut self.0));
    }

    fn set_low(&mut self) {
        infallible(embedded_hal::digital::OutputPin::set_low(&mut self.0));
    }
}

impl<T> InputPin for Compat<T>
where
    T: embedded_hal::digital::InputPin<Error = Infallible>,
{
    fn is_high(&mut self) -> bool {
        infallible(embedded_hal::digital::InputPin::is_high(&mut self.0))
    }
}

impl<T> SpiBus for Compat<T>
where
    T: embedded_hal::spi::SpiBus<u8>,
{
    type Error = T::Error;

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        embedded_hal::spi::SpiBus::write(&mut self.0, data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        embedded_hal::spi::SpiBus::flush(&mut self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::digital::ErrorType as DigitalErrorType;
    use embedded_hal::spi::{ErrorKind, ErrorType as SpiErrorType};

    /// Mock embedded-hal output pin
    #[derive(Default)]
    struct EhPin {
        high: bool,
    }

    impl DigitalErrorType for EhPin {
        type Error = Infallible;
    }

    impl embedded_hal::digital::OutputPin for EhPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.high = true;
            Ok(())
        }
    }

    impl embedded_hal::digital::InputPin for EhPin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(self.high)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.high)
        }
    }

    /// Mock embedded-hal SPI bus capturing the last write
    #[derive(Default)]
    struct EhSpi {
        last: [u8; 4],
        len: usize,
        fail: bool,
    }

    impl SpiErrorType for EhSpi {
        type Error = ErrorKind;
    }

    impl embedded_hal::spi::SpiBus<u8> for EhSpi {
        fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
            words.fill(0);
            Ok(())
        }

        fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
            if self.fail {
                return Err(ErrorKind::Overrun);
            }
            let len = words.len().min(self.last.len());
            self.last[..len].copy_from_slice(&words[..len]);
            self.len = len;
            Ok(())
        }

        fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
            read.fill(0);
            embedded_hal::spi::SpiBus::write(self, write)
        }

        fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
            words.fill(0);
            Ok(())
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    #[test]
    fn test_output_pin_bridge() {
        let mut pin = Compat::new(EhPin::default());
        OutputPin::set_high(&mut pin);
        assert!(pin.inner().high);
        OutputPin::set_low(&mut pin);
        assert!(!pin.inner().high);
    }

    #[test]
    fn test_input_pin_bridge() {
        let mut pin = Compat::new(EhPin { high: true });
        assert!(InputPin::is_high(&mut pin));
        pin.inner_mut().high = false;
        assert!(InputPin::is_low(&mut pin));
    }

    #[test]
    fn test_spi_bridge_write() {
        let mut spi = Compat::new(EhSpi::default());
        SpiBus::write(&mut spi, &[0xAA, 0x55]).unwrap();
        let inner = spi.into_inner();
        assert_eq!(inner.len, 2);
        assert_eq!(&inner.last[..2], &[0xAA, 0x55]);
    }

    #[test]
    fn test_spi_bridge_propagates_error() {
        let mut spi = Compat::new(EhSpi {
            fail: true,
            ..Default::default()
        });
        assert_eq!(SpiBus::write(&mut spi, &[1]), Err(ErrorKind::Overrun));
    }
}
