//! GPIO pin abstractions
//!
//! The panel is driven by plain push-pull outputs (row select, latch,
//! output enable) and one input sampling another device's chip select.
//! GPIO writes on the supported MCUs cannot fail, so these traits are
//! infallible.

/// Digital output pin
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Drive a high-then-low strobe
    fn pulse_high(&mut self) {
        self.set_high();
        self.set_low();
    }
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&mut self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&mut self) -> bool {
        !self.is_high()
    }
}

impl<T: OutputPin + ?Sized> OutputPin for &mut T {
    fn set_high(&mut self) {
        (**self).set_high();
    }

    fn set_low(&mut self) {
        (**self).set_low();
    }
}

impl<T: InputPin + ?Sized> InputPin for &mut T {
    fn is_high(&mut self) -> bool {
        (**self).is_high()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingPin {
        high: bool,
        edges: u8,
    }

    impl OutputPin for RecordingPin {
        fn set_high(&mut self) {
            if !self.high {
                self.edges += 1;
            }
            self.high = true;
        }

        fn set_low(&mut self) {
            if self.high {
                self.edges += 1;
            }
            self.high = false;
        }
    }

    struct FixedInput(bool);

    impl InputPin for FixedInput {
        fn is_high(&mut self) -> bool {
            self.0
        }
    }

    #[test]
    fn test_set_state() {
        let mut pin = RecordingPin::default();
        pin.set_state(true);
        assert!(pin.high);
        pin.set_state(false);
        assert!(!pin.high);
    }

    #[test]
    fn test_pulse_high_leaves_pin_low() {
        let mut pin = RecordingPin::default();
        pin.pulse_high();
        assert!(!pin.high);
        assert_eq!(pin.edges, 2);
    }

    #[test]
    fn test_input_is_low() {
        assert!(FixedInput(false).is_low());
        assert!(!FixedInput(true).is_low());
    }

    #[test]
    fn test_mut_ref_forwarding() {
        let mut pin = RecordingPin::default();
        {
            let mut by_ref = &mut pin;
            by_ref.set_high();
        }
        assert!(pin.high);
    }
}
