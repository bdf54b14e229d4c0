//! Pixel composition modes
//!
//! Every drawing primitive funnels into one pixel write that combines the
//! incoming on/off value with the stored bit. Remember the stored polarity:
//! a **0** bit is a lit LED.

/// How an incoming pixel value combines with the existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GraphicsMode {
    /// `on` lights the pixel, `off` blanks it
    #[default]
    Normal,
    /// `on` blanks the pixel, `off` lights it
    Inverse,
    /// `on` flips the pixel, `off` leaves it
    Toggle,
    /// `on` lights the pixel, `off` leaves it
    Or,
    /// `on` blanks a lit pixel, `off` leaves it
    Nor,
}

impl GraphicsMode {
    /// All modes, in their historical numbering order
    pub const ALL: [GraphicsMode; 5] = [
        GraphicsMode::Normal,
        GraphicsMode::Inverse,
        GraphicsMode::Toggle,
        GraphicsMode::Or,
        GraphicsMode::Nor,
    ];

    /// Combine `on` into the bit selected by `mask` of `byte`
    pub const fn compose(self, byte: u8, mask: u8, on: bool) -> u8 {
        let lit = byte & mask == 0;
        match self {
            GraphicsMode::Normal => {
                if on {
                    byte & !mask
                } else {
                    byte | mask
                }
            }
            GraphicsMode::Inverse => {
                if on {
                    byte | mask
                } else {
                    byte & !mask
                }
            }
            GraphicsMode::Toggle => {
                if on {
                    byte ^ mask
                } else {
                    byte
                }
            }
            GraphicsMode::Or => {
                if on {
                    byte & !mask
                } else {
                    byte
                }
            }
            GraphicsMode::Nor => {
                if on && lit {
                    byte | mask
                } else {
                    byte
                }
            }
        }
    }
}
