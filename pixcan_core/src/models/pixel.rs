#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pixel {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Pixel {

    pub fn zero() -> Self {
        Self::black()
    }

    pub fn white() -> Self {
        Self::from_rgb(255, 255, 255)
    }

    pub fn black() -> Self {
        Self::from_rgb(0, 0, 0)
    }

    pub fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::from_rgba(red, green, blue, 255)
    }

    pub fn from_rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Pixel {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Quantizes all four channels to the 16 levels the wire format can carry.
    /// Each returned value is in 0..=15; level n corresponds to channel value n * 17.
    pub fn to_rgba4(&self) -> (u8, u8, u8, u8) {
        (
            quantize_channel(self.red),
            quantize_channel(self.green),
            quantize_channel(self.blue),
            quantize_channel(self.alpha),
        )
    }
}

// rounds to the nearest of the 16 levels, 0 and 255 map exactly
fn quantize_channel(value: u8) -> u8 {
    ((value as u16 + 8) / 17) as u8
}
