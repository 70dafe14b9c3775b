use pixcan_core::models::pixel::Pixel;

/// Packs four 4-bit channel values into one 16-bit word: `r | g | b | a`,
/// highest nibble first. Inputs wider than 4 bits are truncated silently.
pub fn pack(red: u8, green: u8, blue: u8, alpha: u8) -> u16 {
    (((red & 0xF) as u16) << 12)
        | (((green & 0xF) as u16) << 8)
        | (((blue & 0xF) as u16) << 4)
        | ((alpha & 0xF) as u16)
}

/// Unpacks a 16-bit wire color into an 8-bit-per-channel pixel.
/// Each nibble is scaled from 0..=15 to 0..=255 by multiplying by 17.
pub fn unpack(color: u16) -> Pixel {
    Pixel::from_rgba(
        (((color >> 12) & 0xF) * 17) as u8,
        (((color >> 8) & 0xF) * 17) as u8,
        (((color >> 4) & 0xF) * 17) as u8,
        ((color & 0xF) * 17) as u8,
    )
}
