use byteorder::{BigEndian, ByteOrder};
use custom_error::custom_error;

pub const FRAME_LENGTH: usize = 8;

pub const OPCODE_SET_PIXEL: u8 = 1;

custom_error! {pub FrameError
    InvalidLength {length: usize} = "Expected a frame of exactly 8 bytes, got {length}",
}

/// One pixel edit as carried on the wire. All coordinate fields are 10 bits
/// wide; values outside that range are truncated silently when encoding, so
/// the caller is expected to clamp before constructing an update.
///
/// Frame layout, most significant bit first, big-endian across two 32-bit words:
///
/// word 1: `opcode(8) | region_x(10) | region_y(10) | location_x high bits(4)`
/// word 2: `location_x low bits(6) | location_y(10) | color(16)`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelUpdate {
    pub opcode: u8,
    pub region_x: u16,
    pub region_y: u16,
    pub location_x: u16,
    pub location_y: u16,
    pub color: u16,
}

impl PixelUpdate {

    pub fn set_pixel(region: (u16, u16), location: (u16, u16), color: u16) -> Self {
        PixelUpdate {
            opcode: OPCODE_SET_PIXEL,
            region_x: region.0,
            region_y: region.1,
            location_x: location.0,
            location_y: location.1,
            color,
        }
    }

    pub fn encode(&self) -> [u8; FRAME_LENGTH] {
        let location_x = (self.location_x & 0x3FF) as u32;

        let high = ((self.opcode as u32) << 24)
            | (((self.region_x & 0x3FF) as u32) << 14)
            | (((self.region_y & 0x3FF) as u32) << 4)
            | (location_x >> 6);
        let low = ((location_x & 0x3F) << 26)
            | (((self.location_y & 0x3FF) as u32) << 16)
            | (self.color as u32);

        let mut frame = [0; FRAME_LENGTH];
        BigEndian::write_u32(&mut frame[0..4], high);
        BigEndian::write_u32(&mut frame[4..8], low);
        frame
    }

    pub fn decode(data: &[u8]) -> Result<Self, FrameError> {
        if data.len() != FRAME_LENGTH {
            return Err(FrameError::InvalidLength {
                length: data.len(),
            });
        }

        let high = BigEndian::read_u32(&data[0..4]);
        let low = BigEndian::read_u32(&data[4..8]);

        Ok(PixelUpdate {
            opcode: (high >> 24) as u8,
            region_x: ((high >> 14) & 0x3FF) as u16,
            region_y: ((high >> 4) & 0x3FF) as u16,
            location_x: (((high & 0xF) << 6) | ((low >> 26) & 0x3F)) as u16,
            location_y: ((low >> 16) & 0x3FF) as u16,
            color: (low & 0xFFFF) as u16,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_set_pixel_reference_bytes() {
        let update = PixelUpdate::set_pixel((0, 0), (5, 9), 0x000F);
        assert_eq!(update.encode(), [0x01, 0x00, 0x00, 0x00, 0x14, 0x09, 0x00, 0x0F]);
    }

    #[test]
    fn test_all_zero_encodes_to_zero_bytes() {
        let update = PixelUpdate {
            opcode: 0,
            region_x: 0,
            region_y: 0,
            location_x: 0,
            location_y: 0,
            color: 0,
        };
        assert_eq!(update.encode(), [0; 8]);
    }

    #[test]
    fn test_all_max_encodes_to_all_ones() {
        let update = PixelUpdate {
            opcode: 255,
            region_x: 1023,
            region_y: 1023,
            location_x: 1023,
            location_y: 1023,
            color: 0xFFFF,
        };
        assert_eq!(update.encode(), [0xFF; 8]);
    }

    #[test]
    fn test_location_x_split_across_word_boundary() {
        let frame = PixelUpdate::set_pixel((0, 0), (1023, 0), 0).encode();

        let high = u32::from_be_bytes([frame[0], frame[1], frame[2], frame[3]]);
        let low = u32::from_be_bytes([frame[4], frame[5], frame[6], frame[7]]);
        assert_eq!(high & 0xF, 0xF);
        assert_eq!((low >> 26) & 0x3F, 0x3F);

        let decoded = PixelUpdate::decode(&frame).expect("failed to decode frame");
        assert_eq!(decoded.location_x, 1023);
    }

    #[test]
    fn test_roundtrip_on_in_range_inputs() {
        let coords = [0u16, 1, 63, 64, 511, 512, 1022, 1023];
        let colors = [0u16, 0x000F, 0x1234, 0xABCD, 0xFFFF];

        for opcode in [0u8, 1, 127, 255].iter() {
            for x in coords.iter() {
                for y in coords.iter() {
                    for color in colors.iter() {
                        let update = PixelUpdate {
                            opcode: *opcode,
                            region_x: *y,
                            region_y: *x,
                            location_x: *x,
                            location_y: *y,
                            color: *color,
                        };

                        let decoded = PixelUpdate::decode(&update.encode())
                            .expect("failed to decode frame");
                        assert_eq!(decoded, update);
                    }
                }
            }
        }
    }

    #[test]
    fn test_encode_truncates_overflowing_fields() {
        let in_range = PixelUpdate::set_pixel((0, 1), (511, 2), 0x000F);
        let overflowing = PixelUpdate::set_pixel((1024, 1025), (1535, 1026), 0x000F);
        assert_eq!(overflowing.encode(), in_range.encode());
    }

    #[test]
    fn test_decode_rejects_short_frame() {
        let result = PixelUpdate::decode(&[0; 7]);
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            "Expected a frame of exactly 8 bytes, got 7"
        );
    }

    #[test]
    fn test_decode_rejects_long_frame() {
        assert!(PixelUpdate::decode(&[0; 9]).is_err());
        assert!(PixelUpdate::decode(&[]).is_err());
    }
}
