use std::time::Instant;

use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use pixcan_core::models::board::Board;
use pixcan_core::models::pixel::Pixel;

use crate::protocol::color;
use crate::protocol::frame::{PixelUpdate, OPCODE_SET_PIXEL};
use crate::protocol::socket::CanvasSocket;

pub const BOARD_WIDTH: usize = 1024;
pub const BOARD_HEIGHT: usize = 1024;

// the single region this client displays; other regions are out of view
const BOARD_REGION: (u16, u16) = (0, 0);

const PALETTE_KEYS: [Key; 8] = [
    Key::Key1,
    Key::Key2,
    Key::Key3,
    Key::Key4,
    Key::Key5,
    Key::Key6,
    Key::Key7,
    Key::Key8,
];

pub struct CanvasWindow {

    window: Window,
    board: Board,
    buffer: Vec<u32>,
    socket: CanvasSocket,

    palette: [Pixel; 8],
    selected_color: usize,
    is_drawing: bool,
    last_point: Option<(u16, u16)>,
}

impl CanvasWindow {

    pub fn new(socket: CanvasSocket) -> Self {
        let mut window = Window::new(
            "pixcan",
            BOARD_WIDTH,
            BOARD_HEIGHT,
            WindowOptions::default()
        ).unwrap();
        window.limit_update_rate(Some(std::time::Duration::from_micros(16600))); // 60fps max

        let mut board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
        board.fill(Pixel::white());

        let checker = Pixel::from_rgb(236, 236, 236);
        for y in 0..BOARD_HEIGHT {
            for x in 0..BOARD_WIDTH {
                if ((x / 40) + (y / 40)) % 2 == 1 {
                    board.set_pixel(x, y, checker);
                }
            }
        }

        let buffer: Vec<u32> = board.pixels.iter().map(buffer_word).collect();

        CanvasWindow {
            window,
            board,
            buffer,
            socket,
            palette: palette(),
            selected_color: 0,
            is_drawing: false,
            last_point: None,
        }
    }

    /// Single-threaded dispatch loop: pointer state first, then every inbound
    /// frame in arrival order, then one buffer flip.
    pub fn update_loop(&mut self) {
        let mut prev_second = 0;
        let mut prev_second_updates = 0;
        let start = Instant::now();

        while self.window.is_open() && !self.window.is_key_down(Key::Escape) {
            let diff = Instant::now() - start;
            if diff.as_secs() == prev_second {
                prev_second_updates += 1;
            } else {
                self.window.set_title(format!("pixcan, fps: {}", prev_second_updates).as_str());
                prev_second_updates = 1;
                prev_second = diff.as_secs();
            }

            self.poll_palette_keys();
            self.poll_pointer();

            while let Some(frame) = self.socket.recv() {
                match PixelUpdate::decode(&frame) {
                    Ok(update) => self.process_update(&update),
                    Err(err) => warn!("dropping malformed frame: {}", err),
                }
            }

            self.window.update_with_buffer(&self.buffer, BOARD_WIDTH, BOARD_HEIGHT).unwrap();
        }
    }

    fn poll_palette_keys(&mut self) {
        for (index, key) in PALETTE_KEYS.iter().enumerate() {
            if self.window.is_key_pressed(*key, KeyRepeat::No) {
                self.selected_color = index;
                info!("selected palette color {}: {:?}", index + 1, self.palette[index]);
            }
        }
    }

    fn poll_pointer(&mut self) {
        if !self.window.get_mouse_down(MouseButton::Left) {
            self.is_drawing = false;
            self.last_point = None;
            return;
        }

        if let Some((x, y)) = self.window.get_mouse_pos(MouseMode::Discard) {
            let point = clamp_point(x, y);
            if !self.is_drawing || self.last_point != Some(point) {
                self.is_drawing = true;
                self.last_point = Some(point);
                self.send_point(point);
            }
        }
    }

    fn send_point(&mut self, point: (u16, u16)) {
        let (red, green, blue, alpha) = self.palette[self.selected_color].to_rgba4();
        let color = color::pack(red, green, blue, alpha);

        let update = PixelUpdate::set_pixel(BOARD_REGION, point, color);
        self.socket.send(update.encode());
    }

    fn process_update(&mut self, update: &PixelUpdate) {
        if update.opcode != OPCODE_SET_PIXEL {
            debug!("ignoring update with unknown opcode: {:?}", update);
            return;
        }

        match resolve_board_position(update) {
            Some((x, y)) => self.paint(x, y, color::unpack(update.color)),
            None => debug!("ignoring update outside the visible board: {:?}", update),
        }
    }

    fn paint(&mut self, x: usize, y: usize, pixel: Pixel) {
        self.board.set_pixel(x, y, pixel);
        self.buffer[y * BOARD_WIDTH + x] = buffer_word(&pixel);
    }
}

fn palette() -> [Pixel; 8] {
    [
        Pixel::black(),
        Pixel::white(),
        Pixel::from_rgb(221, 47, 47),
        Pixel::from_rgb(3, 155, 229),
        Pixel::from_rgb(67, 160, 71),
        Pixel::from_rgb(253, 216, 53),
        Pixel::from_rgb(251, 140, 0),
        Pixel::from_rgb(142, 36, 170),
    ]
}

fn buffer_word(pixel: &Pixel) -> u32 {
    ((pixel.red as u32) << 16) | ((pixel.green as u32) << 8) | (pixel.blue as u32)
}

/// Maps a raw pointer position to a board point, clamped to the 10-bit
/// coordinate range the wire format can carry.
fn clamp_point(x: f32, y: f32) -> (u16, u16) {
    (
        (x.max(0.0) as usize).min(BOARD_WIDTH - 1) as u16,
        (y.max(0.0) as usize).min(BOARD_HEIGHT - 1) as u16,
    )
}

/// Resolves the region and location of an update into a position on this
/// client's board, or none if the update is for a region out of view.
fn resolve_board_position(update: &PixelUpdate) -> Option<(usize, usize)> {
    if (update.region_x, update.region_y) != BOARD_REGION {
        return None;
    }

    let x = update.location_x as usize;
    let y = update.location_y as usize;
    if x >= BOARD_WIDTH || y >= BOARD_HEIGHT {
        return None;
    }

    Some((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_point() {
        assert_eq!(clamp_point(5.0, 9.0), (5, 9));
        assert_eq!(clamp_point(-3.0, 2000.0), (0, 1023));
        assert_eq!(clamp_point(1023.9, 0.0), (1023, 0));
    }

    #[test]
    fn test_resolve_board_position() {
        let update = PixelUpdate::set_pixel((0, 0), (5, 9), 0x000F);
        assert_eq!(resolve_board_position(&update), Some((5, 9)));
    }

    #[test]
    fn test_resolve_ignores_other_regions() {
        let update = PixelUpdate::set_pixel((1, 0), (5, 9), 0x000F);
        assert_eq!(resolve_board_position(&update), None);

        let update = PixelUpdate::set_pixel((0, 3), (5, 9), 0x000F);
        assert_eq!(resolve_board_position(&update), None);
    }

    #[test]
    fn test_buffer_word_layout() {
        assert_eq!(buffer_word(&Pixel::from_rgb(0x12, 0x34, 0x56)), 0x123456);
        assert_eq!(buffer_word(&Pixel::white()), 0xFFFFFF);
    }
}
