pub mod board;
pub mod pixel;
