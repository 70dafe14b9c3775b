#[macro_use]
extern crate log;
extern crate custom_error;

pub mod protocol;
pub mod ui;

use std::env;
use std::net::SocketAddr;

use env_logger::Env;

use pixcan_core::utils::print_intro;

use crate::protocol::socket::CanvasSocket;
use crate::ui::window::CanvasWindow;

const DEFAULT_LOGGING_LEVEL: &str = "info";
const DEFAULT_SERVER_ADDR: &str = "127.0.0.1:30423";

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or(DEFAULT_LOGGING_LEVEL)).init();
    print_intro();

    let addr = env::args().nth(1).unwrap_or_else(|| DEFAULT_SERVER_ADDR.to_string());
    let addr: SocketAddr = match addr.parse() {
        Ok(addr) => addr,
        Err(err) => {
            error!("invalid server address \"{}\": {:?}", addr, err);
            return;
        },
    };

    info!("connecting to {}", addr);
    let socket = match CanvasSocket::start_client(addr) {
        Ok(socket) => socket,
        Err(err) => {
            error!("{}", err);
            return;
        },
    };

    CanvasWindow::new(socket).update_loop();

    info!("done");
}
