use std::io::{Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};
use std::thread;
use std::thread::JoinHandle;

use crossbeam::channel::*;
use custom_error::custom_error;

use crate::protocol::frame::FRAME_LENGTH;

custom_error! {pub SocketError
    FailedToConnect {description: String} = "Failed to connect: {description}",
}

// liveness greeting, written once right after the connection is established
const HANDSHAKE: &[u8] = b"I'm alive!\n";

enum WireCommand {
    Frame([u8; FRAME_LENGTH]),
    Close,
}

/// Full-duplex connection to the canvas server. Outbound frames are handed to
/// a writer thread over a channel, inbound frames are read by a reader thread
/// in fixed 8-byte units and surfaced in arrival order. The codec never sees
/// this type; it only ever sees the frames that pass through it.
pub struct CanvasSocket {

    writer_thread: JoinHandle<()>,
    reader_thread: JoinHandle<()>,

    command_sender: Sender<WireCommand>,
    frame_receiver: Receiver<[u8; FRAME_LENGTH]>,
}

impl CanvasSocket {

    pub fn start_client(target: SocketAddr) -> Result<Self, SocketError> {
        let mut stream = TcpStream::connect(target).map_err(|err| SocketError::FailedToConnect {
            description: format!("failed to connect to server: {:?}", err),
        })?;
        stream.set_nodelay(true).map_err(|err| SocketError::FailedToConnect {
            description: format!("failed to set nodelay: {:?}", err),
        })?;
        stream.write_all(HANDSHAKE).map_err(|err| SocketError::FailedToConnect {
            description: format!("failed to send handshake: {:?}", err),
        })?;

        let reader_stream = stream.try_clone().map_err(|err| SocketError::FailedToConnect {
            description: format!("failed to clone stream: {:?}", err),
        })?;

        let (command_tx, command_rx) = crossbeam::channel::unbounded();
        let (frame_tx, frame_rx) = crossbeam::channel::unbounded();

        Ok(CanvasSocket {
            writer_thread: start_writer(stream, command_rx),
            reader_thread: start_reader(reader_stream, frame_tx),
            command_sender: command_tx,
            frame_receiver: frame_rx,
        })
    }

    pub fn send(&self, frame: [u8; FRAME_LENGTH]) {
        if let Err(err) = self.command_sender.send(WireCommand::Frame(frame)) {
            error!("failed to queue frame for sending: {:?}", err);
        }
    }

    pub fn recv(&self) -> Option<[u8; FRAME_LENGTH]> {
        self.frame_receiver.try_recv().ok()
    }

    pub fn recv_blocking(&self) -> Option<[u8; FRAME_LENGTH]> {
        self.frame_receiver.recv().ok()
    }

    pub fn close(self) {
        let _ = self.command_sender.send(WireCommand::Close);
        let _ = self.writer_thread.join();
        let _ = self.reader_thread.join();
    }
}

fn start_writer(mut stream: TcpStream, rx: Receiver<WireCommand>) -> JoinHandle<()> {
    thread::spawn(move || {
        loop {
            match rx.recv() {
                Ok(WireCommand::Frame(frame)) => {
                    if let Err(err) = stream.write_all(&frame) {
                        error!("failed to send frame: {:?}", err);
                        break;
                    }
                },
                Ok(WireCommand::Close) | Err(_) => break,
            }
        }

        // unblocks the reader thread as well
        let _ = stream.shutdown(Shutdown::Both);
    })
}

fn start_reader(mut stream: TcpStream, tx: Sender<[u8; FRAME_LENGTH]>) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut frame = [0; FRAME_LENGTH];

        loop {
            if let Err(err) = stream.read_exact(&mut frame) {
                info!("connection closed: {:?}", err);
                break;
            }

            if tx.send(frame).is_err() {
                break;
            }
        }
    })
}
