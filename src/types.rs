//! Types for SL030 operations

use std::time::Duration;

use thiserror::Error;

/// Largest payload a single frame can carry (the length byte counts the command too)
pub const MAX_PAYLOAD_LEN: usize = 254;

/// Command byte sent to the reader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Command(pub u8);

impl Command {
    /// Select the card currently in the field
    pub const SELECT: Command = Command(0x01);
    /// Put the reader into low-power sleep
    pub const SLEEP: Command = Command(0x50);
}

impl From<u8> for Command {
    fn from(value: u8) -> Self {
        Command(value)
    }
}

impl TryFrom<i32> for Command {
    type Error = Sl030Error;

    fn try_from(value: i32) -> std::result::Result<Self, Self::Error> {
        u8::try_from(value)
            .map(Command)
            .map_err(|_| Sl030Error::InvalidArgument(format!("Invalid command: {}", value)))
    }
}

/// Status byte reported by the reader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Status(pub u8);

impl Status {
    pub const SUCCESS: Status = Status(0x00);

    pub fn is_success(self) -> bool {
        self == Self::SUCCESS
    }
}

/// Decoded response frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub command: Command,
    pub status: Status,
    pub payload: Vec<u8>,
}

/// Card reported by a successful Select
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub card_type: u8,
    pub uid: Vec<u8>,
}

impl Card {
    pub fn uid_hex(&self) -> String {
        bytes_to_hex(&self.uid)
    }
}

/// Timing and buffer settings for a device handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Wait between writing a command and reading its response
    pub settle_delay: Duration,
    /// How long the wake line is held high
    pub wake_pulse: Duration,
    /// Size of the raw read buffer; the reader always answers with a full buffer
    pub read_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_millis(100),
            wake_pulse: Duration::from_millis(100),
            read_len: 256,
        }
    }
}

/// Errors that can occur during SL030 operations
#[derive(Debug, Error)]
pub enum Sl030Error {
    /// Malformed command or oversized payload
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Bus or signal line failure
    #[error("transport error: {0}")]
    Transport(String),
    /// Response could not be decoded or does not answer the request
    #[error("protocol error: {0}")]
    Protocol(String),
    /// Operation needs a signal line the device was built without
    #[error("{0} signal not configured")]
    SignalNotConfigured(&'static str),
}

pub type Result<T> = std::result::Result<T, Sl030Error>;

/// Convert bytes to uppercase hex string
pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02X}", b)).collect()
}
