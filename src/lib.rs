//! Driver for the StrongLink SL030 contactless card reader.
//!
//! The SL030 talks a length-prefixed command/response protocol over I2C and
//! pulls a detect line low when a card enters the field.
//!
//! # Features
//!
//! - `rpi` - I2C bus and GPIO line backends for the Raspberry Pi using rppal
//! - `cli` - the `sl030-poll` binary
//!
//! # Example
//!
//! ```ignore
//! use sl030::{GpioDetect, I2cTransport, Sl030};
//!
//! let transport = I2cTransport::new(1, 0x50)?;
//! let mut reader = Sl030::new(transport).with_detect(GpioDetect::new(4)?);
//!
//! if let Some(card) = reader.poll()? {
//!     println!("Card {:#04X}: {}", card.card_type, card.uid_hex());
//! }
//! ```

mod frame;
mod reader;
mod signal;
mod transport;
mod types;

#[cfg(feature = "rpi")]
mod rpi;

// Re-exports
pub use frame::{decode, encode};
pub use reader::Sl030;
pub use signal::{DetectSignal, NoSignal, WakeSignal};
pub use transport::BusTransport;
pub use types::{Card, Command, Config, MAX_PAYLOAD_LEN, Response, Result, Sl030Error, Status};

#[cfg(feature = "rpi")]
pub use rpi::{GpioDetect, GpioWake, I2cTransport};
