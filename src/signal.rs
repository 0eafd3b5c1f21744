//! Out-of-band signal lines: card detect (input) and wake (output)

use std::convert::Infallible;

/// Line that signals a card entering the field with a falling edge.
pub trait DetectSignal {
    type Error: std::fmt::Debug;

    /// Discard any edge or value latched before the caller started waiting
    fn drain(&mut self) -> Result<(), Self::Error>;

    /// Block until the next falling edge
    fn wait_edge(&mut self) -> Result<(), Self::Error>;
}

/// Line used to pulse the reader out of sleep.
pub trait WakeSignal {
    type Error: std::fmt::Debug;

    fn set_high(&mut self) -> Result<(), Self::Error>;

    fn set_low(&mut self) -> Result<(), Self::Error>;
}

/// Placeholder for a signal line that is not wired up.
///
/// It has no values, so a device typed with it can never hold that line.
#[derive(Debug)]
pub enum NoSignal {}

impl DetectSignal for NoSignal {
    type Error = Infallible;

    fn drain(&mut self) -> Result<(), Self::Error> {
        match *self {}
    }

    fn wait_edge(&mut self) -> Result<(), Self::Error> {
        match *self {}
    }
}

impl WakeSignal for NoSignal {
    type Error = Infallible;

    fn set_high(&mut self) -> Result<(), Self::Error> {
        match *self {}
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        match *self {}
    }
}
