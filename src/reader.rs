use log::{debug, error, info, trace, warn};

use crate::frame;
use crate::signal::{DetectSignal, NoSignal, WakeSignal};
use crate::transport::BusTransport;
use crate::types::{Card, Command, Config, Response, Sl030Error, Status};

/// Handle to a single SL030 reader.
///
/// The handle owns the bus exclusively; every transaction takes `&mut self`,
/// so only one can be in flight. Share it between threads behind a `Mutex`.
pub struct Sl030<T: BusTransport, D: DetectSignal = NoSignal, W: WakeSignal = NoSignal> {
    transport: T,
    detect: Option<D>,
    wake: Option<W>,
    config: Config,
}

impl<T: BusTransport> Sl030<T> {
    /// Create a new reader instance with the given transport and default timing
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, Config::default())
    }

    /// Create a new reader instance with explicit timing
    pub fn with_config(transport: T, config: Config) -> Self {
        Self {
            transport,
            detect: None,
            wake: None,
            config,
        }
    }
}

impl<T: BusTransport, D: DetectSignal, W: WakeSignal> Sl030<T, D, W> {
    /// Attach the card detect line used by [`poll`](Self::poll)
    pub fn with_detect<D2: DetectSignal>(self, detect: D2) -> Sl030<T, D2, W> {
        Sl030 {
            transport: self.transport,
            detect: Some(detect),
            wake: self.wake,
            config: self.config,
        }
    }

    /// Attach the wake line used by [`wake`](Self::wake). The line is driven high right away.
    pub fn with_wake<W2: WakeSignal>(
        self,
        mut wake: W2,
    ) -> Result<Sl030<T, D, W2>, Sl030Error> {
        wake.set_high().map_err(signal_error)?;
        Ok(Sl030 {
            transport: self.transport,
            detect: self.detect,
            wake: Some(wake),
            config: self.config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Give the bus back to the caller
    pub fn release(self) -> T {
        self.transport
    }

    /// Write a command frame without waiting for a response
    pub fn write(&mut self, command: Command, payload: &[u8]) -> Result<(), Sl030Error> {
        let frame = frame::encode(command, payload)?;
        debug!("Sending frame: {:02X?}", frame);
        let written = self
            .transport
            .write(&frame)
            .map_err(|e| Sl030Error::Transport(format!("{:?}", e)))?;
        debug!("Wrote {} bytes", written);
        Ok(())
    }

    /// Read one raw response buffer and decode it
    pub fn read(&mut self) -> Result<Response, Sl030Error> {
        let mut raw = vec![0u8; self.config.read_len];
        match self.transport.read(&mut raw) {
            Ok(bytes_read) => {
                raw.truncate(bytes_read);
                debug!("Received {} bytes: {:02X?}", bytes_read, raw);
            }
            Err(e) => {
                error!("Read error: {:?}", e);
                return Err(Sl030Error::Transport(format!("{:?}", e)));
            }
        }

        frame::decode(&raw).inspect_err(|e| warn!("Failed to decode response: {}", e))
    }

    /// Send a command, wait for the reader to settle, then read and check its response
    pub fn transaction(
        &mut self,
        command: Command,
        payload: &[u8],
    ) -> Result<(Status, Vec<u8>), Sl030Error> {
        self.write(command, payload)?;

        std::thread::sleep(self.config.settle_delay);

        let response = self.read()?;
        if response.command != command {
            warn!(
                "Response command {:#04X} does not match request {:#04X}",
                response.command.0, command.0
            );
            return Err(Sl030Error::Protocol("response command mismatch".into()));
        }

        Ok((response.status, response.payload))
    }

    /// Select the card in the field, if any
    pub fn select(&mut self) -> Result<Option<Card>, Sl030Error> {
        let (status, mut payload) = self.transaction(Command::SELECT, &[])?;

        if !status.is_success() {
            debug!("Select returned status {:#04X}, no card", status.0);
            return Ok(None);
        }

        match payload.pop() {
            Some(card_type) => Ok(Some(Card {
                card_type,
                uid: payload,
            })),
            None => Err(Sl030Error::Protocol(
                "select response carries no card type".into(),
            )),
        }
    }

    /// Block until the detect line reports a card, then select it
    pub fn poll(&mut self) -> Result<Option<Card>, Sl030Error> {
        let detect = self
            .detect
            .as_mut()
            .ok_or(Sl030Error::SignalNotConfigured("detect"))?;

        detect.drain().map_err(signal_error)?;
        trace!("Waiting for card detect edge");
        detect.wait_edge().map_err(signal_error)?;
        trace!("Card detect edge received");

        self.select()
    }

    /// Put the reader to sleep. No response is read.
    pub fn sleep(&mut self) -> Result<(), Sl030Error> {
        info!("Putting reader to sleep");
        self.write(Command::SLEEP, &[])
    }

    /// Pulse the wake line to bring the reader out of sleep
    pub fn wake(&mut self) -> Result<(), Sl030Error> {
        let pulse = self.config.wake_pulse;
        let wake = self
            .wake
            .as_mut()
            .ok_or(Sl030Error::SignalNotConfigured("wake"))?;

        info!("Waking reader");
        wake.set_high().map_err(signal_error)?;
        std::thread::sleep(pulse);
        wake.set_low().map_err(signal_error)
    }
}

fn signal_error<E: std::fmt::Debug>(e: E) -> Sl030Error {
    Sl030Error::Transport(format!("{:?}", e))
}
