/// Trait for the byte-oriented bus the reader sits on.
/// The handle is expected to be bound to the reader's address already.
pub trait BusTransport {
    /// Error type for transport operations
    type Error: std::fmt::Debug;

    /// Write data to the bus, returning the number of bytes written
    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error>;

    /// Read up to `buf.len()` bytes from the bus, returning the number of bytes read
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}
