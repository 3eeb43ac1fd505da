/// Anything that can push a finished frame towards the receiver.
///
/// Implementations decide on their own timeout policy; a frame is handed
/// over exactly once and never retried by this crate.
pub trait UbxTransport {
    type Error;

    fn write_all(&mut self, frame: &[u8]) -> Result<(), Self::Error>;
}

#[cfg(feature = "std")]
impl<W: std::io::Write> UbxTransport for W {
    type Error = std::io::Error;

    fn write_all(&mut self, frame: &[u8]) -> Result<(), Self::Error> {
        std::io::Write::write_all(self, frame)?;
        std::io::Write::flush(self)
    }
}
