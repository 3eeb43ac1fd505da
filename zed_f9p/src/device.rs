use log::debug;

use crate::{
    config::InitConfig, error::DeviceError, parser, transport::UbxTransport, NavPvt, ParserError,
};

/// A ZED-F9P behind some transport.
///
/// Holds no receiver state of its own; decoding goes straight to [crate::decode].
pub struct Device<T: UbxTransport> {
    transport: T,
}

impl<T: UbxTransport> Device<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_inner(self) -> T {
        self.transport
    }

    /// Hands one finished frame to the transport
    pub fn send(&mut self, frame: &[u8]) -> Result<(), DeviceError<T::Error>> {
        debug!("tx {} bytes: {:02X?}", frame.len(), frame);
        self.transport
            .write_all(frame)
            .map_err(DeviceError::Transport)
    }

    /// Sends every frame of `config`, stopping at the first transport error
    pub fn apply_init_config(&mut self, config: &InitConfig) -> Result<(), DeviceError<T::Error>> {
        for frame in config.frames() {
            self.send(&frame)?;
        }
        Ok(())
    }

    pub fn decode(&self, buffer: &[u8], record: &mut NavPvt) -> Result<(), ParserError> {
        parser::decode(buffer, buffer.len(), record)
    }
}
