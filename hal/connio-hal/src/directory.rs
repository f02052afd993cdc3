//! Connector directory
//!
//! The directory owns the board's connectors and resolves a connector index
//! to a connector. It only knows about physical connectors; virtual pins are
//! resolved above it.

use crate::connector::Connector;

/// Index to connector lookup
pub trait ConnectorDirectory {
    /// Get the connector at `index`
    ///
    /// Returns `None` if the board has no connector at that index.
    fn connector(&mut self, index: u8) -> Option<&mut dyn Connector>;
}

impl<T: ConnectorDirectory + ?Sized> ConnectorDirectory for &mut T {
    fn connector(&mut self, index: u8) -> Option<&mut dyn Connector> {
        (**self).connector(index)
    }
}
