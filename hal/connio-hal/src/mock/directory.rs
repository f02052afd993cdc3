//! Mock connector directory

use heapless::Vec;

use super::connector::MockConnector;
use crate::connector::Connector;
use crate::directory::ConnectorDirectory;

/// Maximum connectors on a mock board
pub const MAX_MOCK_CONNECTORS: usize = 48;

/// Directory over a fixed set of mock connectors
#[derive(Debug, Default)]
pub struct MockDirectory<'a> {
    connectors: Vec<MockConnector<'a>, MAX_MOCK_CONNECTORS>,
}

impl<'a> MockDirectory<'a> {
    /// Create an empty directory
    pub fn new() -> Self {
        Self {
            connectors: Vec::new(),
        }
    }

    /// Add a connector, replacing any connector already at its index
    ///
    /// Returns the connector back if the directory is full.
    pub fn insert(&mut self, connector: MockConnector<'a>) -> Result<(), MockConnector<'a>> {
        if let Some(slot) = self
            .connectors
            .iter_mut()
            .find(|c| c.index() == connector.index())
        {
            *slot = connector;
            return Ok(());
        }
        self.connectors.push(connector)
    }

    /// Builder form of [`insert`](Self::insert); extra connectors are dropped
    pub fn with(mut self, connector: MockConnector<'a>) -> Self {
        let _ = self.insert(connector);
        self
    }

    /// Get a connector for inspection
    pub fn get(&self, index: u8) -> Option<&MockConnector<'a>> {
        self.connectors.iter().find(|c| c.index() == index)
    }

    /// Get a connector for modification
    pub fn get_mut(&mut self, index: u8) -> Option<&mut MockConnector<'a>> {
        self.connectors.iter_mut().find(|c| c.index() == index)
    }

    /// Number of connectors on the board
    pub fn len(&self) -> usize {
        self.connectors.len()
    }

    /// Check if the board has no connectors
    pub fn is_empty(&self) -> bool {
        self.connectors.is_empty()
    }
}

impl ConnectorDirectory for MockDirectory<'_> {
    fn connector(&mut self, index: u8) -> Option<&mut dyn Connector> {
        self.get_mut(index).map(|c| c as &mut dyn Connector)
    }
}
