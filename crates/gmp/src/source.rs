//! List source adapter over a protocol transport.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument, trace};

use scanql_core::error::UpstreamResult;
use scanql_core::models::FilterTermString;
use scanql_core::ports::{ListPage, ListSource};

use crate::command::GetCommand;
use crate::envelope::{EnvelopeLayout, XmlNode, parse_list_response};

/// Transport to the scanner's management protocol.
///
/// Sends one rendered command and returns the raw XML response. Connection
/// handling, TLS and authentication are the implementation's concern.
#[async_trait]
pub trait GmpTransport: Send + Sync {
    async fn send(&self, command: &str) -> UpstreamResult<String>;
}

/// [`ListSource`] for one entity type of the management protocol.
pub struct GmpListSource<T: GmpTransport + ?Sized> {
    transport: Arc<T>,
    entity: String,
    command: String,
    layout: EnvelopeLayout,
    attributes: Vec<(String, String)>,
}

impl<T: GmpTransport + ?Sized> GmpListSource<T> {
    /// Source for a regularly named entity: `get_<entity>s` with the
    /// default [`EnvelopeLayout`].
    pub fn for_entity(transport: Arc<T>, entity: &str) -> Self {
        Self {
            transport,
            entity: entity.to_string(),
            command: format!("get_{entity}s"),
            layout: EnvelopeLayout::for_entity(entity),
            attributes: Vec::new(),
        }
    }

    /// Override the command element name.
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }

    /// Override the response layout.
    pub fn with_layout(mut self, layout: EnvelopeLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Add a fixed attribute sent with every command.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    fn command(&self, filter: &FilterTermString) -> GetCommand {
        self.attributes.iter().fold(
            GetCommand::new(self.command.clone(), filter.clone()),
            |cmd, (name, value)| cmd.with_attribute(name.clone(), value.clone()),
        )
    }
}

#[async_trait]
impl<T: GmpTransport + ?Sized> ListSource for GmpListSource<T> {
    type Node = XmlNode;

    fn entity(&self) -> &str {
        &self.entity
    }

    #[instrument(skip_all, fields(command = %self.command))]
    async fn list(&self, filter: &FilterTermString) -> UpstreamResult<ListPage<XmlNode>> {
        let command = self.command(filter).render();
        trace!(command = %command, "Sending command");

        let response = self.transport.send(&command).await?;
        let page = parse_list_response(&response, &self.layout)?;

        debug!(
            nodes = page.nodes.len(),
            filtered = page.counts.filtered,
            "Response parsed"
        );

        Ok(page)
    }
}
