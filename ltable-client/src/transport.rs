/// Transport and resolver interfaces the client is written against
///
/// Both transports are owned by the caller. The message transport carries
/// typed requests to an addressed parameter channel and, when a return
/// address is attached, resolves to the first typed reply. The query
/// transport executes textual queries directly against the backing store.

use async_trait::async_trait;
use ltable_core::{DbKind, Endpoint, EntryReply, EntryRequest, MessageRegistry, TableName};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Failure raised by a transport implementation.
#[derive(Error, Debug, Clone)]
pub enum TransportError {
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Parameter channel a message is delivered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub endpoint: Endpoint,
    pub parameter_id: u32,
}

/// Return path attached to requests that expect a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnAddress {
    pub endpoint: Endpoint,
    pub parameter_id: u32,
}

/// One request plus its optional return path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub request: EntryRequest,
    pub return_address: Option<ReturnAddress>,
}

/// Message-based transport to a remote processing endpoint.
///
/// The registry passed with every call lists the message kinds the
/// transport may (de)serialize; payloads outside it must be refused with
/// [`TransportError::Serialization`].
#[async_trait]
pub trait MessageTransport: Send + Sync {
    /// Deliver an envelope without waiting for remote execution.
    async fn send(
        &self,
        destination: Channel,
        envelope: Envelope,
        registry: &MessageRegistry,
    ) -> Result<(), TransportError>;

    /// Deliver an envelope and resolve to the first reply arriving on the
    /// return path. Implementations may wait indefinitely; the caller
    /// bounds the wait.
    async fn call(
        &self,
        destination: Channel,
        envelope: Envelope,
        registry: &MessageRegistry,
    ) -> Result<EntryReply, TransportError>;
}

/// Response of the query transport: an error string (empty on success)
/// plus the value set produced by the query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResponse {
    pub error: String,
    pub values: Vec<String>,
}

impl QueryResponse {
    pub fn is_success(&self) -> bool {
        self.error.is_empty()
    }
}

/// Direct query path against the backing store.
#[async_trait]
pub trait QueryTransport: Send + Sync {
    /// Execute a textual query, routed to the given agent. No timeout is
    /// applied on top of whatever the implementation provides.
    async fn execute(&self, agent_id: u32, query: &str) -> Result<QueryResponse, TransportError>;
}

/// Resolves store-side facts about an element.
///
/// Consulted once at client construction; the derived table name is fixed
/// for the client's lifetime.
pub trait EndpointResolver: Send + Sync {
    /// Name of the protocol the element runs.
    fn protocol_name(&self, endpoint: Endpoint) -> String;

    /// Kind of database backing the element's cluster.
    fn db_kind(&self, endpoint: Endpoint) -> DbKind;

    /// Table to query against for the element.
    fn table_name(&self, endpoint: Endpoint) -> TableName {
        TableName::derive(self.db_kind(endpoint), endpoint)
    }
}
