/// Logger Table client library
///
/// This crate provides a client for keyed entry operations against a
/// remote logger table element, reachable either through addressed
/// request/response messages or through textual queries issued directly
/// against the backing store. Both paths are owned by caller-supplied
/// transports; see [`transport`].

pub mod client;
pub mod error;
pub mod transport;

mod direct;
mod ops;
mod remote;

// Re-export key types
pub use client::{
    LoggerTable, Strategy, TryExistsOutcome, TryGetOutcome, TryOutcome, DEFAULT_TIMEOUT,
};
pub use error::{ClientError, Result};
pub use transport::{
    Channel, EndpointResolver, Envelope, MessageTransport, QueryResponse, QueryTransport,
    ReturnAddress, TransportError,
};
pub use ltable_core::{DbKind, Endpoint, MessageKind, MessageRegistry, TableName, PROTOCOL_NAME};
