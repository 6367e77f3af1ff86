/// Logger Table facade
///
/// One operation surface routed to either the remote-call or the
/// direct-query strategy. Both strategies honor the same per-operation
/// semantics (see [`crate::ops`]), so callers observe identical contracts
/// regardless of the selected path.

use crate::direct::DirectQuery;
use crate::error::{ClientError, Result};
use crate::ops::{EntryOperations, OpFailure};
use crate::remote::RemoteCall;
use crate::transport::{EndpointResolver, MessageTransport, QueryTransport};
use ltable_core::{
    AddEntryRequest, AppendEntryRequest, Endpoint, EntryRequest, RemoveEntryRequest, TableName,
    UpdateEntryRequest, PROTOCOL_NAME,
};
use std::sync::Arc;
use std::time::Duration;

/// Default upper bound on the wait for a remote reply.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Transport strategy used to reach the element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Typed request/response messages to the remote processing endpoint.
    #[default]
    Remote,
    /// Textual queries directly against the backing store.
    Direct,
}

/// Outcome of a non-throwing write operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TryOutcome {
    pub success: bool,
    /// Populated exactly when `success` is false.
    pub reason: String,
}

impl TryOutcome {
    fn ok() -> Self {
        Self {
            success: true,
            reason: String::new(),
        }
    }

    fn failed(reason: String) -> Self {
        Self {
            success: false,
            reason,
        }
    }
}

/// Outcome of a non-throwing read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TryGetOutcome {
    pub success: bool,
    pub reason: String,
    /// Retrieved data; `None` whenever `success` is false.
    pub data: Option<String>,
}

/// Outcome of a non-throwing existence check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TryExistsOutcome {
    pub success: bool,
    pub reason: String,
    /// Meaningful only when `success` is true.
    pub exists: bool,
}

/// Client for one remote Logger Table element.
///
/// Cheap to clone; clones share the underlying transports. Use [`via`] to
/// derive a handle bound to the other strategy for a particular call.
///
/// [`via`]: LoggerTable::via
#[derive(Clone)]
pub struct LoggerTable {
    remote: RemoteCall,
    direct: DirectQuery,
    endpoint: Endpoint,
    table: TableName,
    strategy: Strategy,
}

impl std::fmt::Debug for LoggerTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggerTable")
            .field("endpoint", &self.endpoint)
            .field("table", &self.table)
            .field("strategy", &self.strategy)
            .finish_non_exhaustive()
    }
}

impl LoggerTable {
    /// Create a client for the element at `endpoint`.
    ///
    /// The resolver is consulted once: the element must run the Logger
    /// Table protocol, and the backing database kind fixes the derived
    /// table name for the lifetime of the client.
    pub fn new(
        resolver: &dyn EndpointResolver,
        message_transport: Arc<dyn MessageTransport>,
        query_transport: Arc<dyn QueryTransport>,
        endpoint: Endpoint,
    ) -> Result<Self> {
        let protocol = resolver.protocol_name(endpoint);
        if protocol != PROTOCOL_NAME {
            return Err(ClientError::InvalidArgument(format!(
                "element {} runs protocol {:?}, not a Logger Table element",
                endpoint, protocol
            )));
        }

        let table = resolver.table_name(endpoint);
        Ok(Self {
            remote: RemoteCall::new(message_transport, endpoint, DEFAULT_TIMEOUT),
            direct: DirectQuery::new(query_transport, endpoint, table.clone()),
            endpoint,
            table,
            strategy: Strategy::Remote,
        })
    }

    /// Upper bound on the wait for a remote reply. Default: 5 seconds.
    pub fn timeout(&self) -> Duration {
        self.remote.timeout
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.remote.timeout = timeout;
    }

    /// Table the direct-query strategy addresses. Derived at construction,
    /// never recomputed.
    pub fn table_name(&self) -> &TableName {
        &self.table
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Derive a handle with the given strategy selected; the original
    /// client is untouched. `Strategy::Remote` is the default.
    pub fn via(&self, strategy: Strategy) -> Self {
        let mut client = self.clone();
        client.strategy = strategy;
        client
    }

    fn ops(&self) -> &dyn EntryOperations {
        match self.strategy {
            Strategy::Remote => &self.remote,
            Strategy::Direct => &self.direct,
        }
    }

    fn validate_id(&self, id: &str) -> Result<()> {
        if id.is_empty() {
            return Err(ClientError::InvalidArgument(
                "entry id must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    fn fail(op: &str, id: &str, failure: OpFailure) -> ClientError {
        match failure {
            OpFailure::Mismatch { expected, actual } => {
                ClientError::ProtocolMismatch { expected, actual }
            }
            OpFailure::Failed(reason) => ClientError::OperationFailed(format!(
                "unable to {} entry with id {}: {}",
                op, id, reason
            )),
        }
    }

    /// Fire-and-forget write on the remote path: returns once the
    /// transport accepts the message, regardless of downstream outcome.
    async fn send_and_forget(&self, request: EntryRequest) {
        if let Err(e) = self.remote.send_only(request).await {
            tracing::warn!(error = %e, "fire-and-forget send not accepted by transport");
        }
    }

    /// Check whether an entry is present in the table.
    pub async fn entry_exists(&self, id: &str) -> Result<bool> {
        self.validate_id(id)?;
        self.ops()
            .entry_exists(id)
            .await
            .map_err(|f| Self::fail("check", id, f))
    }

    /// Non-throwing variant of [`entry_exists`](Self::entry_exists).
    pub async fn try_entry_exists(&self, id: &str) -> Result<TryExistsOutcome> {
        self.validate_id(id)?;
        Ok(match self.ops().entry_exists(id).await {
            Ok(exists) => TryExistsOutcome {
                success: true,
                reason: String::new(),
                exists,
            },
            Err(f) => TryExistsOutcome {
                success: false,
                reason: f.reason(),
                exists: false,
            },
        })
    }

    /// Retrieve the data of an entry. Fails when the entry is absent.
    pub async fn get_entry(&self, id: &str) -> Result<String> {
        self.validate_id(id)?;
        self.ops()
            .get_entry(id)
            .await
            .map_err(|f| Self::fail("get", id, f))
    }

    /// Non-throwing variant of [`get_entry`](Self::get_entry). On failure
    /// `data` is `None`, never a value carried over from an earlier call.
    pub async fn try_get_entry(&self, id: &str) -> Result<TryGetOutcome> {
        self.validate_id(id)?;
        Ok(match self.ops().get_entry(id).await {
            Ok(data) => TryGetOutcome {
                success: true,
                reason: String::new(),
                data: Some(data),
            },
            Err(f) => TryGetOutcome {
                success: false,
                reason: f.reason(),
                data: None,
            },
        })
    }

    /// Add an entry. With `allow_overwrite` false the call is rejected
    /// when the id already exists.
    ///
    /// On the remote path this is fire-and-forget: the call reports
    /// success as soon as the transport accepted the message, with
    /// at-most-once and no confirmation. Use
    /// [`try_add_entry`](Self::try_add_entry) to observe the outcome.
    pub async fn add_entry(&self, id: &str, data: &str, allow_overwrite: bool) -> Result<()> {
        self.validate_id(id)?;
        match self.strategy {
            Strategy::Remote => {
                self.send_and_forget(EntryRequest::Add(AddEntryRequest {
                    id: id.to_string(),
                    data: data.to_string(),
                    allow_overwrite,
                }))
                .await;
                Ok(())
            }
            Strategy::Direct => self
                .direct
                .add_entry(id, data, allow_overwrite)
                .await
                .map_err(|f| Self::fail("add", id, f)),
        }
    }

    /// Non-throwing, confirmed variant of [`add_entry`](Self::add_entry).
    pub async fn try_add_entry(
        &self,
        id: &str,
        data: &str,
        allow_overwrite: bool,
    ) -> Result<TryOutcome> {
        self.validate_id(id)?;
        Ok(match self.ops().add_entry(id, data, allow_overwrite).await {
            Ok(()) => TryOutcome::ok(),
            Err(f) => TryOutcome::failed(f.reason()),
        })
    }

    /// Append data to an existing entry. Fails when the id is absent
    /// rather than creating the entry. Fire-and-forget on the remote path.
    pub async fn append_entry(&self, id: &str, data: &str) -> Result<()> {
        self.validate_id(id)?;
        match self.strategy {
            Strategy::Remote => {
                self.send_and_forget(EntryRequest::Append(AppendEntryRequest {
                    id: id.to_string(),
                    data: data.to_string(),
                }))
                .await;
                Ok(())
            }
            Strategy::Direct => self
                .direct
                .append_entry(id, data)
                .await
                .map_err(|f| Self::fail("append", id, f)),
        }
    }

    /// Non-throwing, confirmed variant of [`append_entry`](Self::append_entry).
    pub async fn try_append_entry(&self, id: &str, data: &str) -> Result<TryOutcome> {
        self.validate_id(id)?;
        Ok(match self.ops().append_entry(id, data).await {
            Ok(()) => TryOutcome::ok(),
            Err(f) => TryOutcome::failed(f.reason()),
        })
    }

    /// Overwrite the data of an existing entry. Absence is a no-op, not a
    /// failure, and is not distinguishable from an overwrite at this
    /// layer. Fire-and-forget on the remote path.
    pub async fn update_entry(&self, id: &str, data: &str) -> Result<()> {
        self.validate_id(id)?;
        match self.strategy {
            Strategy::Remote => {
                self.send_and_forget(EntryRequest::Update(UpdateEntryRequest {
                    id: id.to_string(),
                    data: data.to_string(),
                }))
                .await;
                Ok(())
            }
            Strategy::Direct => self
                .direct
                .update_entry(id, data)
                .await
                .map_err(|f| Self::fail("update", id, f)),
        }
    }

    /// Non-throwing, confirmed variant of [`update_entry`](Self::update_entry).
    pub async fn try_update_entry(&self, id: &str, data: &str) -> Result<TryOutcome> {
        self.validate_id(id)?;
        Ok(match self.ops().update_entry(id, data).await {
            Ok(()) => TryOutcome::ok(),
            Err(f) => TryOutcome::failed(f.reason()),
        })
    }

    /// Remove an entry. Removing an absent id succeeds (idempotent).
    /// Fire-and-forget on the remote path.
    pub async fn remove_entry(&self, id: &str) -> Result<()> {
        self.validate_id(id)?;
        match self.strategy {
            Strategy::Remote => {
                self.send_and_forget(EntryRequest::Remove(RemoveEntryRequest {
                    id: id.to_string(),
                }))
                .await;
                Ok(())
            }
            Strategy::Direct => self
                .direct
                .remove_entry(id)
                .await
                .map_err(|f| Self::fail("remove", id, f)),
        }
    }

    /// Non-throwing, confirmed variant of [`remove_entry`](Self::remove_entry).
    pub async fn try_remove_entry(&self, id: &str) -> Result<TryOutcome> {
        self.validate_id(id)?;
        Ok(match self.ops().remove_entry(id).await {
            Ok(()) => TryOutcome::ok(),
            Err(f) => TryOutcome::failed(f.reason()),
        })
    }
}
