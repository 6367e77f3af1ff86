/// Remote-call strategy: one typed request, at most one typed reply
///
/// Requests go to the element's receive parameter channel. Calls that need
/// a result attach a return address naming the element's return parameter
/// and wait, bounded by the configured timeout, for the first reply. The
/// reply's kind is checked against the statically expected result kind.

use crate::ops::{EntryOperations, OpFailure, OpResult};
use crate::transport::{Channel, Envelope, MessageTransport, ReturnAddress, TransportError};
use async_trait::async_trait;
use ltable_core::{
    AddEntryRequest, AppendEntryRequest, Endpoint, EntryExistsRequest, EntryReply, EntryRequest,
    GetEntryRequest, MessageRegistry, RemoveEntryRequest, UpdateEntryRequest,
    RECEIVE_PARAMETER_ID, RETURN_PARAMETER_ID,
};
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub(crate) struct RemoteCall {
    transport: Arc<dyn MessageTransport>,
    endpoint: Endpoint,
    registry: MessageRegistry,
    /// Upper bound on the wait for a reply. Owned by the facade.
    pub(crate) timeout: Duration,
}

impl RemoteCall {
    pub(crate) fn new(
        transport: Arc<dyn MessageTransport>,
        endpoint: Endpoint,
        timeout: Duration,
    ) -> Self {
        Self {
            transport,
            endpoint,
            registry: MessageRegistry::full(),
            timeout,
        }
    }

    fn inbound(&self) -> Channel {
        Channel {
            endpoint: self.endpoint,
            parameter_id: RECEIVE_PARAMETER_ID,
        }
    }

    fn return_address(&self) -> ReturnAddress {
        ReturnAddress {
            endpoint: self.endpoint,
            parameter_id: RETURN_PARAMETER_ID,
        }
    }

    /// Fire-and-forget: the call returns as soon as the transport accepts
    /// the message; the store's outcome is not observed.
    pub(crate) async fn send_only(&self, request: EntryRequest) -> Result<(), TransportError> {
        tracing::debug!(kind = request.kind().name(), id = request.id(), "sending without reply");
        let envelope = Envelope {
            request,
            return_address: None,
        };
        self.transport
            .send(self.inbound(), envelope, &self.registry)
            .await
    }

    /// Send and wait for the first reply, bounded by `self.timeout`.
    async fn call(&self, request: EntryRequest) -> OpResult<EntryReply> {
        tracing::debug!(kind = request.kind().name(), id = request.id(), "sending with reply");
        let envelope = Envelope {
            request,
            return_address: Some(self.return_address()),
        };
        let pending = self
            .transport
            .call(self.inbound(), envelope, &self.registry);

        match tokio::time::timeout(self.timeout, pending).await {
            Ok(Ok(reply)) => Ok(reply),
            Ok(Err(e)) => Err(OpFailure::Failed(e.to_string())),
            Err(_) => Err(OpFailure::Failed(
                TransportError::Timeout(self.timeout).to_string(),
            )),
        }
    }
}

fn mismatch(expected: &'static str, reply: &EntryReply) -> OpFailure {
    OpFailure::Mismatch {
        expected,
        actual: reply.kind().name(),
    }
}

#[async_trait]
impl EntryOperations for RemoteCall {
    async fn entry_exists(&self, id: &str) -> OpResult<bool> {
        let request = EntryRequest::Exists(EntryExistsRequest { id: id.to_string() });
        match self.call(request).await? {
            EntryReply::Exists(result) => Ok(result.exists),
            other => Err(mismatch("EntryExistsResult", &other)),
        }
    }

    async fn get_entry(&self, id: &str) -> OpResult<String> {
        let request = EntryRequest::Get(GetEntryRequest { id: id.to_string() });
        match self.call(request).await? {
            EntryReply::Get(result) => {
                if result.success {
                    Ok(result.data.unwrap_or_default())
                } else {
                    Err(OpFailure::Failed(result.reason))
                }
            }
            other => Err(mismatch("GetEntryResult", &other)),
        }
    }

    async fn add_entry(&self, id: &str, data: &str, allow_overwrite: bool) -> OpResult<()> {
        let request = EntryRequest::Add(AddEntryRequest {
            id: id.to_string(),
            data: data.to_string(),
            allow_overwrite,
        });
        match self.call(request).await? {
            EntryReply::Add(result) => {
                if result.success {
                    Ok(())
                } else {
                    Err(OpFailure::Failed(result.reason))
                }
            }
            other => Err(mismatch("AddEntryResult", &other)),
        }
    }

    async fn append_entry(&self, id: &str, data: &str) -> OpResult<()> {
        let request = EntryRequest::Append(AppendEntryRequest {
            id: id.to_string(),
            data: data.to_string(),
        });
        match self.call(request).await? {
            EntryReply::Append(result) => {
                if result.success {
                    Ok(())
                } else {
                    Err(OpFailure::Failed(result.reason))
                }
            }
            other => Err(mismatch("AppendEntryResult", &other)),
        }
    }

    async fn update_entry(&self, id: &str, data: &str) -> OpResult<()> {
        let request = EntryRequest::Update(UpdateEntryRequest {
            id: id.to_string(),
            data: data.to_string(),
        });
        match self.call(request).await? {
            EntryReply::Update(result) => {
                if result.success {
                    Ok(())
                } else {
                    Err(OpFailure::Failed(result.reason))
                }
            }
            other => Err(mismatch("UpdateEntryResult", &other)),
        }
    }

    async fn remove_entry(&self, id: &str) -> OpResult<()> {
        let request = EntryRequest::Remove(RemoveEntryRequest { id: id.to_string() });
        match self.call(request).await? {
            EntryReply::Remove(result) => {
                if result.success {
                    Ok(())
                } else {
                    Err(OpFailure::Failed(result.reason))
                }
            }
            other => Err(mismatch("RemoveEntryResult", &other)),
        }
    }
}
