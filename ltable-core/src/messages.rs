/// Request and result messages exchanged with a logger table element
///
/// These are plain value objects shared by both transport strategies. They
/// carry no behavior; the message transport serializes them structurally,
/// and the direct-query strategy mirrors their semantics in query text.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Add an entry to the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddEntryRequest {
    /// Id of the entry to add.
    pub id: String,
    /// Data of the entry.
    pub data: String,
    /// Whether an existing entry with the same id may be overwritten.
    pub allow_overwrite: bool,
}

/// Result of adding an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddEntryResult {
    pub success: bool,
    /// Populated exactly when `success` is false.
    pub reason: String,
}

/// Retrieve the data of an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetEntryRequest {
    pub id: String,
}

/// Result of retrieving an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetEntryResult {
    pub success: bool,
    pub reason: String,
    /// Data of the entry; `None` when the entry could not be retrieved.
    pub data: Option<String>,
}

/// Overwrite the data of an existing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateEntryRequest {
    pub id: String,
    pub data: String,
}

/// Result of updating an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateEntryResult {
    pub success: bool,
    pub reason: String,
}

/// Append data to an existing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppendEntryRequest {
    pub id: String,
    pub data: String,
}

/// Result of appending to an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppendEntryResult {
    pub success: bool,
    pub reason: String,
}

/// Remove an entry from the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveEntryRequest {
    pub id: String,
}

/// Result of removing an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveEntryResult {
    pub success: bool,
    pub reason: String,
}

/// Check whether an entry is present in the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryExistsRequest {
    pub id: String,
}

/// Result of an existence check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryExistsResult {
    pub exists: bool,
}

/// Any request that can be sent to a logger table element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryRequest {
    Add(AddEntryRequest),
    Append(AppendEntryRequest),
    Get(GetEntryRequest),
    Remove(RemoveEntryRequest),
    Update(UpdateEntryRequest),
    Exists(EntryExistsRequest),
}

impl EntryRequest {
    /// Id of the entry this request targets.
    pub fn id(&self) -> &str {
        match self {
            EntryRequest::Add(r) => &r.id,
            EntryRequest::Append(r) => &r.id,
            EntryRequest::Get(r) => &r.id,
            EntryRequest::Remove(r) => &r.id,
            EntryRequest::Update(r) => &r.id,
            EntryRequest::Exists(r) => &r.id,
        }
    }

    pub fn kind(&self) -> MessageKind {
        match self {
            EntryRequest::Add(_) => MessageKind::AddEntryRequest,
            EntryRequest::Append(_) => MessageKind::AppendEntryRequest,
            EntryRequest::Get(_) => MessageKind::GetEntryRequest,
            EntryRequest::Remove(_) => MessageKind::RemoveEntryRequest,
            EntryRequest::Update(_) => MessageKind::UpdateEntryRequest,
            EntryRequest::Exists(_) => MessageKind::EntryExistsRequest,
        }
    }

    /// Kind of reply this request resolves to.
    pub fn expected_reply(&self) -> MessageKind {
        match self {
            EntryRequest::Add(_) => MessageKind::AddEntryResult,
            EntryRequest::Append(_) => MessageKind::AppendEntryResult,
            EntryRequest::Get(_) => MessageKind::GetEntryResult,
            EntryRequest::Remove(_) => MessageKind::RemoveEntryResult,
            EntryRequest::Update(_) => MessageKind::UpdateEntryResult,
            EntryRequest::Exists(_) => MessageKind::EntryExistsResult,
        }
    }
}

/// Any reply a logger table element can return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryReply {
    Add(AddEntryResult),
    Append(AppendEntryResult),
    Get(GetEntryResult),
    Remove(RemoveEntryResult),
    Update(UpdateEntryResult),
    Exists(EntryExistsResult),
}

impl EntryReply {
    pub fn kind(&self) -> MessageKind {
        match self {
            EntryReply::Add(_) => MessageKind::AddEntryResult,
            EntryReply::Append(_) => MessageKind::AppendEntryResult,
            EntryReply::Get(_) => MessageKind::GetEntryResult,
            EntryReply::Remove(_) => MessageKind::RemoveEntryResult,
            EntryReply::Update(_) => MessageKind::UpdateEntryResult,
            EntryReply::Exists(_) => MessageKind::EntryExistsResult,
        }
    }
}

/// Discriminant for every message the protocol knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageKind {
    AddEntryRequest,
    AddEntryResult,
    AppendEntryRequest,
    AppendEntryResult,
    GetEntryRequest,
    GetEntryResult,
    RemoveEntryRequest,
    RemoveEntryResult,
    UpdateEntryRequest,
    UpdateEntryResult,
    EntryExistsRequest,
    EntryExistsResult,
}

impl MessageKind {
    pub const ALL: [MessageKind; 12] = [
        MessageKind::AddEntryRequest,
        MessageKind::AddEntryResult,
        MessageKind::AppendEntryRequest,
        MessageKind::AppendEntryResult,
        MessageKind::GetEntryRequest,
        MessageKind::GetEntryResult,
        MessageKind::RemoveEntryRequest,
        MessageKind::RemoveEntryResult,
        MessageKind::UpdateEntryRequest,
        MessageKind::UpdateEntryResult,
        MessageKind::EntryExistsRequest,
        MessageKind::EntryExistsResult,
    ];

    /// Returns a stable name for this message kind.
    /// These names are stable and appear in protocol-mismatch reasons.
    pub fn name(&self) -> &'static str {
        match self {
            MessageKind::AddEntryRequest => "AddEntryRequest",
            MessageKind::AddEntryResult => "AddEntryResult",
            MessageKind::AppendEntryRequest => "AppendEntryRequest",
            MessageKind::AppendEntryResult => "AppendEntryResult",
            MessageKind::GetEntryRequest => "GetEntryRequest",
            MessageKind::GetEntryResult => "GetEntryResult",
            MessageKind::RemoveEntryRequest => "RemoveEntryRequest",
            MessageKind::RemoveEntryResult => "RemoveEntryResult",
            MessageKind::UpdateEntryRequest => "UpdateEntryRequest",
            MessageKind::UpdateEntryResult => "UpdateEntryResult",
            MessageKind::EntryExistsRequest => "EntryExistsRequest",
            MessageKind::EntryExistsResult => "EntryExistsResult",
        }
    }
}

/// Explicit registry of message kinds a transport may (de)serialize.
///
/// Constructed by the client and handed to the message transport on every
/// call, in place of process-wide type registration. A transport must
/// refuse payloads whose kind is not in the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRegistry {
    kinds: HashSet<MessageKind>,
}

impl MessageRegistry {
    /// An empty registry; kinds must be registered before use.
    pub fn new() -> Self {
        Self {
            kinds: HashSet::new(),
        }
    }

    /// A registry knowing every message kind of the protocol.
    pub fn full() -> Self {
        Self {
            kinds: MessageKind::ALL.into_iter().collect(),
        }
    }

    pub fn register(&mut self, kind: MessageKind) {
        self.kinds.insert(kind);
    }

    pub fn is_known(&self, kind: MessageKind) -> bool {
        self.kinds.contains(&kind)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl Default for MessageRegistry {
    fn default() -> Self {
        Self::new()
    }
}
