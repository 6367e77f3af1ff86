/// Shared test fixture: an in-memory logger table element
///
/// Implements both transport contracts over one entry map, so the same
/// store can be driven through the message path and the query path and
/// the two strategies can be checked for identical behavior.

use async_trait::async_trait;
use ltable_client::transport::{
    Channel, Envelope, MessageTransport, QueryResponse, QueryTransport, TransportError,
};
use ltable_client::{DbKind, Endpoint, EndpointResolver, LoggerTable, PROTOCOL_NAME};
use ltable_core::timestamp::parse_timestamp;
use ltable_core::{
    escape, format_timestamp, unescape, AddEntryResult, AppendEntryResult, EntryExistsResult,
    EntryReply, EntryRequest, GetEntryResult, MessageRegistry, RemoveEntryResult, TableName,
    UpdateEntryResult,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

pub const AGENT_ID: u32 = 7;
pub const ELEMENT_ID: u32 = 11;

#[derive(Clone)]
struct Row {
    data: String,
    #[allow(dead_code)]
    ts: String,
}

pub struct InMemoryElement {
    table: String,
    entries: Mutex<HashMap<String, Row>>,
}

impl InMemoryElement {
    pub fn new(table: &TableName) -> Arc<Self> {
        Arc::new(Self {
            table: table.to_string(),
            entries: Mutex::new(HashMap::new()),
        })
    }

    /// Stored data for an id, bypassing both transports.
    pub fn data_of(&self, id: &str) -> Option<String> {
        self.entries.lock().get(id).map(|row| row.data.clone())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.lock().contains_key(id)
    }

    /// Connector-side handling of one request, shared by both channels.
    fn apply(&self, request: &EntryRequest) -> EntryReply {
        let mut entries = self.entries.lock();
        match request {
            EntryRequest::Exists(r) => EntryReply::Exists(EntryExistsResult {
                exists: entries.contains_key(&r.id),
            }),
            EntryRequest::Get(r) => match entries.get(&r.id) {
                Some(row) => EntryReply::Get(GetEntryResult {
                    success: true,
                    reason: String::new(),
                    data: Some(row.data.clone()),
                }),
                None => EntryReply::Get(GetEntryResult {
                    success: false,
                    reason: format!("entry with id {} does not exist", r.id),
                    data: None,
                }),
            },
            EntryRequest::Add(r) => {
                if !r.allow_overwrite && entries.contains_key(&r.id) {
                    EntryReply::Add(AddEntryResult {
                        success: false,
                        reason: format!("entry with id {} already exists", r.id),
                    })
                } else {
                    entries.insert(
                        r.id.clone(),
                        Row {
                            data: r.data.clone(),
                            ts: format_timestamp(chrono::Utc::now()),
                        },
                    );
                    EntryReply::Add(AddEntryResult {
                        success: true,
                        reason: String::new(),
                    })
                }
            }
            EntryRequest::Append(r) => match entries.get_mut(&r.id) {
                Some(row) => {
                    row.data.push_str(&r.data);
                    EntryReply::Append(AppendEntryResult {
                        success: true,
                        reason: String::new(),
                    })
                }
                None => EntryReply::Append(AppendEntryResult {
                    success: false,
                    reason: format!("entry with id {} does not exist", r.id),
                }),
            },
            EntryRequest::Update(r) => {
                // Absence is a no-op, not a failure.
                if let Some(row) = entries.get_mut(&r.id) {
                    row.data = r.data.clone();
                }
                EntryReply::Update(UpdateEntryResult {
                    success: true,
                    reason: String::new(),
                })
            }
            EntryRequest::Remove(r) => {
                entries.remove(&r.id);
                EntryReply::Remove(RemoveEntryResult {
                    success: true,
                    reason: String::new(),
                })
            }
        }
    }

    /// Simulate structural serialization across the wire, honoring the
    /// caller-supplied registry.
    fn over_the_wire(
        envelope: &Envelope,
        registry: &MessageRegistry,
    ) -> Result<EntryRequest, TransportError> {
        if !registry.is_known(envelope.request.kind()) {
            return Err(TransportError::Serialization(format!(
                "unknown message kind {}",
                envelope.request.kind().name()
            )));
        }
        let wire = serde_json::to_string(&envelope.request)
            .map_err(|e| TransportError::Serialization(e.to_string()))?;
        serde_json::from_str(&wire).map_err(|e| TransportError::Serialization(e.to_string()))
    }

    fn execute_query(&self, query: &str) -> QueryResponse {
        if let Some(rest) = query.strip_prefix("SELECT id FROM ") {
            return self.select(rest, |row_id, _row| escape(row_id));
        }
        if let Some(rest) = query.strip_prefix("SELECT dt FROM ") {
            return self.select(rest, |_row_id, row| escape(&row.data));
        }
        if let Some(rest) = query.strip_prefix("INSERT INTO ") {
            return self.insert(rest);
        }
        if let Some(rest) = query.strip_prefix("UPDATE ") {
            return self.update(rest);
        }
        if let Some(rest) = query.strip_prefix("DELETE FROM ") {
            return self.delete(rest);
        }
        error_response(format!("syntax error: {}", query))
    }

    fn select(&self, rest: &str, project: impl Fn(&str, &Row) -> String) -> QueryResponse {
        let Some(rest) = rest.strip_prefix(self.table.as_str()) else {
            return error_response(format!("unconfigured table in: {}", rest));
        };
        let Some(rest) = rest.strip_prefix(" WHERE id=") else {
            return error_response("syntax error in select".to_string());
        };
        let Some((raw_id, rest)) = take_literal(rest) else {
            return error_response("unterminated literal".to_string());
        };
        if rest != " LIMIT 1" {
            return error_response("syntax error after literal".to_string());
        }
        let id = unescape(&raw_id);
        let entries = self.entries.lock();
        let values = match entries.get(&id) {
            Some(row) => vec![project(&id, row)],
            None => vec![],
        };
        QueryResponse {
            error: String::new(),
            values,
        }
    }

    fn insert(&self, rest: &str) -> QueryResponse {
        let Some(rest) = rest.strip_prefix(self.table.as_str()) else {
            return error_response(format!("unconfigured table in: {}", rest));
        };
        let Some(rest) = rest.strip_prefix(" (id, dt, ts) VALUES (") else {
            return error_response("syntax error in insert".to_string());
        };
        let Some((raw_id, rest)) = take_literal(rest) else {
            return error_response("unterminated literal".to_string());
        };
        let Some(rest) = rest.strip_prefix(", ") else {
            return error_response("syntax error in insert".to_string());
        };
        let Some((raw_data, rest)) = take_literal(rest) else {
            return error_response("unterminated literal".to_string());
        };
        let Some(rest) = rest.strip_prefix(", ") else {
            return error_response("syntax error in insert".to_string());
        };
        let Some((raw_ts, rest)) = take_literal(rest) else {
            return error_response("unterminated literal".to_string());
        };
        let conditional = match rest {
            ")" => false,
            ") IF NOT EXISTS" => true,
            _ => return error_response("syntax error after values".to_string()),
        };
        if parse_timestamp(&raw_ts).is_none() {
            return error_response(format!("invalid timestamp literal: {}", raw_ts));
        }

        let id = unescape(&raw_id);
        let mut entries = self.entries.lock();
        if conditional && entries.contains_key(&id) {
            // Guard not applied; the store reports no error for this.
            return QueryResponse::default();
        }
        entries.insert(
            id,
            Row {
                data: unescape(&raw_data),
                ts: raw_ts,
            },
        );
        QueryResponse::default()
    }

    fn update(&self, rest: &str) -> QueryResponse {
        let Some(rest) = rest.strip_prefix(self.table.as_str()) else {
            return error_response(format!("unconfigured table in: {}", rest));
        };
        let Some(rest) = rest.strip_prefix(" SET dt=") else {
            return error_response("syntax error in update".to_string());
        };
        let Some((raw_data, rest)) = take_literal(rest) else {
            return error_response("unterminated literal".to_string());
        };
        let Some(rest) = rest.strip_prefix(" WHERE id=") else {
            return error_response("syntax error in update".to_string());
        };
        let Some((raw_id, rest)) = take_literal(rest) else {
            return error_response("unterminated literal".to_string());
        };
        if rest != " IF EXISTS" {
            return error_response("syntax error after literal".to_string());
        }

        let id = unescape(&raw_id);
        let mut entries = self.entries.lock();
        if let Some(row) = entries.get_mut(&id) {
            row.data = unescape(&raw_data);
        }
        // No error either way; absence is indistinguishable from success.
        QueryResponse::default()
    }

    fn delete(&self, rest: &str) -> QueryResponse {
        let Some(rest) = rest.strip_prefix(self.table.as_str()) else {
            return error_response(format!("unconfigured table in: {}", rest));
        };
        let Some(rest) = rest.strip_prefix(" WHERE id=") else {
            return error_response("syntax error in delete".to_string());
        };
        let Some((raw_id, rest)) = take_literal(rest) else {
            return error_response("unterminated literal".to_string());
        };
        if !rest.is_empty() {
            return error_response("syntax error after literal".to_string());
        }
        self.entries.lock().remove(&unescape(&raw_id));
        QueryResponse::default()
    }
}

#[async_trait]
impl MessageTransport for InMemoryElement {
    async fn send(
        &self,
        _destination: Channel,
        envelope: Envelope,
        registry: &MessageRegistry,
    ) -> Result<(), TransportError> {
        let request = Self::over_the_wire(&envelope, registry)?;
        self.apply(&request);
        Ok(())
    }

    async fn call(
        &self,
        _destination: Channel,
        envelope: Envelope,
        registry: &MessageRegistry,
    ) -> Result<EntryReply, TransportError> {
        assert!(
            envelope.return_address.is_some(),
            "reply-bearing call without a return address"
        );
        let request = Self::over_the_wire(&envelope, registry)?;
        Ok(self.apply(&request))
    }
}

#[async_trait]
impl QueryTransport for InMemoryElement {
    async fn execute(&self, agent_id: u32, query: &str) -> Result<QueryResponse, TransportError> {
        assert_eq!(agent_id, AGENT_ID, "query routed to the wrong agent");
        Ok(self.execute_query(query))
    }
}

/// Take a quoted literal off the front of `s`, returning its raw
/// (still-escaped) content and the remainder after the closing quote.
fn take_literal(s: &str) -> Option<(String, &str)> {
    let mut rest = s.strip_prefix('\'')?;
    let mut raw = String::new();
    loop {
        let end = rest.find('\'')?;
        raw.push_str(&rest[..end]);
        rest = &rest[end + 1..];
        if let Some(after) = rest.strip_prefix('\'') {
            // Doubled quote: part of the literal.
            raw.push_str("''");
            rest = after;
        } else {
            return Some((raw, rest));
        }
    }
}

fn error_response(error: String) -> QueryResponse {
    QueryResponse {
        error,
        values: vec![],
    }
}

pub struct StaticResolver;

impl EndpointResolver for StaticResolver {
    fn protocol_name(&self, _endpoint: Endpoint) -> String {
        PROTOCOL_NAME.to_string()
    }

    fn db_kind(&self, _endpoint: Endpoint) -> DbKind {
        DbKind::Local
    }
}

/// Fresh client plus the element it talks to.
pub fn setup() -> (Arc<InMemoryElement>, LoggerTable) {
    let endpoint = Endpoint::new(AGENT_ID, ELEMENT_ID);
    let table = TableName::derive(DbKind::Local, endpoint);
    let element = InMemoryElement::new(&table);
    let client = LoggerTable::new(
        &StaticResolver,
        element.clone(),
        element.clone(),
        endpoint,
    )
    .unwrap();
    (element, client)
}
