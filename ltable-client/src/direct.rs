/// Direct-query strategy: operations rendered as textual queries
///
/// Bypasses the message transport and talks to the backing store through
/// the query transport. Every caller string embedded in query text passes
/// through the escaping discipline, and retrieved data is unescaped before
/// it is handed back. No timeout is applied beyond what the transport
/// itself provides.

use crate::ops::{EntryOperations, OpFailure, OpResult};
use crate::transport::{QueryResponse, QueryTransport};
use async_trait::async_trait;
use chrono::Utc;
use ltable_core::{escape, format_timestamp, unescape, Endpoint, TableName};
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct DirectQuery {
    transport: Arc<dyn QueryTransport>,
    endpoint: Endpoint,
    table: TableName,
}

impl DirectQuery {
    pub(crate) fn new(
        transport: Arc<dyn QueryTransport>,
        endpoint: Endpoint,
        table: TableName,
    ) -> Self {
        Self {
            transport,
            endpoint,
            table,
        }
    }

    async fn execute(&self, query: &str) -> OpResult<QueryResponse> {
        tracing::debug!(table = self.table.as_str(), query, "executing direct query");
        let response = self
            .transport
            .execute(self.endpoint.agent_id, query)
            .await
            .map_err(|e| OpFailure::Failed(e.to_string()))?;
        if !response.is_success() {
            return Err(OpFailure::Failed(response.error));
        }
        Ok(response)
    }
}

#[async_trait]
impl EntryOperations for DirectQuery {
    async fn entry_exists(&self, id: &str) -> OpResult<bool> {
        let query = format!(
            "SELECT id FROM {} WHERE id='{}' LIMIT 1",
            self.table,
            escape(id)
        );
        let response = self.execute(&query).await?;
        Ok(!response.values.is_empty())
    }

    async fn get_entry(&self, id: &str) -> OpResult<String> {
        let query = format!(
            "SELECT dt FROM {} WHERE id='{}' LIMIT 1",
            self.table,
            escape(id)
        );
        let response = self.execute(&query).await?;
        match response.values.first() {
            Some(raw) => Ok(unescape(raw)),
            None => Err(OpFailure::Failed(format!(
                "entry with id {} does not exist",
                id
            ))),
        }
    }

    async fn add_entry(&self, id: &str, data: &str, allow_overwrite: bool) -> OpResult<()> {
        if !allow_overwrite {
            // Cheap probe only; the IF NOT EXISTS guard below stays the
            // authoritative check.
            if self.entry_exists(id).await? {
                return Err(OpFailure::Failed(format!(
                    "entry with id {} already exists and overwriting is not allowed",
                    id
                )));
            }
        }

        let guard = if allow_overwrite { "" } else { " IF NOT EXISTS" };
        let query = format!(
            "INSERT INTO {} (id, dt, ts) VALUES ('{}', '{}', '{}'){}",
            self.table,
            escape(id),
            escape(data),
            format_timestamp(Utc::now()),
            guard
        );
        self.execute(&query).await?;
        Ok(())
    }

    async fn append_entry(&self, id: &str, data: &str) -> OpResult<()> {
        // Read-modify-write; a concurrent writer between the two steps
        // wins last. Fails, rather than creating the entry, when the id
        // is absent.
        let mut merged = self.get_entry(id).await?;
        merged.push_str(data);
        self.add_entry(id, &merged, true).await
    }

    async fn update_entry(&self, id: &str, data: &str) -> OpResult<()> {
        // IF EXISTS makes absence a no-op. The transport reports no error
        // either way, so success here does not prove the entry existed.
        let query = format!(
            "UPDATE {} SET dt='{}' WHERE id='{}' IF EXISTS",
            self.table,
            escape(data),
            escape(id)
        );
        self.execute(&query).await?;
        Ok(())
    }

    async fn remove_entry(&self, id: &str) -> OpResult<()> {
        let query = format!("DELETE FROM {} WHERE id='{}'", self.table, escape(id));
        self.execute(&query).await?;
        Ok(())
    }
}
