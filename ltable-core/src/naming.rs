/// Endpoint identity and table-name derivation
///
/// The logger table backing an element lives in a store-side table whose
/// name is a pure function of the backing database kind and the element's
/// address. Clients derive the name once at construction and never
/// recompute it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Address of a logger table element: the hosting agent plus the element
/// id on that agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    pub agent_id: u32,
    pub element_id: u32,
}

impl Endpoint {
    pub fn new(agent_id: u32, element_id: u32) -> Self {
        Self {
            agent_id,
            element_id,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.agent_id, self.element_id)
    }
}

/// Kind of database backing the store.
///
/// Determines whether the element-data table lives in a shared keyspace
/// (clustered deployments) or directly in the node-local database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DbKind {
    /// Node-local database; tables are addressed without a keyspace prefix.
    Local,
    /// Clustered database; tables live in the shared `elementdata` keyspace.
    Clustered,
}

/// Derived name of the element-data table backing a logger table element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableName(String);

impl TableName {
    /// Derive the table name for an endpoint.
    ///
    /// The form is `elementdata_<agent>_<element>_1000`, qualified with the
    /// shared keyspace when the backing database is clustered.
    pub fn derive(kind: DbKind, endpoint: Endpoint) -> Self {
        let prefix = match kind {
            DbKind::Local => "",
            DbKind::Clustered => "elementdata.",
        };
        TableName(format!(
            "{}elementdata_{}_{}_1000",
            prefix, endpoint.agent_id, endpoint.element_id
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
