pub mod escape;
pub mod hex;
pub mod messages;
pub mod naming;
pub mod timestamp;

pub use escape::{escape, unescape};
pub use hex::{from_hex_string, to_hex_string};
pub use messages::*;
pub use naming::{DbKind, Endpoint, TableName};
pub use timestamp::{format_timestamp, TIMESTAMP_FORMAT_V1};

/// Name of the Logger Table protocol an endpoint must run.
pub const PROTOCOL_NAME: &str = "Generic Logger Table";

/// Parameter channel on which the remote element receives requests.
pub const RECEIVE_PARAMETER_ID: u32 = 9_000_000;

/// Parameter channel on which the remote element publishes replies.
pub const RETURN_PARAMETER_ID: u32 = 9_000_001;
