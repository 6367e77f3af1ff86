/// Literal escaping for strings embedded in textual queries
///
/// The direct-query path splices caller strings into query text as quoted
/// literals. Doubling every single-quote keeps arbitrary input from
/// terminating the literal early; collapsing the doubling on the way back
/// restores the original string exactly.

/// Escape a string for embedding as a quoted query literal.
pub fn escape(data: &str) -> String {
    data.replace('\'', "''")
}

/// Reverse [`escape`]: collapse doubled quotes back to single quotes.
pub fn unescape(data: &str) -> String {
    data.replace("''", "'")
}
