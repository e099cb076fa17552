//! SQL text helpers

/// Quote an identifier for DuckDB (`"name"`, embedded quotes doubled)
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Quote a string literal for DuckDB (`'value'`, embedded quotes doubled)
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
