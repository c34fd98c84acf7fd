//! SQL schema for the Lexis SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE ... IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Rows are never updated; only inserted and deleted.
CREATE TABLE IF NOT EXISTS strings (
    id          TEXT PRIMARY KEY,        -- sha256 of value, lowercase hex
    value       TEXT NOT NULL UNIQUE,
    properties  TEXT NOT NULL,           -- JSON-encoded PropertyBundle
    created_at  TEXT NOT NULL            -- RFC 3339 UTC, microseconds, 'Z'
);

CREATE INDEX IF NOT EXISTS strings_created_idx ON strings(created_at);

PRAGMA user_version = 1;
";
