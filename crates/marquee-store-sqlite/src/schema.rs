//! SQL schema for the Marquee SQLite store.
//!
//! Executed once at connection startup. Each table models one collection
//! type of a key-value store, keyed by the logical collection name.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS scalars (
    key    TEXT PRIMARY KEY,
    value  TEXT NOT NULL
);

-- One row per (set, member); the primary key gives set semantics.
CREATE TABLE IF NOT EXISTS set_members (
    key     TEXT NOT NULL,
    member  TEXT NOT NULL,
    PRIMARY KEY (key, member)
);

-- One row per (hash, field); writes overwrite the value in place.
CREATE TABLE IF NOT EXISTS hash_fields (
    key    TEXT NOT NULL,
    field  TEXT NOT NULL,
    value  TEXT NOT NULL,
    PRIMARY KEY (key, field)
);

PRAGMA user_version = 1;
";
