//! Database schema and migrations for Corkboard.
//!
//! Migrations are applied in order when the database is opened. The
//! `schema_version` table records how many have run.

/// Database migrations.
///
/// Each entry is a SQL script executed inside its own transaction.
pub const MIGRATIONS: &[&str] = &[
    // v1: users
    r#"
CREATE TABLE users (
    id            TEXT PRIMARY KEY,
    display_name  TEXT NOT NULL,
    email         TEXT UNIQUE,
    created_at    TEXT NOT NULL DEFAULT (datetime('now'))
);
"#,
    // v2: boards
    r#"
-- creator_id is not a foreign key: creators may live outside this database
CREATE TABLE boards (
    id          TEXT PRIMARY KEY,
    title       TEXT NOT NULL,
    is_closed   INTEGER NOT NULL DEFAULT 0,
    is_public   INTEGER NOT NULL DEFAULT 0,
    creator_id  TEXT NOT NULL,
    created_at  TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_boards_creator_id ON boards(creator_id);
CREATE INDEX idx_boards_visibility ON boards(is_closed, is_public);
"#,
    // v3: board membership relations
    r#"
CREATE TABLE board_members (
    id          TEXT PRIMARY KEY,
    board_id    TEXT NOT NULL REFERENCES boards(id) ON DELETE CASCADE,
    user_id     TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    status      TEXT NOT NULL DEFAULT 'invited',  -- 'available', 'invited', 'removed'
    created_at  TEXT NOT NULL DEFAULT (datetime('now')),
    UNIQUE(board_id, user_id)
);

CREATE INDEX idx_board_members_user_id ON board_members(user_id);
"#,
    // v4: lists and cards
    r#"
CREATE TABLE lists (
    id           TEXT PRIMARY KEY,
    board_id     TEXT NOT NULL REFERENCES boards(id) ON DELETE CASCADE,
    title        TEXT NOT NULL,
    position     INTEGER NOT NULL DEFAULT 0,
    is_archived  INTEGER NOT NULL DEFAULT 0,
    created_at   TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_lists_board_id ON lists(board_id, position);

CREATE TABLE cards (
    id           TEXT PRIMARY KEY,
    list_id      TEXT NOT NULL REFERENCES lists(id) ON DELETE CASCADE,
    title        TEXT NOT NULL,
    description  TEXT,
    position     INTEGER NOT NULL DEFAULT 0,
    created_at   TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_cards_list_id ON cards(list_id, position);
"#,
];
