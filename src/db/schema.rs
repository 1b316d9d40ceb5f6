//! Database schema migrations for feedhub.
//!
//! Each entry is applied once, in order, inside a transaction; applied
//! versions are recorded in the `schema_version` table.

/// Ordered list of schema migrations.
pub const MIGRATIONS: &[&str] = &[
    // v1: users with immutable API keys
    r#"
    CREATE TABLE users (
        id          TEXT PRIMARY KEY,
        name        TEXT NOT NULL,
        api_key     TEXT NOT NULL UNIQUE,
        created_at  TEXT NOT NULL,
        updated_at  TEXT NOT NULL
    );
    CREATE INDEX idx_users_api_key ON users(api_key);
    "#,
    // v2: feeds and follow relationships
    r#"
    CREATE TABLE feeds (
        id               TEXT PRIMARY KEY,
        name             TEXT NOT NULL,
        url              TEXT NOT NULL UNIQUE,
        user_id          TEXT NOT NULL REFERENCES users(id),
        last_fetched_at  TEXT,
        created_at       TEXT NOT NULL,
        updated_at       TEXT NOT NULL
    );
    CREATE INDEX idx_feeds_last_fetched_at ON feeds(last_fetched_at);

    CREATE TABLE feed_follows (
        id          TEXT PRIMARY KEY,
        user_id     TEXT NOT NULL REFERENCES users(id),
        feed_id     TEXT NOT NULL REFERENCES feeds(id),
        created_at  TEXT NOT NULL,
        updated_at  TEXT NOT NULL
    );
    CREATE INDEX idx_feed_follows_user_id ON feed_follows(user_id);
    CREATE INDEX idx_feed_follows_feed_id ON feed_follows(feed_id);
    "#,
    // v3: ingested posts, deduplicated per feed by item identity
    r#"
    CREATE TABLE posts (
        id            TEXT PRIMARY KEY,
        feed_id       TEXT NOT NULL REFERENCES feeds(id),
        guid          TEXT NOT NULL,
        title         TEXT,
        url           TEXT,
        description   TEXT,
        published_at  TEXT,
        fetched_at    TEXT NOT NULL,
        UNIQUE(feed_id, guid)
    );
    CREATE INDEX idx_posts_feed_id ON posts(feed_id);
    CREATE INDEX idx_posts_published_at ON posts(published_at);
    "#,
];
