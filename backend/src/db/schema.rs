/// Idempotent schema, applied at startup.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS package_sets (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    slug        TEXT NOT NULL UNIQUE,
    metadata    TEXT NOT NULL DEFAULT '{}',
    created_by  TEXT NOT NULL,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS integrations (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    package_set_id    INTEGER NOT NULL REFERENCES package_sets(id) ON DELETE CASCADE,
    integration_type  TEXT NOT NULL,
    metadata          TEXT NOT NULL DEFAULT '{}',
    created_by        TEXT NOT NULL,
    created_at        TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS packages (
    id                 INTEGER PRIMARY KEY AUTOINCREMENT,
    package_set_id     INTEGER NOT NULL REFERENCES package_sets(id) ON DELETE CASCADE,
    slug               TEXT NOT NULL,
    metadata           TEXT NOT NULL DEFAULT '{}',
    cached             TEXT NOT NULL DEFAULT '[]',
    state              TEXT NOT NULL DEFAULT 'stale',
    last_fetched_date  TEXT,
    tags               TEXT NOT NULL DEFAULT '[]',
    created_by         TEXT NOT NULL,
    created_at         TEXT NOT NULL,
    updated_at         TEXT NOT NULL,
    latest_version_id  INTEGER REFERENCES package_versions(id) ON DELETE SET NULL,
    UNIQUE (slug, package_set_id)
);

CREATE TABLE IF NOT EXISTS package_versions (
    id                   INTEGER PRIMARY KEY AUTOINCREMENT,
    package_id           INTEGER NOT NULL REFERENCES packages(id) ON DELETE CASCADE,
    id_num               INTEGER NOT NULL,
    title                TEXT NOT NULL,
    version_description  TEXT NOT NULL,
    created_by           TEXT NOT NULL,
    created_at           TEXT NOT NULL,
    updated_at           TEXT NOT NULL,
    UNIQUE (package_id, id_num)
);

CREATE TABLE IF NOT EXISTS package_items (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    version_id  INTEGER NOT NULL REFERENCES package_versions(id) ON DELETE CASCADE,
    position    INTEGER NOT NULL,
    data_type   TEXT NOT NULL,
    data        TEXT NOT NULL,
    file_name   TEXT NOT NULL,
    mime_type   TEXT,
    tags        TEXT NOT NULL DEFAULT '[]'
);

CREATE TABLE IF NOT EXISTS comments (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    package_id  INTEGER NOT NULL REFERENCES packages(id) ON DELETE CASCADE,
    body        TEXT NOT NULL,
    created_by  TEXT NOT NULL,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_packages_set ON packages(package_set_id);
CREATE INDEX IF NOT EXISTS idx_items_version ON package_items(version_id, position);
CREATE INDEX IF NOT EXISTS idx_comments_package ON comments(package_id);
"#;
