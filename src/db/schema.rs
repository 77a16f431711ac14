//! Database schema and migrations for hotelier.
//!
//! Migrations are applied in order when the database is opened; the
//! schema_version table tracks which ones have run.

/// Database migrations.
pub const MIGRATIONS: &[&str] = &[
    // v1: Credential store
    r#"
CREATE TABLE users (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    username    TEXT NOT NULL COLLATE NOCASE,
    password    TEXT NOT NULL,                    -- Argon2id PHC string
    role        TEXT NOT NULL DEFAULT 'staff',    -- 'staff', 'manager'
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE UNIQUE INDEX idx_users_username_nocase ON users(username COLLATE NOCASE);
"#,
    // v2: Session store
    r#"
CREATE TABLE sessions (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    token       TEXT NOT NULL UNIQUE,
    user_id     INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    username    TEXT NOT NULL,
    role        TEXT NOT NULL,                    -- snapshot taken at login
    created_at  TEXT NOT NULL,
    expires_at  TEXT NOT NULL
);

CREATE INDEX idx_sessions_user_id ON sessions(user_id);
CREATE INDEX idx_sessions_expires_at ON sessions(expires_at);
"#,
    // v3: Hotel records
    r#"
CREATE TABLE staff (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    name            TEXT NOT NULL,
    role            TEXT NOT NULL,               -- 'Manager', 'Housekeeping', 'Receptionist'
    contact         TEXT,
    assigned_tasks  TEXT NOT NULL DEFAULT '[]'   -- JSON array of strings
);

CREATE TABLE rooms (
    id                  INTEGER PRIMARY KEY AUTOINCREMENT,
    room_number         TEXT NOT NULL,
    room_type           TEXT NOT NULL,           -- 'Single', 'Double', 'Suite'
    price_per_night     REAL,
    status              TEXT NOT NULL DEFAULT 'Available',
    assets              TEXT NOT NULL DEFAULT '[]',
    current_client_id   INTEGER REFERENCES clients(id) ON DELETE SET NULL
);

CREATE TABLE clients (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    name            TEXT NOT NULL,
    email           TEXT NOT NULL,
    phone           TEXT NOT NULL,
    address         TEXT,
    check_in_date   TEXT,
    check_out_date  TEXT,
    room_id         INTEGER REFERENCES rooms(id) ON DELETE SET NULL,
    services_used   TEXT NOT NULL DEFAULT '[]',  -- JSON array of service ids
    transfers       TEXT NOT NULL DEFAULT '[]'   -- JSON array of transfer ids
);

CREATE TABLE services (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    name            TEXT NOT NULL,
    description     TEXT,
    price           REAL,
    provided_by     INTEGER REFERENCES staff(id) ON DELETE SET NULL
);

CREATE TABLE transfers (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    client_id       INTEGER REFERENCES clients(id) ON DELETE SET NULL,
    from_location   TEXT,
    to_location     TEXT,
    date            TEXT,
    staff_id        INTEGER REFERENCES staff(id) ON DELETE SET NULL
);

CREATE INDEX idx_clients_room_id ON clients(room_id);
CREATE INDEX idx_services_provided_by ON services(provided_by);
"#,
    // v4: Todo list
    r#"
CREATE TABLE todos (
    id      INTEGER PRIMARY KEY AUTOINCREMENT,
    todo    TEXT NOT NULL,
    date    TEXT NOT NULL
);
"#,
];
