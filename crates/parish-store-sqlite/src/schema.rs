//! SQL schema for the parish SQLite store.
//!
//! Run as an idempotent batch at connection startup. `PRAGMA user_version`
//! records the schema revision so future migrations can be gated on it.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS people (
    person_id       TEXT PRIMARY KEY,
    created_at      TEXT NOT NULL,
    first_name      TEXT NOT NULL,
    last_name       TEXT NOT NULL,
    email           TEXT NOT NULL,
    mobile_number   TEXT NOT NULL,
    date_of_birth   TEXT,            -- ISO 8601 date or NULL
    gender          TEXT,            -- 'male' | 'female'
    marriage_date   TEXT,
    marital_status  TEXT,            -- 'single' | 'married' | 'divorced' | 'remarried'
    registered_date TEXT
);

CREATE TABLE IF NOT EXISTS social_media_links (
    link_id   TEXT PRIMARY KEY,
    person_id TEXT NOT NULL REFERENCES people(person_id),
    kind      TEXT NOT NULL,
    url       TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS addresses (
    address_id    TEXT PRIMARY KEY,
    kind          TEXT NOT NULL,     -- 'home' | 'business' | 'student_accommodation'
    street_number TEXT NOT NULL,
    street        TEXT NOT NULL,
    suburb        TEXT NOT NULL,
    city          TEXT NOT NULL,
    province      TEXT NOT NULL,
    country       TEXT NOT NULL,
    postal_code   TEXT,
    latitude      REAL,
    longitude     REAL
);

CREATE TABLE IF NOT EXISTS people_addresses (
    person_id  TEXT NOT NULL REFERENCES people(person_id),
    address_id TEXT NOT NULL REFERENCES addresses(address_id),
    PRIMARY KEY (person_id, address_id)
);

CREATE TABLE IF NOT EXISTS households (
    household_id TEXT PRIMARY KEY,
    created_at   TEXT NOT NULL,
    leader_id    TEXT NOT NULL REFERENCES people(person_id),
    address_id   TEXT NOT NULL REFERENCES addresses(address_id)
);

CREATE TABLE IF NOT EXISTS household_people (
    household_id TEXT NOT NULL REFERENCES households(household_id),
    person_id    TEXT NOT NULL REFERENCES people(person_id),
    PRIMARY KEY (household_id, person_id)
);

CREATE TABLE IF NOT EXISTS media_items (
    media_id     TEXT PRIMARY KEY,
    created_at   TEXT NOT NULL,
    content_type TEXT NOT NULL,
    description  TEXT,
    backend      TEXT NOT NULL,      -- 'local' | 's3'
    location     TEXT NOT NULL
);

-- Image histories are append-only; the newest row (highest rowid) is the
-- current image. No uniqueness on the pair: re-attaching an older image
-- appends a fresh row, making it current again.
CREATE TABLE IF NOT EXISTS people_images (
    person_id TEXT NOT NULL REFERENCES people(person_id),
    media_id  TEXT NOT NULL REFERENCES media_items(media_id)
);

CREATE TABLE IF NOT EXISTS household_images (
    household_id TEXT NOT NULL REFERENCES households(household_id),
    media_id     TEXT NOT NULL REFERENCES media_items(media_id)
);

CREATE TABLE IF NOT EXISTS users (
    user_id       TEXT PRIMARY KEY,
    created_at    TEXT NOT NULL,
    first_name    TEXT NOT NULL,
    last_name     TEXT NOT NULL,
    email         TEXT NOT NULL UNIQUE,
    mobile_number TEXT NOT NULL,
    password_hash TEXT NOT NULL,
    person_id     TEXT REFERENCES people(person_id)
);

CREATE INDEX IF NOT EXISTS links_person_idx        ON social_media_links(person_id);
CREATE INDEX IF NOT EXISTS people_addresses_idx    ON people_addresses(person_id);
CREATE INDEX IF NOT EXISTS household_people_hh_idx ON household_people(household_id);
CREATE INDEX IF NOT EXISTS household_people_p_idx  ON household_people(person_id);
CREATE INDEX IF NOT EXISTS people_images_idx       ON people_images(person_id);
CREATE INDEX IF NOT EXISTS household_images_idx    ON household_images(household_id);
CREATE INDEX IF NOT EXISTS users_email_idx         ON users(email);

PRAGMA user_version = 1;
";
