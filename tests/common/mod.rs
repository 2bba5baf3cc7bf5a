#![cfg(feature = "rusqlite")]
#![allow(dead_code)]

use gridquery::prelude::*;
use gridquery::sqlite::{JsonRow, RusqliteBackend};

pub fn schema() -> Schema {
    Schema::new()
        .with(
            EntityDescriptor::new("department", "departments")
                .integer("id")
                .text("name"),
        )
        .with(
            EntityDescriptor::new("user", "users")
                .integer("id")
                .text("name")
                .integer("age")
                .temporal("joined")
                .unsupported("avatar")
                .belongs_to("department", "department", "department_id"),
        )
        .with(
            EntityDescriptor::new("post", "posts")
                .integer("id")
                .text("title")
                .field(FieldDescriptor::new("published", ValueKind::Temporal).with_column("published_at"))
                .belongs_to("author", "user", "author_id")
                .belongs_to("editor", "user", "editor_id"),
        )
}

pub fn setup_db() -> RusqliteBackend {
    let backend = RusqliteBackend::open_in_memory().expect("Failed to create in-memory database");
    backend
        .conn()
        .execute_batch(
            "CREATE TABLE departments (id INTEGER PRIMARY KEY, name TEXT NOT NULL);
             CREATE TABLE users (
                 id INTEGER PRIMARY KEY,
                 name TEXT NOT NULL,
                 age INTEGER NOT NULL,
                 joined TEXT NOT NULL,
                 avatar BLOB,
                 department_id INTEGER REFERENCES departments(id)
             );
             CREATE TABLE posts (
                 id INTEGER PRIMARY KEY,
                 title TEXT NOT NULL,
                 published_at TEXT NOT NULL,
                 author_id INTEGER REFERENCES users(id),
                 editor_id INTEGER REFERENCES users(id)
             );

             INSERT INTO departments (id, name) VALUES (1, 'Research'), (2, 'Sales');
             INSERT INTO users (id, name, age, joined, department_id) VALUES
                 (1, 'Ann Smith', 30, '2023-01-15', 1),
                 (2, 'Bob Jones', 18, '2024-03-05', 2),
                 (3, 'Cara SMITHSON', 25, '2024-03-05 09:30:00', 1);
             INSERT INTO posts (id, title, published_at, author_id, editor_id) VALUES
                 (1, 'Rust tips', '2024-01-01 08:00:00', 1, 2),
                 (2, 'Grid basics', '2024-02-10 12:00:00', 2, 1),
                 (3, '100% coverage', '2024-02-11 12:00:00', 3, 3);",
        )
        .expect("Failed to seed database");
    backend
}

/// Values of one column across the returned rows.
pub fn pluck<'r>(rows: &'r [JsonRow], column: &str) -> Vec<&'r serde_json::Value> {
    rows.iter().map(|row| &row[column]).collect()
}

pub fn names(rows: &[JsonRow]) -> Vec<String> {
    rows.iter()
        .map(|row| row["name"].as_str().unwrap_or_default().to_string())
        .collect()
}
