use formlist_core::db::migrations::latest_version;
use formlist_core::db::{open_db, open_db_in_memory, DbError};
use formlist_core::{KeyValueStore, ListStore, SqliteStore, StoreError};
use rusqlite::Connection;

#[test]
fn in_memory_store_has_kv_table_at_latest_version() {
    let conn = open_db_in_memory().unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "kv_entries");
}

#[test]
fn set_get_and_remove_round_trip() {
    let store = SqliteStore::open_in_memory().unwrap();
    assert_eq!(store.get("k").unwrap(), None);

    store.set("k", "one").unwrap();
    store.set("k", "two").unwrap();
    assert_eq!(store.get("k").unwrap().as_deref(), Some("two"));

    store.remove("k").unwrap();
    store.remove("k").unwrap();
    assert_eq!(store.get("k").unwrap(), None);
}

#[test]
fn reopening_file_keeps_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("formlist.sqlite3");

    SqliteStore::open(&path).unwrap().set("todo_list_v1", "[]").unwrap();
    let reopened = SqliteStore::open(&path).unwrap();
    assert_eq!(schema_version(reopened.connection()), latest_version());
    assert_eq!(reopened.get("todo_list_v1").unwrap().as_deref(), Some("[]"));
}

#[test]
fn newer_table_version_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 42;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 42);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(matches!(
        SqliteStore::open(&path),
        Err(StoreError::Db(DbError::UnsupportedSchemaVersion { .. }))
    ));
}

#[test]
fn list_store_degrades_when_table_is_gone() {
    let store = SqliteStore::open_in_memory().unwrap();
    let list: ListStore<&SqliteStore, String> = ListStore::new(&store, "items");
    assert!(list.save(&["a".to_string()]));

    store
        .connection()
        .execute_batch("DROP TABLE kv_entries;")
        .unwrap();
    assert!(list.load().is_empty());
    assert!(!list.save(&["b".to_string()]));
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1);",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
