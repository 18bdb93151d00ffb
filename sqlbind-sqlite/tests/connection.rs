#[cfg(test)]
mod tests {
    use indoc::indoc;
    use libsqlite3_sys::{SQLITE_CONSTRAINT, SQLITE_CONSTRAINT_PRIMARYKEY, SQLITE_RANGE};
    use sqlbind_core::{Connection, Failure, Outcome, Prepared, StorageClass};
    use sqlbind_sqlite::{OpenFlags, SqliteConnection, error_string, result_code};
    use sqlbind_tests::{init_logs, silent_logs};
    use std::{fs, path::Path, sync::Mutex};

    static MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn create_database() {
        init_logs();
        const DB_PATH: &'static str = "../target/debug/creation.sqlite";
        let _guard = MUTEX.lock().unwrap();
        if Path::new(DB_PATH).exists() {
            fs::remove_file(DB_PATH)
                .expect(format!("Failed to remove test database file {}", DB_PATH).as_str());
        }
        assert!(
            !Path::new(DB_PATH).exists(),
            "Database file should not exist before test"
        );
        SqliteConnection::connect(&format!("sqlite://{}?mode=rwc", DB_PATH))
            .expect("Could not open the database");
        assert!(
            Path::new(DB_PATH).exists(),
            "Database file should be created after connection"
        );
        SqliteConnection::connect(&format!("sqlite://{}?mode=ro", DB_PATH))
            .expect("Could not open the database");
        fs::remove_file(DB_PATH)
            .expect(format!("Failed to remove existing test database file {}", DB_PATH).as_str());
        silent_logs! {
            assert!(
                SqliteConnection::connect(&format!("sqlite://{}?mode=ro", DB_PATH)).is_err(),
                "Should not be able to open in read only unexisting database"
            );
        }
    }

    #[test]
    fn read_only_flags() {
        init_logs();
        const DB_PATH: &'static str = "../target/debug/read_only.sqlite";
        let _guard = MUTEX.lock().unwrap();
        if Path::new(DB_PATH).exists() {
            fs::remove_file(DB_PATH)
                .expect(format!("Failed to remove test database file {}", DB_PATH).as_str());
        }
        {
            let connection = SqliteConnection::open(DB_PATH, OpenFlags::default())
                .expect("Could not create the database");
            connection
                .execute("CREATE TABLE numbers (value INTEGER); INSERT INTO numbers VALUES (1);")
                .expect("Could not create the table");
        }
        let connection = SqliteConnection::open(DB_PATH, OpenFlags::READ_ONLY)
            .expect("Could not open the database in read only mode");
        let mut statement = connection
            .prepare("SELECT value FROM numbers")
            .expect("Could not prepare the select");
        assert!(statement.next_row().expect("Could not step"));
        silent_logs! {
            assert!(connection.execute("INSERT INTO numbers VALUES (2)").is_err());
        }
        assert!(!OpenFlags::READ_ONLY.contains(OpenFlags::READ_WRITE));
        assert!(OpenFlags::default().contains(OpenFlags::CREATE));
        assert!((OpenFlags::default() | OpenFlags::URI).contains(OpenFlags::URI));
    }

    #[test]
    fn wrong_url() {
        silent_logs! {
            assert!(SqliteConnection::connect("duckdb://some_value").is_err());
            assert!(SqliteConnection::open("file:missing/dir/db.sqlite", OpenFlags::READ_ONLY | OpenFlags::URI).is_err());
        };
    }

    #[test]
    fn close() {
        init_logs();
        let mut connection = SqliteConnection::open_memory().expect("Could not open the database");
        assert!(connection.is_open());
        connection.close().expect("Could not close the connection");
        assert!(!connection.is_open());
        connection.close().expect("Closing twice should succeed");
        silent_logs! {
            assert!(connection.prepare("SELECT 1").is_err());
            assert!(connection.execute("SELECT 1").is_err());
        }
    }

    #[test]
    fn drop_closes() {
        init_logs();
        const DB_PATH: &'static str = "../target/debug/drop_closes.sqlite";
        let _guard = MUTEX.lock().unwrap();
        if Path::new(DB_PATH).exists() {
            fs::remove_file(DB_PATH)
                .expect(format!("Failed to remove test database file {}", DB_PATH).as_str());
        }
        {
            let connection = SqliteConnection::open(DB_PATH, OpenFlags::default())
                .expect("Could not create the database");
            connection
                .execute("CREATE TABLE kept (value INTEGER)")
                .expect("Could not create the table");
            let mut insert = connection
                .prepare_with("INSERT INTO kept VALUES (?)", (7,))
                .expect("Could not prepare the insert");
            assert_eq!(insert.execute().expect("Could not insert"), Outcome::Done);
        }
        let connection = SqliteConnection::open(DB_PATH, OpenFlags::READ_ONLY)
            .expect("Could not reopen the database");
        let mut select = connection
            .prepare("SELECT value FROM kept")
            .expect("Could not prepare the select");
        assert!(select.next_row().expect("Could not step"));
        let mut value = 0;
        select.read_row((&mut value,)).expect("Could not read");
        assert_eq!(value, 7);
        drop(select);
        drop(connection);
        fs::remove_file(DB_PATH).expect("The dropped connection should release the file");
    }

    #[test]
    fn prepare() {
        init_logs();
        let connection = SqliteConnection::open_memory().expect("Could not open the database");
        silent_logs! {
            let error = connection.prepare("SELEC 1").err();
            assert!(matches!(
                error.as_ref().and_then(Failure::of),
                Some(Failure::Engine(..))
            ));
        }

        // Only the first statement is compiled
        let mut statement = connection
            .prepare("SELECT 1; SELECT 2")
            .expect("Could not prepare");
        assert_eq!(statement.sql(), "SELECT 1;");
        assert!(statement.next_row().expect("Could not step"));
        let mut value = 0;
        statement.read_row((&mut value,)).expect("Could not read");
        assert_eq!(value, 1);

        // No statement at all gives an inert statement
        let mut empty = connection.prepare("  ").expect("Could not prepare");
        assert!(!empty.is_valid());
        assert_eq!(empty.sql(), "");
        empty.finalize().expect("Could not finalize the empty statement");
    }

    #[test]
    fn engine_codes() {
        init_logs();
        let mut connection = SqliteConnection::open_memory().expect("Could not open the database");
        connection
            .execute(indoc! {"
                CREATE TABLE items (id INTEGER PRIMARY KEY, name TEXT);
                INSERT INTO items VALUES (1, 'one');
            "})
            .expect("Could not create the table");

        let mut statement = connection
            .prepare("SELECT ?")
            .expect("Could not prepare");
        silent_logs! {
            let error = statement.bind_at(2, 1).err().expect("Binding out of range should fail");
            assert_eq!(Failure::of(&error), Some(Failure::Engine(SQLITE_RANGE)));
            assert_eq!(result_code(&error), SQLITE_RANGE);
        }
        drop(statement);

        let mut insert = connection
            .prepare("INSERT INTO items VALUES (1, 'again')")
            .expect("Could not prepare");
        silent_logs! {
            let error = insert.execute().err().expect("Duplicate key should fail");
            assert_eq!(result_code(&error), SQLITE_CONSTRAINT);
        }
        drop(insert);

        assert!(!connection.is_using_extended_result_codes());
        connection
            .toggle_extended_result_codes()
            .expect("Could not enable the extended result codes");
        assert!(connection.is_using_extended_result_codes());
        let mut insert = connection
            .prepare("INSERT INTO items VALUES (1, 'again')")
            .expect("Could not prepare");
        silent_logs! {
            let error = insert.execute().err().expect("Duplicate key should fail");
            assert_eq!(result_code(&error), SQLITE_CONSTRAINT_PRIMARYKEY);
        }
        drop(insert);
        connection
            .toggle_extended_result_codes()
            .expect("Could not disable the extended result codes");
        assert!(!connection.is_using_extended_result_codes());

        assert!(!error_string(SQLITE_RANGE).is_empty());
        let mismatch = Failure::TypeMismatch {
            expected: StorageClass::Integer,
            found: StorageClass::Text,
        };
        assert_eq!(
            result_code(&mismatch.into()),
            libsqlite3_sys::SQLITE_MISMATCH
        );
        assert_eq!(
            result_code(&Failure::OutOfRange { value: i64::MAX }.into()),
            SQLITE_RANGE
        );
        assert_eq!(
            result_code(&sqlbind_core::Error::msg("other")),
            libsqlite3_sys::SQLITE_ERROR
        );
    }

    #[test]
    fn direct_helpers() {
        init_logs();
        let connection = SqliteConnection::open_memory().expect("Could not open the database");
        let mut statement = connection
            .prepare("SELECT ?, ?, ?, ?")
            .expect("Could not prepare");
        assert_eq!(statement.parameter_count().expect("Could not count"), 4);
        statement
            .bind_text(1, "text")
            .expect("Could not bind the text")
            .bind_blob(2, &[1, 2, 3])
            .expect("Could not bind the blob")
            .bind_null(3)
            .expect("Could not bind null")
            .bind_at(4, 2.5)
            .expect("Could not bind the double");
        assert_eq!(statement.bind_cursor(), 0);
        assert_eq!(statement.execute().expect("Could not step"), Outcome::Row);
        assert_eq!(
            statement.column_type(0).expect("Could not get the type"),
            StorageClass::Text
        );
        assert_eq!(
            statement.column_type(1).expect("Could not get the type"),
            StorageClass::Blob
        );
        assert_eq!(
            statement.column_type(2).expect("Could not get the type"),
            StorageClass::Null
        );
        assert_eq!(
            statement.column_type(3).expect("Could not get the type"),
            StorageClass::Float
        );
        silent_logs! {
            assert!(statement.column_type(4).is_err());
        }

        let mut text = String::new();
        let mut blob = Vec::new();
        let mut fixed = [0u8; 3];
        statement.read_text(0, &mut text).expect("Could not read the text");
        statement.read_blob(1, &mut blob).expect("Could not read the blob");
        statement
            .read_blob_into(1, &mut fixed)
            .expect("Could not read the fixed blob");
        assert_eq!(text, "text");
        assert_eq!(blob, [1, 2, 3]);
        assert_eq!(fixed, [1, 2, 3]);
        silent_logs! {
            let error = statement.read_blob_into(1, &mut [0u8; 2]).err().expect("Wrong length should fail");
            assert!(Failure::of(&error).is_some_and(|f| f.is_size_mismatch()));
        }
    }

    #[test]
    fn invalid_text() {
        init_logs();
        let connection = SqliteConnection::open_memory().expect("Could not open the database");
        let mut statement = connection
            .prepare("SELECT CAST(x'61ff62' AS TEXT)")
            .expect("Could not prepare");
        statement.execute().expect("Could not step");
        let mut text = String::new();
        statement.read_text(0, &mut text).expect("Could not read the text");
        assert_eq!(text, "a\u{FFFD}b");
    }
}
