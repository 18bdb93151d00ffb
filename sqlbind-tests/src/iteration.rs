use indoc::formatdoc;
use sqlbind_core::{Connection, Failure, Outcome, Prepared, Status};

fn setup<C: Connection>(connection: &C, table: &str) {
    connection
        .execute(&formatdoc! {"
            DROP TABLE IF EXISTS {table};
            CREATE TABLE {table} (value INTEGER, label TEXT);
        "})
        .expect("Failed to create the iteration table");
    let mut insert = connection
        .prepare(&format!("INSERT INTO {} (value, label) VALUES (?, ?)", table))
        .expect("Failed to prepare the insert");
    for (value, label) in [(1, "one"), (2, "two"), (3, "three")] {
        insert
            .clear_bindings()
            .expect("Failed to clear the insert bindings");
        insert.bind((value, label)).expect("Failed to bind the row");
        assert_eq!(insert.execute().expect("Failed to insert"), Outcome::Done);
        insert.reset().expect("Failed to reset the insert");
    }
}

pub fn next_row_iteration<C: Connection>(connection: &C) {
    setup(connection, "iteration_next_row");
    let mut statement = connection
        .prepare("SELECT value, label FROM iteration_next_row ORDER BY value")
        .expect("Failed to prepare the select");
    let mut rows = Vec::new();
    while statement.next_row().expect("Failed to step") {
        let (mut value, mut label) = (0, String::new());
        statement
            .read_row((&mut value, &mut label))
            .expect("Failed to read the row");
        rows.push((value, label));
    }
    assert_eq!(
        rows,
        [(1, "one".to_string()), (2, "two".into()), (3, "three".into())]
    );

    // A row staged by execute is not skipped
    statement.reset().expect("Failed to reset the select");
    assert_eq!(statement.execute().expect("Failed to execute"), Outcome::Row);
    let mut values = Vec::new();
    while statement.next_row().expect("Failed to step") {
        let mut value = 0;
        statement.read_row((&mut value,)).expect("Failed to read");
        values.push(value);
    }
    assert_eq!(values, [1, 2, 3]);
}

pub fn read_iteration<C: Connection>(connection: &C) {
    setup(connection, "iteration_read");
    let mut statement = connection
        .prepare("SELECT value, label FROM iteration_read ORDER BY value DESC")
        .expect("Failed to prepare the select");
    assert_eq!(statement.execute().expect("Failed to execute"), Outcome::Row);
    let mut rows = Vec::new();
    let mut last = Outcome::Row;
    while statement.has_row() {
        let (mut value, mut label) = (0, String::new());
        last = statement
            .read((&mut value, &mut label))
            .expect("Failed to read and step");
        rows.push((value, label));
    }
    assert_eq!(last, Outcome::Done);
    assert_eq!(
        rows,
        [(3, "three".to_string()), (2, "two".into()), (1, "one".into())]
    );

    // Empty result set
    let mut statement = connection
        .prepare("SELECT value FROM iteration_read WHERE value > 10")
        .expect("Failed to prepare the empty select");
    assert_eq!(statement.execute().expect("Failed to execute"), Outcome::Done);
    assert!(!statement.has_row());

    // A failed read does not step, the row can be read again
    let mut statement = connection
        .prepare("SELECT 'a' UNION ALL SELECT 'b'")
        .expect("Failed to prepare the union");
    assert_eq!(statement.execute().expect("Failed to execute"), Outcome::Row);
    let mut number = 0;
    let error = crate::silent_logs! { statement.read((&mut number,)).err() };
    let error = error.expect("Reading text into an integer should fail");
    assert!(Failure::of(&error).is_some_and(|f| f.is_type_mismatch()));
    assert_eq!(statement.status(), Status::Row);
    assert_eq!(number, 0);
    let mut labels = Vec::new();
    let mut last = Outcome::Row;
    while statement.has_row() {
        let mut label = String::new();
        last = statement
            .read((&mut label,))
            .expect("Failed to read and step");
        labels.push(label);
    }
    assert_eq!(last, Outcome::Done);
    assert_eq!(labels, ["a", "b"]);
}
