use indoc::indoc;
use sqlbind_core::{Connection, Failure, Outcome, Prepared, Status};

pub fn insert_select<C: Connection>(connection: &C) {
    connection
        .execute(indoc! {"
            DROP TABLE IF EXISTS scenario_items;
            CREATE TABLE scenario_items (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                payload BLOB
            );
        "})
        .expect("Failed to create the scenario table");

    let mut insert = connection
        .prepare("INSERT INTO scenario_items (id, name) VALUES (?, ?)")
        .expect("Failed to prepare the insert");
    insert.bind((5, "x")).expect("Failed to bind the insert");
    assert_eq!(insert.execute().expect("Failed to insert"), Outcome::Done);
    assert_eq!(insert.status(), Status::Done);

    let mut select = connection
        .prepare("SELECT id, name FROM scenario_items")
        .expect("Failed to prepare the select");
    assert_eq!(select.execute().expect("Failed to select"), Outcome::Row);
    let mut id = 0;
    let mut name = String::new();
    select
        .read_row((&mut id, &mut name))
        .expect("Failed to read the inserted row");
    assert_eq!(id, 5);
    assert_eq!(name, "x");
    assert_eq!(select.execute().expect("Failed to step"), Outcome::Done);

    // A constraint violation is reported by the step and recorded in the status
    insert.reset().expect("Failed to reset the insert");
    let error = crate::silent_logs! { insert.execute().err() };
    let error = error.expect("Inserting a duplicate key should fail");
    let Some(Failure::Engine(code)) = Failure::of(&error) else {
        panic!("Expected an engine failure, found {:#}", error);
    };
    assert_eq!(insert.status(), Status::Error(code));
    assert!(!insert.has_row());

    // Finalizing does not report the step failure again
    insert
        .finalize()
        .expect("Failed to finalize the failed insert");
    assert!(!insert.is_valid());
    insert
        .finalize()
        .expect("Failed to finalize the failed insert again");

    // Prepare and bind in one call
    let mut update = connection
        .prepare_with(
            "UPDATE scenario_items SET payload = ? WHERE id = ?",
            ([0xABu8, 0xCD], 5),
        )
        .expect("Failed to prepare the update");
    assert_eq!(update.bind_cursor(), 2);
    assert_eq!(update.execute().expect("Failed to update"), Outcome::Done);
    let mut select = connection
        .prepare("SELECT payload FROM scenario_items WHERE id = :id")
        .expect("Failed to prepare the payload select");
    let index = select
        .argument_index(":id")
        .expect("Failed to look up :id")
        .expect("The :id parameter should exist");
    select.bind_at(index, 5).expect("Failed to bind :id");
    assert!(select.next_row().expect("Failed to step"));
    let mut payload = [0u8; 2];
    select
        .read_row((&mut payload,))
        .expect("Failed to read the payload");
    assert_eq!(payload, [0xAB, 0xCD]);
    assert!(!select.next_row().expect("Failed to step to the end"));
}
