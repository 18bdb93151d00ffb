use sqlbind_core::{Connection, Failure, Outcome, Prepared, Status};
use std::mem;

pub fn finalize_and_move<C: Connection>(connection: &C) {
    let mut source = connection
        .prepare("SELECT ?, ?")
        .expect("Failed to prepare the move query");
    assert!(source.is_valid());
    source.bind((1,)).expect("Failed to bind before the move");

    let mut target = mem::take(&mut source);
    assert!(target.is_valid());
    assert_eq!(target.bind_cursor(), 1);
    assert!(!source.is_valid());
    assert_eq!(source.bind_cursor(), 0);
    assert_eq!(source.status(), Status::Pending);

    // The inert source can be finalized any number of times
    source.finalize().expect("Failed to finalize the moved out statement");
    source.finalize().expect("Failed to finalize the moved out statement again");
    let error = crate::silent_logs! { source.execute().err() };
    let error = error.expect("Executing a moved out statement should fail");
    assert!(matches!(Failure::of(&error), Some(Failure::Engine(..))));

    target.bind((2,)).expect("Failed to bind after the move");
    assert_eq!(target.bind_cursor(), 2);
    assert_eq!(target.execute().expect("Failed to execute"), Outcome::Row);

    // A plain move keeps the staged row
    let mut moved = target;
    assert_eq!(moved.status(), Status::Row);
    let (mut a, mut b) = (0, 0);
    moved
        .read_row((&mut a, &mut b))
        .expect("Failed to read after the move");
    assert_eq!((a, b), (1, 2));

    moved.finalize().expect("Failed to finalize");
    assert!(!moved.is_valid());
    moved.finalize().expect("Failed to finalize twice");
    crate::silent_logs! {
        assert!(moved.column_count().is_err());
    }
}

pub fn introspection<C: Connection>(connection: &C) {
    let statement = connection
        .prepare("SELECT 1 AS one, 'two' AS two WHERE :flag OR :other")
        .expect("Failed to prepare the introspection query");
    assert_eq!(statement.status(), Status::Pending);
    assert!(!statement.has_row());
    assert_eq!(statement.column_count().expect("Failed to count the columns"), 2);
    assert_eq!(
        statement.column_name(0).expect("Failed to get the first column name"),
        "one"
    );
    assert_eq!(
        statement.column_name(1).expect("Failed to get the second column name"),
        "two"
    );
    crate::silent_logs! {
        assert!(statement.column_name(2).is_err());
        assert!(statement.column_name(-1).is_err());
    }
    assert_eq!(
        statement
            .argument_index(":flag")
            .expect("Failed to look up :flag"),
        Some(1)
    );
    assert_eq!(
        statement
            .argument_index(":other")
            .expect("Failed to look up :other"),
        Some(2)
    );
    assert_eq!(
        statement
            .argument_index(":missing")
            .expect("Failed to look up :missing"),
        None
    );
    assert!(!format!("{}", statement).is_empty());
}

pub fn reset<C: Connection>(connection: &C) {
    let mut statement = connection
        .prepare("SELECT ?")
        .expect("Failed to prepare the reset query");
    statement.bind((10,)).expect("Failed to bind");
    assert_eq!(statement.execute().expect("Failed to execute"), Outcome::Row);
    assert_eq!(statement.status(), Status::Row);
    assert!(statement.has_row());

    // Bindings survive a reset
    statement.reset().expect("Failed to reset");
    assert_eq!(statement.status(), Status::Pending);
    assert_eq!(statement.bind_cursor(), 1);
    assert_eq!(statement.execute().expect("Failed to execute again"), Outcome::Row);
    let mut value = 0;
    statement.read_row((&mut value,)).expect("Failed to read");
    assert_eq!(value, 10);
    assert_eq!(statement.execute().expect("Failed to step to the end"), Outcome::Done);
    assert_eq!(statement.status(), Status::Done);

    statement.reset().expect("Failed to reset after completion");
    statement
        .clear_bindings()
        .expect("Failed to clear the bindings");
    statement.bind((11,)).expect("Failed to bind a new value");
    statement.execute().expect("Failed to execute with the new value");
    statement.read_row((&mut value,)).expect("Failed to read the new value");
    assert_eq!(value, 11);
}
