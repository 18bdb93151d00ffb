use sqlbind_core::{Connection, Failure, Null, Prepared, Skip};

pub fn bind_cursor<C: Connection>(connection: &C) {
    let mut statement = connection
        .prepare("SELECT ?, ?, ?")
        .expect("Failed to prepare the bind cursor query");
    assert_eq!(statement.bind_cursor(), 0);

    // Each call continues after the previous one
    statement.bind((1,)).expect("Failed to bind the first value");
    assert_eq!(statement.bind_cursor(), 1);
    statement
        .bind((2, 3))
        .expect("Failed to bind the remaining values");
    assert_eq!(statement.bind_cursor(), 3);
    statement.execute().expect("Failed to execute the bind cursor query");
    let (mut a, mut b, mut c) = (0, 0, 0);
    statement
        .read_row((&mut a, &mut b, &mut c))
        .expect("Failed to read the bound values");
    assert_eq!((a, b, c), (1, 2, 3));

    // Indexed bind bypasses the cursor, clearing rewinds it
    statement.reset().expect("Failed to reset the statement");
    statement
        .clear_bindings()
        .expect("Failed to clear the bindings");
    assert_eq!(statement.bind_cursor(), 0);
    statement
        .bind_at(2, 20)
        .expect("Failed to bind by index");
    assert_eq!(statement.bind_cursor(), 0);
    statement.execute().expect("Failed to execute after clearing");
    let (mut a, mut b, mut c) = (Some(0), None, Some(0));
    statement
        .read_row((&mut a, &mut b, &mut c))
        .expect("Failed to read the cleared values");
    assert_eq!((a, b, c), (None, Some(20), None));

    // Skip advances without binding, Null binds NULL
    let mut statement = connection
        .prepare("SELECT ?, ?, ?")
        .expect("Failed to prepare the markers query");
    statement
        .bind((Skip, Null, 5))
        .expect("Failed to bind the markers");
    assert_eq!(statement.bind_cursor(), 3);
    statement.execute().expect("Failed to execute the markers query");
    let (mut a, mut b, mut c) = (Some(1), Some(1), 0);
    statement
        .read_row((&mut a, &mut b, &mut c))
        .expect("Failed to read the markers");
    assert_eq!((a, b, c), (None, None, 5));

    // The chain stops at the first failure, earlier binds are kept
    let mut statement = connection
        .prepare("SELECT ?1")
        .expect("Failed to prepare the single placeholder query");
    let error = crate::silent_logs! { statement.bind((10, 11, 12)).err() };
    let error = error.expect("Binding past the last placeholder should fail");
    assert!(matches!(Failure::of(&error), Some(Failure::Engine(..))));
    assert_eq!(statement.bind_cursor(), 2);
    statement.execute().expect("Failed to execute the partially bound query");
    let mut value = 0;
    statement
        .read_row((&mut value,))
        .expect("Failed to read the partially bound value");
    assert_eq!(value, 10);
}

pub fn read_cursor<C: Connection>(connection: &C) {
    let mut statement = connection
        .prepare("SELECT 1, 2, 3")
        .expect("Failed to prepare the read cursor query");
    assert_eq!(statement.read_cursor(), 0);
    statement.execute().expect("Failed to execute the read cursor query");

    let (mut a, mut b, mut c) = (0, 0, 0);
    statement
        .read_row((&mut a, Skip, &mut c))
        .expect("Failed to read with a skip marker");
    assert_eq!((a, b, c), (1, 0, 3));
    assert_eq!(statement.read_cursor(), 2);

    // Every read starts again from the first column
    statement
        .read_row((&mut b,))
        .expect("Failed to read the first column again");
    assert_eq!(b, 1);
    assert_eq!(statement.read_cursor(), 0);
    statement.read_row(()).expect("Failed to read nothing");
    assert_eq!(statement.read_cursor(), -1);

    // Indexed read bypasses the cursor
    statement
        .read_row_at(1, &mut b)
        .expect("Failed to read by index");
    assert_eq!(b, 2);
    assert_eq!(statement.read_cursor(), -1);

    statement
        .read_row((Null, Null, &mut c))
        .expect("Failed to read with null markers");
    assert_eq!(c, 3);
    assert_eq!(statement.read_cursor(), 2);
}
