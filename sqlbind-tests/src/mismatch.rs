use sqlbind_core::{Blob, Connection, Error, Failure, Prepared, Skip, StorageClass};

fn failure(result: Option<Error>) -> Failure {
    let error = result.expect("The read should have failed");
    Failure::of(&error).expect("The error should carry a failure")
}

pub fn type_mismatch<C: Connection>(connection: &C) {
    let mut statement = connection
        .prepare("SELECT 'text', 42, 1.5, x'0102'")
        .expect("Failed to prepare the mismatch query");

    // Nothing is staged before the first step
    let mut number = 7;
    let error = crate::silent_logs! { statement.read_row_at(0, &mut number).err() };
    assert!(matches!(failure(error), Failure::Engine(..)));
    assert_eq!(number, 7);

    statement.execute().expect("Failed to execute the mismatch query");
    let mut text = String::from("untouched");
    let mut real = -1.0;
    let mut blob = vec![9u8];
    let error = crate::silent_logs! { statement.read_row_at(0, &mut number).err() };
    assert_eq!(
        failure(error),
        Failure::TypeMismatch {
            expected: StorageClass::Integer,
            found: StorageClass::Text,
        }
    );
    assert_eq!(number, 7);
    let error = crate::silent_logs! { statement.read_row_at(1, &mut real).err() };
    assert_eq!(
        failure(error),
        Failure::TypeMismatch {
            expected: StorageClass::Float,
            found: StorageClass::Integer,
        }
    );
    assert_eq!(real, -1.0);
    let error = crate::silent_logs! { statement.read_row_at(3, &mut text).err() };
    assert!(failure(error).is_type_mismatch());
    assert_eq!(text, "untouched");
    let error = crate::silent_logs! { statement.read_row_at(0, &mut blob).err() };
    assert!(failure(error).is_type_mismatch());
    assert_eq!(blob, [9]);

    // Out of range column
    let error = crate::silent_logs! { statement.read_row_at(4, &mut number).err() };
    assert!(matches!(failure(error), Failure::Engine(..)));

    // Outputs before the failing one are written, the following are not
    let mut first = String::new();
    let mut second = 0;
    let mut third = String::from("untouched");
    let mut fourth = Vec::new();
    let error = crate::silent_logs! {
        statement
            .read_row((&mut first, &mut second, &mut third, &mut fourth))
            .err()
    };
    assert!(failure(error).is_type_mismatch());
    assert_eq!(first, "text");
    assert_eq!(second, 42);
    assert_eq!(third, "untouched");
    assert!(fourth.is_empty());
    assert_eq!(statement.read_cursor(), 2);

    // The row is still there after a failed read
    statement
        .read_row((&mut first, &mut second, &mut real, &mut fourth))
        .expect("Failed to read the row after a mismatch");
    assert_eq!(real, 1.5);
    assert_eq!(fourth, [1, 2]);

    // A stored integer wider than the output is refused, not truncated
    let mut statement = connection
        .prepare("SELECT 4294967297")
        .expect("Failed to prepare the large integer query");
    statement.execute().expect("Failed to execute the large integer query");
    let error = crate::silent_logs! { statement.read_row_at(0, &mut number).err() };
    assert_eq!(failure(error), Failure::OutOfRange { value: 4294967297 });
    assert_eq!(number, 7);
    let mut wide = 0i64;
    statement
        .read_row((&mut wide,))
        .expect("Failed to read the large integer");
    assert_eq!(wide, 4294967297);
}

pub fn size_mismatch<C: Connection>(connection: &C) {
    let mut statement = connection
        .prepare("SELECT x'01020304'")
        .expect("Failed to prepare the fixed blob query");
    statement.execute().expect("Failed to execute the fixed blob query");

    let mut short = [0u8; 3];
    let error = crate::silent_logs! { statement.read_row_at(0, &mut short).err() };
    assert_eq!(
        failure(error),
        Failure::SizeMismatch {
            expected: 3,
            found: 4,
        }
    );
    assert_eq!(short, [0, 0, 0]);

    let mut long = [0u8; 5];
    let error = crate::silent_logs! { statement.read_row_at(0, &mut long).err() };
    assert!(failure(error).is_size_mismatch());
    assert_eq!(long, [0; 5]);

    let mut exact = [0u8; 4];
    statement
        .read_row((&mut exact,))
        .expect("Failed to read the fixed blob");
    assert_eq!(exact, [1, 2, 3, 4]);

    let mut buffer = vec![0u8; 8];
    statement
        .read_row((Blob::new(&mut buffer[2..6]),))
        .expect("Failed to read into a blob descriptor");
    assert_eq!(buffer, [0, 0, 1, 2, 3, 4, 0, 0]);
}

pub fn nullability<C: Connection>(connection: &C) {
    let mut statement = connection
        .prepare("SELECT NULL, ?, ?")
        .expect("Failed to prepare the nullability query");
    statement
        .bind((None::<i64>, Some("x")))
        .expect("Failed to bind the optional values");
    statement.execute().expect("Failed to execute the nullability query");

    // A stored NULL does not satisfy a plain output
    let mut number = 3;
    let error = crate::silent_logs! { statement.read_row_at(0, &mut number).err() };
    assert_eq!(
        failure(error),
        Failure::TypeMismatch {
            expected: StorageClass::Integer,
            found: StorageClass::Null,
        }
    );
    assert_eq!(number, 3);

    let mut first = Some(3);
    let mut second = Some(4i64);
    let mut third = None::<String>;
    statement
        .read_row((&mut first, &mut second, &mut third))
        .expect("Failed to read the optional values");
    assert_eq!(first, None);
    assert_eq!(second, None);
    assert_eq!(third.as_deref(), Some("x"));

    // The inner kind must still match
    let mut wrong = Some(5);
    let error = crate::silent_logs! { statement.read_row((Skip, Skip, &mut wrong)).err() };
    assert!(failure(error).is_type_mismatch());
    assert_eq!(wrong, Some(5));
}
