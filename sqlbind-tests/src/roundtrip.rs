use sqlbind_core::{ConstBlob, Connection, Outcome, Prepared};

pub fn roundtrip<C: Connection>(connection: &C) {
    let mut statement = connection
        .prepare("SELECT ?, ?, ?, ?, ?, ?")
        .expect("Failed to prepare the roundtrip query");
    statement
        .bind((
            -5,
            9_876_543_210i64,
            0.25,
            "Hello world!",
            vec![0u8, 1, 2, 255],
            [9u8, 8, 7, 6],
        ))
        .expect("Failed to bind the native kinds");
    assert_eq!(statement.bind_cursor(), 6);
    assert_eq!(
        statement.execute().expect("Failed to execute the roundtrip query"),
        Outcome::Row
    );
    let mut alpha = 0;
    let mut bravo = 0i64;
    let mut charlie = 0.0;
    let mut delta = String::new();
    let mut echo = Vec::new();
    let mut foxtrot = [0u8; 4];
    statement
        .read_row((
            &mut alpha,
            &mut bravo,
            &mut charlie,
            &mut delta,
            &mut echo,
            &mut foxtrot,
        ))
        .expect("Failed to read the native kinds");
    assert_eq!(alpha, -5);
    assert_eq!(bravo, 9_876_543_210);
    assert_eq!(charlie, 0.25);
    assert_eq!(delta, "Hello world!");
    assert_eq!(echo, [0, 1, 2, 255]);
    assert_eq!(foxtrot, [9, 8, 7, 6]);
    assert_eq!(statement.read_cursor(), 5);
    assert_eq!(
        statement.execute().expect("Failed to step past the single row"),
        Outcome::Done
    );

    // Narrow and unsigned types are widened
    let mut statement = connection
        .prepare("SELECT ?, ?, ?, ?, ?, ?")
        .expect("Failed to prepare the widening query");
    statement
        .bind((true, 200u8, -300i16, 4_000_000_000u32, 1.5f32, Some(7)))
        .expect("Failed to bind the widened kinds");
    statement.execute().expect("Failed to execute the widening query");
    let (mut alpha, mut bravo, mut charlie, mut delta, mut echo, mut foxtrot) =
        (0, 0, 0, 0i64, 0.0, 0);
    statement
        .read_row((
            &mut alpha,
            &mut bravo,
            &mut charlie,
            &mut delta,
            &mut echo,
            &mut foxtrot,
        ))
        .expect("Failed to read the widened kinds");
    assert_eq!(alpha, 1);
    assert_eq!(bravo, 200);
    assert_eq!(charlie, -300);
    assert_eq!(delta, 4_000_000_000);
    assert_eq!(echo, 1.5);
    assert_eq!(foxtrot, 7);

    // Empty values and explicit blob descriptors
    let bytes = [0xCAu8, 0xFE];
    let mut statement = connection
        .prepare("SELECT ?, ?, ?, typeof(?2)")
        .expect("Failed to prepare the empty values query");
    statement
        .bind(("", Vec::<u8>::new(), ConstBlob::new(&bytes)))
        .expect("Failed to bind the empty values");
    statement.execute().expect("Failed to execute the empty values query");
    let mut text = String::from("previous");
    let mut blob = vec![1u8, 2, 3];
    let mut descriptor = Vec::new();
    let mut kind = String::new();
    statement
        .read_row((&mut text, &mut blob, &mut descriptor, &mut kind))
        .expect("Failed to read the empty values");
    assert_eq!(text, "");
    assert!(blob.is_empty());
    assert_eq!(descriptor, [0xCA, 0xFE]);
    assert_eq!(kind, "blob");
}

pub fn transient_text<C: Connection>(connection: &C) {
    let mut statement = connection
        .prepare("SELECT ?, ?")
        .expect("Failed to prepare the transient query");
    {
        let text = String::from("short lived");
        let blob = vec![4u8, 2];
        statement
            .bind((&text, &blob))
            .expect("Failed to bind the caller owned buffers");
    }
    statement.execute().expect("Failed to execute the transient query");
    let mut text = String::new();
    let mut blob = Vec::new();
    statement
        .read_row((&mut text, &mut blob))
        .expect("Failed to read the caller owned buffers back");
    assert_eq!(text, "short lived");
    assert_eq!(blob, [4, 2]);
}
