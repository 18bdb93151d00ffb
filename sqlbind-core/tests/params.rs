#[cfg(test)]
mod tests {
    use sqlbind_core::{
        AsParam, AsSlot, Blob, ConstBlob, Error, Failure, Null, NullableSlot, Outputs, Param,
        Params, Skip, Slot, StorageClass,
    };
    use std::borrow::Cow;

    fn collect<P: Params>(params: P) -> Vec<String> {
        let mut result = Vec::new();
        params
            .visit_params(&mut |param| {
                result.push(format!("{:?}", param));
                Ok(())
            })
            .expect("Visiting params should not fail");
        result
    }

    #[test]
    fn params_native_kinds() {
        assert_eq!(5i32.as_param(), Param::Int32(5));
        assert_eq!((-3i8).as_param(), Param::Int32(-3));
        assert_eq!(65535u16.as_param(), Param::Int32(65535));
        assert_eq!(4_000_000_000u32.as_param(), Param::Int64(4_000_000_000));
        assert_eq!(i64::MAX.as_param(), Param::Int64(i64::MAX));
        assert_eq!(true.as_param(), Param::Int32(1));
        assert_eq!(0.5f32.as_param(), Param::Float64(0.5));
        assert_eq!(2.25f64.as_param(), Param::Float64(2.25));
        assert_eq!("abc".as_param(), Param::Text("abc"));
        assert_eq!(String::from("abc").as_param(), Param::Text("abc"));
        assert_eq!(Cow::Borrowed("abc").as_param(), Param::Text("abc"));
        assert_eq!(vec![1u8, 2].as_param(), Param::Blob(&[1, 2]));
        assert_eq!([7u8; 3].as_param(), Param::Blob(&[7, 7, 7]));
        assert_eq!(Box::new(9i32).as_param(), Param::Int32(9));
    }

    #[test]
    fn params_markers() {
        assert_eq!(Null.as_param(), Param::Null);
        assert_eq!(Skip.as_param(), Param::Skip);
        assert_eq!(None::<i32>.as_param(), Param::Null);
        assert_eq!(Some("x").as_param(), Param::Text("x"));
        let bytes = [1u8, 2, 3];
        assert_eq!(ConstBlob::new(&bytes).as_param(), Param::Blob(&[1, 2, 3]));
        let raw = unsafe { ConstBlob::from_raw_parts(bytes.as_ptr(), bytes.len()) };
        assert_eq!(raw.len(), 3);
        assert_eq!(raw.as_param(), Param::Blob(&[1, 2, 3]));
        let empty = unsafe { ConstBlob::from_raw_parts(std::ptr::null(), 0) };
        assert!(empty.is_empty());
        let mut buffer = [4u8, 5];
        assert_eq!(Blob::new(&mut buffer).as_param(), Param::Blob(&[4, 5]));
    }

    #[test]
    fn params_visit_in_order() {
        assert_eq!(collect(()), Vec::<String>::new());
        assert_eq!(collect((1,)), ["Int32(1)"]);
        assert_eq!(
            collect((1, 2i64, 3.5, "four", Null, Skip)),
            [
                "Int32(1)",
                "Int64(2)",
                "Float64(3.5)",
                "Text(\"four\")",
                "Null",
                "Skip"
            ]
        );
        let owned = String::from("borrowed");
        assert_eq!(collect((&owned, &owned)), ["Text(\"borrowed\")"; 2]);
        assert_eq!(
            collect(vec![Param::Int32(1), Param::Null]),
            ["Int32(1)", "Null"]
        );
        assert_eq!(collect(&[Param::Float64(1.0)]), ["Float64(1.0)"]);
    }

    #[test]
    fn params_visit_stops_at_first_error() {
        let mut visited = 0;
        let result = (1, 2, 3).visit_params(&mut |param| {
            visited += 1;
            match param {
                Param::Int32(2) => Err(Error::new(Failure::Engine(25))),
                _ => Ok(()),
            }
        });
        let error = result.expect_err("The second parameter should fail");
        assert_eq!(Failure::of(&error), Some(Failure::Engine(25)));
        assert_eq!(visited, 2);
    }

    #[test]
    fn outputs_visit_in_order() {
        let mut a = 0i32;
        let mut b = String::new();
        let mut c = [0u8; 2];
        let mut kinds = Vec::new();
        (&mut a, Skip, &mut b, Null, &mut c)
            .visit_slots(&mut |slot| {
                kinds.push(match slot {
                    Slot::Int32(v) => {
                        *v = 10;
                        "int32"
                    }
                    Slot::Text(v) => {
                        v.push_str("text");
                        "text"
                    }
                    Slot::Fixed(v) => {
                        v.copy_from_slice(&[1, 2]);
                        "fixed"
                    }
                    Slot::Skip => "skip",
                    Slot::Null => "null",
                    _ => "other",
                });
                Ok(())
            })
            .expect("Visiting outputs should not fail");
        assert_eq!(kinds, ["int32", "skip", "text", "null", "fixed"]);
        assert_eq!(a, 10);
        assert_eq!(b, "text");
        assert_eq!(c, [1, 2]);
    }

    #[test]
    fn outputs_dynamic_list() {
        let mut a = 0i64;
        let mut b = 0.0f64;
        let mut count = 0;
        {
            let mut outputs: Vec<&mut dyn AsSlot> = vec![&mut a, &mut b];
            outputs
                .visit_slots(&mut |slot| {
                    match slot {
                        Slot::Int64(v) => *v = 7,
                        Slot::Float64(v) => *v = 0.25,
                        _ => panic!("Unexpected slot"),
                    }
                    count += 1;
                    Ok(())
                })
                .expect("Visiting outputs should not fail");
        }
        assert_eq!(count, 2);
        assert_eq!(a, 7);
        assert_eq!(b, 0.25);
    }

    #[test]
    fn nullable_slot_only_written_on_success() {
        let mut value = Some(3i32);
        value.set_null();
        assert_eq!(value, None);

        let mut value = Some(3i32);
        let result = value.read_value(&mut |_| {
            Err(Failure::TypeMismatch {
                expected: StorageClass::Integer,
                found: StorageClass::Text,
            })
        });
        assert!(result.is_err());
        assert_eq!(value, Some(3));

        let result = value.read_value(&mut |slot| {
            if let Slot::Int32(v) = slot {
                *v = 42;
            }
            Ok(())
        });
        assert!(result.is_ok());
        assert_eq!(value, Some(42));
        assert!(matches!(value.as_slot(), Slot::Nullable(..)));
    }

    #[test]
    fn failure_display() {
        assert_eq!(
            Failure::TypeMismatch {
                expected: StorageClass::Integer,
                found: StorageClass::Null,
            }
            .to_string(),
            "Type mismatch: expected a INTEGER column but found NULL"
        );
        assert!(
            Failure::SizeMismatch {
                expected: 4,
                found: 3
            }
            .is_size_mismatch()
        );
        assert_eq!(Failure::Engine(19).to_string(), "Engine failure (code 19)");
        assert_eq!(
            Failure::SizeMismatch {
                expected: 4,
                found: 3
            }
            .to_string(),
            "Size mismatch: the buffer holds 4 bytes but the stored blob has 3"
        );
        assert_eq!(
            Failure::OutOfRange { value: 4294967297 }.to_string(),
            "Out of range: the stored integer 4294967297 does not fit in 32 bits"
        );
        let error = Error::new(Failure::Engine(1)).context("Some context");
        assert_eq!(Failure::of(&error), Some(Failure::Engine(1)));
        assert_eq!(Failure::of(&Error::msg("plain")), None);
    }
}
