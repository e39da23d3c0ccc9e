use crate::{
    common::error::{ScanError, TypeError},
    core::types::Value,
    db::destination::{Destination, Rejection},
};

/// Copies `values` into `dest`, position by position.
///
/// The lengths are compared before anything is written, so a length
/// mismatch leaves every destination untouched. A type mismatch stops the
/// scan at that position: earlier destinations keep their new values and
/// later ones are not visited.
pub fn scan_values(values: &[Value], dest: &mut [Destination<'_>]) -> Result<(), ScanError> {
    if values.len() != dest.len() {
        return Err(ScanError::LengthMismatch {
            row_len: values.len(),
            dest_len: dest.len(),
        });
    }

    for (position, (value, slot)) in values.iter().zip(dest.iter_mut()).enumerate() {
        match decode_into(slot, value) {
            Ok(()) => {}
            Err(Rejection::Mismatch) => {
                return Err(ScanError::Type {
                    position,
                    source: TypeError::new(slot.expected_type(), value.clone()),
                });
            }
            Err(Rejection::Unsupported) => {
                return Err(ScanError::UnsupportedType {
                    type_name: slot.expected_type(),
                    position,
                });
            }
        }
    }

    Ok(())
}

macro_rules! copy_exact {
    ($dest:expr, $value:expr, $variant:ident) => {{
        let Value::$variant(v) = $value else {
            return Err(Rejection::Mismatch);
        };
        **$dest = Clone::clone(v);
    }};
}

/// One decode rule per destination shape.
fn decode_into(slot: &mut Destination<'_>, value: &Value) -> Result<(), Rejection> {
    match slot {
        Destination::Int(d) => copy_exact!(d, value, Int),
        Destination::Int8(d) => copy_exact!(d, value, Int8),
        Destination::Int16(d) => copy_exact!(d, value, Int16),
        Destination::Int32(d) => copy_exact!(d, value, Int32),
        Destination::Int64(d) => copy_exact!(d, value, Int64),
        Destination::Uint(d) => copy_exact!(d, value, Uint),
        Destination::Uint8(d) => copy_exact!(d, value, Uint8),
        Destination::Uint16(d) => copy_exact!(d, value, Uint16),
        Destination::Uint32(d) => copy_exact!(d, value, Uint32),
        Destination::Uint64(d) => copy_exact!(d, value, Uint64),
        Destination::Float32(d) => copy_exact!(d, value, Float32),
        Destination::Float64(d) => copy_exact!(d, value, Float64),
        Destination::String(d) => copy_exact!(d, value, Text),
        Destination::Bytes(d) => copy_exact!(d, value, Bytes),
        Destination::Bool(d) => copy_exact!(d, value, Bool),
        Destination::Time(d) => copy_exact!(d, value, Timestamp),

        // Nullable columns: anything that is not the natural type, NULL
        // included, reads as absent.
        Destination::NullString(d) => {
            **d = match value {
                Value::Text(s) => Some(s.clone()),
                _ => None,
            };
        }
        Destination::NullInt64(d) => {
            **d = match value {
                Value::Int64(i) => Some(*i),
                _ => None,
            };
        }
        Destination::NullTime(d) => {
            **d = match value {
                Value::Timestamp(t) => Some(*t),
                _ => None,
            };
        }

        Destination::Custom(custom) => return custom.assign(value),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};

    use super::*;
    use crate::db::destination::CustomSlot;

    fn test_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2016, 1, 11, 0, 0, 0).unwrap()
    }

    /// One destination of every built-in shape.
    #[derive(Debug, Default, PartialEq)]
    struct Everything {
        int: isize,
        int8: i8,
        int16: i16,
        int32: i32,
        int64: i64,
        uint: usize,
        uint8: u8,
        uint16: u16,
        uint32: u32,
        uint64: u64,
        string: String,
        time: DateTime<Utc>,
        null_time: Option<DateTime<Utc>>,
        boolean: bool,
        null_string: Option<String>,
        null_int64: Option<i64>,
        float32: f32,
        float64: f64,
        bytes: Vec<u8>,
    }

    impl Everything {
        fn scan(&mut self, values: &[Value]) -> Result<(), ScanError> {
            scan_values(
                values,
                &mut crate::dests![
                    &mut self.int,
                    &mut self.int8,
                    &mut self.int16,
                    &mut self.int32,
                    &mut self.int64,
                    &mut self.uint,
                    &mut self.uint8,
                    &mut self.uint16,
                    &mut self.uint32,
                    &mut self.uint64,
                    &mut self.string,
                    &mut self.time,
                    &mut self.null_time,
                    &mut self.boolean,
                    &mut self.null_string,
                    &mut self.null_int64,
                    &mut self.float32,
                    &mut self.float64,
                    &mut self.bytes,
                ],
            )
        }
    }

    fn good_row() -> Vec<Value> {
        vec![
            Value::Int(123),
            Value::Int8(123),
            Value::Int16(456),
            Value::Int32(321),
            Value::Int64(456),
            Value::Uint(123),
            Value::Uint8(45),
            Value::Uint16(321),
            Value::Uint32(321),
            Value::Uint64(654),
            Value::from("string"),
            Value::Timestamp(test_time()),
            Value::Timestamp(test_time()),
            Value::Bool(true),
            Value::from("nullstring"),
            Value::Int64(123),
            Value::Float32(1.1),
            Value::Float64(2.3),
            Value::from(&b"yo"[..]),
        ]
    }

    fn with(position: usize, value: Value) -> Vec<Value> {
        let mut row = good_row();
        row[position] = value;
        row
    }

    #[test]
    fn test_scan_every_type() {
        let mut got = Everything::default();
        got.scan(&good_row()).unwrap();

        let want = Everything {
            int: 123,
            int8: 123,
            int16: 456,
            int32: 321,
            int64: 456,
            uint: 123,
            uint8: 45,
            uint16: 321,
            uint32: 321,
            uint64: 654,
            string: "string".to_string(),
            time: test_time(),
            null_time: Some(test_time()),
            boolean: true,
            null_string: Some("nullstring".to_string()),
            null_int64: Some(123),
            float32: 1.1,
            float64: 2.3,
            bytes: b"yo".to_vec(),
        };
        assert_eq!(got, want);
    }

    #[test]
    fn test_scan_bad_types() {
        let cases = vec![
            (with(0, Value::Int64(123)), "int", Value::Int64(123)),
            (with(1, Value::Int(456)), "int8", Value::Int(456)),
            (with(2, Value::Int(321)), "int16", Value::Int(321)),
            (with(3, Value::Int(456)), "int32", Value::Int(456)),
            (with(4, Value::Int(456)), "int64", Value::Int(456)),
            (with(5, Value::Int(-123)), "uint", Value::Int(-123)),
            (with(6, Value::Int(321)), "uint8", Value::Int(321)),
            (with(7, Value::Int(321)), "uint16", Value::Int(321)),
            (with(8, Value::Int(321)), "uint32", Value::Int(321)),
            (with(9, Value::Int(654)), "uint64", Value::Int(654)),
            (with(10, Value::Int(123)), "string", Value::Int(123)),
            (with(11, Value::from("string")), "time", Value::from("string")),
            (with(13, Value::from("WHA?")), "bool", Value::from("WHA?")),
            (with(16, Value::Int(123)), "float32", Value::Int(123)),
            (with(17, Value::from("hi!")), "float64", Value::from("hi!")),
            (with(18, Value::Float64(1.01)), "bytes", Value::Float64(1.01)),
        ];

        for (row, expected, got) in cases {
            let mut dest = Everything::default();
            let err = dest.scan(&row).unwrap_err();
            assert_eq!(
                err.as_type_error(),
                Some(&TypeError::new(expected, got)),
                "scanning {row:?}"
            );
        }
    }

    #[test]
    fn test_nullable_destinations_absorb_mismatches() {
        let mut got = Everything::default();
        got.scan(&with(12, Value::from("string"))).unwrap();
        assert_eq!(got.null_time, None);

        let mut got = Everything::default();
        got.scan(&with(14, Value::Float64(0.0))).unwrap();
        assert_eq!(got.null_string, None);

        let mut got = Everything::default();
        got.scan(&with(15, Value::Null)).unwrap();
        assert_eq!(got.null_int64, None);
    }

    #[test]
    fn test_nullable_destination_resets_previous_value() {
        let mut name = Some("stale".to_string());
        let mut age = Some(7i64);
        scan_values(
            &[Value::Null, Value::Int32(7)],
            &mut crate::dests![&mut name, &mut age],
        )
        .unwrap();
        assert_eq!(name, None);
        assert_eq!(age, None);
    }

    #[test]
    fn test_length_mismatch_checked_before_writes() {
        let mut one = 0isize;
        let mut two = 0isize;
        let err = scan_values(
            &[Value::Int(123)],
            &mut crate::dests![&mut one, &mut two],
        )
        .unwrap_err();

        assert_eq!(
            err,
            ScanError::LengthMismatch {
                row_len: 1,
                dest_len: 2
            }
        );
        assert_eq!((one, two), (0, 0));

        let mut one = 0isize;
        let err = scan_values(&[Value::Int(1), Value::Int(2)], &mut crate::dests![&mut one])
            .unwrap_err();
        assert!(matches!(err, ScanError::LengthMismatch { row_len: 2, dest_len: 1 }));
        assert_eq!(one, 0);

        let mut one = 5isize;
        let err = scan_values(&[], &mut crate::dests![&mut one]).unwrap_err();
        assert_eq!(
            err,
            ScanError::LengthMismatch {
                row_len: 0,
                dest_len: 1
            }
        );
        assert_eq!(one, 5);

        let err = scan_values(&[Value::Int(1)], &mut []).unwrap_err();
        assert_eq!(
            err,
            ScanError::LengthMismatch {
                row_len: 1,
                dest_len: 0
            }
        );
    }

    #[test]
    fn test_empty_row_into_no_destinations() {
        assert!(scan_values(&[], &mut []).is_ok());
    }

    #[test]
    fn test_type_error_stops_at_failing_position() {
        let mut first = 0u64;
        let mut second = 0u64;
        let mut third = 0u64;
        let err = scan_values(
            &[Value::Uint64(1), Value::Uint32(2), Value::Uint64(3)],
            &mut crate::dests![&mut first, &mut second, &mut third],
        )
        .unwrap_err();

        assert_eq!(
            err,
            ScanError::Type {
                position: 1,
                source: TypeError::new("uint64", Value::Uint32(2)),
            }
        );
        assert_eq!(first, 1);
        assert_eq!(second, 0);
        assert_eq!(third, 0);
    }

    #[test]
    fn test_null_into_strict_destination_is_type_error() {
        let mut name = String::from("kept");
        let err = scan_values(&[Value::Null], &mut crate::dests![&mut name]).unwrap_err();
        assert_eq!(
            err.as_type_error(),
            Some(&TypeError::new("string", Value::Null))
        );
        assert_eq!(name, "kept");
    }

    struct UnknownShape;

    impl CustomSlot for UnknownShape {
        fn type_name(&self) -> &'static str {
            "unknown_shape"
        }
    }

    #[derive(Debug, Default, PartialEq)]
    struct UserId(u64);

    impl CustomSlot for UserId {
        fn type_name(&self) -> &'static str {
            "user_id"
        }

        fn assign(&mut self, value: &Value) -> Result<(), Rejection> {
            match value {
                Value::Uint64(id) => {
                    self.0 = *id;
                    Ok(())
                }
                _ => Err(Rejection::Mismatch),
            }
        }
    }

    #[test]
    fn test_unregistered_custom_slot_is_unsupported() {
        let mut slot = UnknownShape;
        let err = scan_values(&[Value::Null], &mut [Destination::Custom(&mut slot)]).unwrap_err();
        assert_eq!(
            err,
            ScanError::UnsupportedType {
                type_name: "unknown_shape",
                position: 0
            }
        );
    }

    #[test]
    fn test_custom_slot_decodes_and_reports_mismatch() {
        let mut id = UserId::default();
        scan_values(&[Value::Uint64(42)], &mut [Destination::Custom(&mut id)]).unwrap();
        assert_eq!(id, UserId(42));

        let err = scan_values(&[Value::from("42")], &mut [Destination::Custom(&mut id)])
            .unwrap_err();
        assert_eq!(
            err.as_type_error(),
            Some(&TypeError::new("user_id", Value::from("42")))
        );
    }
}
