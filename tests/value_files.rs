//! File round trips for single values

use emx_nbt::{parse_value, NativeValue, StringValue, TagKind, Value};
use tempfile::TempDir;

#[test]
fn test_write_and_read_every_kind() {
    let dir = TempDir::new().unwrap();
    let cases = [
        (TagKind::Byte, "-7"),
        (TagKind::Short, "1234"),
        (TagKind::Int, "-100000"),
        (TagKind::Long, "-9223372036854775808"),
        (TagKind::Float, "1.5"),
        (TagKind::Double, "0.1"),
        (TagKind::String, "snow \u{2603} and \u{1F600}"),
    ];

    for (kind, text) in cases {
        let value = parse_value(kind, text).unwrap();
        let path = dir.path().join(format!("{}.bin", kind.name().to_lowercase()));
        value.write_to_file(&path).unwrap();

        let raw = std::fs::read(&path).unwrap();
        assert_eq!(raw, value.bin());

        let read = Value::read_from_file(kind, &path).unwrap();
        assert_eq!(read, value);
        assert_eq!(read.native().unwrap(), value.native().unwrap());
    }
}

#[test]
fn test_supplementary_character_on_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("emoji.bin");

    let value = Value::from(StringValue::from_value("\u{1F600}").unwrap());
    value.write_to_file(&path).unwrap();

    assert_eq!(
        std::fs::read(&path).unwrap(),
        vec![0x00, 0x06, 0xED, 0xA0, 0xBD, 0xED, 0xB8, 0x80]
    );
}

#[test]
fn test_short_file_is_normalized() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("short.bin");
    std::fs::write(&path, [0x01]).unwrap();

    let value = Value::read_from_file(TagKind::Int, &path).unwrap();
    assert_eq!(value.bin(), vec![0, 0, 0, 1]);
    assert_eq!(value.native().unwrap(), NativeValue::Int(1));
}

#[test]
fn test_corrupt_string_file_fails_on_read() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.bin");
    std::fs::write(&path, [0x00, 0x05, b'a']).unwrap();

    let value = Value::read_from_file(TagKind::String, &path).unwrap();
    assert_eq!(value.kind(), TagKind::String);
    let err = value.native().unwrap_err();
    assert!(err.to_string().contains("declares 5 bytes but 1 bytes follow"));
}

#[test]
fn test_missing_file_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.bin");

    let err = Value::read_from_file(TagKind::Byte, &path).unwrap_err();
    assert!(err.to_string().contains("missing.bin"));
}
