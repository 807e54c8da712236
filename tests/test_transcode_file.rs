use pinbt::{transcode_file, Action, Operation, PiNbtError};
use std::fs;
use tempfile::tempdir;

#[test]
fn add_then_remove_round_trips_files() {
    let dir = tempdir().unwrap();
    let raw = dir.path().join("level.raw");
    let wrapped = dir.path().join("level.dat");
    let restored = dir.path().join("level.out");

    let payload: Vec<u8> = (0..=255u8).cycle().take(5000).collect();
    fs::write(&raw, &payload).unwrap();

    let report = transcode_file(Operation::AddHeader, &raw, &wrapped).unwrap();
    assert_eq!(report.action, Action::PrependHeader);

    let bytes = fs::read(&wrapped).unwrap();
    assert_eq!(&bytes[..4], &[3, 0, 0, 0]);
    assert_eq!(&bytes[4..8], &5000u32.to_le_bytes());
    assert_eq!(&bytes[8..], &payload[..]);

    let report = transcode_file(Operation::RemoveHeader, &wrapped, &restored).unwrap();
    assert_eq!(report.action, Action::SkipHeader);
    assert_eq!(fs::read(&restored).unwrap(), payload);
}

#[test]
fn empty_file_gets_zero_size_header() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("empty");
    let output = dir.path().join("out");
    fs::write(&input, b"").unwrap();

    transcode_file(Operation::AddHeader, &input, &output).unwrap();
    assert_eq!(fs::read(&output).unwrap(), [3, 0, 0, 0, 0, 0, 0, 0]);

    let back = dir.path().join("back");
    transcode_file(Operation::RemoveHeader, &output, &back).unwrap();
    assert!(fs::read(&back).unwrap().is_empty());
}

#[test]
fn same_path_is_converted_in_place() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("level.dat");
    fs::write(&path, b"ABC").unwrap();

    transcode_file(Operation::AddHeader, &path, &path).unwrap();
    assert_eq!(
        fs::read(&path).unwrap(),
        [3, 0, 0, 0, 3, 0, 0, 0, 0x41, 0x42, 0x43]
    );

    transcode_file(Operation::RemoveHeader, &path, &path).unwrap();
    assert_eq!(fs::read(&path).unwrap(), b"ABC");

    // 只剩目标文件，没有遗留的临时文件
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[cfg(unix)]
#[test]
fn in_place_conversion_keeps_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let path = dir.path().join("level.dat");
    fs::write(&path, b"ABC").unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

    transcode_file(Operation::AddHeader, &path, &path).unwrap();
    let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o644);

    transcode_file(Operation::RemoveHeader, &path, &path).unwrap();
    let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o644);
}

#[cfg(unix)]
#[test]
fn hard_linked_output_is_not_truncated_before_reading() {
    let dir = tempdir().unwrap();
    let original = dir.path().join("level.dat");
    let link = dir.path().join("level-link.dat");
    fs::write(&original, b"ABC").unwrap();
    fs::hard_link(&original, &link).unwrap();

    transcode_file(Operation::AddHeader, &original, &link).unwrap();

    assert_eq!(
        fs::read(&link).unwrap(),
        [3, 0, 0, 0, 3, 0, 0, 0, 0x41, 0x42, 0x43]
    );
    // 输出被替换为新文件，原路径的内容保持不变
    assert_eq!(fs::read(&original).unwrap(), b"ABC");
}

#[test]
fn missing_input_does_not_create_output() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("missing");
    let output = dir.path().join("out");

    let err = transcode_file(Operation::AddHeader, &input, &output).unwrap_err();
    match err {
        PiNbtError::Open { path, .. } => assert_eq!(path, input),
        other => panic!("unexpected error: {other}"),
    }
    assert!(!output.exists());
}

#[test]
fn unwritable_output_reports_open_error() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in");
    fs::write(&input, b"data").unwrap();
    let output = dir.path().join("no-such-dir").join("out");

    let err = transcode_file(Operation::AddHeader, &input, &output).unwrap_err();
    assert!(matches!(err, PiNbtError::Open { .. }));
}
