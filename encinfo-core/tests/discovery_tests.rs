// encinfo-core/tests/discovery_tests.rs

use encinfo_core::discovery::find_log_files;
use encinfo_core::error::CoreError;
use std::fs::{self, File};
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_find_log_files() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input_dir = dir.path();

    File::create(input_dir.join("Cactus_1920x1080_50_22.log"))?;
    File::create(input_dir.join("Cactus_1920x1080_50_27.LOG"))?; // Extension match is case-sensitive
    File::create(input_dir.join("notes.txt"))?;
    fs::create_dir(input_dir.join("qp37"))?;
    File::create(input_dir.join("qp37").join("BQMall_832x480_60_37.log"))?; // Nested logs are found

    let files = find_log_files(input_dir, "log")?;

    assert_eq!(files.len(), 2);
    assert_eq!(files[0].file_name().unwrap(), "Cactus_1920x1080_50_22.log");
    assert_eq!(files[1].file_name().unwrap(), "BQMall_832x480_60_37.log");

    dir.close()?;
    Ok(())
}

#[test]
fn test_find_log_files_with_dotted_selector() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    File::create(dir.path().join("Johnny_32_x265.csv"))?;
    File::create(dir.path().join("Johnny_32_x265.log"))?;

    let files = find_log_files(dir.path(), ".csv")?;
    assert_eq!(files, vec![dir.path().join("Johnny_32_x265.csv")]);

    dir.close()?;
    Ok(())
}

#[test]
fn test_find_log_files_empty() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    File::create(dir.path().join("document.txt"))?;
    fs::create_dir(dir.path().join("subdir"))?;

    // Nothing to parse is not an error: the VVC orderer still reports every sequence.
    let files = find_log_files(dir.path(), "log")?;
    assert!(files.is_empty());

    dir.close()?;
    Ok(())
}

#[test]
fn test_find_log_files_nonexistent_dir() {
    let non_existent_path = PathBuf::from("surely_this_does_not_exist_42_integration");
    let result = find_log_files(&non_existent_path, "log");
    // walkdir::Error should be wrapped in CoreError::Walkdir
    match result {
        Err(CoreError::Walkdir(_)) => {}
        other => panic!("Expected CoreError::Walkdir, got {other:?}"),
    }
}
