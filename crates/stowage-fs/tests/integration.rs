use std::io::Write;

use stowage_fs::{Result, StagedFile, remove_entry, stat_file};
use tempfile::tempdir;

#[test]
fn test_commit_replaces_existing_file_completely() -> Result<()> {
    let dir = tempdir().unwrap();
    let dest = dir.path().join("tool.tar.gz");
    std::fs::write(&dest, b"a much longer stale payload than the new one").unwrap();

    let (staged, mut file) = StagedFile::create(&dest)?;
    file.write_all(b"fresh").unwrap();
    drop(file);
    staged.commit()?;

    assert_eq!(std::fs::read(&dest).unwrap(), b"fresh");
    assert_eq!(stat_file(&dest)?, Some(5));
    Ok(())
}

#[test]
fn test_purge_then_stat_reports_absent() -> Result<()> {
    let dir = tempdir().unwrap();
    let dest = dir.path().join("tool.tar.gz");
    std::fs::write(&dest, b"stale").unwrap();

    remove_entry(&dest)?;
    assert_eq!(stat_file(&dest)?, None);
    Ok(())
}

#[test]
fn test_abandoned_stage_leaves_directory_unchanged() -> Result<()> {
    let dir = tempdir().unwrap();
    let dest = dir.path().join("tool.tar.gz");

    {
        let (_staged, mut file) = StagedFile::create(&dest)?;
        file.write_all(b"half a body").unwrap();
    }

    let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(leftovers, 0);
    Ok(())
}
