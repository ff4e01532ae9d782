use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::tempdir;
use walkdir::WalkDir;
use wallymover::copy_tree;

/// Relative path -> file bytes (None for directories).
fn snapshot(root: &Path) -> BTreeMap<PathBuf, Option<Vec<u8>>> {
    WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .map(|e| e.unwrap())
        .map(|e| {
            let rel = e.path().strip_prefix(root).unwrap().to_path_buf();
            let data = if e.file_type().is_dir() {
                None
            } else {
                Some(fs::read(e.path()).unwrap())
            };
            (rel, data)
        })
        .collect()
}

fn build_tree(root: &Path) {
    // Deep-ish hierarchy with hidden, spaced, empty and binary entries
    let layout: [(&str, &[u8]); 6] = [
        ("a.txt", b"hello"),
        ("nested/b.txt", b"world"),
        ("nested/deeper/c.bin", &[0, 159, 146, 150, 255]),
        ("with space/d.lua", b"return {}"),
        (".hidden/e.cfg", b""),
        ("nested/.inner/f.txt", b"f"),
    ];
    for (rel, data) in layout {
        let p = root.join(rel);
        fs::create_dir_all(p.parent().unwrap()).unwrap();
        fs::write(&p, data).unwrap();
    }
    fs::create_dir_all(root.join("empty_dir")).unwrap();
}

#[test]
fn copy_there_and_back_is_identical() {
    let td = tempdir().unwrap();
    let original = td.path().join("T");
    build_tree(&original);

    let staged = td.path().join("S");
    let back = td.path().join("T2");
    copy_tree(&original, &staged).unwrap();
    copy_tree(&staged, &back).unwrap();

    assert_eq!(snapshot(&original), snapshot(&back));
    assert_eq!(snapshot(&original), snapshot(&staged));
}

#[test]
fn copy_leaves_source_untouched() {
    let td = tempdir().unwrap();
    let src = td.path().join("src");
    build_tree(&src);
    let before = snapshot(&src);

    copy_tree(&src, &td.path().join("dest")).unwrap();

    assert_eq!(before, snapshot(&src));
}

#[test]
fn copy_of_empty_dir_creates_empty_destination() {
    let td = tempdir().unwrap();
    let src = td.path().join("src");
    fs::create_dir_all(&src).unwrap();
    let dest = td.path().join("a/b/dest");

    let report = copy_tree(&src, &dest).unwrap();

    assert!(dest.is_dir());
    assert!(snapshot(&dest).is_empty());
    assert_eq!(report.files, 0);
}

#[cfg(unix)]
#[test]
fn symlinked_file_is_copied_as_bytes() {
    let td = tempdir().unwrap();
    let src = td.path().join("src");
    fs::create_dir_all(&src).unwrap();
    fs::write(td.path().join("target.txt"), "via link").unwrap();
    std::os::unix::fs::symlink(td.path().join("target.txt"), src.join("link.txt")).unwrap();

    let dest = td.path().join("dest");
    copy_tree(&src, &dest).unwrap();

    let meta = fs::symlink_metadata(dest.join("link.txt")).unwrap();
    assert!(meta.file_type().is_file());
    assert_eq!(fs::read_to_string(dest.join("link.txt")).unwrap(), "via link");
}
