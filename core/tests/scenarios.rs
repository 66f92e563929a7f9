//! Black-box end-to-end scenarios against the public `Fs` surface, placed in `tests/` the way the
//! teacher crate places its `fs-tests/*_test.rs` suite outside the library it exercises.

use yufs_core::{Fs, FsError};

#[test]
fn root_exists_after_init() {
    let fs = Fs::init().unwrap();
    let stat = fs.getattr(fs.root_id()).unwrap();
    assert_eq!(stat.id, 1000);
    assert_eq!(stat.mode & 0o170000, 0o040000);
    assert_eq!(stat.size, 0);
}

#[test]
fn create_then_lookup_then_missing_lookup_fails() {
    let mut fs = Fs::init().unwrap();
    let root = fs.root_id();

    let created = fs.create(root, "hello.txt", 0o644 | 0o100000).unwrap();
    let found = fs.lookup(root, "hello.txt").unwrap();
    assert_eq!(found, created);

    assert_eq!(fs.lookup(root, "missing"), Err(FsError::NotFound("no entry with that name")));
}

#[test]
fn write_read_and_append_grow_the_file() {
    let mut fs = Fs::init().unwrap();
    let root = fs.root_id();
    let x = fs.create(root, "data.bin", 0o644 | 0o100000).unwrap();

    let written = fs.write(x, b"Hello, World!", 0).unwrap();
    assert_eq!(written, 13);
    assert_eq!(fs.getattr(x).unwrap().size, 13);

    let mut buf = [0u8; 13];
    assert_eq!(fs.read(x, &mut buf, 0).unwrap(), 13);
    assert_eq!(&buf, b"Hello, World!");

    fs.write(x, b" YUFS", 13).unwrap();
    let mut buf = [0u8; 100];
    let n = fs.read(x, &mut buf, 0).unwrap();
    assert_eq!(n, 18);
    assert_eq!(&buf[..18], b"Hello, World! YUFS");
}

#[test]
fn directory_tree_and_iteration() {
    let mut fs = Fs::init().unwrap();
    let root = fs.root_id();

    let folder1 = fs.mkdir(root, "folder1", 0o755 | 0o040000).unwrap();
    fs.create(root, "file_in_root.txt", 0o644 | 0o100000).unwrap();
    fs.create(folder1, "nested.txt", 0o644 | 0o100000).unwrap();

    let mut root_entries = Vec::new();
    fs.iterate(root, 0, |e| {
        root_entries.push(e.name.clone());
        true
    })
    .unwrap();
    assert_eq!(
        root_entries,
        vec![
            ".".to_string(),
            "..".to_string(),
            "file_in_root.txt".to_string(),
            "folder1".to_string(),
        ],
        "synthetic entries first, then LIFO insertion order"
    );

    let mut folder1_entries = Vec::new();
    fs.iterate(folder1, 0, |e| {
        folder1_entries.push(e.name.clone());
        true
    })
    .unwrap();
    assert_eq!(folder1_entries, vec![".".to_string(), "..".to_string(), "nested.txt".to_string()]);
}

#[test]
fn delete_logic_rejects_nonempty_rmdir_then_succeeds_once_emptied() {
    let mut fs = Fs::init().unwrap();
    let root = fs.root_id();

    let mydir = fs.mkdir(root, "mydir", 0o755 | 0o040000).unwrap();
    fs.create(mydir, "file.txt", 0o644 | 0o100000).unwrap();

    assert_eq!(fs.rmdir(root, "mydir"), Err(FsError::NotEmpty));

    fs.unlink(mydir, "file.txt").unwrap();
    assert_eq!(fs.lookup(mydir, "file.txt"), Err(FsError::NotFound("no entry with that name")));

    fs.rmdir(root, "mydir").unwrap();
    assert_eq!(fs.lookup(root, "mydir"), Err(FsError::NotFound("no entry with that name")));
}

#[test]
fn hard_link_lifecycle_keeps_content_reachable_until_last_name_is_gone() {
    let mut fs = Fs::init().unwrap();
    let root = fs.root_id();

    let x = fs.create(root, "a", 0o644 | 0o100000).unwrap();
    fs.link(x, root, "b").unwrap();

    fs.unlink(root, "a").unwrap();
    assert_eq!(fs.lookup(root, "b").unwrap(), x);

    let mut buf = [0u8; 4];
    assert!(fs.read(x, &mut buf, 0).is_ok());

    fs.unlink(root, "b").unwrap();
    assert_eq!(fs.getattr(x), Err(FsError::NotFound("no such inode id")));
}

#[test]
fn filling_the_inode_table_yields_enospc() {
    let cfg = yufs_core::FsConfig { max_files: 4, root_id: 1 };
    let mut fs = Fs::init_with_config(cfg).unwrap();
    let root = fs.root_id();

    // root already occupies one slot; two more slots fit, the third overflows.
    fs.create(root, "a", 0o644).unwrap();
    fs.create(root, "b", 0o644).unwrap();
    assert_eq!(fs.create(root, "c", 0o644), Err(FsError::NoSpace("inode table is full")));
}

#[test]
fn write_past_end_zero_fills_then_reads_back_as_zero() {
    let mut fs = Fs::init().unwrap();
    let root = fs.root_id();
    let f = fs.create(root, "sparse", 0o644 | 0o100000).unwrap();

    fs.write(f, b"ab", 10).unwrap();
    let mut buf = [0xffu8; 10];
    let n = fs.read(f, &mut buf, 0).unwrap();
    assert_eq!(n, 10);
    assert_eq!(&buf[0..10], &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0][..]);
}

#[test]
fn zero_length_write_at_zero_is_a_no_op() {
    let mut fs = Fs::init().unwrap();
    let root = fs.root_id();
    let f = fs.create(root, "empty", 0o644 | 0o100000).unwrap();
    assert_eq!(fs.write(f, b"", 0).unwrap(), 0);
    assert_eq!(fs.getattr(f).unwrap().size, 0);
}

#[test]
fn read_at_or_past_size_returns_zero() {
    let mut fs = Fs::init().unwrap();
    let root = fs.root_id();
    let f = fs.create(root, "f", 0o644 | 0o100000).unwrap();
    fs.write(f, b"abc", 0).unwrap();

    let mut buf = [0xaau8; 4];
    assert_eq!(fs.read(f, &mut buf, 3).unwrap(), 0);
    assert_eq!(fs.read(f, &mut buf, 100).unwrap(), 0);
}
