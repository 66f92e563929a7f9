//! Directory iteration: the host-cursor-driven `.`/`..`/children protocol.
//!
//! Grounded on `YUFSCore_iterate`: offset 0 yields `.`, offset 1 yields `..`, offset `n >= 2`
//! yields the `(n - 2)`-th child in current sibling-list order. The callback returns `false` to
//! stop early (the source's `yufs_filldir_y` returning 0), exactly as a host-side directory-listing
//! syscall would stop once its buffer is full.

use crate::dentry::{DentryArena, DentryIdx};
use crate::error::{FsError, Result};

/// One entry produced by [`iterate`]: an id, name, and a caller-provided offset identifying its
/// position so a subsequent call can resume after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Offset identifying this entry's position, usable to resume iteration after it.
    pub offset: u64,
    /// The entry's name ("." and ".." for the two synthetic entries).
    pub name: String,
    /// Id of the inode this entry names.
    pub inode_id: u32,
}

/// Walk `dir`'s entries starting at `start_offset`, calling `visit` with each one until `visit`
/// returns `false` or entries are exhausted.
///
/// `self_id`/`parent_id` supply the synthetic `.`/`..` entries since the dentry arena does not
/// store them as real children. `max_files` bounds the child walk, turning a circular sibling list
/// into `EIO` rather than an infinite loop, per spec §4.F.
pub fn iterate(
    arena: &DentryArena,
    dir: DentryIdx,
    self_id: u32,
    parent_id: u32,
    max_files: usize,
    start_offset: u64,
    mut visit: impl FnMut(&DirEntry) -> bool,
) -> Result<()> {
    let mut offset = start_offset;

    if offset == 0 {
        let entry = DirEntry {
            offset,
            name: ".".to_string(),
            inode_id: self_id,
        };
        if !visit(&entry) {
            return Ok(());
        }
        offset += 1;
    }

    if offset == 1 {
        let entry = DirEntry {
            offset,
            name: "..".to_string(),
            inode_id: parent_id,
        };
        if !visit(&entry) {
            return Ok(());
        }
        offset += 1;
    }

    let children = arena
        .children(dir, max_files)
        .ok_or(FsError::Corrupt("directory sibling list exceeds inode table capacity"))?;

    let skip = (offset - 2) as usize;
    for (i, child) in children.into_iter().enumerate().skip(skip) {
        let d = arena.get(child);
        let entry = DirEntry {
            offset: i as u64 + 2,
            name: d.name.clone(),
            inode_id: d.inode_id,
        };
        if !visit(&entry) {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_tree() -> (DentryArena, DentryIdx) {
        let mut arena = DentryArena::new();
        let root = arena.insert_root();
        arena.create_attached(root, "a".into(), 10);
        arena.create_attached(root, "b".into(), 11);
        (arena, root)
    }

    #[test]
    fn yields_dot_dotdot_then_children_in_order() {
        let (arena, root) = build_tree();
        let mut seen = Vec::new();
        iterate(&arena, root, 1000, 1000, 16, 0, |e| {
            seen.push((e.offset, e.name.clone(), e.inode_id));
            true
        })
        .unwrap();

        assert_eq!(
            seen,
            vec![
                (0, ".".to_string(), 1000),
                (1, "..".to_string(), 1000),
                (2, "b".to_string(), 11),
                (3, "a".to_string(), 10),
            ]
        );
    }

    #[test]
    fn resumes_from_a_nonzero_offset() {
        let (arena, root) = build_tree();
        let mut seen = Vec::new();
        iterate(&arena, root, 1000, 1000, 16, 3, |e| {
            seen.push(e.name.clone());
            true
        })
        .unwrap();
        assert_eq!(seen, vec!["a".to_string()]);
    }

    #[test]
    fn callback_returning_false_stops_the_walk() {
        let (arena, root) = build_tree();
        let mut seen = Vec::new();
        iterate(&arena, root, 1000, 1000, 16, 0, |e| {
            seen.push(e.name.clone());
            e.name != "."
        })
        .unwrap();
        assert_eq!(seen, vec![".".to_string(), "..".to_string()]);
    }

    #[test]
    fn offset_past_last_child_yields_nothing() {
        let (arena, root) = build_tree();
        let mut seen = Vec::new();
        iterate(&arena, root, 1000, 1000, 16, 10, |e| {
            seen.push(e.name.clone());
            true
        })
        .unwrap();
        assert!(seen.is_empty());
    }
}
