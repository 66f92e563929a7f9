//! The inode table: a sparse array of [`Inode`]s addressed by `u32` id, allocated by linear scan.
//!
//! Grounded on `yufs_core.c`'s `static struct YUFS_Inode *inodeTable[MAX_FILES]` plus
//! `allocInode`/`freeInode`. Where the source stores a `mode` word and branches on `S_ISDIR(mode)`
//! at every call site, this uses a tagged [`InodeKind`] (design note §9) so a file inode simply
//! cannot be asked for its `primary_dentry`, nor a directory for its `content`.

use log::{debug, trace};

use crate::dentry::DentryIdx;
use crate::error::{FsError, Result};
use crate::ids::{S_IFDIR, S_IFREG};

/// The two shapes an inode can take. Replaces the source's single `mode` word plus ad hoc
/// `content`/`main_dentry` fields that are only meaningful for one or the other kind.
#[derive(Debug, Clone)]
pub enum InodeKind {
    /// A directory: `primary_dentry` is the arena slot used as the anchor for this directory's
    /// child list (the source's `main_dentry`).
    Dir {
        /// Arena index of the dentry anchoring this directory's child list.
        primary_dentry: DentryIdx,
    },
    /// A regular file: raw byte content plus a hardlink count.
    File {
        /// The file's raw bytes; its length is the file's logical size.
        content: Vec<u8>,
        /// Number of directory entries naming this inode.
        nlink: u32,
    },
}

/// A single inode: an id, permission bits, and a [`InodeKind`]-tagged body.
#[derive(Debug, Clone)]
pub struct Inode {
    /// This inode's id (its index in the owning [`InodeTable`]).
    pub id: u32,
    /// Permission bits (the low 12 bits); type bits are derived from `kind`, see [`Self::full_mode`].
    pub mode: u32,
    /// The directory-or-file body.
    pub kind: InodeKind,
}

impl Inode {
    /// Mode word as POSIX would report it: type bits from [`InodeKind`] plus the permission bits
    /// stored in `mode`.
    pub fn full_mode(&self) -> u32 {
        let type_bits = match self.kind {
            InodeKind::Dir { .. } => S_IFDIR,
            InodeKind::File { .. } => S_IFREG,
        };
        type_bits | (self.mode & 0o7777)
    }

    /// Logical size: a directory always reports 0 (the source does the same — `YUFS_Inode.size`
    /// is only ever touched by the file write path), a file reports its content length.
    pub fn size(&self) -> u64 {
        match &self.kind {
            InodeKind::Dir { .. } => 0,
            InodeKind::File { content, .. } => content.len() as u64,
        }
    }

    /// This inode's primary dentry, or `ENOTDIR` if it is a regular file.
    pub fn as_dir(&self) -> Result<DentryIdx> {
        match self.kind {
            InodeKind::Dir { primary_dentry } => Ok(primary_dentry),
            InodeKind::File { .. } => Err(FsError::NotADirectory("expected a directory inode")),
        }
    }

    /// This inode's content, or `EISDIR` if it is a directory.
    pub fn as_file(&self) -> Result<&[u8]> {
        match &self.kind {
            InodeKind::File { content, .. } => Ok(content),
            InodeKind::Dir { .. } => Err(FsError::IsADirectory("expected a regular file inode")),
        }
    }

    /// As [`Self::as_file`], mutably.
    pub fn as_file_mut(&mut self) -> Result<&mut Vec<u8>> {
        match &mut self.kind {
            InodeKind::File { content, .. } => Ok(content),
            InodeKind::Dir { .. } => Err(FsError::IsADirectory("expected a regular file inode")),
        }
    }

    /// Hardlink count (always 1 for a directory, which does not support linking).
    pub fn nlink(&self) -> u32 {
        match self.kind {
            InodeKind::File { nlink, .. } => nlink,
            // A directory's nlink is not tracked by the source beyond `.`/`..` bookkeeping, which
            // this crate does not expose; report 1 for "the directory itself exists".
            InodeKind::Dir { .. } => 1,
        }
    }
}

/// Sparse table of inodes, indexed by id. Slots below `max_files` that hold `None` are free.
///
/// Mirrors `inodeTable[MAX_FILES]`'s linear-scan allocator: `allocate` walks from 1 upward (id 0 is
/// never handed out, matching the source reserving it) looking for the first `None` slot.
pub struct InodeTable {
    slots: Vec<Option<Inode>>,
}

impl InodeTable {
    /// Build an empty table with `max_files` slots, all free.
    pub fn new(max_files: u32) -> Self {
        let mut slots = Vec::with_capacity(max_files as usize);
        slots.resize_with(max_files as usize, || None);
        InodeTable { slots }
    }

    /// Find the first free id in `[1, max_files)`, construct an inode there via `build`, and
    /// return its id. Returns `ENOSPC` if the table is full.
    pub fn allocate(&mut self, mode: u32, build: impl FnOnce(u32) -> InodeKind) -> Result<u32> {
        let slot = (1..self.slots.len() as u32).find(|&i| self.slots[i as usize].is_none());
        let id = slot.ok_or(FsError::NoSpace("inode table is full"))?;

        self.slots[id as usize] = Some(Inode {
            id,
            mode,
            kind: build(id),
        });
        trace!("allocated inode {}", id);
        Ok(id)
    }

    /// Insert an inode at a specific id, displacing whatever (if anything) was already there.
    /// Used only by `Fs::init` to relocate the freshly allocated root inode to `ROOT_ID`, mirroring
    /// `YUFSCore_init`'s `inodeTable[1] = NULL; inodeTable[ROOT_INO] = rootInode;` relabeling.
    pub fn relocate(&mut self, from: u32, to: u32) {
        let inode = self.slots[from as usize].take();
        self.slots[to as usize] = inode.map(|mut i| {
            i.id = to;
            i
        });
    }

    /// Look up the inode at `id`, or `ENOENT` if the slot is empty or out of range.
    pub fn get(&self, id: u32) -> Result<&Inode> {
        self.slots
            .get(id as usize)
            .and_then(|s| s.as_ref())
            .ok_or(FsError::NotFound("no such inode id"))
    }

    /// As [`Self::get`], mutably.
    pub fn get_mut(&mut self, id: u32) -> Result<&mut Inode> {
        self.slots
            .get_mut(id as usize)
            .and_then(|s| s.as_mut())
            .ok_or(FsError::NotFound("no such inode id"))
    }

    /// Drop the inode at `id`, matching `freeInode`.
    pub fn free(&mut self, id: u32) {
        debug!("freed inode {}", id);
        self.slots[id as usize] = None;
    }
}
