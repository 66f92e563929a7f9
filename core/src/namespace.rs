//! The namespace engine: composes the inode table, dentry arena and content buffer into the
//! public operation surface (`init`/`lookup`/`create`/`mkdir`/`link`/`unlink`/`rmdir`/`getattr`/
//! `read`/`write`/`iterate`/`destroy`).
//!
//! Grounded function-by-function on `yufs_core.c`'s `YUFSCore_*` entry points; the thin
//! one-call-delegates-to-the-layer-below shape follows `solution/src/c_dirs_support.rs`'s
//! `DirLayerFS`, collapsed here to a single layer since there is only one.

use log::{debug, trace};

use crate::config::FsConfig;
use crate::content;
use crate::dentry::{DentryArena, DentryIdx};
use crate::error::{FsError, Result};
use crate::ids::{self, MAX_NAME_SIZE};
use crate::inode::{InodeKind, InodeTable};
use crate::iter::{self, DirEntry};

/// Attributes reported by [`Fs::getattr`]: the id/mode/size triple of `struct YUFS_stat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stat {
    /// The inode's id.
    pub id: u32,
    /// Full mode word, type bits plus permission bits.
    pub mode: u32,
    /// Logical size in bytes (0 for a directory).
    pub size: u64,
}

/// The namespace engine: one inode table, one dentry arena, plus the configuration it was built
/// with. Deliberately `!Sync`; a host embedding this across threads serializes access itself (e.g.
/// `Mutex<Fs>`), per spec §5's single-threaded concurrency model.
pub struct Fs {
    config: FsConfig,
    inodes: InodeTable,
    dentries: DentryArena,
}

fn check_name(name: &str) -> Result<()> {
    if name.is_empty() || name.len() >= MAX_NAME_SIZE {
        return Err(FsError::InvalidArgument("name is empty or exceeds MAX_NAME_SIZE"));
    }
    Ok(())
}

impl Fs {
    /// Build a filesystem with the default configuration (`MAX_FILES`/`ROOT_ID`), matching
    /// `YUFSCore_init()` with no arguments.
    pub fn init() -> Result<Self> {
        Self::init_with_config(FsConfig::default())
    }

    /// Build a filesystem with an explicit [`FsConfig`], e.g. a small `max_files` in tests that
    /// want to exercise `ENOSPC` without allocating a thousand entries.
    pub fn init_with_config(config: FsConfig) -> Result<Self> {
        let mut inodes = InodeTable::new(config.max_files);
        let mut dentries = DentryArena::new();

        // Allocate the root through the normal path, landing at whatever id the table hands
        // back, then relocate it to `root_id`. Mirrors YUFSCore_init's
        // `if (inodeTable[1]) { inodeTable[1] = NULL; inodeTable[ROOT_INO] = rootInode; }`.
        let root_dentry = dentries.insert_root();
        let provisional = inodes.allocate(0o777, |_| InodeKind::Dir {
            primary_dentry: root_dentry,
        })?;
        inodes.relocate(provisional, config.root_id);
        dentries.set_inode_id(root_dentry, config.root_id);

        debug!(
            "filesystem initialized: max_files={} root_id={}",
            config.max_files, config.root_id
        );
        Ok(Fs {
            config,
            inodes,
            dentries,
        })
    }

    /// Tear down the filesystem, matching `YUFSCore_destroy()`. There is nothing external to
    /// release (no file descriptors, no mmap'd region); dropping `self` is sufficient, but this is
    /// kept as an explicit method so callers mirror the source's lifecycle symmetrically.
    pub fn destroy(self) {
        debug!("filesystem destroyed");
    }

    /// Id of the root directory, per this filesystem's [`FsConfig`].
    pub fn root_id(&self) -> u32 {
        self.config.root_id
    }

    fn dentry_of(&self, inode_id: u32) -> Result<DentryIdx> {
        self.inodes.get(inode_id)?.as_dir()
    }

    /// Resolve `name` within the directory `parent`, returning the child's inode id.
    pub fn lookup(&self, parent: u32, name: &str) -> Result<u32> {
        let dir = self.dentry_of(parent)?;
        let child = self
            .dentries
            .find_child(dir, name)
            .ok_or(FsError::NotFound("no entry with that name"))?;
        Ok(self.dentries.get(child).inode_id)
    }

    /// Create an entry named `name` under `parent` with the given `mode`: a directory if
    /// `mode`'s `IFDIR` bit is set, a regular file otherwise. Matches `YUFSCore_create` branching
    /// on `S_ISDIR(mode)`. Returns the new inode's id.
    pub fn create(&mut self, parent: u32, name: &str, mode: u32) -> Result<u32> {
        check_name(name)?;
        let dir = self.dentry_of(parent)?;
        if self.dentries.find_child(dir, name).is_some() {
            return Err(FsError::InvalidArgument("an entry with that name already exists"));
        }

        if ids::is_dir(mode) {
            // Allocate the inode first with a placeholder dentry slot, then fix it up, since the
            // child dentry needs to exist to be attached but the inode needs a dentry index to be
            // constructed. Roll the inode back out if the dentry side cannot be completed.
            let placeholder = self.dentries.create_attached(dir, name.to_string(), 0);
            let id = match self.inodes.allocate(mode, |_| InodeKind::Dir {
                primary_dentry: placeholder,
            }) {
                Ok(id) => id,
                Err(e) => {
                    self.dentries.detach(placeholder);
                    return Err(e);
                }
            };

            // The new dentry's `inode_id` field was a placeholder (0); patch it in now that the
            // real id is known.
            self.dentries.set_inode_id(placeholder, id);
            trace!("created directory {:?} (inode {}) under parent {}", name, id, parent);
            Ok(id)
        } else {
            let id = self.inodes.allocate(mode, |_| InodeKind::File {
                content: Vec::new(),
                nlink: 1,
            })?;
            self.dentries.create_attached(dir, name.to_string(), id);
            trace!("created file {:?} (inode {}) under parent {}", name, id, parent);
            Ok(id)
        }
    }

    /// Create a subdirectory named `name` under `parent`, returning its new inode id. Equivalent
    /// to `create(parent, name, mode | IFDIR)`.
    pub fn mkdir(&mut self, parent: u32, name: &str, mode: u32) -> Result<u32> {
        self.create(parent, name, mode | ids::S_IFDIR)
    }

    /// Create a hardlink named `name` under `parent`, pointing at the existing regular file
    /// `target`. Rejects directory targets with `EINVAL`, matching `YUFSCore_link`.
    pub fn link(&mut self, target: u32, parent: u32, name: &str) -> Result<()> {
        check_name(name)?;
        let dir = self.dentry_of(parent)?;
        if self.dentries.find_child(dir, name).is_some() {
            return Err(FsError::InvalidArgument("an entry with that name already exists"));
        }

        let target_inode = self.inodes.get_mut(target)?;
        match &mut target_inode.kind {
            InodeKind::Dir { .. } => {
                return Err(FsError::InvalidArgument("cannot hardlink a directory"));
            }
            InodeKind::File { nlink, .. } => *nlink += 1,
        }

        self.dentries.create_attached(dir, name.to_string(), target);
        trace!("linked {:?} under parent {} to inode {}", name, parent, target);
        Ok(())
    }

    /// Remove the regular-file entry `name` from `parent`, decrementing its target's nlink and
    /// freeing the inode once nlink reaches zero. Matches `YUFSCore_unlink`.
    pub fn unlink(&mut self, parent: u32, name: &str) -> Result<()> {
        let dir = self.dentry_of(parent)?;
        let child = self
            .dentries
            .find_child(dir, name)
            .ok_or(FsError::NotFound("no entry with that name"))?;
        let target = self.dentries.get(child).inode_id;

        if matches!(self.inodes.get(target)?.kind, InodeKind::Dir { .. }) {
            return Err(FsError::IsADirectory("unlink does not remove directories"));
        }

        self.dentries.detach(child);

        let inode = self.inodes.get_mut(target)?;
        let nlink = match &mut inode.kind {
            InodeKind::File { nlink, .. } => {
                *nlink -= 1;
                *nlink
            }
            InodeKind::Dir { .. } => unreachable!("checked above"),
        };
        if nlink == 0 {
            self.inodes.free(target);
        }
        Ok(())
    }

    /// Remove the empty subdirectory `name` from `parent`. Matches `YUFSCore_rmdir`: `ENOTEMPTY`
    /// if it still has children.
    pub fn rmdir(&mut self, parent: u32, name: &str) -> Result<()> {
        let dir = self.dentry_of(parent)?;
        let child = self
            .dentries
            .find_child(dir, name)
            .ok_or(FsError::NotFound("no entry with that name"))?;
        let target = self.dentries.get(child).inode_id;

        let target_dentry = self.inodes.get(target)?.as_dir()?;
        if self.dentries.get(target_dentry).first_child.is_some() {
            return Err(FsError::NotEmpty);
        }

        self.dentries.detach(child);
        self.inodes.free(target);
        Ok(())
    }

    /// Report `id`'s id/mode/size, matching `YUFSCore_getattr`.
    pub fn getattr(&self, id: u32) -> Result<Stat> {
        let inode = self.inodes.get(id)?;
        Ok(Stat {
            id: inode.id,
            mode: inode.full_mode(),
            size: inode.size(),
        })
    }

    /// Read up to `buf.len()` bytes from regular file `id` starting at `offset`. Matches
    /// `YUFSCore_read`.
    pub fn read(&self, id: u32, buf: &mut [u8], offset: u64) -> Result<usize> {
        let inode = self.inodes.get(id)?;
        let data = inode.as_file()?;
        Ok(content::read_at(data, inode.size(), buf, offset))
    }

    /// Write `buf` into regular file `id` at `offset`, growing and zero-filling as needed. Matches
    /// `YUFSCore_write`.
    pub fn write(&mut self, id: u32, buf: &[u8], offset: u64) -> Result<usize> {
        let inode = self.inodes.get_mut(id)?;
        let data = inode.as_file_mut()?;
        content::write_at(data, buf, offset)
    }

    /// Walk directory `id`'s entries starting at `start_offset`, invoking `visit` per entry until
    /// it returns `false` or entries are exhausted. Matches `YUFSCore_iterate`.
    pub fn iterate(
        &self,
        id: u32,
        start_offset: u64,
        visit: impl FnMut(&DirEntry) -> bool,
    ) -> Result<()> {
        let inode = self.inodes.get(id)?;
        let dir = inode.as_dir()?;
        let parent_id = self.dentries.get(dir).parent;
        let parent_inode_id = self.dentries.get(parent_id).inode_id;

        iter::iterate(
            &self.dentries,
            dir,
            id,
            parent_inode_id,
            self.config.max_files as usize,
            start_offset,
            visit,
        )?;
        Ok(())
    }
}

/// Classify `mode`'s type bits, used by callers that need to distinguish directories from regular
/// files without going through [`Fs::getattr`] (kept alongside the engine since it operates on the
/// same mode words [`Stat::mode`] reports).
pub fn is_dir(mode: u32) -> bool {
    ids::is_dir(mode)
}
