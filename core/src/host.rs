//! Pure helpers for a host-side adapter (e.g. a FUSE filesystem or a kernel VFS glue module).
//!
//! The adapter itself — the syscall dispatch, the `dir_context`/`dir_emit` bridging, the
//! `copy_to_user`/`copy_from_user` plumbing `yufs_module.c` does around [`crate::Fs::read`] and
//! [`crate::Fs::write`] — is explicitly out of scope (see spec §1's external collaborators). What
//! *is* in scope is the one piece of that glue with no host dependency at all: translating a mode
//! word into the directory-entry type tag a readdir callback reports, matching
//! `yufs_mode_to_dt`/`yufs_filldir_callback`.

use crate::ids;

/// Directory entry type reported to a readdir-style callback, mirroring the subset of POSIX
/// `DT_*`/`fuser::FileType` values this filesystem can produce (it has no symlinks, devices, or
/// sockets).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirentType {
    /// The entry names a directory (`DT_DIR`).
    Directory,
    /// The entry names a regular file (`DT_REG`).
    RegularFile,
}

/// Classify `mode`'s type bits into a [`DirentType`], matching `yufs_mode_to_dt`'s
/// `S_ISDIR(mode) ? DT_DIR : DT_REG`. Returns `None` for a mode with neither bit set, which should
/// not occur for an inode this filesystem produced.
pub fn mode_to_dirent_type(mode: u32) -> Option<DirentType> {
    if ids::is_dir(mode) {
        Some(DirentType::Directory)
    } else if ids::is_reg(mode) {
        Some(DirentType::RegularFile)
    } else {
        None
    }
}
