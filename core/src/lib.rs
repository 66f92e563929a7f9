//! In-memory POSIX-shaped filesystem namespace engine.
//!
//! [`Fs`] owns an inode table and a dentry tree and exposes the same operation surface a real
//! filesystem core hands a VFS layer: `lookup`/`create`/`mkdir`/`link`/`unlink`/`rmdir`/`getattr`/
//! `read`/`write`/`iterate`. It holds no file descriptors, no disk, and no threads of its own —
//! just the namespace.

#![deny(missing_docs)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod content;
pub mod dentry;
pub mod error;
pub mod host;
pub mod ids;
pub mod inode;
pub mod iter;
pub mod namespace;
pub mod remote;

pub use config::FsConfig;
pub use error::{FsError, Result};
pub use iter::DirEntry;
pub use namespace::{Fs, Stat};
