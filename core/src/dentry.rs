//! The dentry tree: a dense arena of directory entries addressed by index, per design note §9.
//!
//! Every pointer the source (`struct YUFS_Dirent`) holds as a raw `struct YUFS_Dirent*` — `parent`,
//! `first_child`, `next_sibling`, `prev_sibling` — becomes a [`DentryIdx`] here. Indices sidestep the
//! cyclic ownership the root's self-parent and every child's parent back-link would otherwise create
//! under a plain owning-pointer model.

use log::trace;

/// Index into a [`DentryArena`]. Stable across insertions and removals of *other* entries; an
/// index is invalidated only when its own slot is freed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DentryIdx(usize);

/// A single directory entry: a name bound to an inode id, plus its position in the tree.
#[derive(Debug, Clone)]
pub struct Dentry {
    /// The entry's name within its parent directory.
    pub name: String,
    /// Id of the inode this entry names.
    pub inode_id: u32,
    /// Arena index of this dentry's parent (the root is its own parent).
    pub parent: DentryIdx,
    /// First child, if this dentry is itself a directory's anchor.
    pub first_child: Option<DentryIdx>,
    /// Next sibling in the parent's child list.
    pub next_sibling: Option<DentryIdx>,
    /// Previous sibling in the parent's child list.
    pub prev_sibling: Option<DentryIdx>,
}

enum Slot {
    Occupied(Dentry),
    Free,
}

/// Arena owning every [`Dentry`] in the tree, with a free list so removed slots are reused instead
/// of leaking arena space across a long-lived filesystem's lifetime.
#[derive(Default)]
pub struct DentryArena {
    slots: Vec<Slot>,
    free_list: Vec<usize>,
}

impl DentryArena {
    /// Build an empty arena.
    pub fn new() -> Self {
        DentryArena {
            slots: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Insert a new, unattached dentry (its `parent` is set to itself; callers attach it via
    /// [`Self::attach`] immediately after). Returns the arena index it was placed at.
    fn insert(&mut self, name: String, inode_id: u32) -> DentryIdx {
        let dentry = Dentry {
            name,
            inode_id,
            parent: DentryIdx(0), // patched by the caller (attach, or the root's self-parent)
            first_child: None,
            next_sibling: None,
            prev_sibling: None,
        };

        if let Some(idx) = self.free_list.pop() {
            self.slots[idx] = Slot::Occupied(dentry);
            DentryIdx(idx)
        } else {
            self.slots.push(Slot::Occupied(dentry));
            DentryIdx(self.slots.len() - 1)
        }
    }

    /// Allocate the root dentry, whose `parent` is itself, per spec §3 ("the root's `parent` is
    /// itself").
    pub fn insert_root(&mut self) -> DentryIdx {
        let idx = self.insert(String::new(), 0);
        self.get_mut(idx).parent = idx;
        idx
    }

    /// Allocate a new, detached dentry for `name`/`inode_id` and attach it at the head of
    /// `parent`'s child list, matching `attach_dentry`'s LIFO insertion.
    pub fn create_attached(&mut self, parent: DentryIdx, name: String, inode_id: u32) -> DentryIdx {
        let child = self.insert(name, inode_id);
        self.attach(parent, child);
        child
    }

    fn attach(&mut self, parent: DentryIdx, child: DentryIdx) {
        let old_head = self.get(parent).first_child;

        {
            let child_slot = self.get_mut(child);
            child_slot.parent = parent;
            child_slot.next_sibling = old_head;
            child_slot.prev_sibling = None;
        }
        if let Some(old_head) = old_head {
            self.get_mut(old_head).prev_sibling = Some(child);
        }
        self.get_mut(parent).first_child = Some(child);
        trace!("attached dentry {:?} under {:?}", child, parent);
    }

    /// Splice `child` out of its parent's sibling list and free its slot.
    pub fn detach(&mut self, child: DentryIdx) {
        let (parent, prev, next) = {
            let d = self.get(child);
            (d.parent, d.prev_sibling, d.next_sibling)
        };

        match prev {
            Some(prev) => self.get_mut(prev).next_sibling = next,
            None => self.get_mut(parent).first_child = next,
        }
        if let Some(next) = next {
            self.get_mut(next).prev_sibling = prev;
        }

        self.slots[child.0] = Slot::Free;
        self.free_list.push(child.0);
        trace!("detached dentry {:?}", child);
    }

    /// Linear scan of `dir`'s children for an entry named `name`, comparing bytes exactly.
    pub fn find_child(&self, dir: DentryIdx, name: &str) -> Option<DentryIdx> {
        let mut cur = self.get(dir).first_child;
        // Bound the walk defensively; a well-formed tree never needs more steps than there are
        // slots in the arena.
        let mut steps = 0usize;
        while let Some(idx) = cur {
            if steps > self.slots.len() {
                return None;
            }
            let d = self.get(idx);
            if d.name == name {
                return Some(idx);
            }
            cur = d.next_sibling;
            steps += 1;
        }
        None
    }

    /// Overwrite `idx`'s `inode_id` in place, without touching its position in the tree. Used when
    /// a dentry must be attached before the inode it names has an id (directories: the dentry
    /// needs to exist to hand its index to the new inode, but the inode doesn't exist yet to hand
    /// its id to the dentry).
    pub fn set_inode_id(&mut self, idx: DentryIdx, inode_id: u32) {
        self.get_mut(idx).inode_id = inode_id;
    }

    pub fn get(&self, idx: DentryIdx) -> &Dentry {
        match &self.slots[idx.0] {
            Slot::Occupied(d) => d,
            Slot::Free => panic!("use of a freed dentry index {:?}", idx),
        }
    }

    fn get_mut(&mut self, idx: DentryIdx) -> &mut Dentry {
        match &mut self.slots[idx.0] {
            Slot::Occupied(d) => d,
            Slot::Free => panic!("use of a freed dentry index {:?}", idx),
        }
    }

    /// Iterate `dir`'s children in current sibling-list order, bounding the walk at `limit` steps
    /// and reporting `None` if that bound is exceeded (a circular sibling list, per spec §4.F's
    /// corruption guard).
    pub fn children(&self, dir: DentryIdx, limit: usize) -> Option<Vec<DentryIdx>> {
        let mut out = Vec::new();
        let mut cur = self.get(dir).first_child;
        while let Some(idx) = cur {
            if out.len() >= limit {
                return None;
            }
            out.push(idx);
            cur = self.get(idx).next_sibling;
        }
        Some(out)
    }
}
