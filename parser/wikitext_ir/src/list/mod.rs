//! Ordered list storage with live bounded views.
//!
//! `ViewList` is the container every node child sequence in the syntax
//! tree is built from. A root list linearly owns its elements; `view`
//! hands out a bounded window over the *same* storage. Windows are live:
//! a structural edit anywhere in the hierarchy (through the root or
//! through any view) shifts every affected window's bounds so that
//! independently-held views stay consistent.
//!
//! # Ownership
//!
//! The root handle owns the element storage (`Rc<RefCell<Core>>`). A view
//! holds only a `Weak` back-reference plus a slot id in the core's bounds
//! registry, so a view never extends its root's lifetime and never copies
//! elements. Once the last root handle is dropped, every operation on an
//! outstanding view fails with [`ListError::DeadView`].
//!
//! # Bound propagation
//!
//! For a mutation of net size `k` at absolute index `p`, each registered
//! window `[start, end)` is adjusted as:
//!
//! - `start >= p`: shift both bounds by `k`
//! - `start < p <= end` (inserts) / `start < p < end` (removals):
//!   shift `end` by `k`
//! - otherwise: unaffected
//!
//! Inserts at `p == end` extend the window (appending through a view
//! keeps the new element visible); removing the element at `end` does
//! not touch the window, because that element lies outside `[start,
//! end)`. Deletions clamp bounds into `[0, new_len]`. Views of views
//! register absolute bounds on the same core, so propagation is
//! transitive.
//!
//! # Concurrency
//!
//! Single writer, single thread. `Rc`/`RefCell` by design; a host that
//! needs sharing across threads must serialize access externally.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use rustc_hash::FxHashMap;

use crate::error::ListError;


/// Absolute bounds of one issued view, `start <= end`.
#[derive(Clone, Copy, Debug)]
struct Bounds {
    start: usize,
    end: usize,
}

/// Shared storage: the elements plus the bounds registry for every view
/// issued over them. Slot ids are never reused, so a stale handle can
/// never observe another view's bounds.
struct Core<T> {
    elems: Vec<T>,
    slots: FxHashMap<u32, Bounds>,
    next_slot: u32,
}

impl<T> Core<T> {
    fn register(&mut self, bounds: Bounds) -> u32 {
        let id = self.next_slot;
        self.next_slot += 1;
        self.slots.insert(id, bounds);
        id
    }

    /// Apply the propagation rule for a single-element insert at `p`.
    fn adjust_for_insert(&mut self, p: usize) {
        for b in self.slots.values_mut() {
            if b.start >= p {
                b.start += 1;
                b.end += 1;
            } else if p <= b.end {
                b.end += 1;
            }
        }
    }

    /// Apply the propagation rule for a single-element removal at `p`,
    /// clamping every window into `[0, new_len]`.
    ///
    /// Unlike inserts, the middle branch is strict: the element at
    /// index `end` lies outside `[start, end)`, so removing it must
    /// leave the window untouched.
    fn adjust_for_remove(&mut self, p: usize) {
        let new_len = self.elems.len();
        for b in self.slots.values_mut() {
            if b.start >= p {
                b.start = b.start.saturating_sub(1);
                b.end = b.end.saturating_sub(1);
            } else if p < b.end {
                b.end -= 1;
            }
            b.start = b.start.min(new_len);
            b.end = b.end.min(new_len);
        }
    }
}

enum Handle<T> {
    /// Owns the storage.
    Root(Rc<RefCell<Core<T>>>),
    /// Non-owning window; `slot` indexes the core's bounds registry.
    View {
        core: Weak<RefCell<Core<T>>>,
        slot: u32,
    },
}

/// Ordered sequence container whose sub-range views stay consistent
/// across structural edits anywhere in the same storage hierarchy.
///
/// Cloning a root yields a second handle to the same storage; cloning a
/// view registers a fresh window with the same bounds. Neither copies
/// elements.
pub struct ViewList<T> {
    handle: Handle<T>,
}

impl<T> ViewList<T> {
    /// Create an empty root list.
    pub fn new() -> Self {
        Self::from_vec(Vec::new())
    }

    /// Create a root list owning `elems`.
    pub fn from_vec(elems: Vec<T>) -> Self {
        ViewList {
            handle: Handle::Root(Rc::new(RefCell::new(Core {
                elems,
                slots: FxHashMap::default(),
                next_slot: 0,
            }))),
        }
    }

    fn core(&self) -> Result<Rc<RefCell<Core<T>>>, ListError> {
        match &self.handle {
            Handle::Root(rc) => Ok(Rc::clone(rc)),
            Handle::View { core, .. } => core.upgrade().ok_or(ListError::DeadView),
        }
    }

    fn window(&self, core: &Core<T>) -> Result<Bounds, ListError> {
        match &self.handle {
            Handle::Root(_) => Ok(Bounds {
                start: 0,
                end: core.elems.len(),
            }),
            Handle::View { slot, .. } => {
                core.slots.get(slot).copied().ok_or(ListError::DeadView)
            }
        }
    }

    /// Number of elements visible through this handle.
    pub fn len(&self) -> Result<usize, ListError> {
        let core = self.core()?;
        let core = core.borrow();
        let w = self.window(&core)?;
        Ok(w.end - w.start)
    }

    /// Whether no elements are visible through this handle.
    pub fn is_empty(&self) -> Result<bool, ListError> {
        Ok(self.len()? == 0)
    }

    /// Insert `value` at `index` (relative to this handle's window).
    ///
    /// Fails with [`ListError::Index`] unless `index <= len()`, and with
    /// [`ListError::DeadView`] if the root storage is gone.
    pub fn insert(&self, index: usize, value: T) -> Result<(), ListError> {
        let core = self.core()?;
        let mut core = core.borrow_mut();
        let w = self.window(&core)?;
        let window_len = w.end - w.start;
        if index > window_len {
            return Err(ListError::Index {
                index,
                len: window_len,
            });
        }
        let p = w.start + index;
        core.elems.insert(p, value);
        core.adjust_for_insert(p);
        Ok(())
    }

    /// Append `value` after the last visible element.
    pub fn append(&self, value: T) -> Result<(), ListError> {
        self.insert(self.len()?, value)
    }

    /// Remove and return the element at `index`.
    pub fn remove(&self, index: usize) -> Result<T, ListError> {
        let core = self.core()?;
        let mut core = core.borrow_mut();
        let w = self.window(&core)?;
        let window_len = w.end - w.start;
        if index >= window_len {
            return Err(ListError::Index {
                index,
                len: window_len,
            });
        }
        let p = w.start + index;
        let removed = core.elems.remove(p);
        core.adjust_for_remove(p);
        Ok(removed)
    }

    /// Replace the element at `index`, returning the old value.
    ///
    /// Not a structural edit: no window bounds move.
    pub fn replace(&self, index: usize, value: T) -> Result<T, ListError> {
        let core = self.core()?;
        let mut core = core.borrow_mut();
        let w = self.window(&core)?;
        let window_len = w.end - w.start;
        if index >= window_len {
            return Err(ListError::Index {
                index,
                len: window_len,
            });
        }
        let p = w.start + index;
        Ok(std::mem::replace(&mut core.elems[p], value))
    }

    /// Spawn a bounded live window over `[start, end)` of this handle.
    ///
    /// Fails with [`ListError::Range`] unless
    /// `start <= end <= len()` at call time. The returned handle shares
    /// storage with (and is ultimately rooted at) this list.
    pub fn view(&self, start: usize, end: usize) -> Result<ViewList<T>, ListError> {
        let core = self.core()?;
        let mut core_ref = core.borrow_mut();
        let w = self.window(&core_ref)?;
        let window_len = w.end - w.start;
        if start > end || end > window_len {
            return Err(ListError::Range {
                start,
                end,
                len: window_len,
            });
        }
        let slot = core_ref.register(Bounds {
            start: w.start + start,
            end: w.start + end,
        });
        drop(core_ref);
        Ok(ViewList {
            handle: Handle::View {
                core: Rc::downgrade(&core),
                slot,
            },
        })
    }
}

impl<T: Clone> ViewList<T> {
    /// Clone out the element at `index`.
    pub fn get(&self, index: usize) -> Result<T, ListError> {
        let core = self.core()?;
        let core = core.borrow();
        let w = self.window(&core)?;
        let window_len = w.end - w.start;
        if index >= window_len {
            return Err(ListError::Index {
                index,
                len: window_len,
            });
        }
        Ok(core.elems[w.start + index].clone())
    }

    /// Snapshot the visible elements.
    pub fn to_vec(&self) -> Result<Vec<T>, ListError> {
        let core = self.core()?;
        let core = core.borrow();
        let w = self.window(&core)?;
        Ok(core.elems[w.start..w.end].to_vec())
    }
}

impl<T> Default for ViewList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for ViewList<T> {
    fn clone(&self) -> Self {
        match &self.handle {
            Handle::Root(rc) => ViewList {
                handle: Handle::Root(Rc::clone(rc)),
            },
            Handle::View { core, slot } => {
                if let Some(rc) = core.upgrade() {
                    let mut c = rc.borrow_mut();
                    if let Some(bounds) = c.slots.get(slot).copied() {
                        let id = c.register(bounds);
                        drop(c);
                        return ViewList {
                            handle: Handle::View {
                                core: Rc::downgrade(&rc),
                                slot: id,
                            },
                        };
                    }
                }
                // Root already gone: the clone is as dead as the original.
                ViewList {
                    handle: Handle::View {
                        core: Weak::clone(core),
                        slot: *slot,
                    },
                }
            }
        }
    }
}

impl<T> Drop for ViewList<T> {
    fn drop(&mut self) {
        if let Handle::View { core, slot } = &self.handle {
            if let Some(rc) = core.upgrade() {
                // try_borrow: never panic in a drop path.
                if let Ok(mut c) = rc.try_borrow_mut() {
                    c.slots.remove(slot);
                }
            }
        }
    }
}

/// Deep value comparison of the visible elements. Two handles over
/// distinct storage compare equal when their windows hold equal values;
/// a dead view compares equal to nothing.
impl<T: Clone + PartialEq> PartialEq for ViewList<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self.to_vec(), other.to_vec()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for ViewList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_vec() {
            Ok(elems) => f.debug_list().entries(elems.iter()).finish(),
            Err(_) => write!(f, "ViewList(<dead view>)"),
        }
    }
}
