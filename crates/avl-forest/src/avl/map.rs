use std::fmt::Debug;

use crate::error::KeyError;
use crate::util;

use super::types::AvlNode;
use super::util as avl_util;

fn default_comparator<K: PartialOrd>(a: &K, b: &K) -> i32 {
    if a == b {
        0
    } else if a < b {
        -1
    } else {
        1
    }
}

/// Sorted map backed by an arena-allocated AVL tree.
///
/// Nodes are stored in a `Vec` arena and addressed by `u32` indices, which
/// stay stable for the lifetime of an entry. Slots of removed entries are
/// recycled by later insertions.
pub struct AvlMap<K, V, C = fn(&K, &K) -> i32>
where
    C: Fn(&K, &K) -> i32,
{
    pub root: Option<u32>,
    arena: Vec<AvlNode<K, V>>,
    free: Vec<u32>,
    len: usize,
    comparator: C,
}

impl<K, V> AvlMap<K, V, fn(&K, &K) -> i32>
where
    K: PartialOrd,
{
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<K>)
    }
}

impl<K, V> Default for AvlMap<K, V, fn(&K, &K) -> i32>
where
    K: PartialOrd,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> AvlMap<K, V, C>
where
    C: Fn(&K, &K) -> i32,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            root: None,
            arena: Vec::new(),
            free: Vec::new(),
            len: 0,
            comparator,
        }
    }

    fn alloc(&mut self, k: K, v: V) -> u32 {
        match self.free.pop() {
            Some(i) => {
                self.arena[i as usize] = AvlNode::new(k, v);
                i
            }
            None => {
                self.arena.push(AvlNode::new(k, v));
                (self.arena.len() - 1) as u32
            }
        }
    }

    /// Inserts `key` or overwrites its value when already present.
    ///
    /// An existing key is updated in place: no allocation, no link or
    /// balance change. Returns the entry's arena index.
    pub fn set(&mut self, key: K, value: V) -> u32 {
        let Some(root) = self.root else {
            let n = self.alloc(key, value);
            self.root = Some(n);
            self.len = 1;
            return n;
        };

        let mut curr = root;
        loop {
            let cmp = (self.comparator)(&key, &self.arena[curr as usize].k);
            if cmp == 0 {
                self.arena[curr as usize].v = value;
                return curr;
            }
            let step = if cmp < 0 {
                self.arena[curr as usize].l
            } else {
                self.arena[curr as usize].r
            };
            match step {
                Some(i) => curr = i,
                None => {
                    let n = self.alloc(key, value);
                    self.root = Some(if cmp < 0 {
                        avl_util::insert_left(&mut self.arena, root, n, curr)
                    } else {
                        avl_util::insert_right(&mut self.arena, root, n, curr)
                    });
                    self.len += 1;
                    return n;
                }
            }
        }
    }

    /// Arena index of `key`, if present.
    pub fn find(&self, key: &K) -> Option<u32> {
        util::find(&self.arena, self.root, key, |n| &n.k, |a, b| {
            (self.comparator)(a, b)
        })
    }

    /// Index of `key`, or of the greatest key below it.
    pub fn get_or_next_lower(&self, key: &K) -> Option<u32> {
        util::find_or_next_lower(&self.arena, self.root, key, |n| &n.k, |a, b| {
            (self.comparator)(a, b)
        })
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.find(key).map(|i| &self.arena[i as usize].v)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.find(key).map(move |i| &mut self.arena[i as usize].v)
    }

    /// Like [`get`](Self::get) but the key is required to be present.
    pub fn try_get(&self, key: &K) -> Result<&V, KeyError> {
        self.get(key).ok_or(KeyError)
    }

    /// Like [`get_mut`](Self::get_mut) but the key is required to be present.
    pub fn try_get_mut(&mut self, key: &K) -> Result<&mut V, KeyError> {
        self.get_mut(key).ok_or(KeyError)
    }

    pub fn has(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Removes `key`. Returns `false` when the key was absent, which is a
    /// defined no-op.
    pub fn del(&mut self, key: &K) -> bool {
        let Some(root) = self.root else {
            return false;
        };
        let Some(n) = self.find(key) else {
            return false;
        };
        self.root = avl_util::remove(&mut self.arena, root, n);
        self.free.push(n);
        self.len -= 1;
        true
    }

    pub fn first(&self) -> Option<u32> {
        util::first(&self.arena, self.root)
    }

    pub fn last(&self) -> Option<u32> {
        util::last(&self.arena, self.root)
    }

    pub fn next(&self, curr: u32) -> Option<u32> {
        util::next(&self.arena, curr)
    }

    pub fn key(&self, idx: u32) -> &K {
        &self.arena[idx as usize].k
    }

    pub fn value(&self, idx: u32) -> &V {
        &self.arena[idx as usize].v
    }

    pub fn value_mut_by_index(&mut self, idx: u32) -> &mut V {
        &mut self.arena[idx as usize].v
    }

    /// Read-only view of the backing arena. Indices returned by `set`,
    /// `find`, and the iterators address this slice.
    pub fn arena(&self) -> &[AvlNode<K, V>] {
        &self.arena
    }

    pub fn for_each<G: FnMut(u32, &K, &V)>(&self, mut f: G) {
        let mut curr = self.first();
        while let Some(i) = curr {
            let n = &self.arena[i as usize];
            f(i, &n.k, &n.v);
            curr = util::next(&self.arena, i);
        }
    }

    /// Closure-style iterator: each call yields the next entry index.
    pub fn iterator0(&self) -> impl FnMut() -> Option<u32> + '_ {
        let mut curr = self.first();
        move || {
            let out = curr;
            if let Some(i) = curr {
                curr = util::next(&self.arena, i);
            }
            out
        }
    }

    pub fn iterator(&self) -> impl Iterator<Item = u32> + '_ {
        let mut curr = self.first();
        std::iter::from_fn(move || {
            let out = curr;
            if let Some(i) = curr {
                curr = util::next(&self.arena, i);
            }
            out
        })
    }

    pub fn entries(&self) -> impl Iterator<Item = u32> + '_ {
        self.iterator()
    }

    pub fn size(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.free.clear();
        self.root = None;
        self.len = 0;
    }

    /// Height of the tree in nodes, 0 when empty.
    pub fn height(&self) -> usize {
        self.root
            .map_or(0, |r| avl_util::tree_height(&self.arena, r))
    }

    /// Validates every structural invariant plus the recorded length.
    pub fn assert_valid(&self) -> Result<(), String> {
        avl_util::assert_avl_tree(&self.arena, self.root, &|a, b| (self.comparator)(a, b))?;
        let counted = util::size(&self.arena, self.root);
        if counted != self.len {
            return Err(format!(
                "Size mismatch: counted {counted}, recorded {}",
                self.len
            ));
        }
        Ok(())
    }

    /// Debug dump of the tree shape with balance factors.
    pub fn to_string(&self, tab: &str) -> String
    where
        K: Debug,
        V: Debug,
    {
        match self.root {
            Some(_) => format!(
                "AvlMap\n{tab}{}",
                avl_util::print(&self.arena, self.root, tab)
            ),
            None => "AvlMap ∅".to_string(),
        }
    }
}
