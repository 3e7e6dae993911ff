//! Binary-search-tree utility functions over arena-indexed nodes.
//!
//! All helpers are free functions taking the arena as a slice plus a node
//! index. Key-based helpers (`find`, `find_or_next_lower`) accept a
//! `key_of` accessor closure so callers can use any arena-backed node
//! layout.

pub mod swap;

use crate::types::Node;

pub use swap::swap;

#[inline]
pub(crate) fn get_p<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].p()
}

#[inline]
pub(crate) fn get_l<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].l()
}

#[inline]
pub(crate) fn get_r<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].r()
}

#[inline]
pub(crate) fn set_p<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_p(v);
}

#[inline]
pub(crate) fn set_l<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_l(v);
}

#[inline]
pub(crate) fn set_r<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_r(v);
}

/// Leftmost node in the tree.
pub fn first<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root;
    while let Some(idx) = curr {
        match get_l(arena, idx) {
            Some(l) => curr = Some(l),
            None => return Some(idx),
        }
    }
    curr
}

/// Rightmost node in the tree.
pub fn last<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root;
    while let Some(idx) = curr {
        match get_r(arena, idx) {
            Some(r) => curr = Some(r),
            None => return Some(idx),
        }
    }
    curr
}

/// In-order successor.
pub fn next<N: Node>(arena: &[N], mut curr: u32) -> Option<u32> {
    if let Some(r) = get_r(arena, curr) {
        let mut c = r;
        while let Some(l) = get_l(arena, c) {
            c = l;
        }
        return Some(c);
    }
    let mut p = get_p(arena, curr);
    while let Some(pi) = p {
        if get_r(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

/// In-order predecessor.
pub fn prev<N: Node>(arena: &[N], mut curr: u32) -> Option<u32> {
    if let Some(l) = get_l(arena, curr) {
        let mut c = l;
        while let Some(r) = get_r(arena, c) {
            c = r;
        }
        return Some(c);
    }
    let mut p = get_p(arena, curr);
    while let Some(pi) = p {
        if get_l(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

fn size_inner<N: Node>(arena: &[N], root: u32) -> usize {
    1 + get_l(arena, root).map_or(0, |l| size_inner(arena, l))
        + get_r(arena, root).map_or(0, |r| size_inner(arena, r))
}

/// Number of nodes under `root`.
pub fn size<N: Node>(arena: &[N], root: Option<u32>) -> usize {
    root.map_or(0, |r| size_inner(arena, r))
}

/// Finds a node by key.
pub fn find<N, K, F, C>(
    arena: &[N],
    root: Option<u32>,
    key: &K,
    key_of: F,
    comparator: C,
) -> Option<u32>
where
    N: Node,
    F: Fn(&N) -> &K,
    C: Fn(&K, &K) -> i32,
{
    let mut curr = root;
    while let Some(i) = curr {
        let cmp = comparator(key, key_of(&arena[i as usize]));
        if cmp == 0 {
            return Some(i);
        }
        curr = if cmp < 0 {
            get_l(arena, i)
        } else {
            get_r(arena, i)
        };
    }
    None
}

/// Finds node by key, or the next lower node if the exact key does not exist.
pub fn find_or_next_lower<N, K, F, C>(
    arena: &[N],
    root: Option<u32>,
    key: &K,
    key_of: F,
    comparator: C,
) -> Option<u32>
where
    N: Node,
    F: Fn(&N) -> &K,
    C: Fn(&K, &K) -> i32,
{
    let mut curr = root;
    let mut result: Option<u32> = None;
    while let Some(i) = curr {
        let cmp = comparator(key_of(&arena[i as usize]), key);
        if cmp == 0 {
            return Some(i);
        }
        if cmp > 0 {
            curr = get_l(arena, i);
        } else {
            result = Some(i);
            curr = get_r(arena, i);
        }
    }
    result
}
