use std::fmt::Debug;

use crate::types::KvNode;
use crate::util::{first, next};

use super::types::AvlNodeLike;

#[inline]
fn set_p<K, V, N>(arena: &mut [N], i: u32, v: Option<u32>)
where
    N: AvlNodeLike<K, V>,
{
    arena[i as usize].set_p(v);
}

#[inline]
fn set_l<K, V, N>(arena: &mut [N], i: u32, v: Option<u32>)
where
    N: AvlNodeLike<K, V>,
{
    arena[i as usize].set_l(v);
}

#[inline]
fn set_r<K, V, N>(arena: &mut [N], i: u32, v: Option<u32>)
where
    N: AvlNodeLike<K, V>,
{
    arena[i as usize].set_r(v);
}

#[inline]
fn bf<K, V, N>(arena: &[N], i: u32) -> i8
where
    N: AvlNodeLike<K, V>,
{
    arena[i as usize].bf()
}

#[inline]
fn set_bf<K, V, N>(arena: &mut [N], i: u32, v: i8)
where
    N: AvlNodeLike<K, V>,
{
    arena[i as usize].set_bf(v);
}

/// Promotes the right child of `n` over `n`. Returns the promoted child.
///
/// Balance factors of the two participants are updated for the single
/// rotation cases: a promoted child at balance 0 leaves the pair at
/// `+1` / `-1`, any other prior balance zeroes both. Double rotations
/// overwrite these afterwards from their own tables.
pub fn rotate_left<K, V, N>(arena: &mut [N], n: u32) -> u32
where
    N: AvlNodeLike<K, V>,
{
    let p = arena[n as usize].p();
    let c = arena[n as usize].r().expect("rotation pivot has right child");
    let cl = arena[c as usize].l();

    set_p(arena, c, p);
    set_l(arena, c, Some(n));
    set_p(arena, n, Some(c));
    set_r(arena, n, cl);
    if let Some(cl) = cl {
        set_p(arena, cl, Some(n));
    }
    if let Some(p) = p {
        if arena[p as usize].l() == Some(n) {
            set_l(arena, p, Some(c));
        } else {
            set_r(arena, p, Some(c));
        }
    }

    if bf(arena, c) == 0 {
        set_bf(arena, n, 1);
        set_bf(arena, c, -1);
    } else {
        set_bf(arena, n, 0);
        set_bf(arena, c, 0);
    }

    c
}

/// Promotes the left child of `n` over `n`. Returns the promoted child.
///
/// Mirror of [`rotate_left`].
pub fn rotate_right<K, V, N>(arena: &mut [N], n: u32) -> u32
where
    N: AvlNodeLike<K, V>,
{
    let p = arena[n as usize].p();
    let c = arena[n as usize].l().expect("rotation pivot has left child");
    let cr = arena[c as usize].r();

    set_p(arena, c, p);
    set_r(arena, c, Some(n));
    set_p(arena, n, Some(c));
    set_l(arena, n, cr);
    if let Some(cr) = cr {
        set_p(arena, cr, Some(n));
    }
    if let Some(p) = p {
        if arena[p as usize].l() == Some(n) {
            set_l(arena, p, Some(c));
        } else {
            set_r(arena, p, Some(c));
        }
    }

    if bf(arena, c) == 0 {
        set_bf(arena, n, -1);
        set_bf(arena, c, 1);
    } else {
        set_bf(arena, n, 0);
        set_bf(arena, c, 0);
    }

    c
}

/// Attaches the fresh leaf `n` as the left child of `p` and restores the
/// AVL invariant. Returns the new tree root.
///
/// `p` must not have a left child.
pub fn insert_left<K, V, N>(arena: &mut [N], root: u32, n: u32, p: u32) -> u32
where
    N: AvlNodeLike<K, V>,
{
    set_l(arena, p, Some(n));
    set_p(arena, n, Some(p));
    let pbf = bf(arena, p) - 1;
    set_bf(arena, p, pbf);
    if pbf == 0 {
        root
    } else {
        rebalance_after_insert(arena, root, p, n)
    }
}

/// Attaches the fresh leaf `n` as the right child of `p` and restores the
/// AVL invariant. Returns the new tree root.
///
/// `p` must not have a right child.
pub fn insert_right<K, V, N>(arena: &mut [N], root: u32, n: u32, p: u32) -> u32
where
    N: AvlNodeLike<K, V>,
{
    set_r(arena, p, Some(n));
    set_p(arena, n, Some(p));
    let pbf = bf(arena, p) + 1;
    set_bf(arena, p, pbf);
    if pbf == 0 {
        root
    } else {
        rebalance_after_insert(arena, root, p, n)
    }
}

// `node` just grew taller by one through `child` and carries balance +-1.
// Climbs toward the root until the growth is absorbed; at most one single
// or double rotation runs, after which the subtree height is restored.
fn rebalance_after_insert<K, V, N>(arena: &mut [N], root: u32, mut node: u32, mut child: u32) -> u32
where
    N: AvlNodeLike<K, V>,
{
    loop {
        let Some(p) = arena[node as usize].p() else {
            return root;
        };
        let node_is_left = arena[p as usize].l() == Some(node);
        let pbf = bf(arena, p) + if node_is_left { -1 } else { 1 };
        set_bf(arena, p, pbf);
        match pbf {
            0 => return root,
            -1 | 1 => {
                child = node;
                node = p;
            }
            _ => {
                let top = if node_is_left {
                    if arena[node as usize].l() == Some(child) {
                        rotate_right(arena, p)
                    } else {
                        // zig-zag: the inner grandchild rises two levels
                        let cb = bf(arena, child);
                        rotate_left(arena, node);
                        let top = rotate_right(arena, p);
                        match cb {
                            -1 => {
                                set_bf(arena, node, 0);
                                set_bf(arena, p, 1);
                            }
                            0 => {
                                set_bf(arena, node, 0);
                                set_bf(arena, p, 0);
                            }
                            _ => {
                                set_bf(arena, node, -1);
                                set_bf(arena, p, 0);
                            }
                        }
                        set_bf(arena, top, 0);
                        top
                    }
                } else if arena[node as usize].r() == Some(child) {
                    rotate_left(arena, p)
                } else {
                    let cb = bf(arena, child);
                    rotate_right(arena, node);
                    let top = rotate_left(arena, p);
                    match cb {
                        1 => {
                            set_bf(arena, node, 0);
                            set_bf(arena, p, -1);
                        }
                        0 => {
                            set_bf(arena, node, 0);
                            set_bf(arena, p, 0);
                        }
                        _ => {
                            set_bf(arena, node, 1);
                            set_bf(arena, p, 0);
                        }
                    }
                    set_bf(arena, top, 0);
                    top
                };
                return if arena[top as usize].p().is_some() {
                    root
                } else {
                    top
                };
            }
        }
    }
}

/// Position-swap of `a` and `b` that also exchanges their balance factors,
/// so the balance stays attached to the tree position rather than the node.
pub fn swap_with_balance<K, V, N>(arena: &mut [N], root: u32, a: u32, b: u32) -> u32
where
    N: AvlNodeLike<K, V>,
{
    let root = crate::util::swap(arena, root, a, b);
    let abf = bf(arena, a);
    set_bf(arena, a, bf(arena, b));
    set_bf(arena, b, abf);
    root
}

/// Unlinks `n` from the tree rooted at `root` and restores the AVL
/// invariant. Returns the new root, `None` when the tree became empty.
///
/// The removed node's links and balance are cleared; its arena slot is
/// untouched and may be recycled by the caller.
pub fn remove<K, V, N>(arena: &mut [N], root: u32, n: u32) -> Option<u32>
where
    N: AvlNodeLike<K, V>,
{
    let mut root = root;

    if arena[n as usize].l().is_some() && arena[n as usize].r().is_some() {
        // rightmost node of the left subtree
        let mut pred = arena[n as usize].l().expect("left child exists");
        while let Some(r) = arena[pred as usize].r() {
            pred = r;
        }
        root = swap_with_balance(arena, root, n, pred);
    }

    let p = arena[n as usize].p();
    let c = arena[n as usize].l().or(arena[n as usize].r());

    if let Some(c) = c {
        set_p(arena, c, p);
    }

    let Some(p) = p else {
        set_p(arena, n, None);
        set_l(arena, n, None);
        set_r(arena, n, None);
        set_bf(arena, n, 0);
        return c;
    };

    let diff: i8 = if arena[p as usize].l() == Some(n) {
        set_l(arena, p, c);
        1
    } else {
        set_r(arena, p, c);
        -1
    };

    set_p(arena, n, None);
    set_l(arena, n, None);
    set_r(arena, n, None);
    set_bf(arena, n, 0);

    Some(rebalance_after_remove(arena, root, p, diff))
}

// Climbs from `start`, folding `diff` (+1 when the shrink happened in the
// left subtree, -1 for the right) into each balance factor. Stops as soon
// as a subtree keeps its height: balance +-1, or the single rotation whose
// promoted child was balanced. Every other case shortens the subtree and
// the walk continues with the parent's own diff, captured before rotating.
fn rebalance_after_remove<K, V, N>(arena: &mut [N], mut root: u32, start: u32, start_diff: i8) -> u32
where
    N: AvlNodeLike<K, V>,
{
    let mut curr = Some(start);
    let mut diff = start_diff;

    while let Some(n) = curr {
        let p = arena[n as usize].p();
        let ndiff: i8 = match p {
            Some(p) if arena[p as usize].l() == Some(n) => 1,
            Some(_) => -1,
            None => 0,
        };
        let nbf = bf(arena, n) + diff;
        set_bf(arena, n, nbf);
        match nbf {
            -1 | 1 => return root,
            0 => {}
            -2 => {
                let c = arena[n as usize].l().expect("left child exists");
                let cb = bf(arena, c);
                if cb <= 0 {
                    let top = rotate_right(arena, n);
                    if arena[top as usize].p().is_none() {
                        root = top;
                    }
                    if cb == 0 {
                        return root;
                    }
                } else {
                    let g = arena[c as usize].r().expect("inner grandchild exists");
                    let gb = bf(arena, g);
                    rotate_left(arena, c);
                    let top = rotate_right(arena, n);
                    match gb {
                        -1 => {
                            set_bf(arena, n, 1);
                            set_bf(arena, c, 0);
                        }
                        0 => {
                            set_bf(arena, n, 0);
                            set_bf(arena, c, 0);
                        }
                        _ => {
                            set_bf(arena, n, 0);
                            set_bf(arena, c, -1);
                        }
                    }
                    set_bf(arena, top, 0);
                    if arena[top as usize].p().is_none() {
                        root = top;
                    }
                }
            }
            _ => {
                let c = arena[n as usize].r().expect("right child exists");
                let cb = bf(arena, c);
                if cb >= 0 {
                    let top = rotate_left(arena, n);
                    if arena[top as usize].p().is_none() {
                        root = top;
                    }
                    if cb == 0 {
                        return root;
                    }
                } else {
                    let g = arena[c as usize].l().expect("inner grandchild exists");
                    let gb = bf(arena, g);
                    rotate_right(arena, c);
                    let top = rotate_left(arena, n);
                    match gb {
                        1 => {
                            set_bf(arena, n, -1);
                            set_bf(arena, c, 0);
                        }
                        0 => {
                            set_bf(arena, n, 0);
                            set_bf(arena, c, 0);
                        }
                        _ => {
                            set_bf(arena, n, 0);
                            set_bf(arena, c, 1);
                        }
                    }
                    set_bf(arena, top, 0);
                    if arena[top as usize].p().is_none() {
                        root = top;
                    }
                }
            }
        }
        curr = p;
        diff = ndiff;
    }

    root
}

/// Height of the subtree under `node`, counted in nodes.
pub fn tree_height<K, V, N>(arena: &[N], node: u32) -> usize
where
    N: AvlNodeLike<K, V>,
{
    let l = arena[node as usize]
        .l()
        .map(|i| tree_height(arena, i))
        .unwrap_or(0);
    let r = arena[node as usize]
        .r()
        .map(|i| tree_height(arena, i))
        .unwrap_or(0);
    1 + l.max(r)
}

/// Checks structural and AVL invariants of the whole tree: parent links,
/// stored balance factors against recomputed heights, the `|bf| <= 1`
/// bound, and strictly increasing in-order key sequence.
pub fn assert_avl_tree<K, V, N, C>(
    arena: &[N],
    root: Option<u32>,
    comparator: &C,
) -> Result<(), String>
where
    N: AvlNodeLike<K, V>,
    C: Fn(&K, &K) -> i32,
{
    let Some(root) = root else {
        return Ok(());
    };

    if arena[root as usize].p().is_some() {
        return Err("Root has parent".to_string());
    }

    fn validate_links_and_bf<K, V, N>(arena: &[N], node: u32) -> Result<(), String>
    where
        N: AvlNodeLike<K, V>,
    {
        let l = arena[node as usize].l();
        let r = arena[node as usize].r();

        if let Some(l) = l {
            if arena[l as usize].p() != Some(node) {
                return Err("Broken parent link on left child".to_string());
            }
            validate_links_and_bf(arena, l)?;
        }
        if let Some(r) = r {
            if arena[r as usize].p() != Some(node) {
                return Err("Broken parent link on right child".to_string());
            }
            validate_links_and_bf(arena, r)?;
        }

        let lh = l.map(|i| tree_height(arena, i)).unwrap_or(0) as i32;
        let rh = r.map(|i| tree_height(arena, i)).unwrap_or(0) as i32;
        let expected_bf = rh - lh;
        let actual_bf = arena[node as usize].bf() as i32;
        if actual_bf != expected_bf {
            return Err(format!(
                "Balance factor mismatch: expected {expected_bf}, got {actual_bf}"
            ));
        }
        if !(-1..=1).contains(&actual_bf) {
            return Err("AVL balance violated".to_string());
        }

        Ok(())
    }

    validate_links_and_bf(arena, root)?;

    let mut curr = first(arena, Some(root));
    let mut prev_node: Option<u32> = None;
    while let Some(i) = curr {
        if let Some(prev) = prev_node {
            let cmp = comparator(arena[prev as usize].key(), arena[i as usize].key());
            if cmp >= 0 {
                return Err("Node order violated".to_string());
            }
        }
        prev_node = Some(i);
        curr = next(arena, i);
    }

    Ok(())
}

/// Debug printer for AVL trees.
pub fn print<K, V, N>(arena: &[N], node: Option<u32>, tab: &str) -> String
where
    K: Debug,
    V: Debug,
    N: AvlNodeLike<K, V> + KvNode<K, V>,
{
    match node {
        None => "∅".to_string(),
        Some(i) => {
            let n = &arena[i as usize];
            let left = print::<K, V, N>(arena, n.l(), &format!("{tab}  "));
            let right = print::<K, V, N>(arena, n.r(), &format!("{tab}  "));
            format!(
                "Node[{i}] [bf={}] {{ {:?} = {:?} }}\n{tab}L={left}\n{tab}R={right}",
                n.bf(),
                n.key(),
                n.value()
            )
        }
    }
}
