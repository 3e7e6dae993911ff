//! Equal-leaf-depth check for arbitrary binary trees.
//!
//! Works on any downward-linked node layout, independent of the AVL
//! machinery: parent links, keys, and balance factors are not required.

use crate::types::Node;

/// Downward links of a binary-tree node.
pub trait BinaryNode {
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
}

impl<N: Node> BinaryNode for N {
    fn l(&self) -> Option<u32> {
        Node::l(self)
    }

    fn r(&self) -> Option<u32> {
        Node::r(self)
    }
}

/// Returns `true` when every leaf under `root` sits at the same depth.
///
/// The depth of the first leaf reached in pre-order, left side first, is
/// the reference; every later leaf must match it. An empty tree passes.
pub fn equal_depths<N: BinaryNode>(arena: &[N], root: Option<u32>) -> bool {
    match root {
        None => true,
        Some(r) => check(arena, r, 0, &mut None),
    }
}

fn check<N: BinaryNode>(arena: &[N], node: u32, depth: u32, reference: &mut Option<u32>) -> bool {
    let n = &arena[node as usize];
    let l = n.l();
    let r = n.r();

    if l.is_none() && r.is_none() {
        return match *reference {
            Some(d) => d == depth,
            None => {
                *reference = Some(depth);
                true
            }
        };
    }

    let left_ok = l.map_or(true, |i| check(arena, i, depth + 1, reference));
    let right_ok = r.map_or(true, |i| check(arena, i, depth + 1, reference));
    left_ok && right_ok
}
