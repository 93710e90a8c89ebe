use std::collections::VecDeque;
use std::fmt;

use crate::tree::{AvlTree, Node};

const FOOTER: &str = "*************************************";

impl<K: fmt::Display> AvlTree<K> {
    /// Level-order drawing of the tree, one line per level.
    ///
    /// Each slot on a level with `layer` levels left (counting itself) is
    /// padded by `2^(layer - 1)` spaces on both sides; missing nodes are drawn
    /// as `*`. The drawing ends with a line of asterisks. An empty tree renders
    /// as an empty string.
    ///
    /// ```
    /// use avl_tree::AvlTree;
    ///
    /// let tree: AvlTree<i32> = [4, 2, 3].into_iter().collect();
    /// assert_eq!(
    ///     tree.render(),
    ///     "  3  \n 2  4 \n*************************************"
    /// );
    /// ```
    pub fn render(&self) -> String {
        let mut out = String::new();
        let mut layer = self.height();
        if layer == 0 {
            return out;
        }

        let mut queue: VecDeque<Option<&Node<K>>> = VecDeque::new();
        queue.push_back(self.root.as_deref());
        let mut drawn = 0_usize;
        while let Some(slot) = queue.pop_front() {
            let pad = " ".repeat(1 << (layer - 1));
            out.push_str(&pad);
            match slot {
                Some(node) => {
                    out.push_str(&node.key.to_string());
                    queue.push_back(node.left.as_deref());
                    queue.push_back(node.right.as_deref());
                }
                None => {
                    out.push('*');
                    queue.push_back(None);
                    queue.push_back(None);
                }
            }
            out.push_str(&pad);

            drawn += 1;
            if (drawn + 1).is_power_of_two() {
                out.push('\n');
                layer -= 1;
                if layer == 0 {
                    out.push_str(FOOTER);
                    break;
                }
            }
        }
        out
    }
}

impl<K: fmt::Display> fmt::Display for AvlTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
