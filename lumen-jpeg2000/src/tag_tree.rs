//! Tag trees, described in Section B.10.2.
//!
//! A tag tree is a quad tree over a grid of leaves where each node
//! stores the minimum value of its children. The tree is not stored in
//! the codestream as a whole; every packet header contributes just the
//! bits needed to resolve the leaves it touches, so the tree is decoded
//! incrementally and must keep its partial state between packets.

use crate::bits::StuffedBits;
use log::warn;
use lumen_common::bit::BitReader;

/// Node values above this bound are treated as corrupt input. A packet
/// header never legitimately encodes more layers or bit planes.
const MAX_VALUE: u32 = 1 << 16;

#[derive(Debug, Clone, Default)]
struct TagNode {
    /// Grid width covered by this node. Zero for dummy nodes.
    width: u32,
    /// Grid height covered by this node. Zero for dummy nodes.
    height: u32,
    /// Decoded lower bound, or the final value once `resolved` is set.
    value: u32,
    resolved: bool,
    /// Zero for leaves; the root has the highest level.
    level: u16,
    /// Child indices into the arena. `usize::MAX` marks a missing child.
    children: [usize; 4],
}

impl TagNode {
    fn new(width: u32, height: u32, level: u16) -> Self {
        Self {
            width,
            height,
            level,
            value: 0,
            resolved: false,
            children: [usize::MAX; 4],
        }
    }

    /// Dimensions of the top-left child; the other children cover the
    /// remainder of the grid.
    fn top_left_width(&self) -> u32 {
        u32::min(1 << (self.level - 1), self.width)
    }

    fn top_left_height(&self) -> u32 {
        u32::min(1 << (self.level - 1), self.height)
    }

    fn build(width: u32, height: u32, level: u16, nodes: &mut Vec<TagNode>) -> Self {
        let mut tag = TagNode::new(width, height, level);

        if level == 0 {
            debug_assert!(width <= 1 && height <= 1);
            return tag;
        }

        let top_left_width = tag.top_left_width();
        let top_left_height = tag.top_left_height();

        let mut push = |node: TagNode, child_idx: usize, nodes: &mut Vec<TagNode>| {
            // Children with an empty area don't exist.
            if node.width > 0 && node.height > 0 {
                let node_idx = nodes.len();
                nodes.push(node);
                tag.children[child_idx] = node_idx;
            }
        };

        let child = TagNode::build(top_left_width, top_left_height, level - 1, nodes);
        push(child, 0, nodes);

        let child = TagNode::build(width - top_left_width, top_left_height, level - 1, nodes);
        push(child, 1, nodes);

        let child = TagNode::build(top_left_width, height - top_left_height, level - 1, nodes);
        push(child, 2, nodes);

        let child = TagNode::build(
            width - top_left_width,
            height - top_left_height,
            level - 1,
            nodes,
        );
        push(child, 3, nodes);

        tag
    }
}

/// An incrementally decoded tag tree over a `width` x `height` grid.
#[derive(Debug, Clone)]
pub struct TagTree {
    nodes: Vec<TagNode>,
    root: usize,
    width: u32,
    height: u32,
}

impl TagTree {
    /// Create an undecoded tree for the given grid.
    pub fn new(width: u32, height: u32) -> Self {
        let level = u32::max(
            width.next_power_of_two().ilog2(),
            height.next_power_of_two().ilog2(),
        );

        let mut nodes = Vec::new();
        let node = TagNode::build(width, height, level as u16, &mut nodes);
        let root = nodes.len();
        nodes.push(node);

        Self {
            nodes,
            root,
            width,
            height,
        }
    }

    /// Decode the value of the leaf at `(x, y)`, reading only as many
    /// bits as needed to decide whether the value is below `threshold`.
    ///
    /// Ancestors are resolved before the leaf, and every decoded value
    /// is at least as large as its parent's. The returned value is
    /// exact if it is below `threshold`, otherwise it is a lower bound.
    pub fn read(
        &mut self,
        x: u32,
        y: u32,
        reader: &mut BitReader<'_>,
        threshold: u32,
    ) -> Option<u32> {
        if x >= self.width || y >= self.height {
            warn!(
                "tag tree index ({x}, {y}) lies outside the {}x{} grid",
                self.width, self.height
            );

            return None;
        }

        self.read_node(self.root, x, y, reader, 0, threshold)
    }

    /// Forget all decoded state, as if no packet had been read.
    pub fn reset(&mut self) {
        for node in &mut self.nodes {
            node.value = 0;
            node.resolved = false;
        }
    }

    fn read_node(
        &mut self,
        node_idx: usize,
        x: u32,
        y: u32,
        reader: &mut BitReader<'_>,
        parent_value: u32,
        threshold: u32,
    ) -> Option<u32> {
        let node = self.nodes.get_mut(node_idx)?;

        if !node.resolved {
            // The node's lower bound starts at the parent's value; each
            // 0 bit raises it by one and a 1 bit pins it down.
            let mut value = u32::max(parent_value, node.value);

            while value < threshold {
                if value >= MAX_VALUE {
                    warn!("tag tree value exceeds {MAX_VALUE}, treating input as corrupt");
                    return None;
                }

                match reader.read_stuffed(1)? {
                    0 => value += 1,
                    _ => {
                        node.resolved = true;
                        break;
                    }
                }
            }

            node.value = value;
        }

        let node = &self.nodes[node_idx];
        if node.value >= threshold || node.level == 0 {
            return Some(node.value);
        }

        let top_left_width = node.top_left_width();
        let top_left_height = node.top_left_height();
        let value = node.value;

        let (child, x, y) = match (x < top_left_width, y < top_left_height) {
            (true, true) => (node.children[0], x, y),
            (false, true) => (node.children[1], x - top_left_width, y),
            (true, false) => (node.children[2], x, y - top_left_height),
            (false, false) => (
                node.children[3],
                x - top_left_width,
                y - top_left_height,
            ),
        };

        self.read_node(child, x, y, reader, value, threshold)
    }
}
