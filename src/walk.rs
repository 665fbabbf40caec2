use crate::node::Node;

/// Pre-order iterator over materialised nodes, yielding `(depth, node)`.
///
/// Starting nodes are at depth 0. Only cached children are visited: a
/// directory that has not been expanded contributes itself and nothing else.
pub struct Walk<'a> {
    stack: Vec<(usize, &'a Node)>,
}

impl<'a> Walk<'a> {
    pub(crate) fn new(start: &'a [Node]) -> Self {
        // Reversed so the first node is popped first
        let stack = start.iter().rev().map(|node| (0, node)).collect();
        Self { stack }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, current) = self.stack.pop()?;

        for child in current.children().iter().rev() {
            self.stack.push((depth + 1, child));
        }

        Some((depth, current))
    }
}
