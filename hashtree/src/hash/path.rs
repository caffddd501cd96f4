use super::{HashNode, Hasher};

/// The position of a node wrt. its sibling, both being children of the same branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// A path from the root of a hash tree down to one of its nodes.
///
/// Each step is a branch along with the side taken to reach the next node.
#[derive(Debug)]
pub(super) struct Path<'t, H: Hasher> {
    steps: Vec<(&'t HashNode<H>, Side)>,
    target: &'t HashNode<H>,
}

impl<'t, H: Hasher> Path<'t, H> {
    #[inline]
    pub fn target(&self) -> &'t HashNode<H> {
        self.target
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Walk the path upwards, from the target node to the root, yielding siblings along with their side.
    pub fn siblings(&self) -> impl Iterator<Item = (&'t HashNode<H>, Side)> + '_ {
        self.steps.iter().rev().filter_map(|&(branch, side)| {
            let (left, right) = branch.nodes()?;

            let sibling = match side {
                Side::Left => right,
                Side::Right => left,
            };

            Some((sibling, side.opposite()))
        })
    }
}

impl<H: Hasher> HashNode<H> {
    /// Search the first node matching the given predicate, depth first and left before right.
    pub(super) fn locate(&self, predicate: impl Fn(&Self) -> bool) -> Option<Path<'_, H>> {
        let mut stack: Vec<(&Self, Option<(usize, (&Self, Side))>)> = vec![(self, None)];
        let mut steps = Vec::with_capacity(self.depth());

        while let Some((node, via)) = stack.pop() {
            if let Some((depth, step)) = via {
                steps.truncate(depth);
                steps.push(step);
            }

            if predicate(node) {
                return Some(Path { steps, target: node });
            }

            if let Some((left, right)) = node.nodes() {
                let depth = steps.len();
                stack.push((right, Some((depth, (node, Side::Right)))));
                stack.push((left, Some((depth, (node, Side::Left)))));
            }
        }

        None
    }

    /// Walk down to the leaf at the given position, reading its index bits from the most significant one.
    pub(super) fn descend(&self, index: usize) -> Option<Path<'_, H>> {
        let depth = self.depth();

        if index.checked_shr(depth as u32).is_some_and(|rest| rest != 0) {
            return None;
        }

        let mut steps = Vec::with_capacity(depth);
        let mut node = self;

        for level in (0..depth).rev() {
            let (left, right) = node.nodes()?;

            if (index >> level) & 1 == 0 {
                steps.push((node, Side::Left));
                node = left;
            } else {
                steps.push((node, Side::Right));
                node = right;
            }
        }

        Some(Path { steps, target: node })
    }
}
