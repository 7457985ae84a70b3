use std::{cmp::Ordering, iter, mem};

use crate::avltree::TreeError;

/// An owned, possibly absent subtree.
pub type Link<T> = Option<Box<AvlNode<T>>>;

/// Comparison function threaded through every structural decision.
///
/// Returning `None` marks a value that the ordering cannot place; with the
/// default comparison this happens exactly when [`PartialOrd::partial_cmp`]
/// returns `None` (such as a floating-point NaN).
pub type Compare<T> = dyn Fn(&T, &T) -> Option<Ordering> + Send + Sync;

/// Height of a possibly absent subtree.  An absent child counts as -1, so
/// that a leaf has height 0.
pub fn height<T>(link: &Link<T>) -> i32 {
    link.as_ref().map_or(-1, |node| node.height)
}

/// Applies the comparison, turning an unplaceable value into an error.
pub fn order<T, C>(compare: &C, a: &T, b: &T) -> Result<Ordering, TreeError>
where
    C: Fn(&T, &T) -> Option<Ordering> + ?Sized,
{
    compare(a, b).ok_or(TreeError::Unorderable)
}

// ////////////////////////////////////////////////////////////////////////////
// AvlNode
// ////////////////////////////////////////////////////////////////////////////

/// AvlNodes make up the tree.  Each node owns its two optional children
/// exclusively and there are no parent or sibling pointers, so every
/// algorithm is a recursive descent with fix-up on the unwind.
///
/// `height` and `balance` are caches.  They are refreshed whenever a child
/// link changes, and the rebalancing step keeps `balance` within
/// `{-1, 0, 1}` before any public call on the owning tree returns.
#[derive(Debug)]
pub struct AvlNode<T> {
    pub value: T,
    pub left: Link<T>,
    pub right: Link<T>,
    // Longest downward edge path starting here.  A leaf is 0.
    pub height: i32,
    // height(left) - height(right), with an absent child counted as -1.
    pub balance: i32,
}

// ///////////////////////////////////////////////
// Inherent methods
// ///////////////////////////////////////////////

impl<T> AvlNode<T> {
    /// Create a new detached leaf node holding `value`.
    pub fn new(value: T) -> Self {
        AvlNode {
            value,
            left: None,
            right: None,
            height: 0,
            balance: 0,
        }
    }

    /// Refreshes the cached height and balance factor from the children.
    ///
    /// The children must already carry correct caches; every algorithm in
    /// this module calls `update` on the unwind, innermost node first, so
    /// this holds by induction.
    fn update(&mut self) {
        let left = height(&self.left);
        let right = height(&self.right);
        self.height = left.max(right) + 1;
        self.balance = left - right;
    }

    // ///////////////////////////////////////////////
    // Rotations
    // ///////////////////////////////////////////////

    /// Left rotation: the right child takes this node's structural
    /// position, the child's left subtree moves over to become this node's
    /// right subtree, and both caches are refreshed, lower node first.
    ///
    /// ```text
    ///   A                C
    ///    \              / \
    ///     C     =>     A   E
    ///    / \            \
    ///   B   E            B
    /// ```
    ///
    /// Only the two nodes shown are touched; the rotation re-parents the
    /// owned boxes and never moves the stored values.  Rotating a node
    /// without a right child is a no-op, which [`AvlNode::rebalance`] never
    /// requests.
    fn rotate_left(mut node: Box<Self>) -> Box<Self> {
        match node.right.take() {
            Some(mut pivot) => {
                node.right = pivot.left.take();
                node.update();
                pivot.left = Some(node);
                pivot.update();
                pivot
            }
            None => node,
        }
    }

    /// Right rotation, the mirror image of [`AvlNode::rotate_left`].
    fn rotate_right(mut node: Box<Self>) -> Box<Self> {
        match node.left.take() {
            Some(mut pivot) => {
                node.left = pivot.right.take();
                node.update();
                pivot.right = Some(node);
                pivot.update();
                pivot
            }
            None => node,
        }
    }

    /// Restores the balance invariant at `node` after one of its subtrees
    /// grew or shrank by at most one level.  `node`'s caches must be fresh.
    ///
    /// Four cases, selected by the sign of the balance factor and the lean
    /// of the heavier child: a right-heavy node whose right child leans
    /// left needs that child rotated right first, otherwise a single left
    /// rotation would re-introduce the lean on the other side.  Left-heavy
    /// is symmetric.
    fn rebalance(mut node: Box<Self>) -> Box<Self> {
        if node.balance < -1 {
            if node.right.as_ref().is_some_and(|right| right.balance == 1) {
                node.right = node.right.take().map(Self::rotate_right);
            }
            Self::rotate_left(node)
        } else if node.balance > 1 {
            if node.left.as_ref().is_some_and(|left| left.balance == -1) {
                node.left = node.left.take().map(Self::rotate_left);
            }
            Self::rotate_right(node)
        } else {
            node
        }
    }

    /// Refreshes and rebalances the node at `link`, if any.  Called at
    /// every level on the unwind of the mutating algorithms below.
    fn fix(link: &mut Link<T>) {
        if let Some(mut node) = link.take() {
            node.update();
            *link = Some(Self::rebalance(node));
        }
    }

    // ///////////////////////////////////////////////
    // Insertion and removal
    // ///////////////////////////////////////////////

    /// Inserts `value` below `link`, returning whether a node was created.
    /// `Ok(false)` means an equal element is already stored and the subtree
    /// is unchanged.
    ///
    /// The descent compares at each node and recurses; a new leaf is hooked
    /// into the first empty slot.  The unwind then refreshes and rebalances
    /// every visited ancestor, so the balance invariant is restored from
    /// the insertion point up.  No link is disturbed before the comparison
    /// succeeds, hence an error leaves the subtree untouched.
    pub fn insert<C>(link: &mut Link<T>, value: T, compare: &C) -> Result<bool, TreeError>
    where
        C: Fn(&T, &T) -> Option<Ordering> + ?Sized,
    {
        let Some(node) = link else {
            *link = Some(Box::new(AvlNode::new(value)));
            return Ok(true);
        };
        let inserted = match order(compare, &value, &node.value)? {
            Ordering::Less => Self::insert(&mut node.left, value, compare)?,
            Ordering::Greater => Self::insert(&mut node.right, value, compare)?,
            Ordering::Equal => false,
        };
        if inserted {
            Self::fix(link);
        }
        Ok(inserted)
    }

    /// Removes the node comparing equal to `value` from below `link` and
    /// returns the stored value.
    ///
    /// The matching node is dismantled by [`AvlNode::unlink`]; afterwards
    /// every level of the search path is refreshed and rebalanced on the
    /// unwind, mirroring insertion.
    pub fn remove<C>(link: &mut Link<T>, value: &T, compare: &C) -> Result<T, TreeError>
    where
        C: Fn(&T, &T) -> Option<Ordering> + ?Sized,
    {
        let Some(node) = link else {
            return Err(TreeError::NotFound);
        };
        let removed = match order(compare, value, &node.value)? {
            Ordering::Less => Self::remove(&mut node.left, value, compare)?,
            Ordering::Greater => Self::remove(&mut node.right, value, compare)?,
            Ordering::Equal => Self::unlink(link).ok_or(TreeError::NotFound)?,
        };
        Self::fix(link);
        Ok(removed)
    }

    /// Unlinks the node at `link` and returns its value, wiring the
    /// replacement into the slot.
    ///
    /// Three structural cases: a leaf leaves the slot empty, a node with
    /// one child is replaced by that child, and a node with two children
    /// keeps its record but receives the value of its in-order successor
    /// (the minimum of the right subtree), whose node is detached instead.
    /// The caller rebalances the slot; [`AvlNode::detach_min`] has already
    /// rebalanced the successor's path.
    fn unlink(link: &mut Link<T>) -> Option<T> {
        let mut node = link.take()?;
        match (node.left.take(), node.right.take()) {
            (None, None) => Some(node.value),
            (Some(child), None) | (None, Some(child)) => {
                *link = Some(child);
                Some(node.value)
            }
            (Some(left), Some(right)) => {
                let (rest, successor) = Self::detach_min(right);
                let value = mem::replace(&mut node.value, successor);
                node.left = Some(left);
                node.right = rest;
                *link = Some(node);
                Some(value)
            }
        }
    }

    /// Detaches the smallest node below `node`, returning the rebuilt
    /// subtree and the detached value.  Every node on the descent path is
    /// refreshed and rebalanced on the unwind, since losing the minimum can
    /// shrink the left arm of each ancestor.
    fn detach_min(mut node: Box<Self>) -> (Link<T>, T) {
        match node.left.take() {
            Some(left) => {
                let (rest, min) = Self::detach_min(left);
                node.left = rest;
                node.update();
                (Some(Self::rebalance(node)), min)
            }
            None => {
                let AvlNode { value, right, .. } = *node;
                (right, value)
            }
        }
    }

    // ///////////////////////////////////////////////
    // Search
    // ///////////////////////////////////////////////

    /// Finds the node holding a value comparing equal to `value`.
    pub fn find<'a, C>(
        mut link: &'a Link<T>,
        value: &T,
        compare: &C,
    ) -> Result<&'a Self, TreeError>
    where
        C: Fn(&T, &T) -> Option<Ordering> + ?Sized,
    {
        while let Some(node) = link.as_deref() {
            match order(compare, value, &node.value)? {
                Ordering::Less => link = &node.left,
                Ordering::Greater => link = &node.right,
                Ordering::Equal => return Ok(node),
            }
        }
        Err(TreeError::NotFound)
    }

    /// Depth of the node holding `value`, counting the root as 1.
    pub fn depth<C>(mut link: &Link<T>, value: &T, compare: &C) -> Result<usize, TreeError>
    where
        C: Fn(&T, &T) -> Option<Ordering> + ?Sized,
    {
        let mut depth = 1;
        while let Some(node) = link.as_deref() {
            match order(compare, value, &node.value)? {
                Ordering::Less => link = &node.left,
                Ordering::Greater => link = &node.right,
                Ordering::Equal => return Ok(depth),
            }
            depth += 1;
        }
        Err(TreeError::NotFound)
    }

    // ///////////////////////////////////////////////
    // Path query
    // ///////////////////////////////////////////////

    /// Values on the unique tree path from `start` to `end`, inclusive.
    ///
    /// Walks from the subtree root to the split point, the first node that
    /// does not lie strictly above or strictly below both endpoints, then
    /// stitches together two one-sided legs.  The climb out of the start
    /// side pushes values on the unwind so `start` comes first; the descent
    /// towards `end` pushes on entry; the split node itself belongs to the
    /// descending leg, so it appears exactly once.  The result therefore
    /// always runs from `start` to `end`.
    pub fn path_between<'a, C>(
        root: &'a Link<T>,
        start: &T,
        end: &T,
        compare: &C,
    ) -> Result<Vec<&'a T>, TreeError>
    where
        C: Fn(&T, &T) -> Option<Ordering> + ?Sized,
    {
        let mut link = root;
        let mut path = Vec::new();
        loop {
            let Some(node) = link.as_deref() else {
                return Err(TreeError::NotFound);
            };
            match (
                order(compare, start, &node.value)?,
                order(compare, end, &node.value)?,
            ) {
                // This node is `start`: the whole path falls away towards
                // `end`.  Covers `start == end` as well.
                (Ordering::Equal, _) => {
                    Self::downward_leg(link, end, compare, &mut path)?;
                    return Ok(path);
                }
                // This node is `end`: the path climbs from `start` and
                // finishes here.
                (_, Ordering::Equal) => {
                    Self::upward_leg(link, start, compare, &mut path)?;
                    return Ok(path);
                }
                // Both endpoints on one side: the split point is deeper.
                (Ordering::Less, Ordering::Less) => link = &node.left,
                (Ordering::Greater, Ordering::Greater) => link = &node.right,
                // This node separates the endpoints.
                (Ordering::Less, Ordering::Greater) => {
                    Self::upward_leg(&node.left, start, compare, &mut path)?;
                    Self::downward_leg(link, end, compare, &mut path)?;
                    return Ok(path);
                }
                (Ordering::Greater, Ordering::Less) => {
                    Self::upward_leg(&node.right, start, compare, &mut path)?;
                    Self::downward_leg(link, end, compare, &mut path)?;
                    return Ok(path);
                }
            }
        }
    }

    /// Climbing leg of the path query: every node from the one holding
    /// `target` up to `link`, pushed on the unwind so `target` comes first.
    fn upward_leg<'a, C>(
        link: &'a Link<T>,
        target: &T,
        compare: &C,
        path: &mut Vec<&'a T>,
    ) -> Result<(), TreeError>
    where
        C: Fn(&T, &T) -> Option<Ordering> + ?Sized,
    {
        let Some(node) = link.as_deref() else {
            return Err(TreeError::NotFound);
        };
        match order(compare, target, &node.value)? {
            Ordering::Less => Self::upward_leg(&node.left, target, compare, path)?,
            Ordering::Greater => Self::upward_leg(&node.right, target, compare, path)?,
            Ordering::Equal => {}
        }
        path.push(&node.value);
        Ok(())
    }

    /// Descending leg of the path query: every node from `link` down to the
    /// one holding `target`, pushed on entry so the node at `link` comes
    /// first.
    fn downward_leg<'a, C>(
        mut link: &'a Link<T>,
        target: &T,
        compare: &C,
        path: &mut Vec<&'a T>,
    ) -> Result<(), TreeError>
    where
        C: Fn(&T, &T) -> Option<Ordering> + ?Sized,
    {
        while let Some(node) = link.as_deref() {
            path.push(&node.value);
            match order(compare, target, &node.value)? {
                Ordering::Less => link = &node.left,
                Ordering::Greater => link = &node.right,
                Ordering::Equal => return Ok(()),
            }
        }
        Err(TreeError::NotFound)
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Iterators
// ////////////////////////////////////////////////////////////////////////////

/// In-order iterator over references into an [`AvlTree`].
///
/// The stack holds the nodes whose value has not been yielded yet but whose
/// left subtree is exhausted; yielding a node pushes the left spine of its
/// right subtree.
///
/// [`AvlTree`]: crate::AvlTree
pub struct Iter<'a, T> {
    stack: Vec<&'a AvlNode<T>>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(root: &'a Link<T>, len: usize) -> Self {
        let mut iter = Iter {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_spine(root);
        iter
    }

    /// Pushes the node at `link` and the chain of left children below it.
    fn push_spine(&mut self, mut link: &'a Link<T>) {
        while let Some(node) = link.as_deref() {
            self.stack.push(node);
            link = &node.left;
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let node = self.stack.pop()?;
        self.push_spine(&node.right);
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> iter::FusedIterator for Iter<'_, T> {}

/// In-order iterator consuming an [`AvlTree`] and yielding owned values.
///
/// [`AvlTree`]: crate::AvlTree
pub struct IntoIter<T> {
    stack: Vec<Box<AvlNode<T>>>,
    remaining: usize,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(root: Link<T>, len: usize) -> Self {
        let mut iter = IntoIter {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_spine(root);
        iter
    }

    fn push_spine(&mut self, mut link: Link<T>) {
        while let Some(mut node) = link {
            link = node.left.take();
            self.stack.push(node);
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let mut node = self.stack.pop()?;
        let right = node.right.take();
        self.push_spine(right);
        self.remaining -= 1;
        let AvlNode { value, .. } = *node;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> iter::FusedIterator for IntoIter<T> {}

// ////////////////////////////////////////////////////////////////////////////
// Tests
// ////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use pretty_assertions::assert_eq;

    use super::{AvlNode, Link};
    use crate::avltree::TreeError;

    fn compare(a: &i32, b: &i32) -> Option<Ordering> {
        a.partial_cmp(b)
    }

    fn build(values: &[i32]) -> Link<i32> {
        let mut root = None;
        for &value in values {
            AvlNode::insert(&mut root, value, &compare).unwrap();
        }
        root
    }

    fn shape(link: &Link<i32>) -> String {
        match link.as_deref() {
            Some(node) => format!(
                "({} {} {})",
                node.value,
                shape(&node.left),
                shape(&node.right)
            ),
            None => "_".to_string(),
        }
    }

    #[test]
    fn single_rotations() {
        // Straight chains rotate once around the root.
        let root = build(&[1, 2, 3]);
        assert_eq!(shape(&root), "(2 (1 _ _) (3 _ _))");
        let node = root.as_deref().unwrap();
        assert_eq!(node.height, 1);
        assert_eq!(node.balance, 0);

        let root = build(&[3, 2, 1]);
        assert_eq!(shape(&root), "(2 (1 _ _) (3 _ _))");
    }

    #[test]
    fn double_rotations() {
        // Zig-zag chains need the inner grandchild brought up top.
        let root = build(&[1, 3, 2]);
        assert_eq!(shape(&root), "(2 (1 _ _) (3 _ _))");

        let root = build(&[3, 1, 2]);
        assert_eq!(shape(&root), "(2 (1 _ _) (3 _ _))");
    }

    #[test]
    fn rotations_touch_only_the_imbalanced_region() {
        // Inserting 10 tips the root over; the right subtree moves as a
        // whole and keeps its internal layout.
        let root = build(&[50, 25, 75, 12, 37, 10]);
        assert_eq!(shape(&root), "(25 (12 (10 _ _) _) (50 (37 _ _) (75 _ _)))");
    }

    #[test]
    fn duplicate_insert_reports_false() {
        let mut root = build(&[2, 1, 3]);
        assert_eq!(AvlNode::insert(&mut root, 2, &compare), Ok(false));
        assert_eq!(AvlNode::insert(&mut root, 3, &compare), Ok(false));
        assert_eq!(shape(&root), "(2 (1 _ _) (3 _ _))");
    }

    #[test]
    fn detach_min_rebalances_its_path() {
        let root = build(&[20, 10, 30, 25, 35]);
        let Some(node) = root else {
            panic!("tree is empty");
        };
        let (rest, min) = AvlNode::detach_min(node);
        assert_eq!(min, 10);
        // Losing the minimum tips 20 over; a left rotation brings 30 up.
        assert_eq!(shape(&rest), "(30 (20 _ (25 _ _)) (35 _ _))");
    }

    #[test]
    fn remove_promotes_the_inorder_successor() {
        let mut root = build(&[2, 1, 3]);
        assert_eq!(AvlNode::remove(&mut root, &9, &compare), Err(TreeError::NotFound));
        assert_eq!(shape(&root), "(2 (1 _ _) (3 _ _))");

        // Removing a node with two children pulls up the right minimum.
        assert_eq!(AvlNode::remove(&mut root, &2, &compare), Ok(2));
        assert_eq!(shape(&root), "(3 (1 _ _) _)");
        assert_eq!(AvlNode::remove(&mut root, &3, &compare), Ok(3));
        assert_eq!(shape(&root), "(1 _ _)");
        assert_eq!(AvlNode::remove(&mut root, &1, &compare), Ok(1));
        assert_eq!(shape(&root), "_");
        assert_eq!(AvlNode::remove(&mut root, &1, &compare), Err(TreeError::NotFound));
    }
}
