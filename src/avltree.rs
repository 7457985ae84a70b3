//! A height-balanced binary search tree.

use std::{cmp, cmp::Ordering, default, fmt, hash, hash::Hash, iter};

use thiserror::Error;

use crate::avlnode::{AvlNode, Compare, Link, order};

pub use crate::avlnode::{IntoIter, Iter};

// ////////////////////////////////////////////////////////////////////////////
// TreeError
// ////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, PartialEq, Eq)]
/// Errors that can occur when querying or mutating an [`AvlTree`].
#[non_exhaustive]
pub enum TreeError {
    /// The argument cannot be placed by the tree's comparison function,
    /// such as a floating-point NaN under the default comparison.
    #[error("value cannot be ordered.")]
    Unorderable,
    /// The named value is not stored in the tree.
    #[error("value not found in the tree.")]
    NotFound,
}

// ////////////////////////////////////////////////////////////////////////////
// AvlTree
// ////////////////////////////////////////////////////////////////////////////

/// The AVL tree provides a way of storing unique elements such that they
/// are always sorted and stay reachable within a logarithmic number of
/// comparisons.  After every insertion and removal the tree rebalances
/// itself with local rotations, keeping every node's balance factor (left
/// height minus right height) within `{-1, 0, 1}`.
///
/// By default the tree uses the comparison function `a.partial_cmp(b)`,
/// which covers every type implementing `PartialOrd`; a value that cannot
/// be ordered (such as `f64::NAN`) is rejected with
/// [`TreeError::Unorderable`] before the structure is touched.
///
/// The tree has an associated comparison function which **must** be
/// well-behaved.  Specifically, given some ordering function `f(a, b)`, it
/// must satisfy the following properties:
///
/// - Be well defined: `f(a, b)` should always return the same value.
/// - Be anti-symmetric: `f(a, b) == Greater` if and only if `f(b, a) ==
///   Less`, and `f(a, b) == Equal == f(b, a)`.
/// - Be transitive: if `f(a, b) == Greater` and `f(b, c) == Greater` then
///   `f(a, c) == Greater`.
///
/// A misbehaving function cannot corrupt memory, but it can scramble the
/// structure to the point where elements become unreachable.
pub struct AvlTree<T> {
    // Every node owns its children, so dropping the root tears down the
    // whole structure.
    root: Link<T>,
    len: usize,
    compare: Box<Compare<T>>,
}

// ///////////////////////////////////////////////
// Inherent methods
// ///////////////////////////////////////////////

impl<T> AvlTree<T>
where
    T: cmp::PartialOrd,
{
    /// Create a new, empty tree with the default comparison function of
    /// `|a, b| a.partial_cmp(b)`.  Any element which cannot be ordered
    /// under that function is rejected with [`TreeError::Unorderable`] at
    /// the call site rather than entering the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use avltree::AvlTree;
    ///
    /// let mut tree: AvlTree<i64> = AvlTree::new();
    /// assert!(tree.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        AvlTree {
            root: None,
            len: 0,
            compare: (Box::new(|a: &T, b: &T| a.partial_cmp(b))) as Box<Compare<T>>,
        }
    }

    /// Build a tree from the elements of `iterable`, inserted in sequence
    /// order.  Elements comparing equal to an already stored one are
    /// skipped, exactly as repeated [`AvlTree::insert`] calls would skip
    /// them.
    ///
    /// This is the fallible counterpart of `collect`; use it when the
    /// element type may produce unorderable values.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Unorderable`] on the first element the default
    /// comparison cannot place, dropping the partially built tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use avltree::{AvlTree, TreeError};
    ///
    /// let tree = AvlTree::try_from_iter([50, 25, 75, 25])?;
    /// assert_eq!(tree.len(), 3);
    ///
    /// let nan = AvlTree::try_from_iter([1.0, f64::NAN]);
    /// assert_eq!(nan.err(), Some(TreeError::Unorderable));
    /// # Ok::<(), TreeError>(())
    /// ```
    pub fn try_from_iter<I>(iterable: I) -> Result<Self, TreeError>
    where
        I: iter::IntoIterator<Item = T>,
    {
        let mut tree = AvlTree::new();
        for element in iterable {
            tree.insert(element)?;
        }
        Ok(tree)
    }
}

impl<T> AvlTree<T> {
    /// Create a new, empty tree using the provided function to determine
    /// the ordering of elements within it.
    ///
    /// The function must be a total order over the values actually
    /// inserted; see the type-level documentation for the properties it
    /// has to satisfy.
    ///
    /// # Examples
    ///
    /// ```
    /// use avltree::AvlTree;
    /// use std::cmp::Ordering;
    ///
    /// // Store even numbers before odd ones and sort as usual within the
    /// // same parity group.
    /// let mut tree = AvlTree::with_comp(|a: &u64, b: &u64| {
    ///     if a % 2 == b % 2 {
    ///         a.cmp(b)
    ///     } else if a % 2 == 0 {
    ///         Ordering::Less
    ///     } else {
    ///         Ordering::Greater
    ///     }
    /// });
    /// for i in 0..10 {
    ///     tree.insert(i)?;
    /// }
    /// let values: Vec<u64> = tree.iter().copied().collect();
    /// assert_eq!(values, [0, 2, 4, 6, 8, 1, 3, 5, 7, 9]);
    /// # Ok::<(), avltree::TreeError>(())
    /// ```
    #[inline]
    pub fn with_comp<F>(f: F) -> Self
    where
        F: 'static + Fn(&T, &T) -> Ordering + Send + Sync,
    {
        AvlTree {
            root: None,
            len: 0,
            compare: (Box::new(move |a: &T, b: &T| Some(f(a, b)))) as Box<Compare<T>>,
        }
    }

    /// Insert `value` into the tree, keeping it sorted and balanced.
    ///
    /// Returns `Ok(true)` if the value was inserted, and `Ok(false)` if an
    /// element comparing equal was already stored; in the latter case the
    /// tree is unchanged and `value` is dropped.  Equality here is the
    /// tree's ordering, not identity, so a distinct but equal-comparing
    /// instance does not replace the stored one.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Unorderable`] if `value` cannot be ordered by
    /// the tree's comparison function.  The check happens before the
    /// descent, so the tree is never modified on error.
    ///
    /// # Examples
    ///
    /// ```
    /// use avltree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// assert!(tree.insert(5)?);
    /// assert!(!tree.insert(5)?);
    /// assert_eq!(tree.len(), 1);
    /// # Ok::<(), avltree::TreeError>(())
    /// ```
    pub fn insert(&mut self, value: T) -> Result<bool, TreeError> {
        self.check_orderable(&value)?;
        let inserted = AvlNode::insert(&mut self.root, value, &self.compare)?;
        if inserted {
            self.len += 1;
        }
        Ok(inserted)
    }

    /// Remove the element comparing equal to `value` and return it.
    ///
    /// The returned value is the instance the tree stored, not a copy of
    /// the argument, which matters when equality does not imply identity.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Unorderable`] if `value` cannot be ordered,
    /// and [`TreeError::NotFound`] if the tree is empty or stores no equal
    /// element.  Either way the tree is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use avltree::{AvlTree, TreeError};
    ///
    /// let mut tree = AvlTree::try_from_iter([2, 1, 3])?;
    /// assert_eq!(tree.remove(&2)?, 2);
    /// assert_eq!(tree.remove(&2), Err(TreeError::NotFound));
    /// assert_eq!(tree.len(), 2);
    /// # Ok::<(), TreeError>(())
    /// ```
    pub fn remove(&mut self, value: &T) -> Result<T, TreeError> {
        self.check_orderable(value)?;
        let removed = AvlNode::remove(&mut self.root, value, &self.compare)?;
        self.len -= 1;
        Ok(removed)
    }

    /// Borrow the stored element comparing equal to `value`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Unorderable`] if `value` cannot be ordered,
    /// and [`TreeError::NotFound`] if no equal element is stored.
    ///
    /// # Examples
    ///
    /// ```
    /// use avltree::AvlTree;
    ///
    /// let tree = AvlTree::try_from_iter([1, 2, 3])?;
    /// assert_eq!(tree.get(&2)?, &2);
    /// assert!(tree.get(&4).is_err());
    /// # Ok::<(), avltree::TreeError>(())
    /// ```
    pub fn get(&self, value: &T) -> Result<&T, TreeError> {
        self.check_orderable(value)?;
        AvlNode::find(&self.root, value, &self.compare).map(|node| &node.value)
    }

    /// Report whether an element comparing equal to `value` is stored.
    /// Unlike [`AvlTree::get`], absence is an ordinary `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Unorderable`] if `value` cannot be ordered.
    ///
    /// # Examples
    ///
    /// ```
    /// use avltree::AvlTree;
    ///
    /// let tree = AvlTree::try_from_iter([1, 2, 3])?;
    /// assert!(tree.contains(&2)?);
    /// assert!(!tree.contains(&4)?);
    /// # Ok::<(), avltree::TreeError>(())
    /// ```
    pub fn contains(&self, value: &T) -> Result<bool, TreeError> {
        self.check_orderable(value)?;
        match AvlNode::find(&self.root, value, &self.compare) {
            Ok(_) => Ok(true),
            Err(TreeError::NotFound) => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Returns the number of stored elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use avltree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.extend(0..10);
    /// assert_eq!(tree.len(), 10);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree contains no elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use avltree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// assert!(tree.is_empty());
    /// tree.insert(1).unwrap();
    /// assert!(!tree.is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Clears the tree, removing all values and keeping the comparison
    /// function.
    ///
    /// # Examples
    ///
    /// ```
    /// use avltree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.extend(0..10);
    /// tree.clear();
    /// assert!(tree.is_empty());
    /// ```
    #[inline]
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// Height of the tree: the number of edges on the longest downward
    /// path from the root.  An empty tree has height -1 and a lone root
    /// height 0.  The value is cached on the root, so this is O(1).
    ///
    /// # Examples
    ///
    /// ```
    /// use avltree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// assert_eq!(tree.height(), -1);
    /// tree.insert(2)?;
    /// assert_eq!(tree.height(), 0);
    /// tree.insert(1)?;
    /// tree.insert(3)?;
    /// assert_eq!(tree.height(), 1);
    /// # Ok::<(), avltree::TreeError>(())
    /// ```
    #[inline]
    pub fn height(&self) -> i32 {
        self.root.as_ref().map_or(-1, |node| node.height)
    }

    /// Depth of the element comparing equal to `value`, counting the root
    /// as depth 1.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Unorderable`] if `value` cannot be ordered,
    /// and [`TreeError::NotFound`] if no equal element is stored.
    ///
    /// # Examples
    ///
    /// ```
    /// use avltree::AvlTree;
    ///
    /// let tree = AvlTree::try_from_iter([2, 1, 3])?;
    /// assert_eq!(tree.depth(&2)?, 1);
    /// assert_eq!(tree.depth(&1)?, 2);
    /// assert_eq!(tree.depth(&3)?, 2);
    /// # Ok::<(), avltree::TreeError>(())
    /// ```
    pub fn depth(&self, value: &T) -> Result<usize, TreeError> {
        self.check_orderable(value)?;
        AvlNode::depth(&self.root, value, &self.compare)
    }

    /// Values on the unique tree path connecting `start` and `end`, both
    /// inclusive, in walking order from `start` to `end`.
    ///
    /// The path climbs from `start` to the closest common ancestor of the
    /// two endpoints and then descends to `end`; when one endpoint is an
    /// ancestor of the other the path is the plain descent between them.
    /// Asking for the path from a value to itself yields that single
    /// value.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Unorderable`] if either endpoint cannot be
    /// ordered (checked for both before traversal), and
    /// [`TreeError::NotFound`] if either endpoint is not stored.
    ///
    /// # Examples
    ///
    /// ```
    /// use avltree::AvlTree;
    ///
    /// let tree = AvlTree::try_from_iter([50, 25, 75, 12, 37])?;
    /// assert_eq!(tree.path_between(&12, &37)?, [&12, &25, &37]);
    /// assert_eq!(tree.path_between(&37, &12)?, [&37, &25, &12]);
    /// assert_eq!(tree.path_between(&75, &75)?, [&75]);
    /// # Ok::<(), avltree::TreeError>(())
    /// ```
    pub fn path_between(&self, start: &T, end: &T) -> Result<Vec<&T>, TreeError> {
        self.check_orderable(start)?;
        self.check_orderable(end)?;
        AvlNode::path_between(&self.root, start, end, &self.compare)
    }

    /// Returns an iterator over the elements in ascending order under the
    /// tree's comparison function.
    ///
    /// # Examples
    ///
    /// ```
    /// use avltree::AvlTree;
    ///
    /// let tree = AvlTree::try_from_iter([3, 1, 2])?;
    /// let values: Vec<i32> = tree.iter().copied().collect();
    /// assert_eq!(values, [1, 2, 3]);
    /// # Ok::<(), avltree::TreeError>(())
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.root, self.len)
    }
}

// ///////////////////////////////////////////////
// Internal methods
// ///////////////////////////////////////////////

impl<T> AvlTree<T> {
    /// Checks whether the comparison function can place `value` at all by
    /// comparing it against itself.  Runs before any structural work so
    /// that a failing call leaves the tree untouched.
    fn check_orderable(&self, value: &T) -> Result<(), TreeError> {
        order(&self.compare, value, value).map(|_| ())
    }
}

// ///////////////////////////////////////////////
// Trait implementation
// ///////////////////////////////////////////////

impl<T: PartialOrd> default::Default for AvlTree<T> {
    fn default() -> AvlTree<T> {
        AvlTree::new()
    }
}

/// This implementation of PartialEq only checks that the *values* are
/// equal; it does not compare the comparison functions, so two trees with
/// different orderings but the same contents are equal.  It uses `T`'s
/// implementation of PartialEq and *does not* use the owning tree's
/// comparison function.
impl<A, B> cmp::PartialEq<AvlTree<B>> for AvlTree<A>
where
    A: cmp::PartialEq<B>,
{
    #[inline]
    fn eq(&self, other: &AvlTree<B>) -> bool {
        self.len() == other.len() && self.iter().eq(other)
    }
    #[allow(clippy::partialeq_ne_impl)]
    #[inline]
    fn ne(&self, other: &AvlTree<B>) -> bool {
        self.len != other.len || self.iter().ne(other)
    }
}

impl<T> cmp::Eq for AvlTree<T> where T: cmp::Eq {}

impl<A, B> cmp::PartialOrd<AvlTree<B>> for AvlTree<A>
where
    A: cmp::PartialOrd<B>,
{
    #[inline]
    fn partial_cmp(&self, other: &AvlTree<B>) -> Option<Ordering> {
        self.iter().partial_cmp(other)
    }
}

impl<T> Ord for AvlTree<T>
where
    T: cmp::Ord,
{
    #[inline]
    fn cmp(&self, other: &AvlTree<T>) -> Ordering {
        self.iter().cmp(other)
    }
}

impl<T> Extend<T> for AvlTree<T> {
    /// # Panics
    ///
    /// Panics if an element cannot be ordered by the tree's comparison
    /// function; use [`AvlTree::insert`] or [`AvlTree::try_from_iter`] to
    /// handle such elements as errors instead.
    #[inline]
    #[expect(
        clippy::expect_used,
        reason = "The Extend contract has no error channel."
    )]
    fn extend<I: iter::IntoIterator<Item = T>>(&mut self, iterable: I) {
        let iterator = iterable.into_iter();
        for element in iterator {
            self.insert(element).expect("element cannot be ordered.");
        }
    }
}

impl<T> fmt::Debug for AvlTree<T>
where
    T: fmt::Debug,
{
    /// Renders the structure recursively as `{value, left, right}`, with
    /// `{}` standing in for an absent subtree and for the empty tree.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fn node<T: fmt::Debug>(link: &Link<T>, f: &mut fmt::Formatter) -> fmt::Result {
            match link.as_deref() {
                Some(n) => {
                    write!(f, "{{{:?}, ", n.value)?;
                    node(&n.left, f)?;
                    write!(f, ", ")?;
                    node(&n.right, f)?;
                    write!(f, "}}")
                }
                None => write!(f, "{{}}"),
            }
        }
        node(&self.root, f)
    }
}

impl<T> fmt::Display for AvlTree<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[")?;

        for (i, entry) in self.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", entry)?;
        }
        write!(f, "]")
    }
}

impl<T> iter::IntoIterator for AvlTree<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter::new(self.root, self.len)
    }
}
impl<'a, T> iter::IntoIterator for &'a AvlTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
impl<'a, T> iter::IntoIterator for &'a mut AvlTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T> iter::FromIterator<T> for AvlTree<T>
where
    T: PartialOrd,
{
    /// # Panics
    ///
    /// Panics if an element cannot be ordered; see
    /// [`AvlTree::try_from_iter`] for the fallible form.
    #[inline]
    fn from_iter<I>(iter: I) -> AvlTree<T>
    where
        I: iter::IntoIterator<Item = T>,
    {
        let mut tree = AvlTree::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Hash> Hash for AvlTree<T> {
    #[inline]
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        for elt in self {
            elt.hash(state);
        }
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Tests
// ////////////////////////////////////////////////////////////////////////////
