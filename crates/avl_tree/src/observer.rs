use std::fmt;

/// Direction of a single rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rotation {
    /// The pivot's right child becomes the subtree root.
    Left,
    /// The pivot's left child becomes the subtree root.
    Right,
}

/// Step reported while the tree mutates.
///
/// Keys are borrowed from the tree (or from the caller for `Delete` and
/// `NotFound`) and only live for the duration of the callback.
#[derive(Debug, PartialEq, Eq)]
pub enum TreeEvent<'a, K> {
    Insert(&'a K),
    Delete(&'a K),
    /// `pivot` is the node that moves down one level.
    Rotate {
        rotation: Rotation,
        pivot: &'a K,
    },
    NotFound(&'a K),
    EmptyTree,
}

impl<K: fmt::Display> fmt::Display for TreeEvent<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insert(key) => write!(f, "insert:{key}"),
            Self::Delete(key) => write!(f, "delete:{key}"),
            Self::Rotate {
                rotation: Rotation::Left,
                pivot,
            } => write!(f, "left rotation node: {pivot}"),
            Self::Rotate {
                rotation: Rotation::Right,
                pivot,
            } => write!(f, "right rotation node: {pivot}"),
            Self::NotFound(key) => write!(f, "no such key: {key}"),
            Self::EmptyTree => f.write_str("tree is empty"),
        }
    }
}

/// Receives [`TreeEvent`]s from [`AvlTree::insert_observed`] and
/// [`AvlTree::delete_observed`].
///
/// Implemented for every `FnMut(TreeEvent<'_, K>)` closure.
///
/// [`AvlTree::insert_observed`]: crate::AvlTree::insert_observed
/// [`AvlTree::delete_observed`]: crate::AvlTree::delete_observed
pub trait Observer<K> {
    fn observe(&mut self, event: TreeEvent<'_, K>);
}

impl<K, F> Observer<K> for F
where
    F: FnMut(TreeEvent<'_, K>),
{
    fn observe(&mut self, event: TreeEvent<'_, K>) {
        self(event)
    }
}

/// Observer that discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoTrace;

impl<K> Observer<K> for NoTrace {
    fn observe(&mut self, _event: TreeEvent<'_, K>) {}
}

/// Observer that forwards every event to `tracing` at trace level.
#[cfg(feature = "tracing")]
#[derive(Clone, Copy, Debug, Default)]
pub struct TraceLog;

#[cfg(feature = "tracing")]
impl<K: fmt::Debug> Observer<K> for TraceLog {
    fn observe(&mut self, event: TreeEvent<'_, K>) {
        match event {
            TreeEvent::Insert(key) => tracing::trace!(?key, "insert"),
            TreeEvent::Delete(key) => tracing::trace!(?key, "delete"),
            TreeEvent::Rotate { rotation, pivot } => {
                tracing::trace!(?rotation, ?pivot, "rotation")
            }
            TreeEvent::NotFound(key) => tracing::trace!(?key, "key not found"),
            TreeEvent::EmptyTree => tracing::trace!("delete on empty tree"),
        }
    }
}
