//! Minimum-priority queue of candidate merges.
//!
//! Links are ordered by weight using `f64::total_cmp`. Equal weights are
//! resolved by the configured [`TieBreak`] so runs are reproducible; the
//! all-pairs seed assigns sequence numbers in lexicographic pair order, which
//! makes both policies agree for seeded runs.

use std::{
    cmp::{Ordering, Reverse},
    collections::BinaryHeap,
};

use crate::error::{LinkageError, Result};

/// Secondary ordering applied to links of equal weight.
///
/// # Examples
/// ```
/// use sylva_core::TieBreak;
///
/// assert_eq!(TieBreak::default(), TieBreak::InsertionOrder);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TieBreak {
    /// Earlier sequence numbers win.
    #[default]
    InsertionOrder,
    /// Lexicographically smaller `(left, right)` pairs win; sequence numbers
    /// break any remaining ties.
    InstancePair,
}

/// A candidate merge between two instances.
///
/// Endpoints are stored canonically with `left <= right` and the weight is
/// always finite and non-negative.
///
/// # Examples
/// ```
/// use sylva_core::Link;
///
/// let link = Link::new(4, 1, 2.5, 0)?;
/// assert_eq!((link.left(), link.right()), (1, 4));
/// assert_eq!(link.weight(), 2.5);
/// assert!(Link::new(0, 1, f64::NAN, 1).is_err());
/// # Ok::<(), sylva_core::LinkageError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    left: usize,
    right: usize,
    weight: f64,
    sequence: u64,
}

impl Link {
    /// Creates a link, ordering the endpoints canonically.
    ///
    /// # Errors
    /// Returns [`LinkageError::InvalidDissimilarity`] when `weight` is NaN,
    /// infinite or negative.
    pub fn new(a: usize, b: usize, weight: f64, sequence: u64) -> Result<Self> {
        let (left, right) = if a <= b { (a, b) } else { (b, a) };
        check_weight(left, right, weight)?;
        Ok(Self {
            left,
            right,
            weight,
            sequence,
        })
    }

    /// Returns the smaller instance index.
    #[must_use]
    #[rustfmt::skip]
    pub const fn left(&self) -> usize { self.left }

    /// Returns the larger instance index.
    #[must_use]
    #[rustfmt::skip]
    pub const fn right(&self) -> usize { self.right }

    /// Returns the dissimilarity weight.
    #[must_use]
    #[rustfmt::skip]
    pub const fn weight(&self) -> f64 { self.weight }

    /// Returns the deterministic tie-break sequence.
    #[must_use]
    #[rustfmt::skip]
    pub const fn sequence(&self) -> u64 { self.sequence }
}

/// Rejects weights that cannot serve as merge heights.
pub(crate) fn check_weight(left: usize, right: usize, weight: f64) -> Result<()> {
    if weight.is_finite() && weight >= 0.0 {
        Ok(())
    } else {
        Err(LinkageError::InvalidDissimilarity {
            left,
            right,
            value: weight,
        })
    }
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    link: Link,
    tie_break: TieBreak,
}

impl Entry {
    const fn secondary_key(&self) -> (usize, usize, u64) {
        match self.tie_break {
            TieBreak::InsertionOrder => (0, 0, self.link.sequence),
            TieBreak::InstancePair => (self.link.left, self.link.right, self.link.sequence),
        }
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.link
            .weight
            .total_cmp(&other.link.weight)
            .then_with(|| self.secondary_key().cmp(&other.secondary_key()))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Binary min-heap of [`Link`]s.
///
/// # Examples
/// ```
/// use sylva_core::{Link, LinkQueue, TieBreak};
///
/// let mut queue = LinkQueue::from_links(
///     vec![Link::new(0, 1, 3.0, 0)?, Link::new(1, 2, 1.0, 1)?],
///     TieBreak::InsertionOrder,
/// );
/// queue.enqueue(0, 2, 2.0)?;
/// assert_eq!(queue.dequeue_min()?.weight(), 1.0);
/// assert_eq!(queue.dequeue_min()?.weight(), 2.0);
/// assert_eq!(queue.dequeue_min()?.weight(), 3.0);
/// assert!(queue.dequeue_min().is_err());
/// # Ok::<(), sylva_core::LinkageError>(())
/// ```
#[derive(Debug, Clone)]
pub struct LinkQueue {
    heap: BinaryHeap<Reverse<Entry>>,
    tie_break: TieBreak,
    next_sequence: u64,
}

impl LinkQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new(tie_break: TieBreak) -> Self {
        Self {
            heap: BinaryHeap::new(),
            tie_break,
            next_sequence: 0,
        }
    }

    /// Bulk-loads `links` in linear time.
    ///
    /// Subsequent [`enqueue`](Self::enqueue) calls continue numbering after
    /// the largest sequence seen here.
    #[must_use]
    pub fn from_links(links: Vec<Link>, tie_break: TieBreak) -> Self {
        let next_sequence = links
            .iter()
            .map(|link| link.sequence.saturating_add(1))
            .max()
            .unwrap_or(0);
        let entries: Vec<_> = links
            .into_iter()
            .map(|link| Reverse(Entry { link, tie_break }))
            .collect();
        Self {
            heap: BinaryHeap::from(entries),
            tie_break,
            next_sequence,
        }
    }

    /// Inserts a link between `a` and `b`, assigning the next sequence number.
    ///
    /// # Errors
    /// Returns [`LinkageError::InvalidDissimilarity`] for NaN, infinite or
    /// negative weights; the queue is left unchanged.
    pub fn enqueue(&mut self, a: usize, b: usize, weight: f64) -> Result<Link> {
        let link = Link::new(a, b, weight, self.next_sequence)?;
        self.next_sequence = self.next_sequence.saturating_add(1);
        self.heap.push(Reverse(Entry {
            link,
            tie_break: self.tie_break,
        }));
        Ok(link)
    }

    /// Removes and returns the minimum link.
    ///
    /// # Errors
    /// Returns [`LinkageError::EmptyQueue`] when the queue holds no links.
    pub fn dequeue_min(&mut self) -> Result<Link> {
        self.heap
            .pop()
            .map(|Reverse(entry)| entry.link)
            .ok_or(LinkageError::EmptyQueue)
    }

    /// Returns the minimum link without removing it.
    #[must_use]
    pub fn peek_min(&self) -> Option<Link> {
        self.heap.peek().map(|Reverse(entry)| entry.link)
    }

    /// Returns the number of queued links.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns whether the queue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns the tie-break policy.
    #[must_use]
    pub const fn tie_break(&self) -> TieBreak {
        self.tie_break
    }
}
