//! Fixed-size circular storage for machine states.

use std::fmt;

/// Position of a cell within a [`Ring`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RingAddress(usize);

impl RingAddress {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for RingAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// Array-backed ring whose size and contents are fixed at construction.
///
/// There is no insert or remove: a different topology means a new ring.
///
/// # Example
///
/// ```rust
/// use fielder::machine::Ring;
///
/// let ring = Ring::new(vec!["red", "green", "yellow"]);
/// let last = ring.addresses().last().unwrap();
/// let wrapped = ring.next(last).unwrap();
/// assert_eq!(ring.get(wrapped), Some(&"red"));
/// ```
#[derive(Clone, Debug)]
pub struct Ring<T> {
    cells: Box<[T]>,
}

impl<T> Ring<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            cells: items.into_boxed_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, address: RingAddress) -> Option<&T> {
        self.cells.get(address.0)
    }

    /// The address following `address`, wrapping from the last cell to the first.
    pub fn next(&self, address: RingAddress) -> Option<RingAddress> {
        if address.0 >= self.len() {
            return None;
        }
        Some(RingAddress((address.0 + 1) % self.len()))
    }

    /// The address preceding `address`, wrapping from the first cell to the last.
    pub fn prev(&self, address: RingAddress) -> Option<RingAddress> {
        if address.0 >= self.len() {
            return None;
        }
        Some(RingAddress((address.0 + self.len() - 1) % self.len()))
    }

    pub fn addresses(&self) -> impl Iterator<Item = RingAddress> {
        (0..self.len()).map(RingAddress)
    }

    pub fn iter(&self) -> impl Iterator<Item = (RingAddress, &T)> {
        self.cells
            .iter()
            .enumerate()
            .map(|(index, cell)| (RingAddress(index), cell))
    }
}
