use std::collections::BTreeMap;
use std::fmt::Debug;
use crate::error::OpticsError;
use crate::Result;

/// Generic storage trait for scene objects
pub trait Storage<T, H> {
    /// Creates a new empty storage
    fn new() -> Self;

    /// Adds an item to the storage and returns its handle
    fn add(&mut self, item: T) -> H;

    /// Gets a reference to an item by its handle
    fn get(&self, handle: H) -> Option<&T>;

    /// Gets a mutable reference to an item by its handle
    fn get_mut(&mut self, handle: H) -> Option<&mut T>;

    /// Removes an item from the storage
    fn remove(&mut self, handle: H) -> Option<T>;

    /// Returns the number of items in the storage
    fn len(&self) -> usize;

    /// Returns whether the storage is empty
    fn is_empty(&self) -> bool;

    /// Clears all items from the storage
    fn clear(&mut self);

    /// Returns all handles, in insertion order
    fn handles(&self) -> Vec<H>;

    /// Returns an iterator over all items, in insertion order
    fn iter<'a>(&'a self) -> impl Iterator<Item = (H, &'a T)> + 'a where T: 'a;

    /// Returns a mutable iterator over all items, in insertion order
    fn iter_mut<'a>(&'a mut self) -> impl Iterator<Item = (H, &'a mut T)> + 'a where T: 'a;
}

/// A handle type issued by [`ObjectStorage`]
pub trait Handle: Copy + Ord + Debug {
    /// Human-readable kind used in error messages
    const KIND: &'static str;

    fn from_raw(id: u32) -> Self;

    fn raw(self) -> u32;
}

/// Storage for real scene objects.
///
/// Handles are issued from an increasing counter and never reused, and the
/// backing map is ordered, so iteration always follows insertion order.
#[derive(Debug, Clone)]
pub struct ObjectStorage<H, T> {
    items: BTreeMap<H, T>,
    next_id: u32,
}

impl<H: Handle, T> Storage<T, H> for ObjectStorage<H, T> {
    fn new() -> Self {
        Self {
            items: BTreeMap::new(),
            next_id: 1, // Start at 1, so 0 can represent invalid handle
        }
    }

    fn add(&mut self, item: T) -> H {
        let handle = H::from_raw(self.next_id);
        self.next_id += 1;
        self.items.insert(handle, item);
        handle
    }

    fn get(&self, handle: H) -> Option<&T> {
        self.items.get(&handle)
    }

    fn get_mut(&mut self, handle: H) -> Option<&mut T> {
        self.items.get_mut(&handle)
    }

    fn remove(&mut self, handle: H) -> Option<T> {
        self.items.remove(&handle)
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn clear(&mut self) {
        self.items.clear();
    }

    fn handles(&self) -> Vec<H> {
        self.items.keys().copied().collect()
    }

    fn iter<'a>(&'a self) -> impl Iterator<Item = (H, &'a T)> + 'a where T: 'a {
        self.items.iter().map(|(h, item)| (*h, item))
    }

    fn iter_mut<'a>(&'a mut self) -> impl Iterator<Item = (H, &'a mut T)> + 'a where T: 'a {
        self.items.iter_mut().map(|(h, item)| (*h, item))
    }
}

impl<H: Handle, T> Default for ObjectStorage<H, T> {
    fn default() -> Self {
        <Self as Storage<T, H>>::new()
    }
}

impl<H: Handle, T> ObjectStorage<H, T> {
    /// Gets an object by its handle, returning an error if not found
    pub fn get_object(&self, handle: H) -> Result<&T> {
        self.items
            .get(&handle)
            .ok_or_else(|| OpticsError::ResourceNotFound(format!("{} with handle {:?} not found", H::KIND, handle)))
    }

    /// Gets a mutable reference to an object by its handle, returning an error if not found
    pub fn get_object_mut(&mut self, handle: H) -> Result<&mut T> {
        self.items
            .get_mut(&handle)
            .ok_or_else(|| OpticsError::ResourceNotFound(format!("{} with handle {:?} not found", H::KIND, handle)))
    }

    /// Iterates over the stored objects only, in insertion order
    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.items.values()
    }
}
