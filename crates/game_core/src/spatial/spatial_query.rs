//! Abstract spatial query interface for broad-phase collision detection
//!
//! Lets collision code swap partitioning schemes without changing callers.
//! [`QuadTree`] is the production index; [`LinearIndex`] scans every object
//! and serves as a reference for small scenes and tests.

use std::rc::Rc;

use super::QuadTree;
use crate::physics::collision::{Bounded, Rect2};

/// Abstract interface for spatial partitioning used in broad-phase collision detection
pub trait SpatialQuery<T: Bounded + ?Sized> {
    /// Insert an object
    fn insert(&mut self, object: Rc<T>);

    /// Remove an object by identity
    fn remove(&mut self, object: &Rc<T>) -> bool;

    /// Swap one object handle for another
    fn replace(&mut self, old: &Rc<T>, new: Rc<T>) -> bool;

    /// Objects whose bounding box intersects `region`
    fn query(&self, region: &Rect2) -> Vec<Rc<T>>;

    /// Identity membership test
    fn contains(&self, object: &Rc<T>) -> bool;

    /// Number of stored objects
    fn len(&self) -> usize;

    /// Whether no objects are stored
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Broad-phase candidates for `object`: everything overlapping its bounds except itself
    fn candidates(&self, object: &Rc<T>) -> Vec<Rc<T>> {
        let mut found = self.query(&object.bounding_box());
        found.retain(|other| !Rc::ptr_eq(other, object));
        found
    }
}

impl<T: Bounded + ?Sized> SpatialQuery<T> for QuadTree<T> {
    fn insert(&mut self, object: Rc<T>) {
        Self::insert(self, object);
    }

    fn remove(&mut self, object: &Rc<T>) -> bool {
        Self::remove(self, object)
    }

    fn replace(&mut self, old: &Rc<T>, new: Rc<T>) -> bool {
        Self::replace(self, old, new)
    }

    fn query(&self, region: &Rect2) -> Vec<Rc<T>> {
        Self::query(self, region)
    }

    fn contains(&self, object: &Rc<T>) -> bool {
        Self::contains(self, object)
    }

    fn len(&self) -> usize {
        Self::len(self)
    }
}

/// Unpartitioned index that tests every object on each query
#[derive(Debug)]
pub struct LinearIndex<T: ?Sized> {
    objects: Vec<Rc<T>>,
}

impl<T: ?Sized> LinearIndex<T> {
    /// Create an empty index
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    fn position_of(&self, object: &Rc<T>) -> Option<usize> {
        self.objects.iter().position(|o| Rc::ptr_eq(o, object))
    }
}

impl<T: ?Sized> Default for LinearIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Bounded + ?Sized> SpatialQuery<T> for LinearIndex<T> {
    fn insert(&mut self, object: Rc<T>) {
        self.objects.push(object);
    }

    fn remove(&mut self, object: &Rc<T>) -> bool {
        match self.position_of(object) {
            Some(index) => {
                self.objects.remove(index);
                true
            }
            None => false,
        }
    }

    fn replace(&mut self, old: &Rc<T>, new: Rc<T>) -> bool {
        match self.position_of(old) {
            Some(index) => {
                self.objects[index] = new;
                true
            }
            None => false,
        }
    }

    fn query(&self, region: &Rect2) -> Vec<Rc<T>> {
        self.objects
            .iter()
            .filter(|o| o.bounding_box().intersects(region))
            .cloned()
            .collect()
    }

    fn contains(&self, object: &Rc<T>) -> bool {
        self.position_of(object).is_some()
    }

    fn len(&self) -> usize {
        self.objects.len()
    }
}
