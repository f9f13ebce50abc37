//! Quadtree spatial partitioning structure
//!
//! Divides 2D space into hierarchical quarter regions for fast broad-phase
//! queries. An object descends while exactly one quadrant of the current node
//! fully contains it; objects straddling a quadrant boundary, lying outside
//! every quadrant, or reaching `max_depth` are stored on the node itself.
//! Every object is stored in exactly one node.
//!
//! Objects are held as `Rc` handles and compared by pointer identity, so two
//! equal-looking shapes are still distinct entries.

use std::fmt;
use std::rc::Rc;

use super::SpatialError;
use crate::config::QuadTreeConfig;
use crate::foundation::collections::{NodeArena, NodeKey};
use crate::physics::collision::{Bounded, Rect2};

/// One of the four quarter regions of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// Upper-right quarter
    NorthEast,
    /// Lower-right quarter
    SouthEast,
    /// Lower-left quarter
    SouthWest,
    /// Upper-left quarter
    NorthWest,
}

impl Quadrant {
    /// All quadrants in traversal order
    pub const ALL: [Self; 4] = [
        Self::NorthEast,
        Self::SouthEast,
        Self::SouthWest,
        Self::NorthWest,
    ];

    /// Position of this quadrant in [`Quadrant::ALL`]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Single node in the quadtree hierarchy
#[derive(Debug)]
pub struct QuadTreeNode<T: ?Sized> {
    parent: Option<NodeKey>,
    region: Rect2,
    quadrants: [Rect2; 4],
    children: [Option<NodeKey>; 4],
    level: u32,
    elements: Vec<Rc<T>>,
}

impl<T: ?Sized> QuadTreeNode<T> {
    fn new(region: Rect2, level: u32, parent: Option<NodeKey>) -> Self {
        Self {
            parent,
            region,
            quadrants: region.quadrants(),
            children: [None; 4],
            level,
            elements: Vec::new(),
        }
    }

    /// World-space bounds of this node
    pub fn region(&self) -> Rect2 {
        self.region
    }

    /// Depth in the tree (0 = root)
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Parent node, `None` for the root
    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    /// Child node for a quadrant, if it has been created
    pub fn child(&self, quadrant: Quadrant) -> Option<NodeKey> {
        self.children[quadrant.index()]
    }

    /// Bounds of a quadrant whether or not its child exists
    pub fn quadrant_region(&self, quadrant: Quadrant) -> Rect2 {
        self.quadrants[quadrant.index()]
    }

    /// Objects stored directly on this node
    pub fn elements(&self) -> &[Rc<T>] {
        &self.elements
    }

    /// Check if this node has no children
    pub fn is_leaf(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }

    fn position_of(&self, object: &Rc<T>) -> Option<usize> {
        self.elements.iter().position(|e| Rc::ptr_eq(e, object))
    }
}

impl<T: Bounded + ?Sized> QuadTreeNode<T> {
    /// The quadrant that fully contains `object`, if exactly one does
    fn fitting_quadrant(&self, object: &T) -> Option<Quadrant> {
        let mut fitting = Quadrant::ALL
            .into_iter()
            .filter(|q| object.fits_into(&self.quadrants[q.index()]));
        match (fitting.next(), fitting.next()) {
            (Some(quadrant), None) => Some(quadrant),
            _ => None,
        }
    }
}

/// Two stored objects whose bounding boxes overlap
pub struct CollisionPair<T: ?Sized> {
    /// Object found first in pre-order (or stored higher in the tree)
    pub first: Rc<T>,
    /// The other object
    pub second: Rc<T>,
}

impl<T: ?Sized> CollisionPair<T> {
    /// Whether `object` is one side of the pair
    pub fn involves(&self, object: &Rc<T>) -> bool {
        Rc::ptr_eq(&self.first, object) || Rc::ptr_eq(&self.second, object)
    }

    /// The side that is not `object`, if `object` is in the pair
    pub fn other(&self, object: &Rc<T>) -> Option<&Rc<T>> {
        if Rc::ptr_eq(&self.first, object) {
            Some(&self.second)
        } else if Rc::ptr_eq(&self.second, object) {
            Some(&self.first)
        } else {
            None
        }
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for CollisionPair<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CollisionPair")
            .field(&self.first)
            .field(&self.second)
            .finish()
    }
}

/// Quadtree spatial partitioning structure
#[derive(Debug)]
pub struct QuadTree<T: ?Sized> {
    nodes: NodeArena<QuadTreeNode<T>>,
    root: NodeKey,
    max_depth: u32,
    /// Deepest level any object has been stored at
    depth: u32,
    /// Live object count
    no_objects: usize,
}

impl<T: Bounded + ?Sized> QuadTree<T> {
    /// Create a new quadtree covering `bounds`
    ///
    /// Nodes at `max_depth` never subdivide; `0` keeps everything on the root.
    pub fn new(bounds: Rect2, max_depth: u32) -> Result<Self, SpatialError> {
        if bounds.is_empty() {
            return Err(SpatialError::EmptyRegion { region: bounds });
        }
        let mut nodes = NodeArena::with_key();
        let root = nodes.insert(QuadTreeNode::new(bounds, 0, None));
        log::debug!("Created quadtree over {} with max depth {}", bounds, max_depth);
        Ok(Self {
            nodes,
            root,
            max_depth,
            depth: 0,
            no_objects: 0,
        })
    }

    /// Create a quadtree from configuration
    pub fn from_config(config: &QuadTreeConfig) -> Result<Self, SpatialError> {
        Self::new(config.bounds, config.max_depth)
    }

    /// Insert an object, returning the level it was stored at
    ///
    /// Inserting a handle that is already stored is a caller bug.
    pub fn insert(&mut self, object: Rc<T>) -> u32 {
        debug_assert!(!self.contains(&object), "object is already in the quadtree");
        let level = self.insert_at(self.root, object);
        self.no_objects += 1;
        self.depth = self.depth.max(level);
        level
    }

    /// Remove an object by identity
    pub fn remove(&mut self, object: &Rc<T>) -> bool {
        let removed = self.remove_at(self.root, object);
        if removed {
            self.no_objects -= 1;
        }
        removed
    }

    /// Re-file an object whose extent changed in place
    ///
    /// An object that left its node's region climbs from the parent to the
    /// nearest ancestor that holds it and descends again from there. There
    /// is no global rebalancing.
    pub fn update(&mut self, object: &Rc<T>) -> bool {
        self.update_at(self.root, object)
    }

    /// Swap `old` for `new`, keeping the object count
    ///
    /// `new` takes `old`'s slot when it still fits that node; otherwise it is
    /// inserted starting at the nearest ancestor that holds it. Returns
    /// `false` if `old` is not stored.
    pub fn replace(&mut self, old: &Rc<T>, new: Rc<T>) -> bool {
        debug_assert!(
            Rc::ptr_eq(old, &new) || !self.contains(&new),
            "replacement is already in the quadtree"
        );
        self.replace_at(self.root, old, &new)
    }

    /// All objects whose bounding box intersects `region`
    ///
    /// Results are ordered by node in pre-order (NE, SE, SW, NW), and by
    /// insertion within a node.
    pub fn query(&self, region: &Rect2) -> Vec<Rc<T>> {
        let mut results = Vec::new();
        self.query_at(self.root, region, &mut results);
        results
    }

    /// Whether the object is stored anywhere in the tree
    pub fn contains(&self, object: &Rc<T>) -> bool {
        self.nodes().any(|node| node.position_of(object).is_some())
    }

    /// Level of the node currently holding `object`
    pub fn level_of(&self, object: &Rc<T>) -> Option<u32> {
        self.nodes()
            .find(|node| node.position_of(object).is_some())
            .map(QuadTreeNode::level)
    }

    /// Every pair of stored objects whose bounding boxes intersect, each once
    ///
    /// Objects in sibling subtrees lie in disjoint quadrants, so each object
    /// is only tested against its own node and its ancestors.
    pub fn candidate_pairs(&self) -> Vec<CollisionPair<T>> {
        let mut pairs = Vec::new();
        let mut ancestors = Vec::new();
        self.collect_pairs(self.root, &mut ancestors, &mut pairs);
        pairs
    }

    /// Remove every object and collapse the tree to its root
    pub fn clear(&mut self) {
        let bounds = self.bounds();
        self.nodes.clear();
        self.root = self.nodes.insert(QuadTreeNode::new(bounds, 0, None));
        self.depth = 0;
        self.no_objects = 0;
    }

    fn insert_at(&mut self, start: NodeKey, object: Rc<T>) -> u32 {
        let mut key = start;
        loop {
            let node = &self.nodes[key];
            if node.level < self.max_depth {
                if let Some(quadrant) = node.fitting_quadrant(&object) {
                    key = self.child_or_create(key, quadrant);
                    continue;
                }
            }
            let node = &mut self.nodes[key];
            node.elements.push(object);
            return node.level;
        }
    }

    /// Nearest strict ancestor of `key` whose region holds `object`, or the root
    ///
    /// Starts at the parent, so an object that left its node always moves at
    /// least one level up before descending again.
    fn fitting_ancestor(&self, key: NodeKey, object: &Rc<T>) -> NodeKey {
        let mut current = self.nodes[key].parent.unwrap_or(key);
        while !object.fits_into(&self.nodes[current].region) {
            match self.nodes[current].parent {
                Some(parent) => current = parent,
                None => break,
            }
        }
        current
    }

    fn child_or_create(&mut self, key: NodeKey, quadrant: Quadrant) -> NodeKey {
        let parent = &self.nodes[key];
        if let Some(child) = parent.children[quadrant.index()] {
            return child;
        }
        let node = QuadTreeNode::new(
            parent.quadrants[quadrant.index()],
            parent.level + 1,
            Some(key),
        );
        let child = self.nodes.insert(node);
        self.nodes[key].children[quadrant.index()] = Some(child);
        child
    }

    fn remove_at(&mut self, key: NodeKey, object: &Rc<T>) -> bool {
        let node = &mut self.nodes[key];
        if let Some(index) = node.position_of(object) {
            node.elements.remove(index);
            return true;
        }
        let children = node.children;
        children
            .into_iter()
            .flatten()
            .any(|child| self.remove_at(child, object))
    }

    fn update_at(&mut self, key: NodeKey, object: &Rc<T>) -> bool {
        let node = &self.nodes[key];
        if let Some(index) = node.position_of(object) {
            if object.fits_into(&node.region) {
                return false;
            }
            let start = self.fitting_ancestor(key, object);
            let object = self.nodes[key].elements.remove(index);
            let level = self.insert_at(start, object);
            self.depth = self.depth.max(level);
            log::trace!(
                "Quadtree update moved object from level {} to {}",
                self.nodes[key].level,
                level
            );
            return true;
        }

        let children = node.children;
        let mut changed = false;
        for child in children.into_iter().flatten() {
            changed |= self.update_at(child, object);
        }
        changed
    }

    fn replace_at(&mut self, key: NodeKey, old: &Rc<T>, new: &Rc<T>) -> bool {
        let node = &mut self.nodes[key];
        if let Some(index) = node.position_of(old) {
            if new.fits_into(&node.region) {
                node.elements[index] = Rc::clone(new);
            } else {
                node.elements.remove(index);
                let start = self.fitting_ancestor(key, new);
                let level = self.insert_at(start, Rc::clone(new));
                self.depth = self.depth.max(level);
                log::trace!("Quadtree replace re-inserted object at level {}", level);
            }
            return true;
        }
        let children = node.children;
        children
            .into_iter()
            .flatten()
            .any(|child| self.replace_at(child, old, new))
    }

    fn query_at(&self, key: NodeKey, region: &Rect2, results: &mut Vec<Rc<T>>) {
        let node = &self.nodes[key];
        results.extend(
            node.elements
                .iter()
                .filter(|e| e.bounding_box().intersects(region))
                .cloned(),
        );
        for &child in node.children.iter().flatten() {
            if self.nodes[child].region.intersects(region) {
                self.query_at(child, region, results);
            }
        }
    }

    fn collect_pairs(
        &self,
        key: NodeKey,
        ancestors: &mut Vec<Rc<T>>,
        pairs: &mut Vec<CollisionPair<T>>,
    ) {
        let node = &self.nodes[key];
        for (i, object) in node.elements.iter().enumerate() {
            let bounds = object.bounding_box();
            for above in ancestors.iter() {
                if bounds.intersects(&above.bounding_box()) {
                    pairs.push(CollisionPair {
                        first: Rc::clone(above),
                        second: Rc::clone(object),
                    });
                }
            }
            for later in &node.elements[i + 1..] {
                if bounds.intersects(&later.bounding_box()) {
                    pairs.push(CollisionPair {
                        first: Rc::clone(object),
                        second: Rc::clone(later),
                    });
                }
            }
        }

        let mark = ancestors.len();
        ancestors.extend(node.elements.iter().cloned());
        for &child in node.children.iter().flatten() {
            self.collect_pairs(child, ancestors, pairs);
        }
        ancestors.truncate(mark);
    }
}

impl<T: ?Sized> QuadTree<T> {
    /// Number of stored objects
    pub fn len(&self) -> usize {
        self.no_objects
    }

    /// Whether no objects are stored
    pub fn is_empty(&self) -> bool {
        self.no_objects == 0
    }

    /// Deepest level any object has been stored at since the last clear
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Levels below which nodes may subdivide
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Region covered by the root
    pub fn bounds(&self) -> Rect2 {
        self.nodes[self.root].region
    }

    /// Number of allocated nodes, root included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The root node
    pub fn root(&self) -> &QuadTreeNode<T> {
        &self.nodes[self.root]
    }

    /// Look up a node by key
    pub fn node(&self, key: NodeKey) -> Option<&QuadTreeNode<T>> {
        self.nodes.get(key)
    }

    /// Pre-order traversal of nodes: own node first, then NE, SE, SW, NW
    pub fn nodes(&self) -> Nodes<'_, T> {
        Nodes {
            tree: self,
            stack: vec![self.root],
        }
    }

    /// Node bounds in pre-order (for visualization)
    pub fn regions(&self) -> impl Iterator<Item = Rect2> + '_ {
        self.nodes().map(QuadTreeNode::region)
    }

    /// All stored objects in pre-order
    pub fn iter(&self) -> impl Iterator<Item = &Rc<T>> + '_ {
        self.nodes().flat_map(|node| node.elements.iter())
    }
}

/// Pre-order node iterator returned by [`QuadTree::nodes`]
pub struct Nodes<'a, T: ?Sized> {
    tree: &'a QuadTree<T>,
    stack: Vec<NodeKey>,
}

impl<'a, T: ?Sized> Iterator for Nodes<'a, T> {
    type Item = &'a QuadTreeNode<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.stack.pop()?;
        let node = &self.tree.nodes[key];
        self.stack.extend(node.children.iter().rev().flatten().copied());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::collision::{Poly2, Shape};
    use std::cell::Cell;

    fn world() -> QuadTree<Shape> {
        QuadTree::new(Rect2::new(0, 0, 640, 480), 3).unwrap()
    }

    fn mover_world() -> QuadTree<Mover> {
        QuadTree::new(Rect2::new(0, 0, 640, 480), 3).unwrap()
    }

    fn rect(x1: i32, y1: i32, x2: i32, y2: i32) -> Rc<Shape> {
        Rc::new(Shape::Rect(Rect2::new(x1, y1, x2, y2)))
    }

    /// Object whose extent can change while its handle stays the same
    #[derive(Debug)]
    struct Mover {
        bounds: Cell<Rect2>,
    }

    impl Mover {
        fn new(bounds: Rect2) -> Rc<Self> {
            Rc::new(Self {
                bounds: Cell::new(bounds),
            })
        }
    }

    impl Bounded for Mover {
        fn bounding_box(&self) -> Rect2 {
            self.bounds.get()
        }
    }

    #[test]
    fn test_rejects_empty_bounds() {
        let err = QuadTree::<Shape>::new(Rect2::new(0, 0, 0, 100), 2).unwrap_err();
        assert!(matches!(err, SpatialError::EmptyRegion { .. }));
    }

    #[test]
    fn test_insert_descends_into_single_quadrant() {
        let mut tree = world();
        // Fits NE (320..640, 0..240), then NE of that (480..640, 0..120)
        let level = tree.insert(rect(500, 10, 520, 30));
        assert_eq!(level, 3);
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.len(), 1);
        // Root plus one child per level
        assert_eq!(tree.node_count(), 4);
    }

    #[test]
    fn test_straddling_object_stays_on_root() {
        let mut tree = world();
        let level = tree.insert(rect(300, 200, 340, 260));
        assert_eq!(level, 0);
        assert_eq!(tree.root().elements().len(), 1);
        assert!(tree.root().is_leaf());
    }

    #[test]
    fn test_object_outside_bounds_stays_on_root() {
        let mut tree = world();
        let outside = rect(700, 700, 710, 710);
        assert_eq!(tree.insert(Rc::clone(&outside)), 0);
        assert_eq!(tree.query(&Rect2::new(690, 690, 720, 720)).len(), 1);
    }

    #[test]
    fn test_max_depth_zero_never_subdivides() {
        let mut tree = QuadTree::new(Rect2::new(0, 0, 100, 100), 0).unwrap();
        assert_eq!(tree.insert(rect(1, 1, 2, 2)), 0);
        assert_eq!(tree.node_count(), 1);
    }

    #[test]
    fn test_remove_by_identity() {
        let mut tree = world();
        let a = rect(10, 10, 20, 20);
        let twin = rect(10, 10, 20, 20);
        tree.insert(Rc::clone(&a));
        tree.insert(Rc::clone(&twin));

        assert!(tree.remove(&a));
        assert!(!tree.contains(&a));
        assert!(tree.contains(&twin));
        assert_eq!(tree.len(), 1);

        assert!(!tree.remove(&a));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_replace_in_place_keeps_slot() {
        let mut tree = world();
        let old = rect(10, 10, 20, 20);
        let level = tree.insert(Rc::clone(&old));
        let new = rect(12, 12, 22, 22);

        assert!(tree.replace(&old, Rc::clone(&new)));
        assert_eq!(tree.level_of(&new), Some(level));
        assert!(!tree.contains(&old));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_replace_moves_to_parent_when_leaving_node() {
        let mut tree = world();
        let old = rect(500, 10, 520, 30);
        assert_eq!(tree.insert(Rc::clone(&old)), 3);

        // Still inside the level-1 NE quadrant but not the level-2 parent
        let new = rect(330, 150, 350, 170);
        assert!(tree.replace(&old, Rc::clone(&new)));
        assert!(tree.contains(&new));
        assert!(!tree.contains(&old));
        assert_eq!(tree.len(), 1);
        // Climbs to NE, then descends through (320..480, 120..240)
        assert_eq!(tree.level_of(&new), Some(3));
        assert_eq!(tree.query(&Rect2::new(320, 120, 400, 180)).len(), 1);
    }

    #[test]
    fn test_replace_across_the_root() {
        let mut tree = world();
        let old = rect(500, 10, 520, 30);
        assert_eq!(tree.insert(Rc::clone(&old)), 3);

        let new = rect(10, 300, 20, 310);
        assert!(tree.replace(&old, Rc::clone(&new)));
        assert_eq!(tree.level_of(&new), Some(3));
        let south_west = tree.query(&Rect2::new(0, 240, 320, 480));
        assert_eq!(south_west.len(), 1);
        assert!(Rc::ptr_eq(&south_west[0], &new));
        assert!(tree.query(&Rect2::new(320, 0, 640, 240)).is_empty());
    }

    #[test]
    fn test_replace_missing_object() {
        let mut tree = world();
        tree.insert(rect(0, 0, 5, 5));
        assert!(!tree.replace(&rect(0, 0, 5, 5), rect(1, 1, 6, 6)));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_update_climbs_to_fitting_ancestor() {
        let mut tree = mover_world();
        let mover = Mover::new(Rect2::new(500, 10, 520, 30));
        assert_eq!(tree.insert(Rc::clone(&mover)), 3);

        // Jump into the SW quadrant of the root
        mover.bounds.set(Rect2::new(10, 300, 20, 310));
        assert!(tree.update(&mover));
        // SW (0..320, 240..480) -> NW (0..160, 240..360) -> SW (0..80, 300..360)
        assert_eq!(tree.level_of(&mover), Some(3));
        assert_eq!(tree.query(&Rect2::new(0, 240, 320, 480)).len(), 1);
        assert!(tree.query(&Rect2::new(320, 0, 640, 240)).is_empty());
        assert!(!tree.update(&mover));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_update_redescends_from_parent() {
        let mut tree = mover_world();
        let mover = Mover::new(Rect2::new(330, 10, 340, 20));
        // NE -> NW of NE (320..480, 0..120) -> NW of that (320..400, 0..60)
        assert_eq!(tree.insert(Rc::clone(&mover)), 3);

        // Move to the neighbouring level-3 quadrant (400..480, 0..60)
        mover.bounds.set(Rect2::new(410, 10, 420, 20));
        assert!(tree.update(&mover));
        assert_eq!(tree.level_of(&mover), Some(3));
        assert_eq!(tree.query(&Rect2::new(400, 0, 480, 60)).len(), 1);
    }

    #[test]
    fn test_update_unchanged_object() {
        let mut tree = mover_world();
        let mover = Mover::new(Rect2::new(10, 10, 20, 20));
        tree.insert(Rc::clone(&mover));
        assert!(!tree.update(&mover));
        assert!(!tree.update(&Mover::new(Rect2::new(0, 0, 1, 1))));
    }

    #[test]
    fn test_query_prunes_and_orders() {
        let mut tree = world();
        let root_obj = rect(300, 200, 340, 260);
        let ne = rect(400, 50, 410, 60);
        let sw = rect(50, 300, 60, 310);
        tree.insert(Rc::clone(&sw));
        tree.insert(Rc::clone(&ne));
        tree.insert(Rc::clone(&root_obj));

        let all = tree.query(&Rect2::new(0, 0, 640, 480));
        assert_eq!(all.len(), 3);
        assert!(Rc::ptr_eq(&all[0], &root_obj));
        assert!(Rc::ptr_eq(&all[1], &ne));
        assert!(Rc::ptr_eq(&all[2], &sw));

        let ne_only = tree.query(&Rect2::new(320, 0, 640, 240));
        assert_eq!(ne_only.len(), 2);
        assert!(ne_only.iter().all(|o| !Rc::ptr_eq(o, &sw)));
    }

    #[test]
    fn test_regions_preorder() {
        let mut tree = QuadTree::new(Rect2::new(0, 0, 100, 100), 1).unwrap();
        tree.insert(rect(10, 60, 20, 70)); // SW
        tree.insert(rect(60, 10, 70, 20)); // NE
        let regions: Vec<Rect2> = tree.regions().collect();
        assert_eq!(
            regions,
            vec![
                Rect2::new(0, 0, 100, 100),
                Rect2::new(50, 0, 100, 50),
                Rect2::new(0, 50, 50, 100),
            ]
        );
    }

    #[test]
    fn test_candidate_pairs_across_levels() {
        let mut tree = world();
        let big = rect(300, 0, 400, 100); // straddles, stays on root
        let small = rect(350, 10, 360, 20); // inside NE subtree, overlaps big
        let far = rect(600, 400, 610, 410);
        let twin = rect(355, 15, 365, 25); // overlaps small and big
        for o in [&big, &small, &far, &twin] {
            tree.insert(Rc::clone(o));
        }

        let pairs = tree.candidate_pairs();
        assert_eq!(pairs.len(), 3);
        assert!(pairs.iter().all(|p| !p.involves(&far)));
        let with_big: Vec<_> = pairs.iter().filter(|p| p.involves(&big)).collect();
        assert_eq!(with_big.len(), 2);
        assert!(pairs
            .iter()
            .any(|p| p.involves(&small) && p.other(&small).is_some_and(|o| Rc::ptr_eq(o, &twin))));
    }

    #[test]
    fn test_clear_resets_counters() {
        let mut tree = world();
        tree.insert(rect(500, 10, 520, 30));
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.bounds(), Rect2::new(0, 0, 640, 480));
    }

    #[test]
    fn test_polygons_use_their_bounds() {
        let mut tree = world();
        let poly = Rc::new(Shape::Poly(
            Poly2::from_coords(&[(20, 300), (60, 300), (40, 340)]).unwrap(),
        ));
        tree.insert(Rc::clone(&poly));
        assert_eq!(tree.query(&Rect2::new(0, 240, 320, 480)).len(), 1);
        assert!(tree.query(&Rect2::new(320, 0, 640, 240)).is_empty());
    }
}
