use crate::core::math::{is_left, Vector2};
use crate::core::traits::Real;
use crate::polygon::Error;
use std::cell::Cell;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Classification of a vertex relative to the other polygon for the current boolean operation.
///
/// Only meaningful after the entry/exit classification pass has run; original input vertexes
/// always stay [VertexKind::Normal].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum VertexKind {
    /// Original input vertex (never entry/exit tagged).
    Normal,
    /// Intersection vertex where the boundary walk enters the result region.
    Entry,
    /// Intersection vertex where the boundary walk exits the result region.
    Exit,
    /// Intersection vertex that has not been classified yet.
    Unknown,
}

/// One node in a polygon's circular vertex ring.
///
/// `next`/`prev` are indices into the owning ring's arena. `neighbor` is only ever set on
/// intersection vertexes and is an index into the *other* ring's arena (a cross reference,
/// not ownership).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone)]
pub struct Vertex<T = f64> {
    /// 2D position of the vertex.
    pub pos: Vector2<T>,
    /// Entry/exit classification, see [VertexKind].
    pub kind: VertexKind,
    /// True iff this vertex was synthesized at a segment crossing.
    pub is_intersection: bool,
    /// Parametric position (0..1) along the source edge this vertex was inserted into.
    /// Only defined when `is_intersection` is true.
    pub alpha: T,
    /// Paired vertex on the other ring representing the same physical crossing point.
    pub neighbor: Option<usize>,
    /// Marks the vertex as consumed by trace extraction.
    pub visited: bool,
    next: usize,
    prev: usize,
    in_ring: bool,
}

impl<T> Vertex<T>
where
    T: Real,
{
    fn new(pos: Vector2<T>) -> Self {
        Vertex {
            pos,
            kind: VertexKind::Normal,
            is_intersection: false,
            alpha: T::zero(),
            neighbor: None,
            visited: false,
            next: 0,
            prev: 0,
            in_ring: true,
        }
    }

    fn new_intersection(pos: Vector2<T>, alpha: T) -> Self {
        Vertex {
            pos,
            kind: VertexKind::Unknown,
            is_intersection: true,
            alpha,
            neighbor: None,
            visited: false,
            next: 0,
            prev: 0,
            in_ring: true,
        }
    }
}

/// Circular doubly-linked vertex ring representing one closed polygon boundary.
///
/// Vertexes live in an arena (`Vec`) and link to each other by stable indices rather than
/// pointers, so cloning, splicing intersection vertexes, and tearing the ring down are all
/// safe operations with no aliasing concerns. Following `next` from any vertex returns to
/// that vertex after exactly [Ring::vertex_count] steps.
///
/// The winding direction is a cached derived value: every mutation clears the cache and the
/// next [Ring::is_clockwise] query lazily recomputes it.
///
/// All operations on an empty ring are no-ops returning neutral values (count 0, empty
/// sequence) rather than failing.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug)]
pub struct Ring<T = f64> {
    nodes: Vec<Vertex<T>>,
    head: Option<usize>,
    len: usize,
    direction: Cell<Option<bool>>,
}

impl<T> Default for Ring<T>
where
    T: Real,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Ring<T>
where
    T: Real,
{
    /// Create a new empty ring.
    #[inline]
    pub fn new() -> Self {
        Ring {
            nodes: Vec::new(),
            head: None,
            len: 0,
            direction: Cell::new(None),
        }
    }

    /// Create a ring from an ordered point sequence (implicitly closed).
    pub fn from_points(points: &[Vector2<T>]) -> Self {
        let mut ring = Ring {
            nodes: Vec::with_capacity(points.len()),
            head: None,
            len: 0,
            direction: Cell::new(None),
        };
        for &p in points {
            ring.add_point(p);
        }
        ring
    }

    /// Number of vertexes currently in the ring.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.len
    }

    /// Returns true if the ring has no vertexes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Index of the ring's head vertex, or `None` if the ring is empty.
    #[inline]
    pub fn head_index(&self) -> Option<usize> {
        self.head
    }

    /// Index of the vertex following `i` in the ring.
    #[inline]
    pub fn next_index(&self, i: usize) -> usize {
        self.nodes[i].next
    }

    /// Index of the vertex preceding `i` in the ring.
    #[inline]
    pub fn prev_index(&self, i: usize) -> usize {
        self.nodes[i].prev
    }

    /// Get the vertex at arena index `i`.
    #[inline]
    pub fn vertex(&self, i: usize) -> &Vertex<T> {
        &self.nodes[i]
    }

    #[inline]
    pub(crate) fn vertex_mut(&mut self, i: usize) -> &mut Vertex<T> {
        &mut self.nodes[i]
    }

    /// Append a point at the end of the ring (inserted before the head so input order is
    /// preserved and the circle stays closed). O(1).
    pub fn add_point(&mut self, pos: Vector2<T>) {
        let idx = self.nodes.len();
        let mut v = Vertex::new(pos);

        match self.head {
            None => {
                v.next = idx;
                v.prev = idx;
                self.head = Some(idx);
            }
            Some(head) => {
                let tail = self.nodes[head].prev;
                v.prev = tail;
                v.next = head;
                self.nodes[tail].next = idx;
                self.nodes[head].prev = idx;
            }
        }

        self.nodes.push(v);
        self.len += 1;
        self.direction.set(None);
    }

    /// Splice an intersection vertex into the edge starting at `edge_start`, keeping
    /// intersection vertexes on that edge ordered by ascending `alpha`. O(k) in the number
    /// of intersections already on the edge. Returns the new vertex's arena index.
    pub(crate) fn insert_intersection(
        &mut self,
        edge_start: usize,
        pos: Vector2<T>,
        alpha: T,
    ) -> usize {
        debug_assert!(self.head.is_some(), "cannot insert into an empty ring");

        // walk along the edge to find the correct spot based on alpha
        let mut at = edge_start;
        loop {
            let next = self.nodes[at].next;
            if !self.nodes[next].is_intersection || self.nodes[next].alpha >= alpha {
                break;
            }
            at = next;
        }

        let idx = self.nodes.len();
        let mut v = Vertex::new_intersection(pos, alpha);
        let after = self.nodes[at].next;
        v.prev = at;
        v.next = after;
        self.nodes.push(v);
        self.nodes[at].next = idx;
        self.nodes[after].prev = idx;
        self.len += 1;
        self.direction.set(None);
        idx
    }

    /// Remove the vertex at arena index `i`, relinking its neighbors. O(1).
    ///
    /// The arena slot is tombstoned rather than reused; removal never invalidates other
    /// vertex indices.
    pub fn remove(&mut self, i: usize) {
        let Some(head) = self.head else {
            return;
        };
        if !self.nodes[i].in_ring {
            return;
        }

        if self.len == 1 {
            self.head = None;
        } else if i == head {
            self.head = Some(self.nodes[i].next);
        }

        let (prev, next) = (self.nodes[i].prev, self.nodes[i].next);
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
        self.nodes[i].in_ring = false;
        self.len -= 1;
        self.direction.set(None);
    }

    /// Remove every vertex from the ring.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.len = 0;
        self.direction.set(None);
    }

    /// Iterate the arena indices of the ring's vertexes starting at the head.
    pub fn iter_indexes(&self) -> RingIndexIter<'_, T> {
        RingIndexIter {
            ring: self,
            current: self.head,
            remaining: self.len,
        }
    }

    /// Read the ring back as an ordered point sequence starting at the head vertex. O(n).
    pub fn points(&self) -> Vec<Vector2<T>> {
        self.iter_indexes().map(|i| self.nodes[i].pos).collect()
    }

    /// Compute the closed signed area of the ring (shoelace formula).
    ///
    /// Positive for counter clockwise winding, negative for clockwise. Rings with fewer
    /// than 3 vertexes are degenerate and return 0.
    pub fn signed_area(&self) -> T {
        if self.len < 3 {
            return T::zero();
        }

        let mut double_area = T::zero();
        for i in self.iter_indexes() {
            let p = self.nodes[i].pos;
            let q = self.nodes[self.nodes[i].next].pos;
            double_area = double_area + p.perp_dot(q);
        }

        double_area / T::two()
    }

    /// Absolute enclosed area of the ring.
    #[inline]
    pub fn area(&self) -> T {
        self.signed_area().abs()
    }

    /// Returns true if the ring winds clockwise.
    ///
    /// The result is cached; any mutation invalidates the cache and the next query
    /// recomputes it, so the value observed is never stale.
    pub fn is_clockwise(&self) -> bool {
        if let Some(clockwise) = self.direction.get() {
            return clockwise;
        }

        let clockwise = self.signed_area() < T::zero();
        self.direction.set(Some(clockwise));
        clockwise
    }

    /// Reverse the winding direction of the ring in place.
    pub fn invert_direction(&mut self) {
        if self.len < 2 {
            return;
        }

        for v in self.nodes.iter_mut().filter(|v| v.in_ring) {
            std::mem::swap(&mut v.next, &mut v.prev);
        }
        self.direction.set(None);
    }

    /// Test whether `point` lies inside the ring using the winding number crossing rule.
    ///
    /// Points lying exactly on the boundary are not defined (either result may be
    /// returned). Degenerate rings (< 3 vertexes) contain nothing.
    pub fn contains_point(&self, point: Vector2<T>) -> bool {
        if self.len < 3 {
            return false;
        }

        let mut winding = 0i32;
        for i in self.iter_indexes() {
            let v1 = self.nodes[i].pos;
            let v2 = self.nodes[self.nodes[i].next].pos;
            if v1.y <= point.y {
                if v2.y > point.y && is_left(v1, v2, point) {
                    // left and upward crossing
                    winding += 1;
                }
            } else if v2.y <= point.y && !is_left(v1, v2, point) {
                // right and downward crossing
                winding -= 1;
            }
        }

        winding != 0
    }

    /// Returns true if the ring is convex (all turns agree in sign within epsilon).
    ///
    /// Degenerate rings (< 3 vertexes) are considered convex.
    pub fn is_convex(&self) -> bool {
        if self.len < 3 {
            return true;
        }

        let mut has_positive = false;
        let mut has_negative = false;
        for i in self.iter_indexes() {
            let a = self.nodes[self.nodes[i].prev].pos;
            let b = self.nodes[i].pos;
            let c = self.nodes[self.nodes[i].next].pos;
            let cross = (b - a).perp_dot(c - a);

            if cross > T::fuzzy_epsilon() {
                has_positive = true;
            }
            if cross < -T::fuzzy_epsilon() {
                has_negative = true;
            }
            if has_positive && has_negative {
                return false;
            }
        }

        true
    }

    /// Returns true if the ring has at least 3 vertexes and no repeated consecutive points.
    pub fn is_valid(&self) -> bool {
        if self.len < 3 {
            return false;
        }

        self.iter_indexes()
            .all(|i| !self.nodes[i].pos.fuzzy_eq(self.nodes[self.nodes[i].next].pos))
    }

    /// Verify the ring's structural invariants: every `next`/`prev` pair is mutually
    /// inverse and following `next` from the head returns to it in exactly
    /// [Ring::vertex_count] steps.
    ///
    /// A violation indicates a bug in ring mutation (not bad input) so callers must treat
    /// the error as unrecoverable and abort the current operation.
    pub fn validate(&self) -> Result<(), Error> {
        let Some(head) = self.head else {
            return Ok(());
        };

        let mut current = head;
        for _ in 0..self.len {
            let v = &self.nodes[current];
            if !v.in_ring {
                return Err(Error::CorruptRing("ring links to a removed vertex"));
            }
            if v.next >= self.nodes.len() || v.prev >= self.nodes.len() {
                return Err(Error::CorruptRing("ring link index out of bounds"));
            }
            if self.nodes[v.next].prev != current || self.nodes[v.prev].next != current {
                return Err(Error::CorruptRing("next/prev links are not mutual inverses"));
            }
            current = v.next;
        }

        if current != head {
            return Err(Error::CorruptRing(
                "following next from head does not return to head in vertex_count steps",
            ));
        }

        Ok(())
    }

    /// Translate every vertex by `(dx, dy)`.
    pub fn translate(&mut self, dx: T, dy: T) {
        for v in self.nodes.iter_mut().filter(|v| v.in_ring) {
            v.pos = Vector2::new(v.pos.x + dx, v.pos.y + dy);
        }
        // winding direction is translation invariant, cache stays valid
    }

    /// Centroid of the ring's vertexes (arithmetic mean, not area weighted).
    pub fn vertex_centroid(&self) -> Option<Vector2<T>> {
        if self.is_empty() {
            return None;
        }

        let mut sum = Vector2::zero();
        for i in self.iter_indexes() {
            sum = sum + self.nodes[i].pos;
        }
        let count = T::from(self.len).unwrap();
        Some(Vector2::new(sum.x / count, sum.y / count))
    }

    /// Scale every vertex relative to the vertex centroid.
    pub fn scale(&mut self, sx: T, sy: T) {
        let Some(c) = self.vertex_centroid() else {
            return;
        };
        self.scale_about(c, sx, sy);
    }

    /// Scale every vertex relative to `origin`.
    pub fn scale_about(&mut self, origin: Vector2<T>, sx: T, sy: T) {
        for v in self.nodes.iter_mut().filter(|v| v.in_ring) {
            v.pos = Vector2::new(
                origin.x + (v.pos.x - origin.x) * sx,
                origin.y + (v.pos.y - origin.y) * sy,
            );
        }
        // negative scale factors mirror and flip the winding
        self.direction.set(None);
    }

    /// Rotate every vertex around the vertex centroid by `angle` radians.
    pub fn rotate(&mut self, angle: T) {
        let Some(c) = self.vertex_centroid() else {
            return;
        };
        self.rotate_about(c, angle);
    }

    /// Rotate every vertex around `origin` by `angle` radians.
    pub fn rotate_about(&mut self, origin: Vector2<T>, angle: T) {
        for v in self.nodes.iter_mut().filter(|v| v.in_ring) {
            v.pos = v.pos.rotate_about(origin, angle);
        }
        // rotation preserves winding direction, cache stays valid
    }
}

impl<T> Clone for Ring<T>
where
    T: Real,
{
    /// Deep copy producing a fully independent ring with its own nodes.
    ///
    /// Cross-ring neighbor links are never copied and intersection vertexes are not
    /// carried over: a clone has no intersection vertexes. Intersection vertexes only
    /// exist for the lifetime of one boolean operation pass, and working copies are
    /// always taken before discovery runs.
    fn clone(&self) -> Self {
        let mut result = Ring::new();
        for i in self.iter_indexes() {
            let v = &self.nodes[i];
            if !v.is_intersection {
                result.add_point(v.pos);
            }
        }
        if result.len == self.len {
            // same geometry, carry the cached direction over
            result.direction.set(self.direction.get());
        }
        result
    }
}

/// Iterator over the arena indices of a ring, in `next` order starting at the head.
#[derive(Debug)]
pub struct RingIndexIter<'a, T> {
    ring: &'a Ring<T>,
    current: Option<usize>,
    remaining: usize,
}

impl<T> Iterator for RingIndexIter<'_, T>
where
    T: Real,
{
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.current?;
        self.remaining -= 1;
        self.current = Some(self.ring.nodes[current].next);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
