//! Typed rectangular regions of index space.

use crate::index::{add, IndexType, IntVect};

/// An inclusive box `[lo, hi]` of index space with a staggering.
///
/// A cell-centered box of `n` cells converts to a nodal box of `n + 1`
/// nodes along each converted axis. Boxes with `hi < lo` on some axis are
/// empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IndexBox {
    lo: IntVect,
    hi: IntVect,
    ty: IndexType,
}

impl IndexBox {
    /// A box with the given corners and staggering.
    pub fn new(lo: IntVect, hi: IntVect, ty: IndexType) -> Self {
        Self { lo, hi, ty }
    }

    /// A cell-centered box.
    pub fn cells(lo: IntVect, hi: IntVect) -> Self {
        Self::new(lo, hi, IndexType::CELL)
    }

    /// Lower corner.
    pub fn lo(&self) -> IntVect {
        self.lo
    }

    /// Upper corner (inclusive).
    pub fn hi(&self) -> IntVect {
        self.hi
    }

    /// Staggering of the box.
    pub fn index_type(&self) -> IndexType {
        self.ty
    }

    /// Number of points along `axis` (zero if empty).
    pub fn len(&self, axis: usize) -> usize {
        (self.hi[axis] - self.lo[axis] + 1).max(0) as usize
    }

    /// Point counts along all three axes.
    pub fn shape(&self) -> [usize; 3] {
        [self.len(0), self.len(1), self.len(2)]
    }

    /// Whether the box contains no points.
    pub fn is_empty(&self) -> bool {
        (0..3).any(|a| self.hi[a] < self.lo[a])
    }

    /// Total number of points.
    pub fn num_points(&self) -> usize {
        self.len(0) * self.len(1) * self.len(2)
    }

    /// Whether `p` lies inside the box.
    pub fn contains(&self, p: IntVect) -> bool {
        (0..3).all(|a| self.lo[a] <= p[a] && p[a] <= self.hi[a])
    }

    /// Whether every point of `other` lies inside this box.
    pub fn contains_box(&self, other: &IndexBox) -> bool {
        other.is_empty() || (self.contains(other.lo) && self.contains(other.hi))
    }

    /// Grow by `n` points on every side (shrink if negative).
    pub fn grow(&self, n: i32) -> Self {
        Self {
            lo: [self.lo[0] - n, self.lo[1] - n, self.lo[2] - n],
            hi: [self.hi[0] + n, self.hi[1] + n, self.hi[2] + n],
            ty: self.ty,
        }
    }

    /// Translate by `v`.
    pub fn shift(&self, v: IntVect) -> Self {
        Self {
            lo: add(self.lo, v),
            hi: add(self.hi, v),
            ty: self.ty,
        }
    }

    /// Change staggering. Converting an axis from cell to nodal adds the
    /// upper node; converting nodal to cell drops it.
    pub fn convert(&self, ty: IndexType) -> Self {
        let mut hi = self.hi;
        for (a, h) in hi.iter_mut().enumerate() {
            match (self.ty.is_nodal(a), ty.is_nodal(a)) {
                (false, true) => *h += 1,
                (true, false) => *h -= 1,
                _ => {}
            }
        }
        Self { lo: self.lo, hi, ty }
    }

    /// Intersection with a box of the same staggering, `None` if disjoint.
    pub fn intersect(&self, other: &IndexBox) -> Option<IndexBox> {
        debug_assert_eq!(self.ty, other.ty, "intersecting boxes of different staggering");
        let mut lo = [0; 3];
        let mut hi = [0; 3];
        for a in 0..3 {
            lo[a] = self.lo[a].max(other.lo[a]);
            hi[a] = self.hi[a].min(other.hi[a]);
            if hi[a] < lo[a] {
                return None;
            }
        }
        Some(Self { lo, hi, ty: self.ty })
    }

    /// Linear offset of `p` within the box, first axis fastest.
    ///
    /// # Panics
    ///
    /// If `p` lies outside the box.
    #[inline]
    pub fn offset(&self, p: IntVect) -> usize {
        assert!(self.contains(p), "point {p:?} outside box {self:?}");
        let [nx, ny, _] = self.shape();
        let i = (p[0] - self.lo[0]) as usize;
        let j = (p[1] - self.lo[1]) as usize;
        let k = (p[2] - self.lo[2]) as usize;
        (k * ny + j) * nx + i
    }

    /// Split into sub-boxes of at most `size` points per axis. The pieces
    /// are disjoint and cover the box exactly.
    pub fn chop(&self, size: IntVect) -> Vec<IndexBox> {
        if self.is_empty() {
            return Vec::new();
        }
        let ranges = |a: usize| {
            let step = size[a].max(1);
            let (lo, hi) = (self.lo[a], self.hi[a]);
            (lo..=hi)
                .step_by(step as usize)
                .map(move |s| (s, s.saturating_add(step - 1).min(hi)))
        };
        let mut out = Vec::new();
        for (klo, khi) in ranges(2) {
            for (jlo, jhi) in ranges(1) {
                for (ilo, ihi) in ranges(0) {
                    out.push(Self::new([ilo, jlo, klo], [ihi, jhi, khi], self.ty));
                }
            }
        }
        out
    }

    /// Iterate over all points, first axis fastest.
    pub fn iter(&self) -> BoxIter {
        BoxIter {
            bx: *self,
            next: if self.is_empty() { None } else { Some(self.lo) },
            remaining: self.num_points(),
        }
    }
}

impl IntoIterator for &IndexBox {
    type Item = IntVect;
    type IntoIter = BoxIter;

    fn into_iter(self) -> BoxIter {
        self.iter()
    }
}

/// Iterator over the points of an [`IndexBox`].
#[derive(Clone, Debug)]
pub struct BoxIter {
    bx: IndexBox,
    next: Option<IntVect>,
    remaining: usize,
}

impl Iterator for BoxIter {
    type Item = IntVect;

    fn next(&mut self) -> Option<IntVect> {
        let p = self.next?;
        self.remaining -= 1;
        let mut q = p;
        self.next = None;
        for a in 0..3 {
            if q[a] < self.bx.hi[a] {
                q[a] += 1;
                self.next = Some(q);
                break;
            }
            q[a] = self.bx.lo[a];
        }
        Some(p)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for BoxIter {}
