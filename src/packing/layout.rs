//! Layout materialiser: positions of the packed parts.
//!
//! The grid is centred in the chamber on the width and depth axes. On the
//! height axis it starts half a clearance above the floor and is centred in
//! the remaining effective height. Boxes are yielded lazily so large layouts
//! never need to be collected.

use serde::{Deserialize, Serialize};

use crate::packing::calculator::PackingResult;
use crate::packing::{Dimensions, Point3};

/// One part placed in the chamber.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartBox {
    /// Grid index `(width, depth, height)`.
    pub index: (u32, u32, u32),

    /// Corner of the box nearest the chamber origin (mm).
    pub origin: Point3,

    /// Box size: the part itself, without spacing (mm).
    pub size: Dimensions,
}

impl PartBox {
    /// Corner of the box furthest from the chamber origin (mm).
    #[must_use]
    pub fn max(&self) -> Point3 {
        Point3::new(
            self.origin.x + self.size.width,
            self.origin.y + self.size.depth,
            self.origin.z + self.size.height,
        )
    }
}

/// Placement grid derived from a [`PackingResult`].
#[derive(Debug, Clone, Copy)]
pub struct Layout<'a> {
    result: &'a PackingResult,
}

impl<'a> Layout<'a> {
    /// Creates the layout for a computed packing.
    #[must_use]
    pub const fn new(result: &'a PackingResult) -> Self {
        Self { result }
    }

    /// Origin of the first box (index `(0, 0, 0)`).
    #[must_use]
    pub fn offset(&self) -> Point3 {
        let r = self.result;
        let counts = r.counts;
        let x = f64::from(counts.width).mul_add(-r.pitch.width, r.chamber.size.width) / 2.0;
        let y = f64::from(counts.depth).mul_add(-r.pitch.depth, r.chamber.size.depth) / 2.0;
        let z = r.clearance.margins.height / 2.0
            + f64::from(counts.height).mul_add(-r.pitch.height, r.effective_chamber.height) / 2.0;
        Point3::new(x, y, z)
    }

    /// All boxes, width index outermost, then depth, then height.
    #[must_use]
    pub fn boxes(&self) -> PartBoxes {
        let c = self.result.counts;
        self.grid(c.width, c.depth, c.height)
    }

    /// The front row (depth index 0), as seen looking into the chamber.
    #[must_use]
    pub fn front_view(&self) -> PartBoxes {
        let c = self.result.counts;
        self.grid(c.width, c.depth.min(1), c.height)
    }

    /// The bottom shelf (height index 0), as seen from above.
    #[must_use]
    pub fn top_view(&self) -> PartBoxes {
        let c = self.result.counts;
        self.grid(c.width, c.depth, c.height.min(1))
    }

    fn grid(&self, width: u32, depth: u32, height: u32) -> PartBoxes {
        let end = u64::from(width) * u64::from(depth) * u64::from(height);
        PartBoxes {
            offset: self.offset(),
            pitch: self.result.pitch,
            size: self.result.part.size,
            depth,
            height,
            next: 0,
            end,
        }
    }
}

/// Iterator over [`PartBox`]es of a [`Layout`].
#[derive(Debug, Clone)]
pub struct PartBoxes {
    offset: Point3,
    pitch: Dimensions,
    size: Dimensions,
    depth: u32,
    height: u32,
    next: u64,
    end: u64,
}

impl PartBoxes {
    #[allow(clippy::cast_possible_truncation)]
    fn box_at(&self, n: u64) -> PartBox {
        let depth = u64::from(self.depth);
        let height = u64::from(self.height);
        // Quotients are bounded by the u32 per-axis counts.
        let i = (n / (depth * height)) as u32;
        let j = ((n / height) % depth) as u32;
        let k = (n % height) as u32;

        PartBox {
            index: (i, j, k),
            origin: Point3::new(
                f64::from(i).mul_add(self.pitch.width, self.offset.x),
                f64::from(j).mul_add(self.pitch.depth, self.offset.y),
                f64::from(k).mul_add(self.pitch.height, self.offset.z),
            ),
            size: self.size,
        }
    }
}

impl Iterator for PartBoxes {
    type Item = PartBox;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let item = self.box_at(self.next);
        self.next += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.end - self.next).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PartBoxes {}
