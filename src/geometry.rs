//! Core geometry types: Point, Scale, Rect and the per-edge pixel snapping codec.
//!
//! Scene-graph coordinates are floating point. Before drawing, rectangle edges
//! are snapped to whole device pixels; how each edge rounds is described by a
//! [`RectSnap`], four [`SnapDirection`]s packed into one `u32`.

use std::ops::{Add, Neg, Sub};

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A 2D position or displacement.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// The origin.
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;
    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Point {
    type Output = Point;
    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl Neg for Point {
    type Output = Point;
    #[inline]
    fn neg(self) -> Point {
        Point { x: -self.x, y: -self.y }
    }
}

// ---------------------------------------------------------------------------
// Scale
// ---------------------------------------------------------------------------

/// Per-axis scale factor from user space to device pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Scale {
    pub x: f32,
    pub y: f32,
}

impl Scale {
    /// No scaling.
    pub const IDENTITY: Scale = Scale { x: 1.0, y: 1.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The same factor on both axes.
    #[inline]
    pub const fn uniform(factor: f32) -> Self {
        Self { x: factor, y: factor }
    }
}

impl Default for Scale {
    fn default() -> Self {
        Scale::IDENTITY
    }
}

// ---------------------------------------------------------------------------
// Snapping
// ---------------------------------------------------------------------------

/// How one rectangle edge rounds to a pixel boundary.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SnapDirection {
    /// Leave the coordinate as is.
    #[default]
    None = 0,
    Floor = 1,
    Ceil = 2,
    /// Nearest whole pixel, halves away from zero.
    Round = 3,
}

impl SnapDirection {
    /// All directions, in discriminant order.
    pub const ALL: [SnapDirection; 4] = [
        SnapDirection::None,
        SnapDirection::Floor,
        SnapDirection::Ceil,
        SnapDirection::Round,
    ];

    /// Decode a byte, or `None` if it names no direction.
    #[inline]
    pub const fn from_byte(byte: u8) -> Option<SnapDirection> {
        match byte {
            0 => Some(SnapDirection::None),
            1 => Some(SnapDirection::Floor),
            2 => Some(SnapDirection::Ceil),
            3 => Some(SnapDirection::Round),
            _ => None,
        }
    }

    /// Apply this direction to a coordinate.
    #[inline]
    pub fn apply(self, value: f32) -> f32 {
        match self {
            SnapDirection::None => value,
            SnapDirection::Floor => value.floor(),
            SnapDirection::Ceil => value.ceil(),
            SnapDirection::Round => value.round(),
        }
    }
}

/// A rectangle edge. The discriminant is the edge's byte index in a [`RectSnap`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    Top = 0,
    Right = 1,
    Bottom = 2,
    Left = 3,
}

impl Edge {
    /// All edges in packing order.
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    /// Edge for a byte index `0..4`.
    #[inline]
    pub const fn from_index(index: usize) -> Option<Edge> {
        match index {
            0 => Some(Edge::Top),
            1 => Some(Edge::Right),
            2 => Some(Edge::Bottom),
            3 => Some(Edge::Left),
            _ => None,
        }
    }

    #[inline]
    const fn shift(self) -> u32 {
        8 * self as u32
    }
}

/// Four packed [`SnapDirection`]s.
///
/// Layout of the word, least significant byte first: top, right, bottom, left.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RectSnap(u32);

impl RectSnap {
    /// Leave every edge alone.
    pub const NONE: RectSnap = RectSnap::uniform(SnapDirection::None);

    /// Expand outward to whole pixels on every edge. Never leaves seams
    /// between adjacent rects but may overlap them.
    pub const GROW: RectSnap = RectSnap::new(
        SnapDirection::Floor,
        SnapDirection::Ceil,
        SnapDirection::Ceil,
        SnapDirection::Floor,
    );

    /// Contract inward to whole pixels on every edge. Never overlaps adjacent
    /// rects but may under-cover them.
    pub const SHRINK: RectSnap = RectSnap::new(
        SnapDirection::Ceil,
        SnapDirection::Floor,
        SnapDirection::Floor,
        SnapDirection::Ceil,
    );

    /// Round every edge to the nearest pixel. Adjacent rects sharing a
    /// coordinate stay adjacent.
    pub const ROUND: RectSnap = RectSnap::uniform(SnapDirection::Round);

    /// Pack four directions, given in CSS order.
    #[inline]
    pub const fn new(
        top: SnapDirection,
        right: SnapDirection,
        bottom: SnapDirection,
        left: SnapDirection,
    ) -> Self {
        RectSnap(
            (top as u32)
                | (right as u32) << Edge::Right.shift()
                | (bottom as u32) << Edge::Bottom.shift()
                | (left as u32) << Edge::Left.shift(),
        )
    }

    /// The same direction on all four edges.
    #[inline]
    pub const fn uniform(direction: SnapDirection) -> Self {
        RectSnap::new(direction, direction, direction, direction)
    }

    /// Reinterpret a packed word, or `None` if any byte is not a direction.
    pub const fn from_bits(bits: u32) -> Option<RectSnap> {
        let mut i: u32 = 0;
        while i < 4 {
            if SnapDirection::from_byte((bits >> (8 * i)) as u8).is_none() {
                return None;
            }
            i += 1;
        }
        Some(RectSnap(bits))
    }

    /// The packed word.
    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Direction of a single edge.
    #[inline]
    pub const fn direction(self, edge: Edge) -> SnapDirection {
        let byte = ((self.0 >> edge.shift()) & 0xFF) as u8;
        // Only valid bytes are ever stored.
        match SnapDirection::from_byte(byte) {
            Some(direction) => direction,
            None => SnapDirection::None,
        }
    }

    /// A copy with `edge` set to `direction`.
    #[inline]
    pub const fn with_edge(self, edge: Edge, direction: SnapDirection) -> RectSnap {
        let mask = 0xFFu32 << edge.shift();
        RectSnap((self.0 & !mask) | (direction as u32) << edge.shift())
    }
}

/// Pack four edge directions into a [`RectSnap`].
#[inline]
pub const fn make_snap(
    top: SnapDirection,
    right: SnapDirection,
    bottom: SnapDirection,
    left: SnapDirection,
) -> RectSnap {
    RectSnap::new(top, right, bottom, left)
}

/// Direction of the edge at byte index `edge_index` (0 = top … 3 = left).
#[inline]
pub const fn get_direction(snap: RectSnap, edge_index: usize) -> Option<SnapDirection> {
    match Edge::from_index(edge_index) {
        Some(edge) => Some(snap.direction(edge)),
        None => None,
    }
}

// ---------------------------------------------------------------------------
// Rect
// ---------------------------------------------------------------------------

/// An axis-aligned rectangle with floating point position and size.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// An empty rect at the origin.
    pub const ZERO: Rect = Rect { x: 0.0, y: 0.0, width: 0.0, height: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Build a rect from its four edge coordinates.
    #[inline]
    pub fn from_edges(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self { x: left, y: top, width: right - left, height: bottom - top }
    }

    /// The right edge: `x + width`.
    #[inline]
    pub fn right(self) -> f32 {
        self.x + self.width
    }

    /// The bottom edge: `y + height`.
    #[inline]
    pub fn bottom(self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn origin(self) -> Point {
        Point { x: self.x, y: self.y }
    }

    /// Whether the rect has no area.
    #[inline]
    pub fn is_empty(self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Coordinate of one edge.
    #[inline]
    pub fn edge(self, edge: Edge) -> f32 {
        match edge {
            Edge::Top => self.y,
            Edge::Right => self.right(),
            Edge::Bottom => self.bottom(),
            Edge::Left => self.x,
        }
    }

    /// Round each edge to whole units as `snap` describes.
    pub fn snap(self, snap: RectSnap) -> Rect {
        let [top, right, bottom, left] = Edge::ALL.map(|e| snap.direction(e).apply(self.edge(e)));
        Rect::from_edges(top, right, bottom, left)
    }

    /// Align the rect to the device pixel grid.
    ///
    /// The rect is mapped to device space (`p * scale + offset`), each edge is
    /// rounded to the nearest pixel and the result mapped back. Returns `None`
    /// when nothing of the rect survives.
    pub fn snap_to_grid(self, scale: Scale, offset: Point) -> Option<Rect> {
        let left = (self.x * scale.x + offset.x).round();
        let top = (self.y * scale.y + offset.y).round();
        let right = (self.right() * scale.x + offset.x).round();
        let bottom = (self.bottom() * scale.y + offset.y).round();

        let snapped = Rect::from_edges(
            (top - offset.y) / scale.y,
            (right - offset.x) / scale.x,
            (bottom - offset.y) / scale.y,
            (left - offset.x) / scale.x,
        );
        if snapped.is_empty() {
            None
        } else {
            Some(snapped)
        }
    }

    /// Translate the rect by `offset`.
    #[inline]
    pub fn translate(self, offset: Point) -> Rect {
        Rect { x: self.x + offset.x, y: self.y + offset.y, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Point / Scale
    // -----------------------------------------------------------------------

    #[test]
    fn point_add_sub_neg() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(3.0, 4.5);
        assert_eq!(a + b, Point::new(4.0, 6.5));
        assert_eq!(b - a, Point::new(2.0, 2.5));
        assert_eq!(-a, Point::new(-1.0, -2.0));
    }

    #[test]
    fn scale_default_is_identity() {
        assert_eq!(Scale::default(), Scale::IDENTITY);
        assert_eq!(Scale::uniform(2.0), Scale::new(2.0, 2.0));
    }

    // -----------------------------------------------------------------------
    // SnapDirection / RectSnap
    // -----------------------------------------------------------------------

    #[test]
    fn snap_direction_apply() {
        assert_eq!(SnapDirection::None.apply(1.5), 1.5);
        assert_eq!(SnapDirection::Floor.apply(1.7), 1.0);
        assert_eq!(SnapDirection::Ceil.apply(1.2), 2.0);
        assert_eq!(SnapDirection::Round.apply(1.5), 2.0);
        assert_eq!(SnapDirection::Round.apply(1.49), 1.0);
        assert_eq!(SnapDirection::Floor.apply(-0.5), -1.0);
    }

    #[test]
    fn snap_byte_layout() {
        let snap = RectSnap::new(
            SnapDirection::Floor,
            SnapDirection::Ceil,
            SnapDirection::Round,
            SnapDirection::None,
        );
        assert_eq!(snap.bits(), 0x00_03_02_01);
        assert_eq!(RectSnap::GROW.bits(), 0x01_02_02_01);
        assert_eq!(RectSnap::SHRINK.bits(), 0x02_01_01_02);
        assert_eq!(RectSnap::ROUND.bits(), 0x03_03_03_03);
        assert_eq!(RectSnap::NONE.bits(), 0);
    }

    #[test]
    fn snap_round_trip_every_combination() {
        for &t in &SnapDirection::ALL {
            for &r in &SnapDirection::ALL {
                for &b in &SnapDirection::ALL {
                    for &l in &SnapDirection::ALL {
                        let snap = make_snap(t, r, b, l);
                        let got: Vec<_> = (0..4).map(|i| get_direction(snap, i).unwrap()).collect();
                        assert_eq!(got, vec![t, r, b, l]);
                    }
                }
            }
        }
    }

    #[test]
    fn snap_grow_composite() {
        let grow = RectSnap::GROW;
        assert_eq!(grow.direction(Edge::Top), SnapDirection::Floor);
        assert_eq!(grow.direction(Edge::Left), SnapDirection::Floor);
        assert_eq!(grow.direction(Edge::Right), SnapDirection::Ceil);
        assert_eq!(grow.direction(Edge::Bottom), SnapDirection::Ceil);
    }

    #[test]
    fn snap_shrink_composite() {
        let shrink = RectSnap::SHRINK;
        assert_eq!(shrink.direction(Edge::Top), SnapDirection::Ceil);
        assert_eq!(shrink.direction(Edge::Left), SnapDirection::Ceil);
        assert_eq!(shrink.direction(Edge::Right), SnapDirection::Floor);
        assert_eq!(shrink.direction(Edge::Bottom), SnapDirection::Floor);
    }

    #[test]
    fn snap_with_edge_composes() {
        let snap = RectSnap::NONE.with_edge(Edge::Bottom, SnapDirection::Ceil);
        assert_eq!(snap.direction(Edge::Bottom), SnapDirection::Ceil);
        assert_eq!(snap.direction(Edge::Top), SnapDirection::None);
        let again = snap.with_edge(Edge::Bottom, SnapDirection::Floor);
        assert_eq!(again.direction(Edge::Bottom), SnapDirection::Floor);
        assert_eq!(snap.direction(Edge::Bottom), SnapDirection::Ceil);
    }

    #[test]
    fn snap_from_bits_validates() {
        assert_eq!(RectSnap::from_bits(0x01_02_02_01), Some(RectSnap::GROW));
        assert_eq!(RectSnap::from_bits(0x04_00_00_00), None);
        assert_eq!(RectSnap::from_bits(0x00_00_00_FF), None);
    }

    #[test]
    fn get_direction_out_of_range() {
        assert_eq!(get_direction(RectSnap::ROUND, 4), None);
    }

    // -----------------------------------------------------------------------
    // Rect
    // -----------------------------------------------------------------------

    #[test]
    fn rect_edges() {
        let r = Rect::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(r.right(), 4.0);
        assert_eq!(r.bottom(), 6.0);
        assert_eq!(r.origin(), Point::new(1.0, 2.0));
        assert_eq!(Rect::from_edges(2.0, 4.0, 6.0, 1.0), r);
    }

    #[test]
    fn rect_is_empty() {
        assert!(Rect::ZERO.is_empty());
        assert!(Rect::new(0.0, 0.0, 5.0, 0.0).is_empty());
        assert!(Rect::new(0.0, 0.0, -1.0, 3.0).is_empty());
        assert!(!Rect::new(0.0, 0.0, 1.0, 1.0).is_empty());
    }

    #[test]
    fn rect_snap_grow_covers_original() {
        let r = Rect::new(0.25, 0.5, 10.5, 3.25);
        assert_eq!(r.snap(RectSnap::GROW), Rect::new(0.0, 0.0, 11.0, 4.0));
    }

    #[test]
    fn rect_snap_shrink_stays_inside() {
        let r = Rect::new(0.25, 0.5, 10.5, 3.25);
        assert_eq!(r.snap(RectSnap::SHRINK), Rect::new(1.0, 1.0, 9.0, 2.0));
    }

    #[test]
    fn rect_snap_none_is_identity() {
        let r = Rect::new(0.25, 0.5, 10.5, 3.25);
        assert_eq!(r.snap(RectSnap::NONE), r);
    }

    #[test]
    fn rect_snap_round_keeps_neighbours_adjacent() {
        let a = Rect::new(0.0, 0.0, 10.4, 5.0);
        let b = Rect::new(10.4, 0.0, 10.0, 5.0);
        let sa = a.snap(RectSnap::ROUND);
        let sb = b.snap(RectSnap::ROUND);
        assert_eq!(sa.right(), sb.x);
    }

    #[test]
    fn rect_snap_to_grid_identity() {
        let r = Rect::new(0.4, 0.6, 10.2, 4.8);
        let snapped = r.snap_to_grid(Scale::IDENTITY, Point::ZERO).unwrap();
        assert_eq!(snapped, Rect::new(0.0, 1.0, 11.0, 4.0));
    }

    #[test]
    fn rect_snap_to_grid_scaled() {
        // At scale 2, half-pixel user coordinates land on whole device pixels.
        let r = Rect::new(0.5, 0.25, 1.0, 1.0);
        let snapped = r.snap_to_grid(Scale::uniform(2.0), Point::ZERO).unwrap();
        assert_eq!(snapped, Rect::new(0.5, 0.5, 1.0, 1.0));
    }

    #[test]
    fn rect_snap_to_grid_offset() {
        let r = Rect::new(0.0, 0.0, 2.0, 2.0);
        let snapped = r.snap_to_grid(Scale::IDENTITY, Point::new(0.5, 0.0)).unwrap();
        // Device left edge 0.5 rounds to 1, which maps back to 0.5.
        assert_eq!(snapped.x, 0.5);
        assert_eq!(snapped.width, 2.0);
    }

    #[test]
    fn rect_snap_to_grid_collapses() {
        let sliver = Rect::new(0.1, 0.0, 0.2, 5.0);
        assert_eq!(sliver.snap_to_grid(Scale::IDENTITY, Point::ZERO), None);
    }

    #[test]
    fn rect_translate() {
        let r = Rect::new(1.0, 1.0, 2.0, 2.0).translate(Point::new(-1.0, 3.0));
        assert_eq!(r, Rect::new(0.0, 4.0, 2.0, 2.0));
    }
}
