//! Conversion of parsed dimensions to canonical units.
//!
//! Lengths compute to `px`, angles to `deg` and times to `s`. Font-relative
//! lengths need the element and root font sizes, which come from a
//! [`ComputeContext`].

use std::f64::consts::PI;

use crate::css::dimension::{Dimension, Unit, UnitCategory};

/// Inputs for resolving relative and physical units.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputeContext {
    /// Pixels per inch.
    pub dpi: f64,
    /// Font size of the element, in px.
    pub font_size: f64,
    /// Font size of the root element, in px.
    pub root_font_size: f64,
}

impl Default for ComputeContext {
    fn default() -> Self {
        Self {
            dpi: 96.0,
            font_size: 16.0,
            root_font_size: 16.0,
        }
    }
}

impl ComputeContext {
    /// Create a new default context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the resolution (builder).
    pub fn with_dpi(mut self, dpi: f64) -> Self {
        self.dpi = dpi;
        self
    }

    /// Set the element font size (builder).
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Set the root font size (builder).
    pub fn with_root_font_size(mut self, root_font_size: f64) -> Self {
        self.root_font_size = root_font_size;
        self
    }
}

impl Unit {
    /// The unit values of this unit's category compute to.
    pub fn canonical(self) -> Unit {
        match self.category() {
            UnitCategory::Number => Unit::Number,
            UnitCategory::Percentage => Unit::Percent,
            UnitCategory::Length => Unit::Px,
            UnitCategory::Angle => Unit::Deg,
            UnitCategory::Time => Unit::S,
        }
    }
}

impl Dimension {
    /// Whether the value is already in its category's canonical unit.
    pub fn is_canonical(&self) -> bool {
        self.unit == self.unit.canonical()
    }

    /// Convert to the canonical unit of the value's category.
    pub fn compute(&self, ctx: &ComputeContext) -> Dimension {
        let factor = match self.unit {
            Unit::Number | Unit::Percent | Unit::Px | Unit::Deg | Unit::S => 1.0,
            Unit::Pt => ctx.dpi / 72.0,
            Unit::Pc => ctx.dpi / 72.0 * 12.0,
            Unit::In => ctx.dpi,
            Unit::Cm => ctx.dpi / 2.54,
            Unit::Mm => ctx.dpi / 25.4,
            Unit::Em => ctx.font_size,
            Unit::Ex => ctx.font_size * 0.5,
            Unit::Rem => ctx.root_font_size,
            Unit::Rad => 180.0 / PI,
            Unit::Grad => 360.0 / 400.0,
            Unit::Turn => 360.0,
            Unit::Ms => 1.0 / 1000.0,
        };
        Dimension::new(self.value * factor, self.unit.canonical())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Dimension, b: Dimension) -> bool {
        a.unit == b.unit && (a.value - b.value).abs() < 1e-9
    }

    #[test]
    fn test_default_context() {
        let ctx = ComputeContext::new();
        assert_eq!(ctx.dpi, 96.0);
        assert_eq!(ctx.font_size, 16.0);
        assert_eq!(ctx.root_font_size, 16.0);
    }

    #[test]
    fn test_builder() {
        let ctx = ComputeContext::new()
            .with_dpi(144.0)
            .with_font_size(10.0)
            .with_root_font_size(20.0);
        assert_eq!(ctx, ComputeContext { dpi: 144.0, font_size: 10.0, root_font_size: 20.0 });
    }

    #[test]
    fn test_physical_lengths() {
        let ctx = ComputeContext::default();
        assert!(close(Dimension::new(72.0, Unit::Pt).compute(&ctx), Dimension::px(96.0)));
        assert!(close(Dimension::new(1.0, Unit::Pc).compute(&ctx), Dimension::px(16.0)));
        assert!(close(Dimension::new(1.0, Unit::In).compute(&ctx), Dimension::px(96.0)));
        assert!(close(Dimension::new(2.54, Unit::Cm).compute(&ctx), Dimension::px(96.0)));
        assert!(close(Dimension::new(25.4, Unit::Mm).compute(&ctx), Dimension::px(96.0)));
    }

    #[test]
    fn test_font_relative_lengths() {
        let ctx = ComputeContext::new().with_font_size(10.0).with_root_font_size(20.0);
        assert!(close(Dimension::new(2.0, Unit::Em).compute(&ctx), Dimension::px(20.0)));
        assert!(close(Dimension::new(2.0, Unit::Ex).compute(&ctx), Dimension::px(10.0)));
        assert!(close(Dimension::new(2.0, Unit::Rem).compute(&ctx), Dimension::px(40.0)));
    }

    #[test]
    fn test_angles_and_times() {
        let ctx = ComputeContext::default();
        let deg = |v| Dimension::new(v, Unit::Deg);
        assert!(close(Dimension::new(PI, Unit::Rad).compute(&ctx), deg(180.0)));
        assert!(close(Dimension::new(100.0, Unit::Grad).compute(&ctx), deg(90.0)));
        assert!(close(Dimension::new(0.5, Unit::Turn).compute(&ctx), deg(180.0)));
        assert!(close(
            Dimension::new(250.0, Unit::Ms).compute(&ctx),
            Dimension::new(0.25, Unit::S)
        ));
    }

    #[test]
    fn test_numbers_and_percentages_unchanged() {
        let ctx = ComputeContext::default();
        assert_eq!(Dimension::number(3.0).compute(&ctx), Dimension::number(3.0));
        assert_eq!(Dimension::percent(50.0).compute(&ctx), Dimension::percent(50.0));
        assert!(Dimension::percent(50.0).is_canonical());
        assert!(!Dimension::new(1.0, Unit::Em).is_canonical());
    }
}
