//! # Logical Element Descriptors
//!
//! Descriptors map a logical value (number, field element, curve point) to
//! the depth range it occupies on the stack. `position` is the depth of the
//! element's most significant limb, counted from the top of the stack
//! (depth 0 = topmost); further limbs sit at `position - 1`, ...,
//! `position - length + 1`. A negative position is the bottom-anchored
//! sentinel: depth -1 is the single bottom element, -2 the one above it,
//! resolved at execution time via OP_DEPTH.
//!
//! Descriptors are immutable value objects; [`shift`](StackNumber::shift)
//! returns a new descriptor and is a no-op on bottom-anchored positions,
//! whose depth is only known at run time.

use serde::{Deserialize, Serialize};

use crate::error::BuilderError;

/// Relocation strategy: duplicate to the top, or remove and re-insert.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveMode {
    /// Non-destructive: the source limbs stay in place (OP_PICK family)
    Copy,
    /// Destructive: the source limbs are consumed (OP_ROLL family)
    Move,
}

impl MoveMode {
    /// Map a per-operand "is rolled" flag to the strategy it selects.
    #[inline]
    pub fn rolling(is_rolled: bool) -> Self {
        if is_rolled {
            MoveMode::Move
        } else {
            MoveMode::Copy
        }
    }

    /// Check if this strategy consumes the source limbs.
    #[inline]
    pub fn is_rolling(self) -> bool {
        matches!(self, MoveMode::Move)
    }
}

/// Common view of a descriptor's occupied depth range.
pub trait StackElement {
    /// Depth of the most significant limb, or a negative bottom anchor.
    fn position(&self) -> i64;

    /// Number of consecutive limbs.
    fn length(&self) -> usize;

    /// Check if this element's depth is resolved only at execution time.
    fn is_bottom_anchored(&self) -> bool {
        self.position() < 0
    }

    /// Check if `self` sits strictly deeper than `other`, without overlap.
    fn is_before(&self, other: &dyn StackElement) -> bool {
        self.position() - self.length() as i64 >= other.position()
    }
}

/// Reject descriptor lists that are not in strictly decreasing depth order.
///
/// Compound macros address several elements in one emission and rely on
/// this ordering to compute depth shifts; a violation is a usage error.
pub fn check_order(elements: &[&dyn StackElement]) -> Result<(), BuilderError> {
    for pair in elements.windows(2) {
        if !pair[0].is_before(pair[1]) {
            return Err(BuilderError::OrderViolation {
                deeper: pair[0].position(),
                shallower: pair[1].position(),
            });
        }
    }
    Ok(())
}

/// Decode a rolling/retention bitmask into per-operand flags.
///
/// Bit `i` (LSB first) selects the flag for the `i`-th listed operand:
///
/// ```text
/// mask 0b101, 3 operands -> [true, false, true]
/// ```
pub fn bitmask_to_flags(mask: u32, n: usize) -> Vec<bool> {
    (0..n).map(|i| mask >> i & 1 == 1).collect()
}

/// An untyped byte-string element occupying a single stack slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackBaseElement {
    pub position: i64,
}

impl StackBaseElement {
    pub fn new(position: i64) -> Self {
        Self { position }
    }

    /// A new descriptor `k` units deeper; no-op when bottom-anchored.
    pub fn shift(&self, k: i64) -> Self {
        if self.position < 0 {
            *self
        } else {
            Self::new(self.position + k)
        }
    }
}

impl StackElement for StackBaseElement {
    fn position(&self) -> i64 {
        self.position
    }

    fn length(&self) -> usize {
        1
    }
}

/// A single-slot number with a deferred sign flip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackNumber {
    pub position: i64,
    /// Apply OP_NEGATE when the value is consumed.
    pub negate: bool,
}

impl StackNumber {
    pub fn new(position: i64, negate: bool) -> Self {
        Self { position, negate }
    }

    /// A new descriptor `k` units deeper; no-op when bottom-anchored.
    pub fn shift(&self, k: i64) -> Self {
        if self.position < 0 {
            *self
        } else {
            Self::new(self.position + k, self.negate)
        }
    }
}

impl StackElement for StackNumber {
    fn position(&self) -> i64 {
        self.position
    }

    fn length(&self) -> usize {
        1
    }
}

/// A finite field element of `extension_degree` consecutive limbs.
///
/// A base field element has degree 1; an extension field element stores one
/// limb per coefficient, the most significant at `position`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackFiniteFieldElement {
    pub position: i64,
    /// Apply OP_NEGATE when the value is consumed.
    pub negate: bool,
    pub extension_degree: usize,
}

impl StackFiniteFieldElement {
    pub fn new(position: i64, negate: bool, extension_degree: usize) -> Self {
        Self {
            position,
            negate,
            extension_degree,
        }
    }

    /// A new descriptor `k` units deeper; no-op when bottom-anchored.
    pub fn shift(&self, k: i64) -> Self {
        if self.position < 0 {
            *self
        } else {
            Self::new(self.position + k, self.negate, self.extension_degree)
        }
    }
}

impl StackElement for StackFiniteFieldElement {
    fn position(&self) -> i64 {
        self.position
    }

    fn length(&self) -> usize {
        self.extension_degree
    }
}

/// An affine elliptic curve point: coordinates (x, y), each a field
/// element, with y immediately above x.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackEllipticCurvePoint {
    pub x: StackFiniteFieldElement,
    pub y: StackFiniteFieldElement,
}

impl StackEllipticCurvePoint {
    /// Build a point descriptor, checking that the coordinates are adjacent
    /// and of equal extension degree.
    pub fn new(
        x: StackFiniteFieldElement,
        y: StackFiniteFieldElement,
    ) -> Result<Self, BuilderError> {
        let expected = x.position - x.extension_degree as i64;
        if y.extension_degree != x.extension_degree || (x.position >= 0 && y.position != expected)
        {
            return Err(BuilderError::PointShape {
                expected,
                found: y.position,
            });
        }
        Ok(Self { x, y })
    }

    /// A new descriptor `k` units deeper; no-op when bottom-anchored.
    pub fn shift(&self, k: i64) -> Self {
        Self {
            x: self.x.shift(k),
            y: self.y.shift(k),
        }
    }
}

impl StackElement for StackEllipticCurvePoint {
    fn position(&self) -> i64 {
        self.x.position
    }

    fn length(&self) -> usize {
        2 * self.x.extension_degree
    }
}

/// A projective elliptic curve point: coordinates (x, y, z) stacked
/// contiguously, x deepest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackEllipticCurvePointProjective {
    pub x: StackFiniteFieldElement,
    pub y: StackFiniteFieldElement,
    pub z: StackFiniteFieldElement,
}

impl StackEllipticCurvePointProjective {
    /// Build a point descriptor, checking coordinate adjacency and equal
    /// extension degrees.
    pub fn new(
        x: StackFiniteFieldElement,
        y: StackFiniteFieldElement,
        z: StackFiniteFieldElement,
    ) -> Result<Self, BuilderError> {
        let degree = x.extension_degree as i64;
        for (prev, next) in [(&x, &y), (&y, &z)] {
            let expected = prev.position - degree;
            if next.extension_degree != x.extension_degree
                || (x.position >= 0 && next.position != expected)
            {
                return Err(BuilderError::PointShape {
                    expected,
                    found: next.position,
                });
            }
        }
        Ok(Self { x, y, z })
    }

    /// A new descriptor `k` units deeper; no-op when bottom-anchored.
    pub fn shift(&self, k: i64) -> Self {
        Self {
            x: self.x.shift(k),
            y: self.y.shift(k),
            z: self.z.shift(k),
        }
    }
}

impl StackElement for StackEllipticCurvePointProjective {
    fn position(&self) -> i64 {
        self.x.position
    }

    fn length(&self) -> usize {
        3 * self.x.extension_degree
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift() {
        let el = StackNumber::new(3, false);
        assert_eq!(el.shift(2).position, 5);

        // Bottom-anchored depth is runtime-resolved; shifting is a no-op.
        let bottom = StackNumber::new(-1, false);
        assert_eq!(bottom.shift(2).position, -1);
    }

    #[test]
    fn test_lengths() {
        assert_eq!(StackBaseElement::new(0).length(), 1);
        assert_eq!(StackFiniteFieldElement::new(5, false, 3).length(), 3);

        let x = StackFiniteFieldElement::new(3, false, 2);
        let y = StackFiniteFieldElement::new(1, false, 2);
        let point = StackEllipticCurvePoint::new(x, y).unwrap();
        assert_eq!(point.length(), 4);
        assert_eq!(point.position(), 3);
    }

    #[test]
    fn test_point_shape_rejected() {
        let x = StackFiniteFieldElement::new(3, false, 2);
        let y = StackFiniteFieldElement::new(0, false, 2);
        assert!(matches!(
            StackEllipticCurvePoint::new(x, y),
            Err(BuilderError::PointShape { .. })
        ));

        let y_wrong_degree = StackFiniteFieldElement::new(1, false, 1);
        assert!(StackEllipticCurvePoint::new(x, y_wrong_degree).is_err());
    }

    #[test]
    fn test_projective_point() {
        let x = StackFiniteFieldElement::new(2, false, 1);
        let y = StackFiniteFieldElement::new(1, false, 1);
        let z = StackFiniteFieldElement::new(0, false, 1);
        let point = StackEllipticCurvePointProjective::new(x, y, z).unwrap();
        assert_eq!(point.length(), 3);

        let shifted = point.shift(4);
        assert_eq!(shifted.x.position, 6);
        assert_eq!(shifted.z.position, 4);
    }

    #[test]
    fn test_check_order() {
        let a = StackNumber::new(2, false);
        let b = StackNumber::new(1, false);
        let c = StackNumber::new(0, false);
        assert!(check_order(&[&a, &b, &c]).is_ok());

        assert_eq!(
            check_order(&[&b, &a]),
            Err(BuilderError::OrderViolation {
                deeper: 1,
                shallower: 2
            })
        );

        // Overlapping ranges are an ordering violation too.
        let wide = StackFiniteFieldElement::new(2, false, 2);
        let under = StackNumber::new(1, false);
        assert!(check_order(&[&wide, &under]).is_err());
    }

    #[test]
    fn test_bitmask_to_flags() {
        assert_eq!(bitmask_to_flags(0b101, 3), vec![true, false, true]);
        assert_eq!(bitmask_to_flags(0b11, 2), vec![true, true]);
        assert_eq!(bitmask_to_flags(0, 3), vec![false, false, false]);
    }

    #[test]
    fn test_move_mode() {
        assert_eq!(MoveMode::rolling(true), MoveMode::Move);
        assert_eq!(MoveMode::rolling(false), MoveMode::Copy);
        assert!(MoveMode::Move.is_rolling());
        assert!(!MoveMode::Copy.is_rolling());
    }
}
