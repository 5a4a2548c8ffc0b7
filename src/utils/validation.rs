//! Numeric validity checks used by `is_valid()` implementations.
//!
//! Values failing these checks still decode; they only mark the owning
//! record as unfit for transmission.

/// True when the value is neither NaN nor infinite.
#[inline]
pub fn valid_f32(value: f32) -> bool {
    value.is_finite()
}

#[inline]
pub fn valid_f64(value: f64) -> bool {
    value.is_finite()
}

/// True when every value in the slice is finite.
pub fn all_valid_f32(values: &[f32]) -> bool {
    values.iter().copied().all(valid_f32)
}

pub fn all_valid_f64(values: &[f64]) -> bool {
    values.iter().copied().all(valid_f64)
}
