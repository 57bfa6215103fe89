//! Coordinate handling: the regional offset transform, and the planar
//! linear referencing used to place positions upon road geometry.

pub mod linear;
pub mod shift;

#[cfg(test)]
mod test;

#[doc(inline)]
pub use shift::{Crs, Normalization};
