//! Vector and matrix types.
//!
//! Re-exports the SIMD-accelerated [`glam`] types used throughout the engine
//! for cursor positions, window sizes and camera transforms.
//!
//! ```
//! use strata_core::math::{Mat4, Vec2, Vec3};
//!
//! let cursor = Vec2::new(10.0, 20.0);
//! let moved = cursor + Vec2::new(1.0, 0.5);
//! let transform = Mat4::from_translation(Vec3::new(moved.x, moved.y, 0.0));
//! assert_eq!(transform.w_axis.x, 11.0);
//! ```
//!
//! [`glam`]: https://docs.rs/glam

pub use glam::{IVec2, Mat4, Quat, UVec2, Vec2, Vec3, Vec4};
