mod aabb;
mod color;
mod ray;
mod spherical;
mod triangle;

pub use aabb::AABB;
pub use color::Color;
pub use ray::{intersect_aabb, Ray};
pub use spherical::Spherical;
pub use triangle::{moller_trumbore_intersect, TriangleIntersection};
