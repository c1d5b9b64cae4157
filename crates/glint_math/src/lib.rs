// Re-export glam's f64 types under the names the tracer uses
pub use glam::{dvec3 as vec3, DVec3 as Vec3};

mod ray;
pub use ray::Ray;
