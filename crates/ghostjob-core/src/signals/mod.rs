pub mod extract;
pub mod model;
pub mod patterns;
