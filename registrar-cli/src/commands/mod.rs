pub mod courses;
pub mod session;
