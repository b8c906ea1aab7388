//! Embassy tasks

pub mod clock;
pub mod face;

pub use clock::clock_task;
pub use face::face_task;
