pub mod resume;

pub use resume::{JobDescription, Resume};
