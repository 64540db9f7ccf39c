pub mod squash;

pub use squash::Squash;
