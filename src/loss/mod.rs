pub mod linear;
pub mod mse;

pub use linear::LinearLoss;
pub use mse::MseLoss;
