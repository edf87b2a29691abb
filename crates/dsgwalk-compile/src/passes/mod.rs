//! Built-in compilation passes.

mod optimize_1q;
mod translation;
mod unroll;

pub use optimize_1q::Optimize1qGates;
pub use translation::BasisTranslation;
pub use unroll::UnrollComposites;
