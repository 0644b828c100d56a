//! Built-in compilation passes.

mod basis;
mod cancel;
mod commute;
mod merge;

pub use basis::BasisTranslation;
pub use cancel::CancelInversePairs;
pub use commute::CommuteRzThroughControl;
pub use merge::MergeRotations;
