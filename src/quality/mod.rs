pub mod ladder;
pub mod tier;

pub use ladder::{QualityLadder, QualityVariant, TierMap};
pub use tier::QualityTier;
