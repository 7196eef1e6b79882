use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::QualityTier;

/// A playable source for one tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityVariant {
    pub playback_url: String,
    /// Value the player must send as `Referer` when fetching `playback_url`.
    pub referer_header: String,
}

impl QualityVariant {
    pub fn new(playback_url: impl Into<String>, referer_header: impl Into<String>) -> Self {
        Self {
            playback_url: playback_url.into(),
            referer_header: referer_header.into(),
        }
    }
}

/// Whatever subset of tiers a provider returned.
pub type TierMap = BTreeMap<QualityTier, QualityVariant>;

/// Fixed-shape set of five tier slots.
///
/// Every slot serializes, absent ones as `null`, so a frontend can tell
/// "not offered" apart from "not loaded yet".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityLadder {
    pub p240: Option<QualityVariant>,
    pub p360: Option<QualityVariant>,
    pub p480: Option<QualityVariant>,
    pub p720: Option<QualityVariant>,
    pub p1080: Option<QualityVariant>,
}

impl QualityLadder {
    #[must_use]
    pub fn from_tiers(mut tiers: TierMap) -> Self {
        Self {
            p240: tiers.remove(&QualityTier::P240),
            p360: tiers.remove(&QualityTier::P360),
            p480: tiers.remove(&QualityTier::P480),
            p720: tiers.remove(&QualityTier::P720),
            p1080: tiers.remove(&QualityTier::P1080),
        }
    }

    #[must_use]
    pub const fn get(&self, tier: QualityTier) -> Option<&QualityVariant> {
        match tier {
            QualityTier::P240 => self.p240.as_ref(),
            QualityTier::P360 => self.p360.as_ref(),
            QualityTier::P480 => self.p480.as_ref(),
            QualityTier::P720 => self.p720.as_ref(),
            QualityTier::P1080 => self.p1080.as_ref(),
        }
    }

    /// Populated tiers, lowest first.
    #[must_use]
    pub fn available(&self) -> Vec<QualityTier> {
        QualityTier::ALL
            .into_iter()
            .filter(|tier| self.get(*tier).is_some())
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.available().is_empty()
    }
}
