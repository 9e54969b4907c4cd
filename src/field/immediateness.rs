//! When field edits reach the host

use serde::{
    Deserialize,
    Serialize,
};

/// Propagation policy for edits made in the renderer.
///
/// The ordinals are part of the renderer wire format; never reorder the variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum Immediateness {
    /// The host reads the value when it asks for it (e.g. on form commit)
    #[default]
    None = 0,
    /// The host is notified once per committed field change
    Normal = 1,
    /// The host is notified once per individual locale/text edit
    PerEntry = 2,
}

impl Immediateness {
    /// Wire ordinal sent to the renderer
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Inverse of [`Immediateness::ordinal`]
    #[must_use]
    pub const fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            0 => Some(Self::None),
            1 => Some(Self::Normal),
            2 => Some(Self::PerEntry),
            _ => None,
        }
    }
}

impl From<bool> for Immediateness {
    fn from(immediate: bool) -> Self {
        if immediate { Self::Normal } else { Self::None }
    }
}
