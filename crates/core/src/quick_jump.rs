//! # Quick-Jump
//!
//! Finds the card a flavor button should scroll to. The page renders the
//! target as an in-page anchor; the stylesheet pulses the card when it
//! becomes the `:target`.

use crate::models::{Flavor, ProjectRecord};

/// Where a flavor jump lands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JumpTarget {
    pub flavor: Flavor,
    pub id: String,
    /// Fragment including the leading `#`
    pub anchor: String,
}

/// First displayed record carrying the flavor. `None` means the jump is a
/// no-op.
pub fn jump_target(displayed: &[&ProjectRecord], flavor: Flavor) -> Option<JumpTarget> {
    displayed
        .iter()
        .find(|p| p.flavor_key == flavor)
        .map(|p| JumpTarget {
            flavor,
            id: p.id.clone(),
            anchor: format!("#{}", p.id),
        })
}
