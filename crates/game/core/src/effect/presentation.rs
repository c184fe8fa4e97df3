//! Presentation-only effects. They are recorded, never interpreted by rules.

use crate::engine::HandlerApi;
use crate::state::Position;

/// Append a line to the message log.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MessageEffect {
    pub text: String,
}

impl MessageEffect {
    pub(crate) fn apply(&self, api: &mut HandlerApi<'_>) {
        api.push_message(self.text.clone());
    }
}

/// Visual feedback cue (shake, flash, particles) for the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JuiceEffect {
    pub signature: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub position: Option<Position>,
}

impl JuiceEffect {
    pub(crate) fn apply(&self, api: &mut HandlerApi<'_>) {
        api.push_visual(self.signature.clone(), self.position);
    }
}
