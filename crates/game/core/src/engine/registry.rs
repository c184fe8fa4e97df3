use std::collections::BTreeSet;

use strum::IntoEnumIterator;

use crate::effect::EffectKind;

/// Set of effect kinds the dispatcher will apply.
///
/// Kinds missing from the registry are skipped without error so content
/// written for a newer ruleset still resolves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HandlerRegistry {
    kinds: BTreeSet<EffectKind>,
}

impl HandlerRegistry {
    /// No handlers at all.
    pub fn empty() -> Self {
        Self {
            kinds: BTreeSet::new(),
        }
    }

    /// Every built-in handler.
    pub fn standard() -> Self {
        Self {
            kinds: EffectKind::iter().collect(),
        }
    }

    pub fn with(mut self, kind: EffectKind) -> Self {
        self.kinds.insert(kind);
        self
    }

    pub fn without(mut self, kind: EffectKind) -> Self {
        self.kinds.remove(&kind);
        self
    }

    pub fn is_registered(&self, kind: EffectKind) -> bool {
        self.kinds.contains(&kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = EffectKind> + '_ {
        self.kinds.iter().copied()
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registers_every_kind() {
        let registry = HandlerRegistry::standard();
        assert!(EffectKind::iter().all(|kind| registry.is_registered(kind)));
    }

    #[test]
    fn without_unregisters() {
        let registry = HandlerRegistry::standard().without(EffectKind::Juice);
        assert!(!registry.is_registered(EffectKind::Juice));
        assert!(registry.is_registered(EffectKind::Message));
        assert!(HandlerRegistry::empty().with(EffectKind::Heal).is_registered(EffectKind::Heal));
    }
}
