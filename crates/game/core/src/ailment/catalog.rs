//! Validated, immutable ailment table.

use std::collections::BTreeMap;

use super::definition::{AilmentDefinition, AilmentInteraction, TickFormula};
use crate::error::ContentError;
use crate::state::AilmentId;

/// Ailment definitions keyed by id, validated once at construction.
///
/// A catalog that exists is schema-valid and has an acyclic annihilation
/// graph; runtime code only walks edges in priority order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AilmentCatalog {
    definitions: BTreeMap<AilmentId, AilmentDefinition>,
}

impl AilmentCatalog {
    /// Catalog without definitions: every ailment effect is a no-op.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(definitions: Vec<AilmentDefinition>) -> Result<Self, ContentError> {
        let mut table = BTreeMap::new();
        for definition in definitions {
            validate_definition(&definition)?;
            let id = definition.id;
            if table.insert(id, definition).is_some() {
                return Err(ContentError::DuplicateAilment(id));
            }
        }

        for definition in table.values() {
            for edge in &definition.interactions {
                if !table.contains_key(&edge.target) {
                    return Err(ContentError::UnknownInteractionTarget {
                        from: definition.id,
                        to: edge.target,
                    });
                }
            }
        }

        if let Some(cycle) = find_cycle(&table) {
            return Err(ContentError::InteractionCycle(cycle));
        }

        Ok(Self { definitions: table })
    }

    pub fn get(&self, id: AilmentId) -> Option<&AilmentDefinition> {
        self.definitions.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AilmentDefinition> {
        self.definitions.values()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Outgoing edges of `id`, priority descending, ties by target id.
    pub fn interactions_of(&self, id: AilmentId) -> Vec<&AilmentInteraction> {
        let mut edges: Vec<_> = self
            .get(id)
            .map(|def| def.interactions.iter().collect())
            .unwrap_or_default();
        edges.sort_by(|a, b| b.priority.cmp(&a.priority).then(a.target.cmp(&b.target)));
        edges
    }
}

fn invalid(ailment: AilmentId, reason: impl Into<String>) -> ContentError {
    ContentError::InvalidDefinition {
        ailment,
        reason: reason.into(),
    }
}

fn validate_definition(def: &AilmentDefinition) -> Result<(), ContentError> {
    let id = def.id;

    if !def.scaling_factor.is_finite() || def.scaling_factor < 0.0 {
        return Err(invalid(id, "scaling_factor must be finite and non-negative"));
    }
    if !def.base_deposit.is_finite() || def.base_deposit < 0.0 {
        return Err(invalid(id, "base_deposit must be finite and non-negative"));
    }

    let mut seen = Vec::with_capacity(def.interactions.len());
    for edge in &def.interactions {
        if edge.target == id {
            return Err(invalid(id, "interaction targets itself"));
        }
        if !edge.ratio.is_finite() || edge.ratio <= 0.0 {
            return Err(invalid(
                id,
                format!("interaction ratio against {} must be finite and positive", edge.target),
            ));
        }
        if seen.contains(&edge.target) {
            return Err(invalid(
                id,
                format!("duplicate interaction against {}", edge.target),
            ));
        }
        seen.push(edge.target);
    }

    validate_formula(id, "tick.damage", &def.tick.damage)?;
    validate_formula(id, "tick.decay", &def.tick.decay)?;

    let hardening = &def.hardening;
    if !(0.0..=100.0).contains(&hardening.resistance_cap_pct) {
        return Err(invalid(id, "resistance_cap_pct must be within [0, 100]"));
    }
    if !hardening.xp_to_resistance.is_finite() || hardening.xp_to_resistance <= 0.0 {
        return Err(invalid(id, "xp_to_resistance must be finite and positive"));
    }
    for (name, rate) in [
        ("tick_xp_rate", hardening.tick_xp_rate),
        ("shock_xp_rate", hardening.shock_xp_rate),
    ] {
        if !rate.is_finite() || rate < 0.0 {
            return Err(invalid(id, format!("{name} must be finite and non-negative")));
        }
    }

    Ok(())
}

fn validate_formula(id: AilmentId, name: &str, formula: &TickFormula) -> Result<(), ContentError> {
    if formula.min > formula.max {
        return Err(invalid(id, format!("{name}: min exceeds max")));
    }
    let weights = [
        formula.base,
        formula.counter,
        formula.resistance,
        formula.max_hp,
        formula.body,
        formula.mind,
        formula.instinct,
    ];
    if weights.iter().any(|w| !w.is_finite()) {
        return Err(invalid(id, format!("{name}: weights must be finite")));
    }
    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnPath,
    Done,
}

/// Depth-first search over interaction edges. Returns the first cycle found,
/// closed with its starting node (`a -> b -> a`).
fn find_cycle(table: &BTreeMap<AilmentId, AilmentDefinition>) -> Option<Vec<AilmentId>> {
    let mut marks: BTreeMap<AilmentId, Mark> =
        table.keys().map(|id| (*id, Mark::Unvisited)).collect();

    for &start in table.keys() {
        if marks.get(&start) != Some(&Mark::Unvisited) {
            continue;
        }

        // Explicit stack of (node, next edge index).
        let mut path: Vec<AilmentId> = vec![start];
        let mut cursor: Vec<usize> = vec![0];
        marks.insert(start, Mark::OnPath);

        while let (Some(&node), Some(index)) = (path.last(), cursor.last_mut()) {
            let edges = table.get(&node).map(|d| d.interactions.as_slice()).unwrap_or(&[]);
            let Some(edge) = edges.get(*index) else {
                marks.insert(node, Mark::Done);
                path.pop();
                cursor.pop();
                continue;
            };
            *index += 1;

            match marks.get(&edge.target).copied() {
                Some(Mark::OnPath) => {
                    let start_at = path.iter().position(|id| *id == edge.target).unwrap_or(0);
                    let mut cycle = path[start_at..].to_vec();
                    cycle.push(edge.target);
                    return Some(cycle);
                }
                Some(Mark::Unvisited) => {
                    marks.insert(edge.target, Mark::OnPath);
                    path.push(edge.target);
                    cursor.push(0);
                }
                Some(Mark::Done) | None => {}
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::StatKind;

    fn def(id: AilmentId) -> AilmentDefinition {
        AilmentDefinition::new(id, StatKind::Mind, StatKind::Body)
    }

    #[test]
    fn accepts_acyclic_graph() {
        let catalog = AilmentCatalog::new(vec![
            def(AilmentId::Wet).with_interaction(AilmentId::Burn, 2.0, 1),
            def(AilmentId::Burn).with_interaction(AilmentId::Frozen, 1.0, 0),
            def(AilmentId::Frozen),
        ]);
        assert!(catalog.is_ok());
    }

    #[test]
    fn rejects_cycle_with_path() {
        let error = AilmentCatalog::new(vec![
            def(AilmentId::Burn).with_interaction(AilmentId::Wet, 1.0, 0),
            def(AilmentId::Wet).with_interaction(AilmentId::Frozen, 1.0, 0),
            def(AilmentId::Frozen).with_interaction(AilmentId::Burn, 1.0, 0),
        ])
        .unwrap_err();
        assert_eq!(
            error,
            ContentError::InteractionCycle(vec![
                AilmentId::Burn,
                AilmentId::Wet,
                AilmentId::Frozen,
                AilmentId::Burn,
            ])
        );
    }

    #[test]
    fn rejects_schema_violations() {
        let self_edge = AilmentCatalog::new(vec![
            def(AilmentId::Burn).with_interaction(AilmentId::Burn, 1.0, 0),
        ]);
        assert!(matches!(self_edge, Err(ContentError::InvalidDefinition { .. })));

        let bad_ratio = AilmentCatalog::new(vec![
            def(AilmentId::Burn).with_interaction(AilmentId::Wet, 0.0, 0),
            def(AilmentId::Wet),
        ]);
        assert!(matches!(bad_ratio, Err(ContentError::InvalidDefinition { .. })));

        let unknown = AilmentCatalog::new(vec![
            def(AilmentId::Burn).with_interaction(AilmentId::Wet, 1.0, 0),
        ]);
        assert_eq!(
            unknown,
            Err(ContentError::UnknownInteractionTarget {
                from: AilmentId::Burn,
                to: AilmentId::Wet,
            })
        );

        let duplicate = AilmentCatalog::new(vec![def(AilmentId::Bleed), def(AilmentId::Bleed)]);
        assert_eq!(duplicate, Err(ContentError::DuplicateAilment(AilmentId::Bleed)));
    }

    #[test]
    fn interactions_sorted_by_priority_then_id() {
        let catalog = AilmentCatalog::new(vec![
            def(AilmentId::Wet)
                .with_interaction(AilmentId::Frozen, 1.0, 0)
                .with_interaction(AilmentId::Burn, 1.0, 0)
                .with_interaction(AilmentId::Poison, 1.0, 5),
            def(AilmentId::Burn),
            def(AilmentId::Poison),
            def(AilmentId::Frozen),
        ])
        .unwrap();
        let order: Vec<_> = catalog
            .interactions_of(AilmentId::Wet)
            .into_iter()
            .map(|e| e.target)
            .collect();
        assert_eq!(order, vec![AilmentId::Poison, AilmentId::Burn, AilmentId::Frozen]);
    }
}
