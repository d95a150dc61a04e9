use serde::{Deserialize, Serialize};

use super::{EffectiveTime, EntityId};
use crate::errors::TemporalError;

/// Tracked state of an entity. `Unknown` is the implicit state before its
/// first row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityState {
    Unknown,
    Active,
    Inactive,
}

impl EntityState {
    pub fn from_active(active: bool) -> Self {
        if active {
            Self::Active
        } else {
            Self::Inactive
        }
    }
}

/// A named `(from states) -> to state` rule for the Transition Detector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionPredicate {
    name: String,
    from: Vec<EntityState>,
    to: EntityState,
}

impl TransitionPredicate {
    pub const FIRST_INACTIVATION: &'static str = "first_inactivation";
    pub const FIRST_ACTIVATION: &'static str = "first_activation";

    pub fn new(
        name: impl Into<String>,
        from: Vec<EntityState>,
        to: EntityState,
    ) -> Result<Self, TemporalError> {
        let name = name.into();
        let invalid = |reason: &str| TemporalError::InvalidPredicate {
            name: name.clone(),
            reason: reason.to_string(),
        };
        if from.is_empty() {
            return Err(invalid("no source state"));
        }
        if to == EntityState::Unknown {
            return Err(invalid("an observed row is never in the unknown state"));
        }
        if from.contains(&to) {
            return Err(invalid("source states include the target state"));
        }
        Ok(Self { name, from, to })
    }

    /// First `active -> inactive` flip.
    pub fn first_inactivation() -> Self {
        Self {
            name: Self::FIRST_INACTIVATION.to_string(),
            from: vec![EntityState::Active],
            to: EntityState::Inactive,
        }
    }

    /// First row observed active, whether or not rows precede it.
    pub fn first_activation() -> Self {
        Self {
            name: Self::FIRST_ACTIVATION.to_string(),
            from: vec![EntityState::Unknown, EntityState::Inactive],
            to: EntityState::Active,
        }
    }

    /// Resolve a built-in predicate by name.
    pub fn by_name(name: &str) -> Result<Self, TemporalError> {
        match name {
            Self::FIRST_INACTIVATION => Ok(Self::first_inactivation()),
            Self::FIRST_ACTIVATION => Ok(Self::first_activation()),
            other => Err(TemporalError::InvalidPredicate {
                name: other.to_string(),
                reason: "no built-in predicate with this name".to_string(),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn to_state(&self) -> EntityState {
        self.to
    }

    pub fn matches(&self, previous: EntityState, current: EntityState) -> bool {
        current == self.to && self.from.contains(&previous)
    }

    /// False when the rule fires on an entity's very first row.
    pub fn requires_observed_previous(&self) -> bool {
        !self.from.contains(&EntityState::Unknown)
    }
}

/// The first row of a timeline satisfying a predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionEvent {
    pub entity_id: EntityId,
    pub event_time: EffectiveTime,
    /// `None` when the previous state was the implicit `Unknown`.
    pub previous_time: Option<EffectiveTime>,
    pub predicate: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_match_expected_pairs() {
        let inact = TransitionPredicate::first_inactivation();
        assert!(inact.matches(EntityState::Active, EntityState::Inactive));
        assert!(!inact.matches(EntityState::Unknown, EntityState::Inactive));
        assert!(!inact.matches(EntityState::Inactive, EntityState::Inactive));
        assert!(inact.requires_observed_previous());
        assert_eq!(inact.to_state(), EntityState::Inactive);

        let act = TransitionPredicate::first_activation();
        assert!(act.matches(EntityState::Unknown, EntityState::Active));
        assert!(act.matches(EntityState::Inactive, EntityState::Active));
        assert!(!act.matches(EntityState::Active, EntityState::Active));
        assert!(!act.requires_observed_previous());
        assert_eq!(act.to_state(), EntityState::Active);
    }

    #[test]
    fn rejects_unresolvable_predicates() {
        assert!(TransitionPredicate::new("none", vec![], EntityState::Active).is_err());
        assert!(TransitionPredicate::new("self", vec![EntityState::Active], EntityState::Active).is_err());
        assert!(TransitionPredicate::new("unknown", vec![EntityState::Active], EntityState::Unknown).is_err());
        assert!(TransitionPredicate::by_name("first_reactivation").is_err());
        assert_eq!(
            TransitionPredicate::by_name("first_activation").unwrap(),
            TransitionPredicate::first_activation()
        );
    }
}
