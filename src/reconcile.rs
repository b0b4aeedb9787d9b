//! Matches persisted records back to live graph entities.
//!
//! Lookup is two-tiered: exact identifier first, exact name second. A name match repairs the
//! local identifier and the repair is reported so the caller can persist it. A miss is logged
//! and reported but never aborts reconciliation of sibling records.

use crate::{
    CharacteristicContext, EntityId, EntityKind, LiveAccessory, LiveActionSet, LiveRoom,
    MirrorError,
};

pub trait Identified {
    fn entity_id(&self) -> &EntityId;
    fn entity_name(&self) -> &str;
}

impl Identified for LiveRoom {
    fn entity_id(&self) -> &EntityId {
        &self.id
    }
    fn entity_name(&self) -> &str {
        &self.name
    }
}

impl Identified for LiveAccessory {
    fn entity_id(&self) -> &EntityId {
        &self.id
    }
    fn entity_name(&self) -> &str {
        &self.name
    }
}

impl Identified for LiveActionSet {
    fn entity_id(&self) -> &EntityId {
        &self.id
    }
    fn entity_name(&self) -> &str {
        &self.name
    }
}

impl Identified for CharacteristicContext<'_> {
    fn entity_id(&self) -> &EntityId {
        &self.characteristic.id
    }
    fn entity_name(&self) -> &str {
        &self.characteristic.name
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Match<'a, T> {
    ById(&'a T),
    ByName(&'a T),
    NotFound,
}

impl<'a, T> Match<'a, T> {
    pub fn entity(&self) -> Option<&'a T> {
        match self {
            Match::ById(entity) | Match::ByName(entity) => Some(entity),
            Match::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        !matches!(self, Match::NotFound)
    }
}

pub fn find_match<'a, T: Identified>(id: &EntityId, name: &str, live: &'a [T]) -> Match<'a, T> {
    if let Some(entity) = live.iter().find(|e| e.entity_id() == id) {
        return Match::ById(entity);
    }
    match live.iter().find(|e| e.entity_name() == name) {
        Some(entity) => Match::ByName(entity),
        None => Match::NotFound,
    }
}

/// A local identifier replaced by the identifier of the live entity matched by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdRepair {
    pub kind: EntityKind,
    pub name: String,
    pub from: EntityId,
    pub to: EntityId,
}

#[derive(Debug, Default)]
pub struct ReconcileReport {
    pub matched: usize,
    pub repairs: Vec<IdRepair>,
    pub missing: Vec<MirrorError>,
}

impl ReconcileReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when identifiers changed and the home should be written back to storage.
    pub fn requires_save(&self) -> bool {
        !self.repairs.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        self.repairs.is_empty() && self.missing.is_empty()
    }

    pub fn missing_count(&self, kind: EntityKind) -> usize {
        self.missing
            .iter()
            .filter(|e| matches!(e, MirrorError::NotFound { kind: k, .. } if *k == kind))
            .count()
    }
}

/// Resolves one record against `live`, repairing `id` on a name match.
pub(crate) fn reconcile_entity<'a, T: Identified>(
    kind: EntityKind,
    id: &mut EntityId,
    name: &str,
    live: &'a [T],
    report: &mut ReconcileReport,
) -> Option<&'a T> {
    match find_match(id, name, live) {
        Match::ById(entity) => {
            report.matched += 1;
            Some(entity)
        }
        Match::ByName(entity) => {
            let to = *entity.entity_id();
            log::info!("Matched {kind} '{name}' by name, repairing id {id} -> {to}");
            report.matched += 1;
            report.repairs.push(IdRepair {
                kind,
                name: name.to_owned(),
                from: *id,
                to,
            });
            *id = to;
            Some(entity)
        }
        Match::NotFound => {
            log::warn!("No live {kind} found for '{name}' ({id})");
            report.missing.push(MirrorError::NotFound {
                kind,
                name: name.to_owned(),
            });
            None
        }
    }
}

impl<T: Identified + ?Sized> Identified for &T {
    fn entity_id(&self) -> &EntityId {
        (**self).entity_id()
    }
    fn entity_name(&self) -> &str {
        (**self).entity_name()
    }
}

macro_rules! impl_identified {
    ($($t:ty),* $(,)?) => {
        $(
            impl Identified for $t {
                fn entity_id(&self) -> &EntityId {
                    &self.id
                }
                fn entity_name(&self) -> &str {
                    &self.name
                }
            }
        )*
    };
}

impl_identified!(
    crate::Room,
    crate::Accessory,
    crate::Service,
    crate::Characteristic,
    crate::Scene,
);
