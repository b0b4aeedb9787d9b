use serde::{Deserialize, Serialize};

use crate::{
    reconcile::reconcile_entity, CharacteristicContext, CharacteristicType, EntityId, EntityKind,
    Icon, LiveGraph, LiveValue, ReconcileReport,
};

/// Name carried by the inert entries that pad characteristic groups.
pub const PLACEHOLDER_NAME: &str = "placeholder";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct Characteristic {
    #[serde(default)]
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub icon: Icon,
    #[serde(skip)]
    pub live: Option<EntityId>,
    #[serde(skip)]
    pub slider_value: Option<f32>,
    #[serde(skip)]
    pub placeholder: bool,
}

impl Characteristic {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: EntityId) -> Self {
        self.id = id;
        self
    }

    /// Inert entry used to fill up display groups. Never attached to the live graph.
    pub fn placeholder() -> Self {
        Self {
            name: PLACEHOLDER_NAME.to_owned(),
            icon: Icon::symbol("circle", crate::DisplayColor::Clear)
                .with_caption_location(crate::CaptionLocation::Left),
            placeholder: true,
            ..Default::default()
        }
    }

    pub fn is_attached(&self) -> bool {
        self.live.is_some()
    }

    pub fn context<'g, G: LiveGraph + ?Sized>(&self, graph: &'g G) -> Option<CharacteristicContext<'g>> {
        self.live.as_ref().and_then(|id| graph.characteristic(id))
    }

    pub fn characteristic_type<G: LiveGraph + ?Sized>(&self, graph: &G) -> Option<CharacteristicType> {
        self.context(graph)
            .map(|ctx| ctx.characteristic.characteristic_type.clone())
    }

    /// Current value, read through the back-reference. Never stored locally.
    pub fn value<'g, G: LiveGraph + ?Sized>(&self, graph: &'g G) -> Option<&'g LiveValue> {
        self.context(graph)
            .and_then(|ctx| ctx.characteristic.value.as_ref())
    }

    /// Matches by id anywhere in the graph, then by name. Characteristic names are usually
    /// type descriptions shared by many accessories, so prefer [`Self::reconcile_within`]
    /// when the owning accessories are known.
    pub fn reconcile<G: LiveGraph + ?Sized>(&mut self, graph: &G, report: &mut ReconcileReport) {
        self.reconcile_within(graph, &[], report);
    }

    /// Like [`Self::reconcile`], but a name match on one of the `preferred` accessories wins
    /// over the same name elsewhere in the graph.
    pub fn reconcile_within<G: LiveGraph + ?Sized>(
        &mut self,
        graph: &G,
        preferred: &[EntityId],
        report: &mut ReconcileReport,
    ) {
        if self.placeholder {
            return;
        }
        let mut live = graph.characteristics();
        if !preferred.is_empty() {
            live.sort_by_key(|ctx| !preferred.contains(&ctx.accessory.id));
        }
        self.live = reconcile_entity(
            EntityKind::Characteristic,
            &mut self.id,
            &self.name,
            &live,
            report,
        )
        .map(|ctx| ctx.characteristic.id);
    }

    pub(crate) fn from_live(ctx: &CharacteristicContext<'_>) -> Self {
        Self {
            id: ctx.characteristic.id,
            name: ctx.characteristic.name.clone(),
            live: Some(ctx.characteristic.id),
            ..Default::default()
        }
    }
}
