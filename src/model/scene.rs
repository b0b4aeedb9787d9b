use serde::{Deserialize, Serialize};

use crate::{
    reconcile::reconcile_entity, EntityId, EntityKind, Icon, LiveActionSet, LiveGraph, LiveValue,
    ReconcileReport,
};

/// Kind of accessory a scene mainly drives, used to pick a tile layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub enum SceneAccessoryType {
    #[default]
    None,
    Light,
    Thermostat,
    Camera,
    Window,
    Door,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub enum SceneActionType {
    #[default]
    None,
    On,
    Off,
    Toggle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub enum SceneToCall {
    #[default]
    ActionSet,
    Shortcut,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    #[serde(default)]
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub icon: Icon,
    #[serde(default)]
    pub accessory_type: SceneAccessoryType,
    #[serde(skip)]
    pub action_type: SceneActionType,
    #[serde(default)]
    pub scene_to_call: SceneToCall,
    #[serde(default)]
    pub active: bool,
    #[serde(skip)]
    pub live: Option<EntityId>,
}

impl Scene {
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

    pub fn resolve<'g, G: LiveGraph + ?Sized>(&self, graph: &'g G) -> Option<&'g LiveActionSet> {
        self.live.as_ref().and_then(|id| graph.action_set(id))
    }

    /// True when every write action's target equals the current value, compared as integers.
    /// A detached scene is never executing.
    pub fn is_executing<G: LiveGraph + ?Sized>(&self, graph: &G) -> bool {
        let Some(action_set) = self.resolve(graph) else {
            return false;
        };
        action_set.actions.iter().all(|action| {
            let target = action.target.as_int();
            let current = graph
                .characteristic_value(&action.characteristic)
                .and_then(LiveValue::as_int);
            target == current
        })
    }

    /// The framework's own executing flag; `None` while detached.
    pub fn is_active<G: LiveGraph + ?Sized>(&self, graph: &G) -> Option<bool> {
        self.resolve(graph).map(|action_set| action_set.is_executing)
    }

    pub fn target_characteristics<G: LiveGraph + ?Sized>(&self, graph: &G) -> Vec<EntityId> {
        self.resolve(graph)
            .map(|action_set| action_set.actions.iter().map(|a| a.characteristic).collect())
            .unwrap_or_default()
    }

    pub fn reconcile<G: LiveGraph + ?Sized>(&mut self, graph: &G, report: &mut ReconcileReport) {
        self.live = reconcile_entity(
            EntityKind::Scene,
            &mut self.id,
            &self.name,
            graph.action_sets(),
            report,
        )
        .map(|action_set| action_set.id);
    }
}
