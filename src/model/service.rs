use serde::{Deserialize, Serialize};

use crate::{Characteristic, CharacteristicContext, EntityId, Icon, LiveAccessory, LiveGraph, LiveService};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct Service {
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
    #[serde(default)]
    pub characteristics: Vec<Characteristic>,
}

impl Service {
    pub(crate) fn from_live(accessory: &LiveAccessory, service: &LiveService) -> Self {
        Self {
            id: service.id,
            name: service.name.clone(),
            live: Some(service.id),
            characteristics: service
                .characteristics
                .iter()
                .map(|characteristic| {
                    Characteristic::from_live(&CharacteristicContext {
                        characteristic,
                        service,
                        accessory,
                    })
                })
                .collect(),
            ..Default::default()
        }
    }

    pub fn resolve<'g, G: LiveGraph + ?Sized>(&self, graph: &'g G) -> Option<&'g LiveService> {
        let id = self.live.as_ref()?;
        graph
            .accessories()
            .iter()
            .flat_map(|a| a.services.iter())
            .find(|s| &s.id == id)
    }
}
