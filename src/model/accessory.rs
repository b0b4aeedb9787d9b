use serde::{Deserialize, Serialize};

use crate::{
    reconcile::reconcile_entity, AccessoryCategory, Characteristic, CharacteristicContext,
    CharacteristicType, EntityId, EntityKind, Icon, LiveAccessory, LiveCharacteristic, LiveGraph,
    ReconcileReport, Service,
};

/// Characteristics whose boolean value is reported as the accessory's power state.
pub const POWER_STATE_TYPES: &[CharacteristicType] = &[
    CharacteristicType::PowerState,
    CharacteristicType::ContactState,
    CharacteristicType::CurrentHeatingCooling,
    CharacteristicType::LeakDetected,
];

/// An accessory carrying any of these can drive room status.
pub const STATUS_UPDATE_TYPES: &[CharacteristicType] = &[
    CharacteristicType::PowerState,
    CharacteristicType::ContactState,
    CharacteristicType::CurrentHeatingCooling,
    CharacteristicType::StatusActive,
];

/// Characteristics that get a state icon on accessory tiles.
pub const STATE_TYPES: &[CharacteristicType] = &[
    CharacteristicType::ContactState,
    CharacteristicType::CarbonDioxideLevel,
    CharacteristicType::CarbonMonoxideLevel,
    CharacteristicType::CurrentHeatingCooling,
    CharacteristicType::AirQuality,
    CharacteristicType::OccupancyDetected,
    CharacteristicType::MotionDetected,
    CharacteristicType::Mute,
    CharacteristicType::CurrentSecuritySystemState,
    CharacteristicType::LeakDetected,
    CharacteristicType::VolatileOrganicCompoundDensity,
    CharacteristicType::StatusLowBattery,
    CharacteristicType::CurrentLockMechanismState,
];

pub const POWER_AND_THERMOSTAT_TYPES: &[CharacteristicType] = &[
    CharacteristicType::PowerState,
    CharacteristicType::CurrentHeatingCooling,
    CharacteristicType::TargetHeatingCooling,
];

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct Accessory {
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
    pub services: Vec<Service>,
    #[serde(skip)]
    pub characteristics: Vec<Characteristic>,
}

impl Accessory {
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

    pub fn is_attached(&self) -> bool {
        self.live.is_some()
    }

    pub fn resolve<'g, G: LiveGraph + ?Sized>(&self, graph: &'g G) -> Option<&'g LiveAccessory> {
        self.live.as_ref().and_then(|id| graph.accessory(id))
    }

    pub fn category<G: LiveGraph + ?Sized>(&self, graph: &G) -> Option<AccessoryCategory> {
        self.resolve(graph).map(|a| a.category.clone())
    }

    pub fn power_state<G: LiveGraph + ?Sized>(&self, graph: &G) -> Option<bool> {
        self.first_value(graph, POWER_STATE_TYPES)?.as_bool()
    }

    pub fn current_temperature<G: LiveGraph + ?Sized>(&self, graph: &G) -> Option<f32> {
        self.first_value(graph, &[CharacteristicType::CurrentTemperature])?
            .as_f64()
            .map(|v| v as f32)
    }

    pub fn target_temperature<G: LiveGraph + ?Sized>(&self, graph: &G) -> Option<f32> {
        self.first_value(graph, &[CharacteristicType::TargetTemperature])?
            .as_f64()
            .map(|v| v as f32)
    }

    /// Heating/cooling mode or carbon dioxide level, whichever comes first.
    pub fn state_float<G: LiveGraph + ?Sized>(&self, graph: &G) -> Option<f32> {
        self.first_value(
            graph,
            &[
                CharacteristicType::CurrentHeatingCooling,
                CharacteristicType::CarbonDioxideLevel,
            ],
        )?
        .as_f64()
        .map(|v| v as f32)
    }

    /// Value of the first characteristic of `characteristic_type`, 0 when absent.
    pub fn value_for_type<G: LiveGraph + ?Sized>(
        &self,
        graph: &G,
        characteristic_type: CharacteristicType,
    ) -> f32 {
        self.first_value(graph, &[characteristic_type])
            .and_then(|v| v.as_f64())
            .map(|v| v as f32)
            .unwrap_or(0.0)
    }

    pub fn supports_status_updates<G: LiveGraph + ?Sized>(&self, graph: &G) -> bool {
        self.resolve(graph)
            .and_then(|a| a.first_of(STATUS_UPDATE_TYPES))
            .is_some()
    }

    pub fn state_characteristics<'g, G: LiveGraph + ?Sized>(
        &self,
        graph: &'g G,
    ) -> Vec<&'g LiveCharacteristic> {
        self.characteristics_of(graph, STATE_TYPES)
    }

    pub fn power_and_thermostat_characteristics<'g, G: LiveGraph + ?Sized>(
        &self,
        graph: &'g G,
    ) -> Vec<&'g LiveCharacteristic> {
        self.characteristics_of(graph, POWER_AND_THERMOSTAT_TYPES)
    }

    fn characteristics_of<'g, G: LiveGraph + ?Sized>(
        &self,
        graph: &'g G,
        types: &[CharacteristicType],
    ) -> Vec<&'g LiveCharacteristic> {
        self.resolve(graph)
            .map(|a| {
                a.characteristics()
                    .filter(|c| types.contains(&c.characteristic_type))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn first_value<'g, G: LiveGraph + ?Sized>(
        &self,
        graph: &'g G,
        types: &[CharacteristicType],
    ) -> Option<&'g crate::LiveValue> {
        self.resolve(graph)?.first_of(types)?.value.as_ref()
    }

    /// Attaches the back-reference and mirrors the live services and characteristics.
    /// An unmatched accessory is left detached and inert.
    pub fn reconcile<G: LiveGraph + ?Sized>(&mut self, graph: &G, report: &mut ReconcileReport) {
        let live = reconcile_entity(
            EntityKind::Accessory,
            &mut self.id,
            &self.name,
            graph.accessories(),
            report,
        );
        match live {
            Some(accessory) => {
                self.live = Some(accessory.id);
                self.services = accessory
                    .services
                    .iter()
                    .map(|service| Service::from_live(accessory, service))
                    .collect();
                self.characteristics = accessory
                    .services
                    .iter()
                    .flat_map(|service| {
                        service.characteristics.iter().map(move |characteristic| {
                            Characteristic::from_live(&CharacteristicContext {
                                characteristic,
                                service,
                                accessory,
                            })
                        })
                    })
                    .collect();
            }
            None => {
                self.live = None;
                self.services.clear();
                self.characteristics.clear();
            }
        }
    }
}
