//! Read-only view of the live home graph owned by the home-automation framework.
//!
//! Mirror records never own live objects. They hold an [`EntityId`] back-reference and
//! resolve it through a [`LiveGraph`] whenever a derived value is requested.

use serde::{Deserialize, Serialize};

use crate::{AccessoryCategory, CharacteristicType, EntityId, ServiceType, ValueFormat};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LiveValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl LiveValue {
    /// Booleans, and integers that are exactly 0 or 1.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            LiveValue::Bool(b) => Some(*b),
            LiveValue::Int(0) => Some(false),
            LiveValue::Int(1) => Some(true),
            _ => None,
        }
    }

    /// Integers, booleans as 0/1 and floats without a fractional part.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            LiveValue::Int(i) => Some(*i),
            LiveValue::Bool(b) => Some(i64::from(*b)),
            LiveValue::Float(f) if f.fract() == 0.0 && f.is_finite() => Some(*f as i64),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            LiveValue::Float(f) => Some(*f),
            LiveValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            LiveValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl From<bool> for LiveValue {
    fn from(value: bool) -> Self {
        LiveValue::Bool(value)
    }
}

impl From<i64> for LiveValue {
    fn from(value: i64) -> Self {
        LiveValue::Int(value)
    }
}

impl From<f64> for LiveValue {
    fn from(value: f64) -> Self {
        LiveValue::Float(value)
    }
}

impl From<&str> for LiveValue {
    fn from(value: &str) -> Self {
        LiveValue::String(value.to_owned())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CharacteristicMetadata {
    #[serde(default)]
    pub format: Option<ValueFormat>,
    #[serde(default)]
    pub units: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveCharacteristic {
    pub id: EntityId,
    pub name: String,
    pub characteristic_type: CharacteristicType,
    #[serde(default)]
    pub value: Option<LiveValue>,
    #[serde(default)]
    pub metadata: CharacteristicMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveService {
    pub id: EntityId,
    pub name: String,
    pub service_type: ServiceType,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(default)]
    pub characteristics: Vec<LiveCharacteristic>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveAccessory {
    pub id: EntityId,
    pub name: String,
    pub category: AccessoryCategory,
    #[serde(default)]
    pub services: Vec<LiveService>,
}

impl LiveAccessory {
    pub fn characteristics(&self) -> impl Iterator<Item = &LiveCharacteristic> {
        self.services.iter().flat_map(|service| service.characteristics.iter())
    }

    /// First characteristic, in service order, whose type is one of `types`.
    pub fn first_of(&self, types: &[CharacteristicType]) -> Option<&LiveCharacteristic> {
        self.characteristics()
            .find(|c| types.contains(&c.characteristic_type))
    }
}

/// A single "set characteristic to value" step of an action set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WriteAction {
    pub characteristic: EntityId,
    pub target: LiveValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveActionSet {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub actions: Vec<WriteAction>,
    #[serde(default)]
    pub is_executing: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveRoom {
    pub id: EntityId,
    pub name: String,
}

/// A characteristic together with the service and accessory it belongs to.
#[derive(Debug, Clone, Copy)]
pub struct CharacteristicContext<'a> {
    pub characteristic: &'a LiveCharacteristic,
    pub service: &'a LiveService,
    pub accessory: &'a LiveAccessory,
}

/// Capability to query the live home graph.
///
/// Only the listings are required; the lookups scan them and may be overridden by
/// providers that keep indices.
pub trait LiveGraph {
    fn rooms(&self) -> &[LiveRoom];
    fn accessories(&self) -> &[LiveAccessory];
    fn action_sets(&self) -> &[LiveActionSet];

    fn accessory(&self, id: &EntityId) -> Option<&LiveAccessory> {
        self.accessories().iter().find(|a| &a.id == id)
    }

    fn action_set(&self, id: &EntityId) -> Option<&LiveActionSet> {
        self.action_sets().iter().find(|s| &s.id == id)
    }

    fn characteristic(&self, id: &EntityId) -> Option<CharacteristicContext<'_>> {
        self.accessories().iter().find_map(|accessory| {
            accessory.services.iter().find_map(|service| {
                service
                    .characteristics
                    .iter()
                    .find(|c| &c.id == id)
                    .map(|characteristic| CharacteristicContext {
                        characteristic,
                        service,
                        accessory,
                    })
            })
        })
    }

    fn characteristics(&self) -> Vec<CharacteristicContext<'_>> {
        self.accessories()
            .iter()
            .flat_map(|accessory| {
                accessory.services.iter().flat_map(move |service| {
                    service
                        .characteristics
                        .iter()
                        .map(move |characteristic| CharacteristicContext {
                            characteristic,
                            service,
                            accessory,
                        })
                })
            })
            .collect()
    }

    fn characteristic_value(&self, id: &EntityId) -> Option<&LiveValue> {
        self.characteristic(id)
            .and_then(|ctx| ctx.characteristic.value.as_ref())
    }
}

/// In-memory snapshot of the live graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LiveHome {
    #[serde(default)]
    pub rooms: Vec<LiveRoom>,
    #[serde(default)]
    pub accessories: Vec<LiveAccessory>,
    #[serde(default)]
    pub action_sets: Vec<LiveActionSet>,
}

impl LiveHome {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the value of a characteristic, returning the previous one.
    pub fn set_value(&mut self, id: &EntityId, value: LiveValue) -> Option<LiveValue> {
        self.accessories
            .iter_mut()
            .flat_map(|a| a.services.iter_mut())
            .flat_map(|s| s.characteristics.iter_mut())
            .find(|c| &c.id == id)
            .and_then(|c| c.value.replace(value))
    }
}

impl LiveGraph for LiveHome {
    fn rooms(&self) -> &[LiveRoom] {
        &self.rooms
    }

    fn accessories(&self) -> &[LiveAccessory] {
        &self.accessories
    }

    fn action_sets(&self) -> &[LiveActionSet] {
        &self.action_sets
    }
}
