use serde::{Deserialize, Serialize};

use crate::{
    reconcile::reconcile_entity, room_alert_color, Accessory, AccessoryCategory, AlertColor,
    Characteristic, CharacteristicType, DisplayColor, EntityId, EntityKind, Icon,
    LiveCharacteristic, LiveGraph, ReconcileReport, RoomFlags, Scene,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct Room {
    #[serde(default)]
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default = "default_room_icon")]
    pub icon: Icon,
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub info: String,

    #[serde(skip)]
    pub flags: RoomFlags,
    #[serde(skip)]
    pub alert_color: Option<AlertColor>,

    #[serde(default)]
    pub current_temperature: Option<Characteristic>,
    #[serde(default)]
    pub target_temperature: Option<Characteristic>,
    #[serde(default)]
    pub humidity_level: Option<Characteristic>,
    #[serde(default)]
    pub carbon_dioxide_level: Option<Characteristic>,
    #[serde(default)]
    pub air_quality: Option<Characteristic>,

    #[serde(default)]
    pub lights: Vec<Accessory>,
    #[serde(default)]
    pub thermostats: Vec<Accessory>,
    #[serde(default)]
    pub cameras: Vec<Accessory>,
    #[serde(default)]
    pub others: Vec<Accessory>,

    #[serde(default)]
    pub status_lights: Vec<Accessory>,
    #[serde(default)]
    pub status_thermostats: Vec<Accessory>,
    #[serde(default)]
    pub status_windows: Vec<Accessory>,
    #[serde(default)]
    pub status_doors: Vec<Accessory>,

    #[serde(default)]
    pub accessories: Vec<Accessory>,
    #[serde(default)]
    pub characteristics: Vec<Characteristic>,
    #[serde(default)]
    pub scenes: Vec<Scene>,

    #[serde(skip)]
    pub nested_characteristics: Vec<[Characteristic; 3]>,
}

fn default_room_icon() -> Icon {
    Icon::symbol("rectangle", DisplayColor::Secondary)
}

impl Default for Room {
    fn default() -> Self {
        Self {
            id: EntityId::new(),
            name: String::new(),
            caption: String::new(),
            icon: default_room_icon(),
            theme: String::new(),
            info: String::new(),
            flags: RoomFlags::default(),
            alert_color: None,
            current_temperature: None,
            target_temperature: None,
            humidity_level: None,
            carbon_dioxide_level: None,
            air_quality: None,
            lights: Vec::new(),
            thermostats: Vec::new(),
            cameras: Vec::new(),
            others: Vec::new(),
            status_lights: Vec::new(),
            status_thermostats: Vec::new(),
            status_windows: Vec::new(),
            status_doors: Vec::new(),
            accessories: Vec::new(),
            characteristics: Vec::new(),
            scenes: Vec::new(),
            nested_characteristics: Vec::new(),
        }
    }
}

impl Room {
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

    /// Recomputes the alert color from the room flags.
    pub fn update_status(&mut self) -> AlertColor {
        let color = room_alert_color(&self.flags);
        self.alert_color = Some(color);
        color
    }

    pub fn live_flags<G: LiveGraph + ?Sized>(&self, graph: &G) -> RoomFlags {
        RoomFlags::from_live(self, graph)
    }

    pub fn apply_live_flags<G: LiveGraph + ?Sized>(&mut self, graph: &G) -> AlertColor {
        self.flags = self.live_flags(graph);
        self.update_status()
    }

    pub fn accessory_lists(&self) -> [&Vec<Accessory>; 4] {
        [&self.lights, &self.cameras, &self.thermostats, &self.others]
    }

    /// Accessories in the lights, cameras, thermostats and others lists.
    pub fn stateful_accessories(&self) -> impl Iterator<Item = &Accessory> {
        self.accessory_lists().into_iter().flat_map(|list| list.iter())
    }

    /// Accessories grouped by category, in the order the categories are given.
    pub fn accessories_of_category<G: LiveGraph + ?Sized>(
        &self,
        graph: &G,
        categories: &[AccessoryCategory],
    ) -> Vec<&Accessory> {
        categories
            .iter()
            .flat_map(|category| {
                self.accessories
                    .iter()
                    .filter(move |a| a.category(graph).as_ref() == Some(category))
            })
            .collect()
    }

    /// Characteristics grouped by type, in the order the types are given.
    pub fn characteristics_of_type<G: LiveGraph + ?Sized>(
        &self,
        graph: &G,
        types: &[CharacteristicType],
    ) -> Vec<&Characteristic> {
        types
            .iter()
            .flat_map(|t| {
                self.characteristics
                    .iter()
                    .filter(move |c| c.characteristic_type(graph).as_ref() == Some(t))
            })
            .collect()
    }

    pub fn characteristic(&self, id: &EntityId) -> Option<&Characteristic> {
        self.characteristics.iter().find(|c| &c.id == id)
    }

    /// State and power characteristics of every stateful accessory.
    pub fn state_characteristics<'g, G: LiveGraph + ?Sized>(
        &self,
        graph: &'g G,
    ) -> Vec<&'g LiveCharacteristic> {
        self.stateful_accessories()
            .flat_map(|a| {
                let mut chars = a.state_characteristics(graph);
                chars.extend(a.power_and_thermostat_characteristics(graph));
                chars
            })
            .collect()
    }

    /// Characteristics written by any of the room's scenes.
    pub fn scene_characteristics<G: LiveGraph + ?Sized>(&self, graph: &G) -> Vec<EntityId> {
        self.scenes
            .iter()
            .flat_map(|scene| scene.target_characteristics(graph))
            .collect()
    }

    pub fn reconcile<G: LiveGraph + ?Sized>(&mut self, graph: &G, report: &mut ReconcileReport) {
        reconcile_entity(
            EntityKind::Room,
            &mut self.id,
            &self.name,
            graph.rooms(),
            report,
        );

        for list in [
            &mut self.lights,
            &mut self.thermostats,
            &mut self.cameras,
            &mut self.others,
            &mut self.status_lights,
            &mut self.status_thermostats,
            &mut self.status_windows,
            &mut self.status_doors,
            &mut self.accessories,
        ] {
            for accessory in list.iter_mut() {
                accessory.reconcile(graph, report);
            }
        }

        let preferred: Vec<EntityId> = self
            .stateful_accessories()
            .chain(self.accessories.iter())
            .filter_map(|a| a.live)
            .collect();
        for characteristic in self.characteristics.iter_mut().chain(
            [
                &mut self.current_temperature,
                &mut self.target_temperature,
                &mut self.humidity_level,
                &mut self.carbon_dioxide_level,
                &mut self.air_quality,
            ]
            .into_iter()
            .flatten(),
        ) {
            characteristic.reconcile_within(graph, &preferred, report);
        }

        for scene in self.scenes.iter_mut() {
            scene.reconcile(graph, report);
        }
    }
}
