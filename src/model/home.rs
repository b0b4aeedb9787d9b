use serde::{Deserialize, Serialize};

use crate::{
    home_alert_color, Accessory, AlertColor, Characteristic, CharacteristicType, DisplayColor,
    EntityId, Icon, LiveGraph, ReconcileReport, Room, Scene, StatusBoard, StatusUpdate,
    UniqueByIdExt, WeatherSnapshot, STATUS_UPDATE_TYPES,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct Home {
    #[serde(default)]
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default = "default_at_home_icon")]
    pub at_home_icon: Icon,
    #[serde(default = "default_away_home_icon")]
    pub away_home_icon: Icon,
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub info: String,
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub selected_room: Option<EntityId>,

    #[serde(skip)]
    pub cameras: Vec<Accessory>,
    #[serde(skip)]
    pub alert_color: Option<AlertColor>,
    #[serde(skip, default = "default_at_home")]
    pub at_home: bool,
    #[serde(skip)]
    pub weather: WeatherSnapshot,
}

fn default_at_home_icon() -> Icon {
    Icon::symbol("house.fill", DisplayColor::Secondary)
}

fn default_away_home_icon() -> Icon {
    Icon::symbol("house", DisplayColor::Secondary)
}

fn default_at_home() -> bool {
    true
}

impl Default for Home {
    fn default() -> Self {
        Self {
            id: EntityId::new(),
            name: String::new(),
            caption: String::new(),
            at_home_icon: default_at_home_icon(),
            away_home_icon: default_away_home_icon(),
            theme: String::new(),
            info: String::new(),
            rooms: Vec::new(),
            selected_room: None,
            cameras: Vec::new(),
            alert_color: None,
            at_home: default_at_home(),
            weather: WeatherSnapshot::default(),
        }
    }
}

impl Home {
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

    pub fn room(&self, id: &EntityId) -> Option<&Room> {
        self.rooms.iter().find(|r| &r.id == id)
    }

    pub fn room_mut(&mut self, id: &EntityId) -> Option<&mut Room> {
        self.rooms.iter_mut().find(|r| &r.id == id)
    }

    /// Selects a room by id. Returns false, leaving the selection untouched, for unknown ids.
    pub fn select_room(&mut self, id: &EntityId) -> bool {
        if self.room(id).is_none() {
            return false;
        }
        self.selected_room = Some(*id);
        true
    }

    pub fn selected_room(&self) -> Option<&Room> {
        self.selected_room.as_ref().and_then(|id| self.room(id))
    }

    /// Generic accessories of every room, in room order.
    pub fn all_accessories(&self) -> Vec<&Accessory> {
        self.rooms.iter().flat_map(|r| r.accessories.iter()).collect()
    }

    pub fn status_compatible_accessories<G: LiveGraph + ?Sized>(&self, graph: &G) -> Vec<&Accessory> {
        self.all_accessories()
            .into_iter()
            .filter(|a| {
                a.resolve(graph)
                    .is_some_and(|live| live.first_of(STATUS_UPDATE_TYPES).is_some())
            })
            .collect()
    }

    pub fn all_characteristics(&self) -> Vec<&Characteristic> {
        self.rooms
            .iter()
            .flat_map(|r| r.characteristics.iter())
            .collect()
    }

    pub fn characteristics_of_type<G: LiveGraph + ?Sized>(
        &self,
        graph: &G,
        types: &[CharacteristicType],
    ) -> Vec<&Characteristic> {
        self.rooms
            .iter()
            .flat_map(|r| r.characteristics_of_type(graph, types))
            .collect()
    }

    /// Scenes of all rooms, one per id, sorted by lower-cased name.
    pub fn all_scenes(&self) -> Vec<&Scene> {
        let mut scenes: Vec<&Scene> = self
            .rooms
            .iter()
            .flat_map(|r| r.scenes.iter())
            .unique_by_id()
            .collect();
        scenes.sort_by_cached_key(|s| s.name.to_lowercase());
        scenes
    }

    /// Case-insensitive lookup among the generic accessories of all rooms.
    pub fn accessory_named(&self, name: &str) -> Option<&Accessory> {
        let name = name.to_lowercase();
        self.all_accessories()
            .into_iter()
            .find(|a| a.name.to_lowercase() == name)
    }

    pub fn scene_named(&self, name: &str) -> Option<&Scene> {
        let name = name.to_lowercase();
        self.all_scenes()
            .into_iter()
            .find(|s| s.name.to_lowercase() == name)
    }

    /// Reads the room flags from the live graph for every room.
    pub fn apply_live_flags<G: LiveGraph + ?Sized>(&mut self, graph: &G) {
        for room in self.rooms.iter_mut() {
            room.apply_live_flags(graph);
        }
    }

    /// Recomputes every room color and the home color from the room colors, recording them on
    /// `board`. Only the updates that changed something are returned.
    pub fn update_status(&mut self, board: &mut StatusBoard) -> Vec<StatusUpdate> {
        let mut updates = Vec::new();
        for room in self.rooms.iter_mut() {
            let color = room.update_status();
            updates.push(board.record(room.id, color));
        }
        let color = home_alert_color(self.rooms.iter().filter_map(|r| r.alert_color));
        self.alert_color = Some(color);
        updates.push(board.record(self.id, color));
        updates.retain(StatusUpdate::is_change);
        updates
    }

    /// Matches all rooms, accessories, characteristics, scenes and cameras against `graph`.
    /// The selected room follows its room when the room id gets repaired.
    pub fn reconcile<G: LiveGraph + ?Sized>(&mut self, graph: &G) -> ReconcileReport {
        let mut report = ReconcileReport::new();
        let selected = self
            .selected_room
            .and_then(|id| self.rooms.iter().position(|r| r.id == id));

        for room in self.rooms.iter_mut() {
            room.reconcile(graph, &mut report);
        }
        for camera in self.cameras.iter_mut() {
            camera.reconcile(graph, &mut report);
        }
        if let Some(index) = selected {
            self.selected_room = self.rooms.get(index).map(|r| r.id);
        }

        log::debug!(
            "Reconciled home '{}': {} matched, {} repaired, {} missing",
            self.name,
            report.matched,
            report.repairs.len(),
            report.missing.len()
        );
        report
    }
}
