//! Per-installation room overrides.
//!
//! An override table maps room-name conditions to status accessory selection, scene filters
//! and a scene permutation. Every positional step is bounds checked; a room whose scene list
//! does not have the shape its override expects keeps its filtered scene order and is
//! reported as skipped.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::{
    Characteristic, CharacteristicType, DisplayColor, Home, LiveGraph, MirrorConfig, MirrorError,
    MirrorResult, NameCondition, Room, Scene, ServiceType,
};

const MAX_CAPTION_CHARS: usize = 30;
const TRUNCATED_CAPTION_CHARS: usize = 28;

/// One position in a scene permutation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SceneSlot {
    /// Scene at this position of the filtered list.
    Index(usize),
    /// Scene counted from the end of the filtered list, `1` is the last one.
    FromEnd(usize),
    /// Scene of any room of the home, looked up case-insensitively. Omitted when absent.
    HomeScene(String),
    /// All scenes not taken by a positional slot, in their filtered order.
    Rest,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomOverride {
    pub room: NameCondition,
    /// Name of the accessory, anywhere in the home, that becomes the only status light.
    #[serde(default)]
    pub status_light: Option<String>,
    /// Keep only the first status thermostat.
    #[serde(default)]
    pub single_thermostat: bool,
    #[serde(default)]
    pub drop_scenes: Vec<NameCondition>,
    /// Home scenes appended after filtering and before reordering.
    #[serde(default)]
    pub append_scenes: Vec<String>,
    #[serde(default)]
    pub scene_order: Vec<SceneSlot>,
    /// Below this many scenes the filtered list is kept as is and the room counts as applied.
    #[serde(default)]
    pub min_scenes: usize,
}

impl RoomOverride {
    pub fn for_room(room: NameCondition) -> Self {
        Self {
            room,
            status_light: None,
            single_thermostat: false,
            drop_scenes: Vec::new(),
            append_scenes: Vec::new(),
            scene_order: Vec::new(),
            min_scenes: 0,
        }
    }

    fn drops(&self, scene: &Scene) -> bool {
        self.drop_scenes.iter().any(|c| c.evaluate(&scene.name))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomizationTable {
    #[serde(default)]
    pub overrides: Vec<RoomOverride>,
    /// Fragments removed from accessory captions in personal mode.
    #[serde(default)]
    pub label_removals: Vec<String>,
}

impl CustomizationTable {
    /// First override whose room condition matches `room_name`.
    pub fn find(&self, room_name: &str) -> Option<&RoomOverride> {
        self.overrides.iter().find(|o| o.room.evaluate(room_name))
    }

    pub fn validate(&self) -> MirrorResult<()> {
        for o in &self.overrides {
            o.room.validate()?;
            for condition in &o.drop_scenes {
                condition.validate()?;
            }
        }
        Ok(())
    }

    /// The overrides of the reference installation.
    pub fn builtin() -> Self {
        use SceneSlot::*;

        let status = || NameCondition::contains("status");
        let status_switch = |room: &str| Some(format!("{room} licht status switch"));

        let woonkamer = RoomOverride {
            status_light: status_switch("woonkamer"),
            single_thermostat: true,
            drop_scenes: vec![
                status(),
                NameCondition::any_of(["Koken", "Uit Licht Grok en Go", "Woonkamer Bollen Rood"]),
            ],
            scene_order: vec![
                Rest,
                FromEnd(1),
                FromEnd(2),
                Index(3),
                Index(1),
                Index(2),
                HomeScene("animatie switch default aan".to_owned()),
                Index(0),
            ],
            ..RoomOverride::for_room(NameCondition::contains("woonkamer"))
        };
        let gang = RoomOverride {
            status_light: status_switch("gang"),
            drop_scenes: vec![status()],
            scene_order: vec![Index(2), Rest],
            min_scenes: 3,
            ..RoomOverride::for_room(NameCondition::contains("gang"))
        };
        let slaapkamer = RoomOverride {
            status_light: status_switch("slaapkamer"),
            drop_scenes: vec![status()],
            scene_order: vec![Rest, Index(2), Index(1), Index(0)],
            min_scenes: 3,
            ..RoomOverride::for_room(NameCondition::contains("slaapkamer"))
        };
        let zolder = RoomOverride {
            status_light: status_switch("zolder"),
            single_thermostat: true,
            drop_scenes: vec![status()],
            append_scenes: vec!["zolder raam dicht".to_owned(), "zolder raam open".to_owned()],
            scene_order: vec![Index(0), Index(1), Index(2), Index(4), Index(3), Rest],
            min_scenes: 5,
            ..RoomOverride::for_room(NameCondition::contains("zolder"))
        };
        let vigo = RoomOverride {
            status_light: status_switch("vigo"),
            drop_scenes: vec![status()],
            scene_order: vec![Rest, Index(0), Index(1)],
            min_scenes: 2,
            ..RoomOverride::for_room(NameCondition::contains("vigo"))
        };
        let badkamer = RoomOverride::for_room(NameCondition::contains("badkamer"));

        Self {
            overrides: vec![woonkamer, gang, slaapkamer, zolder, vigo, badkamer],
            label_removals: [
                "Zolder ",
                "zolder ",
                "Gang ",
                "Slaapkamer ",
                "Vigo ",
                "Badkamer ",
                " Switch",
                " Licht",
                "Hue",
            ]
            .into_iter()
            .map(str::to_owned)
            .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Customized {
    Applied(Room),
    /// The override matched but its scene permutation did not fit; filters were applied.
    Skipped(Room),
    /// No override matched. `None` when the room is dropped in personal mode.
    Unmatched(Option<Room>),
}

impl Customized {
    pub fn into_room(self) -> Option<Room> {
        match self {
            Customized::Applied(room) | Customized::Skipped(room) => Some(room),
            Customized::Unmatched(room) => room,
        }
    }
}

#[derive(Debug, Default)]
pub struct CustomizeReport {
    pub applied: Vec<String>,
    pub skipped: Vec<MirrorError>,
    pub dropped: Vec<String>,
}

pub struct RoomCustomizer {
    table: CustomizationTable,
    personal: bool,
}

impl RoomCustomizer {
    pub fn new(table: CustomizationTable, personal: bool) -> MirrorResult<Self> {
        table.validate()?;
        Ok(Self { table, personal })
    }

    pub fn from_config(config: &MirrorConfig) -> MirrorResult<Self> {
        Self::new(config.customization.clone(), config.personal)
    }

    pub fn table(&self) -> &CustomizationTable {
        &self.table
    }

    pub fn is_personal(&self) -> bool {
        self.personal
    }

    /// Applies the matching override to a copy of `room`.
    pub fn customize_room(&self, room: &Room, home: &Home, report: &mut CustomizeReport) -> Customized {
        let Some(rule) = self.table.find(&room.name) else {
            if self.personal {
                log::debug!("Dropping room '{}' without override", room.name);
                report.dropped.push(room.name.clone());
                return Customized::Unmatched(None);
            }
            return Customized::Unmatched(Some(room.clone()));
        };

        let mut room = room.clone();
        if let Some(status) = rule.status_light.as_deref().and_then(|n| home.accessory_named(n)) {
            room.status_lights = vec![status.clone()];
        }
        if rule.single_thermostat {
            room.status_thermostats.truncate(1);
        }

        room.scenes.retain(|scene| !rule.drops(scene));
        room.scenes.extend(
            rule.append_scenes
                .iter()
                .filter_map(|name| home.scene_named(name))
                .cloned(),
        );

        if rule.scene_order.is_empty()
            || room.scenes.is_empty()
            || room.scenes.len() < rule.min_scenes
        {
            report.applied.push(room.name.clone());
            return Customized::Applied(room);
        }
        match order_scenes(&room.scenes, &rule.scene_order, home) {
            Ok(scenes) => {
                room.scenes = scenes;
                report.applied.push(room.name.clone());
                Customized::Applied(room)
            }
            Err(expected) => {
                log::warn!(
                    "Skipping scene order of room '{}': expected {} scenes, found {}",
                    room.name,
                    expected,
                    room.scenes.len()
                );
                report.skipped.push(MirrorError::StructuralAssumptionViolated {
                    room: room.name.clone(),
                    expected,
                    found: room.scenes.len(),
                });
                Customized::Skipped(room)
            }
        }
    }

    /// Full room setup: override, curated characteristics, cleared generic accessory list
    /// and caption clean-up.
    pub fn setup_room<G: LiveGraph + ?Sized>(
        &self,
        room: &Room,
        home: &Home,
        graph: &G,
        report: &mut CustomizeReport,
    ) -> Option<Room> {
        let mut room = self.customize_room(room, home, report).into_room()?;
        room.characteristics = curated_characteristics(&room, graph);
        room.accessories.clear();

        if !self.personal {
            for scene in room.scenes.iter_mut().filter(|s| s.icon.caption.is_empty()) {
                scene.icon.caption = truncate_caption(&scene.name);
                scene.icon.caption_color = DisplayColor::Primary;
            }
        }
        for accessory in [
            &mut room.lights,
            &mut room.thermostats,
            &mut room.cameras,
            &mut room.others,
        ]
        .into_iter()
        .flat_map(|list| list.iter_mut())
        .filter(|a| !a.icon.caption.is_empty())
        {
            let mut title = truncate_caption(&accessory.name);
            if self.personal {
                title = self.personal_title(&title);
            }
            accessory.icon.caption = title;
            accessory.icon.caption_color = DisplayColor::Primary;
        }
        Some(room)
    }

    /// Sets up every room of `home`, dropping rooms the customizer rejects.
    pub fn setup_home<G: LiveGraph + ?Sized>(&self, home: &mut Home, graph: &G) -> CustomizeReport {
        let mut report = CustomizeReport::default();
        let current: &Home = home;
        let rooms: Vec<Room> = current
            .rooms
            .iter()
            .filter_map(|room| self.setup_room(room, current, graph, &mut report))
            .collect();
        home.rooms = rooms;
        if home.selected_room().is_none() {
            home.selected_room = None;
        }
        report
    }

    pub fn personal_title(&self, title: &str) -> String {
        self.table
            .label_removals
            .iter()
            .fold(title.to_owned(), |title, fragment| title.replace(fragment.as_str(), ""))
    }
}

/// Captions over 30 characters are cut to 28 followed by "..".
pub fn truncate_caption(name: &str) -> String {
    if name.chars().count() > MAX_CAPTION_CHARS {
        let mut caption: String = name.chars().take(TRUNCATED_CAPTION_CHARS).collect();
        caption.push_str("..");
        caption
    } else {
        name.to_owned()
    }
}

/// Resolves `order` against `scenes`, or the scene count the order needs when it does not fit.
fn order_scenes(scenes: &[Scene], order: &[SceneSlot], home: &Home) -> Result<Vec<Scene>, usize> {
    let positional = order
        .iter()
        .filter(|slot| matches!(slot, SceneSlot::Index(_) | SceneSlot::FromEnd(_)))
        .count();
    let required = order
        .iter()
        .map(|slot| match slot {
            SceneSlot::Index(i) => i + 1,
            SceneSlot::FromEnd(k) => (*k).max(1),
            _ => 0,
        })
        .max()
        .unwrap_or(0)
        .max(positional);

    let position = |slot: &SceneSlot| match slot {
        SceneSlot::Index(i) => Some(*i).filter(|i| *i < scenes.len()),
        SceneSlot::FromEnd(k) if *k > 0 => scenes.len().checked_sub(*k),
        _ => None,
    };

    let mut taken = HashSet::new();
    for slot in order {
        if matches!(slot, SceneSlot::Index(_) | SceneSlot::FromEnd(_)) {
            match position(slot) {
                Some(p) if taken.insert(p) => {}
                _ => return Err(required),
            }
        }
    }

    let mut ordered = Vec::with_capacity(scenes.len() + 1);
    for slot in order {
        match slot {
            SceneSlot::Index(_) | SceneSlot::FromEnd(_) => {
                if let Some(p) = position(slot) {
                    ordered.push(scenes[p].clone());
                }
            }
            SceneSlot::HomeScene(name) => ordered.extend(home.scene_named(name).cloned()),
            SceneSlot::Rest => ordered.extend(
                scenes
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| !taken.contains(i))
                    .map(|(_, s)| s.clone()),
            ),
        }
    }
    if !order.contains(&SceneSlot::Rest) {
        ordered.extend(
            scenes
                .iter()
                .enumerate()
                .filter(|(i, _)| !taken.contains(i))
                .map(|(_, s)| s.clone()),
        );
    }
    Ok(ordered)
}

/// Room tiles show at most one characteristic of each of these, in this order.
const SINGLE_TYPES: &[(CharacteristicType, Option<&str>)] = &[
    (CharacteristicType::CurrentTemperature, None),
    (CharacteristicType::TargetTemperature, None),
    (CharacteristicType::CurrentRelativeHumidity, None),
    (CharacteristicType::AirQuality, None),
    (CharacteristicType::CarbonDioxideLevel, None),
    (CharacteristicType::CarbonMonoxideLevel, None),
    (CharacteristicType::VolatileOrganicCompoundDensity, None),
    (CharacteristicType::AirParticulateDensity, None),
    (CharacteristicType::NitrogenDioxideDensity, None),
    (CharacteristicType::OzoneDensity, None),
    (CharacteristicType::SulphurDioxideDensity, None),
    (CharacteristicType::CarbonMonoxideDetected, Some("CO")),
    (CharacteristicType::CarbonDioxideDetected, Some("CO2")),
    (CharacteristicType::LeakDetected, Some("Water Leak")),
    (CharacteristicType::MotionDetected, Some("Motion")),
    (CharacteristicType::OccupancyDetected, Some("Occupancy")),
    (CharacteristicType::CurrentSecuritySystemState, Some("Security")),
    (CharacteristicType::SecuritySystemAlarmType, Some("Alarm")),
    (CharacteristicType::ObstructionDetected, Some("Obstruction")),
];

/// Per-device characteristics; every one is kept and captioned with its accessory name.
const DEVICE_TYPES: &[CharacteristicType] = &[
    CharacteristicType::CurrentHumidifierDehumidifierState,
    CharacteristicType::CurrentFanState,
    CharacteristicType::CurrentAirPurifierState,
    CharacteristicType::CurrentDoorState,
    CharacteristicType::CurrentLockMechanismState,
    CharacteristicType::StreamingStatus,
    CharacteristicType::Volume,
    CharacteristicType::Mute,
    CharacteristicType::NightVision,
];

/// The characteristics a room tile shows, with their captions and audio icons set.
pub fn curated_characteristics<G: LiveGraph + ?Sized>(room: &Room, graph: &G) -> Vec<Characteristic> {
    let mut curated = Vec::new();

    for (kind, caption) in SINGLE_TYPES {
        if let Some(first) = room.characteristics_of_type(graph, std::slice::from_ref(kind)).first() {
            let mut item = (*first).clone();
            if let Some(caption) = caption {
                item.icon.caption = (*caption).to_owned();
            }
            curated.push(item);
        }
    }

    for kind in DEVICE_TYPES {
        for found in room.characteristics_of_type(graph, std::slice::from_ref(kind)) {
            let mut item = found.clone();
            let ctx = item.context(graph);
            if let Some(ctx) = ctx {
                item.icon.caption = ctx.accessory.name.clone();
                let microphone = ctx.service.service_type == ServiceType::Microphone;
                match kind {
                    CharacteristicType::Volume => {
                        item.icon.name = (if microphone { "mic" } else { "speaker" }).to_owned();
                    }
                    CharacteristicType::Mute => {
                        item.icon.name =
                            (if microphone { "mic.slash" } else { "speaker.slash" }).to_owned();
                    }
                    _ => {}
                }
            }
            curated.push(item);
        }
    }

    curated
}
