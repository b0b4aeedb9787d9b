use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{
    collections::{HashMap, HashSet},
    ops::Deref,
};

use crate::{Accessory, CharacteristicType, DisplayColor, EntityId, LiveGraph, Room};

/// Attention level of a room or home, ordered from calm to urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlertColor {
    Green,
    Cyan,
    Orange,
    Yellow,
    Red,
}

impl From<AlertColor> for DisplayColor {
    fn from(color: AlertColor) -> Self {
        match color {
            AlertColor::Green => DisplayColor::Green,
            AlertColor::Cyan => DisplayColor::Cyan,
            AlertColor::Orange => DisplayColor::Orange,
            AlertColor::Yellow => DisplayColor::Yellow,
            AlertColor::Red => DisplayColor::Red,
        }
    }
}

impl std::fmt::Display for AlertColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AlertColor::Green => "green",
            AlertColor::Cyan => "cyan",
            AlertColor::Orange => "orange",
            AlertColor::Yellow => "yellow",
            AlertColor::Red => "red",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoomFlags {
    pub door_open: bool,
    pub window_open: bool,
    pub heating: bool,
    pub lights_on: bool,
}

impl RoomFlags {
    /// Flags as reported by the accessories a room selected for status.
    ///
    /// Doors and windows are open on a set contact state, the room heats when a thermostat
    /// reports a non-off heating/cooling mode and lights are on when any power state is set.
    pub fn from_live<G: LiveGraph + ?Sized>(room: &Room, graph: &G) -> Self {
        let contact_open = |accessories: &[Accessory]| {
            accessories
                .iter()
                .any(|a| a.value_for_type(graph, CharacteristicType::ContactState) > 0.0)
        };
        Self {
            door_open: contact_open(&room.status_doors),
            window_open: contact_open(&room.status_windows),
            heating: room
                .status_thermostats
                .iter()
                .any(|a| a.value_for_type(graph, CharacteristicType::CurrentHeatingCooling) > 0.0),
            lights_on: room
                .status_lights
                .iter()
                .any(|a| a.power_state(graph).unwrap_or(false)),
        }
    }
}

/// Door beats window beats heating beats lights; only the highest true flag counts.
pub fn room_alert_color(flags: &RoomFlags) -> AlertColor {
    if flags.door_open {
        AlertColor::Red
    } else if flags.window_open {
        AlertColor::Yellow
    } else if flags.heating {
        AlertColor::Orange
    } else if flags.lights_on {
        AlertColor::Cyan
    } else {
        AlertColor::Green
    }
}

/// Worst color present among the rooms, green when none of the alert colors occur.
pub fn home_alert_color<I>(room_colors: I) -> AlertColor
where
    I: IntoIterator<Item = AlertColor>,
{
    let present: HashSet<AlertColor> = room_colors.into_iter().collect();
    [
        AlertColor::Red,
        AlertColor::Yellow,
        AlertColor::Orange,
        AlertColor::Cyan,
    ]
    .into_iter()
    .find(|color| present.contains(color))
    .unwrap_or(AlertColor::Green)
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatusUpdate {
    New {
        id: EntityId,
        color: AlertColor,
        revision: u64,
    },
    Changed {
        id: EntityId,
        from: AlertColor,
        to: AlertColor,
        revision: u64,
    },
    Equal,
}

impl StatusUpdate {
    pub fn is_change(&self) -> bool {
        !matches!(self, StatusUpdate::Equal)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusEntry {
    pub color: AlertColor,
    pub revision: u64,
    pub last_changed: DateTime<Utc>,
}

/// Last published color per room or home.
///
/// Every change bumps a board-wide revision, which presentation layers compare instead of
/// polling individual records.
#[derive(Default, Clone, Debug)]
pub struct StatusBoard {
    entries: HashMap<EntityId, StatusEntry>,
    revision: u64,
}

impl Deref for StatusBoard {
    type Target = HashMap<EntityId, StatusEntry>;

    fn deref(&self) -> &Self::Target {
        &self.entries
    }
}

impl StatusBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn color(&self, id: &EntityId) -> Option<AlertColor> {
        self.entries.get(id).map(|entry| entry.color)
    }

    pub fn record(&mut self, id: EntityId, color: AlertColor) -> StatusUpdate {
        let now = Utc::now();
        if let Some(entry) = self.entries.get_mut(&id) {
            if entry.color == color {
                return StatusUpdate::Equal;
            }
            self.revision += 1;
            let from = entry.color;
            entry.color = color;
            entry.revision = self.revision;
            entry.last_changed = now;
            log::debug!("Status of {id} changed {from} -> {color}");
            StatusUpdate::Changed {
                id,
                from,
                to: color,
                revision: self.revision,
            }
        } else {
            self.revision += 1;
            self.entries.insert(
                id,
                StatusEntry {
                    color,
                    revision: self.revision,
                    last_changed: now,
                },
            );
            StatusUpdate::New {
                id,
                color,
                revision: self.revision,
            }
        }
    }

    pub fn forget(&mut self, id: &EntityId) -> Option<StatusEntry> {
        self.entries.remove(id)
    }
}
