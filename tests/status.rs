#[cfg(test)]
mod tests {
    use hc_homewatch::*;

    fn expected_room_color(flags: &RoomFlags) -> AlertColor {
        match (flags.door_open, flags.window_open, flags.heating, flags.lights_on) {
            (true, _, _, _) => AlertColor::Red,
            (false, true, _, _) => AlertColor::Yellow,
            (false, false, true, _) => AlertColor::Orange,
            (false, false, false, true) => AlertColor::Cyan,
            (false, false, false, false) => AlertColor::Green,
        }
    }

    #[test]
    fn test_room_color_all_flag_combinations() {
        for bits in 0u8..16 {
            let flags = RoomFlags {
                door_open: bits & 0b1000 != 0,
                window_open: bits & 0b0100 != 0,
                heating: bits & 0b0010 != 0,
                lights_on: bits & 0b0001 != 0,
            };
            assert_eq!(
                room_alert_color(&flags),
                expected_room_color(&flags),
                "flags {flags:?}"
            );
        }
    }

    #[test]
    fn test_living_room_window_beats_heating_and_lights() {
        let mut room = Room::new("Living Room");
        room.flags = RoomFlags {
            door_open: false,
            window_open: true,
            heating: true,
            lights_on: true,
        };
        assert_eq!(room.update_status(), AlertColor::Yellow);
        assert_eq!(room.alert_color, Some(AlertColor::Yellow));
    }

    #[test]
    fn test_home_color_is_worst_present() {
        use AlertColor::*;
        let all = [Green, Cyan, Orange, Yellow, Red];
        // every subset of the five colors
        for mask in 0u8..32 {
            let colors: Vec<AlertColor> = all
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, c)| *c)
                .collect();
            let expected = colors.iter().copied().max().unwrap_or(Green);
            assert_eq!(home_alert_color(colors.clone()), expected, "colors {colors:?}");
        }
    }

    #[test]
    fn test_home_without_rooms_is_green() {
        assert_eq!(home_alert_color(Vec::<AlertColor>::new()), AlertColor::Green);
    }

    #[test]
    fn test_status_board_revisions() {
        let mut board = StatusBoard::new();
        let id = EntityId::new();

        let first = board.record(id, AlertColor::Green);
        assert!(matches!(first, StatusUpdate::New { revision: 1, .. }));
        assert_eq!(board.record(id, AlertColor::Green), StatusUpdate::Equal);
        assert_eq!(board.revision(), 1);

        let changed = board.record(id, AlertColor::Red);
        assert_eq!(
            changed,
            StatusUpdate::Changed {
                id,
                from: AlertColor::Green,
                to: AlertColor::Red,
                revision: 2
            }
        );
        assert_eq!(board.color(&id), Some(AlertColor::Red));
        assert_eq!(board.len(), 1);
        assert!(board.forget(&id).is_some());
        assert!(board.color(&id).is_none());
    }

    #[test]
    fn test_home_update_status_reports_changes_only() {
        let mut home = Home::new("Home");
        let mut kitchen = Room::new("Kitchen");
        kitchen.flags.lights_on = true;
        let hall = Room::new("Hall");
        home.rooms = vec![kitchen, hall];

        let mut board = StatusBoard::new();
        let updates = home.update_status(&mut board);
        // two rooms and the home itself
        assert_eq!(updates.len(), 3);
        assert_eq!(home.alert_color, Some(AlertColor::Cyan));

        assert!(home.update_status(&mut board).is_empty());

        home.rooms[1].flags.door_open = true;
        let updates = home.update_status(&mut board);
        assert_eq!(updates.len(), 2);
        assert_eq!(home.alert_color, Some(AlertColor::Red));
        assert_eq!(board.color(&home.id), Some(AlertColor::Red));
    }

    #[test]
    fn test_room_flags_from_live_graph() {
        let door = EntityId::new();
        let light = EntityId::new();
        let thermostat = EntityId::new();
        let characteristic = |kind: CharacteristicType, value: LiveValue| LiveCharacteristic {
            id: EntityId::new(),
            name: kind.to_string(),
            characteristic_type: kind,
            value: Some(value),
            metadata: CharacteristicMetadata::default(),
        };
        let accessory = |id: EntityId, name: &str, c: LiveCharacteristic| LiveAccessory {
            id,
            name: name.to_owned(),
            category: AccessoryCategory::Other("test".to_owned()),
            services: vec![LiveService {
                id: EntityId::new(),
                name: name.to_owned(),
                service_type: ServiceType::Switch,
                is_primary: true,
                characteristics: vec![c],
            }],
        };
        let graph = LiveHome {
            accessories: vec![
                accessory(
                    door,
                    "Front Door",
                    characteristic(CharacteristicType::ContactState, LiveValue::Int(0)),
                ),
                accessory(
                    light,
                    "Ceiling",
                    characteristic(CharacteristicType::PowerState, LiveValue::Bool(true)),
                ),
                accessory(
                    thermostat,
                    "Radiator",
                    characteristic(CharacteristicType::CurrentHeatingCooling, LiveValue::Int(1)),
                ),
            ],
            ..LiveHome::default()
        };

        let mut room = Room::new("Hall");
        room.status_doors = vec![Accessory::new("Front Door").with_id(door)];
        room.status_lights = vec![Accessory::new("Ceiling").with_id(light)];
        room.status_thermostats = vec![Accessory::new("Radiator").with_id(thermostat)];
        let mut report = ReconcileReport::new();
        room.reconcile(&graph, &mut report);

        let flags = RoomFlags::from_live(&room, &graph);
        assert!(!flags.door_open);
        assert!(!flags.window_open);
        assert!(flags.heating);
        assert!(flags.lights_on);
        assert_eq!(room.apply_live_flags(&graph), AlertColor::Orange);
    }
}
