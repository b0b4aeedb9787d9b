#[cfg(test)]
mod tests {
    use hc_homewatch::*;

    fn scenes(names: &[&str]) -> Vec<Scene> {
        names.iter().map(|n| Scene::new(*n)).collect()
    }

    fn names(room: &Room) -> Vec<&str> {
        room.scenes.iter().map(|s| s.name.as_str()).collect()
    }

    fn home_with(room: Room) -> Home {
        let mut hall = Room::new("Hal");
        hall.scenes = scenes(&["Animatie Switch Default Aan", "Zolder Raam Dicht", "Zolder Raam Open"]);
        let mut home = Home::new("Thuis");
        home.rooms = vec![room, hall];
        home
    }

    fn builtin(personal: bool) -> RoomCustomizer {
        RoomCustomizer::new(CustomizationTable::builtin(), personal).unwrap()
    }

    #[test]
    fn test_woonkamer_override() {
        let mut room = Room::new("Woonkamer");
        room.scenes = scenes(&[
            "S0", "S1", "Woonkamer Status Aan", "S2", "Koken", "S3", "S4", "S5", "S6", "S7",
        ]);
        room.accessories = vec![Accessory::new("Woonkamer Licht Status Switch")];
        room.status_thermostats = vec![Accessory::new("T1"), Accessory::new("T2")];
        let home = home_with(room);

        let mut report = CustomizeReport::default();
        let customized = builtin(false).customize_room(&home.rooms[0], &home, &mut report);
        let Customized::Applied(room) = customized else {
            panic!("expected applied, got {customized:?}");
        };
        assert_eq!(
            names(&room),
            [
                "S4",
                "S5",
                "S7",
                "S6",
                "S3",
                "S1",
                "S2",
                "Animatie Switch Default Aan",
                "S0"
            ]
        );
        assert_eq!(room.status_lights.len(), 1);
        assert_eq!(room.status_lights[0].name, "Woonkamer Licht Status Switch");
        assert_eq!(room.status_thermostats.len(), 1);
        assert_eq!(report.applied, ["Woonkamer"]);
    }

    #[test]
    fn test_short_scene_list_is_skipped_not_crashed() {
        let mut room = Room::new("Woonkamer");
        room.scenes = scenes(&["S0", "Status", "S1", "S2", "S3"]);
        let home = home_with(room);

        let mut report = CustomizeReport::default();
        let customized = builtin(false).customize_room(&home.rooms[0], &home, &mut report);
        let Customized::Skipped(room) = customized else {
            panic!("expected skipped, got {customized:?}");
        };
        // the filter still applies, the order does not
        assert_eq!(names(&room), ["S0", "S1", "S2", "S3"]);
        assert_eq!(report.skipped.len(), 1);
        assert!(matches!(
            &report.skipped[0],
            MirrorError::StructuralAssumptionViolated { expected: 6, found: 4, .. }
        ));
        assert!(report.skipped[0].is_recoverable());
    }

    #[test]
    fn test_empty_scene_list_is_applied() {
        let home = home_with(Room::new("Woonkamer"));
        let mut report = CustomizeReport::default();
        let customized = builtin(false).customize_room(&home.rooms[0], &home, &mut report);
        assert!(matches!(customized, Customized::Applied(_)));
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn test_other_builtin_orders() {
        let cases: &[(&str, &[&str], &[&str])] = &[
            ("Gang", &["A", "B", "C", "D"], &["C", "A", "B", "D"]),
            ("Slaapkamer", &["A", "B", "C", "D"], &["D", "C", "B", "A"]),
            ("Vigo kamer", &["A", "B", "C"], &["C", "A", "B"]),
            (
                "Zolder",
                &["A", "B", "C"],
                &["A", "B", "C", "Zolder Raam Open", "Zolder Raam Dicht"],
            ),
            ("Badkamer", &["B", "A"], &["B", "A", "Badkamer status"]),
        ];
        let customizer = builtin(false);
        for (room_name, input, expected) in cases {
            let mut room = Room::new(*room_name);
            room.scenes = scenes(input);
            room.scenes.push(Scene::new(format!("{room_name} status")));
            let home = home_with(room);
            let mut report = CustomizeReport::default();
            let room = customizer
                .customize_room(&home.rooms[0], &home, &mut report)
                .into_room()
                .unwrap();
            assert_eq!(names(&room), *expected, "room {room_name}");
        }
    }

    #[test]
    fn test_guarded_rooms_keep_short_lists() {
        let cases: &[(&str, &[&str])] = &[
            ("Gang", &["A", "B"]),
            ("Slaapkamer", &["A", "B"]),
            ("Vigo kamer", &["A"]),
            ("Zolder", &["A", "B"]),
        ];
        let customizer = builtin(false);
        for (room_name, input) in cases {
            let mut room = Room::new(*room_name);
            room.scenes = scenes(input);
            let mut hall = Room::new("Hal");
            hall.scenes = scenes(&["Zolder Raam Dicht"]);
            let mut home = Home::new("Thuis");
            home.rooms = vec![room, hall];

            let mut report = CustomizeReport::default();
            let customized = customizer.customize_room(&home.rooms[0], &home, &mut report);
            let Customized::Applied(room) = customized else {
                panic!("expected applied for {room_name}, got {customized:?}");
            };
            let mut expected = input.to_vec();
            if *room_name == "Zolder" {
                expected.push("Zolder Raam Dicht");
            }
            assert_eq!(names(&room), expected, "room {room_name}");
            assert!(report.skipped.is_empty(), "room {room_name}");
        }
    }

    #[test]
    fn test_unmatched_rooms() {
        let home = home_with(Room::new("Keuken"));

        let mut report = CustomizeReport::default();
        let kept = builtin(false).customize_room(&home.rooms[0], &home, &mut report);
        assert!(matches!(kept, Customized::Unmatched(Some(_))));

        let dropped = builtin(true).customize_room(&home.rooms[0], &home, &mut report);
        assert_eq!(dropped, Customized::Unmatched(None));
        assert_eq!(report.dropped, ["Keuken"]);
    }

    #[test]
    fn test_truncate_and_personal_title() {
        assert_eq!(truncate_caption("short"), "short");
        let long = "Woonkamer Plafond Licht Links Achter";
        let truncated = truncate_caption(long);
        assert_eq!(truncated.chars().count(), 30);
        assert!(truncated.ends_with(".."));
        assert_eq!(truncate_caption(&"x".repeat(30)), "x".repeat(30));

        let customizer = builtin(true);
        assert_eq!(customizer.personal_title("Zolder Hue Licht Switch"), "");
        assert_eq!(customizer.personal_title("Gang Spot"), "Spot");
    }

    fn characteristic(kind: CharacteristicType, service_type: ServiceType) -> LiveAccessory {
        LiveAccessory {
            id: EntityId::new(),
            name: format!("{kind} device"),
            category: AccessoryCategory::Other("x".to_owned()),
            services: vec![LiveService {
                id: EntityId::new(),
                name: service_type.to_string(),
                service_type,
                is_primary: true,
                characteristics: vec![LiveCharacteristic {
                    id: EntityId::new(),
                    name: kind.to_string(),
                    characteristic_type: kind,
                    value: None,
                    metadata: CharacteristicMetadata::default(),
                }],
            }],
        }
    }

    #[test]
    fn test_setup_room_curates_characteristics() {
        let graph = LiveHome {
            accessories: vec![
                characteristic(CharacteristicType::Volume, ServiceType::Microphone),
                characteristic(CharacteristicType::CurrentTemperature, ServiceType::TemperatureSensor),
                characteristic(CharacteristicType::CarbonMonoxideDetected, ServiceType::CarbonMonoxideSensor),
                characteristic(CharacteristicType::Mute, ServiceType::Speaker),
                characteristic(CharacteristicType::BatteryLevel, ServiceType::Battery),
            ],
            ..LiveHome::default()
        };
        let mut room = Room::new("Badkamer");
        room.characteristics = graph
            .characteristics()
            .iter()
            .map(|ctx| Characteristic::new(ctx.characteristic.name.clone()))
            .collect();
        room.accessories = vec![Accessory::new("Scale")];
        let mut light = Accessory::new("Badkamer Spiegel Licht Switch");
        light.icon.caption = "old".to_owned();
        room.lights = vec![light, Accessory::new("Uncaptioned")];
        room.scenes = scenes(&["A scene with a very long name for a tile"]);
        let mut reconcile = ReconcileReport::new();
        room.reconcile(&graph, &mut reconcile);
        let home = home_with(room);

        let mut report = CustomizeReport::default();
        let room = builtin(false)
            .setup_room(&home.rooms[0], &home, &graph, &mut report)
            .unwrap();

        let captions: Vec<(&str, &str)> = room
            .characteristics
            .iter()
            .map(|c| (c.name.as_str(), c.icon.caption.as_str()))
            .collect();
        assert_eq!(
            captions,
            [
                ("currentTemperature", ""),
                ("carbonMonoxideDetected", "CO"),
                ("volume", "volume device"),
                ("mute", "mute device"),
            ]
        );
        assert_eq!(room.characteristics[2].icon.name, "mic");
        assert_eq!(room.characteristics[3].icon.name, "speaker.slash");
        assert!(room.accessories.is_empty());
        assert_eq!(room.scenes[0].icon.caption, "A scene with a very long nam..");
        assert_eq!(room.lights[0].icon.caption, "Badkamer Spiegel Licht Switch");
        assert_eq!(room.lights[0].icon.caption_color, DisplayColor::Primary);
        assert_eq!(room.lights[1].icon.caption, "");

        let personal = builtin(true)
            .setup_room(&home.rooms[0], &home, &graph, &mut report)
            .unwrap();
        assert_eq!(personal.lights[0].icon.caption, "Spiegel");
        assert_eq!(personal.scenes[0].icon.caption, "");
    }

    #[test]
    fn test_table_from_config() {
        let json = r#"{
            "display": { "imperialUnits": true },
            "personal": true,
            "customization": {
                "overrides": [{
                    "room": { "operator": "contains", "value": "office", "ignoreCase": true },
                    "statusLight": "office lamp",
                    "dropScenes": ["Koken", { "pattern": "(?i)^test" }],
                    "sceneOrder": [{ "index": 1 }, "rest"]
                }],
                "labelRemovals": [" Switch"]
            }
        }"#;
        let config = MirrorConfig::from_json(json).unwrap();
        assert!(config.display.imperial_units);
        let customizer = RoomCustomizer::from_config(&config).unwrap();
        assert!(customizer.is_personal());

        let mut room = Room::new("Home Office");
        room.scenes = scenes(&["First", "Koken", "Test run", "Second", "Third"]);
        room.accessories = vec![Accessory::new("Office Lamp")];
        let home = home_with(room);

        let mut report = CustomizeReport::default();
        let room = customizer
            .customize_room(&home.rooms[0], &home, &mut report)
            .into_room()
            .unwrap();
        assert_eq!(names(&room), ["Second", "First", "Third"]);
        assert_eq!(room.status_lights[0].name, "Office Lamp");
        assert_eq!(customizer.personal_title("Desk Switch"), "Desk");
    }

    #[test]
    fn test_yaml_table_and_invalid_pattern() {
        let yaml = r#"
overrides:
  - room: Attic
    singleThermostat: true
    dropScenes:
      - pattern: "(broken"
"#;
        let table: CustomizationTable = serde_yml::from_str(yaml).unwrap();
        assert_eq!(table.overrides.len(), 1);
        assert!(table.find("Attic").is_some());
        assert!(table.find("attic").is_none());
        assert!(matches!(
            RoomCustomizer::new(table, false),
            Err(MirrorError::InvalidPattern(_))
        ));
    }

    #[test]
    fn test_setup_home_drops_and_keeps_selection_valid() {
        let mut home = home_with(Room::new("Gang"));
        home.rooms.push(Room::new("Keuken"));
        let keuken = home.rooms[2].id;
        home.selected_room = Some(keuken);

        let report = builtin(true).setup_home(&mut home, &LiveHome::default());
        let kept: Vec<&str> = home.rooms.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(kept, ["Gang"]);
        assert_eq!(report.dropped, ["Hal", "Keuken"]);
        assert_eq!(home.selected_room, None);
    }
}
