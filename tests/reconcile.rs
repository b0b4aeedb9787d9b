#[cfg(test)]
mod tests {
    use hc_homewatch::*;

    struct Fixture {
        graph: LiveHome,
        lamp: EntityId,
        power: EntityId,
        scene: EntityId,
        room: EntityId,
    }

    fn fixture() -> Fixture {
        let lamp = EntityId::new();
        let power = EntityId::new();
        let scene = EntityId::new();
        let room = EntityId::new();
        let graph = LiveHome {
            rooms: vec![LiveRoom {
                id: room,
                name: "Kitchen".to_owned(),
            }],
            accessories: vec![LiveAccessory {
                id: lamp,
                name: "Kitchen Lamp".to_owned(),
                category: AccessoryCategory::Lightbulb,
                services: vec![LiveService {
                    id: EntityId::new(),
                    name: "Lamp".to_owned(),
                    service_type: ServiceType::Lightbulb,
                    is_primary: true,
                    characteristics: vec![LiveCharacteristic {
                        id: power,
                        name: "Kitchen Lamp Power".to_owned(),
                        characteristic_type: CharacteristicType::PowerState,
                        value: Some(LiveValue::Bool(true)),
                        metadata: CharacteristicMetadata {
                            format: Some(ValueFormat::Bool),
                            units: None,
                        },
                    }],
                }],
            }],
            action_sets: vec![LiveActionSet {
                id: scene,
                name: "Dinner".to_owned(),
                actions: vec![WriteAction {
                    characteristic: power,
                    target: LiveValue::Bool(true),
                }],
                is_executing: false,
            }],
        };
        Fixture {
            graph,
            lamp,
            power,
            scene,
            room,
        }
    }

    #[test]
    fn test_find_match_prefers_id() {
        let f = fixture();
        let by_id = find_match(&f.lamp, "Some Other Name", f.graph.accessories());
        assert!(matches!(by_id, Match::ById(a) if a.id == f.lamp));

        let by_name = find_match(&EntityId::new(), "Kitchen Lamp", f.graph.accessories());
        assert!(matches!(by_name, Match::ByName(a) if a.id == f.lamp));

        let missing = find_match(&EntityId::new(), "Garage", f.graph.accessories());
        assert!(!missing.is_found());
        assert!(missing.entity().is_none());
    }

    #[test]
    fn test_id_match_attaches_without_repair() {
        let f = fixture();
        let mut accessory = Accessory::new("Renamed Lamp").with_id(f.lamp);
        let mut report = ReconcileReport::new();
        accessory.reconcile(&f.graph, &mut report);

        assert!(accessory.is_attached());
        assert_eq!(accessory.id, f.lamp);
        assert!(report.is_clean());
        assert!(!report.requires_save());
        assert_eq!(accessory.services.len(), 1);
        assert_eq!(accessory.characteristics.len(), 1);
        assert_eq!(accessory.power_state(&f.graph), Some(true));
    }

    #[test]
    fn test_name_fallback_repairs_id() {
        let f = fixture();
        let stale = EntityId::new();
        let mut accessory = Accessory::new("Kitchen Lamp").with_id(stale);
        let mut report = ReconcileReport::new();
        accessory.reconcile(&f.graph, &mut report);

        assert_eq!(accessory.id, f.lamp);
        assert_eq!(accessory.live, Some(f.lamp));
        assert!(report.requires_save());
        assert_eq!(
            report.repairs,
            vec![IdRepair {
                kind: EntityKind::Accessory,
                name: "Kitchen Lamp".to_owned(),
                from: stale,
                to: f.lamp,
            }]
        );
    }

    #[test]
    fn test_not_found_leaves_entity_inert() {
        let f = fixture();
        let mut accessory = Accessory::new("Garage Door");
        let mut characteristic = Characteristic::new("Garage Contact");
        let mut scene = Scene::new("Leave Home");
        let mut report = ReconcileReport::new();

        accessory.reconcile(&f.graph, &mut report);
        characteristic.reconcile(&f.graph, &mut report);
        scene.reconcile(&f.graph, &mut report);

        assert!(!accessory.is_attached());
        assert_eq!(accessory.power_state(&f.graph), None);
        assert_eq!(accessory.value_for_type(&f.graph, CharacteristicType::PowerState), 0.0);
        assert!(characteristic.value(&f.graph).is_none());
        assert!(!scene.is_executing(&f.graph));
        assert_eq!(scene.is_active(&f.graph), None);

        assert_eq!(report.missing.len(), 3);
        assert_eq!(report.missing_count(EntityKind::Scene), 1);
        assert!(report.missing.iter().all(MirrorError::is_recoverable));
        assert!(!report.requires_save());
    }

    #[test]
    fn test_characteristic_name_fallback_and_value() {
        let f = fixture();
        let mut characteristic = Characteristic::new("Kitchen Lamp Power");
        let mut report = ReconcileReport::new();
        characteristic.reconcile(&f.graph, &mut report);

        assert_eq!(characteristic.id, f.power);
        assert_eq!(characteristic.value(&f.graph), Some(&LiveValue::Bool(true)));
        assert_eq!(
            characteristic.characteristic_type(&f.graph),
            Some(CharacteristicType::PowerState)
        );
    }

    #[test]
    fn test_placeholders_are_never_reconciled() {
        let f = fixture();
        let mut placeholder = Characteristic::placeholder();
        let mut report = ReconcileReport::new();
        placeholder.reconcile(&f.graph, &mut report);
        assert!(!placeholder.is_attached());
        assert!(report.is_clean());
        assert_eq!(report.matched, 0);
    }

    #[test]
    fn test_scene_execution_follows_live_values() {
        let mut f = fixture();
        let mut scene = Scene::new("Dinner");
        let mut report = ReconcileReport::new();
        scene.reconcile(&f.graph, &mut report);

        assert_eq!(scene.id, f.scene);
        assert!(scene.is_executing(&f.graph));
        assert_eq!(scene.is_active(&f.graph), Some(false));
        assert_eq!(scene.target_characteristics(&f.graph), vec![f.power]);

        f.graph.set_value(&f.power, LiveValue::Bool(false));
        assert!(!scene.is_executing(&f.graph));
    }

    #[test]
    fn test_home_reconcile_walks_everything() {
        let f = fixture();
        let stale_room = EntityId::new();
        let mut room = Room::new("Kitchen").with_id(stale_room);
        room.lights = vec![Accessory::new("Kitchen Lamp")];
        room.accessories = vec![Accessory::new("Kitchen Lamp").with_id(f.lamp)];
        room.characteristics = vec![Characteristic::new("Kitchen Lamp Power").with_id(f.power)];
        room.current_temperature = Some(Characteristic::new("Kitchen Temperature"));
        room.scenes = vec![Scene::new("Dinner")];

        let mut home = Home::new("Home");
        home.rooms = vec![room, Room::new("Attic")];
        home.selected_room = Some(stale_room);
        home.cameras = vec![Accessory::new("Doorbell")];

        let report = home.reconcile(&f.graph);

        let kitchen = &home.rooms[0];
        assert_eq!(kitchen.id, f.room);
        assert_eq!(home.selected_room, Some(f.room));
        assert_eq!(home.selected_room().map(|r| r.name.as_str()), Some("Kitchen"));
        assert!(kitchen.lights[0].is_attached());
        assert!(kitchen.scenes[0].resolve(&f.graph).is_some());

        // room, light and scene repaired by name
        assert_eq!(report.repairs.len(), 3);
        assert!(report.requires_save());
        assert_eq!(report.missing_count(EntityKind::Room), 1);
        assert_eq!(report.missing_count(EntityKind::Characteristic), 1);
        assert_eq!(report.missing_count(EntityKind::Accessory), 1);
    }

    fn sensor(name: &str) -> (LiveAccessory, EntityId) {
        let id = EntityId::new();
        let accessory = LiveAccessory {
            id: EntityId::new(),
            name: name.to_owned(),
            category: AccessoryCategory::Sensor,
            services: vec![LiveService {
                id: EntityId::new(),
                name: "Temperature".to_owned(),
                service_type: ServiceType::TemperatureSensor,
                is_primary: true,
                characteristics: vec![LiveCharacteristic {
                    id,
                    name: "Current Temperature".to_owned(),
                    characteristic_type: CharacteristicType::CurrentTemperature,
                    value: Some(LiveValue::Float(18.0)),
                    metadata: CharacteristicMetadata::default(),
                }],
            }],
        };
        (accessory, id)
    }

    #[test]
    fn test_characteristic_name_fallback_prefers_room_accessories() {
        let (attic, attic_temperature) = sensor("Attic Sensor");
        let (kitchen, kitchen_temperature) = sensor("Kitchen Sensor");
        let graph = LiveHome {
            accessories: vec![attic, kitchen],
            ..LiveHome::default()
        };

        let mut report = ReconcileReport::new();
        let mut loose = Characteristic::new("Current Temperature");
        loose.reconcile(&graph, &mut report);
        assert_eq!(loose.live, Some(attic_temperature));

        let mut room = Room::new("Kitchen");
        room.others = vec![Accessory::new("Kitchen Sensor")];
        room.characteristics = vec![Characteristic::new("Current Temperature")];
        room.current_temperature = Some(Characteristic::new("Current Temperature"));
        room.reconcile(&graph, &mut report);
        assert_eq!(room.characteristics[0].live, Some(kitchen_temperature));
        assert_eq!(room.characteristics[0].id, kitchen_temperature);
        assert_eq!(
            room.current_temperature.as_ref().and_then(|c| c.live),
            Some(kitchen_temperature)
        );

        // an id match still wins over the room preference
        let mut pinned = Room::new("Kitchen");
        pinned.others = vec![Accessory::new("Kitchen Sensor")];
        pinned.characteristics = vec![Characteristic::new("Current Temperature").with_id(attic_temperature)];
        pinned.reconcile(&graph, &mut report);
        assert_eq!(pinned.characteristics[0].live, Some(attic_temperature));
    }
}
