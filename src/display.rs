//! Human readable values and default icons for characteristics, services and accessories.

use crate::{
    AccessoryCategory, Characteristic, CharacteristicContext, CharacteristicMetadata,
    CharacteristicType, DisplayColor, DisplaySettings, EntityKind, Icon, LabelTable,
    LiveAccessory, LiveGraph, LiveValue, MirrorError, MirrorResult, ServiceType, ValueFormat,
};

use CharacteristicType as C;

const CONTACT: LabelTable = LabelTable::new(&[(1, "Open")], "Closed");
const LEAK: LabelTable = LabelTable::new(&[(1, "Yes")], "No");
const LOW_BATTERY: LabelTable = LabelTable::new(&[(1, "Low")], "Normal");
const PHYSICAL_CONTROLS: LabelTable = LabelTable::new(&[(1, "Locked")], "Not Locked");
const DETECTED: LabelTable = LabelTable::new(&[(1, "Detected")], "No");
const HEATING_COOLING: LabelTable =
    LabelTable::new(&[(1, "Heat"), (2, "Cool"), (3, "Auto")], "Off");
const HEATER_COOLER_TARGET: LabelTable =
    LabelTable::new(&[(1, "Heat"), (2, "Cool")], "Automatic");
const FAN_STATE: LabelTable = LabelTable::new(&[(1, "Idle"), (2, "Active")], "Inactive");
const FAN_TARGET: LabelTable = LabelTable::new(&[(1, "Manual")], "Automatic");
const HUMIDIFIER_STATE: LabelTable = LabelTable::new(
    &[(1, "Idle"), (2, "Humidifying"), (3, "Dehumidifying")],
    "Inactive",
);
const HUMIDIFIER_TARGET: LabelTable =
    LabelTable::new(&[(1, "Humidify"), (2, "Dehumidify")], "Automatic");
const DOOR_STATE: LabelTable = LabelTable::new(
    &[(1, "Closed"), (2, "Opening"), (3, "Closing"), (4, "Stopped")],
    "Open",
);
const INPUT_EVENT: LabelTable =
    LabelTable::new(&[(1, "DoublePress"), (2, "LongPress")], "SinglePress");
const TEMPERATURE_UNITS: LabelTable = LabelTable::new(&[(0, "Celsius")], "Fahrenheit");
const SECURITY_STATE: LabelTable = LabelTable::new(
    &[
        (1, "Away Arm"),
        (2, "Night Arm"),
        (3, "Disarmed"),
        (4, "Triggered"),
    ],
    "Home Arm",
);
const ALARM_TYPE: LabelTable = LabelTable::new(&[(1, "No Alarm")], "Unknown");
const LOCK_STATE: LabelTable = LabelTable::new(
    &[(1, "Secured"), (2, "Jammed"), (3, "Unknown")],
    "Unsecured",
);
const AIR_QUALITY: LabelTable = LabelTable::new(
    &[
        (0, "Unknown"),
        (1, "Excellent"),
        (2, "Good"),
        (3, "Fair"),
        (4, "Inferior"),
        (5, "Poor"),
    ],
    "Unknown",
);
const MUTE: LabelTable = LabelTable::new(&[(1, "Muted")], "Not Muted");

fn enumeration_table(kind: &CharacteristicType) -> Option<&'static LabelTable> {
    let table = match kind {
        C::ContactState => &CONTACT,
        C::LeakDetected => &LEAK,
        C::StatusLowBattery => &LOW_BATTERY,
        C::LockPhysicalControls => &PHYSICAL_CONTROLS,
        C::CarbonDioxideDetected
        | C::CarbonMonoxideDetected
        | C::SmokeDetected
        | C::MotionDetected
        | C::OccupancyDetected
        | C::ObstructionDetected => &DETECTED,
        C::CurrentHeatingCooling => &HEATING_COOLING,
        C::TargetHeaterCoolerState => &HEATER_COOLER_TARGET,
        C::CurrentFanState | C::CurrentAirPurifierState => &FAN_STATE,
        C::TargetFanState | C::TargetAirPurifierState => &FAN_TARGET,
        C::CurrentHumidifierDehumidifierState => &HUMIDIFIER_STATE,
        C::TargetHumidifierDehumidifierState => &HUMIDIFIER_TARGET,
        C::CurrentDoorState | C::TargetDoorState => &DOOR_STATE,
        C::InputEvent => &INPUT_EVENT,
        C::TemperatureUnits => &TEMPERATURE_UNITS,
        C::CurrentSecuritySystemState | C::TargetSecuritySystemState => &SECURITY_STATE,
        C::SecuritySystemAlarmType => &ALARM_TYPE,
        C::CurrentLockMechanismState | C::TargetLockMechanismState => &LOCK_STATE,
        C::AirQuality => &AIR_QUALITY,
        C::Mute => &MUTE,
        _ => return None,
    };
    Some(table)
}

/// Fixed unit suffix for measured quantities that ignore the metadata units.
fn measurement_suffix(kind: &CharacteristicType) -> Option<&'static str> {
    match kind {
        C::CarbonDioxideLevel => Some(" ppm"),
        C::Pm25Density
        | C::Pm10Density
        | C::VolatileOrganicCompoundDensity
        | C::NitrogenDioxideDensity
        | C::OzoneDensity
        | C::SulphurDioxideDensity => Some(" μg/m³"),
        C::Volume => Some(" %"),
        _ => None,
    }
}

/// Rounds half away from zero to one decimal and always prints the decimal.
pub fn one_decimal(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    format!("{:.1}", rounded)
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateIcon {
    pub active: bool,
    pub symbol: &'static str,
}

impl StateIcon {
    fn pick(active: bool, on: &'static str, off: &'static str) -> Self {
        Self {
            active,
            symbol: if active { on } else { off },
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayMapper {
    settings: DisplaySettings,
}

impl DisplayMapper {
    pub fn new(settings: DisplaySettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &DisplaySettings {
        &self.settings
    }

    /// Display string of a mirrored characteristic, `None` while detached or without value.
    pub fn value_string<G: LiveGraph + ?Sized>(
        &self,
        characteristic: &Characteristic,
        graph: &G,
    ) -> Option<String> {
        self.checked_value_string(characteristic, graph).ok()
    }

    /// Like [`Self::value_string`], but a detached characteristic yields `NotFound` and an
    /// attached one without a displayable value yields `MissingValue`.
    pub fn checked_value_string<G: LiveGraph + ?Sized>(
        &self,
        characteristic: &Characteristic,
        graph: &G,
    ) -> MirrorResult<String> {
        let ctx = characteristic
            .context(graph)
            .ok_or_else(|| MirrorError::NotFound {
                kind: EntityKind::Characteristic,
                name: characteristic.name.clone(),
            })?;
        self.format_value(
            &ctx.characteristic.characteristic_type,
            &ctx.characteristic.metadata,
            ctx.characteristic.value.as_ref(),
            &characteristic.icon.caption,
        )
        .ok_or_else(|| MirrorError::MissingValue {
            characteristic: characteristic.name.clone(),
        })
    }

    /// Formats `value` according to its declared format and type.
    ///
    /// Free-form units are only appended while `caption` is blank, a captioned tile already
    /// names the quantity.
    pub fn format_value(
        &self,
        kind: &CharacteristicType,
        metadata: &CharacteristicMetadata,
        value: Option<&LiveValue>,
        caption: &str,
    ) -> Option<String> {
        let value = value?;
        match metadata.format {
            Some(ValueFormat::Bool) => {
                let state = value.as_bool()?;
                let label = match (kind, state) {
                    (C::PowerState, true) => "On",
                    (C::PowerState, false) => "Off",
                    (C::ContactState, true) => "Open",
                    (C::ContactState, false) => "Closed",
                    (_, true) => "True",
                    (_, false) => "False",
                };
                Some(label.to_owned())
            }
            Some(ValueFormat::String) => {
                let text = value.as_str()?;
                if caption.is_empty() {
                    Some(format!("{}{}", text, units_suffix(metadata)))
                } else {
                    Some(text.to_owned())
                }
            }
            _ => self.format_typed(kind, metadata, value, caption),
        }
    }

    fn format_typed(
        &self,
        kind: &CharacteristicType,
        metadata: &CharacteristicMetadata,
        value: &LiveValue,
        caption: &str,
    ) -> Option<String> {
        if let Some(table) = enumeration_table(kind) {
            return value.as_int().map(|code| table.label(code).to_owned());
        }
        if let Some(suffix) = measurement_suffix(kind) {
            return value.as_f64().map(|v| format!("{}{}", one_decimal(v), suffix));
        }
        match kind {
            C::ColorTemperature => {
                let mired = value.as_int().filter(|m| *m != 0)?;
                Some(format!("{}Mired {}K", mired, 1_000_000 / mired))
            }
            C::StreamingStatus => Some(value.as_str().unwrap_or_default().to_owned()),
            _ => {
                let mut units = units_suffix(metadata);
                let mut number = value.as_f64()?;
                if units.to_lowercase().contains("celsius") {
                    if self.settings.imperial_units {
                        units = " °F".to_owned();
                        number = celsius_to_fahrenheit(number);
                    } else {
                        units = " °C".to_owned();
                    }
                }
                if units.to_lowercase().contains("percentage") {
                    units = " %".to_owned();
                }
                if caption.is_empty() || caption == " " {
                    Some(format!("{}{}", one_decimal(number), units))
                } else {
                    Some(one_decimal(number))
                }
            }
        }
    }

    /// Default icon for a characteristic: its own type, then the primary non-battery service
    /// of its accessory, then the accessory category, then a plain circle.
    pub fn default_characteristic_icon(&self, ctx: Option<&CharacteristicContext<'_>>) -> Icon {
        let Some(ctx) = ctx else {
            return Icon::fallback();
        };
        if let Some(icon) = characteristic_icon(&ctx.characteristic.characteristic_type) {
            return icon;
        }
        ctx.accessory
            .services
            .iter()
            .find(|s| s.is_primary && s.service_type != ServiceType::Battery)
            .and_then(|s| service_icon(&s.service_type))
            .or_else(|| accessory_icon(&ctx.accessory.category))
            .unwrap_or_else(Icon::fallback)
    }

    /// Default icon for an accessory: its category, then its first non-battery service, then
    /// the icon of its characteristics with the primary service taking precedence.
    pub fn default_accessory_icon(&self, accessory: Option<&LiveAccessory>, name: &str) -> Icon {
        if let Some(icon) = accessory.and_then(|a| accessory_icon(&a.category)) {
            return icon;
        }
        let Some(accessory) = accessory else {
            return Icon::fallback().with_caption(name);
        };
        if let Some(icon) = accessory
            .services
            .iter()
            .find(|s| s.service_type != ServiceType::Battery)
            .and_then(|s| service_icon(&s.service_type))
        {
            return icon;
        }
        let mut icon = Icon::fallback().with_caption(name);
        for service in &accessory.services {
            for characteristic in &service.characteristics {
                if characteristic.characteristic_type.is_battery() {
                    continue;
                }
                if let Some(found) = characteristic_icon(&characteristic.characteristic_type) {
                    icon = found;
                    if service.is_primary {
                        return icon;
                    }
                }
            }
        }
        icon
    }

    /// Active flag and symbol for state tiles, `None` for unsupported types or values.
    pub fn state_icon(&self, ctx: &CharacteristicContext<'_>) -> Option<StateIcon> {
        let value = ctx.characteristic.value.as_ref()?;
        let icon = match ctx.characteristic.characteristic_type {
            C::ContactState => StateIcon::pick(
                value.as_bool()?,
                "contact.sensor.fill",
                "contact.sensor",
            ),
            C::CarbonDioxideLevel => StateIcon::pick(
                value.as_f64()? > 1000.0,
                "carbon.dioxide.cloud.fill",
                "carbon.dioxide.cloud",
            ),
            C::CarbonMonoxideLevel => StateIcon::pick(
                value.as_f64()? > 150.0,
                "carbon.monoxide.cloud.fill",
                "carbon.monoxide.cloud",
            ),
            C::VolatileOrganicCompoundDensity => {
                StateIcon::pick(value.as_f64()? > 3000.0, "aqi.high", "aqi.medium")
            }
            C::CurrentHeatingCooling => StateIcon::pick(
                value.as_int()? > 0,
                "air.conditioner.vertical.fill",
                "air.conditioner.vertical",
            ),
            C::AirQuality => StateIcon::pick(value.as_int()? > 3, "leaf.fill", "leaf"),
            C::OccupancyDetected => StateIcon::pick(value.as_bool()?, "person.fill", "person"),
            C::MotionDetected => StateIcon::pick(
                value.as_bool()?,
                "figure.walk.motion",
                "figure.walk.motion",
            ),
            C::CurrentLockMechanismState => {
                StateIcon::pick(value.as_int()? == 1, "lock", "lock.slash")
            }
            C::LeakDetected => StateIcon::pick(value.as_int()? > 0, "drop.fill", "drop"),
            C::Mute => {
                let muted = value.as_bool()?;
                if ctx.service.service_type == ServiceType::Speaker {
                    StateIcon::pick(muted, "speaker.slash", "speaker")
                } else {
                    StateIcon::pick(muted, "mic.slash", "mic")
                }
            }
            C::StatusLowBattery => {
                StateIcon::pick(value.as_int()? > 0, "battery.0", "battery.75")
            }
            _ => return None,
        };
        Some(icon)
    }

    pub fn assign_characteristic_icon<G: LiveGraph + ?Sized>(
        &self,
        characteristic: &mut Characteristic,
        graph: &G,
    ) {
        characteristic.icon = self.default_characteristic_icon(characteristic.context(graph).as_ref());
    }

    pub fn assign_accessory_icon<G: LiveGraph + ?Sized>(
        &self,
        accessory: &mut crate::Accessory,
        graph: &G,
    ) {
        accessory.icon = self.default_accessory_icon(accessory.resolve(graph), &accessory.name);
    }
}

fn units_suffix(metadata: &CharacteristicMetadata) -> String {
    metadata
        .units
        .as_ref()
        .map(|units| format!(" {}", units))
        .unwrap_or_default()
}

fn white(name: &str) -> Option<Icon> {
    Some(Icon::symbol(name, DisplayColor::White))
}

pub fn characteristic_icon(kind: &CharacteristicType) -> Option<Icon> {
    match kind {
        C::PowerState | C::OutletInUse => white("power"),
        C::CurrentTemperature
        | C::TargetTemperature
        | C::CurrentHeatingCooling
        | C::TargetHeatingCooling => white("thermometer"),
        C::CurrentRelativeHumidity | C::TargetRelativeHumidity => white("humidity"),
        C::CurrentHumidifierDehumidifierState
        | C::TargetHumidifierDehumidifierState
        | C::HumidifierThreshold
        | C::DehumidifierThreshold => white("dehumidifier"),
        C::AirQuality => white("leaf"),
        C::Pm25Density | C::AirParticulateDensity | C::AirParticulateSize => white("aqi.low"),
        C::Pm10Density => white("aqi.medium"),
        C::VolatileOrganicCompoundDensity => white("allergens"),
        C::SmokeDetected => white("smoke"),
        C::CarbonMonoxideDetected | C::CarbonMonoxideLevel | C::CarbonMonoxidePeakLevel => {
            white("carbon.monoxide.cloud")
        }
        C::CarbonDioxideDetected | C::CarbonDioxideLevel | C::CarbonDioxidePeakLevel => {
            white("carbon.dioxide.cloud")
        }
        C::WaterLevel | C::ValveType | C::LeakDetected => white("drop"),
        C::ChargingState => white("battery.75"),
        C::BatteryLevel => white("battery.100"),
        C::StatusLowBattery => white("battery.0"),
        C::MotionDetected => white("figure.walk.motion"),
        C::OccupancyDetected => white("person"),
        C::ContactState => white("contact.sensor"),
        C::OutputState | C::InputEvent => white("switch.programmable.square"),
        C::CurrentFanState
        | C::TargetFanState
        | C::RotationDirection
        | C::RotationSpeed
        | C::SwingMode => white("fanblades"),
        C::CurrentAirPurifierState
        | C::TargetAirPurifierState
        | C::FilterLifeLevel
        | C::FilterChangeIndication
        | C::FilterResetChangeIndication => white("air.purifier"),
        C::CurrentDoorState | C::TargetDoorState => white("door.left.hand.closed"),
        C::CurrentLockMechanismState | C::TargetLockMechanismState => white("key"),
        C::CurrentSecuritySystemState | C::TargetSecuritySystemState => white("shield"),
        C::ObstructionDetected | C::SecuritySystemAlarmType => white("exclamationmark.shield"),
        C::NightVision => white("eye.square.fill"),
        C::StreamingStatus => white("video"),
        C::Volume => white("speaker.wave.3"),
        C::Mute => white("speaker.slash"),
        _ => None,
    }
}

pub fn service_icon(service_type: &ServiceType) -> Option<Icon> {
    use ServiceType as S;
    match service_type {
        S::Lightbulb => white("lightbulb"),
        S::Outlet => white("togglepower"),
        S::Switch => white("lightswitch.on.square"),
        S::StatefulProgrammableSwitch | S::StatelessProgrammableSwitch => {
            white("switch.programmable.square")
        }
        S::Fan | S::AirPurifier => white("fanblades"),
        S::Thermostat | S::HeaterCooler | S::TemperatureSensor => white("thermometer"),
        S::HumiditySensor | S::HumidifierDehumidifier => white("humidity"),
        S::Window | S::WindowCovering => white("window.vertical.closed"),
        S::Door => white("door.left.hand.closed"),
        S::MotionSensor => white("figure.walk.motion"),
        S::OccupancySensor => white("person"),
        S::CameraControl | S::CameraRtpStreamManagement => white("camera"),
        S::Microphone => white("mic"),
        S::Speaker => white("speaker"),
        _ => None,
    }
}

pub fn accessory_icon(category: &AccessoryCategory) -> Option<Icon> {
    use AccessoryCategory as A;
    match category {
        A::Lightbulb => white("lightbulb"),
        A::Outlet => white("togglepower"),
        A::Switch => white("lightswitch.on.square"),
        A::ProgrammableSwitch => white("switch.programmable.square"),
        A::Fan | A::AirPurifier => white("fanblades"),
        A::Thermostat | A::AirConditioner | A::AirHeater => white("thermometer"),
        A::AirDehumidifier | A::AirHumidifier | A::Sprinkler | A::Faucet | A::ShowerHead => {
            white("humidity")
        }
        A::Window | A::WindowCovering => white("window.vertical.closed"),
        A::Door => white("door.left.hand.closed"),
        A::DoorLock | A::GarageDoorOpener | A::Sensor | A::SecuritySystem => white("lock"),
        A::VideoDoorbell | A::IpCamera => white("video"),
        A::Bridge | A::RangeExtender => white("network"),
        _ => None,
    }
}
