//! String tags the live home graph uses to classify characteristics, services and accessories.
//!
//! Unknown tags are preserved in an `Other` variant so a newer framework never breaks decoding.

macro_rules! define_kind {
    (
        $(#[$enum_attr:meta])*
        pub enum $name:ident {
            $(
                $variant:ident => $tag:literal
            ),* $(,)?
        }
    ) => {
        $(#[$enum_attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $(
                $variant,
            )*
            Other(String),
        }

        impl $name {
            pub fn as_str(&self) -> &str {
                match self {
                    $(
                        Self::$variant => $tag,
                    )*
                    Self::Other(tag) => tag.as_str(),
                }
            }
        }

        impl From<&str> for $name {
            fn from(tag: &str) -> Self {
                match tag {
                    $(
                        $tag => Self::$variant,
                    )*
                    other => Self::Other(other.to_owned()),
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self::from(s))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let tag = <String as serde::Deserialize>::deserialize(deserializer)?;
                Ok(Self::from(tag.as_str()))
            }
        }
    };
}

define_kind! {
    pub enum CharacteristicType {
        PowerState => "powerState",
        OutletInUse => "outletInUse",
        Brightness => "brightness",
        Hue => "hue",
        Saturation => "saturation",
        ColorTemperature => "colorTemperature",
        StatusActive => "statusActive",
        ContactState => "contactState",
        CurrentTemperature => "currentTemperature",
        TargetTemperature => "targetTemperature",
        TemperatureUnits => "temperatureUnits",
        CurrentHeatingCooling => "currentHeatingCooling",
        TargetHeatingCooling => "targetHeatingCooling",
        TargetHeaterCoolerState => "targetHeaterCoolerState",
        CurrentRelativeHumidity => "currentRelativeHumidity",
        TargetRelativeHumidity => "targetRelativeHumidity",
        CurrentHumidifierDehumidifierState => "currentHumidifierDehumidifierState",
        TargetHumidifierDehumidifierState => "targetHumidifierDehumidifierState",
        HumidifierThreshold => "humidifierThreshold",
        DehumidifierThreshold => "dehumidifierThreshold",
        AirQuality => "airQuality",
        AirParticulateDensity => "airParticulateDensity",
        AirParticulateSize => "airParticulateSize",
        Pm25Density => "pm2_5Density",
        Pm10Density => "pm10Density",
        NitrogenDioxideDensity => "nitrogenDioxideDensity",
        OzoneDensity => "ozoneDensity",
        SulphurDioxideDensity => "sulphurDioxideDensity",
        VolatileOrganicCompoundDensity => "volatileOrganicCompoundDensity",
        CarbonDioxideDetected => "carbonDioxideDetected",
        CarbonDioxideLevel => "carbonDioxideLevel",
        CarbonDioxidePeakLevel => "carbonDioxidePeakLevel",
        CarbonMonoxideDetected => "carbonMonoxideDetected",
        CarbonMonoxideLevel => "carbonMonoxideLevel",
        CarbonMonoxidePeakLevel => "carbonMonoxidePeakLevel",
        SmokeDetected => "smokeDetected",
        LeakDetected => "leakDetected",
        WaterLevel => "waterLevel",
        ValveType => "valveType",
        MotionDetected => "motionDetected",
        OccupancyDetected => "occupancyDetected",
        ObstructionDetected => "obstructionDetected",
        BatteryLevel => "batteryLevel",
        ChargingState => "chargingState",
        StatusLowBattery => "statusLowBattery",
        OutputState => "outputState",
        InputEvent => "inputEvent",
        CurrentFanState => "currentFanState",
        TargetFanState => "targetFanState",
        RotationDirection => "rotationDirection",
        RotationSpeed => "rotationSpeed",
        SwingMode => "swingMode",
        CurrentAirPurifierState => "currentAirPurifierState",
        TargetAirPurifierState => "targetAirPurifierState",
        FilterLifeLevel => "filterLifeLevel",
        FilterChangeIndication => "filterChangeIndication",
        FilterResetChangeIndication => "filterResetChangeIndication",
        CurrentDoorState => "currentDoorState",
        TargetDoorState => "targetDoorState",
        CurrentLockMechanismState => "currentLockMechanismState",
        TargetLockMechanismState => "targetLockMechanismState",
        LockPhysicalControls => "lockPhysicalControls",
        CurrentSecuritySystemState => "currentSecuritySystemState",
        TargetSecuritySystemState => "targetSecuritySystemState",
        SecuritySystemAlarmType => "securitySystemAlarmType",
        NightVision => "nightVision",
        StreamingStatus => "streamingStatus",
        Volume => "volume",
        Mute => "mute",
    }
}

define_kind! {
    pub enum ServiceType {
        Lightbulb => "lightbulb",
        Outlet => "outlet",
        Switch => "switch",
        StatefulProgrammableSwitch => "statefulProgrammableSwitch",
        StatelessProgrammableSwitch => "statelessProgrammableSwitch",
        Fan => "fan",
        AirPurifier => "airPurifier",
        Thermostat => "thermostat",
        HeaterCooler => "heaterCooler",
        TemperatureSensor => "temperatureSensor",
        HumiditySensor => "humiditySensor",
        HumidifierDehumidifier => "humidifierDehumidifier",
        AirQualitySensor => "airQualitySensor",
        CarbonDioxideSensor => "carbonDioxideSensor",
        CarbonMonoxideSensor => "carbonMonoxideSensor",
        ContactSensor => "contactSensor",
        LeakSensor => "leakSensor",
        SmokeSensor => "smokeSensor",
        Window => "window",
        WindowCovering => "windowCovering",
        Door => "door",
        GarageDoorOpener => "garageDoorOpener",
        LockMechanism => "lockMechanism",
        SecuritySystem => "securitySystem",
        MotionSensor => "motionSensor",
        OccupancySensor => "occupancySensor",
        CameraControl => "cameraControl",
        CameraRtpStreamManagement => "cameraRTPStreamManagement",
        Microphone => "microphone",
        Speaker => "speaker",
        Battery => "battery",
        AccessoryInformation => "accessoryInformation",
    }
}

define_kind! {
    pub enum AccessoryCategory {
        Lightbulb => "lightbulb",
        Outlet => "outlet",
        Switch => "switch",
        ProgrammableSwitch => "programmableSwitch",
        Fan => "fan",
        AirPurifier => "airPurifier",
        Thermostat => "thermostat",
        AirConditioner => "airConditioner",
        AirHeater => "airHeater",
        AirDehumidifier => "airDehumidifier",
        AirHumidifier => "airHumidifier",
        Sprinkler => "sprinkler",
        Faucet => "faucet",
        ShowerHead => "showerHead",
        Window => "window",
        WindowCovering => "windowCovering",
        Door => "door",
        DoorLock => "doorLock",
        GarageDoorOpener => "garageDoorOpener",
        Sensor => "sensor",
        SecuritySystem => "securitySystem",
        VideoDoorbell => "videoDoorbell",
        IpCamera => "ipCamera",
        Bridge => "bridge",
        RangeExtender => "rangeExtender",
    }
}

define_kind! {
    /// Declared value format of a characteristic.
    pub enum ValueFormat {
        Bool => "bool",
        Int => "int",
        Float => "float",
        String => "string",
        UInt8 => "uint8",
        UInt16 => "uint16",
        UInt32 => "uint32",
        UInt64 => "uint64",
        Data => "data",
        Tlv8 => "tlv8",
    }
}

impl CharacteristicType {
    pub fn is_battery(&self) -> bool {
        matches!(self, Self::BatteryLevel | Self::StatusLowBattery)
    }
}
