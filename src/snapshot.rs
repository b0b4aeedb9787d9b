//! Persisted home snapshots.
//!
//! Only identifiers and display metadata are written. Back-references, room flags, alert
//! colors, nested rows and weather are rebuilt after decoding by reconciling against the
//! live graph.

use crate::{Home, MirrorResult};

pub fn encode_home(home: &Home) -> MirrorResult<String> {
    Ok(serde_json::to_string_pretty(home)?)
}

pub fn decode_home(json: &str) -> MirrorResult<Home> {
    let home: Home = serde_json::from_str(json)?;
    log::debug!("Decoded home '{}' with {} rooms", home.name, home.rooms.len());
    Ok(home)
}

#[cfg(feature = "schema")]
pub fn snapshot_schema() -> MirrorResult<serde_json::Value> {
    Ok(serde_json::to_value(schemars::schema_for!(Home))?)
}
