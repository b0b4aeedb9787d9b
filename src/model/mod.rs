mod accessory;
mod characteristic;
mod home;
mod icon;
mod id;
mod room;
mod scene;
mod service;
mod weather;

pub use accessory::*;
pub use characteristic::*;
pub use home::*;
pub use icon::*;
pub use id::*;
pub use room::*;
pub use scene::*;
pub use service::*;
pub use weather::*;
