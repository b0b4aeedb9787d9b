mod condition;
mod config;
mod customize;
mod display;
mod error;
mod grouping;
mod kinds;
mod live;
mod model;
mod reconcile;
mod snapshot;
mod status;
mod unique_by_iter;
mod value_mapping;

pub use condition::*;
pub use config::*;
pub use customize::*;
pub use display::*;
pub use error::*;
pub use grouping::*;
pub use kinds::*;
pub use live::*;
pub use model::*;
pub use reconcile::*;
pub use snapshot::*;
pub use status::*;
pub use unique_by_iter::*;
pub use value_mapping::*;
