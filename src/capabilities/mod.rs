mod location;
mod share;

pub use self::location::{Location, LocationOperation, LocationResponse};
pub use self::share::{Share, ShareOperation, ShareResponse};

// Crux's built-in Render capability is used directly; it already covers
// everything needed to trigger view updates.
pub use crux_core::render::Render;

use crate::{App, Event};

pub type AppRender = Render<Event>;
pub type AppLocation = Location<Event>;
pub type AppShare = Share<Event>;

#[derive(crux_core::macros::Effect)]
pub struct Capabilities {
    pub render: Render<Event>,
    pub location: Location<Event>,
    pub share: Share<Event>,
}
