//! Render surface bridge
//!
//! The engine never draws. It emits typed [`SurfaceCommand`]s to a
//! [`RenderSurface`], usually a [`ChannelSurface`] whose receiving end is owned
//! by the map adapter.

pub mod command;
pub mod traits;
pub mod channel;

pub use command::{LineStyle, MarkerKind, MarkerStyle, SurfaceCommand};
pub use traits::RenderSurface;
pub use channel::{ChannelSurface, RecordingSurface};
