//! Core library for the Shuffle Viewer.
//!
//! A folder of videos is filtered, shuffled and played one entry at a time on
//! two stacked layers kept in lockstep. Each module owns one part of that
//! pipeline (resource handles, the playlist, layer synchronisation, gesture
//! navigation) and [`Session`] wires them together. Rendering, decoding and
//! the file picker stay behind the [`VideoSink`] and [`StatusDisplay`] traits.

pub mod config;
pub mod error;
pub mod headless;
pub mod media;
pub mod navigation;
pub mod playlist;
pub mod resources;
pub mod session;
pub mod sync;

pub use config::{NavigationConfig, SyncConfig, TransitionMode, ViewerConfig};
pub use error::{Result, ViewerError};
pub use headless::{DisplayProbe, HeadlessSink, RecordingDisplay, SinkProbe};
pub use media::{collect_videos, is_video_mime, MediaEntry, SelectedFile};
pub use navigation::{ClickAction, NavCommand, NavigationController, VerticalBounds, WheelInput};
pub use playlist::{Playlist, Step};
pub use resources::{PlayableHandle, ResourceManager};
pub use session::{Counter, Session, SessionBuilder, StatusDisplay};
pub use sync::{
    Layer, LayerState, PlayCause, PlayTicket, PlaybackBlocked, PlaybackState, Presentation,
    SinkEvent, SplitSide, SyncEngine, SyncReport, VideoSink,
};
