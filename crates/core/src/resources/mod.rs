use std::{collections::HashSet, fmt};

use tracing::{debug, trace};

use crate::MediaEntry;

const URL_SCHEME: &str = "blob:shuffle-viewer";

/// Revocable reference to the media bytes of exactly one playlist entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayableHandle {
    id: u64,
    url: String,
}

impl PlayableHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// URL handed to the video sinks.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for PlayableHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Mints and revokes object-URL style handles.
///
/// The manager does not decide when a handle goes away; the session releases
/// the superseded handle before acquiring the next, which keeps at most one
/// handle alive per playback slot.
#[derive(Debug, Default)]
pub struct ResourceManager {
    next_id: u64,
    live: HashSet<u64>,
    acquired: u64,
    released: u64,
}

impl ResourceManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&mut self, entry: &MediaEntry) -> PlayableHandle {
        self.next_id += 1;
        let id = self.next_id;
        self.live.insert(id);
        self.acquired += 1;

        let handle = PlayableHandle {
            id,
            url: format!("{URL_SCHEME}/{id}"),
        };
        debug!(
            url = %handle,
            name = entry.name(),
            source = %entry.source().display(),
            "acquired playable handle"
        );
        handle
    }

    /// Revokes `handle`. Releasing an already released handle is a no-op.
    pub fn release(&mut self, handle: &PlayableHandle) {
        if self.live.remove(&handle.id) {
            self.released += 1;
            debug!(url = %handle, "released playable handle");
        } else {
            trace!(url = %handle, "handle already released");
        }
    }

    pub fn is_live(&self, handle: &PlayableHandle) -> bool {
        self.live.contains(&handle.id)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn acquired(&self) -> u64 {
        self.acquired
    }

    pub fn released(&self) -> u64 {
        self.released
    }
}
