use rand::Rng;

use crate::{media, MediaEntry, SelectedFile};

/// Result of moving the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Cursor moved to the contained index.
    Moved(usize),
    /// Already at the last entry; cursor unchanged.
    AtLast,
    /// Already at the first entry; cursor unchanged.
    AtFirst,
    /// Nothing to navigate.
    Empty,
}

/// Ordered, shuffled sequence of videos plus the playback cursor.
///
/// The order of `entries` is the shuffle result. The cursor is `None` exactly
/// when the playlist is empty and otherwise always indexes a valid entry.
#[derive(Debug, Default, Clone)]
pub struct Playlist {
    entries: Vec<MediaEntry>,
    cursor: Option<usize>,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the playlist with the video files of `files`, keeping their
    /// order. Non-video and untyped files are dropped silently.
    pub fn set_entries<I>(&mut self, files: I)
    where
        I: IntoIterator<Item = SelectedFile>,
    {
        self.entries = media::collect_videos(files);
        self.cursor = if self.entries.is_empty() { None } else { Some(0) };
    }

    /// Shuffles with the thread-local generator.
    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::thread_rng());
    }

    /// Fisher–Yates in place, then rewinds the cursor to the first entry.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for i in (1..self.entries.len()).rev() {
            let j = rng.gen_range(0..=i);
            self.entries.swap(i, j);
        }
        self.cursor = if self.entries.is_empty() { None } else { Some(0) };
    }

    pub fn advance(&mut self) -> Step {
        match self.cursor {
            None => Step::Empty,
            Some(index) if index + 1 < self.entries.len() => {
                self.cursor = Some(index + 1);
                Step::Moved(index + 1)
            }
            Some(_) => Step::AtLast,
        }
    }

    pub fn retreat(&mut self) -> Step {
        match self.cursor {
            None => Step::Empty,
            Some(0) => Step::AtFirst,
            Some(index) => {
                self.cursor = Some(index - 1);
                Step::Moved(index - 1)
            }
        }
    }

    pub fn current(&self) -> Option<&MediaEntry> {
        self.cursor.and_then(|index| self.entries.get(index))
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn entries(&self) -> &[MediaEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
