use std::path::{Path, PathBuf};

/// A file reported by the folder picker, before any filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    /// MIME type as reported by the picker; `None` when it could not tell.
    pub mime: Option<String>,
    pub location: PathBuf,
}

impl SelectedFile {
    pub fn new(
        name: impl Into<String>,
        mime: Option<&str>,
        location: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            mime: mime.map(str::to_string),
            location: location.into(),
        }
    }
}

/// One playable video in the playlist. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaEntry {
    name: String,
    mime: String,
    source: PathBuf,
}

impl MediaEntry {
    /// Wraps `file` if its MIME type is in the `video/` category.
    pub fn from_selected(file: SelectedFile) -> Option<Self> {
        let mime = file.mime.filter(|mime| is_video_mime(mime))?;
        Some(Self {
            name: file.name,
            mime,
            source: file.location,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn source(&self) -> &Path {
        &self.source
    }
}

pub fn is_video_mime(mime: &str) -> bool {
    mime.starts_with("video/")
}

/// Keeps the video files of a selection, preserving their order.
pub fn collect_videos<I>(files: I) -> Vec<MediaEntry>
where
    I: IntoIterator<Item = SelectedFile>,
{
    files
        .into_iter()
        .filter_map(MediaEntry::from_selected)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, mime: Option<&str>) -> SelectedFile {
        SelectedFile::new(name, mime, format!("/videos/{name}"))
    }

    #[test]
    fn keeps_only_video_types_in_order() {
        let entries = collect_videos(vec![
            file("b.webm", Some("video/webm")),
            file("notes.txt", Some("text/plain")),
            file("unknown.bin", None),
            file("a.mp4", Some("video/mp4")),
            file("song.mp3", Some("audio/mpeg")),
        ]);

        let names: Vec<_> = entries.iter().map(MediaEntry::name).collect();
        assert_eq!(names, ["b.webm", "a.mp4"]);
        assert_eq!(entries[1].mime(), "video/mp4");
        assert_eq!(entries[1].source(), Path::new("/videos/a.mp4"));
    }

    #[test]
    fn empty_mime_is_excluded() {
        assert!(MediaEntry::from_selected(file("x", Some(""))).is_none());
        assert!(!is_video_mime("videos/mp4"));
    }
}
