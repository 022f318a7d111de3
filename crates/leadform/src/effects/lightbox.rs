//! Video lightbox state.

/// Whether the lightbox is showing and which source its iframe holds.
///
/// Closing clears the source so playback stops.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lightbox {
    source: Option<String>,
}

impl Lightbox {
    /// A closed lightbox.
    #[must_use]
    pub const fn new() -> Self {
        Self { source: None }
    }

    /// Starts playback of `embed_url` and returns the iframe source.
    pub fn open(&mut self, embed_url: &str) -> &str {
        self.source.insert(format!("{embed_url}?autoplay=1"))
    }

    /// Stops playback. Returns false if the lightbox was already closed.
    pub fn close(&mut self) -> bool {
        self.source.take().is_some()
    }

    /// Returns true while a video is showing.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.source.is_some()
    }

    /// Current iframe source; empty when closed.
    #[must_use]
    pub fn source(&self) -> &str {
        self.source.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_sets_autoplay_source() {
        let mut lightbox = Lightbox::new();
        assert_eq!(
            lightbox.open("https://video.example/embed/x"),
            "https://video.example/embed/x?autoplay=1"
        );
        assert!(lightbox.is_open());
    }

    #[test]
    fn test_close_clears_source() {
        let mut lightbox = Lightbox::new();
        lightbox.open("https://video.example/embed/x");
        assert!(lightbox.close());
        assert_eq!(lightbox.source(), "");
        assert!(!lightbox.close());
    }
}
