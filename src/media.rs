use crate::error::{GalleryError, Result};

const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];
const VIDEO_EXTENSIONS: [&str; 1] = ["mp4"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn label(self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }
}

/// Text after the last `.`, or `None` when the path has no dot.
pub fn extension(path: &str) -> Option<&str> {
    path.rsplit_once('.').map(|(_, ext)| ext)
}

/// Classifies by extension. Matching is case-sensitive: `a.MP4` is not a video.
pub fn classify(path: &str) -> Option<MediaKind> {
    let ext = extension(path)?;
    if IMAGE_EXTENSIONS.contains(&ext) {
        Some(MediaKind::Image)
    } else if VIDEO_EXTENSIONS.contains(&ext) {
        Some(MediaKind::Video)
    } else {
        None
    }
}

pub fn is_media(path: &str) -> bool {
    classify(path).is_some()
}

/// Like `classify`, for an asset that is about to be displayed.
pub fn display_kind(path: &str) -> Result<MediaKind> {
    classify(path).ok_or_else(|| GalleryError::UnrecognizedMedia(path.to_string()))
}

/// Final `/`-separated segment. Used as the asset's identifier in the URL hash.
pub fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_known_extensions() {
        assert_eq!(classify("a.png"), Some(MediaKind::Image));
        assert_eq!(classify("img/b.jpg"), Some(MediaKind::Image));
        assert_eq!(classify("c.jpeg"), Some(MediaKind::Image));
        assert_eq!(classify("d.mp4"), Some(MediaKind::Video));
    }

    #[test]
    fn classification_is_case_sensitive() {
        assert_eq!(classify("a.MP4"), None);
        assert_eq!(classify("a.Png"), None);
    }

    #[test]
    fn paths_without_extension_are_unrecognized() {
        assert_eq!(classify("a"), None);
        assert_eq!(classify("png"), None);
        assert_eq!(classify("notes.txt"), None);
        assert!(!is_media(""));
    }

    #[test]
    fn only_the_last_extension_counts() {
        assert_eq!(classify("clip.mp4.png"), Some(MediaKind::Image));
        assert_eq!(classify("photo.png.bak"), None);
    }

    #[test]
    fn display_kind_rejects_unrecognized() {
        assert_eq!(display_kind("b.mp4").unwrap(), MediaKind::Video);
        let err = display_kind("c.txt").unwrap_err();
        assert!(matches!(err, GalleryError::UnrecognizedMedia(p) if p == "c.txt"));
    }

    #[test]
    fn base_name_takes_last_segment() {
        assert_eq!(base_name("img/a.png"), "a.png");
        assert_eq!(base_name("a.png"), "a.png");
        assert_eq!(base_name("x/img/"), "");
        assert_eq!(base_name(""), "");
    }
}
