//! Object key and naming rules for uploaded tracks and cover images.

use std::path::Path;

/// Content type assumed when the uploader does not send one.
pub const DEFAULT_AUDIO_CONTENT_TYPE: &str = "audio/mpeg";

/// Extension used when the file name has none.
pub const DEFAULT_TRACK_EXTENSION: &str = ".mp3";

/// Display name for a track with neither a title tag nor a usable file name.
pub const UNTITLED_TRACK_NAME: &str = "Untitled Track";

/// Prefix shared by every track object.
pub const TRACKS_PREFIX: &str = "tracks/";

/// Prefix shared by every cover image object.
pub const COVERS_PREFIX: &str = "covers/";

const IMAGE_TYPES: &[(&str, &str)] = &[
    (".png", "image/png"),
    (".jpg", "image/jpeg"),
    (".jpeg", "image/jpeg"),
    (".webp", "image/webp"),
    (".gif", "image/gif"),
    (".avif", "image/avif"),
];

/// Lowercases and collapses every run of characters outside `[a-z0-9]` into a
/// single `-`, trimming dashes at both ends.
///
/// ```
/// use mixmaster_core::track::to_slug;
///
/// assert_eq!(to_slug("Deep Dive (Extended Mix)"), "deep-dive-extended-mix");
/// assert_eq!(to_slug("¡¡!!"), "");
/// ```
pub fn to_slug(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_dash = false;

    for c in value.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// File name without directories and without its last extension.
pub fn file_stem(file_name: &str) -> &str {
    Path::new(file_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("")
}

/// Last extension of `file_name` including the dot, e.g. `.mp3`.
pub fn file_extension(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(|ext| format!(".{ext}"))
}

/// Case-insensitive `.mp3` check.
pub fn is_mp3_file_name(file_name: &str) -> bool {
    file_name.to_lowercase().ends_with(".mp3")
}

/// `tracks/<track_id>-<slug><extension>`
pub fn track_object_key(track_id: &str, slug: &str, extension: &str) -> String {
    format!("{TRACKS_PREFIX}{track_id}-{slug}{extension}")
}

/// Track name for an upload: the title tag, else the file stem, else
/// [`UNTITLED_TRACK_NAME`].
pub fn resolve_track_name(title: Option<&str>, file_name: &str) -> String {
    title
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .or_else(|| Some(file_stem(file_name)).filter(|stem| !stem.is_empty()))
        .unwrap_or(UNTITLED_TRACK_NAME)
        .to_string()
}

/// Key for a track uploaded through the server. The slug comes from the
/// track name and falls back to the track id.
pub fn uploaded_track_key(track_id: &str, track_name: &str, file_name: &str) -> String {
    let slug = Some(to_slug(track_name))
        .filter(|slug| !slug.is_empty())
        .unwrap_or_else(|| track_id.to_string());
    let extension =
        file_extension(file_name).unwrap_or_else(|| DEFAULT_TRACK_EXTENSION.to_string());
    track_object_key(track_id, &slug, &extension)
}

/// Key for a track the client uploads directly. The slug comes from the file
/// stem and falls back to `track`.
pub fn presigned_track_key(track_id: &str, file_name: &str) -> String {
    let slug = Some(to_slug(file_stem(file_name)))
        .filter(|slug| !slug.is_empty())
        .unwrap_or_else(|| "track".to_string());
    let extension =
        file_extension(file_name).unwrap_or_else(|| DEFAULT_TRACK_EXTENSION.to_string());
    track_object_key(track_id, &slug, &extension)
}

/// Whether `content_type` names an image, ignoring case and parameters.
pub fn is_image_content_type(content_type: &str) -> bool {
    content_type
        .trim()
        .to_ascii_lowercase()
        .starts_with("image/")
}

/// Image content type implied by the extension of `file_name`.
pub fn image_content_type_for(file_name: &str) -> Option<&'static str> {
    let extension = file_extension(file_name)?.to_ascii_lowercase();
    IMAGE_TYPES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, content_type)| *content_type)
}

fn image_extension_for(content_type: &str) -> Option<&'static str> {
    let essence = content_type.split(';').next()?.trim().to_ascii_lowercase();
    IMAGE_TYPES
        .iter()
        .find(|(_, ty)| *ty == essence)
        .map(|(ext, _)| *ext)
}

/// `covers/<cover_id>-<slug><extension>`. The slug comes from the file stem
/// and falls back to `cover`; the extension comes from the file name, then
/// from the content type.
pub fn cover_object_key(cover_id: &str, file_name: &str, content_type: &str) -> String {
    let slug = Some(to_slug(file_stem(file_name)))
        .filter(|slug| !slug.is_empty())
        .unwrap_or_else(|| "cover".to_string());
    let extension = file_extension(file_name)
        .or_else(|| image_extension_for(content_type).map(str::to_string))
        .unwrap_or_default();
    format!("{COVERS_PREFIX}{cover_id}-{slug}{extension}")
}

/// Whether `key` names an uploaded track or cover, the only objects event
/// cleanup may delete.
pub fn is_media_key(key: &str) -> bool {
    let under_prefix = [TRACKS_PREFIX, COVERS_PREFIX]
        .iter()
        .any(|prefix| key.len() > prefix.len() && key.starts_with(prefix));
    under_prefix && !key.split('/').any(|segment| segment == ".." || segment == ".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_slug() {
        assert_eq!(to_slug("Hello World"), "hello-world");
        assert_eq!(to_slug("  --Intro__Mix--  "), "intro-mix");
        assert_eq!(to_slug("Track 01"), "track-01");
        assert_eq!(to_slug("Café Noir"), "caf-noir");
        assert_eq!(to_slug(""), "");
    }

    #[test]
    fn test_file_stem_and_extension() {
        assert_eq!(file_stem("sunset.mix.mp3"), "sunset.mix");
        assert_eq!(file_extension("sunset.mix.mp3").as_deref(), Some(".mp3"));
        assert_eq!(file_stem("noext"), "noext");
        assert_eq!(file_extension("noext"), None);
        assert_eq!(file_extension(".mp3"), None);
    }

    #[test]
    fn test_is_mp3_file_name() {
        assert!(is_mp3_file_name("set.mp3"));
        assert!(is_mp3_file_name("SET.MP3"));
        assert!(!is_mp3_file_name("set.wav"));
        assert!(!is_mp3_file_name("mp3"));
    }

    #[test]
    fn test_resolve_track_name() {
        assert_eq!(resolve_track_name(Some(" Intro "), "file.mp3"), "Intro");
        assert_eq!(resolve_track_name(Some("  "), "file.mp3"), "file");
        assert_eq!(resolve_track_name(None, ""), UNTITLED_TRACK_NAME);
    }

    #[test]
    fn test_uploaded_track_key() {
        assert_eq!(
            uploaded_track_key("abc", "Deep Dive", "raw.MP3"),
            "tracks/abc-deep-dive.MP3"
        );
        assert_eq!(uploaded_track_key("abc", "!!!", "noext"), "tracks/abc-abc.mp3");
    }

    #[test]
    fn test_presigned_track_key() {
        assert_eq!(
            presigned_track_key("abc", "My Set.mp3"),
            "tracks/abc-my-set.mp3"
        );
        assert_eq!(presigned_track_key("abc", "???"), "tracks/abc-track.mp3");
    }

    #[test]
    fn test_cover_object_key() {
        assert_eq!(
            cover_object_key("abc", "Night Flyer.PNG", "image/png"),
            "covers/abc-night-flyer.PNG"
        );
        assert_eq!(cover_object_key("abc", "", "image/jpeg"), "covers/abc-cover.jpg");
        assert_eq!(cover_object_key("abc", "blob", "image/x-unknown"), "covers/abc-blob");
    }

    #[test]
    fn test_image_content_types() {
        assert!(is_image_content_type("image/png"));
        assert!(is_image_content_type(" Image/JPEG; q=1"));
        assert!(!is_image_content_type("audio/mpeg"));
        assert_eq!(image_content_type_for("a.JPG"), Some("image/jpeg"));
        assert_eq!(image_content_type_for("a.mp3"), None);
        assert_eq!(image_content_type_for("noext"), None);
    }

    #[test]
    fn test_is_media_key() {
        assert!(is_media_key("tracks/abc-intro.mp3"));
        assert!(is_media_key("covers/abc-cover.png"));
        assert!(!is_media_key("tracks/"));
        assert!(!is_media_key("json/events.json"));
        assert!(!is_media_key("tracks/../json/events.json"));
        assert!(!is_media_key("mixes/tracks/a.mp3"));
    }
}
