mod keys;
mod requests;

pub use keys::{
    cover_object_key, file_extension, file_stem, image_content_type_for, is_image_content_type,
    is_media_key, is_mp3_file_name, presigned_track_key, resolve_track_name, to_slug,
    track_object_key, uploaded_track_key, COVERS_PREFIX, DEFAULT_AUDIO_CONTENT_TYPE,
    DEFAULT_TRACK_EXTENSION, TRACKS_PREFIX, UNTITLED_TRACK_NAME,
};
pub use requests::{CoverUploadResponse, UploadUrlRequest, UploadUrlResponse};
