use super::fields::Fields;
use crate::domain::MediaFile;

pub fn decode_media_file(fields: Fields<'_>) -> MediaFile {
    MediaFile {
        id: fields.string(&["id"]),
        url: fields.string(&["url"]),
        content_type: fields.opt_string(&["content_type", "contentType", "mime_type", "mimeType"]),
        filename: fields.opt_string(&["filename", "file_name", "fileName"]),
        size_bytes: fields.u64_or(&["size_bytes", "sizeBytes", "size"], 0),
        created_at: fields.opt_string(&["created_at", "createdAt"]),
    }
}
