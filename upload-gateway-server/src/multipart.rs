use bytes::Bytes;
use futures::stream;

use crate::errors::UploadErr;

pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// The single file part pulled out of an upload request.
#[derive(Debug)]
pub struct UploadedFile {
    pub data: Bytes,
    pub original_name: String,
    pub content_type: String,
}

fn malformed(e: multer::Error) -> UploadErr {
    UploadErr::UploadFailed {
        message: format!("malformed multipart request: {e}"),
    }
}

/// Extracts the part named `file` from a fully buffered multipart body.
///
/// Parts with other names are skipped. A body with no `file` part is
/// `MissingFile`; a body that does not parse as multipart at all surfaces as
/// `UploadFailed`, matching the catch-all behavior callers already handle.
pub async fn extract_file(content_type_header: &str, body: Bytes) -> Result<UploadedFile, UploadErr> {
    let boundary = multer::parse_boundary(content_type_header).map_err(malformed)?;
    let body_stream = stream::once(async move { Ok::<Bytes, std::convert::Infallible>(body) });
    let mut multipart = multer::Multipart::new(body_stream, boundary);

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        if field.name() != Some("file") {
            continue;
        }
        let original_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field
            .content_type()
            .map(|mime| mime.to_string())
            .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string());
        let data = field.bytes().await.map_err(malformed)?;
        return Ok(UploadedFile {
            data,
            original_name,
            content_type,
        });
    }

    Err(UploadErr::MissingFile)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDARY: &str = "------------------------d74496d66958873e";

    fn content_type_header() -> String {
        format!("multipart/form-data; boundary={BOUNDARY}")
    }

    fn file_part_body(filename: &str, content_type: Option<&str>, data: &[u8]) -> Bytes {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n").as_bytes(),
        );
        if let Some(ct) = content_type {
            body.extend_from_slice(format!("Content-Type: {ct}\r\n").as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        Bytes::from(body)
    }

    #[tokio::test]
    async fn test_extracts_file_part() {
        let body = file_part_body("cover.jpg", Some("image/jpeg"), b"jpeg bytes");
        let file = extract_file(&content_type_header(), body).await.unwrap();

        assert_eq!(file.original_name, "cover.jpg");
        assert_eq!(file.content_type, "image/jpeg");
        assert_eq!(&file.data[..], b"jpeg bytes");
    }

    #[tokio::test]
    async fn test_part_without_content_type_falls_back() {
        let body = file_part_body("blob.bin", None, b"raw");
        let file = extract_file(&content_type_header(), body).await.unwrap();
        assert_eq!(file.content_type, FALLBACK_CONTENT_TYPE);
    }

    #[tokio::test]
    async fn test_body_without_file_part_is_missing_file() {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(b"Content-Disposition: form-data; name=\"title\"\r\n\r\n");
        body.extend_from_slice(b"an album name");
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        let err = extract_file(&content_type_header(), Bytes::from(body)).await.unwrap_err();
        assert!(matches!(err, UploadErr::MissingFile));
    }

    #[tokio::test]
    async fn test_non_multipart_content_type_is_upload_failed() {
        let err = extract_file("application/json", Bytes::from_static(b"{}"))
            .await
            .unwrap_err();
        assert!(matches!(err, UploadErr::UploadFailed { .. }));
    }

    #[tokio::test]
    async fn test_file_part_after_other_fields_is_found() {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(b"Content-Disposition: form-data; name=\"title\"\r\n\r\n");
        body.extend_from_slice(b"an album name");
        body.extend_from_slice(format!("\r\n--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(b"Content-Disposition: form-data; name=\"file\"; filename=\"a.mp3\"\r\n");
        body.extend_from_slice(b"Content-Type: audio/mpeg\r\n\r\n");
        body.extend_from_slice(b"mp3 bytes");
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        let file = extract_file(&content_type_header(), Bytes::from(body)).await.unwrap();
        assert_eq!(file.original_name, "a.mp3");
        assert_eq!(&file.data[..], b"mp3 bytes");
    }
}
