use super::{SmsClient, SmsError};
use crate::domain::{ListOptions, MediaFile, Page, require_id};
use crate::transport::{self, Fields};

#[derive(Clone, Copy)]
/// `/media` endpoints for files attached to MMS messages.
pub struct MediaResource<'a> {
    client: &'a SmsClient,
}

impl<'a> MediaResource<'a> {
    pub(super) fn new(client: &'a SmsClient) -> Self {
        Self { client }
    }

    /// One page of uploaded files.
    pub async fn list(&self, options: &ListOptions) -> Result<Page<MediaFile>, SmsError> {
        let body = self
            .client
            .get(&["media"], transport::encode_list_query(options))
            .await?;
        Ok(transport::decode_page(&body, transport::decode_media_file)?)
    }

    pub async fn get(&self, id: &str) -> Result<MediaFile, SmsError> {
        let id = require_id("Media", id)?;
        let body = self.client.get(&["media", id], Vec::new()).await?;
        Ok(transport::decode_media_file(Fields::new(&body)))
    }

    pub async fn delete(&self, id: &str) -> Result<(), SmsError> {
        let id = require_id("Media", id)?;
        self.client.delete(&["media", id]).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{ScriptedTransport, make_client};
    use super::*;

    #[tokio::test]
    async fn get_media_file() {
        let transport = ScriptedTransport::new().respond(
            200,
            r#"{"id":"media_1","url":"https://cdn.example.com/m.jpg","contentType":"image/jpeg","sizeBytes":1024}"#,
        );
        let client = make_client(transport.clone());

        let media = client.media().get("media_1").await.unwrap();
        assert_eq!(media.content_type.as_deref(), Some("image/jpeg"));
        assert_eq!(media.size_bytes, 1024);
        assert_eq!(transport.last_request().url.path(), "/api/v1/media/media_1");
    }

    #[tokio::test]
    async fn list_media_page() {
        let transport = ScriptedTransport::new()
            .respond(200, r#"{"data":[{"id":"media_1"},{"id":"media_2"}],"total":2}"#);
        let client = make_client(transport);

        let page = client.media().list(&ListOptions::default()).await.unwrap();
        assert_eq!(page.len(), 2);
        assert!(!page.has_more);
    }
}
