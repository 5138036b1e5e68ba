use super::{SmsClient, SmsError};
use crate::domain::{CreateTemplate, Template, require_id};
use crate::transport::{self, Fields};

#[derive(Clone, Copy)]
/// `/templates` endpoints: reusable message bodies with `{{variable}}` placeholders.
pub struct TemplatesResource<'a> {
    client: &'a SmsClient,
}

impl<'a> TemplatesResource<'a> {
    pub(super) fn new(client: &'a SmsClient) -> Self {
        Self { client }
    }

    /// All templates on the account.
    pub async fn list(&self) -> Result<Vec<Template>, SmsError> {
        let body = self.client.get(&["templates"], Vec::new()).await?;
        Ok(transport::decode_templates(&body)?)
    }

    pub async fn get(&self, id: &str) -> Result<Template, SmsError> {
        let id = require_id("Template", id)?;
        let body = self.client.get(&["templates", id], Vec::new()).await?;
        Ok(transport::decode_template(Fields::new(&body)))
    }

    /// Create a template from a name and a validated body.
    pub async fn create(&self, request: &CreateTemplate) -> Result<Template, SmsError> {
        let body = self
            .client
            .post(&["templates"], transport::encode_create_template_body(request))
            .await?;
        Ok(transport::decode_template(Fields::new(&body)))
    }

    pub async fn delete(&self, id: &str) -> Result<(), SmsError> {
        let id = require_id("Template", id)?;
        self.client.delete(&["templates", id]).await?;
        Ok(())
    }
}
