use super::{SmsClient, SmsError};
use crate::domain::{Account, ApiKey, CreateApiKey, CreditTransaction, Credits, ListOptions, Page, require_id};
use crate::transport::{self, Fields};

#[derive(Clone, Copy)]
/// `/account` endpoints: profile, credit balance, ledger, and API keys.
pub struct AccountResource<'a> {
    client: &'a SmsClient,
}

impl<'a> AccountResource<'a> {
    pub(super) fn new(client: &'a SmsClient) -> Self {
        Self { client }
    }

    /// Profile of the account owning the API key.
    pub async fn get(&self) -> Result<Account, SmsError> {
        let body = self.client.get(&["account"], Vec::new()).await?;
        Ok(transport::decode_account(Fields::new(&body)))
    }

    /// Current balance, including credits reserved by scheduled messages.
    pub async fn credits(&self) -> Result<Credits, SmsError> {
        let body = self.client.get(&["account", "credits"], Vec::new()).await?;
        Ok(transport::decode_credits(Fields::new(&body)))
    }

    /// Credit ledger entries, newest first.
    pub async fn transactions(
        &self,
        options: &ListOptions,
    ) -> Result<Page<CreditTransaction>, SmsError> {
        let body = self
            .client
            .get(
                &["account", "transactions"],
                transport::encode_list_query(options),
            )
            .await?;
        Ok(transport::decode_page(&body, transport::decode_transaction)?)
    }

    /// Keys are listed without their secret.
    pub async fn list_api_keys(&self) -> Result<Vec<ApiKey>, SmsError> {
        let body = self.client.get(&["account", "api-keys"], Vec::new()).await?;
        Ok(transport::decode_api_keys(&body)?)
    }

    pub async fn get_api_key(&self, id: &str) -> Result<ApiKey, SmsError> {
        let id = require_id("API key", id)?;
        let body = self
            .client
            .get(&["account", "api-keys", id], Vec::new())
            .await?;
        Ok(transport::decode_api_key(Fields::new(&body)))
    }

    /// Create a key. The returned [`ApiKey::key`] holds the secret and is only
    /// shown once.
    pub async fn create_api_key(&self, request: &CreateApiKey) -> Result<ApiKey, SmsError> {
        let body = self
            .client
            .post(
                &["account", "api-keys"],
                transport::encode_create_api_key_body(request),
            )
            .await?;
        Ok(transport::decode_api_key(Fields::new(&body)))
    }

    /// Revoke a key. Requests made with it fail with [`SmsError::Authentication`] afterwards.
    pub async fn revoke_api_key(&self, id: &str) -> Result<(), SmsError> {
        let id = require_id("API key", id)?;
        self.client.delete(&["account", "api-keys", id]).await?;
        Ok(())
    }
}
