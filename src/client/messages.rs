use std::collections::VecDeque;

use futures::Stream;
use serde_json::{Map, Value};

use super::{SmsClient, SmsError};
use crate::domain::{
    BatchResult, ListMessages, ListOptions, Message, MessageList, Page, ScheduleMessage,
    ScheduledMessage, ScheduledMessageList, SendBatch, SendMessage, require_id,
};
use crate::transport::{
    self, Fields, decode_batch, decode_message, decode_scheduled_message,
};

#[derive(Clone, Copy)]
/// `/messages` endpoints: single, scheduled, and batch sends.
pub struct MessagesResource<'a> {
    client: &'a SmsClient,
}

impl<'a> MessagesResource<'a> {
    pub(super) fn new(client: &'a SmsClient) -> Self {
        Self { client }
    }

    /// Send one SMS.
    pub async fn send(&self, request: &SendMessage) -> Result<Message, SmsError> {
        let body = self
            .client
            .post(&["messages"], transport::encode_send_body(request))
            .await?;
        Ok(decode_message(Fields::new(&body)))
    }

    /// Fetch one page of sent messages, newest first.
    pub async fn list(&self, request: &ListMessages) -> Result<MessageList, SmsError> {
        let body = self
            .client
            .get(&["messages"], transport::encode_list_messages_query(request))
            .await?;
        Ok(transport::decode_page(&body, decode_message)?)
    }

    /// Fetch one message by id.
    pub async fn get(&self, id: &str) -> Result<Message, SmsError> {
        let id = require_id("Message", id)?;
        let body = self.client.get(&["messages", id], Vec::new()).await?;
        Ok(decode_message(Fields::new(&body)))
    }

    /// Lazily walk every message matching `request`, one page per request.
    ///
    /// `request.limit` is the page size and `request.offset` the starting point.
    /// The stream ends after a page reports no further results or comes back
    /// shorter than the page size. It ends early on the first error.
    pub fn each(self, request: ListMessages) -> impl Stream<Item = Result<Message, SmsError>> + 'a {
        let cursor = Cursor {
            request,
            buffer: VecDeque::new(),
            exhausted: false,
        };

        futures::stream::try_unfold(cursor, move |cursor| cursor.advance(self))
    }

    /// Queue a message for later delivery. Credits are reserved up front.
    pub async fn schedule(&self, request: &ScheduleMessage) -> Result<ScheduledMessage, SmsError> {
        let body = self
            .client
            .post(
                &["messages", "schedule"],
                transport::encode_schedule_body(request),
            )
            .await?;
        Ok(decode_scheduled_message(Fields::new(&body)))
    }

    pub async fn list_scheduled(
        &self,
        options: &ListOptions,
    ) -> Result<ScheduledMessageList, SmsError> {
        let body = self
            .client
            .get(
                &["messages", "scheduled"],
                transport::encode_list_query(options),
            )
            .await?;
        Ok(transport::decode_page(&body, decode_scheduled_message)?)
    }

    /// Fetch one scheduled message by id.
    pub async fn get_scheduled(&self, id: &str) -> Result<ScheduledMessage, SmsError> {
        let id = require_id("Scheduled message", id)?;
        let body = self
            .client
            .get(&["messages", "scheduled", id], Vec::new())
            .await?;
        Ok(decode_scheduled_message(Fields::new(&body)))
    }

    /// Cancel a pending scheduled message. Returns the raw server acknowledgement,
    /// which includes the refunded credit amount.
    pub async fn cancel_scheduled(&self, id: &str) -> Result<Map<String, Value>, SmsError> {
        let id = require_id("Scheduled message", id)?;
        self.client.delete(&["messages", "scheduled", id]).await
    }

    /// Send many messages in one request. Entries were validated when `request` was built.
    pub async fn send_batch(&self, request: &SendBatch) -> Result<BatchResult, SmsError> {
        let body = self
            .client
            .post(&["messages", "batch"], transport::encode_batch_body(request))
            .await?;
        Ok(decode_batch(Fields::new(&body)))
    }

    /// Fetch a batch with its per-message results.
    pub async fn get_batch(&self, id: &str) -> Result<BatchResult, SmsError> {
        let id = require_id("Batch", id)?;
        let body = self
            .client
            .get(&["messages", "batch", id], Vec::new())
            .await?;
        Ok(decode_batch(Fields::new(&body)))
    }

    /// One page of batches.
    pub async fn list_batches(&self, options: &ListOptions) -> Result<Page<BatchResult>, SmsError> {
        let body = self
            .client
            .get(&["messages", "batches"], transport::encode_list_query(options))
            .await?;
        Ok(transport::decode_page(&body, decode_batch)?)
    }
}

struct Cursor {
    request: ListMessages,
    buffer: VecDeque<Message>,
    exhausted: bool,
}

impl Cursor {
    async fn advance(
        mut self,
        resource: MessagesResource<'_>,
    ) -> Result<Option<(Message, Self)>, SmsError> {
        loop {
            if let Some(message) = self.buffer.pop_front() {
                return Ok(Some((message, self)));
            }
            if self.exhausted {
                return Ok(None);
            }

            let page_size = self.request.limit.value();
            let page = resource.list(&self.request).await?;
            self.exhausted = !page.has_more || page.len() < page_size as usize;
            self.request.offset = self.request.offset.saturating_add(page_size);
            self.buffer.extend(page.data);
        }
    }
}
