use std::io;

use smsgate::{MessageText, MessageType, PhoneNumber, SendMessage, SendOptions, SmsClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let api_key = std::env::var("SMSGATE_API_KEY").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "SMSGATE_API_KEY environment variable is required",
        )
    })?;
    let phone_raw = std::env::var("SMSGATE_PHONE").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "SMSGATE_PHONE environment variable is required",
        )
    })?;
    let message = std::env::var("SMSGATE_MESSAGE")
        .unwrap_or_else(|_| "Hello from the smsgate demo.".to_owned());

    let client = SmsClient::new(api_key)?;
    let options = SendOptions {
        message_type: Some(MessageType::Transactional),
        ..SendOptions::default()
    };
    let request = SendMessage::new(
        PhoneNumber::new(phone_raw)?,
        MessageText::new(message)?,
        options,
    );

    let sent = client.messages().send(&request).await?;
    println!(
        "id: {}, status: {}, segments: {}, credits: {}",
        sent.id, sent.status, sent.segments, sent.credits_used
    );

    Ok(())
}
