use futures::TryStreamExt;
use smsgate::{ListMessages, PageLimit, SmsClientBuilder};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = SmsClientBuilder::from_env()?.build()?;
    let request = ListMessages {
        limit: PageLimit::new(50)?,
        status: std::env::var("SMSGATE_STATUS").ok(),
        ..ListMessages::default()
    };

    let stream = client.messages().each(request);
    futures::pin_mut!(stream);
    while let Some(message) = stream.try_next().await? {
        println!("{} {} {}", message.id, message.to, message.status);
    }

    Ok(())
}
