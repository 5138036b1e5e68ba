use std::io::{self, Read};

use smsgate::webhook;

/// Reads a raw webhook body from stdin and checks it against the signature in
/// `SMSGATE_SIGNATURE`.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let secret = std::env::var("SMSGATE_WEBHOOK_SECRET").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "SMSGATE_WEBHOOK_SECRET environment variable is required",
        )
    })?;
    let mut payload = Vec::new();
    io::stdin().read_to_end(&mut payload)?;

    let signature = match std::env::var("SMSGATE_SIGNATURE") {
        Ok(signature) => signature,
        Err(_) => {
            let signature = webhook::generate_signature(&payload, &secret);
            println!("{}: {signature}", webhook::SIGNATURE_HEADER);
            signature
        }
    };

    let event = webhook::parse_event(&payload, &signature, &secret)?;
    println!(
        "{} {} message={} status={}",
        event.id, event.event_type, event.data.message_id, event.data.status
    );

    Ok(())
}
