use smsgate::SmsClientBuilder;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = SmsClientBuilder::from_env()?.build()?;

    let credits = client.account().credits().await?;
    println!(
        "balance: {}, reserved: {}, available: {}",
        credits.balance, credits.reserved_balance, credits.available_balance
    );
    if !credits.has_credits() {
        println!("account has no available credits");
    }

    Ok(())
}
