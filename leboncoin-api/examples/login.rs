use leboncoin_api::{ApiError, Client, Request};

#[tokio::main]
pub async fn main() -> Result<(), ApiError> {
    let client = Client::new("http://localhost:8080/api")?;

    let req = Request::auth().login("jane@example.com", "secret-password");

    let session = client.send(req).await?;
    println!("Logged in as {}", session.user.email);
    Ok(())
}
