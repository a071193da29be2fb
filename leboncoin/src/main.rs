use anyhow::Result;

use leboncoin::App;
use leboncoin_auth::Settings;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let settings = Settings::new()?;

    // Logging is initialized in App::run()
    App::new(settings).run().await?;

    Ok(())
}
