//! Verify backend reachability.

use tracing::info;

use samsa_market_storefront::config::StorefrontConfig;
use samsa_market_storefront::firebase::FirestoreClient;

/// Ping Firestore and report the catalog size.
///
/// # Errors
///
/// Returns an error if configuration is missing or the backend is
/// unreachable.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = StorefrontConfig::from_env()?;
    let firestore = FirestoreClient::new(&config.firebase);

    firestore.ping().await?;
    info!(project = %config.firebase.project_id, "Firestore reachable");

    let recipes = firestore.list_recipes().await?;
    info!("Catalog size: {} listings", recipes.len());

    Ok(())
}
