//! Seed the recipe catalog from a YAML file.
//!
//! The file is a list of recipe drafts in the same shape the add-listing
//! endpoint accepts. Every draft is validated before anything is written,
//! so a bad file fails fast instead of half-seeding the catalog.
//!
//! ```yaml
//! - title: Plov
//!   cooking_time: 90
//!   ingredients: [rice, carrots, lamb]
//!   image_urls: ["https://example.com/plov.jpg"]
//!   method: Layer and steam.
//!   nation: Uzbek
//!   price: 14.0
//! ```

use std::path::Path;

use tracing::{error, info};

use samsa_market_core::{NewRecipe, RecipeDraft};
use samsa_market_storefront::config::StorefrontConfig;
use samsa_market_storefront::firebase::FirestoreClient;

/// Seed recipes from a YAML file.
///
/// # Arguments
///
/// * `file_path` - Path to the YAML file of recipe drafts
/// * `dry_run` - If true, validate and report without writing
///
/// # Errors
///
/// Returns an error if configuration is missing, the file cannot be read,
/// any draft fails validation, or a write fails.
pub async fn run(file_path: &str, dry_run: bool) -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Verify file exists
    let path = Path::new(file_path);
    if !path.exists() {
        return Err(format!("File not found: {file_path}").into());
    }

    info!(path = %file_path, "Loading recipe drafts from file");

    // Read and validate YAML before touching the backend
    let content = tokio::fs::read_to_string(path).await?;
    let drafts: Vec<RecipeDraft> = serde_yaml::from_str(&content)?;

    info!(drafts = drafts.len(), "Parsed seed file");

    let mut recipes: Vec<NewRecipe> = Vec::with_capacity(drafts.len());
    let mut errors = Vec::new();
    for (index, draft) in drafts.into_iter().enumerate() {
        let title = draft.title.clone();
        match draft.validate() {
            Ok(recipe) => recipes.push(recipe),
            Err(e) => errors.push(format!("entry {index} ({title}): {e}")),
        }
    }

    if !errors.is_empty() {
        error!("Seed file validation failed:");
        for err in &errors {
            error!("  - {err}");
        }
        return Err(format!("{} validation errors found", errors.len()).into());
    }

    info!("Seed file validated successfully");

    if dry_run {
        info!(recipes = recipes.len(), "Dry run; nothing written");
        return Ok(());
    }

    let config = StorefrontConfig::from_env()?;
    let firestore = FirestoreClient::new(&config.firebase);

    let mut created = 0usize;
    for recipe in recipes {
        let title = recipe.title.clone();
        let created_recipe = firestore.create_recipe(recipe).await?;
        info!(id = %created_recipe.id, title = %title, "Created listing");
        created += 1;
    }

    info!("Seeding complete!");
    info!("  Listings created: {created}");

    Ok(())
}
