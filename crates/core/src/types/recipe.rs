//! Recipe catalog entry and listing validation.

use serde::{Deserialize, Serialize};
use url::Url;

use super::id::RecipeId;
use super::nation::Nation;
use super::price::{Price, PriceError};

/// Maximum number of image URLs a listing may carry.
pub const MAX_IMAGE_URLS: usize = 4;

/// Errors that can occur when validating a [`RecipeDraft`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RecipeError {
    /// The title is empty or whitespace.
    #[error("title cannot be empty")]
    EmptyTitle,
    /// The cooking time is zero.
    #[error("cooking time must be at least one minute")]
    ZeroCookingTime,
    /// Too many image URLs.
    #[error("a listing may carry at most {MAX_IMAGE_URLS} images")]
    TooManyImages,
    /// An image URL failed to parse.
    #[error("invalid image URL: {0}")]
    InvalidImageUrl(String),
    /// The price is out of range.
    #[error(transparent)]
    Price(#[from] PriceError),
}

/// A recipe document from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// Backend-assigned document id.
    pub id: RecipeId,
    pub title: String,
    /// Preparation time in minutes.
    pub cooking_time: u32,
    /// Ordered ingredient list.
    pub ingredients: Vec<String>,
    /// Up to four image URLs.
    pub image_urls: Vec<String>,
    /// Free-text preparation method.
    pub method: String,
    pub nation: Nation,
    pub price: Price,
}

/// Raw listing input, as submitted by the add-listing form.
///
/// Validated into a [`NewRecipe`] before anything is written.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipeDraft {
    pub title: String,
    pub cooking_time: u32,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub method: String,
    pub nation: String,
    pub price: f64,
}

/// A validated listing, ready to be written to the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecipe {
    pub title: String,
    pub cooking_time: u32,
    pub ingredients: Vec<String>,
    pub image_urls: Vec<String>,
    pub method: String,
    pub nation: Nation,
    pub price: Price,
}

impl RecipeDraft {
    /// Validate the draft into a [`NewRecipe`].
    ///
    /// Trims the title, drops blank ingredient entries, and requires every
    /// image URL to parse. The image limit and price bounds match what the
    /// form enforces client-side; the server re-checks because documents can
    /// also arrive through the CLI seeder.
    ///
    /// # Errors
    ///
    /// Returns the first [`RecipeError`] encountered.
    pub fn validate(self) -> Result<NewRecipe, RecipeError> {
        let title = self.title.trim().to_owned();
        if title.is_empty() {
            return Err(RecipeError::EmptyTitle);
        }

        if self.cooking_time == 0 {
            return Err(RecipeError::ZeroCookingTime);
        }

        if self.image_urls.len() > MAX_IMAGE_URLS {
            return Err(RecipeError::TooManyImages);
        }
        for url in &self.image_urls {
            Url::parse(url).map_err(|_| RecipeError::InvalidImageUrl(url.clone()))?;
        }

        let ingredients: Vec<String> = self
            .ingredients
            .into_iter()
            .map(|i| i.trim().to_owned())
            .filter(|i| !i.is_empty())
            .collect();

        let price = Price::from_f64(self.price)?;

        Ok(NewRecipe {
            title,
            cooking_time: self.cooking_time,
            ingredients,
            image_urls: self.image_urls,
            method: self.method,
            nation: Nation::from(self.nation),
            price,
        })
    }
}

impl NewRecipe {
    /// Attach the backend-assigned id, producing a full [`Recipe`].
    #[must_use]
    pub fn with_id(self, id: RecipeId) -> Recipe {
        Recipe {
            id,
            title: self.title,
            cooking_time: self.cooking_time,
            ingredients: self.ingredients,
            image_urls: self.image_urls,
            method: self.method,
            nation: self.nation,
            price: self.price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> RecipeDraft {
        RecipeDraft {
            title: "Lagman".to_owned(),
            cooking_time: 45,
            ingredients: vec!["noodles".to_owned(), "beef".to_owned()],
            image_urls: vec!["https://example.com/lagman.jpg".to_owned()],
            method: "Pull the noodles, simmer the sauce.".to_owned(),
            nation: "Uyghur".to_owned(),
            price: 12.5,
        }
    }

    #[test]
    fn test_valid_draft() {
        let recipe = draft().validate().expect("valid draft");
        assert_eq!(recipe.title, "Lagman");
        assert_eq!(recipe.nation, Nation::Uyghur);
        assert_eq!(recipe.price.to_string(), "$12.50");
    }

    #[test]
    fn test_empty_title_rejected() {
        let mut d = draft();
        d.title = "   ".to_owned();
        assert_eq!(d.validate(), Err(RecipeError::EmptyTitle));
    }

    #[test]
    fn test_zero_cooking_time_rejected() {
        let mut d = draft();
        d.cooking_time = 0;
        assert_eq!(d.validate(), Err(RecipeError::ZeroCookingTime));
    }

    #[test]
    fn test_image_limit() {
        let mut d = draft();
        d.image_urls = (0..5)
            .map(|i| format!("https://example.com/{i}.jpg"))
            .collect();
        assert_eq!(d.validate(), Err(RecipeError::TooManyImages));

        let mut d = draft();
        d.image_urls = (0..4)
            .map(|i| format!("https://example.com/{i}.jpg"))
            .collect();
        assert!(d.validate().is_ok());
    }

    #[test]
    fn test_invalid_image_url_rejected() {
        let mut d = draft();
        d.image_urls = vec!["not a url".to_owned()];
        assert!(matches!(d.validate(), Err(RecipeError::InvalidImageUrl(_))));
    }

    #[test]
    fn test_blank_ingredients_dropped() {
        let mut d = draft();
        d.ingredients = vec!["  ".to_owned(), "salt".to_owned(), String::new()];
        let recipe = d.validate().expect("valid draft");
        assert_eq!(recipe.ingredients, vec!["salt".to_owned()]);
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut d = draft();
        d.price = -0.01;
        assert!(matches!(d.validate(), Err(RecipeError::Price(_))));
    }
}
