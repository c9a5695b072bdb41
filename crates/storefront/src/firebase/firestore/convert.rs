//! Conversions between Firestore documents and domain types.
//!
//! Field names match what the original web client wrote (`cookingTime`,
//! `imageURLs`, ...) so the server reads and writes the same documents.

use std::collections::BTreeMap;

use rust_decimal::prelude::ToPrimitive;

use samsa_market_core::{Nation, NewRecipe, Price, Recipe, RecipeId};

use super::Document;
use super::value::Value;
use crate::firebase::FirebaseError;

/// Decode a recipe document.
///
/// Tolerant of the shapes earlier client revisions wrote: missing
/// ingredients/images decode as empty, a missing price as zero, numbers as
/// either integer or double fields. A price outside the catalog range is
/// treated as corruption rather than silently clamped.
///
/// # Errors
///
/// Returns [`FirebaseError::Decode`] when the price field cannot be read as
/// a valid price.
pub fn recipe_from_document(doc: &Document) -> Result<Recipe, FirebaseError> {
    let fields = &doc.fields;

    let title = str_field(fields, "title");
    let method = str_field(fields, "method");
    let nation = Nation::from(str_field(fields, "nation"));

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let cooking_time = fields
        .get("cookingTime")
        .and_then(Value::as_f64)
        .map_or(0, |minutes| minutes.max(0.0) as u32);

    let ingredients = string_list(fields, "ingredients");
    let image_urls = string_list(fields, "imageURLs");

    let price = match fields.get("price").and_then(Value::as_f64) {
        Some(amount) => Price::from_f64(amount).map_err(|e| {
            FirebaseError::Decode(format!("recipe {}: bad price: {e}", doc.doc_id()))
        })?,
        None => Price::ZERO,
    };

    Ok(Recipe {
        id: RecipeId::new(doc.doc_id()),
        title,
        cooking_time,
        ingredients,
        image_urls,
        method,
        nation,
        price,
    })
}

/// Encode a validated listing as document fields.
#[must_use]
pub fn new_recipe_fields(recipe: &NewRecipe) -> BTreeMap<String, Value> {
    let mut fields = BTreeMap::new();
    fields.insert("title".to_owned(), Value::string(&recipe.title));
    fields.insert(
        "cookingTime".to_owned(),
        Value::integer(i64::from(recipe.cooking_time)),
    );
    fields.insert(
        "ingredients".to_owned(),
        Value::array(recipe.ingredients.iter().map(Value::string).collect()),
    );
    fields.insert(
        "imageURLs".to_owned(),
        Value::array(recipe.image_urls.iter().map(Value::string).collect()),
    );
    fields.insert("method".to_owned(), Value::string(&recipe.method));
    fields.insert("nation".to_owned(), Value::string(recipe.nation.as_str()));
    fields.insert(
        "price".to_owned(),
        Value::double(recipe.price.amount().to_f64().unwrap_or_default()),
    );
    fields
}

/// Build a cart entry: the recipe snapshot plus a `count`.
///
/// The snapshot mirrors what the catalog page stored under the entry's key,
/// so carts written by either client decode the same way.
#[must_use]
pub fn cart_entry_value(recipe: &Recipe, count: u32) -> Value {
    let mut fields = BTreeMap::new();
    fields.insert("id".to_owned(), Value::string(recipe.id.as_str()));
    fields.insert("title".to_owned(), Value::string(&recipe.title));
    fields.insert(
        "cookingTime".to_owned(),
        Value::integer(i64::from(recipe.cooking_time)),
    );
    fields.insert(
        "ingredients".to_owned(),
        Value::array(recipe.ingredients.iter().map(Value::string).collect()),
    );
    fields.insert(
        "imageURLs".to_owned(),
        Value::array(recipe.image_urls.iter().map(Value::string).collect()),
    );
    fields.insert("method".to_owned(), Value::string(&recipe.method));
    fields.insert("nation".to_owned(), Value::string(recipe.nation.as_str()));
    fields.insert(
        "price".to_owned(),
        Value::double(recipe.price.amount().to_f64().unwrap_or_default()),
    );
    fields.insert("count".to_owned(), Value::integer(i64::from(count)));
    Value::map(fields)
}

/// Rewrite an existing cart entry with a new count, preserving its snapshot.
///
/// Entries written without a surrounding map (or with a non-map shape) are
/// rebuilt as a bare `{count}` map rather than dropped.
#[must_use]
pub fn entry_with_count(entry: &Value, count: u32) -> Value {
    let mut fields = entry.as_map().cloned().unwrap_or_default();
    fields.insert("count".to_owned(), Value::integer(i64::from(count)));
    Value::map(fields)
}

/// The count carried by a cart entry, defaulting to 1 when absent.
#[must_use]
pub fn entry_count(entry: &Value) -> u32 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    entry
        .as_map()
        .and_then(|fields| fields.get("count"))
        .and_then(Value::as_f64)
        .map_or(1, |count| count.max(0.0) as u32)
}

/// Translate a cart document into `(recipe id, count)` entries.
#[must_use]
pub fn cart_entries_from_document(doc: &Document) -> Vec<(RecipeId, u32)> {
    doc.fields
        .iter()
        .map(|(key, entry)| (RecipeId::new(key.as_str()), entry_count(entry)))
        .collect()
}

fn str_field(fields: &BTreeMap<String, Value>, key: &str) -> String {
    fields
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}

fn string_list(fields: &BTreeMap<String, Value>, key: &str) -> Vec<String> {
    fields
        .get(key)
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}
