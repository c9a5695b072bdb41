//! Catalog aggregations for the analytics charts.
//!
//! Pure grouping and sorting over the fetched recipe collection; the client
//! draws the charts.

use std::collections::BTreeMap;

use serde::Serialize;

use samsa_market_core::Recipe;

/// One slice of the nation distribution pie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NationCount {
    pub nation: String,
    pub count: usize,
}

/// One bar of the cooking time chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CookingTimePoint {
    pub title: String,
    pub cooking_time: u32,
}

/// Recipe count per nation, largest slice first (ties alphabetical).
#[must_use]
pub fn nation_distribution(recipes: &[Recipe]) -> Vec<NationCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for recipe in recipes {
        *counts.entry(recipe.nation.as_str()).or_insert(0) += 1;
    }

    let mut distribution: Vec<NationCount> = counts
        .into_iter()
        .map(|(nation, count)| NationCount {
            nation: nation.to_owned(),
            count,
        })
        .collect();
    distribution.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.nation.cmp(&b.nation)));
    distribution
}

/// `(title, cooking time)` pairs, quickest recipe first (ties alphabetical).
#[must_use]
pub fn cooking_time_series(recipes: &[Recipe]) -> Vec<CookingTimePoint> {
    let mut series: Vec<CookingTimePoint> = recipes
        .iter()
        .map(|recipe| CookingTimePoint {
            title: recipe.title.clone(),
            cooking_time: recipe.cooking_time,
        })
        .collect();
    series.sort_by(|a, b| {
        a.cooking_time
            .cmp(&b.cooking_time)
            .then_with(|| a.title.cmp(&b.title))
    });
    series
}
