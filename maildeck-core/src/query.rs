//! The filter & sort engine: narrows and orders a catalog snapshot into the
//! view one request sees.

use chrono::NaiveDate;
use maildeck_model::{ArtifactItem, Catalog, FilterCriteria, SortKey};

/// Apply `criteria` and an optional explicit ordering to a snapshot.
///
/// Predicates run in a fixed order: project, client-only, status, then the
/// search refinement. Without an explicit sort key the catalog's default
/// ordering stands.
pub fn apply(
    catalog: &Catalog,
    criteria: &FilterCriteria,
    sort: Option<SortKey>,
) -> Vec<ArtifactItem> {
    let mut items: Vec<ArtifactItem> = catalog
        .iter()
        .filter(|item| matches(item, criteria))
        .cloned()
        .collect();
    if let Some(key) = sort {
        sort_items(&mut items, key);
    }
    items
}

fn matches(item: &ArtifactItem, criteria: &FilterCriteria) -> bool {
    if !criteria.project.matches(item.effective_project()) {
        return false;
    }
    // Absent metadata implies can_show_client=false.
    if criteria.client_only && !item.client_visible() {
        return false;
    }
    if !criteria.status.matches(item.effective_status()) {
        return false;
    }
    search_matches(item, &criteria.search_text)
}

/// Case-insensitive substring match over slug, title, and project. Empty
/// search text matches everything.
fn search_matches(item: &ArtifactItem, search_text: &str) -> bool {
    let query = search_text.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    item.slug.as_str().to_lowercase().contains(&query)
        || item.effective_title().to_lowercase().contains(&query)
        || item.effective_project().to_lowercase().contains(&query)
}

fn sort_items(items: &mut [ArtifactItem], key: SortKey) {
    match key {
        SortKey::CreatedDesc => items.sort_by(|a, b| {
            created(b)
                .cmp(&created(a))
                .then_with(|| a.slug.as_str().cmp(b.slug.as_str()))
        }),
        SortKey::CreatedAsc => items.sort_by(|a, b| {
            created(a)
                .cmp(&created(b))
                .then_with(|| a.slug.as_str().cmp(b.slug.as_str()))
        }),
        SortKey::TitleAsc => items.sort_by(|a, b| {
            a.effective_title()
                .to_lowercase()
                .cmp(&b.effective_title().to_lowercase())
                .then_with(|| a.slug.as_str().cmp(b.slug.as_str()))
        }),
        SortKey::SlugAsc => items.sort_by(|a, b| {
            a.slug
                .as_str()
                .to_lowercase()
                .cmp(&b.slug.as_str().to_lowercase())
                .then_with(|| a.slug.as_str().cmp(b.slug.as_str()))
        }),
    }
}

/// Unparsable or missing dates sort as the oldest possible value, so
/// unmanaged items sink to the bottom of a newest-first listing.
fn created(item: &ArtifactItem) -> NaiveDate {
    item.metadata
        .as_ref()
        .and_then(|m| m.created_date())
        .unwrap_or_default()
}
