use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::metadata::{ArtifactMetadata, ArtifactStatus, UNASSIGNED_PROJECT};
use crate::slug::ArtifactSlug;

/// One artifact joined with its metadata record for a single catalog build.
///
/// Items are recomputed on every build and never persisted; only the
/// `metadata` component has a life on disk, owned by the metadata store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactItem {
    pub slug: ArtifactSlug,
    /// Serving path of the rendered HTML, e.g. `/emails/welcome.html`.
    pub asset_path: String,
    /// `None` marks the item as unmanaged: the artifact exists but carries
    /// no readable record. Unmanaged items stay in the catalog.
    pub metadata: Option<ArtifactMetadata>,
}

impl ArtifactItem {
    pub fn is_managed(&self) -> bool {
        self.metadata.is_some()
    }

    pub fn effective_title(&self) -> &str {
        self.metadata
            .as_ref()
            .map(|m| m.title.as_str())
            .unwrap_or_else(|| self.slug.as_str())
    }

    pub fn effective_project(&self) -> &str {
        self.metadata
            .as_ref()
            .map(|m| m.project.as_str())
            .unwrap_or(UNASSIGNED_PROJECT)
    }

    pub fn effective_status(&self) -> ArtifactStatus {
        self.metadata
            .as_ref()
            .map(|m| m.status)
            .unwrap_or(ArtifactStatus::Draft)
    }

    pub fn client_visible(&self) -> bool {
        self.metadata
            .as_ref()
            .map(|m| m.can_show_client)
            .unwrap_or(false)
    }

    pub fn created_at(&self) -> Option<&str> {
        self.metadata.as_ref().map(|m| m.created_at.as_str())
    }
}

/// Immutable, ordered snapshot of every artifact for one build.
///
/// A later metadata write does not mutate an existing snapshot; callers
/// rebuild to observe it.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<ArtifactItem>,
}

impl Catalog {
    /// Assemble a snapshot from unordered items, applying the default
    /// ordering: named projects alphabetically (case-insensitive) with the
    /// unassigned group last, then status precedence, then slug.
    pub fn from_items(mut items: Vec<ArtifactItem>) -> Self {
        items.sort_by(default_order);
        Catalog { items }
    }

    pub fn items(&self) -> &[ArtifactItem] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArtifactItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Distinct named projects present in the snapshot, alphabetical. The
    /// unassigned sentinel is not a name and is not listed.
    pub fn projects(&self) -> Vec<String> {
        let mut projects: Vec<String> = self
            .items
            .iter()
            .map(|item| item.effective_project())
            .filter(|project| *project != UNASSIGNED_PROJECT)
            .map(str::to_string)
            .collect();
        projects.sort_by_key(|p| p.to_lowercase());
        projects.dedup();
        projects
    }
}

fn default_order(a: &ArtifactItem, b: &ArtifactItem) -> Ordering {
    project_group(a.effective_project())
        .cmp(&project_group(b.effective_project()))
        .then_with(|| a.effective_status().cmp(&b.effective_status()))
        .then_with(|| a.slug.as_str().cmp(b.slug.as_str()))
}

// Unassigned sorts after every named project; `true > false`.
fn project_group(project: &str) -> (bool, String) {
    (project == UNASSIGNED_PROJECT, project.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::RawMetadata;

    fn item(slug: &str, project: Option<&str>, status: Option<&str>) -> ArtifactItem {
        let slug = ArtifactSlug::parse(slug).unwrap();
        let metadata = project.zip(status).map(|(project, status)| {
            ArtifactMetadata::normalize(
                &slug,
                &RawMetadata {
                    project: Some(project.into()),
                    status: Some(status.into()),
                    ..RawMetadata::default()
                },
            )
        });
        ArtifactItem {
            asset_path: format!("/emails/{slug}.html"),
            slug,
            metadata,
        }
    }

    #[test]
    fn unmanaged_items_use_defaults() {
        let it = item("welcome", None, None);
        assert!(!it.is_managed());
        assert_eq!(it.effective_title(), "welcome");
        assert_eq!(it.effective_project(), UNASSIGNED_PROJECT);
        assert_eq!(it.effective_status(), ArtifactStatus::Draft);
        assert!(!it.client_visible());
    }

    #[test]
    fn default_order_groups_projects_then_status_then_slug() {
        let catalog = Catalog::from_items(vec![
            item("z-orphan", None, None),
            item("b-sent", Some("acme"), Some("sent")),
            item("a-draft", Some("acme"), Some("draft")),
            item("c-approved", Some("acme"), Some("approved")),
            item("beta-1", Some("Beta"), Some("draft")),
        ]);
        let slugs: Vec<&str> = catalog.iter().map(|i| i.slug.as_str()).collect();
        assert_eq!(
            slugs,
            vec!["a-draft", "c-approved", "b-sent", "beta-1", "z-orphan"]
        );
    }

    #[test]
    fn unassigned_group_sorts_last() {
        let catalog = Catalog::from_items(vec![
            item("orphan", None, None),
            item("zeta", Some("zeta-project"), Some("draft")),
        ]);
        let slugs: Vec<&str> = catalog.iter().map(|i| i.slug.as_str()).collect();
        assert_eq!(slugs, vec!["zeta", "orphan"]);
    }

    #[test]
    fn projects_lists_distinct_names_without_the_sentinel() {
        let catalog = Catalog::from_items(vec![
            item("a", Some("acme"), Some("draft")),
            item("b", Some("acme"), Some("sent")),
            item("c", Some("Beta"), Some("draft")),
            item("d", None, None),
        ]);
        assert_eq!(catalog.projects(), vec!["acme".to_string(), "Beta".to_string()]);
    }
}
