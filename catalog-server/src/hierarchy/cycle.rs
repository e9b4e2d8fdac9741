//! Cycle detection for category re-parenting

use std::collections::HashSet;

use shared::models::Category;

use crate::store::{Collection, StoreResult};

/// Whether making `proposed_parent` the parent of `node_id` would close a loop
///
/// Walks the ancestor chain upward from the proposed parent, one lookup per
/// hop. A `None` parent (move to root) never creates a cycle. A chain that
/// revisits an id without meeting `node_id` is already looped in storage and
/// is reported as a cycle as well.
pub async fn would_create_cycle(
    categories: &dyn Collection<Category>,
    node_id: &str,
    proposed_parent: Option<&str>,
) -> StoreResult<bool> {
    let Some(parent_id) = proposed_parent else {
        return Ok(false);
    };
    if parent_id == node_id {
        return Ok(true);
    }

    let mut seen: HashSet<String> = HashSet::new();
    let mut cursor = Some(parent_id.to_string());

    while let Some(current_id) = cursor {
        if current_id == node_id {
            return Ok(true);
        }
        if !seen.insert(current_id.clone()) {
            tracing::warn!(category_id = %current_id, "Existing parent chain loops back on itself");
            return Ok(true);
        }
        cursor = categories
            .find_by_id(&current_id)
            .await?
            .and_then(|c| c.parent_category);
    }

    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryCollection;
    use chrono::Utc;
    use shared::models::Status;

    fn category(id: &str, parent: Option<&str>) -> Category {
        Category {
            id: id.into(),
            name: id.to_uppercase(),
            description: String::new(),
            image: String::new(),
            parent_category: parent.map(Into::into),
            status: Status::Active,
            created_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    /// a → b → c (c is the deepest)
    async fn chain() -> MemoryCollection<Category> {
        let coll = MemoryCollection::new();
        coll.create(category("a", None)).await.unwrap();
        coll.create(category("b", Some("a"))).await.unwrap();
        coll.create(category("c", Some("b"))).await.unwrap();
        coll
    }

    #[tokio::test]
    async fn test_self_parent_is_cycle() {
        let coll = chain().await;
        assert!(would_create_cycle(&coll, "b", Some("b")).await.unwrap());
    }

    #[tokio::test]
    async fn test_descendant_as_parent_is_cycle() {
        let coll = chain().await;
        assert!(would_create_cycle(&coll, "a", Some("c")).await.unwrap());
        assert!(would_create_cycle(&coll, "b", Some("c")).await.unwrap());
    }

    #[tokio::test]
    async fn test_unrelated_parent_is_fine() {
        let coll = chain().await;
        coll.create(category("x", None)).await.unwrap();
        assert!(!would_create_cycle(&coll, "b", Some("x")).await.unwrap());
        // moving a leaf under an ancestor is not a cycle
        assert!(!would_create_cycle(&coll, "c", Some("a")).await.unwrap());
    }

    #[tokio::test]
    async fn test_root_assignment_is_never_cycle() {
        let coll = chain().await;
        assert!(!would_create_cycle(&coll, "c", None).await.unwrap());
    }

    #[tokio::test]
    async fn test_dangling_chain_terminates() {
        let coll = MemoryCollection::new();
        coll.create(category("a", Some("ghost"))).await.unwrap();
        coll.create(category("n", None)).await.unwrap();
        assert!(!would_create_cycle(&coll, "n", Some("a")).await.unwrap());
    }

    #[tokio::test]
    async fn test_pre_existing_loop_is_reported() {
        let coll = MemoryCollection::new();
        coll.create(category("p", Some("q"))).await.unwrap();
        coll.create(category("q", Some("p"))).await.unwrap();
        coll.create(category("n", None)).await.unwrap();
        assert!(would_create_cycle(&coll, "n", Some("p")).await.unwrap());
    }
}
