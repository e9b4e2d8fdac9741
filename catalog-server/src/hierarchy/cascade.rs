//! Downward status propagation

use std::collections::HashSet;

use shared::models::{Category, Status};

use crate::store::{CategoryFilter, Collection, FindOptions, StoreResult};

/// Collect the ids of every transitive descendant of `root_id`
///
/// Worklist traversal: each discovered node costs one "direct children"
/// query. `root_id` itself is not included. Ids already seen are skipped, so
/// a looped chain in storage cannot spin forever.
pub async fn collect_descendant_ids(
    categories: &dyn Collection<Category>,
    root_id: &str,
) -> StoreResult<Vec<String>> {
    let mut descendants = Vec::new();
    let mut seen: HashSet<String> = HashSet::from([root_id.to_string()]);
    let mut worklist = vec![root_id.to_string()];

    while let Some(current) = worklist.pop() {
        let children = categories
            .find(&CategoryFilter::children_of(&current), FindOptions::default())
            .await?;

        for child in children {
            if seen.insert(child.id.clone()) {
                descendants.push(child.id.clone());
                worklist.push(child.id);
            }
        }
    }

    Ok(descendants)
}

/// Force every descendant of `root_id` to `Inactive` in one bulk update
///
/// Returns the number of descendants found. The caller is responsible for
/// the precondition (the root is transitioning into `Inactive` from another
/// state); the root document itself is not touched here.
pub async fn cascade_inactive(
    categories: &dyn Collection<Category>,
    root_id: &str,
) -> StoreResult<u64> {
    let ids = collect_descendant_ids(categories, root_id).await?;
    if ids.is_empty() {
        return Ok(0);
    }

    let now = chrono::Utc::now();
    let touched = categories
        .update_many(&CategoryFilter::ids(ids), &move |c: &mut Category| {
            c.status = Status::Inactive;
            c.updated_at = now;
        })
        .await?;

    tracing::info!(category_id = %root_id, descendants = touched, "Cascaded Inactive status");
    Ok(touched)
}
