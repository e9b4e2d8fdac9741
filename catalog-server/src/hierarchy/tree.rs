//! Nested tree assembly (read path)

use std::collections::HashMap;

use shared::models::{Category, CategorySummary, TreeNode};

/// An item that knows its own id and its parent's id
pub trait TreeItem {
    fn node_id(&self) -> &str;
    fn parent_id(&self) -> Option<&str>;
}

impl TreeItem for Category {
    fn node_id(&self) -> &str {
        &self.id
    }

    fn parent_id(&self) -> Option<&str> {
        self.parent_category.as_deref()
    }
}

impl TreeItem for CategorySummary {
    fn node_id(&self) -> &str {
        &self.category.id
    }

    fn parent_id(&self) -> Option<&str> {
        self.category.parent_category.as_deref()
    }
}

/// Build a forest from a flat list
///
/// Roots are the items whose parent equals `root_parent` (`None` = top level).
/// One group-by-parent pass indexes the list, an explicit stack walks it in
/// pre-order, and nodes are assembled bottom-up, so depth never touches the
/// call stack. Sibling order follows input order. Items whose parent chain
/// never reaches `root_parent` within the list are left out.
pub fn build_tree<T: TreeItem>(items: Vec<T>, root_parent: Option<&str>) -> Vec<TreeNode<T>> {
    let (roots, kids) = {
        let mut by_parent: HashMap<Option<&str>, Vec<usize>> = HashMap::new();
        for (idx, item) in items.iter().enumerate() {
            by_parent.entry(item.parent_id()).or_default().push(idx);
        }
        let kids: Vec<Vec<usize>> = items
            .iter()
            .map(|item| {
                by_parent
                    .get(&Some(item.node_id()))
                    .cloned()
                    .unwrap_or_default()
            })
            .collect();
        let roots = by_parent.remove(&root_parent).unwrap_or_default();
        (roots, kids)
    };

    // pre-order over everything reachable from the roots
    let mut order = Vec::with_capacity(items.len());
    let mut visited = vec![false; items.len()];
    let mut stack: Vec<usize> = roots.iter().rev().copied().collect();
    while let Some(idx) = stack.pop() {
        if std::mem::replace(&mut visited[idx], true) {
            continue;
        }
        order.push(idx);
        stack.extend(kids[idx].iter().rev().copied());
    }

    // children always follow their parent in pre-order, so reverse order
    // sees every child built before its parent
    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    let mut built: Vec<Option<TreeNode<T>>> = (0..slots.len()).map(|_| None).collect();
    for &idx in order.iter().rev() {
        let Some(item) = slots[idx].take() else {
            continue;
        };
        let children = kids[idx].iter().filter_map(|&k| built[k].take()).collect();
        built[idx] = Some(TreeNode { item, children });
    }

    roots.into_iter().filter_map(|idx| built[idx].take()).collect()
}
