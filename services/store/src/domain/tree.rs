use std::collections::{HashMap, HashSet};

use crate::domain::types::{Category, CategoryNode};

/// Assemble a flat category list into a forest keyed by `parent_id`.
///
/// Siblings are ordered by `order`, then `id`. Every category appears exactly
/// once: rows whose parent is missing become roots, and rows caught in a
/// parent cycle are surfaced at the top level.
pub fn build_tree(mut categories: Vec<Category>) -> Vec<CategoryNode> {
    categories.sort_by_key(|c| (c.order, c.id));
    let ids: HashSet<i32> = categories.iter().map(|c| c.id).collect();

    let mut children: HashMap<i32, Vec<Category>> = HashMap::new();
    let mut roots = Vec::new();
    for category in categories {
        match category.parent_id {
            Some(parent_id) if parent_id != category.id && ids.contains(&parent_id) => {
                children.entry(parent_id).or_default().push(category);
            }
            _ => roots.push(category),
        }
    }

    let mut forest: Vec<CategoryNode> = roots
        .into_iter()
        .map(|c| attach(c, &mut children))
        .collect();

    // Anything left is only reachable through a cycle.
    while let Some(parent_id) = children.keys().min().copied() {
        if let Some(stranded) = children.remove(&parent_id) {
            for category in stranded {
                forest.push(attach(category, &mut children));
            }
        }
    }
    forest
}

fn attach(category: Category, children: &mut HashMap<i32, Vec<Category>>) -> CategoryNode {
    let kids = children.remove(&category.id).unwrap_or_default();
    CategoryNode {
        children: kids.into_iter().map(|k| attach(k, children)).collect(),
        category,
    }
}
