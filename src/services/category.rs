//! Category tree
//!
//! The master → category → sub-category hierarchy without amounts, for
//! pickers and listings. Archived and merged entries are left out and every
//! level is sorted alphabetically, ignoring case.

use serde::Serialize;
use std::cmp::Ordering;

use crate::models::{Category, MasterCategory, MasterFlow, SubCategory};
use crate::services::flow::master_flow;

#[derive(Debug, Clone, Serialize)]
pub struct CategoryNode<'a> {
    pub category: &'a Category,
    pub sub_categories: Vec<&'a SubCategory>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MasterNode<'a> {
    pub master: &'a MasterCategory,
    pub flow: MasterFlow,
    pub categories: Vec<CategoryNode<'a>>,
}

/// Build the active category hierarchy
///
/// Masters with no active categories are still listed so that an empty
/// master can be picked as a destination.
pub fn build_category_tree<'a>(
    masters: &'a [MasterCategory],
    categories: &'a [Category],
    sub_categories: &'a [SubCategory],
) -> Vec<MasterNode<'a>> {
    let mut tree: Vec<MasterNode<'a>> = masters
        .iter()
        .map(|master| {
            let mut nodes: Vec<CategoryNode<'a>> = categories
                .iter()
                .filter(|c| c.master_category_id == master.id && c.is_active())
                .map(|category| {
                    let mut subs: Vec<&SubCategory> = sub_categories
                        .iter()
                        .filter(|s| s.category_id == category.id && s.is_active())
                        .collect();
                    subs.sort_by(|a, b| by_name(&a.name, &b.name));
                    CategoryNode {
                        category,
                        sub_categories: subs,
                    }
                })
                .collect();
            nodes.sort_by(|a, b| by_name(&a.category.name, &b.category.name));

            MasterNode {
                master,
                flow: master_flow(&master.name),
                categories: nodes,
            }
        })
        .collect();

    tree.sort_by(|a, b| by_name(&a.master.name, &b.master.name));
    tree
}

fn by_name(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
