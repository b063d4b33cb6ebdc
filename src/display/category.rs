//! Category display formatting

use crate::services::category::MasterNode;

/// Format the category hierarchy as a tree
pub fn format_category_tree(tree: &[MasterNode<'_>]) -> String {
    if tree.is_empty() {
        return "No categories found.".to_string();
    }

    let mut output = String::new();

    for (i, node) in tree.iter().enumerate() {
        output.push_str(&format!("{} [{}]\n", node.master.name, node.flow));

        if node.categories.is_empty() {
            output.push_str("  (no categories)\n");
        }
        for (j, category) in node.categories.iter().enumerate() {
            let is_last = j == node.categories.len() - 1;
            let prefix = if is_last { "└── " } else { "├── " };
            output.push_str(&format!("  {}{}\n", prefix, category.category.name));

            let indent = if is_last { "    " } else { "│   " };
            for (k, sub) in category.sub_categories.iter().enumerate() {
                let sub_prefix = if k == category.sub_categories.len() - 1 {
                    "└── "
                } else {
                    "├── "
                };
                output.push_str(&format!("  {}{}{}\n", indent, sub_prefix, sub.name));
            }
        }

        if i < tree.len() - 1 {
            output.push('\n');
        }
    }

    output
}
