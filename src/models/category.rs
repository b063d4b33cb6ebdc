//! Master category, category and sub-category models
//!
//! Categories form a three-level hierarchy. A master category stores only a
//! name; its cash-flow direction is derived from that name.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, MasterCategoryId, SubCategoryId};

/// Top-level grouping of categories (e.g., "Essential Expenses")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MasterCategory {
    pub id: MasterCategoryId,
    pub name: String,
}

impl MasterCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: MasterCategoryId::new(),
            name: name.into(),
        }
    }
}

impl fmt::Display for MasterCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A category within a master category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub master_category_id: MasterCategoryId,
    #[serde(default)]
    pub archived: bool,
    /// Set when this category was merged into another one
    #[serde(default)]
    pub merged_into_id: Option<CategoryId>,
}

impl Category {
    pub fn new(name: impl Into<String>, master_category_id: MasterCategoryId) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            master_category_id,
            archived: false,
            merged_into_id: None,
        }
    }

    /// Selectable in pickers: not archived and not merged away
    pub fn is_active(&self) -> bool {
        !self.archived && self.merged_into_id.is_none()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A finer-grained category under a category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubCategory {
    pub id: SubCategoryId,
    pub name: String,
    pub category_id: CategoryId,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub merged_into_id: Option<SubCategoryId>,
}

impl SubCategory {
    pub fn new(name: impl Into<String>, category_id: CategoryId) -> Self {
        Self {
            id: SubCategoryId::new(),
            name: name.into(),
            category_id,
            archived: false,
            merged_into_id: None,
        }
    }

    pub fn is_active(&self) -> bool {
        !self.archived && self.merged_into_id.is_none()
    }
}

impl fmt::Display for SubCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
