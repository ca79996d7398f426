//! Category DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::CategoryId;
use domain_catalog::Category;

#[derive(Debug, Deserialize, Validate)]
pub struct CategoryRequest {
    pub id: Option<CategoryId>,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

impl CategoryRequest {
    pub fn into_category(self, id: CategoryId) -> Category {
        Category { id, name: self.name }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: CategoryId,
    pub name: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
        }
    }
}
