use crate::domain::CategorySet;
use crate::errors::LedgerError;

use super::ServiceResult;

/// Add, rename, and remove operations on the category list. None of them
/// touch existing expense entries.
pub struct CategoryService;

impl CategoryService {
    pub fn add(categories: &mut CategorySet, name: &str) -> ServiceResult<()> {
        let name = Self::validate_name(categories, None, name)?;
        categories.push(name);
        Ok(())
    }

    pub fn rename(categories: &mut CategorySet, current: &str, new_name: &str) -> ServiceResult<()> {
        let index = categories
            .position(current)
            .ok_or_else(|| LedgerError::Category(format!("Category `{}` not found", current)))?;
        let name = Self::validate_name(categories, Some(index), new_name)?;
        categories.replace_at(index, name);
        Ok(())
    }

    pub fn remove(categories: &mut CategorySet, name: &str) -> ServiceResult<String> {
        let index = categories
            .position(name)
            .ok_or_else(|| LedgerError::Category(format!("Category `{}` not found", name)))?;
        Ok(categories.remove_at(index))
    }

    pub fn list(categories: &CategorySet) -> Vec<&str> {
        categories.iter().collect()
    }

    fn validate_name(
        categories: &CategorySet,
        exclude: Option<usize>,
        candidate: &str,
    ) -> ServiceResult<String> {
        let trimmed = candidate.trim();
        if trimmed.is_empty() {
            return Err(LedgerError::Category("Category name must not be empty".into()));
        }
        match categories.position(trimmed) {
            Some(existing) if Some(existing) != exclude => Err(LedgerError::Category(format!(
                "Category `{}` already exists",
                trimmed
            ))),
            _ => Ok(trimmed.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_rejects_blank_and_duplicate_names() {
        let mut set = CategorySet::from_names(["Food"]);
        assert!(CategoryService::add(&mut set, "  ").is_err());
        let err = CategoryService::add(&mut set, "FOOD").expect_err("duplicate");
        assert!(err.to_string().contains("already exists"));
        CategoryService::add(&mut set, " Rent ").unwrap();
        assert_eq!(CategoryService::list(&set), vec!["Food", "Rent"]);
    }

    #[test]
    fn rename_allows_case_change_of_same_entry() {
        let mut set = CategorySet::from_names(["food", "Rent"]);
        CategoryService::rename(&mut set, "food", "Food").unwrap();
        assert_eq!(CategoryService::list(&set), vec!["Food", "Rent"]);
        assert!(CategoryService::rename(&mut set, "Food", "rent").is_err());
        assert!(CategoryService::rename(&mut set, "Missing", "X").is_err());
    }

    #[test]
    fn remove_returns_stored_name() {
        let mut set = CategorySet::from_names(["Food", "Rent"]);
        assert_eq!(CategoryService::remove(&mut set, "rent").unwrap(), "Rent");
        assert!(CategoryService::remove(&mut set, "rent").is_err());
        assert_eq!(set.len(), 1);
    }
}
