//! Listing categories and the active-category selection.

use thiserror::Error;

/// One entry of the static category table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryDefinition {
    /// Label matched against a listing's building type.
    pub label: &'static str,
    /// Icon tag rendered for markers of this category.
    pub icon: &'static str,
    /// Human-readable description.
    pub description: &'static str,
}

const fn category(
    label: &'static str,
    icon: &'static str,
    description: &'static str,
) -> CategoryDefinition {
    CategoryDefinition {
        label,
        icon,
        description,
    }
}

/// Categories offered by the explorer, in display order.
pub const CATEGORIES: [CategoryDefinition; 13] = [
    category("apartments", "business", "Apartments"),
    category("house", "home", "Houses"),
    category("hotel", "bed", "Hotels"),
    category("villa", "home-outline", "Villas"),
    category("castle", "business-outline", "Castles"),
    category("houseboat", "boat", "Houseboats"),
    category("farm", "leaf", "Farms"),
    category("cabin", "home-outline", "Cabins"),
    category("camping", "bonfire", "Camping"),
    category("resort", "umbrella", "Resorts"),
    category("land", "map", "Land"),
    category("caravan", "car", "Caravans"),
    category("historic", "business-outline", "Historic"),
];

/// Category active before the user picks one.
pub const DEFAULT_CATEGORY: &str = CATEGORIES[0].label;

/// Icon used for labels missing from [`CATEGORIES`].
pub const FALLBACK_ICON: &str = "map";

/// Look up a category definition, ignoring ASCII case.
pub fn find_category(label: &str) -> Option<&'static CategoryDefinition> {
    CATEGORIES
        .iter()
        .find(|definition| definition.label.eq_ignore_ascii_case(label))
}

/// Icon tag for `label`, falling back to [`FALLBACK_ICON`].
///
/// # Examples
/// ```
/// use explorer::domain::category::category_icon;
///
/// assert_eq!(category_icon("Hotel"), "bed");
/// assert_eq!(category_icon("spaceport"), "map");
/// ```
pub fn category_icon(label: &str) -> &'static str {
    find_category(label).map_or(FALLBACK_ICON, |definition| definition.icon)
}

/// Errors returned by [`CategorySelection::set`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CategoryError {
    /// The label is empty after trimming whitespace.
    #[error("category label must not be blank")]
    Blank,
}

/// The currently active category label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySelection {
    active: String,
}

impl Default for CategorySelection {
    fn default() -> Self {
        Self {
            active: DEFAULT_CATEGORY.to_owned(),
        }
    }
}

impl CategorySelection {
    /// Active category label.
    pub fn active(&self) -> &str {
        self.active.as_str()
    }

    /// Icon tag of the active category.
    pub fn icon(&self) -> &'static str {
        category_icon(&self.active)
    }

    /// Replace the active category with the trimmed `label`.
    ///
    /// Labels outside [`CATEGORIES`] are accepted; they render with the
    /// fallback icon.
    ///
    /// # Errors
    ///
    /// Returns [`CategoryError::Blank`] when `label` is blank.
    pub fn set(&mut self, label: &str) -> Result<(), CategoryError> {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Err(CategoryError::Blank);
        }
        trimmed.clone_into(&mut self.active);
        Ok(())
    }
}
