/// Practice categories offered by the text selector, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    CommonWords,
    Programming,
    Quotes,
    Numbers,
    Punctuation,
    MixedCase,
    Burmese,
    BurmeseQuotes,
    LongText,
}

/// Catalog entry consumed by selector UIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryInfo {
    pub id: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
}

pub const ALL_CATEGORIES: [Category; 9] = [
    Category::CommonWords,
    Category::Programming,
    Category::Quotes,
    Category::Numbers,
    Category::Punctuation,
    Category::MixedCase,
    Category::Burmese,
    Category::BurmeseQuotes,
    Category::LongText,
];

/// Label carried by results whose text did not come from the catalog.
pub const CUSTOM_CATEGORY: &str = "custom";

impl Category {
    pub fn info(self) -> CategoryInfo {
        let (id, display_name, description) = match self {
            Category::CommonWords => (
                "common-words",
                "Common Words",
                "Most frequently used English words",
            ),
            Category::Programming => (
                "programming",
                "Programming",
                "Programming keywords and terms",
            ),
            Category::Quotes => ("quotes", "Quotes", "Inspirational and famous quotes"),
            Category::Numbers => ("numbers", "Numbers", "Random numbers and digits"),
            Category::Punctuation => (
                "punctuation",
                "Punctuation",
                "Text with various punctuation marks",
            ),
            Category::MixedCase => (
                "mixed-case",
                "Mixed Case",
                "Text with mixed uppercase and lowercase",
            ),
            Category::Burmese => ("burmese", "Burmese", "Common Burmese words and phrases"),
            Category::BurmeseQuotes => (
                "burmese-quotes",
                "Burmese Quotes",
                "Inspirational Burmese quotes",
            ),
            Category::LongText => (
                "long-text",
                "Long Text",
                "Extended passages for endurance practice",
            ),
        };
        CategoryInfo {
            id,
            display_name,
            description,
        }
    }

    pub fn id(self) -> &'static str {
        self.info().id
    }

    pub fn from_id(id: &str) -> Option<Self> {
        ALL_CATEGORIES.into_iter().find(|c| c.id() == id)
    }

    /// Resolves an id, falling back to the first catalog entry.
    pub fn from_id_or_default(id: &str) -> Self {
        Self::from_id(id).unwrap_or(ALL_CATEGORIES[0])
    }
}

pub fn catalog() -> Vec<CategoryInfo> {
    ALL_CATEGORIES.iter().map(|c| c.info()).collect()
}
