use crate::domain::dto::CategoryDto;
use crate::domain::model::{CategoryColor, CategoryUiModel};

const DEFAULT_COLOR: CategoryColor = CategoryColor("#5669FF");
const DEFAULT_IMAGE: &str = "sparkles";

// slug -> (顏色, 圖示)
const CATEGORY_TABLE: &[(&str, CategoryColor, &str)] = &[
    ("business-events", CategoryColor("#46CDFB"), "briefcase"),
    ("cinema", CategoryColor("#29D697"), "film"),
    ("concert", CategoryColor("#F0635A"), "music"),
    ("education", CategoryColor("#7D67EE"), "graduation"),
    ("entertainment", CategoryColor("#F59762"), "confetti"),
    ("exhibition", CategoryColor("#5D56F3"), "palette"),
    ("fashion", CategoryColor("#EE544A"), "hanger"),
    ("festival", CategoryColor("#FF8D5D"), "tent"),
    ("holiday", CategoryColor("#F0635A"), "gift"),
    ("kids", CategoryColor("#39D1F2"), "balloon"),
    ("party", CategoryColor("#F59762"), "glass"),
    ("photo", CategoryColor("#29D697"), "camera"),
    ("quest", CategoryColor("#7D67EE"), "puzzle"),
    ("recreation", CategoryColor("#29D697"), "leaf"),
    ("shopping", CategoryColor("#46CDFB"), "bag"),
    ("social-activity", CategoryColor("#5D56F3"), "people"),
    ("sport", CategoryColor("#F0635A"), "ball"),
    ("stock", CategoryColor("#FF8D5D"), "tag"),
    ("theater", CategoryColor("#EE544A"), "masks"),
    ("tour", CategoryColor("#39D1F2"), "map"),
];

pub struct CategoryImageMapping;

impl CategoryImageMapping {
    fn lookup(category: &CategoryDto) -> Option<&'static (&'static str, CategoryColor, &'static str)> {
        CATEGORY_TABLE
            .iter()
            .find(|(slug, _, _)| *slug == category.slug)
    }

    pub fn color(category: &CategoryDto) -> CategoryColor {
        Self::lookup(category)
            .map(|(_, color, _)| *color)
            .unwrap_or(DEFAULT_COLOR)
    }

    pub fn image(category: &CategoryDto) -> &'static str {
        Self::lookup(category)
            .map(|(_, _, image)| *image)
            .unwrap_or(DEFAULT_IMAGE)
    }
}

pub fn map_categories(categories: Vec<CategoryDto>) -> Vec<CategoryUiModel> {
    categories
        .into_iter()
        .map(|category| CategoryUiModel {
            id: category.id,
            color: CategoryImageMapping::color(&category),
            image: CategoryImageMapping::image(&category),
            category,
        })
        .collect()
}
