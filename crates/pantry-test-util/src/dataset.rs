use std::path::{Path, PathBuf};

/// Header written by [`dataset_csv`]. Mirrors the Food.com export, including
/// columns the loader ignores.
const HEADER: &[&str] = &[
    "RecipeId",
    "Name",
    "AuthorName",
    "TotalTime",
    "Description",
    "Images",
    "RecipeCategory",
    "RecipeIngredientParts",
    "Calories",
    "FatContent",
    "SodiumContent",
    "FiberContent",
    "ProteinContent",
    "RecipeInstructions",
];

/// A fixture recipe row.
#[derive(Debug, Clone)]
pub struct RecipeRow {
    pub name: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub ingredients: &'static str,
    pub instructions: &'static str,
    pub image: &'static str,
    pub total_time: Option<&'static str>,
    pub calories: Option<f64>,
    pub fat: Option<f64>,
    pub sodium: Option<f64>,
    pub fiber: Option<f64>,
    pub protein: Option<f64>,
}

impl RecipeRow {
    /// Minimal row with only a name, category and ingredient text.
    pub fn new(name: &'static str, category: &'static str, ingredients: &'static str) -> Self {
        Self {
            name,
            description: "",
            category,
            ingredients,
            instructions: "",
            image: "",
            total_time: None,
            calories: None,
            fat: None,
            sodium: None,
            fiber: None,
            protein: None,
        }
    }
}

/// Eight recipes across four categories plus one row with no category.
///
/// First-seen category order: Dessert (0), Soup (1), Bread (2), missing (3),
/// Salad (4).
pub fn sample_recipes() -> Vec<RecipeRow> {
    vec![
        RecipeRow {
            name: "Chocolate Lava Cake",
            description: "Molten centre, crisp edges.",
            category: "Dessert",
            ingredients: r#"c("dark chocolate", "butter", "eggs", "sugar")"#,
            instructions: r#"c("Melt chocolate.", "Bake 12 minutes.")"#,
            image: r#"c("https://img.example/lava.jpg")"#,
            total_time: Some("PT25M"),
            calories: Some(450.0),
            fat: Some(28.0),
            sodium: Some(120.0),
            fiber: Some(3.0),
            protein: Some(6.5),
        },
        RecipeRow {
            name: "Peanut Noodle Soup",
            description: "Spicy and nutty.",
            category: "Soup",
            ingredients: r#"c("rice noodles", "Peanut Butter", "broth")"#,
            instructions: r#"c("Simmer broth.", "Stir in peanut butter.")"#,
            image: "character(0)",
            total_time: Some("PT30M"),
            calories: Some(380.0),
            fat: Some(18.0),
            sodium: Some(900.0),
            fiber: Some(4.0),
            protein: Some(14.0),
        },
        RecipeRow {
            name: "Tomato Basil Soup",
            description: "Classic.",
            category: "Soup",
            ingredients: r#"c("tomatoes", "basil", "cream")"#,
            instructions: r#"c("Roast tomatoes.", "Blend.")"#,
            image: "",
            total_time: Some("PT35M"),
            calories: Some(210.0),
            fat: Some(9.0),
            sodium: Some(640.0),
            fiber: Some(3.5),
            protein: Some(4.0),
        },
        RecipeRow {
            name: "Peanut Brittle",
            description: "Crunchy candy.",
            category: "Dessert",
            ingredients: r#"c("sugar", "peanuts", "corn syrup")"#,
            instructions: r#"c("Cook sugar to hard crack.", "Stir in peanuts.")"#,
            image: "",
            total_time: Some("PT40M"),
            calories: Some(520.0),
            fat: Some(20.0),
            sodium: Some(200.0),
            fiber: Some(2.0),
            protein: Some(8.0),
        },
        RecipeRow {
            name: "Lentil Stew",
            description: "Hearty.",
            category: "Soup",
            ingredients: r#"c("lentils", "carrots", "cumin")"#,
            instructions: r#"c("Simmer everything for an hour.")"#,
            image: "",
            total_time: Some("PT1H"),
            calories: Some(330.0),
            fat: Some(5.0),
            sodium: Some(480.0),
            fiber: Some(15.0),
            protein: Some(18.0),
        },
        RecipeRow {
            name: "Banana Bread",
            description: "Moist loaf.",
            category: "Bread",
            ingredients: r#"c("bananas", "flour", "walnuts")"#,
            instructions: r#"c("Mash bananas.", "Bake.")"#,
            image: "",
            total_time: Some("PT1H10M"),
            calories: Some(300.0),
            fat: Some(12.0),
            sodium: Some(250.0),
            fiber: Some(2.5),
            protein: Some(5.0),
        },
        RecipeRow {
            name: "Satay Skewers",
            description: "Grilled.",
            category: "",
            ingredients: r#"c("chicken", "PEANUT sauce")"#,
            instructions: r#"c("Grill.", "Serve with sauce.")"#,
            image: "",
            total_time: Some("PT20M"),
            calories: Some(410.0),
            fat: Some(22.0),
            sodium: Some(700.0),
            fiber: Some(1.0),
            protein: Some(30.0),
        },
        RecipeRow::new("Garden Salad", "Salad", ""),
    ]
}

/// Render rows as a CSV document with a header line.
pub fn dataset_csv(rows: &[RecipeRow]) -> String {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADER).unwrap();
    for (i, row) in rows.iter().enumerate() {
        let id = (i + 1).to_string();
        let calories = number_cell(row.calories);
        let fat = number_cell(row.fat);
        let sodium = number_cell(row.sodium);
        let fiber = number_cell(row.fiber);
        let protein = number_cell(row.protein);
        writer
            .write_record([
                id.as_str(),
                row.name,
                "fixture",
                row.total_time.unwrap_or(""),
                row.description,
                row.image,
                row.category,
                row.ingredients,
                calories.as_str(),
                fat.as_str(),
                sodium.as_str(),
                fiber.as_str(),
                protein.as_str(),
                row.instructions,
            ])
            .unwrap();
    }
    String::from_utf8(writer.into_inner().unwrap()).unwrap()
}

fn number_cell(value: Option<f64>) -> String {
    value.map(|n| n.to_string()).unwrap_or_default()
}

/// Write rows to `recipes.csv` in `dir` and return its path.
pub fn write_dataset(dir: &Path, rows: &[RecipeRow]) -> PathBuf {
    let path = dir.join("recipes.csv");
    std::fs::write(&path, dataset_csv(rows)).unwrap();
    path
}
