/// Build a request body in the shape the service accepts.
pub fn request_json(
    max_cook_time: f64,
    max_calories: f64,
    restrictions: &[&str],
    category: Option<&str>,
) -> String {
    let mut preferences = serde_json::json!({
        "max_cook_time": max_cook_time,
        "max_calories": max_calories,
        "ingredient_restrictions": restrictions,
    });
    if let Some(category) = category {
        preferences["recipe_category"] = serde_json::json!(category);
    }
    serde_json::json!({ "preferences": preferences }).to_string()
}
