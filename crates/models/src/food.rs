use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

/// Per-serving macros for one catalog food.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodFacts {
    pub name: String,
    pub calories: i32,
    pub carbs: f64,
    pub protein: f64,
    pub fat: f64,
}

impl FoodFacts {
    fn new(name: &str, calories: i32, carbs: f64, protein: f64, fat: f64) -> Self {
        Self {
            name: name.to_string(),
            calories,
            carbs,
            protein,
            fat,
        }
    }
}

lazy_static! {
    /// Built-in food catalog keyed by search slug.
    pub static ref LOCAL_FOODS: Vec<(&'static str, FoodFacts)> = vec![
        ("roti", FoodFacts::new("Roti", 70, 15.0, 3.0, 0.5)),
        ("biryani", FoodFacts::new("Biryani", 250, 35.0, 8.0, 10.0)),
        ("daal", FoodFacts::new("Daal (Lentils)", 120, 20.0, 9.0, 2.0)),
        ("rice", FoodFacts::new("Rice", 200, 45.0, 4.0, 0.5)),
        ("chicken", FoodFacts::new("Chicken", 165, 0.0, 31.0, 3.6)),
        ("kheer", FoodFacts::new("Kheer", 150, 28.0, 4.0, 2.0)),
        ("egg", FoodFacts::new("Egg", 70, 0.6, 6.0, 5.0)),
        ("aloo", FoodFacts::new("Aloo (Potato)", 77, 17.0, 2.0, 0.1)),
        ("gobi", FoodFacts::new("Gobi (Cauliflower)", 25, 5.0, 2.0, 0.3)),
        ("mix_vegetable", FoodFacts::new("Mixed Vegetables", 45, 8.0, 2.0, 0.4)),
        ("paratha", FoodFacts::new("Paratha", 150, 20.0, 4.0, 6.0)),
    ];
}

/// Case-insensitive substring search over slugs and display names.
pub fn search(query: &str) -> Vec<FoodFacts> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return Vec::new();
    }
    LOCAL_FOODS
        .iter()
        .filter(|(slug, facts)| slug.contains(&q) || facts.name.to_lowercase().contains(&q))
        .map(|(_, facts)| facts.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_matches_slug_and_name() {
        let by_slug = search("daal");
        assert_eq!(by_slug.len(), 1);
        assert_eq!(by_slug[0].name, "Daal (Lentils)");

        // "lentils" only appears in the display name
        let by_name = search("Lentils");
        assert_eq!(by_name.len(), 1);
    }

    #[test]
    fn test_search_empty_query_returns_nothing() {
        assert!(search("   ").is_empty());
    }

    #[test]
    fn test_search_substring() {
        let results = search("al");
        // daal, aloo and mixed vegetables ("Mixed" has no "al"); check slugs hit
        assert!(results.iter().any(|f| f.name.starts_with("Daal")));
        assert!(results.iter().any(|f| f.name.starts_with("Aloo")));
    }
}
