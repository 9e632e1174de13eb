use lazy_static::lazy_static;
use nutriguide_models::plan::{ShoppingCategory, ShoppingItem, ShoppingList};

const COST_PER_ITEM_RS: usize = 100;

fn item(name: &str, quantity: &str, notes: &str) -> ShoppingItem {
    ShoppingItem {
        name: name.to_string(),
        quantity: quantity.to_string(),
        notes: notes.to_string(),
    }
}

lazy_static! {
    static ref STAPLES: Vec<(&'static str, Vec<ShoppingItem>)> = vec![
        (
            "Produce",
            vec![
                item("Tomatoes", "500g", "Ripe and fresh"),
                item("Onions", "1kg", "Yellow onions"),
                item("Garlic", "1 bulb", ""),
                item("Ginger", "1 piece", "Fresh"),
                item("Green chilies", "5 pieces", "Small green ones"),
                item("Coriander (Cilantro)", "1 bunch", "Fresh"),
            ],
        ),
        (
            "Proteins",
            vec![
                item("Chicken", "1kg", "Boneless, skinless"),
                item("Mutton", "500g", "For curry"),
                item("Eggs", "1 dozen", "Large size"),
            ],
        ),
        (
            "Grains",
            vec![
                item("Basmati Rice", "1kg", "Aged basmati"),
                item("Whole wheat flour (Atta)", "2kg", "For roti/chapati"),
                item("Chana daal", "500g", "Split gram lentils"),
                item("Moong daal", "500g", "Yellow lentils"),
            ],
        ),
        (
            "Spices",
            vec![
                item("Cumin seeds", "1 small packet", ""),
                item("Coriander powder", "1 packet", ""),
                item("Turmeric powder", "1 packet", ""),
                item("Red chili powder", "1 packet", "Medium spice level"),
                item("Garam masala", "1 packet", ""),
                item("Salt", "1 packet", "Iodized"),
            ],
        ),
        (
            "Oils & Sauces",
            vec![
                item("Cooking oil", "1 liter", "Any cooking oil"),
                item("Ghee", "200g", "Pure desi ghee"),
            ],
        ),
        (
            "Dairy",
            vec![
                item("Milk", "1 liter", "Full cream"),
                item("Yogurt", "500g", "Fresh and thick"),
            ],
        ),
    ];
}

/// Staple grocery list covering the default meal plans, with a rough cost
/// estimate in rupees.
pub fn build_shopping_list() -> ShoppingList {
    let categories: Vec<ShoppingCategory> = STAPLES
        .iter()
        .map(|(name, items)| ShoppingCategory {
            name: name.to_string(),
            items: items.clone(),
        })
        .collect();

    let total_items: usize = categories.iter().map(|c| c.items.len()).sum();
    let estimated_cost = format!("Rs {}", total_items * COST_PER_ITEM_RS);

    ShoppingList {
        categories,
        estimated_cost,
        total_items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shopping_list_totals() {
        let list = build_shopping_list();
        let counted: usize = list.categories.iter().map(|c| c.items.len()).sum();
        assert_eq!(list.total_items, counted);
        assert_eq!(list.estimated_cost, format!("Rs {}", counted * 100));
        assert!(list.categories.iter().any(|c| c.name == "Spices"));
    }
}
