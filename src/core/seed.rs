//! First-run demo data, shown while no catalog has been persisted.

use crate::models::{Product, ProductId};
use chrono::{DateTime, Utc};

/// The two sample products, stamped with `now`.
#[must_use]
pub fn seed_products(now: DateTime<Utc>) -> Vec<Product> {
    vec![
        Product {
            id: ProductId(1),
            name: "Cotton Saree".to_string(),
            description: "Beautiful handwoven cotton saree with traditional patterns, perfect for festivals and special occasions".to_string(),
            category: "Clothing".to_string(),
            price: 2500.0,
            quantity: 5,
            local_input: "सूती साड़ी पारंपरिक डिज़ाइन के साथ".to_string(),
            translated_input: "Cotton saree with traditional design".to_string(),
            offline: false,
            synced: true,
            created_at: now,
            updated_at: now,
        },
        Product {
            id: ProductId(2),
            name: "Organic Turmeric Powder".to_string(),
            description: "Pure organic turmeric powder sourced from local farms, 100% natural with no artificial additives".to_string(),
            category: "Spices".to_string(),
            price: 120.0,
            quantity: 25,
            local_input: "हल्दी पाउडर जैविक".to_string(),
            translated_input: "Turmeric powder organic".to_string(),
            offline: true,
            synced: false,
            created_at: now,
            updated_at: now,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_has_two_distinct_products() {
        let seed = seed_products(Utc::now());
        assert_eq!(seed.len(), 2);
        assert_ne!(seed[0].id, seed[1].id);
        assert!(seed.iter().all(|p| !p.name.is_empty()));
        assert!(seed[1].offline && !seed[1].synced);
    }
}
