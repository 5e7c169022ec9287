//! Product enrichment — attaches a synthetic marketplace listing to each garment.
//!
//! Image URL and outbound link are pure table lookups over (category, color, name).
//! Price, rating and sold count come from the caller's `Rng`, so tests can seed it.

use rand::Rng;
use reqwest::Url;
use serde::Serialize;
use uuid::Uuid;

use crate::models::outfit::{ClothingItem, ItemDraft};

/// Per-category price ranges in whole dollars, inclusive.
const PRICE_RANGES: &[(&str, (u32, u32))] = &[
    ("top", (15, 50)),
    ("bottom", (20, 60)),
    ("footwear", (30, 100)),
    ("accessory", (10, 40)),
];

/// Our garment category → marketplace search category.
const MARKETPLACE_CATEGORIES: &[(&str, &str)] = &[
    ("top", "tops"),
    ("bottom", "bottoms"),
    ("footwear", "shoes"),
    ("accessory", "accessories"),
];

const FALLBACK_MARKETPLACE_CATEGORY: &str = "fashion";

/// Name keyword → preview image. First match in table order wins, so more
/// specific keywords come before the ones they contain.
const NAME_IMAGES: &[(&str, &str)] = &[
    ("t-shirt", "https://placehold.co/400x400/png?text=T-Shirt"),
    ("blouse", "https://placehold.co/400x400/png?text=Blouse"),
    ("shirt", "https://placehold.co/400x400/png?text=Shirt"),
    ("sweater", "https://placehold.co/400x400/png?text=Sweater"),
    ("hoodie", "https://placehold.co/400x400/png?text=Hoodie"),
    ("blazer", "https://placehold.co/400x400/png?text=Blazer"),
    ("jacket", "https://placehold.co/400x400/png?text=Jacket"),
    ("dress", "https://placehold.co/400x400/png?text=Dress"),
    ("jeans", "https://placehold.co/400x400/png?text=Jeans"),
    ("trousers", "https://placehold.co/400x400/png?text=Trousers"),
    ("chinos", "https://placehold.co/400x400/png?text=Chinos"),
    ("skirt", "https://placehold.co/400x400/png?text=Skirt"),
    ("shorts", "https://placehold.co/400x400/png?text=Shorts"),
    ("pants", "https://placehold.co/400x400/png?text=Pants"),
    ("sneakers", "https://placehold.co/400x400/png?text=Sneakers"),
    ("boots", "https://placehold.co/400x400/png?text=Boots"),
    ("heels", "https://placehold.co/400x400/png?text=Heels"),
    ("loafers", "https://placehold.co/400x400/png?text=Loafers"),
    ("sandals", "https://placehold.co/400x400/png?text=Sandals"),
    ("shoes", "https://placehold.co/400x400/png?text=Shoes"),
    ("watch", "https://placehold.co/400x400/png?text=Watch"),
    ("belt", "https://placehold.co/400x400/png?text=Belt"),
    ("sunglasses", "https://placehold.co/400x400/png?text=Sunglasses"),
    ("necklace", "https://placehold.co/400x400/png?text=Necklace"),
    ("earrings", "https://placehold.co/400x400/png?text=Earrings"),
    ("bracelet", "https://placehold.co/400x400/png?text=Bracelet"),
    ("scarf", "https://placehold.co/400x400/png?text=Scarf"),
    ("hat", "https://placehold.co/400x400/png?text=Hat"),
    ("bag", "https://placehold.co/400x400/png?text=Bag"),
    ("clutch", "https://placehold.co/400x400/png?text=Clutch"),
];

const CATEGORY_IMAGES: &[(&str, &str)] = &[
    ("top", "https://placehold.co/400x400/png?text=Top"),
    ("bottom", "https://placehold.co/400x400/png?text=Bottom"),
    ("footwear", "https://placehold.co/400x400/png?text=Footwear"),
    ("accessory", "https://placehold.co/400x400/png?text=Accessory"),
];

/// Category used whenever a lookup sees a category it does not know.
const DEFAULT_CATEGORY: &str = "top";

/// A synthetic marketplace listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListing {
    pub item_id: String,
    pub name: String,
    pub price: String,
    pub image_url: String,
    pub product_url: String,
    pub rating: f32,
    pub sold: u32,
}

/// Mock marketplace: builds listings and enriches garments.
///
/// Holds only the search endpoint; every other input is a static table.
#[derive(Debug, Clone)]
pub struct ProductCatalog {
    search_base: Url,
}

impl ProductCatalog {
    pub fn new(search_base: Url) -> Self {
        Self { search_base }
    }

    /// Builds the listing preview for a garment.
    pub fn preview<R: Rng + ?Sized>(
        &self,
        item_id: &str,
        draft: &ItemDraft,
        rng: &mut R,
    ) -> ProductListing {
        let category = draft.category.as_str();
        ProductListing {
            item_id: item_id.to_string(),
            name: draft.name.clone(),
            price: draft
                .price
                .clone()
                .filter(|p| !p.trim().is_empty())
                .unwrap_or_else(|| mock_price(category, rng)),
            image_url: image_for(category, &draft.name).to_string(),
            product_url: self.search_url(
                &format!("{} {}", draft.name, draft.color),
                Some(marketplace_category(category)),
            ),
            rating: round_tenth(4.5 + rng.random::<f32>() * 0.5),
            sold: rng.random_range(100..1100),
        }
    }

    /// Turns a draft into a fully populated `ClothingItem` with the given id.
    pub fn enrich<R: Rng + ?Sized>(&self, id: Uuid, draft: ItemDraft, rng: &mut R) -> ClothingItem {
        let listing = self.preview(&format!("listing_{id}"), &draft, rng);
        ClothingItem {
            id,
            category: draft.category,
            name: draft.name,
            description: draft.description,
            color: draft.color,
            product_link: listing.product_url,
            image_url: listing.image_url,
            price: listing.price,
        }
    }

    /// Mock search: `limit` synthetic listings for a free-text query.
    pub fn search<R: Rng + ?Sized>(
        &self,
        query: &str,
        category: Option<&str>,
        limit: usize,
        rng: &mut R,
    ) -> Vec<ProductListing> {
        let price_category = category.unwrap_or(DEFAULT_CATEGORY);
        let link = self.search_url(query, category.map(marketplace_category));

        (0..limit)
            .map(|i| {
                let name = format!("{query} - Item {}", i + 1);
                ProductListing {
                    item_id: format!("listing_{i}"),
                    price: mock_price(price_category, rng),
                    image_url: image_for(price_category, &name).to_string(),
                    product_url: link.clone(),
                    rating: round_tenth(4.0 + rng.random::<f32>()),
                    sold: rng.random_range(0..2000),
                    name,
                }
            })
            .collect()
    }

    fn search_url(&self, keyword: &str, category: Option<&str>) -> String {
        let mut url = self.search_base.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("keyword", keyword);
            if let Some(category) = category {
                pairs.append_pair("category", category);
            }
        }
        url.into()
    }
}

fn lookup<V: Copy>(table: &[(&str, V)], key: &str) -> Option<V> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Inclusive whole-dollar range for a category; unknown categories use the top range.
pub fn price_range(category: &str) -> (u32, u32) {
    lookup(PRICE_RANGES, category)
        .or_else(|| lookup(PRICE_RANGES, DEFAULT_CATEGORY))
        .unwrap_or((15, 50))
}

/// Draws a price uniformly from the category range, formatted as `$NN.99`.
pub fn mock_price<R: Rng + ?Sized>(category: &str, rng: &mut R) -> String {
    let (min, max) = price_range(category);
    let dollars = rng.random_range(min..=max);
    format!("${dollars}.99")
}

/// Image for a garment name, falling back to the category default, then the top default.
pub fn image_for(category: &str, name: &str) -> &'static str {
    let name = name.to_lowercase();
    NAME_IMAGES
        .iter()
        .find(|(keyword, _)| name.contains(keyword))
        .map(|(_, url)| *url)
        .or_else(|| lookup(CATEGORY_IMAGES, category))
        .or_else(|| lookup(CATEGORY_IMAGES, DEFAULT_CATEGORY))
        .unwrap_or("https://placehold.co/400x400/png?text=Top")
}

/// Marketplace search category for a garment category; unknown maps to "fashion".
pub fn marketplace_category(category: &str) -> &'static str {
    lookup(MARKETPLACE_CATEGORIES, category).unwrap_or(FALLBACK_MARKETPLACE_CATEGORY)
}

fn round_tenth(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::outfit::ClothingCategory;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn catalog() -> ProductCatalog {
        ProductCatalog::new(Url::parse("https://shopee.com/search").unwrap())
    }

    fn draft(category: ClothingCategory, name: &str, color: &str) -> ItemDraft {
        ItemDraft::new(category, name, "desc".to_string(), color)
    }

    fn dollars(price: &str) -> u32 {
        price
            .strip_prefix('$')
            .and_then(|p| p.strip_suffix(".99"))
            .unwrap()
            .parse()
            .unwrap()
    }

    #[test]
    fn test_price_ranges_per_category() {
        assert_eq!(price_range("top"), (15, 50));
        assert_eq!(price_range("bottom"), (20, 60));
        assert_eq!(price_range("footwear"), (30, 100));
        assert_eq!(price_range("accessory"), (10, 40));
    }

    #[test]
    fn test_unknown_category_uses_top_price_range() {
        assert_eq!(price_range("outerwear"), (15, 50));
        assert_eq!(price_range(""), (15, 50));
    }

    #[test]
    fn test_mock_price_within_range_and_formatted() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let price = mock_price("footwear", &mut rng);
            assert!(price.starts_with('$') && price.ends_with(".99"), "{price}");
            let value = dollars(&price);
            assert!((30..=100).contains(&value), "{value} out of footwear range");
        }
    }

    #[test]
    fn test_seeded_rng_gives_identical_prices() {
        let item = draft(ClothingCategory::Top, "Linen Shirt", "#ffffff");
        let a = catalog().preview("x", &item, &mut StdRng::seed_from_u64(7));
        let b = catalog().preview("x", &item, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_explicit_price_is_kept() {
        let mut item = draft(ClothingCategory::Accessory, "Gold Necklace", "#d4af37");
        item.price = Some("$120.00".to_string());
        let listing = catalog().preview("x", &item, &mut StdRng::seed_from_u64(1));
        assert_eq!(listing.price, "$120.00");
    }

    #[test]
    fn test_blank_explicit_price_is_replaced() {
        let mut item = draft(ClothingCategory::Accessory, "Gold Necklace", "#d4af37");
        item.price = Some("  ".to_string());
        let listing = catalog().preview("x", &item, &mut StdRng::seed_from_u64(1));
        assert!((10..=40).contains(&dollars(&listing.price)));
    }

    #[test]
    fn test_image_lookup_is_case_insensitive_substring() {
        assert_eq!(
            image_for("top", "Classic Cotton SHIRT"),
            "https://placehold.co/400x400/png?text=Shirt"
        );
        assert_eq!(
            image_for("accessory", "Designer Watch"),
            "https://placehold.co/400x400/png?text=Watch"
        );
    }

    #[test]
    fn test_image_lookup_prefers_earlier_table_entries() {
        // "t-shirt" contains "shirt"; the more specific entry is listed first
        assert_eq!(
            image_for("top", "Graphic T-Shirt"),
            "https://placehold.co/400x400/png?text=T-Shirt"
        );
    }

    #[test]
    fn test_image_falls_back_to_category_then_top() {
        assert_eq!(
            image_for("footwear", "Mystery Item"),
            "https://placehold.co/400x400/png?text=Footwear"
        );
        assert_eq!(
            image_for("outerwear", "Mystery Item"),
            "https://placehold.co/400x400/png?text=Top"
        );
    }

    #[test]
    fn test_marketplace_category_mapping() {
        assert_eq!(marketplace_category("top"), "tops");
        assert_eq!(marketplace_category("bottom"), "bottoms");
        assert_eq!(marketplace_category("footwear"), "shoes");
        assert_eq!(marketplace_category("accessory"), "accessories");
        assert_eq!(marketplace_category("outerwear"), "fashion");
    }

    #[test]
    fn test_product_link_encodes_name_color_and_category() {
        let item = draft(ClothingCategory::Footwear, "Leather Shoes", "#000000");
        let listing = catalog().preview("x", &item, &mut StdRng::seed_from_u64(3));
        assert_eq!(
            listing.product_url,
            "https://shopee.com/search?keyword=Leather+Shoes+%23000000&category=shoes"
        );
    }

    #[test]
    fn test_image_and_link_stable_across_calls() {
        let item = draft(ClothingCategory::Bottom, "Tailored Trousers", "#95a5a6");
        let a = catalog().preview("x", &item, &mut StdRng::seed_from_u64(1));
        let b = catalog().preview("x", &item, &mut StdRng::seed_from_u64(99));
        assert_eq!(a.image_url, b.image_url);
        assert_eq!(a.product_url, b.product_url);
    }

    #[test]
    fn test_enrich_populates_every_field() {
        let id = Uuid::new_v4();
        let item = draft(ClothingCategory::Accessory, "Leather Belt", "#7f8c8d");
        let enriched = catalog().enrich(id, item, &mut StdRng::seed_from_u64(5));
        assert_eq!(enriched.id, id);
        assert_eq!(enriched.name, "Leather Belt");
        assert!(!enriched.price.is_empty());
        assert!(!enriched.image_url.is_empty());
        assert!(!enriched.product_link.is_empty());
        assert!((10..=40).contains(&dollars(&enriched.price)));
    }

    #[test]
    fn test_preview_rating_and_sold_ranges() {
        let mut rng = StdRng::seed_from_u64(11);
        let item = draft(ClothingCategory::Top, "Silk Blouse", "#ffeef8");
        for _ in 0..50 {
            let listing = catalog().preview("x", &item, &mut rng);
            assert!((4.5..=5.0).contains(&listing.rating));
            assert!((100..1100).contains(&listing.sold));
        }
    }

    #[test]
    fn test_search_returns_limit_listings() {
        let mut rng = StdRng::seed_from_u64(2);
        let results = catalog().search("red dress", Some("top"), 3, &mut rng);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].name, "red dress - Item 1");
        assert_eq!(results[2].item_id, "listing_2");
        assert_eq!(
            results[0].product_url,
            "https://shopee.com/search?keyword=red+dress&category=tops"
        );
        for listing in &results {
            assert!((4.0..=5.0).contains(&listing.rating));
            assert!(listing.sold < 2000);
            assert!((15..=50).contains(&dollars(&listing.price)));
        }
    }

    #[test]
    fn test_search_without_category_omits_parameter() {
        let mut rng = StdRng::seed_from_u64(2);
        let results = catalog().search("scarf", None, 1, &mut rng);
        assert_eq!(
            results[0].product_url,
            "https://shopee.com/search?keyword=scarf"
        );
    }
}
