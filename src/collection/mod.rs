// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the nego-dashboard project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Card collection browsing
//!
//! Filtering and paging of the card list returned by the backend, plus the
//! display form of each card.

pub mod media;

use serde::Serialize;
use serde_json::Value;

use crate::backend::Card;
pub use media::{card_image, emoji_segments, trim_image_url, Segment, CARD_PLACEHOLDER};

/// Cards shown per page unless the caller asks otherwise
pub const ITEMS_PER_PAGE: usize = 10;

/// Largest page size a caller may request
pub const MAX_ITEMS_PER_PAGE: usize = 100;

/// Search and rarity filter
#[derive(Debug, Clone, Default)]
pub struct CardFilter {
    search: String,
    rarity: Option<String>,
}

impl CardFilter {
    pub fn new(search: Option<&str>, rarity: Option<&str>) -> Self {
        Self {
            search: search.unwrap_or_default().trim().to_lowercase(),
            rarity: rarity
                .map(str::trim)
                .filter(|r| !r.is_empty() && !r.eq_ignore_ascii_case("all"))
                .map(str::to_string),
        }
    }

    pub fn matches(&self, card: &Card) -> bool {
        let matches_search = self.search.is_empty()
            || card.display_name.trim().to_lowercase().contains(&self.search)
            || card.raw_name.trim().to_lowercase().contains(&self.search);
        let matches_rarity = self
            .rarity
            .as_ref()
            .is_none_or(|rarity| card.rarity.to_string() == *rarity);
        matches_search && matches_rarity
    }

    pub fn apply<'a>(&self, cards: &'a [Card]) -> Vec<&'a Card> {
        cards.iter().filter(|card| self.matches(card)).collect()
    }
}

/// One page of a list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number actually served
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

/// Cut a 1-based page out of `items`
///
/// Page 0 is served as page 1. Pages past the end are empty.
///
/// ### Parameters
///
/// * `items` - The filtered collection
/// * `page` - 1-based page number
/// * `per_page` - Page size, clamped to `1..=MAX_ITEMS_PER_PAGE`
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.clamp(1, MAX_ITEMS_PER_PAGE);
    let page = page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page);

    let items = items
        .into_iter()
        .skip((page - 1).saturating_mul(per_page))
        .take(per_page)
        .collect();

    Page {
        items,
        page,
        per_page,
        total_pages,
        total_items,
    }
}

/// A card ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    pub id: Value,
    pub display_name: String,
    pub raw_name: String,
    pub title: Option<String>,
    pub rarity: u8,
    pub dupe: u32,
    /// Normalised artwork URL, never a Discord CDN link
    pub image: String,
    pub emoji: Vec<Segment>,
    pub rarity_icon: Vec<Segment>,
}

impl From<&Card> for CardView {
    fn from(card: &Card) -> Self {
        Self {
            id: card.id.clone(),
            display_name: card.display_name.clone(),
            raw_name: card.raw_name.clone(),
            title: card.title.clone(),
            rarity: card.rarity,
            dupe: card.dupe,
            image: card_image(card.image.as_deref()),
            emoji: emoji_segments(card.emoji.as_deref().unwrap_or_default()),
            rarity_icon: emoji_segments(card.rarity_icon.as_deref().unwrap_or_default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn card(name: &str, raw: &str, rarity: u8) -> Card {
        Card {
            id: json!(name),
            display_name: name.to_string(),
            raw_name: raw.to_string(),
            title: None,
            rarity,
            rarity_icon: None,
            emoji: None,
            image: None,
            dupe: 1,
        }
    }

    fn deck() -> Vec<Card> {
        vec![
            card("Nego Prime", "nego_prime", 5),
            card("Dice Goblin", "dice_goblin", 2),
            card("Coin Mage", "coin_mage", 2),
            card("Box Knight", "box_knight", 3),
        ]
    }

    #[test]
    fn search_is_trimmed_and_case_insensitive() {
        let cards = deck();
        let found = CardFilter::new(Some("  GOBLIN "), None).apply(&cards);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].display_name, "Dice Goblin");

        let by_raw = CardFilter::new(Some("coin_"), None).apply(&cards);
        assert_eq!(by_raw.len(), 1);
    }

    #[test]
    fn rarity_filter() {
        let cards = deck();
        assert_eq!(CardFilter::new(None, Some("2")).apply(&cards).len(), 2);
        assert_eq!(CardFilter::new(None, Some("all")).apply(&cards).len(), 4);
        assert_eq!(CardFilter::new(Some("mage"), Some("5")).apply(&cards).len(), 0);
        assert_eq!(CardFilter::default().apply(&cards).len(), 4);
    }

    #[test]
    fn pages_are_one_based() {
        let items: Vec<u32> = (1..=23).collect();

        let first = paginate(items.clone(), 1, ITEMS_PER_PAGE);
        assert_eq!(first.items, (1..=10).collect::<Vec<_>>());
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.total_items, 23);

        let last = paginate(items.clone(), 3, ITEMS_PER_PAGE);
        assert_eq!(last.items, vec![21, 22, 23]);

        let zero = paginate(items.clone(), 0, ITEMS_PER_PAGE);
        assert_eq!(zero.page, 1);
        assert_eq!(zero.items.len(), 10);

        let past_end = paginate(items, 9, ITEMS_PER_PAGE);
        assert!(past_end.items.is_empty());
        assert_eq!(past_end.total_pages, 3);
    }

    #[test]
    fn empty_list_has_no_pages() {
        let page = paginate(Vec::<u32>::new(), 1, ITEMS_PER_PAGE);
        assert_eq!(page.total_pages, 0);
        assert!(page.items.is_empty());
    }

    #[test]
    fn card_view_normalises_media() {
        let mut source = card("Nego Prime", "nego_prime", 5);
        source.image = Some("https://cdn.discordapp.com/attachments/1/nego.png?ex=1".to_string());
        source.emoji = Some("<:nego:42>".to_string());

        let view = CardView::from(&source);
        assert_eq!(view.image, CARD_PLACEHOLDER);
        assert_eq!(view.emoji.len(), 1);
        assert!(view.rarity_icon.is_empty());
    }
}
