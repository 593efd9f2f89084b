//! Per-view payloads returned by the list endpoints.
//!
//! Each payload fully replaces the client's rendered fragment for that view.
//! All flags (`craftable`, `available`, `can_upgrade`, ...) are
//! server-computed; the client only reflects them.

use serde::Deserialize;

/// One row of a paginated item list (storage, sell, market own-items).
///
/// The sell variants add unit/total prices; storage adds the item type and
/// blueprint flag. A single row type keeps selection handling uniform.
#[derive(Debug, Clone, Deserialize)]
pub struct ListEntry {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub qty: i64,
    #[serde(default)]
    pub rarity: Option<String>,
    #[serde(default)]
    pub value: i64,
    #[serde(default)]
    pub emoji: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub blueprint: bool,
    #[serde(default)]
    pub unit_price: Option<i64>,
    #[serde(default)]
    pub total_price: Option<i64>,
}

impl ListEntry {
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoragePayload {
    #[serde(default)]
    pub items: Vec<ListEntry>,
    #[serde(default)]
    pub used: i64,
    #[serde(default)]
    pub limit: i64,
    #[serde(default)]
    pub total_value: i64,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default = "first_page")]
    pub total_pages: u32,
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub sort_label: Option<String>,
    #[serde(default)]
    pub can_upgrade: bool,
    #[serde(default)]
    pub upgrade_cost: Option<i64>,
    #[serde(default)]
    pub points: i64,
    #[serde(default)]
    pub raidcoins: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SellPayload {
    #[serde(default)]
    pub items: Vec<ListEntry>,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default = "first_page")]
    pub total_pages: u32,
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub sort_label: Option<String>,
    #[serde(default)]
    pub raidcoins: i64,
}

/// Market view: public listings plus the player's own sellable items, each
/// with its own pager.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarketPayload {
    #[serde(default)]
    pub raidcoins: i64,
    #[serde(default)]
    pub listing_cap: i64,
    #[serde(default)]
    pub my_listings: Vec<MarketListing>,
    #[serde(default)]
    pub items: Vec<ListEntry>,
    #[serde(default = "first_page")]
    pub items_page: u32,
    #[serde(default = "first_page")]
    pub items_total_pages: u32,
    #[serde(default)]
    pub items_sort: Option<String>,
    #[serde(default)]
    pub items_sort_label: Option<String>,
    #[serde(default)]
    pub listings: Vec<MarketListing>,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default = "first_page")]
    pub total_pages: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarketListing {
    pub id: i64,
    #[serde(default)]
    pub item_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub emoji: Option<String>,
    #[serde(default)]
    pub qty: i64,
    #[serde(default)]
    pub price: i64,
    #[serde(default)]
    pub seller_id: Option<i64>,
    #[serde(default)]
    pub seller_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShopPayload {
    #[serde(default)]
    pub points: i64,
    #[serde(default)]
    pub raidcoins: i64,
    #[serde(default)]
    pub storage_limit: i64,
    #[serde(default)]
    pub insurance: i64,
    #[serde(default)]
    pub purchases_today: i64,
    #[serde(default)]
    pub daily_limit: i64,
    #[serde(default)]
    pub tax_pct: i64,
    #[serde(default)]
    pub limit_reached: bool,
    #[serde(default)]
    pub static_items: Vec<ShopItem>,
    #[serde(default)]
    pub offers: Vec<ShopOffer>,
    #[serde(default)]
    pub recipe_offer: Option<RecipeOffer>,
    #[serde(default)]
    pub upgrade: Option<ShopUpgrade>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShopItem {
    pub kind: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub price: i64,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub available: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShopOffer {
    pub item_id: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub price: i64,
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecipeOffer {
    pub recipe_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: i64,
    #[serde(default)]
    pub owned: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShopUpgrade {
    #[serde(default)]
    pub can_upgrade: bool,
    #[serde(default)]
    pub cost: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CraftPayload {
    #[serde(default)]
    pub recipes: Vec<CraftRecipe>,
    #[serde(default)]
    pub storage_used: i64,
    #[serde(default)]
    pub storage_limit: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CraftRecipe {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub output: Option<CraftOutput>,
    #[serde(default)]
    pub ingredients: Vec<CraftIngredient>,
    #[serde(default)]
    pub craftable: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CraftOutput {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub emoji: Option<String>,
    #[serde(default)]
    pub qty: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CraftIngredient {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub emoji: Option<String>,
    #[serde(default)]
    pub qty: i64,
    #[serde(default)]
    pub have: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlueprintsPayload {
    #[serde(default)]
    pub items: Vec<BlueprintEntry>,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default = "first_page")]
    pub total_pages: u32,
    #[serde(default)]
    pub unsupported: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlueprintEntry {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub qty: i64,
    #[serde(default)]
    pub rarity: Option<String>,
    #[serde(default)]
    pub emoji: Option<String>,
    #[serde(default)]
    pub recipe_id: Option<String>,
    #[serde(default)]
    pub unlocked: bool,
}

/// Four equip slots; empty slot is `None`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoadoutPayload {
    #[serde(default)]
    pub armor: Option<crate::api::snapshot::ItemInfo>,
    #[serde(default)]
    pub weapon: Option<crate::api::snapshot::ItemInfo>,
    #[serde(default)]
    pub medkit: Option<crate::api::snapshot::ItemInfo>,
    #[serde(default)]
    pub chip: Option<crate::api::snapshot::ItemInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EquipOption {
    pub id: String,
    #[serde(default)]
    pub qty: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub emoji: Option<String>,
    #[serde(default)]
    pub value: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WarehousePayload {
    #[serde(default)]
    pub goal: i64,
    #[serde(default)]
    pub total_items: i64,
    #[serde(default)]
    pub total_value: i64,
    #[serde(default)]
    pub top_items: Vec<WarehouseItem>,
    #[serde(default)]
    pub order: Option<DailyOrder>,
    #[serde(default)]
    pub top_contrib: Option<TopContributor>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WarehouseItem {
    pub id: String,
    #[serde(default)]
    pub qty: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub emoji: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailyOrder {
    pub item_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub emoji: Option<String>,
    #[serde(default)]
    pub target: i64,
    #[serde(default)]
    pub progress: i64,
    #[serde(default)]
    pub reward: i64,
    #[serde(default)]
    pub bonus: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopContributor {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub value_total: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RatingPayload {
    #[serde(default)]
    pub rows: Vec<RatingRow>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RatingRow {
    #[serde(default)]
    pub rank: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub points: i64,
    #[serde(default)]
    pub extracts: i64,
    #[serde(default)]
    pub kills: i64,
    #[serde(default)]
    pub deaths: i64,
}

/// Standalone community-event view (richer than the snapshot summary).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPayload {
    #[serde(default)]
    pub event: Option<crate::api::snapshot::EventSummary>,
    #[serde(default)]
    pub totals: Option<EventTotals>,
    #[serde(default)]
    pub top: Vec<EventRow>,
    #[serde(default)]
    pub me: Option<EventTotals>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventTotals {
    #[serde(default)]
    pub value_total: i64,
    #[serde(default)]
    pub items_total: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventRow {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub value_total: i64,
    #[serde(default)]
    pub items_total: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CasePayload {
    #[serde(default)]
    pub opened: bool,
    #[serde(default)]
    pub pity: i64,
    #[serde(default)]
    pub items_count: i64,
    #[serde(default)]
    pub today: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CaseItem {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub emoji: Option<String>,
    #[serde(default)]
    pub rarity: Option<String>,
    #[serde(default)]
    pub rare: bool,
}

/// Chat-level tuning knobs mirrored by the admin panel. The update endpoint
/// echoes the whole settings row; unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminSettings {
    #[serde(default)]
    pub event_base: f64,
    #[serde(default)]
    pub event_greed_mult: f64,
    #[serde(default)]
    pub evac_base: f64,
    #[serde(default)]
    pub evac_greed_penalty: f64,
    #[serde(default)]
    pub warehouse_goal: i64,
    #[serde(default)]
    pub event_week_goal: i64,
    #[serde(default)]
    pub daily_sell_raidcoin_cap: i64,
    #[serde(default)]
    pub daily_sell_count_cap: i64,
    #[serde(default)]
    pub market_listing_cap: i64,
    #[serde(default)]
    pub season_reward_top1: i64,
    #[serde(default)]
    pub season_reward_top2: i64,
    #[serde(default)]
    pub season_reward_top3: i64,
}

fn first_page() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_entry_accepts_storage_and_sell_shapes() {
        // given: a storage row (type + blueprint) and a sell row (prices)
        let storage = r#"{"id": "scrap", "name": "Лом", "qty": 3, "rarity": "common",
                          "value": 10, "type": "junk", "blueprint": false}"#;
        let sell = r#"{"id": "scrap", "name": "Лом", "qty": 3, "rarity": "common",
                       "unit_price": 7, "total_price": 21}"#;

        // when:
        let storage_entry: ListEntry = serde_json::from_str(storage).unwrap();
        let sell_entry: ListEntry = serde_json::from_str(sell).unwrap();

        // then:
        assert_eq!(storage_entry.kind.as_deref(), Some("junk"));
        assert!(storage_entry.unit_price.is_none());
        assert_eq!(sell_entry.unit_price, Some(7));
        assert_eq!(sell_entry.total_price, Some(21));
    }

    #[test]
    fn test_payload_pages_default_to_one() {
        // given: a payload with no pager fields at all
        let payload: SellPayload = serde_json::from_str(r#"{"items": []}"#).unwrap();

        // then:
        assert_eq!(payload.page, 1);
        assert_eq!(payload.total_pages, 1);
    }

    #[test]
    fn test_admin_settings_ignore_unknown_keys() {
        // given: the server echoes the whole settings row
        let json = r#"{"event_base": 0.1, "warehouse_goal": 5000,
                       "events_enabled": 1, "event_week_active": 0}"#;

        // when:
        let settings: AdminSettings = serde_json::from_str(json).unwrap();

        // then:
        assert_eq!(settings.warehouse_goal, 5000);
        assert!((settings.event_base - 0.1).abs() < f64::EPSILON);
    }
}
