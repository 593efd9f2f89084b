//! Response envelopes per endpoint.
//!
//! Every endpoint answers with an optional `ok`/`message` pair plus one
//! payload key. A missing payload key with a present `message` is a
//! validation notice, not an error; the notice is surfaced verbatim.

use serde::Deserialize;

use super::snapshot::Snapshot;
use super::views::{
    AdminSettings, BlueprintsPayload, CaseItem, CasePayload, CraftPayload, EquipOption,
    EventPayload, LoadoutPayload, MarketPayload, RatingPayload, SellPayload, ShopPayload,
    StoragePayload, WarehousePayload,
};

/// Auth exchange result (login, register, telegram, telegram/init).
#[derive(Debug, Clone, Deserialize)]
pub struct AuthReply {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<AuthUser>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
}

/// Bare acknowledgement (onboarding/complete).
#[derive(Debug, Clone, Deserialize)]
pub struct AckReply {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Raid enter/action result: the echoed snapshot drives a full re-render.
#[derive(Debug, Clone, Deserialize)]
pub struct RaidReply {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub state: Option<Snapshot>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageReply {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub storage: Option<StoragePayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SellReply {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub sell: Option<SellPayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShopReply {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub shop: Option<ShopPayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CraftReply {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub craft: Option<CraftPayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlueprintsReply {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub blueprints: Option<BlueprintsPayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoadoutReply {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub loadout: Option<LoadoutPayload>,
}

/// Loadout slot candidates; pager fields sit beside the list.
#[derive(Debug, Clone, Deserialize)]
pub struct LoadoutOptionsReply {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub options: Vec<EquipOption>,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default = "first_page")]
    pub total_pages: u32,
    #[serde(default)]
    pub equip_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WarehouseReply {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub warehouse: Option<WarehousePayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuestsReply {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub quests: Option<super::snapshot::QuestsPayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarketReply {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub market: Option<MarketPayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RatingReply {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub rating: Option<RatingPayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeasonReply {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub season: Option<super::snapshot::SeasonPayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventReply {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub event: Option<EventPayload>,
}

/// Daily case status/open. `items` only appears on a successful open.
#[derive(Debug, Clone, Deserialize)]
pub struct CaseReply {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub case: Option<CasePayload>,
    #[serde(default)]
    pub items: Option<Vec<CaseItem>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminReply {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub settings: Option<AdminSettings>,
}

fn first_page() -> u32 {
    1
}
