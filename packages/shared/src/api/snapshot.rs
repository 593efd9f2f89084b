//! The aggregate state snapshot pushed by the server.
//!
//! A snapshot fully replaces the client's cached copy on every successful
//! fetch; there is no partial merge. The client never derives game state
//! locally, it only mirrors what the last snapshot said.

use std::collections::HashMap;

use serde::Deserialize;

/// Full server-pushed state: rating, active raid session, interrupts,
/// cooldowns, quests, season, event progress and account flags.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Snapshot {
    /// Present on `state` responses, absent on raid-action echoes.
    #[serde(default)]
    pub user: Option<TgUserInfo>,
    #[serde(default)]
    pub rating: RatingSummary,
    #[serde(default)]
    pub storage: StorageBrief,
    #[serde(default)]
    pub session: Option<RaidSession>,
    #[serde(default)]
    pub pending_item: Option<ItemInfo>,
    /// Remaining cooldown seconds per action, as of the fetch.
    #[serde(default)]
    pub cooldowns: HashMap<String, u32>,
    #[serde(default)]
    pub can_medkit: bool,
    #[serde(default)]
    pub event: Option<EventSummary>,
    #[serde(default)]
    pub quests: QuestsPayload,
    #[serde(default)]
    pub season: Option<SeasonPayload>,
    #[serde(default)]
    pub onboarding_required: bool,
    #[serde(default)]
    pub onboarding_steps: Vec<String>,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Telegram identity echoed by the `state` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TgUserInfo {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// Lifetime player counters and currencies.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RatingSummary {
    #[serde(default)]
    pub points: i64,
    #[serde(default)]
    pub raids: i64,
    #[serde(default)]
    pub extracts: i64,
    #[serde(default)]
    pub deaths: i64,
    #[serde(default)]
    pub kills: i64,
    #[serde(default)]
    pub loot_value_total: i64,
    #[serde(default)]
    pub raidcoins: i64,
    #[serde(default)]
    pub storage_limit: i64,
    #[serde(default)]
    pub insurance_tokens: i64,
}

/// Compact storage mirror carried inside the snapshot.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageBrief {
    #[serde(default)]
    pub used: i64,
    #[serde(default)]
    pub limit: i64,
    #[serde(default)]
    pub items: Vec<StorageBriefItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageBriefItem {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub emoji: Option<String>,
    #[serde(default)]
    pub qty: i64,
}

/// Active raid session as the server last reported it.
#[derive(Debug, Clone, Deserialize)]
pub struct RaidSession {
    pub id: String,
    #[serde(default)]
    pub hp: i64,
    #[serde(default)]
    pub max_hp: i64,
    #[serde(default)]
    pub greed: i64,
    #[serde(default)]
    pub loot_value: i64,
    #[serde(default)]
    pub kills: i64,
    #[serde(default)]
    pub status: RaidStatus,
    #[serde(default)]
    pub enemy: Option<Enemy>,
    #[serde(default)]
    pub pending_choice: Option<PendingChoice>,
    #[serde(default)]
    pub pending_loot: Vec<String>,
    #[serde(default)]
    pub hard_mode: bool,
}

/// Server-side session phase. The client never computes this.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RaidStatus {
    #[default]
    Explore,
    Combat,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Enemy {
    pub name: String,
    #[serde(default)]
    pub hp: i64,
    #[serde(default)]
    pub hp_current: i64,
}

/// Narrative interrupt: replaces the default action set with its choices.
#[derive(Debug, Clone, Deserialize)]
pub struct PendingChoice {
    #[serde(default)]
    pub event_id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub choices: Vec<ChoiceOption>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceOption {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
}

/// Generic item card used for pending pickups and loadout slots.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemInfo {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub emoji: Option<String>,
    #[serde(default)]
    pub rarity: Option<String>,
    #[serde(default)]
    pub value: i64,
}

impl ItemInfo {
    /// Display name, falling back to the raw id.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// Community event progress carried inside the snapshot.
#[derive(Debug, Clone, Deserialize)]
pub struct EventSummary {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub goal: i64,
    #[serde(default)]
    pub value_total: i64,
    #[serde(default)]
    pub items_total: i64,
}

/// Daily/weekly quest boards.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestsPayload {
    #[serde(default)]
    pub daily_period: Option<String>,
    #[serde(default)]
    pub weekly_period: Option<String>,
    #[serde(default)]
    pub daily: Vec<Quest>,
    #[serde(default)]
    pub weekly: Vec<Quest>,
}

/// One quest row. `completed`/`claimed` arrive as 0/1 integers.
#[derive(Debug, Clone, Deserialize)]
pub struct Quest {
    pub quest_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub progress: i64,
    #[serde(default)]
    pub target: i64,
    #[serde(default)]
    pub completed: i64,
    #[serde(default)]
    pub claimed: i64,
    #[serde(default)]
    pub reward_points: i64,
    #[serde(default)]
    pub reward_raidcoins: i64,
}

impl Quest {
    pub fn is_completed(&self) -> bool {
        self.completed != 0
    }

    pub fn is_claimed(&self) -> bool {
        self.claimed != 0
    }
}

/// Monthly season standings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeasonPayload {
    #[serde(default)]
    pub season: Option<SeasonInfo>,
    #[serde(default)]
    pub top: Vec<SeasonRow>,
    #[serde(default)]
    pub me: Option<SeasonRow>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeasonInfo {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeasonRow {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub points: i64,
    #[serde(default)]
    pub raids: i64,
    #[serde(default)]
    pub extracts: i64,
    #[serde(default)]
    pub deaths: i64,
    #[serde(default)]
    pub kills: i64,
}
