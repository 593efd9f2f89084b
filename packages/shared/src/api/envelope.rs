//! Request envelope and per-endpoint request bodies.
//!
//! Every authenticated call carries the same envelope: the bearer token, the
//! Telegram init proof (empty outside Telegram) and the chat/thread the player
//! acts in. Endpoint-specific fields are flattened next to it. Envelopes are
//! rebuilt fresh for every call and never persisted.

use serde::Serialize;

/// Common request fields attached to every authenticated call.
///
/// The server requires `init_data` to be present, so it is always serialized
/// (empty string when no Telegram proof exists). The token is attached only
/// here, never rendered.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Envelope {
    pub init_data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<i64>,
}

/// Manual login credentials. Auth endpoints take no envelope.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Manual registration form.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub nickname: String,
    pub password: String,
}

/// Telegram login-widget exchange.
#[derive(Debug, Clone, Serialize)]
pub struct TelegramLoginRequest {
    pub login_data: serde_json::Value,
}

/// Paginated list request (storage, sell).
#[derive(Debug, Clone, Serialize)]
pub struct PageRequest {
    #[serde(flatten)]
    pub envelope: Envelope,
    pub page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

/// Raid action dispatch (`loot`, `move`, `evac`, `fight`, `medkit`, `take`,
/// `skip`, `choice:<id>`).
#[derive(Debug, Clone, Serialize)]
pub struct RaidActionRequest {
    #[serde(flatten)]
    pub envelope: Envelope,
    pub action: String,
}

/// Sell confirmation. Quantity travels as `qty_raw` so "all" stays expressible.
#[derive(Debug, Clone, Serialize)]
pub struct SellConfirmRequest {
    #[serde(flatten)]
    pub envelope: Envelope,
    pub item_id: String,
    pub qty_raw: String,
    pub page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

/// Shop purchase: `kind` selects the counter (medkit, evac_beacon, insurance,
/// offer, recipe, upgrade).
#[derive(Debug, Clone, Serialize)]
pub struct ShopBuyRequest {
    #[serde(flatten)]
    pub envelope: Envelope,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CraftMakeRequest {
    #[serde(flatten)]
    pub envelope: Envelope,
    pub recipe_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlueprintStudyRequest {
    #[serde(flatten)]
    pub envelope: Envelope,
    pub item_id: String,
}

/// Loadout slot candidates, paginated per equip slot.
#[derive(Debug, Clone, Serialize)]
pub struct LoadoutOptionsRequest {
    #[serde(flatten)]
    pub envelope: Envelope,
    pub equip_type: String,
    pub page: u32,
}

/// Equip or clear a loadout slot (`item_id` absent clears it).
#[derive(Debug, Clone, Serialize)]
pub struct LoadoutSetRequest {
    #[serde(flatten)]
    pub envelope: Envelope,
    pub equip_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestClaimRequest {
    #[serde(flatten)]
    pub envelope: Envelope,
    pub kind: String,
    pub quest_id: String,
}

/// Market view request: the listings pager and the own-items pager are
/// independent.
#[derive(Debug, Clone, Serialize)]
pub struct MarketStateRequest {
    #[serde(flatten)]
    pub envelope: Envelope,
    pub page: u32,
    pub items_page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items_sort: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarketListRequest {
    #[serde(flatten)]
    pub envelope: Envelope,
    pub item_id: String,
    pub qty_raw: String,
    pub price: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarketBuyRequest {
    #[serde(flatten)]
    pub envelope: Envelope,
    pub listing_id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarketCancelRequest {
    #[serde(flatten)]
    pub envelope: Envelope,
    pub listing_id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RatingRequest {
    #[serde(flatten)]
    pub envelope: Envelope,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Admin tuning update; only fields the operator changed are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AdminUpdateRequest {
    #[serde(flatten)]
    pub envelope: Envelope,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_base: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_greed_mult: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evac_base: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evac_greed_penalty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warehouse_goal: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_week_goal: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_sell_raidcoin_cap: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_sell_count_cap: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_listing_cap: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season_reward_top1: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season_reward_top2: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season_reward_top3: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_serializes_init_data_even_when_empty() {
        // given:
        let envelope = Envelope {
            init_data: String::new(),
            auth_token: Some("T1".to_string()),
            chat_id: Some(1),
            thread_id: None,
        };

        // when:
        let value = serde_json::to_value(&envelope).unwrap();

        // then:
        assert_eq!(value["init_data"], "");
        assert_eq!(value["auth_token"], "T1");
        assert_eq!(value["chat_id"], 1);
        assert!(value.get("thread_id").is_none());
    }

    #[test]
    fn test_page_request_flattens_envelope_fields() {
        // given:
        let request = PageRequest {
            envelope: Envelope {
                init_data: String::new(),
                auth_token: Some("T1".to_string()),
                chat_id: None,
                thread_id: None,
            },
            page: 2,
            sort: Some("value".to_string()),
        };

        // when:
        let value = serde_json::to_value(&request).unwrap();

        // then: envelope fields sit next to the endpoint fields
        assert_eq!(value["auth_token"], "T1");
        assert_eq!(value["page"], 2);
        assert_eq!(value["sort"], "value");
    }

    #[test]
    fn test_admin_update_omits_unchanged_fields() {
        // given:
        let request = AdminUpdateRequest {
            warehouse_goal: Some(5000),
            ..Default::default()
        };

        // when:
        let value = serde_json::to_value(&request).unwrap();

        // then: only the changed field and the envelope survive
        assert_eq!(value["warehouse_goal"], 5000);
        assert!(value.get("event_base").is_none());
        assert!(value.get("season_reward_top1").is_none());
    }
}
