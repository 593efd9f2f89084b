//! Typed endpoint methods over the transport, one per API route.

use serde::Serialize;
use serde::de::DeserializeOwned;

use arcterm_shared::api::envelope::{
    AdminUpdateRequest, BlueprintStudyRequest, CraftMakeRequest, Envelope, LoadoutOptionsRequest,
    LoadoutSetRequest, LoginRequest, MarketBuyRequest, MarketCancelRequest, MarketListRequest,
    MarketStateRequest, PageRequest, QuestClaimRequest, RaidActionRequest, RatingRequest,
    RegisterRequest, SellConfirmRequest, ShopBuyRequest, TelegramLoginRequest,
};
use arcterm_shared::api::replies::{
    AckReply, AdminReply, AuthReply, BlueprintsReply, CaseReply, CraftReply, EventReply,
    LoadoutOptionsReply, LoadoutReply, MarketReply, QuestsReply, RaidReply, RatingReply,
    SeasonReply, SellReply, ShopReply, StorageReply, WarehouseReply,
};
use arcterm_shared::api::snapshot::Snapshot;

use crate::error::ClientError;
use crate::transport::Transport;

/// Thin typed facade over [`Transport`]: serializes the request body,
/// issues exactly one POST, deserializes the reply. No retries anywhere.
pub struct ApiClient {
    transport: Box<dyn Transport>,
}

impl ApiClient {
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self { transport }
    }

    async fn call<Req, Rep>(&self, path: &str, request: &Req) -> Result<Rep, ClientError>
    where
        Req: Serialize,
        Rep: DeserializeOwned,
    {
        let body =
            serde_json::to_value(request).map_err(|e| ClientError::Parse(e.to_string()))?;
        let reply = self.transport.post(path, body).await?;
        serde_json::from_value(reply).map_err(|e| ClientError::Parse(e.to_string()))
    }

    // --- auth ---

    pub async fn auth_login(&self, request: &LoginRequest) -> Result<AuthReply, ClientError> {
        self.call("auth/login", request).await
    }

    pub async fn auth_register(&self, request: &RegisterRequest) -> Result<AuthReply, ClientError> {
        self.call("auth/register", request).await
    }

    pub async fn auth_telegram(
        &self,
        request: &TelegramLoginRequest,
    ) -> Result<AuthReply, ClientError> {
        self.call("auth/telegram", request).await
    }

    /// Silent Mini-App sign-in: the init proof travels inside the envelope.
    pub async fn auth_telegram_init(&self, envelope: &Envelope) -> Result<AuthReply, ClientError> {
        self.call("auth/telegram/init", envelope).await
    }

    // --- core state ---

    pub async fn state(&self, envelope: &Envelope) -> Result<Snapshot, ClientError> {
        self.call("state", envelope).await
    }

    pub async fn onboarding_complete(&self, envelope: &Envelope) -> Result<AckReply, ClientError> {
        self.call("onboarding/complete", envelope).await
    }

    // --- raid ---

    pub async fn raid_enter(&self, envelope: &Envelope) -> Result<RaidReply, ClientError> {
        self.call("raid/enter", envelope).await
    }

    pub async fn raid_action(&self, request: &RaidActionRequest) -> Result<RaidReply, ClientError> {
        self.call("raid/action", request).await
    }

    // --- storage / sell ---

    pub async fn storage(&self, request: &PageRequest) -> Result<StorageReply, ClientError> {
        self.call("storage", request).await
    }

    pub async fn storage_upgrade(&self, envelope: &Envelope) -> Result<StorageReply, ClientError> {
        self.call("storage/upgrade", envelope).await
    }

    pub async fn sell(&self, request: &PageRequest) -> Result<SellReply, ClientError> {
        self.call("sell", request).await
    }

    pub async fn sell_confirm(
        &self,
        request: &SellConfirmRequest,
    ) -> Result<SellReply, ClientError> {
        self.call("sell/confirm", request).await
    }

    // --- market ---

    pub async fn market(&self, request: &MarketStateRequest) -> Result<MarketReply, ClientError> {
        self.call("market", request).await
    }

    pub async fn market_list(&self, request: &MarketListRequest) -> Result<MarketReply, ClientError> {
        self.call("market/list", request).await
    }

    pub async fn market_buy(&self, request: &MarketBuyRequest) -> Result<MarketReply, ClientError> {
        self.call("market/buy", request).await
    }

    pub async fn market_cancel(
        &self,
        request: &MarketCancelRequest,
    ) -> Result<MarketReply, ClientError> {
        self.call("market/cancel", request).await
    }

    // --- shop / craft / blueprints ---

    pub async fn shop(&self, envelope: &Envelope) -> Result<ShopReply, ClientError> {
        self.call("shop", envelope).await
    }

    pub async fn shop_buy(&self, request: &ShopBuyRequest) -> Result<ShopReply, ClientError> {
        self.call("shop/buy", request).await
    }

    pub async fn craft(&self, envelope: &Envelope) -> Result<CraftReply, ClientError> {
        self.call("craft", envelope).await
    }

    pub async fn craft_make(&self, request: &CraftMakeRequest) -> Result<CraftReply, ClientError> {
        self.call("craft/make", request).await
    }

    pub async fn blueprints(&self, request: &PageRequest) -> Result<BlueprintsReply, ClientError> {
        self.call("blueprints", request).await
    }

    pub async fn blueprints_study(
        &self,
        request: &BlueprintStudyRequest,
    ) -> Result<BlueprintsReply, ClientError> {
        self.call("blueprints/study", request).await
    }

    // --- loadout ---

    pub async fn loadout(&self, envelope: &Envelope) -> Result<LoadoutReply, ClientError> {
        self.call("loadout", envelope).await
    }

    pub async fn loadout_options(
        &self,
        request: &LoadoutOptionsRequest,
    ) -> Result<LoadoutOptionsReply, ClientError> {
        self.call("loadout/options", request).await
    }

    pub async fn loadout_set(
        &self,
        request: &LoadoutSetRequest,
    ) -> Result<LoadoutReply, ClientError> {
        self.call("loadout/set", request).await
    }

    // --- peripheral views ---

    pub async fn warehouse(&self, envelope: &Envelope) -> Result<WarehouseReply, ClientError> {
        self.call("warehouse", envelope).await
    }

    pub async fn quests(&self, envelope: &Envelope) -> Result<QuestsReply, ClientError> {
        self.call("quests", envelope).await
    }

    pub async fn quest_claim(&self, request: &QuestClaimRequest) -> Result<QuestsReply, ClientError> {
        self.call("quest/claim", request).await
    }

    pub async fn rating(&self, request: &RatingRequest) -> Result<RatingReply, ClientError> {
        self.call("rating", request).await
    }

    pub async fn season(&self, envelope: &Envelope) -> Result<SeasonReply, ClientError> {
        self.call("season", envelope).await
    }

    pub async fn event(&self, envelope: &Envelope) -> Result<EventReply, ClientError> {
        self.call("event", envelope).await
    }

    pub async fn daily_case(&self, envelope: &Envelope) -> Result<CaseReply, ClientError> {
        self.call("daily_case", envelope).await
    }

    pub async fn daily_case_open(&self, envelope: &Envelope) -> Result<CaseReply, ClientError> {
        self.call("daily_case/open", envelope).await
    }

    // --- admin ---

    pub async fn admin_state(&self, envelope: &Envelope) -> Result<AdminReply, ClientError> {
        self.call("admin/state", envelope).await
    }

    pub async fn admin_update(
        &self,
        request: &AdminUpdateRequest,
    ) -> Result<AdminReply, ClientError> {
        self.call("admin/update", request).await
    }
}
