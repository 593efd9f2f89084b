//! The client session controller.
//!
//! One flat, event-driven controller: every user command maps to at most the
//! requests the corresponding web control issued, and re-renders the affected
//! view fragment from the response. Errors never escape; they surface as
//! notices (§ error taxonomy in `error.rs`), and any 401 forces
//! re-authentication no matter which endpoint produced it.

use arcterm_shared::api::envelope::{
    AdminUpdateRequest, BlueprintStudyRequest, CraftMakeRequest, LoadoutOptionsRequest,
    LoadoutSetRequest, LoginRequest, MarketBuyRequest, MarketCancelRequest, MarketListRequest,
    MarketStateRequest, PageRequest, QuestClaimRequest, RaidActionRequest, RatingRequest,
    RegisterRequest, SellConfirmRequest, ShopBuyRequest,
};
use arcterm_shared::api::replies::{
    BlueprintsReply, CraftReply, MarketReply, SellReply, ShopReply, StorageReply,
};
use arcterm_shared::api::views::{
    BlueprintsPayload, CraftPayload, EquipOption, ListEntry, MarketPayload, SellPayload,
    ShopPayload, StoragePayload,
};

use crate::api::ApiClient;
use crate::command::{Command, Tab, help_text};
use crate::error::ClientError;
use crate::formatter::ViewFormatter;
use crate::state::{AuthState, SessionState};
use crate::store::TokenStore;

const LOGIN_HINT: &str = "Войдите: login <почта> <пароль> или register <почта> <ник> <пароль>";

/// Last fetched payload per list view; backs selection checks and local
/// re-renders (picking a row re-renders without a request, like the web UI).
#[derive(Default)]
struct ViewCache {
    storage: Option<StoragePayload>,
    sell: Option<SellPayload>,
    market: Option<MarketPayload>,
    blueprints: Option<BlueprintsPayload>,
    craft: Option<CraftPayload>,
    shop: Option<ShopPayload>,
    options: Option<Vec<EquipOption>>,
    options_pages: (u32, u32),
}

pub struct Controller {
    api: ApiClient,
    store: TokenStore,
    pub state: SessionState,
    active_tab: Tab,
    cache: ViewCache,
}

impl Controller {
    pub fn new(api: ApiClient, store: TokenStore, state: SessionState) -> Self {
        Self {
            api,
            store,
            state,
            active_tab: Tab::Raid,
            cache: ViewCache::default(),
        }
    }

    /// Startup contract: restore the persisted credential; failing that,
    /// attempt a silent Telegram exchange; failing that, ask for manual
    /// login. Auth failures are notices, never fatal.
    pub async fn startup(&mut self) -> String {
        match self.store.load() {
            Ok(Some(token)) => {
                self.state.token = Some(token);
                self.state.auth = AuthState::Authenticating;
                match self.fetch_snapshot_and_authorize(None).await {
                    Ok(output) => return output,
                    Err(ClientError::Unauthorized) => {
                        tracing::info!("persisted credential rejected, dropping it");
                        self.force_logout();
                    }
                    Err(e) => {
                        tracing::warn!("credential restore failed: {}", e);
                        self.state.auth = AuthState::Unauthenticated;
                        self.state.token = None;
                        return format!("Не удалось восстановить сессию. {}", LOGIN_HINT);
                    }
                }
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("token store unreadable: {}", e),
        }

        if self.state.init_data.is_some() {
            self.state.auth = AuthState::Authenticating;
            match self.telegram_init().await {
                Ok(output) => return output,
                Err(e) => {
                    tracing::warn!("telegram exchange failed: {}", e);
                    self.state.auth = AuthState::Unauthenticated;
                }
            }
        }

        LOGIN_HINT.to_string()
    }

    /// Single entry point for parsed commands. Maps the error taxonomy to
    /// notices: 401 forces re-authentication, transport/parse failures leave
    /// prior rendered state intact.
    pub async fn dispatch(&mut self, command: Command) -> String {
        let result = self.handle(command).await;
        // an auth attempt interrupted by a failure never sticks half-way
        if result.is_err() && self.state.auth == AuthState::Authenticating {
            self.state.auth = AuthState::Unauthenticated;
        }
        match result {
            Ok(output) => output,
            Err(ClientError::Unauthorized) => {
                self.force_logout();
                format!("Сессия истекла. {}", LOGIN_HINT)
            }
            Err(ClientError::Transport(e)) => {
                tracing::warn!("transport failure: {}", e);
                "Сбой сети. Попробуйте ещё раз.".to_string()
            }
            Err(ClientError::Parse(e)) => {
                tracing::warn!("malformed reply: {}", e);
                "Некорректный ответ сервера.".to_string()
            }
            Err(ClientError::Store(e)) => format!("Не удалось сохранить данные: {}", e),
        }
    }

    async fn handle(&mut self, command: Command) -> Result<String, ClientError> {
        match command {
            Command::Help => Ok(help_text().to_string()),
            Command::Quit => Ok(String::new()),
            Command::Login { email, password } => self.login(email, password).await,
            Command::Register {
                email,
                nickname,
                password,
            } => self.register(email, nickname, password).await,
            Command::Logout => {
                self.force_logout();
                Ok("Вы вышли.".to_string())
            }
            // every game-action control is disabled while unauthenticated
            _ if !self.state.is_authenticated() => {
                Ok(format!("Сначала войдите. {}", LOGIN_HINT))
            }
            other => self.handle_game(other).await,
        }
    }

    async fn handle_game(&mut self, command: Command) -> Result<String, ClientError> {
        match command {
            Command::Tab(tab) => self.open_tab(tab).await,
            Command::Action(action) => self.raid_action(action).await,
            Command::Next => self.page_next().await,
            Command::Prev => self.page_prev().await,
            Command::ItemsNext => {
                let page = self.state.views.market.items_page + 1;
                self.refresh_market(None, Some(page)).await
            }
            Command::ItemsPrev => match self.state.views.market.prev_items_page() {
                None => Ok(String::new()),
                Some(page) => self.refresh_market(None, Some(page)).await,
            },
            Command::Sort(key) => self.sort(key).await,
            Command::Pick(id) => Ok(self.pick(id)),
            Command::Lot(id) => Ok(self.pick_lot(id)),
            Command::Confirm(qty_raw) => self.confirm_sale(qty_raw).await,
            Command::Upgrade => {
                let reply = self.api.storage_upgrade(&self.state.envelope()).await?;
                Ok(self.apply_storage(reply))
            }
            Command::Buy { kind, id } => self.buy(kind, id).await,
            Command::List { price, qty } => self.list_item(price, qty).await,
            Command::CancelListing(id) => {
                let request = MarketCancelRequest {
                    envelope: self.state.envelope(),
                    listing_id: id,
                };
                let reply = self.api.market_cancel(&request).await?;
                Ok(self.apply_market(reply))
            }
            Command::Make(recipe_id) => {
                let request = CraftMakeRequest {
                    envelope: self.state.envelope(),
                    recipe_id,
                };
                let reply = self.api.craft_make(&request).await?;
                Ok(self.apply_craft(reply))
            }
            Command::Study => self.study_blueprint().await,
            Command::Slot(slot) => {
                self.state.views.loadout.slot = Some(slot);
                self.state.views.loadout.page = 1;
                self.loadout_options(None).await
            }
            Command::Equip(item_id) => self.loadout_set(Some(item_id)).await,
            Command::ClearSlot => self.loadout_set(None).await,
            Command::Claim { kind, quest_id } => {
                let request = QuestClaimRequest {
                    envelope: self.state.envelope(),
                    kind,
                    quest_id,
                };
                let reply = self.api.quest_claim(&request).await?;
                let mut output = notice(reply.message);
                if let Some(quests) = reply.quests {
                    output.push_str(&ViewFormatter::format_quests(&quests));
                }
                Ok(output)
            }
            Command::OpenCase => self.open_case().await,
            Command::AdminSet { field, value } => self.admin_set(field, value).await,
            Command::Ack => {
                let reply = self.api.onboarding_complete(&self.state.envelope()).await?;
                self.refresh_state().await?;
                Ok(notice(reply.message) + &self.render_raid())
            }
            // auth commands already handled above
            _ => Ok(String::new()),
        }
    }

    // --- authentication lifecycle ---

    async fn login(&mut self, email: String, password: String) -> Result<String, ClientError> {
        self.state.auth = AuthState::Authenticating;
        let reply = self
            .api
            .auth_login(&LoginRequest { email, password })
            .await?;
        match reply.token {
            Some(token) if reply.ok => {
                let nickname = reply.user.and_then(|user| user.nickname);
                self.adopt_credential(token, nickname).await
            }
            _ => {
                self.state.auth = AuthState::Unauthenticated;
                Ok(reply
                    .message
                    .unwrap_or_else(|| "Не удалось войти.".to_string()))
            }
        }
    }

    async fn register(
        &mut self,
        email: String,
        nickname: String,
        password: String,
    ) -> Result<String, ClientError> {
        self.state.auth = AuthState::Authenticating;
        let reply = self
            .api
            .auth_register(&RegisterRequest {
                email,
                nickname,
                password,
            })
            .await?;
        match reply.token {
            Some(token) if reply.ok => {
                let nickname = reply.user.and_then(|user| user.nickname);
                self.adopt_credential(token, nickname).await
            }
            _ => {
                self.state.auth = AuthState::Unauthenticated;
                Ok(reply
                    .message
                    .unwrap_or_else(|| "Не удалось зарегистрироваться.".to_string()))
            }
        }
    }

    async fn telegram_init(&mut self) -> Result<String, ClientError> {
        let reply = self.api.auth_telegram_init(&self.state.envelope()).await?;
        match reply.token {
            Some(token) if reply.ok => {
                let nickname = reply.user.and_then(|user| user.nickname);
                self.adopt_credential(token, nickname).await
            }
            _ => {
                self.state.auth = AuthState::Unauthenticated;
                Ok(format!(
                    "{} {}",
                    reply
                        .message
                        .unwrap_or_else(|| "Вход через Telegram не удался.".to_string()),
                    LOGIN_HINT
                ))
            }
        }
    }

    /// Entering `authenticated`: persist the credential, reveal the game UI
    /// and trigger a full state refresh, in that order.
    async fn adopt_credential(
        &mut self,
        token: String,
        nickname: Option<String>,
    ) -> Result<String, ClientError> {
        self.store.save(&token)?;
        self.state.token = Some(token);
        self.fetch_snapshot_and_authorize(nickname).await
    }

    async fn fetch_snapshot_and_authorize(
        &mut self,
        nickname: Option<String>,
    ) -> Result<String, ClientError> {
        let snapshot = self.api.state(&self.state.envelope()).await?;
        let nickname = nickname
            .or_else(|| snapshot.display_name.clone())
            .unwrap_or_else(|| "Игрок".to_string());
        self.state.auth = AuthState::Authenticated {
            nickname: nickname.clone(),
        };
        self.state.snapshot = Some(snapshot);
        self.active_tab = Tab::Raid;

        let mut output = ViewFormatter::format_authorized(&nickname);
        output.push('\n');
        output.push_str(&self.render_raid());
        Ok(output)
    }

    /// Entering `unauthenticated`: purge the persisted credential, the
    /// in-memory credential and the cached init proof, and drop every view.
    fn force_logout(&mut self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!("failed to clear persisted credential: {}", e);
        }
        self.state.teardown();
        self.cache = ViewCache::default();
        self.active_tab = Tab::Raid;
    }

    // --- core state / raid ---

    async fn refresh_state(&mut self) -> Result<(), ClientError> {
        let snapshot = self.api.state(&self.state.envelope()).await?;
        self.state.snapshot = Some(snapshot);
        Ok(())
    }

    fn render_raid(&self) -> String {
        match &self.state.snapshot {
            Some(snapshot) => {
                let mut output = String::new();
                if snapshot.onboarding_required {
                    output.push_str(&ViewFormatter::format_onboarding(&snapshot.onboarding_steps));
                    output.push('\n');
                }
                output.push_str(&ViewFormatter::format_raid(snapshot));
                output
            }
            None => "Нет данных. Откройте вкладку raid.".to_string(),
        }
    }

    /// Raid dispatcher: `enter` posts to its own endpoint, everything else to
    /// the action endpoint. The echoed snapshot (or the previous one when the
    /// reply has none) drives a full re-render.
    async fn raid_action(&mut self, action: String) -> Result<String, ClientError> {
        let reply = if action == "enter" {
            self.api.raid_enter(&self.state.envelope()).await?
        } else {
            let request = RaidActionRequest {
                envelope: self.state.envelope(),
                action,
            };
            self.api.raid_action(&request).await?
        };
        if let Some(snapshot) = reply.state {
            self.state.snapshot = Some(snapshot);
        }
        Ok(notice(reply.message) + &self.render_raid())
    }

    // --- tab switching ---

    /// Switching tabs triggers exactly the refreshes relevant to that tab:
    /// storage also refreshes sell, craft also refreshes blueprints.
    async fn open_tab(&mut self, tab: Tab) -> Result<String, ClientError> {
        self.active_tab = tab;
        match tab {
            Tab::Raid => {
                self.refresh_state().await?;
                Ok(self.render_raid())
            }
            Tab::Storage => {
                let storage = self.refresh_storage(None).await?;
                let sell = self.refresh_sell(None).await?;
                Ok(format!("{}\n\n{}", storage, sell))
            }
            Tab::Sell => self.refresh_sell(None).await,
            Tab::Shop => {
                let reply = self.api.shop(&self.state.envelope()).await?;
                Ok(self.apply_shop(reply))
            }
            Tab::Craft => {
                let craft = {
                    let reply = self.api.craft(&self.state.envelope()).await?;
                    self.apply_craft(reply)
                };
                let blueprints = self.refresh_blueprints(None).await?;
                Ok(format!("{}\n\n{}", craft, blueprints))
            }
            Tab::Blueprints => self.refresh_blueprints(None).await,
            Tab::Loadout => {
                let reply = self.api.loadout(&self.state.envelope()).await?;
                let mut output = notice(reply.message);
                if let Some(payload) = reply.loadout {
                    output.push_str(&ViewFormatter::format_loadout(&payload));
                }
                Ok(output)
            }
            Tab::Warehouse => {
                let reply = self.api.warehouse(&self.state.envelope()).await?;
                let mut output = notice(reply.message);
                if let Some(payload) = reply.warehouse {
                    output.push_str(&ViewFormatter::format_warehouse(&payload));
                }
                Ok(output)
            }
            Tab::Quests => {
                let reply = self.api.quests(&self.state.envelope()).await?;
                let mut output = notice(reply.message);
                if let Some(payload) = reply.quests {
                    output.push_str(&ViewFormatter::format_quests(&payload));
                }
                Ok(output)
            }
            Tab::Market => self.refresh_market(None, None).await,
            Tab::Rating => {
                let request = RatingRequest {
                    envelope: self.state.envelope(),
                    limit: None,
                };
                let reply = self.api.rating(&request).await?;
                let mut output = notice(reply.message);
                if let Some(payload) = reply.rating {
                    output.push_str(&ViewFormatter::format_rating(&payload));
                }
                Ok(output)
            }
            Tab::Season => {
                let reply = self.api.season(&self.state.envelope()).await?;
                let mut output = notice(reply.message);
                if let Some(payload) = reply.season {
                    output.push_str(&ViewFormatter::format_season(&payload));
                }
                Ok(output)
            }
            Tab::Event => {
                let reply = self.api.event(&self.state.envelope()).await?;
                let mut output = notice(reply.message);
                if let Some(payload) = reply.event {
                    output.push_str(&ViewFormatter::format_event(&payload));
                } else {
                    output.push_str("Активного события нет.");
                }
                Ok(output)
            }
            Tab::Case => {
                let reply = self.api.daily_case(&self.state.envelope()).await?;
                let mut output = notice(reply.message);
                if let Some(payload) = reply.case {
                    output.push_str(&ViewFormatter::format_case(&payload));
                }
                Ok(output)
            }
            Tab::Admin => {
                // the tab exists only for accounts the snapshot marks as admin
                if !self.state.snapshot.as_ref().is_some_and(|s| s.is_admin) {
                    return Ok("Недостаточно прав.".to_string());
                }
                let reply = self.api.admin_state(&self.state.envelope()).await?;
                let mut output = notice(reply.message);
                if let Some(settings) = reply.settings {
                    output.push_str(&ViewFormatter::format_admin(&settings));
                }
                Ok(output)
            }
        }
    }

    // --- pagination and sorting ---

    async fn page_next(&mut self) -> Result<String, ClientError> {
        match self.active_tab {
            Tab::Storage => {
                let page = self.state.views.storage.next_page();
                self.refresh_storage(Some(page)).await
            }
            Tab::Sell => {
                let page = self.state.views.sell.next_page();
                self.refresh_sell(Some(page)).await
            }
            Tab::Blueprints => {
                let page = self.state.views.blueprints.next_page();
                self.refresh_blueprints(Some(page)).await
            }
            Tab::Market => {
                let page = self.state.views.market.page + 1;
                self.refresh_market(Some(page), None).await
            }
            Tab::Loadout => {
                let page = self.state.views.loadout.page + 1;
                self.loadout_options(Some(page)).await
            }
            _ => Ok("Эта вкладка не листается.".to_string()),
        }
    }

    /// "previous" at page 1 is a no-op: no request is issued at all.
    async fn page_prev(&mut self) -> Result<String, ClientError> {
        match self.active_tab {
            Tab::Storage => match self.state.views.storage.prev_page() {
                None => Ok(String::new()),
                Some(page) => self.refresh_storage(Some(page)).await,
            },
            Tab::Sell => match self.state.views.sell.prev_page() {
                None => Ok(String::new()),
                Some(page) => self.refresh_sell(Some(page)).await,
            },
            Tab::Blueprints => match self.state.views.blueprints.prev_page() {
                None => Ok(String::new()),
                Some(page) => self.refresh_blueprints(Some(page)).await,
            },
            Tab::Market => match self.state.views.market.prev_page() {
                None => Ok(String::new()),
                Some(page) => self.refresh_market(Some(page), None).await,
            },
            Tab::Loadout => {
                let page = self.state.views.loadout.page;
                if page <= 1 {
                    Ok(String::new())
                } else {
                    self.loadout_options(Some(page - 1)).await
                }
            }
            _ => Ok("Эта вкладка не листается.".to_string()),
        }
    }

    async fn sort(&mut self, key: String) -> Result<String, ClientError> {
        match self.active_tab {
            Tab::Storage => {
                self.state.views.storage.sort = Some(key);
                self.refresh_storage(None).await
            }
            Tab::Sell => {
                self.state.views.sell.sort = Some(key);
                self.refresh_sell(None).await
            }
            Tab::Market => {
                self.state.views.market.items_sort = Some(key);
                self.refresh_market(None, None).await
            }
            _ => Ok("Здесь нет сортировки.".to_string()),
        }
    }

    // --- selection (client-local, no requests) ---

    fn pick(&mut self, id: String) -> String {
        match self.active_tab {
            Tab::Storage => {
                let Some(payload) = &self.cache.storage else {
                    return "Сначала откройте вкладку storage.".to_string();
                };
                if !payload.items.iter().any(|entry| entry.id == id) {
                    return "Предмет не найден.".to_string();
                }
                self.state.views.storage.selected = Some(id);
                self.render_storage()
            }
            Tab::Sell => {
                let Some(payload) = &self.cache.sell else {
                    return "Сначала откройте вкладку sell.".to_string();
                };
                if !payload.items.iter().any(|entry| entry.id == id) {
                    return "Предмет не найден.".to_string();
                }
                self.state.views.sell.selected = Some(id);
                self.render_sell()
            }
            Tab::Blueprints => {
                let Some(payload) = &self.cache.blueprints else {
                    return "Сначала откройте вкладку blueprints.".to_string();
                };
                if !payload.items.iter().any(|entry| entry.id == id) {
                    return "Чертёж недоступен.".to_string();
                }
                self.state.views.blueprints.selected = Some(id);
                self.render_blueprints()
            }
            Tab::Market => {
                let Some(payload) = &self.cache.market else {
                    return "Сначала откройте вкладку market.".to_string();
                };
                if !payload.items.iter().any(|entry| entry.id == id) {
                    return "Предмет не найден.".to_string();
                }
                self.state.views.market.selected_item = Some(id);
                self.render_market()
            }
            Tab::Loadout => {
                let Some(options) = &self.cache.options else {
                    return "Сначала выберите слот: slot <слот>".to_string();
                };
                if !options.iter().any(|option| option.id == id) {
                    return "Предмет не найден.".to_string();
                }
                self.state.views.loadout.selected = Some(id.clone());
                format!("Выбрано: {} (equip {})", id, id)
            }
            _ => "Здесь нечего выбирать.".to_string(),
        }
    }

    fn pick_lot(&mut self, id: i64) -> String {
        if self.active_tab != Tab::Market {
            return "Лоты есть только на рынке.".to_string();
        }
        let Some(payload) = &self.cache.market else {
            return "Сначала откройте вкладку market.".to_string();
        };
        if !payload.listings.iter().any(|listing| listing.id == id) {
            return "Лот уже недоступен.".to_string();
        }
        self.state.views.market.selected_listing = Some(id);
        self.render_market()
    }

    // --- storage / sell ---

    async fn refresh_storage(&mut self, page: Option<u32>) -> Result<String, ClientError> {
        let request = PageRequest {
            envelope: self.state.envelope(),
            page: page.unwrap_or(self.state.views.storage.page),
            sort: self.state.views.storage.sort.clone(),
        };
        let reply = self.api.storage(&request).await?;
        Ok(self.apply_storage(reply))
    }

    fn apply_storage(&mut self, reply: StorageReply) -> String {
        let mut output = notice(reply.message);
        if let Some(payload) = reply.storage {
            let view = &mut self.state.views.storage;
            view.page = payload.page;
            view.sort = payload.sort.clone();
            let ids: Vec<&str> = payload.items.iter().map(|entry| entry.id.as_str()).collect();
            view.reconcile_selection(&ids);
            self.cache.storage = Some(payload);
        }
        output.push_str(&self.render_storage());
        output
    }

    fn render_storage(&self) -> String {
        match &self.cache.storage {
            Some(payload) => ViewFormatter::format_storage(
                payload,
                selected_label(&payload.items, self.state.views.storage.selected.as_deref()),
            ),
            None => String::new(),
        }
    }

    async fn refresh_sell(&mut self, page: Option<u32>) -> Result<String, ClientError> {
        let request = PageRequest {
            envelope: self.state.envelope(),
            page: page.unwrap_or(self.state.views.sell.page),
            sort: self.state.views.sell.sort.clone(),
        };
        let reply = self.api.sell(&request).await?;
        Ok(self.apply_sell(reply))
    }

    fn apply_sell(&mut self, reply: SellReply) -> String {
        let mut output = notice(reply.message);
        if let Some(payload) = reply.sell {
            let view = &mut self.state.views.sell;
            view.page = payload.page;
            view.sort = payload.sort.clone();
            let ids: Vec<&str> = payload.items.iter().map(|entry| entry.id.as_str()).collect();
            view.reconcile_selection(&ids);
            self.cache.sell = Some(payload);
        }
        output.push_str(&self.render_sell());
        output
    }

    fn render_sell(&self) -> String {
        match &self.cache.sell {
            Some(payload) => ViewFormatter::format_sell(
                payload,
                selected_label(&payload.items, self.state.views.sell.selected.as_deref()),
            ),
            None => String::new(),
        }
    }

    async fn confirm_sale(&mut self, qty_raw: String) -> Result<String, ClientError> {
        if self.active_tab != Tab::Sell && self.active_tab != Tab::Storage {
            return Ok("Продажа идёт на вкладке sell.".to_string());
        }
        let Some(item_id) = self.state.views.sell.selected.clone() else {
            return Ok("Выберите предмет: pick <id>".to_string());
        };
        let request = SellConfirmRequest {
            envelope: self.state.envelope(),
            item_id,
            qty_raw,
            page: self.state.views.sell.page,
            sort: self.state.views.sell.sort.clone(),
        };
        let reply = self.api.sell_confirm(&request).await?;
        Ok(self.apply_sell(reply))
    }

    // --- market ---

    async fn refresh_market(
        &mut self,
        page: Option<u32>,
        items_page: Option<u32>,
    ) -> Result<String, ClientError> {
        let request = MarketStateRequest {
            envelope: self.state.envelope(),
            page: page.unwrap_or(self.state.views.market.page),
            items_page: items_page.unwrap_or(self.state.views.market.items_page),
            items_sort: self.state.views.market.items_sort.clone(),
        };
        let reply = self.api.market(&request).await?;
        Ok(self.apply_market(reply))
    }

    fn apply_market(&mut self, reply: MarketReply) -> String {
        let mut output = notice(reply.message);
        if let Some(payload) = reply.market {
            let view = &mut self.state.views.market;
            view.page = payload.page;
            view.items_page = payload.items_page;
            view.items_sort = payload.items_sort.clone();
            let item_ids: Vec<&str> =
                payload.items.iter().map(|entry| entry.id.as_str()).collect();
            let listing_ids: Vec<i64> =
                payload.listings.iter().map(|listing| listing.id).collect();
            view.reconcile(&item_ids, &listing_ids);
            self.cache.market = Some(payload);
        }
        output.push_str(&self.render_market());
        output
    }

    fn render_market(&self) -> String {
        match &self.cache.market {
            Some(payload) => {
                let view = &self.state.views.market;
                ViewFormatter::format_market(
                    payload,
                    selected_label(&payload.items, view.selected_item.as_deref()),
                    view.selected_listing,
                )
            }
            None => String::new(),
        }
    }

    async fn list_item(&mut self, price: i64, qty_raw: String) -> Result<String, ClientError> {
        if self.active_tab != Tab::Market {
            return Ok("Лоты выставляются на вкладке market.".to_string());
        }
        let Some(item_id) = self.state.views.market.selected_item.clone() else {
            return Ok("Выберите предмет: pick <id>".to_string());
        };
        let request = MarketListRequest {
            envelope: self.state.envelope(),
            item_id,
            qty_raw,
            price,
        };
        let reply = self.api.market_list(&request).await?;
        Ok(self.apply_market(reply))
    }

    async fn buy(
        &mut self,
        kind: Option<String>,
        id: Option<String>,
    ) -> Result<String, ClientError> {
        match kind {
            // bare `buy` purchases the selected market lot
            None => {
                if self.active_tab != Tab::Market {
                    return Ok("Что купить? buy <вид> в магазине, lot + buy на рынке.".to_string());
                }
                let Some(listing_id) = self.state.views.market.selected_listing else {
                    return Ok("Выберите лот: lot <N>".to_string());
                };
                let request = MarketBuyRequest {
                    envelope: self.state.envelope(),
                    listing_id,
                };
                let reply = self.api.market_buy(&request).await?;
                Ok(self.apply_market(reply))
            }
            Some(kind) => {
                // recipe purchases carry recipe_id, showcase offers item_id;
                // eligibility is the server's call
                let (item_id, recipe_id) = match kind.as_str() {
                    "recipe" => (None, id),
                    _ => (id, None),
                };
                let request = ShopBuyRequest {
                    envelope: self.state.envelope(),
                    kind,
                    item_id,
                    recipe_id,
                };
                let reply = self.api.shop_buy(&request).await?;
                Ok(self.apply_shop(reply))
            }
        }
    }

    // --- shop / craft / blueprints ---

    fn apply_shop(&mut self, reply: ShopReply) -> String {
        let mut output = notice(reply.message);
        if let Some(payload) = reply.shop {
            self.cache.shop = Some(payload);
        }
        if let Some(payload) = &self.cache.shop {
            output.push_str(&ViewFormatter::format_shop(payload));
        }
        output
    }

    fn apply_craft(&mut self, reply: CraftReply) -> String {
        let mut output = notice(reply.message);
        if let Some(payload) = reply.craft {
            self.cache.craft = Some(payload);
        }
        if let Some(payload) = &self.cache.craft {
            output.push_str(&ViewFormatter::format_craft(payload));
        }
        output
    }

    async fn refresh_blueprints(&mut self, page: Option<u32>) -> Result<String, ClientError> {
        let request = PageRequest {
            envelope: self.state.envelope(),
            page: page.unwrap_or(self.state.views.blueprints.page),
            sort: None,
        };
        let reply = self.api.blueprints(&request).await?;
        Ok(self.apply_blueprints(reply))
    }

    fn apply_blueprints(&mut self, reply: BlueprintsReply) -> String {
        let mut output = notice(reply.message);
        if let Some(payload) = reply.blueprints {
            let view = &mut self.state.views.blueprints;
            view.page = payload.page;
            let ids: Vec<&str> = payload.items.iter().map(|entry| entry.id.as_str()).collect();
            view.reconcile_selection(&ids);
            self.cache.blueprints = Some(payload);
        }
        output.push_str(&self.render_blueprints());
        output
    }

    fn render_blueprints(&self) -> String {
        match &self.cache.blueprints {
            Some(payload) => {
                let selected = self.state.views.blueprints.selected.as_deref().and_then(|id| {
                    payload
                        .items
                        .iter()
                        .find(|entry| entry.id == id)
                        .map(|entry| entry.name.as_deref().unwrap_or(&entry.id))
                });
                ViewFormatter::format_blueprints(payload, selected)
            }
            None => String::new(),
        }
    }

    async fn study_blueprint(&mut self) -> Result<String, ClientError> {
        let Some(item_id) = self.state.views.blueprints.selected.clone() else {
            return Ok("Выберите чертёж: pick <id>".to_string());
        };
        let request = BlueprintStudyRequest {
            envelope: self.state.envelope(),
            item_id,
        };
        let reply = self.api.blueprints_study(&request).await?;
        Ok(self.apply_blueprints(reply))
    }

    // --- loadout ---

    async fn loadout_options(&mut self, page: Option<u32>) -> Result<String, ClientError> {
        let Some(slot) = self.state.views.loadout.slot.clone() else {
            return Ok("Сначала выберите слот: slot <слот>".to_string());
        };
        let request = LoadoutOptionsRequest {
            envelope: self.state.envelope(),
            equip_type: slot.clone(),
            page: page.unwrap_or(self.state.views.loadout.page),
        };
        let reply = self.api.loadout_options(&request).await?;
        self.state.views.loadout.page = reply.page;
        let ids: Vec<&str> = reply.options.iter().map(|option| option.id.as_str()).collect();
        if let Some(selected) = &self.state.views.loadout.selected
            && !ids.contains(&selected.as_str())
        {
            self.state.views.loadout.selected = None;
        }
        self.cache.options_pages = (reply.page, reply.total_pages);
        self.cache.options = Some(reply.options);
        let (current, total) = self.cache.options_pages;
        Ok(ViewFormatter::format_loadout_options(
            &slot,
            self.cache.options.as_deref().unwrap_or(&[]),
            current,
            total,
        ))
    }

    async fn loadout_set(&mut self, item_id: Option<String>) -> Result<String, ClientError> {
        let Some(slot) = self.state.views.loadout.slot.clone() else {
            return Ok("Сначала выберите слот: slot <слот>".to_string());
        };
        let request = LoadoutSetRequest {
            envelope: self.state.envelope(),
            equip_type: slot,
            item_id,
        };
        let reply = self.api.loadout_set(&request).await?;
        let mut output = notice(reply.message);
        if let Some(payload) = reply.loadout {
            output.push_str(&ViewFormatter::format_loadout(&payload));
        }
        Ok(output)
    }

    // --- daily case ---

    /// After a successful open the client refreshes case status, storage and
    /// core state, in that order.
    async fn open_case(&mut self) -> Result<String, ClientError> {
        let reply = self.api.daily_case_open(&self.state.envelope()).await?;
        let mut output = notice(reply.message);
        if let Some(items) = &reply.items {
            output.push_str(&ViewFormatter::format_case_items(items));
        }
        let status = self.api.daily_case(&self.state.envelope()).await?;
        if let Some(payload) = status.case.or(reply.case) {
            output.push_str(&ViewFormatter::format_case(&payload));
            output.push('\n');
        }
        output.push_str(&self.refresh_storage(None).await?);
        self.refresh_state().await?;
        if let Some(snapshot) = &self.state.snapshot {
            output.push('\n');
            output.push_str(&ViewFormatter::format_status_bar(snapshot));
        }
        Ok(output)
    }

    // --- admin ---

    async fn admin_set(&mut self, field: String, value: String) -> Result<String, ClientError> {
        let mut request = AdminUpdateRequest {
            envelope: self.state.envelope(),
            ..Default::default()
        };
        let float = value.parse::<f64>().ok();
        let int = value.parse::<i64>().ok();
        let applied = match field.as_str() {
            "event_base" => set_field(&mut request.event_base, float),
            "event_greed_mult" => set_field(&mut request.event_greed_mult, float),
            "evac_base" => set_field(&mut request.evac_base, float),
            "evac_greed_penalty" => set_field(&mut request.evac_greed_penalty, float),
            "warehouse_goal" => set_field(&mut request.warehouse_goal, int),
            "event_week_goal" => set_field(&mut request.event_week_goal, int),
            "daily_sell_raidcoin_cap" => set_field(&mut request.daily_sell_raidcoin_cap, int),
            "daily_sell_count_cap" => set_field(&mut request.daily_sell_count_cap, int),
            "market_listing_cap" => set_field(&mut request.market_listing_cap, int),
            "season_reward_top1" => set_field(&mut request.season_reward_top1, int),
            "season_reward_top2" => set_field(&mut request.season_reward_top2, int),
            "season_reward_top3" => set_field(&mut request.season_reward_top3, int),
            _ => return Ok("Неизвестный параметр.".to_string()),
        };
        if !applied {
            return Ok("Некорректное значение.".to_string());
        }
        let reply = self.api.admin_update(&request).await?;
        let mut output = notice(reply.message);
        if let Some(settings) = reply.settings {
            output.push_str(&ViewFormatter::format_admin(&settings));
        }
        Ok(output)
    }
}

fn set_field<T>(slot: &mut Option<T>, value: Option<T>) -> bool {
    *slot = value;
    slot.is_some()
}

fn notice(message: Option<String>) -> String {
    match message {
        Some(message) if !message.is_empty() => format!("{}\n", message),
        _ => String::new(),
    }
}

fn selected_label<'a>(items: &'a [ListEntry], selected: Option<&str>) -> Option<&'a str> {
    selected
        .and_then(|id| items.iter().find(|entry| entry.id == id))
        .map(|entry| entry.label())
}
