//! View rendering for terminal display.
//!
//! Pure functions from payloads to text fragments. Each fragment replaces the
//! previous render of its view entirely; nothing here mutates state or talks
//! to the network.

use chrono::NaiveDate;

use arcterm_shared::api::snapshot::{ItemInfo, QuestsPayload, SeasonPayload, Snapshot};
use arcterm_shared::api::views::{
    AdminSettings, BlueprintsPayload, CaseItem, CasePayload, CraftPayload, EquipOption,
    EventPayload, ListEntry, LoadoutPayload, MarketPayload, RatingPayload, SellPayload,
    ShopPayload, StoragePayload, WarehousePayload,
};

use crate::phase::{ActionButton, RaidPhase, available_actions, derive_phase};

const RULE: &str = "------------------------------------------------------------";

/// View formatter for terminal display
pub struct ViewFormatter;

impl ViewFormatter {
    /// Format the authorized banner shown after a successful auth exchange.
    ///
    /// # Arguments
    ///
    /// * `nickname` - Display name from the auth reply or snapshot
    pub fn format_authorized(nickname: &str) -> String {
        format!("Авторизован: {}", nickname)
    }

    /// One-line player summary rendered above the raid view.
    pub fn format_status_bar(snapshot: &Snapshot) -> String {
        let rating = &snapshot.rating;
        format!(
            "Очки: {} · RC: {} · Склад: {}/{} · Рейды: {} · Эвакуации: {} · Убийства: {} · Смерти: {}",
            rating.points,
            rating.raidcoins,
            snapshot.storage.used,
            snapshot.storage.limit,
            rating.raids,
            rating.extracts,
            rating.kills,
            rating.deaths
        )
    }

    /// Render the raid tab: player summary, phase-specific body and the
    /// action buttons derived from the snapshot.
    ///
    /// Disabled buttons are wrapped in parentheses, enabled ones in
    /// brackets, mirroring the web UI's disabled state.
    pub fn format_raid(snapshot: &Snapshot) -> String {
        let mut output = String::new();
        output.push_str(&Self::format_status_bar(snapshot));
        output.push('\n');

        match derive_phase(snapshot) {
            RaidPhase::Idle => {
                output.push_str("Активного рейда нет.\n");
            }
            RaidPhase::PendingItem { session, item } => {
                output.push_str(&Self::session_line(session));
                output.push_str(&format!("Найден предмет: {}\n", Self::item_card(item)));
            }
            RaidPhase::PendingChoice { session, choice } => {
                output.push_str(&Self::session_line(session));
                if let Some(text) = &choice.text {
                    output.push_str(text);
                    output.push('\n');
                }
            }
            RaidPhase::Combat { session, enemy } => {
                output.push_str(&Self::session_line(session));
                output.push_str(&format!(
                    "Бой: {} (HP {}/{})\n",
                    enemy.name, enemy.hp_current, enemy.hp
                ));
            }
            RaidPhase::Exploring { session } => {
                output.push_str(&Self::session_line(session));
            }
        }

        output.push_str(&Self::format_actions(&available_actions(snapshot)));
        output
    }

    fn session_line(session: &arcterm_shared::api::snapshot::RaidSession) -> String {
        let hard = if session.hard_mode { " · тяжёлый рейд" } else { "" };
        format!(
            "HP {}/{} · алчность {} · лут {} · убийства {}{}\n",
            session.hp, session.max_hp, session.greed, session.loot_value, session.kills, hard
        )
    }

    /// Item card in the game's usual shape: emoji, name, rarity label.
    fn item_card(item: &ItemInfo) -> String {
        let emoji = item.emoji.as_deref().unwrap_or("⚪️");
        match item.rarity.as_deref() {
            Some(rarity) => format!("{} {} ({})", emoji, item.label(), rarity_label(rarity)),
            None => format!("{} {}", emoji, item.label()),
        }
    }

    pub fn format_actions(buttons: &[ActionButton]) -> String {
        let rendered: Vec<String> = buttons
            .iter()
            .map(|button| {
                if button.enabled {
                    format!("[{}]", button.label)
                } else {
                    format!("({})", button.label)
                }
            })
            .collect();
        rendered.join(" ")
    }

    /// Selection notice under a list: the picked row or the prompt state.
    pub fn format_selection(selected: Option<&str>) -> String {
        match selected {
            Some(label) => format!("Выбрано: {}", label),
            None => "Выберите предмет: pick <id>".to_string(),
        }
    }

    fn pager_line(page: u32, total_pages: u32, sort_label: Option<&str>) -> String {
        match sort_label {
            Some(sort) => format!("Стр. {}/{} · сорт: {}", page, total_pages, sort),
            None => format!("Стр. {}/{}", page, total_pages),
        }
    }

    fn entry_row(entry: &ListEntry) -> String {
        let emoji = entry.emoji.as_deref().unwrap_or("·");
        let mut row = format!("{} {} [{}] x{}", emoji, entry.label(), entry.id, entry.qty);
        if let Some(total) = entry.total_price {
            let unit = entry.unit_price.unwrap_or(0);
            row.push_str(&format!(" — {} RC/шт, всего {} RC", unit, total));
        }
        row
    }

    pub fn format_storage(payload: &StoragePayload, selected: Option<&str>) -> String {
        let mut output = format!(
            "Хранилище {}/{} · ценность {} · {} очк. · {} RC\n",
            payload.used, payload.limit, payload.total_value, payload.points, payload.raidcoins
        );
        if payload.items.is_empty() {
            output.push_str("Хранилище пусто.\n");
        } else {
            for entry in &payload.items {
                output.push_str(&Self::entry_row(entry));
                output.push('\n');
            }
        }
        output.push_str(&Self::pager_line(
            payload.page,
            payload.total_pages,
            payload.sort_label.as_deref(),
        ));
        output.push('\n');
        if payload.can_upgrade
            && let Some(cost) = payload.upgrade_cost
        {
            output.push_str(&format!("Улучшение склада: {} очк. (upgrade)\n", cost));
        }
        output.push_str(&Self::format_selection(selected));
        output
    }

    pub fn format_sell(payload: &SellPayload, selected: Option<&str>) -> String {
        let mut output = format!("Продажа · {} RC\n", payload.raidcoins);
        if payload.items.is_empty() {
            output.push_str("Продавать нечего.\n");
        } else {
            for entry in &payload.items {
                output.push_str(&Self::entry_row(entry));
                output.push('\n');
            }
        }
        output.push_str(&Self::pager_line(
            payload.page,
            payload.total_pages,
            payload.sort_label.as_deref(),
        ));
        output.push('\n');
        output.push_str(&Self::format_selection(selected));
        output
    }

    /// Render the market: public listings with their own pager, then the
    /// player's listings, then the own-items list with the second pager.
    pub fn format_market(
        payload: &MarketPayload,
        selected_item: Option<&str>,
        selected_listing: Option<i64>,
    ) -> String {
        let mut output = format!(
            "Рынок · {} RC · лимит лотов: {}\n",
            payload.raidcoins, payload.listing_cap
        );

        if payload.listings.is_empty() {
            output.push_str("Лотов нет.\n");
        } else {
            for listing in &payload.listings {
                let emoji = listing.emoji.as_deref().unwrap_or("·");
                let name = listing
                    .name
                    .as_deref()
                    .or(listing.item_id.as_deref())
                    .unwrap_or("?");
                let seller = listing.seller_name.as_deref().unwrap_or("Игрок");
                output.push_str(&format!(
                    "#{} {} {} x{} — {} RC · {}\n",
                    listing.id, emoji, name, listing.qty, listing.price, seller
                ));
            }
        }
        output.push_str(&Self::pager_line(payload.page, payload.total_pages, None));
        output.push('\n');
        match selected_listing {
            Some(id) => output.push_str(&format!("Лот выбран: #{} (buy)\n", id)),
            None => output.push_str("Выберите лот: lot <N>\n"),
        }

        if !payload.my_listings.is_empty() {
            output.push_str("Мои лоты:\n");
            for listing in &payload.my_listings {
                let name = listing
                    .name
                    .as_deref()
                    .or(listing.item_id.as_deref())
                    .unwrap_or("?");
                output.push_str(&format!(
                    "#{} {} x{} — {} RC (cancel {})\n",
                    listing.id, name, listing.qty, listing.price, listing.id
                ));
            }
        }

        output.push_str(RULE);
        output.push('\n');
        output.push_str("Мои предметы:\n");
        if payload.items.is_empty() {
            output.push_str("Выставлять нечего.\n");
        } else {
            for entry in &payload.items {
                output.push_str(&Self::entry_row(entry));
                output.push('\n');
            }
        }
        output.push_str(&format!(
            "Стр. {}/{} (inext/iprev) · сорт: {}\n",
            payload.items_page,
            payload.items_total_pages,
            payload.items_sort_label.as_deref().unwrap_or("—")
        ));
        output.push_str(&Self::format_selection(selected_item));
        output
    }

    pub fn format_shop(payload: &ShopPayload) -> String {
        let mut output = format!(
            "Магазин · {} очк. · {} RC · покупок сегодня: {}/{} · налог +{}%\n",
            payload.points,
            payload.raidcoins,
            payload.purchases_today,
            payload.daily_limit,
            payload.tax_pct
        );
        if payload.limit_reached {
            output.push_str("Лимит покупок на сегодня исчерпан.\n");
        }
        for item in &payload.static_items {
            let label = item.label.as_deref().unwrap_or(&item.kind);
            let currency = match item.currency.as_deref() {
                Some("rc") | None => "RC",
                Some("points") => "очк.",
                Some(other) => other,
            };
            let availability = if item.available { "" } else { " — недоступно" };
            output.push_str(&format!(
                "{} — {} {} (buy {}){}\n",
                label, item.price, currency, item.kind, availability
            ));
        }
        if !payload.offers.is_empty() {
            output.push_str("Витрина дня:\n");
            for offer in &payload.offers {
                let label = offer.label.as_deref().unwrap_or(&offer.item_id);
                output.push_str(&format!(
                    "{} — {} очк. (buy offer {})\n",
                    label, offer.price, offer.item_id
                ));
            }
        }
        if let Some(recipe) = &payload.recipe_offer {
            let name = recipe.name.as_deref().unwrap_or(&recipe.recipe_id);
            if recipe.owned {
                output.push_str(&format!("Рецепт {} — уже изучен\n", name));
            } else {
                output.push_str(&format!(
                    "Рецепт {} — {} очк. (buy recipe {})\n",
                    name, recipe.price, recipe.recipe_id
                ));
            }
        }
        if let Some(upgrade) = &payload.upgrade
            && upgrade.can_upgrade
        {
            output.push_str(&format!(
                "Улучшение склада — {} очк. (buy upgrade)\n",
                upgrade.cost
            ));
        }
        output
    }

    pub fn format_craft(payload: &CraftPayload) -> String {
        let mut output = format!(
            "Крафт · склад {}/{}\n",
            payload.storage_used, payload.storage_limit
        );
        if payload.recipes.is_empty() {
            output.push_str("Доступных рецептов нет.\n");
            return output;
        }
        for recipe in &payload.recipes {
            let name = recipe.name.as_deref().unwrap_or(&recipe.id);
            let marker = if recipe.craftable { "✅" } else { "✖" };
            output.push_str(&format!("{} {} [{}]\n", marker, name, recipe.id));
            for ingredient in &recipe.ingredients {
                let ing_name = ingredient.name.as_deref().unwrap_or(&ingredient.id);
                output.push_str(&format!(
                    "   {} {}/{}\n",
                    ing_name, ingredient.have, ingredient.qty
                ));
            }
        }
        output.push_str("Скрафтить: make <рецепт>");
        output
    }

    pub fn format_blueprints(payload: &BlueprintsPayload, selected: Option<&str>) -> String {
        let mut output = String::from("Чертежи\n");
        if payload.items.is_empty() {
            output.push_str("Чертежей нет.\n");
        } else {
            for entry in &payload.items {
                let emoji = entry.emoji.as_deref().unwrap_or("·");
                let name = entry.name.as_deref().unwrap_or(&entry.id);
                let studied = if entry.unlocked { " — изучен" } else { "" };
                output.push_str(&format!(
                    "{} {} [{}] x{}{}\n",
                    emoji, name, entry.id, entry.qty, studied
                ));
            }
        }
        output.push_str(&Self::pager_line(payload.page, payload.total_pages, None));
        output.push('\n');
        if payload.unsupported > 0 {
            output.push_str(&format!(
                "Без рецепта (пока не изучаются): {}\n",
                payload.unsupported
            ));
        }
        output.push_str(&Self::format_selection(selected));
        output
    }

    fn slot_line(title: &str, slot: &str, item: Option<&ItemInfo>) -> String {
        match item {
            Some(item) => {
                let emoji = item.emoji.as_deref().unwrap_or("·");
                format!("{}: {} {} [{}]\n", title, emoji, item.label(), slot)
            }
            None => format!("{}: пусто [{}]\n", title, slot),
        }
    }

    pub fn format_loadout(payload: &LoadoutPayload) -> String {
        let mut output = String::from("Снаряжение\n");
        output.push_str(&Self::slot_line("Броня", "armor", payload.armor.as_ref()));
        output.push_str(&Self::slot_line("Оружие", "weapon", payload.weapon.as_ref()));
        output.push_str(&Self::slot_line(
            "Расходник",
            "medkit",
            payload.medkit.as_ref(),
        ));
        output.push_str(&Self::slot_line("Аугмент", "chip", payload.chip.as_ref()));
        output.push_str("Подбор: slot <слот>, затем equip <id> или clear");
        output
    }

    pub fn format_loadout_options(
        slot: &str,
        options: &[EquipOption],
        page: u32,
        total_pages: u32,
    ) -> String {
        let mut output = format!("Варианты для слота {}:\n", slot);
        if options.is_empty() {
            output.push_str("Подходящих предметов нет.\n");
        } else {
            for option in options {
                let emoji = option.emoji.as_deref().unwrap_or("·");
                let name = option.name.as_deref().unwrap_or(&option.id);
                output.push_str(&format!(
                    "{} {} [{}] x{} ({})\n",
                    emoji, name, option.id, option.qty, option.value
                ));
            }
        }
        output.push_str(&Self::pager_line(page, total_pages, None));
        output
    }

    pub fn format_warehouse(payload: &WarehousePayload) -> String {
        let mut output = format!(
            "Общий склад · {}/{} ценности · предметов: {}\n",
            payload.total_value, payload.goal, payload.total_items
        );
        for item in &payload.top_items {
            let emoji = item.emoji.as_deref().unwrap_or("·");
            let name = item.name.as_deref().unwrap_or(&item.id);
            output.push_str(&format!("{} {} x{}\n", emoji, name, item.qty));
        }
        if let Some(order) = &payload.order {
            let name = order.name.as_deref().unwrap_or(&order.item_id);
            output.push_str(&format!(
                "Заказ дня: {} {}/{} · +{} RC/шт · бонус {} RC\n",
                name, order.progress, order.target, order.reward, order.bonus
            ));
        }
        if let Some(top) = &payload.top_contrib {
            let name = top.name.as_deref().unwrap_or("Игрок");
            output.push_str(&format!("Лучший вкладчик: {} ({})\n", name, top.value_total));
        }
        output
    }

    pub fn format_quests(payload: &QuestsPayload) -> String {
        let mut output = String::from("Квесты\n");
        for (title, quests) in [("Ежедневные", &payload.daily), ("Недельные", &payload.weekly)] {
            output.push_str(title);
            output.push_str(":\n");
            if quests.is_empty() {
                output.push_str("   —\n");
                continue;
            }
            for quest in quests {
                let name = quest.title.as_deref().unwrap_or(&quest.quest_id);
                let status = if quest.is_claimed() {
                    "награда получена".to_string()
                } else if quest.is_completed() {
                    format!("выполнен (claim {} {})", kind_of(title), quest.quest_id)
                } else {
                    format!("{}/{}", quest.progress, quest.target)
                };
                output.push_str(&format!("   {} — {}\n", name, status));
            }
        }
        output
    }

    pub fn format_rating(payload: &RatingPayload) -> String {
        let mut output = String::from("Рейтинг\n");
        if payload.rows.is_empty() {
            output.push_str("Пока пусто.\n");
            return output;
        }
        for row in &payload.rows {
            let name = row.name.as_deref().unwrap_or("Игрок");
            output.push_str(&format!(
                "{}. {} — {} очк. · эвак {} · убийств {} · смертей {}\n",
                row.rank, name, row.points, row.extracts, row.kills, row.deaths
            ));
        }
        output
    }

    /// Render the season board. Dates come as ISO strings; they are shown as
    /// a `дд.мм–дд.мм` range when they parse.
    pub fn format_season(payload: &SeasonPayload) -> String {
        let mut output = String::from("Сезон");
        if let Some(info) = &payload.season {
            if let Some(id) = &info.id {
                output.push_str(&format!(" {}", id));
            }
            if let (Some(start), Some(end)) = (
                info.start.as_deref().and_then(short_date),
                info.end.as_deref().and_then(short_date),
            ) {
                output.push_str(&format!(" · {}–{}", start, end));
            }
        }
        output.push('\n');
        for (rank, row) in payload.top.iter().enumerate() {
            let name = row.name.as_deref().unwrap_or("Игрок");
            output.push_str(&format!(
                "{}. {} — {} очк. · рейдов {} · эвак {}\n",
                rank + 1,
                name,
                row.points,
                row.raids,
                row.extracts
            ));
        }
        if let Some(me) = &payload.me {
            output.push_str(&format!(
                "Я: {} очк. · рейдов {} · эвак {} · убийств {} · смертей {}\n",
                me.points, me.raids, me.extracts, me.kills, me.deaths
            ));
        }
        output
    }

    pub fn format_event(payload: &EventPayload) -> String {
        let Some(event) = &payload.event else {
            return "Активного события нет.".to_string();
        };
        let mut output = String::from("Событие");
        if let Some(id) = &event.id {
            output.push_str(&format!(" {}", id));
        }
        output.push('\n');
        let totals = payload.totals.as_ref();
        let value_total = totals.map(|t| t.value_total).unwrap_or(event.value_total);
        output.push_str(&format!("Прогресс: {}/{}\n", value_total, event.goal));
        for row in &payload.top {
            let name = row.name.as_deref().unwrap_or("Игрок");
            output.push_str(&format!("{} — {} ({} шт.)\n", name, row.value_total, row.items_total));
        }
        if let Some(me) = &payload.me {
            output.push_str(&format!(
                "Мой вклад: {} ({} шт.)\n",
                me.value_total, me.items_total
            ));
        }
        output
    }

    pub fn format_case(payload: &CasePayload) -> String {
        if payload.opened {
            "Кейс уже открыт. Возвращайся завтра.".to_string()
        } else {
            format!(
                "Кейс на сегодня не открыт: внутри {} предмет(а). Открыть: open",
                payload.items_count
            )
        }
    }

    pub fn format_case_items(items: &[CaseItem]) -> String {
        let mut output = String::from("Выпало:\n");
        for item in items {
            let emoji = item.emoji.as_deref().unwrap_or("·");
            let name = item.name.as_deref().unwrap_or(&item.id);
            let marker = if item.rare { " ★" } else { "" };
            output.push_str(&format!("{} {}{}\n", emoji, name, marker));
        }
        output
    }

    pub fn format_admin(settings: &AdminSettings) -> String {
        format!(
            "Настройки\n\
             event_base = {}\n\
             event_greed_mult = {}\n\
             evac_base = {}\n\
             evac_greed_penalty = {}\n\
             warehouse_goal = {}\n\
             event_week_goal = {}\n\
             daily_sell_raidcoin_cap = {}\n\
             daily_sell_count_cap = {}\n\
             market_listing_cap = {}\n\
             season_reward_top1 = {}\n\
             season_reward_top2 = {}\n\
             season_reward_top3 = {}\n\
             Изменить: set <параметр> <значение>",
            settings.event_base,
            settings.event_greed_mult,
            settings.evac_base,
            settings.evac_greed_penalty,
            settings.warehouse_goal,
            settings.event_week_goal,
            settings.daily_sell_raidcoin_cap,
            settings.daily_sell_count_cap,
            settings.market_listing_cap,
            settings.season_reward_top1,
            settings.season_reward_top2,
            settings.season_reward_top3
        )
    }

    pub fn format_onboarding(steps: &[String]) -> String {
        let mut output = String::from("Знакомство с терминалом:\n");
        for (index, step) in steps.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", index + 1, step));
        }
        output.push_str("Продолжить: ack");
        output
    }
}

fn kind_of(title: &str) -> &'static str {
    if title == "Ежедневные" { "daily" } else { "weekly" }
}

fn rarity_label(rarity: &str) -> &str {
    match rarity {
        "junk" => "мусор",
        "common" => "обычный",
        "rare" => "редкий",
        "epic" => "эпический",
        "legendary" => "легендарный",
        other => other,
    }
}

fn short_date(iso: &str) -> Option<String> {
    NaiveDate::parse_from_str(iso, "%Y-%m-%d")
        .ok()
        .map(|date| date.format("%d.%m").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_authorized_banner() {
        // given/when:
        let result = ViewFormatter::format_authorized("Nick");

        // then:
        assert_eq!(result, "Авторизован: Nick");
    }

    #[test]
    fn test_format_actions_marks_disabled_buttons() {
        // given:
        let buttons = vec![
            ActionButton {
                action: "fight".to_string(),
                label: "Сражаться (5с)".to_string(),
                enabled: false,
            },
            ActionButton {
                action: "medkit".to_string(),
                label: "Расходник".to_string(),
                enabled: true,
            },
        ];

        // when:
        let result = ViewFormatter::format_actions(&buttons);

        // then:
        assert_eq!(result, "(Сражаться (5с)) [Расходник]");
    }

    #[test]
    fn test_format_selection_prompt_and_selected_states() {
        // given/when/then:
        assert_eq!(
            ViewFormatter::format_selection(None),
            "Выберите предмет: pick <id>"
        );
        assert_eq!(
            ViewFormatter::format_selection(Some("Лом")),
            "Выбрано: Лом"
        );
    }

    #[test]
    fn test_format_storage_renders_rows_pager_and_upgrade() {
        // given:
        let payload: StoragePayload = serde_json::from_value(serde_json::json!({
            "items": [
                {"id": "scrap", "name": "Лом", "qty": 3, "rarity": "common", "value": 10}
            ],
            "used": 3, "limit": 40, "total_value": 30,
            "page": 2, "total_pages": 5,
            "sort": "rarity", "sort_label": "редкость",
            "can_upgrade": true, "upgrade_cost": 120,
            "points": 15, "raidcoins": 7
        }))
        .unwrap();

        // when:
        let result = ViewFormatter::format_storage(&payload, None);

        // then:
        assert!(result.contains("Хранилище 3/40"));
        assert!(result.contains("Лом [scrap] x3"));
        assert!(result.contains("Стр. 2/5 · сорт: редкость"));
        assert!(result.contains("Улучшение склада: 120 очк."));
        assert!(result.contains("Выберите предмет"));
    }

    #[test]
    fn test_format_sell_shows_prices() {
        // given:
        let payload: SellPayload = serde_json::from_value(serde_json::json!({
            "items": [
                {"id": "scrap", "name": "Лом", "qty": 3, "unit_price": 7, "total_price": 21}
            ],
            "page": 1, "total_pages": 1, "raidcoins": 5
        }))
        .unwrap();

        // when:
        let result = ViewFormatter::format_sell(&payload, Some("Лом"));

        // then:
        assert!(result.contains("7 RC/шт, всего 21 RC"));
        assert!(result.contains("Выбрано: Лом"));
    }

    #[test]
    fn test_format_raid_idle_shows_enter_button() {
        // given:
        let snapshot = Snapshot::default();

        // when:
        let result = ViewFormatter::format_raid(&snapshot);

        // then:
        assert!(result.contains("Активного рейда нет."));
        assert!(result.contains("[Войти в рейд]"));
    }

    #[test]
    fn test_format_season_renders_date_range() {
        // given:
        let payload: SeasonPayload = serde_json::from_value(serde_json::json!({
            "season": {"id": "2026-08", "start": "2026-08-01", "end": "2026-08-31"},
            "top": [], "me": {"points": 3}
        }))
        .unwrap();

        // when:
        let result = ViewFormatter::format_season(&payload);

        // then:
        assert!(result.contains("Сезон 2026-08 · 01.08–31.08"));
        assert!(result.contains("Я: 3 очк."));
    }

    #[test]
    fn test_format_case_states() {
        // given:
        let closed: CasePayload =
            serde_json::from_value(serde_json::json!({"opened": false, "items_count": 3}))
                .unwrap();
        let opened: CasePayload =
            serde_json::from_value(serde_json::json!({"opened": true, "items_count": 3}))
                .unwrap();

        // then:
        assert!(ViewFormatter::format_case(&closed).contains("внутри 3 предмет(а)"));
        assert!(ViewFormatter::format_case(&opened).contains("уже открыт"));
    }
}
