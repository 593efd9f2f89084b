//! Line-command parsing.
//!
//! Every control of the web UI maps to one line command: tabs are bare tab
//! names, raid buttons are bare action tags, list controls take their
//! arguments positionally. Parsing is context-free; the controller resolves
//! tab-dependent commands (`pick`, `buy`, `next`, ...) against the active tab.

/// Logical views, one per tab of the original UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Raid,
    Storage,
    Sell,
    Shop,
    Craft,
    Blueprints,
    Loadout,
    Warehouse,
    Quests,
    Market,
    Rating,
    Season,
    Event,
    Case,
    Admin,
}

impl Tab {
    pub fn parse(word: &str) -> Option<Self> {
        match word {
            "raid" => Some(Self::Raid),
            "storage" => Some(Self::Storage),
            "sell" => Some(Self::Sell),
            "shop" => Some(Self::Shop),
            "craft" => Some(Self::Craft),
            "blueprints" => Some(Self::Blueprints),
            "loadout" => Some(Self::Loadout),
            "warehouse" => Some(Self::Warehouse),
            "quests" => Some(Self::Quests),
            "market" => Some(Self::Market),
            "rating" => Some(Self::Rating),
            "season" => Some(Self::Season),
            "event" => Some(Self::Event),
            "case" => Some(Self::Case),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Tab title as the original UI names it.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Raid => "Рейд",
            Self::Storage => "Хранилище",
            Self::Sell => "Продажа",
            Self::Shop => "Магазин",
            Self::Craft => "Крафт",
            Self::Blueprints => "Чертежи",
            Self::Loadout => "Снаряжение",
            Self::Warehouse => "Общий склад",
            Self::Quests => "Квесты",
            Self::Market => "Рынок",
            Self::Rating => "Рейтинг",
            Self::Season => "Сезон",
            Self::Event => "Событие",
            Self::Case => "Ежедневный кейс",
            Self::Admin => "Админ",
        }
    }
}

const RAID_ACTIONS: &[&str] = &[
    "enter", "loot", "move", "evac", "fight", "medkit", "take", "skip",
];

/// One user intention, parsed from a single input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Quit,
    Login { email: String, password: String },
    Register { email: String, nickname: String, password: String },
    Logout,
    Tab(Tab),
    /// Raid action tag, including `choice:<id>`.
    Action(String),
    Next,
    Prev,
    /// Market own-items pager.
    ItemsNext,
    ItemsPrev,
    Sort(String),
    /// Select a list row by item id (active tab's list).
    Pick(String),
    /// Select a market listing by id.
    Lot(i64),
    /// Confirm sale of the selected item; quantity raw ("all" allowed).
    Confirm(String),
    Upgrade,
    /// Shop purchase (`kind` + optional id) or, with no kind, market buy of
    /// the selected listing.
    Buy { kind: Option<String>, id: Option<String> },
    /// Put the selected item on the market.
    List { price: i64, qty: String },
    CancelListing(i64),
    Make(String),
    Study,
    Slot(String),
    Equip(String),
    ClearSlot,
    Claim { kind: String, quest_id: String },
    OpenCase,
    AdminSet { field: String, value: String },
    /// Acknowledge onboarding.
    Ack,
}

/// Parse one input line. Returns a usage hint on malformed input.
pub fn parse(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Err("Пустая команда. Введите help.".to_string());
    };
    let rest: Vec<&str> = words.collect();

    if let Some(tab) = Tab::parse(head) {
        return Ok(Command::Tab(tab));
    }
    if RAID_ACTIONS.contains(&head) {
        return Ok(Command::Action(head.to_string()));
    }

    match head {
        "help" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        "logout" => Ok(Command::Logout),
        "login" => match rest.as_slice() {
            [email, password] => Ok(Command::Login {
                email: (*email).to_string(),
                password: (*password).to_string(),
            }),
            _ => Err("Использование: login <почта> <пароль>".to_string()),
        },
        "register" => match rest.as_slice() {
            [email, nickname, password] => Ok(Command::Register {
                email: (*email).to_string(),
                nickname: (*nickname).to_string(),
                password: (*password).to_string(),
            }),
            _ => Err("Использование: register <почта> <никнейм> <пароль>".to_string()),
        },
        "choice" => match rest.as_slice() {
            [id] => Ok(Command::Action(format!("choice:{}", id))),
            _ => Err("Использование: choice <id>".to_string()),
        },
        "next" => Ok(Command::Next),
        "prev" => Ok(Command::Prev),
        "inext" => Ok(Command::ItemsNext),
        "iprev" => Ok(Command::ItemsPrev),
        "sort" => match rest.as_slice() {
            [key] => Ok(Command::Sort((*key).to_string())),
            _ => Err("Использование: sort <rarity|value|name|qty>".to_string()),
        },
        "pick" => match rest.as_slice() {
            [id] => Ok(Command::Pick((*id).to_string())),
            _ => Err("Использование: pick <id>".to_string()),
        },
        "lot" => match rest.as_slice() {
            [id] => id
                .parse()
                .map(Command::Lot)
                .map_err(|_| "Использование: lot <номер лота>".to_string()),
            _ => Err("Использование: lot <номер лота>".to_string()),
        },
        "confirm" => match rest.as_slice() {
            [] => Ok(Command::Confirm("1".to_string())),
            [qty] => Ok(Command::Confirm((*qty).to_string())),
            _ => Err("Использование: confirm [количество|all]".to_string()),
        },
        "upgrade" => Ok(Command::Upgrade),
        "buy" => match rest.as_slice() {
            [] => Ok(Command::Buy {
                kind: None,
                id: None,
            }),
            [kind] => Ok(Command::Buy {
                kind: Some((*kind).to_string()),
                id: None,
            }),
            [kind, id] => Ok(Command::Buy {
                kind: Some((*kind).to_string()),
                id: Some((*id).to_string()),
            }),
            _ => Err("Использование: buy [вид] [id]".to_string()),
        },
        "list" => match rest.as_slice() {
            [price] => price
                .parse()
                .map(|price| Command::List {
                    price,
                    qty: "1".to_string(),
                })
                .map_err(|_| "Использование: list <цена> [количество|all]".to_string()),
            [price, qty] => price
                .parse()
                .map(|price| Command::List {
                    price,
                    qty: (*qty).to_string(),
                })
                .map_err(|_| "Использование: list <цена> [количество|all]".to_string()),
            _ => Err("Использование: list <цена> [количество|all]".to_string()),
        },
        "cancel" => match rest.as_slice() {
            [id] => id
                .parse()
                .map(Command::CancelListing)
                .map_err(|_| "Использование: cancel <номер лота>".to_string()),
            _ => Err("Использование: cancel <номер лота>".to_string()),
        },
        "make" => match rest.as_slice() {
            [recipe_id] => Ok(Command::Make((*recipe_id).to_string())),
            _ => Err("Использование: make <рецепт>".to_string()),
        },
        "study" => Ok(Command::Study),
        "slot" => match rest.as_slice() {
            [slot @ ("armor" | "weapon" | "medkit" | "chip")] => {
                Ok(Command::Slot((*slot).to_string()))
            }
            _ => Err("Использование: slot <armor|weapon|medkit|chip>".to_string()),
        },
        "equip" => match rest.as_slice() {
            [item_id] => Ok(Command::Equip((*item_id).to_string())),
            _ => Err("Использование: equip <id>".to_string()),
        },
        "clear" => Ok(Command::ClearSlot),
        "claim" => match rest.as_slice() {
            [kind @ ("daily" | "weekly"), quest_id] => Ok(Command::Claim {
                kind: (*kind).to_string(),
                quest_id: (*quest_id).to_string(),
            }),
            _ => Err("Использование: claim <daily|weekly> <id>".to_string()),
        },
        "open" => Ok(Command::OpenCase),
        "set" => match rest.as_slice() {
            [field, value] => Ok(Command::AdminSet {
                field: (*field).to_string(),
                value: (*value).to_string(),
            }),
            _ => Err("Использование: set <параметр> <значение>".to_string()),
        },
        "ack" => Ok(Command::Ack),
        other => Err(format!("Неизвестная команда: {}. Введите help.", other)),
    }
}

/// Command reference printed by `help`.
pub fn help_text() -> &'static str {
    "Вкладки: raid storage sell shop craft blueprints loadout warehouse quests \
     market rating season event case admin\n\
     Рейд: enter loot move evac fight medkit take skip choice <id>\n\
     Списки: next prev sort <ключ> pick <id>; рынок: inext iprev lot <N>\n\
     Действия: confirm [кол-во|all], upgrade, buy [вид] [id], \
     list <цена> [кол-во], cancel <N>, make <рецепт>, study, \
     slot <слот>, equip <id>, clear, claim <daily|weekly> <id>, open, \
     set <параметр> <значение>, ack\n\
     Аккаунт: login <почта> <пароль>, register <почта> <ник> <пароль>, logout\n\
     Прочее: help, quit"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_tab_name_switches_tab() {
        // given/when:
        let command = parse("storage").unwrap();

        // then:
        assert_eq!(command, Command::Tab(Tab::Storage));
    }

    #[test]
    fn test_raid_action_words_become_actions() {
        // given/when/then:
        assert_eq!(parse("loot").unwrap(), Command::Action("loot".to_string()));
        assert_eq!(parse("evac").unwrap(), Command::Action("evac".to_string()));
        assert_eq!(parse("take").unwrap(), Command::Action("take".to_string()));
    }

    #[test]
    fn test_choice_builds_prefixed_action_tag() {
        // given/when:
        let command = parse("choice scan").unwrap();

        // then: matches the wire format the dispatcher posts
        assert_eq!(command, Command::Action("choice:scan".to_string()));
    }

    #[test]
    fn test_login_requires_both_arguments() {
        // given/when:
        let ok = parse("login a@b.com x").unwrap();
        let err = parse("login a@b.com");

        // then:
        assert_eq!(
            ok,
            Command::Login {
                email: "a@b.com".to_string(),
                password: "x".to_string(),
            }
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_buy_variants() {
        // given/when/then: bare buy is a market purchase of the selected lot
        assert_eq!(
            parse("buy").unwrap(),
            Command::Buy {
                kind: None,
                id: None
            }
        );
        assert_eq!(
            parse("buy medkit").unwrap(),
            Command::Buy {
                kind: Some("medkit".to_string()),
                id: None
            }
        );
        assert_eq!(
            parse("buy offer scrap").unwrap(),
            Command::Buy {
                kind: Some("offer".to_string()),
                id: Some("scrap".to_string())
            }
        );
    }

    #[test]
    fn test_list_parses_price_and_optional_qty() {
        // given/when/then:
        assert_eq!(
            parse("list 50").unwrap(),
            Command::List {
                price: 50,
                qty: "1".to_string()
            }
        );
        assert_eq!(
            parse("list 50 all").unwrap(),
            Command::List {
                price: 50,
                qty: "all".to_string()
            }
        );
        assert!(parse("list дорого").is_err());
    }

    #[test]
    fn test_slot_accepts_only_known_slots() {
        // given/when/then:
        assert_eq!(parse("slot chip").unwrap(), Command::Slot("chip".to_string()));
        assert!(parse("slot hat").is_err());
    }

    #[test]
    fn test_claim_validates_kind() {
        // given/when/then:
        assert_eq!(
            parse("claim daily d_kills").unwrap(),
            Command::Claim {
                kind: "daily".to_string(),
                quest_id: "d_kills".to_string()
            }
        );
        assert!(parse("claim monthly d_kills").is_err());
    }

    #[test]
    fn test_unknown_command_reports_hint() {
        // given/when:
        let err = parse("dance").unwrap_err();

        // then:
        assert!(err.contains("dance"));
    }
}
