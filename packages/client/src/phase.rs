//! Raid phase derivation and action availability.
//!
//! The session phase is a tagged union derived from the snapshot, never
//! computed locally, so a combat render without an enemy is unrepresentable.
//! Interrupt precedence follows the server's own action gating: a pending
//! item pickup outranks a pending narrative choice, which outranks combat.

use arcterm_shared::api::snapshot::{
    Enemy, ItemInfo, PendingChoice, RaidSession, RaidStatus, Snapshot,
};

/// Exactly one of these holds at a time, as dictated by the last snapshot.
#[derive(Debug)]
pub enum RaidPhase<'a> {
    /// No active raid session.
    Idle,
    /// A found item awaits take/skip.
    PendingItem {
        session: &'a RaidSession,
        item: &'a ItemInfo,
    },
    /// A narrative event awaits one of its choices.
    PendingChoice {
        session: &'a RaidSession,
        choice: &'a PendingChoice,
    },
    /// Combat; the enemy is always present in this phase.
    Combat {
        session: &'a RaidSession,
        enemy: &'a Enemy,
    },
    Exploring {
        session: &'a RaidSession,
    },
}

pub fn derive_phase(snapshot: &Snapshot) -> RaidPhase<'_> {
    let Some(session) = &snapshot.session else {
        return RaidPhase::Idle;
    };
    if let Some(item) = &snapshot.pending_item {
        return RaidPhase::PendingItem { session, item };
    }
    if let Some(choice) = &session.pending_choice {
        return RaidPhase::PendingChoice { session, choice };
    }
    if session.status == RaidStatus::Combat
        && let Some(enemy) = &session.enemy
    {
        return RaidPhase::Combat { session, enemy };
    }
    RaidPhase::Exploring { session }
}

/// One renderable raid control: the action tag posted to the server, the
/// label shown to the player, and whether it is currently usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionButton {
    pub action: String,
    pub label: String,
    pub enabled: bool,
}

/// Label with the remaining cooldown appended, e.g. "Сражаться (5с)".
/// The value is only as fresh as the last fetch; no countdown runs locally.
pub fn cooldown_label(text: &str, seconds: u32) -> String {
    if seconds > 0 {
        format!("{} ({}с)", text, seconds)
    } else {
        text.to_string()
    }
}

/// Derive the action set for the current phase. Cooldowns and the medkit
/// flag come straight from the snapshot.
pub fn available_actions(snapshot: &Snapshot) -> Vec<ActionButton> {
    let cooldown = |action: &str| snapshot.cooldowns.get(action).copied().unwrap_or(0);
    let timed = |action: &str, label: &str| {
        let seconds = cooldown(action);
        ActionButton {
            action: action.to_string(),
            label: cooldown_label(label, seconds),
            enabled: seconds == 0,
        }
    };
    let medkit = |snapshot: &Snapshot| {
        let seconds = cooldown("medkit");
        ActionButton {
            action: "medkit".to_string(),
            label: cooldown_label("Расходник", seconds),
            enabled: seconds == 0 && snapshot.can_medkit,
        }
    };

    match derive_phase(snapshot) {
        RaidPhase::Idle => vec![ActionButton {
            action: "enter".to_string(),
            label: "Войти в рейд".to_string(),
            enabled: true,
        }],
        RaidPhase::PendingItem { .. } => vec![
            ActionButton {
                action: "take".to_string(),
                label: "Взять".to_string(),
                enabled: true,
            },
            ActionButton {
                action: "skip".to_string(),
                label: "Не брать".to_string(),
                enabled: true,
            },
        ],
        RaidPhase::PendingChoice { choice, .. } => choice
            .choices
            .iter()
            .map(|option| ActionButton {
                action: format!("choice:{}", option.id),
                label: option.label.clone().unwrap_or_else(|| option.id.clone()),
                enabled: true,
            })
            .collect(),
        RaidPhase::Combat { .. } => vec![timed("fight", "Сражаться"), medkit(snapshot)],
        RaidPhase::Exploring { .. } => vec![
            timed("loot", "Лутать"),
            timed("move", "Идти дальше"),
            timed("evac", "Эвакуация"),
            medkit(snapshot),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcterm_shared::api::snapshot::ChoiceOption;

    fn session(status: RaidStatus) -> RaidSession {
        serde_json::from_value(serde_json::json!({
            "id": "abc123",
            "hp": 80,
            "max_hp": 100,
            "status": match status {
                RaidStatus::Combat => "combat",
                _ => "explore",
            },
        }))
        .unwrap()
    }

    fn snapshot_with(session: Option<RaidSession>) -> Snapshot {
        Snapshot {
            session,
            ..Snapshot::default()
        }
    }

    #[test]
    fn test_no_session_derives_idle_with_enter_only() {
        // given:
        let snapshot = snapshot_with(None);

        // when:
        let buttons = available_actions(&snapshot);

        // then:
        assert!(matches!(derive_phase(&snapshot), RaidPhase::Idle));
        assert_eq!(buttons.len(), 1);
        assert_eq!(buttons[0].action, "enter");
        assert_eq!(buttons[0].label, "Войти в рейд");
    }

    #[test]
    fn test_pending_item_replaces_actions_with_take_skip() {
        // given:
        let mut snapshot = snapshot_with(Some(session(RaidStatus::Explore)));
        snapshot.pending_item =
            Some(serde_json::from_value(serde_json::json!({"id": "scrap"})).unwrap());

        // when:
        let buttons = available_actions(&snapshot);

        // then:
        let actions: Vec<&str> = buttons.iter().map(|b| b.action.as_str()).collect();
        assert_eq!(actions, vec!["take", "skip"]);
    }

    #[test]
    fn test_pending_item_outranks_pending_choice_and_combat() {
        // given: everything at once, as the server may report after a choice
        let mut raid = session(RaidStatus::Combat);
        raid.enemy = Some(serde_json::from_value(serde_json::json!({"name": "ARC"})).unwrap());
        raid.pending_choice = Some(PendingChoice {
            event_id: Some("signal".to_string()),
            text: None,
            choices: vec![ChoiceOption {
                id: "scan".to_string(),
                label: None,
            }],
        });
        let mut snapshot = snapshot_with(Some(raid));
        snapshot.pending_item =
            Some(serde_json::from_value(serde_json::json!({"id": "scrap"})).unwrap());

        // then:
        assert!(matches!(
            derive_phase(&snapshot),
            RaidPhase::PendingItem { .. }
        ));
    }

    #[test]
    fn test_pending_choice_offers_the_event_choices() {
        // given:
        let mut raid = session(RaidStatus::Explore);
        raid.pending_choice = Some(PendingChoice {
            event_id: Some("signal".to_string()),
            text: Some("Слабый сигнал.".to_string()),
            choices: vec![
                ChoiceOption {
                    id: "scan".to_string(),
                    label: Some("Сканировать".to_string()),
                },
                ChoiceOption {
                    id: "ignore".to_string(),
                    label: Some("Игнорировать".to_string()),
                },
            ],
        });
        let snapshot = snapshot_with(Some(raid));

        // when:
        let buttons = available_actions(&snapshot);

        // then: the default action set is replaced by the offered choices
        assert_eq!(buttons.len(), 2);
        assert_eq!(buttons[0].action, "choice:scan");
        assert_eq!(buttons[0].label, "Сканировать");
        assert_eq!(buttons[1].action, "choice:ignore");
    }

    #[test]
    fn test_combat_without_enemy_is_not_a_combat_render() {
        // given: a combat status with no enemy payload
        let snapshot = snapshot_with(Some(session(RaidStatus::Combat)));

        // then: the illegal render is unrepresentable
        assert!(matches!(
            derive_phase(&snapshot),
            RaidPhase::Exploring { .. }
        ));
    }

    #[test]
    fn test_fight_cooldown_disables_and_labels_the_button() {
        // given: combat with a 5 second fight cooldown
        let mut raid = session(RaidStatus::Combat);
        raid.enemy = Some(serde_json::from_value(serde_json::json!({"name": "ARC"})).unwrap());
        let mut snapshot = snapshot_with(Some(raid));
        snapshot.cooldowns.insert("fight".to_string(), 5);
        snapshot.can_medkit = true;

        // when:
        let buttons = available_actions(&snapshot);

        // then:
        let fight = buttons.iter().find(|b| b.action == "fight").unwrap();
        assert_eq!(fight.label, "Сражаться (5с)");
        assert!(!fight.enabled);
    }

    #[test]
    fn test_fight_enabled_again_once_cooldown_reports_zero() {
        // given:
        let mut raid = session(RaidStatus::Combat);
        raid.enemy = Some(serde_json::from_value(serde_json::json!({"name": "ARC"})).unwrap());
        let mut snapshot = snapshot_with(Some(raid));
        snapshot.cooldowns.insert("fight".to_string(), 0);

        // when:
        let buttons = available_actions(&snapshot);

        // then:
        let fight = buttons.iter().find(|b| b.action == "fight").unwrap();
        assert_eq!(fight.label, "Сражаться");
        assert!(fight.enabled);
    }

    #[test]
    fn test_medkit_disabled_without_consumable() {
        // given: exploring, no usable consumable
        let snapshot = snapshot_with(Some(session(RaidStatus::Explore)));

        // when:
        let buttons = available_actions(&snapshot);

        // then:
        let medkit = buttons.iter().find(|b| b.action == "medkit").unwrap();
        assert!(!medkit.enabled);
    }
}
