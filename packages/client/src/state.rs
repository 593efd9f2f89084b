//! Explicit session and view state.
//!
//! What the browser version kept in ambient module globals lives here as one
//! struct with a defined initialization and teardown contract. It is passed
//! into handlers and render functions; nothing else holds auth or pager
//! state.

use arcterm_shared::api::envelope::Envelope;
use arcterm_shared::api::snapshot::Snapshot;

/// Authentication lifecycle: `Unauthenticated → Authenticating →
/// Authenticated`, back to `Unauthenticated` on logout or any 401.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthState {
    #[default]
    Unauthenticated,
    Authenticating,
    Authenticated {
        nickname: String,
    },
}

/// Pagination/sort/selection bookkeeping for one paginated panel.
///
/// Only this view's own controls mutate it. The page number is adopted from
/// each response (the server clamps), and a selection referencing an item
/// that vanished from a refreshed listing is dropped.
#[derive(Debug, Clone)]
pub struct ListView {
    pub page: u32,
    pub sort: Option<String>,
    pub selected: Option<String>,
}

impl ListView {
    pub fn new() -> Self {
        Self {
            page: 1,
            sort: None,
            selected: None,
        }
    }

    /// Page for a "previous" click, or `None` when already at page 1
    /// (no request is issued in that case).
    pub fn prev_page(&self) -> Option<u32> {
        if self.page <= 1 { None } else { Some(self.page - 1) }
    }

    /// Page for a "next" click; unconditional, the server clamps.
    pub fn next_page(&self) -> u32 {
        self.page + 1
    }

    /// Drop the selection if the refreshed listing no longer contains it.
    /// Returns `true` when a selection was cleared.
    pub fn reconcile_selection(&mut self, ids: &[&str]) -> bool {
        match &self.selected {
            Some(selected) if !ids.contains(&selected.as_str()) => {
                self.selected = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for ListView {
    fn default() -> Self {
        Self::new()
    }
}

/// Loadout options pager: candidates are fetched per equip slot.
#[derive(Debug, Clone)]
pub struct LoadoutView {
    pub page: u32,
    pub slot: Option<String>,
    pub selected: Option<String>,
}

impl LoadoutView {
    pub fn new() -> Self {
        Self {
            page: 1,
            slot: None,
            selected: None,
        }
    }
}

impl Default for LoadoutView {
    fn default() -> Self {
        Self::new()
    }
}

/// Market view state: the public-listings pager and the own-items pager are
/// independent, plus one selected own item and one selected listing.
#[derive(Debug, Clone)]
pub struct MarketView {
    pub page: u32,
    pub items_page: u32,
    pub items_sort: Option<String>,
    pub selected_item: Option<String>,
    pub selected_listing: Option<i64>,
}

impl MarketView {
    pub fn new() -> Self {
        Self {
            page: 1,
            items_page: 1,
            items_sort: None,
            selected_item: None,
            selected_listing: None,
        }
    }

    pub fn prev_page(&self) -> Option<u32> {
        if self.page <= 1 { None } else { Some(self.page - 1) }
    }

    pub fn prev_items_page(&self) -> Option<u32> {
        if self.items_page <= 1 {
            None
        } else {
            Some(self.items_page - 1)
        }
    }

    /// Reconcile both selections against a refreshed payload.
    pub fn reconcile(&mut self, item_ids: &[&str], listing_ids: &[i64]) {
        if let Some(selected) = &self.selected_item
            && !item_ids.contains(&selected.as_str())
        {
            self.selected_item = None;
        }
        if let Some(selected) = self.selected_listing
            && !listing_ids.contains(&selected)
        {
            self.selected_listing = None;
        }
    }
}

impl Default for MarketView {
    fn default() -> Self {
        Self::new()
    }
}

/// One view state per paginated panel.
#[derive(Debug, Clone, Default)]
pub struct ViewStates {
    pub storage: ListView,
    pub sell: ListView,
    pub blueprints: ListView,
    pub loadout: LoadoutView,
    pub market: MarketView,
}

/// The whole client-held session: credential, envelope fields, cached
/// snapshot and per-view states.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub auth: AuthState,
    pub token: Option<String>,
    pub init_data: Option<String>,
    pub chat_id: Option<i64>,
    pub thread_id: Option<i64>,
    pub snapshot: Option<Snapshot>,
    pub views: ViewStates,
}

impl SessionState {
    pub fn new(init_data: Option<String>, chat_id: Option<i64>, thread_id: Option<i64>) -> Self {
        Self {
            init_data,
            chat_id,
            thread_id,
            ..Default::default()
        }
    }

    /// Build the request envelope for the next call. Rebuilt fresh every
    /// time; the credential lives nowhere else in outgoing data.
    pub fn envelope(&self) -> Envelope {
        Envelope {
            init_data: self.init_data.clone().unwrap_or_default(),
            auth_token: self.token.clone(),
            chat_id: self.chat_id,
            thread_id: self.thread_id,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.auth, AuthState::Authenticated { .. })
    }

    /// Logout/expiry contract: purge the in-memory credential, the cached
    /// init proof, the snapshot and every view state.
    pub fn teardown(&mut self) {
        self.auth = AuthState::Unauthenticated;
        self.token = None;
        self.init_data = None;
        self.snapshot = None;
        self.views = ViewStates::default();
    }
}
