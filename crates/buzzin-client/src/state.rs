//! Board state: what the link UI renders and how it stays in step with the
//! API server.
//!
//! The board starts in [`Phase::Loading`], issues one List on [`LinkBoard::mount`]
//! and is [`Phase::Ready`] from then on, whether the list came from the
//! server or from the local cache. Individual links only ever appear (after
//! a confirmed Create) or disappear (after a confirmed Delete); nothing is
//! applied optimistically.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::{debug, warn};
use uuid::Uuid;

use buzzin_shared::constants::{STORAGE_KEY_LINKS, TOAST_DURATION_MS};
use buzzin_shared::protocol::CreateLinkRequest;
use buzzin_shared::{Link, Platform};

use crate::api::{HttpLinkApi, LinkApi};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::identity;
use crate::storage::LocalStorage;

/// Where the current link list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// Nothing loaded yet.
    Unloaded,
    /// Confirmed by the API server.
    Server,
    /// Read from the local cache because the server was unreachable; may be
    /// stale.
    LocalCache,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub shown_at: Instant,
}

impl Toast {
    pub fn is_visible_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) < Duration::from_millis(TOAST_DURATION_MS)
    }
}

/// One platform group in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformSection<'a> {
    pub platform: Platform,
    pub expanded: bool,
    pub links: Vec<&'a Link>,
}

pub struct LinkBoard<A> {
    api: A,
    storage: LocalStorage,
    user_id: String,
    links: Vec<Link>,
    provenance: Provenance,
    phase: Phase,
    input: String,
    platform: Platform,
    hovered: Option<Uuid>,
    expanded: HashMap<Platform, bool>,
    toast: Option<Toast>,
}

impl LinkBoard<HttpLinkApi> {
    /// Board talking HTTP to the configured API, with configured storage.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let api = HttpLinkApi::new(&config.api_url)?;
        Self::new(api, config.open_storage()?)
    }
}

impl<A: LinkApi> LinkBoard<A> {
    /// Create an unloaded board. Resolves (and if needed generates) the
    /// anonymous user id from `storage`.
    pub fn new(api: A, mut storage: LocalStorage) -> Result<Self> {
        let user_id = identity::user_id(&mut storage)?;

        Ok(Self {
            api,
            storage,
            user_id,
            links: Vec::new(),
            provenance: Provenance::Unloaded,
            phase: Phase::Loading,
            input: String::new(),
            platform: Platform::default(),
            hovered: None,
            expanded: Platform::ALL.iter().map(|p| (*p, true)).collect(),
            toast: None,
        })
    }

    /// Initial fetch. Falls back to the cached list on any failure.
    pub async fn mount(&mut self) {
        self.phase = Phase::Loading;

        match self.api.list_links(&self.user_id).await {
            Ok(links) => {
                debug!(count = links.len(), "loaded links from server");
                self.links = links;
                self.provenance = Provenance::Server;
                self.mirror_to_cache();
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch links, using local cache");
                self.links = self.cached_links();
                self.provenance = Provenance::LocalCache;
            }
        }

        self.phase = Phase::Ready;
    }

    /// Submit the pending input under the selected platform.
    ///
    /// Blank input is ignored. On success the returned link is prepended and
    /// the input cleared; on failure only an error toast changes.
    pub async fn add_link(&mut self) -> Option<Link> {
        let url = self.input.trim();
        if url.is_empty() {
            return None;
        }

        let request = CreateLinkRequest::new(url, self.platform, self.user_id.as_str());
        match self.api.create_link(&request).await {
            Ok(link) => {
                self.links.insert(0, link.clone());
                self.input.clear();
                self.mirror_to_cache();
                self.show_toast("Link added successfully!", ToastKind::Success);
                Some(link)
            }
            Err(e) => {
                warn!(error = %e, "failed to add link");
                self.show_toast("Failed to add link", ToastKind::Error);
                None
            }
        }
    }

    /// Delete a link by id. Returns whether the server acknowledged it.
    pub async fn delete_link(&mut self, id: Uuid) -> bool {
        match self.api.delete_link(id).await {
            Ok(_) => {
                self.links.retain(|link| link.id != id);
                if self.hovered == Some(id) {
                    self.hovered = None;
                }
                self.mirror_to_cache();
                self.show_toast("Link deleted!", ToastKind::Success);
                true
            }
            Err(e) => {
                warn!(error = %e, %id, "failed to delete link");
                self.show_toast("Failed to delete link", ToastKind::Error);
                false
            }
        }
    }

    /// URL of `id` for the caller to put on the clipboard.
    pub fn copy_link(&mut self, id: Uuid) -> Option<String> {
        let url = self.links.iter().find(|l| l.id == id)?.url.clone();
        self.show_toast("Link copied to clipboard!", ToastKind::Success);
        Some(url)
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    pub fn select_platform(&mut self, platform: Platform) {
        self.platform = platform;
    }

    pub fn hover(&mut self, id: Option<Uuid>) {
        self.hovered = id;
    }

    pub fn toggle_platform(&mut self, platform: Platform) {
        let expanded = self.expanded.entry(platform).or_insert(true);
        *expanded = !*expanded;
    }

    pub fn is_expanded(&self, platform: Platform) -> bool {
        self.expanded.get(&platform).copied().unwrap_or(true)
    }

    /// Non-empty platform groups in fixed order.
    pub fn sections(&self) -> Vec<PlatformSection<'_>> {
        Platform::ALL
            .iter()
            .filter_map(|&platform| {
                let links: Vec<&Link> = self
                    .links
                    .iter()
                    .filter(|l| l.platform == platform)
                    .collect();
                (!links.is_empty()).then(|| PlatformSection {
                    platform,
                    expanded: self.is_expanded(platform),
                    links,
                })
            })
            .collect()
    }

    /// `"N Links Saved"`, or `None` when the board is empty.
    pub fn summary(&self) -> Option<String> {
        match self.links.len() {
            0 => None,
            1 => Some("1 Link Saved".to_string()),
            n => Some(format!("{n} Links Saved")),
        }
    }

    /// Toast still visible at `now`.
    pub fn toast_at(&self, now: Instant) -> Option<&Toast> {
        self.toast.as_ref().filter(|t| t.is_visible_at(now))
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast_at(Instant::now())
    }

    pub fn clear_expired_toast(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|t| !t.is_visible_at(now)) {
            self.toast = None;
        }
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn hovered(&self) -> Option<Uuid> {
        self.hovered
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    fn show_toast(&mut self, message: &str, kind: ToastKind) {
        self.toast = Some(Toast {
            message: message.to_string(),
            kind,
            shown_at: Instant::now(),
        });
    }

    /// Links from the local cache. Entries that do not decode are skipped one
    /// by one; a value that is not a JSON array is removed.
    fn cached_links(&mut self) -> Vec<Link> {
        let parsed = self
            .storage
            .get_item(STORAGE_KEY_LINKS)
            .map(serde_json::from_str::<Vec<serde_json::Value>>);

        let entries = match parsed {
            None => return Vec::new(),
            Some(Ok(entries)) => entries,
            Some(Err(e)) => {
                warn!(error = %e, "discarding unreadable cached links");
                if let Err(e) = self.storage.remove_item(STORAGE_KEY_LINKS) {
                    warn!(error = %e, "failed to clear cached links");
                }
                return Vec::new();
            }
        };

        entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value::<Link>(entry) {
                Ok(link) => Some(link),
                Err(e) => {
                    warn!(index, error = %e, "skipping unreadable cached link");
                    None
                }
            })
            .collect()
    }

    /// Keep the fallback copy equal to the last server-confirmed list.
    fn mirror_to_cache(&mut self) {
        let result = serde_json::to_string(&self.links)
            .map_err(Into::into)
            .and_then(|json| self.storage.set_item(STORAGE_KEY_LINKS, json));
        if let Err(e) = result {
            warn!(error = %e, "failed to cache links locally");
        }
    }
}
