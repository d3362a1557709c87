use crate::{notification::NotificationClient, APIResponse, Notification, ID};
use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::task::JoinHandle;
use tracing::warn;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);
pub const DEFAULT_PAGE_LIMIT: usize = 20;
/// Largest page the server hands out
pub const MAX_PAGE_LIMIT: usize = 100;

/// What the notification center currently shows
#[derive(Debug, Clone, Default)]
pub struct CenterView {
    /// Newest first
    pub notifications: Vec<Notification>,
    pub unread_count: i64,
}

impl CenterView {
    /// Merges by id, an incoming notification only replaces the local one
    /// when it is at least as recent
    pub fn merge(&mut self, incoming: Vec<Notification>) {
        for notification in incoming {
            match self
                .notifications
                .iter_mut()
                .find(|n| n.id == notification.id)
            {
                Some(existing) => {
                    if notification.created_at >= existing.created_at {
                        *existing = notification;
                    }
                }
                None => self.notifications.push(notification),
            }
        }
        self.notifications
            .sort_by(|a, b| b.created_at.cmp(&a.created_at));
    }

    /// Applies a page of the newest notifications fetched with `limit`, the
    /// unread count of the server wins. Local notifications the page should
    /// have contained were deleted on the server and are dropped, as is
    /// everything beyond the page.
    pub fn apply_page(&mut self, notifications: Vec<Notification>, unread_count: i64, limit: usize) {
        let is_full = notifications.len() >= limit;
        let oldest = notifications.iter().map(|n| n.created_at).min();
        let ids: HashSet<ID> = notifications.iter().map(|n| n.id.clone()).collect();

        self.notifications.retain(|n| {
            ids.contains(&n.id) || (is_full && oldest.map(|o| n.created_at < o).unwrap_or(false))
        });
        self.merge(notifications);
        self.notifications.truncate(limit);
        self.unread_count = unread_count.max(0);
    }

    /// A single notification that arrived out of band, for instance over the
    /// event stream
    pub fn receive(&mut self, notification: Notification) {
        let is_new_unread = !notification.is_read
            && !self
                .notifications
                .iter()
                .any(|n| n.id == notification.id && !n.is_read);
        self.merge(vec![notification]);
        if is_new_unread {
            self.unread_count += 1;
        }
    }

    /// Returns false when the notification is unknown or already read
    pub fn mark_read(&mut self, notification_id: &ID) -> bool {
        match self
            .notifications
            .iter_mut()
            .find(|n| &n.id == notification_id)
        {
            Some(notification) if !notification.is_read => {
                notification.is_read = true;
                self.unread_count = (self.unread_count - 1).max(0);
                true
            }
            _ => false,
        }
    }

    pub fn mark_all_read(&mut self) {
        for notification in self.notifications.iter_mut() {
            notification.is_read = true;
        }
        self.unread_count = 0;
    }

    pub fn remove(&mut self, notification_id: &ID) -> Option<Notification> {
        let pos = self
            .notifications
            .iter()
            .position(|n| &n.id == notification_id)?;
        let removed = self.notifications.remove(pos);
        if !removed.is_read {
            self.unread_count = (self.unread_count - 1).max(0);
        }
        Some(removed)
    }
}

#[derive(Default)]
struct CenterState {
    view: CenterView,
    visible: bool,
}

/// Foreground consumer of the notifications of the signed in user.
///
/// Mutations are applied locally before the server is told about them. A
/// failed server call is only logged, the next poll reconciles the view.
pub struct NotificationCenter {
    client: NotificationClient,
    state: Arc<Mutex<CenterState>>,
    page_limit: usize,
    poll_interval: Duration,
    poller: Mutex<Option<JoinHandle<()>>>,
}

async fn refresh_state(
    client: &NotificationClient,
    state: &Mutex<CenterState>,
    page_limit: usize,
) -> APIResponse<()> {
    let page = client.list(Some(page_limit)).await?;
    if let Ok(mut state) = state.lock() {
        state
            .view
            .apply_page(page.notifications, page.unread_count, page_limit);
    }
    Ok(())
}

impl NotificationCenter {
    pub fn new(client: NotificationClient) -> Self {
        Self {
            client,
            state: Arc::new(Mutex::new(CenterState {
                view: CenterView::default(),
                visible: true,
            })),
            page_limit: DEFAULT_PAGE_LIMIT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            poller: Mutex::new(None),
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_page_limit(mut self, page_limit: usize) -> Self {
        self.page_limit = page_limit.clamp(1, MAX_PAGE_LIMIT);
        self
    }

    pub fn view(&self) -> CenterView {
        self.state
            .lock()
            .map(|state| state.view.clone())
            .unwrap_or_default()
    }

    pub fn unread_count(&self) -> i64 {
        self.view().unread_count
    }

    fn update<F: FnOnce(&mut CenterView) -> R, R>(&self, f: F) -> Option<R> {
        self.state.lock().ok().map(|mut state| f(&mut state.view))
    }

    pub async fn refresh(&self) -> APIResponse<()> {
        refresh_state(&self.client, &self.state, self.page_limit).await
    }

    /// Polling pauses while the center is hidden
    pub fn set_visible(&self, visible: bool) {
        if let Ok(mut state) = self.state.lock() {
            state.visible = visible;
        }
    }

    pub fn receive(&self, notification: Notification) {
        self.update(|view| view.receive(notification));
    }

    /// Fetches once right away and then on every interval until stopped
    pub fn start(&self) {
        let client = self.client.clone();
        let state = self.state.clone();
        let page_limit = self.page_limit;
        let poll_interval = self.poll_interval;

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(poll_interval);
            loop {
                interval.tick().await;
                let visible = state.lock().map(|s| s.visible).unwrap_or(false);
                if !visible {
                    continue;
                }
                if let Err(e) = refresh_state(&client, &state, page_limit).await {
                    warn!("Unable to poll notifications: {:?}", e);
                }
            }
        });

        if let Ok(mut poller) = self.poller.lock() {
            if let Some(previous) = poller.replace(handle) {
                previous.abort();
            }
        }
    }

    pub fn stop(&self) {
        if let Ok(mut poller) = self.poller.lock() {
            if let Some(handle) = poller.take() {
                handle.abort();
            }
        }
    }

    pub fn is_polling(&self) -> bool {
        self.poller
            .lock()
            .map(|poller| poller.is_some())
            .unwrap_or(false)
    }

    pub async fn mark_read(&self, notification_id: &ID) {
        let changed = self.update(|view| view.mark_read(notification_id));
        if changed != Some(true) {
            return;
        }
        if let Err(e) = self.client.mark_read(notification_id).await {
            warn!(
                "Unable to mark notification: {} as read: {:?}",
                notification_id, e
            );
        }
    }

    pub async fn mark_all_read(&self) {
        self.update(|view| view.mark_all_read());
        if let Err(e) = self.client.mark_all_read().await {
            warn!("Unable to mark all notifications as read: {:?}", e);
        }
    }

    pub async fn delete(&self, notification_id: &ID) {
        self.update(|view| view.remove(notification_id));
        if let Err(e) = self.client.delete(notification_id).await {
            warn!("Unable to delete notification: {}: {:?}", notification_id, e);
        }
    }

    /// Marks the notification read and returns where to navigate, if anywhere
    pub async fn click(&self, notification_id: &ID) -> Option<String> {
        let action_url = self.update(|view| {
            view.notifications
                .iter()
                .find(|n| &n.id == notification_id)
                .and_then(|n| n.action_url.clone())
        });
        self.mark_read(notification_id).await;
        action_url.flatten()
    }
}

impl Drop for NotificationCenter {
    fn drop(&mut self) {
        self.stop();
    }
}
