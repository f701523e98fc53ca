use crate::ConnectionId;

use cr_core::{BroadcastEvent, Topic};

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, info};
use tokio::sync::{RwLock, mpsc};

/// Outbound channel of one subscriber
pub type MemberSender = mpsc::Sender<BroadcastEvent>;

type Members = HashMap<ConnectionId, MemberSender>;
type Group = Arc<RwLock<Members>>;

/// Topic -> member set.
///
/// The outer map lock is taken exclusively only to create or remove a topic
/// entry. Joins and leaves on an existing topic hold it shared, so separate
/// topics never contend. Each topic's member set has its own lock.
#[derive(Clone, Default)]
pub struct GroupRegistry {
    groups: Arc<RwLock<HashMap<Topic, Group>>>,
}

impl GroupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `connection_id` to `topic`. Joining twice replaces the sender.
    pub async fn join(&self, topic: &Topic, connection_id: ConnectionId, sender: MemberSender) {
        {
            let groups = self.groups.read().await;
            if let Some(group) = groups.get(topic) {
                let mut members = group.write().await;
                members.insert(connection_id, sender);
                debug!(
                    "Connection {} joined {} ({} members)",
                    connection_id,
                    topic,
                    members.len()
                );
                return;
            }
        }

        let mut groups = self.groups.write().await;
        let group = groups.entry(topic.clone()).or_insert_with(|| {
            info!("Created broadcast group {}", topic);
            Group::default()
        });

        let mut members = group.write().await;
        members.insert(connection_id, sender);
        debug!(
            "Connection {} joined {} ({} members)",
            connection_id,
            topic,
            members.len()
        );
    }

    /// Remove `connection_id` from `topic`. A no-op for non-members.
    ///
    /// Returns whether the connection was a member.
    pub async fn leave(&self, topic: &Topic, connection_id: ConnectionId) -> bool {
        let (removed, now_empty) = {
            let groups = self.groups.read().await;
            let Some(group) = groups.get(topic) else {
                return false;
            };

            let mut members = group.write().await;
            let removed = members.remove(&connection_id).is_some();
            (removed, members.is_empty())
        };

        if removed {
            debug!("Connection {} left {}", connection_id, topic);
        }

        if now_empty {
            // A join may have slipped in between the two lock sections.
            let mut groups = self.groups.write().await;
            let still_empty = match groups.get(topic) {
                Some(group) => group.read().await.is_empty(),
                None => false,
            };

            if still_empty {
                groups.remove(topic);
                info!("Removed empty broadcast group {}", topic);
            }
        }

        removed
    }

    /// Current member ids of `topic`
    pub async fn members_of(&self, topic: &Topic) -> Vec<ConnectionId> {
        let groups = self.groups.read().await;
        match groups.get(topic) {
            Some(group) => group.read().await.keys().copied().collect(),
            None => Vec::new(),
        }
    }

    pub async fn is_member(&self, topic: &Topic, connection_id: ConnectionId) -> bool {
        let groups = self.groups.read().await;
        match groups.get(topic) {
            Some(group) => group.read().await.contains_key(&connection_id),
            None => false,
        }
    }

    pub async fn member_count(&self, topic: &Topic) -> usize {
        let groups = self.groups.read().await;
        match groups.get(topic) {
            Some(group) => group.read().await.len(),
            None => 0,
        }
    }

    pub async fn topic_count(&self) -> usize {
        self.groups.read().await.len()
    }

    pub async fn total_members(&self) -> usize {
        let groups = self.groups.read().await;
        let mut total = 0;
        for group in groups.values() {
            total += group.read().await.len();
        }
        total
    }

    /// Copy of the member channels, taken under a short read section so that
    /// delivery happens without holding any registry lock.
    pub(crate) async fn snapshot(&self, topic: &Topic) -> Vec<(ConnectionId, MemberSender)> {
        let groups = self.groups.read().await;
        match groups.get(topic) {
            Some(group) => group
                .read()
                .await
                .iter()
                .map(|(id, sender)| (*id, sender.clone()))
                .collect(),
            None => Vec::new(),
        }
    }
}
