pub mod app_state;
pub mod broadcast_publisher;
pub mod connection_config;
pub mod connection_id;
pub mod connection_state;
pub mod error;
pub mod group_registry;
pub mod metrics;
pub mod publish_report;
pub mod shutdown_coordinator;
pub mod shutdown_guard;
pub mod subscriber_connection;

pub use app_state::{AppState, handler};
pub use broadcast_publisher::BroadcastPublisher;
pub use connection_config::ConnectionConfig;
pub use connection_id::ConnectionId;
pub use connection_state::ConnectionState;
pub use error::{Result, WsError};
pub use group_registry::{GroupRegistry, MemberSender};
pub use metrics::Metrics;
pub use publish_report::PublishReport;
pub use shutdown_coordinator::ShutdownCoordinator;
pub use shutdown_guard::ShutdownGuard;
pub use subscriber_connection::SubscriberConnection;

#[cfg(test)]
mod tests;
