use crate::GroupRegistry;
use crate::tests::{event, join_member, publisher, topic};

use cr_core::{EventType, Topic};

use googletest::assert_that;
use googletest::prelude::eq;
use tokio::sync::mpsc::error::TryRecvError;

#[tokio::test]
async fn given_joined_member_when_publish_then_delivered_exactly_once() {
    // Given
    let registry = GroupRegistry::new();
    let (_id, mut rx) = join_member(&registry, &topic(), 4).await;

    // When
    let report = publisher(&registry).publish(&topic(), event("three issues")).await;

    // Then
    assert_that!(report.delivered, eq(1));
    assert_that!(report.failed, eq(0));
    let received = rx.try_recv().unwrap();
    assert_that!(received.event_type, eq(EventType::AnalysisResult));
    assert_that!(received.message.as_str(), eq("three issues"));
    assert_that!(rx.try_recv(), eq(&Err(TryRecvError::Empty)));
}

#[tokio::test]
async fn given_member_left_when_publish_then_never_delivered() {
    // Given
    let registry = GroupRegistry::new();
    let (id, mut rx) = join_member(&registry, &topic(), 4).await;
    registry.leave(&topic(), id).await;

    // When
    let report = publisher(&registry).publish(&topic(), event("late")).await;

    // Then
    assert_that!(report.recipients(), eq(0));
    assert_that!(rx.try_recv(), eq(&Err(TryRecvError::Disconnected)));
}

#[tokio::test]
async fn given_no_subscribers_when_publish_then_succeeds_with_empty_report() {
    let registry = GroupRegistry::new();

    let report = publisher(&registry).publish(&topic(), event("nobody")).await;

    assert_that!(report.delivered, eq(0));
    assert_that!(report.failed, eq(0));
}

#[tokio::test]
async fn given_full_member_buffer_when_publish_then_others_still_receive() {
    // Given
    let registry = GroupRegistry::new();
    let (_slow, mut slow_rx) = join_member(&registry, &topic(), 1).await;
    let (_fast, mut fast_rx) = join_member(&registry, &topic(), 8).await;
    let publisher = publisher(&registry);
    publisher.publish(&topic(), event("first")).await;

    // When
    let report = publisher.publish(&topic(), event("second")).await;

    // Then
    assert_that!(report.delivered, eq(1));
    assert_that!(report.failed, eq(1));
    assert_that!(fast_rx.try_recv().unwrap().message.as_str(), eq("first"));
    assert_that!(fast_rx.try_recv().unwrap().message.as_str(), eq("second"));
    assert_that!(slow_rx.try_recv().unwrap().message.as_str(), eq("first"));
    assert_that!(slow_rx.try_recv().is_err(), eq(true));
}

#[tokio::test]
async fn given_member_receiver_dropped_when_publish_then_counted_as_failed() {
    // Given
    let registry = GroupRegistry::new();
    let (_gone, gone_rx) = join_member(&registry, &topic(), 4).await;
    let (_live, mut live_rx) = join_member(&registry, &topic(), 4).await;
    drop(gone_rx);

    // When
    let report = publisher(&registry).publish(&topic(), event("hello")).await;

    // Then
    assert_that!(report.delivered, eq(1));
    assert_that!(report.failed, eq(1));
    assert_that!(live_rx.try_recv().is_ok(), eq(true));
}

#[tokio::test]
async fn given_member_of_other_topic_when_publish_then_not_delivered() {
    // Given
    let registry = GroupRegistry::new();
    let other = Topic::new("fix_group").unwrap();
    let (_id, mut rx) = join_member(&registry, &other, 4).await;

    // When
    publisher(&registry).publish(&topic(), event("not for you")).await;

    // Then
    assert_that!(rx.try_recv(), eq(&Err(TryRecvError::Empty)));
}
