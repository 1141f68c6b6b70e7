use super::*;

#[test]
fn subscription_receives_posts_until_dropped() {
    let center = KeyboardCenter::new();
    let sub = center.subscribe();
    assert_eq!(center.subscriber_count(), 1);

    assert_eq!(center.post(KeyboardEvent::WillShow { height: 300.0 }), 1);
    assert_eq!(center.post(KeyboardEvent::WillHide), 1);
    assert_eq!(
        sub.drain(),
        vec![
            KeyboardEvent::WillShow { height: 300.0 },
            KeyboardEvent::WillHide
        ]
    );
    assert!(sub.drain().is_empty());

    drop(sub);
    assert_eq!(center.subscriber_count(), 0);
    assert_eq!(center.post(KeyboardEvent::WillHide), 0);
}

#[test]
fn clones_share_one_registry() {
    let center = KeyboardCenter::new();
    let other = center.clone();
    let _a = center.subscribe();
    let _b = other.subscribe();
    assert_eq!(center.subscriber_count(), 2);
    assert_eq!(other.post(KeyboardEvent::WillHide), 2);
}

#[test]
fn subscription_outliving_center_drops_cleanly() {
    let center = KeyboardCenter::new();
    let sub = center.subscribe();
    drop(center);
    assert!(sub.drain().is_empty());
    drop(sub);
}

#[test]
fn viewport_moves_only_for_bottom_caption() {
    let show = KeyboardEvent::WillShow { height: 260.0 };
    assert_eq!(shift_viewport(0.0, false, show), 0.0);
    assert_eq!(shift_viewport(0.0, true, show), -260.0);
    assert_eq!(shift_viewport(-260.0, true, show), -260.0);
    assert_eq!(shift_viewport(-260.0, true, KeyboardEvent::WillHide), 0.0);
    assert_eq!(shift_viewport(-260.0, false, KeyboardEvent::WillHide), -260.0);
    assert_eq!(shift_viewport(0.0, true, KeyboardEvent::WillHide), 0.0);
}
