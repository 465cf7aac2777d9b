use super::*;

#[test]
fn starts_hidden() {
    let ind = Indicator::new(HidePolicy::FireAndForget);
    assert!(!ind.is_visible());
}

#[test]
fn show_then_expire_hides() {
    for policy in [HidePolicy::FireAndForget, HidePolicy::CancelOnRestart] {
        let mut ind = Indicator::new(policy);
        let ticket = ind.show();
        assert!(ind.is_visible());
        assert!(ind.expire(ticket));
        assert!(!ind.is_visible());
    }
}

#[test]
fn fire_and_forget_hides_on_stale_ticket() {
    let mut ind = Indicator::new(HidePolicy::FireAndForget);
    let first = ind.show();
    let second = ind.show();
    // The first gesture's timer fires while the second is still showing.
    assert!(ind.expire(first));
    assert!(!ind.is_visible());
    // The second timer fires later and is harmless.
    assert!(ind.expire(second));
    assert!(!ind.is_visible());
}

#[test]
fn cancel_on_restart_ignores_stale_ticket() {
    let mut ind = Indicator::new(HidePolicy::CancelOnRestart);
    let first = ind.show();
    let second = ind.show();
    assert!(!ind.expire(first));
    assert!(ind.is_visible());
    assert!(ind.expire(second));
    assert!(!ind.is_visible());
}

#[test]
fn tickets_are_distinct() {
    let mut ind = Indicator::default();
    let a = ind.show();
    let b = ind.show();
    assert_ne!(a, b);
}

#[test]
fn default_policy_is_fire_and_forget() {
    assert_eq!(Indicator::default().policy(), HidePolicy::FireAndForget);
}
