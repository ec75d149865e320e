use super::*;
use crate::testing::{expired_user, user};

fn settled(user_slot: UserSlot) -> SessionState {
    SessionState {
        is_loading: false,
        is_authenticated: user_slot.as_user().is_some(),
        user: user_slot,
        ..SessionState::default()
    }
}

// =============================================================
// SessionState defaults
// =============================================================

#[test]
fn session_state_default_is_loading_without_user() {
    let state = SessionState::default();
    assert!(state.is_loading);
    assert!(!state.is_authenticated);
    assert_eq!(state.user, UserSlot::Empty);
    assert!(state.active_navigator.is_none());
    assert!(state.error.is_none());
}

// =============================================================
// Initialised / UserLoaded
// =============================================================

#[test]
fn initialised_with_valid_user_authenticates() {
    let next = reduce(&SessionState::default(), Action::Initialised(Some(user("alice"))));
    assert!(next.is_authenticated);
    assert!(!next.is_loading);
    assert_eq!(next.user.as_user().map(|u| u.profile.sub.as_str()), Some("alice"));
}

#[test]
fn initialised_without_user_settles_unauthenticated() {
    let next = reduce(&SessionState::default(), Action::Initialised(None));
    assert!(!next.is_loading);
    assert!(!next.is_authenticated);
    assert_eq!(next.user, UserSlot::Empty);
}

#[test]
fn user_loaded_with_expired_user_is_not_authenticated() {
    let next = reduce(&SessionState::default(), Action::UserLoaded(Some(expired_user("bob"))));
    assert!(!next.is_authenticated);
    assert!(!next.is_loading);
    assert!(next.user.as_user().is_some());
}

#[test]
fn user_loaded_clears_previous_error() {
    let failed = reduce(
        &SessionState::default(),
        Action::Error(OidcError::SilentRenew("timeout".to_owned())),
    );
    let next = reduce(&failed, Action::UserLoaded(Some(user("alice"))));
    assert!(next.error.is_none());
    assert!(next.is_authenticated);
}

#[test]
fn repeated_loads_keep_latest_user_authenticated() {
    let mut state = SessionState::default();
    for sub in ["a", "b", "c"] {
        state = reduce(&state, Action::UserLoaded(Some(user(sub))));
        assert!(state.is_authenticated);
        assert!(!state.is_loading);
    }
    assert_eq!(state.user.as_user().map(|u| u.profile.sub.as_str()), Some("c"));
}

#[test]
fn user_loaded_keeps_active_navigator() {
    let busy = reduce(&SessionState::default(), Action::NavigatorInit(NavigatorMethod::SigninPopup));
    let next = reduce(&busy, Action::UserLoaded(Some(user("alice"))));
    assert_eq!(next.active_navigator, Some(NavigatorMethod::SigninPopup));
    assert!(!next.is_loading);
}

// =============================================================
// UserUnloaded
// =============================================================

#[test]
fn user_unloaded_clears_user_from_any_state() {
    let starts = [
        SessionState::default(),
        settled(UserSlot::Loaded(user("alice"))),
        settled(UserSlot::Empty),
        reduce(&SessionState::default(), Action::NavigatorInit(NavigatorMethod::SignoutRedirect)),
    ];
    for start in starts {
        let next = reduce(&start, Action::UserUnloaded);
        assert_eq!(next.user, UserSlot::Unloaded);
        assert!(!next.is_authenticated);
        assert_eq!(next.is_loading, start.is_loading);
        assert_eq!(next.active_navigator, start.active_navigator);
    }
}

// =============================================================
// Navigator init/close
// =============================================================

#[test]
fn navigator_init_then_close_restores_idle_for_every_method() {
    for method in NavigatorMethod::ALL {
        let start = settled(UserSlot::Loaded(user("alice")));
        let busy = reduce(&start, Action::NavigatorInit(method));
        assert!(busy.is_loading);
        assert_eq!(busy.active_navigator, Some(method));

        let idle = reduce(&busy, Action::NavigatorClose);
        assert!(!idle.is_loading);
        assert!(idle.active_navigator.is_none());
        assert!(idle.is_authenticated);
    }
}

#[test]
fn navigator_close_does_not_count_open_navigators() {
    let first = reduce(&settled(UserSlot::Empty), Action::NavigatorInit(NavigatorMethod::SigninRedirect));
    let second = reduce(&first, Action::NavigatorInit(NavigatorMethod::SigninSilent));
    let closed = reduce(&second, Action::NavigatorClose);
    assert!(!closed.is_loading);
    assert!(closed.active_navigator.is_none());
}

// =============================================================
// Error
// =============================================================

#[test]
fn error_keeps_user_and_authentication() {
    let start = settled(UserSlot::Loaded(user("alice")));
    let err = OidcError::SilentRenew("iframe timeout".to_owned());
    let next = reduce(&start, Action::Error(err.clone()));
    assert_eq!(next.error, Some(err));
    assert!(!next.is_loading);
    assert!(next.is_authenticated);
    assert!(next.user.as_user().is_some());
}

#[test]
fn error_stops_bootstrap_loading() {
    let next = reduce(
        &SessionState::default(),
        Action::Error(OidcError::Client("network".to_owned())),
    );
    assert!(!next.is_loading);
    assert!(!next.is_authenticated);
}

// =============================================================
// SessionStore
// =============================================================

#[test]
fn store_dispatch_updates_views() {
    let store = SessionStore::new();
    let views = store.views();
    assert!(views.is_loading.get_untracked());

    store.dispatch(Action::Initialised(Some(user("alice"))));

    assert!(!views.is_loading.get_untracked());
    assert!(views.is_authenticated.get_untracked());
    assert_eq!(
        views.user.get_untracked().into_user().map(|u| u.profile.sub),
        Some("alice".to_owned())
    );
    assert!(views.active_navigator.get_untracked().is_none());
    assert!(views.error.get_untracked().is_none());
}

#[test]
fn stores_are_independent() {
    let a = SessionStore::new();
    let b = SessionStore::new();
    a.dispatch(Action::Initialised(Some(user("alice"))));
    assert!(a.snapshot().is_authenticated);
    assert!(b.snapshot().is_loading);
    assert!(!b.snapshot().is_authenticated);
}

// =============================================================
// UserSlot
// =============================================================

#[test]
fn user_slot_from_option() {
    assert_eq!(UserSlot::from(None), UserSlot::Empty);
    assert!(matches!(UserSlot::from(Some(user("a"))), UserSlot::Loaded(_)));
    assert!(UserSlot::Unloaded.as_user().is_none());
}
