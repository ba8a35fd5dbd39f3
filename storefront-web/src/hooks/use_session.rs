use std::rc::Rc;

use shared::auth::AuthProvider;
use shared::router::RouterAction;
use shared::session::SessionObserver;
use wasm_bindgen_futures::spawn_local;
use yew::{hook, use_effect_with};
use yewdux::prelude::use_dispatch;

use crate::models::app_state::AppState;
use crate::services::Services;

/// Mirror the provider's auth state into the store for as long as the
/// calling component is mounted.
#[hook]
pub fn use_session(services: &Services) {
    let dispatch = use_dispatch::<AppState>();
    use_effect_with(services.clone(), move |services| {
        let provider: Rc<dyn AuthProvider> = services.auth.clone();
        let observer = SessionObserver::activate(provider, move |session| {
            dispatch.apply(RouterAction::SessionChanged(session.clone()));
        });
        spawn_local(observer.initial_fetch());
        move || drop(observer)
    });
}
