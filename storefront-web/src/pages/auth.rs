use shared::router::RouterAction;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yewdux::prelude::use_dispatch;

use crate::models::app_state::AppState;
use crate::services::use_services;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    SignIn,
    SignUp,
}

impl Mode {
    const fn title(self) -> &'static str {
        match self {
            Self::SignIn => "Sign in",
            Self::SignUp => "Create account",
        }
    }

    const fn busy_label(self) -> &'static str {
        match self {
            Self::SignIn => "Signing in...",
            Self::SignUp => "Creating account...",
        }
    }

    const fn toggled(self) -> Self {
        match self {
            Self::SignIn => Self::SignUp,
            Self::SignUp => Self::SignIn,
        }
    }
}

#[function_component(AuthPage)]
pub fn auth_page() -> Html {
    let services = use_services();
    let dispatch = use_dispatch::<AppState>();
    let mode = use_state(|| Mode::SignIn);
    let email = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let notice = use_state(|| None::<String>);
    let loading = use_state(|| false);

    let onsubmit = {
        let email_handle = email.clone();
        let password_handle = password.clone();
        let error_handle = error.clone();
        let notice_handle = notice.clone();
        let loading_handle = loading.clone();
        let mode = *mode;
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let email_value = (*email_handle).clone();
            let password_value = (*password_handle).clone();
            loading_handle.set(true);
            error_handle.set(None);
            notice_handle.set(None);
            let auth = services.auth.clone();
            let dispatch = dispatch.clone();
            let loading_ref = loading_handle.clone();
            let error_ref = error_handle.clone();
            let notice_ref = notice_handle.clone();
            spawn_local(async move {
                let result = match mode {
                    Mode::SignIn => auth
                        .sign_in_with_password(&email_value, &password_value)
                        .await
                        .map(Some),
                    Mode::SignUp => auth.sign_up(&email_value, &password_value).await,
                };
                match result {
                    Ok(Some(_)) => dispatch.apply(RouterAction::Authenticated),
                    Ok(None) => notice_ref.set(Some(
                        "Check your inbox to confirm your email, then sign in.".to_string(),
                    )),
                    Err(err) => {
                        log::warn!("{} failed: {err}", mode.title());
                        error_ref.set(Some(err.user_message()));
                    }
                }
                loading_ref.set(false);
            });
        })
    };

    let on_email_change = {
        let email = email.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                email.set(input.value());
            }
        })
    };

    let on_password_change = {
        let password = password.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                password.set(input.value());
            }
        })
    };

    let on_toggle = {
        let mode = mode.clone();
        let error = error.clone();
        Callback::from(move |_: MouseEvent| {
            mode.set(mode.toggled());
            error.set(None);
        })
    };

    let is_busy = *loading;
    let disable_submit = (*email).is_empty() || (*password).is_empty() || is_busy;

    html! {
        <div class="flex items-center justify-center min-h-[60vh]">
            <div class="card w-full max-w-md shadow-lg bg-base-200">
                <form class="card-body" onsubmit={onsubmit}>
                    <h2 class="card-title text-2xl">{mode.title()}</h2>
                    if let Some(message) = &*error {
                        <div class="alert alert-error">
                            <span>{message.clone()}</span>
                        </div>
                    }
                    if let Some(message) = &*notice {
                        <div class="alert alert-info">
                            <span>{message.clone()}</span>
                        </div>
                    }
                    <div class="form-control">
                        <label class="label" for="email">
                            <span class="label-text">{"Email"}</span>
                        </label>
                        <input
                            id="email"
                            class="input input-bordered"
                            type="email"
                            required=true
                            value={(*email).clone()}
                            oninput={on_email_change}
                        />
                    </div>
                    <div class="form-control">
                        <label class="label" for="password">
                            <span class="label-text">{"Password"}</span>
                        </label>
                        <input
                            id="password"
                            class="input input-bordered"
                            type="password"
                            required=true
                            value={(*password).clone()}
                            oninput={on_password_change}
                        />
                    </div>
                    <div class="form-control mt-6">
                        <button class="btn btn-primary" type="submit" disabled={disable_submit}>
                            {if is_busy { mode.busy_label() } else { mode.title() }}
                        </button>
                    </div>
                    <button class="btn btn-link btn-sm" type="button" onclick={on_toggle}>
                        {match *mode {
                            Mode::SignIn => "New here? Create an account",
                            Mode::SignUp => "Already have an account? Sign in",
                        }}
                    </button>
                </form>
            </div>
        </div>
    }
}
