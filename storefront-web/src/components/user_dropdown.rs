use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct UserDropdownProps {
    pub display_name: AttrValue,
    #[prop_or_default]
    pub email: Option<AttrValue>,
    pub on_sign_out: Callback<()>,
}

#[function_component(UserDropdown)]
pub fn user_dropdown(props: &UserDropdownProps) -> Html {
    let sign_out_button = {
        let on_sign_out = props.on_sign_out.clone();
        let onclick = Callback::from(move |event: MouseEvent| {
            event.prevent_default();
            on_sign_out.emit(());
        });
        html! {
            <li><a {onclick}>{"Sign out"}</a></li>
        }
    };

    html! {
        <div class="dropdown dropdown-end">
            <div tabindex="0" role="button" class="btn btn-ghost btn-circle mb-1">
                <i class="fa-solid fa-user text-lg"></i>
            </div>
            <ul tabIndex={0} class="dropdown-content z-[1] menu p-2 shadow bg-base-200 rounded-box w-52">
                <li class="px-2 py-1 text-left">
                    <div class="text-sm font-semibold text-base-content">{ props.display_name.clone() }</div>
                    if let Some(email) = &props.email {
                        <div class="text-xs text-base-content/70">{ email.clone() }</div>
                    }
                </li>
                <div class="divider my-0"></div>
                {sign_out_button}
            </ul>
        </div>
    }
}
