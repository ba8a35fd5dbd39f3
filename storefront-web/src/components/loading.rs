use yew::{Html, function_component, html};

#[function_component(Loading)]
pub fn loading() -> Html {
    html! {
        <div class="flex flex-col items-center justify-center h-full animate-fadeIn">
            <div class="bg-base-200 p-6 rounded-lg shadow-md flex flex-col items-center">
                <div class="text-xl font-medium flex items-center gap-2">
                    <i class="fas fa-utensils text-primary"></i>
                    <span>{"Storefront"}</span>
                </div>
                <div class="mt-3 flex items-center">
                    <span>{"Checking your session"}</span>
                    <span class="loading loading-dots loading-sm ml-2"></span>
                </div>
            </div>
        </div>
    }
}
