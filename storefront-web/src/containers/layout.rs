use yew::{Children, Html, Properties, classes, function_component, html};

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    pub header: Html,
    pub children: Children,
}

#[function_component(Layout)]
pub fn layout(props: &LayoutProps) -> Html {
    html! {
    <>
        {props.header.clone()}
        <div class="min-h-screen bg-base-100 flex flex-col">
            <main class={classes!("flex-grow", "p-4", "max-w-5xl", "w-full", "mx-auto")}>
                {props.children.clone()}
            </main>
            <footer class="footer footer-center p-4 border-t border-base-300 text-base-content">
                <p>{"Storefront · Powered by Rust and Yew"}</p>
            </footer>
        </div>
    </>
    }
}
