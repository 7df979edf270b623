use yew::prelude::*;

#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <div class="login-main">
            <section class="login-card">
                <h1>{ "Page not found" }</h1>
                <p class="subtitle">{ "The login screen lives at the site root." }</p>
            </section>
        </div>
    }
}
