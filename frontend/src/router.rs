use yew::prelude::*;
use yew_router::prelude::*;

use crate::pages::{login::Login, not_found::NotFound};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Login,
    #[not_found]
    #[at("/404")]
    NotFound,
}

pub fn switch(routes: Route) -> Html {
    match routes {
        Route::Login => html! { <Login /> },
        Route::NotFound => html! { <NotFound /> },
    }
}
