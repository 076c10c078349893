use yew::prelude::*;
use yew_router::prelude::*;

mod config;
mod styles;
mod survey_chart;
mod survey_client;
mod survey_list;
mod toast;

use crate::{styles::*, survey_list::SurveyList};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")] Root,
    #[at("/home")] Home,
    #[not_found]
    #[at("/404")] NotFound,
}

#[function_component(Navigation)]
fn navigation() -> Html {
    let current_route = use_route::<Route>();

    html! {
        <nav class="bg-gray-900 shadow-lg fixed top-0 w-full z-50">
            <div class="container mx-auto px-6 py-4 flex justify-center space-x-8">
                <Link<Route> to={Route::Home} classes={classes!(
                    "text-base", "md:text-lg", "font-medium", "px-4", "py-2", "rounded-md",
                    "transition-colors", "duration-200", "ease-in-out",
                    "text-gray-200", "border", "border-transparent", "hover:border-blue-400", "hover:text-blue-400",
                    if current_route == Some(Route::Home) {
                        "text-blue-400 border-blue-400 ring-2 ring-blue-500 ring-offset-1 ring-offset-gray-900"
                    } else {
                        ""
                    }
                )}>
                    {"Survey Poller"}
                </Link<Route>>
            </div>
        </nav>
    }
}

#[function_component(App)]
fn app() -> Html {
    html! {
        <BrowserRouter>
            <div class={BG_PAGE}>
                <Navigation />
                <div class="pt-16">
                    <Switch<Route> render={switch} />
                </div>
            </div>
        </BrowserRouter>
    }
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Root => html! { <Redirect<Route> to={Route::Home} /> },
        Route::Home => html! { <SurveyList /> },
        Route::NotFound => html! {
            <div class={CONTAINER}>
                <div class={alert_style("error")}>{"Page not found"}</div>
            </div>
        },
    }
}

fn main() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}
