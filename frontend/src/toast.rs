use yew::prelude::*;
use shared::{Notice, NoticeLevel};
use crate::styles::*;

#[derive(Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub notice: Notice,
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub toasts: Vec<Toast>,
    pub on_dismiss: Callback<u64>,
}

#[function_component(ToastList)]
pub fn toast_list(props: &Props) -> Html {
    html! {
        <div class="fixed bottom-4 right-4 z-50 w-80 space-y-2">
            {for props.toasts.iter().map(|toast| {
                let id = toast.id;
                let onclick = props.on_dismiss.reform(move |_: MouseEvent| id);
                let style = match toast.notice.level {
                    NoticeLevel::Success => alert_style("success"),
                    NoticeLevel::Error => alert_style("error"),
                };
                html! {
                    <div class={combine_classes(&style, "cursor-pointer")} {onclick}>
                        {&toast.notice.message}
                    </div>
                }
            })}
        </div>
    }
}
