use yew::prelude::*;
use crate::styles::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub labels: Vec<i64>,
    pub votes: Vec<i64>,
    pub total: i64,
}

/// Horizontal bar chart of the current tally, one bar per answer.
#[function_component(VoteChart)]
pub fn vote_chart(props: &Props) -> Html {
    let max = props.votes.iter().copied().max().unwrap_or(0).max(1);

    html! {
        <div class={SPACE_Y_BASE}>
            {for props.labels.iter().zip(props.votes.iter()).map(|(label, votes)| {
                let width = (*votes as f64 / max as f64 * 100.0).round();
                html! {
                    <div class="flex items-center gap-3">
                        <span class={combine_classes(TEXT_LABEL, "w-8 text-right")}>{label}</span>
                        <div class="flex-1 bg-gray-700 rounded h-4">
                            <div class="bg-blue-500 h-4 rounded transition-all duration-300"
                                style={format!("width: {}%", width)} />
                        </div>
                        <span class={combine_classes(TEXT_MUTED, "w-10")}>{votes}</span>
                    </div>
                }
            })}
            <p class={TEXT_MUTED}>{format!("Total votes: {}", props.total)}</p>
        </div>
    }
}
