//! Pure Yew view components for the curation board UI.
//!
//! This module contains stateless components that render based on props,
//! making them easy to test and reuse.

use crate::hooks::MatchGroup;
use crate::utils::{category_display_name, split_on_match};
use curation_board::{Contribution, ContributionFilter, ALL_CATEGORY};
use yew::prelude::*;

/// One category filter control. Emits its category string when clicked.
#[derive(Properties, PartialEq)]
pub struct FilterButtonProps {
    pub category: AttrValue,
    pub inactive: bool,
    pub onclick: Callback<String>,
}

#[function_component(FilterButton)]
pub fn filter_button(props: &FilterButtonProps) -> Html {
    let onclick = {
        let onclick = props.onclick.clone();
        let category = props.category.clone();
        Callback::from(move |_: MouseEvent| onclick.emit(category.to_string()))
    };
    let classes = classes!(
        "filter-button",
        format!("category--{}", props.category),
        props.inactive.then_some("category--inactive"),
    );
    html! {
        <button class={classes} {onclick}>
            { category_display_name(&props.category).to_string() }
        </button>
    }
}

/// Live count of the visible contribution cards.
#[derive(Properties, PartialEq)]
pub struct ContributionCounterProps {
    pub count: usize,
}

#[function_component(ContributionCounter)]
pub fn contribution_counter(props: &ContributionCounterProps) -> Html {
    html! {
        <span class="contribution-counter">{ props.count.to_string() }</span>
    }
}

/// Renders the "all" control plus one control per known category.
pub fn render_filter_bar(
    categories: &[String],
    filter: &ContributionFilter,
    on_toggle: &Callback<String>,
) -> Html {
    html! {
        <div class="filter-bar">
            <FilterButton
                category={AttrValue::from(ALL_CATEGORY)}
                inactive={!filter.is_all_active()}
                onclick={on_toggle.clone()}
            />
            { categories.iter().map(|category| {
                html! {
                    <FilterButton
                        category={AttrValue::from(category.clone())}
                        inactive={!filter.is_category_active(category)}
                        onclick={on_toggle.clone()}
                    />
                }
            }).collect::<Html>() }
        </div>
    }
}

/// Renders one contribution card. A hidden card keeps its place in the
/// grid and merely loses the `show` marker class.
pub fn render_contribution_card(contribution: &Contribution, visible: bool) -> Html {
    html! {
        <article class={classes!(
            "contribution",
            contribution.category.clone(),
            visible.then_some("show"),
        )}>
            <header class="contribution__header">
                <span class="contribution__category">
                    { category_display_name(&contribution.category).to_string() }
                </span>
                { if contribution.staff_pick {
                    html!{ <span class="contribution__staff-pick">{ "Staff pick" }</span> }
                } else { html!{} } }
            </header>
            <a class="contribution__repository" href={contribution.url.clone()}>
                { contribution.repository.clone() }
            </a>
            <footer class="contribution__meta">
                <span class="contribution__author">{ format!("by @{}", contribution.author) }</span>
                <span class="contribution__moderator">
                    { format!("reviewed by @{}", contribution.moderator) }
                </span>
                <span class="contribution__score">{ format!("score {}", contribution.score) }</span>
            </footer>
        </article>
    }
}

/// Renders the whole card grid with visibility resolved per card.
pub fn render_contribution_grid(
    contributions: &[Contribution],
    filter: &ContributionFilter,
) -> Html {
    // Early return for an empty dataset
    if contributions.is_empty() {
        return html! {
            <div class="contribution-grid">
                <p class="no-contributions-message">{ "No contributions to display" }</p>
            </div>
        };
    }

    html! {
        <div class="contribution-grid">
            { contributions.iter().map(|contribution| {
                render_contribution_card(contribution, filter.is_visible(&contribution.category))
            }).collect::<Html>() }
        </div>
    }
}

/// Renders the typeahead dropdown, with a labelled header per dataset
/// group when requested.
pub fn render_suggestions(
    groups: &[MatchGroup],
    query: &str,
    show_headers: bool,
    onpick: &Callback<String>,
) -> Html {
    if groups.is_empty() {
        return html! {};
    }

    html! {
        <ul class="typeahead-menu">
            { groups.iter().map(|group| {
                html! {
                    <>
                        { if show_headers {
                            html!{ <li class="search-dataset">{ group.label }</li> }
                        } else { html!{} } }
                        { group.hits.iter().map(|hit| {
                            let choice = hit.clone();
                            let onpick = onpick.clone();
                            // mousedown fires before the input loses focus,
                            // so picking wins over the blur close
                            let onmousedown = Callback::from(move |e: MouseEvent| {
                                e.prevent_default();
                                onpick.emit(choice.clone());
                            });
                            html! {
                                <li class="typeahead-suggestion" {onmousedown}>
                                    { render_highlighted(hit, query) }
                                </li>
                            }
                        }).collect::<Html>() }
                    </>
                }
            }).collect::<Html>() }
        </ul>
    }
}

/// Bold the part of the candidate the query matched.
fn render_highlighted(candidate: &str, query: &str) -> Html {
    match split_on_match(candidate, query) {
        Some((before, hit, after)) => html! {
            <>
                { before.to_string() }
                <strong class="tt-highlight">{ hit.to_string() }</strong>
                { after.to_string() }
            </>
        },
        None => html! { <>{ candidate.to_string() }</> },
    }
}

/// Renders the slide elements a carousel wraps after initialization.
pub fn render_carousel_slides(names: &[String]) -> Html {
    html! {
        <>
            { names.iter().map(|name| {
                html! {
                    <div class="carousel-slide">
                        <span class="carousel-slide__name">{ name.clone() }</span>
                    </div>
                }
            }).collect::<Html>() }
        </>
    }
}
