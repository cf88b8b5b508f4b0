//! Main module for the Curation Board application using Yew.
//! Wires UI components, state hooks, and side-effect logic.

use curation_board::{
    distinct_authors,
    distinct_repositories,
    format_clock,
    format_voting_power,
    known_categories,
    manager_accounts,
    moderator_accounts,
    read_contributions_from_csv_str,
    read_moderators_from_json_str,
    ClockTick,
    Contribution,
    ContributionFilter,
    Moderator,
    PowerTick,
    RechargeClock,
    VotingPower,
};
use gloo_timers::callback::Interval;
use log::warn;
use std::rc::Rc;
use yew::prelude::*;

mod carousel;
mod components;
mod config;
mod hooks;
mod utils;

use carousel::{init_carousel, managers_carousel, projects_carousel};
use components::{
    render_carousel_slides,
    render_contribution_grid,
    render_filter_bar,
    render_suggestions,
    ContributionCounter,
};
use config::*;
use hooks::{use_typeahead, TypeaheadDataset};
use utils::{parse_clock_display, parse_voting_power};

// ──────────────────────────────────────────────────────────────────────────────
// Helper functions

/// Mirror the countdown into the document title so the tab shows it too.
fn set_page_title(text: &str) {
    gloo_utils::document().set_title(text);
}

// ──────────────────────────────────────────────────────────────────────────────
// Status bar components

#[derive(Properties, PartialEq)]
pub struct RechargeTimerProps {
    /// Starting display in `H:MM:SS` form, as served with the page.
    pub initial: AttrValue,
}

/// Countdown until the voting bot is fully recharged.
///
/// Parses the initial display into a total number of seconds, renders the
/// normalized form right away, then re-derives the remaining time from the
/// absolute deadline once per second until it runs out.
#[function_component(RechargeTimer)]
fn recharge_timer(props: &RechargeTimerProps) -> Html {
    let display = use_state(|| props.initial.to_string());
    let interval = use_mut_ref(|| None::<Interval>);

    {
        let display = display.clone();
        let interval = interval.clone();
        use_effect_with(props.initial.clone(), move |initial| {
            match parse_clock_display(initial) {
                Ok(total_seconds) => {
                    let mut clock = RechargeClock::new(total_seconds, js_sys::Date::now());
                    let first = format_clock(total_seconds);
                    set_page_title(&first);
                    display.set(first);

                    let tick_display = display.clone();
                    let tick_interval = interval.clone();
                    *interval.borrow_mut() = Some(Interval::new(CLOCK_TICK_MS, move || {
                        match clock.tick(js_sys::Date::now()) {
                            ClockTick::Running(remaining) => {
                                let text = format_clock(remaining);
                                set_page_title(&text);
                                tick_display.set(text);
                            }
                            ClockTick::Expired => {
                                // Dropping the handle clears the browser interval.
                                tick_interval.borrow_mut().take();
                            }
                        }
                    }));
                }
                Err(e) => {
                    warn!("Unusable recharge display '{}': {}", initial, e);
                    set_page_title(CLOCK_FALLBACK_DISPLAY);
                    display.set(CLOCK_FALLBACK_DISPLAY.to_string());
                }
            }

            let interval = interval.clone();
            move || {
                interval.borrow_mut().take();
            }
        });
    }

    html! {
        <span class="recharge-clock" id="time">{ (*display).clone() }</span>
    }
}

#[derive(Properties, PartialEq)]
pub struct VotingPowerBadgeProps {
    /// Starting display such as `83.47%`, as served with the page.
    pub initial: AttrValue,
}

/// Voting power readout that regenerates by one step per tick.
///
/// The initial text stays untouched until the first tick fires. Once the
/// cap is crossed the value pins to `100.00` and the interval stops.
#[function_component(VotingPowerBadge)]
fn voting_power_badge(props: &VotingPowerBadgeProps) -> Html {
    let display = use_state(|| props.initial.to_string());
    let interval = use_mut_ref(|| None::<Interval>);

    {
        let display = display.clone();
        let interval = interval.clone();
        use_effect_with(props.initial.clone(), move |initial| {
            match parse_voting_power(initial) {
                Ok(percent) => {
                    let mut power = VotingPower::new(percent);
                    let tick_display = display.clone();
                    let tick_interval = interval.clone();
                    *interval.borrow_mut() =
                        Some(Interval::new(VOTING_POWER_TICK_MS, move || {
                            match power.tick() {
                                PowerTick::Running(value) => {
                                    tick_display.set(format_voting_power(value));
                                }
                                PowerTick::Saturated => {
                                    tick_display.set(format_voting_power(power.current()));
                                    tick_interval.borrow_mut().take();
                                }
                            }
                        }));
                }
                Err(e) => {
                    warn!("Unusable voting power display '{}': {}", initial, e);
                    display.set(VOTING_POWER_FALLBACK_DISPLAY.to_string());
                }
            }

            let interval = interval.clone();
            move || {
                interval.borrow_mut().take();
            }
        });
    }

    html! {
        <span class="voting-power" id="current-vp">{ (*display).clone() }</span>
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// Search components

#[derive(Properties, PartialEq)]
pub struct TypeaheadProps {
    pub input_id: AttrValue,
    pub placeholder: AttrValue,
    /// Datasets searched on every keystroke, in render order.
    pub datasets: Rc<Vec<TypeaheadDataset>>,
    /// Render a dataset header above each group of matches.
    #[prop_or_default]
    pub show_headers: bool,
}

/// Debounced search input with a suggestion menu underneath.
#[function_component(Typeahead)]
fn typeahead(props: &TypeaheadProps) -> Html {
    let handle = use_typeahead(props.datasets.clone());

    html! {
        <div class="typeahead">
            <input
                type="text"
                id={props.input_id.clone()}
                class="typeahead-input"
                autocomplete="off"
                placeholder={props.placeholder.clone()}
                value={handle.query.clone()}
                oninput={handle.oninput.clone()}
                onblur={handle.onblur.clone()}
            />
            { render_suggestions(&handle.groups, &handle.query, props.show_headers, &handle.onpick) }
        </div>
    }
}

// ──────────────────────────────────────────────────────────────────────────────

/// Primary application component wiring datasets, filter state, and the
/// status bar timers.
#[function_component(Main)]
fn main_component() -> Html {
    let contributions_csv = include_str!("contributions.csv");
    let moderators_json = include_str!("moderators.json");

    let contributions = use_state(Vec::<Contribution>::new);
    let moderators = use_state(Vec::<Moderator>::new);
    let filter = use_state(ContributionFilter::new);

    // Load the embedded datasets on mount
    {
        let contributions = contributions.clone();
        let moderators = moderators.clone();
        use_effect_with((), move |_| {
            let loaded = read_contributions_from_csv_str(contributions_csv).unwrap_or_default();
            contributions.set(loaded);
            let loaded = read_moderators_from_json_str(moderators_json).unwrap_or_default();
            moderators.set(loaded);
        });
    }

    let on_toggle = {
        let filter = filter.clone();
        Callback::from(move |category: String| {
            let mut next = (*filter).clone();
            next.toggle(&category);
            filter.set(next);
        })
    };

    // Derived views, recomputed per render; the datasets are small
    let categories = known_categories(&contributions);
    let visible_count = filter.visible_count(&contributions);
    let manager_names = Rc::new(manager_accounts(&moderators));
    let moderator_names = Rc::new(moderator_accounts(&moderators));
    let author_names = Rc::new(distinct_authors(&contributions));
    let repository_names = Rc::new(distinct_repositories(&contributions));

    let search_datasets = Rc::new(vec![
        TypeaheadDataset {
            label: "Community managers",
            entries: manager_names.clone(),
        },
        TypeaheadDataset {
            label: "Moderators",
            entries: moderator_names.clone(),
        },
        TypeaheadDataset {
            label: "Contributors",
            entries: author_names.clone(),
        },
        TypeaheadDataset {
            label: "Projects",
            entries: repository_names.clone(),
        },
    ]);
    let manager_datasets = Rc::new(vec![TypeaheadDataset {
        label: "Community managers",
        entries: manager_names.clone(),
    }]);
    let moderator_datasets = Rc::new(vec![TypeaheadDataset {
        label: "Moderators",
        entries: moderator_names.clone(),
    }]);
    let contributor_datasets = Rc::new(vec![TypeaheadDataset {
        label: "Contributors",
        entries: author_names.clone(),
    }]);
    let project_datasets = Rc::new(vec![TypeaheadDataset {
        label: "Projects",
        entries: repository_names.clone(),
    }]);

    // Boot the carousels once their slide data is present
    {
        let manager_count = manager_names.len();
        let repository_count = repository_names.len();
        use_effect_with(
            (manager_count, repository_count),
            move |&(manager_count, repository_count)| {
                if manager_count > 0 {
                    init_carousel(MANAGERS_CAROUSEL_SELECTOR, &managers_carousel());
                }
                if repository_count > 0 {
                    init_carousel(PROJECTS_CAROUSEL_SELECTOR, &projects_carousel());
                }
            },
        );
    }

    html! {
        <div class="container">
            // Header with the live bot status
            <header class="board-header">
                <h1>{ "Contribution Curation Board" }</h1>
                <div class="status-bar">
                    <div class="status-item">
                        <span class="status-label">{ "Next full recharge in" }</span>
                        <RechargeTimer initial={DEFAULT_RECHARGE_DISPLAY} />
                    </div>
                    <div class="status-item">
                        <span class="status-label">{ "Voting power" }</span>
                        <VotingPowerBadge initial={DEFAULT_VOTING_POWER_DISPLAY} />
                    </div>
                </div>
            </header>

            // Combined search across every dataset
            <div class="search-section">
                <Typeahead
                    input_id="search"
                    placeholder="Search the board"
                    datasets={search_datasets}
                    show_headers={true}
                />
            </div>

            // Community manager carousel
            <div class="board-managers">
                <h2>{ "Community managers" }</h2>
                <label for="community-managers">{ "Find a community manager:" }</label>
                <Typeahead
                    input_id="community-managers"
                    placeholder="Community manager"
                    datasets={manager_datasets}
                />
                <div class="board-managers__carousel">
                    { render_carousel_slides(&manager_names) }
                </div>
            </div>

            // Moderator, contributor, and project lookups
            <div class="board-directory">
                <div class="form-group">
                    <label for="moderators">{ "Find a moderator:" }</label>
                    <Typeahead
                        input_id="moderators"
                        placeholder="Moderator"
                        datasets={moderator_datasets}
                    />
                </div>
                <div class="form-group">
                    <label for="contributors">{ "Find a contributor:" }</label>
                    <Typeahead
                        input_id="contributors"
                        placeholder="Contributor"
                        datasets={contributor_datasets}
                    />
                </div>
                <div class="form-group">
                    <label for="projects">{ "Find a project:" }</label>
                    <Typeahead
                        input_id="projects"
                        placeholder="Project"
                        datasets={project_datasets}
                    />
                </div>
            </div>

            // Featured project carousel
            <div class="board-projects">
                <h2>{ "Featured projects" }</h2>
                <div class="board-projects__carousel">
                    { render_carousel_slides(&repository_names) }
                </div>
            </div>

            // Category filter and the contribution grid
            <div class="board-contributions">
                <h2>{ "Latest contributions" }</h2>
                <div class="filter-header">
                    { render_filter_bar(&categories, &filter, &on_toggle) }
                    <div class="filter-summary">
                        <ContributionCounter count={visible_count} />
                        <span class="filter-summary__label">{ "shown" }</span>
                    </div>
                </div>
                { render_contribution_grid(&contributions, &filter) }
            </div>
        </div>
    }
}

/// App wrapper for the curation board.
#[function_component]
pub fn App() -> Html {
    html! {
        <Main />
    }
}

/// Entry point: installs the panic hook and starts the Yew renderer.
fn main() {
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}
