use crate::config::{TYPEAHEAD_DEBOUNCE_MS, TYPEAHEAD_MAX_MATCHES, TYPEAHEAD_MIN_QUERY_LEN};
use crate::utils::substring_matches;
use gloo_timers::callback::Timeout;
use std::rc::Rc;
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// One named pool of entries a typeahead matches against.
#[derive(Clone, PartialEq)]
pub struct TypeaheadDataset {
    pub label: &'static str,
    pub entries: Rc<Vec<String>>,
}

/// Matches from one dataset, grouped under its label.
#[derive(Clone, PartialEq)]
pub struct MatchGroup {
    pub label: &'static str,
    pub hits: Vec<String>,
}

/// Holds the state and callbacks for a typeahead input.
#[derive(Clone)]
pub struct TypeaheadHandle {
    /// The current text content of the input field.
    pub query: String,
    /// Current matches, one group per dataset with at least one hit.
    pub groups: Vec<MatchGroup>,
    /// Callback for the input's `oninput` event. Updates the query and
    /// recomputes matches behind a short debounce.
    pub oninput: Callback<InputEvent>,
    /// Callback invoked with a picked suggestion. Fills the input and
    /// closes the list.
    pub onpick: Callback<String>,
    /// Callback for the input's `onblur` event. Closes the list.
    pub onblur: Callback<FocusEvent>,
}

fn collect_groups(datasets: &[TypeaheadDataset], query: &str) -> Vec<MatchGroup> {
    datasets
        .iter()
        .filter_map(|dataset| {
            let hits = substring_matches(query, &dataset.entries, TYPEAHEAD_MAX_MATCHES);
            if hits.is_empty() {
                None
            } else {
                Some(MatchGroup {
                    label: dataset.label,
                    hits,
                })
            }
        })
        .collect()
}

/// Custom hook to manage state for a typeahead input over one or more
/// datasets.
#[hook]
pub fn use_typeahead(datasets: Rc<Vec<TypeaheadDataset>>) -> TypeaheadHandle {
    let query_handle: UseStateHandle<String> = use_state(String::new);
    let groups_handle: UseStateHandle<Vec<MatchGroup>> = use_state(Vec::new);
    let debounce_handle: UseStateHandle<Option<Timeout>> = use_state(|| None::<Timeout>);

    let oninput = {
        // Clone handles for the closure.
        let query_setter = query_handle.clone();
        let groups_setter = groups_handle.clone();
        let debounce = debounce_handle.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let text = input.value();
            query_setter.set(text.clone());

            // Replacing the pending timeout cancels it, so matches only
            // recompute once typing pauses.
            let groups_setter = groups_setter.clone();
            let datasets = datasets.clone();
            let debounce_clear = debounce.clone();
            debounce.set(Some(Timeout::new(TYPEAHEAD_DEBOUNCE_MS, move || {
                let groups = if text.trim().chars().count() >= TYPEAHEAD_MIN_QUERY_LEN {
                    collect_groups(&datasets, &text)
                } else {
                    Vec::new()
                };
                groups_setter.set(groups);
                debounce_clear.set(None);
            })));
        })
    };

    let onpick = {
        let query_setter = query_handle.clone();
        let groups_setter = groups_handle.clone();
        let debounce = debounce_handle.clone();
        Callback::from(move |choice: String| {
            // Cancel any pending recompute so the menu stays closed.
            debounce.set(None);
            query_setter.set(choice);
            groups_setter.set(Vec::new());
        })
    };

    let onblur = {
        let groups_setter = groups_handle.clone();
        let debounce = debounce_handle.clone();
        Callback::from(move |_: FocusEvent| {
            debounce.set(None);
            groups_setter.set(Vec::new());
        })
    };

    TypeaheadHandle {
        query: (*query_handle).clone(),
        groups: (*groups_handle).clone(),
        oninput,
        onpick,
        onblur,
    }
}
