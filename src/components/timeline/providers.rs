use super::update_timeline;
use crate::view_model::{
    DataProvider, DataProviderType, ProviderFields, ProviderPartsMut, QueryOperator, QueryValue,
    TimelineById,
};

/// Add providers to a timeline. While a provider is highlighted as a drop
/// target, the new providers are AND-linked to it instead.
pub fn add_timeline_providers(
    id: &str,
    providers: Vec<DataProvider>,
    timeline_by_id: &TimelineById,
) -> TimelineById {
    if providers.is_empty() {
        return timeline_by_id.clone();
    }
    update_timeline(timeline_by_id, id, |timeline| {
        if timeline.highlighted_drop_and_provider_id.is_empty() {
            add_providers(&mut timeline.data_providers, providers);
        } else {
            add_and_providers(
                &mut timeline.data_providers,
                &timeline.highlighted_drop_and_provider_id,
                providers,
            );
        }
    })
}

fn add_providers(data_providers: &mut Vec<DataProvider>, providers: Vec<DataProvider>) {
    for mut provider in providers {
        match data_providers.iter().position(|p| p.id == provider.id) {
            Some(index) if data_providers[index].and.is_empty() => {
                data_providers[index] = provider;
            }
            Some(_) => {
                let count = data_providers
                    .iter()
                    .filter(|p| p.id == provider.id)
                    .count();
                provider.id = format!("{}-{count}", provider.id);
                data_providers.push(provider);
            }
            None => data_providers.push(provider),
        }
    }
}

fn add_and_providers(
    data_providers: &mut [DataProvider],
    parent_id: &str,
    providers: Vec<DataProvider>,
) {
    let Some(parent) = data_providers.iter_mut().find(|p| p.id == parent_id) else {
        log::debug!("highlighted provider {parent_id} is gone");
        return;
    };
    for provider in providers {
        let candidate = provider.into_and();
        let existing = parent.and.iter().position(|p| p.id == candidate.id);

        let duplicates_parent = parent.query_match().same_condition(candidate.query_match());
        let duplicates_sibling = existing.is_none()
            && parent
                .and
                .iter()
                .any(|p| p.query_match().same_condition(candidate.query_match()));
        if duplicates_parent || duplicates_sibling {
            log::debug!("skip duplicate and provider {}", candidate.id);
            continue;
        }

        match existing {
            Some(index) => parent.and[index] = candidate,
            None => parent.and.push(candidate),
        }
    }
}

pub fn update_timeline_providers(
    id: &str,
    providers: Vec<DataProvider>,
    timeline_by_id: &TimelineById,
) -> TimelineById {
    update_timeline(timeline_by_id, id, |timeline| {
        timeline.data_providers = providers;
    })
}

/// Remove a provider. A removed top level provider hands its slot to its
/// first AND provider, which takes the remaining ones along. When
/// `provider_id` or `and_provider_id` names nothing, the providers are
/// returned as they were; no AND list is emptied and nothing is duplicated.
pub fn remove_timeline_provider(
    id: &str,
    provider_id: &str,
    and_provider_id: Option<&str>,
    timeline_by_id: &TimelineById,
) -> TimelineById {
    let and_provider_id = and_provider_id.filter(|a| !a.is_empty());
    update_timeline(timeline_by_id, id, |timeline| {
        let providers = &mut timeline.data_providers;
        let Some(index) = providers.iter().position(|p| p.id == provider_id) else {
            log::debug!("remove of unknown provider {provider_id} in {id}");
            return;
        };
        match and_provider_id {
            Some(and_provider_id) => {
                providers[index].and.retain(|p| p.id != and_provider_id);
            }
            None => {
                let mut and = std::mem::take(&mut providers[index].and);
                if and.is_empty() {
                    providers.remove(index);
                } else {
                    let first = and.remove(0);
                    providers[index] = first.into_provider(and);
                }
            }
        }
    })
}

/// Apply `edit` to the addressed provider, or to one of its AND providers
fn edit_provider(
    data_providers: &mut [DataProvider],
    provider_id: &str,
    and_provider_id: Option<&str>,
    edit: impl FnOnce(ProviderPartsMut<'_>),
) {
    let Some(provider) = data_providers.iter_mut().find(|p| p.id == provider_id) else {
        return;
    };
    match and_provider_id.filter(|a| !a.is_empty()) {
        Some(and_provider_id) => {
            if let Some(and) = provider.and.iter_mut().find(|p| p.id() == and_provider_id) {
                edit(and.parts_mut());
            }
        }
        None => edit(provider.parts_mut()),
    }
}

pub fn update_timeline_provider_enabled(
    id: &str,
    provider_id: &str,
    and_provider_id: Option<&str>,
    enabled: bool,
    timeline_by_id: &TimelineById,
) -> TimelineById {
    update_timeline(timeline_by_id, id, |timeline| {
        edit_provider(
            &mut timeline.data_providers,
            provider_id,
            and_provider_id,
            |parts| *parts.enabled = enabled,
        );
    })
}

pub fn update_timeline_provider_excluded(
    id: &str,
    provider_id: &str,
    and_provider_id: Option<&str>,
    excluded: bool,
    timeline_by_id: &TimelineById,
) -> TimelineById {
    update_timeline(timeline_by_id, id, |timeline| {
        edit_provider(
            &mut timeline.data_providers,
            provider_id,
            and_provider_id,
            |parts| *parts.excluded = excluded,
        );
    })
}

/// The values of the provider edit form
#[derive(Clone, Debug, PartialEq)]
pub struct ProviderProperties {
    pub excluded: bool,
    pub field: String,
    pub operator: QueryOperator,
    pub value: QueryValue,
}

pub fn update_timeline_provider_properties(
    id: &str,
    provider_id: &str,
    and_provider_id: Option<&str>,
    properties: ProviderProperties,
    timeline_by_id: &TimelineById,
) -> TimelineById {
    update_timeline(timeline_by_id, id, |timeline| {
        edit_provider(
            &mut timeline.data_providers,
            provider_id,
            and_provider_id,
            |parts| {
                let ProviderProperties {
                    excluded,
                    field,
                    operator,
                    value,
                } = properties;
                *parts.excluded = excluded;
                let query_match = parts.query_match;
                query_match.display_field = Some(field.clone());
                query_match.field = field;
                query_match.display_value = Some(value.clone());
                query_match.value = value;
                query_match.operator = operator;
            },
        );
    })
}

/// Switch a provider between a concrete condition and a template
/// placeholder. Only template timelines may hold template providers; for
/// other timelines the snapshot is returned as is.
pub fn update_timeline_provider_type(
    id: &str,
    provider_id: &str,
    and_provider_id: Option<&str>,
    kind: DataProviderType,
    timeline_by_id: &TimelineById,
) -> TimelineById {
    let is_template_timeline = timeline_by_id
        .get(id)
        .map(|t| t.is_template())
        .unwrap_or_default();
    if kind == DataProviderType::Template && !is_template_timeline {
        log::debug!("template providers need a template timeline, {id} isn't one");
        return timeline_by_id.clone();
    }

    update_timeline(timeline_by_id, id, |timeline| {
        edit_provider(
            &mut timeline.data_providers,
            provider_id,
            and_provider_id,
            |parts| {
                *parts.kind = kind;
                let query_match = parts.query_match;
                query_match.display_field = None;
                query_match.display_value = None;
                if kind == DataProviderType::Template {
                    *parts.name = query_match.field.clone();
                    query_match.value = QueryValue::Text(format!("{{{}}}", query_match.field));
                    query_match.operator = QueryOperator::Is;
                } else {
                    parts.name.clear();
                    query_match.value = QueryValue::Text(String::new());
                    query_match.operator = QueryOperator::Exists;
                }
            },
        );
    })
}
