//! Pagination Iterator
//!
//! Turns a paged listing endpoint into one continuous, consumer-paced
//! sequence. Pages are requested strictly in order and only once every item
//! of the previous page has been handed out; dropping the paginator cancels
//! the traversal.

use super::entity::{check_api_error, Entity};
use super::envelope::Resource;
use crate::api::client::Client;
use crate::api::macros::Macros;
use crate::error::{Error, Result};
use futures::Stream;
use serde_json::{Map, Value};
use std::collections::VecDeque;
use std::marker::PhantomData;

/// One element of a listing, tagged with the top-level key it came from
#[derive(Debug, Clone, PartialEq)]
pub struct PageItem {
    pub key: String,
    pub item: Value,
}

#[derive(Debug)]
enum PageState {
    /// The current page still has to be requested
    Fetching,
    /// Items of the current page waiting to be handed out
    HasItems {
        items: VecDeque<PageItem>,
        next_page: Option<u64>,
    },
    Done,
}

/// Raw paginator yielding [`PageItem`]s
pub struct Paginator {
    client: Client,
    template: String,
    contexts: Vec<Value>,
    params: Map<String, Value>,
    page: u64,
    pages_fetched: u64,
    state: PageState,
}

impl Paginator {
    /// Start a traversal at `params["page"]`, or page 1 when none is given
    pub fn new(
        client: Client,
        template: impl Into<String>,
        contexts: Vec<Value>,
        params: Map<String, Value>,
    ) -> Self {
        let page = params
            .get("page")
            .and_then(|v| v.as_u64())
            .filter(|p| *p > 0)
            .unwrap_or(1);

        Self {
            client,
            template: template.into(),
            contexts,
            params,
            page,
            pages_fetched: 0,
            state: PageState::Fetching,
        }
    }

    /// Number of page requests issued so far
    pub fn pages_fetched(&self) -> u64 {
        self.pages_fetched
    }

    /// Next item, fetching the next page when the current one is drained.
    ///
    /// After an error the traversal is over and `next` returns `Ok(None)`.
    pub async fn next(&mut self) -> Result<Option<PageItem>> {
        loop {
            match &mut self.state {
                PageState::Done => return Ok(None),
                PageState::HasItems { items, next_page } => {
                    if let Some(item) = items.pop_front() {
                        return Ok(Some(item));
                    }
                    let next = next_page.take();
                    match next {
                        Some(page) => {
                            self.page = page;
                            self.state = PageState::Fetching;
                        }
                        None => self.state = PageState::Done,
                    }
                }
                PageState::Fetching => match self.fetch_page().await {
                    Ok(data) => {
                        let next_page = next_page(&data, self.page);
                        self.state = PageState::HasItems {
                            items: split_items(data),
                            next_page,
                        };
                    }
                    Err(e) => {
                        self.state = PageState::Done;
                        return Err(e);
                    }
                },
            }
        }
    }

    /// Adapt into a [`Stream`]
    pub fn into_stream(self) -> impl Stream<Item = Result<PageItem>> {
        futures::stream::try_unfold(self, |mut pages| async move {
            Ok::<_, Error>(pages.next().await?.map(|item| (item, pages)))
        })
    }

    async fn fetch_page(&mut self) -> Result<Value> {
        self.params
            .insert("page".to_string(), Value::from(self.page));

        let contexts: Vec<&Value> = self.contexts.iter().collect();
        let data = self
            .client
            .list_page(&self.template, &Macros::from(contexts), &self.params)
            .await?;

        self.pages_fetched += 1;
        tracing::debug!("Fetched page {} of {}", self.page, self.template);
        Ok(data)
    }
}

/// Flatten a decoded page: arrays yield one item per element, objects yield
/// themselves, scalars are skipped
fn split_items(data: Value) -> VecDeque<PageItem> {
    let Value::Object(map) = data else {
        return VecDeque::new();
    };

    let mut items = VecDeque::new();
    for (key, value) in map {
        match value {
            Value::Array(elements) => {
                items.extend(elements.into_iter().map(|item| PageItem {
                    key: key.clone(),
                    item,
                }));
            }
            Value::Object(_) => items.push_back(PageItem { key, item: value }),
            _ => {}
        }
    }
    items
}

/// Page to request after `current`, or `None` when the listing is complete
fn next_page(data: &Value, current: u64) -> Option<u64> {
    let pagination = data.get("meta")?.get("pagination")?.as_object()?;

    let page = pagination
        .get("page")
        .and_then(|v| v.as_u64())
        .unwrap_or(current);

    match pagination.get("last_page").and_then(|v| v.as_u64()) {
        Some(last_page) if page >= last_page => None,
        Some(_) => Some(current + 1),
        None => pagination
            .get("next_page")
            .and_then(|v| v.as_u64())
            .map(|_| current + 1),
    }
}

/// Typed listing of one entity type
pub struct Listing<T: Entity> {
    pages: Paginator,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Entity> Listing<T> {
    pub fn new(pages: Paginator) -> Self {
        Self {
            pages,
            _marker: PhantomData,
        }
    }

    /// Next resource; items under other keys (such as `meta`) are skipped,
    /// an `error` object fails with [`Error::Api`].
    /// Listed resources arrive complete, so they are not fetched again.
    pub async fn next(&mut self) -> Result<Option<Resource<T>>> {
        while let Some(page_item) = self.pages.next().await? {
            if page_item.key == "error" {
                let mut body = Map::new();
                body.insert(page_item.key, page_item.item);
                check_api_error(&Value::Object(body))?;
                continue;
            }
            if page_item.key == T::COLLECTION || page_item.key == T::SINGULAR {
                let client = self.pages.client.clone();
                return Resource::from_value(client, page_item.item).map(Some);
            }
        }
        Ok(None)
    }

    pub fn pages_fetched(&self) -> u64 {
        self.pages.pages_fetched()
    }

    /// Adapt into a [`Stream`]
    pub fn into_stream(self) -> impl Stream<Item = Result<Resource<T>>> {
        futures::stream::try_unfold(self, |mut listing| async move {
            Ok::<_, Error>(listing.next().await?.map(|item| (item, listing)))
        })
    }

    /// Drain every page
    pub async fn collect_all(mut self) -> Result<Vec<Resource<T>>> {
        let mut all_items = Vec::new();
        while let Some(item) = self.next().await? {
            all_items.push(item);
        }
        Ok(all_items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_split_items_flattens_arrays_and_objects() {
        let data = json!({
            "servers": [{"id": 1}, {"id": 2}],
            "meta": {"pagination": {"page": 1, "last_page": 1}},
            "count": 2
        });
        let items: Vec<_> = split_items(data).into_iter().collect();
        assert_eq!(items.len(), 3);
        assert_eq!(items.iter().filter(|i| i.key == "meta").count(), 1);

        let servers: Vec<_> = items.iter().filter(|i| i.key == "servers").collect();
        assert_eq!(servers[0].item, json!({"id": 1}));
        assert_eq!(servers[1].item, json!({"id": 2}));
    }

    #[test]
    fn test_next_page_without_meta_is_terminal() {
        assert_eq!(next_page(&json!({"pricing": {}}), 1), None);
    }

    #[test]
    fn test_next_page_stops_on_last_page() {
        let data = json!({"meta": {"pagination": {"page": 3, "last_page": 3}}});
        assert_eq!(next_page(&data, 3), None);
    }

    #[test]
    fn test_next_page_increments() {
        let data = json!({"meta": {"pagination": {"page": 1, "last_page": 3}}});
        assert_eq!(next_page(&data, 1), Some(2));
    }

    #[test]
    fn test_next_page_falls_back_to_next_page_field() {
        let more = json!({"meta": {"pagination": {"page": 1, "last_page": null, "next_page": 2}}});
        let done = json!({"meta": {"pagination": {"page": 2, "last_page": null, "next_page": null}}});
        assert_eq!(next_page(&more, 1), Some(2));
        assert_eq!(next_page(&done, 2), None);
    }
}
