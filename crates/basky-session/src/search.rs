//! Product-search view state.
//!
//! Only an explicit [`ProductSearch::submit`] starts a search. Each
//! submission gets a [`Ticket`]; a result that arrives for anything but the
//! latest ticket is discarded, so an older, slower search can never
//! overwrite a newer one.

use basky_core::ProductPage;
use basky_platforms::{PlatformError, ProductContext, QuickCommercePlatform, NO_PRODUCTS_MESSAGE};

/// Shown when a product search could not reach the platform.
pub const SEARCH_FAILED_MESSAGE: &str = "Failed to search products. Please try again.";

/// Identifies one submitted search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum SearchView {
    /// Nothing has been submitted yet.
    NeverSearched,
    Loading { term: String, ticket: Ticket },
    Results { term: String, page: ProductPage },
    /// The search ran and matched nothing. Distinct from `NeverSearched`.
    NoResults { term: String, message: String },
    Failed { term: String, message: String },
}

impl SearchView {
    #[must_use]
    pub fn has_searched(&self) -> bool {
        !matches!(self, SearchView::NeverSearched)
    }

    #[must_use]
    pub fn term(&self) -> Option<&str> {
        match self {
            SearchView::NeverSearched => None,
            SearchView::Loading { term, .. }
            | SearchView::Results { term, .. }
            | SearchView::NoResults { term, .. }
            | SearchView::Failed { term, .. } => Some(term),
        }
    }
}

#[derive(Debug)]
pub struct ProductSearch {
    view: SearchView,
    next_ticket: u64,
}

impl Default for ProductSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductSearch {
    #[must_use]
    pub fn new() -> Self {
        Self {
            view: SearchView::NeverSearched,
            next_ticket: 1,
        }
    }

    #[must_use]
    pub fn view(&self) -> &SearchView {
        &self.view
    }

    /// Starts a search for `term`. Blank terms are ignored and return `None`.
    pub fn submit(&mut self, term: &str) -> Option<Ticket> {
        let term = term.trim();
        if term.is_empty() {
            return None;
        }
        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        self.view = SearchView::Loading {
            term: term.to_owned(),
            ticket,
        };
        Some(ticket)
    }

    /// Applies the result of the search `ticket` started. Returns `false`, and
    /// leaves the view alone, when a newer search has been submitted since.
    pub fn resolve(&mut self, ticket: Ticket, result: Result<ProductPage, PlatformError>) -> bool {
        let term = match &self.view {
            SearchView::Loading { term, ticket: current } if *current == ticket => term.clone(),
            _ => {
                tracing::debug!(?ticket, "discarding superseded search result");
                return false;
            }
        };

        self.view = match result {
            Ok(page) if page.products.is_empty() => SearchView::NoResults {
                term,
                message: NO_PRODUCTS_MESSAGE.to_owned(),
            },
            Ok(page) => SearchView::Results { term, page },
            Err(PlatformError::NoResults { .. }) => SearchView::NoResults {
                term,
                message: NO_PRODUCTS_MESSAGE.to_owned(),
            },
            Err(e) => {
                let message = if e.is_transport() {
                    SEARCH_FAILED_MESSAGE.to_owned()
                } else {
                    e.user_message()
                };
                SearchView::Failed { term, message }
            }
        };
        true
    }

    /// Submits `term`, runs it against `platform` and applies the result.
    pub async fn run<P: QuickCommercePlatform>(
        &mut self,
        platform: &P,
        term: &str,
        context: ProductContext<'_>,
    ) -> &SearchView {
        let Some(ticket) = self.submit(term) else {
            return &self.view;
        };
        let result = platform.search_products(term, context).await;
        self.resolve(ticket, result);
        &self.view
    }
}
