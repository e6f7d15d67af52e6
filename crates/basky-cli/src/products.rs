//! Product search command handler.

use basky_core::ProductPage;
use basky_platforms::{Envelope, ProductContext, QuickCommercePlatform};
use basky_session::{
    Clock, LocationValidator, ProductSearch, SearchView, SessionStore, ValidationState,
};

use crate::render;

/// Search `term`, gated on `location` being serviceable when one is given.
///
/// Without a location the search runs unscoped; platforms that need a
/// delivery location reject it with their own message.
pub(crate) async fn run_products<P, S, C>(
    validator: &mut LocationValidator<P, S, C>,
    location: Option<&str>,
    term: &str,
    json: bool,
) -> anyhow::Result<bool>
where
    P: QuickCommercePlatform,
    S: SessionStore,
    C: Clock,
{
    let state = match location {
        Some(location) => Some(validator.validate(Some(location)).await.clone()),
        None => None,
    };

    let context = match &state {
        Some(ValidationState::Valid(valid)) => valid.product_context(),
        Some(ValidationState::Invalid { message }) => {
            if json {
                let envelope = Envelope {
                    success: false,
                    data: ProductPage::default(),
                    error: Some(message.clone()),
                };
                println!("{}", render::to_json(&envelope)?);
            } else {
                println!("{message}");
            }
            return Ok(false);
        }
        Some(ValidationState::Validating) | None => ProductContext::None,
    };

    let mut search = ProductSearch::new();
    let view = search.run(validator.platform(), term, context).await;
    tracing::debug!(platform = %validator.platform().platform(), term, ?view, "product search settled");

    if json {
        println!("{}", render::to_json(&render::search_envelope(view))?);
    } else {
        println!("{}", render::search_text(view));
    }
    Ok(matches!(view, SearchView::Results { .. }))
}
