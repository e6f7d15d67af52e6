//! Location command handlers: search, confirm, validate and the
//! validated-location cache.

use basky_platforms::{Envelope, QuickCommercePlatform};
use basky_session::{Clock, LocationValidator, SessionStore};

use crate::render;

/// Print autocomplete suggestions for `query`.
///
/// Returns `false` when the search failed or matched nothing.
pub(crate) async fn run_locations<P: QuickCommercePlatform>(
    platform: &P,
    query: &str,
    json: bool,
) -> anyhow::Result<bool> {
    let result = platform.search_locations(query).await;
    if let Err(e) = &result {
        tracing::warn!(platform = %platform.platform(), query, error = %e, "location search failed");
    }

    let mut envelope = Envelope::from_result(result);
    if envelope.success && envelope.data.suggestions.is_empty() {
        envelope.success = false;
        envelope.error = Some(render::NO_LOCATIONS_MESSAGE.to_string());
    }

    if json {
        println!("{}", render::to_json(&envelope)?);
    } else if let Some(error) = &envelope.error {
        println!("{error}");
    } else {
        println!("{}", render::locations_text(&envelope.data));
    }
    Ok(envelope.success)
}

/// Search `query`, then confirm the `index`-th suggestion (1-based) and
/// remember it when the platform delivers there.
///
/// # Errors
///
/// Returns an error if `index` does not name one of the suggestions.
pub(crate) async fn run_confirm<P, S, C>(
    validator: &mut LocationValidator<P, S, C>,
    query: &str,
    index: usize,
    json: bool,
) -> anyhow::Result<bool>
where
    P: QuickCommercePlatform,
    S: SessionStore,
    C: Clock,
{
    let search = match validator.platform().search_locations(query).await {
        Ok(search) => search,
        Err(e) => {
            let envelope = Envelope::<basky_core::LocationSearch>::from_result(Err(e));
            if json {
                println!("{}", render::to_json(&envelope)?);
            } else {
                println!("{}", envelope.error.unwrap_or_default());
            }
            return Ok(false);
        }
    };

    let count = search.suggestions.len();
    let Some(suggestion) = index.checked_sub(1).and_then(|i| search.suggestions.get(i)) else {
        if count == 0 {
            anyhow::bail!("{}", render::NO_LOCATIONS_MESSAGE);
        }
        anyhow::bail!("no suggestion #{index}; the search returned {count}");
    };

    let state = validator
        .confirm_suggestion(suggestion, search.session_token.as_deref())
        .await;
    if json {
        println!("{}", render::to_json(&render::validation_json(state))?);
    } else {
        println!("{}", render::validation_text(state));
    }
    Ok(state.is_valid())
}

/// Check a free-text location, answering from the cache when it was
/// validated recently.
pub(crate) async fn run_validate<P, S, C>(
    validator: &mut LocationValidator<P, S, C>,
    location: &str,
    json: bool,
) -> anyhow::Result<bool>
where
    P: QuickCommercePlatform,
    S: SessionStore,
    C: Clock,
{
    let state = validator.validate(Some(location)).await;
    if json {
        println!("{}", render::to_json(&render::validation_json(state))?);
    } else {
        println!("{}", render::validation_text(state));
    }
    Ok(state.is_valid())
}

/// List fresh cache entries, or drop them all with `clear`.
///
/// # Errors
///
/// Returns an error if the session store cannot be written while clearing.
pub(crate) fn run_cache<P, S, C>(
    validator: &mut LocationValidator<P, S, C>,
    clear: bool,
    json: bool,
) -> anyhow::Result<bool>
where
    P: QuickCommercePlatform,
    S: SessionStore,
    C: Clock,
{
    let platform = validator.cache().platform();
    if clear {
        validator.cache_mut().clear()?;
        tracing::info!(%platform, "cleared validated locations");
        if json {
            println!("{}", render::to_json(&serde_json::json!({"success": true}))?);
        } else {
            println!("Cleared validated {platform} locations");
        }
        return Ok(true);
    }

    let entries = validator.cache().entries();
    if json {
        println!(
            "{}",
            render::to_json(&serde_json::json!({"success": true, "locations": entries}))?
        );
    } else {
        let now = validator.cache().clock().now_ms();
        println!("{}", render::cache_text(&entries, now));
    }
    Ok(true)
}
