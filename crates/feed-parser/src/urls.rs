// crates/feed-parser/src/urls.rs
//! Relative URL resolution for parsed feeds

use crate::error::{FeedError, FeedResult};
use crate::feed::Feed;
use url::Url;

/// Resolves the feed's site URL and every item URL into absolute URLs
///
/// The site URL is resolved against `base_url` (typically the address the
/// feed was fetched from). Item URLs are then resolved against the resolved
/// site URL, since items are authored relative to the feed's own location.
/// References that are already absolute are kept byte for byte; only
/// relative ones come back normalized.
///
/// `base_url` must be absolute and usable as a base (`mailto:` is not). On an
/// item failure the call stops: items before it keep their resolved URL, the
/// failing item and everything after it are untouched.
pub fn fix_urls(feed: &mut Feed, base_url: &str) -> FeedResult<()> {
    let base = match Url::parse(base_url) {
        Ok(base) if !base.cannot_be_a_base() => base,
        _ => return Err(FeedError::InvalidBaseUrl(base_url.to_string())),
    };

    let site = match Url::parse(&feed.site_url) {
        Ok(site) => site,
        Err(_) => {
            let site = base
                .join(&feed.site_url)
                .map_err(|_| FeedError::InvalidSiteUrl(feed.site_url.clone()))?;
            feed.site_url = site.to_string();
            site
        }
    };

    for item in feed.items.iter_mut() {
        if Url::parse(&item.url).is_ok() {
            continue;
        }
        let resolved = site
            .join(&item.url)
            .map_err(|_| FeedError::InvalidItemUrl(item.url.clone()))?;
        item.url = resolved.into();
    }

    Ok(())
}
