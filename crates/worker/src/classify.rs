//! Request classification.
//!
//! A pure function of a request's method, destination, URL path extension,
//! and hostname. Recomputed per request, never persisted. The priority
//! order matters: an image-extension path on the worker's own origin still
//! takes the image route.

use http::Method;
use offcache_core::http::{Destination, Request};
use url::Url;

/// Known image file extensions, matched case-insensitively against the
/// URL path.
const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "gif", "webp", "avif"];

/// Where a request is routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Never intercepted: non-GET methods and non-http(s) schemes.
    Ignored,
    /// Image strategy: cache-first against the image partition.
    Image,
    /// Static strategy: cache-first against the static-shell partition.
    Static,
    /// Left unhandled; default network behavior applies.
    Passthrough,
}

/// Classify a request against the controlled scope.
///
/// `image_hosts` entries are matched as substrings of the request hostname,
/// covering both exact hosts and host families.
pub fn classify(request: &Request, origin: &Url, image_hosts: &[String]) -> Route {
    if request.method != Method::GET {
        return Route::Ignored;
    }

    if !matches!(request.url.scheme(), "http" | "https") {
        return Route::Ignored;
    }

    if request.destination == Destination::Image || has_image_extension(request.url.path()) {
        return Route::Image;
    }

    if request.url.origin() == origin.origin() {
        return Route::Static;
    }

    if let Some(host) = request.url.host_str()
        && image_hosts.iter().any(|allowed| host.contains(allowed.as_str()))
    {
        return Route::Image;
    }

    Route::Passthrough
}

fn has_image_extension(path: &str) -> bool {
    let Some((_, extension)) = path.rsplit_once('.') else {
        return false;
    };
    IMAGE_EXTENSIONS
        .iter()
        .any(|known| extension.eq_ignore_ascii_case(known))
}
