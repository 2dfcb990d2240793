//! Per-client rate limits for sign-in and the catalog API.
//!
//! Over-limit requests get `429 Too Many Requests` from `tower_governor`.

use std::net::IpAddr;
use std::sync::Arc;

use axum::http::Request;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use tower_governor::{GovernorError, GovernorLayer, governor::GovernorConfigBuilder};

/// Proxy headers consulted for the client address, in order.
const CLIENT_IP_HEADERS: [&str; 3] = ["cf-connecting-ip", "x-forwarded-for", "x-real-ip"];

/// Keys requests by the client IP reported by the edge proxy.
///
/// Direct connections carry no proxy header and share the `0.0.0.0` bucket.
#[derive(Clone, Copy)]
pub struct ProxyIpKeyExtractor;

impl tower_governor::key_extractor::KeyExtractor for ProxyIpKeyExtractor {
    type Key = IpAddr;

    fn extract<T>(&self, req: &Request<T>) -> Result<Self::Key, GovernorError> {
        let headers = req.headers();

        let from_headers = CLIENT_IP_HEADERS.iter().find_map(|name| {
            headers
                .get(*name)
                .and_then(|v| v.to_str().ok())
                // X-Forwarded-For: first address in the chain
                .and_then(|s| s.split(',').next())
                .and_then(|s| s.trim().parse::<IpAddr>().ok())
        });

        Ok(from_headers.unwrap_or(IpAddr::from([0, 0, 0, 0])))
    }
}

pub type RateLimiterLayer =
    GovernorLayer<ProxyIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Sign-in and signup: one token every 6 seconds, burst of 5 (~10/min).
#[must_use]
pub fn auth_rate_limiter() -> RateLimiterLayer {
    limiter(6, 5)
}

/// Catalog API: one token per second, burst of 50 (~100/min).
#[must_use]
pub fn api_rate_limiter() -> RateLimiterLayer {
    limiter(1, 50)
}

/// # Panics
///
/// Only if `seconds_per_token` or `burst` is zero; both callers pass constants.
fn limiter(seconds_per_token: u64, burst: u32) -> RateLimiterLayer {
    let config = GovernorConfigBuilder::default()
        .key_extractor(ProxyIpKeyExtractor)
        .per_second(seconds_per_token)
        .burst_size(burst)
        .finish()
        .expect("non-zero rate limit quota");
    GovernorLayer::new(Arc::new(config))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tower_governor::key_extractor::KeyExtractor;

    use super::*;

    fn key(headers: &[(&str, &str)]) -> IpAddr {
        let mut builder = Request::builder().uri("/");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        ProxyIpKeyExtractor.extract(&builder.body(()).unwrap()).unwrap()
    }

    #[test]
    fn test_prefers_cloudflare_header() {
        let ip = key(&[
            ("x-forwarded-for", "10.0.0.1"),
            ("cf-connecting-ip", "203.0.113.7"),
        ]);
        assert_eq!(ip.to_string(), "203.0.113.7");
    }

    #[test]
    fn test_forwarded_for_uses_first_hop() {
        let ip = key(&[("x-forwarded-for", "198.51.100.2, 10.0.0.1")]);
        assert_eq!(ip.to_string(), "198.51.100.2");
    }

    #[test]
    fn test_direct_connection_shares_bucket() {
        assert!(key(&[]).is_unspecified());
        assert!(key(&[("x-real-ip", "not-an-ip")]).is_unspecified());
    }
}
