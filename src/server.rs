use crate::error::KvError;
use crate::kv_store::KVStore;
use actix_web::{http::header::ContentType, web, HttpRequest, HttpResponse};
use log::{debug, warn};
use percent_encoding::percent_decode_str;
use std::borrow::Cow;

pub const SET_PATH: &str = "/set";
pub const GET_PATH: &str = "/get";

/// Registers `/set` and `/get`. Anything else falls through to the default 404.
///
/// The store must already be registered as `web::Data<KVStore>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource(SET_PATH).to(set_handler))
        .service(web::resource(GET_PATH).to(get_handler));
}

/// Decodes one form-urlencoded component. `None` for a `%` without two hex
/// digits after it, or for bytes that are not UTF-8.
fn decode_component(raw: &str) -> Option<String> {
    let bytes = raw.as_bytes();
    let escapes_ok = bytes
        .iter()
        .enumerate()
        .filter(|(_, b)| **b == b'%')
        .all(|(i, _)| {
            bytes
                .get(i + 1..i + 3)
                .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit))
        });
    if !escapes_ok {
        return None;
    }

    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .ok()
        .map(Cow::into_owned)
}

/// Splits a raw query into decoded pairs, in the order written. A malformed
/// segment, including one containing `;`, comes out as `None`.
fn query_pairs(query: &str) -> impl Iterator<Item = Option<(String, String)>> + '_ {
    query
        .split('&')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            if segment.contains(';') {
                return None;
            }
            let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
            Some((decode_component(key)?, decode_component(value)?))
        })
}

/// Strict parse used by `set`: one bad segment rejects the whole query.
fn parse_query(query: &str) -> Result<Vec<(String, String)>, KvError> {
    query_pairs(query)
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| {
            warn!("malformed query string {:?}", query);
            KvError::MissingKey
        })
}

/// Picks the pair `set` writes: the first one in query order. An empty key is
/// still a key.
fn first_pair(pairs: Vec<(String, String)>) -> Option<(String, String)> {
    pairs.into_iter().next()
}

/// `get` drops malformed segments and reads the first `key` left.
fn lookup_key(query: &str) -> Option<String> {
    query_pairs(query)
        .flatten()
        .find(|(name, _)| name == "key")
        .map(|(_, key)| key)
        .filter(|key| !key.is_empty())
}

pub async fn set_handler(
    req: HttpRequest,
    store: web::Data<KVStore>,
) -> Result<HttpResponse, KvError> {
    let pairs = parse_query(req.query_string())?;
    let (key, value) = first_pair(pairs).ok_or_else(|| {
        warn!("set rejected, no usable key in {:?}", req.query_string());
        KvError::MissingKey
    })?;

    let body = format!("Set key '{}' to value '{}'", key, value);
    debug!("set {:?} = {:?}", key, value);
    store.set(key, value).await;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(body))
}

pub async fn get_handler(
    req: HttpRequest,
    store: web::Data<KVStore>,
) -> Result<HttpResponse, KvError> {
    let key = lookup_key(req.query_string()).ok_or_else(|| {
        warn!("get rejected, missing key parameter");
        KvError::MissingKey
    })?;

    let value = store.get(&key).await.ok_or_else(|| {
        debug!("get {:?}: not found", key);
        KvError::KeyNotFound
    })?;
    debug!("get {:?} -> {:?}", key, value);

    Ok(HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(query: &str) -> Vec<(String, String)> {
        parse_query(query).unwrap()
    }

    fn pair(key: &str, value: &str) -> Option<(String, String)> {
        Some((key.to_string(), value.to_string()))
    }

    #[test]
    fn first_pair_follows_query_order() {
        assert_eq!(first_pair(pairs("b=2&a=1")), pair("b", "2"));
        assert_eq!(first_pair(pairs("&&b=2")), pair("b", "2"));
    }

    #[test]
    fn empty_key_is_a_usable_pair() {
        assert_eq!(first_pair(pairs("=orphan&name=Luke")), pair("", "orphan"));
        assert_eq!(first_pair(pairs("")), None);
    }

    #[test]
    fn bare_key_gets_empty_value() {
        assert_eq!(first_pair(pairs("flag")), pair("flag", ""));
    }

    #[test]
    fn values_are_form_decoded() {
        assert_eq!(
            first_pair(pairs("name=Obi-Wan%20Kenobi")),
            pair("name", "Obi-Wan Kenobi")
        );
        assert_eq!(first_pair(pairs("name=Han+Solo")), pair("name", "Han Solo"));
        assert_eq!(first_pair(pairs("sum=1%2B1")), pair("sum", "1+1"));
        assert_eq!(first_pair(pairs("planet=J%C3%A9dha")), pair("planet", "J\u{e9}dha"));
    }

    #[test]
    fn malformed_queries_are_rejected() {
        for query in ["a=%zz", "a=%4", "a=100%", "%zz=a", "a=%FF", "a=1;b=2", "ok=1&a=%zz"] {
            assert_eq!(parse_query(query), Err(KvError::MissingKey), "{query}");
        }
    }

    #[test]
    fn lookup_key_takes_first_and_rejects_empty() {
        assert_eq!(lookup_key("key=a&key=b"), Some("a".to_string()));
        assert_eq!(lookup_key("other=a"), None);
        assert_eq!(lookup_key("key="), None);
    }

    #[test]
    fn lookup_key_skips_malformed_segments() {
        assert_eq!(lookup_key("key=%zz"), None);
        assert_eq!(lookup_key("key=%zz&key=ok"), Some("ok".to_string()));
        assert_eq!(lookup_key("junk=%zz&key=name"), Some("name".to_string()));
    }
}
