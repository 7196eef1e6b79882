use base64::Engine;
use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use regex::Regex;
use reqwest::Client;
use reqwest::header::REFERER;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::OnceLock;
use tracing::{debug, warn};
use url::Url;

use super::CatalogError;
use crate::quality::{QualityTier, QualityVariant, TierMap};

const LINKS_ENDPOINT: &str = "/ftor";

/// Regexes for scraping the iframe page, compiled once.
struct KodikRegex {
    url_params: Regex,
    video_type: Regex,
    video_hash: Regex,
    video_id: Regex,
}

impl KodikRegex {
    fn get() -> Option<&'static Self> {
        static INSTANCE: OnceLock<Option<KodikRegex>> = OnceLock::new();
        INSTANCE
            .get_or_init(|| {
                Some(Self {
                    url_params: Regex::new(r"urlParams\s*=\s*'(\{[^']*\})'").ok()?,
                    video_type: Regex::new(r#"\.type\s*=\s*['"]([^'"]+)['"]"#).ok()?,
                    video_hash: Regex::new(r#"\.hash\s*=\s*['"]([^'"]+)['"]"#).ok()?,
                    video_id: Regex::new(r#"\.id\s*=\s*['"]([^'"]+)['"]"#).ok()?,
                })
            })
            .as_ref()
    }
}

fn capture(html: &str, re: &Regex) -> Option<String> {
    re.captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Form fields the links endpoint expects, scraped from the iframe page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerForm {
    pub video_type: String,
    pub hash: String,
    pub id: String,
    pub url_params: BTreeMap<String, String>,
}

impl PlayerForm {
    /// Reads video info from the page script, falling back to the iframe
    /// path `/{type}/{id}/{hash}/...` when the script does not carry it.
    pub fn extract(html: &str, page_url: &Url) -> Result<Self, CatalogError> {
        let re = KodikRegex::get()
            .ok_or_else(|| CatalogError::Player("Failed to compile page patterns".to_string()))?;

        let url_params = capture(html, &re.url_params)
            .map(|raw| parse_url_params(&raw))
            .transpose()?
            .unwrap_or_default();

        let segments: Vec<&str> = page_url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();

        let video_type = capture(html, &re.video_type)
            .or_else(|| segments.first().map(|s| (*s).to_string()));
        let id = capture(html, &re.video_id).or_else(|| segments.get(1).map(|s| (*s).to_string()));
        let hash =
            capture(html, &re.video_hash).or_else(|| segments.get(2).map(|s| (*s).to_string()));

        match (video_type, hash, id) {
            (Some(video_type), Some(hash), Some(id)) => Ok(Self {
                video_type,
                hash,
                id,
                url_params,
            }),
            _ => Err(CatalogError::Player(format!(
                "Could not find video info in {page_url}"
            ))),
        }
    }

    #[must_use]
    pub fn fields(&self) -> Vec<(String, String)> {
        let mut fields: Vec<(String, String)> = self
            .url_params
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        fields.push(("type".to_string(), self.video_type.clone()));
        fields.push(("hash".to_string(), self.hash.clone()));
        fields.push(("id".to_string(), self.id.clone()));
        fields.push(("bad_user".to_string(), "true".to_string()));
        fields.push(("cdn_is_working".to_string(), "true".to_string()));
        fields.push(("info".to_string(), "{}".to_string()));
        fields
    }
}

fn parse_url_params(raw: &str) -> Result<BTreeMap<String, String>, CatalogError> {
    let map: BTreeMap<String, serde_json::Value> = serde_json::from_str(raw)?;
    Ok(map
        .into_iter()
        .map(|(k, v)| {
            let value = match v {
                serde_json::Value::String(s) => s,
                serde_json::Value::Null => String::new(),
                other => other.to_string(),
            };
            (k, value)
        })
        .collect())
}

#[derive(Debug, Deserialize)]
struct LinksResponse {
    #[serde(default)]
    links: BTreeMap<String, Vec<LinkSource>>,
}

#[derive(Debug, Deserialize)]
struct LinkSource {
    src: String,
}

/// Adds `https:` to protocol-relative URLs.
#[must_use]
pub fn absolutize(url: &str) -> String {
    if url.starts_with("//") {
        format!("https:{url}")
    } else {
        url.to_string()
    }
}

const fn rot13(c: char) -> char {
    match c {
        'a'..='z' => (((c as u8 - b'a') + 13) % 26 + b'a') as char,
        'A'..='Z' => (((c as u8 - b'A') + 13) % 26 + b'A') as char,
        _ => c,
    }
}

/// Decodes a link `src` (ROT13 over base64) into a playable URL.
///
/// Sources that are already plain URLs pass through.
#[must_use]
pub fn decode_src(src: &str) -> Option<String> {
    let src = src.trim();
    if src.starts_with("//") || src.starts_with("http://") || src.starts_with("https://") {
        return Some(absolutize(src));
    }

    let rotated: String = src.chars().map(rot13).collect();
    let unpadded = rotated.trim_end_matches('=');
    let bytes = STANDARD_NO_PAD
        .decode(unpadded)
        .or_else(|_| URL_SAFE_NO_PAD.decode(unpadded))
        .ok()?;
    let url = String::from_utf8(bytes).ok()?;

    if url.starts_with("//") || url.starts_with("http") {
        Some(absolutize(&url))
    } else {
        None
    }
}

fn tiers_from_links(links: BTreeMap<String, Vec<LinkSource>>, referer: &str) -> TierMap {
    let mut tiers = TierMap::new();
    for (label, sources) in links {
        let Some(tier) = QualityTier::parse(&label) else {
            debug!(label = %label, "Ignoring unknown quality tier");
            continue;
        };
        let decoded = sources.iter().find_map(|s| decode_src(&s.src));
        match decoded {
            Some(url) => {
                tiers.insert(tier, QualityVariant::new(url, referer));
            }
            None => warn!(tier = %tier, "Could not decode any source for tier"),
        }
    }
    tiers
}

/// Turns a Kodik iframe URL into direct per-tier links.
#[derive(Clone)]
pub struct KodikResolver {
    client: Client,
}

impl KodikResolver {
    #[must_use]
    pub const fn with_shared_client(client: Client) -> Self {
        Self { client }
    }

    pub async fn resolve(&self, player_url: &str, referer: &str) -> Result<TierMap, CatalogError> {
        let page_url = Url::parse(&absolutize(player_url))
            .map_err(|e| CatalogError::Player(format!("Invalid player URL {player_url}: {e}")))?;

        debug!(url = %page_url, "Loading player page");

        let html = self
            .client
            .get(page_url.clone())
            .header(REFERER, referer)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let form = PlayerForm::extract(&html, &page_url)?;

        let endpoint = page_url
            .join(LINKS_ENDPOINT)
            .map_err(|e| CatalogError::Player(e.to_string()))?;

        let response: LinksResponse = self
            .client
            .post(endpoint)
            .header(REFERER, page_url.as_str())
            .form(&form.fields())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let tiers = tiers_from_links(response.links, page_url.as_str());
        debug!(count = tiers.len(), "Resolved player tiers");
        Ok(tiers)
    }
}
