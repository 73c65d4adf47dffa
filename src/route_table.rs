//! Fixed mapping from inbound relay routes to upstream URL templates.
//!
//! The table is built once from [`Config`] and shared read-only. Resolving a
//! route substitutes its path placeholders, appends the credential according
//! to the route's [`CredentialPolicy`] and copies the optional query
//! parameters the route forwards.

use std::collections::HashMap;
use url::Url;

use crate::config::Config;
use crate::error::RelayError;

/// Public key accepted by the upstream for low-volume, quota-exempt use.
pub const DEMO_KEY: &str = "DEMO_KEY";

/// Query parameter name carrying the credential upstream.
const CREDENTIAL_PARAM: &str = "api_key";

/// Every upstream-backed relay route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteId {
    Apod,
    MarsPhotos,
    RoverManifest,
    EpicImages,
    EpicByDate,
    EpicAvailable,
    EpicArchive,
    AsteroidFeed,
    AsteroidLookup,
    AsteroidBrowse,
    ImageSearch,
    ImageAsset,
    ImageMetadata,
    ImageCaptions,
}

/// Which upstream host a template is relative to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upstream {
    Api,
    Images,
}

/// How the credential is attached to the outbound URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialPolicy {
    /// Configured key, or [`DEMO_KEY`] when none is configured
    DemoFallback,
    /// Configured key only; without one the upstream rejects the call itself
    Required,
    /// Upstream takes no key
    None,
}

/// How the upstream body is relayed back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseMode {
    JsonRelay,
    StreamRelay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamRule {
    /// Forward whenever present
    Verbatim,
    /// Forward only when the named parameter is absent
    UnlessPresent(&'static str),
    /// Forward unless the value equals this sentinel
    SkipValue(&'static str),
}

/// Optional query parameter copied from the inbound request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryParam {
    pub name: &'static str,
    pub rule: ParamRule,
}

impl QueryParam {
    const fn verbatim(name: &'static str) -> Self {
        Self { name, rule: ParamRule::Verbatim }
    }

    /// Value to forward for this parameter, if any
    fn select<'q>(&self, query: &'q HashMap<String, String>) -> Option<&'q str> {
        let value = query.get(self.name).map(String::as_str).filter(|v| !v.is_empty())?;
        match self.rule {
            ParamRule::Verbatim => Some(value),
            ParamRule::UnlessPresent(other) => {
                match query.get(other) {
                    Some(v) if !v.is_empty() => None,
                    _ => Some(value),
                }
            }
            ParamRule::SkipValue(sentinel) => (value != sentinel).then_some(value),
        }
    }
}

/// One entry of the route table
#[derive(Debug, Clone, Copy)]
pub struct RouteDescriptor {
    pub id: RouteId,
    pub inbound_path: &'static str,
    pub upstream: Upstream,
    pub upstream_template: &'static str,
    pub passthrough: &'static [QueryParam],
    pub credential: CredentialPolicy,
    pub mode: ResponseMode,
    /// What the route fetches, used in the client-facing error message
    pub label: &'static str,
}

const MARS_PHOTO_PARAMS: &[QueryParam] = &[
    QueryParam::verbatim("sol"),
    QueryParam { name: "earth_date", rule: ParamRule::UnlessPresent("sol") },
    QueryParam { name: "camera", rule: ParamRule::SkipValue("all") },
    QueryParam::verbatim("page"),
];

const FEED_PARAMS: &[QueryParam] = &[
    QueryParam::verbatim("start_date"),
    QueryParam::verbatim("end_date"),
];

const SEARCH_PARAMS: &[QueryParam] = &[QueryParam::verbatim("q")];

const fn json(
    id: RouteId,
    inbound_path: &'static str,
    upstream: Upstream,
    upstream_template: &'static str,
    credential: CredentialPolicy,
    label: &'static str,
) -> RouteDescriptor {
    RouteDescriptor {
        id,
        inbound_path,
        upstream,
        upstream_template,
        passthrough: &[],
        credential,
        mode: ResponseMode::JsonRelay,
        label,
    }
}

static APOD: RouteDescriptor = json(RouteId::Apod, crate::routes::APOD, Upstream::Api,
    "/planetary/apod", CredentialPolicy::DemoFallback, "APOD data");
static MARS_PHOTOS: RouteDescriptor = RouteDescriptor {
    passthrough: MARS_PHOTO_PARAMS,
    ..json(RouteId::MarsPhotos, crate::routes::MARS_PHOTOS, Upstream::Api,
        "/mars-photos/api/v1/rovers/{rover}/photos", CredentialPolicy::DemoFallback, "Mars photos")
};
static ROVER_MANIFEST: RouteDescriptor = json(RouteId::RoverManifest, crate::routes::ROVER_MANIFEST, Upstream::Api,
    "/mars-photos/api/v1/manifests/{rover}", CredentialPolicy::DemoFallback, "manifest");
static EPIC_IMAGES: RouteDescriptor = json(RouteId::EpicImages, crate::routes::EPIC_IMAGES, Upstream::Api,
    "/EPIC/api/{imageType}/images", CredentialPolicy::Required, "data");
static EPIC_BY_DATE: RouteDescriptor = json(RouteId::EpicByDate, crate::routes::EPIC_BY_DATE, Upstream::Api,
    "/EPIC/api/{imageType}/date/{date}", CredentialPolicy::Required, "data");
static EPIC_AVAILABLE: RouteDescriptor = json(RouteId::EpicAvailable, crate::routes::EPIC_AVAILABLE, Upstream::Api,
    "/EPIC/api/{imageType}/all", CredentialPolicy::Required, "data");
// The inbound `{imageFile}` carries the `.png` suffix; `epic_archive_handler`
// strips it and passes the bare name as `imageName`.
static EPIC_ARCHIVE: RouteDescriptor = RouteDescriptor {
    mode: ResponseMode::StreamRelay,
    ..json(RouteId::EpicArchive, crate::routes::EPIC_ARCHIVE, Upstream::Api,
        "/EPIC/archive/{imageType}/{year}/{month}/{day}/png/{imageName}.png",
        CredentialPolicy::Required, "image")
};
static ASTEROID_FEED: RouteDescriptor = RouteDescriptor {
    passthrough: FEED_PARAMS,
    ..json(RouteId::AsteroidFeed, crate::routes::ASTEROID_FEED, Upstream::Api,
        "/neo/rest/v1/feed", CredentialPolicy::Required, "data")
};
static ASTEROID_LOOKUP: RouteDescriptor = json(RouteId::AsteroidLookup, crate::routes::ASTEROID_LOOKUP, Upstream::Api,
    "/neo/rest/v1/neo/{asteroidId}", CredentialPolicy::Required, "data");
static ASTEROID_BROWSE: RouteDescriptor = json(RouteId::AsteroidBrowse, crate::routes::ASTEROID_BROWSE, Upstream::Api,
    "/neo/rest/v1/neo/browse", CredentialPolicy::Required, "data");
static IMAGE_SEARCH: RouteDescriptor = RouteDescriptor {
    passthrough: SEARCH_PARAMS,
    ..json(RouteId::ImageSearch, crate::routes::IMAGE_SEARCH, Upstream::Images,
        "/search", CredentialPolicy::None, "data")
};
static IMAGE_ASSET: RouteDescriptor = json(RouteId::ImageAsset, crate::routes::IMAGE_ASSET, Upstream::Images,
    "/asset/{nasa_id}", CredentialPolicy::None, "data");
static IMAGE_METADATA: RouteDescriptor = json(RouteId::ImageMetadata, crate::routes::IMAGE_METADATA, Upstream::Images,
    "/metadata/{nasa_id}", CredentialPolicy::None, "data");
static IMAGE_CAPTIONS: RouteDescriptor = RouteDescriptor {
    mode: ResponseMode::StreamRelay,
    ..json(RouteId::ImageCaptions, crate::routes::IMAGE_CAPTIONS, Upstream::Images,
        "/captions/{nasa_id}", CredentialPolicy::None, "data")
};

static DESCRIPTORS: [&RouteDescriptor; 14] = [
    &APOD, &MARS_PHOTOS, &ROVER_MANIFEST, &EPIC_IMAGES, &EPIC_BY_DATE, &EPIC_AVAILABLE, &EPIC_ARCHIVE,
    &ASTEROID_FEED, &ASTEROID_LOOKUP, &ASTEROID_BROWSE, &IMAGE_SEARCH, &IMAGE_ASSET, &IMAGE_METADATA,
    &IMAGE_CAPTIONS,
];

/// Read-only route table bound to the configured upstreams and credential
#[derive(Debug, Clone)]
pub struct RouteTable {
    api_base_url: Url,
    images_base_url: Url,
    api_key: Option<String>,
}

impl RouteTable {
    pub fn from_config(config: &Config) -> Self {
        Self {
            api_base_url: config.api_base_url.clone(),
            images_base_url: config.images_base_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    pub fn descriptor(&self, id: RouteId) -> &'static RouteDescriptor {
        match id {
            RouteId::Apod => &APOD,
            RouteId::MarsPhotos => &MARS_PHOTOS,
            RouteId::RoverManifest => &ROVER_MANIFEST,
            RouteId::EpicImages => &EPIC_IMAGES,
            RouteId::EpicByDate => &EPIC_BY_DATE,
            RouteId::EpicAvailable => &EPIC_AVAILABLE,
            RouteId::EpicArchive => &EPIC_ARCHIVE,
            RouteId::AsteroidFeed => &ASTEROID_FEED,
            RouteId::AsteroidLookup => &ASTEROID_LOOKUP,
            RouteId::AsteroidBrowse => &ASTEROID_BROWSE,
            RouteId::ImageSearch => &IMAGE_SEARCH,
            RouteId::ImageAsset => &IMAGE_ASSET,
            RouteId::ImageMetadata => &IMAGE_METADATA,
            RouteId::ImageCaptions => &IMAGE_CAPTIONS,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static RouteDescriptor> {
        DESCRIPTORS.iter().copied()
    }

    /// Build the fully-qualified outbound URL for `id`.
    ///
    /// Every placeholder in the upstream template must be present and
    /// non-empty in `path_params`; each value becomes exactly one path
    /// segment. The credential comes first in the query string, followed by
    /// the forwarded parameters in descriptor order.
    pub fn resolve(
        &self,
        id: RouteId,
        path_params: &HashMap<String, String>,
        query: &HashMap<String, String>,
    ) -> Result<Url, RelayError> {
        let descriptor = self.descriptor(id);
        let mut url = match descriptor.upstream {
            Upstream::Api => self.api_base_url.clone(),
            Upstream::Images => self.images_base_url.clone(),
        };

        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| RelayError::Resolve(format!("base URL for {:?} cannot carry a path", id)))?;
            segments.pop_if_empty();
            for part in descriptor.upstream_template.split('/').filter(|part| !part.is_empty()) {
                let segment = substitute(part, path_params)?;
                // `push` silently drops dot segments, which would change the upstream endpoint.
                if segment == "." || segment == ".." {
                    return Err(RelayError::Resolve(format!("dot segment '{}' in path parameters", segment)));
                }
                segments.push(&segment);
            }
        }

        let mut pairs: Vec<(&str, &str)> = Vec::new();
        if let Some(key) = self.credential(descriptor.credential) {
            pairs.push((CREDENTIAL_PARAM, key));
        }
        for param in descriptor.passthrough {
            if let Some(value) = param.select(query) {
                pairs.push((param.name, value));
            }
        }

        url.set_query(None);
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }

        Ok(url)
    }

    fn credential(&self, policy: CredentialPolicy) -> Option<&str> {
        match policy {
            CredentialPolicy::DemoFallback => Some(self.api_key.as_deref().unwrap_or(DEMO_KEY)),
            CredentialPolicy::Required => self.api_key.as_deref(),
            CredentialPolicy::None => None,
        }
    }
}

/// Replace every `{name}` in a template segment with its path parameter.
fn substitute(segment: &str, params: &HashMap<String, String>) -> Result<String, RelayError> {
    let mut out = String::with_capacity(segment.len());
    let mut rest = segment;
    while let Some(start) = rest.find('{') {
        let end = rest[start..]
            .find('}')
            .map(|offset| start + offset)
            .ok_or_else(|| RelayError::Resolve(format!("unterminated placeholder in '{}'", segment)))?;
        let name = &rest[start + 1..end];
        let value = params
            .get(name)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| RelayError::Resolve(format!("missing path parameter '{}'", name)))?;
        out.push_str(&rest[..start]);
        out.push_str(value);
        rest = &rest[end + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

/// Render a URL for logging with the credential masked.
pub fn redact(url: &Url) -> String {
    if !url.query_pairs().any(|(name, _)| name == CREDENTIAL_PARAM) {
        return url.to_string();
    }

    let masked: Vec<(String, String)> = url
        .query_pairs()
        .map(|(name, value)| {
            let value = if name == CREDENTIAL_PARAM { "***".to_string() } else { value.into_owned() };
            (name.into_owned(), value)
        })
        .collect();

    let mut redacted = url.clone();
    redacted.query_pairs_mut().clear().extend_pairs(masked);
    redacted.to_string()
}
