//! Registry wire formats
//!
//! Maps resource keys to registry paths and decodes response bodies into
//! [`Resource`] values. The layout follows the Elm package registry:
//!
//! | Key | Path |
//! |-----|------|
//! | Releases, Latest | `packages/{author}/{project}/releases.json` |
//! | Readme | `packages/{author}/{project}/{version}/README.md` |
//! | Docs, Module | `packages/{author}/{project}/{version}/docs.json` |
//! | Catalog | `search.json` |
//!
//! Releases and Latest are separate keys over the same document, so a page
//! that needs both fetches `releases.json` twice.

use crate::cache::{Resource, ResourceKey};
use crate::error::FetchError;
use crate::registry::types::{BlockKind, DocBlock, ModuleDocs, PackageSummary, Release};
use chrono::DateTime;
use semver::Version;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Registry path (relative to the base URL) that serves a key
pub fn endpoint(key: &ResourceKey) -> String {
    match key {
        ResourceKey::Releases { package } | ResourceKey::Latest { package } => {
            format!("packages/{}/{}/releases.json", package.author, package.project)
        }
        ResourceKey::Readme { package, version } => format!(
            "packages/{}/{}/{}/README.md",
            package.author, package.project, version
        ),
        ResourceKey::Docs { package, version } | ResourceKey::Module { package, version, .. } => {
            format!(
                "packages/{}/{}/{}/docs.json",
                package.author, package.project, version
            )
        }
        ResourceKey::Catalog => "search.json".to_string(),
    }
}

/// Decode a response body for the given key
pub fn decode(key: &ResourceKey, body: &str) -> Result<Resource, FetchError> {
    match key {
        ResourceKey::Releases { .. } => {
            let releases = parse_releases(key, body)?;
            Ok(Resource::Releases(Arc::new(releases)))
        }
        ResourceKey::Latest { .. } => {
            let releases = parse_releases(key, body)?;
            releases
                .last()
                .map(|r| Resource::Latest(r.version.clone()))
                .ok_or_else(|| FetchError::not_found(key))
        }
        ResourceKey::Readme { .. } => Ok(Resource::Readme(Arc::from(body))),
        ResourceKey::Docs { .. } => {
            let modules = parse_docs(key, body)?;
            Ok(Resource::Docs(Arc::new(modules)))
        }
        ResourceKey::Module { module, .. } => {
            let modules = parse_docs(key, body)?;
            modules
                .into_iter()
                .find(|m| &m.name == module)
                .map(|m| Resource::Module(Arc::new(m)))
                .ok_or_else(|| FetchError::not_found(key))
        }
        ResourceKey::Catalog => {
            let packages: Vec<PackageSummary> = serde_json::from_str(body)
                .map_err(|e| FetchError::malformed(key, e.to_string()))?;
            Ok(Resource::Catalog(Arc::new(packages)))
        }
    }
}

/// Parse `releases.json`, a map of version to publication time in unix seconds.
/// The result is sorted by version, oldest first.
fn parse_releases(key: &ResourceKey, body: &str) -> Result<Vec<Release>, FetchError> {
    let raw: BTreeMap<String, i64> =
        serde_json::from_str(body).map_err(|e| FetchError::malformed(key, e.to_string()))?;

    let mut releases = raw
        .into_iter()
        .map(|(version, secs)| -> Result<Release, FetchError> {
            let version = Version::parse(&version)
                .map_err(|e| FetchError::malformed(key, format!("version {}: {}", version, e)))?;
            let published = DateTime::from_timestamp(secs, 0).ok_or_else(|| {
                FetchError::malformed(key, format!("timestamp out of range: {}", secs))
            })?;
            Ok(Release { version, published })
        })
        .collect::<Result<Vec<_>, _>>()?;

    releases.sort_by(|a, b| a.version.cmp(&b.version));
    Ok(releases)
}

#[derive(Deserialize)]
struct WireModule {
    name: String,
    #[serde(default)]
    comment: String,
    #[serde(default)]
    unions: Vec<WireUnion>,
    #[serde(default)]
    aliases: Vec<WireAlias>,
    #[serde(default)]
    values: Vec<WireValue>,
    #[serde(default)]
    binops: Vec<WireValue>,
}

#[derive(Deserialize)]
struct WireUnion {
    name: String,
    #[serde(default)]
    comment: String,
    #[serde(default)]
    args: Vec<String>,
    #[serde(default)]
    cases: Vec<(String, Vec<String>)>,
}

#[derive(Deserialize)]
struct WireAlias {
    name: String,
    #[serde(default)]
    comment: String,
    #[serde(default)]
    args: Vec<String>,
    #[serde(rename = "type")]
    tipe: String,
}

#[derive(Deserialize)]
struct WireValue {
    name: String,
    #[serde(default)]
    comment: String,
    #[serde(rename = "type")]
    tipe: String,
}

fn parse_docs(key: &ResourceKey, body: &str) -> Result<Vec<ModuleDocs>, FetchError> {
    let modules: Vec<WireModule> =
        serde_json::from_str(body).map_err(|e| FetchError::malformed(key, e.to_string()))?;
    Ok(modules.into_iter().map(ModuleDocs::from).collect())
}

/// Parenthesize a type argument that contains spaces
fn type_arg(arg: &str) -> String {
    if arg.contains(' ') && !arg.starts_with('(') && !arg.starts_with('{') {
        format!("({})", arg)
    } else {
        arg.to_string()
    }
}

fn with_args(name: &str, args: &[String]) -> String {
    std::iter::once(name.to_string())
        .chain(args.iter().cloned())
        .collect::<Vec<_>>()
        .join(" ")
}

impl From<WireModule> for ModuleDocs {
    fn from(wire: WireModule) -> Self {
        let unions = wire.unions.into_iter().map(|u| {
            let head = with_args(&u.name, &u.args);
            let signature = if u.cases.is_empty() {
                format!("type {}", head)
            } else {
                let cases = u
                    .cases
                    .iter()
                    .map(|(tag, args)| {
                        let args: Vec<String> = args.iter().map(|a| type_arg(a)).collect();
                        with_args(tag, &args)
                    })
                    .collect::<Vec<_>>()
                    .join(" | ");
                format!("type {} = {}", head, cases)
            };
            DocBlock {
                kind: BlockKind::Union,
                name: u.name,
                comment: u.comment,
                signature,
            }
        });

        let aliases = wire.aliases.into_iter().map(|a| DocBlock {
            kind: BlockKind::Alias,
            signature: format!("type alias {} = {}", with_args(&a.name, &a.args), a.tipe),
            name: a.name,
            comment: a.comment,
        });

        let values = wire.values.into_iter().map(|v| DocBlock {
            kind: BlockKind::Value,
            signature: format!("{} : {}", v.name, v.tipe),
            name: v.name,
            comment: v.comment,
        });

        let binops = wire.binops.into_iter().map(|b| DocBlock {
            kind: BlockKind::Binop,
            signature: format!("({}) : {}", b.name, b.tipe),
            name: b.name,
            comment: b.comment,
        });

        Self {
            name: wire.name,
            comment: wire.comment,
            blocks: unions.chain(aliases).chain(values).chain(binops).collect(),
        }
    }
}
