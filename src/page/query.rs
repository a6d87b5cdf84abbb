//! Page queries

use crate::cache::{Cache, PackageName};
use crate::error::{PkgDocsError, PkgDocsResult};
use crate::page::{
    DocsPage, ModulePage, ModuleSummary, Page, ReadmePage, ReleasesPage, SearchPage, Target,
};
use crate::query::{self, Query};
use crate::registry::{ModuleDocs, PackageSummary, Release};
use crate::session::{LoadProgress, Session};
use semver::Version;
use std::sync::Arc;

/// Build the query for `target`.
///
/// Returns `Ok(None)` while the target asks for a `latest` version that the
/// cache has not resolved yet.
pub fn query_for(target: &Target, cache: &Cache) -> PkgDocsResult<Option<Query<Page>>> {
    let version = match target.version_spec() {
        Some(mut spec) => match spec.resolve_from(cache)? {
            Some(v) => Some(v.clone()),
            None => return Ok(None),
        },
        None => None,
    };

    let query = match (target, version) {
        (Target::Releases { package }, _) => releases_page(package),
        (Target::Readme { package, .. }, Some(v)) => readme_page(package, v),
        (Target::Docs { package, module: None, .. }, Some(v)) => docs_page(package, v),
        (
            Target::Docs {
                package,
                module: Some(name),
                ..
            },
            Some(v),
        ) => module_page(package, v, name),
        (Target::Search { query }, _) => search_page(query.clone()),
        (target, None) => {
            return Err(PkgDocsError::Internal(format!(
                "{} has no version to load",
                target
            )))
        }
    };
    Ok(Some(query))
}

/// Load `target` through `session`, resolving its version first
pub async fn load(
    session: &mut Session,
    target: &Target,
    mut on_progress: impl FnMut(LoadProgress),
) -> PkgDocsResult<Page> {
    if let Some(mut spec) = target.version_spec() {
        session.resolve_version_with(&mut spec, &mut on_progress).await?;
    }

    let query = query_for(target, session.cache())?.ok_or(PkgDocsError::Stalled)?;
    session.run_with(&query, on_progress).await
}

fn releases_page(package: &PackageName) -> Query<Page> {
    let owned = package.clone();
    Query::combine2(
        move |releases: Arc<Vec<Release>>, latest| {
            Page::Releases(ReleasesPage {
                package: owned.clone(),
                releases: releases.to_vec(),
                latest,
            })
        },
        query::releases(package),
        query::latest(package).optional(),
    )
}

fn readme_page(package: &PackageName, version: Version) -> Query<Page> {
    let owned = package.clone();
    let shown = version.clone();
    Query::combine2(
        move |readme: Arc<str>, latest: Option<Version>| {
            Page::Readme(ReadmePage {
                package: owned.clone(),
                version: shown.clone(),
                readme: readme.to_string(),
                newer: latest.filter(|l| *l > shown),
            })
        },
        query::readme(package, &version),
        query::latest(package).optional(),
    )
}

fn docs_page(package: &PackageName, version: Version) -> Query<Page> {
    let owned = package.clone();
    let shown = version.clone();
    Query::combine2(
        move |modules: Arc<Vec<ModuleDocs>>, readme: Option<Arc<str>>| {
            Page::Docs(DocsPage {
                package: owned.clone(),
                version: shown.clone(),
                modules: modules.iter().map(ModuleSummary::from_docs).collect(),
                readme: readme.map(|r| r.to_string()),
            })
        },
        query::docs(package, &version),
        query::readme(package, &version).optional(),
    )
}

fn module_page(package: &PackageName, version: Version, name: &str) -> Query<Page> {
    let owned = package.clone();
    let shown = version.clone();
    query::module(package, &version, name).map(move |module| {
        Page::Module(ModulePage {
            package: owned.clone(),
            version: shown.clone(),
            module: (*module).clone(),
        })
    })
}

fn search_page(term: String) -> Query<Page> {
    query::catalog().map(move |catalog| {
        Page::Search(SearchPage {
            query: term.clone(),
            matches: search(&catalog, &term),
        })
    })
}

/// Case-insensitive search; packages whose name matches come first
fn search(catalog: &[PackageSummary], term: &str) -> Vec<PackageSummary> {
    let needle = term.to_lowercase();
    let mut matches: Vec<PackageSummary> =
        catalog.iter().filter(|p| p.matches(term)).cloned().collect();
    matches.sort_by_key(|p| !p.name.to_string().to_lowercase().contains(&needle));
    matches
}
