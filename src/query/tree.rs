//! Query combinators
//!
//! A [`Query`] describes the data a page needs as a tree of combinators over
//! resource identities. Queries are immutable values: cloning shares the
//! tree, and evaluating one never changes it.

use crate::cache::{Entry, PackageName, Resource, ResourceKey};
use crate::error::FetchError;
use crate::query::eval::EvalContext;
use crate::query::status::Status;
use crate::registry::{ModuleDocs, PackageSummary, Release};
use semver::Version;
use std::fmt;
use std::sync::Arc;

/// Shape of a query node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    Leaf,
    Map,
    Combine2,
    Combine3,
    Optional,
    Constant,
}

/// A node of the query tree
pub(crate) trait Node<T>: Send + Sync {
    fn eval(&self, cx: &mut EvalContext) -> Status<T>;
    fn collect_keys(&self, out: &mut Vec<ResourceKey>);
    fn kind(&self) -> QueryKind;
}

/// Composable description of a page's data dependencies
pub struct Query<T> {
    node: Arc<dyn Node<T>>,
}

impl<T> Clone for Query<T> {
    fn clone(&self) -> Self {
        Self {
            node: Arc::clone(&self.node),
        }
    }
}

impl<T> fmt::Debug for Query<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("kind", &self.kind())
            .field("keys", &self.keys())
            .finish()
    }
}

impl<T> Query<T> {
    pub(crate) fn eval(&self, cx: &mut EvalContext) -> Status<T> {
        self.node.eval(cx)
    }

    /// Kind of the root node
    pub fn kind(&self) -> QueryKind {
        self.node.kind()
    }

    /// Every resource the tree mentions, left to right, without duplicates
    pub fn keys(&self) -> Vec<ResourceKey> {
        let mut keys = Vec::new();
        self.node.collect_keys(&mut keys);
        let mut seen = std::collections::HashSet::new();
        keys.retain(|k| seen.insert(k.clone()));
        keys
    }
}

impl<T: 'static> Query<T> {
    /// Always ready with `value`; never touches the cache
    pub fn constant(value: T) -> Self
    where
        T: Clone + Send + Sync,
    {
        Self {
            node: Arc::new(Constant { value }),
        }
    }

    /// Transform the ready value
    pub fn map<U: 'static>(self, f: impl Fn(T) -> U + Send + Sync + 'static) -> Query<U> {
        Query {
            node: Arc::new(Map {
                inner: self,
                f: Box::new(f),
            }),
        }
    }

    /// Treat failure as absence: `Failed` becomes `Ready(None)`
    pub fn optional(self) -> Query<Option<T>> {
        Query {
            node: Arc::new(Optional { inner: self }),
        }
    }

    /// Join two independent queries
    pub fn combine2<A: 'static, B: 'static>(
        f: impl Fn(A, B) -> T + Send + Sync + 'static,
        a: Query<A>,
        b: Query<B>,
    ) -> Self {
        Self {
            node: Arc::new(Combine2 {
                a,
                b,
                f: Box::new(f),
            }),
        }
    }

    /// Join three independent queries
    pub fn combine3<A: 'static, B: 'static, C: 'static>(
        f: impl Fn(A, B, C) -> T + Send + Sync + 'static,
        a: Query<A>,
        b: Query<B>,
        c: Query<C>,
    ) -> Self {
        Self {
            node: Arc::new(Combine3 {
                a,
                b,
                c,
                f: Box::new(f),
            }),
        }
    }

    /// Pair this query with another
    pub fn zip<U: 'static>(self, other: Query<U>) -> Query<(T, U)> {
        Query::combine2(|a, b| (a, b), self, other)
    }
}

/// Depend on one resource, untyped
pub fn resource(key: ResourceKey) -> Query<Resource> {
    leaf(key, |r| Some(r.clone()))
}

/// Every release of a package
pub fn releases(package: &PackageName) -> Query<Arc<Vec<Release>>> {
    leaf(ResourceKey::releases(package), |r| match r {
        Resource::Releases(v) => Some(Arc::clone(v)),
        _ => None,
    })
}

/// Latest version of a package
pub fn latest(package: &PackageName) -> Query<Version> {
    leaf(ResourceKey::latest(package), |r| match r {
        Resource::Latest(v) => Some(v.clone()),
        _ => None,
    })
}

/// README of a release
pub fn readme(package: &PackageName, version: &Version) -> Query<Arc<str>> {
    leaf(ResourceKey::readme(package, version), |r| match r {
        Resource::Readme(text) => Some(Arc::clone(text)),
        _ => None,
    })
}

/// All module docs of a release
pub fn docs(package: &PackageName, version: &Version) -> Query<Arc<Vec<ModuleDocs>>> {
    leaf(ResourceKey::docs(package, version), |r| match r {
        Resource::Docs(modules) => Some(Arc::clone(modules)),
        _ => None,
    })
}

/// One module's docs
pub fn module(package: &PackageName, version: &Version, name: &str) -> Query<Arc<ModuleDocs>> {
    leaf(ResourceKey::module(package, version, name), |r| match r {
        Resource::Module(m) => Some(Arc::clone(m)),
        _ => None,
    })
}

/// The registry's package catalog
pub fn catalog() -> Query<Arc<Vec<PackageSummary>>> {
    leaf(ResourceKey::Catalog, |r| match r {
        Resource::Catalog(packages) => Some(Arc::clone(packages)),
        _ => None,
    })
}

fn leaf<T: 'static>(key: ResourceKey, extract: fn(&Resource) -> Option<T>) -> Query<T> {
    Query {
        node: Arc::new(Leaf { key, extract }),
    }
}

struct Leaf<T> {
    key: ResourceKey,
    extract: fn(&Resource) -> Option<T>,
}

impl<T> Node<T> for Leaf<T> {
    fn eval(&self, cx: &mut EvalContext) -> Status<T> {
        cx.request(&self.key);

        match cx.cache().get(&self.key) {
            None | Some(Entry::Unrequested) | Some(Entry::Pending) => Status::Loading,
            Some(Entry::Failed(e)) => Status::Failed(e.clone()),
            Some(Entry::Ready(value)) => match (self.extract)(value) {
                Some(v) => Status::Ready(v),
                None => Status::Failed(FetchError::malformed(
                    &self.key,
                    format!("cached {} data under a {} key", value.kind(), self.key.kind()),
                )),
            },
        }
    }

    fn collect_keys(&self, out: &mut Vec<ResourceKey>) {
        out.push(self.key.clone());
    }

    fn kind(&self) -> QueryKind {
        QueryKind::Leaf
    }
}

struct Map<A, T> {
    inner: Query<A>,
    f: Box<dyn Fn(A) -> T + Send + Sync>,
}

impl<A, T> Node<T> for Map<A, T> {
    fn eval(&self, cx: &mut EvalContext) -> Status<T> {
        self.inner.eval(cx).map(&self.f)
    }

    fn collect_keys(&self, out: &mut Vec<ResourceKey>) {
        self.inner.node.collect_keys(out);
    }

    fn kind(&self) -> QueryKind {
        QueryKind::Map
    }
}

struct Combine2<A, B, T> {
    a: Query<A>,
    b: Query<B>,
    f: Box<dyn Fn(A, B) -> T + Send + Sync>,
}

impl<A, B, T> Node<T> for Combine2<A, B, T> {
    fn eval(&self, cx: &mut EvalContext) -> Status<T> {
        // Both branches run before aggregation so every missing leaf is dispatched
        let a = self.a.eval(cx);
        let b = self.b.eval(cx);

        match (a, b) {
            (Status::Failed(e), _) | (_, Status::Failed(e)) => Status::Failed(e),
            (Status::Ready(a), Status::Ready(b)) => Status::Ready((self.f)(a, b)),
            _ => Status::Loading,
        }
    }

    fn collect_keys(&self, out: &mut Vec<ResourceKey>) {
        self.a.node.collect_keys(out);
        self.b.node.collect_keys(out);
    }

    fn kind(&self) -> QueryKind {
        QueryKind::Combine2
    }
}

struct Combine3<A, B, C, T> {
    a: Query<A>,
    b: Query<B>,
    c: Query<C>,
    f: Box<dyn Fn(A, B, C) -> T + Send + Sync>,
}

impl<A, B, C, T> Node<T> for Combine3<A, B, C, T> {
    fn eval(&self, cx: &mut EvalContext) -> Status<T> {
        let a = self.a.eval(cx);
        let b = self.b.eval(cx);
        let c = self.c.eval(cx);

        match (a, b, c) {
            (Status::Failed(e), _, _) | (_, Status::Failed(e), _) | (_, _, Status::Failed(e)) => {
                Status::Failed(e)
            }
            (Status::Ready(a), Status::Ready(b), Status::Ready(c)) => {
                Status::Ready((self.f)(a, b, c))
            }
            _ => Status::Loading,
        }
    }

    fn collect_keys(&self, out: &mut Vec<ResourceKey>) {
        self.a.node.collect_keys(out);
        self.b.node.collect_keys(out);
        self.c.node.collect_keys(out);
    }

    fn kind(&self) -> QueryKind {
        QueryKind::Combine3
    }
}

struct Optional<A> {
    inner: Query<A>,
}

impl<A> Node<Option<A>> for Optional<A> {
    fn eval(&self, cx: &mut EvalContext) -> Status<Option<A>> {
        match self.inner.eval(cx) {
            Status::Loading => Status::Loading,
            Status::Failed(_) => Status::Ready(None),
            Status::Ready(v) => Status::Ready(Some(v)),
        }
    }

    fn collect_keys(&self, out: &mut Vec<ResourceKey>) {
        self.inner.node.collect_keys(out);
    }

    fn kind(&self) -> QueryKind {
        QueryKind::Optional
    }
}

struct Constant<T> {
    value: T,
}

impl<T: Clone + Send + Sync> Node<T> for Constant<T> {
    fn eval(&self, _cx: &mut EvalContext) -> Status<T> {
        Status::Ready(self.value.clone())
    }

    fn collect_keys(&self, _out: &mut Vec<ResourceKey>) {}

    fn kind(&self) -> QueryKind {
        QueryKind::Constant
    }
}
