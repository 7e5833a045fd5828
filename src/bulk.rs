use crate::{attributes::Attributes, edge_key::EdgeKey};

/// One element of a bulk edge insertion or removal.
///
/// Built from tuples: `(u, v)`, `(u, v, attrs)`, `(u, v, key)` or
/// `(u, v, key, attrs)`.  A key is only meaningful to multigraphs.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeSpec<N> {
    pub source: N,
    pub target: N,
    pub key: Option<EdgeKey>,
    pub attrs: Attributes,
}

impl<N> EdgeSpec<N> {
    pub fn new(source: N, target: N) -> Self {
        EdgeSpec {
            source,
            target,
            key: None,
            attrs: Attributes::new(),
        }
    }

    pub fn with_key(mut self, key: impl Into<EdgeKey>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_attrs(mut self, attrs: Attributes) -> Self {
        self.attrs = attrs;
        self
    }
}

impl<N> From<(N, N)> for EdgeSpec<N> {
    fn from((source, target): (N, N)) -> Self {
        EdgeSpec::new(source, target)
    }
}

impl<N> From<(N, N, Attributes)> for EdgeSpec<N> {
    fn from((source, target, attrs): (N, N, Attributes)) -> Self {
        EdgeSpec::new(source, target).with_attrs(attrs)
    }
}

impl<N> From<(N, N, EdgeKey)> for EdgeSpec<N> {
    fn from((source, target, key): (N, N, EdgeKey)) -> Self {
        EdgeSpec::new(source, target).with_key(key)
    }
}

impl<N> From<(N, N, EdgeKey, Attributes)> for EdgeSpec<N> {
    fn from((source, target, key, attrs): (N, N, EdgeKey, Attributes)) -> Self {
        EdgeSpec::new(source, target).with_key(key).with_attrs(attrs)
    }
}
