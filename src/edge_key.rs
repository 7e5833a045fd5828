use std::fmt::{self, Display, Formatter};

/// Distinguishes parallel edges between the same pair of nodes.
///
/// Keys generated by a multigraph are `Index` values.  Callers may supply
/// their own keys of either form.  Edges in single-edge graphs all carry the
/// default key, `Index(0)`.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum EdgeKey {
    Index(usize),
    Name(String),
}

impl Default for EdgeKey {
    fn default() -> Self {
        EdgeKey::Index(0)
    }
}

impl Display for EdgeKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            EdgeKey::Index(i) => write!(f, "{i}"),
            EdgeKey::Name(name) => write!(f, "{name}"),
        }
    }
}

impl From<usize> for EdgeKey {
    fn from(value: usize) -> Self {
        EdgeKey::Index(value)
    }
}

impl From<&str> for EdgeKey {
    fn from(value: &str) -> Self {
        EdgeKey::Name(value.to_string())
    }
}

impl From<String> for EdgeKey {
    fn from(value: String) -> Self {
        EdgeKey::Name(value)
    }
}
