//! Attribute containers attached to graphs, nodes and edges.

use std::{
    any::Any,
    cell::RefCell,
    fmt::{self, Debug, Formatter},
    rc::Rc,
};

use indexmap::IndexMap;

/// A mutable value cell whose clones all refer to the same value.
///
/// Storing a `SharedValue` in several attribute maps makes a change made
/// through one of them visible through all of them.  [`AttrValue::deep_clone`]
/// detaches the copy into a fresh cell.
#[derive(Clone, Default)]
pub struct SharedValue(Rc<RefCell<AttrValue>>);

impl SharedValue {
    pub fn new(value: impl Into<AttrValue>) -> Self {
        SharedValue(Rc::new(RefCell::new(value.into())))
    }

    /// Returns a copy of the current value.
    pub fn get(&self) -> AttrValue {
        self.0.borrow().clone()
    }

    /// Replaces the current value, returning the old one.
    pub fn set(&self, value: impl Into<AttrValue>) -> AttrValue {
        self.0.replace(value.into())
    }

    /// Returns true if both handles refer to the same cell.
    pub fn ptr_eq(&self, other: &SharedValue) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Debug for SharedValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(value) => f.debug_tuple("Shared").field(&*value).finish(),
            Err(_) => f.write_str("Shared(<borrowed>)"),
        }
    }
}

/// A single attribute value.
#[derive(Clone, Default)]
pub enum AttrValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<AttrValue>),
    Map(IndexMap<String, AttrValue>),
    Shared(SharedValue),
    /// Any other value, held by reference.  Clones alias the same value.
    Opaque(Rc<dyn Any>),
}

impl AttrValue {
    /// Wraps an arbitrary value, e.g. another graph.
    pub fn opaque<T: Any>(value: T) -> Self {
        AttrValue::Opaque(Rc::new(value))
    }

    /// Returns the value as a float if it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttrValue::Int(i) => Some(*i as f64),
            AttrValue::Float(x) => Some(*x),
            AttrValue::Shared(cell) => cell.0.try_borrow().ok()?.as_f64(),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            AttrValue::Int(i) => Some(*i),
            AttrValue::Shared(cell) => cell.0.try_borrow().ok()?.as_i64(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Downcasts an opaque value.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            AttrValue::Opaque(any) => any.downcast_ref(),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, AttrValue::Null)
    }

    /// Clones the value, detaching shared cells so the copy no longer aliases
    /// the original.  Opaque values cannot be copied and remain shared.
    pub fn deep_clone(&self) -> AttrValue {
        match self {
            AttrValue::List(items) => AttrValue::List(items.iter().map(Self::deep_clone).collect()),
            AttrValue::Map(map) => AttrValue::Map(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.deep_clone()))
                    .collect(),
            ),
            AttrValue::Shared(cell) => AttrValue::Shared(SharedValue::new(cell.get().deep_clone())),
            other => other.clone(),
        }
    }
}

impl PartialEq for AttrValue {
    fn eq(&self, other: &Self) -> bool {
        use AttrValue::*;
        match (self, other) {
            (Null, Null) => true,
            (Bool(a), Bool(b)) => a == b,
            (Int(a), Int(b)) => a == b,
            (Float(a), Float(b)) => a == b,
            (Int(a), Float(b)) | (Float(b), Int(a)) => (*a as f64) == *b,
            (Str(a), Str(b)) => a == b,
            (List(a), List(b)) => a == b,
            (Map(a), Map(b)) => a == b,
            (Shared(a), Shared(b)) => {
                a.ptr_eq(b)
                    || match (a.0.try_borrow(), b.0.try_borrow()) {
                        (Ok(a), Ok(b)) => *a == *b,
                        _ => false,
                    }
            }
            (Opaque(a), Opaque(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Debug for AttrValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Null => f.write_str("Null"),
            AttrValue::Bool(b) => Debug::fmt(b, f),
            AttrValue::Int(i) => Debug::fmt(i, f),
            AttrValue::Float(x) => Debug::fmt(x, f),
            AttrValue::Str(s) => Debug::fmt(s, f),
            AttrValue::List(items) => f.debug_list().entries(items).finish(),
            AttrValue::Map(map) => f.debug_map().entries(map).finish(),
            AttrValue::Shared(cell) => Debug::fmt(cell, f),
            AttrValue::Opaque(_) => f.write_str("Opaque(..)"),
        }
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident as $conv:ty),* $(,)?) => {
        $(
            impl From<$ty> for AttrValue {
                fn from(value: $ty) -> Self {
                    AttrValue::$variant(<$conv>::from(value))
                }
            }
        )*
    };
}

impl_from! {
    bool => Bool as bool,
    i32 => Int as i64,
    i64 => Int as i64,
    u32 => Int as i64,
    f32 => Float as f64,
    f64 => Float as f64,
    String => Str as String,
    &str => Str as String,
    Vec<AttrValue> => List as Vec<AttrValue>,
    SharedValue => Shared as SharedValue,
}

impl From<usize> for AttrValue {
    fn from(value: usize) -> Self {
        AttrValue::Int(value as i64)
    }
}

impl From<IndexMap<String, AttrValue>> for AttrValue {
    fn from(value: IndexMap<String, AttrValue>) -> Self {
        AttrValue::Map(value)
    }
}

/// An insertion-ordered mapping from attribute name to value.
///
/// One `Attributes` value exists per graph, per node and per edge.  Both
/// endpoints of an edge resolve to the same `Attributes` value, so an update
/// made while addressing the edge from either end is visible from the other.
#[derive(Clone, Default, PartialEq)]
pub struct Attributes {
    entries: IndexMap<String, AttrValue>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Sets an attribute, returning the previous value.  Replacing a value
    /// keeps the attribute's original position in iteration order.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Option<AttrValue> {
        self.entries.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.entries.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut AttrValue> {
        self.entries.get_mut(name)
    }

    /// Gets an attribute, or `default` if it is absent.
    pub fn get_or<'a>(&'a self, name: &str, default: &'a AttrValue) -> &'a AttrValue {
        self.entries.get(name).unwrap_or(default)
    }

    /// Merges `other` into this map; values from `other` win on conflict.
    pub fn update(&mut self, other: Attributes) {
        self.entries.extend(other.entries);
    }

    /// Removes an attribute, keeping the order of the remaining ones.
    pub fn remove(&mut self, name: &str) -> Option<AttrValue> {
        self.entries.shift_remove(name)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut AttrValue)> {
        self.entries.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Copies the map, detaching shared cells.
    pub fn deep_clone(&self) -> Attributes {
        Attributes {
            entries: self
                .entries
                .iter()
                .map(|(k, v)| (k.clone(), v.deep_clone()))
                .collect(),
        }
    }
}

impl Debug for Attributes {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(&self.entries).finish()
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<AttrValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Attributes {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K, V> Extend<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<AttrValue>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.entries
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

/// Builds an [`Attributes`] map from `name => value` pairs.
///
/// ```
/// let attrs = netgraph::attrs! { "weight" => 4, "color" => "red" };
/// assert_eq!(attrs.len(), 2);
/// ```
#[macro_export]
macro_rules! attrs {
    () => { $crate::attributes::Attributes::new() };
    ($($name:expr => $value:expr),+ $(,)?) => {{
        let mut attrs = $crate::attributes::Attributes::new();
        $( attrs.set($name, $value); )+
        attrs
    }};
}
