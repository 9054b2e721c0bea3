//! Item identity and the caller-owned item record.

use std::fmt;

/// Stable identity of a grid item, unique within one collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ItemKey {
    Str(String),
    Int(i64),
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKey::Str(key) => f.write_str(key),
            ItemKey::Int(key) => write!(f, "{key}"),
        }
    }
}

impl From<&str> for ItemKey {
    fn from(key: &str) -> Self {
        Self::Str(key.to_owned())
    }
}

impl From<String> for ItemKey {
    fn from(key: String) -> Self {
        Self::Str(key)
    }
}

impl From<i64> for ItemKey {
    fn from(key: i64) -> Self {
        Self::Int(key)
    }
}

impl From<i32> for ItemKey {
    fn from(key: i32) -> Self {
        Self::Int(i64::from(key))
    }
}

impl From<u32> for ItemKey {
    fn from(key: u32) -> Self {
        Self::Int(i64::from(key))
    }
}

/// A record the grid can lay out and resize.
///
/// The grid never mutates an item: a resize produces a replacement through
/// [`GridItem::with_layout_size`].
pub trait GridItem: Clone {
    /// Stable key of this item.
    fn key(&self) -> ItemKey;

    /// Persisted span. `None` or `Some(0)` means "use the default span".
    fn layout_size(&self) -> Option<i32>;

    /// A copy of this item with its span replaced.
    fn with_layout_size(&self, layout_size: i32) -> Self;
}

/// Ready-made item: a key, an optional span and an arbitrary payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Field<P> {
    pub id: ItemKey,
    pub layout_size: Option<i32>,
    pub payload: P,
}

impl<P> Field<P> {
    pub fn new(id: impl Into<ItemKey>, payload: P) -> Self {
        Self {
            id: id.into(),
            layout_size: None,
            payload,
        }
    }

    /// Set the persisted span.
    pub fn span(mut self, layout_size: i32) -> Self {
        self.layout_size = Some(layout_size);
        self
    }
}

impl<P: Clone> GridItem for Field<P> {
    fn key(&self) -> ItemKey {
        self.id.clone()
    }

    fn layout_size(&self) -> Option<i32> {
        self.layout_size
    }

    fn with_layout_size(&self, layout_size: i32) -> Self {
        Self {
            layout_size: Some(layout_size),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_conversions() {
        assert_eq!(ItemKey::from("a"), ItemKey::Str("a".into()));
        assert_eq!(ItemKey::from(7i32), ItemKey::Int(7));
        assert_ne!(ItemKey::from("1"), ItemKey::from(1i64));
    }

    #[test]
    fn test_key_display() {
        assert_eq!(ItemKey::from("field-1").to_string(), "field-1");
        assert_eq!(ItemKey::from(42u32).to_string(), "42");
    }

    #[test]
    fn test_with_layout_size_leaves_original() {
        let field = Field::new("1", "Field 1").span(2);
        let resized = field.with_layout_size(3);

        assert_eq!(field.layout_size, Some(2));
        assert_eq!(resized.layout_size, Some(3));
        assert_eq!(resized.payload, "Field 1");
        assert_eq!(resized.key(), field.key());
    }
}
