//! Lists and pairlists.

use super::attributes::{normalize, Attributes};
use super::{Heap, Value};

/// Generic vector of heterogeneous values.
#[derive(Clone, Debug, PartialEq)]
pub struct Recursive {
    body: RecursiveBody,
    attrs: Option<Box<Attributes>>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum RecursiveBody {
    /// Flat ordered sequence, optionally named.
    Slice {
        items: Heap<Vec<Value>>,
        /// One entry per item; untagged items have an empty name.
        names: Option<Heap<Vec<String>>>,
        pairlist: bool,
    },
    /// Two-element pairlist cell; `tag` is the text name of `car` or `NULL`.
    Cons {
        car: Box<Value>,
        cdr: Box<Value>,
        tag: Box<Value>,
    },
}

impl Recursive {
    pub fn list(items: Vec<Value>) -> Self {
        Self::from_body(RecursiveBody::Slice {
            items: Heap::new(items),
            names: None,
            pairlist: false,
        })
    }

    /// List with per-item names. All-empty names are dropped.
    pub fn named(items: Vec<Value>, names: Vec<String>, pairlist: bool) -> Self {
        let names = if names.iter().all(String::is_empty) {
            None
        } else {
            Some(Heap::new(names))
        };
        Self::from_body(RecursiveBody::Slice {
            items: Heap::new(items),
            names,
            pairlist,
        })
    }

    pub fn cons(car: Value, cdr: Value, tag: Value) -> Self {
        Self::from_body(RecursiveBody::Cons {
            car: Box::new(car),
            cdr: Box::new(cdr),
            tag: Box::new(tag),
        })
    }

    fn from_body(body: RecursiveBody) -> Self {
        Recursive { body, attrs: None }
    }

    pub fn body(&self) -> &RecursiveBody {
        &self.body
    }

    pub fn len(&self) -> usize {
        match &self.body {
            RecursiveBody::Slice { items, .. } => items.len(),
            RecursiveBody::Cons { .. } => 2,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_pairlist(&self) -> bool {
        match &self.body {
            RecursiveBody::Slice { pairlist, .. } => *pairlist,
            RecursiveBody::Cons { .. } => true,
        }
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        match &self.body {
            RecursiveBody::Slice { items, .. } => items.get(index),
            RecursiveBody::Cons { car, cdr, .. } => match index {
                0 => Some(car),
                1 => Some(cdr),
                _ => None,
            },
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }

    /// Name of item `index`, if it has a non-empty one.
    pub fn name_at(&self, index: usize) -> Option<&str> {
        let name = match &self.body {
            RecursiveBody::Slice { names, .. } => names.as_ref()?.get(index)?.as_str(),
            RecursiveBody::Cons { tag, .. } if index == 0 => match tag.as_ref() {
                Value::Text(t) => t.first()?.as_str(),
                _ => return None,
            },
            RecursiveBody::Cons { .. } => return None,
        };
        (!name.is_empty()).then_some(name)
    }

    pub fn has_names(&self) -> bool {
        (0..self.len()).any(|i| self.name_at(i).is_some())
    }

    /// Names of all items, empty strings for untagged ones.
    pub fn names(&self) -> Vec<String> {
        (0..self.len())
            .map(|i| self.name_at(i).unwrap_or_default().to_owned())
            .collect()
    }

    /// First item position carrying `name`.
    pub fn position_of(&self, name: &str) -> Option<usize> {
        (0..self.len()).find(|&i| self.name_at(i) == Some(name))
    }

    /// Same kind and attributes, new contents.
    #[must_use]
    pub fn with_items(&self, items: Vec<Value>, names: Vec<String>) -> Recursive {
        let mut out = Recursive::named(items, names, self.is_pairlist());
        out.attrs.clone_from(&self.attrs);
        out
    }

    pub fn attrs(&self) -> Option<&Attributes> {
        self.attrs.as_deref()
    }

    pub fn attrs_mut(&mut self) -> &mut Attributes {
        self.attrs.get_or_insert_with(Box::default)
    }

    pub fn tidy_attrs(&mut self) {
        normalize(&mut self.attrs);
    }
}
