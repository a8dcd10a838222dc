//! Ordered vector of variables.
//!
//! [`Cvec`] keeps variables in insertion order and looks them up either by
//! position or by name. Names need not be unique; a name lookup returns the
//! first match. The name index is built lazily on the first name lookup and
//! dropped by every mutation.

use core::fmt;
use core::ops::Add;

use hashbrown::HashMap;
use once_cell::unsync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{Error, Result};
use crate::var::CgVar;

/// A position or a name.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Key<'a> {
    Index(usize),
    Name(&'a str),
}

impl From<usize> for Key<'_> {
    fn from(index: usize) -> Self {
        Key::Index(index)
    }
}

impl<'a> From<&'a str> for Key<'a> {
    fn from(name: &'a str) -> Self {
        Key::Name(name)
    }
}

impl<'a> From<&'a String> for Key<'a> {
    fn from(name: &'a String) -> Self {
        Key::Name(name)
    }
}

/// What to search for in [`Cvec::position`] and [`Cvec::remove_matching`].
#[derive(Copy, Clone, Debug)]
pub enum Needle<'a> {
    /// The first variable with this name.
    Name(&'a str),
    /// The first variable equal to this one; names are ignored.
    Value(&'a CgVar),
}

#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<CgVar>", into = "Vec<CgVar>")]
pub struct Cvec {
    vars: Vec<CgVar>,
    by_name: OnceCell<HashMap<String, usize>>,
}

impl Cvec {
    pub fn new() -> Cvec {
        Cvec::default()
    }

    pub fn with_capacity(capacity: usize) -> Cvec {
        Cvec::from(Vec::with_capacity(capacity))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, CgVar> {
        self.vars.iter()
    }

    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, CgVar> {
        self.invalidate();
        self.vars.iter_mut()
    }

    pub fn as_slice(&self) -> &[CgVar] {
        &self.vars
    }

    /// Append a variable, or a zero variable when given a bare kind, and
    /// return the stored instance.
    pub fn append(&mut self, var: impl Into<CgVar>) -> &mut CgVar {
        self.invalidate();
        self.vars.push(var.into());
        let last = self.vars.len() - 1;
        &mut self.vars[last]
    }

    /// Append a zero variable of the kind with numeric type `code`.
    pub fn append_code(&mut self, code: u8) -> Result<&mut CgVar> {
        let var = CgVar::from_code(code)?;
        Ok(self.append(var))
    }

    fn name_index(&self) -> &HashMap<String, usize> {
        self.by_name.get_or_init(|| {
            trace!(len = self.vars.len(), "building name index");
            let mut index = HashMap::with_capacity(self.vars.len());
            for (i, var) in self.vars.iter().enumerate() {
                if let Some(name) = var.name() {
                    index.entry(name.to_string()).or_insert(i);
                }
            }
            index
        })
    }

    fn invalidate(&mut self) {
        self.by_name.take();
    }

    /// Resolve `key` to a position.
    pub fn index_of<'a>(&self, key: impl Into<Key<'a>>) -> Result<usize> {
        match key.into() {
            Key::Index(index) if index < self.vars.len() => Ok(index),
            Key::Index(index) => Err(Error::IndexOutOfRange {
                index,
                len: self.vars.len(),
            }),
            Key::Name(name) => self.name_index().get(name).copied().ok_or_else(|| {
                Error::NotFound {
                    name: name.to_string(),
                }
            }),
        }
    }

    pub fn get<'a>(&self, key: impl Into<Key<'a>>) -> Result<&CgVar> {
        let index = self.index_of(key)?;
        Ok(&self.vars[index])
    }

    pub fn get_mut<'a>(&mut self, key: impl Into<Key<'a>>) -> Result<&mut CgVar> {
        let index = self.index_of(key)?;
        self.invalidate();
        Ok(&mut self.vars[index])
    }

    /// The first variable named `name`, if any.
    pub fn find(&self, name: &str) -> Option<&CgVar> {
        self.get(name).ok()
    }

    /// True if some variable is named `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.name_index().contains_key(name)
    }

    /// Replace the variable at `key`.
    pub fn set<'a>(&mut self, key: impl Into<Key<'a>>, var: CgVar) -> Result<()> {
        *self.get_mut(key)? = var;
        Ok(())
    }

    /// Parse `text` into the variable at `key`, keeping its kind. On failure
    /// the variable is unchanged.
    pub fn set_text<'a>(&mut self, key: impl Into<Key<'a>>, text: &str) -> Result<()> {
        self.get_mut(key)?.parse(text)
    }

    pub fn remove<'a>(&mut self, key: impl Into<Key<'a>>) -> Result<CgVar> {
        let index = self.index_of(key)?;
        self.invalidate();
        Ok(self.vars.remove(index))
    }

    /// Position of the first variable matching `needle`.
    pub fn position(&self, needle: Needle<'_>) -> Option<usize> {
        match needle {
            Needle::Name(name) => self.index_of(name).ok(),
            Needle::Value(value) => self.vars.iter().position(|var| var == value),
        }
    }

    /// Remove the first variable matching `needle`.
    pub fn remove_matching(&mut self, needle: Needle<'_>) -> Result<CgVar> {
        match self.position(needle) {
            Some(index) => self.remove(index),
            None => Err(Error::NotFound {
                name: match needle {
                    Needle::Name(name) => name.to_string(),
                    Needle::Value(value) => value.to_string(),
                },
            }),
        }
    }

    /// Names in order; unnamed variables are skipped.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.vars.iter().filter_map(CgVar::name)
    }

    /// A new vector holding copies of the variables of `self` followed by
    /// those of `other`.
    pub fn concat(&self, other: &Cvec) -> Cvec {
        let mut vars = Vec::with_capacity(self.len() + other.len());
        vars.extend_from_slice(&self.vars);
        vars.extend_from_slice(&other.vars);
        Cvec::from(vars)
    }

    /// Append copies of the variables of `other`.
    pub fn extend_from(&mut self, other: &Cvec) {
        self.extend(other.iter().cloned());
    }

    pub fn clear(&mut self) {
        self.invalidate();
        self.vars.clear();
    }

    pub fn into_vec(self) -> Vec<CgVar> {
        self.vars
    }
}

impl From<Vec<CgVar>> for Cvec {
    fn from(vars: Vec<CgVar>) -> Self {
        Cvec {
            vars,
            by_name: OnceCell::new(),
        }
    }
}

impl From<Cvec> for Vec<CgVar> {
    fn from(cvec: Cvec) -> Self {
        cvec.vars
    }
}

impl FromIterator<CgVar> for Cvec {
    fn from_iter<I: IntoIterator<Item = CgVar>>(iter: I) -> Self {
        Cvec::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl Extend<CgVar> for Cvec {
    fn extend<I: IntoIterator<Item = CgVar>>(&mut self, iter: I) {
        self.invalidate();
        self.vars.extend(iter);
    }
}

impl IntoIterator for Cvec {
    type Item = CgVar;
    type IntoIter = std::vec::IntoIter<CgVar>;

    fn into_iter(self) -> Self::IntoIter {
        self.vars.into_iter()
    }
}

impl<'a> IntoIterator for &'a Cvec {
    type Item = &'a CgVar;
    type IntoIter = core::slice::Iter<'a, CgVar>;

    fn into_iter(self) -> Self::IntoIter {
        self.vars.iter()
    }
}

impl Add<&Cvec> for &Cvec {
    type Output = Cvec;

    fn add(self, rhs: &Cvec) -> Cvec {
        self.concat(rhs)
    }
}

/// Element-wise equality; names take part.
impl PartialEq for Cvec {
    fn eq(&self, other: &Cvec) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| a.name() == b.name() && a == b)
    }
}

impl fmt::Debug for Cvec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.vars.iter()).finish()
    }
}

#[cfg(test)]
#[path = "cvec_test.rs"]
mod cvec_test;
