use std::borrow::Borrow;

use crate::multihash::Multihash;

/// Filter over multihashes. Every option that is set must match.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// Keep only this algorithm, by name.
    pub algorithm: Option<String>,
    /// Keep only multihashes whose full hex encoding starts with this, in either case.
    pub prefix: Option<String>,
    /// Keep only multihashes strictly greater than this one.
    pub after: Option<Multihash>,
}

impl Selection {
    pub fn new() -> Self { Self::default() }

    pub fn algorithm(mut self, name: impl Into<String>) -> Self {
        self.algorithm = Some(name.into());
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn after(mut self, cursor: Multihash) -> Self {
        self.after = Some(cursor);
        self
    }

    pub fn matches(&self, mhash: &Multihash) -> bool {
        if let Some(name) = &self.algorithm {
            if mhash.algorithm_name() != name {
                return false;
            }
        }
        if let Some(prefix) = &self.prefix {
            let hex = mhash.to_hex();
            let head = hex.as_bytes().get(..prefix.len());
            if !head.is_some_and(|head| head.eq_ignore_ascii_case(prefix.as_bytes())) {
                return false;
            }
        }
        if let Some(cursor) = &self.after {
            if mhash <= cursor {
                return false;
            }
        }
        true
    }

    /// Lazily filters `multihashes`, keeping their order.
    pub fn select<'s, I>(&'s self, multihashes: I) -> impl Iterator<Item = I::Item> + 's
    where
        I: IntoIterator,
        I::IntoIter: 's,
        I::Item: Borrow<Multihash>,
    {
        multihashes.into_iter().filter(move |m| self.matches(m.borrow()))
    }
}
