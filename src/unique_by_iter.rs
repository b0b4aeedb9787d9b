use std::collections::HashSet;

use crate::{EntityId, Identified};

/// An iterator adapter that keeps the first item seen for every entity id.
pub struct UniqueById<I> {
    iter: I,
    seen: HashSet<EntityId>,
}

impl<I> Iterator for UniqueById<I>
where
    I: Iterator,
    I::Item: Identified,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        for item in &mut self.iter {
            if self.seen.insert(*item.entity_id()) {
                return Some(item);
            }
        }
        None
    }
}

pub trait UniqueByIdExt: Iterator {
    fn unique_by_id(self) -> UniqueById<Self>
    where
        Self: Sized,
        Self::Item: Identified,
    {
        UniqueById {
            iter: self,
            seen: HashSet::new(),
        }
    }
}

impl<I: Iterator> UniqueByIdExt for I {}
