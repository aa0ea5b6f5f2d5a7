//! Store Set data structure

use ahash::AHashSet;
use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StoreSet {
    members: AHashSet<String>,
}

impl StoreSet {
    pub fn new() -> Self {
        StoreSet {
            members: AHashSet::new(),
        }
    }

    /// Returns true if the member was not already present.
    pub fn add(&mut self, member: String) -> bool {
        self.members.insert(member)
    }

    pub fn remove(&mut self, member: &str) -> bool {
        self.members.remove(member)
    }

    pub fn contains(&self, member: &str) -> bool {
        self.members.contains(member)
    }

    /// Members in sorted order. Sorting keeps seeded sampling reproducible,
    /// since hash iteration order is not.
    pub fn members(&self) -> Vec<String> {
        let mut members: Vec<String> = self.members.iter().cloned().collect();
        members.sort_unstable();
        members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.members.iter()
    }

    /// SPOP: remove and return a random member.
    pub fn pop<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<String> {
        let member = self.members().choose(rng).cloned()?;
        let removed = self.members.remove(&member);
        debug_assert!(removed, "Postcondition violated: popped member must have been present");
        Some(member)
    }

    /// SRANDMEMBER with count.
    ///
    /// `count >= 0`: up to `count` distinct members. `count < 0`: exactly
    /// `|count|` draws, repeats allowed.
    pub fn sample<R: Rng + ?Sized>(&self, count: i64, rng: &mut R) -> Vec<String> {
        let members = self.members();
        if members.is_empty() {
            return Vec::new();
        }
        if count >= 0 {
            let take = (count as usize).min(members.len());
            let out: Vec<String> = members.choose_multiple(rng, take).cloned().collect();
            debug_assert_eq!(out.len(), take, "Postcondition violated: distinct sample size");
            out
        } else {
            (0..count.unsigned_abs())
                .map(|_| members[rng.gen_range(0..members.len())].clone())
                .collect()
        }
    }
}
