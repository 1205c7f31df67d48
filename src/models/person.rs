use std::collections::HashMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Person {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Membership {
    pub person: Person,
}

/// Lookup from person id to display name, built once per run.
///
/// Every person is kept in input order. When two memberships share an id
/// the first one wins lookups.
#[derive(Debug, Default, Clone)]
pub struct MembershipIndex {
    people: Vec<Person>,
    names: HashMap<u64, String>,
}

impl MembershipIndex {
    pub fn from_memberships(memberships: Vec<Membership>) -> Self {
        Self::from_people(memberships.into_iter().map(|m| m.person))
    }

    pub fn from_people<I>(people: I) -> Self
    where
        I: IntoIterator<Item = Person>,
    {
        let people: Vec<Person> = people.into_iter().collect();
        let mut names = HashMap::with_capacity(people.len());
        for person in &people {
            names.entry(person.id).or_insert_with(|| person.name.clone());
        }
        Self { people, names }
    }

    pub fn name_of(&self, id: u64) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }
}
