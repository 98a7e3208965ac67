//! Core data structures for the memory graph

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

fn entity_tag() -> String {
    "entity".to_string()
}

fn relation_tag() -> String {
    "relation".to_string()
}

/// A named node in the memory graph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Entity {
    /// Discriminator for consumers that merge node and edge lists.
    #[serde(rename = "type", default = "entity_tag")]
    pub kind: String,
    pub name: String,
    #[serde(rename = "entityType")]
    pub entity_type: String,
    #[serde(default)]
    pub observations: Vec<String>,
}

impl Entity {
    pub fn new(
        name: impl Into<String>,
        entity_type: impl Into<String>,
        observations: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Entity {
            kind: entity_tag(),
            name: name.into(),
            entity_type: entity_type.into(),
            observations: observations.into_iter().map(Into::into).collect(),
        }
    }
}

/// A directed, typed edge between two entity names.
///
/// `from`/`to` are not required to name entities in the same graph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Relation {
    #[serde(rename = "type", default = "relation_tag")]
    pub kind: String,
    #[serde(alias = "from_")]
    pub from: String,
    pub to: String,
    #[serde(rename = "relationType")]
    pub relation_type: String,
}

impl Relation {
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        relation_type: impl Into<String>,
    ) -> Self {
        Relation {
            kind: relation_tag(),
            from: from.into(),
            to: to.into(),
            relation_type: relation_type.into(),
        }
    }

    /// The endpoint opposite `name`, if this relation touches it.
    ///
    /// Outgoing wins over incoming, so a self-relation yields `name` itself.
    pub fn other_end(&self, name: &str) -> Option<&str> {
        if self.from == name {
            Some(&self.to)
        } else if self.to == name {
            Some(&self.from)
        } else {
            None
        }
    }
}

/// The full set of entities and relations at a point in time.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MemoryGraph {
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub relations: Vec<Relation>,
}

impl MemoryGraph {
    pub fn new(entities: Vec<Entity>, relations: Vec<Relation>) -> Self {
        MemoryGraph { entities, relations }
    }

    /// Find an entity by exact name.
    pub fn find_entity(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name == name)
    }

    /// First entity name that occurs more than once, if any.
    pub fn duplicate_entity_name(&self) -> Option<&str> {
        let mut seen = HashSet::with_capacity(self.entities.len());
        self.entities
            .iter()
            .map(|e| e.name.as_str())
            .find(|name| !seen.insert(*name))
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn relation_count(&self) -> usize {
        self.relations.len()
    }
}

/// One entity together with the names of everything it is connected to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntityDetail {
    pub name: String,
    #[serde(rename = "entityType")]
    pub entity_type: String,
    pub observations: Vec<String>,
    /// Sorted, de-duplicated.
    #[serde(rename = "relatedEntities", default)]
    pub related_entities: Vec<String>,
}
