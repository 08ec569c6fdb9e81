//! Surname-homonymy resolution
//!
//! The report records surnames only, so two real teachers sharing a
//! surname collapse into one implausibly loaded entry. Detection works
//! backwards from subject compatibility: if some plausibly-loaded
//! single person teaches both subjects A and B, then A and B can
//! belong to one person. An overloaded surname whose subjects fall
//! into two or more mutually incompatible groups is presumed to be
//! that many real people.
//!
//! Splits survive across runs: identities are matched to previously
//! persisted records by exact sorted-subject-set equality, carrying
//! manually assigned names forward. Novel splits come out unnamed and
//! wait for out-of-band assignment.

use crate::layout::LoadRules;
use crate::load::LoadBook;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Undirected subject-compatibility relation.
///
/// Edge (a, b) exists if some teacher within the single-person hour
/// threshold teaches both a and b.
#[derive(Debug, Clone, Default)]
pub struct CompatibilityGraph {
    edges: HashSet<(String, String)>,
}

impl CompatibilityGraph {
    /// Build the graph from plausibly-loaded teachers only
    pub fn build(book: &LoadBook, rules: &LoadRules) -> Self {
        let mut graph = Self::default();
        for load in book.loads() {
            if load.total_hours > rules.single_person_max_hours {
                continue;
            }
            let subjects: Vec<&str> = load.subjects().collect();
            for (i, a) in subjects.iter().enumerate() {
                for b in &subjects[i + 1..] {
                    graph.insert(a, b);
                }
            }
        }
        graph
    }

    fn insert(&mut self, a: &str, b: &str) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        self.edges.insert((lo.to_string(), hi.to_string()));
    }

    /// Whether two subjects are known to be teachable by one person
    pub fn compatible(&self, a: &str, b: &str) -> bool {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        self.edges.contains(&(lo.to_string(), hi.to_string()))
    }

    /// Number of edges
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the graph has no edges
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// One presumed real person behind a split surname
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomonymIdentity {
    /// Assigned name suffix; empty until resolved out-of-band
    #[serde(default)]
    pub name: String,
    /// Weekly hours attributed to this identity
    pub hours: u32,
    /// Sorted subjects taught by this identity
    pub subjects: Vec<String>,
}

/// A surname split into two or more identities
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomonymRecord {
    /// The shared surname
    pub surname: String,
    /// One identity per incompatible subject group
    pub identities: Vec<HomonymIdentity>,
}

/// Partition `subjects` into maximal compatibility clusters
/// (single-linkage: connected components of the graph restricted to
/// `subjects`). A subject bridging several existing groups collapses
/// them into one.
fn partition_subjects<'a>(subjects: &[&'a str], graph: &CompatibilityGraph) -> Vec<Vec<&'a str>> {
    let mut groups: Vec<Vec<&'a str>> = Vec::new();
    for subject in subjects {
        let linked: Vec<usize> = groups
            .iter()
            .enumerate()
            .filter(|(_, group)| group.iter().any(|other| graph.compatible(subject, other)))
            .map(|(i, _)| i)
            .collect();
        match linked.split_first() {
            None => groups.push(vec![subject]),
            Some((&first, rest)) => {
                groups[first].push(subject);
                // Back to front so removals keep earlier indices valid
                for &i in rest.iter().rev() {
                    let absorbed = groups.remove(i);
                    groups[first].extend(absorbed);
                }
            }
        }
    }
    groups
}

/// Detect homonym surnames and split them into identities, carrying
/// previously assigned names forward.
///
/// Prior records whose surname no longer appears, or whose subject
/// sets no longer match, are dropped silently.
pub fn resolve_homonyms(
    book: &LoadBook,
    prior: &[HomonymRecord],
    rules: &LoadRules,
) -> Vec<HomonymRecord> {
    let graph = CompatibilityGraph::build(book, rules);
    let mut records = Vec::new();

    for load in book.loads() {
        if load.total_hours <= rules.single_person_max_hours {
            continue;
        }
        let subjects: Vec<&str> = load.subjects().collect();
        let groups = partition_subjects(&subjects, &graph);
        if groups.len() < 2 {
            continue;
        }

        let identities = groups
            .into_iter()
            .map(|group| {
                let mut subjects: Vec<String> =
                    group.iter().map(|s| (*s).to_string()).collect();
                subjects.sort();
                let hours = subjects
                    .iter()
                    .map(|s| load.subject_hours.get(s).copied().unwrap_or(0))
                    .sum();
                let name = prior_name(prior, &load.teacher, &subjects);
                HomonymIdentity {
                    name,
                    hours,
                    subjects,
                }
            })
            .collect();

        records.push(HomonymRecord {
            surname: load.teacher.clone(),
            identities,
        });
    }

    records
}

/// Look up the previously assigned name for an identity, matched by
/// surname and exact sorted-subject-set equality.
fn prior_name(prior: &[HomonymRecord], surname: &str, subjects: &[String]) -> String {
    prior
        .iter()
        .filter(|record| record.surname == surname)
        .flat_map(|record| record.identities.iter())
        .find(|identity| identity.subjects == subjects)
        .map(|identity| identity.name.clone())
        .unwrap_or_default()
}
