//! Canned and generated taxonomies.

use serde::Deserialize;

use crate::builder::TaxonomyBuilder;
use crate::catalog::InMemoryCatalog;

const MUSHROOMS_JSON: &str = include_str!("../data/mushrooms.json");

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogFixture {
    #[serde(default)]
    categories: Vec<NamedFixture>,
    #[serde(default)]
    characters: Vec<CharacterFixture>,
    #[serde(default)]
    traits: Vec<TraitFixture>,
    taxa: Vec<TaxonFixture>,
}

#[derive(Debug, Deserialize)]
struct NamedFixture {
    id: u64,
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CharacterFixture {
    id: u64,
    name: String,
    category_id: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TraitFixture {
    id: u64,
    label: String,
    canonical_id: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct TaxonFixture {
    id: u64,
    rank: String,
    name: String,
    #[serde(default)]
    children: Vec<u64>,
    #[serde(default)]
    observations: Vec<ObservationFixture>,
}

#[derive(Debug, Deserialize)]
struct ObservationFixture {
    character: u64,
    traits: Vec<u64>,
}

/// Load a catalog from the JSON fixture format used by `data/mushrooms.json`.
pub fn from_json(json: &str) -> Result<InMemoryCatalog, serde_json::Error> {
    let fixture: CatalogFixture = serde_json::from_str(json)?;
    let mut builder = TaxonomyBuilder::new();
    for c in &fixture.categories {
        builder = builder.category(c.id, &c.name);
    }
    for c in &fixture.characters {
        builder = builder.character(c.id, &c.name, c.category_id);
    }
    for t in &fixture.traits {
        builder = builder.alias(t.id, &t.label, t.canonical_id.unwrap_or(t.id));
    }
    for taxon in &fixture.taxa {
        builder = builder.taxon(taxon.id, &taxon.rank, &taxon.name, &taxon.children);
        for obs in &taxon.observations {
            builder = builder.observe(taxon.id, obs.character, &obs.traits);
        }
    }
    Ok(builder.build())
}

/// A two-genus mushroom taxonomy rooted at entity 1.
///
/// Genus 3 lists child 99, which does not exist.
pub fn mushrooms() -> InMemoryCatalog {
    from_json(MUSHROOMS_JSON).unwrap_or_default()
}

/// Root 1 with one child per signature (ids 2, 3, ...). Each child observes
/// character 10 (category 1) with the given trait ids.
pub fn sibling_group(signatures: &[&[u64]]) -> InMemoryCatalog {
    let children: Vec<u64> = (0..signatures.len() as u64).map(|i| i + 2).collect();
    let mut builder = TaxonomyBuilder::new()
        .category(1, "cap")
        .character(10, "cap color", 1)
        .taxon(1, "genus", "Root", &children);
    for (child, traits) in children.iter().zip(signatures) {
        builder = builder
            .taxon(*child, "species", &format!("Species {child}"), &[])
            .observe(*child, 10, traits);
    }
    builder.build()
}

/// Parameters for [`synthetic`].
#[derive(Debug, Clone, Copy)]
pub struct SyntheticSpec {
    pub branching: usize,
    pub depth: usize,
    pub characters: usize,
    pub values_per_character: usize,
    pub seed: u64,
}

impl Default for SyntheticSpec {
    fn default() -> Self {
        Self {
            branching: 4,
            depth: 3,
            characters: 6,
            values_per_character: 4,
            seed: 7,
        }
    }
}

/// Deterministic complete tree of `branching^depth` leaves rooted at entity 1.
///
/// Character `c` lives in category `c % 3 + 1` and takes values
/// `1000 * (c + 1) + v`. Roughly one observation in seven carries a second
/// value, which exercises the conflict handling in the trait resolver.
pub fn synthetic(spec: SyntheticSpec) -> InMemoryCatalog {
    let mut builder = TaxonomyBuilder::new();
    for cat in 1..=3u64 {
        builder = builder.category(cat, &format!("category {cat}"));
    }
    for c in 0..spec.characters as u64 {
        builder = builder.character(100 + c, &format!("character {c}"), c % 3 + 1);
        for v in 0..spec.values_per_character as u64 {
            let id = 1000 * (c + 1) + v;
            builder = builder.trait_value(id, &format!("value {c}.{v}"));
        }
    }

    let mut next_id = 2u64;
    let mut level = vec![1u64];
    builder = builder.taxon(1, "rank0", "Root", &[]);
    let mut parents: Vec<(u64, Vec<u64>, usize)> = Vec::new();
    for depth in 1..=spec.depth {
        let mut next_level = Vec::new();
        for parent in &level {
            let children: Vec<u64> = (0..spec.branching as u64).map(|i| next_id + i).collect();
            next_id += spec.branching as u64;
            parents.push((*parent, children.clone(), depth - 1));
            next_level.extend(children);
        }
        level = next_level;
    }

    let mut state = spec.seed.wrapping_mul(6364136223846793005).wrapping_add(1);
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };

    for (parent, children, depth) in parents {
        builder = builder.taxon(parent, &format!("rank{depth}"), &format!("Taxon {parent}"), &children);
        for child in &children {
            builder = builder.taxon(*child, &format!("rank{}", depth + 1), &format!("Taxon {child}"), &[]);
            for c in 0..spec.characters as u64 {
                if next() % 5 == 0 {
                    continue;
                }
                let values = spec.values_per_character.max(1) as u64;
                let first = 1000 * (c + 1) + next() % values;
                let mut traits = vec![first];
                if next() % 7 == 0 {
                    traits.push(1000 * (c + 1) + next() % values);
                }
                builder = builder.observe(*child, 100 + c, &traits);
            }
        }
    }
    builder.build()
}
