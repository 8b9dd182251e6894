//! Star name generation

use rand::seq::SliceRandom;
use rand::Rng;

use crate::tables::StarNameLists;

/// Compose a star display name such as "Tau Procyon" or "Sigma Vega-412".
///
/// An empty word list contributes nothing to the name.
pub fn generate_star_name(lists: &StarNameLists, rng: &mut impl Rng) -> String {
    let designation = lists.designations.choose(rng);
    let root = lists.roots.choose(rng);
    let mut name = designation
        .into_iter()
        .chain(root)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");

    if lists.catalogue_chance > 0 && rng.gen_range(0..100u8) < lists.catalogue_chance {
        let number = rng.gen_range(1..=lists.catalogue_max.max(1));
        name = format!("{}-{}", name, number);
    }
    name
}
