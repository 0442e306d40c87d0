use std::collections::BTreeMap;

/// A bond between two atoms, addressed by their 1-based serial numbers.
///
/// `order` is the integer bond type exactly as read from the connection table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bond {
    pub atom1: usize,
    pub atom2: usize,
    pub order: i64,
}

impl Bond {
    pub fn new(atom1: usize, atom2: usize, order: i64) -> Self {
        Self {
            atom1,
            atom2,
            order,
        }
    }

    /// Number of times each atom lists the other in a `CONECT` record.
    ///
    /// A bond of order *k* contributes *k* entries; zero and negative orders contribute none.
    pub fn multiplicity(&self) -> usize {
        usize::try_from(self.order).unwrap_or(0)
    }
}

/// One partner repeated `count` times in a neighbor list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    partner: usize,
    count: usize,
}

/// Per-atom neighbor lists in the shape required by PDB `CONECT` records.
///
/// A bond of multiplicity *k* lists the partner *k* times. Lists keep bond declaration
/// order, and atoms iterate in ascending index. Repeats are stored as runs, so a large bond
/// order costs one entry rather than one per repetition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NeighborMap {
    neighbors: BTreeMap<usize, Vec<Run>>,
}

fn push_run(runs: &mut Vec<Run>, partner: usize, count: usize) {
    if count == 0 {
        return;
    }
    match runs.last_mut() {
        Some(last) if last.partner == partner => last.count = last.count.saturating_add(count),
        _ => runs.push(Run { partner, count }),
    }
}

fn expand(runs: &[Run]) -> impl Iterator<Item = usize> + '_ {
    runs.iter()
        .flat_map(|run| std::iter::repeat_n(run.partner, run.count))
}

impl NeighborMap {
    /// Builds the symmetric neighbor lists of `bonds`.
    ///
    /// Every atom named by a bond gets an entry, even when the bond contributes no
    /// repetitions.
    pub fn from_bonds(bonds: &[Bond]) -> Self {
        let mut neighbors: BTreeMap<usize, Vec<Run>> = BTreeMap::new();
        for bond in bonds {
            let k = bond.multiplicity();
            push_run(neighbors.entry(bond.atom1).or_default(), bond.atom2, k);
            push_run(neighbors.entry(bond.atom2).or_default(), bond.atom1, k);
        }
        Self { neighbors }
    }

    /// Appends partners to the list of `atom`, as read from a `CONECT` record.
    ///
    /// Repeated records for the same atom accumulate, matching PDB continuation lines.
    pub fn extend_atom(&mut self, atom: usize, partners: impl IntoIterator<Item = usize>) {
        let runs = self.neighbors.entry(atom).or_default();
        for partner in partners {
            push_run(runs, partner, 1);
        }
    }

    /// Partners of `atom` in listing order, duplicates included. Empty for unknown atoms.
    pub fn partners(&self, atom: usize) -> impl Iterator<Item = usize> + '_ {
        expand(self.neighbors.get(&atom).map_or(&[][..], Vec::as_slice))
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, impl Iterator<Item = usize> + '_)> + '_ {
        self.neighbors
            .iter()
            .map(|(&atom, runs)| (atom, expand(runs)))
    }

    /// Number of atoms with a `CONECT` entry.
    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partners(map: &NeighborMap, atom: usize) -> Vec<usize> {
        map.partners(atom).collect()
    }

    #[test]
    fn multiplicity_follows_integer_order() {
        assert_eq!(Bond::new(1, 2, 1).multiplicity(), 1);
        assert_eq!(Bond::new(1, 2, 3).multiplicity(), 3);
        assert_eq!(Bond::new(1, 2, 4).multiplicity(), 4);
        assert_eq!(Bond::new(1, 2, 8).multiplicity(), 8);
        assert_eq!(Bond::new(1, 2, 0).multiplicity(), 0);
        assert_eq!(Bond::new(1, 2, -2).multiplicity(), 0);
    }

    #[test]
    fn neighbor_map_duplicates_partners_by_bond_order() {
        let bonds = vec![Bond::new(1, 2, 2), Bond::new(2, 3, 3)];
        let map = NeighborMap::from_bonds(&bonds);

        assert_eq!(partners(&map, 1), vec![2, 2]);
        assert_eq!(partners(&map, 2), vec![1, 1, 3, 3, 3]);
        assert_eq!(partners(&map, 3), vec![2, 2, 2]);
    }

    #[test]
    fn orders_above_three_are_listed_that_many_times() {
        let map = NeighborMap::from_bonds(&[Bond::new(1, 2, 4), Bond::new(2, 3, 5)]);
        assert_eq!(partners(&map, 1), vec![2; 4]);
        assert_eq!(partners(&map, 3), vec![2; 5]);
        assert_eq!(partners(&map, 2), vec![1, 1, 1, 1, 3, 3, 3, 3, 3]);
    }

    #[test]
    fn large_orders_are_stored_without_expansion() {
        let map = NeighborMap::from_bonds(&[Bond::new(1, 2, 1 << 40)]);
        assert_eq!(map.partners(1).take(3).collect::<Vec<_>>(), vec![2, 2, 2]);
        assert_eq!(map.neighbors[&1].len(), 1);
    }

    #[test]
    fn zero_order_bond_keeps_empty_entries() {
        let map = NeighborMap::from_bonds(&[Bond::new(1, 2, 0)]);
        assert_eq!(map.len(), 2);
        assert!(partners(&map, 1).is_empty());
        assert!(partners(&map, 2).is_empty());
    }

    #[test]
    fn neighbor_map_preserves_declaration_order_across_partners() {
        let bonds = vec![Bond::new(1, 4, 1), Bond::new(3, 1, 1), Bond::new(1, 2, 2)];
        let map = NeighborMap::from_bonds(&bonds);
        assert_eq!(partners(&map, 1), vec![4, 3, 2, 2]);
    }

    #[test]
    fn neighbor_map_iterates_in_ascending_atom_order_and_skips_isolated_atoms() {
        let bonds = vec![Bond::new(5, 2, 1), Bond::new(4, 2, 1)];
        let map = NeighborMap::from_bonds(&bonds);
        let atoms: Vec<usize> = map.iter().map(|(atom, _)| atom).collect();
        assert_eq!(atoms, vec![2, 4, 5]);
        assert_eq!(map.len(), 3);
        assert!(partners(&map, 1).is_empty());
    }

    #[test]
    fn extend_atom_accumulates_continuation_records() {
        let mut map = NeighborMap::default();
        map.extend_atom(1, [2, 3, 4, 5]);
        map.extend_atom(1, [6]);
        map.extend_atom(2, [1]);
        assert_eq!(partners(&map, 1), vec![2, 3, 4, 5, 6]);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn listed_duplicates_equal_bond_derived_runs() {
        let mut read_back = NeighborMap::default();
        read_back.extend_atom(1, [2, 2]);
        read_back.extend_atom(2, [1, 1]);
        assert_eq!(read_back, NeighborMap::from_bonds(&[Bond::new(1, 2, 2)]));
    }

    #[test]
    fn neighbor_map_from_no_bonds_is_empty() {
        let map = NeighborMap::from_bonds(&[]);
        assert!(map.is_empty());
        assert_eq!(map.iter().count(), 0);
    }
}
