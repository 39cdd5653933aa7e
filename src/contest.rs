// Contest resolution: find every pair of agents in contact and convert the loser.
//
// Kinds are overwritten in place while the scan runs, so a conversion made for
// pair (i, j) is visible to every later pair. Pairs are always evaluated in
// (i ascending, j ascending, j > i) order; both scan strategies below produce
// exactly that order and therefore exactly the same outcome.

use crate::agent::{Agent, Population};
use crate::kind::{Side, contest};
use bevy::math::Vec2;

/// How candidate pairs are enumerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanStrategy {
    /// Test every unordered pair.
    BruteForce,
    /// Bucket agents into contact-radius cells and test only neighbouring cells.
    #[default]
    Grid,
}

/// Applies the cyclic dominance rule to every pair in contact.
#[derive(Debug, Clone)]
pub struct ContestResolver {
    contact_radius: f32,
    strategy: ScanStrategy,
    grid: SpatialHashGrid,
    candidates: Vec<u32>,
}

impl ContestResolver {
    pub fn new(contact_radius: f32, strategy: ScanStrategy) -> Self {
        Self {
            contact_radius,
            strategy,
            grid: SpatialHashGrid::new(contact_radius),
            candidates: Vec::new(),
        }
    }

    pub fn contact_radius(&self) -> f32 {
        self.contact_radius
    }

    pub fn strategy(&self) -> ScanStrategy {
        self.strategy
    }

    /// Run one resolution pass. Returns how many kind overwrites happened.
    ///
    /// Never touches position or velocity.
    pub fn resolve(&mut self, population: &mut Population) -> usize {
        match self.strategy {
            ScanStrategy::BruteForce => self.resolve_brute_force(population.agents_mut()),
            ScanStrategy::Grid => self.resolve_grid(population.agents_mut()),
        }
    }

    fn resolve_brute_force(&self, agents: &mut [Agent]) -> usize {
        let radius_sq = self.contact_radius * self.contact_radius;
        let mut conversions = 0;
        for i in 0..agents.len() {
            for j in (i + 1)..agents.len() {
                if convert_pair(agents, i, j, radius_sq) {
                    conversions += 1;
                }
            }
        }
        conversions
    }

    fn resolve_grid(&mut self, agents: &mut [Agent]) -> usize {
        let radius_sq = self.contact_radius * self.contact_radius;
        self.grid.rebuild(agents.iter().map(|agent| agent.position));

        let mut conversions = 0;
        for i in 0..agents.len() {
            self.candidates.clear();
            let candidates = &mut self.candidates;
            self.grid.for_each_near(agents[i].position, |j| {
                if j as usize > i {
                    candidates.push(j);
                }
            });
            // Buckets come back in hash order and may share entries, so
            // restore global index order and drop repeats.
            self.candidates.sort_unstable();
            self.candidates.dedup();

            for &j in &self.candidates {
                if convert_pair(agents, i, j as usize, radius_sq) {
                    conversions += 1;
                }
            }
        }
        conversions
    }
}

/// Evaluate one pair against the current (possibly already converted) kinds.
fn convert_pair(agents: &mut [Agent], i: usize, j: usize, radius_sq: f32) -> bool {
    let (first, second) = (agents[i], agents[j]);
    if first.kind == second.kind {
        return false;
    }
    if first.position.distance_squared(second.position) >= radius_sq {
        return false;
    }
    match contest(first.kind, second.kind) {
        Some(Side::First) => {
            agents[i].kind = second.kind;
            true
        }
        Some(Side::Second) => {
            agents[j].kind = first.kind;
            true
        }
        None => false,
    }
}

/// Spatial hash over contact-radius cells.
///
/// The bucket table is a power of two at least twice the agent count, so its
/// size depends on the population only, never on the arena extent or the
/// radius. Cells that hash to the same bucket share it; queries therefore
/// return a superset of the true neighbours and may repeat an index.
///
/// Rebuilt from scratch every pass with a counting sort: count per bucket,
/// prefix-sum into offsets, then scatter indices in ascending order.
#[derive(Debug, Clone)]
pub struct SpatialHashGrid {
    cell_size: f32,
    mask: usize,
    shift: u32,
    counts: Vec<u32>,
    offsets: Vec<u32>,
    data: Vec<u32>,
}

impl SpatialHashGrid {
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            mask: 0,
            shift: 64,
            counts: Vec::new(),
            offsets: Vec::new(),
            data: Vec::new(),
        }
    }

    /// Number of buckets currently allocated.
    pub fn table_size(&self) -> usize {
        self.counts.len()
    }

    fn cell_of(&self, position: Vec2) -> (i64, i64) {
        // Float to int casts saturate, so huge or non-finite coordinates stay defined.
        let cx = (position.x / self.cell_size).floor() as i64;
        let cy = (position.y / self.cell_size).floor() as i64;
        (cx, cy)
    }

    /// Fibonacci hashing of the cell coordinates.
    fn bucket(&self, cx: i64, cy: i64) -> usize {
        let key = (cx as u64).wrapping_mul(2654435761) ^ (cy as u64).wrapping_mul(2246822519);
        if self.shift >= 64 {
            return 0;
        }
        (key.wrapping_mul(11400714819323198485) >> self.shift) as usize & self.mask
    }

    pub fn rebuild(&mut self, positions: impl Iterator<Item = Vec2> + Clone) {
        let total = positions.clone().count();
        let table_size = (total * 2).max(16).next_power_of_two();
        if table_size != self.counts.len() {
            self.counts = vec![0; table_size];
            self.offsets = vec![0; table_size];
            self.mask = table_size - 1;
            self.shift = 64 - table_size.trailing_zeros();
        }

        // Count agents per bucket.
        self.counts.iter_mut().for_each(|count| *count = 0);
        for position in positions.clone() {
            let (cx, cy) = self.cell_of(position);
            let bucket = self.bucket(cx, cy);
            self.counts[bucket] += 1;
        }

        // Prefix sum into bucket offsets.
        let mut running = 0u32;
        for bucket in 0..table_size {
            self.offsets[bucket] = running;
            running += self.counts[bucket];
        }

        // Scatter indices; counts double as cursors.
        self.data.clear();
        self.data.resize(total, 0);
        self.counts.iter_mut().for_each(|count| *count = 0);
        for (index, position) in positions.enumerate() {
            let (cx, cy) = self.cell_of(position);
            let bucket = self.bucket(cx, cy);
            let slot = (self.offsets[bucket] + self.counts[bucket]) as usize;
            self.data[slot] = index as u32;
            self.counts[bucket] += 1;
        }
    }

    /// Visit every index stored in the buckets of the 3×3 cells around `position`.
    ///
    /// This is a filter: callers still need the exact distance test and must
    /// tolerate repeated indices.
    pub fn for_each_near(&self, position: Vec2, mut visit: impl FnMut(u32)) {
        if self.data.is_empty() {
            return;
        }
        let (cx, cy) = self.cell_of(position);
        for dy in -1..=1 {
            for dx in -1..=1 {
                let bucket = self.bucket(cx.saturating_add(dx), cy.saturating_add(dy));
                let start = self.offsets[bucket] as usize;
                let end = start + self.counts[bucket] as usize;
                for &index in &self.data[start..end] {
                    visit(index);
                }
            }
        }
    }
}
