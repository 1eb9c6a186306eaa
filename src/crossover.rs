//! Ordered crossover that cuts only at team boundaries.

use crate::genome::Genome;
use crate::layout::TeamLayout;
use rand::Rng;

/// Perform ordered crossover between two parents, cutting a run of whole
/// teams from the first parent. The crossover window never splits a team
/// mid-roster.
pub fn crossover<R: Rng>(mom: &Genome, dad: &Genome, layout: &TeamLayout, rng: &mut R) -> Genome {
    // Pick the window in team space: an end boundary, then a start before it.
    let end_team = rng.gen_range(1..=layout.num_teams());
    let start_team = rng.gen_range(0..end_team);
    crossover_between(mom, dad, layout, start_team, end_team)
}

/// Ordered crossover with an explicit window, spanning teams
/// `start_team..end_team`. The child takes the first parent's window
/// verbatim and fills every other position with the second parent's
/// remaining students in their original relative order.
pub fn crossover_between(
    mom: &Genome,
    dad: &Genome,
    layout: &TeamLayout,
    start_team: usize,
    end_team: usize,
) -> Genome {
    let start = layout.offset(start_team);
    let end = layout.offset(end_team);
    let size = mom.len();

    // Mark the students inside the window taken from the first parent.
    let mut in_window = vec![false; size];
    for &student in &mom.as_slice()[start..end] {
        in_window[student] = true;
    }

    // Second parent's students outside the window, keeping their order.
    let mut kept = dad
        .as_slice()
        .iter()
        .copied()
        .filter(|&student| !in_window[student]);

    let mut order = Vec::with_capacity(size);
    order.extend(kept.by_ref().take(start));
    order.extend_from_slice(&mom.as_slice()[start..end]);
    order.extend(kept);
    debug_assert_eq!(order.len(), size);

    Genome::from_order(order)
}
