//! `RelocateStar`: for a pair of routes, evaluates every single-client
//! relocation in both directions and keeps the best, amortising the
//! granular-neighbour scan across a whole route pair.

use crate::cost::CostEvaluator;
use crate::data::ProblemData;
use crate::operators::Exchange;
use crate::search::SearchRoute;

/// Which route a winning relocation moves a client out of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    R1ToR2,
    R2ToR1,
}

#[derive(Debug, Clone, Copy)]
pub struct RelocateMove {
    pub direction: Direction,
    pub from_pos: usize,
    pub to_pos: usize,
    pub delta: f64,
}

pub struct RelocateStar;

impl RelocateStar {
    /// Scans every relocation of a single client between `r1` and `r2`,
    /// returning the most improving one (or `None` if no move improves).
    pub fn best_move(
        data: &ProblemData,
        ce: &CostEvaluator,
        r1: &SearchRoute,
        r2: &SearchRoute,
    ) -> Option<RelocateMove> {
        let mut best: Option<RelocateMove> = None;

        for from_pos in 1..=r1.size() {
            for to_pos in 1..=r2.size() + 1 {
                if let Some(delta) =
                    Exchange::<1, 0>::evaluate(data, ce, r1, from_pos, r2, to_pos, false)
                {
                    if delta < -1e-9 && best.is_none_or(|b| delta < b.delta) {
                        best = Some(RelocateMove {
                            direction: Direction::R1ToR2,
                            from_pos,
                            to_pos,
                            delta,
                        });
                    }
                }
            }
        }

        for from_pos in 1..=r2.size() {
            for to_pos in 1..=r1.size() + 1 {
                if let Some(delta) =
                    Exchange::<1, 0>::evaluate(data, ce, r2, from_pos, r1, to_pos, false)
                {
                    if delta < -1e-9 && best.is_none_or(|b| delta < b.delta) {
                        best = Some(RelocateMove {
                            direction: Direction::R2ToR1,
                            from_pos,
                            to_pos,
                            delta,
                        });
                    }
                }
            }
        }

        best
    }

    /// Applies a move returned by [`RelocateStar::best_move`].
    pub fn apply(mv: &RelocateMove, r1: &mut SearchRoute, r2: &mut SearchRoute) {
        match mv.direction {
            Direction::R1ToR2 => Exchange::<1, 0>::apply(r1, mv.from_pos, r2, mv.to_pos),
            Direction::R2ToR1 => Exchange::<1, 0>::apply(r2, mv.from_pos, r1, mv.to_pos),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Client, Depot, ProblemData, VehicleType};
    use crate::matrix::Matrix;

    fn data() -> ProblemData {
        let depots = vec![Depot::new(0.0, 0.0)];
        // Client 3 sits much closer to route 2's clients than to route 1's.
        let clients = vec![
            Client::new(1.0, 0.0, 1.0, 0.0, 0.0).unwrap(),
            Client::new(2.0, 0.0, 1.0, 0.0, 0.0).unwrap(),
            Client::new(50.0, 0.0, 1.0, 0.0, 0.0).unwrap(),
            Client::new(51.0, 0.0, 1.0, 0.0, 0.0).unwrap(),
            Client::new(52.0, 0.0, 1.0, 0.0, 0.0).unwrap(),
        ];
        let n = 6;
        let coords = [0.0f64, 1.0, 2.0, 50.0, 51.0, 52.0];
        let mut grid = vec![0.0f64; n * n];
        for i in 0..n {
            for j in 0..n {
                grid[i * n + j] = (coords[i] - coords[j]).abs();
            }
        }
        let distances = Matrix::from_data(n, grid.clone()).unwrap();
        let durations = Matrix::from_data(n, grid).unwrap();
        let vts = vec![VehicleType::new(2, 100.0, 0)];
        ProblemData::new(depots, clients, distances, durations, vts).unwrap()
    }

    #[test]
    fn finds_improving_relocation_across_routes() {
        let data = data();
        let ce = CostEvaluator::new(1.0, 1.0);
        // Location 3 (client index 2 -> loc 3, since 1 depot) misplaced in r1.
        let r1 = SearchRoute::new(&data, 0, vec![1, 3]);
        let r2 = SearchRoute::new(&data, 0, vec![4, 5]);
        let mv = RelocateStar::best_move(&data, &ce, &r1, &r2).expect("an improving move exists");
        assert_eq!(mv.direction, Direction::R1ToR2);
    }

    #[test]
    fn returns_none_when_already_optimal() {
        // Two tight clusters on opposite sides of the depot: no single
        // relocation between them can pay for the detour it introduces.
        let depots = vec![Depot::new(0.0, 0.0)];
        let clients = vec![
            Client::new(-1.0, 0.0, 1.0, 0.0, 0.0).unwrap(),
            Client::new(-1.0, 1.0, 1.0, 0.0, 0.0).unwrap(),
            Client::new(10.0, 10.0, 1.0, 0.0, 0.0).unwrap(),
            Client::new(10.0, 11.0, 1.0, 0.0, 0.0).unwrap(),
            Client::new(11.0, 10.0, 1.0, 0.0, 0.0).unwrap(),
        ];
        let pts: [(f64, f64); 6] = [
            (0.0, 0.0),
            (-1.0, 0.0),
            (-1.0, 1.0),
            (10.0, 10.0),
            (10.0, 11.0),
            (11.0, 10.0),
        ];
        let n = pts.len();
        let mut grid = vec![0.0f64; n * n];
        for i in 0..n {
            for j in 0..n {
                let (xi, yi) = pts[i];
                let (xj, yj) = pts[j];
                grid[i * n + j] = ((xi - xj).powi(2) + (yi - yj).powi(2)).sqrt();
            }
        }
        let distances = Matrix::from_data(n, grid.clone()).unwrap();
        let durations = Matrix::from_data(n, grid).unwrap();
        let vts = vec![VehicleType::new(2, 100.0, 0)];
        let data = ProblemData::new(depots, clients, distances, durations, vts).unwrap();

        let ce = CostEvaluator::new(1.0, 1.0);
        let r1 = SearchRoute::new(&data, 0, vec![1, 2]);
        let r2 = SearchRoute::new(&data, 0, vec![3, 4, 5]);
        assert!(RelocateStar::best_move(&data, &ce, &r1, &r2).is_none());
    }
}
