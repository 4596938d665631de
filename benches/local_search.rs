use criterion::{black_box, criterion_group, criterion_main, Criterion};

use vrp_core::cost::CostEvaluator;
use vrp_core::data::{Client, Depot, ProblemData, VehicleType};
use vrp_core::matrix::Matrix;
use vrp_core::search::Driver;
use vrp_core::solution::Solution;

fn instance(n: usize) -> ProblemData {
    let depots = vec![Depot::new(0.0, 0.0)];
    let clients: Vec<Client> = (1..=n)
        .map(|i| {
            let angle = (i as f64) * 2.399963; // golden-angle spiral, avoids collinear layouts
            let radius = (i as f64).sqrt();
            Client::new(radius * angle.cos(), radius * angle.sin(), 1.0, 0.0, 0.0).unwrap()
        })
        .collect();

    let points: Vec<(f64, f64)> = std::iter::once((0.0, 0.0))
        .chain(clients.iter().map(|c| (c.x(), c.y())))
        .collect();
    let size = points.len();
    let mut grid = vec![0.0; size * size];
    for i in 0..size {
        for j in 0..size {
            let (xi, yi) = points[i];
            let (xj, yj) = points[j];
            grid[i * size + j] = ((xi - xj).powi(2) + (yi - yj).powi(2)).sqrt();
        }
    }
    let distances = Matrix::from_data(size, grid.clone()).unwrap();
    let durations = Matrix::from_data(size, grid).unwrap();
    let vehicle_types = vec![VehicleType::new(n, 100.0, 0)];
    ProblemData::new(depots, clients, distances, durations, vehicle_types).unwrap()
}

fn initial_solution(data: &ProblemData) -> Solution {
    let routes = (data.num_depots()..data.num_locations())
        .map(|loc| (0usize, vec![loc]))
        .collect();
    Solution::new(data, routes).unwrap()
}

fn bench_local_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("local_search");
    for &n in &[20usize, 50, 100] {
        let data = instance(n);
        let ce = CostEvaluator::new(1.0, 1.0);
        let solution = initial_solution(&data);
        group.bench_function(format!("n={n}"), |b| {
            b.iter(|| {
                let driver = Driver::new(&data, ce, &solution, 42, 10);
                black_box(driver.run())
            })
        });
    }
    group.finish();
}

/// S1 — the OR-Tools capacitated-VRP quick-start instance: 1 depot, 16
/// clients, 4 vehicles x capacity 15. See `tests/scenarios.rs` for the
/// literal-distance assertion this same instance backs.
fn cvrp16_instance() -> ProblemData {
    let depots = vec![Depot::new(0.0, 0.0)];
    let demands = [
        1.0, 1.0, 2.0, 4.0, 2.0, 4.0, 8.0, 8.0, 1.0, 2.0, 1.0, 2.0, 4.0, 4.0, 8.0, 8.0,
    ];
    let clients: Vec<Client> = demands
        .iter()
        .map(|&d| Client::new(0.0, 0.0, d, 0.0, 0.0).unwrap())
        .collect();

    #[rustfmt::skip]
    let matrix: [[i64; 17]; 17] = [
        [0, 548, 776, 696, 582, 274, 502, 194, 308, 194, 536, 502, 388, 354, 468, 776, 662],
        [548, 0, 684, 308, 194, 502, 730, 354, 696, 742, 1084, 594, 480, 674, 1016, 868, 1210],
        [776, 684, 0, 992, 878, 502, 274, 810, 468, 742, 400, 1278, 1164, 1130, 788, 1552, 754],
        [696, 308, 992, 0, 114, 650, 878, 502, 844, 890, 1232, 514, 628, 822, 1164, 560, 1358],
        [582, 194, 878, 114, 0, 536, 764, 388, 730, 776, 1118, 400, 514, 708, 1050, 674, 1244],
        [274, 502, 502, 650, 536, 0, 228, 308, 194, 240, 582, 776, 662, 628, 514, 1050, 708],
        [502, 730, 274, 878, 764, 228, 0, 536, 194, 468, 354, 1004, 890, 856, 514, 1278, 480],
        [194, 354, 810, 502, 388, 308, 536, 0, 342, 388, 730, 468, 354, 320, 662, 742, 856],
        [308, 696, 468, 844, 730, 194, 194, 342, 0, 274, 388, 810, 696, 662, 320, 1084, 514],
        [194, 742, 742, 890, 776, 240, 468, 388, 274, 0, 342, 536, 422, 388, 730, 810, 788],
        [536, 1084, 400, 1232, 1118, 582, 354, 730, 388, 342, 0, 878, 764, 730, 388, 1152, 308],
        [502, 594, 1278, 514, 400, 776, 1004, 468, 810, 536, 878, 0, 114, 308, 650, 274, 844],
        [388, 480, 1164, 628, 514, 662, 890, 354, 696, 422, 764, 114, 0, 194, 536, 388, 730],
        [354, 674, 1130, 822, 708, 628, 856, 320, 662, 388, 730, 308, 194, 0, 342, 422, 536],
        [468, 1016, 788, 1164, 1050, 514, 514, 662, 320, 730, 388, 650, 536, 342, 0, 764, 194],
        [776, 868, 1552, 560, 674, 1050, 1278, 742, 1084, 810, 1152, 274, 388, 422, 764, 0, 798],
        [662, 1210, 754, 1358, 1244, 708, 480, 856, 514, 788, 308, 844, 730, 536, 194, 798, 0],
    ];
    let flat: Vec<f64> = matrix.iter().flatten().map(|&v| v as f64).collect();
    let distances = Matrix::from_data(17, flat.clone()).unwrap();
    let durations = Matrix::from_data(17, flat).unwrap();
    let vehicle_types = vec![VehicleType::new(4, 15.0, 0)];
    ProblemData::new(depots, clients, distances, durations, vehicle_types).unwrap()
}

/// S2 — a VRPTW variant of the same 16-client layout: each client gets a
/// moderate time window and every vehicle a `max_duration` of 30, so the
/// driver pass has to reconcile distance improvement against feasibility
/// rather than optimize distance alone.
fn vrptw16_instance() -> ProblemData {
    let depots = vec![Depot::new(0.0, 0.0)];
    let demands = [
        1.0, 1.0, 2.0, 4.0, 2.0, 4.0, 8.0, 8.0, 1.0, 2.0, 1.0, 2.0, 4.0, 4.0, 8.0, 8.0,
    ];
    let clients: Vec<Client> = demands
        .iter()
        .enumerate()
        .map(|(i, &d)| {
            let early = (i as f64) * 1.5;
            Client::full(
                0.0,
                0.0,
                d,
                0.0,
                0.5,
                early,
                early + 12.0,
                0.0,
                0.0,
                true,
                String::new(),
            )
            .unwrap()
        })
        .collect();

    #[rustfmt::skip]
    let matrix: [[i64; 17]; 17] = [
        [0, 548, 776, 696, 582, 274, 502, 194, 308, 194, 536, 502, 388, 354, 468, 776, 662],
        [548, 0, 684, 308, 194, 502, 730, 354, 696, 742, 1084, 594, 480, 674, 1016, 868, 1210],
        [776, 684, 0, 992, 878, 502, 274, 810, 468, 742, 400, 1278, 1164, 1130, 788, 1552, 754],
        [696, 308, 992, 0, 114, 650, 878, 502, 844, 890, 1232, 514, 628, 822, 1164, 560, 1358],
        [582, 194, 878, 114, 0, 536, 764, 388, 730, 776, 1118, 400, 514, 708, 1050, 674, 1244],
        [274, 502, 502, 650, 536, 0, 228, 308, 194, 240, 582, 776, 662, 628, 514, 1050, 708],
        [502, 730, 274, 878, 764, 228, 0, 536, 194, 468, 354, 1004, 890, 856, 514, 1278, 480],
        [194, 354, 810, 502, 388, 308, 536, 0, 342, 388, 730, 468, 354, 320, 662, 742, 856],
        [308, 696, 468, 844, 730, 194, 194, 342, 0, 274, 388, 810, 696, 662, 320, 1084, 514],
        [194, 742, 742, 890, 776, 240, 468, 388, 274, 0, 342, 536, 422, 388, 730, 810, 788],
        [536, 1084, 400, 1232, 1118, 582, 354, 730, 388, 342, 0, 878, 764, 730, 388, 1152, 308],
        [502, 594, 1278, 514, 400, 776, 1004, 468, 810, 536, 878, 0, 114, 308, 650, 274, 844],
        [388, 480, 1164, 628, 514, 662, 890, 354, 696, 422, 764, 114, 0, 194, 536, 388, 730],
        [354, 674, 1130, 822, 708, 628, 856, 320, 662, 388, 730, 308, 194, 0, 342, 422, 536],
        [468, 1016, 788, 1164, 1050, 514, 514, 662, 320, 730, 388, 650, 536, 342, 0, 764, 194],
        [776, 868, 1552, 560, 674, 1050, 1278, 742, 1084, 810, 1152, 274, 388, 422, 764, 0, 798],
        [662, 1210, 754, 1358, 1244, 708, 480, 856, 514, 788, 308, 844, 730, 536, 194, 798, 0],
    ];
    // Travel times scaled down from the (distance-unit) matrix so that a
    // 30-unit shift is actually achievable across 4 clients per route.
    let flat: Vec<f64> = matrix.iter().flatten().map(|&v| v as f64 / 50.0).collect();
    let distances =
        Matrix::from_data(17, matrix.iter().flatten().map(|&v| v as f64).collect()).unwrap();
    let durations = Matrix::from_data(17, flat).unwrap();
    let vehicle_types = vec![VehicleType::new(4, 15.0, 0).with_max_duration(30.0)];
    ProblemData::new(depots, clients, distances, durations, vehicle_types).unwrap()
}

/// Splits every client into `num_vehicles` chunks, one route per vehicle,
/// so the initial solution fits within the fleet the named instances
/// actually provide (4 vehicles, 16 clients).
fn chunked_initial_solution(data: &ProblemData, num_vehicles: usize) -> Solution {
    let clients: Vec<usize> = (data.num_depots()..data.num_locations()).collect();
    let chunk_size = clients.len().div_ceil(num_vehicles);
    let routes = clients
        .chunks(chunk_size)
        .map(|chunk| (0usize, chunk.to_vec()))
        .collect();
    Solution::new(data, routes).unwrap()
}

fn bench_named_instances(c: &mut Criterion) {
    let mut group = c.benchmark_group("named_instances");

    let cvrp = cvrp16_instance();
    let ce = CostEvaluator::new(10_000.0, 10_000.0);
    let solution = chunked_initial_solution(&cvrp, 4);
    group.bench_function("s1_cvrp16", |b| {
        b.iter(|| {
            let driver = Driver::new(&cvrp, ce, &solution, 42, 16);
            black_box(driver.run())
        })
    });

    let vrptw = vrptw16_instance();
    let solution = chunked_initial_solution(&vrptw, 4);
    group.bench_function("s2_vrptw16", |b| {
        b.iter(|| {
            let driver = Driver::new(&vrptw, ce, &solution, 42, 16);
            black_box(driver.run())
        })
    });

    group.finish();
}

criterion_group!(benches, bench_local_search, bench_named_instances);
criterion_main!(benches);
