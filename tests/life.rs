use toroid::{Conway, Coordinate, Engine, Life, LifeRule, Topology};

fn seeded(rows: &[[u8; 3]; 3], topology: Topology) -> Life {
    let rows: Vec<Vec<bool>> = rows
        .iter()
        .map(|row| row.iter().map(|&v| v == 1).collect())
        .collect();
    Life::from_matrix(&rows, topology).unwrap()
}

fn matrix(life: &Life) -> Vec<Vec<u8>> {
    life.alive_map()
        .into_iter()
        .map(|row| row.into_iter().map(u8::from).collect())
        .collect()
}

#[test]
fn block_is_a_fixed_point() {
    let block = [[1, 1, 0], [1, 1, 0], [0, 0, 0]];
    for topology in [Topology::Torus, Topology::Bounded] {
        let life = seeded(&block, topology);
        life.advance();
        assert_eq!(matrix(&life), block);
    }
}

#[test]
fn blinker_oscillates() {
    let vertical = [[0, 1, 0], [0, 1, 0], [0, 1, 0]];
    let life = seeded(&vertical, Topology::Bounded);
    life.advance();
    assert_eq!(matrix(&life), [[0, 0, 0], [1, 1, 1], [0, 0, 0]]);
    life.advance();
    assert_eq!(matrix(&life), vertical);
}

#[test]
fn glider_translates_diagonally() {
    let glider = [(1, 1), (2, 2), (3, 2), (1, 3), (2, 3)].map(Coordinate::from);
    let life = Life::new(5, 5).unwrap();
    life.plant_seed(&glider.map(|c| (c, true))).unwrap();
    for _ in 0..4 {
        life.advance();
    }
    let mut expected: Vec<_> = glider
        .iter()
        .map(|c| Coordinate::new((c.x + 1) % 5, (c.y + 1) % 5))
        .collect();
    expected.sort_by_key(|c| (c.y, c.x));
    assert_eq!(life.alive_cells(), expected);
    assert_eq!(life.generation(), 4);
}

#[test]
fn matches_the_full_scan_engine() {
    // An asymmetric seed that runs into every edge within a few generations.
    let seed = [(0, 0), (1, 0), (2, 0), (2, 1), (1, 2), (5, 4), (6, 4), (6, 5), (0, 5)]
        .map(Coordinate::from);
    for topology in [Topology::Torus, Topology::Bounded] {
        let life = Life::with_topology(7, 6, topology).unwrap();
        let engine = Engine::new(7, 6, false)
            .unwrap()
            .with_rule(Conway::new(topology));
        for &c in &seed {
            life.revive(c).unwrap();
            engine.set(c, true).unwrap();
        }
        for _ in 0..12 {
            life.advance();
            engine.advance();
            assert_eq!(life.snapshot().map(|cell| cell.alive), engine.snapshot());
        }
    }
}

#[test]
fn high_life_differs_from_life() {
    // A dead cell with six live neighbors is only born under HighLife.
    let rows = vec![
        vec![true, true, true],
        vec![false, false, false],
        vec![true, true, true],
    ];
    let life = Life::from_matrix(&rows, Topology::Bounded).unwrap();
    let high = Life::from_matrix(&rows, Topology::Bounded)
        .unwrap()
        .with_rule("B36/S23".parse::<LifeRule>().unwrap());
    life.advance();
    high.advance();
    assert_eq!(life.is_alive(Coordinate::new(1, 1)), Ok(false));
    assert_eq!(high.is_alive(Coordinate::new(1, 1)), Ok(true));
}

#[test]
fn reset_is_idempotent() {
    let life = Life::new(4, 4).unwrap();
    life.plant_seed(&[(Coordinate::new(0, 0), true), (Coordinate::new(3, 3), true)])
        .unwrap();
    life.advance();
    life.reset();
    life.reset();
    assert_eq!(life.population(), 0);
    assert_eq!(life.generation(), 0);
    let mut coordinates = Vec::new();
    life.iterate(|c, cell| {
        assert!(!cell.alive);
        coordinates.push(c);
    });
    assert_eq!(coordinates.len(), 16);
    for c in coordinates {
        assert_eq!(life.live_neighbors(c), Ok(0));
    }
}
