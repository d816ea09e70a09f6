//! End-to-end runs of the preset scenarios.

use apf_core::{
    MoveOutcome, PointSource, Position, Robot, RunStatus, ScenarioConfig, Simulation, Trajectory,
};

fn run(cfg: ScenarioConfig) -> apf_core::RunReport {
    Simulation::from_scenario(cfg.build().expect("valid scenario")).run()
}

#[test]
fn reference_run_reaches_goal() {
    let report = run(ScenarioConfig::reference());

    assert_eq!(report.status, RunStatus::ReachedGoal);
    assert!(report.final_distance <= 0.9);
    assert_eq!(report.stalls, 0);

    // 0.8 per step over ~13.86 units of ground needs at least 18 steps
    assert!(report.steps >= 18, "steps = {}", report.steps);
    assert!(report.steps <= 30, "steps = {}", report.steps);
}

#[test]
fn reference_run_is_reproducible() {
    let a = run(ScenarioConfig::reference());
    let b = run(ScenarioConfig::reference());
    assert_eq!(a.steps, b.steps);
    assert_eq!(a.final_position, b.final_position);
    assert_eq!(a.trajectory, b.trajectory);
}

#[test]
fn every_move_gets_closer_and_cheaper() {
    let report = run(ScenarioConfig::reference());
    let goal = Position::new(18.0, 12.0);

    let mut previous_cost = None;
    for record in &report.trajectory.steps {
        assert!(record.outcome.is_moved());
        assert!(record.position.distance_to(&goal) < record.from.distance_to(&goal));
        assert!((record.from.distance_to(&record.position) - 0.8).abs() < 1e-9);
        if let Some(prev) = previous_cost {
            assert!(record.total_cost < prev);
        }
        previous_cost = Some(record.total_cost);
    }
}

#[test]
fn corridor_passes_the_gap() {
    let report = run(ScenarioConfig::corridor());
    assert!(report.reached_goal());

    // Crossing x = 10 must happen between the two obstacle columns
    let crossing = report
        .trajectory
        .steps
        .iter()
        .find(|r| r.from.x < 10.0 && r.position.x >= 10.0)
        .expect("robot crosses the obstacle columns");
    assert!(crossing.position.y > 7.0 && crossing.position.y < 13.0);
}

#[test]
fn trap_settles_in_local_minimum() {
    let mut cfg = ScenarioConfig::trap();
    cfg.driver.max_steps = Some(40);
    let report = run(cfg);

    assert_eq!(report.status, RunStatus::StepLimitReached);
    assert_eq!(report.steps, 40);

    let first_stall = report
        .trajectory
        .steps
        .iter()
        .position(|r| r.outcome == MoveOutcome::NoImprovingCandidate)
        .expect("robot stalls");
    // After the first stall nothing changes: the field is static
    for record in &report.trajectory.steps[first_stall..] {
        assert_eq!(record.outcome, MoveOutcome::NoImprovingCandidate);
        assert_eq!(record.position, report.final_position);
    }
    assert_eq!(report.stalls, 40 - first_stall);
}

#[test]
fn manual_loop_matches_driver() {
    let cfg = ScenarioConfig::reference();
    let scenario = cfg.build().unwrap();
    let goal = scenario.goal.clone();
    let obstacles: Vec<PointSource> = scenario.obstacles.clone();
    let mut robot: Robot = scenario.robot.clone();

    let mut positions = vec![robot.position()];
    while robot.distance_to(&goal) > 0.9 {
        robot.decide_next_move(&goal, &obstacles);
        robot.take_next_move();
        positions.push(robot.position());
    }

    let report = Simulation::from_scenario(scenario).run();
    assert_eq!(report.trajectory.positions(), positions);
}

#[test]
fn exports_round_trip_through_files() {
    let report = run(ScenarioConfig::reference());
    let dir = tempfile::tempdir().unwrap();

    let json_path = dir.path().join("trajectory.json");
    report.trajectory.write_json(&json_path).unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(value["steps"].as_array().unwrap().len(), report.steps);
    assert_eq!(value["start"]["x"], 5.0);

    let csv_path = dir.path().join("trajectory.csv");
    report.trajectory.write_csv(&csv_path).unwrap();
    let rows = std::fs::read_to_string(&csv_path).unwrap().lines().count();
    assert_eq!(rows, report.steps + 1);

    assert_eq!(Trajectory::new(Position::new(0.0, 0.0)).len(), 0);
}

#[test]
fn bundled_scenario_file_matches_preset() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../scenarios/reference.yaml");
    let cfg = ScenarioConfig::load(path).expect("bundled scenario parses");
    assert_eq!(cfg, ScenarioConfig::reference());
}
