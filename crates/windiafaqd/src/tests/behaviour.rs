//! Behavioural tests for the daemon bootstrap sequence.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

use crate::bootstrap::BootstrapError;

use super::support::{self, HealthEvent, TestWorld};

#[fixture]
fn world() -> RefCell<TestWorld> {
    support::world()
}

#[given("a healthy configuration loader")]
fn given_healthy_loader(world: &RefCell<TestWorld>) {
    world.borrow_mut().use_successful_loader();
}

#[given("a failing configuration loader")]
fn given_failing_loader(world: &RefCell<TestWorld>) {
    world.borrow_mut().use_failing_loader();
}

#[given("a configuration pointing at a corrupt FAQ store")]
fn given_corrupt_store(world: &RefCell<TestWorld>) {
    world.borrow_mut().use_corrupt_store_loader();
}

#[when("the daemon bootstrap runs")]
fn when_bootstrap_runs(world: &RefCell<TestWorld>) {
    world.borrow_mut().bootstrap();
}

#[then("bootstrap succeeds")]
fn then_bootstrap_succeeds(world: &RefCell<TestWorld>) {
    let world = world.borrow();
    assert!(
        world.bootstrap_error().is_none(),
        "bootstrap error: {:?}",
        world.bootstrap_error()
    );
    assert!(
        world.daemon().is_some(),
        "daemon should have been initialised"
    );
}

#[then("bootstrap fails")]
fn then_bootstrap_fails(world: &RefCell<TestWorld>) {
    let world = world.borrow();
    assert!(
        world.bootstrap_error().is_some(),
        "bootstrap succeeded unexpectedly"
    );
}

#[then("the failure names the {stage} stage")]
fn then_failure_stage(world: &RefCell<TestWorld>, stage: String) -> Result<(), String> {
    let world = world.borrow();
    let error = world
        .bootstrap_error()
        .ok_or_else(|| "bootstrap did not fail".to_owned())?;
    let matched = match stage.as_str() {
        "configuration" => matches!(error, BootstrapError::Configuration { .. }),
        "store" => matches!(error, BootstrapError::Store { .. }),
        "telemetry" => matches!(error, BootstrapError::Telemetry { .. }),
        other => return Err(format!("unknown bootstrap stage '{other}'")),
    };
    if matched {
        Ok(())
    } else {
        Err(format!("expected a {stage} failure, got {error:?}"))
    }
}

#[then("the listeners {names} are registered")]
fn then_listeners_registered(world: &RefCell<TestWorld>, names: String) -> Result<(), String> {
    let world = world.borrow();
    let daemon = world
        .daemon()
        .ok_or_else(|| "daemon was not bootstrapped".to_owned())?;
    let expected: Vec<&str> = names.trim_matches('"').split_whitespace().collect();
    let registered = daemon.dispatcher().registry().names();
    if registered == expected {
        Ok(())
    } else {
        Err(format!("expected {expected:?}, registered {registered:?}"))
    }
}

#[then("the reporter recorded bootstrap start")]
fn then_reporter_start(world: &RefCell<TestWorld>) {
    assert!(
        world
            .borrow()
            .reporter
            .events()
            .first()
            .is_some_and(|event| *event == HealthEvent::BootstrapStarting),
        "bootstrap start event missing"
    );
}

#[then("the reporter recorded bootstrap success")]
fn then_reporter_success(world: &RefCell<TestWorld>) {
    let events = world.borrow().reporter.events();
    let succeeded = events
        .iter()
        .any(|event| matches!(event, HealthEvent::BootstrapSucceeded(_)));
    assert!(succeeded, "bootstrap success event missing: {events:?}");
}

#[then("the reporter recorded bootstrap failure")]
fn then_reporter_failure(world: &RefCell<TestWorld>) {
    let events = world.borrow().reporter.events();
    let failed = events
        .iter()
        .any(|event| matches!(event, HealthEvent::BootstrapFailed(_)));
    assert!(failed, "bootstrap failure event missing: {events:?}");
}

#[scenario(
    path = "tests/features/daemon_bootstrap.feature",
    name = "Healthy configuration registers every listener"
)]
fn healthy_bootstrap(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/daemon_bootstrap.feature",
    name = "Invalid configuration stops bootstrap"
)]
fn invalid_configuration(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/daemon_bootstrap.feature",
    name = "Unreadable FAQ store stops bootstrap"
)]
fn unreadable_store(world: RefCell<TestWorld>) {
    drop(world);
}
