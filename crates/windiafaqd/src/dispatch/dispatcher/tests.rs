//! Dispatcher behaviour against mocked listeners.

use mockall::mock;
use rstest::rstest;

use super::*;
use crate::dispatch::arguments::Arg;
use crate::dispatch::errors::HandlerError;
use crate::dispatch::registry::CommandListener;
use crate::dispatch::response::ReturnData;

mock! {
    Listener {}
    impl CommandListener for Listener {
        fn run(&self, command: &Command) -> Result<ReturnData, HandlerError>;
    }
}

fn listener_replying(text: &'static str, times: usize) -> MockListener {
    let mut listener = MockListener::new();
    listener
        .expect_run()
        .times(times)
        .returning(move |_command: &Command| Ok(ReturnData::content(text)));
    listener
}

fn echo(command: &Command) -> Result<ReturnData, HandlerError> {
    Ok(ReturnData::content(command.args().string_at(0)?))
}

#[test]
fn invokes_the_matching_listener_exactly_once() {
    let mut registry = ListenerRegistry::new();
    registry.register("flame", listener_replying("flame", 1));
    registry.register("magic", listener_replying("magic", 0));
    let dispatcher = Dispatcher::new(registry);

    let command = dispatcher
        .dispatch(Command::new("flame", vec![Arg::from(160.0)]))
        .expect("dispatch succeeds");

    assert_eq!(command.result(), Some(&ReturnData::content("flame")));
}

#[test]
fn unknown_command_runs_no_listener() {
    let mut registry = ListenerRegistry::new();
    registry.register("flame", listener_replying("flame", 0));
    let dispatcher = Dispatcher::new(registry);

    let error = dispatcher
        .dispatch(Command::new("missing", Vec::new()))
        .expect_err("unknown command");

    assert!(matches!(&error, DispatchError::UnknownCommand { name } if name == "missing"));
    assert!(error.to_string().contains("missing"));
}

#[test]
fn first_registration_wins_at_dispatch_time() {
    let mut registry = ListenerRegistry::new();
    registry.register("echo", listener_replying("first", 1));
    registry.register("echo", listener_replying("second", 0));
    let dispatcher = Dispatcher::new(registry);

    let command = dispatcher
        .dispatch(Command::new("echo", Vec::new()))
        .expect("dispatch succeeds");

    assert_eq!(command.result(), Some(&ReturnData::content("first")));
}

#[test]
fn echo_listener_returns_first_argument() {
    let mut registry = ListenerRegistry::new();
    registry.register("echo", echo);
    let dispatcher = Dispatcher::new(registry);

    let command = dispatcher
        .dispatch(Command::new("echo", vec![Arg::from("hi")]))
        .expect("dispatch succeeds");

    assert_eq!(command.into_result(), Some(ReturnData::content("hi")));
}

#[rstest]
#[case::out_of_range(vec![], "argument 0 is out of range (0 supplied)")]
#[case::wrong_kind(vec![Arg::from(1.0)], "argument 0 is not a string: 1")]
fn handler_errors_propagate_unchanged(#[case] args: Vec<Arg>, #[case] message: &str) {
    let mut registry = ListenerRegistry::new();
    registry.register("echo", echo);
    let dispatcher = Dispatcher::new(registry);

    let error = dispatcher
        .dispatch(Command::new("echo", args))
        .expect_err("handler fails");

    match &error {
        DispatchError::HandlerFailed { command, source } => {
            assert_eq!(command, "echo");
            assert!(matches!(source, HandlerError::Argument(_)));
        }
        other => panic!("expected handler failure, got {other:?}"),
    }
    assert_eq!(error.to_string(), message);
}
