//! Delivering assembled programs through a scripted controller.

use insta::assert_snapshot;
use sudoplot_config::PlotterConfig;
use sudoplot_device::{
    BUSY_WAIT, MAX_SILENT_POLLS, POLL_INTERVAL, SessionConfig, SessionError, SessionEvent,
    Transcript,
};
use sudoplot_engine::{RunError, build_program, load_resources, send_program};
use sudoplot_types::InstructionStream;

use crate::common::{FakeClock, Recorder, ScriptedTransport};

fn default_program() -> InstructionStream {
    let config = PlotterConfig {
        puzzle: Some(0),
        ..PlotterConfig::default()
    };
    let resources = load_resources(&config).unwrap();
    build_program(&config, &resources, |_| 0).unwrap().instructions
}

#[test]
fn full_program_sends_every_command_line_once() {
    let program = default_program();
    let commands: Vec<String> = program
        .iter()
        .filter(|instruction| !instruction.is_protocol_noop())
        .map(|instruction| instruction.text())
        .collect();

    let (transport, wire) = ScriptedTransport::acking();
    let mut clock = FakeClock::default();
    let mut recorder = Recorder::default();
    let report = send_program(
        &program,
        transport,
        &mut clock,
        SessionConfig::default(),
        &mut recorder,
    )
    .unwrap();

    let wire = wire.borrow();
    assert_eq!(wire.sent_lines(), commands);
    assert!(wire.written.iter().all(|line| line.ends_with("\r\n")));
    assert_eq!(report.acknowledged, commands.len());
    assert_eq!(report.skipped, program.len() - commands.len());
    assert_eq!(report.resends, 0);
    assert_eq!(wire.cycles, 1);
    assert!(wire.closed && wire.dropped);
    assert_eq!(clock.total(), POLL_INTERVAL * commands.len() as u32);
}

#[test]
fn busy_and_rejection_mid_program() {
    let program = InstructionStream::from_lines(["; home", "G28", "G90", "M106 S70.0"]);
    let (transport, wire) = ScriptedTransport::new(&[
        "busy:processing\r\n",
        "ok 0\r\n",
        "",
        "error 2\r\n",
        "ok 0\r\n",
        "echo: pen\r\nok 0\r\n",
    ]);
    let mut clock = FakeClock::default();
    let mut recorder = Recorder::default();
    let report = send_program(
        &program,
        transport,
        &mut clock,
        SessionConfig::default(),
        &mut recorder,
    )
    .unwrap();

    assert_eq!(
        wire.borrow().sent_lines(),
        vec!["G28", "G90", "G90", "M106 S70.0"]
    );
    assert_eq!(report.transmissions, 4);
    assert_eq!(report.resends, 1);
    assert_eq!(report.busy_waits, 1);
    assert_eq!(report.skipped, 1);
    assert!(clock.slept.contains(&BUSY_WAIT));
    assert!(recorder.events.contains(&SessionEvent::Busy { index: 1 }));
}

#[test]
fn timeout_abandons_rest_of_program() {
    let program = InstructionStream::from_lines(["G28", "G90", "G1 X10 Y10"]);
    let mut replies = vec!["ok 0\r\n"];
    replies.extend(std::iter::repeat_n("", MAX_SILENT_POLLS as usize));
    let (transport, wire) = ScriptedTransport::new(&replies);
    let mut clock = FakeClock::default();
    let mut recorder = Recorder::default();

    let err = send_program(
        &program,
        transport,
        &mut clock,
        SessionConfig::default(),
        &mut recorder,
    )
    .unwrap_err();

    match &err {
        RunError::Session(SessionError::Timeout { index, line, polls }) => {
            assert_eq!(*index, 1);
            assert_eq!(line, "G90");
            assert_eq!(*polls, MAX_SILENT_POLLS);
        }
        other => panic!("expected timeout, got {other:?}"),
    }
    assert_eq!(err.exit_code(), 5);

    let wire = wire.borrow();
    assert_eq!(wire.sent_lines(), vec!["G28", "G90"]);
    assert!(wire.closed && wire.dropped);
    assert_eq!(
        recorder.events.last(),
        Some(&SessionEvent::TimedOut { index: 1 })
    );
}

#[test]
fn write_failure_releases_transport() {
    let program = InstructionStream::from_lines(["G28", "G90", "G1 X10 Y10"]);
    let (transport, wire) = ScriptedTransport::acking();
    wire.borrow_mut().fail_send = Some(1);
    let mut clock = FakeClock::default();
    let mut recorder = Recorder::default();

    let err = send_program(
        &program,
        transport,
        &mut clock,
        SessionConfig::default(),
        &mut recorder,
    )
    .unwrap_err();

    match &err {
        RunError::Session(SessionError::Transport { index, source, .. }) => {
            assert_eq!(*index, 1);
            assert_eq!(source.kind(), std::io::ErrorKind::BrokenPipe);
        }
        other => panic!("expected transport failure, got {other:?}"),
    }
    assert_eq!(err.exit_code(), 6);

    let wire = wire.borrow();
    assert_eq!(wire.sent_lines(), vec!["G28"]);
    assert!(wire.closed && wire.dropped);
    assert!(!recorder.events.contains(&SessionEvent::Sent {
        index: 1,
        line: "G90".to_string()
    }));
}

#[test]
fn transcript_of_a_short_run() {
    let program = InstructionStream::from_lines(["; start", "G28", "M106 S170.0"]);
    let (transport, _wire) = ScriptedTransport::new(&[
        "busy:processing\r\n",
        "ok 0\r\n",
        "error 1\r\n",
        "ok 0\r\n",
    ]);
    let mut clock = FakeClock::default();
    let mut transcript = Transcript::new(Vec::new());
    send_program(
        &program,
        transport,
        &mut clock,
        SessionConfig::default(),
        &mut transcript,
    )
    .unwrap();

    assert_snapshot!(String::from_utf8(transcript.into_inner()).unwrap(), @r"
    << G28
    >> busy:processing
    Waiting
    >> ok 0
    << M106 S170.0
    >> error 1
    Resending line 2 (attempt 1)
    << M106 S170.0
    >> ok 0
    ");
}
