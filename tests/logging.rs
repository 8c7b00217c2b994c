//! The `EVENT:` and `ACTIONS:` log lines are a compatibility surface for
//! snapshot-style tooling; these tests pin their text.

use parking_lot::Mutex;
use std::io;
use std::sync::Arc;
use tracing::Level;
use turnstile_fsm::builder::TurnstileBuilder;
use turnstile_fsm::timer::ManualScheduler;
use turnstile_fsm::turnstile::{CardPresented, FixedFare, PersonPassed, Timeout};

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl io::Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn captured(level: Level, session: impl FnOnce()) -> String {
    let capture = Capture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(level)
        .finish();

    tracing::subscriber::with_default(subscriber, session);
    capture.contents()
}

#[test]
fn events_and_transactions_are_logged() {
    let output = captured(Level::INFO, || {
        let mut turnstile = TurnstileBuilder::new()
            .scheduler(Arc::new(ManualScheduler::new()))
            .fare(Arc::new(FixedFare(5)))
            .build_local()
            .unwrap();

        turnstile.process(CardPresented::new("A")).process(Timeout);
    });

    assert!(output.contains("EVENT: CardPresented"), "{output}");
    assert!(output.contains("EVENT: Timeout"), "{output}");
    assert!(
        output.contains(
            "ACTIONS: Initiated Transaction to [Gateway1] with card [A] for amount [5]"
        ),
        "{output}"
    );
    assert!(
        output.contains(
            "ACTIONS: Initiated Transaction to [Gateway2] with card [A] for amount [5]"
        ),
        "{output}"
    );
}

#[test]
fn ignored_events_are_still_logged() {
    let output = captured(Level::INFO, || {
        let mut turnstile = TurnstileBuilder::new()
            .scheduler(Arc::new(ManualScheduler::new()))
            .build_virtual()
            .unwrap();

        turnstile.process(PersonPassed);
    });

    assert!(output.contains("EVENT: PersonPassed"), "{output}");
    assert!(!output.contains("ACTIONS:"), "{output}");
}

#[test]
fn dump_is_logged() {
    let output = captured(Level::INFO, || {
        let turnstile = TurnstileBuilder::new()
            .scheduler(Arc::new(ManualScheduler::new()))
            .build_table()
            .unwrap();

        turnstile.dump();
    });

    assert!(
        output.contains("STATE: Locked :: Door[Closed], LED: [RedCross] and PosTerminal[Touch Card, , ]"),
        "{output}"
    );
}

#[test]
fn scheduler_faults_are_logged_as_errors() {
    let output = captured(Level::ERROR, || {
        let clock = Arc::new(ManualScheduler::new());
        let mut turnstile = TurnstileBuilder::new()
            .scheduler(clock.clone())
            .build_local()
            .unwrap();
        clock.fail_next_timer();

        turnstile.process(CardPresented::new("A"));
    });

    assert!(output.contains("failed to arm timeout"), "{output}");
    assert!(!output.contains("EVENT:"), "{output}");
}
