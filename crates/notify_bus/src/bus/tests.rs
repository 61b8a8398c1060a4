//! Tests for the notification bus dispatch behavior

use crate::message::{Envelope, MessageHandler};
use crate::types::{MessageKind, SubscriberId};
use crate::{NotifyBus, NotifyError};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoginError {
    AccountOrPwDeny,
    ServerUnreachable,
}

#[derive(Debug, Clone)]
struct LoginErrorMsg {
    error: LoginError,
}

#[derive(Debug, Clone)]
struct ShowLoginMsg;

#[derive(Debug, Clone)]
struct ScoreChangedMsg {
    delta: i64,
}

crate::declare_messages!(LoginErrorMsg, ShowLoginMsg, ScoreChangedMsg);

/// Capture buffer shared between test subscribers to assert delivery order.
type CallLog = Arc<Mutex<Vec<&'static str>>>;

fn new_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn delivery_follows_registration_order() {
    init_tracing();
    let bus = NotifyBus::new();
    let log = new_log();

    for name in ["a", "b", "c"] {
        let log = log.clone();
        bus.on::<ScoreChangedMsg, _>(SubscriberId::new(), move |_| {
            log.lock().unwrap().push(name);
            Ok(())
        })
        .unwrap();
    }

    // A subscriber for a different kind must not be invoked.
    {
        let log = log.clone();
        bus.on::<ShowLoginMsg, _>(SubscriberId::new(), move |_| {
            log.lock().unwrap().push("other-kind");
            Ok(())
        })
        .unwrap();
    }

    bus.send(ScoreChangedMsg { delta: 10 });

    assert_eq!(*log.lock().unwrap(), vec!["a", "b", "c"]);
}

#[test]
fn send_without_subscribers_is_a_noop() {
    let bus = NotifyBus::new();

    bus.send(ScoreChangedMsg { delta: -3 });

    let stats = bus.stats();
    assert_eq!(stats.messages_sent, 0);
    assert_eq!(stats.deliveries, 0);
    assert_eq!(stats.handler_failures, 0);
}

#[test]
fn off_is_idempotent() {
    let bus = NotifyBus::new();
    let subscriber = SubscriberId::new();

    // Not registered at all: a no-op, not an error.
    assert!(!bus.off::<ScoreChangedMsg>(subscriber));

    bus.on::<ScoreChangedMsg, _>(subscriber, |_| Ok(())).unwrap();
    assert!(bus.off::<ScoreChangedMsg>(subscriber));
    assert!(!bus.off::<ScoreChangedMsg>(subscriber));
    assert_eq!(bus.subscriber_count(), 0);
}

#[test]
fn failing_subscriber_does_not_block_the_rest() {
    let bus = NotifyBus::new();
    let log = new_log();

    {
        let log = log.clone();
        bus.on::<ScoreChangedMsg, _>(SubscriberId::new(), move |_| {
            log.lock().unwrap().push("a");
            Ok(())
        })
        .unwrap();
    }
    bus.on::<ScoreChangedMsg, _>(SubscriberId::new(), |_| {
        Err(NotifyError::HandlerFailed("simulated failure".to_string()))
    })
    .unwrap();
    {
        let log = log.clone();
        bus.on::<ScoreChangedMsg, _>(SubscriberId::new(), move |_| {
            log.lock().unwrap().push("c");
            Ok(())
        })
        .unwrap();
    }

    bus.send(ScoreChangedMsg { delta: 1 });

    assert_eq!(*log.lock().unwrap(), vec!["a", "c"]);
    let stats = bus.stats();
    assert_eq!(stats.deliveries, 2);
    assert_eq!(stats.handler_failures, 1);
}

#[test]
fn panicking_subscriber_does_not_block_the_rest() {
    init_tracing();
    let bus = NotifyBus::new();
    let log = new_log();

    {
        let log = log.clone();
        bus.on::<ScoreChangedMsg, _>(SubscriberId::new(), move |_| {
            log.lock().unwrap().push("a");
            Ok(())
        })
        .unwrap();
    }
    bus.on::<ScoreChangedMsg, _>(SubscriberId::new(), |_: &ScoreChangedMsg| {
        panic!("subscriber blew up");
    })
    .unwrap();
    {
        let log = log.clone();
        bus.on::<ScoreChangedMsg, _>(SubscriberId::new(), move |_| {
            log.lock().unwrap().push("c");
            Ok(())
        })
        .unwrap();
    }

    bus.send(ScoreChangedMsg { delta: 2 });

    assert_eq!(*log.lock().unwrap(), vec!["a", "c"]);
    assert_eq!(bus.stats().handler_failures, 1);
}

#[test]
fn off_all_tears_down_one_owner_only() {
    let bus = NotifyBus::new();
    let log = new_log();
    let owner = SubscriberId::new();
    let bystander = SubscriberId::new();

    {
        let log = log.clone();
        bus.on::<LoginErrorMsg, _>(owner, move |_| {
            log.lock().unwrap().push("owner-login");
            Ok(())
        })
        .unwrap();
    }
    {
        let log = log.clone();
        bus.on::<ScoreChangedMsg, _>(owner, move |_| {
            log.lock().unwrap().push("owner-score");
            Ok(())
        })
        .unwrap();
    }
    {
        let log = log.clone();
        bus.on::<ScoreChangedMsg, _>(bystander, move |_| {
            log.lock().unwrap().push("bystander-score");
            Ok(())
        })
        .unwrap();
    }

    assert_eq!(bus.off_all(owner), 2);

    bus.send(LoginErrorMsg { error: LoginError::ServerUnreachable });
    bus.send(ScoreChangedMsg { delta: 5 });

    assert_eq!(*log.lock().unwrap(), vec!["bystander-score"]);
    assert_eq!(bus.subscriber_count(), 1);
}

#[test]
fn duplicate_registration_is_rejected() {
    let bus = NotifyBus::new();
    let log = new_log();
    let subscriber = SubscriberId::new();

    {
        let log = log.clone();
        bus.on::<ScoreChangedMsg, _>(subscriber, move |_| {
            log.lock().unwrap().push("once");
            Ok(())
        })
        .unwrap();
    }
    let err = bus
        .on::<ScoreChangedMsg, _>(subscriber, |_| Ok(()))
        .unwrap_err();
    assert!(matches!(err, NotifyError::DuplicateRegistration { .. }));

    bus.send(ScoreChangedMsg { delta: 1 });

    // The rejected second registration must not cause double delivery.
    assert_eq!(*log.lock().unwrap(), vec!["once"]);
}

#[test]
fn reentrant_off_during_dispatch_skips_removed_subscriber() {
    let bus = Arc::new(NotifyBus::new());
    let log = new_log();
    let victim = SubscriberId::new();

    {
        let bus = bus.clone();
        let log = log.clone();
        bus.clone()
            .on::<ScoreChangedMsg, _>(SubscriberId::new(), move |_| {
                log.lock().unwrap().push("first");
                bus.off::<ScoreChangedMsg>(victim);
                Ok(())
            })
            .unwrap();
    }
    {
        let log = log.clone();
        bus.on::<ScoreChangedMsg, _>(victim, move |_| {
            log.lock().unwrap().push("victim");
            Ok(())
        })
        .unwrap();
    }

    bus.send(ScoreChangedMsg { delta: 1 });

    // The victim was unregistered earlier in the same pass and must not run.
    assert_eq!(*log.lock().unwrap(), vec!["first"]);

    // The next send reaches only the survivor.
    bus.send(ScoreChangedMsg { delta: 2 });
    assert_eq!(*log.lock().unwrap(), vec!["first", "first"]);
}

#[test]
fn reentrant_clear_during_dispatch_stops_the_pass() {
    let bus = Arc::new(NotifyBus::new());
    let log = new_log();

    {
        let bus = bus.clone();
        let log = log.clone();
        bus.clone()
            .on::<ShowLoginMsg, _>(SubscriberId::new(), move |_| {
                log.lock().unwrap().push("first");
                bus.clear();
                Ok(())
            })
            .unwrap();
    }
    {
        let log = log.clone();
        bus.on::<ShowLoginMsg, _>(SubscriberId::new(), move |_| {
            log.lock().unwrap().push("second");
            Ok(())
        })
        .unwrap();
    }

    bus.send(ShowLoginMsg);

    assert_eq!(*log.lock().unwrap(), vec!["first"]);
    assert_eq!(bus.subscriber_count(), 0);
}

#[test]
fn login_error_scenario_delivers_exact_payload() {
    let bus = NotifyBus::new();
    let received = Arc::new(Mutex::new(Vec::new()));

    // A hand-built handler that goes through the envelope accessor itself,
    // the way an engine-glue layer registered generically would.
    struct LogOnLogin {
        received: Arc<Mutex<Vec<LoginError>>>,
    }

    impl MessageHandler for LogOnLogin {
        fn handle(&self, envelope: &Envelope) -> Result<(), NotifyError> {
            assert!(envelope.is::<LoginErrorMsg>());
            assert!(!envelope.is::<ShowLoginMsg>());
            let msg = envelope.payload::<LoginErrorMsg>()?;
            self.received.lock().unwrap().push(msg.error);
            Ok(())
        }

        fn handler_name(&self) -> &str {
            "logOnLogin"
        }

        fn expected_kind(&self) -> MessageKind {
            MessageKind::of::<LoginErrorMsg>()
        }
    }

    bus.on_handler(
        MessageKind::of::<LoginErrorMsg>(),
        SubscriberId::new(),
        Arc::new(LogOnLogin { received: received.clone() }),
    )
    .unwrap();

    bus.send(LoginErrorMsg { error: LoginError::AccountOrPwDeny });

    assert_eq!(*received.lock().unwrap(), vec![LoginError::AccountOrPwDeny]);
}

#[test]
fn on_handler_rejects_mismatched_kind() {
    let bus = NotifyBus::new();
    let handler = Arc::new(crate::message::TypedMessageHandler::new(
        "wrong-kind".to_string(),
        |_: &ScoreChangedMsg| Ok(()),
    ));

    let err = bus
        .on_handler(MessageKind::of::<ShowLoginMsg>(), SubscriberId::new(), handler)
        .unwrap_err();

    assert!(matches!(err, NotifyError::InvalidKind { .. }));
    assert_eq!(bus.subscriber_count(), 0);
}

#[test]
fn clear_scenario_silences_all_subscribers() {
    let bus = NotifyBus::new();
    let log = new_log();

    for name in ["ui", "audio"] {
        let log = log.clone();
        bus.on::<ShowLoginMsg, _>(SubscriberId::new(), move |_| {
            log.lock().unwrap().push(name);
            Ok(())
        })
        .unwrap();
    }
    assert_eq!(bus.subscriber_count(), 2);

    bus.clear();
    bus.send(ShowLoginMsg);

    assert!(log.lock().unwrap().is_empty());
    assert_eq!(bus.subscriber_count(), 0);
    assert!(bus.registered_kinds().is_empty());
}

#[test]
fn stats_track_mixed_dispatch_outcomes() {
    let bus = NotifyBus::new();

    bus.on::<ScoreChangedMsg, _>(SubscriberId::new(), |_| Ok(())).unwrap();
    bus.on::<ScoreChangedMsg, _>(SubscriberId::new(), |_| {
        Err(NotifyError::HandlerFailed("nope".to_string()))
    })
    .unwrap();

    bus.send(ScoreChangedMsg { delta: 1 });
    bus.send(ScoreChangedMsg { delta: 2 });

    let stats = bus.stats();
    assert_eq!(stats.total_subscribers, 2);
    assert_eq!(stats.messages_sent, 2);
    assert_eq!(stats.deliveries, 2);
    assert_eq!(stats.handler_failures, 2);
}
