//! Property-based tests for the session state machine
//!
//! These tests verify key invariants hold across arbitrary event sequences.

use super::*;
use proptest::prelude::*;

fn test_context() -> SessionContext {
    SessionContext::new("test-bot", "test-user", "fallback")
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        "[a-zA-Z ]{0,20}".prop_map(|text| Event::UserSubmit { text }),
        "[a-zA-Z ]{0,20}".prop_map(|output| Event::BotReply { output }),
        "[a-z ]{0,20}".prop_map(|reason| Event::BotFailure { reason }),
    ]
}

fn arb_status() -> impl Strategy<Value = SessionStatus> {
    prop_oneof![Just(SessionStatus::Idle), Just(SessionStatus::AwaitingResponse)]
}

/// Replay accepted transitions, tracking the transcript they would build
fn replay(events: Vec<Event>) -> (SessionStatus, Vec<Sender>, usize) {
    let ctx = test_context();
    let mut state = SessionStatus::Idle;
    let mut senders = Vec::new();
    let mut sends = 0;

    for event in events {
        if let Ok(result) = transition(&state, &ctx, event) {
            state = result.new_state;
            for effect in result.effects {
                match effect {
                    Effect::AppendMessage { sender, .. } => senders.push(sender),
                    Effect::SendToChatbot { .. } => sends += 1,
                    Effect::ClearDraft | Effect::NotifyStatus { .. } => {}
                }
            }
        }
    }
    (state, senders, sends)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    // Transcript alternates user/bot; a dangling user turn means a request is pending
    #[test]
    fn prop_transcript_alternates(events in proptest::collection::vec(arb_event(), 0..30)) {
        let (state, senders, sends) = replay(events);

        for (i, sender) in senders.iter().enumerate() {
            let expected = if i % 2 == 0 { Sender::User } else { Sender::Bot };
            prop_assert_eq!(*sender, expected, "out of order at {}: {:?}", i, senders);
        }

        let users = senders.iter().filter(|s| **s == Sender::User).count();
        prop_assert_eq!(users, sends);
        prop_assert_eq!(state.is_busy(), senders.len() % 2 == 1);
    }

    // At most one request is ever outstanding
    #[test]
    fn prop_single_request_in_flight(events in proptest::collection::vec(arb_event(), 0..30)) {
        let ctx = test_context();
        let mut state = SessionStatus::Idle;
        let mut outstanding = 0u32;

        for event in events {
            let resolves = matches!(event, Event::BotReply { .. } | Event::BotFailure { .. });
            if let Ok(result) = transition(&state, &ctx, event) {
                let sent = result
                    .effects
                    .iter()
                    .any(|e| matches!(e, Effect::SendToChatbot { .. }));
                if sent {
                    outstanding += 1;
                }
                if resolves {
                    outstanding -= 1;
                }
                state = result.new_state;
                prop_assert!(outstanding <= 1);
            }
        }
    }

    // Any resolution of a pending request lands back in Idle
    #[test]
    fn prop_resolution_always_idles(
        text in "[a-z]{1,10}",
        resolution in prop_oneof![
            "[a-z]{0,10}".prop_map(|output| Event::BotReply { output }),
            "[a-z]{0,10}".prop_map(|reason| Event::BotFailure { reason }),
        ],
    ) {
        let ctx = test_context();
        let pending = transition(&SessionStatus::Idle, &ctx, Event::UserSubmit { text }).unwrap();
        prop_assert_eq!(pending.new_state, SessionStatus::AwaitingResponse);

        let done = transition(&pending.new_state, &ctx, resolution).unwrap();
        let back_to_idle = Effect::notify_status(SessionStatus::Idle);
        prop_assert_eq!(done.new_state, SessionStatus::Idle);
        prop_assert_eq!(done.effects.last(), Some(&back_to_idle));
    }

    // Transition is deterministic
    #[test]
    fn prop_transition_is_pure(state in arb_status(), event in arb_event()) {
        let ctx = test_context();
        let a = transition(&state, &ctx, event.clone());
        let b = transition(&state, &ctx, event);
        match (a, b) {
            (Ok(a), Ok(b)) => {
                prop_assert_eq!(a.new_state, b.new_state);
                prop_assert_eq!(a.effects, b.effects);
            }
            (Err(a), Err(b)) => prop_assert_eq!(a, b),
            _ => prop_assert!(false, "results diverged"),
        }
    }
}
