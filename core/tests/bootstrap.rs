//! End-to-end tests of the bootstrap surface: one environment, one fake host
//! port, all three shims riding the same cooperative scheduler.

mod common;

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use serde_json::json;
use tokio::task::LocalSet;
use weft_core::{Chunk, Environment, HostError};

use common::FakePort;

#[tokio::test]
async fn environment_wires_all_three_shims_to_one_port() {
    let port = FakePort::new(vec![FakePort::chunk(&["first"]), Ok(Chunk::Eof)]);
    let log = port.print_log();
    let mut env = Environment::new(port);

    let mut stdin = env.take_stdin().expect("fresh environment has stdin");
    assert_eq!(stdin.next().await, Ok(Some("first".to_string())));
    assert_eq!(stdin.next().await, Ok(None));

    env.console().log(&[json!("out")]);
    env.console().error(&[json!("err")]);
    assert_eq!(
        log.entries(),
        vec![("out\n".to_string(), false), ("err\n".to_string(), true)]
    );
}

#[tokio::test]
async fn stdin_is_yielded_exactly_once() {
    let mut env = Environment::new(FakePort::new(vec![]));
    assert!(env.take_stdin().is_some());
    assert!(env.take_stdin().is_none(), "the sequence is not restartable");
}

#[tokio::test]
async fn echo_loop_preserves_line_order_across_chunks() {
    let port = FakePort::new(vec![
        FakePort::chunk(&["a", "b"]),
        FakePort::chunk(&["c"]),
        Ok(Chunk::Eof),
    ]);
    let log = port.print_log();
    let mut env = Environment::new(port);

    let mut stdin = env.take_stdin().expect("stdin");
    while let Some(line) = stdin.next().await.expect("scripted port cannot fail") {
        env.console().log(&[json!(line)]);
    }

    let texts: Vec<String> = log.entries().into_iter().map(|(text, _)| text).collect();
    assert_eq!(texts, vec!["a\n", "b\n", "c\n"]);
}

#[tokio::test(start_paused = true)]
async fn timers_and_line_pulls_interleave_on_one_thread() {
    LocalSet::new()
        .run_until(async {
            let port = FakePort::new(vec![FakePort::chunk(&["line"]), Ok(Chunk::Eof)]);
            let mut env = Environment::new(port);

            let fired = Rc::new(Cell::new(false));
            let flag = Rc::clone(&fired);
            env.timers().set_timeout(move || flag.set(true), 10);

            let mut stdin = env.take_stdin().expect("stdin");
            assert_eq!(stdin.next().await, Ok(Some("line".to_string())));

            tokio::time::advance(Duration::from_millis(10)).await;
            for _ in 0..8 {
                tokio::task::yield_now().await;
            }
            assert!(fired.get());

            // The timer firing does not disturb the line sequence.
            assert_eq!(stdin.next().await, Ok(None));
        })
        .await;
}

#[tokio::test]
async fn read_failure_leaves_console_usable() {
    let port = FakePort::new(vec![Err(HostError::new("read_chunk", "stdin detached"))]);
    let log = port.print_log();
    let mut env = Environment::new(port);

    let mut stdin = env.take_stdin().expect("stdin");
    assert!(stdin.next().await.is_err());

    // A host failure aborts only the awaiting call site.
    env.console().log(&[json!("still alive")]);
    assert_eq!(log.entries(), vec![("still alive\n".to_string(), false)]);
}
