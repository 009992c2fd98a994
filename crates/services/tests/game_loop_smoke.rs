use std::sync::Arc;
use std::time::Duration;

use services::{
    Clock, GameRunner, GameSession, IdentityShuffler, Intent, QuestionBank, SessionSnapshot,
    SilentCue, ToneCue,
};
use tokio::sync::watch;
use trivia_core::model::{GameSettings, Question, QuestionId, RoundPhase, RoundResult};

fn build_question(id: u64) -> Question {
    Question::new(
        QuestionId::new(id),
        format!("Reverse the letters #{id}"),
        ["A", "B", "C", "D"],
        ["D", "C", "B", "A"],
    )
    .unwrap()
}

fn build_session(n: u64) -> GameSession {
    let bank = QuestionBank::new((1..=n).map(build_question).collect());
    GameSession::start(&bank, &GameSettings::default(), Box::new(IdentityShuffler))
}

async fn wait_for(
    snapshots: &mut watch::Receiver<SessionSnapshot>,
    predicate: impl FnMut(&SessionSnapshot) -> bool,
) -> SessionSnapshot {
    snapshots.wait_for(predicate).await.unwrap().clone()
}

fn toggle(label: &str) -> Intent {
    Intent::Toggle(label.to_string())
}

#[tokio::test(start_paused = true)]
async fn correct_answer_before_expiry_scores() {
    let (runner, mut handle) = GameRunner::new(build_session(1), Arc::new(SilentCue), Clock::system());
    let task = tokio::spawn(runner.run());

    handle.intents.send(Intent::StartRound).await.unwrap();
    wait_for(&mut handle.snapshots, |s| s.phase == RoundPhase::AwaitingInput).await;
    for label in ["D", "C", "B", "A"] {
        handle.intents.send(toggle(label)).await.unwrap();
    }
    handle.intents.send(Intent::Submit).await.unwrap();

    let submitted = wait_for(&mut handle.snapshots, |s| s.phase == RoundPhase::Submitted).await;
    assert_eq!(submitted.score, 1);
    assert_eq!(submitted.results.len(), 1);
    assert_eq!(submitted.results[0].result(), RoundResult::Correct);
    let round = submitted.round.unwrap();
    assert_eq!(round.selection, ["D", "C", "B", "A"]);
    assert!(round.correct_order.is_none());

    // No stale countdown may fire after the manual submission.
    tokio::time::sleep(Duration::from_secs(30)).await;
    let after = handle.snapshots.borrow().clone();
    assert_eq!(after.results.len(), 1);
    assert_eq!(after.round.unwrap().remaining_secs, round.remaining_secs);

    handle.intents.send(Intent::Advance).await.unwrap();
    let session = task.await.unwrap();
    assert!(session.is_complete());
    assert_eq!(session.final_score().unwrap().to_string(), "1/1");
}

#[tokio::test(start_paused = true)]
async fn expiry_submits_partial_selection_once() {
    let (runner, mut handle) = GameRunner::new(build_session(1), Arc::new(SilentCue), Clock::system());
    let task = tokio::spawn(runner.run());

    handle.intents.send(Intent::StartRound).await.unwrap();
    wait_for(&mut handle.snapshots, |s| s.phase == RoundPhase::AwaitingInput).await;
    let started = tokio::time::Instant::now();
    handle.intents.send(toggle("D")).await.unwrap();
    handle.intents.send(toggle("C")).await.unwrap();

    let submitted = wait_for(&mut handle.snapshots, |s| s.phase == RoundPhase::Submitted).await;
    assert!(started.elapsed() >= Duration::from_secs(10));
    assert_eq!(submitted.score, 0);
    assert_eq!(submitted.results.len(), 1);
    assert_eq!(submitted.results[0].result(), RoundResult::Incorrect);
    assert_eq!(submitted.results[0].elapsed_label(), "10.000");
    let round = submitted.round.unwrap();
    assert_eq!(round.selection, ["D", "C"]);
    assert_eq!(round.elapsed_secs, Some(10.0));
    assert_eq!(round.remaining_secs, 0);
    assert_eq!(round.correct_order.unwrap(), ["D", "C", "B", "A"]);

    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(handle.snapshots.borrow().results.len(), 1);

    handle.intents.send(Intent::Submit).await.unwrap();
    handle.intents.send(Intent::Advance).await.unwrap();
    let session = task.await.unwrap();
    assert_eq!(session.results().len(), 1);
    assert_eq!(session.final_score().unwrap().to_string(), "0/1");
}

#[tokio::test(start_paused = true)]
async fn submit_records_time_since_input_opened() {
    let (runner, mut handle) = GameRunner::new(build_session(1), Arc::new(SilentCue), Clock::system());
    let task = tokio::spawn(runner.run());

    handle.intents.send(Intent::StartRound).await.unwrap();
    wait_for(&mut handle.snapshots, |s| s.phase == RoundPhase::AwaitingInput).await;
    for label in ["D", "C", "B", "A"] {
        handle.intents.send(toggle(label)).await.unwrap();
    }
    tokio::time::sleep(Duration::from_millis(4_250)).await;
    handle.intents.send(Intent::Submit).await.unwrap();

    let submitted = wait_for(&mut handle.snapshots, |s| s.phase == RoundPhase::Submitted).await;
    assert_eq!(submitted.results[0].result(), RoundResult::Correct);
    assert_eq!(submitted.results[0].elapsed_label(), "4.250");
    assert_eq!(submitted.round.unwrap().remaining_secs, 6);

    handle.intents.send(Intent::Advance).await.unwrap();
    let session = task.await.unwrap();
    assert_eq!(session.results()[0].elapsed_secs(), 4.25);
}

#[tokio::test(start_paused = true)]
async fn stalled_countdown_resumes_one_second_per_tick() {
    let (runner, mut handle) = GameRunner::new(build_session(1), Arc::new(SilentCue), Clock::system());
    let task = tokio::spawn(runner.run());

    handle.intents.send(Intent::StartRound).await.unwrap();
    wait_for(&mut handle.snapshots, |s| s.phase == RoundPhase::AwaitingInput).await;

    // Jump past three deadlines without letting the runner poll in between.
    tokio::time::advance(Duration::from_millis(3_500)).await;
    tokio::time::sleep(Duration::from_millis(250)).await;
    let late = handle.snapshots.borrow().clone();
    assert_eq!(late.round.unwrap().remaining_secs, 9);

    tokio::time::sleep(Duration::from_secs(1)).await;
    let next = handle.snapshots.borrow().clone();
    assert_eq!(next.round.unwrap().remaining_secs, 8);

    handle.intents.send(Intent::Quit).await.unwrap();
    task.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn countdown_waits_for_the_intro_cue() {
    let cue = ToneCue::from_settings(&GameSettings::default());
    let cue_length = cue.duration();
    let (runner, mut handle) = GameRunner::new(build_session(2), Arc::new(cue), Clock::system());
    let task = tokio::spawn(runner.run());

    let before = tokio::time::Instant::now();
    handle.intents.send(Intent::StartRound).await.unwrap();
    // Arrives while the cue plays and must not reach the selection.
    handle.intents.send(toggle("A")).await.unwrap();

    let open = wait_for(&mut handle.snapshots, |s| s.phase == RoundPhase::AwaitingInput).await;
    assert!(before.elapsed() >= cue_length);
    let round = open.round.unwrap();
    assert!(round.selection.is_empty());
    assert_eq!(round.remaining_secs, 10);
    assert_eq!(open.progress.question_number, 1);

    handle.intents.send(Intent::Submit).await.unwrap();
    wait_for(&mut handle.snapshots, |s| s.phase == RoundPhase::Submitted).await;
    handle.intents.send(Intent::Advance).await.unwrap();
    let between = wait_for(&mut handle.snapshots, |s| s.phase == RoundPhase::Completed).await;
    assert_eq!(between.progress.question_number, 2);
    assert!(!between.is_complete());

    handle.intents.send(Intent::StartRound).await.unwrap();
    wait_for(&mut handle.snapshots, |s| s.phase == RoundPhase::AwaitingInput).await;
    for label in ["D", "C", "B", "A"] {
        handle.intents.send(toggle(label)).await.unwrap();
    }
    handle.intents.send(Intent::Submit).await.unwrap();
    wait_for(&mut handle.snapshots, |s| s.phase == RoundPhase::Submitted).await;
    handle.intents.send(Intent::Advance).await.unwrap();

    let session = task.await.unwrap();
    let last = handle.snapshots.borrow().clone();
    assert!(last.is_complete());
    assert_eq!(last.final_score.unwrap().to_string(), "1/2");
    assert_eq!(session.results().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_intents_abandons_the_round() {
    let (runner, mut handle) = GameRunner::new(build_session(1), Arc::new(SilentCue), Clock::system());
    let task = tokio::spawn(runner.run());

    handle.intents.send(Intent::StartRound).await.unwrap();
    wait_for(&mut handle.snapshots, |s| s.phase == RoundPhase::AwaitingInput).await;
    drop(handle.intents);

    let session = task.await.unwrap();
    assert!(!session.is_complete());
    assert!(!session.is_timer_running());
    assert!(session.results().is_empty());
    assert_eq!(session.phase(), RoundPhase::Idle);
}

#[tokio::test(start_paused = true)]
async fn quit_intent_stops_the_runner() {
    let (runner, handle) = GameRunner::new(build_session(3), Arc::new(SilentCue), Clock::system());
    let task = tokio::spawn(runner.run());

    handle.intents.send(Intent::Quit).await.unwrap();
    let session = task.await.unwrap();
    assert!(!session.is_complete());
    assert!(session.final_score().is_none());
}

#[tokio::test]
async fn empty_catalog_finishes_immediately() {
    let (runner, handle) = GameRunner::new(build_session(0), Arc::new(SilentCue), Clock::system());
    let session = runner.run().await;

    assert!(session.is_complete());
    let snapshot = handle.snapshots.borrow().clone();
    assert_eq!(snapshot.final_score.unwrap().to_string(), "0/0");
    assert!(snapshot.round.is_none());
}
