use chrono::{TimeZone, Utc};
use rps_engine::*;

fn classic_easy() -> Settings {
    Settings { mode: Mode::Classic, difficulty: Difficulty::Easy, tournament: None }
}

#[test]
fn test_scissors_into_rock() {
    // a 0.0 draw makes the easy opponent throw rock
    let mut game = GameSession::new(classic_easy(), SequenceRng::new(vec![0.0]));
    let result = game
        .play(PlayerMove::new(Choice::Scissors, Mode::Classic, Difficulty::Easy))
        .unwrap();

    assert_eq!(result.computer_choice, Choice::Rock);
    assert_eq!(result.outcome, Outcome::Lose);
    let state = &result.match_state;
    assert_eq!(state.scores(), Scores { player: 0, computer: 1, draws: 0 });
    assert_eq!(state.current_streak(), -1);
    assert_eq!(state.worst_streak(), -1);
}

#[test]
fn test_best_of_three_decided_in_two() {
    let settings = Settings { tournament: Some(TournamentConfig::new(3).unwrap()), ..classic_easy() };
    let mut game = GameSession::new(settings, SequenceRng::new(vec![0.0]));

    let r1 = game.play_choice(Choice::Paper).unwrap();
    assert_eq!(r1.outcome, Outcome::Win);
    assert_eq!(r1.series, Some(SeriesStatus::InProgress));

    let r2 = game.play_choice(Choice::Paper).unwrap();
    assert_eq!(r2.outcome, Outcome::Win);
    assert_eq!(r2.series, Some(SeriesStatus::PlayerWon));
    assert_eq!(status(game.state(), &TournamentConfig::new(3).unwrap()), SeriesStatus::PlayerWon);
}

#[test]
fn test_medium_counters_favourite() {
    let rules = RuleSet::for_mode(Mode::Classic);
    let mut freq = ChoiceCounts::new();
    for _ in 0..5 {
        freq.increment(Choice::Rock);
    }
    freq.increment(Choice::Paper);

    for draw in [0.7, 0.85, 0.999] {
        let mut window = MoveWindow::new();
        let mut rng = SequenceRng::new(vec![draw]);
        let c = choose(Choice::Rock, Difficulty::Medium, &rules, &freq, &mut window, &mut rng).unwrap();
        assert_eq!(c, Choice::Paper, "draw {draw}");
    }
}

#[test]
fn test_hard_reads_repeated_paper() {
    let freq = ChoiceCounts::new();

    let classic = RuleSet::for_mode(Mode::Classic);
    let mut window = MoveWindow::new();
    window.push(Choice::Paper);
    window.push(Choice::Paper);
    let mut rng = SequenceRng::new(vec![0.0, 0.0]);
    let c = choose(Choice::Paper, Difficulty::Hard, &classic, &freq, &mut window, &mut rng).unwrap();
    assert_eq!(c, Choice::Scissors);

    let extended = RuleSet::for_mode(Mode::Extended);
    for counter_draw in [0.0, 0.5, 0.99] {
        let mut window = MoveWindow::new();
        window.push(Choice::Paper);
        window.push(Choice::Paper);
        let mut rng = SequenceRng::new(vec![0.1, counter_draw]);
        let c = choose(Choice::Paper, Difficulty::Hard, &extended, &freq, &mut window, &mut rng).unwrap();
        assert!(
            [Choice::Scissors, Choice::Lizard].contains(&c),
            "{c} does not beat paper"
        );
        assert!(extended.defeats(c, Choice::Paper).unwrap());
    }
}

#[test]
fn test_lizard_rejected_in_classic() {
    let mut game = GameSession::seeded(classic_easy(), 3);
    game.play_choice(Choice::Rock).unwrap();
    let before = game.state().clone();

    let err = game
        .play(PlayerMove::new(Choice::Lizard, Mode::Classic, Difficulty::Hard))
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidChoice { .. }));
    assert_eq!(game.state(), &before);
}

#[test]
fn test_mode_switch_mid_session() {
    let mut game = GameSession::seeded(Settings::default(), 5);
    for _ in 0..4 {
        game.play(PlayerMove::new(Choice::Spock, Mode::Extended, Difficulty::Hard)).unwrap();
    }
    // stale spock history must not break classic play
    for _ in 0..4 {
        let r = game.play(PlayerMove::new(Choice::Rock, Mode::Classic, Difficulty::Hard)).unwrap();
        assert!(Mode::Classic.allows(r.computer_choice));
    }
    assert_eq!(game.state().current_round(), 8);
}

#[test]
fn test_hard_opponent_punishes_repetition() {
    let settings = Settings { mode: Mode::Classic, difficulty: Difficulty::Hard, tournament: None };
    let mut game = GameSession::seeded(settings, 2024);
    for _ in 0..50 {
        game.play_choice(Choice::Rock).unwrap();
    }
    let scores = game.state().scores();
    // after round one every decision counters rock
    assert!(scores.computer >= 49, "{scores:?}");
}

#[test]
fn test_export_after_session() {
    let mut game = GameSession::new(classic_easy(), SequenceRng::new(vec![0.0, 0.5, 0.9]));
    let t0 = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
    for (i, choice) in [Choice::Rock, Choice::Rock, Choice::Rock].into_iter().enumerate() {
        let at = t0 + chrono::Duration::seconds(i as i64);
        game.play_at(PlayerMove::new(choice, Mode::Classic, Difficulty::Easy), at).unwrap();
    }

    let csv = game.export_csv().unwrap();
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(lines[0], CSV_HEADER.join(","));
    assert_eq!(lines[1], "1,rock,rock,draw,2025-01-02T03:04:05.000Z");
    assert_eq!(lines[2], "2,rock,paper,lose,2025-01-02T03:04:06.000Z");
    assert_eq!(lines[3], "3,rock,scissors,win,2025-01-02T03:04:07.000Z");

    let parsed = parse_json(&game.export_json().unwrap()).unwrap();
    assert_eq!(parsed, game.state().history());
}

#[test]
fn test_restore_resumes_play() {
    let mut game = GameSession::seeded(Settings::default(), 8);
    for choice in [Choice::Rock, Choice::Paper, Choice::Scissors] {
        game.play_choice(choice).unwrap();
    }
    let saved = game.snapshot().unwrap();
    let finished = game.into_state();
    assert_eq!(serialize(&finished).unwrap(), saved);

    let state = restore(&saved).unwrap();
    assert_eq!(state, finished);
    let mut resumed = GameSession::with_state(Settings::default(), state, SeededRng::from_u64(8));
    let r = resumed.play_choice(Choice::Rock).unwrap();
    assert_eq!(r.match_state.current_round(), 4);
    assert_eq!(r.match_state.history().len(), 4);
}

#[test]
fn test_summary_reflects_rounds() {
    let mut game = GameSession::new(classic_easy(), SequenceRng::new(vec![0.0]));
    game.play_choice(Choice::Paper).unwrap();
    game.play_choice(Choice::Paper).unwrap();
    game.play_choice(Choice::Scissors).unwrap();
    game.play_choice(Choice::Rock).unwrap();

    let summary = game.summary();
    assert_eq!(summary.total_games, 4);
    assert_eq!(summary.win_rate, 50);
    assert_eq!(summary.best_streak, 2);
    assert_eq!(summary.worst_streak, 1);
    assert_eq!(summary.current_streak, 0);
    assert_eq!(summary.computer_choices[0], (Choice::Rock, 4));
}
