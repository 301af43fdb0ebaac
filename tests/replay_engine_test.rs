use casino_audit::{
    Action, ActionKind, BetOutcome, Match, MatchRegistry, Outcome, Player, ReplayEngine,
    ReplayEngineBuilder, ReportBuilder, RuleSet, Side, StandardRules, ValidationError, Verdict,
};
use proptest::prelude::*;

fn registry() -> MatchRegistry {
    MatchRegistry::new(vec![
        Match::new("m0", 2.0, 1.5, Outcome::Won(Side::A)),
        Match::new("m1", 1.3, 3.7, Outcome::Won(Side::B)),
        Match::new("m2", 1.9, 1.9, Outcome::Draw),
        Match::new("m3", 0.45, 1.05, Outcome::Won(Side::A)),
        Match::new("m4", 1.01, 9.99, Outcome::Won(Side::B)),
    ])
}

// Helper to create an arbitrary action; "m5" is never registered
fn arbitrary_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        (0i64..300).prop_map(Action::deposit),
        (-5i64..300).prop_map(Action::withdraw),
        (0usize..6, -5i64..300, any::<bool>()).prop_map(|(m, amount, a)| {
            Action::bet(format!("m{}", m), amount, if a { Side::A } else { Side::B })
        }),
    ]
}

fn arbitrary_player() -> impl Strategy<Value = Player> {
    ("[a-z]{1,6}", prop::collection::vec(arbitrary_action(), 0..30))
        .prop_map(|(id, actions)| Player::new(id, actions))
}

#[test]
fn test_deposit_then_winning_bet() {
    let engine = ReplayEngine::standard(registry());
    let player = Player::new("p1", vec![Action::deposit(100), Action::bet("m0", 50, Side::A)]);

    let result = engine.replay(&player);
    assert!(result.is_compliant());
    // a win credits amount * rate on top of the kept stake, so 200 rather
    // than the 150 a stake-deducting payout would give
    assert_eq!(result.final_balance, 200);
    assert_eq!(ReportBuilder::new().win_rate(&result), 1.0);
}

#[test]
fn test_withdraw_over_balance_is_violation() {
    let engine = ReplayEngine::standard(registry());
    let player = Player::new("p2", vec![Action::deposit(50), Action::withdraw(80)]);

    let result = engine.replay(&player);
    assert!(!result.is_compliant());
    assert_eq!(result.first_violation(), Some(&Action::withdraw(80)));
    assert_eq!(
        ReportBuilder::new().violation_descriptor(&result).as_deref(),
        Some("WITHDRAW  80 null")
    );
}

#[test]
fn test_bet_on_unknown_match_is_noop() {
    let engine = ReplayEngine::standard(registry());
    let player = Player::new("p3", vec![Action::deposit(10), Action::bet("mX", 10, Side::A)]);

    let result = engine.replay(&player);
    assert!(result.is_compliant());
    assert_eq!(result.final_balance, 10);
    assert_eq!(result.bet_outcomes, vec![BetOutcome::UnknownMatch]);
    assert_eq!(ReportBuilder::new().win_rate(&result), 0.0);
}

#[test]
fn test_losing_bet_forfeits_stake() {
    let engine = ReplayEngine::standard(registry());
    let player = Player::new(
        "p5",
        vec![Action::deposit(100), Action::bet("m1", 60, Side::A), Action::withdraw(40)],
    );

    let result = engine.replay(&player);
    assert!(result.is_compliant());
    assert_eq!(result.final_balance, 0);
}

#[test]
fn test_bet_larger_than_balance_halts() {
    let engine = ReplayEngine::standard(registry());
    let player = Player::new(
        "p6",
        vec![
            Action::deposit(20),
            Action::bet("m0", 20, Side::A),
            Action::bet("m0", 61, Side::A),
        ],
    );

    let result = engine.replay(&player);
    assert_eq!(result.final_balance, 60);
    assert_eq!(
        result.verdict,
        Verdict::Violated {
            index: 2,
            action: Action::bet("m0", 61, Side::A),
            reason: ValidationError::InsufficientBalance { amount: 61, balance: 60 },
        }
    );
}

#[test]
fn test_negative_withdraw_is_violation() {
    let engine = ReplayEngine::standard(registry());
    let player = Player::new("p7", vec![Action::deposit(20), Action::withdraw(-1)]);

    let result = engine.replay(&player);
    assert!(matches!(
        result.verdict,
        Verdict::Violated { index: 1, reason: ValidationError::NegativeAmount { amount: -1 }, .. }
    ));
}

#[test]
fn test_fractional_payout_truncates() {
    let engine = ReplayEngine::standard(registry());
    // 33 * 0.45 = 14.85
    let player = Player::new("p8", vec![Action::deposit(33), Action::bet("m3", 33, Side::A)]);

    let result = engine.replay(&player);
    assert_eq!(result.final_balance, 47);
}

#[test]
fn test_replay_all_keeps_player_order() {
    let engine = ReplayEngineBuilder::new()
        .with_registry(registry())
        .with_rules(StandardRules)
        .with_parallel(true)
        .build()
        .unwrap();
    let players = vec![
        Player::new("zed", vec![Action::deposit(1)]),
        Player::new("amy", vec![Action::withdraw(1)]),
        Player::new("bob", vec![Action::deposit(2)]),
    ];

    let ids: Vec<String> = engine
        .replay_all(&players)
        .into_iter()
        .map(|r| r.player_id)
        .collect();
    assert_eq!(ids, vec!["zed", "amy", "bob"]);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// A compliant player had every action applied
    #[test]
    fn property_compliant_applies_everything(player in arbitrary_player()) {
        let result = ReplayEngine::standard(registry()).replay(&player);
        if result.is_compliant() {
            prop_assert_eq!(result.trace.actions_applied, player.actions.len());
            prop_assert_eq!(result.trace.transitions.len(), player.actions.len());
        }
    }

    /// A non-compliant player stopped right before an illegal Bet or Withdraw
    #[test]
    fn property_violation_follows_applied_prefix(player in arbitrary_player()) {
        let result = ReplayEngine::standard(registry()).replay(&player);
        if let Verdict::Violated { index, action, .. } = &result.verdict {
            prop_assert_eq!(*index, result.trace.actions_applied);
            prop_assert_eq!(action, &player.actions[*index]);
            prop_assert!(action.kind.draws_on_balance());
            prop_assert!(action.amount < 0 || action.amount > result.final_balance);
            prop_assert!(StandardRules.validate(action, result.final_balance).is_err());
        }
    }

    /// Balances never go negative and transitions chain from zero
    #[test]
    fn property_balance_chain(player in arbitrary_player()) {
        let result = ReplayEngine::standard(registry()).replay(&player);
        let mut expected_from = 0;
        for transition in &result.trace.transitions {
            prop_assert_eq!(transition.from, expected_from);
            prop_assert!(transition.to >= 0);
            expected_from = transition.to;
        }
        prop_assert_eq!(result.final_balance, expected_from);
    }

    /// Win rate stays within [0, 1] and has at most two decimals
    #[test]
    fn property_win_rate_bounds(player in arbitrary_player()) {
        let result = ReplayEngine::standard(registry()).replay(&player);
        let rate = ReportBuilder::new().win_rate(&result);
        prop_assert!((0.0..=1.0).contains(&rate));
        prop_assert!(((rate * 100.0).round() - rate * 100.0).abs() < 1e-9);
        if !player.actions.iter().any(|a| a.kind == ActionKind::Bet) {
            prop_assert_eq!(rate, 0.0);
        }
    }

    /// Casino delta is losing stakes minus winning payouts over every bet,
    /// whatever the players' compliance
    #[test]
    fn property_casino_delta(players in prop::collection::vec(arbitrary_player(), 0..8)) {
        let registry = registry();
        let mut expected = 0i128;
        for player in &players {
            for action in player.actions.iter().filter(|a| a.kind == ActionKind::Bet) {
                match StandardRules.settle(action, &registry) {
                    BetOutcome::Won { payout } => expected -= i128::from(payout),
                    BetOutcome::Lost { stake } => expected += i128::from(stake),
                    BetOutcome::Draw | BetOutcome::UnknownMatch => {}
                }
            }
        }

        let replays = ReplayEngine::standard(registry).replay_all(&players);
        prop_assert_eq!(ReportBuilder::new().casino_delta(&replays), expected);
    }

    /// Sequential and parallel replay agree
    #[test]
    fn property_parallel_replay_is_deterministic(players in prop::collection::vec(arbitrary_player(), 0..16)) {
        let sequential = ReplayEngine::standard(registry()).replay_all(&players);
        let parallel = ReplayEngine::standard(registry()).in_parallel(true).replay_all(&players);
        prop_assert_eq!(sequential, parallel);
    }
}
