//! Property tests for focal-driver selection and view-state application

use proptest::prelude::*;
use racedash_telemetry_core::{Player, TelemetryViewState, select_focal_player};

fn player(index: usize, position: Option<u32>) -> Player {
    Player {
        name: format!("DRIVER{index}"),
        position,
        ..Player::default()
    }
}

fn roster() -> impl Strategy<Value = Vec<Player>> {
    prop::collection::vec(prop::option::of(0u32..=22), 0..24).prop_map(|positions| {
        positions
            .into_iter()
            .enumerate()
            .map(|(index, position)| player(index, position))
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn focal_is_first_classified_in_list_order(players in roster()) {
        let expected = players
            .iter()
            .find(|p| p.is_classified())
            .or_else(|| players.first());

        prop_assert_eq!(select_focal_player(&players), expected);
    }

    #[test]
    fn focal_is_none_only_for_empty_list(players in roster()) {
        prop_assert_eq!(select_focal_player(&players).is_none(), players.is_empty());
    }

    #[test]
    fn view_state_focal_matches_free_function(players in roster(), sequence in 1u64..1_000) {
        let mut state = TelemetryViewState::new();
        state.apply_players(players.clone(), sequence);

        prop_assert_eq!(state.focal_player(), select_focal_player(&players));
        prop_assert_eq!(state.sequence(), sequence);
        prop_assert_eq!(state.players().len(), players.len());
    }

    #[test]
    fn classified_players_exclude_unranked(players in roster()) {
        let mut state = TelemetryViewState::new();
        state.apply_players(players, 1);

        for p in state.classified_players() {
            prop_assert!(p.classified_position().is_some());
        }
    }
}

#[test]
fn unclassified_grid_falls_back_to_first_entry() {
    let players = vec![player(0, None), player(1, Some(0))];
    let focal = select_focal_player(&players).map(|p| p.name.as_str());
    assert_eq!(focal, Some("DRIVER0"));
}
