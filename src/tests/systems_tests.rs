#[cfg(test)]
mod systems_tests {
    use std::time::Duration;

    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

    use crate::board::{Board, BoardState};
    use crate::components::TetrominoType;
    use crate::input::{Command, InputOutcome};
    use crate::systems::{
        command_system, drop_timer_system, focus_system, key_input_system, view_sync_system,
    };
    use crate::tests::test_utils::{create_test_app, key_press};
    use crate::timer::DropTimer;

    fn piece_row(app: &crate::app::App) -> i32 {
        app.board().active_piece().unwrap().position.y
    }

    #[test]
    fn test_drop_timer_moves_piece_down() {
        let mut app = create_test_app(&[TetrominoType::T]);

        assert!(!drop_timer_system(&mut app.world, Duration::from_millis(999)));
        assert_eq!(piece_row(&app), 0);

        assert!(drop_timer_system(&mut app.world, Duration::from_millis(1)));
        assert_eq!(piece_row(&app), 1);
    }

    #[test]
    fn test_stalled_frame_drops_once() {
        let mut app = create_test_app(&[TetrominoType::O]);

        assert!(drop_timer_system(&mut app.world, Duration::from_secs(600)));

        assert_eq!(piece_row(&app), 1);
        assert_eq!(app.board().state(), BoardState::PieceActive);
        assert_eq!(app.board().filled_count(), 0);
        assert!(!drop_timer_system(&mut app.world, Duration::ZERO));
    }

    #[test]
    fn test_ticks_while_paused_are_dropped() {
        let mut app = create_test_app(&[TetrominoType::T]);
        assert_eq!(
            key_input_system(&mut app.world, &key_press(KeyCode::Char('p'))),
            InputOutcome::Applied
        );

        assert!(!drop_timer_system(&mut app.world, Duration::from_secs(3)));
        assert_eq!(piece_row(&app), 0);
        assert_eq!(app.board().state(), BoardState::Paused);
    }

    #[test]
    fn test_focus_loss_stops_drops() {
        let mut app = create_test_app(&[TetrominoType::T]);

        focus_system(&mut app.world, false);
        assert!(!app.world.resource::<DropTimer>().is_running());
        assert!(!drop_timer_system(&mut app.world, Duration::from_secs(5)));
        assert_eq!(piece_row(&app), 0);

        focus_system(&mut app.world, true);
        assert!(drop_timer_system(&mut app.world, Duration::from_secs(1)));
        assert_eq!(piece_row(&app), 1);
    }

    #[test]
    fn test_keys_still_work_without_focus() {
        let mut app = create_test_app(&[TetrominoType::T]);
        focus_system(&mut app.world, false);

        assert_eq!(
            key_input_system(&mut app.world, &key_press(KeyCode::Left)),
            InputOutcome::Applied
        );
        assert_eq!(app.board().active_piece().unwrap().position.x, 2);
    }

    #[test]
    fn test_reset_restarts_timer() {
        let mut app = create_test_app(&[TetrominoType::T]);
        drop_timer_system(&mut app.world, Duration::from_millis(900));

        assert_eq!(command_system(&mut app.world, Command::Reset), InputOutcome::Applied);
        assert!(!drop_timer_system(&mut app.world, Duration::from_millis(200)));
        assert!(drop_timer_system(&mut app.world, Duration::from_millis(800)));
    }

    #[test]
    fn test_unbound_and_released_keys_are_ignored() {
        let mut app = create_test_app(&[TetrominoType::T]);
        let release =
            KeyEvent::new_with_kind(KeyCode::Left, KeyModifiers::NONE, KeyEventKind::Release);

        assert_eq!(key_input_system(&mut app.world, &release), InputOutcome::Ignored);
        assert_eq!(
            key_input_system(&mut app.world, &key_press(KeyCode::Char('x'))),
            InputOutcome::Ignored
        );
        assert_eq!(app.board().active_piece().unwrap().position.x, 3);
    }

    #[test]
    fn test_view_sync_counts_events() {
        let mut app = create_test_app(&[TetrominoType::T]);
        assert_eq!(view_sync_system(&mut app.world), 0);

        {
            let mut board = app.world.resource_mut::<Board>();
            board.move_left();
            board.move_left();
            board.rotate();
        }
        assert_eq!(view_sync_system(&mut app.world), 3);
        assert_eq!(app.view().snapshot(), Some(&app.board().snapshot()));
    }
}
