use parley_backend::adapters::moves_sea::{self, MoveCreate};
use parley_backend::adapters::sessions_sea::{self, SessionCreate};
use parley_backend::errors::domain::{ConflictKind, DomainError};
use parley_backend::infra::db_errors::map_db_err;

use crate::support::stores::sqlite_memory_conn;

#[tokio::test]
async fn moves_are_listed_in_insertion_order() {
    let conn = sqlite_memory_conn().await;
    sessions_sea::create_if_none_open(&conn, SessionCreate::opened_by_creator("s", 2))
        .await
        .unwrap();

    for (player, choice) in [("p2", "Defect"), ("p1", "Cooperate"), ("p3", "Defect")] {
        moves_sea::create_move(&conn, MoveCreate::new("s", player, choice))
            .await
            .unwrap();
    }

    assert_eq!(moves_sea::count_by_session(&conn, "s").await.unwrap(), 3);
    let players: Vec<String> = moves_sea::find_all_by_session(&conn, "s")
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.player_id)
        .collect();
    assert_eq!(players, ["p2", "p1", "p3"]);
}

#[tokio::test]
async fn second_move_for_same_player_is_duplicate() {
    let conn = sqlite_memory_conn().await;
    sessions_sea::create_if_none_open(&conn, SessionCreate::opened_by_creator("s", 2))
        .await
        .unwrap();
    moves_sea::create_move(&conn, MoveCreate::new("s", "p1", "Cooperate"))
        .await
        .unwrap();

    let err = moves_sea::create_move(&conn, MoveCreate::new("s", "p1", "Defect"))
        .await
        .unwrap_err();
    assert!(matches!(
        map_db_err(err),
        DomainError::Conflict(ConflictKind::DuplicateMove, _)
    ));
    assert_eq!(moves_sea::count_by_session(&conn, "s").await.unwrap(), 1);
}

#[tokio::test]
async fn same_player_id_in_another_session_is_allowed() {
    let conn = sqlite_memory_conn().await;
    for id in ["a", "b"] {
        sessions_sea::create_if_none_open(&conn, SessionCreate::opened_by_creator(id, 1))
            .await
            .unwrap();
        moves_sea::create_move(&conn, MoveCreate::new(id, "p1", "Cooperate"))
            .await
            .unwrap();
    }
    assert_eq!(moves_sea::count_by_session(&conn, "a").await.unwrap(), 1);
    assert_eq!(moves_sea::count_by_session(&conn, "b").await.unwrap(), 1);
}

#[tokio::test]
async fn move_for_unknown_session_violates_foreign_key() {
    let conn = sqlite_memory_conn().await;
    let err = moves_sea::create_move(&conn, MoveCreate::new("ghost", "p1", "Cooperate"))
        .await
        .unwrap_err();
    assert!(matches!(map_db_err(err), DomainError::Validation(..)));
}
