//! JSON shape of the game state as seen by the relay and the browser.

use serde_json::{json, Value};

use vertex_core::{initialize, Blocker, Cell, GameConfig, GameState, Orientation, Piece, Player};

#[test]
fn test_state_field_names() {
    let state = initialize(&GameConfig::default()).unwrap();
    let value = serde_json::to_value(&state).unwrap();

    assert_eq!(value["boardSize"], 6);
    assert_eq!(value["currentPlayer"], "P1");
    assert_eq!(value["winner"], Value::Null);
    assert_eq!(value["validMoves"], json!([]));
    assert_eq!(value["eliminatedVertices"], json!([]));
    assert_eq!(value["blockers"], json!([]));
    assert_eq!(value["pieces"].as_array().unwrap().len(), 12);
}

#[test]
fn test_piece_shapes() {
    let state = initialize(&GameConfig::default()).unwrap();
    let value = serde_json::to_value(&state).unwrap();
    let pieces = value["pieces"].as_array().unwrap();

    assert_eq!(
        pieces[0],
        json!({
            "id": "box-p1",
            "type": "box",
            "player": "P1",
            "position": {"row": 5, "col": 0}
        })
    );

    let vertex = pieces
        .iter()
        .find(|p| p["id"] == "vertex-p2-0")
        .expect("vertex-p2-0 present");
    assert_eq!(
        vertex,
        &json!({
            "id": "vertex-p2-0",
            "type": "vertex",
            "orientation": "bottom-left",
            "player": "P2",
            "position": {"row": 0, "col": 0}
        })
    );
}

#[test]
fn test_state_after_moves_survives_json() {
    let mut state = initialize(&GameConfig::default()).unwrap();
    state.blockers.push(Blocker::new(Cell::new(2, 2), Cell::new(2, 3)));
    let state = state.apply_move(Cell::new(5, 1)).with_legal_moves();

    let text = serde_json::to_string(&state).unwrap();
    let back: GameState = serde_json::from_str(&text).unwrap();
    assert_eq!(back, state);
    assert_eq!(back.current_player, Player::Two);
}

#[test]
fn test_missing_cache_fields_default() {
    let text = r#"{
        "boardSize": 6,
        "pieces": [],
        "blockers": [{"from": {"row": 2, "col": 2}, "to": {"row": 3, "col": 2}}],
        "currentPlayer": "P2",
        "winner": "P1"
    }"#;
    let state: GameState = serde_json::from_str(text).unwrap();
    assert!(state.valid_moves.is_empty());
    assert!(state.eliminated_vertices.is_empty());
    assert_eq!(state.winner, Some(Player::One));
    assert!(state.is_blocked(Cell::new(3, 2), Cell::new(2, 2)));
}

#[test]
fn test_flat_piece_parses() {
    let text = r#"{"id": "vertex-p1-3", "type": "vertex", "orientation": "top-right", "player": "P1", "position": {"row": 5, "col": 3}}"#;
    let piece: Piece = serde_json::from_str(text).unwrap();
    assert!(piece.is_vertex());
    assert_eq!(piece.orientation(), Some(Orientation::TopRight));
    assert_eq!(piece.owner, Player::One);
}
