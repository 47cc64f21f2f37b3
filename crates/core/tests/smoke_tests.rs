use crawl_core::mapgen::{self, MapGenerator, is_fully_connected};
use crawl_core::{
    CellContent, Direction, EntityKind, Game, GameConfig, GameRng, MoveOutcome, Pos, TileKind,
    classify_cell, visible_window,
};

#[test]
fn default_levels_are_connected_for_many_seeds() {
    let params = GameConfig::default().generation;
    for seed in 0..16_u64 {
        let grid = mapgen::generate(&params, &mut GameRng::seed_from_u64(seed)).expect("generate");
        assert!(is_fully_connected(&grid), "seed {seed} produced an island");
        assert_eq!((grid.width(), grid.height()), (100, 100));
    }
}

#[test]
fn per_level_generator_is_reproducible() {
    let params = GameConfig::default().generation;
    let seed_room = Pos::new(params.seed_room_x, params.seed_room_y);
    let generator = MapGenerator::new(8, params);
    let first = generator.generate(3).expect("generate");
    let again = generator.generate(3).expect("generate");
    assert_eq!(first, again);
    assert_eq!(first.tile_at(seed_room), TileKind::Floor);
    assert_ne!(first, generator.generate(4).expect("generate"));
}

#[test]
fn first_level_is_dark_around_a_lit_player() {
    let game = Game::new(31, GameConfig::default()).expect("game");
    let state = game.state();
    let player = state.player().and_then(|p| p.pos).expect("placed player");
    let view = classify_cell(state, player, game.config().rules.light_radius);
    assert_eq!(view.content, CellContent::Entity(EntityKind::Player));
    assert!(view.lit);

    let window = visible_window(player, state.viewport(), state.grid(), &game.config().viewport);
    assert!(window.left <= player.x && player.x < window.right);
    assert!(window.top <= player.y && player.y < window.bottom);
    assert!(window.width() <= state.grid().width());
}

#[test]
fn walking_into_walls_is_harmless() {
    let mut game = Game::new(5, GameConfig::default()).expect("game");
    let mut blocked = 0;
    for _ in 0..200 {
        if game.move_player(Direction::North).expect("move") == MoveOutcome::Blocked {
            blocked += 1;
        }
    }
    assert!(blocked > 0, "two hundred steps north must reach a wall");
    assert_eq!(game.state().check_invariants(), Ok(()));
}
