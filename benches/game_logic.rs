use std::path::PathBuf;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_squash::core::{Assets, Game, GameConfig, Playfield, Sprite};
use tui_squash::term::{BannerFont, FrameBuffer, StageView, Viewport};
use tui_squash::types::{InputEvent, Key, TimerId, Transition, TICK_MS};

fn shipped_config() -> GameConfig {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config.json");
    GameConfig::load(&path).expect("shipped config")
}

fn assets() -> Assets {
    Assets {
        pumpkin: Sprite::parse(" _)_\n(@@@)").expect("sprite"),
        victim: Sprite::parse("\\o/\n | \n/ \\").expect("sprite"),
        reward: Sprite::parse("*").expect("sprite"),
    }
}

/// A level with a handful of hazards in flight.
fn busy_level() -> Game {
    let mut config = shipped_config();
    config.control.pumpkin_amount = 1_000;
    config.control.initial_speed = 0.05;
    config.control.position_offset = 30.0;
    let mut game = Game::new(config, assets(), Playfield::new(60, 24), 1, 12345);
    game.apply_transition(Transition::Prepared).expect("prepared");
    for _ in 0..8 {
        let mut events = vec![InputEvent::TimerTick(TimerId::Spawn)];
        game.process_frame(&mut events, 0).expect("frame");
    }
    game
}

fn bench_level_frame(c: &mut Criterion) {
    let mut game = busy_level();
    let mut events = Vec::with_capacity(4);

    c.bench_function("level_frame_50ms", |b| {
        b.iter(|| {
            events.clear();
            events.push(InputEvent::KeyDown(Key::Left));
            game.process_frame(&mut events, black_box(TICK_MS)).expect("frame");
        })
    });
}

fn bench_render_level(c: &mut Criterion) {
    let game = busy_level();
    let config = shipped_config();
    let view = StageView::new(BannerFont::load(&config.theme.font_location).expect("font"));
    let viewport = Viewport::new(80, 26);
    let mut fb = FrameBuffer::new(viewport.width, viewport.height);

    c.bench_function("render_level", |b| {
        b.iter(|| {
            view.render_into(&game.scene(), black_box(viewport), &mut fb);
        })
    });
}

criterion_group!(benches, bench_level_frame, bench_render_level);
criterion_main!(benches);
